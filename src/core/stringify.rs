//! Cycle-safe JSON rendering of field values
//!
//! Values are walked while keeping the chain of object/array nodes between
//! the root and the current position. A node that reappears on that chain is
//! a back-reference and is written as [`CIRCULAR_MARKER`] instead of being
//! descended into again. Nodes that merely repeat elsewhere in the graph
//! (siblings, cousins) are written in full.
//!
//! [`FieldValue::Undefined`] is written as the string [`UNDEFINED_MARKER`]
//! so that keys without a value survive in the output, while
//! [`FieldValue::Null`] stays a JSON `null`.

use super::error::Result;
use super::field_value::FieldValue;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::cell::RefCell;

/// Replacement for a reference back to an ancestor node
pub const CIRCULAR_MARKER: &str = "[Circular ~]";

/// Replacement for a value that is present but undefined
pub const UNDEFINED_MARKER: &str = "undefined";

/// Render a value as JSON text
///
/// Returns an empty string when there is nothing worth rendering: no value
/// at all, or a value for which [`FieldValue::is_empty`] holds. With `raw`
/// the output is compact, otherwise it is indented by two spaces.
///
/// # Examples
///
/// ```
/// use lumberjill::{stringify, FieldValue, Fields};
///
/// let value = FieldValue::from(Fields::new().with_field("hello", FieldValue::Undefined));
/// assert_eq!(stringify(Some(&value), true).unwrap(), r#"{"hello":"undefined"}"#);
/// assert_eq!(stringify(None, true).unwrap(), "");
/// ```
pub fn stringify(value: Option<&FieldValue>, raw: bool) -> Result<String> {
    let value = match value {
        Some(value) if !value.is_empty() => value,
        _ => return Ok(String::new()),
    };

    let path = RefCell::new(Vec::new());
    let node = Decycle { value, path: &path };

    let json = if raw {
        serde_json::to_string(&node)?
    } else {
        serde_json::to_string_pretty(&node)?
    };
    Ok(json)
}

/// Serialize adapter carrying the active ancestor chain
struct Decycle<'a> {
    value: &'a FieldValue,
    path: &'a RefCell<Vec<usize>>,
}

impl<'a> Decycle<'a> {
    fn child<'b>(&'b self, value: &'b FieldValue) -> Decycle<'b> {
        Decycle {
            value,
            path: self.path,
        }
    }

    fn on_path(&self, id: usize) -> bool {
        self.path.borrow().contains(&id)
    }

    fn enter(&self, id: usize) -> PathGuard<'a> {
        self.path.borrow_mut().push(id);
        PathGuard { path: self.path }
    }
}

/// Pops the node pushed by [`Decycle::enter`], also on early error returns
struct PathGuard<'a> {
    path: &'a RefCell<Vec<usize>>,
}

impl Drop for PathGuard<'_> {
    fn drop(&mut self) {
        self.path.borrow_mut().pop();
    }
}

impl Serialize for Decycle<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.value {
            FieldValue::Undefined => serializer.serialize_str(UNDEFINED_MARKER),
            FieldValue::Null => serializer.serialize_unit(),
            FieldValue::Bool(b) => serializer.serialize_bool(*b),
            FieldValue::Int(i) => serializer.serialize_i64(*i),
            FieldValue::Float(f) => serializer.serialize_f64(*f),
            FieldValue::String(s) => serializer.serialize_str(s),
            FieldValue::Array(array) => {
                if self.on_path(array.id()) {
                    return serializer.serialize_str(CIRCULAR_MARKER);
                }
                let _guard = self.enter(array.id());
                let items = array.read();
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items.iter() {
                    seq.serialize_element(&self.child(item))?;
                }
                seq.end()
            }
            FieldValue::Object(object) => {
                if self.on_path(object.id()) {
                    return serializer.serialize_str(CIRCULAR_MARKER);
                }
                let _guard = self.enter(object.id());
                let members = object.read();
                let mut map = serializer.serialize_map(Some(members.len()))?;
                for (key, value) in members.iter() {
                    map.serialize_entry(key, &self.child(value))?;
                }
                map.end()
            }
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let path = RefCell::new(Vec::new());
        Decycle { value: self, path: &path }.serialize(serializer)
    }
}
