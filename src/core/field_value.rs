//! Contextual values attached to log records
//!
//! This module provides:
//! - `FieldValue`: a dynamically typed value, including the "no value" marker
//! - `Shared<T>`: identity-bearing object/array nodes that may form cycles
//! - `Fields`: ordered key-value pairs passed with a log call

use indexmap::IndexMap;
use parking_lot::{RwLock, RwLockReadGuard};
use std::fmt;
use std::sync::Arc;

/// Ordered object body
pub type Map = IndexMap<String, FieldValue>;

/// Shared object node
pub type ObjectRef = Shared<Map>;

/// Shared array node
pub type ArrayRef = Shared<Vec<FieldValue>>;

/// A node in a value graph
///
/// Clones share the same node. Two handles are "the same object" when they
/// point at the same allocation, which is what cycle detection keys on;
/// equal contents in distinct nodes are never treated as the same object.
#[derive(Default)]
pub struct Shared<T>(Arc<RwLock<T>>);

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Self(Arc::new(RwLock::new(value)))
    }

    /// Identity of the underlying node
    #[inline]
    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.0.read()
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> PartialEq for Shared<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Shared<Map> {
    pub fn object() -> Self {
        Self::new(Map::new())
    }

    /// Insert or replace a member, keeping its original position on replace
    pub fn insert<K, V>(&self, key: K, value: V) -> Option<FieldValue>
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.0.write().insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<FieldValue> {
        self.0.read().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }
}

impl Shared<Vec<FieldValue>> {
    pub fn array() -> Self {
        Self::new(Vec::new())
    }

    pub fn push<V: Into<FieldValue>>(&self, value: V) {
        self.0.write().push(value.into());
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }
}

// Contents are not printed: a node may (indirectly) contain itself.
impl fmt::Debug for Shared<Map> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectRef")
            .field("id", &format_args!("{:#x}", self.id()))
            .field("len", &self.len())
            .finish()
    }
}

impl fmt::Debug for Shared<Vec<FieldValue>> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayRef")
            .field("id", &format_args!("{:#x}", self.id()))
            .field("len", &self.len())
            .finish()
    }
}

/// Value type for structured logging fields
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    /// A key that is present but holds no value
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(ArrayRef),
    Object(ObjectRef),
}

impl FieldValue {
    /// Truthy-and-non-empty test used to decide whether a value is worth rendering
    ///
    /// Scalars other than non-empty strings count as empty, as do arrays and
    /// objects without members.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Undefined
            | FieldValue::Null
            | FieldValue::Bool(_)
            | FieldValue::Int(_)
            | FieldValue::Float(_) => true,
            FieldValue::String(s) => s.is_empty(),
            FieldValue::Array(items) => items.is_empty(),
            FieldValue::Object(map) => map.is_empty(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            other => {
                let json = serde_json::to_string(other).map_err(|_| fmt::Error)?;
                write!(f, "{}", json)
            }
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u64> for FieldValue {
    fn from(i: u64) -> Self {
        i64::try_from(i)
            .map(FieldValue::Int)
            .unwrap_or(FieldValue::Float(i as f64))
    }
}

impl From<usize> for FieldValue {
    fn from(i: usize) -> Self {
        FieldValue::from(i as u64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(items: Vec<T>) -> Self {
        FieldValue::Array(Shared::new(items.into_iter().map(Into::into).collect()))
    }
}

impl From<ObjectRef> for FieldValue {
    fn from(object: ObjectRef) -> Self {
        FieldValue::Object(object)
    }
}

impl From<ArrayRef> for FieldValue {
    fn from(array: ArrayRef) -> Self {
        FieldValue::Array(array)
    }
}

impl From<Fields> for FieldValue {
    fn from(fields: Fields) -> Self {
        FieldValue::Object(fields.into_object())
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Int(i),
                None => FieldValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => FieldValue::String(s),
            Value::Array(items) => items.into(),
            Value::Object(map) => {
                let object = ObjectRef::object();
                for (key, value) in map {
                    object.insert(key, FieldValue::from(value));
                }
                FieldValue::Object(object)
            }
        }
    }
}

/// Ordered key-value pairs supplied with a log call or bound to a child logger
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    entries: Map,
}

impl Fields {
    pub fn new() -> Self {
        Self { entries: Map::new() }
    }

    /// Add a field
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Add a field (mutable version)
    pub fn add_field<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.entries.insert(key.into(), value.into());
    }

    /// Overlay another set of fields; later keys win but keep their first position
    pub fn merge(&mut self, other: &Fields) {
        for (key, value) in &other.entries {
            self.entries.insert(key.clone(), value.clone());
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Move the fields into a fresh shared object node
    pub fn into_object(self) -> ObjectRef {
        Shared::new(self.entries)
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (key, value) in iter {
            fields.add_field(key, value);
        }
        fields
    }
}
