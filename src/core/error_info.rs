//! Normalized error descriptions for the `err` record field

use super::field_value::{FieldValue, Fields, ObjectRef};
use std::error::Error;

/// Turns an error into the description stored on a record
///
/// Registered on the logger; [`ErrorInfo::from_error`] is the default.
pub type ErrorSerializer = fn(&(dyn Error + 'static)) -> ErrorInfo;

/// Normalized error description
///
/// The formatting sink only ever needs [`ErrorInfo::stack`]; the remaining
/// members appear when the whole record is rendered as JSON.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ErrorInfo {
    pub name: String,
    pub message: String,
    pub code: Option<String>,
    pub stack: Option<String>,
    /// Structured details carried by wrapping errors
    pub info: Fields,
}

impl ErrorInfo {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        let name = name.into();
        let message = message.into();
        Self {
            stack: Some(format!("{}: {}", name, message)),
            name,
            message,
            code: None,
            info: Fields::new(),
        }
    }

    /// Normalize any error, rendering its `source()` chain into the stack text
    ///
    /// ```
    /// use lumberjill::ErrorInfo;
    ///
    /// let err = std::io::Error::new(std::io::ErrorKind::Other, "boom!");
    /// let info = ErrorInfo::from_error(&err);
    /// assert_eq!(info.stack(), Some("Error: boom!"));
    /// ```
    pub fn from_error(err: &(dyn Error + 'static)) -> Self {
        Self::with_chain("Error", err)
    }

    /// Like [`ErrorInfo::from_error`], naming the error after its type
    pub fn from_typed<E: Error + 'static>(err: &E) -> Self {
        Self::with_chain(short_type_name::<E>(), err)
    }

    fn with_chain(name: &str, err: &(dyn Error + 'static)) -> Self {
        let mut info = Self::new(name, err.to_string());
        let mut stack = info.stack.take().unwrap_or_default();

        let mut source = err.source();
        while let Some(cause) = source {
            stack.push_str("\nCaused by: ");
            stack.push_str(&cause.to_string());
            source = cause.source();
        }

        info.stack = Some(stack);
        info
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Replace the rendered stack, e.g. with a captured backtrace
    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    #[must_use]
    pub fn with_info<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.info.add_field(key, value);
        self
    }

    pub fn stack(&self) -> Option<&str> {
        self.stack.as_deref()
    }

    /// Object form used inside rendered records
    pub fn to_field_value(&self) -> FieldValue {
        let object = ObjectRef::object();
        object.insert("message", self.message.as_str());
        object.insert("name", self.name.as_str());
        if let Some(stack) = &self.stack {
            object.insert("stack", stack.as_str());
        }
        if let Some(code) = &self.code {
            object.insert("code", code.as_str());
        }
        if !self.info.is_empty() {
            object.insert("info", self.info.clone());
        }
        FieldValue::Object(object)
    }
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
