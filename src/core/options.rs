//! Logger construction options and the `create` factory
//!
//! Options can be built in code or read from loosely typed configuration
//! (`serde_json::Value`, a JSON string). Loose input is checked field by
//! field before anything is constructed, and each failure names the field
//! that was wrong.

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::logger::Logger;
use crate::appenders::{FormatOptions, FormattingAppender};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Options accepted by [`create`]
///
/// # Example
///
/// ```
/// use lumberjill::{LoggerOptions, LogLevel};
///
/// let options = LoggerOptions::new("api")
///     .with_timestamp(true)
///     .with_level(LogLevel::Debug);
/// assert!(!options.raw);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerOptions {
    /// Logger identity, shown in every line
    pub name: String,
    /// Emit raw JSON records
    #[serde(default)]
    pub raw: bool,
    /// Prefix formatted lines with the time of day
    #[serde(default)]
    pub timestamp: bool,
    /// Minimum level written
    #[serde(default, deserialize_with = "deserialize_level")]
    pub level: LogLevel,
}

impl LoggerOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw: false,
            timestamp: false,
            level: LogLevel::default(),
        }
    }

    #[must_use]
    pub fn with_raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: bool) -> Self {
        self.timestamp = timestamp;
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(LoggerError::invalid_option("options.name", "non-empty string"));
        }
        Ok(())
    }

    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            raw: self.raw,
            timestamp: self.timestamp,
        }
    }

    /// Read options from loosely typed input
    ///
    /// `null` counts as "not given" for the optional fields. Unknown keys are
    /// ignored.
    ///
    /// ```
    /// use lumberjill::{LoggerOptions, LogLevel};
    /// use serde_json::json;
    ///
    /// let options = LoggerOptions::from_value(Some(&json!({"name": "api", "level": "warn"}))).unwrap();
    /// assert_eq!(options.level, LogLevel::Warn);
    ///
    /// assert!(LoggerOptions::from_value(None).is_err());
    /// assert!(LoggerOptions::from_value(Some(&json!({}))).is_err());
    /// ```
    pub fn from_value(value: Option<&Value>) -> Result<Self> {
        let object = value
            .and_then(Value::as_object)
            .ok_or_else(|| LoggerError::invalid_option("options", "object"))?;

        let name = object
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| LoggerError::invalid_option("options.name", "string"))?;

        let options = Self {
            name: name.to_string(),
            raw: optional_bool(object.get("raw"), "options.raw")?,
            timestamp: optional_bool(object.get("timestamp"), "options.timestamp")?,
            level: optional_level(object.get("level"))?,
        };
        options.validate()?;
        Ok(options)
    }

    /// Parse options from JSON text, with the same checks as [`LoggerOptions::from_value`]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(Some(&value))
    }
}

fn optional_bool(value: Option<&Value>, field: &str) -> Result<bool> {
    match value {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(LoggerError::invalid_option(field, "bool")),
    }
}

fn optional_level(value: Option<&Value>) -> Result<LogLevel> {
    match value {
        None | Some(Value::Null) => Ok(LogLevel::default()),
        Some(Value::Number(n)) => whole_number(n)
            .and_then(|n| u8::try_from(n).ok())
            .and_then(|n| LogLevel::try_from(n).ok())
            .ok_or_else(|| {
                LoggerError::invalid_option("options.level", format!("known level number, got {}", n))
            }),
        Some(Value::String(s)) => s.parse().map_err(|_| {
            LoggerError::invalid_option("options.level", format!("level name, got '{}'", s))
        }),
        Some(_) => Err(LoggerError::invalid_option("options.level", "number")),
    }
}

/// Integral value of a JSON number, so `30.0` reads as `30`
fn whole_number(n: &serde_json::Number) -> Option<u64> {
    n.as_u64().or_else(|| {
        n.as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
            .map(|f| f as u64)
    })
}

/// Accept a level as its number or its name
fn deserialize_level<'de, D>(deserializer: D) -> std::result::Result<LogLevel, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LevelRepr {
        Number(u8),
        Name(String),
    }

    let level = match LevelRepr::deserialize(deserializer)? {
        LevelRepr::Number(n) => LogLevel::try_from(n),
        LevelRepr::Name(name) => name.parse(),
    };
    level.map_err(serde::de::Error::custom)
}

/// Build a logger writing formatted records to stderr
///
/// The logger gets the default error normalizer and exactly one
/// [`FormattingAppender`], configured from `raw` and `timestamp`.
///
/// # Example
///
/// ```
/// use lumberjill::{create, LoggerOptions, INFO};
///
/// let log = create(LoggerOptions::new("test")).unwrap();
/// assert_eq!(log.level().as_u8(), INFO);
/// log.info("hi");
/// ```
pub fn create(options: LoggerOptions) -> Result<Logger> {
    options.validate()?;

    Logger::builder()
        .name(options.name.as_str())
        .level(options.level)
        .appender(FormattingAppender::new(options.format_options()))
        .build()
}

/// [`create`] from loosely typed options
pub fn create_from_value(options: Option<&Value>) -> Result<Logger> {
    create(LoggerOptions::from_value(options)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn invalid_field(result: Result<LoggerOptions>) -> String {
        match result {
            Err(LoggerError::InvalidOption { field, .. }) => field,
            other => panic!("expected option error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_options() {
        assert_eq!(invalid_field(LoggerOptions::from_value(None)), "options");
        assert_eq!(
            invalid_field(LoggerOptions::from_value(Some(&json!("api")))),
            "options"
        );
    }

    #[test]
    fn test_name_checks() {
        assert_eq!(
            invalid_field(LoggerOptions::from_value(Some(&json!({})))),
            "options.name"
        );
        assert_eq!(
            invalid_field(LoggerOptions::from_value(Some(&json!({"name": 7})))),
            "options.name"
        );
        assert_eq!(
            invalid_field(LoggerOptions::from_value(Some(&json!({"name": ""})))),
            "options.name"
        );
    }

    #[test]
    fn test_flag_type_checks() {
        assert_eq!(
            invalid_field(LoggerOptions::from_value(Some(&json!({"name": "a", "raw": "yes"})))),
            "options.raw"
        );
        assert_eq!(
            invalid_field(LoggerOptions::from_value(Some(
                &json!({"name": "a", "timestamp": 1})
            ))),
            "options.timestamp"
        );
        assert_eq!(
            invalid_field(LoggerOptions::from_value(Some(&json!({"name": "a", "level": []})))),
            "options.level"
        );
    }

    #[test]
    fn test_level_values() {
        let options = LoggerOptions::from_value(Some(&json!({"name": "a", "level": 50}))).unwrap();
        assert_eq!(options.level, LogLevel::Error);

        let options = LoggerOptions::from_value(Some(&json!({"name": "a", "level": 30.0}))).unwrap();
        assert_eq!(options.level, LogLevel::Info);

        let options = LoggerOptions::from_value(Some(&json!({"name": "a", "level": "warn"}))).unwrap();
        assert_eq!(options.level, LogLevel::Warn);
    }

    #[test]
    fn test_bad_level_names_the_field() {
        for level in [json!(35), json!(1000), json!(30.5), json!(-10), json!("verbose")] {
            let result = LoggerOptions::from_value(Some(&json!({"name": "a", "level": level})));
            assert_eq!(invalid_field(result), "options.level");
        }

        let err = LoggerOptions::from_value(Some(&json!({"name": "a", "level": 35}))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid option options.level: expected known level number, got 35"
        );
    }

    #[test]
    fn test_defaults_applied() {
        let options =
            LoggerOptions::from_value(Some(&json!({"name": "a", "raw": null, "extra": 1}))).unwrap();
        assert_eq!(options, LoggerOptions::new("a"));
        assert_eq!(options.level, LogLevel::Info);
        assert_eq!(options.format_options(), FormatOptions::default());
    }

    #[test]
    fn test_from_json_str() {
        let options =
            LoggerOptions::from_json_str(r#"{"name": "a", "raw": true, "timestamp": true}"#).unwrap();
        assert!(options.raw);
        assert!(options.timestamp);

        assert!(matches!(
            LoggerOptions::from_json_str("{not json"),
            Err(LoggerError::JsonError(_))
        ));
    }

    #[test]
    fn test_typed_deserialize_accepts_level_names() {
        let options: LoggerOptions =
            serde_json::from_str(r#"{"name": "a", "level": "debug"}"#).unwrap();
        assert_eq!(options.level, LogLevel::Debug);

        let options: LoggerOptions = serde_json::from_str(r#"{"name": "a", "level": 60}"#).unwrap();
        assert_eq!(options.level, LogLevel::Fatal);

        assert!(serde_json::from_str::<LoggerOptions>(r#"{"name": "a", "level": 31}"#).is_err());
    }

    #[test]
    fn test_create_rejects_empty_name() {
        let err = create(LoggerOptions::new("")).err().unwrap();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_create_applies_level() {
        let logger = create_from_value(Some(&json!({"name": "a", "level": 20}))).unwrap();
        assert_eq!(logger.name(), "a");
        assert_eq!(logger.level(), LogLevel::Debug);
    }
}
