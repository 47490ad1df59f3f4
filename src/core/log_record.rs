//! Log record structure

use super::error_info::ErrorInfo;
use super::field_value::{Fields, ObjectRef};
use super::log_level::LogLevel;
use chrono::{DateTime, Local, SecondsFormat, Utc};
use std::sync::OnceLock;

/// Record format version written as `v`
pub const LOG_VERSION: u8 = 0;

/// Keys owned by the logger itself
///
/// These never show up in the contextual block of formatted output, even
/// when a caller supplies a field with one of these names.
pub const BLACKLISTED_FIELDS: [&str; 8] = [
    "name", "hostname", "pid", "level", "msg", "time", "v", "err",
];

static HOSTNAME: OnceLock<String> = OnceLock::new();

/// Get cached host name, resolving it on first access
fn get_hostname() -> &'static str {
    HOSTNAME.get_or_init(|| {
        hostname::get()
            .ok()
            .and_then(|name| name.into_string().ok())
            .unwrap_or_else(|| "localhost".to_string())
    })
}

/// One log event, as handed to appenders
///
/// Records are built per log call and live only as long as the write.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub name: String,
    pub hostname: String,
    pub pid: u32,
    pub level: LogLevel,
    pub msg: String,
    pub time: DateTime<Utc>,
    pub v: u8,
    pub err: Option<ErrorInfo>,
    /// Caller-supplied context, bound fields first
    pub fields: Fields,
}

impl LogRecord {
    pub fn new(name: impl Into<String>, level: LogLevel, msg: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hostname: get_hostname().to_string(),
            pid: std::process::id(),
            level,
            msg: msg.into(),
            time: Utc::now(),
            v: LOG_VERSION,
            err: None,
            fields: Fields::new(),
        }
    }

    pub fn with_fields(mut self, fields: &Fields) -> Self {
        self.fields.merge(fields);
        self
    }

    pub fn with_error(mut self, err: ErrorInfo) -> Self {
        self.err = Some(err);
        self
    }

    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = time;
        self
    }

    pub fn is_blacklisted(key: &str) -> bool {
        BLACKLISTED_FIELDS.contains(&key)
    }

    /// Full record as a JSON-ready object, logger fields included
    pub fn to_object(&self) -> ObjectRef {
        let object = ObjectRef::object();
        object.insert("name", self.name.as_str());
        object.insert("hostname", self.hostname.as_str());
        object.insert("pid", self.pid);
        object.insert("level", self.level.as_u8() as i64);
        for (key, value) in self.fields.iter() {
            object.insert(key.as_str(), value.clone());
        }
        if let Some(err) = &self.err {
            object.insert("err", err.to_field_value());
        }
        object.insert("msg", self.msg.as_str());
        object.insert("time", self.time.to_rfc3339_opts(SecondsFormat::Millis, true));
        object.insert("v", self.v as i64);
        object
    }

    /// Caller context with logger-owned keys removed
    pub fn contextual_remainder(&self) -> Fields {
        self.fields
            .iter()
            .filter(|(key, _)| !Self::is_blacklisted(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Local wall-clock time of day, `HH:MM:SS`
    pub fn time_of_day(&self) -> String {
        self.time.with_timezone(&Local).format("%H:%M:%S").to_string()
    }
}
