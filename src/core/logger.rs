//! Main logger implementation
//!
//! A [`Logger`] turns each call into a [`LogRecord`] and hands it to its
//! appenders synchronously, in the calling thread. There is no queue: when a
//! logging method returns, the record has been written (or reported as lost).

use super::{
    appender::Appender,
    error::{LoggerError, Result},
    error_info::{ErrorInfo, ErrorSerializer},
    field_value::Fields,
    log_level::LogLevel,
    log_record::LogRecord,
    metrics::LoggerMetrics,
};
use parking_lot::RwLock;
use std::error::Error;
use std::sync::Arc;

pub struct Logger {
    name: String,
    /// Fields bound at construction or by `child`, added to every record
    fields: Fields,
    min_level: LogLevel,
    /// Shared with child loggers
    appenders: Arc<RwLock<Vec<Box<dyn Appender>>>>,
    err_serializer: ErrorSerializer,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use lumberjill::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .name("worker")
    ///     .level(LogLevel::Debug)
    ///     .appender(FormattingAppender::new(FormatOptions::default()))
    ///     .build()
    ///     .unwrap();
    /// assert!(logger.is_enabled(LogLevel::Debug));
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> LogLevel {
        self.min_level
    }

    pub fn set_level(&mut self, level: LogLevel) {
        self.min_level = level;
    }

    /// Whether a record at `level` would be written
    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    /// Fields bound to this logger
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Derive a logger that writes to the same appenders with extra bound fields
    ///
    /// The child starts at the parent's level; changing either level later
    /// does not affect the other.
    ///
    /// ```
    /// use lumberjill::prelude::*;
    ///
    /// let parent = Logger::builder().name("api").build().unwrap();
    /// let child = parent.child(Fields::new().with_field("request_id", "r-17"));
    ///
    /// assert_eq!(child.name(), "api");
    /// assert!(child.fields().contains_key("request_id"));
    /// assert!(parent.fields().is_empty());
    /// ```
    #[must_use]
    pub fn child(&self, fields: Fields) -> Logger {
        let mut bound = self.fields.clone();
        bound.merge(&fields);

        Logger {
            name: self.name.clone(),
            fields: bound,
            min_level: self.min_level,
            appenders: Arc::clone(&self.appenders),
            err_serializer: self.err_serializer,
            metrics: Arc::clone(&self.metrics),
        }
    }

    pub fn flush(&self) -> Result<()> {
        let mut appenders = self.appenders.write();
        for appender in appenders.iter_mut() {
            appender.flush()?;
        }
        Ok(())
    }

    /// Log and report the outcome
    ///
    /// Returns `Ok(false)` when the level is filtered out, `Ok(true)` when
    /// every appender wrote the record, and the first appender failure
    /// otherwise. Remaining appenders still receive the record after one
    /// fails.
    pub fn try_log(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        fields: Option<&Fields>,
        err: Option<&(dyn Error + 'static)>,
    ) -> Result<bool> {
        if !self.is_enabled(level) {
            self.metrics.record_filtered();
            return Ok(false);
        }

        let record = self.make_record(level, message.into(), fields, err);
        let mut appenders = self.appenders.write();
        Self::process_sync(&mut appenders, &record, &self.metrics)?;
        Ok(true)
    }

    fn make_record(
        &self,
        level: LogLevel,
        message: String,
        fields: Option<&Fields>,
        err: Option<&(dyn Error + 'static)>,
    ) -> LogRecord {
        let mut record = LogRecord::new(self.name.as_str(), level, message).with_fields(&self.fields);
        if let Some(fields) = fields {
            record = record.with_fields(fields);
        }
        if let Some(err) = err {
            record = record.with_error((self.err_serializer)(err));
        }
        record
    }

    /// Write one record to every appender with per-appender panic isolation
    fn process_sync(
        appenders: &mut [Box<dyn Appender>],
        record: &LogRecord,
        metrics: &LoggerMetrics,
    ) -> Result<()> {
        let mut first_error = None;

        for (idx, appender) in appenders.iter_mut().enumerate() {
            let append_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.append(record)
            }));

            let failure = match append_result {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => e,
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    LoggerError::writer(format!(
                        "appender #{} ({}) panicked: {}",
                        idx,
                        appender.name(),
                        panic_msg
                    ))
                }
            };

            if first_error.is_none() {
                first_error = Some(failure);
            }
        }

        match first_error {
            Some(e) => {
                metrics.record_dropped();
                Err(e)
            }
            None => {
                metrics.record_logged();
                Ok(())
            }
        }
    }

    /// Log, reporting failures on stderr instead of returning them
    fn emit(
        &self,
        level: LogLevel,
        message: String,
        fields: Option<&Fields>,
        err: Option<&(dyn Error + 'static)>,
    ) {
        if let Err(e) = self.try_log(level, message, fields, err) {
            eprintln!("[LOGGER ERROR] {} failed to write a {} record: {}", self.name, level, e);
        }
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.emit(level, message.into(), None, None);
    }

    /// Log with structured context fields
    pub fn log_with_context(&self, level: LogLevel, message: impl Into<String>, context: Fields) {
        self.emit(level, message.into(), Some(&context), None);
    }

    /// Log with an error, normalized into the record's `err` field
    pub fn log_with_error(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        err: &(dyn Error + 'static),
    ) {
        self.emit(level, message.into(), None, Some(err));
    }

    /// Log with context fields and an error in one record
    ///
    /// ```
    /// use lumberjill::prelude::*;
    ///
    /// let log = lumberjill::create(LoggerOptions::new("jobs")).unwrap();
    /// let err = std::io::Error::new(std::io::ErrorKind::TimedOut, "upstream timed out");
    /// log.log_with_context_and_error(
    ///     LogLevel::Error,
    ///     "job failed",
    ///     Fields::new().with_field("job_id", 7),
    ///     &err,
    /// );
    /// ```
    pub fn log_with_context_and_error(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        context: Fields,
        err: &(dyn Error + 'static),
    ) {
        self.emit(level, message.into(), Some(&context), Some(err));
    }

    #[inline]
    pub fn trace(&self, message: impl Into<String>) {
        self.log(LogLevel::Trace, message);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(LogLevel::Fatal, message);
    }

    /// Helper for structured info logging
    pub fn info_with_context(&self, message: impl Into<String>, context: Fields) {
        self.log_with_context(LogLevel::Info, message, context);
    }

    /// Helper for structured error logging
    pub fn error_with_context(&self, message: impl Into<String>, context: Fields) {
        self.log_with_context(LogLevel::Error, message, context);
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use lumberjill::prelude::*;
///
/// let logger = Logger::builder()
///     .name("billing")
///     .level(LogLevel::Warn)
///     .field("region", "eu-west-1")
///     .appender(FormattingAppender::new(FormatOptions { raw: true, timestamp: false }))
///     .build()
///     .unwrap();
/// assert_eq!(logger.level(), LogLevel::Warn);
/// ```
pub struct LoggerBuilder {
    name: String,
    min_level: LogLevel,
    fields: Fields,
    appenders: Vec<Box<dyn Appender>>,
    err_serializer: ErrorSerializer,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            name: String::new(),
            min_level: LogLevel::Info,
            fields: Fields::new(),
            appenders: Vec::new(),
            err_serializer: ErrorInfo::from_error,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Bind a field to every record of the logger
    #[must_use = "builder methods return a new value"]
    pub fn field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<super::field_value::FieldValue>,
    {
        self.fields.add_field(key, value);
        self
    }

    /// Add an appender
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    /// Replace the normalizer applied to errors passed with a log call
    #[must_use = "builder methods return a new value"]
    pub fn err_serializer(mut self, serializer: ErrorSerializer) -> Self {
        self.err_serializer = serializer;
        self
    }

    /// Build the Logger
    pub fn build(self) -> Result<Logger> {
        if self.name.is_empty() {
            return Err(LoggerError::config("LoggerBuilder", "name must not be empty"));
        }

        Ok(Logger {
            name: self.name,
            fields: self.fields,
            min_level: self.min_level,
            appenders: Arc::new(RwLock::new(self.appenders)),
            err_serializer: self.err_serializer,
            metrics: Arc::new(LoggerMetrics::new()),
        })
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field_value::FieldValue;
    use parking_lot::Mutex;

    /// Captures records instead of rendering them
    struct CaptureAppender {
        records: Arc<Mutex<Vec<LogRecord>>>,
    }

    impl Appender for CaptureAppender {
        fn append(&mut self, record: &LogRecord) -> Result<()> {
            self.records.lock().push(record.clone());
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "capture"
        }
    }

    struct FailingAppender;

    impl Appender for FailingAppender {
        fn append(&mut self, _record: &LogRecord) -> Result<()> {
            Err(LoggerError::writer("sink closed"))
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct PanickingAppender;

    impl Appender for PanickingAppender {
        fn append(&mut self, _record: &LogRecord) -> Result<()> {
            panic!("render exploded");
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "panicking"
        }
    }

    fn capturing(level: LogLevel) -> (Logger, Arc<Mutex<Vec<LogRecord>>>) {
        let records = Arc::new(Mutex::new(Vec::new()));
        let logger = Logger::builder()
            .name("test")
            .level(level)
            .appender(CaptureAppender {
                records: Arc::clone(&records),
            })
            .build()
            .unwrap();
        (logger, records)
    }

    #[test]
    fn test_builder_requires_name() {
        let err = Logger::builder().build().err().unwrap();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_level_filtering() {
        let (logger, records) = capturing(LogLevel::Warn);

        logger.debug("hidden");
        logger.info("hidden");
        logger.warn("shown");
        logger.fatal("shown");

        let records = records.lock();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].level, LogLevel::Warn);
        assert_eq!(logger.metrics().filtered_count(), 2);
        assert_eq!(logger.metrics().total_logged(), 2);
    }

    #[test]
    fn test_context_and_error_reach_record() {
        let (logger, records) = capturing(LogLevel::Info);
        let err = std::io::Error::new(std::io::ErrorKind::Other, "boom!");

        logger.info_with_context("hi", Fields::new().with_field("hello", "world"));
        logger.log_with_error(LogLevel::Error, "failed", &err);

        let records = records.lock();
        assert_eq!(records[0].fields.get("hello"), Some(&FieldValue::from("world")));
        assert_eq!(records[1].err.as_ref().unwrap().stack(), Some("Error: boom!"));
    }

    #[test]
    fn test_custom_err_serializer() {
        fn tagged(err: &(dyn Error + 'static)) -> ErrorInfo {
            ErrorInfo::from_error(err).with_code("E_TAGGED")
        }

        let records = Arc::new(Mutex::new(Vec::new()));
        let logger = Logger::builder()
            .name("test")
            .err_serializer(tagged)
            .appender(CaptureAppender {
                records: Arc::clone(&records),
            })
            .build()
            .unwrap();

        let err = std::io::Error::new(std::io::ErrorKind::Other, "boom!");
        logger.log_with_error(LogLevel::Warn, "hi", &err);

        let records = records.lock();
        assert_eq!(records[0].err.as_ref().unwrap().code.as_deref(), Some("E_TAGGED"));
    }

    #[test]
    fn test_child_binds_fields_and_shares_appenders() {
        let (parent, records) = capturing(LogLevel::Info);
        let parent = Logger {
            fields: Fields::new().with_field("service", "api"),
            ..parent
        };
        let child = parent.child(Fields::new().with_field("request_id", 7));

        child.info_with_context("handled", Fields::new().with_field("status", 200));
        parent.info("idle");

        let records = records.lock();
        assert_eq!(records.len(), 2);
        let keys: Vec<&String> = records[0].fields.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["service", "request_id", "status"]);
        assert!(!records[1].fields.contains_key("request_id"));
    }

    #[test]
    fn test_child_level_is_independent() {
        let (parent, _records) = capturing(LogLevel::Info);
        let mut child = parent.child(Fields::new());
        child.set_level(LogLevel::Error);

        assert!(parent.is_enabled(LogLevel::Info));
        assert!(!child.is_enabled(LogLevel::Info));
    }

    #[test]
    fn test_failing_appender_is_isolated() {
        let records = Arc::new(Mutex::new(Vec::new()));
        let logger = Logger::builder()
            .name("test")
            .appender(FailingAppender)
            .appender(PanickingAppender)
            .appender(CaptureAppender {
                records: Arc::clone(&records),
            })
            .build()
            .unwrap();

        let result = logger.try_log(LogLevel::Info, "hi", None, None);

        assert!(matches!(result, Err(LoggerError::WriterError(ref m)) if m == "sink closed"));
        assert_eq!(records.lock().len(), 1);
        assert_eq!(logger.metrics().dropped_count(), 1);
    }

    #[test]
    fn test_try_log_reports_filtering() {
        let (logger, _records) = capturing(LogLevel::Info);
        assert!(!logger.try_log(LogLevel::Debug, "quiet", None, None).unwrap());
        assert!(logger.try_log(LogLevel::Info, "loud", None, None).unwrap());
    }
}
