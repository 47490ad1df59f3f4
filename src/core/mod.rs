//! Core logger types and traits

pub mod appender;
pub mod error;
pub mod error_info;
pub mod field_value;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod metrics;
pub mod options;
pub mod stringify;

pub use appender::Appender;
pub use error::{LoggerError, Result};
pub use error_info::{ErrorInfo, ErrorSerializer};
pub use field_value::{ArrayRef, FieldValue, Fields, ObjectRef, Shared};
pub use log_level::{LogLevel, DEBUG, ERROR, FATAL, INFO, TRACE, WARN};
pub use log_record::{LogRecord, BLACKLISTED_FIELDS, LOG_VERSION};
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use options::{create, create_from_value, LoggerOptions};
pub use stringify::{stringify, CIRCULAR_MARKER, UNDEFINED_MARKER};
