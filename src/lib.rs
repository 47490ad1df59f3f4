//! # lumberjill
//!
//! Structured log records rendered for people or for machines.
//!
//! Each log call becomes one record. Records are written to stderr either as
//! a compact JSON object (`raw`) or as a colorized single line:
//!
//! ```text
//! [14:05:07][api] warn slow request {
//!   "elapsed_ms": 812
//! }
//! ```
//!
//! ## Quick start
//!
//! ```
//! use lumberjill::prelude::*;
//!
//! let log = lumberjill::create(LoggerOptions::new("api").with_timestamp(true))?;
//!
//! log.info("listening");
//! log.info_with_context("request", Fields::new().with_field("path", "/health"));
//!
//! let err = std::io::Error::new(std::io::ErrorKind::Other, "boom!");
//! log.log_with_error(LogLevel::Error, "upstream failed", &err);
//! # Ok::<(), lumberjill::LoggerError>(())
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{FormatOptions, FormattingAppender};
    pub use crate::core::{
        create, create_from_value, stringify, Appender, ErrorInfo, FieldValue, Fields, LogLevel,
        LogRecord, Logger, LoggerBuilder, LoggerError, LoggerOptions, ObjectRef, Result,
    };
}

pub use appenders::{FormatOptions, FormattingAppender};
pub use core::{
    create, create_from_value, stringify, Appender, ArrayRef, ErrorInfo, ErrorSerializer,
    FieldValue, Fields, LogLevel, LogRecord, Logger, LoggerBuilder, LoggerError, LoggerMetrics,
    LoggerOptions, ObjectRef, Result, Shared, BLACKLISTED_FIELDS, CIRCULAR_MARKER, DEBUG, ERROR,
    FATAL, INFO, TRACE, UNDEFINED_MARKER, WARN,
};
