//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. Context fields can
//! be given in braces before the message.
//!
//! # Examples
//!
//! ```
//! use lumberjill::prelude::*;
//! use lumberjill::info;
//!
//! let logger = lumberjill::create(LoggerOptions::new("app")).unwrap();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // With context fields
//! info!(logger, { "user_id" => 42, "action" => "login" }, "User signed in");
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use lumberjill::prelude::*;
/// # let logger = lumberjill::create(LoggerOptions::new("app")).unwrap();
/// use lumberjill::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// log!(logger, LogLevel::Warn, { "retries" => 3 }, "Giving up on {}", "upstream");
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, { $($key:expr => $value:expr),* $(,)? }, $($arg:tt)+) => {
        $logger.log_with_context(
            $level,
            format!($($arg)+),
            $crate::Fields::new()$(.with_field($key, $value))*,
        )
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log a trace-level message.
///
/// # Examples
///
/// ```
/// # use lumberjill::prelude::*;
/// # let mut logger = lumberjill::create(LoggerOptions::new("app")).unwrap();
/// # logger.set_level(LogLevel::Trace);
/// use lumberjill::trace;
/// trace!(logger, "Entering function: calculate()");
/// trace!(logger, "Variable value: {}", 42);
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use lumberjill::prelude::*;
/// # let logger = lumberjill::create(LoggerOptions::new("app")).unwrap();
/// use lumberjill::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use lumberjill::prelude::*;
/// # let logger = lumberjill::create(LoggerOptions::new("app")).unwrap();
/// use lumberjill::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, { "code" => 500 }, "Request failed: {}", "internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
