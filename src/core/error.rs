//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A construction option is missing or has the wrong type
    #[error("Invalid option {field}: expected {expected}")]
    InvalidOption { field: String, expected: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Numeric or named severity that does not map to a known level
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),
}

impl LoggerError {
    /// Create an option validation error naming the offending field
    pub fn invalid_option(field: impl Into<String>, expected: impl Into<String>) -> Self {
        LoggerError::InvalidOption {
            field: field.into(),
            expected: expected.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an invalid level error
    pub fn invalid_level(level: impl ToString) -> Self {
        LoggerError::InvalidLevel(level.to_string())
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }

    /// Whether this error came from construction-time validation
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            LoggerError::InvalidOption { .. }
                | LoggerError::InvalidConfiguration { .. }
                | LoggerError::InvalidLevel(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::invalid_option("options.name", "string");
        assert!(matches!(err, LoggerError::InvalidOption { .. }));
        assert!(err.is_configuration());

        let err = LoggerError::config("LoggerBuilder", "name must not be empty");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::writer("closed pipe");
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::invalid_option("options.raw", "bool");
        assert_eq!(err.to_string(), "Invalid option options.raw: expected bool");

        let err = LoggerError::invalid_level(35);
        assert_eq!(err.to_string(), "Invalid log level: 35");

        let err = LoggerError::config("LoggerBuilder", "name must not be empty");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for LoggerBuilder: name must not be empty"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: LoggerError = io_err.into();

        assert!(matches!(err, LoggerError::IoError(_)));
        assert!(err.to_string().contains("pipe closed"));
    }
}
