//! Log level definitions
//!
//! Levels carry the canonical numeric severities used on the wire
//! (`10` for trace up to `60` for fatal), so raw JSON output and the
//! crate-level constants agree with other tools reading the same records.

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const TRACE: u8 = 10;
pub const DEBUG: u8 = 20;
pub const INFO: u8 = 30;
pub const WARN: u8 = 40;
pub const ERROR: u8 = 50;
pub const FATAL: u8 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Default)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum LogLevel {
    Trace = TRACE,
    Debug = DEBUG,
    #[default]
    Info = INFO,
    Warn = WARN,
    Error = ERROR,
    Fatal = FATAL,
}

impl LogLevel {
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Fatal => "fatal",
        }
    }

    /// Numeric severity as written into records
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Trace => Blue,
            LogLevel::Debug => Magenta,
            LogLevel::Info => Cyan,
            LogLevel::Warn => Yellow,
            LogLevel::Error => Red,
            LogLevel::Fatal => Red,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "fatal" => Ok(LogLevel::Fatal),
            _ => Err(LoggerError::invalid_level(format!("'{}'", s))),
        }
    }
}

impl TryFrom<u8> for LogLevel {
    type Error = LoggerError;

    fn try_from(value: u8) -> Result<Self, LoggerError> {
        match value {
            TRACE => Ok(LogLevel::Trace),
            DEBUG => Ok(LogLevel::Debug),
            INFO => Ok(LogLevel::Info),
            WARN => Ok(LogLevel::Warn),
            ERROR => Ok(LogLevel::Error),
            FATAL => Ok(LogLevel::Fatal),
            other => Err(LoggerError::invalid_level(other)),
        }
    }
}

impl From<LogLevel> for u8 {
    fn from(level: LogLevel) -> Self {
        level.as_u8()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_values() {
        assert_eq!(LogLevel::Trace.as_u8(), 10);
        assert_eq!(LogLevel::Info.as_u8(), 30);
        assert_eq!(LogLevel::Fatal.as_u8(), 60);
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }

    #[test]
    fn test_try_from_rejects_unknown_severity() {
        assert_eq!(LogLevel::try_from(40u8).unwrap(), LogLevel::Warn);
        assert!(LogLevel::try_from(35u8).is_err());
        assert!(LogLevel::try_from(0u8).is_err());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("INFO".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&LogLevel::Error).unwrap();
        assert_eq!(json, "50");

        let level: LogLevel = serde_json::from_str("20").unwrap();
        assert_eq!(level, LogLevel::Debug);
        assert!(serde_json::from_str::<LogLevel>("21").is_err());
    }
}
