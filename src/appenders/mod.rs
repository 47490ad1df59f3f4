//! Appender implementations

pub mod formatting;

pub use formatting::{severity_style, FormatOptions, FormattingAppender};

// Re-export the appender trait next to its implementations
pub use crate::core::Appender;
