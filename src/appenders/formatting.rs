//! Formatting appender: one record in, one rendered line out
//!
//! Two renderings are supported:
//!
//! - raw: the whole record as compact JSON, nothing filtered or colored
//! - text: `[HH:MM:SS][name] level message {context} \nstack`, where the
//!   time, context and stack segments only appear when there is something to
//!   show

use crate::core::{
    stringify, Appender, ErrorInfo, FieldValue, LogLevel, LogRecord, Result,
};
use colored::{Color, Colorize};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Rendering switches, fixed once the appender is built
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatOptions {
    /// Emit the record as compact JSON
    #[serde(default)]
    pub raw: bool,
    /// Prefix text lines with the local time of day
    #[serde(default)]
    pub timestamp: bool,
}

/// Label and terminal color for a severity
#[inline]
pub fn severity_style(level: LogLevel) -> (&'static str, Color) {
    (level.to_str(), level.color_code())
}

pub struct FormattingAppender {
    options: FormatOptions,
    use_colors: bool,
    writer: Box<dyn Write + Send + Sync>,
}

impl FormattingAppender {
    /// Create an appender writing to stderr
    pub fn new(options: FormatOptions) -> Self {
        Self {
            options,
            use_colors: true,
            writer: Box::new(io::stderr()),
        }
    }

    /// Turn severity coloring on or off
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Send output somewhere other than stderr
    ///
    /// # Example
    ///
    /// ```
    /// use lumberjill::appenders::{FormatOptions, FormattingAppender};
    ///
    /// let appender = FormattingAppender::new(FormatOptions::default())
    ///     .with_writer(std::io::sink());
    /// ```
    #[must_use]
    pub fn with_writer<W: Write + Send + Sync + 'static>(mut self, writer: W) -> Self {
        self.writer = Box::new(writer);
        self
    }

    /// Render a record without writing it
    pub fn format(&self, record: &LogRecord) -> Result<String> {
        if self.options.raw {
            self.format_raw(record)
        } else {
            self.format_text(record)
        }
    }

    fn format_raw(&self, record: &LogRecord) -> Result<String> {
        let object = FieldValue::Object(record.to_object());
        stringify(Some(&object), true)
    }

    fn format_text(&self, record: &LogRecord) -> Result<String> {
        let mut out = Vec::with_capacity(5);

        if self.options.timestamp {
            out.push(format!("[{}][{}]", record.time_of_day(), record.name));
        } else {
            out.push(format!("[{}]", record.name));
        }

        let (label, color) = severity_style(record.level);
        if self.use_colors {
            out.push(label.color(color).to_string());
        } else {
            out.push(label.to_string());
        }
        out.push(record.msg.clone());

        let remainder = record.contextual_remainder();
        if !remainder.is_empty() {
            out.push(stringify(Some(&FieldValue::from(remainder)), false)?);
        }

        if let Some(stack) = record.err.as_ref().and_then(ErrorInfo::stack) {
            out.push(format!("\n{}", stack));
        }

        Ok(out.join(" "))
    }
}

impl Appender for FormattingAppender {
    fn append(&mut self, record: &LogRecord) -> Result<()> {
        let mut line = self.format(record)?;
        line.push('\n');

        // One write per record so concurrent writers interleave by line
        self.writer.write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "formatting"
    }
}
