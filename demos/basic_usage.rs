//! Basic logger usage example
//!
//! Demonstrates the three output styles: formatted, formatted with
//! timestamps, and raw JSON.
//!
//! Run with: cargo run --example basic_usage

use lumberjill::prelude::*;
use lumberjill::{info, warn};

#[derive(Debug, thiserror::Error)]
#[error("connection refused")]
struct ConnectionRefused;

#[derive(Debug, thiserror::Error)]
#[error("failed to reach inventory service")]
struct UpstreamError {
    #[source]
    cause: ConnectionRefused,
}

fn main() -> Result<()> {
    println!("=== lumberjill - Basic Usage Example ===\n");

    println!("1. Formatted output at every level:");
    let mut log = lumberjill::create(LoggerOptions::new("demo"))?;
    log.set_level(LogLevel::Trace);
    log.trace("This is a trace message");
    log.debug("This is a debug message");
    log.info("This is an info message");
    log.warn("This is a warning message");
    log.error("This is an error message");
    log.fatal("This is a fatal message");

    println!("\n2. Context fields and errors:");
    info!(log, { "port" => 8080, "tls" => false }, "Server listening");
    let err = UpstreamError {
        cause: ConnectionRefused,
    };
    log.log_with_error(LogLevel::Error, "Order lookup failed", &err);

    println!("\n3. Timestamps and child loggers:");
    let log = lumberjill::create(LoggerOptions::new("demo-ts").with_timestamp(true))?;
    let request = log.child(Fields::new().with_field("request_id", "r-42"));
    warn!(request, "Slow response: {}ms", 812);

    println!("\n4. Raw JSON:");
    let raw = lumberjill::create(LoggerOptions::new("demo-raw").with_raw(true))?;
    raw.info_with_context("Raw record", Fields::new().with_field("missing", FieldValue::Undefined));

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
