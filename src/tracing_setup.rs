// file: src/tracing_setup.rs
// description: structured logging configuration and tracing initialization

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Tracing goes to stderr: stdout belongs to the scrolling event log.
pub fn setup_tracing(log_level: &str, json_logs: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("ws_console={}", log_level)))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = if json_logs {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(false)
            .with_span_list(true)
            .with_target(true)
            .boxed()
    } else {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
