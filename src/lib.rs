#![doc = include_str!("../docs/rustdoc.md")]

/// Command-line argument definitions.
pub mod cli;
/// Session driver loop between input queue, socket handle and UI.
pub mod client;
/// Runtime configuration model.
pub mod config;
/// Error types used across the crate.
pub mod error;
/// Tagged event queues between transport, driver and UI.
pub mod events;
/// Console output formatters.
pub mod formatter;
/// Console input parsing.
pub mod input;
/// Metrics and exporter setup.
pub mod monitoring;
/// Connection session state machine and event log.
pub mod session;
/// WebSocket transport task and handle.
pub mod socket;
/// Tracing/logging initialization.
pub mod tracing_setup;
/// UI controller and presentation loop.
pub mod ui;

/// Primary crate error type.
pub use error::WsConsoleError;
