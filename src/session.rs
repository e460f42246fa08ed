/// file: src/session.rs
/// description: Connection session state machine and append-only event log
use crate::events::SocketEvent;
use serde::Serialize;

/// Connection flag for the single session. `error` events never transition
/// this; only `opened` and `closed` do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    System,
    Outbound,
    Inbound,
    Warning,
    Error,
}

/// One immutable log record, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub kind: LogKind,
    pub payload: String,
}

/// The single live application state: one endpoint, one connection flag, the
/// message draft and the ordered event log. All methods are pure state
/// transitions; I/O decisions are returned to the caller.
///
/// The log is append-only and unbounded. Entries are never reordered or
/// pruned.
#[derive(Debug, Clone)]
pub struct Session {
    endpoint_url: String,
    connection_state: ConnectionState,
    pending_draft: String,
    log: Vec<LogEntry>,
}

impl Session {
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            connection_state: ConnectionState::Disconnected,
            pending_draft: String::new(),
            log: Vec::new(),
        }
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.connection_state
    }

    pub fn is_connected(&self) -> bool {
        self.connection_state == ConnectionState::Connected
    }

    pub fn pending_draft(&self) -> &str {
        &self.pending_draft
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    /// Request a connection to `url`. Returns `true` when the caller should
    /// open a new socket handle. A no-op while already connected; the guard
    /// checks the connection flag only, not handle liveness.
    pub fn connect(&mut self, url: &str) -> bool {
        if self.is_connected() {
            return false;
        }
        self.endpoint_url = url.to_string();
        true
    }

    /// Request closure of the current connection. Returns `true` when the
    /// caller should ask the handle to close. The connection flag flips only
    /// when the `closed` event arrives, not here.
    pub fn disconnect(&mut self) -> bool {
        self.is_connected()
    }

    pub fn update_draft(&mut self, text: &str) {
        self.pending_draft = text.to_string();
    }

    /// Prepare an outbound transmission. Returns the text to put on the wire,
    /// or `None` when nothing must be sent: a send while disconnected appends
    /// a warning instead, and a blank draft is dropped silently.
    pub fn send(&mut self, text: &str) -> Option<String> {
        if !self.is_connected() {
            self.append_log(LogKind::Warning, "Connect to a websocket first!");
            return None;
        }

        if text.trim().is_empty() {
            return None;
        }

        self.append_log(LogKind::Outbound, text);
        self.pending_draft.clear();
        Some(text.to_string())
    }

    pub fn append_log(&mut self, kind: LogKind, payload: impl Into<String>) {
        self.log.push(LogEntry {
            kind,
            payload: payload.into(),
        });
    }

    /// React to one transport event. Each event appends exactly one log entry;
    /// `opened` and `closed` also flip the connection flag.
    pub fn apply(&mut self, event: SocketEvent) {
        match event {
            SocketEvent::Opened => {
                self.connection_state = ConnectionState::Connected;
                let message = format!("Connected to {}", self.endpoint_url);
                self.append_log(LogKind::System, message);
            }
            SocketEvent::Message(data) => {
                self.append_log(LogKind::Inbound, data);
            }
            SocketEvent::Error => {
                self.append_log(
                    LogKind::Error,
                    "An error occurred while connecting to the websocket.",
                );
            }
            SocketEvent::Closed => {
                self.connection_state = ConnectionState::Disconnected;
                let message = format!("Disconnected from {}", self.endpoint_url);
                self.append_log(LogKind::System, message);
            }
        }
    }
}
