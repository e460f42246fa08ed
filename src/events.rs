/// file: src/events.rs
/// description: Tagged event queues connecting transport, session driver and UI
use crate::session::LogEntry;
use tokio::sync::mpsc;

/// Lifecycle events pushed by the transport task for one connection attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketEvent {
    Opened,
    Message(String),
    Error,
    Closed,
}

/// User intents parsed from console input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIntent {
    Connect { url: Option<String> },
    Disconnect,
    UpdateDraft(String),
    Send,
    Help,
    Quit,
}

/// Everything the session driver consumes. Intents and socket events share a
/// single queue so dispatch order is exactly arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionInput {
    Intent(UserIntent),
    Socket(SocketEvent),
}

/// Presentation events emitted by the session driver.
#[derive(Debug, Clone)]
pub enum UiEvent {
    Starting,
    LogAppended(LogEntry),
    ConnectionChanged { connected: bool, url: String },
    Stopping,
}

// Bounded channels to prevent unbounded memory growth. An interactive tester
// never comes close to this depth; a firehose endpoint gets backpressured.
const INPUT_CHANNEL_CAPACITY: usize = 1_024;
const UI_CHANNEL_CAPACITY: usize = 1_024;

pub type InputSender = mpsc::Sender<SessionInput>;
pub type InputReceiver = mpsc::Receiver<SessionInput>;

pub type UiSender = mpsc::Sender<UiEvent>;
pub type UiReceiver = mpsc::Receiver<UiEvent>;

pub fn create_input_channel() -> (InputSender, InputReceiver) {
    mpsc::channel(INPUT_CHANNEL_CAPACITY)
}

pub fn create_ui_channel() -> (UiSender, UiReceiver) {
    mpsc::channel(UI_CHANNEL_CAPACITY)
}
