use thiserror::Error;

#[derive(Error, Debug)]
pub enum WsConsoleError {
    #[error("WebSocket connection error: {0}")]
    WebSocketError(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Socket handle is gone")]
    HandleClosed,

    #[error("Event channel closed: {0}")]
    EventSendError(String),

    #[error("Metrics server error: {0}")]
    MetricsError(String),
}
