// file: src/socket.rs
// description: WebSocket transport task; bridges one connection attempt onto
// the session event queue

use crate::{
    error::WsConsoleError,
    events::{InputSender, SessionInput, SocketEvent},
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, error, info, trace};

/// Outbound requests accepted by a connection task.
#[derive(Debug)]
enum SocketCommand {
    SendText(String),
    Close,
}

/// Handle over one active or pending connection attempt. Owned exclusively by
/// the session driver; dropping it asks the task to wind the connection down.
///
/// `open` returns immediately. Connection establishment happens on the spawned
/// task and is reported through the event queue: `Opened` on success, `Error`
/// followed by `Closed` on failure, and `Message`/`Closed` afterwards. Both
/// `send` and `close` are fire-and-forget.
pub struct SocketHandle {
    connection_id: String,
    commands: mpsc::UnboundedSender<SocketCommand>,
}

impl SocketHandle {
    pub fn open(url: &str, events: InputSender) -> Self {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let connection_id = uuid::Uuid::new_v4().to_string();

        tokio::spawn(run_connection(
            url.to_string(),
            connection_id.clone(),
            events,
            commands_rx,
        ));

        Self {
            connection_id,
            commands: commands_tx,
        }
    }

    pub fn connection_id(&self) -> &str {
        &self.connection_id
    }

    pub fn send(&self, text: &str) -> Result<(), WsConsoleError> {
        self.commands
            .send(SocketCommand::SendText(text.to_string()))
            .map_err(|_| WsConsoleError::HandleClosed)
    }

    pub fn close(&self) -> Result<(), WsConsoleError> {
        self.commands
            .send(SocketCommand::Close)
            .map_err(|_| WsConsoleError::HandleClosed)
    }
}

async fn run_connection(
    url: String,
    connection_id: String,
    events: InputSender,
    mut commands: mpsc::UnboundedReceiver<SocketCommand>,
) {
    info!(connection_id = %connection_id, url = %url, "opening websocket");

    let (ws_stream, _) = match connect_async(url.as_str()).await {
        Ok(ok) => ok,
        Err(e) => {
            let err = WsConsoleError::from(e);
            error!(connection_id = %connection_id, url = %url, error = %err, "failed to connect");
            forward(&events, SocketEvent::Error).await;
            forward(&events, SocketEvent::Closed).await;
            return;
        }
    };

    info!(connection_id = %connection_id, "websocket connection established");
    if !forward(&events, SocketEvent::Opened).await {
        return;
    }

    let (mut write, mut read) = ws_stream.split();
    let mut closing = false;

    loop {
        tokio::select! {
            command = commands.recv(), if !closing => match command {
                Some(SocketCommand::SendText(text)) => {
                    if let Err(e) = write.send(Message::Text(text.into())).await {
                        error!(connection_id = %connection_id, error = %e, "failed to send message");
                        forward(&events, SocketEvent::Error).await;
                        forward(&events, SocketEvent::Closed).await;
                        return;
                    }
                    trace!(connection_id = %connection_id, "text frame sent");
                }
                // A close request, or the handle was dropped. Start the close
                // handshake; the closed event is reported once the stream
                // winds down.
                Some(SocketCommand::Close) | None => {
                    debug!(connection_id = %connection_id, "close requested");
                    closing = true;
                    if write.send(Message::Close(None)).await.is_err() {
                        forward(&events, SocketEvent::Closed).await;
                        return;
                    }
                }
            },
            message = read.next() => match message {
                Some(Ok(Message::Text(text))) => {
                    trace!(connection_id = %connection_id, "text frame received");
                    if !forward(&events, SocketEvent::Message(text.to_string())).await {
                        return;
                    }
                }
                Some(Ok(Message::Binary(data))) => {
                    debug!(connection_id = %connection_id, bytes = data.len(), "ignoring binary frame");
                }
                Some(Ok(Message::Close(frame))) => {
                    debug!(connection_id = %connection_id, ?frame, "close frame received");
                    forward(&events, SocketEvent::Closed).await;
                    return;
                }
                // Ping/pong and raw frames are handled by the library.
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    error!(connection_id = %connection_id, error = %e, "websocket stream error");
                    forward(&events, SocketEvent::Error).await;
                    forward(&events, SocketEvent::Closed).await;
                    return;
                }
                None => {
                    debug!(connection_id = %connection_id, "websocket stream ended");
                    forward(&events, SocketEvent::Closed).await;
                    return;
                }
            },
        }
    }
}

/// Push one tagged event onto the session queue. Returns `false` when the
/// driver is gone and the task should stop.
async fn forward(events: &InputSender, event: SocketEvent) -> bool {
    events.send(SessionInput::Socket(event)).await.is_ok()
}
