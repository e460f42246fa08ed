// file: src/client.rs
// description: session driver; drains the input queue, owns the socket handle
// and forwards every log append to the UI

use crate::{
    config::Config,
    error::WsConsoleError,
    events::{InputReceiver, InputSender, SessionInput, SocketEvent, UiEvent, UiSender, UserIntent},
    monitoring,
    session::{LogKind, Session},
    socket::SocketHandle,
};
use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

const HELP_TEXT: &str = "Commands: /connect [url], /disconnect, /help, /quit. \
Anything else is sent as a message; start a literal '/' message with '//'.";

/// Drives the one session: user intents and socket events arrive on a single
/// FIFO queue and are handled to completion, one at a time. Holds the only
/// mutable reference to the session state and the only socket handle.
pub struct WebSocketClient {
    pub config: Arc<Config>,
    session: Session,
    handle: Option<SocketHandle>,
    input_tx: InputSender,
    input_rx: InputReceiver,
    ui_tx: UiSender,
    forwarded: usize,
}

impl WebSocketClient {
    pub fn new(
        config: Arc<Config>,
        input_tx: InputSender,
        input_rx: InputReceiver,
        ui_tx: UiSender,
    ) -> Self {
        let session = Session::new(config.websocket.url.clone());
        Self {
            config,
            session,
            handle: None,
            input_tx,
            input_rx,
            ui_tx,
            forwarded: 0,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        self.send_ui(UiEvent::Starting).await?;

        if self.config.websocket.connect_on_start {
            self.handle_intent(UserIntent::Connect { url: None }).await?;
        }

        while let Some(input) = self.input_rx.recv().await {
            let quit = match input {
                SessionInput::Intent(intent) => self.handle_intent(intent).await?,
                SessionInput::Socket(event) => {
                    self.handle_socket_event(event).await?;
                    false
                }
            };
            if quit {
                break;
            }
        }

        self.send_ui(UiEvent::Stopping).await?;
        Ok(())
    }

    async fn handle_intent(&mut self, intent: UserIntent) -> Result<bool> {
        match intent {
            UserIntent::Connect { url } => {
                let target = url.unwrap_or_else(|| self.session.endpoint_url().to_string());
                if self.session.connect(&target) {
                    let handle = SocketHandle::open(&target, self.input_tx.clone());
                    debug!(connection_id = %handle.connection_id(), url = %target, "socket handle opened");
                    self.handle = Some(handle);
                    monitoring::CONNECT_COUNTER.increment(1);
                } else {
                    debug!("connect ignored, already connected");
                }
            }
            UserIntent::Disconnect => {
                if self.session.disconnect()
                    && let Some(handle) = &self.handle
                {
                    // Fire-and-forget; the state flips when the closed event
                    // is observed.
                    let _ = handle.close();
                }
            }
            UserIntent::UpdateDraft(text) => self.session.update_draft(&text),
            UserIntent::Send => {
                let draft = self.session.pending_draft().to_string();
                if let Some(text) = self.session.send(&draft) {
                    let handle = self.handle.as_ref().ok_or(WsConsoleError::HandleClosed)?;
                    handle.send(&text)?;
                    monitoring::MESSAGES_SENT_COUNTER.increment(1);
                }
            }
            UserIntent::Help => self.session.append_log(LogKind::System, HELP_TEXT),
            UserIntent::Quit => return Ok(true),
        }

        self.flush_log().await?;
        Ok(false)
    }

    async fn handle_socket_event(&mut self, event: SocketEvent) -> Result<()> {
        let was_connected = self.session.is_connected();

        match &event {
            SocketEvent::Message(_) => monitoring::MESSAGES_RECEIVED_COUNTER.increment(1),
            // The close has been observed; the handle is spent.
            SocketEvent::Closed => self.handle = None,
            _ => {}
        }

        self.session.apply(event);
        self.flush_log().await?;

        let connected = self.session.is_connected();
        if connected != was_connected {
            monitoring::CONNECTED_GAUGE.set(if connected { 1.0 } else { 0.0 });
            self.send_ui(UiEvent::ConnectionChanged {
                connected,
                url: self.session.endpoint_url().to_string(),
            })
            .await?;
        }
        Ok(())
    }

    /// Forward log entries appended since the last flush. This is the "view
    /// refresh" the presentation layer observes for every append.
    async fn flush_log(&mut self) -> Result<()> {
        while self.forwarded < self.session.log().len() {
            let entry = self.session.log()[self.forwarded].clone();
            self.forwarded += 1;
            self.send_ui(UiEvent::LogAppended(entry)).await?;
        }
        Ok(())
    }

    async fn send_ui(&self, event: UiEvent) -> Result<()> {
        self.ui_tx
            .send(event)
            .await
            .map_err(|e| WsConsoleError::EventSendError(e.to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DisplayConfig, MetricsConfig, WebSocketConfig};
    use crate::events::{create_input_channel, create_ui_channel, UiReceiver};
    use crate::formatter::OutputFormat;
    use crate::session::LogEntry;
    use futures_util::{SinkExt, StreamExt};
    use std::time::Duration;
    use tokio::time::timeout;

    async fn spawn_echo_server() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
                    while let Some(Ok(msg)) = ws.next().await {
                        if msg.is_text() {
                            ws.send(msg).await.unwrap();
                        }
                    }
                });
            }
        });
        format!("ws://{addr}")
    }

    fn test_config(url: &str) -> Arc<Config> {
        Arc::new(Config {
            websocket: WebSocketConfig {
                url: url.to_string(),
                connect_on_start: false,
            },
            metrics: MetricsConfig {
                enabled: false,
                port: 9090,
            },
            display: DisplayConfig {
                colored: false,
                timestamps: false,
                quiet: true,
                format: OutputFormat::Text,
            },
        })
    }

    async fn next_ui(rx: &mut UiReceiver) -> UiEvent {
        timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for a ui event")
            .expect("ui channel closed")
    }

    async fn next_log_entry(rx: &mut UiReceiver) -> LogEntry {
        match next_ui(rx).await {
            UiEvent::LogAppended(entry) => entry,
            other => panic!("expected a log entry, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn full_exchange_against_echo_server() {
        let url = spawn_echo_server().await;
        let config = test_config(&url);
        let (input_tx, input_rx) = create_input_channel();
        let (ui_tx, mut ui_rx) = create_ui_channel();

        let mut client = WebSocketClient::new(config, input_tx.clone(), input_rx, ui_tx);
        let driver = tokio::spawn(async move { client.run().await });

        assert!(matches!(next_ui(&mut ui_rx).await, UiEvent::Starting));

        input_tx
            .send(SessionInput::Intent(UserIntent::Connect { url: None }))
            .await
            .unwrap();
        let entry = next_log_entry(&mut ui_rx).await;
        assert_eq!(entry.kind, LogKind::System);
        assert_eq!(entry.payload, format!("Connected to {url}"));
        assert!(matches!(
            next_ui(&mut ui_rx).await,
            UiEvent::ConnectionChanged { connected: true, .. }
        ));

        input_tx
            .send(SessionInput::Intent(UserIntent::UpdateDraft(
                "hello".to_string(),
            )))
            .await
            .unwrap();
        input_tx
            .send(SessionInput::Intent(UserIntent::Send))
            .await
            .unwrap();
        let entry = next_log_entry(&mut ui_rx).await;
        assert_eq!(entry.kind, LogKind::Outbound);
        assert_eq!(entry.payload, "hello");
        let entry = next_log_entry(&mut ui_rx).await;
        assert_eq!(entry.kind, LogKind::Inbound);
        assert_eq!(entry.payload, "hello");

        input_tx
            .send(SessionInput::Intent(UserIntent::Disconnect))
            .await
            .unwrap();
        let entry = next_log_entry(&mut ui_rx).await;
        assert_eq!(entry.kind, LogKind::System);
        assert_eq!(entry.payload, format!("Disconnected from {url}"));
        assert!(matches!(
            next_ui(&mut ui_rx).await,
            UiEvent::ConnectionChanged { connected: false, .. }
        ));

        input_tx
            .send(SessionInput::Intent(UserIntent::Quit))
            .await
            .unwrap();
        assert!(matches!(next_ui(&mut ui_rx).await, UiEvent::Stopping));
        driver.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn failed_connect_logs_error_then_disconnect() {
        // A port with no listener behind it.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("ws://{}", listener.local_addr().unwrap());
        drop(listener);

        let config = test_config(&url);
        let (input_tx, input_rx) = create_input_channel();
        let (ui_tx, mut ui_rx) = create_ui_channel();

        let mut client = WebSocketClient::new(config, input_tx.clone(), input_rx, ui_tx);
        let driver = tokio::spawn(async move { client.run().await });

        assert!(matches!(next_ui(&mut ui_rx).await, UiEvent::Starting));

        input_tx
            .send(SessionInput::Intent(UserIntent::Connect { url: None }))
            .await
            .unwrap();
        let entry = next_log_entry(&mut ui_rx).await;
        assert_eq!(entry.kind, LogKind::Error);
        assert_eq!(
            entry.payload,
            "An error occurred while connecting to the websocket."
        );
        let entry = next_log_entry(&mut ui_rx).await;
        assert_eq!(entry.kind, LogKind::System);
        assert_eq!(entry.payload, format!("Disconnected from {url}"));

        input_tx
            .send(SessionInput::Intent(UserIntent::Quit))
            .await
            .unwrap();
        assert!(matches!(next_ui(&mut ui_rx).await, UiEvent::Stopping));
        driver.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn send_without_connect_only_warns() {
        let config = test_config("ws://example.invalid");
        let (input_tx, input_rx) = create_input_channel();
        let (ui_tx, mut ui_rx) = create_ui_channel();

        let mut client = WebSocketClient::new(config, input_tx.clone(), input_rx, ui_tx);
        let driver = tokio::spawn(async move { client.run().await });

        assert!(matches!(next_ui(&mut ui_rx).await, UiEvent::Starting));

        input_tx
            .send(SessionInput::Intent(UserIntent::UpdateDraft(
                "ping".to_string(),
            )))
            .await
            .unwrap();
        input_tx
            .send(SessionInput::Intent(UserIntent::Send))
            .await
            .unwrap();
        let entry = next_log_entry(&mut ui_rx).await;
        assert_eq!(entry.kind, LogKind::Warning);
        assert_eq!(entry.payload, "Connect to a websocket first!");

        input_tx
            .send(SessionInput::Intent(UserIntent::Quit))
            .await
            .unwrap();
        assert!(matches!(next_ui(&mut ui_rx).await, UiEvent::Stopping));
        driver.await.unwrap().unwrap();
    }
}
