// file: src/input.rs
// description: console line reader; turns typed lines into session intents

use crate::{
    error::WsConsoleError,
    events::{InputSender, SessionInput, UserIntent},
};
use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

/// Parse one console line into intents.
///
/// Lines starting with `/` are commands; everything else becomes the pending
/// draft followed by a send. `//` escapes a literal leading slash. Unknown
/// commands fall back to the help intent.
pub fn parse_line(line: &str) -> Vec<UserIntent> {
    let trimmed = line.trim();

    if let Some(escaped) = trimmed.strip_prefix("//") {
        let message = format!("/{escaped}");
        return vec![UserIntent::UpdateDraft(message), UserIntent::Send];
    }

    if let Some(command) = trimmed.strip_prefix('/') {
        let mut words = command.split_whitespace();
        return match words.next() {
            Some("connect") => vec![UserIntent::Connect {
                url: words.next().map(str::to_string),
            }],
            Some("disconnect") => vec![UserIntent::Disconnect],
            Some("quit") | Some("exit") => vec![UserIntent::Quit],
            _ => vec![UserIntent::Help],
        };
    }

    if trimmed.is_empty() {
        return Vec::new();
    }

    // Plain text goes out verbatim, surrounding whitespace included.
    vec![UserIntent::UpdateDraft(line.to_string()), UserIntent::Send]
}

/// Read stdin until EOF or `/quit`, pushing parsed intents onto the session
/// queue. EOF is treated as a quit so piped input terminates cleanly.
pub async fn run_input_loop(input_tx: InputSender) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.map_err(WsConsoleError::from)? {
        for intent in parse_line(&line) {
            let quit = intent == UserIntent::Quit;
            input_tx
                .send(SessionInput::Intent(intent))
                .await
                .map_err(|e| WsConsoleError::EventSendError(e.to_string()))?;
            if quit {
                return Ok(());
            }
        }
    }

    debug!("stdin closed, requesting shutdown");
    let _ = input_tx.send(SessionInput::Intent(UserIntent::Quit)).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_becomes_draft_then_send() {
        assert_eq!(
            parse_line("hello there"),
            vec![
                UserIntent::UpdateDraft("hello there".to_string()),
                UserIntent::Send,
            ]
        );
    }

    #[test]
    fn plain_text_keeps_surrounding_whitespace() {
        assert_eq!(
            parse_line("  spaced out  "),
            vec![
                UserIntent::UpdateDraft("  spaced out  ".to_string()),
                UserIntent::Send,
            ]
        );
    }

    #[test]
    fn blank_lines_produce_nothing() {
        assert!(parse_line("").is_empty());
        assert!(parse_line("   ").is_empty());
    }

    #[test]
    fn connect_takes_an_optional_url() {
        assert_eq!(
            parse_line("/connect ws://localhost:9001"),
            vec![UserIntent::Connect {
                url: Some("ws://localhost:9001".to_string()),
            }]
        );
        assert_eq!(parse_line("/connect"), vec![UserIntent::Connect { url: None }]);
    }

    #[test]
    fn disconnect_and_quit_commands() {
        assert_eq!(parse_line("/disconnect"), vec![UserIntent::Disconnect]);
        assert_eq!(parse_line("/quit"), vec![UserIntent::Quit]);
        assert_eq!(parse_line("/exit"), vec![UserIntent::Quit]);
    }

    #[test]
    fn unknown_commands_show_help() {
        assert_eq!(parse_line("/frobnicate"), vec![UserIntent::Help]);
        assert_eq!(parse_line("/help"), vec![UserIntent::Help]);
        assert_eq!(parse_line("/"), vec![UserIntent::Help]);
    }

    #[test]
    fn double_slash_escapes_a_literal_slash_message() {
        assert_eq!(
            parse_line("//connect is not a command"),
            vec![
                UserIntent::UpdateDraft("/connect is not a command".to_string()),
                UserIntent::Send,
            ]
        );
    }
}
