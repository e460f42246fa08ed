use crate::session::{LogEntry, LogKind};

// ANSI color codes
pub struct Colors;

impl Colors {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";
    pub const DIM: &'static str = "\x1b[2m";

    // Colors
    pub const RED: &'static str = "\x1b[31m";
    pub const YELLOW: &'static str = "\x1b[33m";
    pub const MAGENTA: &'static str = "\x1b[35m";
    pub const CYAN: &'static str = "\x1b[36m";
    pub const WHITE: &'static str = "\x1b[37m";
    pub const GRAY: &'static str = "\x1b[90m";

    // Bright colors
    pub const BRIGHT_RED: &'static str = "\x1b[91m";
    pub const BRIGHT_GREEN: &'static str = "\x1b[92m";
    pub const BRIGHT_YELLOW: &'static str = "\x1b[93m";
    pub const BRIGHT_MAGENTA: &'static str = "\x1b[95m";
    pub const BRIGHT_CYAN: &'static str = "\x1b[96m";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }
}

/// Renders log entries for the console. The stored payload is always
/// verbatim; JSON pretty-printing happens here, at display time, and only for
/// message payloads.
pub struct LogFormatter {
    format: OutputFormat,
    colored: bool,
    timestamps: bool,
}

impl LogFormatter {
    pub fn new(format: OutputFormat, colored: bool, timestamps: bool) -> Self {
        Self {
            format,
            colored,
            timestamps,
        }
    }

    pub fn format_entry(&self, entry: &LogEntry) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string(entry).unwrap_or_else(|_| entry.payload.clone())
            }
            OutputFormat::Text => self.format_text(entry),
        }
    }

    fn format_text(&self, entry: &LogEntry) -> String {
        let (color, tag) = match entry.kind {
            LogKind::System => (Colors::BRIGHT_CYAN, "[sys ]"),
            LogKind::Outbound => (Colors::BRIGHT_MAGENTA, "[out ]"),
            LogKind::Inbound => (Colors::WHITE, "[in  ]"),
            LogKind::Warning => (Colors::BRIGHT_YELLOW, "[warn]"),
            LogKind::Error => (Colors::BRIGHT_RED, "[err ]"),
        };

        let payload = render_payload(entry);
        let mut line = String::new();

        if self.timestamps {
            let clock = chrono::Local::now().format("%H:%M:%S");
            if self.colored {
                line.push_str(&format!("{}{clock}{} ", Colors::DIM, Colors::RESET));
            } else {
                line.push_str(&format!("{clock} "));
            }
        }

        if self.colored {
            line.push_str(&format!(
                "{}{color}{tag}{} {color}{payload}{}",
                Colors::BOLD,
                Colors::RESET,
                Colors::RESET
            ));
        } else {
            line.push_str(&format!("{tag} {payload}"));
        }

        line
    }
}

/// Message payloads that parse as JSON render pretty-printed; anything else
/// renders raw. System, warning and error text is never reinterpreted.
fn render_payload(entry: &LogEntry) -> String {
    match entry.kind {
        LogKind::Inbound | LogKind::Outbound => {
            match serde_json::from_str::<serde_json::Value>(&entry.payload) {
                Ok(value) => {
                    serde_json::to_string_pretty(&value).unwrap_or_else(|_| entry.payload.clone())
                }
                Err(_) => entry.payload.clone(),
            }
        }
        _ => entry.payload.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(kind: LogKind, payload: &str) -> LogEntry {
        LogEntry {
            kind,
            payload: payload.to_string(),
        }
    }

    fn plain_formatter() -> LogFormatter {
        LogFormatter::new(OutputFormat::Text, false, false)
    }

    #[test]
    fn json_payloads_are_pretty_printed_for_display() {
        let formatted =
            plain_formatter().format_entry(&entry(LogKind::Inbound, r#"{"a":1,"b":[2,3]}"#));
        assert!(formatted.contains("\"a\": 1"));
        assert!(formatted.contains('\n'));
    }

    #[test]
    fn non_json_payloads_render_raw() {
        let formatted = plain_formatter().format_entry(&entry(LogKind::Inbound, "{not json"));
        assert!(formatted.ends_with("{not json"));
    }

    #[test]
    fn system_text_is_never_reinterpreted() {
        // Even a JSON-shaped system message stays on one line.
        let formatted = plain_formatter().format_entry(&entry(LogKind::System, r#"{"a":1}"#));
        assert!(formatted.ends_with(r#"{"a":1}"#));
        assert!(!formatted.contains('\n'));
    }

    #[test]
    fn uncolored_output_carries_no_escape_codes() {
        let formatted = plain_formatter().format_entry(&entry(LogKind::Warning, "careful"));
        assert_eq!(formatted, "[warn] careful");
    }

    #[test]
    fn colored_output_resets_at_the_end() {
        let formatter = LogFormatter::new(OutputFormat::Text, true, false);
        let formatted = formatter.format_entry(&entry(LogKind::Error, "boom"));
        assert!(formatted.starts_with(Colors::BOLD));
        assert!(formatted.ends_with(Colors::RESET));
        assert!(formatted.contains("boom"));
    }

    #[test]
    fn json_format_emits_one_record_per_entry() {
        let formatter = LogFormatter::new(OutputFormat::Json, false, false);
        let formatted = formatter.format_entry(&entry(LogKind::Inbound, "hello"));
        assert_eq!(formatted, r#"{"kind":"inbound","payload":"hello"}"#);
    }

    #[test]
    fn output_format_parses_loosely() {
        assert_eq!(OutputFormat::from("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::from("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::from("table"), OutputFormat::Text);
    }
}
