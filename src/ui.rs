/// file: src/ui.rs
/// description: ui presentation layer that handles events from the session driver
use crate::{
    events::{UiEvent, UiReceiver},
    formatter::{Colors, LogFormatter, OutputFormat},
};

pub struct UiController {
    ui_receiver: UiReceiver,
    formatter: LogFormatter,
    format: OutputFormat,
    colored: bool,
    quiet: bool,
}

pub struct UiOptions {
    pub format: OutputFormat,
    pub colored: bool,
    pub timestamps: bool,
    pub quiet: bool,
}

impl UiController {
    pub fn new(ui_receiver: UiReceiver, options: UiOptions) -> Self {
        Self {
            ui_receiver,
            formatter: LogFormatter::new(options.format, options.colored, options.timestamps),
            format: options.format,
            colored: options.colored,
            quiet: options.quiet,
        }
    }

    pub async fn run(&mut self) {
        while let Some(event) = self.ui_receiver.recv().await {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Starting => {
                self.print_startup_banner();
                self.print_status("READY", "Type /connect to open the websocket, /help for commands");
            }
            UiEvent::LogAppended(entry) => {
                println!("{}", self.formatter.format_entry(&entry));
            }
            UiEvent::ConnectionChanged { connected, url } => {
                if connected {
                    self.print_status("CONNECTED", &url);
                } else {
                    self.print_status("DISCONNECTED", &url);
                }
            }
            UiEvent::Stopping => {
                self.print_status("STOPPING", "Console shutting down");
            }
        }
    }

    // Status chrome prints only in plain text mode; JSON output stays a pure
    // stream of log records.
    fn chrome_enabled(&self) -> bool {
        !self.quiet && self.format == OutputFormat::Text
    }

    fn print_startup_banner(&self) {
        if !self.chrome_enabled() {
            return;
        }

        if self.colored {
            println!(
                "{}{}ws-console{} v{} - interactive websocket tester",
                Colors::BOLD,
                Colors::BRIGHT_CYAN,
                Colors::RESET,
                env!("CARGO_PKG_VERSION")
            );
        } else {
            println!(
                "ws-console v{} - interactive websocket tester",
                env!("CARGO_PKG_VERSION")
            );
        }
    }

    fn print_status(&self, status: &str, message: &str) {
        if !self.chrome_enabled() {
            return;
        }

        if !self.colored {
            println!("[{status}] {message}");
            return;
        }

        let (color, symbol) = match status {
            "READY" => (Colors::BRIGHT_CYAN, "~"),
            "CONNECTED" => (Colors::BRIGHT_GREEN, "+"),
            "DISCONNECTED" => (Colors::BRIGHT_RED, "x"),
            "STOPPING" => (Colors::BRIGHT_MAGENTA, "!"),
            _ => (Colors::WHITE, "-"),
        };

        println!(
            "{}{}[{}]{} {} {}{}{}",
            Colors::BOLD,
            color,
            status,
            Colors::RESET,
            symbol,
            Colors::GRAY,
            message,
            Colors::RESET
        );
    }
}
