use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "ws-console",
    about = "interactive websocket testing console with a colorized event log",
    version
)]
pub struct Args {
    /// WebSocket endpoint URL to preload
    #[arg(short, long, default_value = "ws://echo.websocket.org")]
    pub url: String,

    /// Connect on startup instead of waiting for /connect
    #[arg(short, long)]
    pub connect: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Output tracing logs in JSON format
    #[arg(long)]
    pub json_logs: bool,

    /// Enable metrics server
    #[arg(long)]
    pub metrics: bool,

    /// Metrics server port
    #[arg(long, default_value = "9090")]
    pub metrics_port: u16,

    /// Output format for log entries: text, json
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Disable colored output (useful for piping to files)
    #[arg(long)]
    pub no_color: bool,

    /// Disable wall-clock prefixes on log lines
    #[arg(long)]
    pub no_timestamps: bool,

    /// Quiet mode - print log entries only, no banner or status lines
    #[arg(short, long)]
    pub quiet: bool,
}
