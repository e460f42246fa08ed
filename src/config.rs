/// file: src/config.rs
/// description: Runtime configuration derived from CLI arguments
use crate::cli::Args;
use crate::error::WsConsoleError;
use crate::formatter::OutputFormat;
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    pub websocket: WebSocketConfig,
    pub metrics: MetricsConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone)]
pub struct WebSocketConfig {
    /// Initial endpoint, kept verbatim; the session may be pointed elsewhere
    /// at runtime by `/connect <url>`.
    pub url: String,
    pub connect_on_start: bool,
}

#[derive(Debug, Clone)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DisplayConfig {
    pub colored: bool,
    pub timestamps: bool,
    pub quiet: bool,
    pub format: OutputFormat,
}

impl Config {
    pub fn from_args(args: &Args) -> Result<Self, WsConsoleError> {
        // Syntactic check only; reachability is discovered on connect.
        Url::parse(&args.url)?;

        Ok(Config {
            websocket: WebSocketConfig {
                url: args.url.clone(),
                connect_on_start: args.connect,
            },
            metrics: MetricsConfig {
                enabled: args.metrics,
                port: args.metrics_port,
            },
            display: DisplayConfig {
                colored: !args.no_color,
                timestamps: !args.no_timestamps,
                quiet: args.quiet,
                format: OutputFormat::from(args.format.as_str()),
            },
        })
    }
}
