use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};
use ws_console::{
    cli::Args,
    client::WebSocketClient,
    config::Config,
    events::{create_input_channel, create_ui_channel},
    input::run_input_loop,
    monitoring::setup_metrics,
    tracing_setup::setup_tracing,
    ui::{UiController, UiOptions},
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    setup_tracing(&args.log_level, args.json_logs)?;
    info!("Starting ws-console v{}", env!("CARGO_PKG_VERSION"));

    let config = Arc::new(Config::from_args(&args)?);

    if config.metrics.enabled {
        setup_metrics(config.metrics.port).await?;
        info!("Metrics server started on port {}", config.metrics.port);
    }

    let (input_tx, input_rx) = create_input_channel();
    let (ui_tx, ui_rx) = create_ui_channel();

    let mut ui = UiController::new(
        ui_rx,
        UiOptions {
            format: config.display.format,
            colored: config.display.colored,
            timestamps: config.display.timestamps,
            quiet: config.display.quiet,
        },
    );
    let ui_task = tokio::spawn(async move { ui.run().await });

    let reader = tokio::spawn(run_input_loop(input_tx.clone()));

    let mut client = WebSocketClient::new(config, input_tx, input_rx, ui_tx);
    if let Err(e) = client.run().await {
        error!("session driver error: {}", e);
        return Err(e);
    }
    drop(client);

    let _ = ui_task.await;
    // The stdin reader may still be parked on a read.
    reader.abort();

    info!("Console stopped");
    Ok(())
}
