use anyhow::Result;
use clap::Parser;
use coffee_core::tracing::{InstrumentationConfig, init_tracing};
use coffee_server::{ServerBuilder, Settings};
use tracing::info;

/// Coffee specialties server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long = "config")]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from_file(path)?,
        None => Settings::load()?,
    };

    let instrumentation_config = InstrumentationConfig {
        service_name: "coffee-server".to_string(),
        service_version: env!("CARGO_PKG_VERSION").to_string(),
        log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| settings.server.log_level.clone()),
        ..InstrumentationConfig::from_env()
    };
    init_tracing(&instrumentation_config)?;

    if let Some(path) = &cli.config {
        info!("Loaded configuration from: {}", path);
    }

    let server = ServerBuilder::new(settings);
    println!(
        "Server running at: http://{}/",
        server.settings().server.bind_addr()?
    );

    server
        .serve(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
            info!("Received shutdown signal");
        })
        .await
}
