use anyhow::Context;
use herald_server::{Herald, HeraldConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_help() {
    eprintln!(
        r#"Herald - trading signal ingestion and broadcast service

USAGE:
    herald [OPTIONS]

OPTIONS:
    --config <PATH>     Load configuration from JSON file
    --help              Print this help message

ENVIRONMENT VARIABLES:
    HOST                Server host (default: 0.0.0.0)
    PORT                Server port (default: 5000)
    DATABASE_URL        SQLite database (default: sqlite:TradeExecution.db)
    RUST_LOG            Log level filter

EXAMPLES:
    # Run with defaults
    herald

    # Run with config file
    herald --config herald.json

    # Run with custom port and database
    PORT=9000 DATABASE_URL=sqlite:/var/lib/herald/trades.db herald
"#
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "herald_server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
                config_path = Some(args[i].clone());
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let config = match config_path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path);
            HeraldConfig::from_file(&path)?
        }
        None => {
            tracing::info!("Using default configuration");
            HeraldConfig::default()
        }
    };
    let config = config.with_env_overrides()?;

    let herald = Herald::connect(config)
        .await
        .context("failed to open the record store")?;

    let addr = herald.config.server.addr();
    tracing::info!("Starting Herald");
    tracing::info!("Database: {}", herald.config.database.url);
    tracing::info!("REST API: http://{}/api/", addr);
    tracing::info!("WebSocket: ws://{}/ws", addr);
    tracing::info!("Available endpoints:");
    tracing::info!("  GET   /");
    tracing::info!("  POST  /api/signal");
    tracing::info!("  GET   /api/signals");
    tracing::info!("  GET   /api/signals/{{id}}");
    tracing::info!("  GET   /api/trades");
    tracing::info!("  POST  /api/trades");
    tracing::info!("  PATCH /api/trades/{{id}}");

    herald.run().await?;
    Ok(())
}
