use clap::{Parser, Subcommand};
use nodefetch::{FetchGateway, GatewayConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "nodefetch", about = "Fetch JSON from redundant service nodes")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Directory containing gateway.json
    #[arg(long, global = true, env = "NODEFETCH_CONFIG_DIR", default_value = ".")]
    config_dir: PathBuf,
    /// Node base URL (repeat or comma-separate for several)
    #[arg(long = "endpoint", global = true, value_delimiter = ',')]
    endpoints: Vec<String>,
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,
    /// Give up after this many attempts; 0 retries forever
    #[arg(long, global = true)]
    max_attempts: Option<u32>,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch PATH from whichever configured node answers first
    Get { path: String },
    /// Fetch a single URL with the configured timeout, no fallback
    Probe { url: String },
}

/// gateway.json, then NODEFETCH_* env, then command-line flags.
fn resolve_config(cli: &Cli) -> nodefetch::Result<GatewayConfig> {
    let mut config = GatewayConfig::load_or_default(&cli.config_dir);

    if !cli.endpoints.is_empty() {
        config.endpoints = cli.endpoints.clone();
    }
    if let Some(ms) = cli.timeout_ms {
        config.timeout_ms = ms;
    }
    if let Some(n) = cli.max_attempts {
        config.retry.max_attempts = Some(n);
    }

    config.normalize()?;
    Ok(config)
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = resolve_config(&cli)?;
    let gateway = FetchGateway::from_config(&config);

    let body = match &cli.command {
        Command::Get { path } => {
            let endpoints = config.endpoints()?;
            tracing::info!(
                nodes = endpoints.len(),
                timeout_ms = config.timeout_ms,
                bounded = config.retry.is_bounded(),
                "Fetching {}",
                path
            );
            gateway
                .fetch_until_success(&endpoints.candidates(path))
                .await?
        }
        Command::Probe { url } => gateway.fetch_with_timeout(url).await?,
    };

    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }
}
