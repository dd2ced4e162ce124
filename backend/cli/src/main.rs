mod config;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use picshelf_captioning::GeminiCaptioner;
use picshelf_gateway::{start_server, GalleryService, GatewayState};
use picshelf_storage::S3ObjectStore;

use config::Config;

#[derive(Parser)]
#[command(name = "picshelf")]
#[command(about = "PicShelf — image gallery with AI-generated captions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gallery HTTP server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Check whether a running server is healthy
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    // Initialize structured logging
    logging::init_logger(config.log_dir.as_deref().map(Path::new), &config.log_level);

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            let config = Config {
                port: port.unwrap_or(config.port),
                ..config
            };
            run_server(config).await?;
        }
        Commands::Status => {
            let client = reqwest::Client::new();
            match client
                .get(format!("http://localhost:{}/api/health", config.port))
                .send()
                .await
            {
                Ok(resp) => {
                    println!("picshelf is up: {}", resp.text().await?);
                }
                Err(_) => {
                    println!("picshelf is not running on port {}", config.port);
                }
            }
        }
    }

    Ok(())
}

async fn run_server(config: Config) -> Result<()> {
    info!(
        port = config.port,
        bind = %config.bind_address,
        bucket = %config.bucket,
        prefix = %config.prefix,
        "Starting PicShelf"
    );

    // Fail fast: a server without captioning credentials would break every upload.
    let api_key = config
        .gemini_api_key
        .clone()
        .context("GEMINI_API_KEY must be set to start the server")?;

    let store = S3ObjectStore::connect(
        &config.bucket,
        &config.prefix,
        config.s3_endpoint.as_deref(),
    )
    .await;

    let captioner = GeminiCaptioner::new(api_key).with_model(&config.gemini_model);

    let service = GalleryService::new(Arc::new(store), Arc::new(captioner));
    let state = GatewayState {
        service: Arc::new(service),
    };

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port)
        .parse()
        .context("invalid bind address")?;

    start_server(addr, state).await
}
