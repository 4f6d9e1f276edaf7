use clap::Parser;
use std::sync::Arc;
use tracing::{error, info, warn};

use revai::config::AppConfig;
use revai::handlers::ai::OpenAIClient;
use revai::server;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind the HTTP server to
    #[arg(long)]
    listen_addr: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.to_string());
        }
    };

    if let Some(listen_addr) = args.listen_addr {
        config.server.listen_addr = listen_addr;
    }

    if config.ai.api_key.is_none() {
        warn!("No AI API key configured; model calls will fail if the provider requires authentication");
    }

    info!("Starting AI code review engine (model: {})", config.ai.model_name);

    let client = Arc::new(OpenAIClient::new(config.ai.clone()));

    server::serve(config, client).await.map_err(|e| e.to_string())
}
