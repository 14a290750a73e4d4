use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use promatch_api::{ApiContext, RestApi};
use promatch_store::{HttpBioGenerator, HttpEmbedder, MemoryStore};

/// A profile and company matching service
#[derive(Parser, Debug)]
#[command(name = "promatch")]
#[command(about = "A profile and company matching service", long_about = None)]
struct Args {
    /// HTTP API port
    #[arg(long, default_value_t = 8000)]
    http_port: u16,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Cap on displayed search results; defaults to each query's num_results
    #[arg(long)]
    display_limit: Option<usize>,

    /// Override the generative provider base URL
    #[arg(long)]
    provider_url: Option<String>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let api_key = std::env::var("GEMINI_API_KEY").unwrap_or_default();
    if api_key.is_empty() {
        warn!("GEMINI_API_KEY is not set; embedding and bio generation will fail");
    }

    info!("Starting promatch v{}", env!("CARGO_PKG_VERSION"));
    info!("HTTP API port: {}", args.http_port);
    if let Some(limit) = args.display_limit {
        info!("Display limit: {}", limit);
    }

    let mut embedder = HttpEmbedder::new(api_key.clone());
    let mut bio_generator = HttpBioGenerator::new(api_key);
    if let Some(url) = &args.provider_url {
        info!("Provider base URL: {}", url);
        embedder = embedder.with_endpoint(url.clone());
        bio_generator = bio_generator.with_endpoint(url.clone());
    }

    let context = ApiContext {
        store: Arc::new(MemoryStore::new()),
        embedder: Arc::new(embedder),
        bio_generator: Arc::new(bio_generator),
        display_limit: args.display_limit,
    };

    info!("promatch started successfully");
    info!("HTTP API: http://localhost:{}/", args.http_port);

    RestApi::start(context, args.http_port).await?;

    info!("Shutting down...");
    Ok(())
}
