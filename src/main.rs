use clap::Parser;
use collrec_api::RestApi;
use collrec_storage::{JsonTableLoader, RecommendationService};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Multi-signal content-collection recommender
#[derive(Parser, Debug)]
#[command(name = "collrec")]
#[command(about = "Recommends content collections from tag, activity and text similarity")]
struct Args {
    /// Directory holding the JSON tables
    #[arg(short, long, default_value = "./data")]
    data_dir: PathBuf,

    /// HTTP API port
    #[arg(long, default_value_t = 5000)]
    http_port: u16,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Default number of recommendations per request
    #[arg(long, default_value_t = collrec_ranking::DEFAULT_TOP_N)]
    top_n: usize,

    /// Start serving without building a snapshot first
    #[arg(long)]
    skip_initial_preprocess: bool,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting collrec v{}", env!("CARGO_PKG_VERSION"));
    info!("Data directory: {:?}", args.data_dir);

    let service = Arc::new(
        RecommendationService::new(JsonTableLoader::new(&args.data_dir))
            .with_default_top_n(args.top_n),
    );

    if args.skip_initial_preprocess {
        info!("Skipping initial preprocessing");
    } else {
        let worker = Arc::clone(&service);
        match actix_web::web::block(move || worker.preprocess()).await? {
            Ok(stats) => info!(collections = stats.collections, "Initial snapshot ready"),
            // Keep serving; /preprocess_data can be retried once the data is there
            Err(e) => warn!(error = %e, "Initial preprocessing failed"),
        }
    }

    info!("HTTP API: http://{}:{}/", args.host, args.http_port);
    RestApi::start(service, &args.host, args.http_port).await?;

    info!("Shutting down...");
    Ok(())
}
