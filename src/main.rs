//! # pagekeep CLI
//!
//! Runs the HTTP service or extracts a single page from the command line.
//!
//! - `serve`: start the HTTP service
//! - `extract`: fetch one URL and print the extracted article

mod telemetry;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pagekeep::config::ServiceConfig;
use pagekeep::extractor::{
    Article, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_MAX_BODY_BYTES, DEFAULT_MAX_CONTENT_CHARS,
    ExtractorConfig, FetchConfig, Fetcher,
};
use pagekeep::server::start_server;
use telemetry::TelemetryOptions;
use tracing::instrument;

#[derive(Parser)]
#[command(author, version, about = "Fetch a linked page, extract its article and store it", long_about = None)]
struct Cli {
    /// Export traces and metrics over OTLP/HTTP
    #[arg(long, global = true)]
    otel: bool,

    /// Also write logs to a daily rolling file in this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP service
    Serve(ServeArgs),

    /// Fetch a page and print its article
    Extract(ExtractArgs),
}

#[derive(Args, Debug)]
struct FetchArgs {
    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_FETCH_TIMEOUT_SECS)]
    fetch_timeout: u64,

    /// Largest page body read, in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_BODY_BYTES)]
    max_body_bytes: usize,

    /// Maximum number of characters kept from the article body
    #[arg(long, default_value_t = DEFAULT_MAX_CONTENT_CHARS)]
    max_content_chars: usize,
}

impl FetchArgs {
    fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            timeout_secs: self.fetch_timeout,
            max_body_bytes: self.max_body_bytes,
            ..Default::default()
        }
    }

    fn extractor_config(&self) -> ExtractorConfig {
        ExtractorConfig::builder()
            .max_content_chars(self.max_content_chars)
            .build()
    }
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:8090")]
    bind: String,

    /// Database path
    #[arg(short, long, default_value = "pb_data/data.db")]
    database: PathBuf,

    /// Collection extracted articles are stored in
    #[arg(short, long, default_value = "articles")]
    collection: String,

    /// Directory served as static files
    #[arg(long, default_value = "pb_public")]
    public_dir: PathBuf,

    /// Directory holding layout.html and the page bodies
    #[arg(long, default_value = "views")]
    views_dir: PathBuf,

    #[command(flatten)]
    fetch: FetchArgs,
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// URL to fetch
    #[arg(required = true)]
    url: String,

    /// Output format (text|json)
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    format: String,

    #[command(flatten)]
    fetch: FetchArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _otel = telemetry::init_tracing_subscriber(&TelemetryOptions {
        otel: cli.otel,
        log_dir: cli.log_dir.clone(),
    })?;

    match cli.command {
        Commands::Serve(args) => serve_command(args).await?,
        Commands::Extract(args) => extract_command(args).await?,
    }

    Ok(())
}

#[instrument]
async fn serve_command(args: ServeArgs) -> anyhow::Result<()> {
    let config = ServiceConfig::builder()
        .bind_address(args.bind)
        .database_path(args.database)
        .collection(args.collection)
        .public_dir(args.public_dir)
        .views_dir(args.views_dir)
        .fetch(args.fetch.fetch_config())
        .extractor(args.fetch.extractor_config())
        .build();

    start_server(config).await?;
    Ok(())
}

#[instrument]
async fn extract_command(args: ExtractArgs) -> anyhow::Result<()> {
    let fetcher = Fetcher::new(&args.fetch.fetch_config())?;
    let article =
        Article::fetch_and_extract(&fetcher, &args.url, &args.fetch.extractor_config()).await?;

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&article)?);
    } else {
        println!("Title: {}", article.title);
        println!();
        println!("{}", article.content);
    }

    Ok(())
}
