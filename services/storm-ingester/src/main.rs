//! Tropical cyclone product ingester.
//!
//! Normalizes KMZ products and A-deck files into GeoJSON-shaped feature
//! collections or ranked model tracks, one file at a time or from a batch
//! manifest.

mod batch;
mod manifest;
mod output;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use storm_common::ProductType;
use storm_ingestion::{Ingester, PipelineConfig};

use batch::run_batch;
use manifest::BatchManifest;
use output::write_json;

#[derive(Parser, Debug)]
#[command(name = "storm-ingester")]
#[command(about = "Normalize tropical cyclone KMZ and A-deck products")]
struct Args {
    /// Pipeline configuration file (YAML)
    #[arg(short, long, env = "STORM_CONFIG")]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Human-readable logs instead of JSON
    #[arg(long)]
    pretty_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode one product file
    Decode {
        /// Product identifier (e.g. storm-surge, forecast-track)
        #[arg(short, long)]
        product: ProductType,

        /// KMZ, KML or A-deck file
        #[arg(short, long)]
        input: PathBuf,

        /// Storm identifier used in error messages
        #[arg(short, long)]
        storm: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Decode every job of a batch manifest
    Batch {
        /// Manifest file (YAML)
        #[arg(short, long)]
        manifest: PathBuf,

        /// Override the manifest's output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// List product identifiers
    Products,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(&args.log_level, args.pretty_logs)?;

    let config = match &args.config {
        Some(path) => PipelineConfig::from_yaml(path)?.with_env_overrides()?,
        None => PipelineConfig::from_env()?,
    };
    info!(
        max_parallel_jobs = config.max_parallel_jobs,
        source_tag = %config.source_tag,
        "Loaded configuration"
    );
    let ingester = Arc::new(Ingester::new(config));

    match args.command {
        Command::Decode {
            product,
            input,
            storm,
            output,
            pretty,
        } => {
            info!(product = %product, input = %input.display(), "Decoding product");

            let worker = ingester.clone();
            let path = input.clone();
            let decoded = tokio::task::spawn_blocking(move || {
                worker.ingest_file(product, &path, storm.as_deref())
            })
            .await??;

            info!(product = %product, items = decoded.len(), "Decoded product");
            write_json(&decoded, output.as_deref(), pretty).await?;
        }
        Command::Batch {
            manifest,
            output_dir,
        } => {
            let mut manifest = BatchManifest::load(&manifest)?;
            if output_dir.is_some() {
                manifest.output_dir = output_dir;
            }

            let total = manifest.jobs.len();
            let summary = run_batch(ingester, manifest).await?;
            if summary.failed > 0 {
                bail!("{} of {} jobs failed", summary.failed, total);
            }
        }
        Command::Products => {
            for product in ProductType::ALL {
                println!("{}", product);
            }
        }
    }

    Ok(())
}

/// Logs go to stderr so decoded JSON on stdout stays clean.
fn init_tracing(log_level: &str, pretty: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()));

    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if pretty {
        tracing::subscriber::set_global_default(builder.pretty().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.with_thread_ids(true).json().finish())?;
    }
    Ok(())
}
