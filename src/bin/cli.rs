//! Catalog Crawler CLI
//!
//! Local execution entry point.

use std::path::PathBuf;

use catalog_crawler::{
    error::Result,
    models::{Config, CrawlConfig},
    pipeline,
    storage::LocalStorage,
};
use clap::{Parser, Subcommand};

/// Smartphone catalog crawler
#[derive(Parser, Debug)]
#[command(
    name = "catalog-crawler",
    version,
    about = "Crawls a paginated smartphone catalog into structured product records"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl the catalog and write the product output file
    Crawl {
        /// Page to begin discovery from (resumes a prior crawl)
        #[arg(long)]
        page: Option<u32>,

        /// Override the configured output file
        #[arg(long)]
        output: Option<String>,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("Catalog crawler starting...");

    let mut config = Config::load_or_default(&cli.config);

    match cli.command {
        Command::Crawl { page, output } => {
            if let Some(output) = output {
                config.output.file = output;
            }
            config.validate()?;

            let storage = LocalStorage::new(".");
            let input = CrawlConfig {
                page: page.unwrap_or(1),
            };

            let result = pipeline::run_crawler(&config, &storage, input).await?;

            log::info!(
                "Crawl ended with status '{}' and {} product(s)",
                result.status.label(),
                result.total_count
            );
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("Config OK ({})", config.crawler.base_url);
        }
    }

    log::info!("Done!");

    Ok(())
}
