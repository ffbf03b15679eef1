mod enrich;
mod validate;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "placelink")]
#[command(about = "Enrich trip datasets with Google place IDs and map links")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve a place ID and maps link for every location in the dataset
    Enrich {
        /// Path to the primary trip-facts JSON file
        #[arg(long, default_value = "data/trip_facts.json")]
        trip_facts: PathBuf,

        /// Directory of per-city rolodex JSON files
        #[arg(long, default_value = "data/rolodex")]
        rolodex_dir: PathBuf,

        /// Stop after checking this many locations
        #[arg(long)]
        limit: Option<usize>,

        /// Log every tier failure as it happens
        #[arg(long)]
        verbose: bool,
    },
    /// Check enriched rolodex files for required fields and URL consistency
    Validate {
        /// Directory of per-city rolodex JSON files
        #[arg(long, default_value = "data/rolodex")]
        rolodex_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Enrich {
            trip_facts,
            rolodex_dir,
            limit,
            verbose,
        } => {
            init_tracing(verbose);
            let config = placelink_core::load_app_config_from_env()?;
            enrich::run(&config, &trip_facts, &rolodex_dir, limit).await
        }
        Commands::Validate { rolodex_dir } => {
            init_tracing(false);
            validate::run(&rolodex_dir)
        }
    }
}

/// Per-record tier failures are logged at `warn`; without `--verbose` the
/// default filter hides them and only the summary reaches the terminal.
/// `RUST_LOG` overrides both.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "error" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
