//! journal-catalog - Academic journal directory
//!
//! Builds the journal dataset from CSV exports, reconciles scraped datasets
//! and serves read-only browsing queries.
//!
//! ## Usage
//!
//! ### Build the dataset from CSV exports
//! ```bash
//! journal-catalog build --data-dir ./datos
//! ```
//!
//! ### Merge two scraped datasets
//! ```bash
//! journal-catalog combine results_a.json results_b.json -o revistas_combined.json
//! ```
//!
//! ### HTTP Server Mode
//! ```bash
//! journal-catalog serve --port 3000
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use journal_catalog::{
    catalog::Catalog,
    config::{DataPaths, DATA_DIR_ENV, DEFAULT_DATA_DIR},
    diagnostics, ingest, reconcile, server, store,
};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

// ============================================================================
// CLI Definition
// ============================================================================

/// Academic journal directory - dataset builder, reconciler and query service
#[derive(Parser)]
#[command(name = "journal-catalog")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Root of the data directory
    #[arg(long, global = true, env = DATA_DIR_ENV, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the journal dataset from per-area and per-catalog CSV files
    Build {
        /// Directory of area CSV files
        #[arg(long)]
        areas_dir: Option<PathBuf>,

        /// Directory of catalog CSV files
        #[arg(long)]
        catalogs_dir: Option<PathBuf>,

        /// Output JSON file (default: <data-dir>/json/revistas.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Merge two scraped JSON datasets into one
    Combine {
        /// First JSON file (wins ties)
        file1: PathBuf,

        /// Second JSON file
        file2: PathBuf,

        /// Output JSON file
        #[arg(short, long, default_value = "revistas_combined.json")]
        output: PathBuf,

        /// Only analyze both files, do not merge
        #[arg(short, long)]
        analyze: bool,
    },

    /// Report coverage and potential duplicates of JSON datasets
    Analyze {
        /// JSON files to analyze
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Run as HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Journal dataset (default: <data-dir>/json/revistas.json)
        #[arg(long)]
        journals: Option<PathBuf>,

        /// Ranking dataset (default: <data-dir>/json/revistas_scimagojr.json)
        #[arg(long)]
        rankings: Option<PathBuf>,
    },
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .init();

    let paths = DataPaths::from_root(&cli.data_dir);

    match cli.command {
        Commands::Build {
            areas_dir,
            catalogs_dir,
            output,
        } => {
            let paths = paths.with_overrides(output, None, areas_dir, catalogs_dir);
            run_build(&paths)
        }
        Commands::Combine {
            file1,
            file2,
            output,
            analyze,
        } => {
            if analyze {
                run_analyze(&[file1, file2])
            } else {
                run_combine(&file1, &file2, &output)
            }
        }
        Commands::Analyze { files } => run_analyze(&files),
        Commands::Serve {
            port,
            host,
            journals,
            rankings,
        } => {
            let paths = paths.with_overrides(journals, rankings, None, None);
            run_server(host, port, &paths).await
        }
    }
}

// ============================================================================
// Dataset Commands
// ============================================================================

fn run_build(paths: &DataPaths) -> Result<()> {
    println!("Reading CSV files...");
    let mapping = ingest::build_dataset(&paths.areas_dir, &paths.catalogs_dir)
        .context("Failed to read CSV exports")?;

    store::save_mapping(&paths.journals, &mapping)
        .with_context(|| format!("Failed to write {}", paths.journals.display()))?;

    println!("Dataset written to: {}", paths.journals.display());
    println!("Total journals processed: {}", mapping.len());
    Ok(())
}

fn run_combine(file1: &Path, file2: &Path, output: &Path) -> Result<()> {
    println!("Combining {} and {}...", file1.display(), file2.display());

    // Both inputs are loaded before anything is written
    let first = load_input(file1)?;
    let second = load_input(file2)?;

    let (merged, stats) = reconcile::reconcile(first, second);
    stats.log();

    store::save_mapping(output, &merged)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Combined file saved to: {}", output.display());
    println!("\n{}", stats);
    Ok(())
}

fn run_analyze(files: &[PathBuf]) -> Result<()> {
    for file in files {
        let mapping = load_input(file)?;
        let report = diagnostics::analyze(&mapping);
        println!("\n=== Analysis of {} ===", file.display());
        println!("{}", report);
    }
    Ok(())
}

fn load_input(path: &Path) -> Result<journal_catalog::JournalMapping> {
    let mapping = store::load_mapping(path)
        .with_context(|| format!("Cannot load input file {}", path.display()))?;
    println!("Loaded {} records from {}", mapping.len(), path.display());
    Ok(mapping)
}

// ============================================================================
// HTTP Server
// ============================================================================

async fn run_server(host: String, port: u16, paths: &DataPaths) -> Result<()> {
    paths.validate_for_serving()?;

    let catalog = Catalog::load(paths).context("Failed to load datasets")?;
    info!(journals = catalog.len(), "Catalog loaded");

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .context("Invalid host:port")?;

    println!("Listening on http://{}", addr);
    server::serve(addr, Arc::new(catalog))
        .await
        .context("Server error")?;

    Ok(())
}
