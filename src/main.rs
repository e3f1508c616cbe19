// Allocation-heavy parse workload; use mimalloc.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use extdump::workspace::LogProgressReporter;

/// Find C# extension methods across the solutions in a directory and
/// write two CSV reports to the current working directory.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Directory to search for solution files (non-recursive).
    #[arg(default_value = ".")]
    search_directory: Utf8PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Diagnostics go to stderr; the report files are the only disk
    // artifacts.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("extdump=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // A search directory that does not resolve is the same as one with
    // no solutions in it: the run still completes with empty reports.
    let search_directory = cli
        .search_directory
        .canonicalize_utf8()
        .unwrap_or_else(|_| cli.search_directory.clone());

    // Reports land in the invocation directory, wherever the search
    // pointed.
    let output_dir = Utf8PathBuf::from_path_buf(
        std::env::current_dir().context("failed to resolve the current working directory")?,
    )
    .map_err(|path| anyhow::anyhow!("current directory is not valid UTF-8: {}", path.display()))?;

    let (type_path, method_path) =
        extdump::run(&search_directory, &output_dir, &LogProgressReporter)?;
    info!(types = %type_path, methods = %method_path, "reports.written");
    Ok(())
}
