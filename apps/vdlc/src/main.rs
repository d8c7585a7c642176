//! `vdlc`: the batch command-line front end to the analysis core (§6,
//! §7). Loads layered configuration, resolves an entry file, runs a
//! single `analyze()` pass, and prints diagnostics in the
//! `file:line:column: error[CODE]: message` wire format.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use vdl_fs::CachedFileSystem;

#[derive(Parser)]
#[command(name = "vdlc")]
#[command(about = "Semantic analyzer for VDL schema files", long_about = None)]
#[command(version)]
struct Cli {
    /// Entry `.vdl` file to analyze. Defaults to `entryFile` from
    /// configuration when omitted.
    entry: Option<PathBuf>,

    /// Path to a `vdl.toml` configuration file.
    #[arg(long, default_value = "vdl.toml")]
    config: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match vdl_config::AppConfig::load_from(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    vdl_config::logging::init(&config);

    match run(cli, config) {
        Ok(had_errors) => {
            if had_errors {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(true)` when diagnostics were reported, so `main` can
/// pick a non-zero exit code without treating a clean analysis as an
/// error.
fn run(cli: Cli, config: vdl_config::AppConfig) -> Result<bool> {
    let entry = cli
        .entry
        .or(config.entry_file)
        .context("no entry file given on the command line or in configuration")?;

    let fs = CachedFileSystem::new();
    let (_program, diagnostics) = vdl_analysis::analyze(&fs, &entry);

    for diagnostic in &diagnostics {
        eprintln!("{diagnostic}");
    }

    if diagnostics.is_empty() {
        tracing::info!(entry = %entry.display(), "analysis completed with no diagnostics");
    } else {
        tracing::warn!(entry = %entry.display(), count = diagnostics.len(), "analysis completed with diagnostics");
    }

    Ok(!diagnostics.is_empty())
}
