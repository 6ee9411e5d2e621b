use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tax_data::logging::init_logging;
use tax_data::{build_registry, compute_return, load_batch_file, read_return_file, summary_line};
use tracing::error;

/// Compute federal and state income tax for returns on disk.
#[derive(Parser, Debug)]
#[command(name = "tax-calc")]
#[command(version, about, long_about = None)]
struct Args {
    /// Log filter: a level ("debug") or any RUST_LOG directive
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log output to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Directory of extra state documents (*.toml) to register
    #[arg(long, global = true)]
    state_configs: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute one return file and print the result as TOML
    Return {
        /// Path to the return (TOML)
        file: PathBuf,
    },

    /// Compute every row of a CSV file and print one summary line per row
    Batch {
        /// Path to the batch file (CSV)
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_level.as_deref(), args.log_file.as_deref())?;

    let registry = build_registry(args.state_configs.as_deref())
        .context("Failed to load state documents")?;

    match &args.command {
        Command::Return { file } => {
            let tax_return = read_return_file(file)?;
            let report = compute_return(&tax_return, &registry)
                .with_context(|| format!("Failed to compute: {}", file.display()))?;
            let rendered = toml::to_string_pretty(&report).context("Failed to render result")?;
            print!("{rendered}");
        }
        Command::Batch { file } => {
            let returns = load_batch_file(file)
                .with_context(|| format!("Failed to load batch: {}", file.display()))?;
            let mut failures = 0;
            for (idx, tax_return) in returns.iter().enumerate() {
                match compute_return(tax_return, &registry) {
                    Ok(report) => println!("{}", summary_line(idx + 1, &report)),
                    Err(err) => {
                        failures += 1;
                        error!(row = idx + 1, %err, "row failed");
                        println!("row {}: error: {err}", idx + 1);
                    }
                }
            }
            if failures > 0 {
                anyhow::bail!("{failures} of {} rows failed", returns.len());
            }
        }
    }

    Ok(())
}
