use std::path::PathBuf;

use anyhow::Result;
use biosim_lib::app::{self, Overrides};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run files to simulate, in order (`.toml` or classic `.sim`)
    #[arg(required = true)]
    configs: Vec<PathBuf>,

    /// Random seed for every run, replacing the configured one
    #[arg(short, long)]
    seed: Option<u64>,

    /// Year every run stops at, replacing the configured end year
    #[arg(short, long)]
    years: Option<u32>,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    biosim_core::init_logging(&args.log_level);

    let overrides = Overrides {
        seed: args.seed,
        end_year: args.years,
    };
    let failures = app::run_all(&args.configs, overrides);
    if failures > 0 {
        anyhow::bail!("{failures} of {} runs failed", args.configs.len());
    }
    Ok(())
}
