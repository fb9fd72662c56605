//! av_fiscalite CLI
//!
//! One subcommand per engine; each reads a JSON input document (file or
//! stdin) and prints the result struct as JSON for scripted verification.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use serde::de::DeserializeOwned;
use serde::Serialize;

use av_fiscalite::{
    compute_death_benefit_tax, compute_withdrawal_tax, simulate_fee_erosion,
};

#[derive(Parser)]
#[command(name = "av_fiscalite", version, about = "French life-insurance tax simulators")]
struct Cli {
    /// Print compact JSON instead of pretty-printed
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Withdrawal taxation: PFU vs progressive-IR comparison
    Rachat {
        /// JSON input file ("-" or omitted reads stdin)
        input: Option<PathBuf>,
    },
    /// Death-benefit transmission taxation (990 I / 757 B)
    Deces {
        /// JSON input file ("-" or omitted reads stdin)
        input: Option<PathBuf>,
    },
    /// Fee-erosion simulation with/without contract fees
    Frais {
        /// JSON input file ("-" or omitted reads stdin)
        input: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Command::Rachat { input } => {
            let params = read_input(input.as_deref())?;
            info!("computing withdrawal taxation");
            let result = compute_withdrawal_tax(&params)?;
            print_output(&result, cli.compact)
        }
        Command::Deces { input } => {
            let params = read_input(input.as_deref())?;
            info!("computing death-benefit taxation");
            let result = compute_death_benefit_tax(&params)?;
            print_output(&result, cli.compact)
        }
        Command::Frais { input } => {
            let params = read_input(input.as_deref())?;
            info!("running fee-erosion simulation");
            let result = simulate_fee_erosion(&params)?;
            print_output(&result, cli.compact)
        }
    }
}

/// Read and parse the JSON input document from a file or stdin
fn read_input<T: DeserializeOwned>(path: Option<&std::path::Path>) -> Result<T> {
    let raw = match path {
        Some(path) if path != std::path::Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("unable to read {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("unable to read stdin")?;
            buf
        }
    };
    serde_json::from_str(&raw).context("invalid JSON input")
}

fn print_output<T: Serialize>(result: &T, compact: bool) -> Result<()> {
    let rendered = if compact {
        serde_json::to_string(result)?
    } else {
        serde_json::to_string_pretty(result)?
    };
    println!("{}", rendered);
    Ok(())
}
