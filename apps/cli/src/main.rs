//! Assemble filter-query documents from criteria JSON on the command line.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use worklist_search::{assemble, SearchConfig, SearchCriterion};

#[derive(Parser)]
#[command(name = "worklist", about = "Translate task search criteria into filter queries")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Assemble a filter-query document from a criteria JSON array.
    Assemble {
        /// Path to the criteria file, or `-` for stdin.
        input: PathBuf,
        /// Combine criteria with OR semantics instead of AND.
        #[arg(long)]
        match_any: bool,
        /// Pretty-print the resulting document.
        #[arg(long)]
        pretty: bool,
    },
    /// Print the effective search configuration.
    Config {
        /// Custom configuration file; defaults to the embedded one.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match Cli::parse().command {
        Command::Assemble {
            input,
            match_any,
            pretty,
        } => run_assemble(&input, match_any, pretty),
        Command::Config { config } => run_config(config.as_deref()),
    }
}

fn run_assemble(input: &Path, match_any: bool, pretty: bool) -> anyhow::Result<()> {
    let json = read_input(input)?;
    let criteria: Vec<SearchCriterion> =
        serde_json::from_str(&json).context("criteria input must be a JSON array of criteria")?;
    for (index, criterion) in criteria.iter().enumerate() {
        criterion
            .validate()
            .with_context(|| format!("criterion #{index}"))?;
    }

    let document = assemble(&criteria, match_any);
    let out = if pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    println!("{out}");
    Ok(())
}

fn run_config(path: Option<&Path>) -> anyhow::Result<()> {
    let config = match path {
        Some(path) => SearchConfig::from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => SearchConfig::default_config().clone(),
    };
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("reading criteria from stdin")?;
        Ok(buffer)
    } else {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }
}
