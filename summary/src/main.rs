//! `gpt-processor`: write one combined summary for the changed files.

mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use docsync::exit_codes;
use docsync::io::config::{config_path, load_config};
use docsync::io::env::{process_env, read_change_list, require_api_key};
use docsync::io::openai::OpenAiClient;
use docsync::logging;
use report::{SummaryOptions, write_summary};

#[derive(Parser)]
#[command(
    name = "gpt-processor",
    version,
    about = "Summarize the changed files into a single report"
)]
struct Cli {
    /// Config file (default: `docsync.toml` in the working root).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Working root the report is written to.
    #[arg(long)]
    root: Option<PathBuf>,

    /// Override the summary model.
    #[arg(long)]
    model: Option<String>,
}

fn main() {
    logging::init();
    if let Err(err) = run(Cli::parse()) {
        eprintln!("{:#}", err);
        std::process::exit(exit_codes::FAILED);
    }
}

fn run(cli: Cli) -> Result<()> {
    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir().context("resolve current directory")?,
    };
    let mut cfg = load_config(&config_path(&root, cli.config.as_deref()))?;
    if let Some(model) = cli.model {
        cfg.summary.model = model;
    }

    let api_key = require_api_key(process_env, &cfg.openai.api_key_var)?;

    let changes = read_change_list(process_env, &cfg.changed_files_var);
    if changes.is_empty() {
        println!("No changed files detected.");
        return Ok(());
    }

    let client = OpenAiClient::new(api_key, &cfg.openai)?;
    write_summary(&root, &changes, &SummaryOptions::from_config(&cfg), &client)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_model_override() {
        let cli = Cli::parse_from(["gpt-processor", "--model", "gpt-4o-mini"]);
        assert_eq!(cli.model.as_deref(), Some("gpt-4o-mini"));
        assert!(cli.root.is_none());
    }
}
