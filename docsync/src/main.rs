//! `doc-updater`: create or refresh Markdown docs for changed source files.
//!
//! Reads the change list from `CHANGED_FILES`, maps each `.py` entry to
//! `docs/<path>.md`, and asks the completion service to write or revise it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use docsync::exit_codes;
use docsync::io::config::{config_path, load_config};
use docsync::io::env::{process_env, read_change_list, require_api_key};
use docsync::io::openai::OpenAiClient;
use docsync::logging;
use docsync::sync::{SyncOptions, sync_docs};

#[derive(Parser)]
#[command(
    name = "doc-updater",
    version,
    about = "Create or update Markdown docs for changed source files"
)]
struct Cli {
    /// Config file (default: `docsync.toml` in the working root).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Working root that change-list paths and `docs/` are resolved against.
    #[arg(long)]
    root: Option<PathBuf>,

    /// Override the documentation model.
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
        cfg.docs.model = model;
    }

    let api_key = require_api_key(process_env, &cfg.openai.api_key_var)?;

    let changes = read_change_list(process_env, &cfg.changed_files_var);
    if changes.is_empty() {
        println!("No changed files detected.");
        return Ok(());
    }
    debug!(count = changes.len(), "changed files");

    let client = OpenAiClient::new(api_key, &cfg.openai)?;
    sync_docs(&root, &changes, &SyncOptions::from_config(&cfg), &client)?;
    Ok(())
}
