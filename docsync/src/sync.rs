//! Orchestration for `doc-updater`: one pass over the change set.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, instrument, warn};

use crate::core::change_set::{ChangeSet, SourceFilter};
use crate::core::doc_path::{DocLayout, doc_path_for};
use crate::io::completion::{Completion, CompletionRequest};
use crate::io::config::DocsyncConfig;
use crate::io::files::{read_doc, read_source, write_text};
use crate::io::prompt::PromptEngine;

/// Settings for a synchronization pass.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Model id sent with every request.
    pub model: String,
    pub layout: DocLayout,
    pub filter: SourceFilter,
}

impl SyncOptions {
    pub fn from_config(cfg: &DocsyncConfig) -> Self {
        Self {
            model: cfg.docs.model.clone(),
            layout: cfg.doc_layout(),
            filter: cfg.source_filter(),
        }
    }
}

/// What happened to a documentation file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocAction {
    Created,
    Updated,
}

impl DocAction {
    pub fn verb(self) -> &'static str {
        match self {
            DocAction::Created => "Created",
            DocAction::Updated => "Updated",
        }
    }
}

/// Result for one processed change-list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    /// Entry exactly as it appeared in the change list.
    pub source: String,
    /// Documentation path relative to the working root.
    pub doc_path: PathBuf,
    pub action: DocAction,
    /// The source file did not exist and was documented as empty.
    pub source_missing: bool,
}

/// Everything a pass did, in change-list order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub outcomes: Vec<FileOutcome>,
    /// Entries that did not match the source filter.
    pub skipped: Vec<String>,
}

/// Create or update the documentation file for every source entry in `changes`.
///
/// Entries are handled strictly in order. Each accepted entry costs exactly one
/// completion call, and its console line is printed once its file is written.
/// The first error aborts the pass; files already written stay as they are.
#[instrument(skip_all, fields(root = %root.display(), changes = changes.len()))]
pub fn sync_docs<C: Completion>(
    root: &Path,
    changes: &ChangeSet,
    options: &SyncOptions,
    client: &C,
) -> Result<SyncReport> {
    let engine = PromptEngine::new()?;
    let mut report = SyncReport::default();

    for source in changes.iter() {
        if !options.filter.accepts(source) {
            debug!(source, suffix = options.filter.suffix(), "skipping non-source entry");
            report.skipped.push(source.to_string());
            continue;
        }
        let outcome = sync_file(root, source, options, &engine, client)?;
        println!(
            "{} docs for {} at {}",
            outcome.action.verb(),
            outcome.source,
            outcome.doc_path.display()
        );
        report.outcomes.push(outcome);
    }

    info!(
        processed = report.outcomes.len(),
        skipped = report.skipped.len(),
        "sync complete"
    );
    Ok(report)
}

fn sync_file<C: Completion>(
    root: &Path,
    source: &str,
    options: &SyncOptions,
    engine: &PromptEngine,
    client: &C,
) -> Result<FileOutcome> {
    let doc_path = doc_path_for(source, &options.layout);
    let doc_full = root.join(&doc_path);

    let text = read_source(&root.join(source))?;
    if text.is_missing() {
        warn!(source, "source file not found, documenting empty content");
    }

    let (action, prompt) = if doc_full.exists() {
        let existing = read_doc(&doc_full)?;
        let prompt = engine.render_update_doc(source, &existing, text.as_str())?;
        (DocAction::Updated, prompt)
    } else {
        let prompt = engine.render_create_doc(source, text.as_str())?;
        (DocAction::Created, prompt)
    };

    let request = CompletionRequest::user_prompt(&options.model, prompt);
    let generated = client
        .complete(&request)
        .with_context(|| format!("generate docs for {source}"))?;
    write_text(&doc_full, &generated)?;
    debug!(source, doc = %doc_path.display(), action = ?action, "doc written");

    Ok(FileOutcome {
        source: source.to_string(),
        doc_path,
        action,
        source_missing: text.is_missing(),
    })
}
