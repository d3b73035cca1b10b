//! Mapping from a changed source file to its documentation file.

use std::path::{Component, Path, PathBuf};

/// Where documentation files live and how they are named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocLayout {
    /// Directory every documentation path is nested under (e.g. `docs`).
    pub root: PathBuf,
    /// Extension that replaces the source extension (e.g. `md`).
    pub extension: String,
    /// Prefix removed from source paths before nesting, when they start with it.
    pub source_root: Option<PathBuf>,
}

impl DocLayout {
    pub fn new(root: impl Into<PathBuf>, extension: &str) -> Self {
        Self {
            root: root.into(),
            extension: extension.trim_start_matches('.').to_string(),
            source_root: None,
        }
    }

    pub fn with_source_root(mut self, source_root: impl Into<PathBuf>) -> Self {
        self.source_root = Some(source_root.into());
        self
    }
}

/// Derive the documentation path for `source`.
///
/// Replaces the final extension (appending one if absent) and nests the
/// result under `layout.root`, keeping the source's directory structure.
/// Root, `.` and `..` components are dropped so every result stays under
/// the root: `../outside/x.py` maps to `docs/outside/x.md`.
pub fn doc_path_for(source: &str, layout: &DocLayout) -> PathBuf {
    let source = Path::new(source);
    let relative = layout
        .source_root
        .as_deref()
        .and_then(|prefix| source.strip_prefix(prefix).ok())
        .unwrap_or(source);

    let nested: PathBuf = relative
        .components()
        .filter(|component| matches!(component, Component::Normal(_)))
        .collect();

    layout.root.join(nested.with_extension(&layout.extension))
}
