//! Source and documentation file access.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

/// Result of reading a changed source file.
///
/// A file that does not exist is not an error: it is processed as if it were
/// empty, and callers can tell the two cases apart through this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceText {
    Loaded(String),
    Missing,
}

impl SourceText {
    /// Text to feed into a prompt; empty for a missing file.
    pub fn as_str(&self) -> &str {
        match self {
            SourceText::Loaded(text) => text,
            SourceText::Missing => "",
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, SourceText::Missing)
    }
}

/// Read a source file as UTF-8.
///
/// Not-found yields [`SourceText::Missing`]; any other failure is an error.
pub fn read_source(path: &Path) -> Result<SourceText> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(SourceText::Loaded(text)),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "source file not found");
            Ok(SourceText::Missing)
        }
        Err(err) => Err(err).with_context(|| format!("read source {}", path.display())),
    }
}

/// Read an existing documentation file.
pub fn read_doc(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read doc {}", path.display()))
}

/// Write `contents` verbatim, creating parent directories as needed.
pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("write {}", path.display()))
}
