//! Tool configuration stored in `docsync.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::change_set::SourceFilter;
use crate::core::doc_path::DocLayout;

/// Default config file name, looked up in the working root.
pub const CONFIG_FILE_NAME: &str = "docsync.toml";

/// Shared configuration for `doc-updater` and `gpt-processor` (TOML).
///
/// Every field is optional in the file; missing fields take the defaults the
/// tools have always used.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DocsyncConfig {
    /// Environment variable holding the whitespace-separated change list.
    pub changed_files_var: String,

    pub docs: DocsConfig,

    pub summary: SummaryConfig,

    pub openai: OpenAiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DocsConfig {
    /// Model used for creating and updating documentation.
    pub model: String,
    /// Directory documentation files are written under.
    pub root: String,
    /// Only change-list entries with this extension are documented.
    pub source_extension: String,
    /// Extension of the generated documentation files.
    pub doc_extension: String,
    /// Prefix stripped from source paths before nesting under `root`.
    pub source_root: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SummaryConfig {
    pub model: String,
    /// Output file, relative to the working root.
    pub output_path: String,
    pub system_prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OpenAiConfig {
    /// Environment variable holding the API key.
    pub api_key_var: String,
    pub api_base: String,
    pub request_timeout_secs: u64,
}

impl Default for DocsyncConfig {
    fn default() -> Self {
        Self {
            changed_files_var: "CHANGED_FILES".to_string(),
            docs: DocsConfig::default(),
            summary: SummaryConfig::default(),
            openai: OpenAiConfig::default(),
        }
    }
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            root: "docs".to_string(),
            source_extension: "py".to_string(),
            doc_extension: "md".to_string(),
            source_root: None,
        }
    }
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4".to_string(),
            output_path: "GPT_SUMMARY.md".to_string(),
            system_prompt: "You are a helpful assistant.".to_string(),
        }
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key_var: "OPENAI_API_KEY".to_string(),
            api_base: "https://api.openai.com/v1".to_string(),
            request_timeout_secs: 120,
        }
    }
}

impl DocsyncConfig {
    pub fn validate(&self) -> Result<()> {
        if self.changed_files_var.trim().is_empty() {
            return Err(anyhow!("changed_files_var must not be empty"));
        }
        if self.docs.model.trim().is_empty() {
            return Err(anyhow!("docs.model must not be empty"));
        }
        if self.docs.root.trim().is_empty() {
            return Err(anyhow!("docs.root must not be empty"));
        }
        if self.docs.source_extension.trim_start_matches('.').is_empty() {
            return Err(anyhow!("docs.source_extension must not be empty"));
        }
        if self.docs.doc_extension.trim_start_matches('.').is_empty() {
            return Err(anyhow!("docs.doc_extension must not be empty"));
        }
        if self.summary.model.trim().is_empty() {
            return Err(anyhow!("summary.model must not be empty"));
        }
        if self.summary.output_path.trim().is_empty() {
            return Err(anyhow!("summary.output_path must not be empty"));
        }
        if self.openai.api_key_var.trim().is_empty() {
            return Err(anyhow!("openai.api_key_var must not be empty"));
        }
        if !self.openai.api_base.starts_with("http://")
            && !self.openai.api_base.starts_with("https://")
        {
            return Err(anyhow!(
                "openai.api_base must be an http(s) URL (got '{}')",
                self.openai.api_base
            ));
        }
        if self.openai.request_timeout_secs == 0 {
            return Err(anyhow!("openai.request_timeout_secs must be > 0"));
        }
        Ok(())
    }

    /// Documentation layout derived from `[docs]`.
    pub fn doc_layout(&self) -> DocLayout {
        let layout = DocLayout::new(&self.docs.root, &self.docs.doc_extension);
        match &self.docs.source_root {
            Some(source_root) if !source_root.trim().is_empty() => {
                layout.with_source_root(source_root)
            }
            _ => layout,
        }
    }

    pub fn source_filter(&self) -> SourceFilter {
        SourceFilter::for_extension(&self.docs.source_extension)
    }
}

/// Resolve which config file to read: the explicit path, or
/// `docsync.toml` in `root`.
pub fn config_path(root: &Path, explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => root.join(CONFIG_FILE_NAME),
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `DocsyncConfig::default()`.
pub fn load_config(path: &Path) -> Result<DocsyncConfig> {
    if !path.exists() {
        let cfg = DocsyncConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: DocsyncConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, DocsyncConfig::default());
        assert_eq!(cfg.docs.model, "gpt-3.5-turbo");
        assert_eq!(cfg.summary.model, "gpt-4");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            "[docs]\nmodel = \"gpt-4o\"\nsource_root = \"src\"\n\n[openai]\nrequest_timeout_secs = 30\n",
        )
        .expect("write");

        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.docs.model, "gpt-4o");
        assert_eq!(cfg.docs.root, "docs");
        assert_eq!(cfg.openai.request_timeout_secs, 30);
        assert_eq!(cfg.changed_files_var, "CHANGED_FILES");
        assert_eq!(
            cfg.doc_layout(),
            DocLayout::new("docs", "md").with_source_root("src")
        );
    }

    #[test]
    fn invalid_values_are_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[docs]\nroot = \"\"\n").expect("write");
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("docs.root"));

        fs::write(&path, "[openai]\napi_base = \"ftp://example\"\n").expect("write");
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("api_base"));
    }

    #[test]
    fn malformed_toml_names_the_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[docs\n").expect("write");
        let err = load_config(&path).unwrap_err();
        assert!(format!("{err:#}").contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn explicit_config_path_wins() {
        let root = Path::new("/work");
        assert_eq!(config_path(root, None), PathBuf::from("/work/docsync.toml"));
        assert_eq!(
            config_path(root, Some(Path::new("/etc/ds.toml"))),
            PathBuf::from("/etc/ds.toml")
        );
    }

    #[test]
    fn blank_source_root_is_ignored() {
        let mut cfg = DocsyncConfig::default();
        cfg.docs.source_root = Some(" ".to_string());
        assert_eq!(cfg.doc_layout().source_root, None);
        assert!(cfg.source_filter().accepts("a.py"));
    }
}
