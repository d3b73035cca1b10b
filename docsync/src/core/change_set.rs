//! Parsing of the whitespace-separated change list.

/// Ordered list of changed file paths for one invocation.
///
/// Entries keep their input order. Duplicates are kept and nothing is checked
/// against the filesystem.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    paths: Vec<String>,
}

impl ChangeSet {
    /// Split `raw` on any whitespace. No quoting or escaping is recognized.
    pub fn parse(raw: &str) -> Self {
        Self {
            paths: raw.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.paths
    }
}

/// Accepts change-list entries that end with one recognized source suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFilter {
    suffix: String,
}

impl SourceFilter {
    /// Build a filter for `extension` (with or without the leading dot).
    pub fn for_extension(extension: &str) -> Self {
        Self {
            suffix: format!(".{}", extension.trim_start_matches('.')),
        }
    }

    /// Plain string suffix test on the entry as given.
    pub fn accepts(&self, path: &str) -> bool {
        path.ends_with(&self.suffix)
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_on_any_whitespace_and_keeps_order() {
        let changes = ChangeSet::parse("  b.py\ta.py\n\nsrc/c.rs  b.py ");
        let paths: Vec<&str> = changes.iter().collect();
        assert_eq!(paths, vec!["b.py", "a.py", "src/c.rs", "b.py"]);
        assert_eq!(changes.len(), 4);
    }

    #[test]
    fn parse_blank_input_is_empty() {
        assert!(ChangeSet::parse("").is_empty());
        assert!(ChangeSet::parse(" \n\t ").is_empty());
    }

    #[test]
    fn parse_does_not_interpret_quotes() {
        let changes = ChangeSet::parse("\"my file.py\"");
        assert_eq!(changes.as_slice(), ["\"my", "file.py\""]);
    }

    #[test]
    fn filter_matches_suffix_only() {
        let filter = SourceFilter::for_extension("py");
        assert_eq!(filter.suffix(), ".py");
        assert!(filter.accepts("src/a/b.py"));
        assert!(filter.accepts(".py"));
        assert!(!filter.accepts("src/a/b.pyc"));
        assert!(!filter.accepts("notes/copy"));
        assert!(!filter.accepts("README.md"));
    }

    #[test]
    fn filter_accepts_dotted_extension() {
        assert_eq!(SourceFilter::for_extension(".rs").suffix(), ".rs");
    }
}
