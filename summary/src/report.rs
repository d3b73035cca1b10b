//! Combined summary report for a change list.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, instrument};

use docsync::core::change_set::ChangeSet;
use docsync::io::completion::{ChatMessage, Completion, CompletionRequest};
use docsync::io::config::DocsyncConfig;
use docsync::io::files::write_text;
use docsync::io::prompt::{PromptEngine, quoted_list};

/// First line of every summary file.
pub const SUMMARY_HEADER: &str = "# GPT-4 Summary";

/// Settings for one summary run.
#[derive(Debug, Clone)]
pub struct SummaryOptions {
    pub model: String,
    pub system_prompt: String,
    /// Output file, relative to the working root.
    pub output_path: PathBuf,
}

impl SummaryOptions {
    pub fn from_config(cfg: &DocsyncConfig) -> Self {
        Self {
            model: cfg.summary.model.clone(),
            system_prompt: cfg.summary.system_prompt.clone(),
            output_path: PathBuf::from(&cfg.summary.output_path),
        }
    }
}

/// Summarize `changes` with a single completion call and overwrite the report.
///
/// The prompt names the changed files but does not include their contents.
/// Returns the full path of the written file.
#[instrument(skip_all, fields(root = %root.display(), changes = changes.len()))]
pub fn write_summary<C: Completion>(
    root: &Path,
    changes: &ChangeSet,
    options: &SummaryOptions,
    client: &C,
) -> Result<PathBuf> {
    println!("Changed files: {}", quoted_list(changes.as_slice()));

    let prompt = PromptEngine::new()?.render_summary(changes.as_slice())?;
    let request = CompletionRequest {
        model: options.model.clone(),
        messages: vec![
            ChatMessage::system(options.system_prompt.as_str()),
            ChatMessage::user(prompt),
        ],
    };
    let output = client.complete(&request).context("generate summary")?;

    let path = root.join(&options.output_path);
    write_text(&path, &render_report(&output))?;
    debug!(path = %path.display(), bytes = output.len(), "summary written");
    println!("GPT output written to {}", options.output_path.display());
    Ok(path)
}

/// Header, blank line, then the trimmed completion text.
fn render_report(output: &str) -> String {
    format!("{SUMMARY_HEADER}\n\n{}", output.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsync::io::completion::{CompletionError, Role};
    use docsync::test_support::{ScriptedCompletion, TestWorkspace};

    fn options() -> SummaryOptions {
        SummaryOptions::from_config(&DocsyncConfig::default())
    }

    #[test]
    fn report_trims_completion_under_fixed_header() {
        assert_eq!(
            render_report("\n\n  Looks good.\n"),
            "# GPT-4 Summary\n\nLooks good."
        );
    }

    #[test]
    fn one_call_regardless_of_change_count() {
        let ws = TestWorkspace::new().expect("workspace");
        ws.write("a.py", "SECRET_CONTENT = 1").expect("write");
        let client = ScriptedCompletion::with_texts(["  Three files changed.  \n"]);

        let path = write_summary(
            ws.path(),
            &ChangeSet::parse("a.py b.rs c.md"),
            &options(),
            &client,
        )
        .expect("summary");

        assert_eq!(path, ws.join("GPT_SUMMARY.md"));
        assert_eq!(client.call_count(), 1);
        let requests = client.requests();
        let request = &requests[0];
        assert_eq!(request.model, "gpt-4");
        let roles: Vec<Role> = request.messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User]);
        assert_eq!(request.messages[0].content, "You are a helpful assistant.");

        let prompt = request.user_content().expect("user prompt");
        assert!(prompt.contains("['a.py', 'b.rs', 'c.md']"));
        assert!(!prompt.contains("SECRET_CONTENT"), "contents are not embedded");

        assert_eq!(
            ws.read("GPT_SUMMARY.md").expect("summary"),
            "# GPT-4 Summary\n\nThree files changed."
        );
    }

    #[test]
    fn existing_report_is_overwritten() {
        let ws = TestWorkspace::new().expect("workspace");
        ws.write("GPT_SUMMARY.md", "stale report that is quite long")
            .expect("write");
        let client = ScriptedCompletion::with_texts(["fresh"]);

        write_summary(ws.path(), &ChangeSet::parse("x.py"), &options(), &client)
            .expect("summary");

        assert_eq!(
            ws.read("GPT_SUMMARY.md").expect("summary"),
            "# GPT-4 Summary\n\nfresh"
        );
    }

    #[test]
    fn completion_failure_writes_nothing() {
        let ws = TestWorkspace::new().expect("workspace");
        let client = ScriptedCompletion::new();
        client.push_error(CompletionError::Auth("bad key".to_string()));

        let err = write_summary(ws.path(), &ChangeSet::parse("x.py"), &options(), &client)
            .unwrap_err();

        assert!(format!("{err:#}").contains("generate summary"));
        assert!(!ws.exists("GPT_SUMMARY.md"));
    }

    #[test]
    fn custom_output_path_is_created() {
        let ws = TestWorkspace::new().expect("workspace");
        let client = ScriptedCompletion::with_texts(["ok"]);
        let options = SummaryOptions {
            output_path: PathBuf::from("reports/summary.md"),
            ..options()
        };

        write_summary(ws.path(), &ChangeSet::parse("x.py"), &options, &client)
            .expect("summary");

        assert!(ws.exists("reports/summary.md"));
    }
}
