//! Prompt rendering for documentation and summary requests.

use anyhow::{Context, Result};
use minijinja::{Environment, context};

const CREATE_DOC_TEMPLATE: &str = include_str!("prompts/create_doc.md");
const UPDATE_DOC_TEMPLATE: &str = include_str!("prompts/update_doc.md");
const SUMMARY_TEMPLATE: &str = include_str!("prompts/summary.md");

/// Template engine wrapper around minijinja.
pub struct PromptEngine {
    env: Environment<'static>,
}

impl PromptEngine {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        // Prompts are sent verbatim, including the template file's final newline.
        env.set_keep_trailing_newline(true);
        env.add_template("create_doc", CREATE_DOC_TEMPLATE)
            .context("load create_doc template")?;
        env.add_template("update_doc", UPDATE_DOC_TEMPLATE)
            .context("load update_doc template")?;
        env.add_template("summary", SUMMARY_TEMPLATE)
            .context("load summary template")?;
        Ok(Self { env })
    }

    /// Prompt asking for a brand-new document for `filename`.
    pub fn render_create_doc(&self, filename: &str, source: &str) -> Result<String> {
        let template = self.env.get_template("create_doc")?;
        let rendered = template
            .render(context! { filename => filename, source => source })
            .context("render create_doc prompt")?;
        Ok(rendered)
    }

    /// Prompt asking to revise `existing_doc` against the new `source`.
    pub fn render_update_doc(
        &self,
        filename: &str,
        existing_doc: &str,
        source: &str,
    ) -> Result<String> {
        let template = self.env.get_template("update_doc")?;
        let rendered = template
            .render(context! {
                filename => filename,
                existing_doc => existing_doc,
                source => source,
            })
            .context("render update_doc prompt")?;
        Ok(rendered)
    }

    /// Prompt for the combined summary. Only the file names are included.
    pub fn render_summary(&self, files: &[String]) -> Result<String> {
        let template = self.env.get_template("summary")?;
        let rendered = template
            .render(context! { files => quoted_list(files) })
            .context("render summary prompt")?;
        Ok(rendered)
    }
}

/// Render paths as `['a.py', 'b.py']`.
pub fn quoted_list(files: &[String]) -> String {
    let quoted: Vec<String> = files.iter().map(|f| format!("'{f}'")).collect();
    format!("[{}]", quoted.join(", "))
}
