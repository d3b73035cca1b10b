//! Keep per-file Markdown documentation in step with changed source files.
//!
//! A change list arrives through an environment variable. For every source
//! file in it, the synchronizer asks a text-completion model to either write a
//! fresh document or revise the existing one, and writes the answer verbatim.
//!
//! - **[`core`]**: Pure, deterministic logic (change-set parsing, path mapping).
//!   No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (environment, filesystem, prompt
//!   rendering, the completion service).
//!
//! [`sync`] coordinates the two to implement the `doc-updater` command. The
//! `gpt-processor` tool in the `summary` crate reuses the same pieces.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod sync;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
