//! I/O helpers for the docsync tools.

pub mod completion;
pub mod config;
pub mod env;
pub mod files;
pub mod openai;
pub mod prompt;
