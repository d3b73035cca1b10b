//! Stable exit codes for the docsync command-line tools.

/// Command succeeded, including the "no changed files" case.
pub const OK: i32 = 0;
/// Command failed: missing credential, unreadable config, filesystem or
/// completion-service error.
pub const FAILED: i32 = 1;
