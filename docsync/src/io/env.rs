//! Startup values read from the process environment.
//!
//! Everything here takes a lookup function instead of calling `std::env`
//! directly, so callers decide where values come from and tests never touch
//! the real process environment.

use std::collections::HashMap;

use anyhow::{Result, anyhow};

use crate::core::change_set::ChangeSet;

/// Completion-service credential.
///
/// `Debug` is redacted so the key never reaches logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Lookup backed by the real process environment.
///
/// Values that are not valid unicode are read lossily.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var_os(name).map(|value| value.to_string_lossy().into_owned())
}

/// Lookup over a fixed map, for tests and embedding.
pub fn map_env(vars: HashMap<String, String>) -> impl Fn(&str) -> Option<String> {
    move |name| vars.get(name).cloned()
}

/// Read the credential; absence is fatal.
pub fn require_api_key(lookup: impl Fn(&str) -> Option<String>, var: &str) -> Result<ApiKey> {
    lookup(var)
        .map(ApiKey)
        .ok_or_else(|| anyhow!("{var} environment variable not set"))
}

/// Read the change list. An unset variable is the same as an empty one.
pub fn read_change_list(lookup: impl Fn(&str) -> Option<String>, var: &str) -> ChangeSet {
    lookup(var)
        .map(|raw| ChangeSet::parse(&raw))
        .unwrap_or_default()
}
