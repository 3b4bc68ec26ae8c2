//! `SearchConfig`: search settings.

use serde::{Deserialize, Serialize};

/// Settings controlling search options, history, and landmark rebuilds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Initial state of the match-case toggle
    #[serde(default = "crate::defaults::bool_false")]
    pub match_case: bool,

    /// Initial state of the regex toggle
    #[serde(default = "crate::defaults::bool_false")]
    pub use_regex: bool,

    /// Maximum number of queries kept in the search history
    #[serde(default = "crate::defaults::history_max_entries")]
    pub history_max_entries: usize,

    /// Key used to persist the history in the key/value store
    #[serde(default = "crate::defaults::history_key")]
    pub history_key: String,

    /// Quiet period (ms) after the last resize before landmarks are rebuilt
    #[serde(default = "crate::defaults::resize_debounce_ms")]
    pub resize_debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            match_case: crate::defaults::bool_false(),
            use_regex: crate::defaults::bool_false(),
            history_max_entries: crate::defaults::history_max_entries(),
            history_key: crate::defaults::history_key(),
            resize_debounce_ms: crate::defaults::resize_debounce_ms(),
        }
    }
}
