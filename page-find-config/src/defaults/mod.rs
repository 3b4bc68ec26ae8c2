//! Default value functions for configuration.
//!
//! Each function is used as a `#[serde(default = "crate::defaults::...")]`
//! attribute on a config field, and by the matching `Default` impl.

// ── Primitive helpers ──────────────────────────────────────────────────────

pub fn bool_false() -> bool {
    false
}

// ── Search history ─────────────────────────────────────────────────────────

/// Maximum number of remembered queries. Oldest entries are evicted first.
pub fn history_max_entries() -> usize {
    100
}

/// Key under which the history is stored in the key/value store.
pub fn history_key() -> String {
    "searchHistory".to_string()
}

// ── Landmarks ──────────────────────────────────────────────────────────────

/// Quiet period after the last resize event before landmarks are rebuilt.
pub fn resize_debounce_ms() -> u64 {
    200
}
