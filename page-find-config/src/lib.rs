//! Configuration system for the page-find search widget.
//!
//! This crate provides configuration loading, saving, and default values
//! for the search controller. It includes:
//!
//! - Search option defaults (match case, regex mode)
//! - History buffer bounds and the persistence key
//! - Resize debounce timing for the landmark track

pub mod config;
pub mod defaults;
pub mod error;
pub mod search_config;

pub use config::Config;
pub use error::ConfigError;
pub use search_config::SearchConfig;
