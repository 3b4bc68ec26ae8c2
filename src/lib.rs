//! page-find: an in-page text search widget.
//!
//! A [`SearchController`] owns a [`ContentRoot`] and drives the search panel:
//! it compiles queries into matchers, rebuilds the content tree with match
//! wrappers, steps through the matches and projects them onto a landmark
//! track. Rendering, scrolling and persistence are injected through the
//! [`Viewport`] and [`KeyValueStore`] traits.

pub mod cli;
pub mod content;
pub mod error;
pub mod history;
pub mod landmark;
pub mod match_index;
pub mod search;
pub mod store;
pub mod viewport;

pub use content::{ContentNode, ContentRoot, ElementNode, MatchSpan};
pub use error::{CompilationError, StoreError};
pub use history::SearchHistory;
pub use landmark::{Landmark, LandmarkProjector, ResizeDebouncer};
pub use match_index::MatchIndex;
pub use page_find_config::{Config, ConfigError, SearchConfig};
pub use search::{
    CompiledMatcher, KeyCode, KeyEvent, PanelView, PatternCompiler, Query, ResultDisplay,
    SearchController, SearchEvent, SearchState,
};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use viewport::{LineViewport, Rect, Viewport};
