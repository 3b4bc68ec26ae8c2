//! Shared integration test helpers for page-find.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{open_controller, paragraphs};
//! ```
//!
//! The `#[allow(dead_code)]` attribute suppresses warnings when only a
//! subset of helpers are used per file.

#![allow(dead_code)]

use page_find::{ContentRoot, LineViewport, MemoryStore, SearchConfig, SearchController};

/// Controller type used throughout the integration tests.
pub type TestController = SearchController<MemoryStore, LineViewport>;

/// Line height of the headless layout, in pixels.
pub const LINE_HEIGHT: f32 = 20.0;
/// Viewport and track height of the headless layout, in pixels.
pub const TRACK_HEIGHT: f32 = 100.0;

/// Creates a controller over `markup` with an empty in-memory store and
/// opens the panel.
pub fn open_controller(markup: &str) -> TestController {
    open_controller_with_store(markup, MemoryStore::new())
}

/// Like [`open_controller`], reusing an existing store.
pub fn open_controller_with_store(markup: &str, store: MemoryStore) -> TestController {
    let mut controller = closed_controller(markup, store, &SearchConfig::default());
    controller.show();
    controller
}

/// Creates a controller without opening the panel.
pub fn closed_controller(markup: &str, store: MemoryStore, config: &SearchConfig) -> TestController {
    SearchController::new(
        ContentRoot::from_markup(markup),
        store,
        LineViewport::new(LINE_HEIGHT, TRACK_HEIGHT, TRACK_HEIGHT),
        config,
    )
}

/// `count` paragraphs; the ones listed in `hits` contain the word "needle".
pub fn paragraphs(count: usize, hits: &[usize]) -> String {
    (0..count)
        .map(|i| {
            if hits.contains(&i) {
                format!("<p>line {i} needle</p>")
            } else {
                format!("<p>line {i}</p>")
            }
        })
        .collect()
}

/// Text of each match wrapper, in document order.
pub fn match_texts(controller: &TestController) -> Vec<String> {
    controller
        .content()
        .match_spans()
        .iter()
        .map(|s| s.text().to_string())
        .collect()
}

/// Document-order index of the match marked current, if any.
pub fn current_index(controller: &TestController) -> Option<usize> {
    controller
        .content()
        .match_spans()
        .iter()
        .position(|s| s.is_current())
}
