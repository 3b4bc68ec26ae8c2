//! In-page search functionality.
//!
//! This module provides the search controller that sequences pattern
//! compilation, tree highlighting, match navigation and landmark projection,
//! together with the panel view model the UI glue renders from.

mod engine;
pub mod types;

pub use engine::{CompiledMatcher, PatternCompiler};
pub use types::{
    ErrorMessage, KeyCode, KeyEvent, PanelView, Query, ResultDisplay, SearchEvent, SearchState,
};

use crate::content::{ContentRoot, TreeHighlighter};
use crate::history::SearchHistory;
use crate::landmark::{Landmark, LandmarkProjector, ResizeDebouncer};
use crate::match_index::MatchIndex;
use crate::store::KeyValueStore;
use crate::viewport::Viewport;
use page_find_config::SearchConfig;
use std::time::{Duration, Instant};

/// Search controller for one content root.
///
/// All operations are synchronous. The only deferred work is the debounced
/// landmark rebuild, driven by [`poll_resize`](Self::poll_resize).
pub struct SearchController<S: KeyValueStore, V: Viewport> {
    /// Content being searched.
    content: ContentRoot,
    /// Persistence for the history.
    store: S,
    /// Scroll container geometry.
    viewport: V,
    /// Compiler with its cached matcher.
    compiler: PatternCompiler,
    /// Matches of the current highlight pass.
    index: MatchIndex,
    /// Past queries.
    history: SearchHistory,
    /// Pending landmark rebuild after resize.
    resize: ResizeDebouncer,
    /// Landmark positions of the current matches.
    landmarks: Vec<Landmark>,
    /// Panel view model.
    view: PanelView,
    /// Panel lifecycle state.
    state: SearchState,
    /// Last query that was actually highlighted.
    last_search: Option<Query>,
    /// Number of completed highlight passes.
    highlight_passes: usize,
}

impl<S: KeyValueStore, V: Viewport> SearchController<S, V> {
    /// Create a controller with injected content, store and viewport.
    pub fn new(content: ContentRoot, store: S, viewport: V, config: &SearchConfig) -> Self {
        let view = PanelView {
            match_case: config.match_case,
            use_regex: config.use_regex,
            ..PanelView::default()
        };
        Self {
            content,
            store,
            viewport,
            compiler: PatternCompiler::new(),
            index: MatchIndex::new(),
            history: SearchHistory::new(config.history_max_entries, config.history_key.clone()),
            resize: ResizeDebouncer::new(Duration::from_millis(config.resize_debounce_ms)),
            landmarks: Vec::new(),
            view,
            state: SearchState::Closed,
            last_search: None,
            highlight_passes: 0,
        }
    }

    // ── Accessors ──────────────────────────────────────────────────────────

    /// Current panel state.
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Panel view model.
    pub fn view(&self) -> &PanelView {
        &self.view
    }

    /// Content tree, possibly highlighted.
    pub fn content(&self) -> &ContentRoot {
        &self.content
    }

    /// Injected viewport.
    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    /// Mutable viewport, e.g. to apply a resize before [`handle_resize`](Self::handle_resize).
    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    /// Injected store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Search history.
    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    /// Landmarks of the current matches.
    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    /// Number of matches of the last highlight pass.
    pub fn match_count(&self) -> usize {
        self.index.len()
    }

    /// 1-based position of the current match.
    pub fn current_position(&self) -> Option<usize> {
        self.index.position()
    }

    /// Number of highlight passes run so far.
    pub fn highlight_passes(&self) -> usize {
        self.highlight_passes
    }

    /// Whether case-sensitive matching is on.
    pub fn is_match_case_enabled(&self) -> bool {
        self.view.match_case
    }

    /// Whether regex matching is on.
    pub fn is_regex_enabled(&self) -> bool {
        self.view.use_regex
    }

    // ── Input glue ─────────────────────────────────────────────────────────

    /// Replace the input text, as typing does. Resets history recall.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.view.input = text.into();
        self.history.reset_recall();
    }

    /// Input gained focus.
    pub fn focus(&mut self) {
        self.view.input_focused = true;
        self.view.error.on_focus();
    }

    /// Input lost focus.
    pub fn blur(&mut self) {
        self.view.input_focused = false;
        self.view.error.on_blur();
    }

    /// Flip the match-case option and refocus the input.
    pub fn toggle_match_case(&mut self) {
        self.view.match_case = !self.view.match_case;
        self.focus();
    }

    /// Flip the regex option and refocus the input.
    pub fn toggle_regex(&mut self) {
        self.view.use_regex = !self.view.use_regex;
        self.focus();
    }

    /// Expand or collapse the settings sub-panel.
    pub fn toggle_settings(&mut self) {
        self.view.settings_open = !self.view.settings_open;
    }

    // ── Panel lifecycle ────────────────────────────────────────────────────

    /// Open the panel, focus the input and reload the history.
    ///
    /// Reopening restores whatever results are still highlighted.
    pub fn show(&mut self) {
        self.view.visible = true;
        self.focus();
        self.history.load(&self.store);

        if !self.state.is_open() {
            self.state = self.state.on(SearchEvent::Opened);
            if self.view.error.open {
                self.state = self.state.on(SearchEvent::CompileFailed);
            } else if self.last_search.is_some() {
                self.state = self.state.on(SearchEvent::Highlighted {
                    count: self.index.len(),
                });
            }
        }
        log::debug!("Search panel shown ({:?})", self.state);
    }

    /// Hide the panel and persist the history.
    pub fn hide(&mut self) {
        self.view.visible = false;
        self.blur();
        self.history.persist(&mut self.store);
        self.state = self.state.on(SearchEvent::Closed);
        log::debug!("Search panel hidden");
    }

    /// Close button / Escape: hide and remove all highlighting.
    pub fn close(&mut self) {
        self.hide();
        self.clear_highlighting();
    }

    // ── Searching ──────────────────────────────────────────────────────────

    /// Run the search for the current input and options.
    ///
    /// Returns true when the caller may navigate. An unchanged query and
    /// options is pure navigation: nothing is re-highlighted. An empty query
    /// always returns false and clears the result display.
    pub fn search(&mut self) -> bool {
        let query = Query::new(
            self.view.input.clone(),
            self.view.match_case,
            self.view.use_regex,
        );

        if self.last_search.as_ref() == Some(&query) {
            if query.text.is_empty() {
                self.show_empty_result();
                return false;
            }
            self.view.error.close();
            return true;
        }

        self.clear_highlighting();
        if query.text.is_empty() {
            self.show_empty_result();
            return false;
        }

        let matcher = match self.compiler.compile(&query) {
            Ok(matcher) => matcher,
            Err(e) => {
                self.view.error.set(e.message());
                self.view.result = ResultDisplay::Hidden;
                self.view.navigation_enabled = false;
                self.state = self.state.on(SearchEvent::CompileFailed);
                return false;
            }
        };
        self.view.error.close();
        self.history.push(query.text.clone());

        let pass = TreeHighlighter::new(&matcher).highlight(self.content.children());
        self.content.replace(pass.nodes);
        self.highlight_passes += 1;
        self.viewport.content_changed(&self.content);
        self.index.rebuild(&self.content);

        let count = self.index.len();
        self.view.result = if count == 0 {
            ResultDisplay::NoResults
        } else {
            ResultDisplay::Count {
                current: 1,
                total: count,
            }
        };
        self.view.navigation_enabled = count > 0;
        self.rebuild_landmarks();

        log::debug!("Search for {:?} found {} matches", query.text, count);
        self.last_search = Some(query);
        self.state = self.state.on(SearchEvent::Highlighted { count });
        true
    }

    /// Step to the next match. Returns the new 1-based position.
    pub fn advance_forward(&mut self) -> Option<usize> {
        let position = self
            .index
            .advance_forward(&mut self.content, &mut self.viewport)?;
        self.set_current_display(position);
        Some(position)
    }

    /// Step to the previous match. Returns the new 1-based position.
    pub fn advance_backward(&mut self) -> Option<usize> {
        let position = self
            .index
            .advance_backward(&mut self.content, &mut self.viewport)?;
        self.set_current_display(position);
        Some(position)
    }

    /// Enter / Shift+Enter: search, then step forward or backward.
    pub fn submit(&mut self, backward: bool) -> bool {
        if !self.search() {
            return false;
        }
        if backward {
            self.advance_backward();
        } else {
            self.advance_forward();
        }
        true
    }

    /// Next button.
    pub fn click_next(&mut self) -> bool {
        self.submit(false)
    }

    /// Previous button.
    pub fn click_prev(&mut self) -> bool {
        self.submit(true)
    }

    /// Unwrap every match back into plain text and forget the last query.
    pub fn clear_highlighting(&mut self) {
        let cleared = self.content.clear_matches();
        if cleared > 0 {
            self.viewport.content_changed(&self.content);
            log::debug!("Cleared {} highlighted matches", cleared);
        }
        self.index.reset();
        self.landmarks.clear();
        self.resize.cancel();
        self.last_search = None;
        if let ResultDisplay::Count { current, .. } = &mut self.view.result {
            *current = 1;
        }
    }

    // ── Events ─────────────────────────────────────────────────────────────

    /// Keydown while the input is focused.
    ///
    /// Returns true when the key was consumed.
    pub fn handle_input_key(&mut self, event: &KeyEvent) -> bool {
        match event.code {
            KeyCode::Enter => {
                self.submit(event.shift);
                true
            }
            KeyCode::ArrowUp => {
                let input_is_empty = self.view.input.is_empty();
                if let Some(entry) = self.history.recall_older(input_is_empty) {
                    self.view.input = entry.to_string();
                }
                true
            }
            KeyCode::ArrowDown => {
                let input_is_empty = self.view.input.is_empty();
                if let Some(entry) = self.history.recall_newer(input_is_empty) {
                    self.view.input = entry.to_string();
                }
                true
            }
            _ => false,
        }
    }

    /// Global shortcut: Ctrl+F opens, Escape closes.
    ///
    /// Returns true when the browser default should be suppressed.
    pub fn handle_shortcut(&mut self, event: &KeyEvent) -> bool {
        match event.code {
            KeyCode::KeyF if event.ctrl => {
                self.show();
                true
            }
            KeyCode::Escape => {
                self.close();
                true
            }
            _ => false,
        }
    }

    /// The container was resized; (re)schedule the landmark rebuild.
    pub fn handle_resize(&mut self) {
        self.handle_resize_at(Instant::now());
    }

    /// [`handle_resize`](Self::handle_resize) with an explicit clock.
    pub fn handle_resize_at(&mut self, now: Instant) {
        self.resize.schedule(now);
    }

    /// Run the pending landmark rebuild if its quiet period has elapsed.
    ///
    /// Returns true when landmarks were rebuilt.
    pub fn poll_resize(&mut self, now: Instant) -> bool {
        if !self.resize.poll(now) {
            return false;
        }
        self.rebuild_landmarks();
        true
    }

    /// Whether a landmark rebuild is waiting.
    pub fn resize_pending(&self) -> bool {
        self.resize.is_pending()
    }

    // ── Helpers ────────────────────────────────────────────────────────────

    fn show_empty_result(&mut self) {
        self.view.result = ResultDisplay::Hidden;
        self.view.navigation_enabled = false;
        self.state = self.state.on(SearchEvent::QueryCleared);
    }

    fn set_current_display(&mut self, position: usize) {
        self.view.result = ResultDisplay::Count {
            current: position,
            total: self.index.len(),
        };
    }

    fn rebuild_landmarks(&mut self) {
        self.landmarks = LandmarkProjector::project(&self.viewport, self.index.len());
        log::trace!("Rebuilt {} landmarks", self.landmarks.len());
    }
}
