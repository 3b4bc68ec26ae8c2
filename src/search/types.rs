//! Types for in-page search functionality.

/// A search request: the query text plus both options.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Query {
    /// Raw query text as typed
    pub text: String,
    /// Whether matching is case-sensitive (disables kana folding)
    pub match_case: bool,
    /// Whether the text is a regular expression
    pub use_regex: bool,
}

impl Query {
    /// Create a new query.
    pub fn new(text: impl Into<String>, match_case: bool, use_regex: bool) -> Self {
        Self {
            text: text.into(),
            match_case,
            use_regex,
        }
    }
}

/// Lifecycle state of the search panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchState {
    /// Panel hidden.
    #[default]
    Closed,
    /// Panel open, nothing searched (or the query was emptied).
    OpenEmpty,
    /// Panel open with at least one match.
    OpenResults,
    /// Panel open, last search found nothing.
    OpenNoResults,
    /// Panel open, last query failed to compile.
    OpenError,
}

/// Inputs to the panel state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchEvent {
    /// The panel was shown.
    Opened,
    /// The panel was hidden.
    Closed,
    /// A search ran with an empty query.
    QueryCleared,
    /// The query failed to compile.
    CompileFailed,
    /// A highlight pass completed.
    Highlighted {
        /// Number of matches found
        count: usize,
    },
}

impl SearchState {
    /// Transition table.
    ///
    /// Search outcomes only move an open panel; a closed panel stays closed
    /// until it is opened again.
    pub fn on(self, event: SearchEvent) -> SearchState {
        use SearchEvent as E;
        use SearchState as S;
        match (self, event) {
            (_, E::Closed) => S::Closed,
            (S::Closed, E::Opened) => S::OpenEmpty,
            (open, E::Opened) => open,
            (S::Closed, _) => S::Closed,
            (_, E::QueryCleared) => S::OpenEmpty,
            (_, E::CompileFailed) => S::OpenError,
            (_, E::Highlighted { count: 0 }) => S::OpenNoResults,
            (_, E::Highlighted { .. }) => S::OpenResults,
        }
    }

    /// Whether the panel is visible.
    pub fn is_open(self) -> bool {
        self != SearchState::Closed
    }
}

/// What the result counter shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResultDisplay {
    /// Nothing shown.
    #[default]
    Hidden,
    /// "No results".
    NoResults,
    /// "current of total".
    Count {
        /// 1-based position of the current match
        current: usize,
        /// Total number of matches
        total: usize,
    },
}

/// Compilation error message tied to input focus.
///
/// `open` means a message exists; `hidden` means it is temporarily
/// suppressed because the input lost focus.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorMessage {
    /// Message text
    pub text: String,
    /// Whether a message is active
    pub open: bool,
    /// Whether an active message is hidden (input blurred)
    pub hidden: bool,
}

impl ErrorMessage {
    /// Activate a message.
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.open = true;
    }

    /// Dismiss the active message.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Show an active message again when the input regains focus.
    pub fn on_focus(&mut self) {
        if self.open {
            self.hidden = false;
        }
    }

    /// Hide an active message while the input is blurred.
    pub fn on_blur(&mut self) {
        if self.open {
            self.hidden = true;
        }
    }

    /// Whether the message is currently on screen.
    pub fn is_visible(&self) -> bool {
        self.open && !self.hidden
    }
}

/// Everything the UI glue needs to render the panel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PanelView {
    /// Whether the panel is shown
    pub visible: bool,
    /// Whether the settings sub-panel is expanded
    pub settings_open: bool,
    /// Current input text
    pub input: String,
    /// Whether the input has focus
    pub input_focused: bool,
    /// Match-case toggle
    pub match_case: bool,
    /// Regex toggle
    pub use_regex: bool,
    /// Result counter
    pub result: ResultDisplay,
    /// Whether previous/next are enabled
    pub navigation_enabled: bool,
    /// Compilation error message
    pub error: ErrorMessage,
}

/// Keys the widget reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCode {
    Enter,
    ArrowUp,
    ArrowDown,
    Escape,
    KeyF,
    Other,
}

/// A raw keydown event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// Key pressed
    pub code: KeyCode,
    /// Whether Ctrl was held
    pub ctrl: bool,
    /// Whether Shift was held
    pub shift: bool,
}

impl KeyEvent {
    /// Key without modifiers.
    pub fn plain(code: KeyCode) -> Self {
        Self {
            code,
            ctrl: false,
            shift: false,
        }
    }

    /// Key with Shift held.
    pub fn shifted(code: KeyCode) -> Self {
        Self {
            shift: true,
            ..Self::plain(code)
        }
    }

    /// Key with Ctrl held.
    pub fn ctrl(code: KeyCode) -> Self {
        Self {
            ctrl: true,
            ..Self::plain(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions_from_closed() {
        let s = SearchState::Closed;
        assert_eq!(s.on(SearchEvent::Opened), SearchState::OpenEmpty);
        assert_eq!(s.on(SearchEvent::CompileFailed), SearchState::Closed);
        assert_eq!(
            s.on(SearchEvent::Highlighted { count: 2 }),
            SearchState::Closed
        );
    }

    #[test]
    fn test_transitions_while_open() {
        let s = SearchState::OpenEmpty;
        assert_eq!(
            s.on(SearchEvent::Highlighted { count: 3 }),
            SearchState::OpenResults
        );
        assert_eq!(
            s.on(SearchEvent::Highlighted { count: 0 }),
            SearchState::OpenNoResults
        );
        assert_eq!(s.on(SearchEvent::CompileFailed), SearchState::OpenError);
        assert_eq!(
            SearchState::OpenError.on(SearchEvent::QueryCleared),
            SearchState::OpenEmpty
        );
        assert_eq!(
            SearchState::OpenResults.on(SearchEvent::Opened),
            SearchState::OpenResults
        );
        assert_eq!(
            SearchState::OpenResults.on(SearchEvent::Closed),
            SearchState::Closed
        );
    }

    #[test]
    fn test_error_message_focus_cycle() {
        let mut error = ErrorMessage::default();
        error.on_blur();
        assert!(!error.hidden);

        error.set("bad pattern");
        assert!(error.is_visible());
        error.on_blur();
        assert!(!error.is_visible());
        error.on_focus();
        assert!(error.is_visible());
        error.close();
        assert!(!error.is_visible());
    }
}
