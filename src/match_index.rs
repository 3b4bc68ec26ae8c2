//! Ordered index over the match wrappers of a highlighted tree.
//!
//! The "current" flag lives on the [`MatchSpan`]s themselves; the index
//! keeps the count and the cursor in document order, and moves the flag
//! when stepping.

use crate::content::{ContentRoot, MatchSpan};
use crate::viewport::Viewport;

/// Navigation state for one search session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchIndex {
    len: usize,
    /// Document-order index of the current match; `None` before the first step.
    cursor: Option<usize>,
}

impl MatchIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-derive the index from a freshly highlighted tree.
    pub fn rebuild(&mut self, root: &ContentRoot) {
        self.len = root.match_count();
        self.cursor = None;
    }

    /// Forget all matches.
    pub fn reset(&mut self) {
        self.len = 0;
        self.cursor = None;
    }

    /// Number of matches.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no matches.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 1-based position of the current match.
    pub fn position(&self) -> Option<usize> {
        self.cursor.map(|c| c + 1)
    }

    /// Step to the next match, wrapping to the first after the last.
    ///
    /// Returns the 1-based position, or `None` when there are no matches.
    pub fn advance_forward(
        &mut self,
        root: &mut ContentRoot,
        viewport: &mut impl Viewport,
    ) -> Option<usize> {
        let mut spans = root.match_spans_mut();
        if spans.is_empty() {
            return None;
        }
        let index = step(&mut spans);
        self.len = spans.len();
        self.land_on(index, viewport)
    }

    /// Step to the previous match, wrapping to the last before the first.
    ///
    /// Walks the reversed sequence with the same rule as
    /// [`advance_forward`](Self::advance_forward).
    pub fn advance_backward(
        &mut self,
        root: &mut ContentRoot,
        viewport: &mut impl Viewport,
    ) -> Option<usize> {
        let mut spans = root.match_spans_mut();
        if spans.is_empty() {
            return None;
        }
        spans.reverse();
        let reversed = step(&mut spans);
        self.len = spans.len();
        let index = self.len - 1 - reversed;
        self.land_on(index, viewport)
    }

    fn land_on(&mut self, index: usize, viewport: &mut impl Viewport) -> Option<usize> {
        self.cursor = Some(index);
        match viewport.match_rect(index) {
            Some(rect) => {
                let target = viewport.scroll_top() + rect.top;
                viewport.scroll_to(target);
            }
            None => log::trace!("No geometry for match {}", index),
        }
        log::debug!("Current match {} of {}", index + 1, self.len);
        Some(index + 1)
    }
}

/// Move the current flag one place along `spans` and return its new index.
///
/// With no current span, or the last one current, lands on index 0.
fn step(spans: &mut [&mut MatchSpan]) -> usize {
    let last = spans.len() - 1;
    let next = match spans.iter().position(|s| s.is_current()) {
        Some(i) if i < last => {
            spans[i].set_current(false);
            i + 1
        }
        _ => {
            spans[last].set_current(false);
            0
        }
    };
    spans[next].set_current(true);
    next
}
