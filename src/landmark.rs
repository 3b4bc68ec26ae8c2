//! Landmarks: where each match sits along the scrollbar-like track.
//!
//! Landmarks are ephemeral. They are rebuilt from scratch after every
//! highlight pass and after a debounced resize.

use crate::viewport::Viewport;
use std::time::{Duration, Instant};

/// Marker position on the landmark track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    /// Offset from the top of the track in pixels
    pub top: f32,
}

/// Projects match positions onto the landmark track.
pub struct LandmarkProjector;

impl LandmarkProjector {
    /// Compute one landmark per match, in document order.
    pub fn project(viewport: &impl Viewport, match_count: usize) -> Vec<Landmark> {
        (0..match_count)
            .filter_map(|index| {
                let rect = viewport.match_rect(index)?;
                Some(Landmark {
                    top: Self::position(
                        viewport.scroll_top(),
                        rect.top,
                        rect.height(),
                        viewport.scroll_height(),
                        viewport.track_height(),
                    ),
                })
            })
            .collect()
    }

    /// Track position for an element centred at
    /// `scroll_top + element_top + element_height / 2`.
    ///
    /// When the track is taller than the content, the raw offset is used.
    pub fn position(
        scroll_top: f32,
        element_top: f32,
        element_height: f32,
        scroll_height: f32,
        track_height: f32,
    ) -> f32 {
        let center = scroll_top + element_top + element_height / 2.0;
        if track_height > scroll_height || scroll_height <= 0.0 {
            return center;
        }
        center / scroll_height * track_height
    }
}

/// Single-shot, cancellable rebuild timer.
///
/// Each [`schedule`](Self::schedule) supersedes any pending rebuild, so only
/// the quiet period after the last resize counts.
#[derive(Debug, Clone)]
pub struct ResizeDebouncer {
    delay: Duration,
    pending: Option<Instant>,
}

impl ResizeDebouncer {
    /// Create a debouncer with the given quiet period.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedule a rebuild `delay` after `now`, replacing any pending one.
    pub fn schedule(&mut self, now: Instant) {
        if self.pending.replace(now + self.delay).is_some() {
            log::trace!("Superseded pending landmark rebuild");
        }
    }

    /// Fire the pending rebuild if its deadline has passed.
    ///
    /// Returns true exactly once per scheduled rebuild.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(due) if now >= due => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Drop the pending rebuild, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether a rebuild is waiting.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentNode, ContentRoot, ElementNode, MatchSpan};
    use crate::viewport::LineViewport;

    #[test]
    fn test_position_scales_to_track() {
        // Center at 500 of 1000 on a 200px track
        assert_eq!(LandmarkProjector::position(400.0, 90.0, 20.0, 1000.0, 200.0), 100.0);
    }

    #[test]
    fn test_position_unscaled_when_track_taller() {
        assert_eq!(LandmarkProjector::position(0.0, 40.0, 10.0, 100.0, 300.0), 45.0);
    }

    #[test]
    fn test_project_from_viewport() {
        let mut children: Vec<ContentNode> = (0..9)
            .map(|_| ElementNode::new("p", vec![ContentNode::text("x")]).into())
            .collect();
        children.push(
            ElementNode::new("p", vec![ContentNode::Match(MatchSpan::new("hit"))]).into(),
        );
        let root = ContentRoot::new(children);
        let mut viewport = LineViewport::new(10.0, 50.0, 50.0);
        viewport.content_changed(&root);

        let landmarks = LandmarkProjector::project(&viewport, root.match_count());
        // Center of line 9 is 95px of 100px, scaled to a 50px track
        assert_eq!(landmarks, vec![Landmark { top: 47.5 }]);

        // Projection does not depend on the scroll position
        viewport.scroll_to(50.0);
        assert_eq!(
            LandmarkProjector::project(&viewport, root.match_count()),
            landmarks
        );
    }

    #[test]
    fn test_debouncer_fires_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = ResizeDebouncer::new(Duration::from_millis(200));
        assert!(!debouncer.poll(start));

        debouncer.schedule(start);
        assert!(!debouncer.poll(start + Duration::from_millis(199)));
        assert!(debouncer.poll(start + Duration::from_millis(200)));
        assert!(!debouncer.poll(start + Duration::from_millis(400)));
    }

    #[test]
    fn test_debouncer_reschedule_supersedes() {
        let start = Instant::now();
        let mut debouncer = ResizeDebouncer::new(Duration::from_millis(200));

        debouncer.schedule(start);
        debouncer.schedule(start + Duration::from_millis(150));
        assert!(!debouncer.poll(start + Duration::from_millis(250)));
        assert!(!debouncer.poll(start + Duration::from_millis(349)));
        assert!(debouncer.poll(start + Duration::from_millis(350)));
    }

    #[test]
    fn test_debouncer_cancel() {
        let start = Instant::now();
        let mut debouncer = ResizeDebouncer::new(Duration::from_millis(200));
        debouncer.schedule(start);
        debouncer.cancel();
        assert!(!debouncer.is_pending());
        assert!(!debouncer.poll(start + Duration::from_secs(1)));
    }
}
