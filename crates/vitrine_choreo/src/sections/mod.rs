//! Section choreographers
//!
//! One module per page section. A section owns its stage nodes' motion:
//! it registers triggers and timelines at construction and writes the
//! current values back onto the stage once per frame through
//! [`Section::sync`]. The app calls `sync` after the scroll controller
//! has dispatched, so trigger callbacks have already fired and every
//! timeline holds this frame's values.

pub mod beliefs;
pub mod contact;
pub mod creative;
pub mod experience;
pub mod hero;

pub use beliefs::{BeliefsNodes, BeliefsSection};
pub use contact::{ContactNodes, ContactSection};
pub use creative::{CreativeNodes, CreativePanel, CreativeSection};
pub use experience::{ExperienceNodes, ExperiencePanel, ExperienceSection};
pub use hero::{HeroNodes, HeroSection};

use vitrine_core::{Point, Size};

/// Per-frame inputs shared by every section
#[derive(Clone, Copy, Debug)]
pub struct FrameState {
    /// Scroll offset in document pixels
    pub offset: f32,
    /// Document progress, 0.0 at the top to 1.0 at max scroll
    pub progress: f32,
    /// Viewport size in pixels
    pub viewport: Size,
    /// Last known pointer position, if the device has one
    pub pointer: Option<Point>,
    /// Seconds since the previous frame
    pub dt: f32,
}

/// A choreographed page section
pub trait Section {
    /// Stable name for logs and the nav rail
    fn name(&self) -> &'static str;

    /// Write this frame's values onto the stage
    fn sync(&mut self, frame: &FrameState);

    /// Recompute layout-derived ranges after a resize or reflow
    fn refresh(&mut self) {}
}

/// Progress of a scroll offset through a document-space span
///
/// Clamped to 0..1; degenerate spans snap to their boundary.
pub fn span_progress(offset: f32, start: f32, end: f32) -> f32 {
    if end <= start {
        return if offset >= end { 1.0 } else { 0.0 };
    }
    ((offset - start) / (end - start)).clamp(0.0, 1.0)
}

/// Progress of one item inside a scrubbed stagger
///
/// Maps a shared scrub progress onto per-item windows the way a timed
/// stagger spaces its starts: item `i`'s window opens at
/// `i * stagger / total` and spans `duration / total`, with
/// `total = duration + stagger * (count - 1)`. Clamped to 0..1 on both
/// ends so items hold their endpoints outside their window.
pub fn scrub_stagger(p: f32, index: usize, count: usize, duration: f32, stagger: f32) -> f32 {
    if count == 0 || index >= count || duration <= 0.0 {
        return 0.0;
    }
    let total = duration + stagger * (count - 1) as f32;
    let start = index as f32 * stagger / total;
    let span = duration / total;
    ((p - start) / span).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrub_stagger_spans_the_whole_range() {
        for index in 0..4 {
            assert_eq!(scrub_stagger(0.0, index, 4, 0.5, 0.1), 0.0);
            assert_eq!(scrub_stagger(1.0, index, 4, 0.5, 0.1), 1.0);
        }
        // The last item finishes exactly at p = 1.0
        assert!(scrub_stagger(0.99, 3, 4, 0.5, 0.1) < 1.0);
    }

    #[test]
    fn test_scrub_stagger_orders_items_by_index() {
        let p = 0.4;
        let values: Vec<f32> = (0..4)
            .map(|i| scrub_stagger(p, i, 4, 0.5, 0.15))
            .collect();
        for pair in values.windows(2) {
            assert!(pair[0] >= pair[1], "items lead by index: {values:?}");
        }
        assert!(values[0] > values[3]);
    }

    #[test]
    fn test_scrub_stagger_single_item_is_identity() {
        assert_eq!(scrub_stagger(0.25, 0, 1, 0.5, 0.1), 0.25);
        assert_eq!(scrub_stagger(0.75, 0, 1, 0.5, 0.1), 0.75);
    }

    #[test]
    fn test_scrub_stagger_degenerate_inputs() {
        assert_eq!(scrub_stagger(0.5, 0, 0, 0.5, 0.1), 0.0);
        assert_eq!(scrub_stagger(0.5, 5, 3, 0.5, 0.1), 0.0);
        assert_eq!(scrub_stagger(0.5, 0, 3, 0.0, 0.1), 0.0);
    }

    #[test]
    fn test_span_progress_clamps_and_handles_degenerate_spans() {
        assert_eq!(span_progress(50.0, 100.0, 300.0), 0.0);
        assert_eq!(span_progress(200.0, 100.0, 300.0), 0.5);
        assert_eq!(span_progress(400.0, 100.0, 300.0), 1.0);
        assert_eq!(span_progress(99.0, 100.0, 100.0), 0.0);
        assert_eq!(span_progress(100.0, 100.0, 100.0), 1.0);
    }
}
