//! Momentum scroll engine for a document-length page
//!
//! Wheel deltas move the offset directly while input keeps arriving; the
//! frame after input stops, momentum takes over and friction bleeds the
//! velocity off. A document clamps hard at its edges rather than
//! rubber-banding, so running into an edge during deceleration kills the
//! remaining velocity and settles immediately.
//!
//! Programmatic scrolls ([`ScrollEngine::glide_to`]) ride an eased tween
//! instead of the physics, and any fresh wheel input cancels the glide
//! and hands control back to the user.
//!
//! # FSM-based state
//!
//! ```text
//!            SCROLL                SCROLL_END
//!   Idle ────────────▶ Scrolling ─────────────▶ Decelerating
//!     ▲                    ▲                        │  │
//!     │                    └──────── SCROLL ────────┘  │
//!     └────────────── SETTLED / HIT_EDGE ──────────────┘
//! ```

use vitrine_animation::{Easing, Interpolate};
use vitrine_core::{event_types, StateTransitions};

/// Events emitted by the scroll engine
pub mod scroll_events {
    /// Velocity fell under the settle threshold
    pub const SETTLED: u32 = 10000;
    /// Deceleration ran into a document edge
    pub const HIT_EDGE: u32 = 10001;
}

/// Scroll engine state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrollState {
    /// At rest; ticks are free
    #[default]
    Idle,
    /// Input arrived this frame (wheel or glide); offset is driven directly
    Scrolling,
    /// No more input; momentum decays under friction
    Decelerating,
}

impl ScrollState {
    /// Whether the engine needs ticking
    pub fn is_active(&self) -> bool {
        !matches!(self, ScrollState::Idle)
    }
}

impl StateTransitions for ScrollState {
    fn on_event(&self, event: u32) -> Option<Self> {
        use event_types::{SCROLL, SCROLL_END};
        use scroll_events::{HIT_EDGE, SETTLED};
        match (self, event) {
            (ScrollState::Idle, SCROLL) => Some(ScrollState::Scrolling),
            (ScrollState::Scrolling, SCROLL_END) => Some(ScrollState::Decelerating),
            (ScrollState::Scrolling, SETTLED) => Some(ScrollState::Idle),
            (ScrollState::Decelerating, SCROLL) => Some(ScrollState::Scrolling),
            (ScrollState::Decelerating, SETTLED) => Some(ScrollState::Idle),
            (ScrollState::Decelerating, HIT_EDGE) => Some(ScrollState::Idle),
            _ => None,
        }
    }
}

/// Configuration for scroll behavior
#[derive(Debug, Clone, Copy)]
pub struct ScrollConfig {
    /// Friction coefficient applied per frame during deceleration (0.0-1.0)
    pub friction: f32,
    /// Minimum velocity before settling (pixels/second)
    pub velocity_threshold: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            friction: 0.95,
            velocity_threshold: 0.5,
        }
    }
}

/// An in-flight programmatic scroll
#[derive(Debug, Clone, Copy)]
struct Glide {
    from: f32,
    to: f32,
    elapsed_s: f32,
    duration_s: f32,
    easing: Easing,
}

/// Momentum scroll physics for one vertical document
#[derive(Clone)]
pub struct ScrollEngine {
    offset: f32,
    velocity: f32,
    state: ScrollState,
    content_height: f32,
    viewport_height: f32,
    config: ScrollConfig,
    glide: Option<Glide>,
    input_this_frame: bool,
}

impl Default for ScrollEngine {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ScrollEngine {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            offset: 0.0,
            velocity: 0.0,
            state: ScrollState::Idle,
            content_height: 0.0,
            viewport_height: 0.0,
            config,
            glide: None,
            input_this_frame: false,
        }
    }

    /// Current scroll offset (0 = top of the document)
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Current velocity (pixels per second, positive = scrolling down)
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn config(&self) -> ScrollConfig {
        self.config
    }

    /// Largest reachable offset
    pub fn max_offset(&self) -> f32 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    /// Overall document progress (0.0 at top, 1.0 at bottom)
    pub fn progress(&self) -> f32 {
        let max = self.max_offset();
        if max <= 0.0 {
            return 0.0;
        }
        (self.offset / max).clamp(0.0, 1.0)
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    /// Update the viewport size; the offset re-clamps into the new bounds
    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = height.max(0.0);
        self.offset = self.offset.clamp(0.0, self.max_offset());
    }

    /// Update the document size; the offset re-clamps into the new bounds
    pub fn set_content_height(&mut self, height: f32) {
        self.content_height = height.max(0.0);
        self.offset = self.offset.clamp(0.0, self.max_offset());
    }

    /// Apply a wheel delta (positive = scroll down)
    ///
    /// Cancels any glide in progress; the user always wins.
    pub fn apply_wheel_delta(&mut self, delta: f32) {
        self.glide = None;
        self.transition(event_types::SCROLL);
        self.offset = (self.offset + delta).clamp(0.0, self.max_offset());
        // Track velocity from the delta, assuming a 60Hz input cadence
        self.velocity = delta * 60.0;
        self.input_this_frame = true;
    }

    /// Jump without animating; kills momentum and any glide
    pub fn set_offset(&mut self, offset: f32) {
        self.glide = None;
        self.offset = offset.clamp(0.0, self.max_offset());
        self.velocity = 0.0;
        self.transition(scroll_events::SETTLED);
    }

    /// Start an eased programmatic scroll to `target`
    pub fn glide_to(&mut self, target: f32, duration_s: f32, easing: Easing) {
        let target = target.clamp(0.0, self.max_offset());
        if duration_s <= 0.0 {
            self.set_offset(target);
            return;
        }
        self.transition(event_types::SCROLL);
        self.velocity = 0.0;
        self.glide = Some(Glide {
            from: self.offset,
            to: target,
            elapsed_s: 0.0,
            duration_s,
            easing,
        });
    }

    pub fn is_gliding(&self) -> bool {
        self.glide.is_some()
    }

    /// Advance one frame; returns true while still animating
    pub fn tick(&mut self, dt: f32) -> bool {
        if let Some(mut glide) = self.glide.take() {
            glide.elapsed_s += dt;
            let t = (glide.elapsed_s / glide.duration_s).clamp(0.0, 1.0);
            let prev = self.offset;
            self.offset = glide.from.lerp(&glide.to, glide.easing.apply(t));
            self.velocity = if dt > 0.0 { (self.offset - prev) / dt } else { 0.0 };
            if t >= 1.0 {
                self.velocity = 0.0;
                self.transition(scroll_events::SETTLED);
                return false;
            }
            self.glide = Some(glide);
            self.input_this_frame = false;
            return true;
        }

        match self.state {
            ScrollState::Idle => false,

            ScrollState::Scrolling => {
                // Wheel trains carry no end event; a frame without fresh
                // input hands off to momentum
                if self.input_this_frame {
                    self.input_this_frame = false;
                } else {
                    self.transition(event_types::SCROLL_END);
                }
                true
            }

            ScrollState::Decelerating => {
                self.velocity *= self.config.friction;
                self.offset += self.velocity * dt;

                let max = self.max_offset();
                if self.offset <= 0.0 || self.offset >= max {
                    self.offset = self.offset.clamp(0.0, max);
                    self.velocity = 0.0;
                    self.transition(scroll_events::HIT_EDGE);
                    return false;
                }

                if self.velocity.abs() < self.config.velocity_threshold {
                    self.velocity = 0.0;
                    self.transition(scroll_events::SETTLED);
                    return false;
                }

                true
            }
        }
    }

    /// Check if animation is active
    pub fn is_animating(&self) -> bool {
        self.state.is_active()
    }

    fn transition(&mut self, event: u32) {
        if let Some(next) = self.state.on_event(event) {
            tracing::trace!(from = ?self.state, to = ?next, event, "scroll state");
            self.state = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_for_page() -> ScrollEngine {
        let mut engine = ScrollEngine::default();
        engine.set_viewport_height(400.0);
        engine.set_content_height(1000.0);
        engine
    }

    #[test]
    fn test_wheel_moves_offset_directly() {
        let mut engine = engine_for_page();
        assert_eq!(engine.max_offset(), 600.0);

        engine.apply_wheel_delta(50.0);
        assert_eq!(engine.offset(), 50.0);
        assert_eq!(engine.state(), ScrollState::Scrolling);
    }

    #[test]
    fn test_clamps_at_top_edge() {
        let mut engine = engine_for_page();
        engine.apply_wheel_delta(-50.0);
        assert_eq!(engine.offset(), 0.0);
    }

    #[test]
    fn test_momentum_handoff_and_settle() {
        let mut engine = engine_for_page();
        engine.apply_wheel_delta(5.0);

        // First tick consumes the input flag, second hands off to momentum
        assert!(engine.tick(1.0 / 60.0));
        assert_eq!(engine.state(), ScrollState::Scrolling);
        assert!(engine.tick(1.0 / 60.0));
        assert_eq!(engine.state(), ScrollState::Decelerating);

        let handoff_offset = engine.offset();
        for _ in 0..600 {
            if !engine.tick(1.0 / 60.0) {
                break;
            }
        }
        assert_eq!(engine.state(), ScrollState::Idle);
        assert!(engine.offset() > handoff_offset);
        assert!(engine.offset() < engine.max_offset());
        assert_eq!(engine.velocity(), 0.0);
    }

    #[test]
    fn test_deceleration_into_edge_settles() {
        let mut engine = engine_for_page();
        // Big fling: enough momentum to carry past the bottom edge
        engine.apply_wheel_delta(80.0);

        for _ in 0..600 {
            if !engine.tick(1.0 / 60.0) {
                break;
            }
        }
        assert_eq!(engine.offset(), engine.max_offset());
        assert_eq!(engine.state(), ScrollState::Idle);
    }

    #[test]
    fn test_glide_eases_to_target() {
        let mut engine = engine_for_page();
        engine.glide_to(500.0, 0.8, Easing::CubicInOut);
        assert!(engine.is_gliding());

        // Halfway through a symmetric ease is exactly halfway there
        for _ in 0..25 {
            engine.tick(0.016);
        }
        assert!((engine.offset() - 250.0).abs() < 10.0);

        for _ in 0..40 {
            engine.tick(0.016);
        }
        assert_eq!(engine.offset(), 500.0);
        assert!(!engine.is_gliding());
        assert_eq!(engine.state(), ScrollState::Idle);
    }

    #[test]
    fn test_wheel_cancels_glide() {
        let mut engine = engine_for_page();
        engine.glide_to(500.0, 0.8, Easing::CubicInOut);
        engine.tick(0.016);

        let before = engine.offset();
        engine.apply_wheel_delta(10.0);
        assert!(!engine.is_gliding());
        assert_eq!(engine.offset(), before + 10.0);
    }

    #[test]
    fn test_set_offset_jumps_and_idles() {
        let mut engine = engine_for_page();
        engine.apply_wheel_delta(30.0);
        engine.set_offset(400.0);

        assert_eq!(engine.offset(), 400.0);
        assert_eq!(engine.velocity(), 0.0);
        assert_eq!(engine.state(), ScrollState::Idle);
        assert!(!engine.tick(0.016));
    }

    #[test]
    fn test_resize_reclamps_offset() {
        let mut engine = engine_for_page();
        engine.set_offset(600.0);

        // Content shrinks under the current offset
        engine.set_content_height(700.0);
        assert_eq!(engine.offset(), 300.0);
    }

    #[test]
    fn test_progress() {
        let mut engine = engine_for_page();
        assert_eq!(engine.progress(), 0.0);
        engine.set_offset(300.0);
        assert_eq!(engine.progress(), 0.5);
        engine.set_offset(600.0);
        assert_eq!(engine.progress(), 1.0);

        // A page shorter than the viewport has no progress to report
        let mut short = ScrollEngine::default();
        short.set_viewport_height(400.0);
        short.set_content_height(200.0);
        assert_eq!(short.progress(), 0.0);
    }
}
