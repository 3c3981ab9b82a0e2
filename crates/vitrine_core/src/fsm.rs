//! Event-driven state machines for choreography
//!
//! Section choreography follows one of two small state machines: a
//! one-shot reveal (irreversible once played) and a scroll-scrubbed range
//! (re-entrant in both directions). Both are expressed through the
//! [`StateTransitions`] trait so transitions stay declarative and
//! exhaustively testable.

use std::hash::Hash;

/// Common event type constants
///
/// Events are plain `u32`s; ranges above 10000 are reserved for
/// subsystem-internal events (see `reveal_events`, `scrub_events`, and the
/// scroll engine's event module).
pub mod event_types {
    pub const POINTER_ENTER: u32 = 1;
    pub const POINTER_LEAVE: u32 = 2;
    pub const POINTER_DOWN: u32 = 3;
    pub const POINTER_UP: u32 = 4;
    pub const POINTER_MOVE: u32 = 5;
    pub const SCROLL: u32 = 6;
    pub const SCROLL_END: u32 = 7;
    pub const RESIZE: u32 = 8;
}

/// Trait for state types that can handle event transitions
///
/// Implement this trait on a state enum to define how events cause
/// state transitions.
///
/// # Example
///
/// ```rust
/// use vitrine_core::StateTransitions;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// enum PanelState {
///     #[default]
///     Hidden,
///     Shown,
/// }
///
/// impl StateTransitions for PanelState {
///     fn on_event(&self, event: u32) -> Option<Self> {
///         use vitrine_core::event_types::*;
///         match (self, event) {
///             (PanelState::Hidden, POINTER_ENTER) => Some(PanelState::Shown),
///             (PanelState::Shown, POINTER_LEAVE) => Some(PanelState::Hidden),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: u32) -> Option<Self>;
}

/// A no-op state type for choreography that needs no state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NoState;

impl StateTransitions for NoState {
    fn on_event(&self, _event: u32) -> Option<Self> {
        None // Never transitions
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Reveal state machine (one-shot)
// ─────────────────────────────────────────────────────────────────────────────

/// Events for the one-shot reveal state machine
pub mod reveal_events {
    /// Element crossed its trigger threshold while scrolling down
    pub const THRESHOLD_DOWN: u32 = 10100;
    /// Entrance animation ran to completion
    pub const PLAYED_OUT: u32 = 10101;
    /// Element scrolled back above its threshold (deliberately ignored)
    pub const THRESHOLD_UP: u32 = 10102;
}

/// One-shot entrance reveal
///
/// ```text
///                THRESHOLD_DOWN           PLAYED_OUT
///   Unrevealed ────────────────▶ Revealing ─────────▶ Revealed
///                                                     (terminal)
/// ```
///
/// Scrolling back up never re-hides already-seen content: `THRESHOLD_UP`
/// transitions nowhere from any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RevealState {
    /// Pre-set to offset + transparent, waiting for the trigger
    #[default]
    Unrevealed,
    /// Entrance animation in flight
    Revealing,
    /// Terminal: fully visible at rest position
    Revealed,
}

impl RevealState {
    /// Returns true once the element has begun or finished revealing
    pub fn is_triggered(&self) -> bool {
        !matches!(self, RevealState::Unrevealed)
    }
}

impl StateTransitions for RevealState {
    fn on_event(&self, event: u32) -> Option<Self> {
        use reveal_events::*;
        match (self, event) {
            (RevealState::Unrevealed, THRESHOLD_DOWN) => Some(RevealState::Revealing),
            (RevealState::Revealing, PLAYED_OUT) => Some(RevealState::Revealed),
            // Re-entering the trigger zone from either side changes nothing
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Scrub state machine (re-entrant)
// ─────────────────────────────────────────────────────────────────────────────

/// Events for the scroll-scrubbed state machine
pub mod scrub_events {
    /// Crossed the range start scrolling down
    pub const ENTER_FORWARD: u32 = 10110;
    /// Crossed the range end scrolling down
    pub const LEAVE_FORWARD: u32 = 10111;
    /// Crossed the range end scrolling back up
    pub const ENTER_BACKWARD: u32 = 10112;
    /// Crossed the range start scrolling back up
    pub const LEAVE_BACKWARD: u32 = 10113;
}

/// Scroll-scrubbed range
///
/// ```text
///                 ENTER_FORWARD            LEAVE_FORWARD
///   BeforeRange ───────────────▶ InRange ───────────────▶ AfterRange
///               ◀───────────────         ◀───────────────
///                LEAVE_BACKWARD            ENTER_BACKWARD
/// ```
///
/// Inside `InRange` the animated property is a pure function of the
/// scroll fraction; the machine is re-entrant in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrubState {
    /// Scroll offset is above the range start
    #[default]
    BeforeRange,
    /// Scroll offset is inside the range; property follows the fraction
    InRange,
    /// Scroll offset is past the range end
    AfterRange,
}

impl StateTransitions for ScrubState {
    fn on_event(&self, event: u32) -> Option<Self> {
        use scrub_events::*;
        match (self, event) {
            (ScrubState::BeforeRange, ENTER_FORWARD) => Some(ScrubState::InRange),
            (ScrubState::InRange, LEAVE_FORWARD) => Some(ScrubState::AfterRange),
            (ScrubState::AfterRange, ENTER_BACKWARD) => Some(ScrubState::InRange),
            (ScrubState::InRange, LEAVE_BACKWARD) => Some(ScrubState::BeforeRange),
            // Fast scrolls can jump the whole range in one frame
            (ScrubState::BeforeRange, LEAVE_FORWARD) => Some(ScrubState::AfterRange),
            (ScrubState::AfterRange, LEAVE_BACKWARD) => Some(ScrubState::BeforeRange),
            _ => None,
        }
    }
}
