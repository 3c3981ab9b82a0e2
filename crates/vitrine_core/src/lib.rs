//! Vitrine Core Types
//!
//! This crate provides the foundational primitives for the Vitrine
//! choreography engine:
//!
//! - **Geometry**: Points, sizes, rects, and vectors in document space
//! - **Color**: RGBA colors with hex construction and interpolation
//! - **Motion Preference**: The reduced-motion capability, read once at
//!   startup and injected into every choreography constructor
//! - **State Machines**: Event-driven state transitions for reveal and
//!   scrub choreography
//!
//! # Example
//!
//! ```rust
//! use vitrine_core::{MotionPreference, Rect, RevealState, StateTransitions};
//! use vitrine_core::fsm::reveal_events;
//!
//! let motion = MotionPreference::Full;
//! assert!(motion.allows_motion());
//!
//! let state = RevealState::Unrevealed;
//! let state = state.on_event(reveal_events::THRESHOLD_DOWN).unwrap();
//! assert_eq!(state, RevealState::Revealing);
//! ```

pub mod color;
pub mod fsm;
pub mod geometry;
pub mod motion;

pub use color::Color;
pub use fsm::{
    event_types, reveal_events, scrub_events, NoState, RevealState, ScrubState, StateTransitions,
};
pub use geometry::{Point, Rect, Size, Vec2};
pub use motion::MotionPreference;
