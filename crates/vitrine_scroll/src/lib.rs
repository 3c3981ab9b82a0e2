//! Vitrine Scroll System
//!
//! Momentum scrolling and scroll-position triggers for a document-length
//! page.
//!
//! # Features
//!
//! - **Momentum engine**: wheel deltas move directly, then friction
//!   bleeds the remaining velocity off; edges clamp hard
//! - **Programmatic glides**: eased `scroll_to` that any wheel input
//!   cancels
//! - **Scroll triggers**: element-against-viewport ranges with
//!   directional enter/leave callbacks and scrubbed progress
//! - **Smooth-scroll controller**: wires the engine into the animation
//!   scheduler's frame loop and owns the document trigger registry
//!
//! Triggers fire from [`SmoothScrollController::dispatch`], which runs
//! after the scheduler tick each frame; callbacks can start timelines
//! and retarget springs freely.

pub mod controller;
pub mod engine;
pub mod trigger;

pub use controller::{SmoothScrollController, REFRESH_DELAY_S, SCROLL_TO_DURATION_S};
pub use engine::{scroll_events, ScrollConfig, ScrollEngine, ScrollState};
pub use trigger::{
    ProgressCallback, ScrollTrigger, SharedTriggerRegistry, TargetBounds, TriggerBuilder,
    TriggerCallback, TriggerHandle, TriggerId, TriggerPoint, TriggerRegistry,
};
