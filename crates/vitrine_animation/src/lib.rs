//! Vitrine Animation System
//!
//! Spring physics, keyframe animations, and timeline orchestration.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Keyframe Animations**: Timed sequences with easing functions
//! - **Timelines**: Orchestrate multiple tweens with absolute and relative offsets
//! - **Staggers**: Fan one tween across many items with per-index delays
//! - **Interruptible**: Springs inherit position and velocity when retargeted
//! - **Deterministic**: Everything advances by explicit deltas, never a wall clock
//!
//! The scheduler is the only clock owner. A host drives it once per frame:
//!
//! ```
//! use vitrine_animation::{AnimationScheduler, SchedulerHandle, SpringConfig, AnimatedValue};
//!
//! let scheduler = AnimationScheduler::shared();
//! let handle = SchedulerHandle::new(&scheduler);
//!
//! let mut opacity = AnimatedValue::new(handle.clone(), 0.0, SpringConfig::gentle());
//! opacity.set_target(100.0);
//!
//! for _ in 0..120 {
//!     handle.tick(1.0 / 60.0);
//! }
//! assert!((opacity.get() - 100.0).abs() < 1.0);
//! ```

pub mod easing;
pub mod keyframe;
pub mod scheduler;
pub mod spring;
pub mod timeline;
pub mod values;

pub use easing::Easing;
pub use keyframe::{Keyframe, KeyframeAnimation, PlayDirection};
pub use scheduler::{
    AnimatedKeyframe, AnimatedTimeline, AnimatedValue, AnimationScheduler, ConfigureResult,
    KeyframeBuilder, KeyframeId, SchedulerHandle, SharedScheduler, SpringId, TickCallback,
    TickCallbackId, TimelineId, DEFAULT_LAG_SMOOTHING,
};
pub use spring::{Spring, SpringConfig, SETTLE_EPSILON, SETTLE_VELOCITY_EPSILON};
pub use timeline::{
    push_with_delays, StaggerBuilder, StaggerDirection, Timeline, TimelineEntryId,
    TimelinePosition,
};
pub use values::Interpolate;
