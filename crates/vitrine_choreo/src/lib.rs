//! Vitrine Choreography Layer
//!
//! Everything that decides what the page looks like at a given scroll
//! offset: the visual stage, reusable animation primitives, one
//! choreographer per section, the decorative backdrop, and the scroll
//! progress nav.
//!
//! # Structure
//!
//! - [`stage`]: a slotmap of [`stage::VisualNode`]s; sections and
//!   decorative layers write opacity, transform, and color onto it each
//!   frame, and a renderer reads it back
//! - [`primitives`]: the four building blocks (scroll reveal, staggered
//!   reveal, entrance timeline, magnetic follow) plus the shared
//!   [`primitives::ChoreoContext`]
//! - [`sections`]: hero, experience, beliefs, creative, and contact
//!   choreographers behind the [`sections::Section`] trait
//! - [`backdrop`]: floating shapes, the particle field, and the custom
//!   cursor, seeded for reproducibility
//! - [`nav`]: the section rail with its scrubbed progress fill
//!
//! Reduced motion is decided once at construction: under
//! [`vitrine_core::MotionPreference::Reduced`] nothing registers with
//! the scheduler or the trigger registry, and content sits at its
//! settled, visible pose.

pub mod backdrop;
pub mod nav;
pub mod primitives;
pub mod sections;
pub mod stage;

pub use backdrop::{Backdrop, BackdropConfig, ChoreoRng, ParticleField, ShapeLayer};
pub use nav::{NavNodes, ScrollProgressNav, NAV_REVEAL_OFFSET};
pub use primitives::{
    durations, scroll_target, staggers, ChoreoContext, EntranceConfig, LightBgFlag,
    MagneticHandle, RevealConfig, RevealHandle, StaggerRevealConfig, REVEAL_VIEWPORT,
    SCROLL_TO_OFFSET,
};
pub use sections::{
    BeliefsSection, ContactSection, CreativeSection, ExperienceSection, FrameState, HeroSection,
    Section,
};
pub use stage::{NodeId, SharedStage, Stage, VisualNode};
