//! Vitrine Application Shell
//!
//! The layer that turns the choreography crates into a running page:
//! content records, document layout, one resilience boundary per
//! section, configuration, and the frame loop.
//!
//! # Structure
//!
//! - [`app`]: [`app::VitrineApp`] owns the scheduler, the scroll
//!   controller, the stage, the section boundaries, the nav, and the
//!   backdrop; the embedder feeds it input and calls
//!   [`app::VitrineApp::advance`] once per frame
//! - [`boundary`]: per-section error isolation with chunk-failure
//!   detection and a once-per-session automatic reload policy
//! - [`loader`]: the retrying section loader behind each boundary
//! - [`config`]: `vitrine.toml` with viewport, seed, and motion override
//! - [`content`]: the records the page renders, plus shipped samples
//! - [`script`]: replayable input scripts for the headless demo driver
//!
//! A section that fails to load renders a fallback in its own slot;
//! every other section keeps animating. Nothing in this crate talks to
//! a renderer: the output is stage state, read back per frame.

pub mod app;
pub mod boundary;
pub mod config;
pub mod content;
pub mod error;
pub mod loader;
pub mod script;

pub use app::{PageContent, StageLayout, VitrineApp, CONTACT_TITLE, SECTION_LABELS};
pub use boundary::{is_chunk_failure, ErrorCallback, Fallback, ReloadPolicy, SectionBoundary};
pub use config::{ViewportConfig, VitrineConfig, CONFIG_FILE};
pub use content::{
    sample_beliefs, sample_experiences, sample_installations, BeliefRecord, ExperienceRecord,
    InstallationRecord,
};
pub use error::{Result, VitrineError};
pub use loader::{LoadStep, RetryingLoader, SectionLoader, RETRY_BUDGET, RETRY_DELAY_S};
pub use script::{ScriptEvent, ScrollScript};
