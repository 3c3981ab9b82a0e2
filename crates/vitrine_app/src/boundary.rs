//! Section error boundaries
//!
//! Every lazily mounted section sits behind its own boundary, so one
//! failure never takes down a sibling. A caught failure first reaches
//! the optional error callback, then the chunk-failure reload policy,
//! and finally lands in a fallback state that offers `reload` and
//! `try_again` recovery actions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use regex::RegexSet;
use vitrine_choreo::{FrameState, Section};

use crate::error::VitrineError;
use crate::loader::{LoadStep, RetryingLoader, SectionLoader};

/// Message signatures of a failed lazy chunk fetch
const CHUNK_FAILURE_PATTERNS: [&str; 4] = [
    r"(?i)ChunkLoadError",
    r"(?i)Loading chunk \d+ failed",
    r"(?i)Failed to fetch dynamically imported module",
    r"(?i)Importing a module script failed",
];

fn chunk_signatures() -> &'static RegexSet {
    static SIGNATURES: OnceLock<RegexSet> = OnceLock::new();
    SIGNATURES.get_or_init(|| {
        RegexSet::new(CHUNK_FAILURE_PATTERNS).expect("chunk signature patterns compile")
    })
}

/// True when an error message carries a chunk-fetch failure signature
pub fn is_chunk_failure(message: &str) -> bool {
    chunk_signatures().is_match(message)
}

/// Session-scoped auto-reload policy
///
/// The first chunk failure anywhere requests one full reload. Every
/// boundary shares the same flags, so a failure that recurs after the
/// reload degrades to the fallback state instead of a reload loop. The
/// embedder drains [`ReloadPolicy::take_pending`] once per frame and
/// performs the actual reload.
#[derive(Clone, Debug, Default)]
pub struct ReloadPolicy {
    attempted: Arc<AtomicBool>,
    pending: Arc<AtomicBool>,
}

impl ReloadPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// A chunk failure was caught; true when this call armed the reload
    fn request_auto(&self) -> bool {
        if self.attempted.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.pending.store(true, Ordering::SeqCst);
        true
    }

    /// User-driven reload from the fallback state, never gated
    pub fn request(&self) {
        self.pending.store(true, Ordering::SeqCst);
    }

    /// Drain the pending reload request
    pub fn take_pending(&self) -> bool {
        self.pending.swap(false, Ordering::SeqCst)
    }

    /// Whether the one-shot auto reload has been spent this session
    pub fn has_attempted(&self) -> bool {
        self.attempted.load(Ordering::SeqCst)
    }
}

/// Callback observing every error a boundary catches
pub type ErrorCallback = Box<dyn FnMut(&VitrineError)>;

/// Fallback view held after a failure
///
/// The embedder renders this in place of the section and wires its two
/// actions to [`SectionBoundary::reload`] and
/// [`SectionBoundary::try_again`].
#[derive(Debug)]
pub struct Fallback<'a> {
    pub label: &'static str,
    pub error: &'a VitrineError,
}

/// One section's boundary and mount state
pub struct SectionBoundary {
    label: &'static str,
    loader: RetryingLoader,
    section: Option<Box<dyn Section>>,
    error: Option<VitrineError>,
    policy: ReloadPolicy,
    on_error: Option<ErrorCallback>,
}

impl SectionBoundary {
    pub fn new(label: &'static str, loader: SectionLoader, policy: ReloadPolicy) -> Self {
        Self {
            label,
            loader: RetryingLoader::new(loader),
            section: None,
            error: None,
            policy,
            on_error: None,
        }
    }

    /// Register a callback observing every caught error
    pub fn on_error(mut self, callback: ErrorCallback) -> Self {
        self.on_error = Some(callback);
        self
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Drive mounting by one frame
    pub fn poll(&mut self, dt: f32) {
        if self.section.is_some() || self.error.is_some() {
            return;
        }
        match self.loader.advance(dt) {
            LoadStep::Idle => {}
            LoadStep::Mounted(section) => {
                tracing::debug!(section = self.label, "section mounted");
                self.section = Some(section);
            }
            LoadStep::Failed(err) => self.catch(err),
        }
    }

    /// Error callback first, then the reload policy, then fallback state
    fn catch(&mut self, err: VitrineError) {
        tracing::warn!(section = self.label, error = %err, "section failed to mount");
        if let Some(callback) = self.on_error.as_mut() {
            callback(&err);
        }
        if is_chunk_failure(&err.to_string()) && self.policy.request_auto() {
            tracing::warn!(section = self.label, "requesting one-shot reload for chunk failure");
        }
        self.error = Some(err);
    }

    pub fn is_mounted(&self) -> bool {
        self.section.is_some()
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    /// The mounted section, if loading succeeded
    pub fn section(&self) -> Option<&dyn Section> {
        self.section.as_deref()
    }

    /// Fallback view while the boundary holds a failure
    pub fn fallback(&self) -> Option<Fallback<'_>> {
        self.error.as_ref().map(|error| Fallback {
            label: self.label,
            error,
        })
    }

    /// Fallback action: clear the failure and let the loader run again
    pub fn try_again(&mut self) {
        if self.error.take().is_some() {
            tracing::debug!(section = self.label, "boundary reset");
            self.loader.reset();
        }
    }

    /// Fallback action: request a full reload
    pub fn reload(&self) {
        self.policy.request();
    }

    /// Forward the frame to the mounted section, if any
    pub fn sync(&mut self, frame: &FrameState) {
        if let Some(section) = self.section.as_mut() {
            section.sync(frame);
        }
    }

    /// Recompute layout-derived state after a resize
    pub fn refresh(&mut self) {
        if let Some(section) = self.section.as_mut() {
            section.refresh();
        }
    }
}
