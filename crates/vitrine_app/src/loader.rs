//! Retrying section loader
//!
//! Sections mount through a fallible loader closure, the headless
//! equivalent of a lazy chunk import. A transient chunk-fetch failure
//! gets one delayed retry before the error surfaces to the owning
//! boundary; any other failure surfaces immediately. The retry delay is
//! polled on the frame tick, so loading never blocks and never spawns.

use vitrine_choreo::Section;

use crate::boundary::is_chunk_failure;
use crate::error::{Result, VitrineError};

/// Delay before a chunk-failure retry, in seconds
pub const RETRY_DELAY_S: f32 = 1.2;

/// Retries granted per loader; spent attempts survive a reset
pub const RETRY_BUDGET: u32 = 1;

/// Produces a section choreographer, possibly failing
pub type SectionLoader = Box<dyn FnMut() -> Result<Box<dyn Section>>>;

/// Outcome of driving a loader by one frame
pub enum LoadStep {
    /// Nothing to deliver, either waiting on a retry or already settled
    Idle,
    /// The loader produced its section
    Mounted(Box<dyn Section>),
    /// The loader failed for good
    Failed(VitrineError),
}

enum LoadState {
    /// Nothing attempted since construction or the last reset
    Fresh,
    /// Chunk failure seen; retry due when the countdown empties
    RetryWait { remaining: f32 },
    /// Outcome delivered; inert until reset
    Settled,
}

/// Frame-polled loader with a one-shot retry for chunk failures
pub struct RetryingLoader {
    load: SectionLoader,
    state: LoadState,
    attempts_used: u32,
}

impl RetryingLoader {
    pub fn new(load: SectionLoader) -> Self {
        Self {
            load,
            state: LoadState::Fresh,
            attempts_used: 0,
        }
    }

    /// Drive the loader by one frame
    pub fn advance(&mut self, dt: f32) -> LoadStep {
        match self.state {
            LoadState::Settled => LoadStep::Idle,
            LoadState::Fresh => self.attempt(),
            LoadState::RetryWait { remaining } => {
                let left = remaining - dt;
                if left > 0.0 {
                    self.state = LoadState::RetryWait { remaining: left };
                    LoadStep::Idle
                } else {
                    self.attempt()
                }
            }
        }
    }

    fn attempt(&mut self) -> LoadStep {
        match (self.load)() {
            Ok(section) => {
                self.state = LoadState::Settled;
                LoadStep::Mounted(section)
            }
            Err(err)
                if self.attempts_used < RETRY_BUDGET
                    && is_chunk_failure(&err.to_string()) =>
            {
                self.attempts_used += 1;
                tracing::debug!(error = %err, "chunk failure, retrying in {RETRY_DELAY_S}s");
                self.state = LoadState::RetryWait {
                    remaining: RETRY_DELAY_S,
                };
                LoadStep::Idle
            }
            Err(err) => {
                self.state = LoadState::Settled;
                LoadStep::Failed(err)
            }
        }
    }

    /// Allow another attempt without restoring the retry budget
    pub fn reset(&mut self) {
        self.state = LoadState::Fresh;
    }

    pub fn is_settled(&self) -> bool {
        matches!(self.state, LoadState::Settled)
    }
}
