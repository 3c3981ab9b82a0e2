//! Timed keyframe animations
//!
//! A [`KeyframeAnimation`] is a scalar driven through a sorted sequence of
//! keyframes over a fixed duration, with optional start delay, iteration
//! count, and alternate (ping-pong) looping. The decorative layer leans on
//! the looping modes heavily: drift loops alternate forever, spins repeat
//! forward, entrance pops play once.
//!
//! The scheduler owns the clock; animations only ever advance through
//! [`KeyframeAnimation::tick`] with an explicit delta, which keeps every
//! sequence deterministic under test.

use crate::easing::Easing;
use smallvec::SmallVec;

/// A single keyframe: a value at a normalized time position
#[derive(Clone, Copy, Debug)]
pub struct Keyframe {
    /// Time position (0.0 to 1.0)
    pub time: f32,
    /// Value at this keyframe
    pub value: f32,
    /// Easing applied while approaching this keyframe
    pub easing: Easing,
}

impl Keyframe {
    pub fn new(time: f32, value: f32) -> Self {
        Self {
            time,
            value,
            easing: Easing::Linear,
        }
    }

    pub fn with_easing(time: f32, value: f32, easing: Easing) -> Self {
        Self {
            time,
            value,
            easing,
        }
    }
}

/// Playback direction within an iteration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayDirection {
    #[default]
    Forward,
    Reverse,
}

/// A timed scalar animation through a sequence of keyframes
#[derive(Clone, Debug)]
pub struct KeyframeAnimation {
    duration_ms: f32,
    keyframes: SmallVec<[Keyframe; 4]>,
    elapsed_ms: f32,
    playing: bool,
    delay_ms: f32,
    delay_remaining_ms: f32,
    /// Number of iterations; -1 means infinite
    iterations: i32,
    completed_iterations: i32,
    /// Reverse direction each iteration (ping-pong)
    alternate: bool,
    direction: PlayDirection,
}

impl KeyframeAnimation {
    /// Create an animation over `duration_ms` through the given keyframes
    ///
    /// Keyframes are sorted by time position on construction.
    pub fn new(duration_ms: u32, keyframes: Vec<Keyframe>) -> Self {
        let mut frames: SmallVec<[Keyframe; 4]> = keyframes.into_iter().collect();
        frames.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self {
            duration_ms: duration_ms as f32,
            keyframes: frames,
            elapsed_ms: 0.0,
            playing: false,
            delay_ms: 0.0,
            delay_remaining_ms: 0.0,
            iterations: 1,
            completed_iterations: 0,
            alternate: false,
            direction: PlayDirection::Forward,
        }
    }

    /// Delay before the first iteration begins
    pub fn set_delay(&mut self, delay_ms: f32) {
        self.delay_ms = delay_ms.max(0.0);
    }

    /// Number of iterations to play; -1 loops forever
    pub fn set_iterations(&mut self, iterations: i32) {
        self.iterations = iterations;
    }

    /// Reverse direction each iteration instead of snapping to the start
    pub fn set_alternate(&mut self, alternate: bool) {
        self.alternate = alternate;
    }

    /// Start (or restart) from the beginning, including the delay
    pub fn start(&mut self) {
        self.elapsed_ms = 0.0;
        self.delay_remaining_ms = self.delay_ms;
        self.completed_iterations = 0;
        self.direction = PlayDirection::Forward;
        self.playing = true;
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// True while delayed, playing, or looping
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Fraction of the current iteration elapsed (0.0 to 1.0), ignoring direction
    pub fn progress(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Advance by `dt_ms`, handling delay and iteration boundaries
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.playing {
            return;
        }

        let mut dt = dt_ms;
        if self.delay_remaining_ms > 0.0 {
            if dt < self.delay_remaining_ms {
                self.delay_remaining_ms -= dt;
                return;
            }
            dt -= self.delay_remaining_ms;
            self.delay_remaining_ms = 0.0;
        }

        if self.duration_ms <= 0.0 {
            self.playing = false;
            return;
        }

        self.elapsed_ms += dt;
        while self.elapsed_ms >= self.duration_ms {
            self.completed_iterations += 1;
            let done = self.iterations >= 0 && self.completed_iterations >= self.iterations;
            if done {
                // Hold the final frame
                self.elapsed_ms = self.duration_ms;
                self.playing = false;
                return;
            }
            self.elapsed_ms -= self.duration_ms;
            if self.alternate {
                self.direction = match self.direction {
                    PlayDirection::Forward => PlayDirection::Reverse,
                    PlayDirection::Reverse => PlayDirection::Forward,
                };
            }
        }
    }

    /// Current value
    ///
    /// During the start delay this reports the first keyframe's value
    /// (animations fill backwards so content sits at its initial pose).
    pub fn value(&self) -> f32 {
        if self.keyframes.is_empty() {
            return 0.0;
        }
        if self.delay_remaining_ms > 0.0 {
            return self.keyframes[0].value;
        }
        let fraction = self.progress();
        let t = match self.direction {
            PlayDirection::Forward => fraction,
            PlayDirection::Reverse => 1.0 - fraction,
        };
        self.sample(t)
    }

    /// Evaluate the keyframe sequence at normalized time `t`
    fn sample(&self, t: f32) -> f32 {
        let frames = &self.keyframes;
        let first = frames[0];
        let last = frames[frames.len() - 1];
        if t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }
        // Find the segment surrounding t; easing comes from the
        // destination keyframe
        for pair in frames.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t >= a.time && t <= b.time {
                let span = b.time - a.time;
                if span <= f32::EPSILON {
                    return b.value;
                }
                let local = (t - a.time) / span;
                let eased = b.easing.apply(local);
                return a.value + (b.value - a.value) * eased;
            }
        }
        last.value
    }
}
