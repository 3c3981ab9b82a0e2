//! Animation scheduler
//!
//! Central registry that advances every live spring, keyframe animation
//! and timeline by one explicit time step per frame. The host calls
//! [`AnimationScheduler::tick`] with the frame delta; nothing in this
//! crate reads a wall clock, so a sequence of ticks always produces the
//! same values.
//!
//! Tick callbacks run at the start of each tick in registration order.
//! Scroll controllers and other frame-driven systems register one to
//! update their targets before the integrators run.
//!
//! Ownership follows a handle pattern: the scheduler itself lives in an
//! `Arc<Mutex<..>>` owned by the app shell, while [`SchedulerHandle`]
//! holds a `Weak` reference. Wrapper types ([`AnimatedValue`],
//! [`AnimatedKeyframe`], [`AnimatedTimeline`]) unregister their backing
//! animation when dropped, so a settled-but-forgotten spring cannot
//! accumulate in the registry.

use std::sync::{Arc, Mutex, Weak};

use slotmap::{new_key_type, SlotMap};

use crate::easing::Easing;
use crate::keyframe::{Keyframe, KeyframeAnimation};
use crate::spring::{Spring, SpringConfig};
use crate::timeline::{Timeline, TimelineEntryId, TimelinePosition};

new_key_type! {
    /// Identifies a spring in the scheduler
    pub struct SpringId;
    /// Identifies a keyframe animation in the scheduler
    pub struct KeyframeId;
    /// Identifies a timeline in the scheduler
    pub struct TimelineId;
    /// Identifies a registered tick callback
    pub struct TickCallbackId;
}

/// Runs at the start of every tick, before integrators advance.
///
/// The callback receives the scheduler itself so it can set spring
/// targets, register animations, or remove itself.
pub type TickCallback = Box<dyn FnMut(&mut AnimationScheduler, f32) + Send>;

/// Shared scheduler, typically owned by the app shell
pub type SharedScheduler = Arc<Mutex<AnimationScheduler>>;

/// Default cap on a single frame delta, in seconds.
///
/// A debugger pause or background tab otherwise produces one giant step
/// that teleports every spring past its target.
pub const DEFAULT_LAG_SMOOTHING: f32 = 0.1;

pub struct AnimationScheduler {
    springs: SlotMap<SpringId, Spring>,
    keyframes: SlotMap<KeyframeId, KeyframeAnimation>,
    timelines: SlotMap<TimelineId, Timeline>,
    callbacks: SlotMap<TickCallbackId, Option<TickCallback>>,
    callback_order: Vec<TickCallbackId>,
    lag_smoothing: Option<f32>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            springs: SlotMap::with_key(),
            keyframes: SlotMap::with_key(),
            timelines: SlotMap::with_key(),
            callbacks: SlotMap::with_key(),
            callback_order: Vec::new(),
            lag_smoothing: Some(DEFAULT_LAG_SMOOTHING),
        }
    }

    /// Create a scheduler already wrapped for sharing
    pub fn shared() -> SharedScheduler {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Cap applied to each tick's delta; `None` passes deltas through raw
    pub fn set_lag_smoothing(&mut self, max_dt: Option<f32>) {
        tracing::debug!(?max_dt, "lag smoothing changed");
        self.lag_smoothing = max_dt;
    }

    pub fn lag_smoothing(&self) -> Option<f32> {
        self.lag_smoothing
    }

    /// Advance everything by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        let dt = match self.lag_smoothing {
            Some(max) => dt.min(max),
            None => dt,
        };
        if dt <= 0.0 {
            return;
        }
        let dt_ms = dt * 1000.0;

        // Callbacks run first so targets set this frame are integrated
        // this frame. Each callback is taken out of its slot for the
        // call, which lets it mutate the scheduler it runs inside,
        // including removing itself.
        let order = self.callback_order.clone();
        for id in order {
            if let Some(mut cb) = self.callbacks.get_mut(id).and_then(Option::take) {
                cb(self, dt);
                if let Some(slot) = self.callbacks.get_mut(id) {
                    *slot = Some(cb);
                }
            }
        }

        for (_, spring) in self.springs.iter_mut() {
            if !spring.is_settled() {
                spring.step(dt);
            }
        }
        for (_, keyframe) in self.keyframes.iter_mut() {
            keyframe.tick(dt_ms);
        }
        for (_, timeline) in self.timelines.iter_mut() {
            timeline.tick(dt_ms);
        }
        // Completed animations stay registered; their owning wrappers
        // remove them on drop.
    }

    /// Count of animations still moving
    pub fn active_count(&self) -> usize {
        self.springs.values().filter(|s| !s.is_settled()).count()
            + self.keyframes.values().filter(|k| k.is_playing()).count()
            + self.timelines.values().filter(|t| t.is_playing()).count()
    }

    pub fn has_active_animations(&self) -> bool {
        self.active_count() > 0
    }

    // ── springs ──────────────────────────────────────────────────────────

    pub fn register_spring(&mut self, spring: Spring) -> SpringId {
        let id = self.springs.insert(spring);
        tracing::trace!(?id, "spring registered");
        id
    }

    pub fn spring(&self, id: SpringId) -> Option<&Spring> {
        self.springs.get(id)
    }

    pub fn spring_mut(&mut self, id: SpringId) -> Option<&mut Spring> {
        self.springs.get_mut(id)
    }

    pub fn remove_spring(&mut self, id: SpringId) -> bool {
        self.springs.remove(id).is_some()
    }

    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }

    // ── keyframes ────────────────────────────────────────────────────────

    pub fn register_keyframe(&mut self, animation: KeyframeAnimation) -> KeyframeId {
        let id = self.keyframes.insert(animation);
        tracing::trace!(?id, "keyframe animation registered");
        id
    }

    pub fn keyframe(&self, id: KeyframeId) -> Option<&KeyframeAnimation> {
        self.keyframes.get(id)
    }

    pub fn keyframe_mut(&mut self, id: KeyframeId) -> Option<&mut KeyframeAnimation> {
        self.keyframes.get_mut(id)
    }

    pub fn remove_keyframe(&mut self, id: KeyframeId) -> bool {
        self.keyframes.remove(id).is_some()
    }

    pub fn keyframe_count(&self) -> usize {
        self.keyframes.len()
    }

    // ── timelines ────────────────────────────────────────────────────────

    pub fn register_timeline(&mut self, timeline: Timeline) -> TimelineId {
        let id = self.timelines.insert(timeline);
        tracing::trace!(?id, "timeline registered");
        id
    }

    pub fn timeline(&self, id: TimelineId) -> Option<&Timeline> {
        self.timelines.get(id)
    }

    pub fn timeline_mut(&mut self, id: TimelineId) -> Option<&mut Timeline> {
        self.timelines.get_mut(id)
    }

    pub fn remove_timeline(&mut self, id: TimelineId) -> bool {
        self.timelines.remove(id).is_some()
    }

    pub fn timeline_count(&self) -> usize {
        self.timelines.len()
    }

    // ── tick callbacks ───────────────────────────────────────────────────

    /// Register a per-frame callback; callbacks run in registration order
    pub fn register_tick_callback(&mut self, callback: TickCallback) -> TickCallbackId {
        let id = self.callbacks.insert(Some(callback));
        self.callback_order.push(id);
        tracing::trace!(?id, "tick callback registered");
        id
    }

    pub fn remove_tick_callback(&mut self, id: TickCallbackId) -> bool {
        let removed = self.callbacks.remove(id).is_some();
        if removed {
            self.callback_order.retain(|c| *c != id);
        }
        removed
    }

    pub fn tick_callback_count(&self) -> usize {
        self.callbacks.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// SchedulerHandle
// ─────────────────────────────────────────────────────────────────────────────

/// Cheap cloneable handle to a shared scheduler.
///
/// Holds a `Weak` reference, so handles embedded in long-lived widgets
/// never keep a torn-down scheduler alive. Every method degrades to a
/// no-op (or `None`) once the scheduler is gone.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<Mutex<AnimationScheduler>>,
}

impl SchedulerHandle {
    pub fn new(scheduler: &SharedScheduler) -> Self {
        Self {
            inner: Arc::downgrade(scheduler),
        }
    }

    /// A handle with no scheduler behind it; every call is a no-op
    pub fn detached() -> Self {
        Self { inner: Weak::new() }
    }

    /// Whether the backing scheduler still exists
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    fn with<F, R>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut AnimationScheduler) -> R,
    {
        let scheduler = self.inner.upgrade()?;
        let mut guard = scheduler.lock().unwrap();
        Some(f(&mut guard))
    }

    /// Advance the scheduler by `dt` seconds
    pub fn tick(&self, dt: f32) {
        self.with(|s| s.tick(dt));
    }

    pub fn active_count(&self) -> usize {
        self.with(|s| s.active_count()).unwrap_or(0)
    }

    pub fn set_lag_smoothing(&self, max_dt: Option<f32>) {
        self.with(|s| s.set_lag_smoothing(max_dt));
    }

    // ── springs ──────────────────────────────────────────────────────────

    pub fn register_spring(&self, spring: Spring) -> Option<SpringId> {
        self.with(|s| s.register_spring(spring))
    }

    pub fn set_spring_target(&self, id: SpringId, target: f32) {
        self.with(|s| {
            if let Some(spring) = s.spring_mut(id) {
                spring.set_target(target);
            }
        });
    }

    pub fn set_spring_velocity(&self, id: SpringId, velocity: f32) {
        self.with(|s| {
            if let Some(spring) = s.spring_mut(id) {
                spring.set_velocity(velocity);
            }
        });
    }

    pub fn set_spring_config(&self, id: SpringId, config: SpringConfig) {
        self.with(|s| {
            if let Some(spring) = s.spring_mut(id) {
                spring.set_config(config);
            }
        });
    }

    pub fn get_spring_value(&self, id: SpringId) -> Option<f32> {
        self.with(|s| s.spring(id).map(|spring| spring.value()))
            .flatten()
    }

    pub fn get_spring_velocity(&self, id: SpringId) -> Option<f32> {
        self.with(|s| s.spring(id).map(|spring| spring.velocity()))
            .flatten()
    }

    /// Settled also covers "spring no longer exists"
    pub fn is_spring_settled(&self, id: SpringId) -> bool {
        self.with(|s| s.spring(id).map(|spring| spring.is_settled()))
            .flatten()
            .unwrap_or(true)
    }

    pub fn remove_spring(&self, id: SpringId) -> bool {
        self.with(|s| s.remove_spring(id)).unwrap_or(false)
    }

    // ── keyframes ────────────────────────────────────────────────────────

    pub fn register_keyframe(&self, animation: KeyframeAnimation) -> Option<KeyframeId> {
        self.with(|s| s.register_keyframe(animation))
    }

    pub fn start_keyframe(&self, id: KeyframeId) {
        self.with(|s| {
            if let Some(keyframe) = s.keyframe_mut(id) {
                keyframe.start();
            }
        });
    }

    pub fn stop_keyframe(&self, id: KeyframeId) {
        self.with(|s| {
            if let Some(keyframe) = s.keyframe_mut(id) {
                keyframe.stop();
            }
        });
    }

    pub fn get_keyframe_value(&self, id: KeyframeId) -> Option<f32> {
        self.with(|s| s.keyframe(id).map(|keyframe| keyframe.value()))
            .flatten()
    }

    pub fn get_keyframe_progress(&self, id: KeyframeId) -> Option<f32> {
        self.with(|s| s.keyframe(id).map(|keyframe| keyframe.progress()))
            .flatten()
    }

    pub fn is_keyframe_playing(&self, id: KeyframeId) -> bool {
        self.with(|s| s.keyframe(id).map(|keyframe| keyframe.is_playing()))
            .flatten()
            .unwrap_or(false)
    }

    pub fn remove_keyframe(&self, id: KeyframeId) -> bool {
        self.with(|s| s.remove_keyframe(id)).unwrap_or(false)
    }

    // ── timelines ────────────────────────────────────────────────────────

    pub fn register_timeline(&self, timeline: Timeline) -> Option<TimelineId> {
        self.with(|s| s.register_timeline(timeline))
    }

    /// Run a closure against a registered timeline
    pub fn with_timeline<F, R>(&self, id: TimelineId, f: F) -> Option<R>
    where
        F: FnOnce(&mut Timeline) -> R,
    {
        self.with(|s| s.timeline_mut(id).map(f)).flatten()
    }

    pub fn is_timeline_playing(&self, id: TimelineId) -> bool {
        self.with(|s| s.timeline(id).map(|timeline| timeline.is_playing()))
            .flatten()
            .unwrap_or(false)
    }

    pub fn remove_timeline(&self, id: TimelineId) -> bool {
        self.with(|s| s.remove_timeline(id)).unwrap_or(false)
    }

    // ── tick callbacks ───────────────────────────────────────────────────

    pub fn register_tick_callback(&self, callback: TickCallback) -> Option<TickCallbackId> {
        self.with(|s| s.register_tick_callback(callback))
    }

    pub fn remove_tick_callback(&self, id: TickCallbackId) -> bool {
        self.with(|s| s.remove_tick_callback(id)).unwrap_or(false)
    }
}

impl std::fmt::Debug for SchedulerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchedulerHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// AnimatedValue
// ─────────────────────────────────────────────────────────────────────────────

/// A scalar that springs toward its target.
///
/// The backing spring is created lazily on the first `set_target` call
/// with real distance to cover, and removed when the value is dropped
/// or snapped.
pub struct AnimatedValue {
    handle: SchedulerHandle,
    spring_id: Option<SpringId>,
    config: SpringConfig,
    current: f32,
    target: f32,
}

impl AnimatedValue {
    pub fn new(handle: SchedulerHandle, initial: f32, config: SpringConfig) -> Self {
        Self {
            handle,
            spring_id: None,
            config,
            current: initial,
            target: initial,
        }
    }

    /// Retarget the spring, creating it on first real movement
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
        match self.spring_id {
            Some(id) => self.handle.set_spring_target(id, target),
            None => {
                if (target - self.current).abs() > 0.001 {
                    let mut spring = Spring::new(self.config, self.current);
                    spring.set_target(target);
                    self.spring_id = self.handle.register_spring(spring);
                }
                if self.spring_id.is_none() {
                    // Scheduler gone (or move too small to animate)
                    self.current = target;
                }
            }
        }
    }

    /// Jump without animating, discarding any in-flight spring
    pub fn set_immediate(&mut self, value: f32) {
        if let Some(id) = self.spring_id.take() {
            self.handle.remove_spring(id);
        }
        self.current = value;
        self.target = value;
    }

    pub fn get(&self) -> f32 {
        match self.spring_id {
            Some(id) => self.handle.get_spring_value(id).unwrap_or(self.target),
            None => self.current,
        }
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn velocity(&self) -> f32 {
        self.spring_id
            .and_then(|id| self.handle.get_spring_velocity(id))
            .unwrap_or(0.0)
    }

    pub fn is_animating(&self) -> bool {
        self.spring_id
            .map(|id| !self.handle.is_spring_settled(id))
            .unwrap_or(false)
    }

    /// Finish instantly at the current target
    pub fn snap_to_target(&mut self) {
        let target = self.target;
        self.set_immediate(target);
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    /// Swap the spring feel mid-flight, keeping value and velocity
    pub fn set_config(&mut self, config: SpringConfig) {
        self.config = config;
        if let Some(id) = self.spring_id {
            self.handle.set_spring_config(id, config);
        }
    }
}

impl Drop for AnimatedValue {
    fn drop(&mut self) {
        if let Some(id) = self.spring_id.take() {
            self.handle.remove_spring(id);
        }
    }
}

impl std::fmt::Debug for AnimatedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimatedValue")
            .field("current", &self.get())
            .field("target", &self.target)
            .field("animating", &self.is_animating())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// AnimatedKeyframe
// ─────────────────────────────────────────────────────────────────────────────

/// A registered keyframe animation that unregisters on drop
pub struct AnimatedKeyframe {
    handle: SchedulerHandle,
    keyframe_id: Option<KeyframeId>,
}

impl AnimatedKeyframe {
    pub fn builder(handle: SchedulerHandle, duration_ms: u32) -> KeyframeBuilder {
        KeyframeBuilder {
            handle,
            duration_ms,
            keyframes: Vec::new(),
            auto_start: false,
            iterations: 1,
            alternate: false,
            delay_ms: 0.0,
        }
    }

    pub fn start(&self) {
        if let Some(id) = self.keyframe_id {
            self.handle.start_keyframe(id);
        }
    }

    pub fn stop(&self) {
        if let Some(id) = self.keyframe_id {
            self.handle.stop_keyframe(id);
        }
    }

    pub fn value(&self) -> f32 {
        self.keyframe_id
            .and_then(|id| self.handle.get_keyframe_value(id))
            .unwrap_or(0.0)
    }

    pub fn progress(&self) -> f32 {
        self.keyframe_id
            .and_then(|id| self.handle.get_keyframe_progress(id))
            .unwrap_or(0.0)
    }

    pub fn is_playing(&self) -> bool {
        self.keyframe_id
            .map(|id| self.handle.is_keyframe_playing(id))
            .unwrap_or(false)
    }

    pub fn id(&self) -> Option<KeyframeId> {
        self.keyframe_id
    }
}

impl Drop for AnimatedKeyframe {
    fn drop(&mut self) {
        if let Some(id) = self.keyframe_id.take() {
            self.handle.remove_keyframe(id);
        }
    }
}

/// Builder for [`AnimatedKeyframe`]
pub struct KeyframeBuilder {
    handle: SchedulerHandle,
    duration_ms: u32,
    keyframes: Vec<Keyframe>,
    auto_start: bool,
    iterations: i32,
    alternate: bool,
    delay_ms: f32,
}

impl KeyframeBuilder {
    /// Add a keyframe at `time` (0.0 to 1.0) with linear approach
    pub fn keyframe(mut self, time: f32, value: f32) -> Self {
        self.keyframes.push(Keyframe::new(time, value));
        self
    }

    /// Add a keyframe approached with a specific easing
    pub fn keyframe_eased(mut self, time: f32, value: f32, easing: Easing) -> Self {
        self.keyframes.push(Keyframe::with_easing(time, value, easing));
        self
    }

    pub fn auto_start(mut self, auto_start: bool) -> Self {
        self.auto_start = auto_start;
        self
    }

    /// Play count; -1 repeats forever
    pub fn iterations(mut self, iterations: i32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn loop_infinite(mut self) -> Self {
        self.iterations = -1;
        self
    }

    /// Reverse direction at each end instead of snapping back
    pub fn ping_pong(mut self) -> Self {
        self.alternate = true;
        self
    }

    pub fn delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn build(self) -> AnimatedKeyframe {
        let mut animation = KeyframeAnimation::new(self.duration_ms, self.keyframes);
        animation.set_delay(self.delay_ms);
        animation.set_iterations(self.iterations);
        animation.set_alternate(self.alternate);
        if self.auto_start {
            animation.start();
        }
        let keyframe_id = self.handle.register_keyframe(animation);
        AnimatedKeyframe {
            handle: self.handle,
            keyframe_id,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// AnimatedTimeline
// ─────────────────────────────────────────────────────────────────────────────

/// Shape of the value returned by a timeline `configure` closure.
///
/// Forces configuration to hand back the entry IDs it created, in
/// whatever shape the call site wants to hold them.
pub trait ConfigureResult {
    fn entry_ids(&self) -> Vec<TimelineEntryId>;
}

impl ConfigureResult for () {
    fn entry_ids(&self) -> Vec<TimelineEntryId> {
        Vec::new()
    }
}

impl ConfigureResult for TimelineEntryId {
    fn entry_ids(&self) -> Vec<TimelineEntryId> {
        vec![*self]
    }
}

impl ConfigureResult for (TimelineEntryId, TimelineEntryId) {
    fn entry_ids(&self) -> Vec<TimelineEntryId> {
        vec![self.0, self.1]
    }
}

impl ConfigureResult for (TimelineEntryId, TimelineEntryId, TimelineEntryId) {
    fn entry_ids(&self) -> Vec<TimelineEntryId> {
        vec![self.0, self.1, self.2]
    }
}

impl ConfigureResult for (TimelineEntryId, TimelineEntryId, TimelineEntryId, TimelineEntryId) {
    fn entry_ids(&self) -> Vec<TimelineEntryId> {
        vec![self.0, self.1, self.2, self.3]
    }
}

impl ConfigureResult for Vec<TimelineEntryId> {
    fn entry_ids(&self) -> Vec<TimelineEntryId> {
        self.clone()
    }
}

/// A registered timeline that unregisters on drop.
///
/// Registers an empty [`Timeline`] immediately so entry additions and
/// playback control never race against registration.
pub struct AnimatedTimeline {
    handle: SchedulerHandle,
    timeline_id: Option<TimelineId>,
}

impl AnimatedTimeline {
    pub fn new(handle: SchedulerHandle) -> Self {
        let timeline_id = handle.register_timeline(Timeline::new());
        Self {
            handle,
            timeline_id,
        }
    }

    fn with<F, R>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut Timeline) -> R,
    {
        self.timeline_id
            .and_then(|id| self.handle.with_timeline(id, f))
    }

    /// Build the timeline's entries in one closure
    pub fn configure<F, R>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut Timeline) -> R,
        R: ConfigureResult,
    {
        self.with(f)
    }

    pub fn add(
        &self,
        offset_ms: i32,
        duration_ms: u32,
        start_value: f32,
        end_value: f32,
    ) -> Option<TimelineEntryId> {
        self.with(|t| t.add(offset_ms, duration_ms, start_value, end_value))
    }

    pub fn add_with_easing(
        &self,
        offset_ms: i32,
        duration_ms: u32,
        start_value: f32,
        end_value: f32,
        easing: Easing,
    ) -> Option<TimelineEntryId> {
        self.with(|t| t.add_with_easing(offset_ms, duration_ms, start_value, end_value, easing))
    }

    pub fn add_at(
        &self,
        position: TimelinePosition,
        duration_ms: u32,
        from: f32,
        to: f32,
        easing: Easing,
    ) -> Option<TimelineEntryId> {
        self.with(|t| t.add_at(position, duration_ms, from, to, easing))
    }

    pub fn set_delay(&self, delay_ms: f32) {
        self.with(|t| t.set_delay(delay_ms));
    }

    pub fn set_loop(&self, count: i32) {
        self.with(|t| t.set_loop(count));
    }

    pub fn set_alternate(&self, alternate: bool) {
        self.with(|t| t.set_alternate(alternate));
    }

    pub fn set_playback_rate(&self, rate: f32) {
        self.with(|t| t.set_playback_rate(rate));
    }

    /// Start from the beginning, including any delay
    pub fn start(&self) {
        self.with(|t| t.start());
    }

    /// Same as `start`; reads better at call sites replaying a finished
    /// timeline
    pub fn restart(&self) {
        self.start();
    }

    pub fn stop(&self) {
        self.with(|t| t.stop());
    }

    pub fn pause(&self) {
        self.with(|t| t.pause());
    }

    pub fn resume(&self) {
        self.with(|t| t.resume());
    }

    pub fn reverse(&self) {
        self.with(|t| t.reverse());
    }

    pub fn seek(&self, time_ms: f32) {
        self.with(|t| t.seek(time_ms));
    }

    /// Current value of one entry
    pub fn get(&self, entry: TimelineEntryId) -> Option<f32> {
        self.with(|t| t.value(entry)).flatten()
    }

    pub fn entry_progress(&self, entry: TimelineEntryId) -> Option<f32> {
        self.with(|t| t.entry_progress(entry)).flatten()
    }

    pub fn progress(&self) -> f32 {
        self.with(|t| t.progress()).unwrap_or(0.0)
    }

    pub fn duration_ms(&self) -> f32 {
        self.with(|t| t.duration_ms()).unwrap_or(0.0)
    }

    pub fn is_playing(&self) -> bool {
        self.with(|t| t.is_playing()).unwrap_or(false)
    }

    pub fn has_entries(&self) -> bool {
        self.with(|t| t.entry_count() > 0).unwrap_or(false)
    }

    pub fn entry_ids(&self) -> Vec<TimelineEntryId> {
        self.with(|t| t.entry_ids()).unwrap_or_default()
    }
}

impl Drop for AnimatedTimeline {
    fn drop(&mut self) {
        if let Some(id) = self.timeline_id.take() {
            self.handle.remove_timeline(id);
        }
    }
}
