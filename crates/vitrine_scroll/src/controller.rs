//! Smooth-scroll controller
//!
//! Binds the momentum engine into the animation scheduler's frame loop
//! and owns the document's trigger registry. The engine advances inside
//! a registered tick callback; trigger dispatch runs separately via
//! [`SmoothScrollController::dispatch`] after the scheduler tick, so
//! trigger callbacks are free to start timelines and retarget springs
//! without re-entering the scheduler.
//!
//! Under a reduced-motion preference every input lands immediately:
//! wheel deltas jump, programmatic scrolls jump, and triggers still fire
//! at the final offset so content is never stuck hidden.

use std::sync::{Arc, Mutex};

use vitrine_animation::{Easing, SchedulerHandle, TickCallbackId};
use vitrine_core::MotionPreference;

use crate::engine::{ScrollConfig, ScrollEngine, ScrollState};
use crate::trigger::{SharedTriggerRegistry, TriggerRegistry};

/// Default glide length for programmatic scrolls, in seconds
pub const SCROLL_TO_DURATION_S: f32 = 0.8;

/// Delay before a deferred trigger refresh runs, giving layout a moment
/// to settle after load or resize
pub const REFRESH_DELAY_S: f32 = 0.1;

struct ControllerInner {
    engine: ScrollEngine,
    refresh_countdown: Option<f32>,
}

/// Document scroll orchestrator
pub struct SmoothScrollController {
    inner: Arc<Mutex<ControllerInner>>,
    triggers: SharedTriggerRegistry,
    scheduler: SchedulerHandle,
    ticker: Option<TickCallbackId>,
    motion: MotionPreference,
}

impl SmoothScrollController {
    pub fn new(scheduler: SchedulerHandle, motion: MotionPreference) -> Self {
        Self::with_config(scheduler, motion, ScrollConfig::default())
    }

    pub fn with_config(
        scheduler: SchedulerHandle,
        motion: MotionPreference,
        config: ScrollConfig,
    ) -> Self {
        let inner = Arc::new(Mutex::new(ControllerInner {
            engine: ScrollEngine::new(config),
            refresh_countdown: None,
        }));

        // Under reduced motion inputs land instantly, the engine never
        // animates, and nothing registers with the scheduler
        let ticker = if motion.allows_motion() {
            // The engine integrates real frame deltas; a smoothing cap
            // would make scroll distance depend on stall history
            scheduler.set_lag_smoothing(None);
            scheduler.register_tick_callback({
                let inner = Arc::clone(&inner);
                Box::new(move |_, dt| {
                    inner.lock().unwrap().engine.tick(dt);
                })
            })
        } else {
            None
        };

        Self {
            inner,
            triggers: TriggerRegistry::shared(),
            scheduler,
            ticker,
            motion,
        }
    }

    /// Registry for document-scroll triggers
    pub fn triggers(&self) -> SharedTriggerRegistry {
        Arc::clone(&self.triggers)
    }

    pub fn motion(&self) -> MotionPreference {
        self.motion
    }

    /// Feed a wheel delta (positive = scroll down)
    pub fn wheel(&self, delta: f32) {
        let mut inner = self.inner.lock().unwrap();
        if self.motion.is_reduced() {
            // No momentum: the page lands exactly where the input put it
            let target = inner.engine.offset() + delta;
            inner.engine.set_offset(target);
        } else {
            inner.engine.apply_wheel_delta(delta);
        }
    }

    /// Glide to an absolute offset over the default duration
    pub fn scroll_to(&self, target: f32) {
        self.scroll_to_with_duration(target, SCROLL_TO_DURATION_S);
    }

    pub fn scroll_to_with_duration(&self, target: f32, duration_s: f32) {
        let mut inner = self.inner.lock().unwrap();
        if self.motion.is_reduced() {
            inner.engine.set_offset(target);
        } else {
            inner.engine.glide_to(target, duration_s, Easing::CubicInOut);
        }
    }

    pub fn set_viewport_height(&self, height: f32) {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.engine.set_viewport_height(height);
            inner.refresh_countdown = Some(REFRESH_DELAY_S);
        }
        self.triggers.lock().unwrap().set_viewport_extent(height);
    }

    pub fn set_content_height(&self, height: f32) {
        let mut inner = self.inner.lock().unwrap();
        inner.engine.set_content_height(height);
        inner.refresh_countdown = Some(REFRESH_DELAY_S);
    }

    /// Arm a deferred trigger refresh
    pub fn request_refresh(&self) {
        self.inner.lock().unwrap().refresh_countdown = Some(REFRESH_DELAY_S);
    }

    pub fn offset(&self) -> f32 {
        self.inner.lock().unwrap().engine.offset()
    }

    pub fn velocity(&self) -> f32 {
        self.inner.lock().unwrap().engine.velocity()
    }

    pub fn progress(&self) -> f32 {
        self.inner.lock().unwrap().engine.progress()
    }

    pub fn state(&self) -> ScrollState {
        self.inner.lock().unwrap().engine.state()
    }

    pub fn max_offset(&self) -> f32 {
        self.inner.lock().unwrap().engine.max_offset()
    }

    pub fn viewport_height(&self) -> f32 {
        self.inner.lock().unwrap().engine.viewport_height()
    }

    /// Whether the controller is still wired into the frame loop
    pub fn is_attached(&self) -> bool {
        self.ticker.is_some() && self.scheduler.is_alive()
    }

    /// Run any due deferred refresh, then evaluate triggers at the
    /// current offset
    ///
    /// Call once per frame after the scheduler tick.
    pub fn dispatch(&self, dt: f32) {
        let (offset, refresh_due) = {
            let mut inner = self.inner.lock().unwrap();
            let refresh_due = match inner.refresh_countdown {
                Some(remaining) => {
                    let left = remaining - dt;
                    if left <= 0.0 {
                        inner.refresh_countdown = None;
                        true
                    } else {
                        inner.refresh_countdown = Some(left);
                        false
                    }
                }
                None => false,
            };
            (inner.engine.offset(), refresh_due)
        };

        let mut triggers = self.triggers.lock().unwrap();
        if refresh_due {
            triggers.refresh();
        }
        triggers.process(offset);
    }

    /// Detach from the frame loop
    ///
    /// The ticker callback is removed first, so no subsequent tick can
    /// observe a half-dismantled controller.
    pub fn teardown(&mut self) {
        if let Some(id) = self.ticker.take() {
            self.scheduler.remove_tick_callback(id);
            tracing::debug!("scroll controller detached from frame loop");
        }
    }
}

impl Drop for SmoothScrollController {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trigger::{ScrollTrigger, TargetBounds, TriggerPoint};
    use vitrine_animation::AnimationScheduler;
    use vitrine_core::ScrubState;

    fn controller_pair(
        motion: MotionPreference,
    ) -> (vitrine_animation::SharedScheduler, SmoothScrollController) {
        let scheduler = AnimationScheduler::shared();
        let handle = SchedulerHandle::new(&scheduler);
        let controller = SmoothScrollController::new(handle, motion);
        controller.set_viewport_height(800.0);
        controller.set_content_height(4000.0);
        (scheduler, controller)
    }

    #[test]
    fn test_attaches_ticker_and_disables_lag_smoothing() {
        let (scheduler, controller) = controller_pair(MotionPreference::Full);
        assert!(controller.is_attached());
        assert_eq!(scheduler.lock().unwrap().tick_callback_count(), 1);
        assert_eq!(scheduler.lock().unwrap().lag_smoothing(), None);
    }

    #[test]
    fn test_teardown_removes_ticker_before_anything_else() {
        let (scheduler, mut controller) = controller_pair(MotionPreference::Full);
        controller.wheel(10.0);
        controller.teardown();

        assert!(!controller.is_attached());
        assert_eq!(scheduler.lock().unwrap().tick_callback_count(), 0);

        // With the ticker gone, frames no longer advance the engine
        let offset = controller.offset();
        for _ in 0..30 {
            scheduler.lock().unwrap().tick(1.0 / 60.0);
        }
        assert_eq!(controller.offset(), offset);
    }

    #[test]
    fn test_drop_detaches() {
        let (scheduler, controller) = controller_pair(MotionPreference::Full);
        drop(controller);
        assert_eq!(scheduler.lock().unwrap().tick_callback_count(), 0);
    }

    #[test]
    fn test_wheel_coasts_through_frames() {
        let (scheduler, controller) = controller_pair(MotionPreference::Full);
        controller.wheel(10.0);
        assert_eq!(controller.offset(), 10.0);

        for _ in 0..300 {
            scheduler.lock().unwrap().tick(1.0 / 60.0);
        }
        // Momentum carried the page past the direct wheel movement
        assert!(controller.offset() > 10.0);
        assert_eq!(controller.state(), ScrollState::Idle);
    }

    #[test]
    fn test_reduced_motion_registers_nothing_with_the_scheduler() {
        let (scheduler, _controller) = controller_pair(MotionPreference::Reduced);
        assert_eq!(scheduler.lock().unwrap().tick_callback_count(), 0);
    }

    #[test]
    fn test_reduced_motion_wheel_jumps_without_momentum() {
        let (scheduler, controller) = controller_pair(MotionPreference::Reduced);
        controller.wheel(42.0);
        assert_eq!(controller.offset(), 42.0);
        assert_eq!(controller.state(), ScrollState::Idle);

        for _ in 0..30 {
            scheduler.lock().unwrap().tick(1.0 / 60.0);
        }
        assert_eq!(controller.offset(), 42.0);
    }

    #[test]
    fn test_scroll_to_glides_and_lands_exactly() {
        let (scheduler, controller) = controller_pair(MotionPreference::Full);
        controller.scroll_to(500.0);

        for _ in 0..25 {
            scheduler.lock().unwrap().tick(1.0 / 60.0);
        }
        let mid = controller.offset();
        assert!(mid > 0.0 && mid < 500.0);

        for _ in 0..40 {
            scheduler.lock().unwrap().tick(1.0 / 60.0);
        }
        assert_eq!(controller.offset(), 500.0);
    }

    #[test]
    fn test_reduced_motion_scroll_to_jumps() {
        let (_scheduler, controller) = controller_pair(MotionPreference::Reduced);
        controller.scroll_to(500.0);
        assert_eq!(controller.offset(), 500.0);
    }

    #[test]
    fn test_dispatch_fires_triggers_at_current_offset() {
        let (_scheduler, controller) = controller_pair(MotionPreference::Full);
        let fired = Arc::new(Mutex::new(false));

        let _handle = ScrollTrigger::builder()
            .start(TriggerPoint::top(0.85))
            .bounds(TargetBounds::new(1000.0, 500.0))
            .on_enter({
                let fired = Arc::clone(&fired);
                move || *fired.lock().unwrap() = true
            })
            .register(&controller.triggers());

        // start band: 1000 - 0.85*800 = 320
        controller.wheel(350.0);
        controller.dispatch(1.0 / 60.0);
        assert!(*fired.lock().unwrap());
    }

    #[test]
    fn test_deferred_refresh_recomputes_bands() {
        let (_scheduler, controller) = controller_pair(MotionPreference::Full);
        let handle = ScrollTrigger::builder()
            .start(TriggerPoint::top(0.85))
            .end(TriggerPoint::bottom(0.40))
            .bounds(TargetBounds::new(1000.0, 500.0))
            .register(&controller.triggers());

        // Taller viewport moves the start band to 1000 - 0.85*1200 = -20,
        // but only once the deferred refresh runs
        controller.set_viewport_height(1200.0);
        controller.dispatch(0.016);
        assert_eq!(handle.state(), Some(ScrubState::BeforeRange));

        controller.dispatch(REFRESH_DELAY_S);
        assert_eq!(handle.state(), Some(ScrubState::InRange));
    }
}
