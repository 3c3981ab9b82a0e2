//! Motion primitives
//!
//! The four choreography building blocks every section is assembled from,
//! gathered on [`ChoreoContext`]: reveal-on-scroll, staggered reveal,
//! entrance timeline, and magnetic follow. Every primitive checks the
//! injected motion preference first: under reduced motion the reveals
//! return `None` without touching any node, the entrance timeline is
//! skipped, and the magnetic handle degrades to a no-op.
//!
//! Content is visible at rest by default. A reveal ADDS the hidden
//! starting pose when it registers, so skipping registration leaves
//! everything readable with no animation anywhere.
//!
//! Handles sample their animation state first and lock the stage only for
//! the final writes, keeping the stage a leaf lock.

use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use smallvec::SmallVec;

use vitrine_animation::{
    AnimatedTimeline, AnimatedValue, Easing, SchedulerHandle, SpringConfig, TimelineEntryId,
    TimelinePosition,
};
use vitrine_core::{reveal_events, MotionPreference, Point, RevealState, StateTransitions, Vec2};
use vitrine_scroll::{
    ScrollTrigger, SharedTriggerRegistry, TargetBounds, TriggerHandle, TriggerPoint,
};

use crate::stage::{NodeId, SharedStage};

// ─────────────────────────────────────────────────────────────────────────────
// Shared motion vocabulary
// ─────────────────────────────────────────────────────────────────────────────

/// Standard durations, in seconds
pub mod durations {
    pub const FAST: f32 = 0.3;
    pub const NORMAL: f32 = 0.5;
    pub const SLOW: f32 = 0.8;
    pub const SLOWER: f32 = 1.2;
}

/// Stagger presets: delay between successive items, in seconds
pub mod staggers {
    pub const TIGHT: f32 = 0.05;
    pub const NORMAL: f32 = 0.1;
    pub const LOOSE: f32 = 0.15;
    pub const WIDE: f32 = 0.2;
}

/// Vertical offset applied above a scroll-to target, in pixels
pub const SCROLL_TO_OFFSET: f32 = -100.0;

/// Viewport fraction where reveals trigger by default
pub const REVEAL_VIEWPORT: f32 = 0.85;

/// Clamped scroll-to destination for a section top
pub fn scroll_target(section_top: f32) -> f32 {
    (section_top + SCROLL_TO_OFFSET).max(0.0)
}

/// Light-background overlap flag, threaded from the creative section to
/// the nav indicator and the decorative backdrop
pub type LightBgFlag = Arc<AtomicBool>;

// ─────────────────────────────────────────────────────────────────────────────
// Context
// ─────────────────────────────────────────────────────────────────────────────

/// Everything a choreographer needs to register motion
///
/// Owns shared handles to the stage, the animation scheduler, the
/// document trigger registry, and the motion preference read once at
/// startup. Cheap to clone; sections keep their own copy.
#[derive(Clone)]
pub struct ChoreoContext {
    stage: SharedStage,
    scheduler: SchedulerHandle,
    triggers: SharedTriggerRegistry,
    motion: MotionPreference,
    light_bg: LightBgFlag,
}

impl ChoreoContext {
    pub fn new(
        stage: SharedStage,
        scheduler: SchedulerHandle,
        triggers: SharedTriggerRegistry,
        motion: MotionPreference,
    ) -> Self {
        Self {
            stage,
            scheduler,
            triggers,
            motion,
            light_bg: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn stage(&self) -> SharedStage {
        Arc::clone(&self.stage)
    }

    pub fn scheduler(&self) -> SchedulerHandle {
        self.scheduler.clone()
    }

    pub fn triggers(&self) -> SharedTriggerRegistry {
        Arc::clone(&self.triggers)
    }

    pub fn motion(&self) -> MotionPreference {
        self.motion
    }

    /// Cross-cutting light-background overlap signal
    pub fn light_bg(&self) -> LightBgFlag {
        Arc::clone(&self.light_bg)
    }

    // ─────────────────────────────────────────────────────────────────────
    // The four primitives
    // ─────────────────────────────────────────────────────────────────────

    /// Hide a node and fade/slide it in when it scrolls into view
    ///
    /// Returns `None` under reduced motion, leaving the node untouched.
    /// The returned handle owns the trigger binding; drop it to release.
    pub fn reveal_on_scroll(&self, node: NodeId, config: RevealConfig) -> Option<RevealHandle> {
        let bounds = self.stage.lock().unwrap().trigger_bounds(node)?;
        self.register_reveal(
            &[node],
            bounds,
            config.offset_y,
            config.from_opacity,
            config.duration_s,
            0.0,
            config.easing,
            config.trigger_viewport,
            config.scrub,
        )
    }

    /// Reveal a group of nodes with a per-index delay
    ///
    /// The trigger watches the union of the group's bounds, so the whole
    /// cascade starts when the first of them crosses the threshold.
    pub fn staggered_reveal(
        &self,
        nodes: &[NodeId],
        config: StaggerRevealConfig,
    ) -> Option<RevealHandle> {
        let bounds = self.stage.lock().unwrap().group_trigger_bounds(nodes)?;
        self.register_reveal(
            nodes,
            bounds,
            config.offset_y,
            config.from_opacity,
            config.duration_s,
            config.stagger_s,
            config.easing,
            config.trigger_viewport,
            false,
        )
    }

    /// A delayed timeline for mount-time entrances
    ///
    /// Starts immediately; time only advances on scheduler ticks, so
    /// entries added before the first tick are never late.
    pub fn entrance_timeline(&self, config: EntranceConfig) -> Option<AnimatedTimeline> {
        if self.motion.is_reduced() {
            return None;
        }
        let timeline = AnimatedTimeline::new(self.scheduler.clone());
        timeline.set_delay(config.delay_s * 1000.0);
        timeline.start();
        Some(timeline)
    }

    /// Spring the node toward the pointer while hovered
    ///
    /// Under reduced motion the handle is inert: calls succeed and do
    /// nothing, so callers never branch.
    pub fn magnetic_follow(&self, node: NodeId, strength: f32) -> MagneticHandle {
        if self.motion.is_reduced() {
            return MagneticHandle::inert(self.stage());
        }
        MagneticHandle {
            stage: self.stage(),
            node: Some(node),
            x: AnimatedValue::new(self.scheduler.clone(), 0.0, MagneticHandle::ATTRACT),
            y: AnimatedValue::new(self.scheduler.clone(), 0.0, MagneticHandle::ATTRACT),
            strength,
            engaged: false,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn register_reveal(
        &self,
        nodes: &[NodeId],
        bounds: TargetBounds,
        offset_y: f32,
        from_opacity: f32,
        duration_s: f32,
        stagger_s: f32,
        easing: Easing,
        trigger_viewport: f32,
        scrub: bool,
    ) -> Option<RevealHandle> {
        if self.motion.is_reduced() || nodes.is_empty() {
            return None;
        }

        // From here on the primitive owns the hidden pose
        {
            let mut stage = self.stage.lock().unwrap();
            for node in nodes {
                stage.set_opacity(*node, from_opacity);
                stage.set_translate_y(*node, offset_y);
            }
        }

        let builder = ScrollTrigger::builder()
            .start(TriggerPoint::top(trigger_viewport))
            .bounds(bounds);

        let driver = if scrub {
            RevealDriver::Scrub {
                offset_y,
                from_opacity,
                easing,
            }
        } else {
            let timeline = Arc::new(AnimatedTimeline::new(self.scheduler.clone()));
            let duration_ms = (duration_s * 1000.0).round() as u32;
            let entries = nodes
                .iter()
                .enumerate()
                .map(|(i, _)| {
                    let at = (i as f32 * stagger_s * 1000.0).round();
                    RevealEntries {
                        opacity: timeline.add_at(
                            TimelinePosition::At(at),
                            duration_ms,
                            from_opacity,
                            1.0,
                            easing,
                        ),
                        offset: timeline.add_at(
                            TimelinePosition::At(at),
                            duration_ms,
                            offset_y,
                            0.0,
                            easing,
                        ),
                    }
                })
                .collect();
            RevealDriver::Once {
                timeline,
                state: Arc::new(Mutex::new(RevealState::Unrevealed)),
                entries,
            }
        };

        let trigger = match &driver {
            RevealDriver::Once { timeline, state, .. } => {
                let timeline = Arc::clone(timeline);
                let state = Arc::clone(state);
                builder
                    .once(true)
                    .on_enter(move || {
                        let mut state = state.lock().unwrap();
                        if let Some(next) = state.on_event(reveal_events::THRESHOLD_DOWN) {
                            *state = next;
                            timeline.start();
                        }
                    })
                    .register(&self.triggers)
            }
            RevealDriver::Scrub { .. } => builder.scrub(true).register(&self.triggers),
        };

        tracing::debug!(count = nodes.len(), scrub, "reveal registered");
        Some(RevealHandle {
            stage: self.stage(),
            nodes: nodes.iter().copied().collect(),
            driver,
            trigger,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Configs
// ─────────────────────────────────────────────────────────────────────────────

/// Options for [`ChoreoContext::reveal_on_scroll`]
#[derive(Clone, Copy, Debug)]
pub struct RevealConfig {
    /// Starting offset below the rest position, in pixels
    pub offset_y: f32,
    pub from_opacity: f32,
    pub duration_s: f32,
    pub easing: Easing,
    /// Viewport fraction the element top must reach
    pub trigger_viewport: f32,
    /// Follow trigger progress instead of playing once
    pub scrub: bool,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            offset_y: 40.0,
            from_opacity: 0.0,
            duration_s: durations::SLOW,
            easing: Easing::QuartOut,
            trigger_viewport: REVEAL_VIEWPORT,
            scrub: false,
        }
    }
}

/// Options for [`ChoreoContext::staggered_reveal`]
#[derive(Clone, Copy, Debug)]
pub struct StaggerRevealConfig {
    pub offset_y: f32,
    pub from_opacity: f32,
    pub duration_s: f32,
    /// Delay between successive items, in seconds
    pub stagger_s: f32,
    pub easing: Easing,
    pub trigger_viewport: f32,
}

impl Default for StaggerRevealConfig {
    fn default() -> Self {
        Self {
            offset_y: 30.0,
            from_opacity: 0.0,
            duration_s: durations::NORMAL,
            stagger_s: staggers::NORMAL,
            easing: Easing::QuartOut,
            trigger_viewport: REVEAL_VIEWPORT,
        }
    }
}

/// Options for [`ChoreoContext::entrance_timeline`]
#[derive(Clone, Copy, Debug)]
pub struct EntranceConfig {
    /// Hold before the first entry plays, in seconds
    pub delay_s: f32,
}

impl Default for EntranceConfig {
    fn default() -> Self {
        Self { delay_s: 0.2 }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Reveal handle
// ─────────────────────────────────────────────────────────────────────────────

struct RevealEntries {
    opacity: Option<TimelineEntryId>,
    offset: Option<TimelineEntryId>,
}

enum RevealDriver {
    /// Timed entrance started by the trigger; never reverses
    Once {
        timeline: Arc<AnimatedTimeline>,
        state: Arc<Mutex<RevealState>>,
        entries: SmallVec<[RevealEntries; 4]>,
    },
    /// Properties follow the trigger's progress directly
    Scrub {
        offset_y: f32,
        from_opacity: f32,
        easing: Easing,
    },
}

/// A live reveal binding
///
/// Owns the trigger registration and the value sources; dropping the
/// handle releases both. Call [`sync`](RevealHandle::sync) once per frame
/// to write the current values onto the stage.
pub struct RevealHandle {
    stage: SharedStage,
    nodes: SmallVec<[NodeId; 4]>,
    driver: RevealDriver,
    trigger: TriggerHandle,
}

impl RevealHandle {
    pub fn sync(&mut self) {
        match &self.driver {
            RevealDriver::Once {
                timeline,
                state,
                entries,
            } => {
                // Sample before taking the stage lock
                let values: SmallVec<[(f32, f32); 4]> = entries
                    .iter()
                    .map(|e| {
                        let opacity = e.opacity.and_then(|id| timeline.get(id)).unwrap_or(1.0);
                        let offset = e.offset.and_then(|id| timeline.get(id)).unwrap_or(0.0);
                        (opacity, offset)
                    })
                    .collect();
                let finished = !timeline.is_playing() && timeline.progress() >= 1.0;

                {
                    let mut stage = self.stage.lock().unwrap();
                    for (node, (opacity, offset)) in self.nodes.iter().zip(values.iter()) {
                        stage.set_opacity(*node, *opacity);
                        stage.set_translate_y(*node, *offset);
                    }
                }

                let mut state = state.lock().unwrap();
                if *state == RevealState::Revealing && finished {
                    if let Some(next) = state.on_event(reveal_events::PLAYED_OUT) {
                        *state = next;
                    }
                }
            }
            RevealDriver::Scrub {
                offset_y,
                from_opacity,
                easing,
            } => {
                let eased = easing.apply(self.trigger.progress().unwrap_or(0.0));
                let opacity = from_opacity + (1.0 - from_opacity) * eased;
                let offset = offset_y * (1.0 - eased);

                let mut stage = self.stage.lock().unwrap();
                for node in &self.nodes {
                    stage.set_opacity(*node, opacity);
                    stage.set_translate_y(*node, offset);
                }
            }
        }
    }

    /// Where the one-shot reveal stands; scrub reveals have no state
    pub fn state(&self) -> Option<RevealState> {
        match &self.driver {
            RevealDriver::Once { state, .. } => Some(*state.lock().unwrap()),
            RevealDriver::Scrub { .. } => None,
        }
    }

    pub fn is_revealed(&self) -> bool {
        self.state() == Some(RevealState::Revealed)
    }

    pub fn trigger(&self) -> &TriggerHandle {
        &self.trigger
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Magnetic handle
// ─────────────────────────────────────────────────────────────────────────────

/// Pointer-following displacement for a hovered node
///
/// While engaged the node springs toward the pointer at a fraction of
/// the pointer's offset from the node center; on leave it swings back to
/// rest on an underdamped spring. The inert variant (reduced motion)
/// accepts every call and moves nothing.
pub struct MagneticHandle {
    stage: SharedStage,
    node: Option<NodeId>,
    x: AnimatedValue,
    y: AnimatedValue,
    strength: f32,
    engaged: bool,
}

impl MagneticHandle {
    /// Follow profile while the pointer drives the target
    const ATTRACT: SpringConfig = SpringConfig {
        stiffness: 210.0,
        damping: 20.0,
        mass: 1.0,
    };

    /// Return profile after the pointer leaves; underdamped for the
    /// elastic swing back to rest
    const RELEASE: SpringConfig = SpringConfig {
        stiffness: 180.0,
        damping: 12.0,
        mass: 1.0,
    };

    pub const DEFAULT_STRENGTH: f32 = 0.3;

    fn inert(stage: SharedStage) -> Self {
        // A dead handle registers nothing; these values never animate
        let dead = SchedulerHandle::detached();
        Self {
            stage,
            node: None,
            x: AnimatedValue::new(dead.clone(), 0.0, Self::ATTRACT),
            y: AnimatedValue::new(dead, 0.0, Self::ATTRACT),
            strength: 0.0,
            engaged: false,
        }
    }

    pub fn is_inert(&self) -> bool {
        self.node.is_none()
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Pointer moved while over the node
    pub fn pointer_move(&mut self, pointer: Point) {
        let Some(node) = self.node else { return };
        let center = match self.stage.lock().unwrap().bounds(node) {
            Some(bounds) => bounds.center(),
            None => return,
        };
        if !self.engaged {
            self.engaged = true;
            self.x.set_config(Self::ATTRACT);
            self.y.set_config(Self::ATTRACT);
        }
        self.x.set_target((pointer.x - center.x) * self.strength);
        self.y.set_target((pointer.y - center.y) * self.strength);
    }

    /// Pointer left the node; swing back to rest
    pub fn pointer_leave(&mut self) {
        if !self.engaged {
            return;
        }
        self.engaged = false;
        self.x.set_config(Self::RELEASE);
        self.y.set_config(Self::RELEASE);
        self.x.set_target(0.0);
        self.y.set_target(0.0);
    }

    pub fn displacement(&self) -> Vec2 {
        Vec2::new(self.x.get(), self.y.get())
    }

    pub fn sync(&mut self) {
        let Some(node) = self.node else { return };
        let displacement = self.displacement();
        self.stage.lock().unwrap().set_translate(node, displacement);
    }
}

impl Drop for MagneticHandle {
    fn drop(&mut self) {
        // Leave the node at rest, not mid-displacement
        if let Some(node) = self.node {
            self.stage.lock().unwrap().set_translate(node, Vec2::ZERO);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::{Stage, VisualNode};
    use vitrine_animation::AnimationScheduler;
    use vitrine_core::Rect;
    use vitrine_scroll::TriggerRegistry;

    struct Fixture {
        scheduler: vitrine_animation::SharedScheduler,
        ctx: ChoreoContext,
    }

    fn fixture(motion: MotionPreference) -> Fixture {
        let scheduler = AnimationScheduler::shared();
        let handle = SchedulerHandle::new(&scheduler);
        let stage = Stage::shared();
        let triggers = Arc::new(Mutex::new(TriggerRegistry::with_viewport(800.0)));
        let ctx = ChoreoContext::new(stage, handle, triggers, motion);
        Fixture { scheduler, ctx }
    }

    impl Fixture {
        fn add_node(&self, label: &str, rect: Rect) -> NodeId {
            self.ctx
                .stage()
                .lock()
                .unwrap()
                .insert(VisualNode::new(label).with_bounds(rect))
        }

        fn scroll_to(&self, offset: f32) {
            self.ctx.triggers().lock().unwrap().process(offset);
        }

        fn run_frames(&self, seconds: f32) {
            let frames = (seconds / 0.016).ceil() as usize;
            for _ in 0..frames {
                self.scheduler.lock().unwrap().tick(0.016);
            }
        }

        fn opacity(&self, node: NodeId) -> f32 {
            self.ctx.stage().lock().unwrap().opacity(node).unwrap()
        }

        fn translate_y(&self, node: NodeId) -> f32 {
            self.ctx.stage().lock().unwrap().translate(node).unwrap().y
        }
    }

    #[test]
    fn test_reduced_motion_registers_nothing_and_touches_nothing() {
        let f = fixture(MotionPreference::Reduced);
        let node = f.add_node("header", Rect::new(0.0, 1200.0, 800.0, 100.0));

        assert!(f.ctx.reveal_on_scroll(node, RevealConfig::default()).is_none());
        assert!(f
            .ctx
            .staggered_reveal(&[node], StaggerRevealConfig::default())
            .is_none());
        assert!(f.ctx.entrance_timeline(EntranceConfig::default()).is_none());

        // Content stays at its visible rest pose
        assert_eq!(f.opacity(node), 1.0);
        assert_eq!(f.translate_y(node), 0.0);
        assert!(f.ctx.triggers().lock().unwrap().is_empty());
        assert_eq!(f.scheduler.lock().unwrap().active_count(), 0);
    }

    #[test]
    fn test_reveal_plays_once_and_never_rehides() {
        let f = fixture(MotionPreference::Full);
        let node = f.add_node("header", Rect::new(0.0, 1200.0, 800.0, 100.0));

        let mut reveal = f
            .ctx
            .reveal_on_scroll(node, RevealConfig::default())
            .unwrap();

        // Registration owns the hidden pose
        assert_eq!(f.opacity(node), 0.0);
        assert_eq!(f.translate_y(node), 40.0);
        assert_eq!(reveal.state(), Some(RevealState::Unrevealed));

        // Start offset: 1200 - 0.85 * 800 = 520
        f.scroll_to(500.0);
        reveal.sync();
        assert_eq!(f.opacity(node), 0.0);

        f.scroll_to(540.0);
        assert_eq!(reveal.state(), Some(RevealState::Revealing));
        f.run_frames(1.0);
        reveal.sync();
        assert_eq!(f.opacity(node), 1.0);
        assert_eq!(f.translate_y(node), 0.0);
        assert!(reveal.is_revealed());

        // Scrolling back up leaves it visible
        f.scroll_to(0.0);
        reveal.sync();
        assert_eq!(f.opacity(node), 1.0);
        assert!(reveal.is_revealed());
    }

    #[test]
    fn test_staggered_reveal_cascades_by_index() {
        let f = fixture(MotionPreference::Full);
        let items: Vec<NodeId> = (0..3)
            .map(|i| {
                f.add_node(
                    &format!("item-{i}"),
                    Rect::new(0.0, 1500.0 + i as f32 * 150.0, 600.0, 100.0),
                )
            })
            .collect();

        let mut reveal = f
            .ctx
            .staggered_reveal(
                &items,
                StaggerRevealConfig {
                    duration_s: 0.5,
                    stagger_s: 0.2,
                    ..Default::default()
                },
            )
            .unwrap();

        // Union bounds start at 1500; trigger at 1500 - 680 = 820
        f.scroll_to(900.0);
        f.run_frames(0.3);
        reveal.sync();

        let first = f.opacity(items[0]);
        let second = f.opacity(items[1]);
        let third = f.opacity(items[2]);
        assert!(first > second, "cascade order: {first} vs {second}");
        assert!(second > third, "cascade order: {second} vs {third}");

        f.run_frames(1.0);
        reveal.sync();
        for item in &items {
            assert_eq!(f.opacity(*item), 1.0);
            assert_eq!(f.translate_y(*item), 0.0);
        }
    }

    #[test]
    fn test_scrub_reveal_is_a_pure_function_of_offset() {
        let f = fixture(MotionPreference::Full);
        let node = f.add_node("banner", Rect::new(0.0, 1000.0, 800.0, 400.0));

        let mut reveal = f
            .ctx
            .reveal_on_scroll(
                node,
                RevealConfig {
                    scrub: true,
                    easing: Easing::Linear,
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(reveal.state().is_none());

        // Range: start 1000 - 680 = 320, end 1400 - 0 = 1400
        f.scroll_to(860.0);
        reveal.sync();
        let mid_down = f.opacity(node);
        assert!((mid_down - 0.5).abs() < 1e-3);

        // Same offset approached from beyond gives the same value
        f.scroll_to(1600.0);
        reveal.sync();
        assert_eq!(f.opacity(node), 1.0);
        f.scroll_to(860.0);
        reveal.sync();
        assert!((f.opacity(node) - mid_down).abs() < 1e-6);
        assert!((f.translate_y(node) - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_entrance_timeline_holds_for_its_delay() {
        let f = fixture(MotionPreference::Full);
        let timeline = f
            .ctx
            .entrance_timeline(EntranceConfig { delay_s: 0.2 })
            .unwrap();
        let entry = timeline
            .add_with_easing(0, 500, 40.0, 0.0, Easing::QuartOut)
            .unwrap();

        f.run_frames(0.1);
        assert_eq!(timeline.get(entry), Some(40.0));

        f.run_frames(1.0);
        assert_eq!(timeline.get(entry), Some(0.0));
        assert!(!timeline.is_playing());
    }

    #[test]
    fn test_magnetic_follows_and_returns_to_rest() {
        let f = fixture(MotionPreference::Full);
        let cta = f.add_node("cta", Rect::new(100.0, 100.0, 200.0, 50.0));
        let mut magnetic = f.ctx.magnetic_follow(cta, 0.3);
        assert!(!magnetic.is_inert());

        // Center is (200, 125); pointer 100 px right of center
        magnetic.pointer_move(Point::new(300.0, 125.0));
        assert!(magnetic.is_engaged());
        f.run_frames(1.0);
        magnetic.sync();
        let pulled = f.ctx.stage().lock().unwrap().translate(cta).unwrap();
        assert!((pulled.x - 30.0).abs() < 1.0, "pulled.x = {}", pulled.x);
        assert!(pulled.y.abs() < 1.0);

        magnetic.pointer_leave();
        assert!(!magnetic.is_engaged());
        f.run_frames(3.0);
        magnetic.sync();
        let rest = f.ctx.stage().lock().unwrap().translate(cta).unwrap();
        assert!(rest.x.abs() < 1.0, "rest.x = {}", rest.x);
    }

    #[test]
    fn test_magnetic_inert_under_reduced_motion() {
        let f = fixture(MotionPreference::Reduced);
        let cta = f.add_node("cta", Rect::new(100.0, 100.0, 200.0, 50.0));
        let mut magnetic = f.ctx.magnetic_follow(cta, 0.3);
        assert!(magnetic.is_inert());

        magnetic.pointer_move(Point::new(300.0, 125.0));
        magnetic.sync();
        assert_eq!(
            f.ctx.stage().lock().unwrap().translate(cta).unwrap(),
            Vec2::ZERO
        );
        assert_eq!(f.scheduler.lock().unwrap().active_count(), 0);
    }

    #[test]
    fn test_dropping_reveal_releases_its_trigger() {
        let f = fixture(MotionPreference::Full);
        let node = f.add_node("header", Rect::new(0.0, 1200.0, 800.0, 100.0));

        let reveal = f.ctx.reveal_on_scroll(node, RevealConfig::default());
        assert_eq!(f.ctx.triggers().lock().unwrap().len(), 1);
        drop(reveal);
        assert!(f.ctx.triggers().lock().unwrap().is_empty());
    }
}
