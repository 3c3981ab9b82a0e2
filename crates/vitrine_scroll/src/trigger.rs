//! Scroll-position triggers
//!
//! A [`ScrollTrigger`] watches one element's passage through the viewport
//! and fires callbacks as the scroll offset crosses its range. The range
//! is described by two [`TriggerPoint`]s ("element top meets 85% down the
//! viewport") and resolved into scroll offsets against the element's
//! document-space bounds, so all per-frame work is two comparisons.
//!
//! Scrubbed triggers also report a clamped progress fraction through the
//! range on every change, including the exact `0.0`/`1.0` values when the
//! offset crosses out of the range, so scrubbed properties always land on
//! their endpoints.
//!
//! The registry processes triggers in registration order. Callbacks run
//! while the registry is borrowed and must not register or remove
//! triggers themselves; hand that to the owner of the handle instead.
//!
//! Horizontally scrubbed content uses the same machinery: a track owns
//! its own registry whose "viewport" is the container width and whose
//! offset is the track translation.

use std::sync::{Arc, Mutex, Weak};

use slotmap::{new_key_type, SlotMap};

use vitrine_core::{scrub_events, ScrubState, StateTransitions};

new_key_type! {
    /// Identifies a trigger in a registry
    pub struct TriggerId;
}

pub type TriggerCallback = Box<dyn FnMut() + Send>;
pub type ProgressCallback = Box<dyn FnMut(f32) + Send>;

/// One edge of a trigger range: a fraction of the watched element lined
/// up against a fraction of the viewport
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerPoint {
    /// Fraction of the element (0.0 = top edge, 1.0 = bottom edge)
    pub element: f32,
    /// Fraction of the viewport (0.0 = top, 1.0 = bottom)
    pub viewport: f32,
}

impl TriggerPoint {
    pub const fn new(element: f32, viewport: f32) -> Self {
        Self { element, viewport }
    }

    /// Element top edge against a viewport fraction ("top 85%")
    pub const fn top(viewport: f32) -> Self {
        Self::new(0.0, viewport)
    }

    /// Element bottom edge against a viewport fraction ("bottom 40%")
    pub const fn bottom(viewport: f32) -> Self {
        Self::new(1.0, viewport)
    }

    /// Element center against the viewport center
    pub const fn center() -> Self {
        Self::new(0.5, 0.5)
    }
}

/// Document-space bounds of a watched element
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TargetBounds {
    /// Offset of the element's top from the document top
    pub top: f32,
    /// Element extent along the scroll axis
    pub height: f32,
}

impl TargetBounds {
    pub const fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }
}

#[derive(Default)]
struct TriggerCallbacks {
    on_enter: Option<TriggerCallback>,
    on_leave: Option<TriggerCallback>,
    on_enter_back: Option<TriggerCallback>,
    on_leave_back: Option<TriggerCallback>,
    on_update: Option<ProgressCallback>,
}

#[derive(Clone, Copy, PartialEq)]
enum RangePosition {
    Before,
    In,
    After,
}

/// A single scroll-watching trigger
pub struct ScrollTrigger {
    start: TriggerPoint,
    end: TriggerPoint,
    once: bool,
    scrub: bool,
    bounds: TargetBounds,
    callbacks: TriggerCallbacks,
    // Resolved against the viewport on registration and refresh
    start_offset: f32,
    end_offset: f32,
    state: ScrubState,
    last_progress: Option<f32>,
    spent: bool,
}

impl ScrollTrigger {
    pub fn builder() -> TriggerBuilder {
        TriggerBuilder::new()
    }

    fn recompute_offsets(&mut self, viewport_extent: f32) {
        self.start_offset = self.bounds.top + self.start.element * self.bounds.height
            - self.start.viewport * viewport_extent;
        self.end_offset = self.bounds.top + self.end.element * self.bounds.height
            - self.end.viewport * viewport_extent;
    }

    fn raw_progress(&self, offset: f32) -> f32 {
        let span = self.end_offset - self.start_offset;
        if span > 0.0 {
            (offset - self.start_offset) / span
        } else if offset >= self.start_offset {
            // Degenerate range: crossing it is instantaneous
            2.0
        } else {
            -1.0
        }
    }

    fn process(&mut self, offset: f32) {
        if self.spent {
            return;
        }

        let raw = self.raw_progress(offset);
        let position = if raw < 0.0 {
            RangePosition::Before
        } else if raw > 1.0 {
            RangePosition::After
        } else {
            RangePosition::In
        };

        use scrub_events::{ENTER_BACKWARD, ENTER_FORWARD, LEAVE_BACKWARD, LEAVE_FORWARD};
        match (self.state, position) {
            (ScrubState::BeforeRange, RangePosition::In) => {
                self.fire(Hook::Enter);
                self.transition(ENTER_FORWARD);
            }
            (ScrubState::BeforeRange, RangePosition::After) => {
                // The whole range passed in one step
                self.fire(Hook::Enter);
                self.fire(Hook::Leave);
                self.transition(LEAVE_FORWARD);
            }
            (ScrubState::InRange, RangePosition::After) => {
                self.fire(Hook::Leave);
                self.transition(LEAVE_FORWARD);
            }
            (ScrubState::InRange, RangePosition::Before) => {
                self.fire(Hook::LeaveBack);
                self.transition(LEAVE_BACKWARD);
            }
            (ScrubState::AfterRange, RangePosition::In) => {
                self.fire(Hook::EnterBack);
                self.transition(ENTER_BACKWARD);
            }
            (ScrubState::AfterRange, RangePosition::Before) => {
                self.fire(Hook::EnterBack);
                self.fire(Hook::LeaveBack);
                self.transition(LEAVE_BACKWARD);
            }
            _ => {}
        }

        // Progress updates land on the exact 0.0/1.0 endpoint when the
        // offset crosses out of range; the dedupe makes resting outside
        // the range free
        let clamped = raw.clamp(0.0, 1.0);
        if self.last_progress != Some(clamped) {
            self.last_progress = Some(clamped);
            if self.scrub {
                if let Some(cb) = self.callbacks.on_update.as_mut() {
                    cb(clamped);
                }
            }
        }

        if self.once && self.state != ScrubState::BeforeRange {
            // One-shots retire after their first entry
            self.spent = true;
        }
    }

    fn fire(&mut self, hook: Hook) {
        let slot = match hook {
            Hook::Enter => &mut self.callbacks.on_enter,
            Hook::Leave => &mut self.callbacks.on_leave,
            Hook::EnterBack => &mut self.callbacks.on_enter_back,
            Hook::LeaveBack => &mut self.callbacks.on_leave_back,
        };
        if let Some(cb) = slot.as_mut() {
            cb();
        }
    }

    fn transition(&mut self, event: u32) {
        if let Some(next) = self.state.on_event(event) {
            self.state = next;
        }
    }
}

#[derive(Clone, Copy)]
enum Hook {
    Enter,
    Leave,
    EnterBack,
    LeaveBack,
}

/// Builder for [`ScrollTrigger`]
///
/// Defaults watch an element's full passage: start when its top enters
/// the viewport bottom, end when its bottom leaves the viewport top.
pub struct TriggerBuilder {
    start: TriggerPoint,
    end: TriggerPoint,
    once: bool,
    scrub: bool,
    bounds: TargetBounds,
    callbacks: TriggerCallbacks,
}

impl Default for TriggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TriggerBuilder {
    pub fn new() -> Self {
        Self {
            start: TriggerPoint::top(1.0),
            end: TriggerPoint::bottom(0.0),
            once: false,
            scrub: false,
            bounds: TargetBounds::default(),
            callbacks: TriggerCallbacks::default(),
        }
    }

    pub fn start(mut self, point: TriggerPoint) -> Self {
        self.start = point;
        self
    }

    pub fn end(mut self, point: TriggerPoint) -> Self {
        self.end = point;
        self
    }

    pub fn bounds(mut self, bounds: TargetBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Retire after the first entry; scrolling back never re-fires
    pub fn once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    /// Report progress through the range on every change
    pub fn scrub(mut self, scrub: bool) -> Self {
        self.scrub = scrub;
        self
    }

    pub fn on_enter<F: FnMut() + Send + 'static>(mut self, f: F) -> Self {
        self.callbacks.on_enter = Some(Box::new(f));
        self
    }

    pub fn on_leave<F: FnMut() + Send + 'static>(mut self, f: F) -> Self {
        self.callbacks.on_leave = Some(Box::new(f));
        self
    }

    pub fn on_enter_back<F: FnMut() + Send + 'static>(mut self, f: F) -> Self {
        self.callbacks.on_enter_back = Some(Box::new(f));
        self
    }

    pub fn on_leave_back<F: FnMut() + Send + 'static>(mut self, f: F) -> Self {
        self.callbacks.on_leave_back = Some(Box::new(f));
        self
    }

    pub fn on_update<F: FnMut(f32) + Send + 'static>(mut self, f: F) -> Self {
        self.callbacks.on_update = Some(Box::new(f));
        self
    }

    pub fn build(self) -> ScrollTrigger {
        ScrollTrigger {
            start: self.start,
            end: self.end,
            once: self.once,
            scrub: self.scrub,
            bounds: self.bounds,
            callbacks: self.callbacks,
            start_offset: 0.0,
            end_offset: 0.0,
            state: ScrubState::BeforeRange,
            last_progress: None,
            spent: false,
        }
    }

    /// Build and register in one step, returning an unregistering handle
    pub fn register(self, registry: &SharedTriggerRegistry) -> TriggerHandle {
        let id = registry.lock().unwrap().register(self.build());
        TriggerHandle::new(registry, id)
    }
}

/// All triggers watching one scroll axis
pub struct TriggerRegistry {
    triggers: SlotMap<TriggerId, ScrollTrigger>,
    order: Vec<TriggerId>,
    viewport_extent: f32,
}

impl Default for TriggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TriggerRegistry {
    pub fn new() -> Self {
        Self {
            triggers: SlotMap::with_key(),
            order: Vec::new(),
            viewport_extent: 0.0,
        }
    }

    pub fn with_viewport(extent: f32) -> Self {
        let mut registry = Self::new();
        registry.viewport_extent = extent;
        registry
    }

    pub fn shared() -> SharedTriggerRegistry {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Update the viewport extent; call [`refresh`](Self::refresh) after
    pub fn set_viewport_extent(&mut self, extent: f32) {
        self.viewport_extent = extent;
    }

    pub fn viewport_extent(&self) -> f32 {
        self.viewport_extent
    }

    pub fn register(&mut self, mut trigger: ScrollTrigger) -> TriggerId {
        trigger.recompute_offsets(self.viewport_extent);
        let id = self.triggers.insert(trigger);
        self.order.push(id);
        tracing::trace!(?id, "trigger registered");
        id
    }

    pub fn remove(&mut self, id: TriggerId) -> bool {
        let removed = self.triggers.remove(id).is_some();
        if removed {
            self.order.retain(|t| *t != id);
        }
        removed
    }

    /// Replace a trigger's element bounds (after relayout)
    pub fn update_bounds(&mut self, id: TriggerId, bounds: TargetBounds) -> bool {
        let viewport = self.viewport_extent;
        match self.triggers.get_mut(id) {
            Some(trigger) => {
                trigger.bounds = bounds;
                trigger.recompute_offsets(viewport);
                true
            }
            None => false,
        }
    }

    /// Recompute every trigger's range against the current viewport
    pub fn refresh(&mut self) {
        let viewport = self.viewport_extent;
        for (_, trigger) in self.triggers.iter_mut() {
            trigger.recompute_offsets(viewport);
        }
        tracing::debug!(count = self.triggers.len(), "trigger ranges refreshed");
    }

    /// Evaluate every trigger against a new scroll offset
    pub fn process(&mut self, offset: f32) {
        for i in 0..self.order.len() {
            let id = self.order[i];
            if let Some(trigger) = self.triggers.get_mut(id) {
                trigger.process(offset);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    pub fn state(&self, id: TriggerId) -> Option<ScrubState> {
        self.triggers.get(id).map(|t| t.state)
    }

    /// Last clamped progress the trigger saw
    pub fn progress(&self, id: TriggerId) -> Option<f32> {
        self.triggers.get(id).and_then(|t| t.last_progress)
    }

    pub fn is_spent(&self, id: TriggerId) -> Option<bool> {
        self.triggers.get(id).map(|t| t.spent)
    }
}

/// Shared registry handle for one scroll axis
pub type SharedTriggerRegistry = Arc<Mutex<TriggerRegistry>>;

/// RAII registration: dropping the handle removes the trigger
pub struct TriggerHandle {
    registry: Weak<Mutex<TriggerRegistry>>,
    id: TriggerId,
}

impl TriggerHandle {
    pub fn new(registry: &SharedTriggerRegistry, id: TriggerId) -> Self {
        Self {
            registry: Arc::downgrade(registry),
            id,
        }
    }

    pub fn id(&self) -> TriggerId {
        self.id
    }

    fn with<F, R>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut TriggerRegistry) -> R,
    {
        let registry = self.registry.upgrade()?;
        let mut guard = registry.lock().unwrap();
        Some(f(&mut guard))
    }

    pub fn state(&self) -> Option<ScrubState> {
        self.with(|r| r.state(self.id)).flatten()
    }

    pub fn progress(&self) -> Option<f32> {
        self.with(|r| r.progress(self.id)).flatten()
    }

    pub fn is_spent(&self) -> bool {
        self.with(|r| r.is_spent(self.id)).flatten().unwrap_or(true)
    }

    pub fn update_bounds(&self, bounds: TargetBounds) -> bool {
        self.with(|r| r.update_bounds(self.id, bounds))
            .unwrap_or(false)
    }

    pub fn is_alive(&self) -> bool {
        self.with(|r| r.state(self.id).is_some()).unwrap_or(false)
    }
}

impl Drop for TriggerHandle {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.lock().unwrap().remove(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type EventLog = Arc<Mutex<Vec<String>>>;

    fn logging_trigger(log: &EventLog) -> TriggerBuilder {
        let push = |log: &EventLog, tag: &'static str| {
            let log = Arc::clone(log);
            move || log.lock().unwrap().push(tag.to_string())
        };
        ScrollTrigger::builder()
            .on_enter(push(log, "enter"))
            .on_leave(push(log, "leave"))
            .on_enter_back(push(log, "enter_back"))
            .on_leave_back(push(log, "leave_back"))
    }

    /// Section at 1000..1500 in an 800px viewport, watched from
    /// "top 85%" to "bottom 40%"
    fn section_trigger(log: &EventLog) -> ScrollTrigger {
        logging_trigger(log)
            .start(TriggerPoint::top(0.85))
            .end(TriggerPoint::bottom(0.40))
            .bounds(TargetBounds::new(1000.0, 500.0))
            .build()
    }

    #[test]
    fn test_range_resolution() {
        let log: EventLog = Arc::new(Mutex::new(Vec::new()));
        let mut registry = TriggerRegistry::with_viewport(800.0);
        let id = registry.register(section_trigger(&log));

        // start = 1000 - 0.85*800 = 320, end = 1500 - 0.40*800 = 1180
        registry.process(319.0);
        assert_eq!(registry.state(id), Some(ScrubState::BeforeRange));
        registry.process(320.0);
        assert_eq!(registry.state(id), Some(ScrubState::InRange));
        registry.process(1181.0);
        assert_eq!(registry.state(id), Some(ScrubState::AfterRange));
    }

    #[test]
    fn test_directional_callbacks() {
        let log: EventLog = Arc::new(Mutex::new(Vec::new()));
        let mut registry = TriggerRegistry::with_viewport(800.0);
        registry.register(section_trigger(&log));

        registry.process(0.0);
        registry.process(500.0); // enter
        registry.process(1300.0); // leave
        registry.process(900.0); // enter_back
        registry.process(100.0); // leave_back

        assert_eq!(
            *log.lock().unwrap(),
            vec!["enter", "leave", "enter_back", "leave_back"]
        );
    }

    #[test]
    fn test_jump_across_fires_both_in_order() {
        let log: EventLog = Arc::new(Mutex::new(Vec::new()));
        let mut registry = TriggerRegistry::with_viewport(800.0);
        let id = registry.register(section_trigger(&log));

        registry.process(0.0);
        registry.process(5000.0);
        assert_eq!(*log.lock().unwrap(), vec!["enter", "leave"]);
        assert_eq!(registry.state(id), Some(ScrubState::AfterRange));

        registry.process(0.0);
        assert_eq!(
            *log.lock().unwrap(),
            vec!["enter", "leave", "enter_back", "leave_back"]
        );
    }

    #[test]
    fn test_scrub_updates_land_on_endpoints() {
        let updates: Arc<Mutex<Vec<f32>>> = Arc::new(Mutex::new(Vec::new()));
        let mut registry = TriggerRegistry::with_viewport(800.0);
        registry.register({
            let updates = Arc::clone(&updates);
            ScrollTrigger::builder()
                .start(TriggerPoint::top(0.85))
                .end(TriggerPoint::bottom(0.40))
                .bounds(TargetBounds::new(1000.0, 500.0))
                .scrub(true)
                .on_update(move |p| updates.lock().unwrap().push(p))
                .build()
        });

        registry.process(0.0); // before range: 0.0
        registry.process(750.0); // in range: 0.5
        registry.process(3000.0); // past the end: exactly 1.0
        registry.process(3500.0); // still past: deduped, no new update
        registry.process(100.0); // back before the start: exactly 0.0

        let seen = updates.lock().unwrap();
        assert_eq!(seen.len(), 4);
        assert_eq!(seen[0], 0.0);
        assert!((seen[1] - 0.5).abs() < 1e-3);
        assert_eq!(seen[2], 1.0);
        assert_eq!(seen[3], 0.0);
    }

    #[test]
    fn test_once_retires_after_first_entry() {
        let log: EventLog = Arc::new(Mutex::new(Vec::new()));
        let mut registry = TriggerRegistry::with_viewport(800.0);
        let id = registry.register(
            logging_trigger(&log)
                .start(TriggerPoint::top(0.85))
                .bounds(TargetBounds::new(1000.0, 500.0))
                .once(true)
                .build(),
        );

        registry.process(500.0);
        assert_eq!(registry.is_spent(id), Some(true));

        // Scrolling away and back re-fires nothing
        registry.process(0.0);
        registry.process(500.0);
        assert_eq!(*log.lock().unwrap(), vec!["enter"]);
    }

    #[test]
    fn test_refresh_moves_the_band() {
        let log: EventLog = Arc::new(Mutex::new(Vec::new()));
        let mut registry = TriggerRegistry::with_viewport(800.0);
        let id = registry.register(section_trigger(&log));

        // start band at 320 under the 800px viewport
        registry.process(330.0);
        assert_eq!(registry.state(id), Some(ScrubState::InRange));

        // Taller viewport moves the band earlier: start = 1000 - 0.85*1200 = -20
        registry.set_viewport_extent(1200.0);
        registry.refresh();
        registry.process(0.0);
        assert_eq!(registry.state(id), Some(ScrubState::InRange));
    }

    #[test]
    fn test_update_bounds_recomputes() {
        let log: EventLog = Arc::new(Mutex::new(Vec::new()));
        let mut registry = TriggerRegistry::with_viewport(800.0);
        let id = registry.register(section_trigger(&log));

        // Element moved down the page; the old band no longer applies
        registry.update_bounds(id, TargetBounds::new(3000.0, 500.0));
        registry.process(330.0);
        assert_eq!(registry.state(id), Some(ScrubState::BeforeRange));
        registry.process(2400.0); // start = 3000 - 680 = 2320
        assert_eq!(registry.state(id), Some(ScrubState::InRange));
    }

    #[test]
    fn test_handle_drop_unregisters() {
        let registry = TriggerRegistry::shared();
        registry.lock().unwrap().set_viewport_extent(800.0);

        let handle = ScrollTrigger::builder()
            .bounds(TargetBounds::new(1000.0, 500.0))
            .register(&registry);
        assert_eq!(registry.lock().unwrap().len(), 1);
        assert!(handle.is_alive());

        drop(handle);
        assert_eq!(registry.lock().unwrap().len(), 0);
    }

    #[test]
    fn test_default_range_is_full_passage() {
        let builder = TriggerBuilder::new();
        assert_eq!(builder.start, TriggerPoint::top(1.0));
        assert_eq!(builder.end, TriggerPoint::bottom(0.0));
    }
}
