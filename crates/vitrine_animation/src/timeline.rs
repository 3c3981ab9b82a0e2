//! Timeline orchestration
//!
//! A [`Timeline`] sequences multiple scalar tweens on one clock. Entries
//! are placed sequentially, at absolute offsets, or relative to the
//! current end (negative offsets overlap the previous tween, the staple
//! of entrance choreography: title, then subtitle 400 ms before the title
//! finishes, and so on).
//!
//! Entries are never removed individually; a timeline is dropped whole.
//! [`StaggerBuilder`] fans one tween out across many entries with
//! per-index delays.

use crate::easing::Easing;
use smallvec::SmallVec;

/// Identifies one tween within a timeline
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimelineEntryId(usize);

/// Where a new entry lands on the timeline
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum TimelinePosition {
    /// At the current end of the timeline (sequential)
    #[default]
    End,
    /// At an absolute offset from the start, in milliseconds
    At(f32),
    /// Offset from the current end, in milliseconds; negative overlaps
    /// the previous entry
    FromEnd(f32),
}

#[derive(Clone, Copy, Debug)]
struct TimelineEntry {
    start_ms: f32,
    duration_ms: f32,
    from: f32,
    to: f32,
    easing: Easing,
}

impl TimelineEntry {
    fn end_ms(&self) -> f32 {
        self.start_ms + self.duration_ms
    }

    /// Value at timeline time `t_ms`, filling both directions
    fn value_at(&self, t_ms: f32) -> f32 {
        if t_ms <= self.start_ms {
            return self.from;
        }
        if t_ms >= self.end_ms() || self.duration_ms <= 0.0 {
            return self.to;
        }
        let local = (t_ms - self.start_ms) / self.duration_ms;
        self.from + (self.to - self.from) * self.easing.apply(local)
    }

    fn progress_at(&self, t_ms: f32) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((t_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
    }
}

/// A set of scalar tweens sequenced on one clock
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    entries: SmallVec<[TimelineEntry; 8]>,
    elapsed_ms: f32,
    playing: bool,
    delay_ms: f32,
    delay_remaining_ms: f32,
    /// Number of loops; -1 means infinite
    loop_count: i32,
    completed_loops: i32,
    alternate: bool,
    reversed: bool,
    playback_rate: f32,
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
            elapsed_ms: 0.0,
            playing: false,
            delay_ms: 0.0,
            delay_remaining_ms: 0.0,
            loop_count: 1,
            completed_loops: 0,
            alternate: false,
            reversed: false,
            playback_rate: 1.0,
        }
    }

    /// Add a tween at an absolute offset (milliseconds)
    ///
    /// Returns an entry ID for reading the value back later.
    pub fn add(
        &mut self,
        offset_ms: i32,
        duration_ms: u32,
        start_value: f32,
        end_value: f32,
    ) -> TimelineEntryId {
        self.add_with_easing(offset_ms, duration_ms, start_value, end_value, Easing::Linear)
    }

    /// Add a tween at an absolute offset with a specific easing
    pub fn add_with_easing(
        &mut self,
        offset_ms: i32,
        duration_ms: u32,
        start_value: f32,
        end_value: f32,
        easing: Easing,
    ) -> TimelineEntryId {
        self.add_at(
            TimelinePosition::At(offset_ms.max(0) as f32),
            duration_ms,
            start_value,
            end_value,
            easing,
        )
    }

    /// Add a tween at a [`TimelinePosition`]
    pub fn add_at(
        &mut self,
        position: TimelinePosition,
        duration_ms: u32,
        from: f32,
        to: f32,
        easing: Easing,
    ) -> TimelineEntryId {
        let start_ms = self.resolve_position(position);
        let id = TimelineEntryId(self.entries.len());
        self.entries.push(TimelineEntry {
            start_ms,
            duration_ms: duration_ms as f32,
            from,
            to,
            easing,
        });
        id
    }

    /// Resolve a position against the current content duration
    pub fn resolve_position(&self, position: TimelinePosition) -> f32 {
        match position {
            TimelinePosition::End => self.duration_ms(),
            TimelinePosition::At(ms) => ms.max(0.0),
            TimelinePosition::FromEnd(ms) => (self.duration_ms() + ms).max(0.0),
        }
    }

    /// Content duration: the end of the latest entry (delay excluded)
    pub fn duration_ms(&self) -> f32 {
        self.entries
            .iter()
            .map(|e| e.end_ms())
            .fold(0.0, f32::max)
    }

    /// Delay before the first loop begins
    pub fn set_delay(&mut self, delay_ms: f32) {
        self.delay_ms = delay_ms.max(0.0);
    }

    /// Loop count; -1 loops forever (each direction leg counts once)
    pub fn set_loop(&mut self, count: i32) {
        self.loop_count = count;
    }

    /// Reflect at the ends instead of snapping back to the start
    pub fn set_alternate(&mut self, alternate: bool) {
        self.alternate = alternate;
    }

    /// Playback rate (1.0 = normal speed, 2.0 = double speed)
    pub fn set_playback_rate(&mut self, rate: f32) {
        self.playback_rate = rate.max(0.0);
    }

    /// Start from the beginning, including the delay
    pub fn start(&mut self) {
        self.elapsed_ms = 0.0;
        self.delay_remaining_ms = self.delay_ms;
        self.completed_loops = 0;
        self.reversed = false;
        self.playing = true;
    }

    /// Halt playback, holding the current values
    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// Pause playback; `resume` continues from the same time
    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn resume(&mut self) {
        self.playing = true;
    }

    /// Flip the playback direction from the current time
    pub fn reverse(&mut self) {
        self.reversed = !self.reversed;
        self.playing = true;
    }

    /// Jump to a time position (milliseconds into the content)
    pub fn seek(&mut self, time_ms: f32) {
        self.delay_remaining_ms = 0.0;
        self.elapsed_ms = time_ms.clamp(0.0, self.duration_ms());
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Overall progress through the content (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        let total = self.duration_ms();
        if total <= 0.0 {
            return 0.0;
        }
        (self.elapsed_ms / total).clamp(0.0, 1.0)
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn entry_ids(&self) -> Vec<TimelineEntryId> {
        (0..self.entries.len()).map(TimelineEntryId).collect()
    }

    /// Current value of an entry, honoring backward and forward fill
    pub fn value(&self, id: TimelineEntryId) -> Option<f32> {
        self.entries.get(id.0).map(|e| e.value_at(self.elapsed_ms))
    }

    /// Progress of a single entry (0.0 to 1.0)
    pub fn entry_progress(&self, id: TimelineEntryId) -> Option<f32> {
        self.entries
            .get(id.0)
            .map(|e| e.progress_at(self.elapsed_ms))
    }

    /// Advance the clock by `dt_ms`
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.playing {
            return;
        }

        let mut dt = dt_ms * self.playback_rate;
        if self.delay_remaining_ms > 0.0 {
            if dt < self.delay_remaining_ms {
                self.delay_remaining_ms -= dt;
                return;
            }
            dt -= self.delay_remaining_ms;
            self.delay_remaining_ms = 0.0;
        }

        let total = self.duration_ms();
        if total <= 0.0 {
            self.playing = false;
            return;
        }

        if self.reversed {
            self.elapsed_ms -= dt;
        } else {
            self.elapsed_ms += dt;
        }

        // Handle however many boundaries the step crossed
        loop {
            if !self.reversed && self.elapsed_ms >= total {
                let over = self.elapsed_ms - total;
                self.completed_loops += 1;
                if self.loop_count >= 0 && self.completed_loops >= self.loop_count {
                    self.elapsed_ms = total;
                    self.playing = false;
                    return;
                }
                if self.alternate {
                    self.reversed = true;
                    self.elapsed_ms = total - over;
                } else {
                    self.elapsed_ms = over;
                }
            } else if self.reversed && self.elapsed_ms <= 0.0 {
                let over = -self.elapsed_ms;
                self.completed_loops += 1;
                if !self.alternate
                    || (self.loop_count >= 0 && self.completed_loops >= self.loop_count)
                {
                    self.elapsed_ms = 0.0;
                    self.playing = false;
                    return;
                }
                self.reversed = false;
                self.elapsed_ms = over;
            } else {
                return;
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Stagger
// ─────────────────────────────────────────────────────────────────────────────

/// Order in which staggered items begin
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StaggerDirection {
    /// First item first
    #[default]
    Forward,
    /// Last item first
    Reverse,
    /// Middle items first, rippling outward
    FromCenter,
}

/// Fans one tween across many timeline entries with per-index delays
#[derive(Clone, Copy, Debug)]
pub struct StaggerBuilder {
    count: usize,
    each_ms: f32,
    direction: StaggerDirection,
    limit: Option<usize>,
}

impl StaggerBuilder {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            each_ms: 100.0,
            direction: StaggerDirection::Forward,
            limit: None,
        }
    }

    /// Delay between consecutive items, in milliseconds
    pub fn each_ms(mut self, ms: f32) -> Self {
        self.each_ms = ms;
        self
    }

    pub fn direction(mut self, direction: StaggerDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Last item first
    pub fn reverse(mut self) -> Self {
        self.direction = StaggerDirection::Reverse;
        self
    }

    /// Middle items first, rippling outward
    pub fn from_center(mut self) -> Self {
        self.direction = StaggerDirection::FromCenter;
        self
    }

    /// Cap the delay multiplier; items past the cap start together
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit.max(1));
        self
    }

    /// Delay for one item, in milliseconds
    pub fn delay_for_index(&self, index: usize) -> f32 {
        if self.count == 0 {
            return 0.0;
        }
        let steps = match self.direction {
            StaggerDirection::Forward => index,
            StaggerDirection::Reverse => self.count - 1 - index.min(self.count - 1),
            StaggerDirection::FromCenter => {
                let center = (self.count - 1) as f32 / 2.0;
                (index as f32 - center).abs().round() as usize
            }
        };
        let steps = match self.limit {
            Some(limit) => steps.min(limit - 1),
            None => steps,
        };
        steps as f32 * self.each_ms
    }

    /// Push `count` entries onto a timeline, all sharing one tween shape
    pub fn push_onto(
        &self,
        timeline: &mut Timeline,
        base: TimelinePosition,
        duration_ms: u32,
        from: f32,
        to: f32,
        easing: Easing,
    ) -> Vec<TimelineEntryId> {
        let base_ms = timeline.resolve_position(base);
        (0..self.count)
            .map(|i| {
                let start = base_ms + self.delay_for_index(i);
                timeline.add_at(TimelinePosition::At(start), duration_ms, from, to, easing)
            })
            .collect()
    }
}

/// Push entries with explicit per-index delays (randomized staggers)
pub fn push_with_delays(
    timeline: &mut Timeline,
    base: TimelinePosition,
    delays_ms: &[f32],
    duration_ms: u32,
    from: f32,
    to: f32,
    easing: Easing,
) -> Vec<TimelineEntryId> {
    let base_ms = timeline.resolve_position(base);
    delays_ms
        .iter()
        .map(|delay| {
            timeline.add_at(
                TimelinePosition::At(base_ms + delay.max(0.0)),
                duration_ms,
                from,
                to,
                easing,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_and_overlapping_positions() {
        let mut tl = Timeline::new();
        // Entrance shape: 800ms lead, then three tweens each overlapping
        // the previous by a fixed amount
        let title = tl.add_at(TimelinePosition::End, 800, 0.0, 1.0, Easing::Linear);
        let subtitle = tl.add_at(TimelinePosition::FromEnd(-400.0), 800, 0.0, 1.0, Easing::Linear);
        let cta = tl.add_at(TimelinePosition::FromEnd(-300.0), 800, 0.0, 1.0, Easing::Linear);

        assert_eq!(tl.duration_ms(), 1700.0);

        tl.start();
        tl.tick(600.0);
        // Title 75% in, subtitle 25% in, CTA not yet started
        assert!((tl.value(title).unwrap() - 0.75).abs() < 1e-3);
        assert!((tl.value(subtitle).unwrap() - 0.25).abs() < 1e-3);
        assert_eq!(tl.value(cta).unwrap(), 0.0);
    }

    #[test]
    fn test_backward_and_forward_fill() {
        let mut tl = Timeline::new();
        let e = tl.add_at(TimelinePosition::At(500.0), 500, 40.0, 0.0, Easing::Linear);

        // Before start: holds `from`
        assert_eq!(tl.value(e).unwrap(), 40.0);

        tl.start();
        tl.tick(2000.0);
        // After end: holds `to`
        assert_eq!(tl.value(e).unwrap(), 0.0);
        assert!(!tl.is_playing());
    }

    #[test]
    fn test_delay_holds_initial_values() {
        let mut tl = Timeline::new();
        let e = tl.add(0, 1000, 0.0, 100.0);
        tl.set_delay(300.0);
        tl.start();

        tl.tick(200.0);
        assert_eq!(tl.value(e).unwrap(), 0.0);
        assert!(tl.is_playing());

        tl.tick(600.0);
        // 500ms into content after the delay boundary
        assert!((tl.value(e).unwrap() - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_loop_wraps() {
        let mut tl = Timeline::new();
        let e = tl.add(0, 1000, 0.0, 100.0);
        tl.set_loop(-1);
        tl.start();

        tl.tick(2500.0);
        assert!(tl.is_playing());
        assert!((tl.value(e).unwrap() - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_alternate_reflects() {
        let mut tl = Timeline::new();
        let e = tl.add(0, 1000, 0.0, 100.0);
        tl.set_loop(-1);
        tl.set_alternate(true);
        tl.start();

        // 1250ms: reflected, descending, 750ms position
        tl.tick(1250.0);
        assert!((tl.value(e).unwrap() - 75.0).abs() < 1e-3);
        tl.tick(500.0);
        assert!((tl.value(e).unwrap() - 25.0).abs() < 1e-3);
    }

    #[test]
    fn test_reverse_returns_to_start_and_stops() {
        let mut tl = Timeline::new();
        let e = tl.add(0, 1000, 0.0, 100.0);
        tl.start();
        tl.tick(600.0);
        assert!((tl.value(e).unwrap() - 60.0).abs() < 1e-3);

        tl.reverse();
        tl.tick(700.0);
        assert_eq!(tl.value(e).unwrap(), 0.0);
        assert!(!tl.is_playing());
    }

    #[test]
    fn test_seek_is_deterministic() {
        let mut tl = Timeline::new();
        let e = tl.add_with_easing(0, 1000, 0.0, 100.0, Easing::CubicInOut);

        tl.seek(600.0);
        let a = tl.value(e).unwrap();
        tl.seek(100.0);
        tl.seek(600.0);
        let b = tl.value(e).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_playback_rate() {
        let mut tl = Timeline::new();
        let e = tl.add(0, 1000, 0.0, 100.0);
        tl.set_playback_rate(2.0);
        tl.start();
        tl.tick(250.0);
        assert!((tl.value(e).unwrap() - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_stagger_delays() {
        let forward = StaggerBuilder::new(4).each_ms(150.0);
        assert_eq!(forward.delay_for_index(0), 0.0);
        assert_eq!(forward.delay_for_index(3), 450.0);

        let reverse = StaggerBuilder::new(4).each_ms(150.0).reverse();
        assert_eq!(reverse.delay_for_index(0), 450.0);
        assert_eq!(reverse.delay_for_index(3), 0.0);

        let center = StaggerBuilder::new(5).each_ms(100.0).from_center();
        assert_eq!(center.delay_for_index(2), 0.0);
        assert_eq!(center.delay_for_index(0), 200.0);
        assert_eq!(center.delay_for_index(4), 200.0);

        let limited = StaggerBuilder::new(10).each_ms(100.0).limit(3);
        assert_eq!(limited.delay_for_index(9), 200.0);
    }

    #[test]
    fn test_stagger_push_onto() {
        let mut tl = Timeline::new();
        let ids = StaggerBuilder::new(3).each_ms(100.0).push_onto(
            &mut tl,
            TimelinePosition::At(0.0),
            500,
            30.0,
            0.0,
            Easing::Linear,
        );
        assert_eq!(ids.len(), 3);
        assert_eq!(tl.duration_ms(), 700.0);

        tl.start();
        tl.tick(100.0);
        // First item 20% through, second just starting, third waiting
        assert!((tl.value(ids[0]).unwrap() - 24.0).abs() < 1e-3);
        assert_eq!(tl.value(ids[1]).unwrap(), 30.0);
        assert_eq!(tl.value(ids[2]).unwrap(), 30.0);
    }

    #[test]
    fn test_push_with_explicit_delays() {
        let mut tl = Timeline::new();
        let ids = push_with_delays(
            &mut tl,
            TimelinePosition::At(0.0),
            &[300.0, 0.0, 150.0],
            400,
            0.0,
            1.0,
            Easing::Linear,
        );
        tl.start();
        tl.tick(200.0);
        // Second item leads despite being listed second
        assert_eq!(tl.value(ids[0]).unwrap(), 0.0);
        assert!((tl.value(ids[1]).unwrap() - 0.5).abs() < 1e-3);
    }
}
