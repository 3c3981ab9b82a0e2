//! Creative section
//!
//! The gallery walk: each installation panel lights up a full-viewport
//! background while the panel holds the viewport center, and the text
//! block rises in and falls away on scrubbed per-index windows.
//!
//! Background policy: at most one background is ever visible. Focusing a
//! panel zeroes every other background outright before its own fade
//! starts, a leave only fades a panel that is still the focused one, and
//! a master trigger over the whole section drops everything when the
//! gallery leaves the viewport in either direction. A panel marked
//! `light_bg` raises the shared light-background flag while focused; the
//! nav and the decorative backdrop both watch it.

use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};

use smallvec::SmallVec;

use vitrine_animation::{AnimatedKeyframe, Easing, SchedulerHandle};
use vitrine_scroll::{ScrollTrigger, TriggerHandle, TriggerPoint};

use crate::primitives::{ChoreoContext, LightBgFlag, RevealConfig, RevealHandle};
use crate::sections::{span_progress, FrameState, Section};
use crate::stage::{NodeId, SharedStage};

/// One installation panel
#[derive(Clone, Debug)]
pub struct CreativePanel {
    /// Full-height panel in document space; its bounds key every window
    pub root: NodeId,
    /// Fixed background image node behind the whole viewport
    pub background: NodeId,
    /// Blur plate behind the text block
    pub backdrop: NodeId,
    /// Label, title, tagline, meta, in reading order
    pub texts: SmallVec<[NodeId; 4]>,
    /// Bright artwork; flips the shared light-background flag while focused
    pub light_bg: bool,
}

/// Stage nodes the creative section choreographs
#[derive(Clone, Debug)]
pub struct CreativeNodes {
    pub header: NodeId,
    pub section: NodeId,
    pub panels: Vec<CreativePanel>,
}

const FADE_IN_MS: u32 = 600;
const FADE_OUT_MS: u32 = 400;

/// Crossfade state shared with the trigger callbacks
struct Crossfades {
    stage: SharedStage,
    scheduler: SchedulerHandle,
    backgrounds: SmallVec<[NodeId; 4]>,
    light_panels: SmallVec<[bool; 4]>,
    light: LightBgFlag,
    fades: SmallVec<[Option<AnimatedKeyframe>; 4]>,
    active: Option<usize>,
}

impl Crossfades {
    fn fade(&self, from: f32, to: f32, duration_ms: u32, easing: Easing) -> AnimatedKeyframe {
        AnimatedKeyframe::builder(self.scheduler.clone(), duration_ms)
            .keyframe(0.0, from)
            .keyframe_eased(1.0, to, easing)
            .auto_start(true)
            .build()
    }

    /// Current opacity source for one background
    fn level(&self, index: usize) -> f32 {
        match &self.fades[index] {
            Some(anim) => anim.value(),
            None => self
                .stage
                .lock()
                .unwrap()
                .opacity(self.backgrounds[index])
                .unwrap_or(0.0),
        }
    }

    /// A panel took the viewport center, from either direction
    fn focus(&mut self, index: usize) {
        {
            let mut stage = self.stage.lock().unwrap();
            for (i, bg) in self.backgrounds.iter().enumerate() {
                if i != index {
                    stage.set_opacity(*bg, 0.0);
                }
            }
        }
        for (i, fade) in self.fades.iter_mut().enumerate() {
            if i != index {
                *fade = None;
            }
        }
        let from = self.level(index);
        self.fades[index] = Some(self.fade(from, 1.0, FADE_IN_MS, Easing::CubicInOut));
        self.active = Some(index);
        self.light
            .store(self.light_panels[index], Ordering::SeqCst);
        tracing::trace!(panel = index, "background focused");
    }

    /// A panel left the center; only the focused one fades out
    fn release(&mut self, index: usize) {
        if self.active != Some(index) {
            return;
        }
        self.active = None;
        self.light.store(false, Ordering::SeqCst);
        let from = self.level(index);
        self.fades[index] = Some(self.fade(from, 0.0, FADE_OUT_MS, Easing::CubicOut));
    }

    /// The whole gallery left the viewport
    fn release_all(&mut self) {
        self.active = None;
        self.light.store(false, Ordering::SeqCst);
        for index in 0..self.backgrounds.len() {
            let from = self.level(index);
            if from > 0.0 {
                self.fades[index] = Some(self.fade(from, 0.0, FADE_OUT_MS, Easing::CubicOut));
            } else {
                self.fades[index] = None;
            }
        }
        tracing::trace!("backgrounds released");
    }

    /// Write fade values onto the stage, retiring finished fades
    fn sync(&mut self) {
        let mut writes: SmallVec<[(usize, f32, bool); 4]> = SmallVec::new();
        for (index, fade) in self.fades.iter().enumerate() {
            if let Some(anim) = fade {
                writes.push((index, anim.value(), !anim.is_playing()));
            }
        }
        {
            let mut stage = self.stage.lock().unwrap();
            for (index, value, _) in &writes {
                stage.set_opacity(self.backgrounds[*index], *value);
            }
        }
        for (index, _, finished) in writes {
            if finished {
                self.fades[index] = None;
            }
        }
    }
}

/// Document-space window over a panel edge: the edge meets `from` of the
/// viewport at 0, `to` of the viewport at 1
fn edge_window(edge: f32, viewport_h: f32, from: f32, to: f32, offset: f32) -> f32 {
    span_progress(offset, edge - from * viewport_h, edge - to * viewport_h)
}

/// Creative choreographer
///
/// Registers one crossfade trigger per panel plus the master full-span
/// trigger; text windows are computed per frame as pure functions of the
/// offset. Inert under reduced motion: backgrounds stay at opacity 0,
/// text stays readable, the flag stays unlit.
pub struct CreativeSection {
    stage: SharedStage,
    nodes: CreativeNodes,
    header_reveal: Option<RevealHandle>,
    crossfades: Option<Arc<Mutex<Crossfades>>>,
    panel_triggers: Vec<TriggerHandle>,
    master: Option<TriggerHandle>,
}

impl CreativeSection {
    pub fn new(ctx: &ChoreoContext, nodes: CreativeNodes) -> Self {
        let stage = ctx.stage();
        if ctx.motion().is_reduced() {
            return Self {
                stage,
                nodes,
                header_reveal: None,
                crossfades: None,
                panel_triggers: Vec::new(),
                master: None,
            };
        }

        let header_reveal = ctx.reveal_on_scroll(nodes.header, RevealConfig::default());

        let crossfades = Arc::new(Mutex::new(Crossfades {
            stage: Arc::clone(&stage),
            scheduler: ctx.scheduler(),
            backgrounds: nodes.panels.iter().map(|p| p.background).collect(),
            light_panels: nodes.panels.iter().map(|p| p.light_bg).collect(),
            light: ctx.light_bg(),
            fades: nodes.panels.iter().map(|_| None).collect(),
            active: None,
        }));

        let triggers = ctx.triggers();
        let panel_triggers = nodes
            .panels
            .iter()
            .enumerate()
            .filter_map(|(index, panel)| {
                let bounds = stage.lock().unwrap().trigger_bounds(panel.root)?;
                let focus = |cell: &Arc<Mutex<Crossfades>>| {
                    let cell = Arc::clone(cell);
                    move || cell.lock().unwrap().focus(index)
                };
                let release = |cell: &Arc<Mutex<Crossfades>>| {
                    let cell = Arc::clone(cell);
                    move || cell.lock().unwrap().release(index)
                };
                Some(
                    ScrollTrigger::builder()
                        .start(TriggerPoint::top(0.6))
                        .end(TriggerPoint::bottom(0.4))
                        .bounds(bounds)
                        .on_enter(focus(&crossfades))
                        .on_enter_back(focus(&crossfades))
                        .on_leave(release(&crossfades))
                        .on_leave_back(release(&crossfades))
                        .register(&triggers),
                )
            })
            .collect();

        let master = stage
            .lock()
            .unwrap()
            .trigger_bounds(nodes.section)
            .map(|bounds| {
                let leave = |cell: &Arc<Mutex<Crossfades>>| {
                    let cell = Arc::clone(cell);
                    move || cell.lock().unwrap().release_all()
                };
                ScrollTrigger::builder()
                    .bounds(bounds)
                    .on_leave(leave(&crossfades))
                    .on_leave_back(leave(&crossfades))
                    .register(&triggers)
            });

        tracing::debug!(panels = nodes.panels.len(), "creative section ready");
        Self {
            stage,
            nodes,
            header_reveal,
            crossfades: Some(crossfades),
            panel_triggers,
            master,
        }
    }

    /// Index of the focused panel, if any
    pub fn active_panel(&self) -> Option<usize> {
        self.crossfades
            .as_ref()
            .and_then(|cell| cell.lock().unwrap().active)
    }
}

impl Section for CreativeSection {
    fn name(&self) -> &'static str {
        "creative"
    }

    fn sync(&mut self, frame: &FrameState) {
        if let Some(reveal) = &mut self.header_reveal {
            reveal.sync();
        }
        let Some(crossfades) = &self.crossfades else {
            return;
        };
        crossfades.lock().unwrap().sync();

        let h = frame.viewport.height;
        let offset = frame.offset;
        let mut stage = self.stage.lock().unwrap();
        for panel in &self.nodes.panels {
            let Some(bounds) = stage.bounds(panel.root) else {
                continue;
            };
            let top = bounds.y();
            let bottom = bounds.y() + bounds.height();

            for (i, text) in panel.texts.iter().enumerate() {
                let fi = i as f32;
                let rise = Easing::CubicOut.apply(edge_window(
                    top,
                    h,
                    0.80 - 0.05 * fi,
                    0.35 - 0.03 * fi,
                    offset,
                ));
                let fall = Easing::CubicIn.apply(edge_window(
                    bottom,
                    h,
                    0.70 - 0.03 * fi,
                    0.30 - 0.02 * fi,
                    offset,
                ));
                stage.set_opacity(*text, rise * (1.0 - fall));
                stage.set_translate_y(
                    *text,
                    (30.0 + 8.0 * fi) * (1.0 - rise) - (25.0 + 6.0 * fi) * fall,
                );
            }

            let plate_in = Easing::CubicOut.apply(edge_window(top, h, 0.85, 0.40, offset));
            let plate_out = Easing::CubicIn.apply(edge_window(bottom, h, 0.65, 0.25, offset));
            stage.set_opacity(panel.backdrop, plate_in * (1.0 - plate_out));
        }
    }

    fn refresh(&mut self) {
        let (header_bounds, section_bounds, panel_bounds) = {
            let stage = self.stage.lock().unwrap();
            let panels: Vec<_> = self
                .nodes
                .panels
                .iter()
                .map(|p| stage.trigger_bounds(p.root))
                .collect();
            (
                stage.trigger_bounds(self.nodes.header),
                stage.trigger_bounds(self.nodes.section),
                panels,
            )
        };
        if let (Some(reveal), Some(bounds)) = (&self.header_reveal, header_bounds) {
            reveal.trigger().update_bounds(bounds);
        }
        if let (Some(master), Some(bounds)) = (&self.master, section_bounds) {
            master.update_bounds(bounds);
        }
        for (trigger, bounds) in self.panel_triggers.iter().zip(panel_bounds) {
            if let Some(bounds) = bounds {
                trigger.update_bounds(bounds);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::{Stage, VisualNode};
    use vitrine_animation::{AnimationScheduler, SchedulerHandle};
    use vitrine_core::{MotionPreference, Rect, Size};
    use vitrine_scroll::TriggerRegistry;

    const VIEWPORT: f32 = 800.0;
    const SECTION_TOP: f32 = 4000.0;

    fn fixture(motion: MotionPreference) -> (vitrine_animation::SharedScheduler, ChoreoContext) {
        let scheduler = AnimationScheduler::shared();
        let handle = SchedulerHandle::new(&scheduler);
        let triggers = Arc::new(Mutex::new(TriggerRegistry::with_viewport(VIEWPORT)));
        let ctx = ChoreoContext::new(Stage::shared(), handle, triggers, motion);
        (scheduler, ctx)
    }

    /// Three stacked full-height panels from 4800; the middle one is a
    /// bright artwork
    fn build_nodes(ctx: &ChoreoContext) -> CreativeNodes {
        let stage = ctx.stage();
        let mut stage = stage.lock().unwrap();
        let header = stage.insert(
            VisualNode::new("cr-header").with_bounds(Rect::new(
                100.0,
                SECTION_TOP + 200.0,
                600.0,
                120.0,
            )),
        );
        let section = stage.insert(
            VisualNode::new("cr-section").with_bounds(Rect::new(0.0, SECTION_TOP, 800.0, 3200.0)),
        );
        let panels = (0..3)
            .map(|i| {
                let top = SECTION_TOP + 800.0 + i as f32 * 800.0;
                let root = stage.insert(
                    VisualNode::new(&format!("cr-panel-{i}"))
                        .with_bounds(Rect::new(0.0, top, 800.0, 800.0)),
                );
                let background = stage.insert(
                    VisualNode::new(&format!("cr-bg-{i}"))
                        .with_opacity(0.0)
                        .decorative(),
                );
                let backdrop = stage.insert(VisualNode::new(&format!("cr-plate-{i}")));
                let texts = (0..4)
                    .map(|j| stage.insert(VisualNode::new(&format!("cr-text-{i}-{j}"))))
                    .collect();
                CreativePanel {
                    root,
                    background,
                    backdrop,
                    texts,
                    light_bg: i == 1,
                }
            })
            .collect();
        CreativeNodes {
            header,
            section,
            panels,
        }
    }

    fn frame(offset: f32) -> FrameState {
        FrameState {
            offset,
            progress: 0.0,
            viewport: Size::new(VIEWPORT, VIEWPORT),
            pointer: None,
            dt: 0.016,
        }
    }

    fn run(scheduler: &vitrine_animation::SharedScheduler, seconds: f32) {
        let frames = (seconds / 0.016).ceil() as usize;
        for _ in 0..frames {
            scheduler.lock().unwrap().tick(0.016);
        }
    }

    fn visible_backgrounds(ctx: &ChoreoContext, nodes: &CreativeNodes) -> usize {
        let stage = ctx.stage();
        let stage = stage.lock().unwrap();
        nodes
            .panels
            .iter()
            .filter(|p| stage.opacity(p.background).unwrap_or(0.0) > 1e-3)
            .count()
    }

    #[test]
    fn test_at_most_one_background_over_a_full_pass() {
        let (scheduler, ctx) = fixture(MotionPreference::Full);
        let nodes = build_nodes(&ctx);
        let mut section = CreativeSection::new(&ctx, nodes.clone());

        // Sweep down through the gallery and back up, sampling after
        // every step plus a few animation frames
        let mut offsets: Vec<f32> = (0..200).map(|i| 3600.0 + i as f32 * 25.0).collect();
        offsets.extend((0..200).map(|i| 8600.0 - i as f32 * 25.0));
        for offset in offsets {
            ctx.triggers().lock().unwrap().process(offset);
            run(&scheduler, 0.05);
            section.sync(&frame(offset));
            assert!(
                visible_backgrounds(&ctx, &nodes) <= 1,
                "multiple backgrounds visible at offset {offset}"
            );
        }
    }

    #[test]
    fn test_focus_hard_zeroes_the_previous_background() {
        let (scheduler, ctx) = fixture(MotionPreference::Full);
        let nodes = build_nodes(&ctx);
        let mut section = CreativeSection::new(&ctx, nodes.clone());

        // Panel 0 spans 4800..5600; its window is 4320..5280
        ctx.triggers().lock().unwrap().process(4400.0);
        assert_eq!(section.active_panel(), Some(0));
        run(&scheduler, 1.0);
        section.sync(&frame(4400.0));
        let stage = ctx.stage();
        assert_eq!(
            stage.lock().unwrap().opacity(nodes.panels[0].background),
            Some(1.0)
        );

        // Step into panel 1's window: panel 0 zeroes immediately, before
        // any animation frame runs
        ctx.triggers().lock().unwrap().process(5200.0);
        assert_eq!(section.active_panel(), Some(1));
        assert_eq!(
            stage.lock().unwrap().opacity(nodes.panels[0].background),
            Some(0.0)
        );

        run(&scheduler, 1.0);
        section.sync(&frame(5200.0));
        assert_eq!(
            stage.lock().unwrap().opacity(nodes.panels[1].background),
            Some(1.0)
        );
    }

    #[test]
    fn test_scrolling_back_refocuses_the_earlier_panel() {
        let (scheduler, ctx) = fixture(MotionPreference::Full);
        let nodes = build_nodes(&ctx);
        let mut section = CreativeSection::new(&ctx, nodes.clone());

        // 5500 sits in panel 1's window only; panel 2 opens at 5920
        ctx.triggers().lock().unwrap().process(5500.0);
        run(&scheduler, 1.0);
        section.sync(&frame(5500.0));
        assert_eq!(section.active_panel(), Some(1));

        ctx.triggers().lock().unwrap().process(4400.0);
        run(&scheduler, 1.0);
        section.sync(&frame(4400.0));
        assert_eq!(section.active_panel(), Some(0));
        let stage = ctx.stage();
        assert_eq!(
            stage.lock().unwrap().opacity(nodes.panels[0].background),
            Some(1.0)
        );
        assert_eq!(
            stage.lock().unwrap().opacity(nodes.panels[1].background),
            Some(0.0)
        );
    }

    #[test]
    fn test_master_trigger_clears_everything_past_the_section() {
        let (scheduler, ctx) = fixture(MotionPreference::Full);
        let nodes = build_nodes(&ctx);
        let mut section = CreativeSection::new(&ctx, nodes.clone());

        ctx.triggers().lock().unwrap().process(6600.0);
        run(&scheduler, 1.0);
        section.sync(&frame(6600.0));
        assert_eq!(section.active_panel(), Some(2));

        // Section spans 4000..7200; past its bottom everything drops
        ctx.triggers().lock().unwrap().process(7400.0);
        run(&scheduler, 1.0);
        section.sync(&frame(7400.0));
        assert_eq!(section.active_panel(), None);
        assert_eq!(visible_backgrounds(&ctx, &nodes), 0);
    }

    #[test]
    fn test_light_panel_raises_the_shared_flag_while_focused() {
        let (scheduler, ctx) = fixture(MotionPreference::Full);
        let nodes = build_nodes(&ctx);
        let light = ctx.light_bg();
        let mut section = CreativeSection::new(&ctx, nodes);

        ctx.triggers().lock().unwrap().process(4400.0);
        assert!(!light.load(Ordering::SeqCst));

        // Panel 1 (5600..6400) is the bright one
        ctx.triggers().lock().unwrap().process(5300.0);
        assert!(light.load(Ordering::SeqCst));

        ctx.triggers().lock().unwrap().process(6100.0);
        run(&scheduler, 0.5);
        section.sync(&frame(6100.0));
        assert!(!light.load(Ordering::SeqCst));
    }

    #[test]
    fn test_text_rises_in_and_falls_out_per_index() {
        let (_scheduler, ctx) = fixture(MotionPreference::Full);
        let nodes = build_nodes(&ctx);
        let first = nodes.panels[0].clone();
        let mut section = CreativeSection::new(&ctx, nodes);
        let stage = ctx.stage();

        // Panel 0 top is 4800. Element 0 rises over 4160..4520; sample
        // mid-window
        section.sync(&frame(4340.0));
        let mid = stage.lock().unwrap().opacity(first.texts[0]).unwrap();
        assert!(mid > 0.0 && mid < 1.0, "mid rise {mid}");
        let y = stage.lock().unwrap().translate(first.texts[0]).unwrap().y;
        assert!(y > 0.0 && y < 30.0, "mid rise offset {y}");

        // Settled between the in and out windows
        section.sync(&frame(4700.0));
        assert_eq!(stage.lock().unwrap().opacity(first.texts[0]), Some(1.0));
        assert_eq!(
            stage.lock().unwrap().translate(first.texts[0]).unwrap().y,
            0.0
        );

        // Fully through the out window: gone, lifted upward
        section.sync(&frame(5500.0));
        assert_eq!(stage.lock().unwrap().opacity(first.texts[0]), Some(0.0));
        assert_eq!(
            stage.lock().unwrap().translate(first.texts[0]).unwrap().y,
            -25.0
        );

        // Later elements trail earlier ones mid-rise
        section.sync(&frame(4340.0));
        let lead = stage.lock().unwrap().opacity(first.texts[0]).unwrap();
        let trail = stage.lock().unwrap().opacity(first.texts[3]).unwrap();
        assert!(lead > trail, "index order: {lead} vs {trail}");
    }

    #[test]
    fn test_reduced_motion_keeps_backgrounds_dark() {
        let (_scheduler, ctx) = fixture(MotionPreference::Reduced);
        let nodes = build_nodes(&ctx);
        let light = ctx.light_bg();
        let mut section = CreativeSection::new(&ctx, nodes.clone());

        assert!(ctx.triggers().lock().unwrap().is_empty());
        ctx.triggers().lock().unwrap().process(5300.0);
        section.sync(&frame(5300.0));
        section.refresh();

        assert_eq!(visible_backgrounds(&ctx, &nodes), 0);
        assert!(section.active_panel().is_none());
        assert!(!light.load(Ordering::SeqCst));
        let stage = ctx.stage();
        assert_eq!(
            stage.lock().unwrap().opacity(nodes.panels[0].texts[0]),
            Some(1.0)
        );
    }
}
