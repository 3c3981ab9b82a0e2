//! Experience section
//!
//! The horizontal hijack: while the section is pinned, vertical scroll
//! drives the track sideways, and per-panel choreography runs in
//! container space with the track translation as its scroll source.
//!
//! The pin range is read from the section node's document bounds, so the
//! layout owns the pin length (scroll distance × 1.2 plus one viewport).
//! The track never travels past `track_width − viewport_width`; a stale
//! measurement either releases the pin early or strands trailing panels,
//! which is why every layout-derived value is recomputed on `refresh`.

use smallvec::SmallVec;

use vitrine_animation::Easing;
use vitrine_core::ScrubState;
use vitrine_scroll::{ScrollTrigger, TriggerHandle, TriggerPoint};

use crate::primitives::{ChoreoContext, RevealConfig, RevealHandle};
use crate::sections::{scrub_stagger, FrameState, Section};
use crate::stage::{NodeId, SharedStage};

/// One role panel on the track
#[derive(Clone, Debug)]
pub struct ExperiencePanel {
    /// Panel container, positioned in track space
    pub root: NodeId,
    /// Company headline, scrubbed in from the right
    pub company: NodeId,
    /// Detail lines, staggered in below the headline
    pub details: SmallVec<[NodeId; 4]>,
}

/// Stage nodes the experience section choreographs
#[derive(Clone, Debug)]
pub struct ExperienceNodes {
    /// Section header in document space, revealed like any other header
    pub header: NodeId,
    /// Pinned container; its bounds define the pin range
    pub section: NodeId,
    /// Horizontal track translated by scroll
    pub track: NodeId,
    pub panels: Vec<ExperiencePanel>,
}

/// Company headline scrub window, as fractions of viewport width
const COMPANY_WINDOW: (f32, f32) = (0.9, 0.5);
/// Detail stagger scrub window
const DETAIL_WINDOW: (f32, f32) = (0.8, 0.4);
const DETAIL_DURATION: f32 = 0.5;
const DETAIL_STAGGER: f32 = 0.05;

struct Measurements {
    /// Exactly `track_width − viewport_width`, never negative
    scroll_distance: f32,
    /// Track-space left edge per panel
    panel_lefts: SmallVec<[f32; 4]>,
}

/// Experience choreographer
///
/// Inert under reduced motion: no triggers register, the track stays
/// put, and the embedder lays the panels out vertically instead.
pub struct ExperienceSection {
    stage: SharedStage,
    nodes: ExperienceNodes,
    header_reveal: Option<RevealHandle>,
    pin: Option<TriggerHandle>,
    measurements: Measurements,
    viewport_width: f32,
}

impl ExperienceSection {
    pub fn new(ctx: &ChoreoContext, nodes: ExperienceNodes, viewport_width: f32) -> Self {
        let stage = ctx.stage();
        let measurements = measure(&stage, &nodes, viewport_width);

        let (header_reveal, pin) = if ctx.motion().is_reduced() {
            (None, None)
        } else {
            let header_reveal = ctx.reveal_on_scroll(nodes.header, RevealConfig::default());
            let pin = stage
                .lock()
                .unwrap()
                .trigger_bounds(nodes.section)
                .map(|bounds| {
                    ScrollTrigger::builder()
                        .start(TriggerPoint::top(0.0))
                        .end(TriggerPoint::bottom(1.0))
                        .bounds(bounds)
                        .scrub(true)
                        .register(&ctx.triggers())
                });
            (header_reveal, pin)
        };

        tracing::debug!(
            panels = nodes.panels.len(),
            scroll_distance = measurements.scroll_distance,
            pinned = pin.is_some(),
            "experience section ready"
        );
        Self {
            stage,
            nodes,
            header_reveal,
            pin,
            measurements,
            viewport_width,
        }
    }

    /// Current travel of the track, 0 at rest to `scroll_distance`
    pub fn track_travel(&self) -> f32 {
        let progress = match &self.pin {
            Some(pin) => pin.progress().unwrap_or(0.0),
            None => return 0.0,
        };
        self.measurements.scroll_distance * Easing::QuadInOut.apply(progress)
    }

    pub fn pin_state(&self) -> Option<ScrubState> {
        self.pin.as_ref().and_then(|pin| pin.state())
    }

    fn remeasure(&mut self) {
        self.measurements = measure(&self.stage, &self.nodes, self.viewport_width);
        let (section_bounds, header_bounds) = {
            let stage = self.stage.lock().unwrap();
            (
                stage.trigger_bounds(self.nodes.section),
                stage.trigger_bounds(self.nodes.header),
            )
        };
        if let (Some(pin), Some(bounds)) = (&self.pin, section_bounds) {
            pin.update_bounds(bounds);
        }
        if let (Some(reveal), Some(bounds)) = (&self.header_reveal, header_bounds) {
            reveal.trigger().update_bounds(bounds);
        }
        tracing::trace!(
            scroll_distance = self.measurements.scroll_distance,
            "experience remeasured"
        );
    }
}

fn measure(stage: &SharedStage, nodes: &ExperienceNodes, viewport_width: f32) -> Measurements {
    let stage = stage.lock().unwrap();
    let track_width = stage
        .bounds(nodes.track)
        .map(|b| b.width())
        .unwrap_or(0.0);
    let panel_lefts = nodes
        .panels
        .iter()
        .map(|panel| stage.bounds(panel.root).map(|b| b.x()).unwrap_or(0.0))
        .collect();
    Measurements {
        scroll_distance: (track_width - viewport_width).max(0.0),
        panel_lefts,
    }
}

/// Progress of a viewport-fraction window over a panel's left edge
fn window_progress(left_px: f32, viewport_width: f32, window: (f32, f32)) -> f32 {
    let open = window.0 * viewport_width;
    let close = window.1 * viewport_width;
    ((open - left_px) / (open - close)).clamp(0.0, 1.0)
}

impl Section for ExperienceSection {
    fn name(&self) -> &'static str {
        "experience"
    }

    fn sync(&mut self, frame: &FrameState) {
        if (frame.viewport.width - self.viewport_width).abs() > f32::EPSILON {
            self.viewport_width = frame.viewport.width;
            self.remeasure();
        }

        if let Some(reveal) = &mut self.header_reveal {
            reveal.sync();
        }

        let Some(pin) = &self.pin else { return };
        let progress = pin.progress().unwrap_or(0.0);
        let track_x = -self.measurements.scroll_distance * Easing::QuadInOut.apply(progress);

        let mut stage = self.stage.lock().unwrap();
        stage.set_translate_x(self.nodes.track, track_x);

        for (panel, left) in self
            .nodes
            .panels
            .iter()
            .zip(self.measurements.panel_lefts.iter())
        {
            let left_px = left + track_x;

            let company = Easing::QuartOut.apply(window_progress(
                left_px,
                self.viewport_width,
                COMPANY_WINDOW,
            ));
            stage.set_translate_x(panel.company, 100.0 * (1.0 - company));
            stage.set_opacity(panel.company, company);

            let details = window_progress(left_px, self.viewport_width, DETAIL_WINDOW);
            let count = panel.details.len();
            for (i, detail) in panel.details.iter().enumerate() {
                let local = Easing::CubicOut.apply(scrub_stagger(
                    details,
                    i,
                    count,
                    DETAIL_DURATION,
                    DETAIL_STAGGER,
                ));
                stage.set_translate_y(*detail, 30.0 * (1.0 - local));
                stage.set_opacity(*detail, local);
            }
        }
    }

    fn refresh(&mut self) {
        self.remeasure();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::{Stage, VisualNode};
    use std::sync::{Arc, Mutex};
    use vitrine_animation::{AnimationScheduler, SchedulerHandle};
    use vitrine_core::{MotionPreference, Rect, Size};
    use vitrine_scroll::TriggerRegistry;

    const VIEWPORT: f32 = 800.0;

    fn fixture(motion: MotionPreference) -> (vitrine_animation::SharedScheduler, ChoreoContext) {
        let scheduler = AnimationScheduler::shared();
        let handle = SchedulerHandle::new(&scheduler);
        let triggers = Arc::new(Mutex::new(TriggerRegistry::with_viewport(VIEWPORT)));
        let ctx = ChoreoContext::new(Stage::shared(), handle, triggers, motion);
        (scheduler, ctx)
    }

    /// Track 2000 px wide at y 800: scroll distance 1200, pin range
    /// 800..2240 (1.2 × 1200 past the start)
    fn build_nodes(ctx: &ChoreoContext) -> ExperienceNodes {
        let stage = ctx.stage();
        let mut stage = stage.lock().unwrap();
        let header = stage.insert(
            VisualNode::new("exp-header").with_bounds(Rect::new(100.0, 600.0, 600.0, 80.0)),
        );
        let section = stage.insert(
            VisualNode::new("exp-section").with_bounds(Rect::new(0.0, 800.0, 800.0, 2240.0)),
        );
        let track = stage.insert(
            VisualNode::new("exp-track").with_bounds(Rect::new(0.0, 800.0, 2000.0, 800.0)),
        );
        let panels = (0..2)
            .map(|i| {
                let x = 700.0 * (i as f32 + 1.0);
                let root = stage.insert(
                    VisualNode::new(&format!("exp-panel-{i}"))
                        .with_bounds(Rect::new(x, 800.0, 600.0, 800.0)),
                );
                let company = stage.insert(VisualNode::new(&format!("exp-company-{i}")));
                let details = (0..3)
                    .map(|j| stage.insert(VisualNode::new(&format!("exp-detail-{i}-{j}"))))
                    .collect();
                ExperiencePanel {
                    root,
                    company,
                    details,
                }
            })
            .collect();
        ExperienceNodes {
            header,
            section,
            track,
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

    fn scroll(ctx: &ChoreoContext, offset: f32) {
        ctx.triggers().lock().unwrap().process(offset);
    }

    #[test]
    fn test_track_spans_exactly_the_scroll_distance() {
        let (_scheduler, ctx) = fixture(MotionPreference::Full);
        let nodes = build_nodes(&ctx);
        let track = nodes.track;
        let mut section = ExperienceSection::new(&ctx, nodes, VIEWPORT);

        scroll(&ctx, 800.0);
        section.sync(&frame(800.0));
        let stage = ctx.stage();
        assert_eq!(stage.lock().unwrap().translate(track).unwrap().x, 0.0);
        assert_eq!(section.pin_state(), Some(ScrubState::InRange));

        // Halfway through the pin, quad in-out is exactly 0.5
        scroll(&ctx, 1520.0);
        section.sync(&frame(1520.0));
        let mid = stage.lock().unwrap().translate(track).unwrap().x;
        assert!((mid + 600.0).abs() < 1e-3, "mid travel {mid}");

        // The end boundary lands on the full scroll distance, no overshoot
        scroll(&ctx, 2240.0);
        section.sync(&frame(2240.0));
        assert_eq!(stage.lock().unwrap().translate(track).unwrap().x, -1200.0);
        assert_eq!(section.track_travel(), 1200.0);

        scroll(&ctx, 3000.0);
        section.sync(&frame(3000.0));
        assert_eq!(stage.lock().unwrap().translate(track).unwrap().x, -1200.0);
    }

    #[test]
    fn test_company_scrubs_in_container_space() {
        let (_scheduler, ctx) = fixture(MotionPreference::Full);
        let nodes = build_nodes(&ctx);
        let first = nodes.panels[0].clone();
        let mut section = ExperienceSection::new(&ctx, nodes, VIEWPORT);
        let stage = ctx.stage();

        // Track at rest: first panel's left edge sits at 700 px, just
        // inside the 720 px window opening
        scroll(&ctx, 800.0);
        section.sync(&frame(800.0));
        let early = stage.lock().unwrap().opacity(first.company).unwrap();
        assert!(early < 0.3, "barely entered: {early}");

        // Full travel: left edge at 700 - 1200 < half the viewport
        scroll(&ctx, 2240.0);
        section.sync(&frame(2240.0));
        assert_eq!(stage.lock().unwrap().opacity(first.company), Some(1.0));
        assert_eq!(
            stage.lock().unwrap().translate(first.company).unwrap().x,
            0.0
        );
    }

    #[test]
    fn test_details_cascade_in_panel_order() {
        let (_scheduler, ctx) = fixture(MotionPreference::Full);
        let nodes = build_nodes(&ctx);
        let first = nodes.panels[0].clone();
        let mut section = ExperienceSection::new(&ctx, nodes, VIEWPORT);
        let stage = ctx.stage();

        // Pick a travel where the detail window is partly open:
        // progress 0.5 puts the left edge at 100 px, window fraction
        // (640-100)/320 clamps to 1, so step back to an earlier offset
        scroll(&ctx, 1220.0);
        section.sync(&frame(1220.0));
        let opacities: Vec<f32> = first
            .details
            .iter()
            .map(|d| stage.lock().unwrap().opacity(*d).unwrap())
            .collect();
        for pair in opacities.windows(2) {
            assert!(
                pair[0] >= pair[1],
                "details lead by index: {opacities:?}"
            );
        }

        scroll(&ctx, 2240.0);
        section.sync(&frame(2240.0));
        for detail in &first.details {
            assert_eq!(stage.lock().unwrap().opacity(*detail), Some(1.0));
            assert_eq!(stage.lock().unwrap().translate(*detail).unwrap().y, 0.0);
        }
    }

    #[test]
    fn test_refresh_recomputes_the_end_boundary() {
        let (_scheduler, ctx) = fixture(MotionPreference::Full);
        let nodes = build_nodes(&ctx);
        let track = nodes.track;
        let section_node = nodes.section;
        let mut section = ExperienceSection::new(&ctx, nodes, VIEWPORT);

        // The track grows (a panel mounted late); document layout gives
        // the section a longer pin to match
        {
            let stage = ctx.stage();
            let mut stage = stage.lock().unwrap();
            stage.set_bounds(track, Rect::new(0.0, 800.0, 2800.0, 800.0));
            stage.set_bounds(section_node, Rect::new(0.0, 800.0, 800.0, 3200.0));
        }
        section.refresh();
        ctx.triggers().lock().unwrap().refresh();

        // New scroll distance 2000; new pin range 800..3200
        scroll(&ctx, 3200.0);
        section.sync(&frame(3200.0));
        let stage = ctx.stage();
        assert_eq!(stage.lock().unwrap().translate(track).unwrap().x, -2000.0);
    }

    #[test]
    fn test_reduced_motion_is_fully_inert() {
        let (_scheduler, ctx) = fixture(MotionPreference::Reduced);
        let nodes = build_nodes(&ctx);
        let track = nodes.track;
        let company = nodes.panels[0].company;
        let mut section = ExperienceSection::new(&ctx, nodes, VIEWPORT);

        assert!(ctx.triggers().lock().unwrap().is_empty());
        scroll(&ctx, 2000.0);
        section.sync(&frame(2000.0));
        let stage = ctx.stage();
        assert_eq!(stage.lock().unwrap().translate(track).unwrap().x, 0.0);
        assert_eq!(stage.lock().unwrap().opacity(company), Some(1.0));
        assert_eq!(section.track_travel(), 0.0);
        assert!(section.pin_state().is_none());
    }
}
