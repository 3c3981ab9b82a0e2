//! Contact section
//!
//! The whole closer is one scrubbed timeline: label, per-character title
//! wave, description, CTA and social links laid out on a single clock,
//! with the section's approach through the viewport as the playhead. The
//! timeline is never started; each frame seeks it to the trigger's
//! progress, so scrolling back rewinds the choreography exactly.

use smallvec::SmallVec;

use vitrine_animation::{
    AnimatedTimeline, Easing, StaggerBuilder, TimelineEntryId, TimelinePosition,
};
use vitrine_scroll::{ScrollTrigger, TriggerHandle, TriggerPoint};

use crate::primitives::ChoreoContext;
use crate::sections::{FrameState, Section};
use crate::stage::{NodeId, SharedStage};

/// Stage nodes the contact section choreographs
#[derive(Clone, Debug)]
pub struct ContactNodes {
    pub section: NodeId,
    pub label: NodeId,
    /// One node per title character, in reading order
    pub title_chars: Vec<NodeId>,
    pub description: NodeId,
    pub cta: NodeId,
    pub social: Vec<NodeId>,
}

/// Total spread of the character wave's start times, in milliseconds
const CHAR_WAVE_SPREAD_MS: f32 = 800.0;

/// Fade-and-rise pair for one element
struct Lift {
    opacity: Option<TimelineEntryId>,
    offset: Option<TimelineEntryId>,
}

impl Lift {
    fn add(
        timeline: &AnimatedTimeline,
        at_ms: f32,
        duration_ms: u32,
        offset_y: f32,
        easing: Easing,
    ) -> Self {
        let at = TimelinePosition::At(at_ms);
        Self {
            opacity: timeline.add_at(at, duration_ms, 0.0, 1.0, easing),
            offset: timeline.add_at(at, duration_ms, offset_y, 0.0, easing),
        }
    }

    fn sample(&self, timeline: &AnimatedTimeline) -> (f32, f32) {
        (
            self.opacity.and_then(|id| timeline.get(id)).unwrap_or(1.0),
            self.offset.and_then(|id| timeline.get(id)).unwrap_or(0.0),
        )
    }
}

/// One title character: lift plus the flip from -90 degrees
struct CharPose {
    lift: Lift,
    spin: Option<TimelineEntryId>,
}

struct ContactEntries {
    label: Lift,
    chars: Vec<CharPose>,
    description: Lift,
    cta: Lift,
    social: SmallVec<[Lift; 4]>,
}

/// Contact choreographer
///
/// Registers a single scrubbed trigger over the section's approach
/// ("top 60%" to "top 20%" of the viewport) and drives the reveal
/// timeline from its progress. Inert under reduced motion.
pub struct ContactSection {
    stage: SharedStage,
    nodes: ContactNodes,
    timeline: Option<AnimatedTimeline>,
    entries: Option<ContactEntries>,
    trigger: Option<TriggerHandle>,
}

impl ContactSection {
    pub fn new(ctx: &ChoreoContext, nodes: ContactNodes) -> Self {
        let stage = ctx.stage();
        if ctx.motion().is_reduced() {
            return Self {
                stage,
                nodes,
                timeline: None,
                entries: None,
                trigger: None,
            };
        }

        {
            let mut stage = stage.lock().unwrap();
            stage.set_opacity(nodes.label, 0.0);
            stage.set_translate_y(nodes.label, 40.0);
            for char_node in &nodes.title_chars {
                stage.set_opacity(*char_node, 0.0);
                stage.set_translate_y(*char_node, 100.0);
                stage.set_rotation(*char_node, -90.0);
            }
            stage.set_opacity(nodes.description, 0.0);
            stage.set_translate_y(nodes.description, 60.0);
            stage.set_opacity(nodes.cta, 0.0);
            stage.set_translate_y(nodes.cta, 30.0);
            for link in &nodes.social {
                stage.set_opacity(*link, 0.0);
                stage.set_translate_y(*link, 20.0);
            }
        }

        // Never started: the scrub trigger owns the playhead
        let timeline = AnimatedTimeline::new(ctx.scheduler());

        let char_count = nodes.title_chars.len();
        let wave = StaggerBuilder::new(char_count).each_ms(if char_count > 1 {
            CHAR_WAVE_SPREAD_MS / (char_count - 1) as f32
        } else {
            0.0
        });
        let flip = Easing::BackOut { overshoot: 1.2 };

        let entries = ContactEntries {
            label: Lift::add(&timeline, 100.0, 400, 40.0, Easing::QuadOut),
            chars: (0..char_count)
                .map(|i| {
                    let at = 200.0 + wave.delay_for_index(i);
                    CharPose {
                        lift: Lift::add(&timeline, at, 800, 100.0, flip),
                        spin: timeline.add_at(
                            TimelinePosition::At(at),
                            800,
                            -90.0,
                            0.0,
                            flip,
                        ),
                    }
                })
                .collect(),
            description: Lift::add(&timeline, 600.0, 600, 60.0, Easing::QuadOut),
            cta: Lift::add(&timeline, 800.0, 500, 30.0, Easing::CubicOut),
            social: nodes
                .social
                .iter()
                .enumerate()
                .map(|(i, _)| {
                    Lift::add(&timeline, 900.0 + i as f32 * 100.0, 400, 20.0, Easing::CubicOut)
                })
                .collect(),
        };

        let trigger = stage
            .lock()
            .unwrap()
            .trigger_bounds(nodes.section)
            .map(|bounds| {
                ScrollTrigger::builder()
                    .start(TriggerPoint::top(0.6))
                    .end(TriggerPoint::top(0.2))
                    .bounds(bounds)
                    .scrub(true)
                    .register(&ctx.triggers())
            });

        tracing::debug!(
            chars = char_count,
            duration_ms = timeline.duration_ms(),
            "contact timeline built"
        );
        Self {
            stage,
            nodes,
            timeline: Some(timeline),
            entries: Some(entries),
            trigger,
        }
    }
}

impl Section for ContactSection {
    fn name(&self) -> &'static str {
        "contact"
    }

    fn sync(&mut self, _frame: &FrameState) {
        let (Some(timeline), Some(entries), Some(trigger)) =
            (&self.timeline, &self.entries, &self.trigger)
        else {
            return;
        };

        let progress = trigger.progress().unwrap_or(0.0);
        timeline.seek(progress * timeline.duration_ms());

        let label = entries.label.sample(timeline);
        let chars: Vec<(f32, f32, f32)> = entries
            .chars
            .iter()
            .map(|c| {
                let (opacity, offset) = c.lift.sample(timeline);
                let spin = c.spin.and_then(|id| timeline.get(id)).unwrap_or(0.0);
                (opacity, offset, spin)
            })
            .collect();
        let description = entries.description.sample(timeline);
        let cta = entries.cta.sample(timeline);
        let social: SmallVec<[(f32, f32); 4]> =
            entries.social.iter().map(|l| l.sample(timeline)).collect();

        let mut stage = self.stage.lock().unwrap();
        stage.set_opacity(self.nodes.label, label.0);
        stage.set_translate_y(self.nodes.label, label.1);
        for (node, (opacity, offset, spin)) in self.nodes.title_chars.iter().zip(chars) {
            stage.set_opacity(*node, opacity);
            stage.set_translate_y(*node, offset);
            stage.set_rotation(*node, spin);
        }
        stage.set_opacity(self.nodes.description, description.0);
        stage.set_translate_y(self.nodes.description, description.1);
        stage.set_opacity(self.nodes.cta, cta.0);
        stage.set_translate_y(self.nodes.cta, cta.1);
        for (node, (opacity, offset)) in self.nodes.social.iter().zip(social) {
            stage.set_opacity(*node, opacity);
            stage.set_translate_y(*node, offset);
        }
    }

    fn refresh(&mut self) {
        let bounds = self.stage.lock().unwrap().trigger_bounds(self.nodes.section);
        if let (Some(trigger), Some(bounds)) = (&self.trigger, bounds) {
            trigger.update_bounds(bounds);
        }
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
    const SECTION_TOP: f32 = 6000.0;

    fn fixture(motion: MotionPreference) -> (vitrine_animation::SharedScheduler, ChoreoContext) {
        let scheduler = AnimationScheduler::shared();
        let handle = SchedulerHandle::new(&scheduler);
        let triggers = Arc::new(Mutex::new(TriggerRegistry::with_viewport(VIEWPORT)));
        let ctx = ChoreoContext::new(Stage::shared(), handle, triggers, motion);
        (scheduler, ctx)
    }

    /// Five title characters and two social links under a section at 6000
    fn build_nodes(ctx: &ChoreoContext) -> ContactNodes {
        let stage = ctx.stage();
        let mut stage = stage.lock().unwrap();
        let section = stage.insert(
            VisualNode::new("contact").with_bounds(Rect::new(0.0, SECTION_TOP, 800.0, 1200.0)),
        );
        let label = stage.insert(VisualNode::new("contact-label"));
        let title_chars = (0..5)
            .map(|i| stage.insert(VisualNode::new(&format!("contact-char-{i}"))))
            .collect();
        let description = stage.insert(VisualNode::new("contact-desc"));
        let cta = stage.insert(VisualNode::new("contact-cta"));
        let social = (0..2)
            .map(|i| stage.insert(VisualNode::new(&format!("contact-social-{i}"))))
            .collect();
        ContactNodes {
            section,
            label,
            title_chars,
            description,
            cta,
            social,
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

    fn opacity(ctx: &ChoreoContext, node: NodeId) -> f32 {
        ctx.stage().lock().unwrap().opacity(node).unwrap()
    }

    #[test]
    fn test_construction_sets_the_hidden_pose() {
        let (_scheduler, ctx) = fixture(MotionPreference::Full);
        let nodes = build_nodes(&ctx);
        let _section = ContactSection::new(&ctx, nodes.clone());

        let stage = ctx.stage();
        let stage = stage.lock().unwrap();
        assert_eq!(stage.opacity(nodes.label), Some(0.0));
        assert_eq!(stage.translate(nodes.label).unwrap().y, 40.0);
        assert_eq!(stage.opacity(nodes.title_chars[0]), Some(0.0));
        assert_eq!(stage.translate(nodes.title_chars[0]).unwrap().y, 100.0);
        assert_eq!(stage.rotation(nodes.title_chars[0]), Some(-90.0));
        assert_eq!(stage.translate(nodes.social[1]).unwrap().y, 20.0);
    }

    #[test]
    fn test_seek_follows_trigger_progress() {
        let (_scheduler, ctx) = fixture(MotionPreference::Full);
        let nodes = build_nodes(&ctx);
        let mut section = ContactSection::new(&ctx, nodes.clone());

        // Range: 6000 - 0.6*800 = 5520 to 6000 - 0.2*800 = 5840.
        // Five chars spread 800ms from 200 puts the content end at
        // 1800ms, so half progress seeks to 900ms.
        ctx.triggers().lock().unwrap().process(5680.0);
        section.sync(&frame(5680.0));

        // Label (100..500ms) has played out
        assert_eq!(opacity(&ctx, nodes.label), 1.0);
        assert_eq!(
            ctx.stage().lock().unwrap().translate(nodes.label).unwrap().y,
            0.0
        );

        // Description (600..1200ms) is halfway: quad-out lands at 0.75
        assert!((opacity(&ctx, nodes.description) - 0.75).abs() < 1e-3);

        // The last social link starts exactly at 900ms
        assert_eq!(opacity(&ctx, nodes.social[0]), 0.0);
        assert_eq!(
            ctx.stage().lock().unwrap().translate(nodes.social[0]).unwrap().y,
            20.0
        );
    }

    #[test]
    fn test_character_wave_orders_by_index() {
        let (_scheduler, ctx) = fixture(MotionPreference::Full);
        let nodes = build_nodes(&ctx);
        let mut section = ContactSection::new(&ctx, nodes.clone());

        // Quarter progress seeks to 450ms: char starts are 200, 400,
        // 600.. so the first two are mid-flight and the rest wait
        ctx.triggers().lock().unwrap().process(5600.0);
        section.sync(&frame(5600.0));

        let first = opacity(&ctx, nodes.title_chars[0]);
        let second = opacity(&ctx, nodes.title_chars[1]);
        let third = opacity(&ctx, nodes.title_chars[2]);
        assert!(first > second, "wave order: {first} vs {second}");
        assert!(second > third, "wave order: {second} vs {third}");
        assert_eq!(third, 0.0);

        // Waiting characters hold the flipped pose
        let stage = ctx.stage();
        assert_eq!(stage.lock().unwrap().rotation(nodes.title_chars[4]), Some(-90.0));
    }

    #[test]
    fn test_scrubbing_back_rewinds_the_reveal() {
        let (_scheduler, ctx) = fixture(MotionPreference::Full);
        let nodes = build_nodes(&ctx);
        let mut section = ContactSection::new(&ctx, nodes.clone());

        ctx.triggers().lock().unwrap().process(6200.0);
        section.sync(&frame(6200.0));
        assert_eq!(opacity(&ctx, nodes.title_chars[4]), 1.0);
        assert_eq!(opacity(&ctx, nodes.social[1]), 1.0);
        assert_eq!(
            ctx.stage().lock().unwrap().rotation(nodes.title_chars[4]),
            Some(0.0)
        );

        // Back above the range: everything returns to hidden
        ctx.triggers().lock().unwrap().process(5000.0);
        section.sync(&frame(5000.0));
        assert_eq!(opacity(&ctx, nodes.title_chars[4]), 0.0);
        assert_eq!(opacity(&ctx, nodes.label), 0.0);
        assert_eq!(
            ctx.stage().lock().unwrap().rotation(nodes.title_chars[4]),
            Some(-90.0)
        );
    }

    #[test]
    fn test_reduced_motion_registers_nothing() {
        let (scheduler, ctx) = fixture(MotionPreference::Reduced);
        let nodes = build_nodes(&ctx);
        let mut section = ContactSection::new(&ctx, nodes.clone());

        assert!(ctx.triggers().lock().unwrap().is_empty());
        assert_eq!(scheduler.lock().unwrap().timeline_count(), 0);

        ctx.triggers().lock().unwrap().process(5680.0);
        section.sync(&frame(5680.0));
        section.refresh();

        assert_eq!(opacity(&ctx, nodes.label), 1.0);
        assert_eq!(opacity(&ctx, nodes.title_chars[0]), 1.0);
        assert_eq!(
            ctx.stage().lock().unwrap().rotation(nodes.title_chars[0]),
            Some(0.0)
        );
    }
}
