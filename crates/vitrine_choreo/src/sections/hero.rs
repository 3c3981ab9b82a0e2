//! Hero section
//!
//! Mount-time entrance for the four hero elements, a magnetic CTA, and
//! the bobbing scroll hint. Nothing here is scroll-bound; the entrance
//! plays once after a short hold and the hint loop runs until the
//! section is dropped.

use vitrine_animation::{
    AnimatedKeyframe, AnimatedTimeline, Easing, TimelineEntryId, TimelinePosition,
};

use vitrine_core::Vec2;

use crate::primitives::{ChoreoContext, EntranceConfig, MagneticHandle};
use crate::sections::{FrameState, Section};
use crate::stage::{NodeId, SharedStage};

/// Stage nodes the hero choreographs
#[derive(Clone, Copy, Debug)]
pub struct HeroNodes {
    pub title: NodeId,
    pub subtitle: NodeId,
    pub cta: NodeId,
    pub hint: NodeId,
}

impl HeroNodes {
    fn all(&self) -> [NodeId; 4] {
        [self.title, self.subtitle, self.cta, self.hint]
    }
}

struct FadeUp {
    opacity: Option<TimelineEntryId>,
    offset: Option<TimelineEntryId>,
}

fn fade_up(timeline: &AnimatedTimeline, at_ms: f32, duration_ms: u32) -> FadeUp {
    FadeUp {
        opacity: timeline.add_at(
            TimelinePosition::At(at_ms),
            duration_ms,
            0.0,
            1.0,
            Easing::QuartOut,
        ),
        offset: timeline.add_at(
            TimelinePosition::At(at_ms),
            duration_ms,
            40.0,
            0.0,
            Easing::QuartOut,
        ),
    }
}

struct Entrance {
    timeline: AnimatedTimeline,
    elements: [FadeUp; 4],
}

/// Hero choreographer
///
/// Under reduced motion every element stays at its visible rest pose,
/// the CTA does not follow the pointer, and the hint holds still.
pub struct HeroSection {
    stage: SharedStage,
    nodes: HeroNodes,
    entrance: Option<Entrance>,
    magnetic: MagneticHandle,
    hint_bob: Option<AnimatedKeyframe>,
}

impl HeroSection {
    pub fn new(ctx: &ChoreoContext, nodes: HeroNodes) -> Self {
        let stage = ctx.stage();

        let entrance = ctx
            .entrance_timeline(EntranceConfig { delay_s: 0.3 })
            .map(|timeline| {
                {
                    let mut stage = stage.lock().unwrap();
                    for node in nodes.all() {
                        stage.set_opacity(node, 0.0);
                        stage.set_translate_y(node, 40.0);
                    }
                }
                // Title leads; each later element overlaps the running
                // end by 400 / 300 / 200 ms
                let elements = [
                    fade_up(&timeline, 0.0, 800),
                    fade_up(&timeline, 400.0, 500),
                    fade_up(&timeline, 600.0, 500),
                    fade_up(&timeline, 900.0, 500),
                ];
                Entrance { timeline, elements }
            });

        let hint_bob = (!ctx.motion().is_reduced()).then(|| {
            AnimatedKeyframe::builder(ctx.scheduler(), 1000)
                .keyframe(0.0, 0.0)
                .keyframe_eased(1.0, 8.0, Easing::SineInOut)
                .ping_pong()
                .loop_infinite()
                .delay(2000.0)
                .auto_start(true)
                .build()
        });

        tracing::debug!(animated = entrance.is_some(), "hero section ready");
        Self {
            stage,
            nodes,
            entrance,
            magnetic: ctx.magnetic_follow(nodes.cta, MagneticHandle::DEFAULT_STRENGTH),
            hint_bob,
        }
    }

    pub fn is_entrance_done(&self) -> bool {
        match &self.entrance {
            Some(e) => !e.timeline.is_playing() && e.timeline.progress() >= 1.0,
            None => true,
        }
    }
}

impl Section for HeroSection {
    fn name(&self) -> &'static str {
        "hero"
    }

    fn sync(&mut self, frame: &FrameState) {
        if let Some(pointer) = frame.pointer {
            let over_cta = self
                .stage
                .lock()
                .unwrap()
                .node(self.nodes.cta)
                .map(|n| n.bounds.contains(pointer))
                .unwrap_or(false);
            if over_cta {
                self.magnetic.pointer_move(pointer);
            } else {
                self.magnetic.pointer_leave();
            }
        } else {
            self.magnetic.pointer_leave();
        }

        if let Some(entrance) = &self.entrance {
            // Sample every value source before touching the stage
            let bob = self.hint_bob.as_ref().map(|k| k.value()).unwrap_or(0.0);
            let pull = self.magnetic.displacement();
            let values: [(f32, f32); 4] = [
                entrance_values(entrance, 0),
                entrance_values(entrance, 1),
                entrance_values(entrance, 2),
                entrance_values(entrance, 3),
            ];

            let mut stage = self.stage.lock().unwrap();
            for (node, (opacity, offset)) in self.nodes.all().into_iter().zip(values) {
                stage.set_opacity(node, opacity);
                if node == self.nodes.cta {
                    // Entrance offset and magnetic pull share the translate
                    stage.set_translate(node, Vec2::new(pull.x, pull.y + offset));
                } else if node == self.nodes.hint {
                    stage.set_translate_y(node, offset + bob);
                } else {
                    stage.set_translate_y(node, offset);
                }
            }
        }
    }
}

fn entrance_values(entrance: &Entrance, index: usize) -> (f32, f32) {
    let element = &entrance.elements[index];
    let opacity = element
        .opacity
        .and_then(|id| entrance.timeline.get(id))
        .unwrap_or(1.0);
    let offset = element
        .offset
        .and_then(|id| entrance.timeline.get(id))
        .unwrap_or(0.0);
    (opacity, offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::{Stage, VisualNode};
    use std::sync::{Arc, Mutex};
    use vitrine_animation::{AnimationScheduler, SchedulerHandle};
    use vitrine_core::{MotionPreference, Point, Rect, Size};
    use vitrine_scroll::TriggerRegistry;

    fn fixture(motion: MotionPreference) -> (vitrine_animation::SharedScheduler, ChoreoContext) {
        let scheduler = AnimationScheduler::shared();
        let handle = SchedulerHandle::new(&scheduler);
        let triggers = Arc::new(Mutex::new(TriggerRegistry::with_viewport(800.0)));
        let ctx = ChoreoContext::new(Stage::shared(), handle, triggers, motion);
        (scheduler, ctx)
    }

    fn hero_nodes(ctx: &ChoreoContext) -> HeroNodes {
        let stage = ctx.stage();
        let mut stage = stage.lock().unwrap();
        HeroNodes {
            title: stage.insert(VisualNode::new("hero-title").with_bounds(Rect::new(
                100.0, 200.0, 600.0, 120.0,
            ))),
            subtitle: stage.insert(VisualNode::new("hero-subtitle").with_bounds(Rect::new(
                150.0, 340.0, 500.0, 60.0,
            ))),
            cta: stage.insert(
                VisualNode::new("hero-cta").with_bounds(Rect::new(300.0, 430.0, 200.0, 50.0)),
            ),
            hint: stage.insert(
                VisualNode::new("hero-hint").with_bounds(Rect::new(390.0, 740.0, 20.0, 40.0)),
            ),
        }
    }

    fn frame(pointer: Option<Point>) -> FrameState {
        FrameState {
            offset: 0.0,
            progress: 0.0,
            viewport: Size::new(800.0, 800.0),
            pointer,
            dt: 0.016,
        }
    }

    fn run(scheduler: &vitrine_animation::SharedScheduler, seconds: f32) {
        let frames = (seconds / 0.016).ceil() as usize;
        for _ in 0..frames {
            scheduler.lock().unwrap().tick(0.016);
        }
    }

    #[test]
    fn test_entrance_sequences_title_before_hint() {
        let (scheduler, ctx) = fixture(MotionPreference::Full);
        let nodes = hero_nodes(&ctx);
        let mut hero = HeroSection::new(&ctx, nodes);

        // Hidden pose applied at construction
        assert_eq!(ctx.stage().lock().unwrap().opacity(nodes.title), Some(0.0));

        // 300 ms delay + 400 ms: title mid-flight, hint untouched
        run(&scheduler, 0.7);
        hero.sync(&frame(None));
        let stage = ctx.stage();
        let title = stage.lock().unwrap().opacity(nodes.title).unwrap();
        let hint = stage.lock().unwrap().opacity(nodes.hint).unwrap();
        assert!(title > 0.5, "title opacity {title}");
        assert_eq!(hint, 0.0);
        assert!(!hero.is_entrance_done());

        // Past delay + 1.4 s sequence: everything settled at rest
        run(&scheduler, 1.2);
        hero.sync(&frame(None));
        for node in nodes.all() {
            assert_eq!(stage.lock().unwrap().opacity(node), Some(1.0));
        }
        assert_eq!(stage.lock().unwrap().translate(nodes.title), Some(vitrine_core::Vec2::ZERO));
        assert!(hero.is_entrance_done());
    }

    #[test]
    fn test_magnetic_cta_requires_pointer_over() {
        let (scheduler, ctx) = fixture(MotionPreference::Full);
        let nodes = hero_nodes(&ctx);
        let mut hero = HeroSection::new(&ctx, nodes);
        run(&scheduler, 2.0);

        // Pointer away from the CTA never engages it
        hero.sync(&frame(Some(Point::new(50.0, 50.0))));
        run(&scheduler, 0.5);
        hero.sync(&frame(Some(Point::new(50.0, 50.0))));
        let stage = ctx.stage();
        assert!(stage.lock().unwrap().translate(nodes.cta).unwrap().x.abs() < 0.01);

        // CTA bounds are 300..500 x 430..480; center (400, 455)
        let over = Point::new(460.0, 455.0);
        hero.sync(&frame(Some(over)));
        run(&scheduler, 1.0);
        hero.sync(&frame(Some(over)));
        let pulled = stage.lock().unwrap().translate(nodes.cta).unwrap();
        assert!((pulled.x - 18.0).abs() < 1.0, "pulled.x = {}", pulled.x);
    }

    #[test]
    fn test_hint_bobs_after_the_entrance() {
        let (scheduler, ctx) = fixture(MotionPreference::Full);
        let nodes = hero_nodes(&ctx);
        let mut hero = HeroSection::new(&ctx, nodes);

        // Bob delay is 2 s; sample mid-cycle afterwards
        run(&scheduler, 2.5);
        hero.sync(&frame(None));
        let stage = ctx.stage();
        let mid = stage.lock().unwrap().translate(nodes.hint).unwrap().y;
        assert!(mid > 0.5, "hint offset {mid}");
        assert!(mid <= 8.0);
    }

    #[test]
    fn test_reduced_motion_leaves_hero_at_rest() {
        let (scheduler, ctx) = fixture(MotionPreference::Reduced);
        let nodes = hero_nodes(&ctx);
        let mut hero = HeroSection::new(&ctx, nodes);

        run(&scheduler, 1.0);
        hero.sync(&frame(Some(Point::new(400.0, 455.0))));
        let stage = ctx.stage();
        for node in nodes.all() {
            assert_eq!(stage.lock().unwrap().opacity(node), Some(1.0));
            assert_eq!(
                stage.lock().unwrap().translate(node),
                Some(vitrine_core::Vec2::ZERO)
            );
        }
        assert_eq!(scheduler.lock().unwrap().active_count(), 0);
    }
}
