//! Scroll progress indicator
//!
//! A fixed rail of one dot per section plus a document-progress fill.
//! A section becomes current when its midpoint band holds the viewport
//! center; entering from either direction updates the active index. The
//! rail stays hidden until the page has scrolled past a small threshold,
//! and the whole indicator flips to dark ink while a light installation
//! background is up.
//!
//! Under reduced motion nothing registers: visibility snaps instead of
//! fading and the active index is recomputed from layout each frame, so
//! the nav stays fully functional without a single animation.

use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};

use vitrine_animation::{AnimatedValue, SpringConfig};
use vitrine_core::{Color, MotionPreference, Vec2};
use vitrine_scroll::{ScrollTrigger, SmoothScrollController, TriggerHandle, TriggerPoint};

use crate::primitives::{scroll_target, ChoreoContext, LightBgFlag};
use crate::sections::FrameState;
use crate::stage::{NodeId, SharedStage};

/// Scroll offset below which the rail stays hidden, in pixels
pub const NAV_REVEAL_OFFSET: f32 = 200.0;

const ACTIVE_DOT_SCALE: f32 = 1.0;
const INACTIVE_DOT_SCALE: f32 = 0.75;
const ACTIVE_DOT_OPACITY: f32 = 1.0;
const INACTIVE_DOT_OPACITY: f32 = 0.4;

/// Stage nodes the indicator owns
#[derive(Clone, Debug)]
pub struct NavNodes {
    /// The fixed rail container
    pub root: NodeId,
    /// Progress fill, scaled vertically by document fraction
    pub bar: NodeId,
    /// One dot per tracked section, same order as the sections
    pub dots: Vec<NodeId>,
}

/// Section rail indicator
pub struct ScrollProgressNav {
    stage: SharedStage,
    nodes: NavNodes,
    /// Watched section roots, aligned with `nodes.dots`
    sections: Vec<NodeId>,
    active: Arc<Mutex<usize>>,
    triggers: Vec<TriggerHandle>,
    visibility: Option<AnimatedValue>,
    light: LightBgFlag,
    motion: MotionPreference,
}

impl ScrollProgressNav {
    pub fn new(ctx: &ChoreoContext, nodes: NavNodes, sections: Vec<NodeId>) -> Self {
        let stage = ctx.stage();
        let active = Arc::new(Mutex::new(0));

        let (triggers, visibility) = if ctx.motion().is_reduced() {
            (Vec::new(), None)
        } else {
            let registry = ctx.triggers();
            let handles = sections
                .iter()
                .enumerate()
                .filter_map(|(index, section)| {
                    let bounds = stage.lock().unwrap().trigger_bounds(*section)?;
                    let select = |active: &Arc<Mutex<usize>>| {
                        let active = Arc::clone(active);
                        move || *active.lock().unwrap() = index
                    };
                    Some(
                        ScrollTrigger::builder()
                            .start(TriggerPoint::top(0.5))
                            .end(TriggerPoint::bottom(0.5))
                            .bounds(bounds)
                            .on_enter(select(&active))
                            .on_enter_back(select(&active))
                            .register(&registry),
                    )
                })
                .collect();
            // Percent, not ratio: settle thresholds are pixel-tuned
            let fade = AnimatedValue::new(ctx.scheduler(), 0.0, SpringConfig::gentle());
            (handles, Some(fade))
        };

        tracing::debug!(sections = sections.len(), "nav indicator ready");
        Self {
            stage,
            nodes,
            sections,
            active,
            triggers,
            visibility,
            light: ctx.light_bg(),
            motion: ctx.motion(),
        }
    }

    pub fn active_index(&self) -> usize {
        *self.active.lock().unwrap()
    }

    /// Glide the target section into view, leaving breathing room above
    pub fn click(&self, index: usize, controller: &SmoothScrollController) {
        let Some(section) = self.sections.get(index).copied() else {
            return;
        };
        let top = match self.stage.lock().unwrap().bounds(section) {
            Some(bounds) => bounds.y(),
            None => return,
        };
        tracing::debug!(index, top, "nav click");
        controller.scroll_to(scroll_target(top));
    }

    /// Section whose midpoint band holds the viewport center line
    fn locate(&self, offset: f32, viewport_h: f32) -> Option<usize> {
        let center = offset + viewport_h * 0.5;
        let stage = self.stage.lock().unwrap();
        self.sections.iter().position(|section| {
            stage
                .bounds(*section)
                .map(|b| center >= b.y() && center < b.y() + b.height())
                .unwrap_or(false)
        })
    }

    pub fn sync(&mut self, frame: &FrameState) {
        let shown = frame.offset > NAV_REVEAL_OFFSET;
        let visibility = match &mut self.visibility {
            Some(fade) => {
                fade.set_target(if shown { 100.0 } else { 0.0 });
                fade.get() / 100.0
            }
            None => {
                if shown {
                    1.0
                } else {
                    0.0
                }
            }
        };

        if self.motion.is_reduced() {
            if let Some(index) = self.locate(frame.offset, frame.viewport.height) {
                *self.active.lock().unwrap() = index;
            }
        }
        let active = *self.active.lock().unwrap();
        let ink = if self.light.load(Ordering::SeqCst) {
            Color::BLACK
        } else {
            Color::WHITE
        };

        let mut stage = self.stage.lock().unwrap();
        stage.set_opacity(self.nodes.root, visibility);
        stage.set_opacity(self.nodes.bar, visibility);
        stage.set_scale(self.nodes.bar, Vec2::new(1.0, frame.progress));
        stage.set_color(self.nodes.bar, ink);
        for (index, dot) in self.nodes.dots.iter().enumerate() {
            let (scale, opacity) = if index == active {
                (ACTIVE_DOT_SCALE, ACTIVE_DOT_OPACITY)
            } else {
                (INACTIVE_DOT_SCALE, INACTIVE_DOT_OPACITY)
            };
            stage.set_uniform_scale(*dot, scale);
            stage.set_opacity(*dot, visibility * opacity);
            stage.set_color(*dot, ink);
        }
    }

    /// Re-resolve section bounds after a relayout
    pub fn refresh(&mut self) {
        let bounds: Vec<_> = {
            let stage = self.stage.lock().unwrap();
            self.sections
                .iter()
                .map(|section| stage.trigger_bounds(*section))
                .collect()
        };
        for (trigger, bounds) in self.triggers.iter().zip(bounds) {
            if let Some(bounds) = bounds {
                trigger.update_bounds(bounds);
            }
        }
    }
}
