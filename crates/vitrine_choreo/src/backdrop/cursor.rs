//! Custom cursor pair: a dot that tracks the pointer immediately and a
//! ring that follows through a spring. Hovering an interactive node
//! swells the ring and hides the dot. Both stay hidden until the
//! pointer first arrives and whenever it leaves the window.

use vitrine_animation::{AnimatedValue, SpringConfig};
use vitrine_core::{Point, Vec2};

use crate::primitives::ChoreoContext;
use crate::stage::{NodeId, SharedStage, VisualNode};

/// Ring scale while hovering an interactive node
const HOVER_SCALE: f32 = 1.5;

pub struct CursorFollower {
    stage: SharedStage,
    dot: NodeId,
    ring: NodeId,
    ring_x: AnimatedValue,
    ring_y: AnimatedValue,
    ring_scale: AnimatedValue,
    pointer: Option<Point>,
}

impl CursorFollower {
    pub fn new(ctx: &ChoreoContext) -> Self {
        let stage = ctx.stage();
        let (dot, ring) = {
            let mut stage = stage.lock().unwrap();
            (
                stage.insert(VisualNode::new("cursor-dot").with_opacity(0.0).decorative()),
                stage.insert(VisualNode::new("cursor-ring").with_opacity(0.0).decorative()),
            )
        };
        Self {
            stage,
            dot,
            ring,
            ring_x: AnimatedValue::new(ctx.scheduler(), 0.0, SpringConfig::snappy()),
            ring_y: AnimatedValue::new(ctx.scheduler(), 0.0, SpringConfig::snappy()),
            // Percent, not ratio: settle thresholds are pixel-tuned
            ring_scale: AnimatedValue::new(ctx.scheduler(), 100.0, SpringConfig::snappy()),
            pointer: None,
        }
    }

    pub fn dot(&self) -> NodeId {
        self.dot
    }

    pub fn ring(&self) -> NodeId {
        self.ring
    }

    /// The dot jumps to the pointer; the ring's springs chase it
    pub fn pointer_move(&mut self, point: Point) {
        self.pointer = Some(point);
        self.stage
            .lock()
            .unwrap()
            .set_translate(self.dot, Vec2::new(point.x, point.y));
        self.ring_x.set_target(point.x);
        self.ring_y.set_target(point.y);
    }

    pub fn pointer_leave(&mut self) {
        self.pointer = None;
    }

    pub fn sync(&mut self) {
        let Some(point) = self.pointer else {
            let mut stage = self.stage.lock().unwrap();
            stage.set_opacity(self.dot, 0.0);
            stage.set_opacity(self.ring, 0.0);
            return;
        };

        let hovering = self.stage.lock().unwrap().hit_test(point).is_some();
        self.ring_scale
            .set_target(if hovering { HOVER_SCALE * 100.0 } else { 100.0 });
        let ring_pos = Vec2::new(self.ring_x.get(), self.ring_y.get());
        let ring_scale = self.ring_scale.get() / 100.0;

        let mut stage = self.stage.lock().unwrap();
        stage.set_opacity(self.dot, if hovering { 0.0 } else { 1.0 });
        stage.set_opacity(self.ring, 1.0);
        stage.set_translate(self.ring, ring_pos);
        stage.set_uniform_scale(self.ring, ring_scale);
    }
}

impl Drop for CursorFollower {
    fn drop(&mut self) {
        let mut stage = self.stage.lock().unwrap();
        stage.remove(self.dot);
        stage.remove(self.ring);
    }
}
