//! Floating geometric shapes behind the page content.
//!
//! Eight solid shapes enter with a randomized stagger, then idle on
//! infinite loops: every shape drifts, diamonds spin, semicircles sway,
//! and the large ones pulse. Scroll adds a per-shape parallax shift
//! proportional to the shape's index, and the whole layer fades out
//! while a light installation background is up.
//!
//! Loop channels compose additively on top of the entrance so the
//! handoff from entrance to idle is continuous: each loop starts at the
//! entrance's final value for its channel.

use vitrine_animation::{
    AnimatedKeyframe, AnimatedTimeline, AnimatedValue, Easing, SchedulerHandle, SpringConfig,
    TimelineEntryId, TimelinePosition,
};
use vitrine_core::{Color, MotionPreference, Rect, Size, Vec2};

use super::rng::ChoreoRng;
use crate::primitives::{ChoreoContext, LightBgFlag};
use crate::sections::FrameState;
use crate::stage::{NodeId, SharedStage, VisualNode};

/// Accent palette shared by the decorative layers
pub mod palette {
    pub const PINK: u32 = 0xFF6B9D;
    pub const YELLOW: u32 = 0xFFD93D;
    pub const BLUE: u32 = 0x5DADE2;
    pub const PURPLE: u32 = 0xA78BFA;
    pub const CORAL: u32 = 0xFF8A80;
    pub const MINT: u32 = 0x64FFDA;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Circle,
    Semicircle,
    Triangle,
    Diamond,
    Square,
}

/// Static description of one floating shape
#[derive(Clone, Copy, Debug)]
pub struct ShapeSpec {
    pub kind: ShapeKind,
    pub color: u32,
    pub size: f32,
    /// Horizontal anchor as a fraction of viewport width
    pub x: f32,
    /// Vertical anchor as a fraction of viewport height
    pub y: f32,
}

pub const SHAPE_SPECS: [ShapeSpec; 8] = [
    ShapeSpec { kind: ShapeKind::Circle, color: palette::PINK, size: 90.0, x: 0.85, y: 0.15 },
    ShapeSpec { kind: ShapeKind::Semicircle, color: palette::YELLOW, size: 80.0, x: 0.75, y: 0.45 },
    ShapeSpec { kind: ShapeKind::Diamond, color: palette::BLUE, size: 70.0, x: 0.60, y: 0.70 },
    ShapeSpec { kind: ShapeKind::Square, color: palette::PURPLE, size: 50.0, x: 0.90, y: 0.55 },
    ShapeSpec { kind: ShapeKind::Triangle, color: palette::CORAL, size: 55.0, x: 0.55, y: 0.35 },
    ShapeSpec { kind: ShapeKind::Circle, color: palette::YELLOW, size: 30.0, x: 0.70, y: 0.20 },
    ShapeSpec { kind: ShapeKind::Circle, color: palette::BLUE, size: 20.0, x: 0.80, y: 0.75 },
    ShapeSpec { kind: ShapeKind::Diamond, color: palette::PINK, size: 25.0, x: 0.65, y: 0.60 },
];

/// Settled opacity after the entrance
pub const REST_OPACITY: f32 = 0.75;

const ENTRANCE_DELAY_MS: f32 = 300.0;
const ENTRANCE_MS: u32 = 1000;
const STAGGER_TOTAL_MS: f32 = 800.0;
const PULSE_SIZE_THRESHOLD: f32 = 60.0;
const PARALLAX_BASE: f32 = 0.20;
const PARALLAX_STEP: f32 = 0.08;

struct ShapeEntries {
    opacity: TimelineEntryId,
    scale: TimelineEntryId,
    rotation: TimelineEntryId,
}

struct ShapeLoops {
    drift_x: AnimatedKeyframe,
    drift_y: AnimatedKeyframe,
    spin: Option<AnimatedKeyframe>,
    sway: Option<AnimatedKeyframe>,
    pulse_scale: Option<AnimatedKeyframe>,
    pulse_opacity: Option<AnimatedKeyframe>,
}

/// Sine wave between `from` and `to`, looping forever
fn wave(
    handle: SchedulerHandle,
    duration_ms: u32,
    from: f32,
    to: f32,
    delay_ms: f32,
) -> AnimatedKeyframe {
    AnimatedKeyframe::builder(handle, duration_ms)
        .keyframe(0.0, from)
        .keyframe_eased(1.0, to, Easing::SineInOut)
        .ping_pong()
        .loop_infinite()
        .delay(delay_ms)
        .auto_start(true)
        .build()
}

/// The floating shape layer
pub struct ShapeLayer {
    stage: SharedStage,
    nodes: Vec<NodeId>,
    entrance: Option<AnimatedTimeline>,
    entries: Vec<ShapeEntries>,
    loops: Vec<ShapeLoops>,
    layer_alpha: Option<AnimatedValue>,
    light: LightBgFlag,
    motion: MotionPreference,
}

impl ShapeLayer {
    pub fn new(ctx: &ChoreoContext, viewport: Size, rng: &mut ChoreoRng) -> Self {
        let stage = ctx.stage();
        let motion = ctx.motion();

        let initial_opacity = if motion.is_reduced() { REST_OPACITY } else { 0.0 };
        let nodes: Vec<NodeId> = {
            let mut stage = stage.lock().unwrap();
            SHAPE_SPECS
                .iter()
                .enumerate()
                .map(|(i, spec)| {
                    stage.insert(
                        VisualNode::new(format!("shape-{i}"))
                            .with_bounds(anchor_bounds(spec, viewport))
                            .with_color(Color::from_hex(spec.color))
                            .with_opacity(initial_opacity)
                            .decorative(),
                    )
                })
                .collect()
        };

        if motion.is_reduced() {
            return Self {
                stage,
                nodes,
                entrance: None,
                entries: Vec::new(),
                loops: Vec::new(),
                layer_alpha: None,
                light: ctx.light_bg(),
                motion,
            };
        }

        // Randomized stagger: each shape takes one slot of the 0.8 s spread
        let slot_ms = STAGGER_TOTAL_MS / (SHAPE_SPECS.len() - 1) as f32;
        let mut slots: Vec<f32> = (0..SHAPE_SPECS.len()).map(|k| k as f32 * slot_ms).collect();
        rng.shuffle(&mut slots);
        let tilts: Vec<f32> = SHAPE_SPECS.iter().map(|_| rng.range_f32(-90.0, 90.0)).collect();

        let entrance = AnimatedTimeline::new(ctx.scheduler());
        let ids = entrance.configure(|t| {
            t.set_delay(ENTRANCE_DELAY_MS);
            let pop = Easing::BackOut { overshoot: 1.5 };
            let mut ids = Vec::with_capacity(SHAPE_SPECS.len() * 3);
            for (slot, tilt) in slots.iter().zip(&tilts) {
                let at = TimelinePosition::At(*slot);
                ids.push(t.add_at(at, ENTRANCE_MS, 0.0, REST_OPACITY, pop));
                ids.push(t.add_at(at, ENTRANCE_MS, 0.0, 1.0, pop));
                ids.push(t.add_at(at, ENTRANCE_MS, *tilt, 0.0, pop));
            }
            ids
        });
        entrance.start();
        let entries = ids
            .unwrap_or_default()
            .chunks(3)
            .map(|c| ShapeEntries {
                opacity: c[0],
                scale: c[1],
                rotation: c[2],
            })
            .collect();

        let loops = SHAPE_SPECS
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let dx = rng.range_f32(-20.0, 20.0);
                let dy = rng.range_f32(-15.0, 15.0);
                let drift_ms = (rng.range_f32(10.0, 16.0) * 1000.0) as u32;
                let drift_delay = i as f32 * 200.0;
                let spin = (spec.kind == ShapeKind::Diamond).then(|| {
                    let spin_ms = (rng.range_f32(40.0, 60.0) * 1000.0) as u32;
                    AnimatedKeyframe::builder(ctx.scheduler(), spin_ms)
                        .keyframe(0.0, 0.0)
                        .keyframe(1.0, 360.0)
                        .loop_infinite()
                        .auto_start(true)
                        .build()
                });
                let sway = (spec.kind == ShapeKind::Semicircle).then(|| {
                    let reach = rng.range_f32(-8.0, 8.0);
                    let sway_ms = (rng.range_f32(6.0, 10.0) * 1000.0) as u32;
                    wave(ctx.scheduler(), sway_ms, 0.0, reach, 0.0)
                });
                let (pulse_scale, pulse_opacity) = if spec.size > PULSE_SIZE_THRESHOLD {
                    let scale_to = rng.range_f32(0.92, 1.08);
                    let opacity_to = rng.range_f32(0.6, 0.85);
                    let pulse_ms = (rng.range_f32(4.0, 6.0) * 1000.0) as u32;
                    let delay = i as f32 * 300.0;
                    (
                        Some(wave(ctx.scheduler(), pulse_ms, 1.0, scale_to, delay)),
                        Some(wave(ctx.scheduler(), pulse_ms, REST_OPACITY, opacity_to, delay)),
                    )
                } else {
                    (None, None)
                };
                ShapeLoops {
                    drift_x: wave(ctx.scheduler(), drift_ms, 0.0, dx, drift_delay),
                    drift_y: wave(ctx.scheduler(), drift_ms, 0.0, dy, drift_delay),
                    spin,
                    sway,
                    pulse_scale,
                    pulse_opacity,
                }
            })
            .collect();

        // Percent, not ratio: settle thresholds are pixel-tuned
        let layer_alpha = AnimatedValue::new(ctx.scheduler(), 100.0, SpringConfig::gentle());
        tracing::debug!(shapes = SHAPE_SPECS.len(), "shape layer ready");

        Self {
            stage,
            nodes,
            entrance: Some(entrance),
            entries,
            loops,
            layer_alpha: Some(layer_alpha),
            light: ctx.light_bg(),
            motion,
        }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn sync(&mut self, frame: &FrameState) {
        if self.motion.is_reduced() {
            return;
        }

        let layer = match &mut self.layer_alpha {
            Some(alpha) => {
                let lit = self.light.load(std::sync::atomic::Ordering::SeqCst);
                alpha.set_target(if lit { 0.0 } else { 100.0 });
                alpha.get() / 100.0
            }
            None => 1.0,
        };

        let mut poses = Vec::with_capacity(self.nodes.len());
        for (i, spec) in SHAPE_SPECS.iter().enumerate() {
            let (ent_opacity, ent_scale, ent_rotation) = match self.entries.get(i) {
                Some(e) => {
                    let tl = self.entrance.as_ref();
                    (
                        tl.and_then(|t| t.get(e.opacity)).unwrap_or(REST_OPACITY),
                        tl.and_then(|t| t.get(e.scale)).unwrap_or(1.0),
                        tl.and_then(|t| t.get(e.rotation)).unwrap_or(0.0),
                    )
                }
                None => (REST_OPACITY, 1.0, 0.0),
            };
            let (drift_x, drift_y, spin, sway, pulse_scale, pulse_opacity) =
                match self.loops.get(i) {
                    Some(l) => (
                        l.drift_x.value(),
                        l.drift_y.value(),
                        l.spin.as_ref().map(|k| k.value()).unwrap_or(0.0),
                        l.sway.as_ref().map(|k| k.value()).unwrap_or(0.0),
                        l.pulse_scale.as_ref().map(|k| k.value() - 1.0).unwrap_or(0.0),
                        l.pulse_opacity
                            .as_ref()
                            .map(|k| k.value() - REST_OPACITY)
                            .unwrap_or(0.0),
                    ),
                    None => (0.0, 0.0, 0.0, 0.0, 0.0, 0.0),
                };

            let parallax = (PARALLAX_BASE + PARALLAX_STEP * i as f32) * spec.size * frame.progress;
            poses.push((
                (ent_opacity + pulse_opacity) * layer,
                ent_scale + pulse_scale,
                ent_rotation + spin + sway,
                Vec2::new(drift_x, drift_y + parallax),
            ));
        }

        let mut stage = self.stage.lock().unwrap();
        for (node, (opacity, scale, rotation, translate)) in self.nodes.iter().zip(poses) {
            stage.set_opacity(*node, opacity);
            stage.set_uniform_scale(*node, scale);
            stage.set_rotation(*node, rotation);
            stage.set_translate(*node, translate);
        }
    }

    /// Re-anchor every shape against a new viewport
    pub fn resize(&mut self, viewport: Size) {
        let mut stage = self.stage.lock().unwrap();
        for (node, spec) in self.nodes.iter().zip(SHAPE_SPECS.iter()) {
            stage.set_bounds(*node, anchor_bounds(spec, viewport));
        }
    }
}

impl Drop for ShapeLayer {
    fn drop(&mut self) {
        let mut stage = self.stage.lock().unwrap();
        for node in &self.nodes {
            stage.remove(*node);
        }
    }
}

fn anchor_bounds(spec: &ShapeSpec, viewport: Size) -> Rect {
    Rect::new(
        spec.x * viewport.width - spec.size * 0.5,
        spec.y * viewport.height - spec.size * 0.5,
        spec.size,
        spec.size,
    )
}
