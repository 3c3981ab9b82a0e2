//! Decorative layers: floating shapes, the particle field, and the
//! custom cursor pair.
//!
//! The backdrop is an explicitly owned resource. Construction seeds
//! every random draw from one stream, so equal seeds reproduce the
//! whole arrangement; dropping it removes its stage nodes and cancels
//! every loop. Under reduced motion the backdrop is inert: static
//! shapes, no particle state, no cursor, nothing registered with the
//! scheduler.

pub mod cursor;
pub mod particles;
pub mod rng;
pub mod shapes;

pub use cursor::CursorFollower;
pub use particles::{Connection, Particle, ParticleField, CONNECTION_DISTANCE, POINTER_INFLUENCE};
pub use rng::ChoreoRng;
pub use shapes::{ShapeKind, ShapeLayer, ShapeSpec, REST_OPACITY, SHAPE_SPECS};

use vitrine_core::{Point, Size};

use crate::primitives::ChoreoContext;
use crate::sections::FrameState;

#[derive(Clone, Copy, Debug)]
pub struct BackdropConfig {
    pub viewport: Size,
    /// Seed for all decorative randomness
    pub seed: u64,
    /// False on touch devices; skips the cursor pair
    pub pointer: bool,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            viewport: Size::new(1280.0, 800.0),
            seed: 0,
            pointer: true,
        }
    }
}

pub struct Backdrop {
    shapes: ShapeLayer,
    field: Option<ParticleField>,
    cursor: Option<CursorFollower>,
    pointer: Option<Point>,
}

impl Backdrop {
    pub fn new(ctx: &ChoreoContext, config: BackdropConfig) -> Self {
        let mut rng = ChoreoRng::new(config.seed);
        let shapes = ShapeLayer::new(ctx, config.viewport, &mut rng);
        let reduced = ctx.motion().is_reduced();
        let field = (!reduced).then(|| ParticleField::new(config.viewport, rng.next_u64()));
        let cursor = (!reduced && config.pointer).then(|| CursorFollower::new(ctx));
        tracing::debug!(
            particles = field.as_ref().map(|f| f.len()).unwrap_or(0),
            cursor = cursor.is_some(),
            "backdrop ready"
        );
        Self {
            shapes,
            field,
            cursor,
            pointer: None,
        }
    }

    pub fn pointer_move(&mut self, point: Point) {
        self.pointer = Some(point);
        if let Some(cursor) = &mut self.cursor {
            cursor.pointer_move(point);
        }
    }

    pub fn pointer_leave(&mut self) {
        self.pointer = None;
        if let Some(cursor) = &mut self.cursor {
            cursor.pointer_leave();
        }
    }

    pub fn resize(&mut self, viewport: Size) {
        self.shapes.resize(viewport);
        if let Some(field) = &mut self.field {
            field.resize(viewport);
        }
    }

    pub fn sync(&mut self, frame: &FrameState) {
        self.shapes.sync(frame);
        if let Some(field) = &mut self.field {
            field.step(frame.dt, self.pointer);
        }
        if let Some(cursor) = &mut self.cursor {
            cursor.sync();
        }
    }

    pub fn shapes(&self) -> &ShapeLayer {
        &self.shapes
    }

    pub fn particles(&self) -> Option<&ParticleField> {
        self.field.as_ref()
    }
}
