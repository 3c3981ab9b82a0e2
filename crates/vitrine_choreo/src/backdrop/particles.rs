//! Drifting particle field with proximity connections.
//!
//! Pure simulation state, no stage nodes: a renderer samples
//! [`ParticleField::particles`] and [`ParticleField::connections`] each
//! frame. Particles drift with damped velocity, are drawn toward the
//! pointer inside its influence radius, and wrap at the viewport edges,
//! so every particle stays inside the viewport after any number of
//! steps. Near pairs are joined by connection lines whose alpha falls
//! off with distance.

use vitrine_core::{Point, Size, Vec2};

use super::rng::ChoreoRng;

/// Pairs closer than this are joined by a line, in pixels
pub const CONNECTION_DISTANCE: f32 = 150.0;
/// Pointer attraction radius, in pixels
pub const POINTER_INFLUENCE: f32 = 200.0;

const MAX_PARTICLES: usize = 60;
const PIXELS_PER_PARTICLE: f32 = 25.0;
const DAMPING: f32 = 0.99;
const ATTRACTION: f32 = 0.02;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    /// Velocity in pixels per 60 Hz frame
    pub vel: Vec2,
    pub size: f32,
    pub alpha: f32,
}

/// A line between two near particles, by index
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    pub alpha: f32,
}

pub struct ParticleField {
    particles: Vec<Particle>,
    viewport: Size,
    rng: ChoreoRng,
}

impl ParticleField {
    pub fn new(viewport: Size, seed: u64) -> Self {
        let mut field = Self {
            particles: Vec::new(),
            viewport,
            rng: ChoreoRng::new(seed),
        };
        field.populate();
        field
    }

    fn populate(&mut self) {
        let count = MAX_PARTICLES.min((self.viewport.width / PIXELS_PER_PARTICLE) as usize);
        self.particles = (0..count)
            .map(|_| Particle {
                pos: Vec2::new(
                    self.rng.range_f32(0.0, self.viewport.width),
                    self.rng.range_f32(0.0, self.viewport.height),
                ),
                vel: Vec2::new(
                    self.rng.range_f32(-0.15, 0.15),
                    self.rng.range_f32(-0.15, 0.15),
                ),
                size: self.rng.range_f32(1.0, 3.0),
                alpha: self.rng.range_f32(0.1, 0.6),
            })
            .collect();
        tracing::debug!(count, "particle field populated");
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// The field draws fresh positions for the new viewport
    pub fn resize(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.populate();
    }

    /// Advance the simulation; velocities are tuned for 60 Hz frames and
    /// scaled by `dt`
    pub fn step(&mut self, dt: f32, pointer: Option<Point>) {
        let frames = dt * 60.0;
        let damping = DAMPING.powf(frames);
        for p in &mut self.particles {
            if let Some(target) = pointer {
                let dx = target.x - p.pos.x;
                let dy = target.y - p.pos.y;
                let dist = (dx * dx + dy * dy).sqrt();
                if dist > f32::EPSILON && dist < POINTER_INFLUENCE {
                    let force = (POINTER_INFLUENCE - dist) / POINTER_INFLUENCE;
                    p.vel.x += dx / dist * force * ATTRACTION * frames;
                    p.vel.y += dy / dist * force * ATTRACTION * frames;
                }
            }

            p.pos.x += p.vel.x * frames;
            p.pos.y += p.vel.y * frames;
            p.vel.x *= damping;
            p.vel.y *= damping;

            // Wrap: leaving one edge re-enters at the opposite edge
            if p.pos.x < 0.0 {
                p.pos.x = self.viewport.width;
            }
            if p.pos.x > self.viewport.width {
                p.pos.x = 0.0;
            }
            if p.pos.y < 0.0 {
                p.pos.y = self.viewport.height;
            }
            if p.pos.y > self.viewport.height {
                p.pos.y = 0.0;
            }
        }
    }

    /// All pairs within connection distance, each once with `a < b`
    pub fn connections(&self) -> Vec<Connection> {
        let mut lines = Vec::new();
        for a in 0..self.particles.len() {
            for b in (a + 1)..self.particles.len() {
                let dist = pair_distance(&self.particles[a], &self.particles[b]);
                if dist < CONNECTION_DISTANCE {
                    lines.push(Connection {
                        a,
                        b,
                        alpha: (1.0 - dist / CONNECTION_DISTANCE) * 0.15,
                    });
                }
            }
        }
        lines
    }
}

fn pair_distance(a: &Particle, b: &Particle) -> f32 {
    let dx = a.pos.x - b.pos.x;
    let dy = a.pos.y - b.pos.y;
    (dx * dx + dy * dy).sqrt()
}
