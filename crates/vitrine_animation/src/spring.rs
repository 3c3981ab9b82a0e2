//! Spring physics
//!
//! RK4-integrated springs drive every pointer-chasing value in the
//! choreography: the magnetic CTA displacement, the cursor ring, and the
//! nav indicator fades. Springs are interruptible; retargeting mid-flight
//! keeps the current velocity so motion never pops.

/// Configuration for a spring animation
#[derive(Clone, Copy, Debug)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    /// Create a new spring configuration
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// A gentle, slow spring (nav indicator fades)
    pub fn gentle() -> Self {
        Self {
            stiffness: 120.0,
            damping: 14.0,
            mass: 1.0,
        }
    }

    /// A wobbly spring with visible overshoot (magnetic return)
    pub fn wobbly() -> Self {
        Self {
            stiffness: 180.0,
            damping: 12.0,
            mass: 1.0,
        }
    }

    /// A stiff, responsive spring (magnetic attraction while hovering)
    pub fn stiff() -> Self {
        Self {
            stiffness: 400.0,
            damping: 30.0,
            mass: 1.0,
        }
    }

    /// A very stiff spring with minimal oscillation (cursor ring follow)
    pub fn snappy() -> Self {
        Self {
            stiffness: 600.0,
            damping: 40.0,
            mass: 1.0,
        }
    }

    /// A slow spring with no overshoot (smoothed scroll-adjacent values)
    pub fn molasses() -> Self {
        Self {
            stiffness: 100.0,
            damping: 20.0,
            mass: 1.0,
        }
    }

    /// Calculate critical damping for this spring's stiffness and mass
    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Check if the spring is underdamped (will oscillate)
    pub fn is_underdamped(&self) -> bool {
        self.damping < self.critical_damping()
    }

    /// Check if the spring is overdamped (settles slowly, never oscillates)
    pub fn is_overdamped(&self) -> bool {
        self.damping > self.critical_damping()
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::stiff()
    }
}

/// Settle threshold in pixel units: within half a pixel of target
pub const SETTLE_EPSILON: f32 = 0.5;
/// Settle threshold on velocity, in px/s
pub const SETTLE_VELOCITY_EPSILON: f32 = 5.0;

/// A spring-based animator for a single scalar
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    /// Create a spring already in motion (inherited velocity)
    pub fn with_velocity(config: SpringConfig, initial: f32, velocity: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity,
            target: initial,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Retarget the spring; current position and velocity carry over
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Inject velocity (e.g. from a pointer gesture hand-off)
    pub fn set_velocity(&mut self, velocity: f32) {
        self.velocity = velocity;
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    /// Swap the feel mid-flight; position and velocity carry over
    pub fn set_config(&mut self, config: SpringConfig) {
        self.config = config;
    }

    /// Check if the spring has settled (within epsilon of target with minimal velocity)
    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < SETTLE_EPSILON
            && self.velocity.abs() < SETTLE_VELOCITY_EPSILON
    }

    /// Step the spring simulation using RK4 integration
    pub fn step(&mut self, dt: f32) {
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
            return;
        }

        // Derivative of (position, velocity) state
        let deriv = |x: f32, v: f32| -> (f32, f32) { (v, self.acceleration(x, v)) };

        let (k1_x, k1_v) = deriv(self.value, self.velocity);
        let (k2_x, k2_v) = deriv(
            self.value + k1_x * dt * 0.5,
            self.velocity + k1_v * dt * 0.5,
        );
        let (k3_x, k3_v) = deriv(
            self.value + k2_x * dt * 0.5,
            self.velocity + k2_v * dt * 0.5,
        );
        let (k4_x, k4_v) = deriv(self.value + k3_x * dt, self.velocity + k3_v * dt);

        self.value += (k1_x + 2.0 * k2_x + 2.0 * k3_x + k4_x) * dt / 6.0;
        self.velocity += (k1_v + 2.0 * k2_v + 2.0 * k3_v + k4_v) * dt / 6.0;
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let spring_force = -self.config.stiffness * (x - self.target);
        let damping_force = -self.config.damping * v;
        (spring_force + damping_force) / self.config.mass
    }
}
