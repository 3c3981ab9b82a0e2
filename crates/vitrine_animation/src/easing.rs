//! Easing functions for keyframe and timeline animations
//!
//! The palette mirrors the curves the choreography actually uses: the
//! power family for reveals and scrubs, sine for decorative drift loops,
//! back for playful overshoots, and elastic for the magnetic return.

/// An easing curve mapping normalized time to normalized progress
///
/// `apply` takes `t` in [0, 1] and returns the eased progress. Curves
/// with overshoot (`BackOut`, `ElasticOut`) may return values outside
/// [0, 1] mid-flight but always land on 0 at t=0 and 1 at t=1.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    /// power1 family (quadratic)
    QuadIn,
    QuadOut,
    QuadInOut,
    /// power2 family (cubic)
    CubicIn,
    CubicOut,
    CubicInOut,
    /// power3 family (quartic)
    QuartIn,
    QuartOut,
    QuartInOut,
    SineIn,
    SineOut,
    SineInOut,
    /// Overshoots past 1.0 then settles; `overshoot` controls how far
    BackOut {
        overshoot: f32,
    },
    /// Springy decaying oscillation into the target
    ElasticOut {
        amplitude: f32,
        period: f32,
    },
}

impl Easing {
    /// Apply the curve to a normalized time in [0, 1]
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,

            Easing::QuadIn => t * t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - 2.0 * (1.0 - t) * (1.0 - t)
                }
            }

            Easing::CubicIn => t * t * t,
            Easing::CubicOut => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = 1.0 - t;
                    1.0 - 4.0 * u * u * u
                }
            }

            Easing::QuartIn => t * t * t * t,
            Easing::QuartOut => {
                let u = 1.0 - t;
                1.0 - u * u * u * u
            }
            Easing::QuartInOut => {
                if t < 0.5 {
                    8.0 * t * t * t * t
                } else {
                    let u = 1.0 - t;
                    1.0 - 8.0 * u * u * u * u
                }
            }

            Easing::SineIn => 1.0 - (t * std::f32::consts::FRAC_PI_2).cos(),
            Easing::SineOut => (t * std::f32::consts::FRAC_PI_2).sin(),
            Easing::SineInOut => 0.5 * (1.0 - (t * std::f32::consts::PI).cos()),

            Easing::BackOut { overshoot } => {
                let u = t - 1.0;
                1.0 + u * u * ((overshoot + 1.0) * u + overshoot)
            }

            Easing::ElasticOut { amplitude, period } => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else {
                    let amplitude = amplitude.max(1.0);
                    let period = if period > 0.0 { period } else { 0.3 };
                    let s = period / std::f32::consts::TAU * (1.0 / amplitude).asin();
                    1.0 + amplitude
                        * 2.0_f32.powf(-10.0 * t)
                        * ((t - s) * std::f32::consts::TAU / period).sin()
                }
            }
        }
    }

    /// The default back-out overshoot used by bouncy reveals
    pub fn back_out() -> Self {
        Easing::BackOut { overshoot: 1.4 }
    }

    /// The elastic profile used by the magnetic return
    pub fn elastic_out() -> Self {
        Easing::ElasticOut {
            amplitude: 1.0,
            period: 0.5,
        }
    }
}
