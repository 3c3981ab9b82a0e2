//! Reduced-motion preference
//!
//! The accessibility preference is read exactly once at startup and the
//! resulting capability is injected into every choreography constructor.
//! Nothing re-queries the platform afterwards, so a preference change
//! mid-session is not picked up until restart. That limitation is
//! deliberate and matches the rest of the engine's assumption that the
//! flag is stable for the lifetime of a page.

use tracing::debug;

/// Whether full motion is allowed or the user asked for reduced motion
///
/// Under [`MotionPreference::Reduced`], every reveal/entrance primitive
/// becomes a no-op that leaves content at its final visible state, the
/// smooth-scroll engine is bypassed, and the decorative layer starts no
/// timers or frame callbacks at all.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MotionPreference {
    /// Animations run normally
    #[default]
    Full,
    /// All non-essential motion is suppressed
    Reduced,
}

impl MotionPreference {
    /// Read the preference from the `VITRINE_REDUCED_MOTION` environment
    /// variable ("1" or "true" enables reduced motion)
    pub fn from_env() -> Self {
        let pref = match std::env::var("VITRINE_REDUCED_MOTION") {
            Ok(v) if v == "1" || v.eq_ignore_ascii_case("true") => MotionPreference::Reduced,
            _ => MotionPreference::Full,
        };
        debug!("motion preference: {:?}", pref);
        pref
    }

    pub fn is_reduced(&self) -> bool {
        matches!(self, MotionPreference::Reduced)
    }

    pub fn allows_motion(&self) -> bool {
        matches!(self, MotionPreference::Full)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_full() {
        assert!(MotionPreference::default().allows_motion());
        assert!(!MotionPreference::default().is_reduced());
    }

    #[test]
    fn test_reduced() {
        let pref = MotionPreference::Reduced;
        assert!(pref.is_reduced());
        assert!(!pref.allows_motion());
    }
}
