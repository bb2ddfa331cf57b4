//! Display-confidence jitter.
//!
//! Raw classifier confidences are reduced by a small random amount before
//! display. The reduction is cosmetic and does not affect the label. It is
//! isolated behind [`ConfidenceJitter`] so callers that need reproducible
//! output (exports under test, regression comparisons) can swap in
//! [`FixedJitter`] without touching the pipeline.

use crate::constants::jitter;
use rand::Rng;

/// Transform applied to a raw confidence before display.
pub trait ConfidenceJitter {
    /// Map a raw confidence in [0, 1] to a display confidence in [0, raw].
    fn apply(&self, raw_confidence: f32) -> f32;
}

/// The production jitter: one uniform draw in [0.01, 0.05] rounded to four
/// decimal places, subtracted from the raw confidence and floored at 0.
///
/// Caveat: the draw is re-drawn independently on every call and is not
/// seeded, so two classifications of the same image display different
/// confidences. This mirrors the observed behavior of the original system
/// and is intentional, not a defect.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformJitter;

impl ConfidenceJitter for UniformJitter {
    fn apply(&self, raw_confidence: f32) -> f32 {
        let draw = rand::thread_rng().gen_range(jitter::MIN..=jitter::MAX);
        (raw_confidence - round_places(draw, jitter::DECIMAL_PLACES)).max(0.0)
    }
}

/// Deterministic jitter subtracting a fixed amount. Floored at 0.
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter(pub f32);

impl ConfidenceJitter for FixedJitter {
    fn apply(&self, raw_confidence: f32) -> f32 {
        (raw_confidence - self.0).max(0.0)
    }
}

/// Round to a fixed number of decimal places.
fn round_places(value: f32, places: u32) -> f32 {
    let factor = 10f32.powi(places.cast_signed());
    (value * factor).round() / factor
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_jitter_stays_within_bounds() {
        let jitter = UniformJitter;
        for i in 0..=100 {
            let raw = i as f32 / 100.0;
            let display = jitter.apply(raw);
            assert!(display >= 0.0, "display {display} below zero for raw {raw}");
            assert!(display <= raw, "display {display} above raw {raw}");
            if raw >= 0.05 {
                // Draw is at most 0.05, so at least raw - 0.05 must remain.
                assert!(display >= raw - 0.05 - f32::EPSILON);
            }
        }
    }

    #[test]
    fn test_uniform_jitter_floors_at_zero() {
        let jitter = UniformJitter;
        assert_eq!(jitter.apply(0.0), 0.0);
        assert!(jitter.apply(0.005) >= 0.0);
    }

    #[test]
    fn test_fixed_jitter_is_deterministic() {
        let jitter = FixedJitter(0.03);
        assert_eq!(jitter.apply(0.90), 0.87);
        assert_eq!(jitter.apply(0.01), 0.0);
    }

    #[test]
    fn test_round_places() {
        assert_eq!(round_places(0.012_345, 4), 0.0123);
        assert_eq!(round_places(0.049_996, 4), 0.05);
    }
}
