//! Settle curves
//!
//! A release decelerates into its resting offset, so every curve except
//! `None` and `Linear` is a power ease-out: `1 - (1 - t)^n`.

use crate::config::EasingType;

impl EasingType {
    /// Eased fraction of the distance covered at progress `t`
    ///
    /// `t` is clamped to [0, 1]; `None` holds the start value until the end.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::None if t < 1.0 => 0.0,
            EasingType::None => 1.0,
            EasingType::Linear => t,
            EasingType::Cubic => decelerate(t, 3),
            EasingType::Quintic => decelerate(t, 5),
        }
    }
}

#[inline]
fn decelerate(t: f64, power: i32) -> f64 {
    1.0 - (1.0 - t).powi(power)
}
