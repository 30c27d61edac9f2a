// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Deterministic scalar helpers plus the raw vector and quaternion storage
//! behind the public value types.
//!
//! All operations round to `f32`. Transcendental functions route through
//! `libm` so results do not depend on the host platform's math library.

use std::f32::consts::TAU;

mod quat;
mod vec3;

pub(crate) use quat::Quat;
pub(crate) use vec3::Vec3;

/// Global epsilon used by math routines when detecting degenerate values.
pub const EPSILON: f32 = 1e-6;

/// Converts degrees to radians with float32 precision.
pub fn deg_to_rad(value: f32) -> f32 {
    value * (TAU / 360.0)
}

/// Converts radians to degrees with float32 precision.
pub fn rad_to_deg(value: f32) -> f32 {
    value * (360.0 / TAU)
}

/// Non-truncating modulus: the result always carries the sign of `modulus`.
///
/// Negative zero canonicalizes to `+0.0`, and a result that rounds up to
/// `modulus` itself wraps to zero so repeated application is idempotent.
///
/// # Examples
/// ```
/// use orrery_core::math::true_modulus;
/// assert_eq!(true_modulus(-90.0, 360.0), 270.0);
/// assert_eq!(true_modulus(725.0, 360.0), 5.0);
/// ```
pub fn true_modulus(value: f32, modulus: f32) -> f32 {
    let rem = value % modulus;
    let wrapped = if rem != 0.0 && (rem < 0.0) != (modulus < 0.0) {
        rem + modulus
    } else {
        rem
    };
    if wrapped == 0.0 || wrapped == modulus {
        0.0
    } else {
        wrapped
    }
}

/// Sine of `radians` via `libm`.
pub fn sin(radians: f32) -> f32 {
    libm::sinf(radians)
}

/// Cosine of `radians` via `libm`.
pub fn cos(radians: f32) -> f32 {
    libm::cosf(radians)
}

/// Arc cosine with the input clamped to `[-1, 1]` first.
///
/// Dot products of unit vectors routinely land a rounding step outside the
/// valid domain; clamping keeps those from producing NaN.
pub fn acos_clamped(value: f32) -> f32 {
    libm::acosf(value.max(-1.0).min(1.0))
}

/// Arc sine with the input clamped to `[-1, 1]` first.
pub fn asin_clamped(value: f32) -> f32 {
    libm::asinf(value.max(-1.0).min(1.0))
}

/// Four-quadrant arc tangent of `y / x` via `libm`.
pub fn atan2(y: f32, x: f32) -> f32 {
    libm::atan2f(y, x)
}

/// Cube root via `libm`.
pub fn cbrt(value: f32) -> f32 {
    libm::cbrtf(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn true_modulus_wraps_negative_values_positively() {
        assert_eq!(true_modulus(-1.0, 4.0), 3.0);
        assert_eq!(true_modulus(-4.0, 4.0), 0.0);
        assert_eq!(true_modulus(9.0, 4.0), 1.0);
    }

    #[test]
    fn true_modulus_canonicalizes_negative_zero() {
        assert_eq!(true_modulus(-0.0, TAU).to_bits(), 0.0_f32.to_bits());
    }

    #[test]
    fn true_modulus_never_returns_the_modulus() {
        let tiny_negative = -1e-9_f32;
        let wrapped = true_modulus(tiny_negative, TAU);
        assert!(wrapped < TAU);
        assert_eq!(true_modulus(wrapped, TAU), wrapped);
    }

    #[test]
    fn clamped_inverse_trig_tolerates_rounding_overshoot() {
        assert_eq!(acos_clamped(1.000_001), 0.0);
        assert!((asin_clamped(-1.000_001) + std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn degree_conversions_round_trip_quarter_turns() {
        assert!((deg_to_rad(90.0) - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert!((rad_to_deg(std::f32::consts::PI) - 180.0).abs() < 1e-4);
    }
}
