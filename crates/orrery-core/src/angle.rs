// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use std::f32::consts::{FRAC_PI_2, PI, TAU};
use std::ops::{Add, Div, Mul, Neg, Sub};

use bytemuck::{Pod, Zeroable};
use bytes::{Buf, BufMut};

use crate::codec::{get_f32s, put_f32s, ByteSerializable};
use crate::direction::Direction;
use crate::error::{GeometryError, ParseError};
use crate::format::{format_suffixed, parse_suffixed, FormatConfig, TextFormat};
use crate::math::{self, deg_to_rad, rad_to_deg, true_modulus};
use crate::orientation::PolarOrientation;
use crate::random;

/// Signed rotation magnitude.
///
/// * Stored in radians; degrees and full-circle fractions are derived views.
/// * Arithmetic never normalizes implicitly: `Angle::from_degrees(720.0)`
///   stays 720°. Use [`Angle::normalized`] or a clamp when a bounded range is
///   wanted.
/// * Text form is degrees with a `°` suffix.
///
/// # Examples
/// ```
/// use orrery_core::Angle;
/// let quarter = Angle::from_degrees(90.0);
/// assert_eq!((quarter * 4.0).normalized(), Angle::ZERO);
/// assert!((Angle::from_degrees(-90.0).normalized().degrees() - 270.0).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Pod, Zeroable)]
#[repr(transparent)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Angle {
    radians: f32,
}

impl Angle {
    /// 0°.
    pub const ZERO: Self = Self::from_radians(0.0);
    /// 90°.
    pub const QUARTER_CIRCLE: Self = Self::from_radians(FRAC_PI_2);
    /// 180°.
    pub const HALF_CIRCLE: Self = Self::from_radians(PI);
    /// 270°.
    pub const THREE_QUARTER_CIRCLE: Self = Self::from_radians(PI * 1.5);
    /// 360°.
    pub const FULL_CIRCLE: Self = Self::from_radians(TAU);

    /// Creates an angle from radians.
    pub const fn from_radians(radians: f32) -> Self {
        Self { radians }
    }

    /// Creates an angle from degrees.
    pub fn from_degrees(degrees: f32) -> Self {
        Self::from_radians(deg_to_rad(degrees))
    }

    /// Creates an angle from a fraction of a full turn (`1.0` = 360°).
    pub fn from_full_circle_fraction(fraction: f32) -> Self {
        Self::from_radians(fraction * TAU)
    }

    /// Angle whose sine is `sine`.
    ///
    /// Fails with [`GeometryError::OutOfRange`] outside `[-1, 1]`.
    pub fn from_sine(sine: f32) -> Result<Self, GeometryError> {
        check_unit_interval("sine", sine)?;
        Ok(Self::from_radians(libm::asinf(sine)))
    }

    /// Angle whose cosine is `cosine`.
    ///
    /// Fails with [`GeometryError::OutOfRange`] outside `[-1, 1]`.
    pub fn from_cosine(cosine: f32) -> Result<Self, GeometryError> {
        check_unit_interval("cosine", cosine)?;
        Ok(Self::from_radians(libm::acosf(cosine)))
    }

    /// Unsigned angle between two directions.
    ///
    /// Symmetric in its arguments. Fails with
    /// [`GeometryError::InvalidArgument`] when either input is not unit
    /// length (e.g. a direction built with
    /// [`Direction::from_vector3_pre_normalized`] from a bad vector).
    pub fn from_angle_between_directions(a: Direction, b: Direction) -> Result<Self, GeometryError> {
        if !a.is_unit_length() || !b.is_unit_length() {
            return Err(GeometryError::InvalidArgument {
                what: "direction",
                reason: "angle-between requires unit-length directions",
            });
        }
        Ok(a.angle_to(b))
    }

    /// Polar angle of the 2D point `(x, y)`, normalized to `[0°, 360°)`.
    ///
    /// Returns `None` at the origin, where the angle is undefined.
    pub fn from_2d_polar_angle(x: f32, y: f32) -> Option<Self> {
        if x == 0.0 && y == 0.0 {
            return None;
        }
        Some(Self::from_radians(math::atan2(y, x)).normalized())
    }

    /// Value in radians.
    pub const fn radians(self) -> f32 {
        self.radians
    }

    /// Value in degrees.
    pub fn degrees(self) -> f32 {
        rad_to_deg(self.radians)
    }

    /// Value as a fraction of a full turn.
    pub fn full_circle_fraction(self) -> f32 {
        self.radians / TAU
    }

    /// Sine of the angle.
    pub fn sine(self) -> f32 {
        math::sin(self.radians)
    }

    /// Cosine of the angle.
    pub fn cosine(self) -> f32 {
        math::cos(self.radians)
    }

    /// Equivalent angle in `[0°, 360°)`, using a true (non-truncating)
    /// modulus so negative inputs wrap positively.
    pub fn normalized(self) -> Self {
        Self::from_radians(true_modulus(self.radians, TAU))
    }

    /// Magnitude of the angle.
    pub fn absolute(self) -> Self {
        Self::from_radians(self.radians.abs())
    }

    /// `-1`, `0` or `1` according to the sign of the angle.
    pub fn sign(self) -> i32 {
        if self.radians > 0.0 {
            1
        } else if self.radians < 0.0 {
            -1
        } else {
            0
        }
    }

    /// Clamps to `[min, max]`, swapping reversed bounds.
    pub fn clamp(self, min: Self, max: Self) -> Self {
        let (lo, hi) = if min.radians <= max.radians {
            (min.radians, max.radians)
        } else {
            (max.radians, min.radians)
        };
        Self::from_radians(self.radians.max(lo).min(hi))
    }

    /// Clamps to `[0°, 180°]` without wrapping.
    pub fn clamp_zero_to_half_circle(self) -> Self {
        self.clamp(Self::ZERO, Self::HALF_CIRCLE)
    }

    /// Clamps to `[0°, 360°]` without wrapping.
    pub fn clamp_zero_to_full_circle(self) -> Self {
        self.clamp(Self::ZERO, Self::FULL_CIRCLE)
    }

    /// Clamps to `[-180°, 180°]` without wrapping.
    pub fn clamp_negative_half_circle_to_half_circle(self) -> Self {
        self.clamp(-Self::HALF_CIRCLE, Self::HALF_CIRCLE)
    }

    /// Clamps to `[-360°, 360°]` without wrapping.
    pub fn clamp_negative_full_circle_to_full_circle(self) -> Self {
        self.clamp(-Self::FULL_CIRCLE, Self::FULL_CIRCLE)
    }

    /// Unsigned difference in `[0°, 180°]`, going whichever way round the
    /// circle is shorter.
    pub fn shortest_difference_to(self, other: Self) -> Self {
        let forward = (self - other).normalized().radians;
        let backward = (other - self).normalized().radians;
        Self::from_radians(forward.min(backward))
    }

    /// Triangle wave of this angle with amplitude `peak` and period
    /// `4 · peak`; a negative peak flips the wave.
    pub fn triangularize(self, peak: Self) -> Self {
        if peak.radians == 0.0 {
            return Self::ZERO;
        }
        let period = peak.radians * 4.0;
        let ratio = self.radians / period;
        let remainder = ratio - ratio.round_ties_even();
        let amplitude = (0.25 - (0.25 - remainder.abs()).abs()) * period;
        Self::from_radians(amplitude.copysign(remainder))
    }

    /// Which of eight 45° sectors the normalized angle falls into, with
    /// `Right` centred on 0°.
    pub fn polar_orientation(self) -> PolarOrientation {
        let degrees = self.normalized().degrees();
        PolarOrientation::ALL
            .into_iter()
            .zip(0_u8..)
            .find(|&(_, sector)| degrees < 22.5 + 45.0 * f32::from(sector))
            .map_or(PolarOrientation::Right, |(orientation, _)| orientation)
    }

    /// Unclamped linear interpolation: `start + (end - start) · t`.
    pub fn interpolate(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }

    /// Exact equality within `tolerance_degrees`, without normalizing.
    pub fn equals(self, other: Self, tolerance_degrees: f32) -> bool {
        (self.degrees() - other.degrees()).abs() <= tolerance_degrees
    }

    /// Equality after normalization, treating 359.9° and 0.1° as 0.2° apart.
    pub fn equals_within_circle(self, other: Self, tolerance: Self) -> bool {
        let tolerance = tolerance.degrees();
        if (self.normalized().degrees() - other.normalized().degrees()).abs() <= tolerance {
            return true;
        }
        let shifted_self = (self + Self::HALF_CIRCLE).normalized().degrees();
        let shifted_other = (other + Self::HALF_CIRCLE).normalized().degrees();
        (shifted_self - shifted_other).abs() <= tolerance
    }

    /// Uniformly random angle in `[0°, 360°)`.
    pub fn random() -> Self {
        Self::from_radians(random::next_f32() * TAU)
    }

    /// Uniformly random angle in `[min, max)`.
    pub fn random_between(min: Self, max: Self) -> Self {
        Self::from_radians(random::next_f32_in(min.radians, max.radians))
    }
}

fn check_unit_interval(what: &'static str, value: f32) -> Result<(), GeometryError> {
    if (-1.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GeometryError::OutOfRange {
            what,
            value,
            min: -1.0,
            max: 1.0,
        })
    }
}

impl Add for Angle {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_radians(self.radians + rhs.radians)
    }
}

impl Sub for Angle {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_radians(self.radians - rhs.radians)
    }
}

impl Neg for Angle {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from_radians(-self.radians)
    }
}

impl Mul<f32> for Angle {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::from_radians(self.radians * rhs)
    }
}

impl Mul<Angle> for f32 {
    type Output = Angle;

    fn mul(self, rhs: Angle) -> Angle {
        rhs * self
    }
}

impl Div<f32> for Angle {
    type Output = Self;

    fn div(self, rhs: f32) -> Self {
        Self::from_radians(self.radians / rhs)
    }
}

impl Div for Angle {
    type Output = f32;

    fn div(self, rhs: Self) -> f32 {
        self.radians / rhs.radians
    }
}

impl TextFormat for Angle {
    fn format_with(&self, config: &FormatConfig) -> String {
        format_suffixed(self.degrees(), &config.degree_suffix, config)
    }

    fn parse_with(text: &str, config: &FormatConfig) -> Result<Self, ParseError> {
        parse_suffixed(text, &config.degree_suffix, config).map(Self::from_degrees)
    }
}

crate::impl_text_traits!(Angle);

impl ByteSerializable for Angle {
    const SERIALIZED_LEN: usize = 4;

    fn write_to<B: BufMut>(&self, dest: &mut B) {
        put_f32s(dest, &[self.radians]);
    }

    fn read_from<B: Buf>(src: &mut B) -> Result<Self, GeometryError> {
        let [radians] = get_f32s(src);
        Ok(Self::from_radians(radians))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn half_circle_in_radians_is_pi() {
        assert_eq!(Angle::from_degrees(180.0).radians(), PI);
    }

    #[test]
    fn inverse_trig_rejects_out_of_range_input() {
        assert!(matches!(
            Angle::from_sine(1.01),
            Err(GeometryError::OutOfRange { what: "sine", .. })
        ));
        assert!(Angle::from_cosine(-1.5).is_err());
        assert!(Angle::from_cosine(f32::NAN).is_err());
        assert!(approx_eq(Angle::from_sine(1.0).unwrap().degrees(), 90.0));
        assert!(approx_eq(Angle::from_cosine(-1.0).unwrap().degrees(), 180.0));
    }

    #[test]
    fn normalized_wraps_into_a_single_turn() {
        assert!(approx_eq(Angle::from_degrees(-90.0).normalized().degrees(), 270.0));
        assert!(approx_eq(Angle::from_degrees(450.0).normalized().degrees(), 90.0));
        assert_eq!(Angle::FULL_CIRCLE.normalized(), Angle::ZERO);
    }

    #[test]
    fn clamps_stop_at_the_nearest_boundary() {
        let over = Angle::from_degrees(400.0);
        let under = Angle::from_degrees(-400.0);
        assert_eq!(over.clamp_zero_to_half_circle(), Angle::HALF_CIRCLE);
        assert_eq!(under.clamp_zero_to_half_circle(), Angle::ZERO);
        assert_eq!(over.clamp_zero_to_full_circle(), Angle::FULL_CIRCLE);
        assert_eq!(under.clamp_negative_full_circle_to_full_circle(), -Angle::FULL_CIRCLE);
        assert_eq!(under.clamp_negative_half_circle_to_half_circle(), -Angle::HALF_CIRCLE);
        let inside = Angle::from_degrees(-30.0);
        assert_eq!(inside.clamp_negative_full_circle_to_full_circle(), inside);
        assert_eq!(inside.clamp(Angle::ZERO, -Angle::QUARTER_CIRCLE), inside);
    }

    #[test]
    fn interpolation_extrapolates() {
        let a = Angle::from_degrees(10.0);
        let b = Angle::from_degrees(20.0);
        assert!(approx_eq(Angle::interpolate(a, b, 2.0).degrees(), 30.0));
        assert!(approx_eq(Angle::interpolate(a, b, -1.0).degrees(), 0.0));
    }

    #[test]
    fn shortest_difference_wraps_around_the_seam() {
        let a = Angle::from_degrees(350.0);
        let b = Angle::from_degrees(10.0);
        assert!(approx_eq(a.shortest_difference_to(b).degrees(), 20.0));
        assert!(approx_eq(Angle::ZERO.shortest_difference_to(Angle::THREE_QUARTER_CIRCLE).degrees(), 90.0));
        assert!(a.equals_within_circle(Angle::from_degrees(-10.0), Angle::from_degrees(0.1)));
        assert!(Angle::from_degrees(359.9).equals_within_circle(Angle::from_degrees(0.1), Angle::from_degrees(0.3)));
    }

    #[test]
    fn triangularize_folds_into_peak_range() {
        let peak = Angle::QUARTER_CIRCLE;
        assert!(approx_eq(Angle::from_degrees(90.0).triangularize(peak).degrees(), 90.0));
        assert!(approx_eq(Angle::from_degrees(180.0).triangularize(peak).degrees(), 0.0));
        assert!(approx_eq(Angle::from_degrees(270.0).triangularize(peak).degrees(), -90.0));
        assert_eq!(Angle::from_degrees(45.0).triangularize(Angle::ZERO), Angle::ZERO);
    }

    #[test]
    fn polar_orientation_uses_45_degree_sectors() {
        assert_eq!(Angle::ZERO.polar_orientation(), PolarOrientation::Right);
        assert_eq!(Angle::from_degrees(44.0).polar_orientation(), PolarOrientation::UpRight);
        assert_eq!(Angle::from_degrees(180.0).polar_orientation(), PolarOrientation::Left);
        assert_eq!(Angle::from_degrees(-10.0).polar_orientation(), PolarOrientation::Right);
        assert_eq!(Angle::from_degrees(300.0).polar_orientation(), PolarOrientation::DownRight);
        assert!(approx_eq(Angle::from_2d_polar_angle(0.0, -1.0).unwrap().degrees(), 270.0));
        assert!(Angle::from_2d_polar_angle(0.0, 0.0).is_none());
    }

    #[test]
    fn text_round_trip_uses_degree_suffix() {
        let angle = Angle::from_degrees(90.0);
        assert_eq!(angle.to_string(), "90°");
        assert_eq!("90°".parse::<Angle>(), Ok(angle));
        assert_eq!("90 °".parse::<Angle>(), Ok(angle));
        assert_eq!(format!("{:.1}", Angle::from_degrees(12.34)), "12.3°");
        assert!("ninety°".parse::<Angle>().is_err());
    }

    #[test]
    fn arithmetic_is_plain_radian_arithmetic() {
        let a = Angle::from_radians(1.0);
        assert_eq!((a + a).radians(), 2.0);
        assert_eq!((a - a * 3.0).radians(), -2.0);
        assert_eq!(2.0 * a, a * 2.0);
        assert_eq!(Angle::from_radians(3.0) / a, 3.0);
        assert_eq!((-a).sign(), -1);
        assert_eq!(Angle::ZERO.sign(), 0);
    }
}
