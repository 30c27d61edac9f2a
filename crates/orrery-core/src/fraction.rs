// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use std::ops::{Add, Mul, Neg, Sub};

use bytemuck::{Pod, Zeroable};
use bytes::{Buf, BufMut};

use crate::codec::{get_f32s, put_f32s, ByteSerializable};
use crate::error::{GeometryError, ParseError};
use crate::format::{format_suffixed, parse_suffixed, FormatConfig, TextFormat};
use crate::random;

/// Ratio stored as a coefficient (`1.0` = 100 %).
///
/// Text form is the percentage followed by `%`; parsing also accepts a bare
/// number.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Pod, Zeroable)]
#[repr(transparent)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Fraction {
    coefficient: f32,
}

impl Fraction {
    /// 0 %.
    pub const ZERO: Self = Self::from_coefficient(0.0);
    /// 100 %.
    pub const FULL: Self = Self::from_coefficient(1.0);
    /// -100 %.
    pub const FULL_INVERSE: Self = Self::from_coefficient(-1.0);

    /// Denominators smaller than this make [`Fraction::from_ratio`] return zero.
    pub const RATIO_DENOMINATOR_EPSILON: f32 = 1e-7;

    /// Creates a fraction from a coefficient.
    pub const fn from_coefficient(coefficient: f32) -> Self {
        Self { coefficient }
    }

    /// Creates a fraction from a percentage (`50.0` = one half).
    pub fn from_percentage(percentage: f32) -> Self {
        Self::from_coefficient(percentage / 100.0)
    }

    /// `numerator / denominator`, or zero when the denominator is
    /// (nearly) zero.
    pub fn from_ratio(numerator: f32, denominator: f32) -> Self {
        if denominator.abs() < Self::RATIO_DENOMINATOR_EPSILON {
            return Self::ZERO;
        }
        Self::from_coefficient(numerator / denominator)
    }

    /// The raw coefficient.
    pub const fn coefficient(self) -> f32 {
        self.coefficient
    }

    /// The coefficient times 100.
    pub fn percentage(self) -> f32 {
        self.coefficient * 100.0
    }

    /// Magnitude of the fraction.
    pub fn absolute(self) -> Self {
        Self::from_coefficient(self.coefficient.abs())
    }

    /// Clamps to `[min, max]`, swapping reversed bounds.
    pub fn clamp(self, min: Self, max: Self) -> Self {
        let (lo, hi) = if min.coefficient <= max.coefficient {
            (min.coefficient, max.coefficient)
        } else {
            (max.coefficient, min.coefficient)
        };
        Self::from_coefficient(self.coefficient.max(lo).min(hi))
    }

    /// Unclamped linear interpolation.
    pub fn interpolate(start: Self, end: Self, t: f32) -> Self {
        Self::from_coefficient(start.coefficient + (end.coefficient - start.coefficient) * t)
    }

    /// Uniformly random fraction in `[0 %, 100 %)`.
    pub fn random() -> Self {
        Self::from_coefficient(random::next_f32())
    }

    /// Uniformly random fraction in `[min, max)`.
    pub fn random_between(min: Self, max: Self) -> Self {
        Self::from_coefficient(random::next_f32_in(min.coefficient, max.coefficient))
    }
}

impl Add for Fraction {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_coefficient(self.coefficient + rhs.coefficient)
    }
}

impl Sub for Fraction {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_coefficient(self.coefficient - rhs.coefficient)
    }
}

impl Neg for Fraction {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from_coefficient(-self.coefficient)
    }
}

impl Mul for Fraction {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::from_coefficient(self.coefficient * rhs.coefficient)
    }
}

impl Mul<f32> for Fraction {
    type Output = f32;

    fn mul(self, rhs: f32) -> f32 {
        self.coefficient * rhs
    }
}

impl TextFormat for Fraction {
    fn format_with(&self, config: &FormatConfig) -> String {
        format_suffixed(self.percentage(), &config.percent_suffix, config)
    }

    fn parse_with(text: &str, config: &FormatConfig) -> Result<Self, ParseError> {
        parse_suffixed(text, &config.percent_suffix, config).map(Self::from_percentage)
    }
}

crate::impl_text_traits!(Fraction);

impl ByteSerializable for Fraction {
    const SERIALIZED_LEN: usize = 4;

    fn write_to<B: BufMut>(&self, dest: &mut B) {
        put_f32s(dest, &[self.coefficient]);
    }

    fn read_from<B: Buf>(src: &mut B) -> Result<Self, GeometryError> {
        let [coefficient] = get_f32s(src);
        Ok(Self::from_coefficient(coefficient))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_with_tiny_denominator_is_zero() {
        assert_eq!(Fraction::from_ratio(3.0, 1e-8), Fraction::ZERO);
        assert_eq!(Fraction::from_ratio(1.0, 4.0).coefficient(), 0.25);
    }

    #[test]
    fn percentage_is_coefficient_times_hundred() {
        assert_eq!(Fraction::from_coefficient(0.5).percentage(), 50.0);
        assert_eq!(Fraction::FULL_INVERSE.percentage(), -100.0);
    }

    #[test]
    fn text_uses_percent_suffix() {
        assert_eq!(Fraction::from_coefficient(0.5).to_string(), "50%");
        assert_eq!("50%".parse::<Fraction>(), Ok(Fraction::from_coefficient(0.5)));
        assert_eq!("50 %".parse::<Fraction>(), Ok(Fraction::from_coefficient(0.5)));
        assert_eq!("50".parse::<Fraction>(), Ok(Fraction::from_coefficient(0.5)));
        assert!("fifty%".parse::<Fraction>().is_err());
    }

    #[test]
    fn clamp_swaps_reversed_bounds() {
        let f = Fraction::from_coefficient(1.5);
        assert_eq!(f.clamp(Fraction::FULL, Fraction::ZERO), Fraction::FULL);
    }
}
