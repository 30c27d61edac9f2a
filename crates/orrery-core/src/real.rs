// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use std::cmp::Ordering;
use std::ops::{Add, Div, Mul, Neg, Sub};

use bytemuck::{Pod, Zeroable};
use bytes::{Buf, BufMut};

use crate::codec::{get_f32s, put_f32s, ByteSerializable};
use crate::error::{GeometryError, ParseError};
use crate::format::{format_scalar, parse_scalar, FormatConfig, TextFormat};
use crate::random;

/// Transparent `f32` surrogate for places that need the same codec and
/// text plumbing as the other value types.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Pod, Zeroable)]
#[repr(transparent)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Real(pub f32);

impl Real {
    /// Zero.
    pub const ZERO: Self = Self(0.0);

    /// The wrapped value.
    pub const fn value(self) -> f32 {
        self.0
    }

    /// `1 / value`, or `None` at zero.
    pub fn reciprocal(self) -> Option<Self> {
        if self.0 == 0.0 {
            None
        } else {
            Some(Self(1.0 / self.0))
        }
    }

    /// Magnitude.
    pub fn absolute(self) -> Self {
        Self(self.0.abs())
    }

    /// Clamps to `[min, max]`, swapping reversed bounds.
    pub fn clamp(self, min: Self, max: Self) -> Self {
        let (lo, hi) = if min.0 <= max.0 { (min.0, max.0) } else { (max.0, min.0) };
        Self(self.0.max(lo).min(hi))
    }

    /// Unclamped linear interpolation.
    pub fn interpolate(start: Self, end: Self, t: f32) -> Self {
        Self(start.0 + (end.0 - start.0) * t)
    }

    /// IEEE total ordering, so NaN sorts deterministically.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }

    /// Equality within `tolerance`.
    pub fn equals(self, other: Self, tolerance: f32) -> bool {
        (self.0 - other.0).abs() <= tolerance
    }

    /// Uniformly random value in `[0, 1)`.
    pub fn random() -> Self {
        Self(random::next_f32())
    }

    /// Uniformly random value in `[min, max)`.
    pub fn random_between(min: Self, max: Self) -> Self {
        Self(random::next_f32_in(min.0, max.0))
    }
}

impl From<f32> for Real {
    fn from(value: f32) -> Self {
        Self(value)
    }
}

impl From<Real> for f32 {
    fn from(value: Real) -> Self {
        value.0
    }
}

impl Add for Real {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Real {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul for Real {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}

impl Div for Real {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self(self.0 / rhs.0)
    }
}

impl Neg for Real {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl TextFormat for Real {
    fn format_with(&self, config: &FormatConfig) -> String {
        format_scalar(self.0, config)
    }

    fn parse_with(text: &str, config: &FormatConfig) -> Result<Self, ParseError> {
        parse_scalar(text, config).map(Self)
    }
}

crate::impl_text_traits!(Real);

impl ByteSerializable for Real {
    const SERIALIZED_LEN: usize = 4;

    fn write_to<B: BufMut>(&self, dest: &mut B) {
        put_f32s(dest, &[self.0]);
    }

    fn read_from<B: Buf>(src: &mut B) -> Result<Self, GeometryError> {
        let [value] = get_f32s(src);
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reciprocal_is_undefined_at_zero() {
        assert_eq!(Real::ZERO.reciprocal(), None);
        assert_eq!(Real(4.0).reciprocal(), Some(Real(0.25)));
    }

    #[test]
    fn total_cmp_orders_nan_last() {
        let mut values = [Real(f32::NAN), Real(1.0), Real(-2.0)];
        values.sort_by(Real::total_cmp);
        assert_eq!(values[0], Real(-2.0));
        assert_eq!(values[1], Real(1.0));
        assert!(values[2].value().is_nan());
    }

    #[test]
    fn bytes_are_a_single_le_float() {
        let bytes = Real(1.0).to_bytes();
        assert_eq!(&bytes[..], &[0x00, 0x00, 0x80, 0x3f]);
        assert_eq!(Real::from_bytes(&bytes), Ok(Real(1.0)));
        assert!(matches!(
            Real::from_bytes(&bytes[..2]),
            Err(GeometryError::BufferTooShort { needed: 4, actual: 2 })
        ));
    }

    #[test]
    fn clamp_and_interpolate() {
        assert_eq!(Real(5.0).clamp(Real(3.0), Real(-1.0)), Real(3.0));
        assert_eq!(Real::interpolate(Real(0.0), Real(10.0), 1.5), Real(15.0));
    }
}
