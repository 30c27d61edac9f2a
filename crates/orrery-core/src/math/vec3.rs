// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use std::ops::{Add, Mul, Neg, Sub};

use crate::math::EPSILON;

/// Raw three-component storage shared by [`crate::Vect`],
/// [`crate::Location`] and [`crate::Direction`].
///
/// * Carries no unit-length or finiteness invariant; the public wrappers
///   decide what a triple means.
/// * Arithmetic uses `f32` so results round like the runtime's float32 mode.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct Vec3 {
    data: [f32; 3],
}

impl Vec3 {
    pub(crate) const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub(crate) const UNIT_X: Self = Self::new(1.0, 0.0, 0.0);
    pub(crate) const UNIT_Z: Self = Self::new(0.0, 0.0, 1.0);

    pub(crate) const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { data: [x, y, z] }
    }

    pub(crate) const fn to_array(self) -> [f32; 3] {
        self.data
    }

    pub(crate) const fn x(self) -> f32 {
        self.data[0]
    }

    pub(crate) const fn y(self) -> f32 {
        self.data[1]
    }

    pub(crate) const fn z(self) -> f32 {
        self.data[2]
    }

    pub(crate) fn map(self, f: impl Fn(f32) -> f32) -> Self {
        Self::new(f(self.x()), f(self.y()), f(self.z()))
    }

    pub(crate) fn zip_map(self, other: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        Self::new(
            f(self.x(), other.x()),
            f(self.y(), other.y()),
            f(self.z(), other.z()),
        )
    }

    pub(crate) fn dot(self, other: Self) -> f32 {
        self.x() * other.x() + self.y() * other.y() + self.z() * other.z()
    }

    pub(crate) fn cross(self, other: Self) -> Self {
        let (ax, ay, az) = (self.x(), self.y(), self.z());
        let (bx, by, bz) = (other.x(), other.y(), other.z());
        Self::new(ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx)
    }

    pub(crate) fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub(crate) fn length_squared(self) -> f32 {
        self.dot(self)
    }

    pub(crate) fn is_finite(self) -> bool {
        self.data.iter().all(|c| c.is_finite())
    }

    /// Unit-length copy, or `None` when the length is ≤ `EPSILON` or not
    /// finite.
    pub(crate) fn normalize(self) -> Option<Self> {
        let len = self.length();
        if len <= EPSILON || !len.is_finite() {
            return None;
        }
        Some(self * (1.0 / len))
    }

    /// Divides by the length without a degeneracy check.
    pub(crate) fn normalize_unchecked(self) -> Self {
        self * (1.0 / self.length())
    }

    pub(crate) fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.zip_map(rhs, |a, b| a + b)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.zip_map(rhs, |a, b| a - b)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        self.map(|c| c * rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|c| -c)
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(value: [f32; 3]) -> Self {
        Self { data: value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_follows_right_hand_rule() {
        let y = Vec3::UNIT_Z.cross(Vec3::UNIT_X);
        assert_eq!(y.to_array(), [0.0, 1.0, 0.0]);
    }

    #[test]
    fn normalize_rejects_degenerate_and_non_finite_input() {
        assert!(Vec3::ZERO.normalize().is_none());
        assert!(Vec3::new(f32::NAN, 0.0, 1.0).normalize().is_none());
        assert!(Vec3::new(f32::INFINITY, 0.0, 0.0).normalize().is_none());
        let unit = Vec3::new(0.0, 3.0, 4.0).normalize();
        assert_eq!(unit.map(Vec3::to_array), Some([0.0, 0.6, 0.8]));
    }
}
