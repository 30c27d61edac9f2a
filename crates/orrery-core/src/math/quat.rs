// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use crate::math::{self, Vec3, EPSILON};

/// Quaternion stored as `(x, y, z, w)` with deterministic float32 rounding.
///
/// * All angles are expressed in radians.
/// * `w` is the scalar part; `(x, y, z)` is the vector part.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct Quat {
    data: [f32; 4],
}

impl Quat {
    pub(crate) const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { data: [x, y, z, w] }
    }

    pub(crate) const fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    pub(crate) const fn to_array(self) -> [f32; 4] {
        self.data
    }

    pub(crate) const fn w(self) -> f32 {
        self.data[3]
    }

    pub(crate) const fn vector(self) -> Vec3 {
        Vec3::new(self.data[0], self.data[1], self.data[2])
    }

    /// Constructs a quaternion from a unit axis and an angle in radians.
    ///
    /// The axis is taken as already normalized. No small-angle approximation
    /// is applied.
    pub(crate) fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let half = angle * 0.5;
        let scaled = axis * math::sin(half);
        Self::new(scaled.x(), scaled.y(), scaled.z(), math::cos(half))
    }

    /// Hamilton product of two quaternions (`self * other`).
    ///
    /// Operand order matters: applied to a vector, the product rotates by
    /// `other` first and then by `self`.
    pub(crate) fn multiply(self, other: Self) -> Self {
        let [ax, ay, az, aw] = self.data;
        let [bx, by, bz, bw] = other.data;

        Self::new(
            aw * bx + ax * bw + ay * bz - az * by,
            aw * by - ax * bz + ay * bw + az * bx,
            aw * bz + ax * by - ay * bx + az * bw,
            aw * bw - ax * bx - ay * by - az * bz,
        )
    }

    pub(crate) fn conjugate(self) -> Self {
        let [x, y, z, w] = self.data;
        Self::new(-x, -y, -z, w)
    }

    pub(crate) fn negate(self) -> Self {
        let [x, y, z, w] = self.data;
        Self::new(-x, -y, -z, -w)
    }

    pub(crate) fn dot(self, other: Self) -> f32 {
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    pub(crate) fn scale(self, factor: f32) -> Self {
        let [x, y, z, w] = self.data;
        Self::new(x * factor, y * factor, z * factor, w * factor)
    }

    pub(crate) fn plus(self, other: Self) -> Self {
        let [ax, ay, az, aw] = self.data;
        let [bx, by, bz, bw] = other.data;
        Self::new(ax + bx, ay + by, az + bz, aw + bw)
    }

    /// Normalises the quaternion; returns identity when the norm is ~0.
    pub(crate) fn normalize(self) -> Self {
        let len = self.dot(self).sqrt();
        if len <= EPSILON || !len.is_finite() {
            return Self::identity();
        }
        self.scale(1.0 / len)
    }

    /// Rotates `v` by this (unit) quaternion.
    ///
    /// Uses `t = 2(q × v); v' = v + w·t + q × t`, which avoids building the
    /// full sandwich product.
    pub(crate) fn rotate(self, v: Vec3) -> Vec3 {
        let q = self.vector();
        let t = q.cross(v) * 2.0;
        v + t * self.w() + q.cross(t)
    }
}

impl From<[f32; 4]> for Quat {
    fn from(value: [f32; 4]) -> Self {
        Self { data: value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn rotate_quarter_turn_about_y_maps_z_to_x() {
        let q = Quat::from_axis_angle(Vec3::new(0.0, 1.0, 0.0), FRAC_PI_2);
        assert!(approx_eq(q.rotate(Vec3::UNIT_Z), Vec3::UNIT_X));
    }

    #[test]
    fn multiply_applies_right_operand_first() {
        let about_x = Quat::from_axis_angle(Vec3::UNIT_X, FRAC_PI_2);
        let about_z = Quat::from_axis_angle(Vec3::UNIT_Z, FRAC_PI_2);
        let composed = about_z.multiply(about_x);
        let stepwise = about_z.rotate(about_x.rotate(Vec3::new(0.0, 1.0, 0.0)));
        assert!(approx_eq(composed.rotate(Vec3::new(0.0, 1.0, 0.0)), stepwise));
    }

    #[test]
    fn conjugate_undoes_rotation() {
        let q = Quat::from_axis_angle(Vec3::new(0.0, 0.6, 0.8), 1.1);
        let v = Vec3::new(0.3, -2.0, 5.0);
        assert!(approx_eq(q.conjugate().rotate(q.rotate(v)), v));
    }

    #[test]
    fn normalize_degenerate_returns_identity() {
        assert_eq!(Quat::new(0.0, 0.0, 0.0, 0.0).normalize(), Quat::identity());
    }
}
