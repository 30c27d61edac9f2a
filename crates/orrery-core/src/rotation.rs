// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use std::ops::{Add, Mul, Neg};

use bytes::{Buf, BufMut};

use crate::angle::Angle;
use crate::codec::{get_f32s, put_f32s, ByteSerializable};
use crate::direction::Direction;
use crate::error::{GeometryError, ParseError};
use crate::format::{format_vector3, parse_vector3, FormatConfig, TextFormat};
use crate::math::{self, Quat, Vec3};

/// Below this half-angle (radians) a rotation is treated as the identity.
const NEGLIGIBLE_HALF_ANGLE: f32 = 1e-4;
/// Beyond this quaternion dot product slerp degrades to nlerp.
const SLERP_LINEAR_THRESHOLD: f32 = 0.9995;

/// Unit quaternion rotation.
///
/// * Composition order is explicit: `a.followed_by(b)` (or `a + b`) applies
///   `a` first.
/// * `q` and `-q` describe the same rotation; `PartialEq` compares
///   components, [`Rotation::equivalent`] compares rotations.
/// * Right-handed: a positive angle around an axis turns counter-clockwise
///   when viewed from the axis tip.
///
/// # Examples
/// ```
/// use orrery_core::{Angle, Direction, Rotation};
/// let turn = Rotation::from_angle_around_axis(Angle::from_degrees(90.0), Direction::DOWN);
/// let turned = Direction::FORWARD * turn;
/// assert!(turned.equals(Direction::RIGHT, 1e-6));
/// assert!((turned * -turn).equals(Direction::FORWARD, 1e-6));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rotation {
    x: f32,
    y: f32,
    z: f32,
    w: f32,
}

impl Rotation {
    /// The identity rotation.
    pub const NONE: Self = Self::from_quat_raw(0.0, 0.0, 0.0, 1.0);

    const fn from_quat_raw(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    fn quat(self) -> Quat {
        Quat::new(self.x, self.y, self.z, self.w)
    }

    fn from_quat(q: Quat) -> Self {
        let [x, y, z, w] = q.to_array();
        Self::from_quat_raw(x, y, z, w)
    }

    /// Rotation by `angle` around `axis`; the identity for a zero angle.
    pub fn from_angle_around_axis(angle: Angle, axis: Direction) -> Self {
        if angle.radians() == 0.0 {
            return Self::NONE;
        }
        Self::from_quat(Quat::from_axis_angle(axis.vec3(), angle.radians()))
    }

    /// [`Rotation::from_angle_around_axis`] with an undefined axis mapping
    /// to the identity.
    pub fn from_angle_around_optional_axis(angle: Angle, axis: Option<Direction>) -> Self {
        axis.map_or(Self::NONE, |axis| Self::from_angle_around_axis(angle, axis))
    }

    /// Rotation from `[x, y, z, w]` components, renormalized. A zero
    /// quaternion becomes the identity.
    pub fn from_quaternion(q: [f32; 4]) -> Self {
        Self::from_quat(Quat::from(q).normalize())
    }

    /// Wraps `[x, y, z, w]` without normalizing; the caller asserts unit
    /// length.
    pub const fn from_quaternion_pre_normalized(q: [f32; 4]) -> Self {
        Self::from_quat_raw(q[0], q[1], q[2], q[3])
    }

    /// Components as `[x, y, z, w]`.
    pub const fn to_quaternion(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Rotation magnitude in `[0°, 360°]`.
    pub fn angle(self) -> Angle {
        Angle::from_radians(2.0 * math::acos_clamped(self.w))
    }

    /// Rotation axis, or `None` for the identity.
    pub fn axis(self) -> Option<Direction> {
        if self.w.abs() >= 1.0 {
            return None;
        }
        Direction::from_vector3([self.x, self.y, self.z])
    }

    pub(crate) fn rotate_vec3(self, v: Vec3) -> Vec3 {
        self.quat().rotate(v)
    }

    /// Applies this rotation to anything that can be rotated.
    pub fn rotate<T: Mul<Self, Output = T>>(self, value: T) -> T {
        value * self
    }

    /// `self`, then `other`.
    pub fn followed_by(self, other: Self) -> Self {
        Self::from_quat(other.quat().multiply(self.quat()))
    }

    /// The inverse rotation.
    pub fn reversed(self) -> Self {
        Self::from_quat(self.quat().conjugate())
    }

    /// Scales the rotation angle by `factor` around the same axis.
    ///
    /// Negative factors reverse the rotation; near-identity inputs and
    /// results collapse to [`Rotation::NONE`].
    pub fn scaled_by(self, factor: f32) -> Self {
        let half = math::acos_clamped(self.w);
        if half < NEGLIGIBLE_HALF_ANGLE {
            return Self::NONE;
        }
        let new_half = half * factor;
        let new_sin = math::sin(new_half);
        if new_sin.abs() < NEGLIGIBLE_HALF_ANGLE {
            return Self::NONE;
        }
        let axis_scale = new_sin / math::sin(half);
        let v = self.quat().vector() * axis_scale;
        Self::from_quat(Quat::new(v.x(), v.y(), v.z(), math::cos(new_half)).normalize())
    }

    /// The rotation `r` with `self.followed_by(r) == other`, taking the
    /// shorter way round.
    pub fn difference_to(self, other: Self) -> Self {
        let diff = other.quat().multiply(self.quat().conjugate());
        if diff.w() < 0.0 {
            Self::from_quat(diff.negate())
        } else {
            Self::from_quat(diff)
        }
    }

    /// Unsigned angle between two orientations, in `[0°, 180°]`.
    pub fn angle_to(self, other: Self) -> Angle {
        let dot = self.quat().dot(other.quat()).abs();
        Angle::from_radians(2.0 * math::acos_clamped(dot))
    }

    /// Spherical interpolation on the shorter path; `t` is unclamped.
    pub fn interpolate_spherical(start: Self, end: Self, t: f32) -> Self {
        let a = start.quat();
        let mut b = end.quat();
        let mut dot = a.dot(b);
        if dot < 0.0 {
            b = b.negate();
            dot = -dot;
        }
        if dot > SLERP_LINEAR_THRESHOLD {
            return Self::from_quat(a.plus(b.plus(a.negate()).scale(t)).normalize());
        }
        let theta = math::acos_clamped(dot);
        let sin_theta = math::sin(theta);
        let wa = math::sin((1.0 - t) * theta) / sin_theta;
        let wb = math::sin(t * theta) / sin_theta;
        Self::from_quat(a.scale(wa).plus(b.scale(wb)).normalize())
    }

    /// Normalized linear interpolation on the shorter path.
    ///
    /// Cheaper than [`Rotation::interpolate_spherical`] but not constant
    /// speed.
    pub fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        let a = start.quat();
        let mut b = end.quat();
        if a.dot(b) < 0.0 {
            b = b.negate();
        }
        Self::from_quat(a.scale(1.0 - t).plus(b.scale(t)).normalize())
    }

    /// Caches the difference used by repeated spherical interpolations
    /// between the same endpoints.
    pub fn create_interpolation_precomputation(start: Self, end: Self) -> Self {
        start.difference_to(end)
    }

    /// Spherical interpolation using a cached difference from
    /// [`Rotation::create_interpolation_precomputation`].
    pub fn interpolate_using_precomputation(start: Self, precomputation: Self, t: f32) -> Self {
        start.followed_by(precomputation.scaled_by(t))
    }

    /// Whether both describe the same rotation (`q` or `-q`), exactly.
    pub fn equivalent(self, other: Self) -> bool {
        self == other || self.to_quaternion() == other.quat().negate().to_array()
    }

    /// [`Rotation::equivalent`] with a per-component tolerance.
    pub fn equivalent_within(self, other: Self, tolerance: f32) -> bool {
        let close = |a: [f32; 4], b: [f32; 4]| a.iter().zip(b).all(|(x, y)| (x - y).abs() <= tolerance);
        let other_q = other.quat();
        close(self.to_quaternion(), other_q.to_array())
            || close(self.to_quaternion(), other_q.negate().to_array())
    }

    /// Whether both rotations move `direction` to within `tolerance` of
    /// the same place.
    pub fn equals_for_direction(self, other: Self, direction: Direction, tolerance: Angle) -> bool {
        self.rotate(direction)
            .equals_within_angle(other.rotate(direction), tolerance)
    }

    /// Uniformly random axis with a uniformly random angle.
    pub fn random() -> Self {
        Self::from_angle_around_axis(Angle::random(), Direction::random())
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::NONE
    }
}

impl Add for Rotation {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.followed_by(rhs)
    }
}

impl Neg for Rotation {
    type Output = Self;

    fn neg(self) -> Self {
        self.reversed()
    }
}

impl Mul<f32> for Rotation {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        self.scaled_by(rhs)
    }
}

impl TextFormat for Rotation {
    fn format_with(&self, config: &FormatConfig) -> String {
        let axis = self.axis().map_or([0.0; 3], Direction::to_vector3);
        format!(
            "{} around {}",
            self.angle().format_with(config),
            format_vector3(axis, config)
        )
    }

    fn parse_with(text: &str, config: &FormatConfig) -> Result<Self, ParseError> {
        let (angle, axis) = text
            .split_once(" around ")
            .ok_or_else(|| ParseError::MissingDelimiter {
                expected: " around ".to_owned(),
            })?;
        let angle = Angle::parse_with(angle, config)?;
        let axis = Direction::from_vector3(parse_vector3(axis, config)?);
        Ok(Self::from_angle_around_optional_axis(angle, axis))
    }
}

crate::impl_text_traits!(Rotation);

impl ByteSerializable for Rotation {
    const SERIALIZED_LEN: usize = 16;

    fn write_to<B: BufMut>(&self, dest: &mut B) {
        put_f32s(dest, &self.to_quaternion());
    }

    fn read_from<B: Buf>(src: &mut B) -> Result<Self, GeometryError> {
        Ok(Self::from_quaternion_pre_normalized(get_f32s(src)))
    }
}
