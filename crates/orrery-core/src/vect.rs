// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use std::ops::{Add, Div, Mul, Neg, Sub};

use bytemuck::{Pod, Zeroable};
use bytes::{Buf, BufMut};

use crate::codec::{get_f32s, put_f32s, ByteSerializable};
use crate::direction::Direction;
use crate::error::{GeometryError, ParseError};
use crate::format::{format_vector3, parse_vector3, FormatConfig, TextFormat};
use crate::location::Location;
use crate::math::Vec3;
use crate::random;
use crate::rotation::Rotation;

/// Free vector: a displacement with any magnitude, including zero.
///
/// Distinct from [`Direction`] so that "has no direction" (the zero vector)
/// never masquerades as a unit direction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vect {
    x: f32,
    y: f32,
    z: f32,
}

impl Vect {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Half-width of the cube [`Vect::random`] samples from.
    pub const DEFAULT_RANDOM_RANGE: f32 = 100.0;

    /// Creates a vector from components.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Creates a vector from a component array.
    pub const fn from_vector3(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }

    /// Components as an array; lossless.
    pub const fn to_vector3(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// X component.
    pub const fn x(self) -> f32 {
        self.x
    }

    /// Y component.
    pub const fn y(self) -> f32 {
        self.y
    }

    /// Z component.
    pub const fn z(self) -> f32 {
        self.z
    }

    pub(crate) const fn vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub(crate) const fn from_vec3(v: Vec3) -> Self {
        Self::new(v.x(), v.y(), v.z())
    }

    /// Same displacement, as a point relative to the origin.
    pub const fn as_location(self) -> Location {
        Location::new(self.x, self.y, self.z)
    }

    /// Euclidean length.
    pub fn length(self) -> f32 {
        self.vec3().length()
    }

    /// Squared length.
    pub fn length_squared(self) -> f32 {
        self.vec3().length_squared()
    }

    /// Whether the length is 1 within a relative tolerance of `1e-3`.
    pub fn is_unit_length(self) -> bool {
        (self.length_squared() - 1.0).abs() < 1e-3
    }

    /// Negated vector.
    pub fn flipped(self) -> Self {
        -self
    }

    /// Component-wise reciprocal, or `None` when any component is zero.
    pub fn reciprocal(self) -> Option<Self> {
        if self.x == 0.0 || self.y == 0.0 || self.z == 0.0 {
            return None;
        }
        Some(Self::from_vec3(self.vec3().map(|c| 1.0 / c)))
    }

    /// Direction of the vector, or `None` for a (near-)zero vector.
    pub fn direction(self) -> Option<Direction> {
        Direction::from_vector3(self.to_vector3())
    }

    /// Unit-length copy, or `None` for a (near-)zero vector.
    pub fn as_unit_length(self) -> Option<Self> {
        self.direction().map(Direction::as_vect)
    }

    /// Dot product.
    pub fn dot(self, other: Self) -> f32 {
        self.vec3().dot(other.vec3())
    }

    /// Cross product.
    pub fn cross(self, other: Self) -> Self {
        Self::from_vec3(self.vec3().cross(other.vec3()))
    }

    /// Component-wise product.
    pub fn multiplied_by_components(self, other: Self) -> Self {
        Self::from_vec3(self.vec3().zip_map(other.vec3(), |a, b| a * b))
    }

    /// Component-wise quotient.
    pub fn divided_by_components(self, other: Self) -> Self {
        Self::from_vec3(self.vec3().zip_map(other.vec3(), |a, b| a / b))
    }

    /// Component of this vector along `direction`.
    pub fn projected_onto(self, direction: Direction) -> Self {
        direction.with_length(self.dot(direction.as_vect()))
    }

    /// Component of this vector perpendicular to `direction`.
    ///
    /// `None` when the vector is zero or parallel/antipodal to `direction`.
    pub fn orthogonalized_against(self, direction: Direction) -> Option<Self> {
        self.direction()?.orthogonalized_against(direction)?;
        Some(self - self.projected_onto(direction))
    }

    /// Component of this vector along `direction`.
    ///
    /// `None` when the vector is zero or perpendicular to `direction`.
    pub fn parallelized_with(self, direction: Direction) -> Option<Self> {
        self.direction()?.parallelized_with(direction)?;
        Some(self.projected_onto(direction))
    }

    /// Multiplies every component by `scalar`.
    pub fn scaled_by(self, scalar: f32) -> Self {
        self * scalar
    }

    /// Same direction, new length. The zero vector stays zero.
    pub fn with_length(self, length: f32) -> Self {
        self.direction()
            .map_or(Self::ZERO, |direction| direction.with_length(length))
    }

    /// Shortens by `amount`, stopping at zero.
    pub fn shortened_by(self, amount: f32) -> Self {
        self.with_length((self.length() - amount).max(0.0))
    }

    /// Lengthens by `amount`.
    pub fn lengthened_by(self, amount: f32) -> Self {
        self.with_length(self.length() + amount)
    }

    /// Caps the length at `max_length`.
    pub fn with_max_length(self, max_length: f32) -> Self {
        if self.length_squared() > max_length * max_length {
            self.with_length(max_length)
        } else {
            self
        }
    }

    /// Raises the length to at least `min_length` (zero stays zero).
    pub fn with_min_length(self, min_length: f32) -> Self {
        if self.length_squared() < min_length * min_length {
            self.with_length(min_length)
        } else {
            self
        }
    }

    /// Same length, pointing along `direction`.
    pub fn with_direction(self, direction: Direction) -> Self {
        direction.with_length(self.length())
    }

    /// Rotated about the origin.
    pub fn rotated_by(self, rotation: Rotation) -> Self {
        Self::from_vec3(rotation.rotate_vec3(self.vec3()))
    }

    /// Unclamped component-wise linear interpolation.
    pub fn interpolate(start: Self, end: Self, t: f32) -> Self {
        Self::from_vec3(start.vec3().lerp(end.vec3(), t))
    }

    /// Closest point to `self` on the segment from `min` to `max`.
    pub fn clamp(self, min: Self, max: Self) -> Self {
        let segment = max - min;
        let len_sq = segment.length_squared();
        if len_sq == 0.0 {
            return min;
        }
        let t = ((self - min).dot(segment) / len_sq).max(0.0).min(1.0);
        min + segment * t
    }

    /// Equality with a per-component tolerance.
    pub fn equals(self, other: Self, tolerance: f32) -> bool {
        let diff = (self - other).vec3();
        diff.x().abs() <= tolerance && diff.y().abs() <= tolerance && diff.z().abs() <= tolerance
    }

    /// Random vector with every component in `[-100, 100)`.
    pub fn random() -> Self {
        let range = Self::DEFAULT_RANDOM_RANGE;
        Self::new(
            random::next_f32_in(-range, range),
            random::next_f32_in(-range, range),
            random::next_f32_in(-range, range),
        )
    }

    /// Random vector with each component between the matching components
    /// of `min` and `max`.
    pub fn random_between(min: Self, max: Self) -> Self {
        Self::new(
            random::next_f32_in(min.x, max.x),
            random::next_f32_in(min.y, max.y),
            random::next_f32_in(min.z, max.z),
        )
    }
}

impl Add for Vect {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_vec3(self.vec3() + rhs.vec3())
    }
}

impl Sub for Vect {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_vec3(self.vec3() - rhs.vec3())
    }
}

impl Neg for Vect {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from_vec3(-self.vec3())
    }
}

impl Mul<f32> for Vect {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::from_vec3(self.vec3() * rhs)
    }
}

impl Mul<Vect> for f32 {
    type Output = Vect;

    fn mul(self, rhs: Vect) -> Vect {
        rhs * self
    }
}

impl Div<f32> for Vect {
    type Output = Self;

    fn div(self, rhs: f32) -> Self {
        Self::from_vec3(self.vec3().map(|c| c / rhs))
    }
}

impl Mul<Rotation> for Vect {
    type Output = Self;

    fn mul(self, rhs: Rotation) -> Self {
        self.rotated_by(rhs)
    }
}

impl From<[f32; 3]> for Vect {
    fn from(value: [f32; 3]) -> Self {
        Self::from_vector3(value)
    }
}

impl TextFormat for Vect {
    fn format_with(&self, config: &FormatConfig) -> String {
        format_vector3(self.to_vector3(), config)
    }

    fn parse_with(text: &str, config: &FormatConfig) -> Result<Self, ParseError> {
        parse_vector3(text, config).map(Self::from_vector3)
    }
}

crate::impl_text_traits!(Vect);

impl ByteSerializable for Vect {
    const SERIALIZED_LEN: usize = 12;

    fn write_to<B: BufMut>(&self, dest: &mut B) {
        put_f32s(dest, &self.to_vector3());
    }

    fn read_from<B: Buf>(src: &mut B) -> Result<Self, GeometryError> {
        Ok(Self::from_vector3(get_f32s(src)))
    }
}
