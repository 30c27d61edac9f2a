// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use std::ops::{Add, Mul, Sub};

use bytemuck::{Pod, Zeroable};
use bytes::{Buf, BufMut};

use crate::codec::{get_f32s, put_f32s, ByteSerializable};
use crate::error::{GeometryError, ParseError};
use crate::format::{format_vector3, parse_vector3, FormatConfig, TextFormat};
use crate::math::Vec3;
use crate::rotation::Rotation;
use crate::vect::Vect;

/// A point in space.
///
/// Points and displacements do not mix freely: `Location + Vect` is a
/// `Location`, `Location - Location` is a `Vect`, and two locations cannot
/// be added.
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    x: f32,
    y: f32,
    z: f32,
}

impl Location {
    /// `(0, 0, 0)`.
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a location from coordinates.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Creates a location from a coordinate array.
    pub const fn from_vector3(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }

    /// Coordinates as an array; lossless.
    pub const fn to_vector3(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// X coordinate.
    pub const fn x(self) -> f32 {
        self.x
    }

    /// Y coordinate.
    pub const fn y(self) -> f32 {
        self.y
    }

    /// Z coordinate.
    pub const fn z(self) -> f32 {
        self.z
    }

    pub(crate) const fn vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub(crate) const fn from_vec3(v: Vec3) -> Self {
        Self::new(v.x(), v.y(), v.z())
    }

    /// Displacement from the origin to this point.
    pub const fn as_vect(self) -> Vect {
        Vect::new(self.x, self.y, self.z)
    }

    /// This point displaced by `vect`.
    pub fn moved_by(self, vect: Vect) -> Self {
        self + vect
    }

    /// Displacement from `self` to `other`.
    pub fn vect_to(self, other: Self) -> Vect {
        other - self
    }

    /// Displacement from `other` to `self`.
    pub fn vect_from(self, other: Self) -> Vect {
        self - other
    }

    /// Euclidean distance.
    pub fn distance_from(self, other: Self) -> f32 {
        (self - other).length()
    }

    /// Squared Euclidean distance.
    pub fn distance_squared_from(self, other: Self) -> f32 {
        (self - other).length_squared()
    }

    /// Whether the two points lie within `distance` of each other.
    pub fn equals_within_distance(self, other: Self, distance: f32) -> bool {
        self.distance_squared_from(other) <= distance * distance
    }

    /// Equality with a per-component tolerance.
    pub fn equals(self, other: Self, tolerance: f32) -> bool {
        self.as_vect().equals(other.as_vect(), tolerance)
    }

    /// Rotated about the origin.
    pub fn rotated_by(self, rotation: Rotation) -> Self {
        Self::from_vec3(rotation.rotate_vec3(self.vec3()))
    }

    /// Rotated about `pivot`.
    pub fn rotated_around(self, pivot: Self, rotation: Rotation) -> Self {
        pivot + (self - pivot).rotated_by(rotation)
    }

    /// Unclamped linear interpolation.
    pub fn interpolate(start: Self, end: Self, t: f32) -> Self {
        Self::from_vec3(start.vec3().lerp(end.vec3(), t))
    }

    /// Closest point to `self` on the segment from `min` to `max`.
    pub fn clamp(self, min: Self, max: Self) -> Self {
        self.as_vect().clamp(min.as_vect(), max.as_vect()).as_location()
    }

    /// Random location with every coordinate in `[-100, 100)`.
    pub fn random() -> Self {
        Vect::random().as_location()
    }

    /// Random location inside the box spanned by `min` and `max`.
    pub fn random_between(min: Self, max: Self) -> Self {
        Vect::random_between(min.as_vect(), max.as_vect()).as_location()
    }
}

impl Add<Vect> for Location {
    type Output = Self;

    fn add(self, rhs: Vect) -> Self {
        Self::from_vec3(self.vec3() + rhs.vec3())
    }
}

impl Sub<Vect> for Location {
    type Output = Self;

    fn sub(self, rhs: Vect) -> Self {
        Self::from_vec3(self.vec3() - rhs.vec3())
    }
}

impl Sub for Location {
    type Output = Vect;

    fn sub(self, rhs: Self) -> Vect {
        Vect::from_vec3(self.vec3() - rhs.vec3())
    }
}

impl Mul<Rotation> for Location {
    type Output = Self;

    fn mul(self, rhs: Rotation) -> Self {
        self.rotated_by(rhs)
    }
}

impl From<[f32; 3]> for Location {
    fn from(value: [f32; 3]) -> Self {
        Self::from_vector3(value)
    }
}

impl TextFormat for Location {
    fn format_with(&self, config: &FormatConfig) -> String {
        format_vector3(self.to_vector3(), config)
    }

    fn parse_with(text: &str, config: &FormatConfig) -> Result<Self, ParseError> {
        parse_vector3(text, config).map(Self::from_vector3)
    }
}

crate::impl_text_traits!(Location);

impl ByteSerializable for Location {
    const SERIALIZED_LEN: usize = 12;

    fn write_to<B: BufMut>(&self, dest: &mut B) {
        put_f32s(dest, &self.to_vector3());
    }

    fn read_from<B: Buf>(src: &mut B) -> Result<Self, GeometryError> {
        Ok(Self::from_vector3(get_f32s(src)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Angle, Direction};

    #[test]
    fn point_vector_arithmetic() {
        let a = Location::new(1.0, 2.0, 3.0);
        let b = Location::new(4.0, 6.0, 3.0);
        assert_eq!(a.vect_to(b), Vect::new(3.0, 4.0, 0.0));
        assert_eq!(a.vect_from(b), Vect::new(-3.0, -4.0, 0.0));
        assert_eq!(a.distance_from(b), 5.0);
        assert_eq!(a.distance_squared_from(b), 25.0);
        assert_eq!(a.moved_by(a.vect_to(b)), b);
        assert!(a.equals_within_distance(b, 5.0));
        assert!(!a.equals_within_distance(b, 4.99));
    }

    #[test]
    fn rotation_about_a_pivot() {
        let pivot = Location::new(1.0, 0.0, 0.0);
        let quarter = crate::Rotation::from_angle_around_axis(Angle::QUARTER_CIRCLE, Direction::UP);
        let rotated = Location::new(1.0, 0.0, 1.0).rotated_around(pivot, quarter);
        assert!(rotated.equals(Location::new(2.0, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn text_round_trip() {
        let loc = Location::new(0.5, 0.0, -7.0);
        assert_eq!(loc.to_string(), "<0.5, 0, -7>");
        assert_eq!(loc.to_string().parse::<Location>(), Ok(loc));
        assert!("<0.5, 0, -7".parse::<Location>().is_err());
    }
}
