// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use bytes::{Buf, BufMut};
use orrery_core::codec::ByteSerializable;
use orrery_core::format::{format_fields, parse_fields, FormatConfig, TextFormat};
use orrery_core::{Direction, GeometryError, Location, ParseError, Rotation, Vect};

use super::{BoundedRay, Line, LineLike};

/// Half-line from `start` along `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ray {
    start: Location,
    direction: Direction,
}

impl Ray {
    /// Ray from `start` along `direction`.
    pub const fn new(start: Location, direction: Direction) -> Self {
        Self { start, direction }
    }

    /// Same start, opposite direction.
    pub fn flipped(self) -> Self {
        Self::new(self.start, self.direction.flipped())
    }

    /// Unbounded line through the ray.
    pub const fn to_line(self) -> Line {
        Line::new(self.start, self.direction)
    }

    /// Segment covering the first `length` units of the ray.
    pub fn to_bounded(self, length: f32) -> BoundedRay {
        BoundedRay::from_start_and_vect(self.start, self.direction.with_length(length))
    }

    /// Ray translated by `vect`.
    pub fn moved_by(self, vect: Vect) -> Self {
        Self::new(self.start + vect, self.direction)
    }

    /// Ray rotated about its start point.
    pub fn rotated_by(self, rotation: Rotation) -> Self {
        Self::new(self.start, self.direction.rotated_by(rotation))
    }

    /// Start interpolated linearly, direction spherically.
    pub fn interpolate(start: Self, end: Self, t: f32) -> Self {
        Self::new(
            Location::interpolate(start.start, end.start, t),
            Direction::interpolate(start.direction, end.direction, t),
        )
    }

    /// Random ray.
    pub fn random() -> Self {
        Self::new(Location::random(), Direction::random())
    }
}

impl LineLike for Ray {
    type Reflection = Self;

    fn start(&self) -> Location {
        self.start
    }

    fn direction(&self) -> Direction {
        self.direction
    }

    fn length(&self) -> Option<f32> {
        None
    }

    fn is_unbounded_in_both_directions(&self) -> bool {
        false
    }

    fn reflection_at(&self, distance: f32, direction: Direction) -> Self {
        Self::new(self.unbounded_location_at_distance(distance), direction)
    }
}

impl TextFormat for Ray {
    fn format_with(&self, config: &FormatConfig) -> String {
        format_fields(
            "Ray",
            &[
                ("StartPoint", self.start.format_with(config)),
                ("Direction", self.direction.format_with(config)),
            ],
        )
    }

    fn parse_with(text: &str, config: &FormatConfig) -> Result<Self, ParseError> {
        let fields = parse_fields(text, "Ray", &["StartPoint", "Direction"])?;
        Ok(Self::new(
            Location::parse_with(fields[0], config)?,
            Direction::parse_with(fields[1], config)?,
        ))
    }
}

orrery_core::impl_text_traits!(Ray);

impl ByteSerializable for Ray {
    const SERIALIZED_LEN: usize = 24;

    fn write_to<B: BufMut>(&self, dest: &mut B) {
        self.start.write_to(dest);
        self.direction.write_to(dest);
    }

    fn read_from<B: Buf>(src: &mut B) -> Result<Self, GeometryError> {
        let start = Location::read_from(src)?;
        let direction = Direction::read_from(src)?;
        Ok(Self::new(start, direction))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn conversions() {
        let ray = Ray::new(Location::new(0.0, 1.0, 0.0), Direction::FORWARD);
        let segment = ray.to_bounded(4.0);
        assert_eq!(segment.end(), Location::new(0.0, 1.0, 4.0));
        assert_eq!(segment.length(), Some(4.0));
        assert_eq!(ray.to_line().start(), ray.start());
        assert!(ray.to_line().distance_is_within_bounds(-10.0));
        assert!(!ray.distance_is_within_bounds(-10.0));
        assert_eq!(ray.flipped().start(), ray.start());
        assert_eq!(ray.flipped().direction(), Direction::BACKWARD);
    }

    #[test]
    fn text_and_bytes() {
        let ray = Ray::new(Location::new(-1.5, 0.0, 2.0), Direction::DOWN);
        assert_eq!(ray.to_string(), "Ray[StartPoint <-1.5, 0, 2> | Direction <0, -1, 0>]");
        assert_eq!(ray.to_string().parse::<Ray>().unwrap(), ray);
        let bytes = ray.to_bytes();
        assert_eq!(bytes.len(), 24);
        assert_eq!(Ray::from_bytes(&bytes), Ok(ray));
        let mut zeroed = bytes.to_vec();
        zeroed[12..].fill(0);
        assert!(Ray::from_bytes(&zeroed).is_err());
    }
}
