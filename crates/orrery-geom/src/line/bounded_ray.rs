// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use bytes::{Buf, BufMut};
use orrery_core::codec::ByteSerializable;
use orrery_core::format::{format_fields, parse_fields, FormatConfig, TextFormat};
use orrery_core::{Direction, GeometryError, Location, ParseError, Rotation, Vect};
use tracing::trace;

use super::{Line, LineLike, Ray};
use crate::plane::Plane;

/// Directed segment from `start` to `end`.
///
/// A zero-length segment still reports a direction ([`Direction::FORWARD`])
/// so every [`LineLike`] query stays defined.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundedRay {
    start: Location,
    end: Location,
}

impl BoundedRay {
    /// Segment from `start` to `end`.
    pub const fn new(start: Location, end: Location) -> Self {
        Self { start, end }
    }

    /// Segment from `start` covering `vect`.
    pub fn from_start_and_vect(start: Location, vect: Vect) -> Self {
        Self::new(start, start + vect)
    }

    /// End point.
    pub const fn end(self) -> Location {
        self.end
    }

    /// Displacement from start to end.
    pub fn vect(self) -> Vect {
        self.end - self.start
    }

    /// Midpoint.
    pub fn middle(self) -> Location {
        Location::interpolate(self.start, self.end, 0.5)
    }

    /// Same segment traversed end to start.
    pub const fn flipped(self) -> Self {
        Self::new(self.end, self.start)
    }

    /// Segment from the same start with `length`, keeping the direction.
    pub fn with_length(self, length: f32) -> Self {
        Self::from_start_and_vect(self.start, self.direction().with_length(length))
    }

    /// Segment scaled about its start point.
    pub fn scaled_by(self, factor: f32) -> Self {
        Self::from_start_and_vect(self.start, self.vect() * factor)
    }

    /// Segment scaled about its midpoint.
    pub fn scaled_around_middle(self, factor: f32) -> Self {
        let middle = self.middle();
        let half = self.vect() * (factor * 0.5);
        Self::new(middle - half, middle + half)
    }

    /// End point rotated about the start.
    pub fn rotated_around_start(self, rotation: Rotation) -> Self {
        Self::new(self.start, self.end.rotated_around(self.start, rotation))
    }

    /// Both ends rotated about the midpoint.
    pub fn rotated_around_middle(self, rotation: Rotation) -> Self {
        let middle = self.middle();
        Self::new(
            self.start.rotated_around(middle, rotation),
            self.end.rotated_around(middle, rotation),
        )
    }

    /// Start point rotated about the end.
    pub fn rotated_around_end(self, rotation: Rotation) -> Self {
        Self::new(self.start.rotated_around(self.end, rotation), self.end)
    }

    /// Segment translated by `vect`.
    pub fn moved_by(self, vect: Vect) -> Self {
        Self::new(self.start + vect, self.end + vect)
    }

    /// Unbounded line through the segment.
    pub fn to_line(self) -> Line {
        Line::new(self.start, self.direction())
    }

    /// Ray from the start through the end.
    pub fn to_ray(self) -> Ray {
        Ray::new(self.start, self.direction())
    }

    /// Halves on either side of `plane`, start side first. `None` when the
    /// segment does not cross the plane.
    pub fn try_split(self, plane: Plane) -> Option<(Self, Self)> {
        let crossing = self.intersection_with_plane(plane)?;
        Some((Self::new(self.start, crossing), Self::new(crossing, self.end)))
    }

    /// Both ends interpolated linearly.
    pub fn interpolate(start: Self, end: Self, t: f32) -> Self {
        Self::new(
            Location::interpolate(start.start, end.start, t),
            Location::interpolate(start.end, end.end, t),
        )
    }

    /// Random segment between two random points.
    pub fn random() -> Self {
        Self::new(Location::random(), Location::random())
    }
}

impl LineLike for BoundedRay {
    type Reflection = Self;

    fn start(&self) -> Location {
        self.start
    }

    fn direction(&self) -> Direction {
        self.vect().direction().unwrap_or(Direction::FORWARD)
    }

    fn length(&self) -> Option<f32> {
        Some(self.vect().length())
    }

    fn is_unbounded_in_both_directions(&self) -> bool {
        false
    }

    fn reflection_at(&self, distance: f32, direction: Direction) -> Self {
        let remaining = self.vect().length() - distance;
        if remaining <= 0.0 {
            trace!(
                start = %self.start,
                end = %self.end,
                distance,
                "reflection leaves a zero-length segment"
            );
        }
        Self::from_start_and_vect(
            self.unbounded_location_at_distance(distance),
            direction.with_length(remaining.max(0.0)),
        )
    }
}

impl TextFormat for BoundedRay {
    fn format_with(&self, config: &FormatConfig) -> String {
        format_fields(
            "BoundedRay",
            &[
                ("StartPoint", self.start.format_with(config)),
                ("EndPoint", self.end.format_with(config)),
            ],
        )
    }

    fn parse_with(text: &str, config: &FormatConfig) -> Result<Self, ParseError> {
        let fields = parse_fields(text, "BoundedRay", &["StartPoint", "EndPoint"])?;
        Ok(Self::new(
            Location::parse_with(fields[0], config)?,
            Location::parse_with(fields[1], config)?,
        ))
    }
}

orrery_core::impl_text_traits!(BoundedRay);

impl ByteSerializable for BoundedRay {
    const SERIALIZED_LEN: usize = 24;

    fn write_to<B: BufMut>(&self, dest: &mut B) {
        self.start.write_to(dest);
        self.end.write_to(dest);
    }

    fn read_from<B: Buf>(src: &mut B) -> Result<Self, GeometryError> {
        let start = Location::read_from(src)?;
        let end = Location::read_from(src)?;
        Ok(Self::new(start, end))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use orrery_core::Angle;

    use super::*;

    fn segment() -> BoundedRay {
        BoundedRay::new(Location::new(1.0, 0.0, 0.0), Location::new(5.0, 0.0, 0.0))
    }

    #[test]
    fn shape_of_a_segment() {
        let s = segment();
        assert_eq!(s.vect(), Vect::new(4.0, 0.0, 0.0));
        assert_eq!(s.middle(), Location::new(3.0, 0.0, 0.0));
        assert_eq!(s.length(), Some(4.0));
        assert_eq!(s.direction(), Direction::LEFT);
        assert_eq!(s.flipped().direction(), Direction::RIGHT);
        assert_eq!(s.with_length(1.0).end(), Location::new(2.0, 0.0, 0.0));
        assert_eq!(s.scaled_by(0.5).end(), Location::new(3.0, 0.0, 0.0));
        let around_middle = s.scaled_around_middle(0.5);
        assert_eq!(around_middle.start(), Location::new(2.0, 0.0, 0.0));
        assert_eq!(around_middle.end(), Location::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn zero_length_segments_face_forward() {
        let point = BoundedRay::new(Location::ORIGIN, Location::ORIGIN);
        assert_eq!(point.direction(), Direction::FORWARD);
        assert_eq!(point.length(), Some(0.0));
        assert!(point.distance_is_within_bounds(0.0));
        assert!(!point.distance_is_within_bounds(0.1));
    }

    #[test]
    fn rotations_pivot_where_named() {
        let quarter = Rotation::from_angle_around_axis(Angle::QUARTER_CIRCLE, Direction::UP);
        let s = segment();
        let about_start = s.rotated_around_start(quarter);
        assert_eq!(about_start.start(), s.start());
        assert!((about_start.length().unwrap() - 4.0).abs() < 1e-5);

        let about_end = s.rotated_around_end(quarter);
        assert_eq!(about_end.end(), s.end());

        let about_middle = s.rotated_around_middle(quarter);
        assert!(about_middle.middle().equals(s.middle(), 1e-5));
        assert!(about_middle.direction().dot(s.direction()).abs() < 1e-5);
    }

    #[test]
    fn splitting_at_a_plane() {
        let wall = Plane::new(Direction::LEFT, Location::new(2.0, 0.0, 0.0));
        let (before, after) = segment().try_split(wall).unwrap();
        assert_eq!(before.start(), Location::new(1.0, 0.0, 0.0));
        assert_eq!(before.end(), Location::new(2.0, 0.0, 0.0));
        assert_eq!(after.end(), Location::new(5.0, 0.0, 0.0));

        let far_wall = Plane::new(Direction::LEFT, Location::new(9.0, 0.0, 0.0));
        assert!(segment().try_split(far_wall).is_none());
    }

    #[test]
    fn text_and_bytes() {
        let s = segment();
        assert_eq!(s.to_string(), "BoundedRay[StartPoint <1, 0, 0> | EndPoint <5, 0, 0>]");
        assert_eq!(s.to_string().parse::<BoundedRay>().unwrap(), s);
        assert_eq!(BoundedRay::from_bytes(&s.to_bytes()), Ok(s));
    }
}
