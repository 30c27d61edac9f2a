// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use bytes::{Buf, BufMut};
use orrery_core::codec::ByteSerializable;
use orrery_core::format::{format_fields, parse_fields, FormatConfig, TextFormat};
use orrery_core::{Direction, GeometryError, Location, ParseError, Rotation, Vect};

use super::{LineLike, Ray};

/// Infinite line through `point_on_line`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    point_on_line: Location,
    direction: Direction,
}

impl Line {
    /// Line through `point_on_line` running along `direction`.
    pub const fn new(point_on_line: Location, direction: Direction) -> Self {
        Self {
            point_on_line,
            direction,
        }
    }

    /// The anchor point the line was built from.
    pub const fn point_on_line(self) -> Location {
        self.point_on_line
    }

    /// Same line, opposite direction.
    pub fn flipped(self) -> Self {
        Self::new(self.point_on_line, self.direction.flipped())
    }

    /// Line translated by `vect`.
    pub fn moved_by(self, vect: Vect) -> Self {
        Self::new(self.point_on_line + vect, self.direction)
    }

    /// Line rotated about its anchor point.
    pub fn rotated_by(self, rotation: Rotation) -> Self {
        Self::new(self.point_on_line, self.direction.rotated_by(rotation))
    }

    /// Ray starting at the anchor point.
    pub const fn to_ray(self) -> Ray {
        Ray::new(self.point_on_line, self.direction)
    }

    /// Anchor interpolated linearly, direction spherically.
    pub fn interpolate(start: Self, end: Self, t: f32) -> Self {
        Self::new(
            Location::interpolate(start.point_on_line, end.point_on_line, t),
            Direction::interpolate(start.direction, end.direction, t),
        )
    }

    /// Random line.
    pub fn random() -> Self {
        Self::new(Location::random(), Direction::random())
    }
}

impl LineLike for Line {
    type Reflection = Ray;

    fn start(&self) -> Location {
        self.point_on_line
    }

    fn direction(&self) -> Direction {
        self.direction
    }

    fn length(&self) -> Option<f32> {
        None
    }

    fn is_unbounded_in_both_directions(&self) -> bool {
        true
    }

    fn reflection_at(&self, distance: f32, direction: Direction) -> Ray {
        Ray::new(self.unbounded_location_at_distance(distance), direction)
    }
}

impl TextFormat for Line {
    fn format_with(&self, config: &FormatConfig) -> String {
        format_fields(
            "Line",
            &[
                ("PointOnLine", self.point_on_line.format_with(config)),
                ("Direction", self.direction.format_with(config)),
            ],
        )
    }

    fn parse_with(text: &str, config: &FormatConfig) -> Result<Self, ParseError> {
        let fields = parse_fields(text, "Line", &["PointOnLine", "Direction"])?;
        Ok(Self::new(
            Location::parse_with(fields[0], config)?,
            Direction::parse_with(fields[1], config)?,
        ))
    }
}

orrery_core::impl_text_traits!(Line);

impl ByteSerializable for Line {
    const SERIALIZED_LEN: usize = 24;

    fn write_to<B: BufMut>(&self, dest: &mut B) {
        self.point_on_line.write_to(dest);
        self.direction.write_to(dest);
    }

    fn read_from<B: Buf>(src: &mut B) -> Result<Self, GeometryError> {
        let point_on_line = Location::read_from(src)?;
        let direction = Direction::read_from(src)?;
        Ok(Self::new(point_on_line, direction))
    }
}
