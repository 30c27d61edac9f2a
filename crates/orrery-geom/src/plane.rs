// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use std::ops::{Add, Neg, Sub};

use bytes::{Buf, BufMut};
use orrery_core::codec::ByteSerializable;
use orrery_core::format::{format_fields, parse_fields, FormatConfig, TextFormat};
use orrery_core::math::{acos_clamped, asin_clamped};
use orrery_core::{Angle, Direction, GeometryError, Location, ParseError, Rotation, Vect};
use tracing::debug;

use crate::line::Line;
use crate::shape::ConvexShape;

/// `|normal · direction|` below this reads as "parallel to the plane".
pub(crate) const PARALLEL_DOT_EPSILON: f32 = 1e-5;

/// Squared cross-product length below which two planes count as parallel.
const PARALLEL_CROSS_LENGTH_SQUARED: f32 = 1e-10;

/// Which side of a plane an object lies on.
///
/// "Faces towards" means the plane's normal points at the object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlaneObjectRelationship {
    /// The object lies entirely on the normal's side.
    PlaneFacesTowardsObject,
    /// The object lies entirely behind the plane.
    PlaneFacesAwayFromObject,
    /// The plane passes through the object.
    PlaneIntersectsObject,
}

impl PlaneObjectRelationship {
    /// Classifies a signed distance: positive faces towards, negative faces
    /// away, zero intersects.
    pub fn from_signed_distance(signed_distance: f32) -> Self {
        if signed_distance > 0.0 {
            Self::PlaneFacesTowardsObject
        } else if signed_distance < 0.0 {
            Self::PlaneFacesAwayFromObject
        } else {
            Self::PlaneIntersectsObject
        }
    }
}

/// Infinite oriented plane.
///
/// Stored as a unit normal plus the signed `offset` of the plane along that
/// normal, so the point closest to the origin is `normal * offset` and the
/// signed distance of `p` is `normal · p - offset` (positive on the side the
/// normal points to).
///
/// # Examples
/// ```
/// use orrery_core::{Direction, Location};
/// use orrery_geom::Plane;
///
/// let floor = Plane::new(Direction::UP, Location::new(3.0, -1.0, 8.0));
/// assert_eq!(floor.signed_distance_from(Location::ORIGIN), 1.0);
/// assert!(floor.faces_towards(Location::ORIGIN, Plane::DEFAULT_THICKNESS));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plane {
    normal: Direction,
    offset: f32,
}

impl Plane {
    /// Half-thickness used by containment and facing tests.
    pub const DEFAULT_THICKNESS: f32 = 0.01;

    /// Plane with `normal` passing through `point_on_plane`.
    pub fn new(normal: Direction, point_on_plane: Location) -> Self {
        Self {
            normal,
            offset: normal.as_vect().dot(point_on_plane.as_vect()),
        }
    }

    /// Plane whose closest point to the origin sits `translation` along
    /// `normal`.
    pub fn from_normal_and_translation_from_origin(normal: Direction, translation: f32) -> Self {
        Self {
            normal,
            offset: translation,
        }
    }

    /// Plane whose point closest to the origin is `point`.
    ///
    /// # Errors
    /// [`GeometryError::InvalidArgument`] when `point` is the origin, since
    /// the plane's orientation is then undefined.
    pub fn from_point_closest_to_origin(
        point: Location,
        normal_faces_origin: bool,
    ) -> Result<Self, GeometryError> {
        let outward = point
            .as_vect()
            .direction()
            .ok_or(GeometryError::InvalidArgument {
                what: "point_closest_to_origin",
                reason: "the origin does not determine a plane orientation",
            })?;
        let normal = if normal_faces_origin {
            outward.flipped()
        } else {
            outward
        };
        Ok(Self::new(normal, point))
    }

    /// Plane through three points, normal following the right-hand rule
    /// over `a -> b -> c`.
    ///
    /// # Errors
    /// [`GeometryError::InvalidArgument`] when the points are collinear or
    /// coincident.
    pub fn from_triangle_on_surface(
        a: Location,
        b: Location,
        c: Location,
    ) -> Result<Self, GeometryError> {
        match (b - a).cross(c - a).direction() {
            Some(normal) => Ok(Self::new(normal, a)),
            None => {
                debug!(%a, %b, %c, "degenerate triangle: no plane");
                Err(GeometryError::InvalidArgument {
                    what: "triangle",
                    reason: "points are collinear",
                })
            }
        }
    }

    /// Unit normal.
    pub const fn normal(self) -> Direction {
        self.normal
    }

    /// Signed translation of the plane along its normal.
    pub const fn offset(self) -> f32 {
        self.offset
    }

    /// Point on the plane nearest the origin.
    pub fn point_closest_to_origin(self) -> Location {
        self.normal.with_length(self.offset).as_location()
    }

    /// Signed distance of the origin; positive when the normal faces it.
    pub fn signed_distance_from_origin(self) -> f32 {
        -self.offset
    }

    /// Same plane with the normal reversed.
    pub fn flipped(self) -> Self {
        Self {
            normal: self.normal.flipped(),
            offset: -self.offset,
        }
    }

    /// Plane translated by `vect`.
    pub fn moved_by(self, vect: Vect) -> Self {
        Self {
            normal: self.normal,
            offset: self.offset + self.normal.as_vect().dot(vect),
        }
    }

    /// Plane rotated about the origin.
    pub fn rotated_around_origin_by(self, rotation: Rotation) -> Self {
        Self {
            normal: self.normal.rotated_by(rotation),
            offset: self.offset,
        }
    }

    /// Plane rotated about `pivot`.
    pub fn rotated_by(self, rotation: Rotation, pivot: Location) -> Self {
        let anchor = self.point_closest_to(pivot).rotated_around(pivot, rotation);
        Self::new(self.normal.rotated_by(rotation), anchor)
    }

    /// Dihedral angle in `[0°, 90°]`.
    pub fn angle_to(self, other: Self) -> Angle {
        Angle::from_radians(acos_clamped(self.normal.dot(other.normal).abs()))
    }

    /// Angle between `direction` and the plane surface, in `[0°, 90°]`.
    pub fn angle_to_direction(self, direction: Direction) -> Angle {
        Angle::from_radians(asin_clamped(self.normal.dot(direction).abs()))
    }

    /// As [`Plane::angle_to_direction`], negative when `direction` points
    /// behind the plane.
    pub fn signed_angle_to_direction(self, direction: Direction) -> Angle {
        Angle::from_radians(asin_clamped(self.normal.dot(direction)))
    }

    /// Angle between `direction` and the normal line, in `[0°, 90°]`.
    /// `None` when `direction` runs parallel to the plane.
    pub fn incident_angle_with(self, direction: Direction) -> Option<Angle> {
        let perpendicularity = self.normal.dot(direction).abs();
        if perpendicularity < PARALLEL_DOT_EPSILON {
            return None;
        }
        Some(Angle::from_radians(acos_clamped(perpendicularity)))
    }

    /// [`Plane::incident_angle_with`] without the parallel check; a
    /// parallel direction yields 90°.
    pub fn fast_incident_angle_with(self, direction: Direction) -> Angle {
        Angle::from_radians(acos_clamped(self.normal.dot(direction).abs()))
    }

    /// `direction` mirrored in the plane. `None` when it runs parallel.
    pub fn reflection_of(self, direction: Direction) -> Option<Direction> {
        if self.normal.dot(direction).abs() < PARALLEL_DOT_EPSILON {
            return None;
        }
        Some(self.fast_reflection_of(direction))
    }

    /// [`Plane::reflection_of`] without the parallel check; a parallel
    /// direction comes back unchanged.
    pub fn fast_reflection_of(self, direction: Direction) -> Direction {
        let along_normal = self.normal.with_length(2.0 * self.normal.dot(direction));
        let mirrored = direction.as_vect() - along_normal;
        Direction::from_vector3_pre_normalized(mirrored.to_vector3())
    }

    /// `direction` flattened into the plane. `None` when it is
    /// perpendicular to the plane.
    pub fn parallelization_of(self, direction: Direction) -> Option<Direction> {
        direction.orthogonalized_against(self.normal)
    }

    /// `direction` snapped onto the normal line. `None` when it lies in
    /// the plane.
    pub fn orthogonalization_of(self, direction: Direction) -> Option<Direction> {
        direction.parallelized_with(self.normal)
    }

    /// `vect` with its normal component removed; zero for a vector along
    /// the normal.
    pub fn projection_of(self, vect: Vect) -> Vect {
        vect - vect.projected_onto(self.normal)
    }

    /// Orthogonal projection of `location` onto the plane.
    pub fn point_closest_to(self, location: Location) -> Location {
        location - self.normal.with_length(self.signed_distance_from(location))
    }

    /// Signed distance; positive on the normal's side.
    pub fn signed_distance_from(self, location: Location) -> f32 {
        self.normal.as_vect().dot(location.as_vect()) - self.offset
    }

    /// Unsigned distance.
    pub fn distance_from(self, location: Location) -> f32 {
        self.signed_distance_from(location).abs()
    }

    /// `true` when `location` is further than `thickness` on the normal's side.
    pub fn faces_towards(self, location: Location, thickness: f32) -> bool {
        self.signed_distance_from(location) > thickness
    }

    /// `true` when `location` is further than `thickness` behind the plane.
    pub fn faces_away_from(self, location: Location, thickness: f32) -> bool {
        self.signed_distance_from(location) < -thickness
    }

    /// `true` when `location` lies within `thickness` of the plane.
    pub fn contains(self, location: Location, thickness: f32) -> bool {
        self.distance_from(location) <= thickness
    }

    /// `true` unless the planes are parallel.
    pub fn is_intersected_by(self, other: Self) -> bool {
        self.normal.cross(other.normal).length_squared() > PARALLEL_CROSS_LENGTH_SQUARED
    }

    /// Distance between parallel planes; zero for planes that meet.
    pub fn distance_from_plane(self, other: Self) -> f32 {
        if self.is_intersected_by(other) {
            0.0
        } else {
            self.distance_from(other.point_closest_to_origin())
        }
    }

    /// Line along which the planes meet. `None` for parallel planes.
    pub fn intersection_with(self, other: Self) -> Option<Line> {
        if !self.is_intersected_by(other) {
            return None;
        }
        let line_vect = self.normal.cross(other.normal);
        let direction = line_vect.direction()?;
        let [n1, n2] = [self.normal.to_vector3(), other.normal.to_vector3()];
        let (o1, o2) = (self.offset, other.offset);

        // Zero the coordinate along which the line direction is largest and
        // solve the remaining 2x2 system; its determinant is that component.
        let [dx, dy, dz] = line_vect.to_vector3().map(f32::abs);
        let (a, b) = if dx > dy && dx > dz {
            (1, 2)
        } else if dy > dz {
            (0, 2)
        } else {
            (0, 1)
        };
        let det = n1[a] * n2[b] - n2[a] * n1[b];
        let mut point = [0.0_f32; 3];
        point[a] = (n2[b] * o1 - n1[b] * o2) / det;
        point[b] = (n1[a] * o2 - n2[a] * o1) / det;
        Some(Line::new(Location::from_vector3(point), direction))
    }

    /// Normal interpolated spherically, anchor point linearly.
    pub fn interpolate(start: Self, end: Self, t: f32) -> Self {
        Self::new(
            Direction::interpolate(start.normal, end.normal, t),
            Location::interpolate(start.point_closest_to_origin(), end.point_closest_to_origin(), t),
        )
    }

    /// Random plane through a random point.
    pub fn random() -> Self {
        Self::new(Direction::random(), Location::random())
    }

    /// See [`ConvexShape::relationship_to`].
    pub fn relationship_to_shape<S: ConvexShape>(self, shape: &S) -> PlaneObjectRelationship {
        shape.relationship_to(self)
    }

    /// See [`ConvexShape::signed_distance_from`].
    pub fn signed_distance_from_shape<S: ConvexShape>(self, shape: &S) -> f32 {
        shape.signed_distance_from(self)
    }

    /// See [`ConvexShape::distance_from_plane`].
    pub fn distance_from_shape<S: ConvexShape>(self, shape: &S) -> f32 {
        shape.distance_from_plane(self)
    }

    /// See [`ConvexShape::distance_squared_from_plane`].
    pub fn distance_squared_from_shape<S: ConvexShape>(self, shape: &S) -> f32 {
        shape.distance_squared_from_plane(self)
    }

    /// See [`ConvexShape::surface_distance_from_plane`].
    pub fn surface_distance_from_shape<S: ConvexShape>(self, shape: &S) -> f32 {
        shape.surface_distance_from_plane(self)
    }

    /// See [`ConvexShape::surface_distance_squared_from_plane`].
    pub fn surface_distance_squared_from_shape<S: ConvexShape>(self, shape: &S) -> f32 {
        shape.surface_distance_squared_from_plane(self)
    }

    /// See [`ConvexShape::point_closest_to_plane`].
    pub fn closest_point_in<S: ConvexShape>(self, shape: &S) -> Location {
        shape.point_closest_to_plane(self)
    }

    /// See [`ConvexShape::surface_point_closest_to_plane`].
    pub fn closest_point_on_surface_of<S: ConvexShape>(self, shape: &S) -> Location {
        shape.surface_point_closest_to_plane(self)
    }

    /// See [`ConvexShape::closest_point_on_plane`].
    pub fn point_closest_to_shape<S: ConvexShape>(self, shape: &S) -> Location {
        shape.closest_point_on_plane(self)
    }
}

impl Neg for Plane {
    type Output = Self;

    fn neg(self) -> Self {
        self.flipped()
    }
}

impl Add<Vect> for Plane {
    type Output = Self;

    fn add(self, rhs: Vect) -> Self {
        self.moved_by(rhs)
    }
}

impl Sub<Vect> for Plane {
    type Output = Self;

    fn sub(self, rhs: Vect) -> Self {
        self.moved_by(-rhs)
    }
}

impl TextFormat for Plane {
    fn format_with(&self, config: &FormatConfig) -> String {
        format_fields(
            "Plane",
            &[
                ("Normal", self.normal.format_with(config)),
                ("PointClosestToOrigin", self.point_closest_to_origin().format_with(config)),
            ],
        )
    }

    fn parse_with(text: &str, config: &FormatConfig) -> Result<Self, ParseError> {
        let fields = parse_fields(text, "Plane", &["Normal", "PointClosestToOrigin"])?;
        let normal = Direction::parse_with(fields[0], config)?;
        let point = Location::parse_with(fields[1], config)?;
        Ok(Self::new(normal, point))
    }
}

orrery_core::impl_text_traits!(Plane);

impl ByteSerializable for Plane {
    const SERIALIZED_LEN: usize = 16;

    fn write_to<B: BufMut>(&self, dest: &mut B) {
        self.normal.write_to(dest);
        dest.put_f32_le(self.offset);
    }

    fn read_from<B: Buf>(src: &mut B) -> Result<Self, GeometryError> {
        let normal = Direction::read_from(src)?;
        let offset = src.get_f32_le();
        Ok(Self::from_normal_and_translation_from_origin(normal, offset))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::line::LineLike;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn offset_tracks_the_anchor_point() {
        let plane = Plane::new(Direction::UP, Location::new(5.0, 2.0, -3.0));
        assert_eq!(plane.point_closest_to_origin(), Location::new(0.0, 2.0, 0.0));
        assert_eq!(plane.signed_distance_from_origin(), -2.0);
        assert_eq!(plane.signed_distance_from(Location::new(0.0, 7.0, 0.0)), 5.0);
        assert_eq!(plane.flipped().signed_distance_from(Location::new(0.0, 7.0, 0.0)), -5.0);
        assert_eq!(-plane, plane.flipped());
    }

    #[test]
    fn closest_point_construction_orients_the_normal() {
        let point = Location::new(0.0, 0.0, 4.0);
        let away = Plane::from_point_closest_to_origin(point, false).unwrap();
        let towards = Plane::from_point_closest_to_origin(point, true).unwrap();
        assert_eq!(away.normal(), Direction::FORWARD);
        assert_eq!(towards.normal(), Direction::BACKWARD);
        assert!(towards.faces_towards(Location::ORIGIN, Plane::DEFAULT_THICKNESS));
        assert!(away.faces_away_from(Location::ORIGIN, Plane::DEFAULT_THICKNESS));
        assert!(Plane::from_point_closest_to_origin(Location::ORIGIN, true).is_err());
    }

    #[test]
    fn triangle_planes_follow_the_right_hand_rule() {
        let plane = Plane::from_triangle_on_surface(
            Location::new(0.0, 1.0, 0.0),
            Location::new(0.0, 1.0, 1.0),
            Location::new(1.0, 1.0, 0.0),
        )
        .unwrap();
        assert!(plane.normal().equals(Direction::UP, 1e-6));
        assert!(approx_eq(plane.offset(), 1.0));
        let collinear = Plane::from_triangle_on_surface(
            Location::ORIGIN,
            Location::new(1.0, 1.0, 1.0),
            Location::new(2.0, 2.0, 2.0),
        );
        assert!(matches!(collinear, Err(GeometryError::InvalidArgument { .. })));
    }

    #[test]
    fn translation_and_rotation() {
        let plane = Plane::new(Direction::UP, Location::ORIGIN);
        assert!(approx_eq((plane + Vect::new(3.0, 2.0, 1.0)).offset(), 2.0));
        assert!(approx_eq((plane - Vect::new(0.0, 2.0, 0.0)).offset(), -2.0));

        let quarter = Rotation::from_angle_around_axis(Angle::QUARTER_CIRCLE, Direction::FORWARD);
        let rotated = plane.rotated_by(quarter, Location::new(0.0, 1.0, 0.0));
        assert!(rotated.contains(Location::new(1.0, 1.0, 0.0), 1e-4));
        assert!(rotated.normal().dot(Direction::UP).abs() < 1e-5);
    }

    #[test]
    fn angles_to_directions_and_planes() {
        let floor = Plane::new(Direction::UP, Location::ORIGIN);
        let diagonal = Direction::new(1.0, 1.0, 0.0).unwrap();
        assert!(approx_eq(floor.angle_to_direction(diagonal).degrees(), 45.0));
        assert!(approx_eq(floor.signed_angle_to_direction(diagonal.flipped()).degrees(), -45.0));
        assert!(approx_eq(floor.incident_angle_with(Direction::DOWN).unwrap().degrees(), 0.0));
        assert_eq!(floor.incident_angle_with(Direction::LEFT), None);
        assert!(approx_eq(floor.fast_incident_angle_with(Direction::LEFT).degrees(), 90.0));
        let wall = Plane::new(Direction::LEFT, Location::ORIGIN);
        assert!(approx_eq(floor.angle_to(wall).degrees(), 90.0));
        assert!(approx_eq(floor.angle_to(floor.flipped()).degrees(), 0.0));
    }

    #[test]
    fn reflection_and_projection() {
        let floor = Plane::new(Direction::UP, Location::ORIGIN);
        let incoming = Direction::new(1.0, -1.0, 0.0).unwrap();
        let bounced = floor.reflection_of(incoming).unwrap();
        assert!(bounced.equals(Direction::new(1.0, 1.0, 0.0).unwrap(), 1e-6));
        assert_eq!(floor.reflection_of(Direction::FORWARD), None);
        assert_eq!(floor.fast_reflection_of(Direction::FORWARD), Direction::FORWARD);

        assert!(floor.parallelization_of(incoming).unwrap().equals(Direction::LEFT, 1e-6));
        assert_eq!(floor.parallelization_of(Direction::UP), None);
        assert!(floor.orthogonalization_of(incoming).unwrap().equals(Direction::DOWN, 1e-6));
        assert_eq!(floor.orthogonalization_of(Direction::LEFT), None);
        assert_eq!(floor.projection_of(Vect::new(1.0, 5.0, 2.0)), Vect::new(1.0, 0.0, 2.0));
    }

    #[test]
    fn plane_pairs_meet_along_a_line() {
        let floor = Plane::new(Direction::UP, Location::new(0.0, 2.0, 0.0));
        let wall = Plane::new(Direction::LEFT, Location::new(3.0, 0.0, 0.0));
        let line = floor.intersection_with(wall).unwrap();
        assert!(floor.contains(line.start(), 1e-4));
        assert!(wall.contains(line.start(), 1e-4));
        assert!(line.direction().dot(Direction::FORWARD).abs() > 0.9999);

        let ceiling = floor.moved_by(Vect::new(0.0, 3.0, 0.0));
        assert_eq!(floor.intersection_with(ceiling), None);
        assert!(approx_eq(floor.distance_from_plane(ceiling), 3.0));
        assert_eq!(floor.distance_from_plane(wall), 0.0);
    }

    #[test]
    fn text_and_bytes() {
        let plane = Plane::new(Direction::UP, Location::new(4.0, 2.0, 0.0));
        let text = plane.to_string();
        assert_eq!(text, "Plane[Normal <0, 1, 0> | PointClosestToOrigin <0, 2, 0>]");
        assert_eq!(text.parse::<Plane>(), Ok(plane));
        let bytes = plane.to_bytes();
        assert_eq!(bytes.len(), Plane::SERIALIZED_LEN);
        assert_eq!(Plane::from_bytes(&bytes), Ok(plane));
        assert!(matches!(
            Plane::from_bytes(&bytes[..10]),
            Err(GeometryError::BufferTooShort { needed: 16, actual: 10 })
        ));
    }
}
