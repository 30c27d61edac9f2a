// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Straight-line primitives sharing one query surface.
//!
//! [`Line`] is unbounded both ways, [`Ray`] starts somewhere and runs
//! forever, and [`BoundedRay`] is a directed segment. Distances along a
//! primitive are signed and measured from its start point in units of its
//! direction.

use orrery_core::{Angle, Direction, Location};

use crate::plane::{Plane, PlaneObjectRelationship, PARALLEL_DOT_EPSILON};
use crate::shape::{ConvexShape, ConvexShapeLineIntersection};

mod bounded_ray;
mod ray;
mod unbounded;

pub use bounded_ray::BoundedRay;
pub use ray::Ray;
pub use unbounded::Line;

/// Half-thickness used by [`LineLike::contains`] callers that have no
/// better tolerance.
pub const DEFAULT_LINE_THICKNESS: f32 = 0.01;

/// Below this `1 - |d1 · d2|`, two primitives are treated as parallel.
const PARALLEL_TOLERANCE: f32 = 1e-4;

/// Shared behaviour of [`Line`], [`Ray`] and [`BoundedRay`].
///
/// Implementors supply the start point, direction and bounds; everything
/// else is derived from those.
pub trait LineLike: Copy {
    /// What a reflection of this primitive turns into: a reflected
    /// [`Line`] has a start point, so it becomes a [`Ray`].
    type Reflection: LineLike;

    /// Start point (any point on the line for an unbounded [`Line`]).
    fn start(&self) -> Location;

    /// Unit direction of travel.
    fn direction(&self) -> Direction;

    /// Length, `None` when unbounded.
    fn length(&self) -> Option<f32>;

    /// `true` only for [`Line`].
    fn is_unbounded_in_both_directions(&self) -> bool;

    /// Reflection continuing from the point `distance` along this primitive
    /// in `direction`; bounded primitives keep their remaining length.
    fn reflection_at(&self, distance: f32, direction: Direction) -> Self::Reflection;

    /// `true` when the signed `distance` addresses a point on the primitive.
    fn distance_is_within_bounds(&self, distance: f32) -> bool {
        if self.is_unbounded_in_both_directions() {
            return true;
        }
        distance >= 0.0 && self.length().is_none_or(|length| distance <= length)
    }

    /// Clamps a signed distance to the primitive's bounds.
    fn bind_distance(&self, distance: f32) -> f32 {
        if self.is_unbounded_in_both_directions() {
            return distance;
        }
        let from_start = distance.max(0.0);
        self.length().map_or(from_start, |length| from_start.min(length))
    }

    /// Point at `distance` along the infinite extension of the primitive.
    fn unbounded_location_at_distance(&self, distance: f32) -> Location {
        self.start() + self.direction().with_length(distance)
    }

    /// Point at `distance`, clamped onto the primitive.
    fn bounded_location_at_distance(&self, distance: f32) -> Location {
        self.unbounded_location_at_distance(self.bind_distance(distance))
    }

    /// Point at `distance`, or `None` when that lies off the primitive.
    fn location_at_distance_or_none(&self, distance: f32) -> Option<Location> {
        self.distance_is_within_bounds(distance)
            .then(|| self.unbounded_location_at_distance(distance))
    }

    /// Signed distance of the foot of the perpendicular from `location`,
    /// ignoring bounds.
    fn unbounded_distance_at_point_closest_to(&self, location: Location) -> f32 {
        self.direction().as_vect().dot(location - self.start())
    }

    /// Point on the primitive nearest `location`.
    fn point_closest_to(&self, location: Location) -> Location {
        self.bounded_location_at_distance(self.unbounded_distance_at_point_closest_to(location))
    }

    /// Distance from `location` to the primitive.
    fn distance_from(&self, location: Location) -> f32 {
        location.distance_from(self.point_closest_to(location))
    }

    /// `true` when `location` lies within `thickness` of the primitive.
    fn contains(&self, location: Location, thickness: f32) -> bool {
        self.distance_from(location) <= thickness
    }

    /// Point on the primitive nearest the origin.
    fn point_closest_to_origin(&self) -> Location {
        self.point_closest_to(Location::ORIGIN)
    }

    /// Distance from the origin to the primitive.
    fn distance_from_origin(&self) -> f32 {
        self.point_closest_to_origin().as_vect().length()
    }

    /// Point on this primitive nearest `other`.
    fn closest_point_to_line<O: LineLike>(&self, other: &O) -> Location {
        let similarity = self.direction().dot(other.direction());
        if 1.0 - similarity.abs() < PARALLEL_TOLERANCE {
            return closest_point_between_parallels(self, other);
        }

        // Closest approach of the unbounded extensions, then alternately
        // clamp onto each primitive; converges for segments in two steps.
        let offset = self.start() - other.start();
        let c = self.direction().as_vect().dot(offset);
        let f = other.direction().as_vect().dot(offset);
        let unbounded = (similarity * f - c) / (1.0 - similarity * similarity);
        let on_self = self.bounded_location_at_distance(unbounded);
        let on_other = other.point_closest_to(on_self);
        self.point_closest_to(on_other)
    }

    /// Shortest distance between the two primitives.
    fn distance_from_line<O: LineLike>(&self, other: &O) -> f32 {
        other.distance_from(self.closest_point_to_line(other))
    }

    /// Point where the primitive crosses `plane`; `None` when it runs
    /// parallel or stops short.
    fn intersection_with_plane(&self, plane: Plane) -> Option<Location> {
        let distance = unbounded_plane_intersection_distance(self, plane)?;
        self.location_at_distance_or_none(distance)
    }

    /// `true` when the primitive crosses `plane`.
    fn is_intersecting_plane(&self, plane: Plane) -> bool {
        self.intersection_with_plane(plane).is_some()
    }

    /// Zero when crossing `plane`, else the signed distance of the
    /// primitive's nearest point.
    fn signed_distance_from_plane(&self, plane: Plane) -> f32 {
        if self.is_intersecting_plane(plane) {
            return 0.0;
        }
        plane.signed_distance_from(self.point_closest_to_plane(plane))
    }

    /// Unsigned form of [`LineLike::signed_distance_from_plane`].
    fn distance_from_plane(&self, plane: Plane) -> f32 {
        self.signed_distance_from_plane(plane).abs()
    }

    /// Side of `plane` the primitive lies on.
    fn relationship_to_plane(&self, plane: Plane) -> PlaneObjectRelationship {
        PlaneObjectRelationship::from_signed_distance(self.signed_distance_from_plane(plane))
    }

    /// Point on the primitive nearest `plane` (the crossing point when
    /// there is one).
    fn point_closest_to_plane(&self, plane: Plane) -> Location {
        let distance = unbounded_plane_intersection_distance(self, plane).unwrap_or(0.0);
        self.bounded_location_at_distance(distance)
    }

    /// Point on `plane` nearest the primitive.
    fn closest_point_on_plane(&self, plane: Plane) -> Location {
        plane.point_closest_to(self.point_closest_to_plane(plane))
    }

    /// Reflection off `plane` from the crossing point. `None` when the
    /// primitive misses, runs parallel, or starts on the plane.
    fn reflected_by_plane(&self, plane: Plane) -> Option<Self::Reflection> {
        let distance = unbounded_plane_intersection_distance(self, plane)?;
        if !self.distance_is_within_bounds(distance) {
            return None;
        }
        if !self.is_unbounded_in_both_directions()
            && plane.distance_from(self.start()) < crate::shape::START_ON_SURFACE_TOLERANCE
        {
            return None;
        }
        let reflected = plane.fast_reflection_of(self.direction());
        Some(self.reflection_at(distance, reflected))
    }

    /// Incident angle at the crossing point; `None` without a crossing.
    fn incident_angle_with_plane(&self, plane: Plane) -> Option<Angle> {
        if !self.is_intersecting_plane(plane) {
            return None;
        }
        plane.incident_angle_with(self.direction())
    }

    /// See [`ConvexShape::point_closest_to_line`].
    fn closest_point_in<S: ConvexShape>(&self, shape: &S) -> Location {
        shape.point_closest_to_line(self)
    }

    /// See [`ConvexShape::closest_point_on_line`].
    fn point_closest_to_shape<S: ConvexShape>(&self, shape: &S) -> Location {
        shape.closest_point_on_line(self)
    }

    /// See [`ConvexShape::surface_point_closest_to_line`].
    fn closest_point_on_surface_of<S: ConvexShape>(&self, shape: &S) -> Location {
        shape.surface_point_closest_to_line(self)
    }

    /// See [`ConvexShape::closest_point_on_line_to_surface`].
    fn point_closest_to_surface_of<S: ConvexShape>(&self, shape: &S) -> Location {
        shape.closest_point_on_line_to_surface(self)
    }

    /// See [`ConvexShape::distance_from_line`].
    fn distance_from_shape<S: ConvexShape>(&self, shape: &S) -> f32 {
        shape.distance_from_line(self)
    }

    /// See [`ConvexShape::distance_squared_from_line`].
    fn distance_squared_from_shape<S: ConvexShape>(&self, shape: &S) -> f32 {
        shape.distance_squared_from_line(self)
    }

    /// See [`ConvexShape::surface_distance_from_line`].
    fn surface_distance_from_shape<S: ConvexShape>(&self, shape: &S) -> f32 {
        shape.surface_distance_from_line(self)
    }

    /// See [`ConvexShape::surface_distance_squared_from_line`].
    fn surface_distance_squared_from_shape<S: ConvexShape>(&self, shape: &S) -> f32 {
        shape.surface_distance_squared_from_line(self)
    }

    /// See [`ConvexShape::contains_line`].
    fn is_contained_within<S: ConvexShape>(&self, shape: &S) -> bool {
        shape.contains_line(self)
    }

    /// See [`ConvexShape::intersection_with`].
    fn intersection_with_shape<S: ConvexShape>(
        &self,
        shape: &S,
    ) -> Option<ConvexShapeLineIntersection> {
        shape.intersection_with(self)
    }

    /// See [`ConvexShape::fast_intersection_with`].
    fn fast_intersection_with_shape<S: ConvexShape>(&self, shape: &S) -> ConvexShapeLineIntersection {
        shape.fast_intersection_with(self)
    }

    /// See [`ConvexShape::is_intersected_by`].
    fn is_intersecting<S: ConvexShape>(&self, shape: &S) -> bool {
        shape.is_intersected_by(self)
    }

    /// See [`ConvexShape::incident_angle_with`].
    fn incident_angle_to<S: ConvexShape>(&self, shape: &S) -> Option<Angle> {
        shape.incident_angle_with(self)
    }

    /// See [`ConvexShape::fast_incident_angle_with`].
    fn fast_incident_angle_to<S: ConvexShape>(&self, shape: &S) -> Angle {
        shape.fast_incident_angle_with(self)
    }

    /// See [`ConvexShape::reflection_of`].
    fn reflected_by<S: ConvexShape>(&self, shape: &S) -> Option<Self::Reflection> {
        shape.reflection_of(self)
    }

    /// See [`ConvexShape::fast_reflection_of`].
    fn fast_reflected_by<S: ConvexShape>(&self, shape: &S) -> Self::Reflection {
        shape.fast_reflection_of(self)
    }
}

/// Signed distance along `line` to where its extension crosses `plane`.
fn unbounded_plane_intersection_distance<L: LineLike>(
    line: &L,
    plane: Plane,
) -> Option<f32> {
    let similarity = plane.normal().dot(line.direction());
    if similarity.abs() < PARALLEL_DOT_EPSILON {
        return None;
    }
    Some(-plane.signed_distance_from(line.start()) / similarity)
}

/// Parallel primitives: the distance between them is piecewise linear
/// along `line`, so the minimum sits at one of the bound points of either
/// primitive projected onto `line`.
fn closest_point_between_parallels<L: LineLike, O: LineLike>(
    line: &L,
    other: &O,
) -> Location {
    if other.is_unbounded_in_both_directions() {
        return line.start();
    }
    let mut candidates = vec![line.point_closest_to(other.start())];
    if let Some(length) = other.length() {
        candidates.push(line.point_closest_to(other.unbounded_location_at_distance(length)));
    }
    if !line.is_unbounded_in_both_directions() {
        candidates.push(line.start());
    }
    if let Some(length) = line.length() {
        candidates.push(line.unbounded_location_at_distance(length));
    }

    let mut best = candidates[0];
    let mut best_distance = other.distance_from(best);
    for candidate in candidates.into_iter().skip(1) {
        let distance = other.distance_from(candidate);
        if distance < best_distance {
            best = candidate;
            best_distance = distance;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use orrery_core::Vect;

    use super::*;

    fn approx_loc(a: Location, b: Location) -> bool {
        a.equals(b, 1e-4)
    }

    #[test]
    fn bounds_per_primitive() {
        let line = Line::new(Location::ORIGIN, Direction::LEFT);
        let ray = Ray::new(Location::ORIGIN, Direction::LEFT);
        let segment = BoundedRay::new(Location::ORIGIN, Location::new(2.0, 0.0, 0.0));

        assert!(line.distance_is_within_bounds(-5.0));
        assert!(!ray.distance_is_within_bounds(-5.0));
        assert!(ray.distance_is_within_bounds(500.0));
        assert!(!segment.distance_is_within_bounds(2.5));
        assert!(segment.distance_is_within_bounds(2.0));

        assert_eq!(line.bind_distance(-5.0), -5.0);
        assert_eq!(ray.bind_distance(-5.0), 0.0);
        assert_eq!(segment.bind_distance(7.0), 2.0);
        assert_eq!(segment.location_at_distance_or_none(3.0), None);
        assert_eq!(
            segment.bounded_location_at_distance(3.0),
            Location::new(2.0, 0.0, 0.0)
        );
    }

    #[test]
    fn closest_point_to_a_location() {
        let ray = Ray::new(Location::new(0.0, 1.0, 0.0), Direction::LEFT);
        assert!(approx_loc(
            ray.point_closest_to(Location::new(3.0, 5.0, 0.0)),
            Location::new(3.0, 1.0, 0.0)
        ));
        assert!(approx_loc(
            ray.point_closest_to(Location::new(-3.0, 5.0, 0.0)),
            Location::new(0.0, 1.0, 0.0)
        ));
        assert!((ray.distance_from_origin() - 1.0).abs() < 1e-6);
        assert!(ray.contains(Location::new(4.0, 1.005, 0.0), DEFAULT_LINE_THICKNESS));
        assert!(!ray.contains(Location::new(4.0, 1.02, 0.0), DEFAULT_LINE_THICKNESS));
    }

    #[test]
    fn skew_lines_meet_at_the_common_perpendicular() {
        let a = Line::new(Location::ORIGIN, Direction::LEFT);
        let b = Line::new(Location::new(3.0, 2.0, 0.0), Direction::FORWARD);
        assert!(approx_loc(a.closest_point_to_line(&b), Location::new(3.0, 0.0, 0.0)));
        assert!(approx_loc(b.closest_point_to_line(&a), Location::new(3.0, 2.0, 0.0)));
        assert!((a.distance_from_line(&b) - 2.0).abs() < 1e-5);
    }

    #[test]
    fn bounded_primitives_clamp_their_closest_points() {
        let segment = BoundedRay::new(Location::ORIGIN, Location::new(1.0, 0.0, 0.0));
        let line = Line::new(Location::new(3.0, 2.0, 0.0), Direction::FORWARD);
        assert!(approx_loc(
            segment.closest_point_to_line(&line),
            Location::new(1.0, 0.0, 0.0)
        ));

        let ray = Ray::new(Location::new(3.0, 2.0, 1.0), Direction::FORWARD);
        let on_line = Line::new(Location::ORIGIN, Direction::LEFT).closest_point_to_line(&ray);
        assert!(approx_loc(on_line, Location::new(3.0, 0.0, 0.0)));
    }

    #[test]
    fn parallel_primitives() {
        let a = BoundedRay::new(Location::ORIGIN, Location::new(2.0, 0.0, 0.0));
        let b = BoundedRay::new(Location::new(5.0, 1.0, 0.0), Location::new(9.0, 1.0, 0.0));
        assert!(approx_loc(a.closest_point_to_line(&b), Location::new(2.0, 0.0, 0.0)));
        assert!(approx_loc(b.closest_point_to_line(&a), Location::new(5.0, 1.0, 0.0)));

        let overlapping = Ray::new(Location::new(1.0, 1.0, 0.0), Direction::LEFT);
        let point = a.closest_point_to_line(&overlapping);
        assert!((overlapping.distance_from(point) - 1.0).abs() < 1e-5);

        let line = Line::new(Location::new(0.0, 3.0, 0.0), Direction::RIGHT);
        assert_eq!(a.closest_point_to_line(&line), a.start());
    }

    #[test]
    fn plane_crossings() {
        let floor = Plane::new(Direction::UP, Location::ORIGIN);
        let down = Ray::new(Location::new(1.0, 4.0, 0.0), Direction::DOWN);
        assert_eq!(down.intersection_with_plane(floor), Some(Location::new(1.0, 0.0, 0.0)));
        assert_eq!(down.signed_distance_from_plane(floor), 0.0);
        assert_eq!(
            down.relationship_to_plane(floor),
            PlaneObjectRelationship::PlaneIntersectsObject
        );

        let up = down.flipped();
        assert_eq!(up.intersection_with_plane(floor), None);
        assert_eq!(up.signed_distance_from_plane(floor), 4.0);
        assert_eq!(up.point_closest_to_plane(floor), up.start());
        assert_eq!(up.closest_point_on_plane(floor), Location::new(1.0, 0.0, 0.0));
        assert_eq!(
            up.relationship_to_plane(floor),
            PlaneObjectRelationship::PlaneFacesTowardsObject
        );

        let short = BoundedRay::new(Location::new(0.0, -4.0, 0.0), Location::new(0.0, -1.0, 0.0));
        assert_eq!(short.signed_distance_from_plane(floor), -1.0);
        assert_eq!(short.point_closest_to_plane(floor), Location::new(0.0, -1.0, 0.0));

        let flat = Line::new(Location::new(0.0, 2.0, 0.0), Direction::FORWARD);
        assert!(!flat.is_intersecting_plane(floor));
        assert_eq!(flat.signed_distance_from_plane(floor), 2.0);
        assert_eq!(flat.incident_angle_with_plane(floor), None);
    }

    #[test]
    fn reflections_off_planes() {
        let floor = Plane::new(Direction::UP, Location::ORIGIN);
        let incoming = Direction::new(1.0, -1.0, 0.0).unwrap();

        let line = Line::new(Location::new(-2.0, 2.0, 0.0), incoming);
        let bounced: Ray = line.reflected_by_plane(floor).unwrap();
        assert!(approx_loc(bounced.start(), Location::ORIGIN));
        assert!(bounced.direction().equals(Direction::new(1.0, 1.0, 0.0).unwrap(), 1e-5));

        let segment = BoundedRay::from_start_and_vect(
            Location::new(-2.0, 2.0, 0.0),
            incoming.with_length(5.0),
        );
        let bounced = segment.reflected_by_plane(floor).unwrap();
        let travelled = Vect::new(2.0, -2.0, 0.0).length();
        assert!((bounced.length().unwrap() - (5.0 - travelled)).abs() < 1e-4);

        let grazing = Ray::new(Location::ORIGIN, Direction::UP);
        assert!(grazing.reflected_by_plane(floor).is_none());
        let angle = line.incident_angle_with_plane(floor).unwrap();
        assert!((angle.degrees() - 45.0).abs() < 1e-3);
    }
}
