// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Origin-centred convex solids and the query contract they share.
//!
//! Every query a shape answers about a location, line or plane has a
//! mirror on the other operand (`shape.distance_from(loc)` and
//! `loc.distance_from_shape(&shape)`); the mirrors are provided once here
//! and on [`LineLike`], [`Plane`] and [`LocationShapeQueries`].

use orrery_core::math::acos_clamped;
use orrery_core::{Angle, Direction, Location};
use tracing::trace;

use crate::line::LineLike;
use crate::plane::{Plane, PlaneObjectRelationship};

mod cuboid;
mod sphere;

pub use cuboid::Cuboid;
pub use sphere::Sphere;

/// A Ray or BoundedRay starting this close to a surface is treated as
/// leaving it, so it has no incident angle or reflection there.
pub(crate) const START_ON_SURFACE_TOLERANCE: f32 = 1e-4;

/// Where a line-like primitive crosses a convex surface.
///
/// Points are ordered by increasing distance along the primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvexShapeLineIntersection {
    /// First crossing.
    pub first: Location,
    /// Second crossing; `None` for a tangent hit or when the primitive
    /// starts inside or stops short.
    pub second: Option<Location>,
}

impl ConvexShapeLineIntersection {
    /// Collapses two optional crossings, keeping their order.
    pub fn from_two_optional(first: Option<Location>, second: Option<Location>) -> Option<Self> {
        match (first, second) {
            (Some(first), second) => Some(Self { first, second }),
            (None, Some(only)) => Some(Self {
                first: only,
                second: None,
            }),
            (None, None) => None,
        }
    }
}

/// Origin-centred convex solid.
///
/// Implementors provide the location kernel, the line kernel
/// ([`ConvexShape::unbounded_intersection_distances`] plus the closest-point
/// queries), the plane kernel and the surface normal; intersections,
/// incident angles and reflections follow from those.
pub trait ConvexShape {
    /// Point inside or on the shape nearest `location` (`location` itself
    /// when contained).
    fn point_closest_to(&self, location: Location) -> Location;

    /// Point on the surface nearest `location`, from inside or out.
    fn surface_point_closest_to(&self, location: Location) -> Location;

    /// Distance to the shape; zero inside.
    fn distance_from(&self, location: Location) -> f32;

    /// Square of [`ConvexShape::distance_from`].
    fn distance_squared_from(&self, location: Location) -> f32 {
        let distance = self.distance_from(location);
        distance * distance
    }

    /// Distance to the surface, from inside or out.
    fn surface_distance_from(&self, location: Location) -> f32;

    /// Square of [`ConvexShape::surface_distance_from`].
    fn surface_distance_squared_from(&self, location: Location) -> f32 {
        let distance = self.surface_distance_from(location);
        distance * distance
    }

    /// `true` when `location` is inside or on the surface.
    fn contains(&self, location: Location) -> bool;

    /// Point inside or on the shape nearest `line`.
    fn point_closest_to_line<L: LineLike>(&self, line: &L) -> Location;

    /// Point on `line` nearest the shape.
    fn closest_point_on_line<L: LineLike>(&self, line: &L) -> Location;

    /// Point on the surface nearest `line`.
    fn surface_point_closest_to_line<L: LineLike>(&self, line: &L) -> Location;

    /// Point on `line` nearest the surface.
    fn closest_point_on_line_to_surface<L: LineLike>(&self, line: &L) -> Location;

    /// Distance to `line`; zero when it touches or enters the shape.
    fn distance_from_line<L: LineLike>(&self, line: &L) -> f32;

    /// Square of [`ConvexShape::distance_from_line`].
    fn distance_squared_from_line<L: LineLike>(&self, line: &L) -> f32 {
        let distance = self.distance_from_line(line);
        distance * distance
    }

    /// Distance from the surface to `line`.
    fn surface_distance_from_line<L: LineLike>(&self, line: &L) -> f32 {
        self.surface_distance_from(self.closest_point_on_line_to_surface(line))
    }

    /// Square of [`ConvexShape::surface_distance_from_line`].
    fn surface_distance_squared_from_line<L: LineLike>(&self, line: &L) -> f32 {
        let distance = self.surface_distance_from_line(line);
        distance * distance
    }

    /// `true` for a bounded segment with both ends inside; unbounded
    /// primitives never fit.
    fn contains_line<L: LineLike>(&self, line: &L) -> bool {
        line.length().is_some_and(|length| {
            self.contains(line.start()) && self.contains(line.unbounded_location_at_distance(length))
        })
    }

    /// Entry and exit distances along the infinite extension of `line`,
    /// entry first; equal for a tangent. `None` when the extension misses.
    fn unbounded_intersection_distances<L: LineLike>(&self, line: &L) -> Option<(f32, f32)>;

    /// Outward unit normal at a surface point.
    fn surface_normal_at(&self, point: Location) -> Direction;

    /// Crossings of `line` with the surface, within the primitive's bounds.
    fn intersection_with<L: LineLike>(&self, line: &L) -> Option<ConvexShapeLineIntersection> {
        let (entry, exit) = self.unbounded_intersection_distances(line)?;
        let first = line.location_at_distance_or_none(entry);
        let second = if exit <= entry {
            None
        } else {
            line.location_at_distance_or_none(exit)
        };
        ConvexShapeLineIntersection::from_two_optional(first, second)
    }

    /// [`ConvexShape::intersection_with`] for callers that know `line`
    /// crosses the surface. Checked only in debug builds; a miss returns
    /// the primitive's start point.
    fn fast_intersection_with<L: LineLike>(&self, line: &L) -> ConvexShapeLineIntersection {
        debug_assert!(self.is_intersected_by(line), "line does not cross the shape");
        self.intersection_with(line)
            .unwrap_or(ConvexShapeLineIntersection {
                first: line.start(),
                second: None,
            })
    }

    /// `true` when `line` crosses the surface within its bounds.
    fn is_intersected_by<L: LineLike>(&self, line: &L) -> bool {
        self.intersection_with(line).is_some()
    }

    /// Angle between `line` and the surface normal where it first hits,
    /// in `[0°, 90°]`. `None` without a hit or when a bounded start lies on
    /// the surface.
    fn incident_angle_with<L: LineLike>(&self, line: &L) -> Option<Angle> {
        let distance = entry_distance(self, line)?;
        let normal = self.surface_normal_at(line.unbounded_location_at_distance(distance));
        Some(Angle::from_radians(acos_clamped(normal.dot(line.direction()).abs())))
    }

    /// [`ConvexShape::incident_angle_with`] assuming a hit exists.
    fn fast_incident_angle_with<L: LineLike>(&self, line: &L) -> Angle {
        debug_assert!(self.is_intersected_by(line), "line does not cross the shape");
        let distance = entry_distance(self, line).unwrap_or_else(|| unbounded_entry(self, line));
        let normal = self.surface_normal_at(line.unbounded_location_at_distance(distance));
        Angle::from_radians(acos_clamped(normal.dot(line.direction()).abs()))
    }

    /// `line` bounced off the surface where it first hits. `None` without
    /// a hit, for a grazing hit, or when a bounded start lies on the
    /// surface.
    fn reflection_of<L: LineLike>(&self, line: &L) -> Option<L::Reflection> {
        let distance = entry_distance(self, line)?;
        let point = line.unbounded_location_at_distance(distance);
        let tangent_plane = Plane::new(self.surface_normal_at(point), point);
        let reflected = tangent_plane.reflection_of(line.direction())?;
        Some(line.reflection_at(distance, reflected))
    }

    /// [`ConvexShape::reflection_of`] assuming a non-grazing hit exists.
    fn fast_reflection_of<L: LineLike>(&self, line: &L) -> L::Reflection {
        debug_assert!(self.is_intersected_by(line), "line does not cross the shape");
        let distance = entry_distance(self, line).unwrap_or_else(|| unbounded_entry(self, line));
        let point = line.unbounded_location_at_distance(distance);
        let tangent_plane = Plane::new(self.surface_normal_at(point), point);
        line.reflection_at(distance, tangent_plane.fast_reflection_of(line.direction()))
    }

    /// Zero when `plane` cuts the shape, else the signed distance of the
    /// shape's nearest point.
    fn signed_distance_from(&self, plane: Plane) -> f32;

    /// Unsigned form of [`ConvexShape::signed_distance_from`].
    fn distance_from_plane(&self, plane: Plane) -> f32 {
        self.signed_distance_from(plane).abs()
    }

    /// Square of [`ConvexShape::distance_from_plane`].
    fn distance_squared_from_plane(&self, plane: Plane) -> f32 {
        let distance = self.distance_from_plane(plane);
        distance * distance
    }

    /// Distance from the surface to `plane`. A plane that cuts the shape
    /// also cuts its surface, so this matches
    /// [`ConvexShape::distance_from_plane`].
    fn surface_distance_from_plane(&self, plane: Plane) -> f32 {
        self.distance_from_plane(plane)
    }

    /// Square of [`ConvexShape::surface_distance_from_plane`].
    fn surface_distance_squared_from_plane(&self, plane: Plane) -> f32 {
        let distance = self.surface_distance_from_plane(plane);
        distance * distance
    }

    /// Side of `plane` the shape lies on.
    fn relationship_to(&self, plane: Plane) -> PlaneObjectRelationship {
        PlaneObjectRelationship::from_signed_distance(self.signed_distance_from(plane))
    }

    /// Point inside or on the shape nearest `plane`; on the plane when it
    /// cuts the shape.
    fn point_closest_to_plane(&self, plane: Plane) -> Location;

    /// Point on the surface nearest `plane`; on the plane when it cuts the
    /// shape.
    fn surface_point_closest_to_plane(&self, plane: Plane) -> Location;

    /// Point on `plane` nearest the shape.
    fn closest_point_on_plane(&self, plane: Plane) -> Location {
        plane.point_closest_to(self.surface_point_closest_to_plane(plane))
    }

    /// Enclosed volume.
    fn volume(&self) -> f32;

    /// Total surface area.
    fn surface_area(&self) -> f32;

    /// `true` when every dimension is finite and strictly positive.
    fn is_physically_valid(&self) -> bool;
}

/// Distance of the in-bounds surface crossing nearest the start point; the
/// entry wins a tie. Bounded primitives that start on the surface are
/// leaving it and report no entry.
fn entry_distance<S: ConvexShape + ?Sized, L: LineLike>(shape: &S, line: &L) -> Option<f32> {
    let (entry, exit) = shape.unbounded_intersection_distances(line)?;
    if !line.is_unbounded_in_both_directions()
        && shape.surface_distance_from(line.start()) < START_ON_SURFACE_TOLERANCE
    {
        trace!(start = %line.start(), "primitive starts on the surface");
        return None;
    }
    [entry, exit]
        .into_iter()
        .filter(|distance| line.distance_is_within_bounds(*distance))
        .min_by(|a, b| a.abs().total_cmp(&b.abs()))
}

fn unbounded_entry<S: ConvexShape + ?Sized, L: LineLike>(shape: &S, line: &L) -> f32 {
    shape
        .unbounded_intersection_distances(line)
        .map_or(0.0, |(entry, _)| entry)
}

/// Location-side mirrors of the [`ConvexShape`] location queries.
pub trait LocationShapeQueries {
    /// See [`ConvexShape::point_closest_to`].
    fn closest_point_in<S: ConvexShape>(self, shape: &S) -> Location;
    /// See [`ConvexShape::surface_point_closest_to`].
    fn closest_point_on_surface_of<S: ConvexShape>(self, shape: &S) -> Location;
    /// See [`ConvexShape::distance_from`].
    fn distance_from_shape<S: ConvexShape>(self, shape: &S) -> f32;
    /// See [`ConvexShape::distance_squared_from`].
    fn distance_squared_from_shape<S: ConvexShape>(self, shape: &S) -> f32;
    /// See [`ConvexShape::surface_distance_from`].
    fn surface_distance_from_shape<S: ConvexShape>(self, shape: &S) -> f32;
    /// See [`ConvexShape::surface_distance_squared_from`].
    fn surface_distance_squared_from_shape<S: ConvexShape>(self, shape: &S) -> f32;
    /// See [`ConvexShape::contains`].
    fn is_contained_within<S: ConvexShape>(self, shape: &S) -> bool;
}

impl LocationShapeQueries for Location {
    fn closest_point_in<S: ConvexShape>(self, shape: &S) -> Location {
        shape.point_closest_to(self)
    }

    fn closest_point_on_surface_of<S: ConvexShape>(self, shape: &S) -> Location {
        shape.surface_point_closest_to(self)
    }

    fn distance_from_shape<S: ConvexShape>(self, shape: &S) -> f32 {
        shape.distance_from(self)
    }

    fn distance_squared_from_shape<S: ConvexShape>(self, shape: &S) -> f32 {
        shape.distance_squared_from(self)
    }

    fn surface_distance_from_shape<S: ConvexShape>(self, shape: &S) -> f32 {
        shape.surface_distance_from(self)
    }

    fn surface_distance_squared_from_shape<S: ConvexShape>(self, shape: &S) -> f32 {
        shape.surface_distance_squared_from(self)
    }

    fn is_contained_within<S: ConvexShape>(self, shape: &S) -> bool {
        shape.contains(self)
    }
}
