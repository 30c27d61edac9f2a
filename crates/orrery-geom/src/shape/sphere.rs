// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use std::f32::consts::PI;

use bytes::{Buf, BufMut};
use orrery_core::codec::ByteSerializable;
use orrery_core::format::{
    format_fields, format_scalar, parse_fields, parse_scalar, FormatConfig, TextFormat,
};
use orrery_core::math::cbrt;
use orrery_core::{random, Direction, GeometryError, Location, ParseError};

use super::ConvexShape;
use crate::line::LineLike;
use crate::plane::Plane;

/// Sphere of `radius` centred on the origin.
///
/// # Examples
/// ```
/// use orrery_core::{Direction, Location};
/// use orrery_geom::{ConvexShape, LineLike, Ray, Sphere};
///
/// let sphere = Sphere::new(1.0);
/// let ray = Ray::new(Location::new(0.0, 0.0, -5.0), Direction::FORWARD);
/// let hit = sphere.intersection_with(&ray).unwrap();
/// assert!(hit.first.equals(Location::new(0.0, 0.0, -1.0), 1e-5));
/// assert_eq!(ray.intersection_with_shape(&sphere), Some(hit));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sphere {
    radius: f32,
}

impl Sphere {
    /// Radius range [`Sphere::random`] samples from.
    pub const DEFAULT_RANDOM_RADIUS: (f32, f32) = (0.5, 10.0);

    /// Sphere with `radius`.
    pub const fn new(radius: f32) -> Self {
        Self { radius }
    }

    /// Sphere enclosing `volume`.
    pub fn from_volume(volume: f32) -> Self {
        Self::new(cbrt(volume * 3.0 / (4.0 * PI)))
    }

    /// Sphere with `surface_area`.
    pub fn from_surface_area(surface_area: f32) -> Self {
        Self::new((surface_area / (4.0 * PI)).sqrt())
    }

    /// Radius.
    pub const fn radius(self) -> f32 {
        self.radius
    }

    /// Diameter.
    pub fn diameter(self) -> f32 {
        self.radius * 2.0
    }

    fn radius_squared(self) -> f32 {
        self.radius * self.radius
    }

    /// Radius multiplied by `factor`.
    pub fn scaled_by(self, factor: f32) -> Self {
        Self::new(self.radius * factor)
    }

    /// Sphere rescaled to enclose `volume`.
    pub fn with_volume(self, volume: f32) -> Self {
        self.scaled_by(cbrt(volume / self.volume()))
    }

    /// Sphere rescaled to `surface_area`.
    pub fn with_surface_area(self, surface_area: f32) -> Self {
        self.scaled_by((surface_area / self.surface_area()).sqrt())
    }

    /// Circle where `plane` cuts the sphere, as its centre and radius.
    /// `None` when the plane misses.
    pub fn try_split(self, plane: Plane) -> Option<(Location, f32)> {
        let centre = plane.point_closest_to_origin();
        let distance_squared = centre.as_vect().length_squared();
        if distance_squared > self.radius_squared() {
            return None;
        }
        Some((centre, (self.radius_squared() - distance_squared).max(0.0).sqrt()))
    }

    /// Radius interpolated linearly.
    pub fn interpolate(start: Self, end: Self, t: f32) -> Self {
        Self::new(start.radius + (end.radius - start.radius) * t)
    }

    /// Random sphere.
    pub fn random() -> Self {
        let (min, max) = Self::DEFAULT_RANDOM_RADIUS;
        Self::new(random::next_f32_in(min, max))
    }

    /// Random sphere with a radius between the bounds' radii.
    pub fn random_between(min: Self, max: Self) -> Self {
        Self::new(random::next_f32_in(min.radius, max.radius))
    }

    /// Of the (up to two) surface crossings of the line's extension, the
    /// one nearest the bounded primitive.
    fn surface_point_nearest<L: LineLike>(self, line: &L) -> Option<Location> {
        let (entry, exit) = self.unbounded_intersection_distances(line)?;
        let entry_point = line.unbounded_location_at_distance(entry);
        let exit_point = line.unbounded_location_at_distance(exit);
        if line.distance_from(exit_point) < line.distance_from(entry_point) {
            Some(exit_point)
        } else {
            Some(entry_point)
        }
    }
}

impl ConvexShape for Sphere {
    fn point_closest_to(&self, location: Location) -> Location {
        location.as_vect().with_max_length(self.radius).as_location()
    }

    fn surface_point_closest_to(&self, location: Location) -> Location {
        location
            .as_vect()
            .direction()
            .unwrap_or(Direction::UP)
            .with_length(self.radius)
            .as_location()
    }

    fn distance_from(&self, location: Location) -> f32 {
        (location.as_vect().length() - self.radius).max(0.0)
    }

    fn surface_distance_from(&self, location: Location) -> f32 {
        (location.as_vect().length() - self.radius).abs()
    }

    fn contains(&self, location: Location) -> bool {
        location.as_vect().length_squared() <= self.radius_squared()
    }

    fn point_closest_to_line<L: LineLike>(&self, line: &L) -> Location {
        self.point_closest_to(line.point_closest_to_origin())
    }

    fn closest_point_on_line<L: LineLike>(&self, line: &L) -> Location {
        line.point_closest_to_origin()
    }

    fn surface_point_closest_to_line<L: LineLike>(&self, line: &L) -> Location {
        self.surface_point_nearest(line)
            .unwrap_or_else(|| self.surface_point_closest_to(line.point_closest_to_origin()))
    }

    fn closest_point_on_line_to_surface<L: LineLike>(&self, line: &L) -> Location {
        self.surface_point_nearest(line).map_or_else(
            || line.point_closest_to_origin(),
            |surface_point| line.point_closest_to(surface_point),
        )
    }

    fn distance_from_line<L: LineLike>(&self, line: &L) -> f32 {
        (line.distance_from_origin() - self.radius).max(0.0)
    }

    /// Solves `|P + tD|² = r²`; with `D` unit length the quadratic is
    /// `t² + 2(P·D)t + (|P|² - r²) = 0`.
    fn unbounded_intersection_distances<L: LineLike>(&self, line: &L) -> Option<(f32, f32)> {
        let start = line.start().as_vect();
        let b = 2.0 * start.dot(line.direction().as_vect());
        let c = start.length_squared() - self.radius_squared();
        let discriminant = b * b - 4.0 * c;
        if discriminant < 0.0 {
            return None;
        }
        let root = discriminant.sqrt();
        Some(((-b - root) * 0.5, (-b + root) * 0.5))
    }

    fn surface_normal_at(&self, point: Location) -> Direction {
        point.as_vect().direction().unwrap_or(Direction::UP)
    }

    fn signed_distance_from(&self, plane: Plane) -> f32 {
        let from_centre = plane.signed_distance_from(Location::ORIGIN);
        if from_centre.abs() <= self.radius {
            0.0
        } else {
            from_centre - from_centre.signum() * self.radius
        }
    }

    fn point_closest_to_plane(&self, plane: Plane) -> Location {
        self.point_closest_to(plane.point_closest_to_origin())
    }

    fn surface_point_closest_to_plane(&self, plane: Plane) -> Location {
        let Some((centre, circle_radius)) = self.try_split(plane) else {
            return self.point_closest_to_plane(plane);
        };
        let axis = centre.as_vect().direction().unwrap_or(plane.normal());
        centre + axis.any_perpendicular().with_length(circle_radius)
    }

    fn volume(&self) -> f32 {
        4.0 / 3.0 * PI * self.radius * self.radius * self.radius
    }

    fn surface_area(&self) -> f32 {
        4.0 * PI * self.radius_squared()
    }

    fn is_physically_valid(&self) -> bool {
        self.radius.is_finite() && self.radius > 0.0
    }
}

impl TextFormat for Sphere {
    fn format_with(&self, config: &FormatConfig) -> String {
        format_fields("Sphere", &[("Radius", format_scalar(self.radius, config))])
    }

    fn parse_with(text: &str, config: &FormatConfig) -> Result<Self, ParseError> {
        let fields = parse_fields(text, "Sphere", &["Radius"])?;
        Ok(Self::new(parse_scalar(fields[0], config)?))
    }
}

orrery_core::impl_text_traits!(Sphere);

impl ByteSerializable for Sphere {
    const SERIALIZED_LEN: usize = 4;

    fn write_to<B: BufMut>(&self, dest: &mut B) {
        dest.put_f32_le(self.radius);
    }

    fn read_from<B: Buf>(src: &mut B) -> Result<Self, GeometryError> {
        Ok(Self::new(src.get_f32_le()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use orrery_core::Vect;

    use super::*;
    use crate::line::{BoundedRay, Line, Ray};
    use crate::plane::PlaneObjectRelationship;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3 * b.abs().max(1.0)
    }

    #[test]
    fn measurements() {
        let sphere = Sphere::new(7.4);
        assert!(approx_eq(sphere.surface_area(), 688.134));
        assert!(approx_eq(sphere.volume(), 1697.398));
        assert_eq!(sphere.diameter(), 14.8);
        assert!(approx_eq(Sphere::from_volume(sphere.volume()).radius(), 7.4));
        assert!(approx_eq(Sphere::from_surface_area(sphere.surface_area()).radius(), 7.4));
        assert!(approx_eq(sphere.with_volume(1.0).volume(), 1.0));
        assert!(approx_eq(sphere.scaled_by(2.0).radius(), 14.8));
        assert!(sphere.is_physically_valid());
        assert!(!Sphere::new(-0.0).is_physically_valid());
        assert!(!Sphere::new(f32::NAN).is_physically_valid());
    }

    #[test]
    fn location_queries() {
        let sphere = Sphere::new(2.0);
        let outside = Location::new(0.0, 0.0, 5.0);
        assert!(sphere.point_closest_to(outside).equals(Location::new(0.0, 0.0, 2.0), 1e-6));
        assert_eq!(sphere.distance_from(outside), 3.0);
        assert_eq!(sphere.surface_distance_from(Location::new(0.0, 0.5, 0.0)), 1.5);
        assert_eq!(sphere.distance_from(Location::new(0.0, 0.5, 0.0)), 0.0);
        assert_eq!(sphere.surface_point_closest_to(Location::ORIGIN), Location::new(0.0, 2.0, 0.0));
        assert!(sphere.contains(Location::new(0.0, 2.0, 0.0)));
        assert!(!sphere.contains(Location::new(0.0, 2.001, 0.0)));
    }

    #[test]
    fn tangent_lines_touch_once() {
        let sphere = Sphere::new(1.0);
        let tangent = Line::new(Location::new(1.0, 0.0, 0.0), Direction::FORWARD);
        let hit = sphere.intersection_with(&tangent).unwrap();
        assert!(hit.first.equals(Location::new(1.0, 0.0, 0.0), 1e-6));
        assert_eq!(hit.second, None);
        assert!(sphere.reflection_of(&tangent).is_none());
    }

    #[test]
    fn misses_and_near_misses() {
        let sphere = Sphere::new(1.0);
        let miss = Line::new(Location::new(3.0, 0.0, 0.0), Direction::FORWARD);
        assert!(sphere.intersection_with(&miss).is_none());
        assert!(approx_eq(sphere.distance_from_line(&miss), 2.0));
        assert!(sphere
            .point_closest_to_line(&miss)
            .equals(Location::new(1.0, 0.0, 0.0), 1e-6));
        assert!(sphere
            .closest_point_on_line(&miss)
            .equals(Location::new(3.0, 0.0, 0.0), 1e-6));
        assert!(sphere
            .surface_point_closest_to_line(&miss)
            .equals(Location::new(1.0, 0.0, 0.0), 1e-6));
        assert!(approx_eq(sphere.surface_distance_from_line(&miss), 2.0));

        let away = Ray::new(Location::new(0.0, 0.0, 3.0), Direction::FORWARD);
        assert!(sphere.intersection_with(&away).is_none());
        assert!(sphere
            .closest_point_on_line_to_surface(&away)
            .equals(away.start(), 1e-6));
    }

    #[test]
    fn reflections_bounce_off_the_surface() {
        let sphere = Sphere::new(1.0);
        let ray = Ray::new(Location::new(0.0, 5.0, 0.0), Direction::DOWN);
        let bounced = sphere.reflection_of(&ray).unwrap();
        assert!(bounced.start().equals(Location::new(0.0, 1.0, 0.0), 1e-5));
        assert!(bounced.direction().equals(Direction::UP, 1e-5));
        assert!(approx_eq(sphere.incident_angle_with(&ray).unwrap().degrees(), 0.0));

        let segment = BoundedRay::from_start_and_vect(
            Location::new(0.0, 5.0, 0.0),
            Vect::new(0.0, -6.0, 0.0),
        );
        let bounced = sphere.reflection_of(&segment).unwrap();
        assert!(approx_eq(bounced.length().unwrap(), 2.0));
    }

    #[test]
    fn plane_queries() {
        let sphere = Sphere::new(2.0);
        let above = Plane::new(Direction::DOWN, Location::new(0.0, 5.0, 0.0));
        assert_eq!(sphere.signed_distance_from(above), 3.0);
        assert_eq!(sphere.relationship_to(above), PlaneObjectRelationship::PlaneFacesTowardsObject);
        assert_eq!(sphere.relationship_to(-above), PlaneObjectRelationship::PlaneFacesAwayFromObject);
        assert_eq!(sphere.distance_from_plane(-above), 3.0);
        assert!(sphere.point_closest_to_plane(above).equals(Location::new(0.0, 2.0, 0.0), 1e-6));
        assert!(sphere.closest_point_on_plane(above).equals(Location::new(0.0, 5.0, 0.0), 1e-6));
        assert_eq!(sphere.try_split(above), None);

        let cutting = Plane::new(Direction::UP, Location::new(0.0, 1.0, 0.0));
        assert_eq!(sphere.signed_distance_from(cutting), 0.0);
        let (centre, radius) = sphere.try_split(cutting).unwrap();
        assert!(centre.equals(Location::new(0.0, 1.0, 0.0), 1e-6));
        assert!(approx_eq(radius, 3.0_f32.sqrt()));
        let on_rim = sphere.surface_point_closest_to_plane(cutting);
        assert!(cutting.contains(on_rim, 1e-4));
        assert!(sphere.surface_distance_from(on_rim) < 1e-4);
    }

    #[test]
    fn text_and_bytes() {
        let sphere = Sphere::new(7.25);
        assert_eq!(sphere.to_string(), "Sphere[Radius 7.25]");
        assert_eq!("Sphere[Radius 7.25]".parse::<Sphere>(), Ok(sphere));
        assert_eq!(Sphere::from_bytes(&sphere.to_bytes()), Ok(sphere));
    }
}
