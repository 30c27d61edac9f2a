// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use bytes::{Buf, BufMut};
use orrery_core::codec::{get_f32s, put_f32s, ByteSerializable};
use orrery_core::format::{
    format_fields, format_scalar, parse_fields, parse_scalar, FormatConfig, TextFormat,
};
use orrery_core::math::cbrt;
use orrery_core::{
    random, Axis, CardinalOrientation, DiagonalOrientation, Direction, GeometryError,
    IntercardinalOrientation, Location, ParseError,
};

use super::ConvexShape;
use crate::line::{BoundedRay, LineLike};
use crate::plane::Plane;

/// Axis-aligned box centred on the origin.
///
/// Stored as half extents: `width` runs along X, `height` along Y and
/// `depth` along Z.
///
/// # Examples
/// ```
/// use orrery_core::{Direction, Location};
/// use orrery_geom::{ConvexShape, Cuboid, Ray};
///
/// let cuboid = Cuboid::new(7.2, 13.6, 1.4);
/// assert!((cuboid.volume() - 137.088).abs() < 0.01);
///
/// let ray = Ray::new(Location::new(100.0, 0.0, 0.0), Direction::RIGHT);
/// let hit = cuboid.intersection_with(&ray).unwrap();
/// assert!((hit.first.x() - 3.6).abs() < 1e-4);
/// assert!((hit.second.unwrap().x() + 3.6).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cuboid {
    half_width: f32,
    half_height: f32,
    half_depth: f32,
}

impl Cuboid {
    /// Half-extent range [`Cuboid::random`] samples from.
    pub const DEFAULT_RANDOM_HALF_EXTENT: (f32, f32) = (0.5, 5.0);

    /// Box with full `width`, `height` and `depth`.
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self::from_half_dimensions(width * 0.5, height * 0.5, depth * 0.5)
    }

    /// Box with the given half extents.
    pub const fn from_half_dimensions(half_width: f32, half_height: f32, half_depth: f32) -> Self {
        Self {
            half_width,
            half_height,
            half_depth,
        }
    }

    /// Full extent along X.
    pub fn width(self) -> f32 {
        self.half_width * 2.0
    }

    /// Full extent along Y.
    pub fn height(self) -> f32 {
        self.half_height * 2.0
    }

    /// Full extent along Z.
    pub fn depth(self) -> f32 {
        self.half_depth * 2.0
    }

    /// Half extents as `[x, y, z]`.
    pub const fn half_extents(self) -> [f32; 3] {
        [self.half_width, self.half_height, self.half_depth]
    }

    /// Full extent along `axis`.
    pub fn get_extent(self, axis: Axis) -> f32 {
        self.get_half_extent(axis) * 2.0
    }

    /// Half extent along `axis`.
    pub const fn get_half_extent(self, axis: Axis) -> f32 {
        self.half_extents()[axis.index()]
    }

    /// Area of one of the two faces perpendicular to `axis`.
    pub fn get_side_surface_area(self, axis: Axis) -> f32 {
        let [x, y, z] = self.half_extents();
        let half_area = match axis {
            Axis::X => y * z,
            Axis::Y => z * x,
            Axis::Z => x * y,
        };
        half_area * 4.0
    }

    /// Corner in the octant named by `orientation`.
    pub fn corner_at(self, orientation: DiagonalOrientation) -> Location {
        self.scaled_point(orientation.signs())
    }

    /// Edge shared by the two faces named by `orientation`, running from
    /// the negative to the positive end of the remaining axis.
    pub fn edge_at(self, orientation: IntercardinalOrientation) -> BoundedRay {
        let free_axis = orientation.unspecified_axis().index();
        let mut start = orientation.signs();
        let mut end = start;
        start[free_axis] = -1.0;
        end[free_axis] = 1.0;
        BoundedRay::new(self.scaled_point(start), self.scaled_point(end))
    }

    /// Plane containing the face named by `orientation`, normal outward.
    pub fn side_at(self, orientation: CardinalOrientation) -> Plane {
        Plane::from_normal_and_translation_from_origin(
            orientation.to_direction(),
            self.get_half_extent(orientation.axis()),
        )
    }

    /// Centre of the face named by `orientation`.
    pub fn centroid_at(self, orientation: CardinalOrientation) -> Location {
        self.scaled_point(orientation.signs())
    }

    /// All 8 corners.
    pub fn corners(self) -> impl Iterator<Item = Location> {
        DiagonalOrientation::ALL
            .into_iter()
            .map(move |orientation| self.corner_at(orientation))
    }

    /// All 12 edges.
    pub fn edges(self) -> impl Iterator<Item = BoundedRay> {
        IntercardinalOrientation::ALL
            .into_iter()
            .map(move |orientation| self.edge_at(orientation))
    }

    /// All 6 face planes.
    pub fn sides(self) -> impl Iterator<Item = Plane> {
        CardinalOrientation::ALL
            .into_iter()
            .map(move |orientation| self.side_at(orientation))
    }

    /// All 6 face centres.
    pub fn centroids(self) -> impl Iterator<Item = Location> {
        CardinalOrientation::ALL
            .into_iter()
            .map(move |orientation| self.centroid_at(orientation))
    }

    /// Every extent multiplied by `factor`.
    pub fn scaled_by(self, factor: f32) -> Self {
        Self::from_half_dimensions(
            self.half_width * factor,
            self.half_height * factor,
            self.half_depth * factor,
        )
    }

    /// Same proportions, rescaled to enclose `volume`.
    pub fn with_volume(self, volume: f32) -> Self {
        self.scaled_by(cbrt(volume / self.volume()))
    }

    /// Same proportions, rescaled to `surface_area`.
    pub fn with_surface_area(self, surface_area: f32) -> Self {
        self.scaled_by((surface_area / self.surface_area()).sqrt())
    }

    /// Half extents interpolated linearly.
    pub fn interpolate(start: Self, end: Self, t: f32) -> Self {
        let lerp = |a: f32, b: f32| a + (b - a) * t;
        Self::from_half_dimensions(
            lerp(start.half_width, end.half_width),
            lerp(start.half_height, end.half_height),
            lerp(start.half_depth, end.half_depth),
        )
    }

    /// Random box.
    pub fn random() -> Self {
        let (min, max) = Self::DEFAULT_RANDOM_HALF_EXTENT;
        Self::from_half_dimensions(
            random::next_f32_in(min, max),
            random::next_f32_in(min, max),
            random::next_f32_in(min, max),
        )
    }

    /// Random box with each half extent between the bounds' half extents.
    pub fn random_between(min: Self, max: Self) -> Self {
        Self::from_half_dimensions(
            random::next_f32_in(min.half_width, max.half_width),
            random::next_f32_in(min.half_height, max.half_height),
            random::next_f32_in(min.half_depth, max.half_depth),
        )
    }

    fn scaled_point(self, signs: [f32; 3]) -> Location {
        let halves = self.half_extents();
        Location::from_vector3([0, 1, 2].map(|i| signs[i] * halves[i]))
    }

    /// Half the box's extent projected onto `normal`.
    fn reach_along(self, normal: Direction) -> f32 {
        let n = normal.to_vector3();
        let h = self.half_extents();
        h[0] * n[0].abs() + h[1] * n[1].abs() + h[2] * n[2].abs()
    }

    /// Axis whose face is nearest an interior point, with that face's sign.
    fn nearest_face(self, point: [f32; 3]) -> (usize, f32) {
        let (axis, _) = self
            .half_extents()
            .into_iter()
            .zip(point)
            .map(|(half, coordinate)| half - coordinate.abs())
            .enumerate()
            .fold((0, f32::INFINITY), |best, (axis, gap)| {
                if gap < best.1 {
                    (axis, gap)
                } else {
                    best
                }
            });
        let sign = if point[axis] < 0.0 { -1.0 } else { 1.0 };
        (axis, sign)
    }
}

impl ConvexShape for Cuboid {
    fn point_closest_to(&self, location: Location) -> Location {
        let halves = self.half_extents();
        let p = location.to_vector3();
        Location::from_vector3([0, 1, 2].map(|i| p[i].clamp(-halves[i], halves[i])))
    }

    fn surface_point_closest_to(&self, location: Location) -> Location {
        if !self.contains(location) {
            return self.point_closest_to(location);
        }
        let mut p = location.to_vector3();
        let (axis, sign) = self.nearest_face(p);
        p[axis] = sign * self.half_extents()[axis];
        Location::from_vector3(p)
    }

    fn distance_from(&self, location: Location) -> f32 {
        location.distance_from(self.point_closest_to(location))
    }

    fn surface_distance_from(&self, location: Location) -> f32 {
        if !self.contains(location) {
            return self.distance_from(location);
        }
        self.half_extents()
            .into_iter()
            .zip(location.to_vector3())
            .map(|(half, coordinate)| half - coordinate.abs())
            .fold(f32::INFINITY, f32::min)
    }

    fn contains(&self, location: Location) -> bool {
        self.half_extents()
            .into_iter()
            .zip(location.to_vector3())
            .all(|(half, coordinate)| coordinate.abs() <= half)
    }

    fn point_closest_to_line<L: LineLike>(&self, line: &L) -> Location {
        self.point_closest_to(self.closest_point_on_line(line))
    }

    fn closest_point_on_line<L: LineLike>(&self, line: &L) -> Location {
        if !line.is_unbounded_in_both_directions() && self.contains(line.start()) {
            return line.start();
        }
        self.closest_point_on_line_to_surface(line)
    }

    fn surface_point_closest_to_line<L: LineLike>(&self, line: &L) -> Location {
        self.surface_point_closest_to(self.closest_point_on_line_to_surface(line))
    }

    /// A crossing point when there is one; otherwise the nearest of the
    /// primitive's own end points and its closest approaches to each edge.
    fn closest_point_on_line_to_surface<L: LineLike>(&self, line: &L) -> Location {
        if let Some(intersection) = self.intersection_with(line) {
            return intersection.first;
        }
        let mut candidates: Vec<Location> = self
            .edges()
            .map(|edge| line.closest_point_to_line(&edge))
            .collect();
        if !line.is_unbounded_in_both_directions() {
            candidates.push(line.start());
        }
        if let Some(length) = line.length() {
            candidates.push(line.unbounded_location_at_distance(length));
        }

        let mut best = line.start();
        let mut best_distance = f32::INFINITY;
        for candidate in candidates {
            let distance = self.surface_distance_from(candidate);
            if distance < best_distance {
                best = candidate;
                best_distance = distance;
            }
        }
        best
    }

    fn distance_from_line<L: LineLike>(&self, line: &L) -> f32 {
        self.distance_from(self.closest_point_on_line(line))
    }

    /// Slab clipping: each axis pair of faces narrows the `[entry, exit]`
    /// interval; a direction with no component along an axis keeps the
    /// interval when the start lies between that axis's faces and empties
    /// it otherwise.
    fn unbounded_intersection_distances<L: LineLike>(&self, line: &L) -> Option<(f32, f32)> {
        let halves = self.half_extents();
        let start = line.start().to_vector3();
        let direction = line.direction().to_vector3();
        let mut entry = f32::NEG_INFINITY;
        let mut exit = f32::INFINITY;
        for ((half, start), direction) in halves.into_iter().zip(start).zip(direction) {
            if direction == 0.0 {
                if start.abs() > half {
                    return None;
                }
                continue;
            }
            let to_positive = (half - start) / direction;
            let to_negative = (-half - start) / direction;
            entry = entry.max(to_positive.min(to_negative));
            exit = exit.min(to_positive.max(to_negative));
        }
        if exit < entry {
            return None;
        }
        Some((entry, exit))
    }

    fn surface_normal_at(&self, point: Location) -> Direction {
        let (axis, sign) = self.nearest_face(point.to_vector3());
        let mut normal = [0.0; 3];
        normal[axis] = sign;
        Direction::from_vector3_pre_normalized(normal)
    }

    fn signed_distance_from(&self, plane: Plane) -> f32 {
        let from_centre = plane.signed_distance_from(Location::ORIGIN);
        let reach = self.reach_along(plane.normal());
        if from_centre.abs() <= reach {
            0.0
        } else {
            from_centre - from_centre.signum() * reach
        }
    }

    fn point_closest_to_plane(&self, plane: Plane) -> Location {
        self.surface_point_closest_to_plane(plane)
    }

    /// A point where the plane crosses an edge when it cuts the box,
    /// otherwise the corner nearest the plane.
    fn surface_point_closest_to_plane(&self, plane: Plane) -> Location {
        if let Some(crossing) = self
            .edges()
            .find_map(|edge| edge.intersection_with_plane(plane))
        {
            return crossing;
        }
        let mut best = Location::ORIGIN;
        let mut best_distance = f32::INFINITY;
        for corner in self.corners() {
            let distance = plane.distance_from(corner);
            if distance < best_distance {
                best = corner;
                best_distance = distance;
            }
        }
        best
    }

    fn volume(&self) -> f32 {
        8.0 * self.half_width * self.half_height * self.half_depth
    }

    fn surface_area(&self) -> f32 {
        let [x, y, z] = self.half_extents();
        8.0 * (x * y + y * z + z * x)
    }

    fn is_physically_valid(&self) -> bool {
        self.half_extents()
            .iter()
            .all(|half| half.is_finite() && *half > 0.0)
    }
}

impl TextFormat for Cuboid {
    fn format_with(&self, config: &FormatConfig) -> String {
        format_fields(
            "Cuboid",
            &[
                ("Width", format_scalar(self.width(), config)),
                ("Height", format_scalar(self.height(), config)),
                ("Depth", format_scalar(self.depth(), config)),
            ],
        )
    }

    fn parse_with(text: &str, config: &FormatConfig) -> Result<Self, ParseError> {
        let fields = parse_fields(text, "Cuboid", &["Width", "Height", "Depth"])?;
        Ok(Self::new(
            parse_scalar(fields[0], config)?,
            parse_scalar(fields[1], config)?,
            parse_scalar(fields[2], config)?,
        ))
    }
}

orrery_core::impl_text_traits!(Cuboid);

impl ByteSerializable for Cuboid {
    const SERIALIZED_LEN: usize = 12;

    fn write_to<B: BufMut>(&self, dest: &mut B) {
        put_f32s(dest, &self.half_extents());
    }

    fn read_from<B: Buf>(src: &mut B) -> Result<Self, GeometryError> {
        let [x, y, z] = get_f32s(src);
        Ok(Self::from_half_dimensions(x, y, z))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use orrery_core::Vect;

    use super::*;
    use crate::line::{Line, Ray};
    use crate::plane::PlaneObjectRelationship;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3 * b.abs().max(1.0)
    }

    fn test_cuboid() -> Cuboid {
        Cuboid::new(7.2, 13.6, 1.4)
    }

    #[test]
    fn measurements() {
        let cuboid = test_cuboid();
        assert!(approx_eq(cuboid.volume(), 137.088));
        assert!(approx_eq(cuboid.surface_area(), 2.0 * (7.2 * 13.6 + 13.6 * 1.4 + 1.4 * 7.2)));
        assert!(approx_eq(cuboid.get_extent(Axis::Y), 13.6));
        assert!(approx_eq(cuboid.get_half_extent(Axis::Z), 0.7));
        assert!(approx_eq(cuboid.get_side_surface_area(Axis::X), 13.6 * 1.4));
        assert!(approx_eq(cuboid.with_volume(10.0).volume(), 10.0));
        assert!(approx_eq(cuboid.with_surface_area(10.0).surface_area(), 10.0));
        assert!(cuboid.is_physically_valid());
        assert!(!Cuboid::new(1.0, -0.0, 1.0).is_physically_valid());
        assert!(!Cuboid::new(1.0, f32::INFINITY, 1.0).is_physically_valid());
    }

    #[test]
    fn corners_edges_sides() {
        let cuboid = Cuboid::new(2.0, 4.0, 6.0);
        assert_eq!(
            cuboid.corner_at(DiagonalOrientation::LeftUpForward),
            Location::new(1.0, 2.0, 3.0)
        );
        let edge = cuboid.edge_at(IntercardinalOrientation::LeftUp);
        assert_eq!(edge.start(), Location::new(1.0, 2.0, -3.0));
        assert_eq!(edge.end(), Location::new(1.0, 2.0, 3.0));
        let side = cuboid.side_at(CardinalOrientation::Down);
        assert_eq!(side.normal(), Direction::DOWN);
        assert!(side.contains(Location::new(0.5, -2.0, 1.0), 1e-6));
        assert_eq!(cuboid.centroid_at(CardinalOrientation::Backward), Location::new(0.0, 0.0, -3.0));

        assert_eq!(cuboid.corners().count(), 8);
        assert_eq!(cuboid.edges().count(), 12);
        assert_eq!(cuboid.sides().count(), 6);
        assert_eq!(cuboid.centroids().count(), 6);
        for edge in cuboid.edges() {
            assert!(approx_eq(edge.length().unwrap(), 2.0)
                || approx_eq(edge.length().unwrap(), 4.0)
                || approx_eq(edge.length().unwrap(), 6.0));
        }
    }

    #[test]
    fn location_queries() {
        let cuboid = Cuboid::new(2.0, 4.0, 6.0);
        let outside = Location::new(3.0, 5.0, 0.0);
        assert_eq!(cuboid.point_closest_to(outside), Location::new(1.0, 2.0, 0.0));
        assert!(approx_eq(cuboid.distance_from(outside), 13.0_f32.sqrt()));

        let inside = Location::new(0.5, 0.0, 0.0);
        assert_eq!(cuboid.point_closest_to(inside), inside);
        assert_eq!(cuboid.distance_from(inside), 0.0);
        assert_eq!(cuboid.surface_distance_from(inside), 0.5);
        assert_eq!(cuboid.surface_point_closest_to(inside), Location::new(1.0, 0.0, 0.0));
        assert_eq!(cuboid.surface_normal_at(Location::new(1.0, 0.3, -2.0)), Direction::LEFT);
        assert_eq!(cuboid.surface_normal_at(Location::new(0.2, -2.0, 0.0)), Direction::DOWN);
    }

    #[test]
    fn ray_through_the_width() {
        let cuboid = test_cuboid();
        let ray = Ray::new(Location::new(100.0, 0.0, 0.0), Direction::RIGHT);
        let hit = cuboid.intersection_with(&ray).unwrap();
        assert!(approx_eq(hit.first.x(), 3.6));
        assert!(approx_eq(hit.second.unwrap().x(), -3.6));
        assert!(approx_eq(cuboid.incident_angle_with(&ray).unwrap().degrees(), 0.0));
        let bounced = cuboid.reflection_of(&ray).unwrap();
        assert!(bounced.direction().equals(Direction::LEFT, 1e-5));

        let away = ray.flipped();
        assert!(cuboid.intersection_with(&away).is_none());
        assert!(approx_eq(cuboid.distance_from_line(&away), 96.4));
        assert!(approx_eq(cuboid.closest_point_on_line(&away).x(), 100.0));
    }

    #[test]
    fn axis_parallel_lines_outside_the_slab_miss() {
        let cuboid = Cuboid::new(2.0, 2.0, 2.0);
        let above = Line::new(Location::new(0.0, 3.0, 0.0), Direction::FORWARD);
        assert!(cuboid.intersection_with(&above).is_none());
        assert!(approx_eq(cuboid.distance_from_line(&above), 2.0));
        assert!(approx_eq(cuboid.surface_distance_from_line(&above), 2.0));
        let surface = cuboid.surface_point_closest_to_line(&above);
        assert!(approx_eq(surface.y(), 1.0));

        let grazing = Line::new(Location::new(0.0, 1.0, 0.0), Direction::FORWARD);
        let hit = cuboid.intersection_with(&grazing).unwrap();
        assert!(approx_eq(hit.first.z(), -1.0));
    }

    #[test]
    fn segments_inside_are_contained() {
        let cuboid = Cuboid::new(2.0, 2.0, 2.0);
        let inside = BoundedRay::from_start_and_vect(Location::ORIGIN, Vect::new(0.5, 0.5, 0.0));
        assert!(cuboid.contains_line(&inside));
        assert!(cuboid.intersection_with(&inside).is_none());
        assert_eq!(cuboid.closest_point_on_line(&inside), Location::ORIGIN);
        assert_eq!(cuboid.distance_from_line(&inside), 0.0);
        assert!(approx_eq(cuboid.surface_distance_from_line(&inside), 0.5));
    }

    #[test]
    fn plane_queries() {
        let cuboid = Cuboid::new(2.0, 4.0, 6.0);
        let above = Plane::new(Direction::DOWN, Location::new(0.0, 5.0, 0.0));
        assert!(approx_eq(cuboid.signed_distance_from(above), 3.0));
        assert_eq!(cuboid.relationship_to(above), PlaneObjectRelationship::PlaneFacesTowardsObject);
        assert_eq!(cuboid.relationship_to(-above), PlaneObjectRelationship::PlaneFacesAwayFromObject);
        assert!(approx_eq(cuboid.point_closest_to_plane(above).y(), 2.0));
        assert!(approx_eq(cuboid.closest_point_on_plane(above).y(), 5.0));

        let slanted = Plane::new(Direction::new(1.0, 1.0, 0.0).unwrap(), Location::ORIGIN);
        assert_eq!(cuboid.signed_distance_from(slanted), 0.0);
        assert_eq!(cuboid.relationship_to(slanted), PlaneObjectRelationship::PlaneIntersectsObject);
        let on_both = cuboid.surface_point_closest_to_plane(slanted);
        assert!(slanted.contains(on_both, 1e-4));
        assert!(cuboid.surface_distance_from(on_both) < 1e-4);

        // Half extents reach 1 along X; a plane at x = 1.5 misses.
        let beside = Plane::new(Direction::LEFT, Location::new(1.5, 0.0, 0.0));
        assert!(approx_eq(cuboid.distance_from_plane(beside), 0.5));
    }

    #[test]
    fn text_and_bytes() {
        let cuboid = Cuboid::new(2.0, 4.5, 6.0);
        assert_eq!(cuboid.to_string(), "Cuboid[Width 2 | Height 4.5 | Depth 6]");
        assert_eq!(cuboid.to_string().parse::<Cuboid>(), Ok(cuboid));
        let bytes = cuboid.to_bytes();
        assert_eq!(bytes.len(), 12);
        assert_eq!(Cuboid::from_bytes(&bytes), Ok(cuboid));
    }
}
