// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
use orrery_core::{random, Angle, Direction, Location, Rotation, Vect};
use orrery_geom::{
    BoundedRay, ConvexShape, Cuboid, Line, LineLike, Plane, PlaneObjectRelationship, Ray, Sphere,
};

fn close(a: f32, b: f32, tolerance: f32) -> bool {
    (a - b).abs() <= tolerance
}

#[test]
fn measuring_shapes() {
    let cuboid = Cuboid::new(7.2, 13.6, 1.4);
    assert!(close(cuboid.volume(), 137.088, 1e-2));
    let sphere = Sphere::new(7.4);
    assert!(close(sphere.surface_area(), 688.134, 1e-2));
    assert!(close(sphere.volume(), 1697.398, 1e-1));
    assert!(close(Sphere::from_volume(sphere.volume()).radius(), 7.4, 1e-4));
}

#[test]
fn ray_crossing_a_cuboid_hits_near_face_first() {
    let cuboid = Cuboid::new(7.2, 13.6, 1.4);
    let ray = Ray::new(Location::new(100.0, 0.0, 0.0), Direction::new(-1.0, 0.0, 0.0).expect("axis"));
    let hit = cuboid.intersection_with(&ray).expect("hit");
    assert!(hit.first.equals(Location::new(3.6, 0.0, 0.0), 1e-4));
    assert!(hit.second.expect("exit").equals(Location::new(-3.6, 0.0, 0.0), 1e-4));
    assert_eq!(ray.intersection_with_shape(&cuboid), Some(hit));
}

#[test]
fn segment_stopping_short_of_a_sphere_misses() {
    let sphere = Sphere::new(1.0);
    let short = BoundedRay::new(Location::new(0.0, 0.0, -5.0), Location::new(0.0, 0.0, -2.0));
    assert!(sphere.intersection_with(&short).is_none());
    assert!(close(sphere.distance_from_line(&short), 1.0, 1e-5));
    let long = short.with_length(10.0);
    let hit = sphere.intersection_with(&long).expect("hit");
    assert!(hit.first.equals(Location::new(0.0, 0.0, -1.0), 1e-5));
    assert!(hit.second.expect("exit").equals(Location::new(0.0, 0.0, 1.0), 1e-5));
}

#[test]
fn bouncing_a_ray_off_a_tilted_floor() {
    let tilt = Rotation::from_angle_around_axis(Angle::from_degrees(10.0), Direction::FORWARD);
    let floor = Plane::new(Direction::UP, Location::ORIGIN).rotated_around_origin_by(tilt);
    let ray = Ray::new(Location::new(0.0, 5.0, 0.0), Direction::DOWN);
    let bounce = ray.reflected_by_plane(floor).expect("bounce");
    assert!(floor.contains(bounce.start(), 1e-4));
    let incident = ray.incident_angle_with_plane(floor).expect("angle");
    assert!(close(incident.degrees(), 10.0, 1e-3));
    assert!(close(bounce.direction().angle_to(Direction::UP).degrees(), 20.0, 1e-2));
}

#[test]
fn planes_meet_in_a_line() {
    let floor = Plane::new(Direction::UP, Location::new(0.0, 2.0, 0.0));
    let wall = Plane::new(Direction::LEFT, Location::new(3.0, 0.0, 0.0));
    let seam = floor.intersection_with(wall).expect("not parallel");
    assert!(close(seam.direction().dot(Direction::FORWARD).abs(), 1.0, 1e-5));
    assert!(floor.contains(seam.start(), 1e-4));
    assert!(wall.contains(seam.start(), 1e-4));
    assert!(floor.intersection_with(floor.moved_by(Vect::new(0.0, 1.0, 0.0))).is_none());
}

#[test]
fn plane_relationship_to_shapes() {
    let sphere = Sphere::new(1.0);
    let above = Plane::new(Direction::DOWN, Location::new(0.0, 3.0, 0.0));
    assert_eq!(above.relationship_to_shape(&sphere), PlaneObjectRelationship::PlaneFacesTowardsObject);
    assert!(close(above.distance_from_shape(&sphere), 2.0, 1e-5));
    let through = Plane::new(Direction::DOWN, Location::new(0.0, 0.5, 0.0));
    assert_eq!(through.relationship_to_shape(&sphere), PlaneObjectRelationship::PlaneIntersectsObject);
}

#[test]
fn lines_passing_at_right_angles() {
    let a = Line::new(Location::ORIGIN, Direction::LEFT);
    let b = Line::new(Location::new(0.0, 3.0, 5.0), Direction::FORWARD);
    assert!(close(a.distance_from_line(&b), 3.0, 1e-5));
    assert!(a.closest_point_to_line(&b).equals(Location::ORIGIN, 1e-5));
}

#[test]
fn absent_directions_stay_absent_through_clamps() {
    assert_eq!(Direction::clamp_optional(None, Direction::LEFT, Direction::FORWARD), None);
}

#[test]
fn reseeding_reproduces_random_shapes() {
    random::reseed(7);
    let first = (Cuboid::random(), Sphere::random(), Plane::random(), BoundedRay::random());
    random::reseed(7);
    let second = (Cuboid::random(), Sphere::random(), Plane::random(), BoundedRay::random());
    assert_eq!(first, second);
    assert!(first.0.is_physically_valid());
    assert!(first.1.is_physically_valid());
}
