// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use std::f32::consts::TAU;

use super::Direction;
use crate::angle::Angle;
use crate::error::GeometryError;
use crate::math::{self, Vec3};
use crate::random;
use crate::rotation::Rotation;

impl Direction {
    /// Uniformly random direction on the unit sphere.
    ///
    /// Rejection-samples the unit ball so the result has no axis bias.
    pub fn random() -> Self {
        loop {
            let candidate = Vec3::new(
                random::next_signed_unit(),
                random::next_signed_unit(),
                random::next_signed_unit(),
            );
            let len_sq = candidate.length_squared();
            if len_sq > 1e-4 && len_sq <= 1.0 {
                if let Some(unit) = candidate.normalize() {
                    return Self::from_vec3(unit);
                }
            }
        }
    }

    /// Random direction on the shorter arc between `start` and `end`.
    ///
    /// Fails when the endpoints are 179° or more apart, since the arc is
    /// then ill-defined.
    pub fn random_between(start: Self, end: Self) -> Result<Self, GeometryError> {
        let angle = start.angle_to(end);
        if angle.degrees() >= 179.0 {
            return Err(GeometryError::OutOfRange {
                what: "angle between endpoints",
                value: angle.degrees(),
                min: 0.0,
                max: 179.0,
            });
        }
        Ok(start.rotation_to(end).scaled_by(random::next_f32()).rotate(start))
    }

    /// Uniformly random direction (by solid angle) within `half_angle` of
    /// `centre`.
    pub fn random_within_cone(centre: Self, half_angle: Angle) -> Self {
        let half_angle = half_angle.clamp_zero_to_half_circle();
        let cos_theta = random::next_f32_in(math::cos(half_angle.radians()), 1.0);
        sample_around(centre, cos_theta)
    }

    /// Uniformly random direction (by solid angle) at least `inner` and at
    /// most `outer` away from `centre`; swapped bounds are reordered.
    pub fn random_within_annulus(centre: Self, outer: Angle, inner: Angle) -> Self {
        let (inner, outer) = if inner.radians() > outer.radians() {
            (outer, inner)
        } else {
            (inner, outer)
        };
        let cos_outer = math::cos(outer.clamp_zero_to_half_circle().radians());
        let cos_inner = math::cos(inner.clamp_zero_to_half_circle().radians());
        sample_around(centre, random::next_f32_in(cos_outer, cos_inner))
    }

    /// Random direction in the plane perpendicular to `plane_normal`,
    /// within `max_arc_angle` of `arc_centre` projected into that plane.
    ///
    /// Fails when `arc_centre` is parallel to the normal.
    pub fn random_within_plane_arc(
        plane_normal: Self,
        arc_centre: Self,
        max_arc_angle: Angle,
    ) -> Result<Self, GeometryError> {
        let centre = arc_centre.orthogonalized_against(plane_normal).ok_or(
            GeometryError::InvalidArgument {
                what: "arc_centre",
                reason: "parallel to the plane normal",
            },
        )?;
        let limit = max_arc_angle.clamp_zero_to_half_circle();
        let angle = Angle::random_between(-limit, limit);
        Ok(Rotation::from_angle_around_axis(angle, plane_normal).rotate(centre))
    }
}

fn sample_around(centre: Direction, cos_theta: f32) -> Direction {
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    let phi = random::next_f32() * TAU;
    let u = centre.any_perpendicular().vec3();
    let v = centre.vec3().cross(u);
    let offset = u * math::cos(phi) + v * math::sin(phi);
    let sample = centre.vec3() * cos_theta + offset * sin_theta;
    sample
        .normalize()
        .map_or(centre, Direction::from_vec3)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn random_directions_are_unit_length() {
        random::reseed(7);
        for _ in 0..200 {
            assert!(Direction::random().is_unit_length());
        }
    }

    #[test]
    fn random_between_stays_on_the_arc() {
        random::reseed(11);
        let start = Direction::LEFT;
        let end = Direction::FORWARD;
        for _ in 0..100 {
            let d = Direction::random_between(start, end).unwrap();
            assert!(d.y().abs() < 1e-5);
            assert!(d.x() >= -1e-5 && d.z() >= -1e-5);
        }
        assert!(Direction::random_between(Direction::UP, Direction::DOWN).is_err());
    }

    #[test]
    fn cone_and_annulus_respect_their_bounds() {
        random::reseed(13);
        let centre = Direction::new(0.3, -0.2, 1.0).unwrap();
        for _ in 0..200 {
            let d = Direction::random_within_cone(centre, Angle::from_degrees(20.0));
            assert!(d.angle_to(centre).degrees() <= 20.01);
            let a = Direction::random_within_annulus(
                centre,
                Angle::from_degrees(10.0),
                Angle::from_degrees(40.0),
            );
            let off = a.angle_to(centre).degrees();
            assert!((9.99..=40.01).contains(&off), "{off}");
        }
    }

    #[test]
    fn plane_arc_samples_stay_in_the_plane() {
        random::reseed(17);
        for _ in 0..100 {
            let d = Direction::random_within_plane_arc(
                Direction::UP,
                Direction::FORWARD,
                Angle::from_degrees(30.0),
            )
            .unwrap();
            assert!(d.y().abs() < 1e-5);
            assert!(d.angle_to(Direction::FORWARD).degrees() <= 30.01);
        }
        assert!(
            Direction::random_within_plane_arc(Direction::UP, Direction::DOWN, Angle::QUARTER_CIRCLE)
                .is_err()
        );
    }
}
