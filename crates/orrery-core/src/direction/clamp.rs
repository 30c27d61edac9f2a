// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use tracing::debug;

use super::Direction;
use crate::angle::Angle;
use crate::rotation::Rotation;

/// Inputs closer than this to antipodal make the arc between clamp bounds
/// ambiguous.
const ANTIPODAL_DOT: f32 = -0.9999;
/// Slack for the "inside the arc" test.
const ARC_EPSILON: f32 = 1e-5;

impl Direction {
    /// Clamps into the shorter great-circle arc from `min` to `max`.
    ///
    /// * Equal bounds collapse to `min`.
    /// * Antipodal bounds do not define a unique arc, so `self` comes back
    ///   unchanged.
    /// * A direction outside the arc snaps to the nearer bound; ties go to
    ///   `min`.
    pub fn clamp(self, min: Self, max: Self) -> Self {
        if min == max {
            return min;
        }
        if min.dot(max) < ANTIPODAL_DOT {
            return self;
        }
        let normal = Self::from_perpendicular(min, max);
        let Some(projected) = self.orthogonalized_against(normal) else {
            return nearer_bound(self, min, max);
        };
        let after_min = min.cross(projected).dot(normal.as_vect());
        let before_max = projected.cross(max).dot(normal.as_vect());
        if after_min >= -ARC_EPSILON && before_max >= -ARC_EPSILON {
            projected
        } else {
            nearer_bound(self, min, max)
        }
    }

    /// [`Direction::clamp`] for a possibly-undefined direction; `None`
    /// stays `None`.
    pub fn clamp_optional(direction: Option<Self>, min: Self, max: Self) -> Option<Self> {
        direction.map(|d| d.clamp(min, max))
    }

    /// Keeps the direction within `max_angle` of `centre`.
    ///
    /// `max_angle` is clamped to `[0°, 180°]`. Directions already inside the
    /// cone come back unchanged.
    pub fn clamp_to_cone(self, centre: Self, max_angle: Angle) -> Self {
        let max_angle = max_angle.clamp_zero_to_half_circle();
        if self.angle_to(centre).radians() <= max_angle.radians() {
            return self;
        }
        let axis = Self::from_perpendicular(centre, self);
        Rotation::from_angle_around_axis(max_angle, axis).rotate(centre)
    }

    /// Clamps into the arc of the plane perpendicular to `plane_normal`
    /// that is centred on `arc_centre` and spans `arc_width` in total,
    /// `arc_width / 2` to either side. `arc_width` is clamped to
    /// `[0°, 360°]`.
    ///
    /// With `project_first`, the in-plane heading is clamped and the
    /// input's elevation above or below the plane is then restored; `None`
    /// means the direction is parallel to the normal and has no heading.
    /// Otherwise the result is the clamped heading itself, lying in the
    /// plane, and a direction along the normal snaps to the arc centre.
    ///
    /// An arc centre parallel to the normal leaves nothing to clamp to; the
    /// direction is returned unchanged.
    pub fn clamp_to_plane_arc(
        self,
        plane_normal: Self,
        arc_centre: Self,
        arc_width: Angle,
        project_first: bool,
    ) -> Option<Self> {
        let Some(centre) = arc_centre.orthogonalized_against(plane_normal) else {
            debug!(?arc_centre, ?plane_normal, "arc centre is parallel to the plane normal");
            return Some(self);
        };
        let limit = arc_width.clamp_zero_to_full_circle() / 2.0;
        let Some(heading) = self.orthogonalized_against(plane_normal) else {
            return (!project_first).then_some(centre);
        };
        let clamped = if heading.angle_to(centre).radians() <= limit.radians() {
            heading
        } else {
            let side = plane_normal.as_vect().dot(centre.cross(heading));
            let limit = if side >= 0.0 { limit } else { -limit };
            Rotation::from_angle_around_axis(limit, plane_normal).rotate(centre)
        };
        if !project_first {
            return Some(clamped);
        }
        let rise = self.dot(plane_normal).clamp(-1.0, 1.0);
        let run = (1.0 - rise * rise).max(0.0).sqrt();
        let lifted = clamped.as_vect() * run + plane_normal.as_vect() * rise;
        Some(lifted.direction().unwrap_or(clamped))
    }
}

fn nearer_bound(direction: Direction, min: Direction, max: Direction) -> Direction {
    if direction.dot(min) >= direction.dot(max) {
        min
    } else {
        max
    }
}
