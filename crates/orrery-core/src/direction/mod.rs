// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use std::f32::consts::FRAC_1_SQRT_2;
use std::ops::{Mul, Neg, Shl, Shr};

use bytes::{Buf, BufMut};

use crate::angle::Angle;
use crate::codec::{get_f32s, put_f32s, ByteSerializable};
use crate::error::{GeometryError, ParseError};
use crate::format::{format_vector3, parse_vector3, FormatConfig, TextFormat};
use crate::math::{self, Vec3};
use crate::orientation::{
    CardinalOrientation, DiagonalOrientation, IntercardinalOrientation, Orientation,
};
use crate::rotation::Rotation;
use crate::vect::Vect;

mod clamp;
mod random;

/// Dot products within this distance of ±1 (or of 0) snap to the exact
/// value before orthogonalization.
const ORTHOGONALIZATION_DOT_SNAP: f32 = 1e-4;
/// Residuals shorter than this (squared) are treated as degenerate.
const DEGENERATE_LENGTH_SQUARED: f32 = 1e-5;
/// Dot products beyond `1 - ANGLE_DOT_SNAP` read as exactly parallel.
const ANGLE_DOT_SNAP: f32 = 1e-6;

const INV_SQRT_3: f32 = 0.577_350_26;

/// Unit-length 3D direction.
///
/// * Constructors that take raw components renormalize and return `None`
///   for a zero (or non-finite) vector; there is no in-band "no direction"
///   value, so an undefined direction is always `Option::<Direction>::None`.
/// * [`Direction::from_vector3_pre_normalized`] skips normalization for
///   callers that already hold a unit vector.
/// * Axis convention: `LEFT` = +X, `UP` = +Y, `FORWARD` = +Z.
///
/// # Examples
/// ```
/// use orrery_core::Direction;
/// let quarter = Direction::UP.angle_to(Direction::FORWARD);
/// assert!((quarter.degrees() - 90.0).abs() < 1e-4);
///
/// // Orthogonalizing against a parallel direction has no answer.
/// assert_eq!(Direction::UP.orthogonalized_against(Direction::DOWN), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "[f32; 3]", into = "[f32; 3]")
)]
pub struct Direction {
    x: f32,
    y: f32,
    z: f32,
}

impl Direction {
    /// +Z.
    pub const FORWARD: Self = Self::unit(0.0, 0.0, 1.0);
    /// -Z.
    pub const BACKWARD: Self = Self::unit(0.0, 0.0, -1.0);
    /// +Y.
    pub const UP: Self = Self::unit(0.0, 1.0, 0.0);
    /// -Y.
    pub const DOWN: Self = Self::unit(0.0, -1.0, 0.0);
    /// +X.
    pub const LEFT: Self = Self::unit(1.0, 0.0, 0.0);
    /// -X.
    pub const RIGHT: Self = Self::unit(-1.0, 0.0, 0.0);

    /// The six axis directions.
    pub const ALL_CARDINALS: [Self; 6] = [
        Self::LEFT,
        Self::RIGHT,
        Self::UP,
        Self::DOWN,
        Self::FORWARD,
        Self::BACKWARD,
    ];

    /// The twelve directions halfway between two perpendicular cardinals.
    pub const ALL_INTERCARDINALS: [Self; 12] = [
        Self::unit(FRAC_1_SQRT_2, FRAC_1_SQRT_2, 0.0),
        Self::unit(-FRAC_1_SQRT_2, FRAC_1_SQRT_2, 0.0),
        Self::unit(0.0, FRAC_1_SQRT_2, FRAC_1_SQRT_2),
        Self::unit(0.0, FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
        Self::unit(FRAC_1_SQRT_2, -FRAC_1_SQRT_2, 0.0),
        Self::unit(-FRAC_1_SQRT_2, -FRAC_1_SQRT_2, 0.0),
        Self::unit(0.0, -FRAC_1_SQRT_2, FRAC_1_SQRT_2),
        Self::unit(0.0, -FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
        Self::unit(FRAC_1_SQRT_2, 0.0, FRAC_1_SQRT_2),
        Self::unit(FRAC_1_SQRT_2, 0.0, -FRAC_1_SQRT_2),
        Self::unit(-FRAC_1_SQRT_2, 0.0, FRAC_1_SQRT_2),
        Self::unit(-FRAC_1_SQRT_2, 0.0, -FRAC_1_SQRT_2),
    ];

    /// The eight directions into each octant.
    pub const ALL_DIAGONALS: [Self; 8] = [
        Self::unit(INV_SQRT_3, INV_SQRT_3, INV_SQRT_3),
        Self::unit(-INV_SQRT_3, INV_SQRT_3, INV_SQRT_3),
        Self::unit(INV_SQRT_3, INV_SQRT_3, -INV_SQRT_3),
        Self::unit(-INV_SQRT_3, INV_SQRT_3, -INV_SQRT_3),
        Self::unit(INV_SQRT_3, -INV_SQRT_3, INV_SQRT_3),
        Self::unit(-INV_SQRT_3, -INV_SQRT_3, INV_SQRT_3),
        Self::unit(INV_SQRT_3, -INV_SQRT_3, -INV_SQRT_3),
        Self::unit(-INV_SQRT_3, -INV_SQRT_3, -INV_SQRT_3),
    ];

    /// Cardinals, intercardinals and diagonals: all 26 orientations.
    pub const ALL_ORIENTATIONS: [Self; 26] = {
        let mut out = [Self::FORWARD; 26];
        let mut i = 0;
        while i < 6 {
            out[i] = Self::ALL_CARDINALS[i];
            i += 1;
        }
        while i < 18 {
            out[i] = Self::ALL_INTERCARDINALS[i - 6];
            i += 1;
        }
        while i < 26 {
            out[i] = Self::ALL_DIAGONALS[i - 18];
            i += 1;
        }
        out
    };

    const fn unit(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Direction of `(x, y, z)`, renormalized; `None` for a zero or
    /// non-finite vector.
    pub fn new(x: f32, y: f32, z: f32) -> Option<Self> {
        Self::from_vector3([x, y, z])
    }

    /// Direction of `v`, renormalized; `None` for a zero or non-finite
    /// vector.
    pub fn from_vector3(v: [f32; 3]) -> Option<Self> {
        Vec3::from(v).normalize().map(Self::from_vec3)
    }

    /// Wraps `v` without normalizing it.
    ///
    /// The caller asserts `v` is unit length; nothing checks it. Use
    /// [`Direction::from_vector3`] when in doubt.
    pub const fn from_vector3_pre_normalized(v: [f32; 3]) -> Self {
        Self::unit(v[0], v[1], v[2])
    }

    /// Components as an array; lossless.
    pub const fn to_vector3(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// X component.
    pub const fn x(self) -> f32 {
        self.x
    }

    /// Y component.
    pub const fn y(self) -> f32 {
        self.y
    }

    /// Z component.
    pub const fn z(self) -> f32 {
        self.z
    }

    pub(crate) const fn vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub(crate) const fn from_vec3(v: Vec3) -> Self {
        Self::unit(v.x(), v.y(), v.z())
    }

    /// Whether the squared length is within `0.002` of 1.
    pub fn is_unit_length(self) -> bool {
        (self.vec3().length_squared() - 1.0).abs() < 0.002
    }

    /// The opposite direction.
    pub fn flipped(self) -> Self {
        -self
    }

    /// Unit vector with the same components.
    pub const fn as_vect(self) -> Vect {
        Vect::new(self.x, self.y, self.z)
    }

    /// Vector of `length` along this direction.
    pub fn with_length(self, length: f32) -> Vect {
        Vect::from_vec3(self.vec3() * length)
    }

    /// Dot product (the cosine of the angle between unit directions).
    pub fn dot(self, other: Self) -> f32 {
        self.vec3().dot(other.vec3())
    }

    /// Cross product; not normalized.
    pub fn cross(self, other: Self) -> Vect {
        Vect::from_vec3(self.vec3().cross(other.vec3()))
    }

    /// Some direction perpendicular to this one.
    ///
    /// Deterministic: crosses with +X when `|z| > |x|`, otherwise with +Z,
    /// so the reference axis is never near-parallel to the input.
    pub fn any_perpendicular(self) -> Self {
        let reference = if self.z.abs() > self.x.abs() {
            Vec3::UNIT_X
        } else {
            Vec3::UNIT_Z
        };
        Self::from_vec3(self.vec3().cross(reference).normalize_unchecked())
    }

    /// Direction perpendicular to both `a` and `b` (`a × b`, normalized).
    ///
    /// Swapping the arguments flips the result. When `a` and `b` are
    /// parallel or antipodal, falls back to `a.any_perpendicular()`.
    pub fn from_perpendicular(a: Self, b: Self) -> Self {
        let cross = a.vec3().cross(b.vec3());
        if cross.length_squared() > DEGENERATE_LENGTH_SQUARED {
            Self::from_vec3(cross.normalize_unchecked())
        } else {
            a.any_perpendicular()
        }
    }

    /// This direction projected into the plane whose normal is `other`,
    /// renormalized.
    ///
    /// Returns `None` when the directions are identical or antipodal, since
    /// nothing of `self` survives the projection.
    pub fn orthogonalized_against(self, other: Self) -> Option<Self> {
        let mut dot = self.dot(other);
        if dot > 1.0 - ORTHOGONALIZATION_DOT_SNAP {
            dot = 1.0;
        } else if dot < -1.0 + ORTHOGONALIZATION_DOT_SNAP {
            dot = -1.0;
        } else if dot.abs() < ORTHOGONALIZATION_DOT_SNAP {
            dot = 0.0;
        }
        let residual = self.vec3() - other.vec3() * dot;
        if residual.length_squared() < DEGENERATE_LENGTH_SQUARED {
            return None;
        }
        Some(Self::from_vec3(residual.normalize_unchecked()))
    }

    /// [`Direction::orthogonalized_against`] without snapping or the
    /// degeneracy check.
    ///
    /// Agrees with the checked version for well-conditioned inputs. For
    /// parallel or antipodal inputs the result is unspecified (typically
    /// NaN components).
    pub fn fast_orthogonalized_against(self, other: Self) -> Self {
        debug_assert!(
            self.dot(other).abs() < 1.0 - ORTHOGONALIZATION_DOT_SNAP,
            "fast_orthogonalized_against on parallel directions"
        );
        let residual = self.vec3() - other.vec3() * self.dot(other);
        Self::from_vec3(residual.normalize_unchecked())
    }

    /// `other` or its flip, whichever is closer to this direction.
    ///
    /// Returns `None` when the two are perpendicular.
    pub fn parallelized_with(self, other: Self) -> Option<Self> {
        let dot = self.dot(other);
        if dot.abs() < ORTHOGONALIZATION_DOT_SNAP {
            None
        } else if dot > 0.0 {
            Some(other)
        } else {
            Some(-other)
        }
    }

    /// Unsigned angle to `other`, in `[0°, 180°]`.
    ///
    /// Inputs that drifted off unit length are renormalized first.
    pub fn angle_to(self, other: Self) -> Angle {
        let a = self.vec3().normalize().unwrap_or_else(|| self.vec3());
        let b = other.vec3().normalize().unwrap_or_else(|| other.vec3());
        let mut dot = a.dot(b);
        if dot > 1.0 - ANGLE_DOT_SNAP {
            dot = 1.0;
        } else if dot < -1.0 + ANGLE_DOT_SNAP {
            dot = -1.0;
        } else if dot.abs() < ANGLE_DOT_SNAP {
            dot = 0.0;
        }
        Angle::from_radians(math::acos_clamped(dot))
    }

    /// Shortest-arc rotation taking `self` onto `other`.
    pub fn rotation_to(self, other: Self) -> Rotation {
        Rotation::from_angle_around_axis(self.angle_to(other), Self::from_perpendicular(self, other))
    }

    /// Shortest-arc rotation taking `other` onto `self`.
    pub fn rotation_from(self, other: Self) -> Rotation {
        other.rotation_to(self)
    }

    /// [`Direction::rotation_to`] over optional directions; the identity
    /// when either side is undefined.
    pub fn rotation_to_or_none(start: Option<Self>, end: Option<Self>) -> Rotation {
        match (start, end) {
            (Some(start), Some(end)) => start.rotation_to(end),
            _ => Rotation::NONE,
        }
    }

    /// Rotated by `rotation`, renormalized to stay unit length.
    pub fn rotated_by(self, rotation: Rotation) -> Self {
        let rotated = rotation.rotate_vec3(self.vec3());
        Self::from_vec3(rotated.normalize().unwrap_or(rotated))
    }

    /// Spherical interpolation along the great circle from `start` to
    /// `end`; `t` outside `[0, 1]` extrapolates along the same circle.
    pub fn interpolate(start: Self, end: Self, t: f32) -> Self {
        start.rotation_to(end).scaled_by(t).rotate(start)
    }

    /// Caches the rotation shared by repeated interpolations between the
    /// same endpoints.
    pub fn create_interpolation_precomputation(start: Self, end: Self) -> Rotation {
        start.rotation_to(end)
    }

    /// [`Direction::interpolate`] using a cached rotation from
    /// [`Direction::create_interpolation_precomputation`].
    pub fn interpolate_using_precomputation(start: Self, precomputation: Rotation, t: f32) -> Self {
        precomputation.scaled_by(t).rotate(start)
    }

    /// Element of `span` nearest (by angle) to `target`; the first wins on
    /// ties.
    ///
    /// Fails with [`GeometryError::InvalidArgument`] on an empty span.
    pub fn from_nearest_direction_in_span(target: Self, span: &[Self]) -> Result<Self, GeometryError> {
        nearest_by_dot(target, span.iter().map(|d| (*d, *d))).map(|(d, _)| d).ok_or(GeometryError::InvalidArgument {
            what: "span",
            reason: "cannot pick the nearest direction from an empty span",
        })
    }

    /// Nearest axis direction.
    pub fn nearest_orientation_cardinal(self) -> (CardinalOrientation, Self) {
        nearest_by_dot(self, CardinalOrientation::ALL.into_iter().map(|o| (o, o.to_direction())))
            .unwrap_or((CardinalOrientation::Forward, Self::FORWARD))
    }

    /// Nearest of the twelve intercardinal directions.
    pub fn nearest_orientation_intercardinal(self) -> (IntercardinalOrientation, Self) {
        nearest_by_dot(
            self,
            IntercardinalOrientation::ALL.into_iter().map(|o| (o, o.to_direction())),
        )
        .unwrap_or((
            IntercardinalOrientation::UpForward,
            IntercardinalOrientation::UpForward.to_direction(),
        ))
    }

    /// Nearest of the eight diagonal directions.
    pub fn nearest_orientation_diagonal(self) -> (DiagonalOrientation, Self) {
        nearest_by_dot(self, DiagonalOrientation::ALL.into_iter().map(|o| (o, o.to_direction())))
            .unwrap_or((
                DiagonalOrientation::LeftUpForward,
                DiagonalOrientation::LeftUpForward.to_direction(),
            ))
    }

    /// Nearest of all 26 orientations.
    pub fn nearest_orientation(self) -> (Orientation, Self) {
        let candidates = Orientation::all()
            .filter_map(|o| o.to_direction().map(|d| (o, d)));
        nearest_by_dot(self, candidates).unwrap_or((Orientation::None, self))
    }

    /// Whether the angle to `other` is at most `tolerance`.
    pub fn equals_within_angle(self, other: Self, tolerance: Angle) -> bool {
        self.angle_to(other).radians() <= tolerance.radians()
    }

    /// Equality with a per-component tolerance.
    pub fn equals(self, other: Self, tolerance: f32) -> bool {
        self.as_vect().equals(other.as_vect(), tolerance)
    }
}

fn nearest_by_dot<T>(
    target: Direction,
    candidates: impl Iterator<Item = (T, Direction)>,
) -> Option<(T, Direction)> {
    let mut best: Option<(T, Direction, f32)> = None;
    for (tag, candidate) in candidates {
        let dot = target.dot(candidate);
        if best.as_ref().map_or(true, |(_, _, best_dot)| dot > *best_dot) {
            best = Some((tag, candidate, dot));
        }
    }
    best.map(|(tag, candidate, _)| (tag, candidate))
}

impl Neg for Direction {
    type Output = Self;

    fn neg(self) -> Self {
        Self::unit(-self.x, -self.y, -self.z)
    }
}

/// `a >> b` is `a.rotation_to(b)`.
impl Shr for Direction {
    type Output = Rotation;

    fn shr(self, rhs: Self) -> Rotation {
        self.rotation_to(rhs)
    }
}

/// `a << b` is `a.rotation_from(b)`.
impl Shl for Direction {
    type Output = Rotation;

    fn shl(self, rhs: Self) -> Rotation {
        self.rotation_from(rhs)
    }
}

impl Mul<Rotation> for Direction {
    type Output = Self;

    fn mul(self, rhs: Rotation) -> Self {
        self.rotated_by(rhs)
    }
}

impl TryFrom<[f32; 3]> for Direction {
    type Error = GeometryError;

    /// Accepts only vectors that are already unit length, so a round-trip
    /// through `[f32; 3]` is exact.
    fn try_from(value: [f32; 3]) -> Result<Self, Self::Error> {
        let direction = Self::from_vector3_pre_normalized(value);
        if direction.is_unit_length() {
            Ok(direction)
        } else {
            Err(GeometryError::InvalidArgument {
                what: "direction",
                reason: "components are not unit length",
            })
        }
    }
}

impl From<Direction> for [f32; 3] {
    fn from(value: Direction) -> Self {
        value.to_vector3()
    }
}

impl TextFormat for Direction {
    fn format_with(&self, config: &FormatConfig) -> String {
        format_vector3(self.to_vector3(), config)
    }

    /// Parsed components are renormalized; the zero vector is rejected.
    fn parse_with(text: &str, config: &FormatConfig) -> Result<Self, ParseError> {
        let components = parse_vector3(text, config)?;
        Self::from_vector3(components).ok_or_else(|| ParseError::InvalidNumber {
            input: text.trim().to_owned(),
        })
    }
}

crate::impl_text_traits!(Direction);

impl ByteSerializable for Direction {
    const SERIALIZED_LEN: usize = 12;

    fn write_to<B: BufMut>(&self, dest: &mut B) {
        put_f32s(dest, &self.to_vector3());
    }

    /// Reads the stored components verbatim; the all-zero encoding of an
    /// undefined direction is rejected.
    fn read_from<B: Buf>(src: &mut B) -> Result<Self, GeometryError> {
        let components: [f32; 3] = get_f32s(src);
        if components == [0.0; 3] {
            return Err(GeometryError::InvalidArgument {
                what: "direction",
                reason: "zero vector encodes an undefined direction",
            });
        }
        Ok(Self::from_vector3_pre_normalized(components))
    }
}

/// Undefined directions encode as the zero vector.
impl ByteSerializable for Option<Direction> {
    const SERIALIZED_LEN: usize = 12;

    fn write_to<B: BufMut>(&self, dest: &mut B) {
        put_f32s(dest, &self.map_or([0.0; 3], Direction::to_vector3));
    }

    fn read_from<B: Buf>(src: &mut B) -> Result<Self, GeometryError> {
        let components: [f32; 3] = get_f32s(src);
        if components == [0.0; 3] {
            Ok(None)
        } else {
            Ok(Some(Direction::from_vector3_pre_normalized(components)))
        }
    }
}
