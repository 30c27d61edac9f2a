// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Subcommand handlers. Each returns the lines to print.

use anyhow::{bail, Context, Result};
use orrery_core::format::{format_scalar, FormatConfig, TextFormat};
use orrery_core::{Angle, Direction, Location, Rotation};
use orrery_geom::{ConvexShape, LineLike, LocationShapeQueries, Plane};
use tracing::{debug, instrument};

use crate::operand::{with_line, with_shape, LineOperand, Operand, ShapeOperand};

const NONE: &str = "none";

fn optional<T: TextFormat>(value: Option<T>, config: &FormatConfig) -> String {
    value.map_or_else(|| NONE.to_owned(), |v| v.format_with(config))
}

fn unsupported(command: &str, a: Operand, b: Operand) -> anyhow::Error {
    anyhow::anyhow!("`{command}` does not support a {} with a {}", a.kind(), b.kind())
}

/// Finds a (shape, line) pair in either order.
fn shape_and_line(a: Operand, b: Operand) -> Option<(ShapeOperand, LineOperand)> {
    a.as_shape()
        .zip(b.as_line())
        .or_else(|| b.as_shape().zip(a.as_line()))
}

/// Finds a (plane, line) pair in either order.
fn plane_and_line(a: Operand, b: Operand) -> Option<(Plane, LineOperand)> {
    match (a, b) {
        (Operand::Plane(plane), other) | (other, Operand::Plane(plane)) => {
            other.as_line().map(|line| (plane, line))
        }
        _ => None,
    }
}

#[instrument(skip_all, fields(a = a.kind(), b = b.kind()))]
pub(crate) fn intersect(a: Operand, b: Operand, config: &FormatConfig) -> Result<Vec<String>> {
    if let Some((shape, line)) = shape_and_line(a, b) {
        let hit = with_shape!(shape, |s| with_line!(line, |l| s.intersection_with(&l)));
        debug!(hit = hit.is_some(), "shape intersection");
        return Ok(match hit {
            Some(hit) => {
                let mut lines = vec![format!("first {}", hit.first.format_with(config))];
                if let Some(second) = hit.second {
                    lines.push(format!("second {}", second.format_with(config)));
                }
                lines
            }
            None => vec![NONE.to_owned()],
        });
    }
    if let Some((plane, line)) = plane_and_line(a, b) {
        let point = with_line!(line, |l| l.intersection_with_plane(plane));
        return Ok(vec![optional(point, config)]);
    }
    if let (Operand::Plane(p), Operand::Plane(q)) = (a, b) {
        return Ok(vec![optional(p.intersection_with(q), config)]);
    }
    Err(unsupported("intersect", a, b))
}

#[instrument(skip_all, fields(a = a.kind(), b = b.kind()))]
pub(crate) fn distance(a: Operand, b: Operand, config: &FormatConfig) -> Result<Vec<String>> {
    let distance = if let Some((shape, line)) = shape_and_line(a, b) {
        with_shape!(shape, |s| with_line!(line, |l| s.distance_from_line(&l)))
    } else if let Some((plane, line)) = plane_and_line(a, b) {
        with_line!(line, |l| l.distance_from_plane(plane))
    } else {
        match (a, b) {
            (Operand::Location(p), Operand::Location(q)) => p.distance_from(q),
            (Operand::Plane(p), Operand::Plane(q)) => p.distance_from_plane(q),
            (Operand::Plane(plane), Operand::Location(p))
            | (Operand::Location(p), Operand::Plane(plane)) => plane.distance_from(p),
            (Operand::Plane(plane), other) | (other, Operand::Plane(plane)) => {
                let shape = other.as_shape().ok_or_else(|| unsupported("distance", a, b))?;
                with_shape!(shape, |s| s.distance_from_plane(plane))
            }
            (Operand::Location(p), other) | (other, Operand::Location(p)) => {
                if let Some(shape) = other.as_shape() {
                    with_shape!(shape, |s| p.distance_from_shape(&s))
                } else if let Some(line) = other.as_line() {
                    with_line!(line, |l| l.distance_from(p))
                } else {
                    return Err(unsupported("distance", a, b));
                }
            }
            _ => match (a.as_line(), b.as_line()) {
                (Some(first), Some(second)) => {
                    with_line!(first, |l| with_line!(second, |m| l.distance_from_line(&m)))
                }
                _ => return Err(unsupported("distance", a, b)),
            },
        }
    };
    Ok(vec![format_scalar(distance, config)])
}

fn closest_on_shape(shape: ShapeOperand, other: Operand) -> Option<Location> {
    match other {
        Operand::Location(p) => Some(with_shape!(shape, |s| s.point_closest_to(p))),
        Operand::Plane(plane) => Some(with_shape!(shape, |s| s.point_closest_to_plane(plane))),
        other => {
            let line = other.as_line()?;
            Some(with_shape!(shape, |s| with_line!(line, |l| s.point_closest_to_line(&l))))
        }
    }
}

fn closest_on_line(line: LineOperand, other: Operand) -> Option<Location> {
    match other {
        Operand::Location(p) => Some(with_line!(line, |l| l.point_closest_to(p))),
        Operand::Plane(plane) => Some(with_line!(line, |l| l.point_closest_to_plane(plane))),
        other => match (other.as_shape(), other.as_line()) {
            (Some(shape), _) => Some(with_line!(line, |l| {
                with_shape!(shape, |s| l.point_closest_to_shape(&s))
            })),
            (None, Some(target)) => Some(with_line!(line, |l| {
                with_line!(target, |m| l.closest_point_to_line(&m))
            })),
            (None, None) => None,
        },
    }
}

fn closest_on_plane(plane: Plane, other: Operand) -> Option<Location> {
    match other {
        Operand::Location(p) => Some(plane.point_closest_to(p)),
        other => match (other.as_shape(), other.as_line()) {
            (Some(shape), _) => Some(with_shape!(shape, |s| plane.point_closest_to_shape(&s))),
            (None, Some(line)) => Some(with_line!(line, |l| l.closest_point_on_plane(plane))),
            (None, None) => None,
        },
    }
}

/// Point on `a` closest to `b`.
#[instrument(skip_all, fields(a = a.kind(), b = b.kind()))]
pub(crate) fn closest(a: Operand, b: Operand, config: &FormatConfig) -> Result<Vec<String>> {
    let point = match a {
        Operand::Plane(plane) => closest_on_plane(plane, b),
        other => match (other.as_shape(), other.as_line()) {
            (Some(shape), _) => closest_on_shape(shape, b),
            (None, Some(line)) => closest_on_line(line, b),
            (None, None) => None,
        },
    };
    let point = point.ok_or_else(|| unsupported("closest", a, b))?;
    Ok(vec![point.format_with(config)])
}

#[instrument(skip_all, fields(a = a.kind(), b = b.kind()))]
pub(crate) fn reflect(a: Operand, b: Operand, config: &FormatConfig) -> Result<Vec<String>> {
    if let Some((shape, line)) = shape_and_line(a, b) {
        let text = with_shape!(shape, |s| {
            with_line!(line, |l| optional(s.reflection_of(&l), config))
        });
        return Ok(vec![text]);
    }
    if let Some((plane, line)) = plane_and_line(a, b) {
        let text = with_line!(line, |l| optional(l.reflected_by_plane(plane), config));
        return Ok(vec![text]);
    }
    Err(unsupported("reflect", a, b))
}

#[instrument(skip_all, fields(a = a.kind(), b = b.kind()))]
pub(crate) fn angle(a: Operand, b: Operand, config: &FormatConfig) -> Result<Vec<String>> {
    let angle: Option<Angle> = if let Some((shape, line)) = shape_and_line(a, b) {
        with_shape!(shape, |s| with_line!(line, |l| s.incident_angle_with(&l)))
    } else if let Some((plane, line)) = plane_and_line(a, b) {
        with_line!(line, |l| l.incident_angle_with_plane(plane))
    } else if let (Operand::Plane(p), Operand::Plane(q)) = (a, b) {
        Some(p.angle_to(q))
    } else {
        return Err(unsupported("angle", a, b));
    };
    Ok(vec![optional(angle, config)])
}

/// Rotates `operand` by `degrees` around `axis` through the origin;
/// bounded rays turn about their start point.
#[instrument(skip(operand, config), fields(operand = operand.kind()))]
pub(crate) fn rotate(
    operand: Operand,
    axis: &str,
    degrees: f32,
    config: &FormatConfig,
) -> Result<Vec<String>> {
    let axis: Direction = axis
        .trim()
        .parse()
        .with_context(|| format!("parsing rotation axis `{axis}`"))?;
    let rotation = Rotation::from_angle_around_axis(Angle::from_degrees(degrees), axis);
    let text = match operand {
        Operand::Location(p) => p.rotated_around(Location::ORIGIN, rotation).format_with(config),
        Operand::Plane(plane) => plane.rotated_around_origin_by(rotation).format_with(config),
        Operand::Line(line) => line.rotated_by(rotation).format_with(config),
        Operand::Ray(ray) => ray.rotated_by(rotation).format_with(config),
        Operand::BoundedRay(segment) => segment.rotated_around_start(rotation).format_with(config),
        Operand::Sphere(_) | Operand::Cuboid(_) => {
            bail!("`rotate` does not support a {}; shapes are axis-aligned", operand.kind())
        }
    };
    Ok(vec![text])
}

#[instrument(skip_all, fields(a = a.kind(), b = b.kind()))]
pub(crate) fn split(a: Operand, b: Operand, config: &FormatConfig) -> Result<Vec<String>> {
    let (plane, other) = match (a, b) {
        (Operand::Plane(plane), other) | (other, Operand::Plane(plane)) => (plane, other),
        _ => return Err(unsupported("split", a, b)),
    };
    match other {
        Operand::BoundedRay(segment) => Ok(segment.try_split(plane).map_or_else(
            || vec![NONE.to_owned()],
            |(before, after)| vec![before.format_with(config), after.format_with(config)],
        )),
        Operand::Sphere(sphere) => Ok(sphere.try_split(plane).map_or_else(
            || vec![NONE.to_owned()],
            |(centre, radius)| {
                vec![
                    format!("centre {}", centre.format_with(config)),
                    format!("radius {}", format_scalar(radius, config)),
                ]
            },
        )),
        _ => Err(unsupported("split", a, b)),
    }
}
