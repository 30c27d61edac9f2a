// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Command-line operands in the canonical text format.

use std::str::FromStr;

use anyhow::{bail, Context, Result};
use orrery_core::Location;
use orrery_geom::{BoundedRay, Cuboid, Line, Plane, Ray, Sphere};

/// Any value a subcommand accepts, recognised by its type prefix
/// (`Sphere[..]`, `Ray[..]`, ...) or, for a location, by `<`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Operand {
    Location(Location),
    Plane(Plane),
    Line(Line),
    Ray(Ray),
    BoundedRay(BoundedRay),
    Sphere(Sphere),
    Cuboid(Cuboid),
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum ShapeOperand {
    Sphere(Sphere),
    Cuboid(Cuboid),
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum LineOperand {
    Line(Line),
    Ray(Ray),
    BoundedRay(BoundedRay),
}

impl Operand {
    pub(crate) const fn kind(self) -> &'static str {
        match self {
            Self::Location(_) => "location",
            Self::Plane(_) => "plane",
            Self::Line(_) => "line",
            Self::Ray(_) => "ray",
            Self::BoundedRay(_) => "bounded ray",
            Self::Sphere(_) => "sphere",
            Self::Cuboid(_) => "cuboid",
        }
    }

    pub(crate) const fn as_shape(self) -> Option<ShapeOperand> {
        match self {
            Self::Sphere(sphere) => Some(ShapeOperand::Sphere(sphere)),
            Self::Cuboid(cuboid) => Some(ShapeOperand::Cuboid(cuboid)),
            _ => None,
        }
    }

    pub(crate) const fn as_line(self) -> Option<LineOperand> {
        match self {
            Self::Line(line) => Some(LineOperand::Line(line)),
            Self::Ray(ray) => Some(LineOperand::Ray(ray)),
            Self::BoundedRay(segment) => Some(LineOperand::BoundedRay(segment)),
            _ => None,
        }
    }
}

impl FromStr for Operand {
    type Err = anyhow::Error;

    fn from_str(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.starts_with('<') {
            let location = text
                .parse()
                .with_context(|| format!("parsing location `{text}`"))?;
            return Ok(Self::Location(location));
        }
        let prefix = text.split('[').next().unwrap_or_default().trim();
        let context = || format!("parsing {prefix} `{text}`");
        let operand = match prefix {
            "Plane" => Self::Plane(text.parse().with_context(context)?),
            "Line" => Self::Line(text.parse().with_context(context)?),
            "Ray" => Self::Ray(text.parse().with_context(context)?),
            "BoundedRay" => Self::BoundedRay(text.parse().with_context(context)?),
            "Sphere" => Self::Sphere(text.parse().with_context(context)?),
            "Cuboid" => Self::Cuboid(text.parse().with_context(context)?),
            _ => bail!("unrecognised operand `{text}`; expected <x, y, z> or a Plane, Line, Ray, BoundedRay, Sphere or Cuboid"),
        };
        Ok(operand)
    }
}

/// Runs `$body` with `$s` bound to the concrete shape.
macro_rules! with_shape {
    ($shape:expr, |$s:ident| $body:expr) => {
        match $shape {
            $crate::operand::ShapeOperand::Sphere($s) => $body,
            $crate::operand::ShapeOperand::Cuboid($s) => $body,
        }
    };
}

/// Runs `$body` with `$l` bound to the concrete linear primitive.
macro_rules! with_line {
    ($line:expr, |$l:ident| $body:expr) => {
        match $line {
            $crate::operand::LineOperand::Line($l) => $body,
            $crate::operand::LineOperand::Ray($l) => $body,
            $crate::operand::LineOperand::BoundedRay($l) => $body,
        }
    };
}

pub(crate) use {with_line, with_shape};

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn recognises_every_prefix() {
        let cases = [
            ("<1, 2, 3>", "location"),
            ("Plane[Normal <0, 1, 0> | PointClosestToOrigin <0, 2, 0>]", "plane"),
            ("Line[PointOnLine <0, 0, 0> | Direction <1, 0, 0>]", "line"),
            ("Ray[StartPoint <0, 0, 0> | Direction <1, 0, 0>]", "ray"),
            ("BoundedRay[StartPoint <0, 0, 0> | EndPoint <1, 0, 0>]", "bounded ray"),
            ("Sphere[Radius 2]", "sphere"),
            ("Cuboid[Width 1 | Height 2 | Depth 3]", "cuboid"),
        ];
        for (text, kind) in cases {
            assert_eq!(text.parse::<Operand>().unwrap().kind(), kind, "{text}");
        }
    }

    #[test]
    fn rejects_unknown_and_malformed_operands() {
        assert!("Torus[Radius 1]".parse::<Operand>().is_err());
        let err = "Sphere[Radius x]".parse::<Operand>().unwrap_err();
        assert!(format!("{err:#}").contains("parsing Sphere"));
    }

    #[test]
    fn splits_into_categories() {
        let sphere: Operand = "Sphere[Radius 2]".parse().unwrap();
        assert!(sphere.as_shape().is_some());
        assert!(sphere.as_line().is_none());
        let ray: Operand = "Ray[StartPoint <0, 0, 0> | Direction <1, 0, 0>]".parse().unwrap();
        assert!(matches!(ray.as_line(), Some(LineOperand::Ray(_))));
    }
}
