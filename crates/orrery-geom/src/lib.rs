// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::unreadable_literal,
    clippy::missing_const_for_fn,
    clippy::suboptimal_flops,
    clippy::redundant_pub_crate,
    clippy::many_single_char_names,
    clippy::module_name_repetitions,
    clippy::use_self
)]
#![doc = r"Planes, linear primitives and convex shapes built on `orrery-core`.

This crate provides:
- `Plane`: an oriented infinite plane with distance, projection, reflection
  and plane-plane queries.
- Linear primitives: `Line` (unbounded both ways), `Ray` (bounded at its
  start) and `BoundedRay` (a directed segment), sharing the `LineLike`
  trait.
- Convex shapes: `Sphere` and `Cuboid`, both centred on the origin, behind
  the `ConvexShape` trait.

Design notes:
- Every shape/primitive query is available from both sides: a call on the
  shape and its mirror on the primitive (`LineLike`, `Plane`, or
  `LocationShapeQueries` for points) return identical results.
- Undefined results are `Option`; each `Option`-returning query that has a
  cheaper unchecked form also offers a `fast_` variant that trusts its
  caller.
- Shapes are origin-centred; place them in a scene by transforming the
  query into the shape's local frame.
"]

/// Lines, rays and bounded segments.
pub mod line;
/// Oriented infinite planes.
pub mod plane;
/// Convex shapes and their queries against points, lines and planes.
pub mod shape;

pub use line::{BoundedRay, Line, LineLike, Ray, DEFAULT_LINE_THICKNESS};
pub use plane::{Plane, PlaneObjectRelationship};
pub use shape::{ConvexShape, ConvexShapeLineIntersection, Cuboid, LocationShapeQueries, Sphere};
