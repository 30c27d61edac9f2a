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
#![doc = r"Deterministic value types for 3D geometry.

This crate provides:
- Scalars: `Angle`, `Fraction`, `Real`.
- Vectors and points: `Direction` (always unit length), `Vect`, `Location`.
- Orientation: `Rotation` (unit quaternion) and the named
  cardinal/intercardinal/diagonal orientations.
- A shared text format (`TextFormat`, `FormatConfig`) and a little-endian
  byte codec (`ByteSerializable`).

Design notes:
- Float32 throughout; every trig call goes through `libm` so results match
  across platforms.
- Undefined results are `Option`/`Result`, never sentinel values: an
  undefined direction is `Option::<Direction>::None`.
- Random factories draw from a per-thread seeded generator
  (`random::reseed`) so sampled geometry is reproducible.
- Axis convention: `LEFT` = +X, `UP` = +Y, `FORWARD` = +Z (right-handed).
"]

/// Angles in radians with degree views, clamps and polar helpers.
pub mod angle;
/// Little-endian byte encoding shared by all value types.
pub mod codec;
/// Unit-length directions, clamps and random sampling.
pub mod direction;
/// Error types for parsing and argument validation.
pub mod error;
/// Locale-aware text formatting and parsing.
pub mod format;
/// Percentages and ratios.
pub mod fraction;
/// Points in space.
pub mod location;
/// Scalar helpers and the internal vector/quaternion kernels.
pub mod math;
/// Named axis-aligned and diagonal orientations.
pub mod orientation;
/// Per-thread deterministic random source.
pub mod random;
/// Plain scalar wrapper.
pub mod real;
/// Quaternion rotations.
pub mod rotation;
/// Displacement vectors.
pub mod vect;

pub use angle::Angle;
pub use codec::ByteSerializable;
pub use direction::Direction;
pub use error::{GeometryError, ParseError};
pub use format::{FormatConfig, TextFormat};
pub use fraction::Fraction;
pub use location::Location;
pub use orientation::{
    Axis, CardinalOrientation, DiagonalOrientation, IntercardinalOrientation, Orientation,
    PolarOrientation,
};
pub use real::Real;
pub use rotation::Rotation;
pub use vect::Vect;
