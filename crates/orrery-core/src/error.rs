// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error types shared by every orrery crate.
//!
//! Geometric degeneracy (parallel inputs, missed intersections) is never an
//! error; those cases surface as `Option::None`. The variants here cover
//! out-of-domain parameters, malformed text and truncated byte buffers.

use thiserror::Error;

/// Failure to parse a value from its canonical text form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An expected bracket, keyword or separator was absent.
    #[error("expected `{expected}`")]
    MissingDelimiter {
        /// The delimiter that was looked for.
        expected: String,
    },
    /// A component could not be read as a number.
    #[error("invalid number `{input}`")]
    InvalidNumber {
        /// The offending text.
        input: String,
    },
    /// Text remained after a complete value was read.
    #[error("unexpected trailing input `{remainder}`")]
    TrailingInput {
        /// Whatever followed the value.
        remainder: String,
    },
    /// A vector or field list had the wrong number of entries.
    #[error("expected {expected} components, found {actual}")]
    WrongComponentCount {
        /// Number of components required.
        expected: usize,
        /// Number of components present.
        actual: usize,
    },
}

/// Errors reported by orrery value constructors and codecs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A numeric argument fell outside its domain.
    #[error("{what} out of range: {value} is not within [{min}, {max}]")]
    OutOfRange {
        /// Name of the argument.
        what: &'static str,
        /// Value supplied by the caller.
        value: f32,
        /// Inclusive lower bound.
        min: f32,
        /// Inclusive upper bound.
        max: f32,
    },
    /// An argument was structurally unusable (degenerate, empty, non-unit).
    #[error("invalid {what}: {reason}")]
    InvalidArgument {
        /// Name of the argument.
        what: &'static str,
        /// Why it was rejected.
        reason: &'static str,
    },
    /// Text did not describe a value.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    /// A byte buffer ended before a whole value could be read.
    #[error("buffer too short: needed {needed} bytes, found {actual}")]
    BufferTooShort {
        /// Bytes required by the value's fixed layout.
        needed: usize,
        /// Bytes remaining in the buffer.
        actual: usize,
    },
}
