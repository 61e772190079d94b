//! Error types.
//!
//! Kept as a plain enum implementing [`std::error::Error`] by hand rather
//! than pulling in an error-derive dependency this crate has no other use
//! for.

use std::error::Error as StdError;
use std::fmt;

/// Fatal errors reported to the caller. "No path found" is not one of
/// these: it is a normal, successful result with infinite cost and an
/// empty path.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Data/mesh-map/connectivity shapes don't agree, or a settings value
    /// is out of its valid range (e.g. a non-positive voxel dimension).
    ShapeMismatch { what: &'static str, detail: String },
    /// The problem-type string passed to the dispatcher isn't recognized.
    UnknownProblemType(String),
    /// `curve_info` was asked to evaluate an empty path.
    PathTooShort { what: &'static str, detail: String },
    /// An internal invariant was violated; indicates a bug rather than bad
    /// input.
    InvariantViolation(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ShapeMismatch { what, detail } => {
                write!(f, "shape mismatch in {what}: {detail}")
            }
            Error::UnknownProblemType(s) => write!(f, "unknown problem type: {s}"),
            Error::PathTooShort { what, detail } => {
                write!(f, "path too short for {what}: {detail}")
            }
            Error::InvariantViolation(msg) => write!(f, "internal invariant violation: {msg}"),
        }
    }
}

impl StdError for Error {}
