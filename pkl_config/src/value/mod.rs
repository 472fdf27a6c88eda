//! Rust counterparts of Pkl's non-JSON scalar values.
//!
//! The evaluator renders quantity types in Pkl literal form: a duration as
//! `"3.h"`, a data size as `"1.23.gib"`, and a pair as a two-element array.
//! The types here parse and serialise those forms so generated and
//! handwritten structs can carry them as ordinary fields.
//!
//! Equality is structural: `3.h` and `180.min` denote the same span but
//! compare unequal, matching the source language's value semantics.

mod data_size;
mod duration;
mod pair;
pub(crate) mod tree;

pub use data_size::{DataSize, DataSizeUnit};
pub use duration::{Duration, DurationRangeError, DurationUnit};
pub use pair::Pair;

use thiserror::Error;

/// Errors produced when parsing a Pkl quantity literal.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum LiteralParseError {
    /// The literal lacks the `<value>.<unit>` shape.
    #[error("expected '<value>.<unit>', got '{0}'")]
    MissingUnit(String),

    /// The value portion is not a number.
    #[error("invalid numeric value '{0}'")]
    InvalidValue(String),

    /// The unit portion names no known unit.
    #[error("unknown unit '{0}'")]
    UnknownUnit(String),
}
