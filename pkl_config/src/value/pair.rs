//! Pkl pairs.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A Pkl pair: two values of possibly different types.
///
/// Rendered by the evaluator as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pair<F, S> {
    /// First component.
    pub first: F,
    /// Second component.
    pub second: S,
}

impl<F, S> Pair<F, S> {
    /// Construct a pair from its components.
    #[must_use]
    pub const fn new(first: F, second: S) -> Self {
        Self { first, second }
    }
}

impl<F: fmt::Display, S: fmt::Display> fmt::Display for Pair<F, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pair({}, {})", self.first, self.second)
    }
}

impl<F, S> From<(F, S)> for Pair<F, S> {
    fn from((first, second): (F, S)) -> Self {
        Self { first, second }
    }
}

impl<F, S> From<Pair<F, S>> for (F, S) {
    fn from(pair: Pair<F, S>) -> Self {
        (pair.first, pair.second)
    }
}

impl<F: Serialize, S: Serialize> Serialize for Pair<F, S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        (&self.first, &self.second).serialize(serializer)
    }
}

impl<'de, F: Deserialize<'de>, S: Deserialize<'de>> Deserialize<'de> for Pair<F, S> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (first, second) = <(F, S)>::deserialize(deserializer)?;
        Ok(Self { first, second })
    }
}
