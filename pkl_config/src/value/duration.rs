//! Pkl duration quantities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use super::LiteralParseError;

/// Units a Pkl duration can be expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationUnit {
    /// Nanoseconds (`ns`).
    Nanoseconds,
    /// Microseconds (`us`).
    Microseconds,
    /// Milliseconds (`ms`).
    Milliseconds,
    /// Seconds (`s`).
    Seconds,
    /// Minutes (`min`).
    Minutes,
    /// Hours (`h`).
    Hours,
    /// Days (`d`).
    Days,
}

impl DurationUnit {
    /// The unit's literal symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Nanoseconds => "ns",
            Self::Microseconds => "us",
            Self::Milliseconds => "ms",
            Self::Seconds => "s",
            Self::Minutes => "min",
            Self::Hours => "h",
            Self::Days => "d",
        }
    }

    /// Length of one unit in seconds.
    #[must_use]
    pub const fn seconds(self) -> f64 {
        match self {
            Self::Nanoseconds => 1e-9,
            Self::Microseconds => 1e-6,
            Self::Milliseconds => 1e-3,
            Self::Seconds => 1.0,
            Self::Minutes => 60.0,
            Self::Hours => 3600.0,
            Self::Days => 86_400.0,
        }
    }
}

impl FromStr for DurationUnit {
    type Err = LiteralParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ns" => Ok(Self::Nanoseconds),
            "us" => Ok(Self::Microseconds),
            "ms" => Ok(Self::Milliseconds),
            "s" => Ok(Self::Seconds),
            "min" => Ok(Self::Minutes),
            "h" => Ok(Self::Hours),
            "d" => Ok(Self::Days),
            other => Err(LiteralParseError::UnknownUnit(other.to_owned())),
        }
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A Pkl duration: a numeric magnitude paired with a time unit.
///
/// Rendered and parsed in the language's literal form, for example `3.h` or
/// `250.ms`. The unit is preserved, so durations spanning the same time but
/// carrying different units compare unequal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Duration {
    /// Numeric magnitude.
    pub value: f64,
    /// Unit the magnitude is expressed in.
    pub unit: DurationUnit,
}

impl Duration {
    /// Construct a duration from a magnitude and unit.
    #[must_use]
    pub const fn new(value: f64, unit: DurationUnit) -> Self {
        Self { value, unit }
    }

    /// The spanned time in seconds.
    #[must_use]
    pub fn total_seconds(&self) -> f64 {
        self.value * self.unit.seconds()
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.value, self.unit)
    }
}

impl FromStr for Duration {
    type Err = LiteralParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (value, unit) = s
            .rsplit_once('.')
            .ok_or_else(|| LiteralParseError::MissingUnit(s.to_owned()))?;
        let value = value
            .parse::<f64>()
            .map_err(|_| LiteralParseError::InvalidValue(value.to_owned()))?;
        let unit = unit.parse()?;
        Ok(Self { value, unit })
    }
}

impl Serialize for Duration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let literal = String::deserialize(deserializer)?;
        literal.parse().map_err(serde::de::Error::custom)
    }
}

/// Error converting a [`Duration`] that [`std::time::Duration`] cannot
/// represent (negative, non-finite, or overflowing).
#[derive(Debug, Error, PartialEq)]
#[error("duration '{0}' cannot be represented as std::time::Duration")]
pub struct DurationRangeError(Duration);

impl TryFrom<Duration> for std::time::Duration {
    type Error = DurationRangeError;

    fn try_from(duration: Duration) -> Result<Self, Self::Error> {
        Self::try_from_secs_f64(duration.total_seconds()).map_err(|_| DurationRangeError(duration))
    }
}
