//! Pkl data-size quantities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::LiteralParseError;

/// Units a Pkl data size can be expressed in: decimal (powers of 1000) and
/// binary (powers of 1024).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataSizeUnit {
    /// Bytes (`b`).
    Bytes,
    /// Kilobytes (`kb`, 10^3 bytes).
    Kilobytes,
    /// Megabytes (`mb`, 10^6 bytes).
    Megabytes,
    /// Gigabytes (`gb`, 10^9 bytes).
    Gigabytes,
    /// Terabytes (`tb`, 10^12 bytes).
    Terabytes,
    /// Petabytes (`pb`, 10^15 bytes).
    Petabytes,
    /// Kibibytes (`kib`, 2^10 bytes).
    Kibibytes,
    /// Mebibytes (`mib`, 2^20 bytes).
    Mebibytes,
    /// Gibibytes (`gib`, 2^30 bytes).
    Gibibytes,
    /// Tebibytes (`tib`, 2^40 bytes).
    Tebibytes,
    /// Pebibytes (`pib`, 2^50 bytes).
    Pebibytes,
}

impl DataSizeUnit {
    /// The unit's literal symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Bytes => "b",
            Self::Kilobytes => "kb",
            Self::Megabytes => "mb",
            Self::Gigabytes => "gb",
            Self::Terabytes => "tb",
            Self::Petabytes => "pb",
            Self::Kibibytes => "kib",
            Self::Mebibytes => "mib",
            Self::Gibibytes => "gib",
            Self::Tebibytes => "tib",
            Self::Pebibytes => "pib",
        }
    }

    /// Size of one unit in bytes.
    #[must_use]
    pub const fn bytes(self) -> f64 {
        match self {
            Self::Bytes => 1.0,
            Self::Kilobytes => 1e3,
            Self::Megabytes => 1e6,
            Self::Gigabytes => 1e9,
            Self::Terabytes => 1e12,
            Self::Petabytes => 1e15,
            Self::Kibibytes => 1_024.0,
            Self::Mebibytes => 1_048_576.0,
            Self::Gibibytes => 1_073_741_824.0,
            Self::Tebibytes => 1_099_511_627_776.0,
            Self::Pebibytes => 1_125_899_906_842_624.0,
        }
    }
}

impl FromStr for DataSizeUnit {
    type Err = LiteralParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "b" => Ok(Self::Bytes),
            "kb" => Ok(Self::Kilobytes),
            "mb" => Ok(Self::Megabytes),
            "gb" => Ok(Self::Gigabytes),
            "tb" => Ok(Self::Terabytes),
            "pb" => Ok(Self::Petabytes),
            "kib" => Ok(Self::Kibibytes),
            "mib" => Ok(Self::Mebibytes),
            "gib" => Ok(Self::Gibibytes),
            "tib" => Ok(Self::Tebibytes),
            "pib" => Ok(Self::Pebibytes),
            other => Err(LiteralParseError::UnknownUnit(other.to_owned())),
        }
    }
}

impl fmt::Display for DataSizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A Pkl data size: a numeric magnitude paired with a byte unit.
///
/// Rendered and parsed in the language's literal form, for example
/// `1.23.gib` or `512.kb`. The unit is preserved, so sizes spanning the
/// same byte count but carrying different units compare unequal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataSize {
    /// Numeric magnitude.
    pub value: f64,
    /// Unit the magnitude is expressed in.
    pub unit: DataSizeUnit,
}

impl DataSize {
    /// Construct a data size from a magnitude and unit.
    #[must_use]
    pub const fn new(value: f64, unit: DataSizeUnit) -> Self {
        Self { value, unit }
    }

    /// The size in bytes.
    #[must_use]
    pub fn total_bytes(&self) -> f64 {
        self.value * self.unit.bytes()
    }
}

impl fmt::Display for DataSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.value, self.unit)
    }
}

impl FromStr for DataSize {
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

impl Serialize for DataSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DataSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let literal = String::deserialize(deserializer)?;
        literal.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{DataSize, DataSizeUnit};
    use crate::value::LiteralParseError;

    #[rstest]
    #[case::binary("1.23.gib", DataSize::new(1.23, DataSizeUnit::Gibibytes))]
    #[case::decimal("512.kb", DataSize::new(512.0, DataSizeUnit::Kilobytes))]
    #[case::bytes("100.b", DataSize::new(100.0, DataSizeUnit::Bytes))]
    fn parses_literals(#[case] literal: &str, #[case] expected: DataSize) {
        assert_eq!(literal.parse::<DataSize>(), Ok(expected));
        assert_eq!(expected.to_string(), literal);
    }

    #[rstest]
    #[case::bad_unit("4.qb", LiteralParseError::UnknownUnit("qb".to_owned()))]
    #[case::bare_number("1024", LiteralParseError::MissingUnit("1024".to_owned()))]
    fn rejects_malformed_literals(#[case] literal: &str, #[case] expected: LiteralParseError) {
        assert_eq!(literal.parse::<DataSize>(), Err(expected));
    }

    #[rstest]
    #[case::kibibyte(DataSize::new(1.0, DataSizeUnit::Kibibytes), 1024.0)]
    #[case::kilobyte(DataSize::new(2.0, DataSizeUnit::Kilobytes), 2000.0)]
    #[case::fractional(DataSize::new(0.5, DataSizeUnit::Mebibytes), 524_288.0)]
    fn totals_bytes(#[case] size: DataSize, #[case] expected: f64) {
        let delta = (size.total_bytes() - expected).abs();
        assert!(delta < f64::EPSILON, "got {}", size.total_bytes());
    }

    #[rstest]
    fn equality_preserves_units() {
        assert_ne!(
            DataSize::new(1.0, DataSizeUnit::Kibibytes),
            DataSize::new(1024.0, DataSizeUnit::Bytes),
        );
    }
}
