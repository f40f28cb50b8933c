//! Units attached to sampled values.

use std::fmt;
use std::str::FromStr;

/// Unit of a reported data point.
///
/// The string tag of each variant is what the ingestion endpoint expects,
/// so it must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Unit {
    Seconds,
    Microseconds,
    Milliseconds,
    Bytes,
    Kilobytes,
    Megabytes,
    Gigabytes,
    Terabytes,
    Bits,
    Kilobits,
    Megabits,
    Gigabits,
    Terabits,
    Percent,
    Count,
    BytesSecond,
    KilobytesSecond,
    MegabytesSecond,
    GigabytesSecond,
    TerabytesSecond,
    BitsSecond,
    KilobitsSecond,
    MegabitsSecond,
    GigabitsSecond,
    TerabitsSecond,
    CountSecond,
    #[default]
    None,
}

impl Unit {
    /// Every unit, in declaration order.
    pub const ALL: [Unit; 27] = [
        Unit::Seconds,
        Unit::Microseconds,
        Unit::Milliseconds,
        Unit::Bytes,
        Unit::Kilobytes,
        Unit::Megabytes,
        Unit::Gigabytes,
        Unit::Terabytes,
        Unit::Bits,
        Unit::Kilobits,
        Unit::Megabits,
        Unit::Gigabits,
        Unit::Terabits,
        Unit::Percent,
        Unit::Count,
        Unit::BytesSecond,
        Unit::KilobytesSecond,
        Unit::MegabytesSecond,
        Unit::GigabytesSecond,
        Unit::TerabytesSecond,
        Unit::BitsSecond,
        Unit::KilobitsSecond,
        Unit::MegabitsSecond,
        Unit::GigabitsSecond,
        Unit::TerabitsSecond,
        Unit::CountSecond,
        Unit::None,
    ];

    /// Returns the wire tag for this unit.
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Seconds => "Seconds",
            Unit::Microseconds => "Microseconds",
            Unit::Milliseconds => "Milliseconds",
            Unit::Bytes => "Bytes",
            Unit::Kilobytes => "Kilobytes",
            Unit::Megabytes => "Megabytes",
            Unit::Gigabytes => "Gigabytes",
            Unit::Terabytes => "Terabytes",
            Unit::Bits => "Bits",
            Unit::Kilobits => "Kilobits",
            Unit::Megabits => "Megabits",
            Unit::Gigabits => "Gigabits",
            Unit::Terabits => "Terabits",
            Unit::Percent => "Percent",
            Unit::Count => "Count",
            Unit::BytesSecond => "Bytes/Second",
            Unit::KilobytesSecond => "Kilobytes/Second",
            Unit::MegabytesSecond => "Megabytes/Second",
            Unit::GigabytesSecond => "Gigabytes/Second",
            Unit::TerabytesSecond => "Terabytes/Second",
            Unit::BitsSecond => "Bits/Second",
            Unit::KilobitsSecond => "Kilobits/Second",
            Unit::MegabitsSecond => "Megabits/Second",
            Unit::GigabitsSecond => "Gigabits/Second",
            Unit::TerabitsSecond => "Terabits/Second",
            Unit::CountSecond => "Count/Second",
            Unit::None => "None",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not a known unit tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown unit: {0}")]
pub struct UnitParseError(pub String);

impl FromStr for Unit {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unit::ALL
            .iter()
            .copied()
            .find(|unit| unit.as_str() == s)
            .ok_or_else(|| UnitParseError(s.to_string()))
    }
}
