//! Dimensions and data points.

use chrono::{DateTime, Utc};

use super::unit::Unit;

/// Returned when a dimension name is blank.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("dimension name cannot be blank")]
pub struct DimensionError;

/// A named tag attached to a point.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dimension {
    name: String,
    value: String,
}

impl Dimension {
    /// Creates a dimension, trimming the name.
    ///
    /// Fails if the name is empty or whitespace only. The value may be empty.
    pub fn new(name: &str, value: impl Into<String>) -> Result<Self, DimensionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DimensionError);
        }

        Ok(Self {
            name: name.to_string(),
            value: value.into(),
        })
    }

    /// Builds dimensions from `(name, value)` pairs, keeping their order.
    ///
    /// Stops at the first blank name.
    pub fn from_pairs<I, N, V>(pairs: I) -> Result<Vec<Self>, DimensionError>
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .map(|(name, value)| Self::new(name.as_ref(), value))
            .collect()
    }

    /// Dimension with a name known at compile time.
    pub(crate) fn fixed(name: &'static str, value: impl Into<String>) -> Self {
        debug_assert!(!name.trim().is_empty());
        Self {
            name: name.to_string(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// One sampled value.
///
/// The timestamp is fixed at construction. Dimensions can only be appended.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    name: String,
    value: f64,
    unit: Unit,
    timestamp: DateTime<Utc>,
    dimensions: Vec<Dimension>,
}

impl Point {
    /// Creates a point stamped with the current UTC time.
    pub fn new(name: impl Into<String>, value: f64, unit: Unit) -> Self {
        Self::at(name, value, unit, Utc::now())
    }

    /// Creates a point with an explicit timestamp.
    pub fn at(name: impl Into<String>, value: f64, unit: Unit, timestamp: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            value,
            unit,
            timestamp,
            dimensions: Vec::new(),
        }
    }

    /// Builder-style variant of [`Point::add_dimensions`].
    pub fn with_dimensions(mut self, dimensions: &[Dimension]) -> Self {
        self.add_dimensions(dimensions);
        self
    }

    /// Appends dimensions after the existing ones.
    pub fn add_dimensions(&mut self, dimensions: &[Dimension]) {
        self.dimensions.extend_from_slice(dimensions);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }
}
