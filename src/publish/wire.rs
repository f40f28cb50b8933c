//! Wire representation of data points.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Dimension, DimensionError, Point, Unit, UnitParseError};

/// A dimension as sent to the ingestion endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireDimension {
    pub name: String,
    pub value: String,
}

/// A data point as sent to the ingestion endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireDatum {
    pub metric_name: String,
    /// Unit tag, e.g. `Percent` or `Bytes/Second`.
    pub unit: String,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub dimensions: Vec<WireDimension>,
}

/// Returned when a wire datum does not describe a valid point.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    #[error(transparent)]
    Unit(#[from] UnitParseError),
    #[error(transparent)]
    Dimension(#[from] DimensionError),
}

impl From<&Point> for WireDatum {
    fn from(point: &Point) -> Self {
        Self {
            metric_name: point.name().to_string(),
            unit: point.unit().to_string(),
            value: point.value(),
            timestamp: point.timestamp(),
            dimensions: point
                .dimensions()
                .iter()
                .map(|d| WireDimension {
                    name: d.name().to_string(),
                    value: d.value().to_string(),
                })
                .collect(),
        }
    }
}

impl TryFrom<WireDatum> for Point {
    type Error = WireError;

    fn try_from(datum: WireDatum) -> Result<Self, Self::Error> {
        let unit = datum.unit.parse::<Unit>()?;
        let dimensions =
            Dimension::from_pairs(datum.dimensions.into_iter().map(|d| (d.name, d.value)))?;
        Ok(Point::at(datum.metric_name, datum.value, unit, datum.timestamp)
            .with_dimensions(&dimensions))
    }
}
