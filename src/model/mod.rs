//! Data model for sampled values.
//!
//! A [`Point`] is one named, timestamped, unit-tagged value with an ordered
//! list of [`Dimension`]s. Points produced by one collection cycle are held
//! in a [`DataSet`] until they are published.

mod dataset;
mod point;
mod unit;

pub use dataset::DataSet;
pub use point::{Dimension, DimensionError, Point};
pub use unit::{Unit, UnitParseError};
