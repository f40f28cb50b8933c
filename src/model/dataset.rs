//! Ordered collection of points produced by one cycle.

use super::point::{Dimension, Point};

/// Points in collection order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSet {
    points: Vec<Point>,
}

impl DataSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Appends every point of `other`, keeping its order.
    pub fn append(&mut self, other: DataSet) {
        self.points.extend(other.points);
    }

    /// Appends `dimensions` to every point in place.
    pub fn add_dimensions(&mut self, dimensions: &[Dimension]) {
        for point in &mut self.points {
            point.add_dimensions(dimensions);
        }
    }

    /// Splits the points into consecutive batches of at most `batch_size`.
    ///
    /// Only the last batch may be shorter. A `batch_size` of zero is treated as one.
    pub fn batches(&self, batch_size: usize) -> impl Iterator<Item = &[Point]> {
        self.points.chunks(batch_size.max(1))
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl From<Vec<Point>> for DataSet {
    fn from(points: Vec<Point>) -> Self {
        Self { points }
    }
}

impl FromIterator<Point> for DataSet {
    fn from_iter<T: IntoIterator<Item = Point>>(iter: T) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for DataSet {
    type Item = Point;
    type IntoIter = std::vec::IntoIter<Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}
