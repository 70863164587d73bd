use crate::domain::Coordinate;

/// An ordered sequence of coordinates. The last element is, by convention,
/// the asset's current position. Tracks live for a single request/response
/// cycle and are never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    coordinates: Vec<Coordinate>,
}

impl Track {
    pub fn new(coordinates: Vec<Coordinate>) -> Self {
        Track { coordinates }
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    pub fn current_position(&self) -> Option<&Coordinate> {
        self.coordinates.last()
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }
}

impl From<Vec<Coordinate>> for Track {
    fn from(coordinates: Vec<Coordinate>) -> Self {
        Track::new(coordinates)
    }
}
