#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Coord;

/// A single WGS84 coordinate, treated as its own geometry.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point(pub Coord);

impl Point {
    pub fn new(lng: f64, lat: f64) -> Self {
        Point(Coord::new(lng, lat))
    }

    pub fn lng(&self) -> f64 {
        self.0.lng
    }

    pub fn lat(&self) -> f64 {
        self.0.lat
    }

    pub fn coord(&self) -> Coord {
        self.0
    }
}

impl From<Coord> for Point {
    fn from(c: Coord) -> Self {
        Point(c)
    }
}

impl From<(f64, f64)> for Point {
    fn from(pair: (f64, f64)) -> Self {
        Point(pair.into())
    }
}
