#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::TerraDrawError;

use super::Coord;

/// An ordered sequence of coordinates, open (not required to close).
///
/// A valid `LineString` has at least two coordinates and no two consecutive
/// duplicates; [`LineString::validate`] checks both.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineString(pub Vec<Coord>);

impl LineString {
    pub fn new(coords: Vec<Coord>) -> Self {
        LineString(coords)
    }

    pub fn coords(&self) -> &[Coord] {
        &self.0
    }

    pub fn coords_mut(&mut self) -> &mut Vec<Coord> {
        &mut self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pairs of adjacent coordinates, i.e. the line's segments.
    pub fn segments(&self) -> impl Iterator<Item = (Coord, Coord)> + '_ {
        self.0.windows(2).map(|w| (w[0], w[1]))
    }

    pub fn validate(&self) -> Result<(), TerraDrawError> {
        if self.0.len() < 2 {
            return Err(TerraDrawError::DegenerateRing(self.0.len()));
        }
        for (a, b) in self.segments() {
            if a == b {
                return Err(TerraDrawError::InvalidGeometry(
                    "line string has consecutive duplicate coordinates".into(),
                ));
            }
        }
        Ok(())
    }
}

impl From<Vec<Coord>> for LineString {
    fn from(coords: Vec<Coord>) -> Self {
        LineString(coords)
    }
}
