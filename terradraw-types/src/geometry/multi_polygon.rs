#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::TerraDrawError;

use super::Polygon;

/// A collection of polygons, used only as the output of modes that can
/// legitimately produce disjoint shapes (none of the current draw modes do,
/// but the select mode's boolean-combination helpers and future modes may).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MultiPolygon(pub Vec<Polygon>);

impl MultiPolygon {
    pub fn new(polygons: Vec<Polygon>) -> Self {
        MultiPolygon(polygons)
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.0
    }

    pub fn validate(&self) -> Result<(), TerraDrawError> {
        self.0.iter().try_for_each(Polygon::validate)
    }
}
