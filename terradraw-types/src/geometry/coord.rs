use approx::{AbsDiffEq, RelativeEq};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::TerraDrawError;

/// A WGS84 longitude/latitude pair.
///
/// `Coord` only contains ordinate values; it carries no geometric semantics
/// of its own (that belongs to [`Point`](crate::Point), [`LineString`](crate::LineString),
/// and the other geometry types that are built out of coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coord {
    pub lng: f64,
    pub lat: f64,
}

impl Coord {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Returns an error if `lng`/`lat` fall outside the WGS84 domain.
    pub fn validate(self) -> Result<Self, TerraDrawError> {
        if !(-180.0..=180.0).contains(&self.lng) || !(-90.0..=90.0).contains(&self.lat) {
            return Err(TerraDrawError::InvalidCoordinate {
                lng: self.lng,
                lat: self.lat,
            });
        }
        Ok(self)
    }

    /// Clamps both ordinates into the valid WGS84 range. Used by drag
    /// handlers that translate or rotate a feature, where an intermediate
    /// step could otherwise briefly wander outside the domain.
    pub fn clamped(self) -> Self {
        Self {
            lng: self.lng.clamp(-180.0, 180.0),
            lat: self.lat.clamp(-90.0, 90.0),
        }
    }
}

impl From<(f64, f64)> for Coord {
    fn from((lng, lat): (f64, f64)) -> Self {
        Coord::new(lng, lat)
    }
}

impl From<Coord> for (f64, f64) {
    fn from(c: Coord) -> Self {
        (c.lng, c.lat)
    }
}

impl AbsDiffEq for Coord {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        f64::abs_diff_eq(&self.lng, &other.lng, epsilon)
            && f64::abs_diff_eq(&self.lat, &other.lat, epsilon)
    }
}

impl RelativeEq for Coord {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        f64::relative_eq(&self.lng, &other.lng, epsilon, max_relative)
            && f64::relative_eq(&self.lat, &other.lat, epsilon, max_relative)
    }
}
