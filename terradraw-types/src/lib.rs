//! Geospatial primitive types shared between the terradraw geometry kernel,
//! the feature store, and the mode implementations.
//!
//! Unlike a general-purpose geometry crate, every coordinate here is a WGS84
//! longitude/latitude pair stored as `f64`. There is no generic numeric type,
//! no Z/M dimension, and no spatial index: the drawing core only ever
//! operates on a human-editable number of 2D features, so the complexity
//! those features buy elsewhere isn't worth carrying here.

mod error;
mod feature;
mod geometry;

pub use error::TerraDrawError;
pub use feature::{Feature, FeatureId, Properties, MODE_PROPERTY, SELECTED_PROPERTY};
pub use geometry::{Coord, Geometry, LineString, MultiPolygon, Point, Polygon};
