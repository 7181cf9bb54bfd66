//! Pure, stateless geometric operations on WGS84 coordinates.
//!
//! Every function here is a leaf: no store access, no mode state. This
//! mirrors how the upstream geometry-kernel crate this workspace descends
//! from keeps its algorithms (haversine distance, centroid, polygon
//! validation) as free functions/traits over plain coordinate types rather
//! than methods on a stateful object.

mod arc;
mod bbox;
mod bearing;
mod centroid;
mod circle;
mod haversine;
mod midpoint;
mod point_in_polygon;
mod segment_distance;
mod self_intersect;
mod simplify;

pub use arc::densify_great_circle_segment;
pub use bbox::{bbox, BBox};
pub use bearing::{bearing_degrees, destination};
pub use centroid::centroid;
pub use circle::circle_polygon;
pub use haversine::{haversine_distance_km, EARTH_RADIUS_KM};
pub use midpoint::midpoint_great_circle;
pub use point_in_polygon::point_in_polygon;
pub use segment_distance::{point_to_line_distance_px, PixelPoint};
pub use self_intersect::self_intersects;
pub use simplify::simplify_rdp;
