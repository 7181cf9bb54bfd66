use terradraw_types::Coord;

use super::haversine::haversine_distance_km;
use super::bearing::{bearing_degrees, destination};

/// The point halfway between `a` and `b` along the great circle, used to
/// place midpoint overlay features between a selected feature's vertices.
///
/// ```
/// use terradraw::geometry::midpoint_great_circle;
/// use terradraw_types::Coord;
///
/// let a = Coord::new(0.0, 0.0);
/// let b = Coord::new(0.0, 2.0);
/// let mid = midpoint_great_circle(a, b);
/// assert!((mid.lat - 1.0).abs() < 1e-6);
/// ```
pub fn midpoint_great_circle(a: Coord, b: Coord) -> Coord {
    let total_km = haversine_distance_km(a, b);
    if total_km == 0.0 {
        return a;
    }
    let bearing = bearing_degrees(a, b);
    destination(a, bearing, total_km / 2.0)
}
