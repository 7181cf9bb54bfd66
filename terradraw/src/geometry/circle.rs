use terradraw_types::Coord;

use super::bearing::destination;

/// Approximates a geodesic circle of `radius_km` about `center` as a closed
/// polygon ring with `steps` vertices (plus the closing coordinate).
/// Used by circle mode to keep a draft circle as an ordinary, storeable
/// polygon rather than inventing a dedicated circle geometry type.
pub fn circle_polygon(center: Coord, radius_km: f64, steps: usize) -> Vec<Coord> {
    let steps = steps.max(3);
    let mut ring = Vec::with_capacity(steps + 1);
    for i in 0..steps {
        let bearing = 360.0 * (i as f64) / (steps as f64);
        ring.push(destination(center, bearing, radius_km));
    }
    ring.push(ring[0]);
    ring
}
