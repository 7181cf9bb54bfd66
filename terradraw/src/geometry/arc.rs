use terradraw_types::Coord;

use super::haversine::haversine_distance_km;
use super::midpoint::midpoint_great_circle;

/// Densifies the straight lng/lat segment `a`-`b` into a sequence of
/// great-circle arc points, used by great-circle mode so a committed
/// segment follows the sphere rather than the equirectangular plane.
///
/// Recursively bisects the segment with [`midpoint_great_circle`] while the
/// chord (the straight equirectangular line between the two endpoints of a
/// sub-segment) deviates from the great-circle midpoint by more than
/// `tolerance_km`, up to `max_depth` bisections per sub-segment. Returns the
/// arc points strictly between `a` and `b`, in order; callers splice these
/// between the two endpoints themselves.
pub fn densify_great_circle_segment(
    a: Coord,
    b: Coord,
    tolerance_km: f64,
    max_depth: u32,
) -> Vec<Coord> {
    let mut points = Vec::new();
    bisect(a, b, tolerance_km, max_depth, &mut points);
    points
}

fn bisect(a: Coord, b: Coord, tolerance_km: f64, depth: u32, out: &mut Vec<Coord>) {
    if depth == 0 {
        return;
    }

    let gc_mid = midpoint_great_circle(a, b);
    let chord_mid = Coord::new((a.lng + b.lng) / 2.0, (a.lat + b.lat) / 2.0);
    let deviation_km = haversine_distance_km(gc_mid, chord_mid);

    if deviation_km <= tolerance_km {
        return;
    }

    bisect(a, gc_mid, tolerance_km, depth - 1, out);
    out.push(gc_mid);
    bisect(gc_mid, b, tolerance_km, depth - 1, out);
}
