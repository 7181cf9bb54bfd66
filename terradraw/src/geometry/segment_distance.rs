use terradraw_types::Coord;

/// A pixel-space point, as returned by an adapter's `project` function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

/// Perpendicular pixel distance from `p` to the segment `a`-`b`, all
/// projected through `project`. Used for hit-testing line strings and
/// polygon edges, and for detecting a click on a selection-point/midpoint
/// overlay (as a degenerate zero-length segment).
pub fn point_to_line_distance_px(
    p: Coord,
    a: Coord,
    b: Coord,
    project: impl Fn(Coord) -> PixelPoint,
) -> f64 {
    let p = project(p);
    let a = project(a);
    let b = project(b);

    let ab_x = b.x - a.x;
    let ab_y = b.y - a.y;
    let len_sq = ab_x * ab_x + ab_y * ab_y;

    if len_sq == 0.0 {
        return ((p.x - a.x).powi(2) + (p.y - a.y).powi(2)).sqrt();
    }

    let ap_x = p.x - a.x;
    let ap_y = p.y - a.y;
    let t = ((ap_x * ab_x + ap_y * ab_y) / len_sq).clamp(0.0, 1.0);

    let closest_x = a.x + t * ab_x;
    let closest_y = a.y + t * ab_y;
    ((p.x - closest_x).powi(2) + (p.y - closest_y).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(c: Coord) -> PixelPoint {
        PixelPoint { x: c.lng, y: c.lat }
    }

    #[test]
    fn distance_to_degenerate_segment_is_point_distance() {
        let p = Coord::new(3.0, 4.0);
        let a = Coord::new(0.0, 0.0);
        let d = point_to_line_distance_px(p, a, a, identity);
        assert_eq!(d, 5.0);
    }

    #[test]
    fn distance_to_horizontal_segment() {
        let p = Coord::new(5.0, 3.0);
        let a = Coord::new(0.0, 0.0);
        let b = Coord::new(10.0, 0.0);
        let d = point_to_line_distance_px(p, a, b, identity);
        assert_eq!(d, 3.0);
    }
}
