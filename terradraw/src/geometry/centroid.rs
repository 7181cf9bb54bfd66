use terradraw_types::Coord;

/// Centroid of a closed ring, computed as the area-weighted centroid of the
/// polygon it bounds (the shoelace-formula centroid), not the mean of its
/// vertices -- unevenly-spaced vertices would otherwise bias a simple
/// average toward whichever edge has more points on it.
///
/// Used as the anchor for select mode's resize-about-center and rotate
/// drag handlers.
pub fn centroid(ring: &[Coord]) -> Coord {
    if ring.len() < 2 {
        return ring.first().copied().unwrap_or(Coord::new(0.0, 0.0));
    }

    let mut area_acc = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;

    for w in ring.windows(2) {
        let (p0, p1) = (w[0], w[1]);
        let cross = p0.lng * p1.lat - p1.lng * p0.lat;
        area_acc += cross;
        cx += (p0.lng + p1.lng) * cross;
        cy += (p0.lat + p1.lat) * cross;
    }

    let area = area_acc / 2.0;
    if area.abs() < 1e-15 {
        // Degenerate (zero-area) ring: fall back to the vertex average.
        let n = (ring.len() - 1).max(1) as f64;
        let sum = ring[..ring.len() - 1]
            .iter()
            .fold(Coord::new(0.0, 0.0), |acc, c| {
                Coord::new(acc.lng + c.lng, acc.lat + c.lat)
            });
        return Coord::new(sum.lng / n, sum.lat / n);
    }

    Coord::new(cx / (6.0 * area), cy / (6.0 * area))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn centroid_of_unit_square_is_center() {
        let ring = vec![
            Coord::new(0.0, 0.0),
            Coord::new(0.0, 1.0),
            Coord::new(1.0, 1.0),
            Coord::new(1.0, 0.0),
            Coord::new(0.0, 0.0),
        ];
        let c = centroid(&ring);
        assert_relative_eq!(c.lng, 0.5, epsilon = 1e-9);
        assert_relative_eq!(c.lat, 0.5, epsilon = 1e-9);
    }
}
