use terradraw_types::Coord;

/// Returns `true` if any two non-adjacent segments of `ring` strictly cross.
/// Adjacent segments sharing an endpoint are never considered crossing --
/// that's what makes a ring a ring.
///
/// `O(n^2)` in the ring's vertex count, which is acceptable at the scale
/// this crate targets (interactively drawn polygons, not bulk GIS data).
pub fn self_intersects(ring: &[Coord]) -> bool {
    let n = ring.len();
    if n < 4 {
        return false;
    }
    // last coordinate repeats the first; iterate n-1 distinct segments
    let segment_count = n - 1;
    for i in 0..segment_count {
        let (a1, a2) = (ring[i], ring[i + 1]);
        for j in (i + 1)..segment_count {
            if j == i {
                continue;
            }
            let adjacent = j == i + 1 || (i == 0 && j == segment_count - 1);
            if adjacent {
                continue;
            }
            let (b1, b2) = (ring[j], ring[j + 1]);
            if segments_cross(a1, a2, b1, b2) {
                return true;
            }
        }
    }
    false
}

fn orientation(a: Coord, b: Coord, c: Coord) -> f64 {
    (b.lng - a.lng) * (c.lat - a.lat) - (b.lat - a.lat) * (c.lng - a.lng)
}

fn on_segment(a: Coord, b: Coord, p: Coord) -> bool {
    p.lng.min(a.lng.min(b.lng)) <= p.lng
        && p.lng <= a.lng.max(b.lng)
        && p.lat.min(a.lat.min(b.lat)) <= p.lat
        && p.lat <= a.lat.max(b.lat)
}

fn segments_cross(a1: Coord, a2: Coord, b1: Coord, b2: Coord) -> bool {
    let o1 = orientation(a1, a2, b1);
    let o2 = orientation(a1, a2, b2);
    let o3 = orientation(b1, b2, a1);
    let o4 = orientation(b1, b2, a2);

    if (o1 > 0.0) != (o2 > 0.0) && (o3 > 0.0) != (o4 > 0.0) && o1 != 0.0 && o2 != 0.0 {
        return true;
    }

    // collinear special cases
    if o1 == 0.0 && on_segment(a1, a2, b1) {
        return true;
    }
    if o2 == 0.0 && on_segment(a1, a2, b2) {
        return true;
    }
    if o3 == 0.0 && on_segment(b1, b2, a1) {
        return true;
    }
    if o4 == 0.0 && on_segment(b1, b2, a2) {
        return true;
    }

    false
}
