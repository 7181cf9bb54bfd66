use terradraw_types::Coord;

/// Ramer-Douglas-Peucker simplification, used by freehand mode to reduce the
/// dense pointer-move sample trail it accumulates while the pointer is down
/// into a manageable vertex count on release.
///
/// `epsilon` is the perpendicular-distance tolerance, in the same units as
/// the input coordinates (lng/lat degrees here -- freehand samples are dense
/// enough that the small-angle approximation this implies is immaterial at
/// interactive zoom levels). A point is kept if it lies further than
/// `epsilon` from the line connecting its neighbours' simplified endpoints.
pub fn simplify_rdp(coords: &[Coord], epsilon: f64) -> Vec<Coord> {
    if coords.len() < 3 || epsilon <= 0.0 {
        return coords.to_vec();
    }

    let mut keep = vec![false; coords.len()];
    keep[0] = true;
    keep[coords.len() - 1] = true;
    rdp_range(coords, 0, coords.len() - 1, epsilon, &mut keep);

    coords
        .iter()
        .zip(keep)
        .filter_map(|(c, k)| k.then_some(*c))
        .collect()
}

fn rdp_range(coords: &[Coord], start: usize, end: usize, epsilon: f64, keep: &mut [bool]) {
    if end <= start + 1 {
        return;
    }

    let (a, b) = (coords[start], coords[end]);
    let mut farthest_index = start;
    let mut farthest_dist = 0.0;

    for i in (start + 1)..end {
        let dist = perpendicular_distance(coords[i], a, b);
        if dist > farthest_dist {
            farthest_dist = dist;
            farthest_index = i;
        }
    }

    if farthest_dist > epsilon {
        keep[farthest_index] = true;
        rdp_range(coords, start, farthest_index, epsilon, keep);
        rdp_range(coords, farthest_index, end, epsilon, keep);
    }
}

fn perpendicular_distance(p: Coord, a: Coord, b: Coord) -> f64 {
    let (dx, dy) = (b.lng - a.lng, b.lat - a.lat);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return ((p.lng - a.lng).powi(2) + (p.lat - a.lat).powi(2)).sqrt();
    }
    ((dy * p.lng - dx * p.lat + b.lng * a.lat - b.lat * a.lng).abs()) / len_sq.sqrt()
}
