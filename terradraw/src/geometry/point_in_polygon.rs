use terradraw_types::Coord;

/// Ray-casting point-in-polygon test against a single ring. Coordinates on
/// the boundary count as inside, matching the "hit" semantics select mode
/// needs for polygon picking (a click exactly on an edge should still
/// select the polygon rather than falling through to whatever is beneath).
///
/// `ring` is expected to be closed (first == last), as every [`Polygon`]
/// produced by this crate's store is.
pub fn point_in_polygon(p: Coord, ring: &[Coord]) -> bool {
    if ring.len() < 4 {
        return false;
    }

    if on_boundary(p, ring) {
        return true;
    }

    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let vi = ring[i];
        let vj = ring[j];
        let crosses = (vi.lat > p.lat) != (vj.lat > p.lat);
        if crosses {
            let x_at_p_lat = vi.lng + (p.lat - vi.lat) / (vj.lat - vi.lat) * (vj.lng - vi.lng);
            if p.lng < x_at_p_lat {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

fn on_boundary(p: Coord, ring: &[Coord]) -> bool {
    ring.windows(2).any(|w| point_on_segment(p, w[0], w[1]))
}

fn point_on_segment(p: Coord, a: Coord, b: Coord) -> bool {
    let cross = (p.lng - a.lng) * (b.lat - a.lat) - (p.lat - a.lat) * (b.lng - a.lng);
    if cross.abs() > 1e-12 {
        return false;
    }
    let dot = (p.lng - a.lng) * (b.lng - a.lng) + (p.lat - a.lat) * (b.lat - a.lat);
    let len_sq = (b.lng - a.lng).powi(2) + (b.lat - a.lat).powi(2);
    (0.0..=len_sq).contains(&dot)
}
