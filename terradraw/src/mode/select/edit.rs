use terradraw_types::{Coord, Feature, Geometry, LineString, Point};

/// The distinct, editable vertices of a feature's geometry: every
/// coordinate of a `LineString`, the exterior ring of a `Polygon` with its
/// closing duplicate dropped, or the single coordinate of a `Point`.
/// `MultiPolygon` has no select-mode coordinate editing in this core.
pub fn vertices(feature: &Feature) -> Vec<Coord> {
    match &feature.geometry {
        Geometry::Point(p) => vec![p.coord()],
        Geometry::LineString(ls) => ls.coords().to_vec(),
        Geometry::Polygon(poly) => {
            let ext = poly.exterior().coords();
            if ext.is_empty() {
                Vec::new()
            } else {
                ext[..ext.len() - 1].to_vec()
            }
        }
        Geometry::MultiPolygon(_) => Vec::new(),
    }
}

/// Whether `vertices` wraps around (a polygon ring) rather than terminating
/// (a line string) -- determines whether the last vertex has a segment
/// back to the first for midpoint/adjacency purposes.
pub fn is_closed(feature: &Feature) -> bool {
    matches!(feature.geometry, Geometry::Polygon(_))
}

/// Rewrites a feature's geometry from a new distinct-vertex list, honouring
/// each geometry kind's own representation (a polygon's exterior ring gets
/// its closing coordinate re-derived from the new first vertex).
pub fn set_vertices(feature: &mut Feature, verts: &[Coord]) {
    match &mut feature.geometry {
        Geometry::Point(p) => {
            if let Some(first) = verts.first() {
                *p = Point::from(*first);
            }
        }
        Geometry::LineString(ls) => {
            *ls = LineString::new(verts.to_vec());
        }
        Geometry::Polygon(poly) => {
            if verts.is_empty() {
                return;
            }
            let mut ring = verts.to_vec();
            ring.push(verts[0]);
            *poly.exterior_mut() = LineString::new(ring);
        }
        Geometry::MultiPolygon(_) => {}
    }
}

/// Translates every vertex of `feature` by a fixed lng/lat delta, clamping
/// the result into the valid WGS84 range.
pub fn translate(feature: &mut Feature, d_lng: f64, d_lat: f64) {
    let verts: Vec<Coord> = vertices(feature)
        .into_iter()
        .map(|c| Coord::new(c.lng + d_lng, c.lat + d_lat).clamped())
        .collect();
    set_vertices(feature, &verts);
}

/// Scales every vertex of `feature` about `anchor` by `factor`, applying
/// the scale as planar lng/lat deltas from the anchor.
pub fn scale_about(feature: &mut Feature, anchor: Coord, factor: f64) {
    let verts: Vec<Coord> = vertices(feature)
        .into_iter()
        .map(|c| {
            Coord::new(
                anchor.lng + (c.lng - anchor.lng) * factor,
                anchor.lat + (c.lat - anchor.lat) * factor,
            )
            .clamped()
        })
        .collect();
    set_vertices(feature, &verts);
}

/// Rotates every vertex of `feature` about `anchor` by `angle_deg`, as a
/// planar rotation of its lng/lat delta from the anchor -- the angle
/// itself is derived geodesically via bearing deltas, but the per-vertex
/// rotation is applied in the same lng/lat plane the resize transform
/// uses, so the two compose predictably.
pub fn rotate_about(feature: &mut Feature, anchor: Coord, angle_deg: f64) {
    let theta = angle_deg.to_radians();
    let (sin_t, cos_t) = (theta.sin(), theta.cos());
    let verts: Vec<Coord> = vertices(feature)
        .into_iter()
        .map(|c| {
            let (dx, dy) = (c.lng - anchor.lng, c.lat - anchor.lat);
            Coord::new(
                anchor.lng + dx * cos_t - dy * sin_t,
                anchor.lat + dx * sin_t + dy * cos_t,
            )
            .clamped()
        })
        .collect();
    set_vertices(feature, &verts);
}

/// Replaces a single vertex in place. For a closed polygon ring, moving
/// vertex `0` also updates the closing coordinate (and vice versa) to keep
/// the ring closed.
pub fn set_vertex(feature: &mut Feature, index: usize, coord: Coord) {
    let mut verts = vertices(feature);
    if index >= verts.len() {
        return;
    }
    verts[index] = coord;
    set_vertices(feature, &verts);
}

/// Removes a single vertex, returning the remaining distinct-vertex count.
pub fn delete_vertex(feature: &mut Feature, index: usize) -> usize {
    let mut verts = vertices(feature);
    if index >= verts.len() {
        return verts.len();
    }
    verts.remove(index);
    set_vertices(feature, &verts);
    verts.len()
}
