use terradraw_types::Coord;

/// Axis-aligned bounding box of a coordinate sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub min: Coord,
    pub max: Coord,
}

/// Computes the bounding box of `coords`. Used by the rectangle draw mode
/// to size its draft and, optionally, by an adapter to pre-filter
/// selectable candidates by bounding box before the exact
/// [`point_to_line_distance_px`](super::point_to_line_distance_px) test --
/// the core itself does not maintain a spatial index.
pub fn bbox(coords: &[Coord]) -> Option<BBox> {
    let first = *coords.first()?;
    let mut min = first;
    let mut max = first;
    for c in &coords[1..] {
        min.lng = min.lng.min(c.lng);
        min.lat = min.lat.min(c.lat);
        max.lng = max.lng.max(c.lng);
        max.lat = max.lat.max(c.lat);
    }
    Some(BBox { min, max })
}
