use terradraw_types::{Coord, Feature, Geometry};

use crate::geometry::{point_in_polygon, point_to_line_distance_px, PixelPoint};
use crate::store::FeatureStore;

use super::overlay::OverlaySet;

/// Projects `(lng, lat)` through the adapter's pixel projection and
/// measures the distance to the projection of `other`.
fn px_distance(project: &dyn Fn(f64, f64) -> PixelPoint, a: Coord, b: Coord) -> f64 {
    let pa = project(a.lng, a.lat);
    let pb = project(b.lng, b.lat);
    ((pa.x - pb.x).powi(2) + (pa.y - pb.y).powi(2)).sqrt()
}

fn coord_project<'a>(project: &'a dyn Fn(f64, f64) -> PixelPoint) -> impl Fn(Coord) -> PixelPoint + 'a {
    move |c: Coord| project(c.lng, c.lat)
}

/// Hit-tests `cursor` against an overlay's selection points, returning the
/// index of the vertex it sits closest to within `pointer_distance` px.
pub fn hit_selection_point(
    store: &FeatureStore,
    overlay: &OverlaySet,
    cursor: Coord,
    project: &dyn Fn(f64, f64) -> PixelPoint,
    pointer_distance: f64,
) -> Option<usize> {
    overlay
        .point_ids
        .iter()
        .enumerate()
        .filter_map(|(i, id)| {
            let feature = store.get(id)?;
            let Geometry::Point(p) = &feature.geometry else {
                return None;
            };
            let d = px_distance(project, cursor, p.coord());
            (d <= pointer_distance).then_some((i, d))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

/// Hit-tests `cursor` against an overlay's midpoints, returning the index
/// of the segment it sits closest to within `pointer_distance` px.
pub fn hit_midpoint(
    store: &FeatureStore,
    overlay: &OverlaySet,
    cursor: Coord,
    project: &dyn Fn(f64, f64) -> PixelPoint,
    pointer_distance: f64,
) -> Option<usize> {
    overlay
        .midpoint_ids
        .iter()
        .enumerate()
        .filter_map(|(i, id)| {
            let feature = store.get(id)?;
            let Geometry::Point(p) = &feature.geometry else {
                return None;
            };
            let d = px_distance(project, cursor, p.coord());
            (d <= pointer_distance).then_some((i, d))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

/// Whether `cursor` lands on `feature`, dispatching by geometry kind: a
/// point is a circular pixel-distance test, a line string is a
/// perpendicular pixel-distance test against each segment, a polygon is a
/// ray-casting containment test (its boundary also counts, via the same
/// perpendicular-distance test the line string uses).
pub fn hit_feature(feature: &Feature, cursor: Coord, project: &dyn Fn(f64, f64) -> PixelPoint, pointer_distance: f64) -> bool {
    match &feature.geometry {
        Geometry::Point(p) => px_distance(project, cursor, p.coord()) <= pointer_distance,
        Geometry::LineString(ls) => ls
            .coords()
            .windows(2)
            .any(|w| point_to_line_distance_px(cursor, w[0], w[1], coord_project(project)) <= pointer_distance),
        Geometry::Polygon(poly) => {
            if point_in_polygon(cursor, poly.exterior().coords()) {
                return true;
            }
            poly.exterior()
                .coords()
                .windows(2)
                .any(|w| point_to_line_distance_px(cursor, w[0], w[1], coord_project(project)) <= pointer_distance)
        }
        Geometry::MultiPolygon(mp) => mp.polygons().iter().any(|poly| point_in_polygon(cursor, poly.exterior().coords())),
    }
}

/// Finds the topmost selectable feature under `cursor`, in point > line >
/// polygon priority order (a point drawn on top of a polygon should win the
/// hit test even though both geometrically contain the cursor).
///
/// Overlay features (selection points, midpoints) are never selectable
/// themselves -- callers are expected to have already tried
/// [`hit_selection_point`]/[`hit_midpoint`] first.
pub fn hit_selectable_feature(
    store: &FeatureStore,
    cursor: Coord,
    project: &dyn Fn(f64, f64) -> PixelPoint,
    pointer_distance: f64,
    is_selectable: impl Fn(&str) -> bool,
) -> Option<Feature> {
    let mut candidates: Vec<Feature> = store
        .copy_all()
        .into_iter()
        .filter(|f| f.mode().map(&is_selectable).unwrap_or(false))
        .filter(|f| hit_feature(f, cursor, project, pointer_distance))
        .collect();

    let point_idx = candidates.iter().position(|f| matches!(f.geometry, Geometry::Point(_)));
    let line_idx = candidates
        .iter()
        .position(|f| matches!(f.geometry, Geometry::LineString(_)));

    if let Some(i) = point_idx.or(line_idx) {
        return Some(candidates.swap_remove(i));
    }
    candidates.pop()
}
