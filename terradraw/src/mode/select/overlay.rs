use terradraw_types::{Coord, Feature, FeatureId, Geometry, Point, Properties, MODE_PROPERTY};

use crate::error::TerraDrawError;
use crate::geometry::midpoint_great_circle;
use crate::store::{FeatureStore, MutationScope};

use super::edit::{is_closed, vertices};
use super::flags::CoordinateFlags;

/// `mode` value stamped on a selection-point overlay feature.
pub const SELECTION_POINT_MODE: &str = "selection-point";
/// `mode` value stamped on a midpoint overlay feature.
pub const MIDPOINT_MODE: &str = "midpoint";

pub const PARENT_ID_PROPERTY: &str = "parentId";
pub const INDEX_PROPERTY: &str = "index";
pub const SEGMENT_INDEX_PROPERTY: &str = "segmentIndex";

/// The transient `parentId -> {pointIds, midpointIds}` mapping: rebuilt on
/// every selection change or geometry mutation, discarded on deselect,
/// never a long-lived reference back into the store.
#[derive(Debug, Clone, Default)]
pub struct OverlaySet {
    pub parent_id: FeatureId,
    pub point_ids: Vec<FeatureId>,
    pub midpoint_ids: Vec<FeatureId>,
}

impl OverlaySet {
    pub fn is_empty(&self) -> bool {
        self.point_ids.is_empty() && self.midpoint_ids.is_empty()
    }
}

#[cfg(feature = "serde")]
fn selection_point_properties(parent_id: &str, index: usize) -> Properties {
    let mut props = Properties::new();
    props.insert(MODE_PROPERTY.to_string(), serde_json::json!(SELECTION_POINT_MODE));
    props.insert(PARENT_ID_PROPERTY.to_string(), serde_json::json!(parent_id));
    props.insert(INDEX_PROPERTY.to_string(), serde_json::json!(index));
    props
}

#[cfg(not(feature = "serde"))]
fn selection_point_properties(parent_id: &str, index: usize) -> Properties {
    let mut props = Properties::new();
    props.insert(MODE_PROPERTY.to_string(), SELECTION_POINT_MODE.to_string());
    props.insert(PARENT_ID_PROPERTY.to_string(), parent_id.to_string());
    props.insert(INDEX_PROPERTY.to_string(), index.to_string());
    props
}

#[cfg(feature = "serde")]
fn midpoint_properties(parent_id: &str, segment_index: usize) -> Properties {
    let mut props = Properties::new();
    props.insert(MODE_PROPERTY.to_string(), serde_json::json!(MIDPOINT_MODE));
    props.insert(PARENT_ID_PROPERTY.to_string(), serde_json::json!(parent_id));
    props.insert(SEGMENT_INDEX_PROPERTY.to_string(), serde_json::json!(segment_index));
    props
}

#[cfg(not(feature = "serde"))]
fn midpoint_properties(parent_id: &str, segment_index: usize) -> Properties {
    let mut props = Properties::new();
    props.insert(MODE_PROPERTY.to_string(), MIDPOINT_MODE.to_string());
    props.insert(PARENT_ID_PROPERTY.to_string(), parent_id.to_string());
    props.insert(SEGMENT_INDEX_PROPERTY.to_string(), segment_index.to_string());
    props
}

fn segments(verts: &[Coord], closed: bool) -> Vec<(Coord, Coord)> {
    let mut segs: Vec<(Coord, Coord)> = verts.windows(2).map(|w| (w[0], w[1])).collect();
    if closed && verts.len() > 1 {
        segs.push((verts[verts.len() - 1], verts[0]));
    }
    segs
}

/// Creates a selection-point overlay per vertex and (if `flags.midpoints`)
/// a midpoint overlay per edge, mirroring `parent`'s current coordinates.
pub fn build(
    store: &mut FeatureStore,
    scope: &mut MutationScope,
    parent: &Feature,
    flags: Option<&CoordinateFlags>,
) -> Result<OverlaySet, TerraDrawError> {
    let verts = vertices(parent);
    let closed = is_closed(parent);

    let mut point_ids = Vec::new();
    if flags.map(|f| f.draggable || f.deletable).unwrap_or(false) {
        let entries: Vec<_> = verts
            .iter()
            .enumerate()
            .map(|(i, c)| {
                (
                    Geometry::Point(Point::from(*c)),
                    selection_point_properties(&parent.id, i),
                )
            })
            .collect();
        if !entries.is_empty() {
            point_ids = store.create(scope, entries, false)?;
        }
    }

    let mut midpoint_ids = Vec::new();
    if flags.map(|f| f.midpoints).unwrap_or(false) {
        let entries: Vec<_> = segments(&verts, closed)
            .into_iter()
            .enumerate()
            .map(|(i, (a, b))| {
                (
                    Geometry::Point(Point::from(midpoint_great_circle(a, b))),
                    midpoint_properties(&parent.id, i),
                )
            })
            .collect();
        if !entries.is_empty() {
            midpoint_ids = store.create(scope, entries, false)?;
        }
    }

    Ok(OverlaySet {
        parent_id: parent.id.clone(),
        point_ids,
        midpoint_ids,
    })
}

/// Updates every overlay feature's geometry in place to match `verts`,
/// without touching ids. Used after a whole-feature transform (translate,
/// resize, rotate) where the vertex count never changes, so the existing
/// selection-point/midpoint ids stay valid and only their coordinates move.
pub fn sync(
    store: &mut FeatureStore,
    scope: &mut MutationScope,
    overlay: &OverlaySet,
    verts: &[Coord],
    closed: bool,
) -> Result<(), TerraDrawError> {
    for (id, vertex) in overlay.point_ids.iter().zip(verts.iter()) {
        store.update_geometry(scope, id, Geometry::Point(Point::from(*vertex)), false)?;
    }
    for (id, (a, b)) in overlay.midpoint_ids.iter().zip(segments(verts, closed)) {
        store.update_geometry(scope, id, Geometry::Point(Point::from(midpoint_great_circle(a, b))), false)?;
    }
    Ok(())
}

/// Updates just the moved selection point and the one or two midpoints
/// adjacent to it, for a single coordinate drag. Spec §4.E.3 calls for
/// emitting `{updated: [parentId, pointId, midA, midB]}` for this case
/// rather than the destroy-and-recreate-every-overlay-feature churn
/// `build`/`destroy` would cost on every drag-move event.
pub fn sync_coordinate(
    store: &mut FeatureStore,
    scope: &mut MutationScope,
    overlay: &OverlaySet,
    vertex_index: usize,
    verts: &[Coord],
    closed: bool,
) -> Result<(), TerraDrawError> {
    if let (Some(point_id), Some(vertex)) = (overlay.point_ids.get(vertex_index), verts.get(vertex_index)) {
        store.update_geometry(scope, point_id, Geometry::Point(Point::from(*vertex)), false)?;
    }

    let segs = segments(verts, closed);
    let n = segs.len();
    if n == 0 {
        return Ok(());
    }
    let mut touched = Vec::with_capacity(2);
    if closed {
        touched.push((vertex_index + n - 1) % n);
        touched.push(vertex_index % n);
    } else {
        if vertex_index > 0 {
            touched.push(vertex_index - 1);
        }
        if vertex_index < n {
            touched.push(vertex_index);
        }
    }
    touched.sort_unstable();
    touched.dedup();

    for seg_idx in touched {
        if let (Some(mid_id), Some(&(a, b))) = (overlay.midpoint_ids.get(seg_idx), segs.get(seg_idx)) {
            store.update_geometry(scope, mid_id, Geometry::Point(Point::from(midpoint_great_circle(a, b))), false)?;
        }
    }
    Ok(())
}

/// Deletes every overlay feature in `overlay`.
pub fn destroy(
    store: &mut FeatureStore,
    scope: &mut MutationScope,
    overlay: &OverlaySet,
) -> Result<(), TerraDrawError> {
    for id in overlay.point_ids.iter().chain(overlay.midpoint_ids.iter()) {
        if store.has(id) {
            store.delete(scope, id)?;
        }
    }
    Ok(())
}
