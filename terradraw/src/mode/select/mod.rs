//! Selects, drags, reshapes and deletes features created by the draw
//! modes. Unlike a draw mode, select mode never creates geometry of its
//! own kind -- its only store writes are to an existing feature's
//! coordinates/properties, plus the transient selection-point/midpoint
//! overlay features it maintains while something is selected.

pub mod edit;
pub mod flags;
pub mod hit_test;
pub mod keys;
pub mod overlay;

pub use flags::{CoordinateFlags, FeatureFlags, ModeFlags, Resizable, SelectFlags};
pub use keys::KeyBindings;

use std::cell::RefCell;
use std::rc::Rc;

use terradraw_types::{Coord, Feature, FeatureId, Geometry, Properties, SELECTED_PROPERTY};

use crate::error::TerraDrawError;
use crate::geometry::{bearing_degrees, centroid};
use crate::mode::{Button, FinishContext, KeyEvent, Mode, ModeBase, ModeState, PointerEvent, RegisterConfig};
use crate::store::FeatureStore;

/// Minimum cumulative pixel movement, from where a drag started, before a
/// drag handler actually mutates the store. Below this threshold a drag is
/// treated as accidental pointer jitter.
pub const DEFAULT_MIN_DRAG_PX: f64 = 8.0;

/// Which vertex a resize drag holds fixed while the opposite side moves.
/// Distinct from [`Resizable`], which also has a `Disabled` state a drag
/// can never actually be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAnchor {
    Center,
    Opposite,
}

struct Selection {
    id: FeatureId,
    mode_name: String,
    overlay: overlay::OverlaySet,
}

enum DragState {
    None,
    Coordinate { vertex_index: usize },
    Feature { last: Coord },
    Resize { anchor: Coord, last: Coord },
    Rotate { anchor: Coord, last: Coord },
}

#[cfg(feature = "serde")]
fn selected_properties(selected: bool) -> Properties {
    let mut props = Properties::new();
    props.insert(SELECTED_PROPERTY.to_string(), serde_json::json!(selected));
    props
}

#[cfg(not(feature = "serde"))]
fn selected_properties(selected: bool) -> Properties {
    let mut props = Properties::new();
    props.insert(SELECTED_PROPERTY.to_string(), selected.to_string());
    props
}

fn nearest_vertex_index(verts: &[Coord], cursor: Coord) -> usize {
    verts
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            let da = (a.lng - cursor.lng).powi(2) + (a.lat - cursor.lat).powi(2);
            let db = (b.lng - cursor.lng).powi(2) + (b.lat - cursor.lat).powi(2);
            da.total_cmp(&db)
        })
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn opposite_vertex(verts: &[Coord], cursor: Coord) -> Coord {
    if verts.is_empty() {
        return cursor;
    }
    let nearest = nearest_vertex_index(verts, cursor);
    verts[(nearest + verts.len() / 2) % verts.len()]
}

fn closed_ring(verts: &[Coord]) -> Vec<Coord> {
    let mut ring = verts.to_vec();
    if ring.first() != ring.last() {
        if let Some(first) = ring.first().copied() {
            ring.push(first);
        }
    }
    ring
}

fn min_vertex_count(geometry: &Geometry) -> usize {
    match geometry {
        Geometry::Polygon(_) => 3,
        Geometry::LineString(_) => 2,
        _ => 1,
    }
}

/// Select mode: click to select/switch selection, drag a selection-point to
/// move a single vertex, drag a midpoint to insert one, drag the feature
/// body to translate it, or hold the rotate/scale modifier while dragging
/// to rotate/resize about the feature's centroid (or, for `Opposite`
/// resizing, the vertex across from whichever corner was grabbed).
pub struct SelectMode {
    base: ModeBase,
    flags: SelectFlags,
    keys: KeyBindings,
    min_drag_px: f64,
    allow_manual_deselection: bool,
    selection: Option<Selection>,
    drag: DragState,
    drag_start_px: Option<crate::geometry::PixelPoint>,
}

impl SelectMode {
    pub fn new(flags: SelectFlags) -> Result<Self, TerraDrawError> {
        flags.validate()?;
        Ok(SelectMode {
            base: ModeBase::new("select"),
            flags,
            keys: KeyBindings::default(),
            min_drag_px: DEFAULT_MIN_DRAG_PX,
            allow_manual_deselection: true,
            selection: None,
            drag: DragState::None,
            drag_start_px: None,
        })
    }

    pub fn with_keys(mut self, keys: KeyBindings) -> Self {
        self.keys = keys;
        self
    }

    pub fn with_min_drag_px(mut self, px: f64) -> Self {
        self.min_drag_px = px;
        self
    }

    /// Whether clicking empty space (or a non-selectable feature) while
    /// something is selected deselects it. Defaults to `true`; set to
    /// `false` to make deselection only possible via the `deselect` key
    /// binding or by selecting a different feature.
    pub fn with_allow_manual_deselection(mut self, allow: bool) -> Self {
        self.allow_manual_deselection = allow;
        self
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selection.as_ref().map(|s| s.id.as_str())
    }

    fn coordinate_flags(&self, mode_name: &str) -> Option<CoordinateFlags> {
        self.flags
            .get(mode_name)
            .and_then(|m| m.feature)
            .and_then(|f| f.coordinates)
    }

    fn feature_flags(&self, mode_name: &str) -> Option<FeatureFlags> {
        self.flags.get(mode_name).and_then(|m| m.feature)
    }

    /// Tears down and rebuilds the overlay for the current selection,
    /// picking up whatever geometry the feature now has. Called after any
    /// edit that changes the vertex count (insert/delete) so overlay
    /// features stay aligned one-to-one with real vertices.
    fn rebuild_selection_overlay(&mut self, store: &Rc<RefCell<FeatureStore>>) -> Result<(), TerraDrawError> {
        let Some(selection) = self.selection.take() else {
            return Ok(());
        };
        let mut scope = self.base.new_scope();
        overlay::destroy(&mut store.borrow_mut(), &mut scope, &selection.overlay)?;
        let feature = store.borrow().get(&selection.id).cloned();
        let rebuilt = if let Some(feature) = feature {
            let coord_flags = self.coordinate_flags(&selection.mode_name);
            let new_overlay = overlay::build(&mut store.borrow_mut(), &mut scope, &feature, coord_flags.as_ref())?;
            Some(Selection {
                id: selection.id,
                mode_name: selection.mode_name,
                overlay: new_overlay,
            })
        } else {
            None
        };
        self.base.emit_scope(scope)?;
        self.selection = rebuilt;
        Ok(())
    }

    fn clear_selection(&mut self, store: &Rc<RefCell<FeatureStore>>) -> Result<(), TerraDrawError> {
        if let Some(selection) = self.selection.take() {
            let mut scope = self.base.new_scope();
            overlay::destroy(&mut store.borrow_mut(), &mut scope, &selection.overlay)?;
            store
                .borrow_mut()
                .update_properties(&mut scope, &selection.id, selected_properties(false))?;
            self.base.emit_scope(scope)?;
            (self.base.config()?.on_deselect)(&selection.id);
        }
        Ok(())
    }

    fn handle_left_click(&mut self, cursor: Coord, store: &Rc<RefCell<FeatureStore>>) -> Result<(), TerraDrawError> {
        let project = self.base.config()?.project.clone();
        let pointer_distance = self.base.pointer_distance();

        if let Some(selection) = &self.selection {
            let coord_flags = self.coordinate_flags(&selection.mode_name);
            if hit_test::hit_selection_point(&store.borrow(), &selection.overlay, cursor, project.as_ref(), pointer_distance)
                .is_some()
            {
                // Reserved for dragging, not a selection change.
                return Ok(());
            }
            if coord_flags.map(|f| f.midpoints).unwrap_or(false)
                && hit_test::hit_midpoint(&store.borrow(), &selection.overlay, cursor, project.as_ref(), pointer_distance)
                    .is_some()
            {
                return Ok(());
            }
        }

        let hit = hit_test::hit_selectable_feature(&store.borrow(), cursor, project.as_ref(), pointer_distance, |m| {
            self.flags.is_selectable(m)
        });

        match hit {
            Some(feature) => {
                if self.selection.as_ref().map(|s| s.id == feature.id).unwrap_or(false) {
                    return Ok(());
                }
                let mode_name = feature.mode().unwrap_or_default().to_string();
                let previous = self.selection.take();

                let mut scope = self.base.new_scope();
                if let Some(prev) = &previous {
                    overlay::destroy(&mut store.borrow_mut(), &mut scope, &prev.overlay)?;
                    store
                        .borrow_mut()
                        .update_properties(&mut scope, &prev.id, selected_properties(false))?;
                }
                store
                    .borrow_mut()
                    .update_properties(&mut scope, &feature.id, selected_properties(true))?;
                let coord_flags = self.coordinate_flags(&mode_name);
                let overlay_set = overlay::build(&mut store.borrow_mut(), &mut scope, &feature, coord_flags.as_ref())?;
                self.base.emit_scope(scope)?;

                let config = self.base.config()?;
                if let Some(prev) = &previous {
                    (config.on_deselect)(&prev.id);
                }
                (config.on_select)(&feature.id);

                self.selection = Some(Selection {
                    id: feature.id,
                    mode_name,
                    overlay: overlay_set,
                });
            }
            None => {
                if self.allow_manual_deselection {
                    self.clear_selection(store)?;
                }
            }
        }
        Ok(())
    }

    fn handle_right_click(&mut self, cursor: Coord, store: &Rc<RefCell<FeatureStore>>) -> Result<(), TerraDrawError> {
        let Some(selection) = &self.selection else {
            return Ok(());
        };
        let Some(coord_flags) = self.coordinate_flags(&selection.mode_name) else {
            return Ok(());
        };
        if !coord_flags.deletable {
            return Ok(());
        }

        let project = self.base.config()?.project.clone();
        let pointer_distance = self.base.pointer_distance();
        let Some(vertex_index) =
            hit_test::hit_selection_point(&store.borrow(), &selection.overlay, cursor, project.as_ref(), pointer_distance)
        else {
            return Ok(());
        };

        let id = selection.id.clone();
        let mut feature = store
            .borrow()
            .get(&id)
            .cloned()
            .ok_or_else(|| TerraDrawError::UnknownId(id.clone()))?;
        let remaining = edit::delete_vertex(&mut feature, vertex_index);
        if remaining < min_vertex_count(&feature.geometry) {
            log::warn!("select mode: refused to delete vertex {vertex_index} of {id}, too few would remain");
            return Ok(());
        }

        let mut scope = self.base.new_scope();
        if let Err(err) = store
            .borrow_mut()
            .update_geometry(&mut scope, &id, feature.geometry.clone(), false)
        {
            log::warn!("select mode: vertex deletion on {id} rejected: {err}");
            return Ok(());
        }
        self.base.emit_scope(scope)?;
        self.rebuild_selection_overlay(store)
    }
}

impl Mode for SelectMode {
    fn name(&self) -> &'static str {
        self.base.name()
    }

    fn state(&self) -> ModeState {
        self.base.state()
    }

    fn register(&mut self, config: RegisterConfig) -> Result<(), TerraDrawError> {
        self.flags.validate()?;
        self.base.register(config)
    }

    fn start(&mut self) -> Result<(), TerraDrawError> {
        self.base.start("move")
    }

    fn stop(&mut self) -> Result<(), TerraDrawError> {
        let store = self.base.store()?;
        self.clear_selection(&store)?;
        self.drag = DragState::None;
        self.drag_start_px = None;
        self.base.stop()
    }

    fn on_click(&mut self, event: &PointerEvent) -> Result<(), TerraDrawError> {
        let cursor = event.coord();
        let store = self.base.store()?;
        match event.button {
            Button::Right => self.handle_right_click(cursor, &store),
            _ => self.handle_left_click(cursor, &store),
        }
    }

    fn on_key_down(&mut self, event: &KeyEvent) -> Result<(), TerraDrawError> {
        if self.keys.is_deselect(&event.key) {
            let store = self.base.store()?;
            return self.clear_selection(&store);
        }
        if self.keys.is_delete(&event.key) {
            if let Some(selection) = self.selection.take() {
                let store = self.base.store()?;
                let mut scope = self.base.new_scope();
                overlay::destroy(&mut store.borrow_mut(), &mut scope, &selection.overlay)?;
                store.borrow_mut().delete(&mut scope, &selection.id)?;
                self.base.emit_scope(scope)?;
                (self.base.config()?.on_deselect)(&selection.id);
            }
        }
        Ok(())
    }

    fn on_drag_start(&mut self, event: &PointerEvent) -> Result<(), TerraDrawError> {
        let cursor = event.coord();
        self.drag_start_px = Some(event.pixel());
        self.drag = DragState::None;

        let Some(selection) = &self.selection else {
            return Ok(());
        };
        let mode_name = selection.mode_name.clone();
        let coord_flags = self.coordinate_flags(&mode_name);
        let feature_flags = self.feature_flags(&mode_name);
        let store = self.base.store()?;
        let project = self.base.config()?.project.clone();
        let pointer_distance = self.base.pointer_distance();

        if let Some(cf) = coord_flags {
            if cf.draggable {
                if let Some(i) = hit_test::hit_selection_point(
                    &store.borrow(),
                    &selection.overlay,
                    cursor,
                    project.as_ref(),
                    pointer_distance,
                ) {
                    self.drag = DragState::Coordinate { vertex_index: i };
                    (self.base.config()?.set_map_draggability)(false);
                    return Ok(());
                }
            }
            if cf.midpoints {
                if let Some(seg) = hit_test::hit_midpoint(
                    &store.borrow(),
                    &selection.overlay,
                    cursor,
                    project.as_ref(),
                    pointer_distance,
                ) {
                    let id = selection.id.clone();
                    let mut feature = store
                        .borrow()
                        .get(&id)
                        .cloned()
                        .ok_or_else(|| TerraDrawError::UnknownId(id.clone()))?;
                    let mut verts = edit::vertices(&feature);
                    let insert_at = (seg + 1).min(verts.len());
                    verts.insert(insert_at, cursor);
                    edit::set_vertices(&mut feature, &verts);

                    let mut scope = self.base.new_scope();
                    store
                        .borrow_mut()
                        .update_geometry(&mut scope, &id, feature.geometry.clone(), true)?;
                    self.base.emit_scope(scope)?;
                    self.rebuild_selection_overlay(&store)?;

                    self.drag = DragState::Coordinate { vertex_index: insert_at };
                    (self.base.config()?.set_map_draggability)(false);
                    return Ok(());
                }
            }
        }

        let feature = store.borrow().get(&selection.id).cloned();
        if let (Some(feature), Some(ff)) = (&feature, feature_flags) {
            if ff.draggable && hit_test::hit_feature(feature, cursor, project.as_ref(), pointer_distance) {
                self.drag = DragState::Feature { last: cursor };
                (self.base.config()?.set_map_draggability)(false);
                return Ok(());
            }
        }

        if let (Some(cf), Some(feature)) = (coord_flags, &feature) {
            if cf.rotatable && self.keys.rotate_held(&event.held_keys) {
                let anchor = centroid(&closed_ring(&edit::vertices(feature)));
                self.drag = DragState::Rotate { anchor, last: cursor };
                (self.base.config()?.set_map_draggability)(false);
                return Ok(());
            }
            if cf.resizable != Resizable::Disabled && self.keys.scale_held(&event.held_keys) {
                let verts = edit::vertices(feature);
                let anchor = match cf.resizable {
                    Resizable::Center => centroid(&closed_ring(&verts)),
                    Resizable::Opposite => opposite_vertex(&verts, cursor),
                    Resizable::Disabled => unreachable!("filtered above"),
                };
                self.drag = DragState::Resize { anchor, last: cursor };
                (self.base.config()?.set_map_draggability)(false);
                return Ok(());
            }
        }

        Ok(())
    }

    fn on_drag(&mut self, event: &PointerEvent) -> Result<(), TerraDrawError> {
        if matches!(self.drag, DragState::None) {
            return Ok(());
        }
        let Some(id) = self.selection.as_ref().map(|s| s.id.clone()) else {
            return Ok(());
        };

        if let Some(start_px) = self.drag_start_px {
            let px = event.pixel();
            let dx = px.x - start_px.x;
            let dy = px.y - start_px.y;
            if (dx * dx + dy * dy).sqrt() < self.min_drag_px {
                return Ok(());
            }
        }

        let cursor = event.coord();
        let store = self.base.store()?;
        let mut feature = store
            .borrow()
            .get(&id)
            .cloned()
            .ok_or_else(|| TerraDrawError::UnknownId(id.clone()))?;

        match &mut self.drag {
            DragState::Coordinate { vertex_index } => {
                edit::set_vertex(&mut feature, *vertex_index, cursor);
            }
            DragState::Feature { last } => {
                edit::translate(&mut feature, cursor.lng - last.lng, cursor.lat - last.lat);
                *last = cursor;
            }
            DragState::Resize { anchor, last } => {
                let before = ((last.lng - anchor.lng).powi(2) + (last.lat - anchor.lat).powi(2)).sqrt();
                let after = ((cursor.lng - anchor.lng).powi(2) + (cursor.lat - anchor.lat).powi(2)).sqrt();
                if before > 1e-12 {
                    edit::scale_about(&mut feature, *anchor, after / before);
                }
                *last = cursor;
            }
            DragState::Rotate { anchor, last } => {
                let delta = bearing_degrees(*anchor, cursor) - bearing_degrees(*anchor, *last);
                edit::rotate_about(&mut feature, *anchor, delta);
                *last = cursor;
            }
            DragState::None => unreachable!("checked above"),
        }

        let mut scope = self.base.new_scope();
        // Every drag kind re-validates (self-intersection included) before
        // writing: spec §4.E.3 requires a drag that would produce an invalid
        // geometry to be suppressed, not committed. `update_geometry` only
        // mutates the store on success, so a rejected write leaves the last
        // valid geometry in place -- nothing to revert.
        if let Err(err) = store
            .borrow_mut()
            .update_geometry(&mut scope, &id, feature.geometry.clone(), false)
        {
            log::warn!("select mode: drag on {id} suppressed, would produce an invalid geometry: {err}");
            return Ok(());
        }

        if let Some(selection) = &self.selection {
            let verts = edit::vertices(&feature);
            let closed = edit::is_closed(&feature);
            match &self.drag {
                // A coordinate drag only moves one vertex, so only its own
                // selection point and its (at most two) adjacent midpoints
                // need updating -- in the same batch as the parent, per
                // spec §4.E.3's `{updated: [parentId, pointId, midA, midB]}`.
                DragState::Coordinate { vertex_index } => {
                    overlay::sync_coordinate(
                        &mut store.borrow_mut(),
                        &mut scope,
                        &selection.overlay,
                        *vertex_index,
                        &verts,
                        closed,
                    )?;
                }
                // Translate/resize/rotate move every vertex at once without
                // changing how many there are, so every overlay point can be
                // updated in place too, in the same batch as the parent.
                _ => {
                    overlay::sync(&mut store.borrow_mut(), &mut scope, &selection.overlay, &verts, closed)?;
                }
            }
        }
        self.base.emit_scope(scope)?;
        Ok(())
    }

    fn on_drag_end(&mut self, _event: &PointerEvent) -> Result<(), TerraDrawError> {
        let action: Option<&'static str> = match self.drag {
            DragState::None => None,
            DragState::Coordinate { .. } => Some("dragCoordinate"),
            DragState::Feature { .. } => Some("dragFeature"),
            DragState::Resize { .. } => Some("dragCoordinateResize"),
            DragState::Rotate { .. } => Some("dragCoordinateRotate"),
        };
        self.drag = DragState::None;
        self.drag_start_px = None;
        let Some(action) = action else {
            return Ok(());
        };
        (self.base.config()?.set_map_draggability)(true);

        let Some(id) = self.selection.as_ref().map(|s| s.id.clone()) else {
            return Ok(());
        };

        let config = self.base.config()?;
        (config.on_finish)(&id, FinishContext { action, mode: self.base.name() });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use terradraw_types::{LineString, Polygon};

    use crate::mode::ChangeKind;

    fn square_flags() -> SelectFlags {
        let mut flags = SelectFlags::new();
        flags.set(
            "polygon",
            ModeFlags {
                feature: Some(FeatureFlags {
                    draggable: true,
                    coordinates: Some(CoordinateFlags {
                        draggable: true,
                        deletable: true,
                        midpoints: true,
                        resizable: Resizable::Center,
                        rotatable: true,
                    }),
                }),
            },
        );
        flags
    }

    fn config(store: Rc<RefCell<FeatureStore>>, selected: Rc<RefCell<Vec<FeatureId>>>) -> RegisterConfig {
        let s1 = Rc::clone(&selected);
        RegisterConfig {
            store,
            project: Rc::new(|lng, lat| crate::geometry::PixelPoint { x: lng * 10.0, y: lat * 10.0 }),
            set_cursor: Rc::new(|_| {}),
            set_map_draggability: Rc::new(|_| {}),
            on_change: Rc::new(|_, _| {}),
            on_select: Rc::new(move |id| s1.borrow_mut().push(id.clone())),
            on_deselect: Rc::new(|_| {}),
            on_finish: Rc::new(|_, _| {}),
        }
    }

    fn square_feature(store: &Rc<RefCell<FeatureStore>>) -> FeatureId {
        let ring = vec![
            Coord::new(0.0, 0.0),
            Coord::new(0.0, 4.0),
            Coord::new(4.0, 4.0),
            Coord::new(4.0, 0.0),
        ];
        let mut scope = crate::store::MutationScope::new();
        let mut props = Properties::new();
        #[cfg(feature = "serde")]
        props.insert("mode".to_string(), serde_json::json!("polygon"));
        #[cfg(not(feature = "serde"))]
        props.insert("mode".to_string(), "polygon".to_string());
        let ids = store
            .borrow_mut()
            .create(
                &mut scope,
                vec![(Geometry::Polygon(Polygon::new(LineString::new(ring), vec![])), props)],
                false,
            )
            .unwrap();
        ids[0].clone()
    }

    fn click(lng: f64, lat: f64, button: Button) -> PointerEvent {
        PointerEvent {
            lng,
            lat,
            container_x: lng * 10.0,
            container_y: lat * 10.0,
            button,
            held_keys: vec![],
        }
    }

    #[test]
    fn clicking_a_feature_selects_it_and_builds_overlay() {
        let store = Rc::new(RefCell::new(FeatureStore::new()));
        let id = square_feature(&store);
        let selected = Rc::new(RefCell::new(Vec::new()));
        let mut mode = SelectMode::new(square_flags()).unwrap();
        mode.register(config(Rc::clone(&store), Rc::clone(&selected))).unwrap();
        mode.start().unwrap();

        mode.on_click(&click(2.0, 2.0, Button::Left)).unwrap();

        assert_eq!(mode.selected_id(), Some(id.as_str()));
        assert_eq!(*selected.borrow(), vec![id]);
        assert_eq!(mode.selection.as_ref().unwrap().overlay.point_ids.len(), 4);
        assert_eq!(mode.selection.as_ref().unwrap().overlay.midpoint_ids.len(), 4);
    }

    #[test]
    fn clicking_empty_space_deselects() {
        let store = Rc::new(RefCell::new(FeatureStore::new()));
        square_feature(&store);
        let selected = Rc::new(RefCell::new(Vec::new()));
        let mut mode = SelectMode::new(square_flags()).unwrap();
        mode.register(config(Rc::clone(&store), selected)).unwrap();
        mode.start().unwrap();

        mode.on_click(&click(2.0, 2.0, Button::Left)).unwrap();
        assert!(mode.selected_id().is_some());
        mode.on_click(&click(50.0, 50.0, Button::Left)).unwrap();
        assert!(mode.selected_id().is_none());
    }

    #[test]
    fn manual_deselection_disabled_keeps_selection_on_miss() {
        let store = Rc::new(RefCell::new(FeatureStore::new()));
        square_feature(&store);
        let selected = Rc::new(RefCell::new(Vec::new()));
        let mut mode = SelectMode::new(square_flags())
            .unwrap()
            .with_allow_manual_deselection(false);
        mode.register(config(Rc::clone(&store), selected)).unwrap();
        mode.start().unwrap();

        mode.on_click(&click(2.0, 2.0, Button::Left)).unwrap();
        assert!(mode.selected_id().is_some());
        mode.on_click(&click(59.0, 59.0, Button::Left)).unwrap();
        assert!(mode.selected_id().is_some());
    }

    #[test]
    fn dragging_feature_body_translates_it() {
        let store = Rc::new(RefCell::new(FeatureStore::new()));
        let id = square_feature(&store);
        let selected = Rc::new(RefCell::new(Vec::new()));
        let mut mode = SelectMode::new(square_flags()).unwrap();
        mode.register(config(Rc::clone(&store), selected)).unwrap();
        mode.start().unwrap();
        mode.on_click(&click(2.0, 2.0, Button::Left)).unwrap();

        mode.on_drag_start(&click(2.0, 2.0, Button::Left)).unwrap();
        mode.on_drag(&click(3.0, 2.0, Button::Left)).unwrap();
        mode.on_drag_end(&click(3.0, 2.0, Button::Left)).unwrap();

        let geometry = store.borrow().geometry_copy(&id).unwrap();
        let Geometry::Polygon(p) = geometry else {
            panic!("expected polygon")
        };
        assert!((p.exterior().coords()[0].lng - 1.0).abs() < 1e-9);
    }

    #[test]
    fn dragging_a_coordinate_into_self_intersection_is_suppressed() {
        let store = Rc::new(RefCell::new(FeatureStore::new()));
        let id = square_feature(&store);
        let selected = Rc::new(RefCell::new(Vec::new()));
        let mut mode = SelectMode::new(square_flags()).unwrap();
        mode.register(config(Rc::clone(&store), selected)).unwrap();
        mode.start().unwrap();
        mode.on_click(&click(2.0, 2.0, Button::Left)).unwrap();

        let before = store.borrow().geometry_copy(&id).unwrap();

        // Corner (0,0) dragged past the opposite corner (4,4) turns the
        // square into a bowtie.
        mode.on_drag_start(&click(0.0, 0.0, Button::Left)).unwrap();
        mode.on_drag(&click(8.0, 8.0, Button::Left)).unwrap();

        let after = store.borrow().geometry_copy(&id).unwrap();
        assert_eq!(before, after, "self-intersecting drag must not be committed");
    }

    #[test]
    fn drag_end_reports_the_action_matching_the_drag_kind() {
        let store = Rc::new(RefCell::new(FeatureStore::new()));
        square_feature(&store);
        let selected = Rc::new(RefCell::new(Vec::new()));
        let actions: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let a1 = Rc::clone(&actions);
        let mut cfg = config(Rc::clone(&store), selected);
        cfg.on_finish = Rc::new(move |_, ctx| a1.borrow_mut().push(ctx.action.to_string()));
        let mut mode = SelectMode::new(square_flags()).unwrap();
        mode.register(cfg).unwrap();
        mode.start().unwrap();
        mode.on_click(&click(2.0, 2.0, Button::Left)).unwrap();

        mode.on_drag_start(&click(2.0, 2.0, Button::Left)).unwrap();
        mode.on_drag(&click(3.0, 2.0, Button::Left)).unwrap();
        mode.on_drag_end(&click(3.0, 2.0, Button::Left)).unwrap();

        assert_eq!(*actions.borrow(), vec!["dragFeature".to_string()]);
    }

    #[test]
    fn dragging_a_coordinate_only_updates_its_own_point_and_neighbouring_midpoints() {
        let store = Rc::new(RefCell::new(FeatureStore::new()));
        square_feature(&store);
        let selected = Rc::new(RefCell::new(Vec::new()));
        let updates: Rc<RefCell<Vec<FeatureId>>> = Rc::new(RefCell::new(Vec::new()));
        let u1 = Rc::clone(&updates);
        let mut cfg = config(Rc::clone(&store), selected);
        cfg.on_change = Rc::new(move |ids, kind| {
            if kind == ChangeKind::Update {
                u1.borrow_mut().extend(ids.iter().cloned());
            }
        });
        let mut mode = SelectMode::new(square_flags()).unwrap();
        mode.register(cfg).unwrap();
        mode.start().unwrap();
        mode.on_click(&click(2.0, 2.0, Button::Left)).unwrap();
        updates.borrow_mut().clear();

        mode.on_drag_start(&click(0.0, 0.0, Button::Left)).unwrap();
        mode.on_drag(&click(0.5, 0.5, Button::Left)).unwrap();

        let overlay = mode.selection.as_ref().unwrap().overlay.clone();
        let updated = updates.borrow().clone();

        // The moved vertex (0,0) is index 0, adjacent to segments 3 (prev)
        // and 0 (next) out of the square's 4 edges -- exactly two
        // midpoints, not all four.
        assert_eq!(updated.len(), 4);
        assert!(updated.contains(&overlay.point_ids[0]));
        assert!(updated.contains(&overlay.midpoint_ids[3]));
        assert!(updated.contains(&overlay.midpoint_ids[0]));
        assert!(!updated.contains(&overlay.point_ids[1]));
        assert!(!updated.contains(&overlay.point_ids[2]));
        assert!(!updated.contains(&overlay.point_ids[3]));
        assert!(!updated.contains(&overlay.midpoint_ids[1]));
        assert!(!updated.contains(&overlay.midpoint_ids[2]));
    }
}
