//! Shared harness for the scenario/property integration tests: wires a
//! [`Coordinator`] up to a fixed pixel projection and recording callbacks so
//! a test can drive clicks/drags/keys and then assert on what the adapter
//! would have observed.
//!
//! Not every test file exercises every helper here, hence the blanket
//! `dead_code` allowance -- each `tests/*.rs` file compiles this module as
//! its own copy.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use terradraw::coordinator::{AdapterHooks, Coordinator, CoordinatorCallbacks};
use terradraw::mode::{Button, ChangeKind, FinishContext, KeyEvent, PointerEvent};
use terradraw::store::{FeatureStore, MutationScope};
use terradraw_types::{Coord, FeatureId, Geometry, LineString, Polygon, Properties};

/// Degrees-to-pixels scale used by every test's `project` hook: large
/// enough that a feature spanning a few degrees hit-tests comfortably
/// against the crate's default 40px `pointerDistance`.
pub const PX_PER_DEGREE: f64 = 50.0;

pub struct Harness {
    pub coordinator: Coordinator,
    pub changes: Rc<RefCell<Vec<(Vec<FeatureId>, ChangeKind)>>>,
    pub selects: Rc<RefCell<Vec<FeatureId>>>,
    pub deselects: Rc<RefCell<Vec<FeatureId>>>,
    pub finishes: Rc<RefCell<Vec<(FeatureId, &'static str, &'static str)>>>,
}

impl Harness {
    pub fn new() -> Self {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let selects = Rc::new(RefCell::new(Vec::new()));
        let deselects = Rc::new(RefCell::new(Vec::new()));
        let finishes = Rc::new(RefCell::new(Vec::new()));

        let c1 = Rc::clone(&changes);
        let s1 = Rc::clone(&selects);
        let d1 = Rc::clone(&deselects);
        let f1 = Rc::clone(&finishes);

        let hooks = AdapterHooks {
            project: Rc::new(|lng, lat| terradraw::geometry::PixelPoint {
                x: lng * PX_PER_DEGREE,
                y: lat * PX_PER_DEGREE,
            }),
            set_cursor: Rc::new(|_| {}),
            set_map_draggability: Rc::new(|_| {}),
        };
        let callbacks = CoordinatorCallbacks {
            on_change: Rc::new(move |ids, kind| c1.borrow_mut().push((ids.to_vec(), kind))),
            on_select: Rc::new(move |id| s1.borrow_mut().push(id.clone())),
            on_deselect: Rc::new(move |id| d1.borrow_mut().push(id.clone())),
            on_finish: Rc::new(move |id: &FeatureId, ctx: FinishContext| {
                f1.borrow_mut().push((id.clone(), ctx.action, ctx.mode))
            }),
        };

        Harness {
            coordinator: Coordinator::new(hooks, callbacks),
            changes,
            selects,
            deselects,
            finishes,
        }
    }

    fn pointer_event(lng: f64, lat: f64, button: Button, held_keys: Vec<String>) -> PointerEvent {
        PointerEvent {
            lng,
            lat,
            container_x: lng * PX_PER_DEGREE,
            container_y: lat * PX_PER_DEGREE,
            button,
            held_keys,
        }
    }

    pub fn click(&mut self, lng: f64, lat: f64) {
        self.coordinator
            .on_click(&Self::pointer_event(lng, lat, Button::Left, vec![]))
            .unwrap();
    }

    pub fn right_click(&mut self, lng: f64, lat: f64) {
        self.coordinator
            .on_click(&Self::pointer_event(lng, lat, Button::Right, vec![]))
            .unwrap();
    }

    pub fn move_to(&mut self, lng: f64, lat: f64) {
        self.coordinator
            .on_mouse_move(&Self::pointer_event(lng, lat, Button::Left, vec![]))
            .unwrap();
    }

    pub fn drag_start(&mut self, lng: f64, lat: f64) {
        self.coordinator
            .on_drag_start(&Self::pointer_event(lng, lat, Button::Left, vec![]))
            .unwrap();
    }

    pub fn drag_start_with_keys(&mut self, lng: f64, lat: f64, held_keys: Vec<String>) {
        self.coordinator
            .on_drag_start(&Self::pointer_event(lng, lat, Button::Left, held_keys))
            .unwrap();
    }

    pub fn drag_to(&mut self, lng: f64, lat: f64) {
        self.coordinator
            .on_drag(&Self::pointer_event(lng, lat, Button::Left, vec![]))
            .unwrap();
    }

    pub fn drag_to_with_keys(&mut self, lng: f64, lat: f64, held_keys: Vec<String>) {
        self.coordinator
            .on_drag(&Self::pointer_event(lng, lat, Button::Left, held_keys))
            .unwrap();
    }

    pub fn drag_end(&mut self, lng: f64, lat: f64) {
        self.coordinator
            .on_drag_end(&Self::pointer_event(lng, lat, Button::Left, vec![]))
            .unwrap();
    }

    pub fn key_down(&mut self, key: &str) {
        self.coordinator.on_key_down(&KeyEvent::new(key)).unwrap();
    }

    pub fn feature_count(&self) -> usize {
        self.coordinator.store().borrow().copy_all().len()
    }
}

/// Directly inserts a closed polygon stamped with `mode: "polygon"`,
/// bypassing polygon draw mode's click-by-click draft so scenario tests can
/// start from an already-finished feature.
pub fn create_polygon(store: &Rc<RefCell<FeatureStore>>, ring: &[(f64, f64)]) -> FeatureId {
    let coords: Vec<Coord> = ring.iter().map(|&(lng, lat)| Coord::new(lng, lat)).collect();
    let mut props = Properties::new();
    #[cfg(feature = "serde")]
    props.insert("mode".to_string(), serde_json::json!("polygon"));
    #[cfg(not(feature = "serde"))]
    props.insert("mode".to_string(), "polygon".to_string());

    let mut scope = MutationScope::new();
    let ids = store
        .borrow_mut()
        .create(
            &mut scope,
            vec![(Geometry::Polygon(Polygon::new(LineString::new(coords), vec![])), props)],
            false,
        )
        .unwrap();
    ids[0].clone()
}

/// Flag set granting a geometry kind every select-mode permission: body
/// drag, vertex drag/delete, midpoints, center-anchored resize, rotate.
pub fn full_select_flags(mode_name: &str) -> terradraw::mode::select::SelectFlags {
    use terradraw::mode::select::{CoordinateFlags, FeatureFlags, ModeFlags, Resizable, SelectFlags};
    let mut flags = SelectFlags::new();
    flags.set(
        mode_name,
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
