//! Concrete scenario: right-clicking a selected vertex deletes it when
//! `coordinates.deletable` is set, and is a no-op when it isn't.

mod support;

use support::{create_polygon, Harness};
use terradraw::mode::select::{CoordinateFlags, FeatureFlags, ModeFlags, SelectFlags, SelectMode};
use terradraw_types::Geometry;

fn flags_with_deletable(deletable: bool) -> SelectFlags {
    let mut flags = SelectFlags::new();
    flags.set(
        "polygon",
        ModeFlags {
            feature: Some(FeatureFlags {
                draggable: true,
                coordinates: Some(CoordinateFlags {
                    draggable: true,
                    deletable,
                    midpoints: false,
                    ..Default::default()
                }),
            }),
        },
    );
    flags
}

#[test]
fn deletable_right_click_removes_the_vertex() {
    let mut h = Harness::new();
    let store = h.coordinator.store();
    let id = create_polygon(&store, &[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);

    h.coordinator
        .add_mode("select", Box::new(SelectMode::new(flags_with_deletable(true)).unwrap()))
        .unwrap();
    h.coordinator.set_active_mode("select").unwrap();

    h.click(0.5, 0.5);
    h.right_click(0.0, 0.0);

    let geometry = store.borrow().geometry_copy(&id).unwrap();
    let Geometry::Polygon(p) = geometry else {
        panic!("expected polygon")
    };
    // 3 remaining distinct vertices + the closing coordinate = 4.
    assert_eq!(p.exterior().len(), 4);
}

#[test]
fn non_deletable_right_click_is_a_no_op() {
    let mut h = Harness::new();
    let store = h.coordinator.store();
    let id = create_polygon(&store, &[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);

    h.coordinator
        .add_mode("select", Box::new(SelectMode::new(flags_with_deletable(false)).unwrap()))
        .unwrap();
    h.coordinator.set_active_mode("select").unwrap();

    h.click(0.5, 0.5);
    h.right_click(0.0, 0.0);

    let geometry = store.borrow().geometry_copy(&id).unwrap();
    let Geometry::Polygon(p) = geometry else {
        panic!("expected polygon")
    };
    assert_eq!(p.exterior().len(), 5, "ring must be untouched");
}
