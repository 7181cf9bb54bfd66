//! Concrete scenario: deleting any vertex of a triangle would leave fewer
//! than 3 distinct vertices, so the deletion must be silently suppressed
//! and the store left untouched.

mod support;

use support::{create_polygon, full_select_flags, Harness};
use terradraw::mode::select::SelectMode;
use terradraw_types::Geometry;

#[test]
fn deleting_a_triangle_vertex_is_suppressed() {
    let mut h = Harness::new();
    let store = h.coordinator.store();
    let id = create_polygon(&store, &[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)]);

    h.coordinator
        .add_mode("select", Box::new(SelectMode::new(full_select_flags("polygon")).unwrap()))
        .unwrap();
    h.coordinator.set_active_mode("select").unwrap();

    h.click(0.3, 0.4);
    assert_eq!(h.selects.borrow().len(), 1);

    let before = h.changes.borrow().len();
    h.right_click(0.0, 0.0);

    assert_eq!(h.changes.borrow().len(), before, "no change batch should be emitted");
    let geometry = store.borrow().geometry_copy(&id).unwrap();
    let Geometry::Polygon(p) = geometry else {
        panic!("expected polygon")
    };
    assert_eq!(p.exterior().len(), 4, "triangle ring must be untouched");
}
