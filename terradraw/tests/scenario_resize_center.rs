//! Concrete scenario: resizing a selected polygon about its centroid must
//! move the parent and every overlay point as a single update batch, not as
//! a destroy/rebuild.

mod support;

use support::{create_polygon, Harness};
use terradraw::mode::select::{CoordinateFlags, FeatureFlags, KeyBindings, ModeFlags, Resizable, SelectFlags, SelectMode};
use terradraw::mode::ChangeKind;

#[test]
fn resizing_updates_parent_and_overlay_in_one_batch() {
    let mut h = Harness::new();
    let store = h.coordinator.store();
    let id = create_polygon(&store, &[(10.0, 10.0), (10.0, 12.0), (12.0, 12.0), (12.0, 10.0)]);

    let mut flags = SelectFlags::new();
    flags.set(
        "polygon",
        ModeFlags {
            feature: Some(FeatureFlags {
                draggable: false,
                coordinates: Some(CoordinateFlags {
                    draggable: true,
                    deletable: false,
                    midpoints: false,
                    resizable: Resizable::Center,
                    rotatable: false,
                }),
            }),
        },
    );
    let mode = SelectMode::new(flags).unwrap().with_keys(KeyBindings::default());
    h.coordinator.add_mode("select", Box::new(mode)).unwrap();
    h.coordinator.set_active_mode("select").unwrap();

    h.click(11.0, 11.0);
    assert_eq!(h.selects.borrow().len(), 1);

    // No selection point or feature-body hit at (20, 20): with the scale
    // key held this falls through to resizing about the polygon's centroid.
    h.drag_start_with_keys(20.0, 20.0, vec!["Shift".to_string()]);

    h.changes.borrow_mut().clear();
    h.drag_to_with_keys(1.0, 1.0, vec!["Shift".to_string()]);
    h.drag_to_with_keys(1.0, 1.0, vec!["Shift".to_string()]);
    h.drag_end(1.0, 1.0);

    let batches = h.changes.borrow();
    let updates: Vec<_> = batches
        .iter()
        .filter(|(_, kind)| *kind == ChangeKind::Update)
        .collect();
    assert_eq!(updates.len(), 2, "each onDrag should emit exactly one update batch");
    for (ids, _) in &updates {
        assert_eq!(ids.len(), 5, "parent + 4 selection points must travel together");
        assert!(ids.contains(&id));
    }
}
