//! One state machine per geometry kind. Every draw mode follows the same
//! shape: `Idle` until the first click starts a draft feature, then
//! `store.create`/`store.updateGeometry` calls track the cursor until a
//! terminal event finalizes (or Escape discards) the draft.
//!
//! Each mode embeds a [`ModeBase`](super::ModeBase) for lifecycle/style
//! bookkeeping and implements [`super::Mode`] for the event sinks it
//! actually needs; the others are left at the trait's no-op default.

pub mod circle;
pub mod freehand;
pub mod great_circle;
pub mod line_string;
pub mod point;
pub mod polygon;
pub mod rectangle;

pub use circle::CircleMode;
pub use freehand::FreehandMode;
pub use great_circle::GreatCircleMode;
pub use line_string::LineStringMode;
pub use point::PointMode;
pub use polygon::PolygonMode;
pub use rectangle::RectangleMode;

use terradraw_types::{Properties, MODE_PROPERTY};

/// Reserved property a draw mode sets on a feature while it is still being
/// drawn. Its presence is what lets [`FeatureStore::create`]/`update_geometry`
/// (via their `allow_draft` flag) skip the self-intersection check for a
/// partially-specified polygon -- the only sanctioned way to hold an
/// invalid-looking ring mid-draw.
pub const DRAFT_PROPERTY: &str = "_terradrawDraft";

#[cfg(feature = "serde")]
pub fn mode_properties(mode_name: &str, draft: bool) -> Properties {
    let mut props = Properties::new();
    props.insert(MODE_PROPERTY.to_string(), serde_json::json!(mode_name));
    if draft {
        props.insert(DRAFT_PROPERTY.to_string(), serde_json::json!(true));
    }
    props
}

#[cfg(not(feature = "serde"))]
pub fn mode_properties(mode_name: &str, draft: bool) -> Properties {
    let mut props = Properties::new();
    props.insert(MODE_PROPERTY.to_string(), mode_name.to_string());
    if draft {
        props.insert(DRAFT_PROPERTY.to_string(), "true".to_string());
    }
    props
}

/// Clears the draft flag on finalize. Properties are merge-only (the store
/// has no "remove key" operation), so this sets the flag to `false` rather
/// than deleting the key.
#[cfg(feature = "serde")]
pub fn cleared_draft_property() -> Properties {
    let mut props = Properties::new();
    props.insert(DRAFT_PROPERTY.to_string(), serde_json::json!(false));
    props
}

#[cfg(not(feature = "serde"))]
pub fn cleared_draft_property() -> Properties {
    let mut props = Properties::new();
    props.insert(DRAFT_PROPERTY.to_string(), "false".to_string());
    props
}
