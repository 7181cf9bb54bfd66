use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Geometry;

/// Opaque, store-assigned feature identifier.
pub type FeatureId = String;

/// Reserved property key that names the mode with stylistic authority over
/// a feature (e.g. `"polygon"`, `"select"`, `"selection-point"`, `"midpoint"`).
pub const MODE_PROPERTY: &str = "mode";

/// Reserved property key set by the select mode to mark a feature as
/// currently selected.
pub const SELECTED_PROPERTY: &str = "selected";

/// A free-form property bag. Values are JSON-like scalars/containers when the
/// `serde` feature is enabled; callers should not assume a value's shape
/// beyond "whatever the mode that wrote it put there".
#[cfg(feature = "serde")]
pub type Properties = BTreeMap<String, serde_json::Value>;

#[cfg(not(feature = "serde"))]
pub type Properties = BTreeMap<String, String>;

/// A single geographic feature: an id, its geometry, and its properties.
///
/// This mirrors a GeoJSON Feature. Two property keys are reserved and
/// managed by the feature store / select mode rather than by callers
/// directly: [`MODE_PROPERTY`] and [`SELECTED_PROPERTY`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Feature {
    pub id: FeatureId,
    pub geometry: Geometry,
    pub properties: Properties,
}

impl Feature {
    pub fn new(id: FeatureId, geometry: Geometry, properties: Properties) -> Self {
        Feature {
            id,
            geometry,
            properties,
        }
    }

    pub fn mode(&self) -> Option<&str> {
        #[cfg(feature = "serde")]
        {
            self.properties.get(MODE_PROPERTY).and_then(|v| v.as_str())
        }
        #[cfg(not(feature = "serde"))]
        {
            self.properties.get(MODE_PROPERTY).map(String::as_str)
        }
    }

    pub fn is_selected(&self) -> bool {
        #[cfg(feature = "serde")]
        {
            self.properties
                .get(SELECTED_PROPERTY)
                .and_then(|v| v.as_bool())
                .unwrap_or(false)
        }
        #[cfg(not(feature = "serde"))]
        {
            self.properties
                .get(SELECTED_PROPERTY)
                .map(|v| v == "true")
                .unwrap_or(false)
        }
    }
}
