use std::collections::BTreeMap;

use crate::error::TerraDrawError;

/// How a selected feature's vertices may be scaled by a drag. `Disabled`
/// means resizing is off for this geometry kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resizable {
    Disabled,
    Center,
    Opposite,
}

/// Per-geometry-kind permissions for the coordinate (vertex) level of a
/// selected feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CoordinateFlags {
    pub draggable: bool,
    pub deletable: bool,
    pub midpoints: bool,
    pub resizable: Resizable,
    pub rotatable: bool,
}

impl Default for Resizable {
    fn default() -> Self {
        Resizable::Disabled
    }
}

/// Per-geometry-kind permissions for the feature level of a selected
/// feature, plus (optionally) its coordinate-level permissions.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureFlags {
    pub draggable: bool,
    pub coordinates: Option<CoordinateFlags>,
}

/// What select mode is permitted to do with one geometry kind. A missing
/// entry in [`SelectFlags`] means that kind isn't selectable at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModeFlags {
    pub feature: Option<FeatureFlags>,
}

/// The full `mode -> flags` mapping select mode is parameterised by. Keyed
/// by the same mode-name strings the feature store's `mode` property uses
/// (e.g. `"polygon"`, `"linestring"`, `"point"`).
#[derive(Debug, Clone, Default)]
pub struct SelectFlags(BTreeMap<String, ModeFlags>);

impl SelectFlags {
    pub fn new() -> Self {
        SelectFlags(BTreeMap::new())
    }

    pub fn set(&mut self, mode_name: impl Into<String>, flags: ModeFlags) {
        self.0.insert(mode_name.into(), flags);
    }

    pub fn get(&self, mode_name: &str) -> Option<&ModeFlags> {
        self.0.get(mode_name)
    }

    pub fn is_selectable(&self, mode_name: &str) -> bool {
        self.0.contains_key(mode_name)
    }

    /// Eager configuration validation: `coordinates.midpoints`
    /// without `coordinates.draggable` is a contradiction select mode
    /// can't act on (there would be a vertex to grab, but no drag would
    /// ever take hold of it) and is rejected at `register()` time rather
    /// than discovered mid-interaction.
    pub fn validate(&self) -> Result<(), TerraDrawError> {
        for (name, mode_flags) in &self.0 {
            if let Some(feature) = mode_flags.feature {
                if let Some(coords) = feature.coordinates {
                    if coords.midpoints && !coords.draggable {
                        return Err(TerraDrawError::InvalidFlags(format!(
                            "{name}: coordinates.midpoints requires coordinates.draggable"
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoints_without_draggable_is_rejected() {
        let mut flags = SelectFlags::new();
        flags.set(
            "polygon",
            ModeFlags {
                feature: Some(FeatureFlags {
                    draggable: true,
                    coordinates: Some(CoordinateFlags {
                        draggable: false,
                        midpoints: true,
                        ..Default::default()
                    }),
                }),
            },
        );
        assert!(flags.validate().is_err());
    }

    #[test]
    fn consistent_flags_validate() {
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
        assert!(flags.validate().is_ok());
    }
}
