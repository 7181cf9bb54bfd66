#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use terradraw_types::Coord;

use crate::geometry::PixelPoint;

/// Which pointer button produced an event, as normalised by the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Button {
    Left,
    Right,
    Middle,
}

/// A pointer event as handed down by the adapter: the lng/lat the adapter
/// already resolved via `getLngLatFromEvent`, the raw container-pixel
/// position (used by drag handlers that reason in pixel deltas), which
/// button produced it, and whichever modifier keys were held.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointerEvent {
    pub lng: f64,
    pub lat: f64,
    pub container_x: f64,
    pub container_y: f64,
    pub button: Button,
    pub held_keys: Vec<String>,
}

impl PointerEvent {
    pub fn coord(&self) -> Coord {
        Coord::new(self.lng, self.lat)
    }

    pub fn pixel(&self) -> PixelPoint {
        PixelPoint {
            x: self.container_x,
            y: self.container_y,
        }
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.held_keys.iter().any(|k| k == key)
    }
}

/// A keyboard event: just the key name, matched against a mode's
/// key-event configuration (e.g. select mode's `delete`/`deselect`
/// bindings). An unset binding is modelled here as `Option::None`, which
/// the mode never matches against.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeyEvent {
    pub key: String,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        KeyEvent { key: key.into() }
    }
}
