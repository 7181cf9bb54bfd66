use terradraw_types::{Coord, FeatureId, Geometry, LineString, Polygon};

use crate::error::TerraDrawError;
use crate::geometry::{circle_polygon, haversine_distance_km};
use crate::mode::{FinishContext, KeyEvent, Mode, ModeBase, ModeState, PointerEvent, RegisterConfig};

use super::mode_properties;

/// Vertex count of the polygon approximating the circle.
const CIRCLE_STEPS: usize = 64;

/// Placeholder radius (km) for the very first click, before the cursor has
/// moved.
const INITIAL_RADIUS_KM: f64 = 0.00001;

enum DrawState {
    Idle,
    Sized { id: FeatureId, center: Coord },
}

/// Circle mode: first click drops the center, mouse-move sizes the radius
/// to the cursor's distance from it, second click finalizes.
pub struct CircleMode {
    base: ModeBase,
    state: DrawState,
}

impl Default for CircleMode {
    fn default() -> Self {
        CircleMode {
            base: ModeBase::new("circle"),
            state: DrawState::Idle,
        }
    }
}

impl CircleMode {
    pub fn new() -> Self {
        Self::default()
    }

    fn circle_geometry(center: Coord, radius_km: f64) -> Geometry {
        Geometry::Polygon(Polygon::new(
            LineString::new(circle_polygon(center, radius_km, CIRCLE_STEPS)),
            vec![],
        ))
    }

    fn clean_up(&mut self) -> Result<(), TerraDrawError> {
        if let DrawState::Sized { id, .. } = std::mem::replace(&mut self.state, DrawState::Idle) {
            let store = self.base.store()?;
            let mut scope = self.base.new_scope();
            store.borrow_mut().delete(&mut scope, &id)?;
            self.base.emit_scope(scope)?;
            log::debug!("circle mode: draft {id} discarded");
        }
        Ok(())
    }
}

impl Mode for CircleMode {
    fn name(&self) -> &'static str {
        self.base.name()
    }

    fn state(&self) -> ModeState {
        self.base.state()
    }

    fn register(&mut self, config: RegisterConfig) -> Result<(), TerraDrawError> {
        self.base.register(config)
    }

    fn start(&mut self) -> Result<(), TerraDrawError> {
        self.base.start("crosshair")
    }

    fn stop(&mut self) -> Result<(), TerraDrawError> {
        self.clean_up()?;
        self.base.stop()
    }

    fn on_click(&mut self, event: &PointerEvent) -> Result<(), TerraDrawError> {
        let cursor = event.coord();
        let store = self.base.store()?;

        match std::mem::replace(&mut self.state, DrawState::Idle) {
            DrawState::Idle => {
                let props = mode_properties(self.base.name(), false);
                let mut scope = self.base.new_scope();
                let ids = store.borrow_mut().create(
                    &mut scope,
                    vec![(Self::circle_geometry(cursor, INITIAL_RADIUS_KM), props)],
                    false,
                )?;
                self.base.emit_scope(scope)?;
                self.state = DrawState::Sized {
                    id: ids[0].clone(),
                    center: cursor,
                };
            }
            DrawState::Sized { id, center } => {
                self.state = DrawState::Idle;
                let config = self.base.config()?;
                (config.on_finish)(
                    &id,
                    FinishContext {
                        action: "draw",
                        mode: self.base.name(),
                    },
                );
                log::debug!("circle mode: finalized {id} (center {center:?})");
            }
        }
        Ok(())
    }

    fn on_mouse_move(&mut self, event: &PointerEvent) -> Result<(), TerraDrawError> {
        let DrawState::Sized { id, center } = &self.state else {
            return Ok(());
        };
        let cursor = event.coord();
        let radius_km = haversine_distance_km(*center, cursor);

        let store = self.base.store()?;
        let mut scope = self.base.new_scope();
        store.borrow_mut().update_geometry(
            &mut scope,
            id,
            Self::circle_geometry(*center, radius_km),
            false,
        )?;
        self.base.emit_scope(scope)?;
        Ok(())
    }

    fn on_key_down(&mut self, event: &KeyEvent) -> Result<(), TerraDrawError> {
        if event.key == "Escape" {
            self.clean_up()?;
        }
        Ok(())
    }
}
