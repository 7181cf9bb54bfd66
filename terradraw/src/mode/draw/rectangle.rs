use terradraw_types::{Coord, FeatureId, Geometry, LineString, Polygon};

use crate::error::TerraDrawError;
use crate::mode::{FinishContext, KeyEvent, Mode, ModeBase, ModeState, PointerEvent, RegisterConfig};

use super::mode_properties;

enum DrawState {
    Idle,
    Sizing { id: FeatureId, anchor: Coord },
}

/// Rectangle mode: first click fixes one corner, mouse-move previews the
/// axis-aligned (in lng/lat) rectangle against the cursor, second click
/// finalizes.
pub struct RectangleMode {
    base: ModeBase,
    state: DrawState,
}

impl Default for RectangleMode {
    fn default() -> Self {
        RectangleMode {
            base: ModeBase::new("rectangle"),
            state: DrawState::Idle,
        }
    }
}

impl RectangleMode {
    pub fn new() -> Self {
        Self::default()
    }

    fn rectangle_ring(anchor: Coord, opposite: Coord) -> Vec<Coord> {
        let (min_lng, max_lng) = (anchor.lng.min(opposite.lng), anchor.lng.max(opposite.lng));
        let (min_lat, max_lat) = (anchor.lat.min(opposite.lat), anchor.lat.max(opposite.lat));
        vec![
            Coord::new(min_lng, min_lat),
            Coord::new(min_lng, max_lat),
            Coord::new(max_lng, max_lat),
            Coord::new(max_lng, min_lat),
            Coord::new(min_lng, min_lat),
        ]
    }

    fn clean_up(&mut self) -> Result<(), TerraDrawError> {
        if let DrawState::Sizing { id, .. } = std::mem::replace(&mut self.state, DrawState::Idle) {
            let store = self.base.store()?;
            let mut scope = self.base.new_scope();
            store.borrow_mut().delete(&mut scope, &id)?;
            self.base.emit_scope(scope)?;
            log::debug!("rectangle mode: draft {id} discarded");
        }
        Ok(())
    }
}

impl Mode for RectangleMode {
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
                let ring = Self::rectangle_ring(cursor, cursor);
                let props = mode_properties(self.base.name(), true);
                let mut scope = self.base.new_scope();
                let ids = store.borrow_mut().create(
                    &mut scope,
                    vec![(
                        Geometry::Polygon(Polygon::new(LineString::new(ring), vec![])),
                        props,
                    )],
                    true,
                )?;
                self.base.emit_scope(scope)?;
                self.state = DrawState::Sizing {
                    id: ids[0].clone(),
                    anchor: cursor,
                };
            }
            DrawState::Sizing { id, anchor } => {
                if anchor == cursor {
                    // a zero-area rectangle isn't a valid finalize target
                    self.state = DrawState::Sizing { id, anchor };
                    return Ok(());
                }
                let ring = Self::rectangle_ring(anchor, cursor);
                let mut scope = self.base.new_scope();
                store.borrow_mut().update_geometry(
                    &mut scope,
                    &id,
                    Geometry::Polygon(Polygon::new(LineString::new(ring), vec![])),
                    false,
                )?;
                self.base.emit_scope(scope)?;
                self.state = DrawState::Idle;

                let config = self.base.config()?;
                (config.on_finish)(
                    &id,
                    FinishContext {
                        action: "draw",
                        mode: self.base.name(),
                    },
                );
                log::debug!("rectangle mode: finalized {id}");
            }
        }
        Ok(())
    }

    fn on_mouse_move(&mut self, event: &PointerEvent) -> Result<(), TerraDrawError> {
        let DrawState::Sizing { id, anchor } = &self.state else {
            return Ok(());
        };
        let ring = Self::rectangle_ring(*anchor, event.coord());

        let store = self.base.store()?;
        let mut scope = self.base.new_scope();
        store.borrow_mut().update_geometry(
            &mut scope,
            id,
            Geometry::Polygon(Polygon::new(LineString::new(ring), vec![])),
            true,
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
