use terradraw_types::{Coord, FeatureId, Geometry, LineString as LineStringGeom};

use crate::error::TerraDrawError;
use crate::geometry::simplify_rdp;
use crate::mode::{FinishContext, KeyEvent, Mode, ModeBase, ModeState, PointerEvent, RegisterConfig};

use super::mode_properties;

/// Perpendicular-distance tolerance (lng/lat degrees) applied to the raw
/// sample trail on release.
const SIMPLIFY_EPSILON: f64 = 0.00005;

enum DrawState {
    Idle,
    Sampling { id: FeatureId, samples: Vec<Coord> },
}

/// Freehand mode: a single drag gesture accumulates pointer-move samples
/// while the button is held, simplifying the trail down to a manageable
/// vertex count on release.
pub struct FreehandMode {
    base: ModeBase,
    state: DrawState,
}

impl Default for FreehandMode {
    fn default() -> Self {
        FreehandMode {
            base: ModeBase::new("freehand"),
            state: DrawState::Idle,
        }
    }
}

impl FreehandMode {
    pub fn new() -> Self {
        Self::default()
    }

    fn clean_up(&mut self) -> Result<(), TerraDrawError> {
        if let DrawState::Sampling { id, .. } = std::mem::replace(&mut self.state, DrawState::Idle) {
            let store = self.base.store()?;
            let mut scope = self.base.new_scope();
            store.borrow_mut().delete(&mut scope, &id)?;
            self.base.emit_scope(scope)?;
            log::debug!("freehand mode: draft {id} discarded");
        }
        Ok(())
    }
}

impl Mode for FreehandMode {
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

    fn on_drag_start(&mut self, event: &PointerEvent) -> Result<(), TerraDrawError> {
        self.clean_up()?;
        let cursor = event.coord();
        let store = self.base.store()?;
        let props = mode_properties(self.base.name(), true);
        let mut scope = self.base.new_scope();
        let ids = store.borrow_mut().create(
            &mut scope,
            vec![(
                Geometry::LineString(LineStringGeom::new(vec![cursor, cursor])),
                props,
            )],
            true,
        )?;
        self.base.emit_scope(scope)?;
        self.state = DrawState::Sampling {
            id: ids[0].clone(),
            samples: vec![cursor],
        };
        (self.base.config()?.set_map_draggability)(false);
        Ok(())
    }

    fn on_drag(&mut self, event: &PointerEvent) -> Result<(), TerraDrawError> {
        let DrawState::Sampling { id, samples } = &mut self.state else {
            return Ok(());
        };
        let cursor = event.coord();
        if samples.last() == Some(&cursor) {
            return Ok(());
        }
        samples.push(cursor);

        // A single repeated sample is still an invalid 1-point line; only
        // push to the store once there's a second, distinct point.
        if samples.len() < 2 {
            return Ok(());
        }

        let store = self.base.store()?;
        let mut scope = self.base.new_scope();
        store.borrow_mut().update_geometry(
            &mut scope,
            id,
            Geometry::LineString(LineStringGeom::new(samples.clone())),
            true,
        )?;
        self.base.emit_scope(scope)?;
        Ok(())
    }

    fn on_drag_end(&mut self, _event: &PointerEvent) -> Result<(), TerraDrawError> {
        let DrawState::Sampling { id, samples } =
            std::mem::replace(&mut self.state, DrawState::Idle)
        else {
            return Ok(());
        };
        (self.base.config()?.set_map_draggability)(true);

        if samples.len() < 2 {
            let store = self.base.store()?;
            let mut scope = self.base.new_scope();
            store.borrow_mut().delete(&mut scope, &id)?;
            self.base.emit_scope(scope)?;
            return Ok(());
        }

        let simplified = simplify_rdp(&samples, SIMPLIFY_EPSILON);
        let store = self.base.store()?;
        let mut scope = self.base.new_scope();
        store.borrow_mut().update_geometry(
            &mut scope,
            &id,
            Geometry::LineString(LineStringGeom::new(simplified)),
            false,
        )?;
        self.base.emit_scope(scope)?;

        let config = self.base.config()?;
        (config.on_finish)(
            &id,
            FinishContext {
                action: "draw",
                mode: self.base.name(),
            },
        );
        log::debug!("freehand mode: finalized {id} ({} raw samples)", samples.len());
        Ok(())
    }

    fn on_key_down(&mut self, event: &KeyEvent) -> Result<(), TerraDrawError> {
        if event.key == "Escape" {
            self.clean_up()?;
        }
        Ok(())
    }
}
