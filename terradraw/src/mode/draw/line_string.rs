use terradraw_types::{Coord, FeatureId, Geometry, LineString as LineStringGeom};

use crate::error::TerraDrawError;
use crate::mode::{FinishContext, KeyEvent, Mode, ModeBase, ModeState, PointerEvent, RegisterConfig};

use super::{cleared_draft_property, mode_properties};

enum DrawState {
    /// No click yet: the mode only remembers the pending start point once
    /// the very first click lands, so it never has to store a
    /// single-vertex draft (a `LineString` always needs >= 2 distinct
    /// coordinates -- see `LineString::validate`).
    Idle,
    /// One vertex is fixed but the feature doesn't exist in the store yet
    /// because the cursor hasn't moved away from it (creating `[p0, p0]`
    /// would violate the no-consecutive-duplicates invariant).
    PendingFirstMove { start: Coord },
    Drawing { id: FeatureId, fixed: Vec<Coord> },
}

/// Line-string mode: click to place vertices; the Enter key finalizes
/// (of the two usual terminal events for this kind of mode, double-click
/// and a close key, this implementation uses the close key since the
/// event model here has no distinct double-click sink). Escape abandons
/// the draft.
pub struct LineStringMode {
    base: ModeBase,
    state: DrawState,
}

impl Default for LineStringMode {
    fn default() -> Self {
        LineStringMode {
            base: ModeBase::new("linestring"),
            state: DrawState::Idle,
        }
    }
}

impl LineStringMode {
    pub fn new() -> Self {
        Self::default()
    }

    fn clean_up(&mut self) -> Result<(), TerraDrawError> {
        if let DrawState::Drawing { id, .. } = std::mem::replace(&mut self.state, DrawState::Idle) {
            let store = self.base.store()?;
            let mut scope = self.base.new_scope();
            store.borrow_mut().delete(&mut scope, &id)?;
            self.base.emit_scope(scope)?;
            log::debug!("linestring mode: draft {id} discarded");
        }
        Ok(())
    }
}

impl Mode for LineStringMode {
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
        self.state = DrawState::Idle;
        self.base.stop()
    }

    fn on_click(&mut self, event: &PointerEvent) -> Result<(), TerraDrawError> {
        let cursor = event.coord();
        let store = self.base.store()?;

        match std::mem::replace(&mut self.state, DrawState::Idle) {
            DrawState::Idle => {
                self.state = DrawState::PendingFirstMove { start: cursor };
            }
            DrawState::PendingFirstMove { start } => {
                if start == cursor {
                    // no movement yet: stay pending
                    self.state = DrawState::PendingFirstMove { start };
                    return Ok(());
                }
                let props = mode_properties(self.base.name(), true);
                let mut scope = self.base.new_scope();
                let ids = store.borrow_mut().create(
                    &mut scope,
                    vec![(
                        Geometry::LineString(LineStringGeom::new(vec![start, cursor])),
                        props,
                    )],
                    true,
                )?;
                self.base.emit_scope(scope)?;
                self.state = DrawState::Drawing {
                    id: ids[0].clone(),
                    fixed: vec![start, cursor],
                };
            }
            DrawState::Drawing { id, mut fixed } => {
                if fixed.last() == Some(&cursor) {
                    // clicking on the same spot twice adds nothing
                    self.state = DrawState::Drawing { id, fixed };
                    return Ok(());
                }
                fixed.push(cursor);
                let mut scope = self.base.new_scope();
                store.borrow_mut().update_geometry(
                    &mut scope,
                    &id,
                    Geometry::LineString(LineStringGeom::new(fixed.clone())),
                    true,
                )?;
                self.base.emit_scope(scope)?;
                self.state = DrawState::Drawing { id, fixed };
            }
        }
        Ok(())
    }

    fn on_mouse_move(&mut self, event: &PointerEvent) -> Result<(), TerraDrawError> {
        let DrawState::Drawing { id, fixed } = &self.state else {
            return Ok(());
        };
        let cursor = event.coord();
        if fixed.last() == Some(&cursor) {
            return Ok(());
        }
        let mut coords = fixed.clone();
        coords.push(cursor);

        let store = self.base.store()?;
        let mut scope = self.base.new_scope();
        store.borrow_mut().update_geometry(
            &mut scope,
            id,
            Geometry::LineString(LineStringGeom::new(coords)),
            true,
        )?;
        self.base.emit_scope(scope)?;
        Ok(())
    }

    fn on_key_down(&mut self, event: &KeyEvent) -> Result<(), TerraDrawError> {
        match event.key.as_str() {
            "Escape" => self.clean_up(),
            "Enter" => {
                let DrawState::Drawing { id, fixed } =
                    std::mem::replace(&mut self.state, DrawState::Idle)
                else {
                    return Ok(());
                };
                if fixed.len() < 2 {
                    self.state = DrawState::Drawing { id, fixed };
                    return Ok(());
                }
                let store = self.base.store()?;
                let mut scope = self.base.new_scope();
                store.borrow_mut().update_geometry(
                    &mut scope,
                    &id,
                    Geometry::LineString(LineStringGeom::new(fixed)),
                    false,
                )?;
                store
                    .borrow_mut()
                    .update_properties(&mut scope, &id, cleared_draft_property())?;
                self.base.emit_scope(scope)?;

                let config = self.base.config()?;
                (config.on_finish)(
                    &id,
                    FinishContext {
                        action: "draw",
                        mode: self.base.name(),
                    },
                );
                log::debug!("linestring mode: finalized {id}");
                Ok(())
            }
            _ => Ok(()),
        }
    }
}
