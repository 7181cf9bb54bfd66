use terradraw_types::{Coord, FeatureId, Geometry, LineString, Polygon};

use crate::error::TerraDrawError;
use crate::geometry::self_intersects;
use crate::mode::{FinishContext, Mode, ModeBase, ModeState, PointerEvent, RegisterConfig};

use super::{cleared_draft_property, mode_properties};

enum DrawState {
    Idle,
    /// `fixed` holds every vertex committed so far (not including the
    /// ghost vertex tracking the cursor); the draft feature's current ring
    /// is always `fixed ++ [cursor, fixed[0]]`.
    Drawing { id: FeatureId, fixed: Vec<Coord> },
}

/// Polygon mode: click to place vertices, click near the first vertex to
/// close the ring, Escape to abandon the draft.
pub struct PolygonMode {
    base: ModeBase,
    state: DrawState,
}

impl Default for PolygonMode {
    fn default() -> Self {
        PolygonMode {
            base: ModeBase::new("polygon"),
            state: DrawState::Idle,
        }
    }
}

impl PolygonMode {
    pub fn new() -> Self {
        Self::default()
    }

    fn ring_for(fixed: &[Coord], cursor: Coord) -> Vec<Coord> {
        let mut ring = fixed.to_vec();
        ring.push(cursor);
        ring.push(fixed[0]);
        ring
    }

    fn clean_up(&mut self) -> Result<(), TerraDrawError> {
        if let DrawState::Drawing { id, .. } = std::mem::replace(&mut self.state, DrawState::Idle) {
            let store = self.base.store()?;
            let mut scope = self.base.new_scope();
            store.borrow_mut().delete(&mut scope, &id)?;
            self.base.emit_scope(scope)?;
            log::debug!("polygon mode: draft {id} discarded");
        }
        Ok(())
    }
}

impl Mode for PolygonMode {
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

        match &self.state {
            DrawState::Idle => {
                let ring = vec![cursor, cursor, cursor, cursor];
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
                self.state = DrawState::Drawing {
                    id: ids[0].clone(),
                    fixed: vec![cursor],
                };
            }
            DrawState::Drawing { id, fixed } => {
                let id = id.clone();
                let first = fixed[0];

                // A click that lands back near the first vertex closes the
                // ring using the vertices already committed -- it does not
                // itself introduce a new distinct vertex. At least 3 must
                // already be fixed for the resulting ring to be a real
                // polygon rather than a doubled-back line.
                let closes = fixed.len() >= 3 && {
                    let px_first = self.base.project(first.lng, first.lat)?;
                    let px_cursor = self.base.project(cursor.lng, cursor.lat)?;
                    let dx = px_first.x - px_cursor.x;
                    let dy = px_first.y - px_cursor.y;
                    (dx * dx + dy * dy).sqrt() <= self.base.pointer_distance()
                };

                if closes {
                    let mut ring = fixed.clone();
                    ring.push(first);
                    let polygon = Polygon::new(LineString::new(ring), vec![]);
                    let mut scope = self.base.new_scope();
                    store.borrow_mut().update_geometry(
                        &mut scope,
                        &id,
                        Geometry::Polygon(polygon),
                        false,
                    )?;
                    store
                        .borrow_mut()
                        .update_properties(&mut scope, &id, cleared_draft_property())?;
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
                    log::debug!("polygon mode: finalized {id}");
                } else {
                    let mut new_fixed = fixed.clone();
                    new_fixed.push(cursor);
                    let ring = Self::ring_for(&new_fixed, cursor);
                    let mut scope = self.base.new_scope();
                    store.borrow_mut().update_geometry(
                        &mut scope,
                        &id,
                        Geometry::Polygon(Polygon::new(LineString::new(ring), vec![])),
                        true,
                    )?;
                    self.base.emit_scope(scope)?;
                    self.state = DrawState::Drawing {
                        id,
                        fixed: new_fixed,
                    };
                }
            }
        }
        Ok(())
    }

    fn on_mouse_move(&mut self, event: &PointerEvent) -> Result<(), TerraDrawError> {
        let DrawState::Drawing { id, fixed } = &self.state else {
            return Ok(());
        };
        let cursor = event.coord();
        let ring = Self::ring_for(fixed, cursor);

        // Self-intersection is only checked against edges that are already
        // committed; the ghost edge trailing the cursor is allowed to cross
        // nothing yet drawn because it hasn't been confirmed.
        if fixed.len() >= 2 && self_intersects(&ring) {
            log::warn!("polygon mode: suppressed move that would self-intersect");
            return Ok(());
        }

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

    fn on_key_down(&mut self, event: &crate::mode::KeyEvent) -> Result<(), TerraDrawError> {
        if event.key == "Escape" {
            self.clean_up()?;
        }
        Ok(())
    }
}
