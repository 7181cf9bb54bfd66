use terradraw_types::{Coord, FeatureId, Geometry, LineString as LineStringGeom};

use crate::error::TerraDrawError;
use crate::geometry::densify_great_circle_segment;
use crate::mode::{FinishContext, KeyEvent, Mode, ModeBase, ModeState, PointerEvent, RegisterConfig};

use super::{cleared_draft_property, mode_properties};

/// Chord-deviation tolerance, in kilometres, below which a segment is left
/// un-densified.
const ARC_TOLERANCE_KM: f64 = 10.0;
const ARC_MAX_DEPTH: u32 = 8;

enum DrawState {
    Idle,
    PendingFirstMove { start: Coord },
    /// `vertices` holds the densified arc so far (every committed point,
    /// already expanded with any intermediate arc samples); `anchors` holds
    /// just the user-placed clicks, needed to densify the next ghost
    /// segment from the last anchor to the cursor.
    Drawing {
        id: FeatureId,
        vertices: Vec<Coord>,
        anchors: Vec<Coord>,
    },
}

fn densify_path(anchors: &[Coord]) -> Vec<Coord> {
    let mut out = Vec::with_capacity(anchors.len());
    out.push(anchors[0]);
    for w in anchors.windows(2) {
        let (a, b) = (w[0], w[1]);
        out.extend(densify_great_circle_segment(a, b, ARC_TOLERANCE_KM, ARC_MAX_DEPTH));
        out.push(b);
    }
    out
}

/// Great-circle mode: behaves like line-string mode (click to place
/// vertices, Enter to finish, Escape to abandon) but densifies each
/// committed segment into a great-circle arc rather than leaving it as a
/// straight lng/lat segment.
pub struct GreatCircleMode {
    base: ModeBase,
    state: DrawState,
}

impl Default for GreatCircleMode {
    fn default() -> Self {
        GreatCircleMode {
            base: ModeBase::new("greatcircle"),
            state: DrawState::Idle,
        }
    }
}

impl GreatCircleMode {
    pub fn new() -> Self {
        Self::default()
    }

    fn clean_up(&mut self) -> Result<(), TerraDrawError> {
        if let DrawState::Drawing { id, .. } = std::mem::replace(&mut self.state, DrawState::Idle) {
            let store = self.base.store()?;
            let mut scope = self.base.new_scope();
            store.borrow_mut().delete(&mut scope, &id)?;
            self.base.emit_scope(scope)?;
            log::debug!("great-circle mode: draft {id} discarded");
        }
        Ok(())
    }
}

impl Mode for GreatCircleMode {
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
                    self.state = DrawState::PendingFirstMove { start };
                    return Ok(());
                }
                let anchors = vec![start, cursor];
                let vertices = densify_path(&anchors);
                let props = mode_properties(self.base.name(), true);
                let mut scope = self.base.new_scope();
                let ids = store.borrow_mut().create(
                    &mut scope,
                    vec![(Geometry::LineString(LineStringGeom::new(vertices.clone())), props)],
                    true,
                )?;
                self.base.emit_scope(scope)?;
                self.state = DrawState::Drawing {
                    id: ids[0].clone(),
                    vertices,
                    anchors,
                };
            }
            DrawState::Drawing { id, vertices, mut anchors } => {
                if anchors.last() == Some(&cursor) {
                    self.state = DrawState::Drawing { id, vertices, anchors };
                    return Ok(());
                }
                anchors.push(cursor);
                let vertices = densify_path(&anchors);
                let mut scope = self.base.new_scope();
                store.borrow_mut().update_geometry(
                    &mut scope,
                    &id,
                    Geometry::LineString(LineStringGeom::new(vertices.clone())),
                    true,
                )?;
                self.base.emit_scope(scope)?;
                self.state = DrawState::Drawing { id, vertices, anchors };
            }
        }
        Ok(())
    }

    fn on_mouse_move(&mut self, event: &PointerEvent) -> Result<(), TerraDrawError> {
        let DrawState::Drawing { id, anchors, .. } = &self.state else {
            return Ok(());
        };
        let cursor = event.coord();
        if anchors.last() == Some(&cursor) {
            return Ok(());
        }
        let mut ghost_anchors = anchors.clone();
        ghost_anchors.push(cursor);
        let vertices = densify_path(&ghost_anchors);

        let store = self.base.store()?;
        let mut scope = self.base.new_scope();
        store.borrow_mut().update_geometry(
            &mut scope,
            id,
            Geometry::LineString(LineStringGeom::new(vertices)),
            true,
        )?;
        self.base.emit_scope(scope)?;
        Ok(())
    }

    fn on_key_down(&mut self, event: &KeyEvent) -> Result<(), TerraDrawError> {
        match event.key.as_str() {
            "Escape" => self.clean_up(),
            "Enter" => {
                let DrawState::Drawing { id, vertices, anchors } =
                    std::mem::replace(&mut self.state, DrawState::Idle)
                else {
                    return Ok(());
                };
                if anchors.len() < 2 {
                    self.state = DrawState::Drawing { id, vertices, anchors };
                    return Ok(());
                }
                let store = self.base.store()?;
                let mut scope = self.base.new_scope();
                store.borrow_mut().update_geometry(
                    &mut scope,
                    &id,
                    Geometry::LineString(LineStringGeom::new(vertices)),
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
                log::debug!("great-circle mode: finalized {id}");
                Ok(())
            }
            _ => Ok(()),
        }
    }
}
