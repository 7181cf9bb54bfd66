use terradraw_types::{Geometry, Point as PointGeom};

use crate::error::TerraDrawError;
use crate::mode::{FinishContext, Mode, ModeBase, ModeState, PointerEvent, RegisterConfig};

use super::mode_properties;

/// The simplest draw mode: every click creates a single, immediately
/// finished point feature. There is no draft state -- a point has no
/// terminal event to wait for beyond the click itself.
pub struct PointMode {
    base: ModeBase,
}

impl Default for PointMode {
    fn default() -> Self {
        PointMode {
            base: ModeBase::new("point"),
        }
    }
}

impl PointMode {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Mode for PointMode {
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
        self.base.stop()
    }

    fn on_click(&mut self, event: &PointerEvent) -> Result<(), TerraDrawError> {
        let store = self.base.store()?;
        let mut scope = self.base.new_scope();
        let props = mode_properties(self.base.name(), false);
        let ids = store.borrow_mut().create(
            &mut scope,
            vec![(Geometry::Point(PointGeom::new(event.lng, event.lat)), props)],
            false,
        )?;
        self.base.emit_scope(scope)?;

        let id = ids[0].clone();
        let config = self.base.config()?;
        (config.on_finish)(
            &id,
            FinishContext {
                action: "draw",
                mode: self.base.name(),
            },
        );
        log::debug!("point mode: created {id}");
        Ok(())
    }
}
