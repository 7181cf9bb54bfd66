//! The shared base every mode (draw or select) is built on: lifecycle
//! state, event sinks, style resolution, and the config handed down from
//! the [`Coordinator`](crate::coordinator::Coordinator) at registration.

mod event;
mod style;

pub mod draw;
pub mod select;

pub use event::{Button, KeyEvent, PointerEvent};
pub use style::{StyleValue, Styles};

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use terradraw_types::{Feature, FeatureId};

use crate::error::TerraDrawError;
use crate::geometry::PixelPoint;
use crate::store::{FeatureStore, MutationScope};

/// Pixel-space hit-testing tolerance default ("pointer distance"). Every
/// mode starts with this and may override it via
/// [`ModeBase::set_pointer_distance`].
pub const DEFAULT_POINTER_DISTANCE_PX: f64 = 40.0;

/// The lifecycle a mode moves through. Writing to this directly (rather
/// than through `start`/`stop`) is rejected with `IllegalStateWrite`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeState {
    Unregistered,
    Registered,
    Started,
    Stopped,
}

/// Callbacks and hooks supplied by the coordinator/adapter at `register()`
/// time. A mode never talks to the adapter directly outside of these.
pub struct RegisterConfig {
    pub store: Rc<RefCell<FeatureStore>>,
    pub project: Rc<dyn Fn(f64, f64) -> PixelPoint>,
    pub set_cursor: Rc<dyn Fn(&str)>,
    pub set_map_draggability: Rc<dyn Fn(bool)>,
    pub on_change: Rc<dyn Fn(&[FeatureId], ChangeKind)>,
    pub on_select: Rc<dyn Fn(&FeatureId)>,
    pub on_deselect: Rc<dyn Fn(&FeatureId)>,
    pub on_finish: Rc<dyn Fn(&FeatureId, FinishContext)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishContext {
    pub action: &'static str,
    pub mode: &'static str,
}

/// State shared by every mode implementation: lifecycle tracking, the
/// registered config, and the style map. Draw/select modes embed this
/// rather than reimplementing lifecycle bookkeeping themselves.
pub struct ModeBase {
    name: &'static str,
    state: Cell<ModeState>,
    config: Option<RegisterConfig>,
    styles: Styles,
    pointer_distance: Cell<f64>,
}

impl ModeBase {
    pub fn new(name: &'static str) -> Self {
        ModeBase {
            name,
            state: Cell::new(ModeState::Unregistered),
            config: None,
            styles: Styles::default(),
            pointer_distance: Cell::new(DEFAULT_POINTER_DISTANCE_PX),
        }
    }

    pub fn pointer_distance(&self) -> f64 {
        self.pointer_distance.get()
    }

    pub fn set_pointer_distance(&self, px: f64) {
        self.pointer_distance.set(px);
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn state(&self) -> ModeState {
        self.state.get()
    }

    pub fn register(&mut self, config: RegisterConfig) -> Result<(), TerraDrawError> {
        if self.state.get() != ModeState::Unregistered {
            return Err(TerraDrawError::AlreadyRegistered);
        }
        self.config = Some(config);
        self.state.set(ModeState::Registered);
        log::debug!("mode `{}` registered", self.name);
        Ok(())
    }

    /// `start_cursor` is `"crosshair"` for draw modes and `"move"` for
    /// select mode; each mode's own `start()` passes the right one.
    pub fn start(&mut self, start_cursor: &str) -> Result<(), TerraDrawError> {
        if self.config.is_none() {
            return Err(TerraDrawError::NotRegistered);
        }
        self.set_cursor(start_cursor);
        self.state.set(ModeState::Started);
        log::debug!("mode `{}` started", self.name);
        Ok(())
    }

    pub fn stop(&mut self) -> Result<(), TerraDrawError> {
        if self.config.is_none() {
            return Err(TerraDrawError::NotRegistered);
        }
        self.set_cursor("unset");
        self.state.set(ModeState::Stopped);
        log::debug!("mode `{}` stopped", self.name);
        Ok(())
    }

    pub fn config(&self) -> Result<&RegisterConfig, TerraDrawError> {
        self.config.as_ref().ok_or(TerraDrawError::NotRegistered)
    }

    pub fn project(&self, lng: f64, lat: f64) -> Result<PixelPoint, TerraDrawError> {
        Ok((self.config()?.project)(lng, lat))
    }

    pub fn store(&self) -> Result<Rc<RefCell<FeatureStore>>, TerraDrawError> {
        Ok(Rc::clone(&self.config()?.store))
    }

    pub fn set_cursor(&self, name: &str) {
        if let Some(config) = &self.config {
            (config.set_cursor)(name);
        }
    }

    pub fn styles(&self) -> &Styles {
        &self.styles
    }

    pub fn set_styles(&mut self, styles: Styles) {
        self.styles = styles;
    }

    /// Evaluates the mode's style map against `feature`.
    pub fn style_feature(&self, feature: &Feature) -> std::collections::BTreeMap<String, style::StyleOutput> {
        self.styles.resolve(feature)
    }

    /// Opens a new mutation scope; callers perform their store mutations
    /// against it, then pass it to [`ModeBase::emit_scope`] to flush the
    /// coalesced batch to the adapter's `onChange`.
    pub fn new_scope(&self) -> MutationScope {
        MutationScope::new()
    }

    pub fn emit_scope(&self, scope: MutationScope) -> Result<(), TerraDrawError> {
        let batch = scope.drain();
        if batch.is_empty() {
            return Ok(());
        }
        let config = self.config()?;
        if !batch.created.is_empty() {
            (config.on_change)(&batch.created, ChangeKind::Create);
        }
        if !batch.updated.is_empty() {
            (config.on_change)(&batch.updated, ChangeKind::Update);
        }
        if !batch.deleted.is_empty() {
            (config.on_change)(&batch.deleted, ChangeKind::Delete);
        }
        Ok(())
    }
}

/// The capability set every mode exposes to the coordinator. A tagged
/// variant (rather than a deep inheritance chain) keeps mode polymorphism
/// flat: the coordinator only ever sees `&mut dyn Mode`.
pub trait Mode {
    fn name(&self) -> &'static str;
    fn state(&self) -> ModeState;
    fn register(&mut self, config: RegisterConfig) -> Result<(), TerraDrawError>;
    fn start(&mut self) -> Result<(), TerraDrawError>;
    fn stop(&mut self) -> Result<(), TerraDrawError>;

    fn on_click(&mut self, _event: &PointerEvent) -> Result<(), TerraDrawError> {
        Ok(())
    }
    fn on_mouse_move(&mut self, _event: &PointerEvent) -> Result<(), TerraDrawError> {
        Ok(())
    }
    fn on_key_down(&mut self, _event: &KeyEvent) -> Result<(), TerraDrawError> {
        Ok(())
    }
    fn on_key_up(&mut self, _event: &KeyEvent) -> Result<(), TerraDrawError> {
        Ok(())
    }
    fn on_drag_start(&mut self, _event: &PointerEvent) -> Result<(), TerraDrawError> {
        Ok(())
    }
    fn on_drag(&mut self, _event: &PointerEvent) -> Result<(), TerraDrawError> {
        Ok(())
    }
    fn on_drag_end(&mut self, _event: &PointerEvent) -> Result<(), TerraDrawError> {
        Ok(())
    }
}
