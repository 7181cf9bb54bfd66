//! Registers modes against a single adapter and routes events to whichever
//! mode is currently active.
//!
//! There is no global state at the core: the coordinator owns the active-
//! mode pointer and the shared [`FeatureStore`], and passes both down to
//! each mode explicitly at `register()` time rather than reaching for a
//! singleton. Event delivery is plain method calls -- the coordinator holds
//! the mode list and dispatches directly -- which is what keeps the
//! ordering between `onSelect`/`onChange`/`onDeselect` deterministic: there
//! is no observer fan-out to race.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use terradraw_types::FeatureId;

use crate::error::TerraDrawError;
use crate::geometry::PixelPoint;
use crate::mode::{ChangeKind, FinishContext, KeyEvent, Mode, PointerEvent, RegisterConfig};
use crate::store::FeatureStore;

/// The map-library-facing hooks every mode needs and that never change
/// across modes: projecting a coordinate to pixel space, setting the
/// cursor, and freezing/unfreezing the map's own pan/rotate handling while
/// a drag is in progress.
pub struct AdapterHooks {
    pub project: Rc<dyn Fn(f64, f64) -> PixelPoint>,
    pub set_cursor: Rc<dyn Fn(&str)>,
    pub set_map_draggability: Rc<dyn Fn(bool)>,
}

/// Callbacks the coordinator forwards from every mode up to the host
/// application: one `onChange` per change-batch bucket, `onSelect`/
/// `onDeselect` from the select mode, and `onFinish` when any mode
/// completes a draw or edit. Every mode registered with a given
/// coordinator shares the same three closures, so the host wires these up
/// once rather than per mode.
pub struct CoordinatorCallbacks {
    pub on_change: Rc<dyn Fn(&[FeatureId], ChangeKind)>,
    pub on_select: Rc<dyn Fn(&FeatureId)>,
    pub on_deselect: Rc<dyn Fn(&FeatureId)>,
    pub on_finish: Rc<dyn Fn(&FeatureId, FinishContext)>,
}

/// Owns the feature store, the registered modes, and the single
/// active-mode pointer. Modes are added with [`Coordinator::add_mode`],
/// which registers them immediately; switching the active mode with
/// [`Coordinator::set_active_mode`] stops whichever mode was previously
/// running before starting the new one, so at most one mode is ever
/// started at a time. Pointer/keyboard events are routed only to that
/// mode -- the coordinator never calls into a second mode's handler from
/// within another's, keeping the (non-reentrant) store safe to mutate
/// without extra locking.
pub struct Coordinator {
    store: Rc<RefCell<FeatureStore>>,
    hooks: AdapterHooks,
    callbacks: CoordinatorCallbacks,
    modes: HashMap<String, Box<dyn Mode>>,
    active: Option<String>,
}

impl Coordinator {
    pub fn new(hooks: AdapterHooks, callbacks: CoordinatorCallbacks) -> Self {
        Coordinator {
            store: Rc::new(RefCell::new(FeatureStore::new())),
            hooks,
            callbacks,
            modes: HashMap::new(),
            active: None,
        }
    }

    /// A copy-returning handle to the shared store, for adapter-side
    /// reads (`copyAll`-style snapshots). Never gives out the store in a
    /// way that would let an adapter mutate it outside a mode's own
    /// scoped calls.
    pub fn store(&self) -> Rc<RefCell<FeatureStore>> {
        Rc::clone(&self.store)
    }

    pub fn active_mode(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.modes.contains_key(name)
    }

    fn register_config(&self) -> RegisterConfig {
        RegisterConfig {
            store: Rc::clone(&self.store),
            project: Rc::clone(&self.hooks.project),
            set_cursor: Rc::clone(&self.hooks.set_cursor),
            set_map_draggability: Rc::clone(&self.hooks.set_map_draggability),
            on_change: Rc::clone(&self.callbacks.on_change),
            on_select: Rc::clone(&self.callbacks.on_select),
            on_deselect: Rc::clone(&self.callbacks.on_deselect),
            on_finish: Rc::clone(&self.callbacks.on_finish),
        }
    }

    /// Registers `mode` under `name` -- the same string the store's
    /// reserved `mode` property uses for features that mode owns (e.g.
    /// `"polygon"`, `"select"`). Registering a name twice fails with
    /// whatever error the mode's own `register()` raises on a repeat call
    /// (`AlreadyRegistered`, if the same mode instance were added twice;
    /// in practice each name should map to a fresh mode instance).
    pub fn add_mode(&mut self, name: impl Into<String>, mut mode: Box<dyn Mode>) -> Result<(), TerraDrawError> {
        mode.register(self.register_config())?;
        let name = name.into();
        log::debug!("coordinator: registered mode `{name}`");
        self.modes.insert(name, mode);
        Ok(())
    }

    /// Stops whichever mode is currently active (if any) and starts
    /// `name`. A no-op if `name` is already active. Fails with
    /// `NotRegistered` if `name` was never added.
    pub fn set_active_mode(&mut self, name: &str) -> Result<(), TerraDrawError> {
        if self.active.as_deref() == Some(name) {
            return Ok(());
        }
        if !self.modes.contains_key(name) {
            return Err(TerraDrawError::NotRegistered);
        }
        self.stop_active_mode()?;
        let mode = self.modes.get_mut(name).expect("checked contains_key above");
        mode.start()?;
        self.active = Some(name.to_string());
        log::debug!("coordinator: switched active mode to `{name}`");
        Ok(())
    }

    /// Stops the active mode, if any, and clears the active pointer. A
    /// subsequent event is simply absorbed (every dispatch method below is
    /// a no-op with no active mode) until another mode is activated.
    pub fn stop_active_mode(&mut self) -> Result<(), TerraDrawError> {
        if let Some(current) = self.active.take() {
            if let Some(mode) = self.modes.get_mut(&current) {
                mode.stop()?;
            }
        }
        Ok(())
    }

    fn active_mode_mut(&mut self) -> Option<&mut Box<dyn Mode>> {
        let name = self.active.as_ref()?;
        self.modes.get_mut(name)
    }

    pub fn on_click(&mut self, event: &PointerEvent) -> Result<(), TerraDrawError> {
        match self.active_mode_mut() {
            Some(mode) => mode.on_click(event),
            None => Ok(()),
        }
    }

    pub fn on_mouse_move(&mut self, event: &PointerEvent) -> Result<(), TerraDrawError> {
        match self.active_mode_mut() {
            Some(mode) => mode.on_mouse_move(event),
            None => Ok(()),
        }
    }

    pub fn on_key_down(&mut self, event: &KeyEvent) -> Result<(), TerraDrawError> {
        match self.active_mode_mut() {
            Some(mode) => mode.on_key_down(event),
            None => Ok(()),
        }
    }

    pub fn on_key_up(&mut self, event: &KeyEvent) -> Result<(), TerraDrawError> {
        match self.active_mode_mut() {
            Some(mode) => mode.on_key_up(event),
            None => Ok(()),
        }
    }

    pub fn on_drag_start(&mut self, event: &PointerEvent) -> Result<(), TerraDrawError> {
        match self.active_mode_mut() {
            Some(mode) => mode.on_drag_start(event),
            None => Ok(()),
        }
    }

    pub fn on_drag(&mut self, event: &PointerEvent) -> Result<(), TerraDrawError> {
        match self.active_mode_mut() {
            Some(mode) => mode.on_drag(event),
            None => Ok(()),
        }
    }

    pub fn on_drag_end(&mut self, event: &PointerEvent) -> Result<(), TerraDrawError> {
        match self.active_mode_mut() {
            Some(mode) => mode.on_drag_end(event),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell as StdRefCell;

    use crate::mode::draw::PointMode;
    use crate::mode::select::{CoordinateFlags, FeatureFlags, ModeFlags, SelectFlags, SelectMode};
    use crate::mode::{Button, ChangeKind};

    fn test_coordinator(
        changes: Rc<StdRefCell<Vec<(Vec<FeatureId>, ChangeKind)>>>,
        selects: Rc<StdRefCell<Vec<FeatureId>>>,
        deselects: Rc<StdRefCell<Vec<FeatureId>>>,
    ) -> Coordinator {
        let hooks = AdapterHooks {
            project: Rc::new(|lng, lat| PixelPoint { x: lng * 10.0, y: lat * 10.0 }),
            set_cursor: Rc::new(|_| {}),
            set_map_draggability: Rc::new(|_| {}),
        };
        let c1 = Rc::clone(&changes);
        let s1 = Rc::clone(&selects);
        let d1 = Rc::clone(&deselects);
        let callbacks = CoordinatorCallbacks {
            on_change: Rc::new(move |ids, kind| c1.borrow_mut().push((ids.to_vec(), kind))),
            on_select: Rc::new(move |id| s1.borrow_mut().push(id.clone())),
            on_deselect: Rc::new(move |id| d1.borrow_mut().push(id.clone())),
            on_finish: Rc::new(|_, _| {}),
        };
        Coordinator::new(hooks, callbacks)
    }

    fn select_flags() -> SelectFlags {
        let mut flags = SelectFlags::new();
        flags.set(
            "point",
            ModeFlags {
                feature: Some(FeatureFlags {
                    draggable: true,
                    coordinates: Some(CoordinateFlags {
                        draggable: false,
                        deletable: false,
                        midpoints: false,
                        ..Default::default()
                    }),
                }),
            },
        );
        flags
    }

    fn click(lng: f64, lat: f64) -> PointerEvent {
        PointerEvent {
            lng,
            lat,
            container_x: lng * 10.0,
            container_y: lat * 10.0,
            button: Button::Left,
            held_keys: vec![],
        }
    }

    #[test]
    fn only_the_active_mode_receives_events() {
        let changes = Rc::new(StdRefCell::new(Vec::new()));
        let selects = Rc::new(StdRefCell::new(Vec::new()));
        let deselects = Rc::new(StdRefCell::new(Vec::new()));
        let mut coordinator = test_coordinator(Rc::clone(&changes), Rc::clone(&selects), deselects);

        coordinator
            .add_mode("point", Box::new(PointMode::new()))
            .unwrap();
        coordinator
            .add_mode("select", Box::new(SelectMode::new(select_flags()).unwrap()))
            .unwrap();

        coordinator.set_active_mode("point").unwrap();
        coordinator.on_click(&click(1.0, 1.0)).unwrap();
        assert_eq!(coordinator.store().borrow().copy_all().len(), 1);

        // Switching away and clicking again must not hand the event to the
        // point mode any more: still exactly one feature.
        coordinator.set_active_mode("select").unwrap();
        coordinator.on_click(&click(1.0, 1.0)).unwrap();
        assert_eq!(coordinator.store().borrow().copy_all().len(), 1);
        assert_eq!(selects.borrow().len(), 1);
    }

    #[test]
    fn switching_active_mode_stops_the_previous_one() {
        let changes = Rc::new(StdRefCell::new(Vec::new()));
        let selects = Rc::new(StdRefCell::new(Vec::new()));
        let deselects = Rc::new(StdRefCell::new(Vec::new()));
        let mut coordinator = test_coordinator(changes, selects, deselects);

        coordinator
            .add_mode("point", Box::new(PointMode::new()))
            .unwrap();
        coordinator
            .add_mode("select", Box::new(SelectMode::new(select_flags()).unwrap()))
            .unwrap();

        coordinator.set_active_mode("point").unwrap();
        assert_eq!(coordinator.active_mode(), Some("point"));
        coordinator.set_active_mode("select").unwrap();
        assert_eq!(coordinator.active_mode(), Some("select"));
    }

    #[test]
    fn activating_an_unregistered_mode_fails() {
        let changes = Rc::new(StdRefCell::new(Vec::new()));
        let selects = Rc::new(StdRefCell::new(Vec::new()));
        let deselects = Rc::new(StdRefCell::new(Vec::new()));
        let mut coordinator = test_coordinator(changes, selects, deselects);
        assert!(coordinator.set_active_mode("polygon").is_err());
    }

    #[test]
    fn events_with_no_active_mode_are_absorbed() {
        let changes = Rc::new(StdRefCell::new(Vec::new()));
        let selects = Rc::new(StdRefCell::new(Vec::new()));
        let deselects = Rc::new(StdRefCell::new(Vec::new()));
        let mut coordinator = test_coordinator(changes, selects, deselects);
        coordinator
            .add_mode("point", Box::new(PointMode::new()))
            .unwrap();
        assert!(coordinator.on_click(&click(1.0, 1.0)).is_ok());
        assert_eq!(coordinator.store().borrow().copy_all().len(), 0);
    }
}
