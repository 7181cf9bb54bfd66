/// The key-event configuration select mode is parameterised by.
/// Any field may be `None` to disable that binding entirely.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub deselect: Option<String>,
    pub delete: Option<String>,
    pub rotate: Option<Vec<String>>,
    pub scale: Option<Vec<String>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            deselect: Some("Escape".to_string()),
            delete: Some("Delete".to_string()),
            rotate: Some(vec!["Alt".to_string()]),
            scale: Some(vec!["Shift".to_string()]),
        }
    }
}

impl KeyBindings {
    pub fn is_deselect(&self, key: &str) -> bool {
        self.deselect.as_deref() == Some(key)
    }

    pub fn is_delete(&self, key: &str) -> bool {
        self.delete.as_deref() == Some(key)
    }

    pub fn rotate_held(&self, held_keys: &[String]) -> bool {
        match &self.rotate {
            Some(keys) => keys.iter().any(|k| held_keys.iter().any(|h| h == k)),
            None => false,
        }
    }

    pub fn scale_held(&self, held_keys: &[String]) -> bool {
        match &self.scale {
            Some(keys) => keys.iter().any(|k| held_keys.iter().any(|h| h == k)),
            None => false,
        }
    }
}
