use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use terradraw_types::Feature;

use crate::error::TerraDrawError;

#[cfg(feature = "serde")]
pub type StyleOutput = serde_json::Value;
#[cfg(not(feature = "serde"))]
pub type StyleOutput = String;

/// One entry of a mode's style map: either a literal value or a function
/// evaluated against the feature being styled.
///
/// Per the "style functions" re-architecture note, a literal is just a
/// function that ignores its argument -- [`Styles::resolve`] treats both
/// forms uniformly rather than special-casing literals.
#[derive(Clone)]
pub enum StyleValue {
    Literal(StyleOutput),
    Function(Rc<dyn Fn(&Feature) -> StyleOutput>),
}

impl StyleValue {
    pub fn evaluate(&self, feature: &Feature) -> StyleOutput {
        match self {
            StyleValue::Literal(v) => v.clone(),
            StyleValue::Function(f) => f(feature),
        }
    }
}

impl fmt::Debug for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Literal(v) => write!(f, "StyleValue::Literal({v:?})"),
            StyleValue::Function(_) => write!(f, "StyleValue::Function(..)"),
        }
    }
}

impl From<StyleOutput> for StyleValue {
    fn from(v: StyleOutput) -> Self {
        StyleValue::Literal(v)
    }
}

/// A mode's named style map (e.g. `selectedPolygonColor` -> `"#00f"`).
///
/// Construction always goes through a mapping -- there is no API that
/// accepts a bare scalar in place of the whole map, so a non-mapping
/// assignment can only arise when an adapter feeds through
/// externally-sourced JSON; see [`Styles::from_json_value`].
#[derive(Debug, Clone, Default)]
pub struct Styles(BTreeMap<String, StyleValue>);

impl Styles {
    pub fn new() -> Self {
        Styles(BTreeMap::new())
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<StyleValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.0.get(key)
    }

    /// Evaluates every style key against `feature`, producing the resolved
    /// style map a renderer can apply directly.
    pub fn resolve(&self, feature: &Feature) -> BTreeMap<String, StyleOutput> {
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), v.evaluate(feature)))
            .collect()
    }

    #[cfg(feature = "serde")]
    /// Builds a style map from an adapter-supplied JSON value, which must
    /// be an object of literals (functions can only be installed
    /// programmatically via [`Styles::set`], since a wire format has no
    /// representation for a closure). Any other JSON shape is rejected
    /// with `InvalidStyles`.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, TerraDrawError> {
        let serde_json::Value::Object(map) = value else {
            return Err(TerraDrawError::InvalidStyles);
        };
        let mut styles = Styles::new();
        for (k, v) in map {
            styles.set(k, StyleValue::Literal(v));
        }
        Ok(styles)
    }
}
