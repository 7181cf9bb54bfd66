use thiserror::Error;

/// Errors raised by the geometry kernel, the geometry types themselves, and
/// the feature store.
///
/// Structural misuse (bad ids, illegal state writes) is always surfaced to
/// the caller. Geometry-validation failures produced *during* an interactive
/// drag are caught by the mode that produced them and logged, never
/// propagated here -- see the mode-level drag handlers.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TerraDrawError {
    #[error("coordinate ({lng}, {lat}) is outside the valid WGS84 range")]
    InvalidCoordinate { lng: f64, lat: f64 },

    #[error("ring has only {0} distinct vertices, at least 3 are required")]
    DegenerateRing(usize),

    #[error("ring is not closed: first and last coordinates differ")]
    UnclosedRing,

    #[error("polygon ring self-intersects")]
    SelfIntersection,

    #[error("geometry is invalid: {0}")]
    InvalidGeometry(String),

    #[error("no feature with id `{0}` exists in the store")]
    UnknownId(String),
}
