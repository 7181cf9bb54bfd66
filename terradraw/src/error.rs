use thiserror::Error;
pub use terradraw_types::TerraDrawError as GeometryError;

/// All errors this crate can return.
///
/// Per the policy documented on each call site: structural/usage errors
/// (the first four variants) indicate a programming mistake by the adapter
/// or host application and are always propagated. [`Geometry`](Self::Geometry)
/// is propagated from the feature store's `create`/`updateGeometry`
/// entry points, but a mode performing an interactive drag catches it
/// itself and logs a warning rather than letting it reach the coordinator --
/// see `mode::select::drag`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TerraDrawError {
    #[error("mode used before register() was called")]
    NotRegistered,

    #[error("mode was already registered")]
    AlreadyRegistered,

    #[error("attempted to write mode state directly instead of through start()/stop()")]
    IllegalStateWrite,

    #[error("style assignment must be a mapping of style keys to literals or functions")]
    InvalidStyles,

    #[error("inconsistent select-mode flag combination: {0}")]
    InvalidFlags(String),

    #[error("no feature with id `{0}` exists in the store")]
    UnknownId(String),

    #[error("a feature with id `{0}` already exists in the store")]
    DuplicateId(String),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
