//! TerraDraw's interaction core: a map-agnostic drawing engine that turns
//! pointer/keyboard events over a slippy-map view into GeoJSON features.
//!
//! This crate is the hard middle layer described by the project this
//! workspace descends from -- it owns the drawing-mode state machines and
//! the feature store they mutate, but it never touches a canvas, a tile, or
//! a pixel buffer directly. Wiring a concrete map library (rendering,
//! DOM/canvas event capture, lng/lat<->pixel projection) is an adapter's
//! job, built on top of the [`Coordinator`](coordinator::Coordinator) and
//! the [`mode::Mode`] trait this crate exposes.
//!
//! # Layout
//!
//! - [`geometry`]: pure functions on WGS84 coordinates (haversine distance,
//!   point-in-polygon, self-intersection, circle generation, ...).
//! - [`store`]: the authoritative in-memory feature database and its
//!   change-batching discipline.
//! - [`mode`]: the shared mode lifecycle/style machinery, plus the concrete
//!   draw modes ([`mode::draw`]) and the select mode ([`mode::select`]).
//! - [`coordinator`]: registers modes against a single adapter and routes
//!   events to whichever mode is currently active.

pub mod coordinator;
pub mod error;
pub mod geometry;
pub mod mode;
pub mod store;

pub use coordinator::Coordinator;
pub use error::TerraDrawError;
pub use store::{FeatureStore, ImportReport};
