//! The feature store: an in-memory, id-keyed database of [`Feature`]s that
//! batches the changes made within one mode handler call into a single
//! notification, mirroring the "drain coalesced effects once per turn"
//! pattern this crate's event-sink machinery is built around.

use std::collections::HashMap;

use log::{trace, warn};
use terradraw_types::{Feature, FeatureId, Geometry, Properties};

use crate::error::TerraDrawError;
use crate::geometry::self_intersects;

mod batch;
mod scope;

pub use batch::ChangeBatch;
pub use scope::MutationScope;

/// The authoritative feature database. A `FeatureStore` is owned by the
/// [`Coordinator`](crate::coordinator::Coordinator) and handed to each mode
/// at `register()` time.
#[derive(Debug, Default)]
pub struct FeatureStore {
    features: HashMap<FeatureId, Feature>,
    next_id: u64,
}

impl FeatureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, id: &str) -> bool {
        self.features.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Feature> {
        self.features.get(id)
    }

    /// Deep copy of every feature currently in the store.
    pub fn copy_all(&self) -> Vec<Feature> {
        self.features.values().cloned().collect()
    }

    pub fn geometry_copy(&self, id: &str) -> Result<Geometry, TerraDrawError> {
        self.features
            .get(id)
            .map(|f| f.geometry.clone())
            .ok_or_else(|| TerraDrawError::UnknownId(id.to_string()))
    }

    pub fn properties_copy(&self, id: &str) -> Result<Properties, TerraDrawError> {
        self.features
            .get(id)
            .map(|f| f.properties.clone())
            .ok_or_else(|| TerraDrawError::UnknownId(id.to_string()))
    }

    /// Creates one or more features, validating each geometry (structural
    /// invariants plus, for polygons, self-intersection) before it is
    /// admitted. `allow_draft` skips the self-intersection check, which is
    /// how a draw mode is allowed to hold a partially-specified polygon
    /// mid-draw -- see `mode::draw::polygon`.
    pub fn create(
        &mut self,
        scope: &mut MutationScope,
        entries: Vec<(Geometry, Properties)>,
        allow_draft: bool,
    ) -> Result<Vec<FeatureId>, TerraDrawError> {
        let mut ids = Vec::with_capacity(entries.len());
        for (geometry, properties) in entries {
            if !allow_draft {
                validate(&geometry)?;
            }
            let id = self.allocate_id();
            self.features.insert(
                id.clone(),
                Feature::new(id.clone(), geometry, properties),
            );
            scope.mark_created(id.clone());
            ids.push(id);
        }
        trace!("store.create: {} feature(s)", ids.len());
        Ok(ids)
    }

    /// Replaces the geometry of an existing feature in place.
    pub fn update_geometry(
        &mut self,
        scope: &mut MutationScope,
        id: &str,
        geometry: Geometry,
        allow_draft: bool,
    ) -> Result<(), TerraDrawError> {
        if !allow_draft {
            validate(&geometry)?;
        }
        let feature = self
            .features
            .get_mut(id)
            .ok_or_else(|| TerraDrawError::UnknownId(id.to_string()))?;
        feature.geometry = geometry;
        scope.mark_updated(id.to_string());
        Ok(())
    }

    /// Merges the given key/value pairs into a feature's properties.
    pub fn update_properties(
        &mut self,
        scope: &mut MutationScope,
        id: &str,
        updates: Properties,
    ) -> Result<(), TerraDrawError> {
        let feature = self
            .features
            .get_mut(id)
            .ok_or_else(|| TerraDrawError::UnknownId(id.to_string()))?;
        feature.properties.extend(updates);
        scope.mark_updated(id.to_string());
        Ok(())
    }

    pub fn delete(&mut self, scope: &mut MutationScope, id: &str) -> Result<(), TerraDrawError> {
        if self.features.remove(id).is_none() {
            return Err(TerraDrawError::UnknownId(id.to_string()));
        }
        scope.mark_deleted(id.to_string());
        Ok(())
    }

    fn allocate_id(&mut self) -> FeatureId {
        let id = format!("f{}", self.next_id);
        self.next_id += 1;
        id
    }

    /// Deep-copy snapshot of every feature, in the shape persisted or
    /// handed to an adapter for export: strict GeoJSON features, including
    /// every property. An alias for [`FeatureStore::copy_all`] kept under
    /// the name the wire-format contract (spec'd alongside `import`) uses.
    pub fn export(&self) -> Vec<Feature> {
        self.copy_all()
    }

    /// Admits a batch of externally-sourced features (e.g. a GeoJSON
    /// FeatureCollection read back in), re-validating each one against the
    /// same invariants `create` enforces. Unlike `create`, imported
    /// features carry their own id rather than having one assigned, so an
    /// id already present in the store is rejected rather than silently
    /// overwritten -- the caller decides whether to delete-then-reimport.
    ///
    /// A feature that fails validation is rejected on its own; it does not
    /// abort the rest of the batch, so one corrupt feature in a large
    /// import cannot take down the others.
    pub fn import(&mut self, scope: &mut MutationScope, features: Vec<Feature>) -> ImportReport {
        let mut report = ImportReport::default();
        for feature in features {
            if self.features.contains_key(&feature.id) {
                let id = feature.id.clone();
                report.rejected.push((id.clone(), TerraDrawError::DuplicateId(id)));
                continue;
            }
            match validate(&feature.geometry) {
                Ok(()) => {
                    let id = feature.id.clone();
                    scope.mark_created(id.clone());
                    self.features.insert(id.clone(), feature);
                    report.imported.push(id);
                }
                Err(err) => {
                    warn!("import: rejected feature `{}`: {err}", feature.id);
                    report.rejected.push((feature.id, err));
                }
            }
        }
        report
    }
}

/// Outcome of [`FeatureStore::import`]: the ids admitted into the store,
/// and the ids rejected along with why. A rejected id is left exactly as
/// if it had never been offered -- no partial feature is stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    pub imported: Vec<FeatureId>,
    pub rejected: Vec<(FeatureId, TerraDrawError)>,
}

/// Geometry validation applied to every non-draft create/update: the
/// structural invariants from [`Geometry::validate`], plus polygon
/// self-intersection (a kernel-level check, so it doesn't belong on the
/// type itself).
fn validate(geometry: &Geometry) -> Result<(), TerraDrawError> {
    geometry.validate()?;
    if let Geometry::Polygon(polygon) = geometry {
        if self_intersects(polygon.exterior().coords()) {
            warn!("rejected self-intersecting polygon");
            return Err(TerraDrawError::Geometry(
                terradraw_types::TerraDrawError::SelfIntersection,
            ));
        }
        for interior in polygon.interiors() {
            if self_intersects(interior.coords()) {
                return Err(TerraDrawError::Geometry(
                    terradraw_types::TerraDrawError::SelfIntersection,
                ));
            }
        }
    }
    Ok(())
}
