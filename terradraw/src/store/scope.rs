use std::collections::HashMap;

use terradraw_types::FeatureId;

use super::batch::ChangeBatch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    Created,
    Updated,
    Deleted,
}

/// Coalesces the individual store mutations made within one mode handler
/// call into a single [`ChangeBatch`].
///
/// An id that is created then deleted within the same scope never reaches
/// the adapter at all; an id that is updated then deleted collapses to
/// deleted. This is the "mutation scope" the feature store opens implicitly
/// for every top-level handler invocation.
#[derive(Debug, Default)]
pub struct MutationScope {
    order: Vec<FeatureId>,
    state: HashMap<FeatureId, Bucket>,
}

impl MutationScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_created(&mut self, id: FeatureId) {
        self.insert(id, Bucket::Created);
    }

    pub fn mark_updated(&mut self, id: FeatureId) {
        match self.state.get(&id) {
            Some(Bucket::Created) => {} // still new this scope
            _ => self.insert(id, Bucket::Updated),
        }
    }

    pub fn mark_deleted(&mut self, id: FeatureId) {
        match self.state.get(&id) {
            Some(Bucket::Created) => {
                // created and deleted within the same scope: collapses to nothing
                self.state.remove(&id);
            }
            _ => self.insert(id, Bucket::Deleted),
        }
    }

    fn insert(&mut self, id: FeatureId, bucket: Bucket) {
        if !self.state.contains_key(&id) {
            self.order.push(id.clone());
        }
        self.state.insert(id, bucket);
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Consumes the scope, producing the final coalesced batch.
    pub fn drain(self) -> ChangeBatch {
        let mut batch = ChangeBatch::default();
        for id in self.order {
            match self.state.get(&id) {
                Some(Bucket::Created) => batch.created.push(id),
                Some(Bucket::Updated) => batch.updated.push(id),
                Some(Bucket::Deleted) => batch.deleted.push(id),
                None => {}
            }
        }
        batch
    }
}
