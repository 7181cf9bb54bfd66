use terradraw_types::FeatureId;

/// A coalesced set of id changes produced by one mutation scope, delivered
/// to the adapter as a single `onChange` notification per bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeBatch {
    pub created: Vec<FeatureId>,
    pub updated: Vec<FeatureId>,
    pub deleted: Vec<FeatureId>,
}

impl ChangeBatch {
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.updated.is_empty() && self.deleted.is_empty()
    }
}
