// Dedup registry: global ordinal uniqueness across one walk. First
// registration wins; later registrations of the same ordinal fail with both
// items attached so the data-quality problem stays visible.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::models::AssessmentItem;

use super::types::RejectedDuplicate;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("ordinal {} already registered as '{}', rejecting '{}'",
    .0.kept.ordinal, .0.kept.label, .0.rejected.label)]
pub struct DuplicateOrdinal(pub RejectedDuplicate);

/// Owned by a single walk invocation; not shared, not reentrant.
#[derive(Debug, Default)]
pub struct DedupRegistry {
    seen: BTreeMap<u32, AssessmentItem>,
}

impl DedupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an item under its ordinal. Rejects (never overwrites) a
    /// re-registration, returning the kept and the rejected item.
    pub fn register(&mut self, item: AssessmentItem) -> Result<(), DuplicateOrdinal> {
        if let Some(kept) = self.seen.get(&item.ordinal) {
            return Err(DuplicateOrdinal(RejectedDuplicate {
                kept: kept.clone(),
                rejected: item,
            }));
        }
        self.seen.insert(item.ordinal, item);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Consume the registry into its registered items, ordinal order.
    pub fn into_items(self) -> Vec<AssessmentItem> {
        self.seen.into_values().collect()
    }
}
