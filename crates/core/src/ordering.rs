//! Display-order normalization for sibling groups (gallery photos, price
//! lists, project images, organization siblings).
//!
//! Reorder requests carry the complete list of ids in their new order; the
//! stored `sort_order` becomes `1..=n`.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::types::DbId;

/// Check that `requested` is a permutation of `existing` and return the
/// `(id, sort_order)` assignments.
pub fn normalize_order(
    existing: &[DbId],
    requested: &[DbId],
) -> Result<Vec<(DbId, i32)>, CoreError> {
    let mut seen = HashSet::with_capacity(requested.len());
    for id in requested {
        if !seen.insert(*id) {
            return Err(CoreError::Validation(format!(
                "Duplicate id {id} in reorder request"
            )));
        }
    }

    let existing_set: HashSet<DbId> = existing.iter().copied().collect();
    if seen != existing_set {
        return Err(CoreError::Validation(
            "Reorder request must list every item of the group exactly once".to_string(),
        ));
    }

    Ok(requested
        .iter()
        .enumerate()
        .map(|(i, id)| (*id, i as i32 + 1))
        .collect())
}
