//! Organization chart tree construction from flat `(id, parent_id)` records.
//!
//! Rules:
//! - A record with no parent, a self-parent, or a parent that is not in the
//!   input is a root.
//! - Siblings are ordered by `(sort_order, id)`.
//! - Records that are only reachable through a cycle are promoted to roots
//!   (the lowest-ordered record of each cycle loses its parent edge), so
//!   construction always terminates and every record appears exactly once.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

/// A flat record that can be arranged into a tree.
pub trait TreeRecord {
    fn id(&self) -> DbId;
    fn parent_id(&self) -> Option<DbId>;
    fn sort_order(&self) -> i32;
}

/// A node of the constructed tree. The record's own fields are flattened
/// next to `children` when serialized.
#[derive(Debug, Clone, Serialize)]
pub struct TreeNode<T> {
    #[serde(flatten)]
    pub item: T,
    pub children: Vec<TreeNode<T>>,
}

impl<T> TreeNode<T> {
    /// Number of nodes in this subtree, including `self`.
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(TreeNode::len).sum::<usize>()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Map every item in the subtree, keeping the shape.
    pub fn map<U, F>(self, f: &F) -> TreeNode<U>
    where
        F: Fn(T) -> U,
    {
        TreeNode {
            item: f(self.item),
            children: self.children.into_iter().map(|c| c.map(f)).collect(),
        }
    }
}

/// Build the forest for `records`.
pub fn build_tree<T: TreeRecord>(records: Vec<T>) -> Vec<TreeNode<T>> {
    let ids: HashSet<DbId> = records.iter().map(TreeRecord::id).collect();

    let mut order: Vec<usize> = (0..records.len()).collect();
    order.sort_by_key(|&i| (records[i].sort_order(), records[i].id()));

    let mut children: HashMap<DbId, Vec<usize>> = HashMap::new();
    let mut roots: Vec<usize> = Vec::new();
    for &i in &order {
        let record = &records[i];
        match record.parent_id() {
            Some(parent) if parent != record.id() && ids.contains(&parent) => {
                children.entry(parent).or_default().push(i);
            }
            _ => roots.push(i),
        }
    }

    let mut slots: Vec<Option<T>> = records.into_iter().map(Some).collect();
    let mut forest = Vec::with_capacity(roots.len());
    for root in roots {
        if let Some(node) = attach(root, &mut slots, &children) {
            forest.push(node);
        }
    }

    // Whatever is left sits on a cycle (or hangs off one).
    for &i in &order {
        if slots[i].is_some() {
            if let Some(node) = attach(i, &mut slots, &children) {
                forest.push(node);
            }
        }
    }

    forest
}

fn attach<T: TreeRecord>(
    index: usize,
    slots: &mut [Option<T>],
    children: &HashMap<DbId, Vec<usize>>,
) -> Option<TreeNode<T>> {
    let item = slots[index].take()?;
    let kids = children
        .get(&item.id())
        .map(|indices| {
            indices
                .iter()
                .filter_map(|&child| attach(child, slots, children))
                .collect()
        })
        .unwrap_or_default();
    Some(TreeNode {
        item,
        children: kids,
    })
}

/// Whether re-parenting `member_id` under `new_parent` would close a cycle.
///
/// `parents` maps each existing record id to its current parent.
pub fn would_create_cycle(
    parents: &HashMap<DbId, Option<DbId>>,
    member_id: DbId,
    new_parent: Option<DbId>,
) -> bool {
    let mut seen = HashSet::new();
    let mut cursor = new_parent;
    while let Some(current) = cursor {
        if current == member_id {
            return true;
        }
        if !seen.insert(current) {
            // Pre-existing cycle that does not involve `member_id`.
            return false;
        }
        cursor = parents.get(&current).copied().flatten();
    }
    false
}

/// Reject a parent assignment that would make the organization cyclic.
pub fn validate_parent(
    parents: &HashMap<DbId, Option<DbId>>,
    member_id: DbId,
    new_parent: Option<DbId>,
) -> Result<(), CoreError> {
    if new_parent == Some(member_id) {
        return Err(CoreError::Validation(
            "A member cannot be its own parent".to_string(),
        ));
    }
    if would_create_cycle(parents, member_id, new_parent) {
        return Err(CoreError::Validation(
            "Parent assignment would create a cycle in the organization tree".to_string(),
        ));
    }
    Ok(())
}
