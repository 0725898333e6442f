//! Positional diffing of component models.
//!
//! Pairing is by index at every level: entry `i` of the old sequence is
//! compared with entry `i` of the new one, trailing growth is classified as
//! new and trailing shrinkage as removed. Reordering is therefore never seen
//! as a move; a reorder of otherwise identical models shows up as a run of
//! per-index reloads. Callers rely on this index-stable behaviour.
//!
//! Change lists are ordered by ascending index. Appliers must perform
//! removals before insertions (see [`ChangeSet::deletions`] and
//! [`ChangeSet::insertions`]) so indices never refer to a half-applied state.

use crate::item::Item;
use crate::model::ComponentModel;

/// Outcome for one top-level position.
#[derive(Clone, Debug, PartialEq)]
pub enum ComponentChange {
    /// `new[index]` has no counterpart in the old sequence.
    New { index: usize },
    /// `old[index]` has no counterpart in the new sequence.
    Removed { index: usize },
    /// The kind changed; tear down and recreate at `index`.
    Replace { index: usize },
    /// Same kind, different content.
    Reload { index: usize, changes: ChangeSet },
}

impl ComponentChange {
    pub fn index(&self) -> usize {
        match self {
            ComponentChange::New { index }
            | ComponentChange::Removed { index }
            | ComponentChange::Replace { index }
            | ComponentChange::Reload { index, .. } => *index,
        }
    }
}

/// Outcome for one item position.
#[derive(Clone, Debug, PartialEq)]
pub enum ItemChange {
    New { index: usize },
    Removed { index: usize },
    Reloaded { index: usize },
    /// A composite row whose own fields are unchanged but whose child models
    /// differ. `children` is the top-level diff of the child sequences.
    Composite {
        index: usize,
        children: Vec<ComponentChange>,
    },
}

impl ItemChange {
    pub fn index(&self) -> usize {
        match self {
            ItemChange::New { index }
            | ItemChange::Removed { index }
            | ItemChange::Reloaded { index }
            | ItemChange::Composite { index, .. } => *index,
        }
    }
}

/// Differences between two models of the same position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChangeSet {
    pub kind_changed: bool,
    pub layout_changed: bool,
    /// Identifier or metadata differ.
    pub meta_changed: bool,
    pub items: Vec<ItemChange>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        !self.kind_changed && !self.layout_changed && !self.meta_changed && self.items.is_empty()
    }

    /// Removed item indices, highest first.
    pub fn deletions(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .items
            .iter()
            .filter_map(|change| match change {
                ItemChange::Removed { index } => Some(*index),
                _ => None,
            })
            .collect();
        indices.sort_unstable_by(|a, b| b.cmp(a));
        indices
    }

    /// Inserted item indices, lowest first.
    pub fn insertions(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .items
            .iter()
            .filter_map(|change| match change {
                ItemChange::New { index } => Some(*index),
                _ => None,
            })
            .collect();
        indices.sort_unstable();
        indices
    }

    pub fn reloads(&self) -> Vec<usize> {
        self.items
            .iter()
            .filter_map(|change| match change {
                ItemChange::Reloaded { index } => Some(*index),
                _ => None,
            })
            .collect()
    }

    pub fn composites(&self) -> impl Iterator<Item = (usize, &[ComponentChange])> {
        self.items.iter().filter_map(|change| match change {
            ItemChange::Composite { index, children } => Some((*index, children.as_slice())),
            _ => None,
        })
    }

    /// True when row structure changes (insertions or removals).
    pub fn is_structural(&self) -> bool {
        self.items
            .iter()
            .any(|change| matches!(change, ItemChange::New { .. } | ItemChange::Removed { .. }))
    }
}

/// Compares two models occupying the same position.
///
/// A kind change short-circuits: item changes are not computed because the
/// component will be rebuilt from scratch.
pub fn diff(old: &ComponentModel, new: &ComponentModel) -> ChangeSet {
    if old.kind != new.kind {
        return ChangeSet {
            kind_changed: true,
            ..ChangeSet::default()
        };
    }
    ChangeSet {
        kind_changed: false,
        layout_changed: old.layout != new.layout,
        meta_changed: old.identifier != new.identifier || old.meta != new.meta,
        items: diff_items(&old.items, &new.items),
    }
}

/// Positional item diff.
pub fn diff_items(old: &[Item], new: &[Item]) -> Vec<ItemChange> {
    let mut changes = Vec::new();
    let paired = old.len().min(new.len());

    for index in 0..paired {
        let (before, after) = (&old[index], &new[index]);
        if before == after {
            continue;
        }
        if before.is_composite() && after.is_composite() && before.same_row(after) {
            let children = diff_components(&before.children, &after.children);
            if !children.is_empty() {
                changes.push(ItemChange::Composite { index, children });
            }
            continue;
        }
        changes.push(ItemChange::Reloaded { index });
    }

    changes.extend((paired..new.len()).map(|index| ItemChange::New { index }));
    changes.extend((paired..old.len()).map(|index| ItemChange::Removed { index }));
    changes
}

/// Positional top-level diff over sequences of models.
pub fn diff_components(old: &[ComponentModel], new: &[ComponentModel]) -> Vec<ComponentChange> {
    let mut changes = Vec::new();
    let paired = old.len().min(new.len());

    for index in 0..paired {
        let (before, after) = (&old[index], &new[index]);
        if before == after {
            continue;
        }
        let changes_at = diff(before, after);
        if changes_at.kind_changed {
            changes.push(ComponentChange::Replace { index });
        } else if !changes_at.is_empty() {
            changes.push(ComponentChange::Reload {
                index,
                changes: changes_at,
            });
        }
    }

    changes.extend((paired..new.len()).map(|index| ComponentChange::New { index }));
    changes.extend((paired..old.len()).map(|index| ComponentChange::Removed { index }));
    changes
}

#[cfg(test)]
#[path = "tests/diff_tests.rs"]
mod tests;
