//! Reconciling a to-many relation with the identifiers a client submitted.

use std::collections::HashSet;
use uuid::Uuid;

use crate::core::Identifiable;

/// Outcome of comparing current entities against desired identifiers.
///
/// Both lists keep the order of their input and contain no duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionDiff<C> {
    /// Desired identifiers not currently present
    pub added: Vec<Uuid>,
    /// Current entities that are no longer desired
    pub removed: Vec<C>,
}

impl<C> CollectionDiff<C> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Number of callbacks fired by [`update_collection`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectionChanges {
    pub added: usize,
    pub removed: usize,
}

/// Compute `desired \ current` and `current \ desired` in O(n + m).
pub fn diff_collection<C, I, D>(current: I, desired: D) -> CollectionDiff<C>
where
    C: Identifiable,
    I: IntoIterator<Item = C>,
    D: IntoIterator<Item = Uuid>,
{
    let mut wanted = Vec::new();
    let mut wanted_ids = HashSet::new();
    for id in desired {
        if wanted_ids.insert(id) {
            wanted.push(id);
        }
    }

    let mut present = HashSet::new();
    let mut removed = Vec::new();
    for entity in current {
        let id = entity.id();
        if !present.insert(id) {
            continue;
        }
        if !wanted_ids.contains(&id) {
            removed.push(entity);
        }
    }

    let added = wanted.into_iter().filter(|id| !present.contains(id)).collect();

    CollectionDiff { added, removed }
}

/// Apply a diff through callbacks: `remove` runs once per entity no longer
/// desired, `add` once per newly desired identifier. Unchanged identifiers
/// trigger nothing.
pub fn update_collection<C, I, D, A, R>(
    current: I,
    desired: D,
    mut add: A,
    mut remove: R,
) -> CollectionChanges
where
    C: Identifiable,
    I: IntoIterator<Item = C>,
    D: IntoIterator<Item = Uuid>,
    A: FnMut(Uuid),
    R: FnMut(C),
{
    let diff = diff_collection(current, desired);
    let changes = CollectionChanges {
        added: diff.added.len(),
        removed: diff.removed.len(),
    };

    for entity in diff.removed {
        remove(entity);
    }
    for id in diff.added {
        add(id);
    }

    changes
}
