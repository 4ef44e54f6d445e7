use std::hash::Hash;

use indexmap::IndexSet;

/// Outcome of matching previously rendered keys against incoming ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedJoin<K> {
    /// Keys only present in the incoming data, in incoming order.
    pub enter: Vec<K>,
    /// Keys present on both sides, in incoming order.
    pub update: Vec<K>,
    /// Keys only present in the previous render, in previous order.
    pub exit: Vec<K>,
}

/// Classifies `incoming` keys against `existing` ones.
///
/// Duplicate incoming keys are reported once, at their first position.
#[must_use]
pub fn join_by_key<K, I>(existing: &[K], incoming: I) -> KeyedJoin<K>
where
    K: Clone + Eq + Hash,
    I: IntoIterator<Item = K>,
{
    let previous: IndexSet<&K> = existing.iter().collect();
    let next: IndexSet<K> = incoming.into_iter().collect();

    let mut enter = Vec::new();
    let mut update = Vec::new();
    for key in &next {
        if previous.contains(key) {
            update.push(key.clone());
        } else {
            enter.push(key.clone());
        }
    }
    let exit = existing
        .iter()
        .filter(|key| !next.contains(*key))
        .cloned()
        .collect();

    KeyedJoin {
        enter,
        update,
        exit,
    }
}
