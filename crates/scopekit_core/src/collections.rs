//! Map types backing scope tables and node indexes.

use rustc_hash::FxHashMap;
use std::hash::Hash;

/// A name table: O(1) lookup by key, iteration in first-insertion order.
///
/// Keys are stored twice, so `K` is expected to be a small handle such as
/// an interned name.
#[derive(Debug, Clone)]
pub struct OrderedMap<K, V> {
    order: Vec<K>,
    slots: FxHashMap<K, V>,
}

impl<K: Eq + Hash + Clone, V> OrderedMap<K, V> {
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            slots: FxHashMap::default(),
        }
    }

    /// Insert or replace; a replaced entry keeps its original position.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.slots.get_mut(&key) {
            Some(slot) => Some(std::mem::replace(slot, value)),
            None => {
                self.slots.insert(key.clone(), value);
                self.order.push(key);
                None
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.slots.get(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.slots.contains_key(key)
    }

    /// Drop every entry for which `keep` returns false.
    pub fn retain(&mut self, mut keep: impl FnMut(&K, &V) -> bool) {
        let slots = &mut self.slots;
        self.order.retain(|key| {
            let retained = slots.get(key).is_some_and(|value| keep(key, value));
            if !retained {
                slots.remove(key);
            }
            retained
        });
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.order.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.order.iter().filter_map(|key| self.get(key))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.order.iter().filter_map(|key| Some((key, self.get(key)?)))
    }
}

impl<K: Eq + Hash + Clone, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Several values per key, each list in insertion order without duplicates.
#[derive(Debug, Clone)]
pub struct MultiMap<K, V> {
    lists: FxHashMap<K, Vec<V>>,
}

impl<K: Eq + Hash, V: PartialEq> MultiMap<K, V> {
    pub fn new() -> Self {
        Self {
            lists: FxHashMap::default(),
        }
    }

    /// Append `value` under `key` unless it is already listed there.
    pub fn insert_unique(&mut self, key: K, value: V) -> bool {
        let list = self.lists.entry(key).or_default();
        let fresh = !list.contains(&value);
        if fresh {
            list.push(value);
        }
        fresh
    }

    pub fn get(&self, key: &K) -> Option<&[V]> {
        self.lists.get(key).map(Vec::as_slice)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

impl<K: Eq + Hash, V: PartialEq> Default for MultiMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
