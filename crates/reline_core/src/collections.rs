//! Collection types used by the binder's declaration tables.

use rustc_hash::FxHashMap;
use std::hash::Hash;

/// An ordered map that preserves insertion order.
///
/// Declaration tables (labels, variables, functions) are reported in the
/// order their declarations appear in the program.
#[derive(Debug, Clone)]
pub struct OrderedMap<K, V> {
    entries: Vec<(K, V)>,
    index: FxHashMap<K, usize>,
}

impl<K: Eq + Hash + Clone, V> OrderedMap<K, V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Insert only if the key is absent. Returns the value already stored
    /// under `key` when the insertion was refused.
    pub fn insert_first(&mut self, key: K, value: V) -> Option<&V> {
        if let Some(&idx) = self.index.get(&key) {
            return Some(&self.entries[idx].1);
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|&idx| &self.entries[idx].1)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl<K: Eq + Hash + Clone, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// A multimap that stores multiple values per key, in insertion order.
#[derive(Debug, Clone)]
pub struct MultiMap<K, V> {
    map: FxHashMap<K, Vec<V>>,
}

impl<K: Eq + Hash, V> MultiMap<K, V> {
    pub fn new() -> Self {
        Self {
            map: FxHashMap::default(),
        }
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.map.entry(key).or_default().push(value);
    }

    pub fn get(&self, key: &K) -> Option<&[V]> {
        self.map.get(key).map(|v| v.as_slice())
    }
}

impl<K: Eq + Hash, V> Default for MultiMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash map keyed by compiler-internal values; no DoS resistance needed.
pub type FxMap<K, V> = FxHashMap<K, V>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_follow_declaration_order() {
        let mut map = OrderedMap::new();
        map.insert_first("end", 3);
        map.insert_first("start", 1);
        map.insert_first("middle", 2);

        let values: Vec<_> = map.values().copied().collect();
        assert_eq!(values, vec![3, 1, 2]);
    }

    #[test]
    fn test_insert_first_keeps_original() {
        let mut map = OrderedMap::new();
        assert_eq!(map.insert_first("loop", 1), None);
        assert_eq!(map.insert_first("loop", 9), Some(&1));
        assert_eq!(map.get(&"loop"), Some(&1));
        assert_eq!(map.values().count(), 1);
    }

    #[test]
    fn test_multi_map_collects_per_key() {
        let mut map = MultiMap::new();
        map.insert("Write", 1);
        map.insert("Read", 2);
        map.insert("Write", 3);
        assert_eq!(map.get(&"Write"), Some(&[1, 3][..]));
        assert_eq!(map.get(&"Read"), Some(&[2][..]));
        assert_eq!(map.get(&"Random"), None);
    }
}
