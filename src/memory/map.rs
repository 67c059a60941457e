//! Map helpers: found-flag lookups and stable formatting
//!
//! Looking up an absent key is not an error. [`lookup`] returns the value
//! type's default together with `false`, so callers branch on the flag
//! instead of handling a failure.

use super::value::Value;
use rustc_hash::FxHashMap;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasher, Hash};

/// Look up `key`, returning the stored value and `true`, or the default
/// value and `false` when the key is absent.
pub fn lookup<K, Q, V, S>(map: &HashMap<K, V, S>, key: &Q) -> (V, bool)
where
    K: Borrow<Q> + Eq + Hash,
    Q: Eq + Hash + ?Sized,
    V: Clone + Default,
    S: BuildHasher,
{
    match map.get(key) {
        Some(value) => (value.clone(), true),
        None => (V::default(), false),
    }
}

/// Build an [`FxHashMap`] from literal entries
pub fn map_of<K, V, I>(entries: I) -> FxHashMap<K, V>
where
    K: Eq + Hash,
    I: IntoIterator<Item = (K, V)>,
{
    entries.into_iter().collect()
}

/// Entries sorted by key, for deterministic iteration
pub fn sorted_entries<K, V, S>(map: &HashMap<K, V, S>) -> Vec<(&K, &V)>
where
    K: Ord,
{
    let mut entries: Vec<(&K, &V)> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
}

/// Snapshot a map for the call stack
pub fn to_value<K, V, S>(map: &HashMap<K, V, S>) -> Value
where
    K: Clone + Into<Value>,
    V: Clone + Into<Value>,
{
    Value::Map(
        map.iter()
            .map(|(k, v)| (k.clone().into(), v.clone().into()))
            .collect(),
    )
}

/// Display adapter printing `map[k:v ...]` with keys sorted
pub struct SortedMap<'a, K, V, S>(pub &'a HashMap<K, V, S>);

impl<K, V, S> fmt::Display for SortedMap<'_, K, V, S>
where
    K: Ord + fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "map[")?;
        for (i, (k, v)) in sorted_entries(self.0).into_iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}:{}", k, v)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_key_yields_zero_and_false() {
        let mut powers: FxHashMap<String, i64> = FxHashMap::default();
        powers.insert("goku".to_string(), 9001);

        assert_eq!(lookup(&powers, "vegeta"), (0, false));
        assert_eq!(lookup(&powers, "goku"), (9001, true));
    }

    #[test]
    fn zero_value_follows_value_type() {
        let names: FxHashMap<i64, String> = FxHashMap::default();
        assert_eq!(lookup(&names, &1), (String::new(), false));
    }

    #[test]
    fn sorted_display() {
        let powers = map_of([("goku", 9001), ("gohan", 2044)]);
        assert_eq!(SortedMap(&powers).to_string(), "map[gohan:2044 goku:9001]");
        assert_eq!(SortedMap(&FxHashMap::<i64, i64>::default()).to_string(), "map[]");
    }
}
