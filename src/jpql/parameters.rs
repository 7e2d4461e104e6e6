//! Positional parameter registry.

use crate::value::Value;
use std::collections::BTreeMap;

/// Ordered mapping from 1-based positional index to bound value.
///
/// An index is written at most once; later registrations at the same index
/// leave the first value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionalParameters {
    values: BTreeMap<usize, Value>,
}

impl PositionalParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `value` at `index` unless the index is taken.
    /// Returns whether the value was stored.
    pub fn register_once(&mut self, index: usize, value: Value) -> bool {
        if self.contains(index) {
            return false;
        }
        self.values.insert(index, value);
        true
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(&index)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.values.contains_key(&index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate in index order, the order values are bound to a statement
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Value)> {
        self.values.iter().map(|(index, value)| (*index, value))
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl IntoIterator for PositionalParameters {
    type Item = (usize, Value);
    type IntoIter = std::collections::btree_map::IntoIter<usize, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_once() {
        let mut params = PositionalParameters::new();
        assert!(params.register_once(1, Value::Int(40)));
        assert!(!params.register_once(1, Value::Int(99)));
        assert_eq!(params.get(1), Some(&Value::Int(40)));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_iteration_in_index_order() {
        let mut params = PositionalParameters::new();
        params.register_once(3, Value::Long(3));
        params.register_once(1, Value::Long(1));
        params.register_once(2, Value::Long(2));

        let indices: Vec<usize> = params.iter().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![1, 2, 3]);

        let values: Vec<Value> = params.into_iter().map(|(_, v)| v).collect();
        assert_eq!(values, vec![Value::Long(1), Value::Long(2), Value::Long(3)]);
    }

    #[test]
    fn test_clear() {
        let mut params = PositionalParameters::new();
        params.register_once(1, Value::String("a".into()));
        assert!(params.contains(1));
        params.clear();
        assert!(params.is_empty());
        assert_eq!(params.get(1), None);
    }
}
