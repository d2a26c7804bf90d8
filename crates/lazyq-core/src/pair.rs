//! Paired-data shapes used by grouping, map adaptation, zipping and keyed sorts.

use serde::{Deserialize, Serialize};

use crate::compare::Equatable;

/// A key and its associated value (or sub-sequence, for `group_by`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyValuePair<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> KeyValuePair<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    pub fn into_tuple(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> From<(K, V)> for KeyValuePair<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self { key, value }
    }
}

/// Two values of independent types, no uniqueness constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValuePair<A, B> {
    pub first: A,
    pub second: B,
}

impl<A, B> ValuePair<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    pub fn into_tuple(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A, B> From<(A, B)> for ValuePair<A, B> {
    fn from((first, second): (A, B)) -> Self {
        Self { first, second }
    }
}

impl<K: Equatable, V: Equatable> Equatable for KeyValuePair<K, V> {
    fn equals(&self, other: &Self) -> bool {
        self.key.equals(&other.key) && self.value.equals(&other.value)
    }
}

impl<A: Equatable, B: Equatable> Equatable for ValuePair<A, B> {
    fn equals(&self, other: &Self) -> bool {
        self.first.equals(&other.first) && self.second.equals(&other.second)
    }
}
