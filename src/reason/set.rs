//! Insertion-ordered set used for resolved entities and fact sets.

use std::collections::HashSet;
use std::hash::Hash;

use serde::{Serialize, Serializer};

/// A set that remembers the order in which items were first inserted.
///
/// Re-inserting an existing item does not move it. Iteration order is
/// therefore reproducible for a reproducible insertion sequence.
#[derive(Debug, Clone)]
pub struct InsertionSet<T> {
    order: Vec<T>,
    seen: HashSet<T>,
}

impl<T: Eq + Hash + Clone> InsertionSet<T> {
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Insert an item. Returns `true` if it was not present.
    pub fn insert(&mut self, item: T) -> bool {
        if self.seen.contains(&item) {
            return false;
        }
        self.seen.insert(item.clone());
        self.order.push(item);
        true
    }

    pub fn contains(&self, item: &T) -> bool {
        self.seen.contains(item)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// First inserted item.
    pub fn first(&self) -> Option<&T> {
        self.order.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.order.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.order
    }

    pub fn into_vec(self) -> Vec<T> {
        self.order
    }
}

impl<T: Eq + Hash + Clone> Default for InsertionSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Set equality: insertion order is ignored.
impl<T: Eq + Hash + Clone> PartialEq for InsertionSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.seen == other.seen
    }
}

impl<T: Eq + Hash + Clone> Eq for InsertionSet<T> {}

impl<T: Eq + Hash + Clone> Extend<T> for InsertionSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T: Eq + Hash + Clone> FromIterator<T> for InsertionSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a, T> IntoIterator for &'a InsertionSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}

impl<T: Serialize> Serialize for InsertionSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.order.serialize(serializer)
    }
}
