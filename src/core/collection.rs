//! Ordered, typed record containers

use std::slice::Iter;

/// Implemented by every record type a collection can hold.
pub trait Record {
    /// Name of the record type as known to the store.
    const RECORD_TYPE: &'static str;

    /// Persisted identifier, if the record has been saved.
    fn id(&self) -> Option<&str>;
}

/// Insertion-ordered container of records of one type.
#[derive(Debug, Clone)]
pub struct Collection<T: Record> {
    models: Vec<T>,
}

impl<T: Record> Collection<T> {
    pub fn new() -> Self {
        Self { models: Vec::new() }
    }

    pub fn add(&mut self, model: T) {
        self.models.push(model);
    }

    pub fn at(&self, index: usize) -> Option<&T> {
        self.models.get(index)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.models.iter()
    }

    pub fn find<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.models.iter().find(|m| predicate(m))
    }
}

impl<T: Record> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            models: iter.into_iter().collect(),
        }
    }
}

impl<T: Record> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.models.into_iter()
    }
}

impl<'a, T: Record> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.models.iter()
    }
}
