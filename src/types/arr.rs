use crate::constants::DEFAULT_ARR_CAPACITY;
use crate::error::{Error, Result};
use crate::types::doc::Doc;

/// Growable, order-preserving sequence of documents.
///
/// Capacity starts at 8 and doubles exactly whenever an insertion would
/// exceed it; popping never shrinks, only an explicit [`Arr::resize`] does.
#[derive(Debug, Clone, PartialEq)]
pub struct Arr {
    items: Vec<Doc>,
}

impl Arr {
    pub fn new() -> Self {
        Self {
            items: Vec::with_capacity(DEFAULT_ARR_CAPACITY),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn from_vec(items: Vec<Doc>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// True when the next push will reallocate.
    pub fn full(&self) -> bool {
        self.items.len() == self.items.capacity()
    }

    pub fn push(&mut self, doc: impl Into<Doc>) {
        if self.full() {
            // Exact doubling, not the allocator's growth policy.
            self.items.reserve_exact(self.items.capacity().max(1));
        }
        self.items.push(doc.into());
    }

    /// Removes and returns the last document; `None` on an empty sequence.
    pub fn pop(&mut self) -> Option<Doc> {
        self.items.pop()
    }

    pub fn get(&self, index: usize) -> Result<&Doc> {
        self.items
            .get(index)
            .ok_or_else(|| Error::out_of_range(index, self.items.len()))
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Doc> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or_else(|| Error::out_of_range(index, len))
    }

    /// Overwrites the document at `pos`. Returns `false` when `pos` is past
    /// the current size.
    pub fn set_value(&mut self, pos: usize, doc: impl Into<Doc>) -> bool {
        match self.items.get_mut(pos) {
            Some(slot) => {
                *slot = doc.into();
                true
            }
            None => false,
        }
    }

    /// Overwrites elements starting from index 0. Elements past the new
    /// values keep their previous contents; the sequence grows if the values
    /// outnumber them, doubling capacity when they exceed it.
    pub fn set_values(&mut self, values: Vec<Doc>) {
        if values.len() > self.items.capacity() {
            let capacity = values.len().max(2 * self.items.capacity());
            let mut items = Vec::with_capacity(capacity);
            items.extend(values);
            self.items = items;
        } else {
            for (i, value) in values.into_iter().enumerate() {
                if i < self.items.len() {
                    self.items[i] = value;
                } else {
                    self.items.push(value);
                }
            }
        }
    }

    /// Sets the capacity exactly. A capacity below the current size
    /// truncates the sequence.
    pub fn resize(&mut self, new_cap: usize) {
        let keep = self.items.len().min(new_cap);
        let mut items = Vec::with_capacity(new_cap);
        items.extend(self.items.drain(..keep));
        self.items = items;
    }

    /// Copies the current elements into a fixed-length tuple.
    pub fn to_tuple(&self) -> super::Tuple {
        super::Tuple::new(self.items.clone())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Doc> {
        self.items.iter()
    }
}

impl Default for Arr {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Doc> for Arr {
    fn from_iter<I: IntoIterator<Item = Doc>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Arr {
    type Item = &'a Doc;
    type IntoIter = std::slice::Iter<'a, Doc>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
