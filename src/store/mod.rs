//! In-memory record stores
//!
//! Both stores sit on [`Slots`], a fixed-capacity collection whose live
//! records always occupy the prefix `[0, len)`. Slots past `len` hold the
//! zero record and are never exposed.

pub mod comments;
pub mod users;

pub use comments::CommentStore;
pub use users::UserStore;

use crate::error::{AppError, Result};

/// Fixed-capacity ordered collection with shift-compacting deletes
#[derive(Debug, Clone)]
pub struct Slots<T> {
    records: Box<[T]>,
    live: usize,
}

impl<T: Default> Slots<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: std::iter::repeat_with(T::default).take(capacity).collect(),
            live: 0,
        }
    }

    /// Write `record` into the first free slot and return its position
    pub fn append(&mut self, record: T) -> Result<usize> {
        if self.live == self.records.len() {
            return Err(AppError::CapacityExceeded {
                capacity: self.records.len(),
            });
        }

        let position = self.live;
        self.records[position] = record;
        self.live += 1;

        Ok(position)
    }

    /// Remove the record at `position`, shifting later records one slot
    /// toward the front and resetting the vacated tail slot
    pub fn delete_at(&mut self, position: usize) -> Result<T> {
        self.check(position)?;

        let removed = std::mem::take(&mut self.records[position]);
        // the taken slot now holds T::default() and rotates to live - 1
        self.records[position..self.live].rotate_left(1);
        self.live -= 1;

        Ok(removed)
    }

    /// Lazy view of the live records in storage order
    pub fn all(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.records[..self.live]
    }

    pub fn get(&self, position: usize) -> Result<&T> {
        self.check(position)?;
        Ok(&self.records[position])
    }

    pub fn get_mut(&mut self, position: usize) -> Result<&mut T> {
        self.check(position)?;
        Ok(&mut self.records[position])
    }

    /// Position of the first live record matching `pred`
    pub fn position(&self, pred: impl FnMut(&T) -> bool) -> Option<usize> {
        self.all().position(pred)
    }

    /// Backing slot regardless of liveness, for inspecting cleared slots
    pub fn raw_slot(&self, position: usize) -> Option<&T> {
        self.records.get(position)
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn capacity(&self) -> usize {
        self.records.len()
    }

    fn check(&self, position: usize) -> Result<()> {
        if position < self.live {
            Ok(())
        } else {
            Err(AppError::OutOfRange {
                position,
                live: self.live,
            })
        }
    }
}

/// Query result keyed by each match's position in the store
///
/// Non-matching positions are simply absent; `span` is the number of live
/// records the query ran over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sparse<T> {
    span: usize,
    hits: Vec<(usize, T)>,
}

impl<T: Clone> Sparse<T> {
    pub(crate) fn select(records: &[T], mut pred: impl FnMut(&T) -> bool) -> Self {
        let hits = records
            .iter()
            .enumerate()
            .filter(|(_, r)| pred(r))
            .map(|(i, r)| (i, r.clone()))
            .collect();

        Self {
            span: records.len(),
            hits,
        }
    }
}

impl<T> Sparse<T> {
    /// Record matched at `position`, if any
    pub fn get(&self, position: usize) -> Option<&T> {
        self.hits
            .binary_search_by_key(&position, |(p, _)| *p)
            .ok()
            .map(|i| &self.hits[i].1)
    }

    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.hits.iter().map(|(p, _)| *p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.hits.iter().map(|(p, r)| (*p, r))
    }

    /// Matches in position order, dropping the positions
    pub fn into_records(self) -> Vec<T> {
        self.hits.into_iter().map(|(_, r)| r).collect()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn span(&self) -> usize {
        self.span
    }
}

/// Case-insensitive substring test; `needle_lower` must already be lowercase
pub(crate) fn contains_folded(haystack: &str, needle_lower: &str) -> bool {
    needle_lower.is_empty() || haystack.to_lowercase().contains(needle_lower)
}
