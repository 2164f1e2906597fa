// Ordered segment views
//
// - LiveWindow: fixed capacity ring of keys + hash index, FIFO eviction
// - History: append-only list of keys + hash index, never evicts
//
// Both views share `Arc<Segment>` values, so a segment held by both costs one
// allocation. Re-inserting a known key replaces the value in place and keeps
// the key's original position.

use crate::segment::Segment;
use std::collections::{HashMap, VecDeque};
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Default number of segments kept in the live window.
pub const DEFAULT_WINDOW_SIZE: NonZeroUsize = match NonZeroUsize::new(3) {
    Some(n) => n,
    None => unreachable!(),
};

/// Bounded window backing the live playlist.
#[derive(Debug)]
pub struct LiveWindow {
    order: VecDeque<String>,
    segments: HashMap<String, Arc<Segment>>,
    capacity: NonZeroUsize,
}

impl LiveWindow {
    #[must_use]
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            order: VecDeque::with_capacity(capacity.get()),
            segments: HashMap::with_capacity(capacity.get()),
            capacity,
        }
    }

    /// Insert `segment` under `key`.
    ///
    /// Returns the key evicted from the front of the window, if any.
    pub fn insert(&mut self, key: &str, segment: Arc<Segment>) -> Option<String> {
        if let Some(slot) = self.segments.get_mut(key) {
            *slot = segment;
            return None;
        }

        let evicted = if self.order.len() >= self.capacity.get() {
            self.order.pop_front().inspect(|oldest| {
                self.segments.remove(oldest);
            })
        } else {
            None
        };

        self.order.push_back(key.to_string());
        self.segments.insert(key.to_string(), segment);
        evicted
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Arc<Segment>> {
        self.segments.get(key)
    }

    /// Segments in window order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.order
            .iter()
            .filter_map(|key| self.segments.get(key).map(AsRef::as_ref))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    /// Ordered keys and index hold the same key set.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.order.len() == self.segments.len()
            && self.order.iter().all(|key| self.segments.contains_key(key))
    }
}

impl Default for LiveWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE)
    }
}

/// Every segment ever inserted, in first-insertion order.
#[derive(Debug, Default)]
pub struct History {
    order: Vec<String>,
    segments: HashMap<String, Arc<Segment>>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, segment: Arc<Segment>) {
        if let Some(slot) = self.segments.get_mut(key) {
            *slot = segment;
            return;
        }
        self.order.push(key.to_string());
        self.segments.insert(key.to_string(), segment);
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Arc<Segment>> {
        self.segments.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.order
            .iter()
            .filter_map(|key| self.segments.get(key).map(AsRef::as_ref))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.order.len() == self.segments.len()
            && self.order.iter().all(|key| self.segments.contains_key(key))
    }
}
