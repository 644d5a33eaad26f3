//! Bounded FIFO Window Implementation

use std::collections::VecDeque;

/// Fixed-capacity FIFO window (oldest entry evicted on push)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingBuffer<T> {
    /// Stored entries, oldest at the front
    storage: VecDeque<T>,
    /// Capacity of the window
    capacity: usize,
}

impl<T> RingBuffer<T> {
    /// Create an empty window with the given capacity.
    ///
    /// A capacity of zero is bumped to one so that `push` always retains the
    /// most recent entry.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            storage: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Create a window already filled with `capacity` copies of `value`
    pub fn filled(capacity: usize, value: T) -> Self
    where
        T: Clone,
    {
        let mut buffer = Self::new(capacity);
        for _ in 0..buffer.capacity {
            buffer.storage.push_back(value.clone());
        }
        buffer
    }

    /// Push an entry, returning the evicted oldest entry if the window was full
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.storage.len() >= self.capacity {
            self.storage.pop_front()
        } else {
            None
        };
        self.storage.push_back(item);
        evicted
    }

    /// Number of entries currently held
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Check if the window is empty
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Get the window capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Count entries matching a predicate
    pub fn count_where<F>(&self, mut predicate: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        self.storage.iter().filter(|item| predicate(item)).count()
    }
}
