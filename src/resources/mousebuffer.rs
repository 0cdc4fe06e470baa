//! Timestamp-ordered ring buffers of mouse samples.
//!
//! Host events can arrive out of order (coalesced batches, several input
//! devices). [`MouseBuffer::push`] keeps samples sorted by timestamp anyway:
//! in-order samples are appended, late ones are placed with a binary search.
//! Index `0` is always the most recent sample.

use std::collections::VecDeque;

use glam::Vec2;

/// Default number of samples kept per buffer.
pub const DEFAULT_CAPACITY: usize = 64;

/// One timestamped sample from a mouse source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample<T> {
    pub source: u32,
    pub timestamp: f64,
    pub value: T,
}

/// Fixed-capacity buffer of samples kept in chronological order.
#[derive(Debug, Clone)]
pub struct MouseBuffer<T> {
    // oldest at the front
    samples: VecDeque<Sample<T>>,
    capacity: usize,
}

/// Cursor locations, in view space.
pub type MouseLocationBuffer = MouseBuffer<Vec2>;

/// Pressed-button bitmasks; bit `i` is logical button `i`.
pub type MouseStateBuffer = MouseBuffer<u32>;

impl<T: Copy> Default for MouseBuffer<T> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl<T: Copy> MouseBuffer<T> {
    /// A capacity of zero is bumped to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Insert a sample, keeping chronological order.
    ///
    /// When the buffer is full the oldest sample is evicted. A sample older
    /// than everything in a full buffer would be evicted immediately, so it
    /// is dropped and `false` is returned.
    pub fn push(&mut self, source: u32, timestamp: f64, value: T) -> bool {
        let sample = Sample {
            source,
            timestamp,
            value,
        };

        let in_order = self
            .samples
            .back()
            .is_none_or(|newest| timestamp >= newest.timestamp);
        if in_order {
            if self.samples.len() == self.capacity {
                self.samples.pop_front();
            }
            self.samples.push_back(sample);
            return true;
        }

        // Late sample: goes after every stored sample with timestamp <= its own.
        let index = self.samples.partition_point(|s| s.timestamp <= timestamp);
        if self.samples.len() == self.capacity {
            if index == 0 {
                log::trace!(
                    "dropping late mouse sample at {} from source {}",
                    timestamp,
                    source
                );
                return false;
            }
            self.samples.pop_front();
            self.samples.insert(index - 1, sample);
        } else {
            self.samples.insert(index, sample);
        }
        true
    }

    /// The `k`-th most recent sample (`0` = newest).
    pub fn get(&self, k: usize) -> Option<&Sample<T>> {
        let len = self.samples.len();
        if k >= len {
            return None;
        }
        self.samples.get(len - 1 - k)
    }

    pub fn latest(&self) -> Option<&Sample<T>> {
        self.get(0)
    }

    /// Samples from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &Sample<T>> + '_ {
        self.samples.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}
