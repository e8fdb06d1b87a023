//! Circular Buffer Implementation

use crate::SensorReading;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Default buffer capacity (100 slots, 99 usable)
pub const DEFAULT_CAPACITY: usize = 100;

/// Errors raised when constructing a buffer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// Ring discipline needs at least one usable slot plus the sentinel slot
    #[error("Buffer capacity must be at least 2, got {0}")]
    InvalidCapacity(usize),
}

/// Which slots a snapshot copies out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotPolicy {
    /// Only the logically valid region, oldest first
    #[default]
    ValidRegion,
    /// Every physical slot in storage order, including stale and never-written ones
    FullStorage,
}

/// Fixed-capacity ring of sensor readings
///
/// `head == tail` means empty. The buffer is full when advancing `head`
/// would land on `tail`, so `capacity - 1` slots are usable.
#[derive(Debug, Clone)]
pub struct CircularBuffer {
    /// Pre-allocated storage
    storage: Box<[SensorReading]>,
    /// Write cursor
    head: usize,
    /// Read cursor
    tail: usize,
    /// Total readings accepted
    total_written: usize,
    /// Total readings discarded by drop-oldest eviction
    total_evicted: usize,
}

impl CircularBuffer {
    /// Create a new ring buffer with the given capacity
    pub fn new(capacity: usize) -> Result<Self, BufferError> {
        if capacity < 2 {
            return Err(BufferError::InvalidCapacity(capacity));
        }

        Ok(Self {
            storage: vec![SensorReading::default(); capacity].into_boxed_slice(),
            head: 0,
            tail: 0,
            total_written: 0,
            total_evicted: 0,
        })
    }

    /// Create a buffer with default capacity (100 slots)
    pub fn with_default_capacity() -> Self {
        Self {
            storage: vec![SensorReading::default(); DEFAULT_CAPACITY].into_boxed_slice(),
            head: 0,
            tail: 0,
            total_written: 0,
            total_evicted: 0,
        }
    }

    /// Store a reading at `head` if there is room.
    ///
    /// Returns `false` without touching the buffer when it is full; the
    /// caller decides what to evict.
    pub fn push(&mut self, reading: SensorReading) -> bool {
        let next_head = self.advance(self.head);
        if next_head == self.tail {
            return false;
        }

        self.storage[self.head] = reading;
        self.head = next_head;
        self.total_written += 1;
        true
    }

    /// Store a reading, discarding the oldest one first if the buffer is full.
    ///
    /// Returns the evicted reading, if any.
    pub fn push_evicting(&mut self, reading: SensorReading) -> Option<SensorReading> {
        if self.push(reading) {
            return None;
        }

        let evicted = self.pop_oldest();
        self.total_evicted += 1;
        warn!(
            "Ring buffer full ({} slots), evicted oldest reading",
            self.capacity()
        );

        let stored = self.push(reading);
        debug_assert!(stored, "push must succeed after eviction");
        evicted
    }

    /// Remove and return the oldest valid reading
    pub fn pop_oldest(&mut self) -> Option<SensorReading> {
        if self.is_empty() {
            return None;
        }
        let reading = self.storage[self.tail];
        self.tail = self.advance(self.tail);
        Some(reading)
    }

    /// Copy out the valid region, oldest first
    pub fn snapshot(&self) -> Vec<SensorReading> {
        let mut readings = Vec::with_capacity(self.len());
        let mut idx = self.tail;
        while idx != self.head {
            readings.push(self.storage[idx]);
            idx = self.advance(idx);
        }
        readings
    }

    /// Copy out readings according to the given policy
    pub fn snapshot_with(&self, policy: SnapshotPolicy) -> Vec<SensorReading> {
        match policy {
            SnapshotPolicy::ValidRegion => self.snapshot(),
            SnapshotPolicy::FullStorage => self.storage.to_vec(),
        }
    }

    /// Get the number of readings currently in the buffer
    pub fn len(&self) -> usize {
        if self.head >= self.tail {
            self.head - self.tail
        } else {
            self.capacity() - self.tail + self.head
        }
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// Check if buffer is full
    pub fn is_full(&self) -> bool {
        self.advance(self.head) == self.tail
    }

    /// Get the buffer capacity (physical slots)
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Write cursor position
    pub fn head(&self) -> usize {
        self.head
    }

    /// Read cursor position
    pub fn tail(&self) -> usize {
        self.tail
    }

    /// Get total readings written
    pub fn total_written(&self) -> usize {
        self.total_written
    }

    /// Get total readings evicted
    pub fn total_evicted(&self) -> usize {
        self.total_evicted
    }

    /// Clear the buffer (storage contents are left in place)
    pub fn clear(&mut self) {
        self.tail = self.head;
    }

    fn advance(&self, idx: usize) -> usize {
        (idx + 1) % self.capacity()
    }
}

impl Default for CircularBuffer {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}
