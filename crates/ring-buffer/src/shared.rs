//! Lock-guarded buffer handle

use crate::buffer::{BufferError, CircularBuffer, SnapshotPolicy};
use crate::SensorReading;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// Cloneable handle to a single buffer; every access goes through its lock.
///
/// The guard returned by [`SharedBuffer::lock`] may be held across `.await`
/// points, which is what the batch-scoped producer does.
#[derive(Debug, Clone)]
pub struct SharedBuffer {
    inner: Arc<Mutex<CircularBuffer>>,
}

impl SharedBuffer {
    /// Create a shared buffer with the given capacity
    pub fn new(capacity: usize) -> Result<Self, BufferError> {
        Ok(Self::from_buffer(CircularBuffer::new(capacity)?))
    }

    /// Wrap an existing buffer
    pub fn from_buffer(buffer: CircularBuffer) -> Self {
        Self {
            inner: Arc::new(Mutex::new(buffer)),
        }
    }

    /// Acquire exclusive access
    pub async fn lock(&self) -> MutexGuard<'_, CircularBuffer> {
        self.inner.lock().await
    }

    /// Push under the lock with drop-oldest eviction
    pub async fn push_evicting(&self, reading: SensorReading) -> Option<SensorReading> {
        self.lock().await.push_evicting(reading)
    }

    /// Snapshot under the lock
    pub async fn snapshot(&self, policy: SnapshotPolicy) -> Vec<SensorReading> {
        self.lock().await.snapshot_with(policy)
    }

    /// Current number of readings
    pub async fn len(&self) -> usize {
        self.lock().await.len()
    }
}
