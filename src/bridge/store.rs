//! Single-slot holder of the latest snapshot, shared by the acquisition
//! worker (sole writer) and the broadcast worker (sole reader).
//!
//! Both sides copy the whole 75-byte record under the same lock, so a reader
//! gets either the zero state or exactly one completed write. The lock is
//! held for one fixed-size copy and never across an `.await`.
use core::cell::Cell;

use embassy_sync::blocking_mutex::{raw::RawMutex, Mutex};

use crate::protocol::snapshot::TelemetrySnapshot;

/// Access to the shared snapshot slot.
pub trait SnapshotCell {
    /// Copy out the current snapshot.
    fn read(&self) -> TelemetrySnapshot;

    /// Replace the current snapshot as a whole.
    fn write(&self, snapshot: TelemetrySnapshot);
}

/// Mutex-guarded [`SnapshotCell`]. `M` picks the locking strategy: a
/// `CriticalSectionRawMutex` when the workers run at different interrupt
/// priorities, a `NoopRawMutex` when they share one executor.
pub struct SnapshotStore<M: RawMutex> {
    inner: Mutex<M, Cell<TelemetrySnapshot>>,
}

impl<M: RawMutex> SnapshotStore<M> {
    /// Store holding [`TelemetrySnapshot::ZERO`]; usable in a `static`.
    pub const fn new() -> Self {
        Self::with_initial(TelemetrySnapshot::ZERO)
    }

    pub const fn with_initial(snapshot: TelemetrySnapshot) -> Self {
        Self {
            inner: Mutex::new(Cell::new(snapshot)),
        }
    }
}

impl<M: RawMutex> Default for SnapshotStore<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex> SnapshotCell for SnapshotStore<M> {
    fn read(&self) -> TelemetrySnapshot {
        self.inner.lock(|cell| cell.get())
    }

    fn write(&self, snapshot: TelemetrySnapshot) {
        self.inner.lock(|cell| cell.set(snapshot));
    }
}

//==================================================================================TESTS
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SNAPSHOT_LEN;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    #[test]
    fn test_starts_zeroed() {
        let store = SnapshotStore::<NoopRawMutex>::new();
        assert_eq!(store.read(), TelemetrySnapshot::ZERO);
    }

    #[test]
    /// A write replaces the whole record.
    fn test_write_replaces_snapshot() {
        let store = SnapshotStore::<NoopRawMutex>::new();
        let first = TelemetrySnapshot::from_bytes([0x11; SNAPSHOT_LEN]);
        let second = TelemetrySnapshot::from_bytes([0x22; SNAPSHOT_LEN]);

        store.write(first);
        assert_eq!(store.read(), first);
        store.write(second);
        assert_eq!(store.read(), second);
        assert_eq!(store.read(), second, "reading does not consume");
    }
}
