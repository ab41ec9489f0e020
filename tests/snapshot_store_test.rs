//! The store under real contention: one writer thread, one reader thread.
use ecu_can_bridge::{
    bridge::{SnapshotCell, SnapshotStore},
    core::SNAPSHOT_LEN,
    protocol::snapshot::TelemetrySnapshot,
};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use static_cell::StaticCell;
use std::thread;

static STORE: StaticCell<SnapshotStore<CriticalSectionRawMutex>> = StaticCell::new();
static CONST_STORE: SnapshotStore<CriticalSectionRawMutex> = SnapshotStore::new();

const WRITES: u8 = 250;

#[test]
/// Every read is either the zero state or one complete write, and reads never
/// go back in time.
fn test_reader_never_sees_torn_snapshot() {
    let store: &'static SnapshotStore<CriticalSectionRawMutex> = STORE.init(SnapshotStore::new());

    let writer = thread::spawn(move || {
        for generation in 1..=WRITES {
            store.write(TelemetrySnapshot::from_bytes([generation; SNAPSHOT_LEN]));
            thread::yield_now();
        }
    });

    let reader = thread::spawn(move || {
        let mut last_seen = 0u8;
        loop {
            let bytes = *store.read().as_bytes();
            let generation = bytes[0];
            assert!(
                bytes.iter().all(|b| *b == generation),
                "mixed snapshot observed: {bytes:?}"
            );
            assert!(generation >= last_seen, "snapshot went backwards");
            last_seen = generation;
            if generation == WRITES {
                break;
            }
            thread::yield_now();
        }
    });

    writer.join().expect("writer thread");
    reader.join().expect("reader thread");
    assert_eq!(store.read().as_bytes()[SNAPSHOT_LEN - 1], WRITES);
}

#[test]
/// `SnapshotStore::new` is usable in a plain `static`.
fn test_const_store_in_static() {
    assert_eq!(CONST_STORE.read(), TelemetrySnapshot::ZERO);
    let sample = TelemetrySnapshot::from_bytes([0x33; SNAPSHOT_LEN]);
    CONST_STORE.write(sample);
    assert_eq!(CONST_STORE.read().rpm(), 0x3333);
}
