//! Acquisition worker against a scripted ECU: resync, timeouts, staleness.
mod helpers;

use ecu_can_bridge::{
    bridge::{AcquisitionOutcome, Bridge, SnapshotCell, SnapshotStore},
    config::BridgeConfig,
    core::SNAPSHOT_LEN,
    protocol::snapshot::TelemetrySnapshot,
};
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use helpers::{payload, MockCanBus, MockSerialLink, MockTimer, VirtualClock};

type TestBridge<'a> =
    Bridge<'a, MockSerialLink, MockTimer, MockCanBus, MockTimer, SnapshotStore<NoopRawMutex>>;

struct Rig {
    clock: VirtualClock,
    link: MockSerialLink,
    bus: MockCanBus,
}

impl Rig {
    fn new() -> Self {
        let clock = VirtualClock::default();
        Self {
            link: MockSerialLink::new(&clock),
            bus: MockCanBus::new(),
            clock,
        }
    }

    fn bridge<'a>(&self, store: &'a SnapshotStore<NoopRawMutex>) -> TestBridge<'a> {
        Bridge::new(
            BridgeConfig::default(),
            self.link.clone(),
            MockTimer::new(&self.clock),
            self.bus.clone(),
            MockTimer::new(&self.clock),
            store,
        )
        .expect("default config is valid")
    }
}

#[tokio::test]
/// Noise, echo, 75 bytes: the store receives exactly the payload.
async fn test_resync_after_noise() {
    let rig = Rig::new();
    let store = SnapshotStore::new();
    let mut bridge = rig.bridge(&store);

    let data = payload(7, 3);
    rig.link.push(&[0x00, 0xFF]);
    rig.link.push_answer(&data);

    let outcome = bridge.acquisition_mut().cycle().await;

    assert_eq!(outcome, AcquisitionOutcome::Updated);
    assert_eq!(store.read().as_bytes(), &data);
    assert_eq!(rig.link.sent(), b"A");
    assert_eq!(rig.link.pending(), 0);
}

#[tokio::test]
/// No echo within the window: timeout, previous snapshot kept.
async fn test_timeout_keeps_previous_snapshot() {
    let rig = Rig::new();
    let previous = TelemetrySnapshot::from_bytes([0x5A; SNAPSHOT_LEN]);
    let store = SnapshotStore::with_initial(previous);
    let mut bridge = rig.bridge(&store);

    let started = rig.clock.now();
    let outcome = bridge.acquisition_mut().cycle().await;

    assert_eq!(outcome, AcquisitionOutcome::TimedOut);
    assert_eq!(store.read(), previous);
    assert_eq!(rig.clock.now() - started, 100);
}

#[tokio::test]
/// Echo followed by a short payload: timeout, nothing partial is stored.
async fn test_truncated_payload_is_not_stored() {
    let rig = Rig::new();
    let store = SnapshotStore::new();
    let mut bridge = rig.bridge(&store);

    rig.link.push(b"A");
    rig.link.push(&payload(1, 1)[..60]);

    assert_eq!(
        bridge.acquisition_mut().cycle().await,
        AcquisitionOutcome::TimedOut
    );
    assert_eq!(store.read(), TelemetrySnapshot::ZERO);
}

#[tokio::test]
/// Consecutive acquisition timeouts leave the broadcast frames unchanged.
async fn test_stale_snapshot_keeps_broadcasting() {
    let rig = Rig::new();
    let store = SnapshotStore::new();
    let mut bridge = rig.bridge(&store);

    rig.link.push_answer(&payload(40, 9));
    assert_eq!(
        bridge.acquisition_mut().cycle().await,
        AcquisitionOutcome::Updated
    );
    bridge.broadcast_mut().cycle().await;
    let reference = rig.bus.frames();
    assert_eq!(reference.len(), 5);

    for _ in 0..4 {
        rig.bus.clear();
        assert_eq!(
            bridge.acquisition_mut().cycle().await,
            AcquisitionOutcome::TimedOut
        );
        let report = bridge.broadcast_mut().cycle().await;
        assert!(report.is_complete());
        assert_eq!(rig.bus.frames(), reference);
    }
}

#[tokio::test]
/// Startup flush is bounded; leftovers are eaten by the first resync.
async fn test_startup_drain() {
    let rig = Rig::new();
    let store = SnapshotStore::new();
    let mut bridge = rig.bridge(&store);

    rig.link.push(&[0xEE; 300]);
    assert_eq!(bridge.drain_serial().await, 256);
    assert_eq!(rig.link.pending(), 44);

    let data = payload(3, 5);
    rig.link.push_answer(&data);
    assert_eq!(
        bridge.acquisition_mut().cycle().await,
        AcquisitionOutcome::Updated
    );
    assert_eq!(store.read().as_bytes(), &data);
}
