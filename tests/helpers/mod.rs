//! Test doubles for the serial link, CAN controller and timer, all driven by
//! one virtual clock so timeouts are deterministic.
use ecu_can_bridge::core::{REQUEST_BYTE, SNAPSHOT_LEN};
use ecu_can_bridge::protocol::transport::{
    can_frame::CanFrame,
    traits::{bridge_timer::BridgeTimer, can_bus::CanBus, serial_link::SerialLink},
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::task::yield_now;

//==================================================================================CLOCK
#[derive(Clone, Default)]
#[allow(dead_code)]
/// Shared monotonic time in milliseconds. Only the doubles move it.
pub struct VirtualClock(Arc<AtomicU64>);

#[allow(dead_code)]
impl VirtualClock {
    pub fn now(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    pub fn advance(&self, millis: u64) {
        self.0.fetch_add(millis, Ordering::SeqCst);
    }
}

//==================================================================================TIMER
#[derive(Clone)]
#[allow(dead_code)]
/// Timer that advances the virtual clock instead of sleeping, and records
/// every requested delay.
pub struct MockTimer {
    clock: VirtualClock,
    sleeps: Arc<Mutex<Vec<u32>>>,
}

#[allow(dead_code)]
impl MockTimer {
    pub fn new(clock: &VirtualClock) -> Self {
        Self {
            clock: clock.clone(),
            sleeps: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn sleeps(&self) -> Vec<u32> {
        self.sleeps.lock().unwrap().clone()
    }
}

impl BridgeTimer for MockTimer {
    fn now_ms(&self) -> u64 {
        self.clock.now()
    }

    async fn delay_ms(&mut self, millis: u32) {
        self.sleeps.lock().unwrap().push(millis);
        self.clock.advance(millis as u64);
        yield_now().await;
    }
}

//==================================================================================SERIAL
#[derive(Clone)]
#[allow(dead_code)]
/// In-memory UART. Buffered bytes cost 1 ms each; an empty buffer burns the
/// whole timeout. Clones share the same buffers, so a test keeps one handle
/// to play the ECU.
pub struct MockSerialLink {
    clock: VirtualClock,
    rx: Arc<Mutex<VecDeque<u8>>>,
    tx: Arc<Mutex<Vec<u8>>>,
}

#[allow(dead_code)]
impl MockSerialLink {
    pub fn new(clock: &VirtualClock) -> Self {
        Self {
            clock: clock.clone(),
            rx: Arc::new(Mutex::new(VecDeque::new())),
            tx: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue bytes as if the ECU had sent them.
    pub fn push(&self, bytes: &[u8]) {
        self.rx.lock().unwrap().extend(bytes.iter().copied());
    }

    /// Queue a well-formed answer: echo, then the payload.
    pub fn push_answer(&self, payload: &[u8; SNAPSHOT_LEN]) {
        self.push(&[REQUEST_BYTE]);
        self.push(payload);
    }

    /// Bytes the bridge sent to the ECU.
    pub fn sent(&self) -> Vec<u8> {
        self.tx.lock().unwrap().clone()
    }

    pub fn pending(&self) -> usize {
        self.rx.lock().unwrap().len()
    }
}

impl SerialLink for MockSerialLink {
    type Error = ();

    async fn transmit_byte<'a>(&'a mut self, byte: u8) -> Result<(), Self::Error> {
        self.tx.lock().unwrap().push(byte);
        Ok(())
    }

    async fn receive_byte<'a>(&'a mut self, timeout_ms: u32) -> Result<Option<u8>, Self::Error> {
        let byte = self.rx.lock().unwrap().pop_front();
        match byte {
            Some(_) => self.clock.advance(1),
            None => {
                self.clock.advance(timeout_ms as u64);
                yield_now().await;
            }
        }
        Ok(byte)
    }

    async fn receive_bytes<'a, const N: usize>(
        &'a mut self,
        timeout_ms: u32,
    ) -> Result<Option<[u8; N]>, Self::Error> {
        let mut rx = self.rx.lock().unwrap();
        if rx.len() < N {
            rx.clear();
            drop(rx);
            self.clock.advance(timeout_ms as u64);
            yield_now().await;
            return Ok(None);
        }
        let mut out = [0u8; N];
        for slot in out.iter_mut() {
            *slot = rx.pop_front().unwrap();
        }
        self.clock.advance(N as u64);
        Ok(Some(out))
    }
}

//==================================================================================CAN
#[allow(dead_code)]
struct BusState {
    free_mailboxes: usize,
    reject_next: u32,
    frames: Vec<CanFrame>,
}

#[derive(Clone)]
#[allow(dead_code)]
/// CAN controller recording every accepted frame. The free mailbox level and
/// enqueue rejections are scripted by the test.
pub struct MockCanBus {
    state: Arc<Mutex<BusState>>,
}

#[allow(dead_code)]
impl MockCanBus {
    /// Controller with three free mailboxes.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(BusState {
                free_mailboxes: 3,
                reject_next: 0,
                frames: Vec::new(),
            })),
        }
    }

    pub fn set_free_mailboxes(&self, level: usize) {
        self.state.lock().unwrap().free_mailboxes = level;
    }

    /// Refuse the next `count` enqueue calls.
    pub fn reject_next(&self, count: u32) {
        self.state.lock().unwrap().reject_next = count;
    }

    pub fn frames(&self) -> Vec<CanFrame> {
        self.state.lock().unwrap().frames.clone()
    }

    pub fn clear(&self) {
        self.state.lock().unwrap().frames.clear();
    }
}

impl CanBus for MockCanBus {
    type Error = ();

    fn free_mailboxes(&mut self) -> usize {
        self.state.lock().unwrap().free_mailboxes
    }

    async fn enqueue<'a>(&'a mut self, frame: &'a CanFrame) -> Result<(), Self::Error> {
        let mut state = self.state.lock().unwrap();
        if state.reject_next > 0 {
            state.reject_next -= 1;
            return Err(());
        }
        state.frames.push(*frame);
        Ok(())
    }
}

//==================================================================================FIXTURES
#[allow(dead_code)]
/// Payload with recognizable bytes: `offset * step + seed`, wrapping.
pub fn payload(seed: u8, step: u8) -> [u8; SNAPSHOT_LEN] {
    core::array::from_fn(|i| (i as u8).wrapping_mul(step).wrapping_add(seed))
}
