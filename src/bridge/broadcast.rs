//! Consumer side of the bridge: encode the latest snapshot and push the five
//! frames once per period.
use core::convert::Infallible;

use crate::bridge::store::SnapshotCell;
use crate::protocol::encoder::CanFrameEncoder;
use crate::protocol::transport::{
    traits::{bridge_timer::BridgeTimer, can_bus::CanBus},
    transmitter::CanTransmitter,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Per-cycle transmit tally.
pub struct BroadcastReport {
    /// Frames accepted by the controller.
    pub sent: u8,
    /// Frames dropped after exhausting their retries.
    pub dropped: u8,
}

impl BroadcastReport {
    pub fn is_complete(&self) -> bool {
        self.dropped == 0
    }
}

/// Repeats the stored snapshot on the CAN bus.
pub struct BroadcastWorker<'a, C: CanBus, T: BridgeTimer, S: SnapshotCell> {
    encoder: CanFrameEncoder,
    transmitter: CanTransmitter<C, T>,
    store: &'a S,
    period_ms: u32,
}

impl<'a, C: CanBus, T: BridgeTimer, S: SnapshotCell> BroadcastWorker<'a, C, T, S> {
    pub fn new(
        encoder: CanFrameEncoder,
        transmitter: CanTransmitter<C, T>,
        store: &'a S,
        period_ms: u32,
    ) -> Self {
        Self {
            encoder,
            transmitter,
            store,
            period_ms,
        }
    }

    /// Read, encode and send all five frames. A dropped frame does not stop
    /// the others.
    pub async fn cycle(&mut self) -> BroadcastReport {
        let snapshot = self.store.read();
        let frames = self.encoder.encode(&snapshot);

        let mut report = BroadcastReport::default();
        for frame in frames.iter() {
            match self.transmitter.send(frame).await {
                Ok(()) => report.sent += 1,
                Err(_e) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("CAN frame {=u16:#X} dropped this cycle", frame.id.raw());
                    report.dropped += 1;
                }
            }
        }
        report
    }

    /// Cycle forever, sleeping a fixed period after each broadcast.
    pub async fn run(&mut self) -> Infallible {
        loop {
            let _report = self.cycle().await;
            #[cfg(feature = "defmt")]
            defmt::trace!("Broadcast cycle: {}", _report);
            self.transmitter.timer_mut().delay_ms(self.period_ms).await;
        }
    }

    pub fn encoder(&self) -> &CanFrameEncoder {
        &self.encoder
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    pub fn transmitter(&self) -> &CanTransmitter<C, T> {
        &self.transmitter
    }

    pub fn transmitter_mut(&mut self) -> &mut CanTransmitter<C, T> {
        &mut self.transmitter
    }
}
