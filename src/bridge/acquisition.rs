//! Producer side of the bridge: one snapshot request per period.
use core::convert::Infallible;

use crate::bridge::store::SnapshotCell;
use crate::error::FramerError;
use crate::protocol::serial::ProtocolFramer;
use crate::protocol::transport::traits::{bridge_timer::BridgeTimer, serial_link::SerialLink};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Result of one acquisition cycle.
pub enum AcquisitionOutcome {
    /// A fresh snapshot replaced the stored one.
    Updated,
    /// No complete answer in time; the stored snapshot is kept.
    TimedOut,
    /// The serial driver failed; handled like a timeout.
    LinkError,
}

/// Polls the ECU and publishes every complete snapshot to the store.
pub struct AcquisitionWorker<'a, L: SerialLink, T: BridgeTimer, S: SnapshotCell> {
    framer: ProtocolFramer<L, T>,
    store: &'a S,
    period_ms: u32,
}

impl<'a, L: SerialLink, T: BridgeTimer, S: SnapshotCell> AcquisitionWorker<'a, L, T, S> {
    pub fn new(framer: ProtocolFramer<L, T>, store: &'a S, period_ms: u32) -> Self {
        Self {
            framer,
            store,
            period_ms,
        }
    }

    /// Flush stale serial bytes before the first request.
    pub async fn drain(&mut self, max_bytes: usize) -> usize {
        self.framer.drain(max_bytes).await
    }

    /// One request; the store is written only on success.
    pub async fn cycle(&mut self) -> AcquisitionOutcome {
        match self.framer.request_snapshot().await {
            Ok(snapshot) => {
                self.store.write(snapshot);
                AcquisitionOutcome::Updated
            }
            Err(FramerError::Timeout { .. }) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("Acquisition timed out, keeping last snapshot");
                AcquisitionOutcome::TimedOut
            }
            Err(FramerError::Link(_e)) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Serial link error, keeping last snapshot");
                AcquisitionOutcome::LinkError
            }
        }
    }

    /// Cycle forever, sleeping a fixed period after each request.
    pub async fn run(&mut self) -> Infallible {
        loop {
            self.cycle().await;
            self.framer.timer_mut().delay_ms(self.period_ms).await;
        }
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    pub fn framer(&self) -> &ProtocolFramer<L, T> {
        &self.framer
    }

    pub fn framer_mut(&mut self) -> &mut ProtocolFramer<L, T> {
        &mut self.framer
    }
}
