//! The bridge proper: an acquisition worker and a broadcast worker coupled
//! only through a [`SnapshotCell`].
//!
//! Firmwares that run both workers on one executor call [`Bridge::run`].
//! Firmwares that want distinct task priorities take the workers apart with
//! [`Bridge::into_parts`] and spawn each `run` loop on its own executor,
//! following [`BridgeConfig::acquisition_priority`] and
//! [`BridgeConfig::broadcast_priority`].
//!
//! ```rust,ignore
//! static STORE: SnapshotStore<CriticalSectionRawMutex> = SnapshotStore::new();
//!
//! let bridge = Bridge::new(
//!     BridgeConfig::default(),
//!     uart,
//!     EmbassyTimer,
//!     can,
//!     EmbassyTimer,
//!     &STORE,
//! )?;
//! bridge.run().await;
//! ```
pub mod acquisition;
pub mod broadcast;
pub mod store;

use core::convert::Infallible;

use futures_util::future::join;

use crate::config::BridgeConfig;
use crate::error::ConfigError;
use crate::protocol::serial::ProtocolFramer;
use crate::protocol::transport::{
    traits::{bridge_timer::BridgeTimer, can_bus::CanBus, serial_link::SerialLink},
    transmitter::CanTransmitter,
};

pub use acquisition::{AcquisitionOutcome, AcquisitionWorker};
pub use broadcast::{BroadcastReport, BroadcastWorker};
pub use store::{SnapshotCell, SnapshotStore};

/// Both workers, wired to one store.
pub struct Bridge<'a, L, TA, C, TB, S>
where
    L: SerialLink,
    TA: BridgeTimer,
    C: CanBus,
    TB: BridgeTimer,
    S: SnapshotCell,
{
    config: BridgeConfig,
    acquisition: AcquisitionWorker<'a, L, TA, S>,
    broadcast: BroadcastWorker<'a, C, TB, S>,
}

impl<'a, L, TA, C, TB, S> Bridge<'a, L, TA, C, TB, S>
where
    L: SerialLink,
    TA: BridgeTimer,
    C: CanBus,
    TB: BridgeTimer,
    S: SnapshotCell,
{
    /// Validate `config` and build both workers. Each worker owns its timer.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] reported by [`BridgeConfig::validate`].
    pub fn new(
        config: BridgeConfig,
        link: L,
        acquisition_timer: TA,
        bus: C,
        broadcast_timer: TB,
        store: &'a S,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let period_ms = config.period_ms();
        let framer = ProtocolFramer::new(link, acquisition_timer, config.framer_config());
        let transmitter =
            CanTransmitter::with_policy(bus, broadcast_timer, config.transmit_policy());

        #[cfg(feature = "defmt")]
        defmt::info!(
            "Bridge configured: {} ms period, CAN base {}",
            period_ms,
            config.can_id_base
        );

        Ok(Self {
            config,
            acquisition: AcquisitionWorker::new(framer, store, period_ms),
            broadcast: BroadcastWorker::new(config.encoder(), transmitter, store, period_ms),
        })
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Startup flush of the serial link, bounded by
    /// [`BridgeConfig::startup_drain_bytes`].
    pub async fn drain_serial(&mut self) -> usize {
        self.acquisition
            .drain(self.config.startup_drain_bytes)
            .await
    }

    pub fn acquisition_mut(&mut self) -> &mut AcquisitionWorker<'a, L, TA, S> {
        &mut self.acquisition
    }

    pub fn broadcast_mut(&mut self) -> &mut BroadcastWorker<'a, C, TB, S> {
        &mut self.broadcast
    }

    /// Split into independently runnable workers.
    pub fn into_parts(
        self,
    ) -> (
        AcquisitionWorker<'a, L, TA, S>,
        BroadcastWorker<'a, C, TB, S>,
    ) {
        (self.acquisition, self.broadcast)
    }

    /// Drain the serial link, then run both loops concurrently. Never returns.
    pub async fn run(mut self) -> Infallible {
        self.drain_serial().await;

        let Self {
            mut acquisition,
            mut broadcast,
            ..
        } = self;
        let (never, _) = join(acquisition.run(), broadcast.run()).await;
        never
    }
}
