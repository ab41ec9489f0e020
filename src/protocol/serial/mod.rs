//! Request/echo/payload exchange that pulls one [`TelemetrySnapshot`] out of
//! the ECU.
//!
//! ```text
//!  bridge                         ECU
//!    | ---- 'A' ------------------> |
//!    | <--- noise.. 'A' ----------- |   resync: drop bytes until the echo
//!    | <--- 75 payload bytes ------ |   one bounded bulk read
//! ```
//!
//! Every call starts from [`FramerState::Idle`]; nothing is carried over from
//! a previous request. A timeout never yields a partial snapshot.
use crate::core::{REQUEST_BYTE, SNAPSHOT_LEN};
use crate::error::{FramerError, FramerState};
use crate::infra::retry::RetryPolicy;
use crate::protocol::snapshot::TelemetrySnapshot;
use crate::protocol::transport::traits::{bridge_timer::BridgeTimer, serial_link::SerialLink};

/// Overall deadline of a request (ms), used for both the resync window and
/// the payload read.
pub const DEFAULT_SERIAL_TIMEOUT_MS: u32 = 100;

/// Wait for a single byte while looking for the echo (ms).
pub const DEFAULT_RESYNC_BYTE_TIMEOUT_MS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Timing and command byte of a [`ProtocolFramer`].
pub struct FramerConfig {
    /// Command sent to the ECU and expected back as echo.
    pub request_byte: u8,
    /// Resync window, and deadline of the payload read (ms).
    pub timeout_ms: u32,
    /// Per-byte wait during resync (ms).
    pub resync_byte_timeout_ms: u32,
}

impl FramerConfig {
    pub const fn new() -> Self {
        Self {
            request_byte: REQUEST_BYTE,
            timeout_ms: DEFAULT_SERIAL_TIMEOUT_MS,
            resync_byte_timeout_ms: DEFAULT_RESYNC_BYTE_TIMEOUT_MS,
        }
    }
}

impl Default for FramerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot requester bound to one serial link.
pub struct ProtocolFramer<L: SerialLink, T: BridgeTimer> {
    link: L,
    timer: T,
    config: FramerConfig,
    state: FramerState,
}

impl<L: SerialLink, T: BridgeTimer> ProtocolFramer<L, T> {
    pub fn new(link: L, timer: T, config: FramerConfig) -> Self {
        Self {
            link,
            timer,
            config,
            state: FramerState::Idle,
        }
    }

    /// Send the request byte, wait for its echo, then read the payload.
    ///
    /// # Errors
    ///
    /// - [`FramerError::Timeout`] when the echo does not show up within the
    ///   window, or when the payload is incomplete at the deadline.
    /// - [`FramerError::Link`] when the driver reports an error.
    pub async fn request_snapshot(
        &mut self,
    ) -> Result<TelemetrySnapshot, FramerError<L::Error>> {
        self.enter(FramerState::Idle);

        if let Err(e) = self.link.transmit_byte(self.config.request_byte).await {
            return Err(self.fail(FramerError::Link(e)));
        }

        // Step 1: resync on the echo.
        self.enter(FramerState::AwaitingEcho);
        let mut retry = RetryPolicy::within(self.config.timeout_ms as u64).start(&self.timer);
        let mut discarded: u32 = 0;
        loop {
            match self
                .link
                .receive_byte(self.config.resync_byte_timeout_ms)
                .await
            {
                Ok(Some(byte)) if byte == self.config.request_byte => break,
                Ok(Some(_)) => discarded += 1,
                Ok(None) => {}
                Err(e) => return Err(self.fail(FramerError::Link(e))),
            }

            if !retry.failed(&mut self.timer).await {
                #[cfg(feature = "defmt")]
                defmt::debug!(
                    "No echo after {} ms ({} bytes discarded)",
                    retry.elapsed_ms(&self.timer),
                    discarded
                );
                return Err(self.fail(FramerError::Timeout {
                    state: FramerState::AwaitingEcho,
                    discarded,
                }));
            }
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("Echo found after {} stray bytes", discarded);

        // Step 2: payload, full deadline again.
        self.enter(FramerState::ReceivingPayload);
        match self
            .link
            .receive_bytes::<SNAPSHOT_LEN>(self.config.timeout_ms)
            .await
        {
            Ok(Some(bytes)) => {
                self.enter(FramerState::Done);
                Ok(TelemetrySnapshot::from_bytes(bytes))
            }
            Ok(None) => Err(self.fail(FramerError::Timeout {
                state: FramerState::ReceivingPayload,
                discarded,
            })),
            Err(e) => Err(self.fail(FramerError::Link(e))),
        }
    }

    /// Discard up to `max_bytes` already buffered bytes. Returns how many
    /// were dropped; stops at the first empty read or driver error.
    pub async fn drain(&mut self, max_bytes: usize) -> usize {
        let mut drained = 0;
        while drained < max_bytes {
            match self.link.receive_byte(0).await {
                Ok(Some(_)) => drained += 1,
                Ok(None) | Err(_) => break,
            }
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("Drained {} bytes from serial link", drained);

        drained
    }

    /// State reached by the last request.
    pub fn state(&self) -> FramerState {
        self.state
    }

    pub fn config(&self) -> &FramerConfig {
        &self.config
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    pub fn into_parts(self) -> (L, T) {
        (self.link, self.timer)
    }

    fn enter(&mut self, state: FramerState) {
        #[cfg(feature = "defmt")]
        defmt::trace!("Framer {} -> {}", self.state, state);
        self.state = state;
    }

    fn fail(&mut self, error: FramerError<L::Error>) -> FramerError<L::Error> {
        #[cfg(feature = "defmt")]
        defmt::debug!("Snapshot request failed in state {}", self.state);
        self.enter(FramerState::Failed);
        error
    }
}
