//! Startup configuration of the bridge.
//!
//! Every knob is fixed when the firmware is built; [`BridgeConfig::DEFAULT`]
//! carries the values the bridge ships with. Durations are
//! [`embassy_time::Duration`] and are converted to whole milliseconds where
//! the workers consume them.
use embassy_time::Duration;

use crate::error::ConfigError;
use crate::infra::retry::RetryPolicy;
use crate::protocol::encoder::CanFrameEncoder;
use crate::protocol::serial::{
    FramerConfig, DEFAULT_RESYNC_BYTE_TIMEOUT_MS, DEFAULT_SERIAL_TIMEOUT_MS,
};
use crate::protocol::transport::{TX_MAX_ATTEMPTS, TX_RETRY_DELAY_MS};

/// Broadcast and acquisition rate (Hz).
pub const DEFAULT_RATE_HZ: u32 = 20;
/// Period used when the rate is zero (ms).
pub const FALLBACK_PERIOD_MS: u64 = 50;
/// Identifier of the first broadcast frame, before masking.
pub const DEFAULT_CAN_ID_BASE: u32 = 3100;
/// Bytes flushed from the serial link before the first request.
pub const DEFAULT_STARTUP_DRAIN_BYTES: usize = 256;
/// Stack of each worker task, in words.
pub const DEFAULT_STACK_SIZE: usize = 256;
pub const DEFAULT_ACQUISITION_PRIORITY: u8 = 2;
pub const DEFAULT_BROADCAST_PRIORITY: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BridgeConfig {
    /// Shared rate of both workers. Zero selects [`FALLBACK_PERIOD_MS`].
    pub rate_hz: u32,
    /// Resync window and payload deadline of one request.
    pub serial_timeout: Duration,
    /// Wait for a single byte while looking for the echo.
    pub resync_byte_timeout: Duration,
    /// Identifier base; frames use `base + 0..5`, masked to 11 bits.
    pub can_id_base: u32,
    /// Attempts per frame before it is dropped.
    pub tx_max_attempts: u32,
    /// Sleep between two attempts of the same frame.
    pub tx_retry_delay: Duration,
    /// Upper bound of the startup serial flush.
    pub startup_drain_bytes: usize,
    /// Worker stack size, for firmwares that spawn the workers as tasks.
    pub stack_size: usize,
    /// Priority of the acquisition worker; higher runs first.
    pub acquisition_priority: u8,
    /// Priority of the broadcast worker.
    pub broadcast_priority: u8,
}

impl BridgeConfig {
    pub const DEFAULT: Self = Self {
        rate_hz: DEFAULT_RATE_HZ,
        serial_timeout: Duration::from_millis(DEFAULT_SERIAL_TIMEOUT_MS as u64),
        resync_byte_timeout: Duration::from_millis(DEFAULT_RESYNC_BYTE_TIMEOUT_MS as u64),
        can_id_base: DEFAULT_CAN_ID_BASE,
        tx_max_attempts: TX_MAX_ATTEMPTS,
        tx_retry_delay: Duration::from_millis(TX_RETRY_DELAY_MS as u64),
        startup_drain_bytes: DEFAULT_STARTUP_DRAIN_BYTES,
        stack_size: DEFAULT_STACK_SIZE,
        acquisition_priority: DEFAULT_ACQUISITION_PRIORITY,
        broadcast_priority: DEFAULT_BROADCAST_PRIORITY,
    };

    pub const fn new() -> Self {
        Self::DEFAULT
    }

    //==============================================================SETTERS
    pub const fn with_rate_hz(mut self, rate_hz: u32) -> Self {
        self.rate_hz = rate_hz;
        self
    }

    pub const fn with_serial_timeout(mut self, timeout: Duration) -> Self {
        self.serial_timeout = timeout;
        self
    }

    pub const fn with_resync_byte_timeout(mut self, timeout: Duration) -> Self {
        self.resync_byte_timeout = timeout;
        self
    }

    pub const fn with_can_id_base(mut self, base: u32) -> Self {
        self.can_id_base = base;
        self
    }

    pub const fn with_transmit_retries(mut self, max_attempts: u32, delay: Duration) -> Self {
        self.tx_max_attempts = max_attempts;
        self.tx_retry_delay = delay;
        self
    }

    pub const fn with_startup_drain_bytes(mut self, bytes: usize) -> Self {
        self.startup_drain_bytes = bytes;
        self
    }

    pub const fn with_stack_size(mut self, words: usize) -> Self {
        self.stack_size = words;
        self
    }

    pub const fn with_priorities(mut self, acquisition: u8, broadcast: u8) -> Self {
        self.acquisition_priority = acquisition;
        self.broadcast_priority = broadcast;
        self
    }

    //==============================================================DERIVED
    /// Fixed delay following each worker cycle: `1000 / rate_hz` ms, truncated.
    /// Rates above 1000 Hz give a zero period.
    pub fn period(&self) -> Duration {
        if self.rate_hz == 0 {
            Duration::from_millis(FALLBACK_PERIOD_MS)
        } else {
            Duration::from_millis(1000 / self.rate_hz as u64)
        }
    }

    /// [`period`](Self::period) in whole milliseconds.
    pub fn period_ms(&self) -> u32 {
        millis_u32(self.period())
    }

    /// Framer settings derived from the serial timeouts.
    pub fn framer_config(&self) -> FramerConfig {
        FramerConfig {
            timeout_ms: millis_u32(self.serial_timeout),
            resync_byte_timeout_ms: millis_u32(self.resync_byte_timeout),
            ..FramerConfig::new()
        }
    }

    /// Per-frame retry policy of the CAN transmitter.
    pub fn transmit_policy(&self) -> RetryPolicy {
        RetryPolicy::bounded(self.tx_max_attempts, millis_u32(self.tx_retry_delay))
    }

    pub fn encoder(&self) -> CanFrameEncoder {
        CanFrameEncoder::new(self.can_id_base)
    }

    /// Reject settings the workers cannot run with.
    ///
    /// # Errors
    ///
    /// See [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let serial_ms = self.serial_timeout.as_millis();
        let byte_ms = self.resync_byte_timeout.as_millis();

        if serial_ms == 0 {
            return Err(ConfigError::ZeroSerialTimeout);
        }
        if byte_ms > serial_ms {
            return Err(ConfigError::ResyncTimeoutTooLong { byte_ms, serial_ms });
        }
        if self.tx_max_attempts == 0 {
            return Err(ConfigError::ZeroTransmitAttempts);
        }
        Ok(())
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn millis_u32(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}
