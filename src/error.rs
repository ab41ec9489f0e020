//! Error definitions shared across library modules.
//! Each type models one failure scenario of the bridge (serial acquisition,
//! CAN transmission, configuration). None of them leaves the bridge: workers
//! log them and carry on with the last good snapshot.
use thiserror_no_std::Error;

//==================================================================================FRAMER_ERROR
/// Phase of a snapshot request, reported alongside a timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FramerState {
    /// No request in flight.
    Idle,
    /// Request byte sent, discarding bytes until the echo shows up.
    AwaitingEcho,
    /// Echo seen, reading the fixed-length payload.
    ReceivingPayload,
    /// Snapshot complete.
    Done,
    /// Request abandoned for this cycle.
    Failed,
}

#[derive(Error, Debug)]
/// Failures while pulling one snapshot over the serial link.
pub enum FramerError<E: core::fmt::Debug> {
    /// No echo, or an incomplete payload, within the read deadline.
    /// `discarded` counts the stray bytes dropped while looking for the echo.
    #[error("Serial timeout while {state:?} ({discarded} stray bytes discarded)")]
    Timeout { state: FramerState, discarded: u32 },
    /// The serial driver reported an error.
    #[error("Serial link error: {0:?}")]
    Link(E),
}

impl<E: core::fmt::Debug> FramerError<E> {
    /// `true` for the timeout case, which is the expected failure on a quiet link.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FramerError::Timeout { .. })
    }
}

//==================================================================================TRANSMIT_ERROR
#[derive(Error, Debug)]
/// Failures while handing one frame to the CAN controller.
pub enum TransmitError<E: core::fmt::Debug> {
    /// Every attempt found no free mailbox or had its enqueue rejected.
    /// `last_error` holds the most recent driver error, if enqueue was ever tried.
    #[error("Frame dropped after {attempts} attempts (last bus error: {last_error:?})")]
    Exhausted { attempts: u32, last_error: Option<E> },
}

//==================================================================================CONFIG_ERROR
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Rejected bridge configuration, detected once at startup.
pub enum ConfigError {
    /// The serial read deadline must be strictly positive.
    #[error("Serial timeout must be greater than zero")]
    ZeroSerialTimeout,
    /// The per-byte resync timeout cannot exceed the whole request deadline.
    #[error("Resync byte timeout ({byte_ms} ms) exceeds serial timeout ({serial_ms} ms)")]
    ResyncTimeoutTooLong { byte_ms: u64, serial_ms: u64 },
    /// At least one transmit attempt is required per frame.
    #[error("CAN transmit policy needs at least one attempt")]
    ZeroTransmitAttempts,
}
