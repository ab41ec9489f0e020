//! CAN side of the bridge: frame representation, standard identifiers, the
//! bounded-retry transmitter and the capability traits implemented by the
//! firmware (serial link, CAN controller, timer).
//!
//! ## Transmit constants
//!
//! Defaults of the per-frame retry policy. A frame that still has no mailbox
//! after [`TX_MAX_ATTEMPTS`] tries is dropped for the current cycle; the next
//! cycle recomputes it from the latest snapshot.

pub mod can_frame;
pub mod can_id;
pub mod traits;
pub mod transmitter;

/// Number of frames in one broadcast cycle.
pub const FRAME_COUNT: usize = 5;

/// Attempts per frame before it is dropped.
pub const TX_MAX_ATTEMPTS: u32 = 5;

/// Delay between two attempts of the same frame (one scheduler tick, ms).
///
/// Classic CAN controllers expose three transmit mailboxes; at 500 kbit/s an
/// eight-byte frame leaves the controller in roughly 0.25 ms, so one tick is
/// enough for a mailbox to free up unless the bus is saturated or off.
pub const TX_RETRY_DELAY_MS: u32 = 1;
