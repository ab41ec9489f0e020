//! Minimal abstraction over a CAN controller transmit path. The bridge only
//! transmits, so there is no receive side.
use crate::protocol::transport::can_frame::CanFrame;
use futures_util::Future;

/// Contract to queue frames into the controller's transmit mailboxes.
pub trait CanBus {
    type Error: core::fmt::Debug;

    /// Number of transmit mailboxes currently free (the "mailbox free level").
    fn free_mailboxes(&mut self) -> usize;

    /// Place a frame into a free mailbox. Must not wait for bus arbitration;
    /// a full controller is reported as an error.
    fn enqueue<'a>(
        &'a mut self,
        frame: &'a CanFrame,
    ) -> impl Future<Output = Result<(), Self::Error>> + 'a;
}
