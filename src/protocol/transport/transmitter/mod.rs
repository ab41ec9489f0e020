//! Bounded-retry delivery of a single frame to the CAN controller.
//!
//! Each attempt checks the controller's free mailbox level and, when one is
//! available, enqueues the frame. A missing mailbox and a rejected enqueue are
//! both counted as failed attempts. After the policy is exhausted the frame is
//! dropped; nothing is queued for later.
use crate::error::TransmitError;
use crate::infra::retry::RetryPolicy;
use crate::protocol::transport::{
    can_frame::CanFrame,
    traits::{bridge_timer::BridgeTimer, can_bus::CanBus},
    TX_MAX_ATTEMPTS, TX_RETRY_DELAY_MS,
};

/// Owns the CAN controller and the timer used between attempts.
pub struct CanTransmitter<C: CanBus, T: BridgeTimer> {
    bus: C,
    timer: T,
    policy: RetryPolicy,
}

impl<C: CanBus, T: BridgeTimer> CanTransmitter<C, T> {
    /// Default policy: [`TX_MAX_ATTEMPTS`] attempts, [`TX_RETRY_DELAY_MS`] apart.
    pub fn new(bus: C, timer: T) -> Self {
        Self::with_policy(
            bus,
            timer,
            RetryPolicy::bounded(TX_MAX_ATTEMPTS, TX_RETRY_DELAY_MS),
        )
    }

    pub fn with_policy(bus: C, timer: T, policy: RetryPolicy) -> Self {
        Self { bus, timer, policy }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Hand `frame` to the controller.
    ///
    /// # Errors
    ///
    /// [`TransmitError::Exhausted`] when no attempt succeeded. The frame is
    /// lost for this cycle.
    pub async fn send(&mut self, frame: &CanFrame) -> Result<(), TransmitError<C::Error>> {
        let mut retry = self.policy.start(&self.timer);
        let mut last_error = None;

        loop {
            if self.bus.free_mailboxes() > 0 {
                match self.bus.enqueue(frame).await {
                    Ok(()) => {
                        #[cfg(feature = "defmt")]
                        defmt::trace!(
                            "Frame {=u16:#X} queued after {} failed attempts",
                            frame.id.raw(),
                            retry.attempts()
                        );
                        return Ok(());
                    }
                    Err(e) => last_error = Some(e),
                }
            }

            if !retry.failed(&mut self.timer).await {
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "Dropping frame {=u16:#X} after {} attempts",
                    frame.id.raw(),
                    retry.attempts()
                );
                return Err(TransmitError::Exhausted {
                    attempts: retry.attempts(),
                    last_error,
                });
            }
        }
    }

    pub fn bus(&self) -> &C {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut C {
        &mut self.bus
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    pub fn into_parts(self) -> (C, T) {
        (self.bus, self.timer)
    }
}
