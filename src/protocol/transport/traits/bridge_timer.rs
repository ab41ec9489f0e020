//! Timer abstraction providing the timing primitives required by the serial
//! deadline, the transmit retries and the worker periods.

/// Timer trait abstraction; each worker owns its own instance.
pub trait BridgeTimer {
    /// Monotonic time in milliseconds. Only differences are meaningful.
    fn now_ms(&self) -> u64;

    /// Asynchronously wait for `millis` milliseconds.
    fn delay_ms<'a>(&'a mut self, millis: u32) -> impl core::future::Future<Output = ()> + 'a;
}

/// [`BridgeTimer`] backed by `embassy_time`. The firmware must link an
/// embassy time driver.
#[cfg(feature = "embassy-timer")]
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbassyTimer;

#[cfg(feature = "embassy-timer")]
impl BridgeTimer for EmbassyTimer {
    fn now_ms(&self) -> u64 {
        embassy_time::Instant::now().as_millis()
    }

    async fn delay_ms(&mut self, millis: u32) {
        embassy_time::Timer::after(embassy_time::Duration::from_millis(millis as u64)).await;
    }
}
