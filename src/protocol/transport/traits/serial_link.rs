//! Byte-oriented serial link to the ECU. Every receive is bounded by a
//! timeout enforced by the implementation; running out of time is not an
//! error but an empty result.
use futures_util::Future;

/// Contract to exchange raw bytes with the ECU.
pub trait SerialLink {
    type Error: core::fmt::Debug;

    /// Send a single byte.
    fn transmit_byte<'a>(
        &'a mut self,
        byte: u8,
    ) -> impl Future<Output = Result<(), Self::Error>> + 'a;

    /// Wait up to `timeout_ms` for one byte. `Ok(None)` when nothing arrived.
    /// A zero timeout only returns bytes that are already buffered.
    fn receive_byte<'a>(
        &'a mut self,
        timeout_ms: u32,
    ) -> impl Future<Output = Result<Option<u8>, Self::Error>> + 'a;

    /// Read exactly `N` bytes within `timeout_ms`. `Ok(None)` on a short read;
    /// the bytes that did arrive are discarded.
    fn receive_bytes<'a, const N: usize>(
        &'a mut self,
        timeout_ms: u32,
    ) -> impl Future<Output = Result<Option<[u8; N]>, Self::Error>> + 'a;
}
