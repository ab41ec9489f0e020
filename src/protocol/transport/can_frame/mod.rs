//! In-memory representation of a classic CAN data frame as broadcast by the
//! bridge: standard identifier, always eight data bytes.
use embedded_can::{Frame, Id};

use crate::protocol::transport::can_id::CanId;

/// Payload length of every broadcast frame.
pub const FRAME_DATA_LEN: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Frame handed to [`CanBus::enqueue`](crate::protocol::transport::traits::can_bus::CanBus::enqueue).
pub struct CanFrame {
    /// Standard 11-bit identifier.
    pub id: CanId,
    /// Payload. Unused positions are zero.
    pub data: [u8; FRAME_DATA_LEN],
}

impl CanFrame {
    /// Assemble a frame from an identifier and a full payload.
    pub const fn from_parts(id: CanId, data: [u8; FRAME_DATA_LEN]) -> Self {
        Self { id, data }
    }

    /// Convert into a driver frame type (bxcan, fdcan, twai, ...).
    /// `None` when the driver refuses the frame.
    pub fn to_driver_frame<F: Frame>(&self) -> Option<F> {
        F::new(self.id.standard(), &self.data)
    }
}

impl Frame for CanFrame {
    /// Only standard data frames carrying exactly eight bytes are representable.
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        let id = match id.into() {
            Id::Standard(id) => CanId::from(id),
            Id::Extended(_) => return None,
        };
        let data: [u8; FRAME_DATA_LEN] = data.try_into().ok()?;
        Some(Self { id, data })
    }

    fn new_remote(_id: impl Into<Id>, _dlc: usize) -> Option<Self> {
        None
    }

    fn is_extended(&self) -> bool {
        false
    }

    fn is_remote_frame(&self) -> bool {
        false
    }

    fn id(&self) -> Id {
        Id::Standard(self.id.standard())
    }

    fn dlc(&self) -> usize {
        FRAME_DATA_LEN
    }

    fn data(&self) -> &[u8] {
        &self.data
    }
}
