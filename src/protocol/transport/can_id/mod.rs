//! Standard (11-bit) CAN identifiers of the broadcast frames and the slot
//! table that derives them from a configurable base.
use embedded_can::StandardId;

use crate::protocol::transport::FRAME_COUNT;

/// Bits kept from a configured identifier before it reaches the controller.
pub const STANDARD_ID_MASK: u32 = 0x7FF;

//==================================================================================CAN_ID
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Encapsulates a standard CAN identifier (11 bits).
pub struct CanId(StandardId);

impl CanId {
    /// Keep the low 11 bits of `raw`, exactly like writing it into the
    /// controller's standard-id register. `3100` becomes `0x41C` (1052).
    pub fn from_raw_masked(raw: u32) -> Self {
        let masked = (raw & STANDARD_ID_MASK) as u16;
        // `masked` never exceeds 0x7FF, so `new` cannot fail here.
        Self(StandardId::new(masked).unwrap_or(StandardId::ZERO))
    }

    /// Raw 11-bit value.
    pub fn raw(&self) -> u16 {
        self.0.as_raw()
    }

    /// Identifier as expected by `embedded_can` drivers.
    pub fn standard(&self) -> StandardId {
        self.0
    }
}

impl From<StandardId> for CanId {
    fn from(id: StandardId) -> Self {
        Self(id)
    }
}

//==================================================================================BROADCAST_SLOT
/// Position of a frame inside one broadcast cycle. The identifier of a slot is
/// `base + offset`, masked to 11 bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum BroadcastSlot {
    /// Engine status: counters, bitfields, MAP, temperatures.
    Status = 0,
    /// Battery, O2, corrections, RPM.
    Sensors = 1,
    /// AFR target, VE, pulsewidth, advance.
    Tune = 2,
    /// Loop rate, free RAM, spark bitfield.
    Diagnostics = 3,
    /// RPM rate of change, ethanol content.
    Extra = 4,
}

impl BroadcastSlot {
    /// Slots in transmission order.
    pub const ALL: [BroadcastSlot; FRAME_COUNT] = [
        BroadcastSlot::Status,
        BroadcastSlot::Sensors,
        BroadcastSlot::Tune,
        BroadcastSlot::Diagnostics,
        BroadcastSlot::Extra,
    ];

    /// Offset from the identifier base.
    pub const fn offset(self) -> u32 {
        self as u32
    }

    /// Index in [`BroadcastSlot::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Identifier of this slot for the given base.
    pub fn id(self, base: u32) -> CanId {
        CanId::from_raw_masked(base.wrapping_add(self.offset()))
    }
}
