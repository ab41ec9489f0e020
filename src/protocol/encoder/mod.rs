//! Repacks a [`TelemetrySnapshot`] into the five fixed broadcast frames.
//!
//! The mapping is total: every payload byte is a copied field byte, a
//! shifted/divided field truncated to 8 bits, or the constant 0.
//!
//! | Slot          | Payload                                                                       |
//! |---------------|-------------------------------------------------------------------------------|
//! | `Status`      | secl, status1, engine, dwell, MAP >> 1, IAT, coolant, TPS ADC                  |
//! | `Sensors`     | battery10, O2, EGO corr, IAT corr, WUE corr, RPM lo, RPM hi, TAE               |
//! | `Tune`        | 0, corrections, VE, AFR target, PW1 / 100, TPS dot, advance, TPS               |
//! | `Diagnostics` | loops/s lo, loops/s hi, free RAM lo, free RAM hi, bat corr, spark, O2 #2, 0    |
//! | `Extra`       | 0, rpmDot lo, rpmDot hi, ethanol %, 0, 0, 0, 0                                 |
use crate::core::{FieldDescriptor, SNAPSHOT_LEN};
use crate::infra::codec::{self, layout};
use crate::protocol::snapshot::TelemetrySnapshot;
use crate::protocol::transport::{
    can_frame::{CanFrame, FRAME_DATA_LEN},
    can_id::BroadcastSlot,
    FRAME_COUNT,
};

/// Divisor applied to pulsewidth 1 before truncation.
pub const PW1_DIVISOR: u16 = 100;

type Payload = [u8; FRAME_DATA_LEN];

/// Stateless encoder bound to an identifier base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanFrameEncoder {
    id_base: u32,
}

impl CanFrameEncoder {
    /// Encoder emitting identifiers `id_base + 0..5` (masked to 11 bits).
    pub const fn new(id_base: u32) -> Self {
        Self { id_base }
    }

    /// Configured identifier base, before masking.
    pub const fn id_base(&self) -> u32 {
        self.id_base
    }

    /// Frames for one broadcast cycle, in slot order.
    pub fn encode(&self, snapshot: &TelemetrySnapshot) -> [CanFrame; FRAME_COUNT] {
        BroadcastSlot::ALL
            .map(|slot| CanFrame::from_parts(slot.id(self.id_base), payload(slot, snapshot)))
    }

    /// Rebuild what a receiver can know about the snapshot from one frame set.
    ///
    /// Bytes not carried by any frame stay zero, MAP comes back as `byte << 1`
    /// and PW1 as `byte * 100`. `None` when a frame identifier does not match
    /// its slot.
    pub fn decode(&self, frames: &[CanFrame; FRAME_COUNT]) -> Option<TelemetrySnapshot> {
        for slot in BroadcastSlot::ALL {
            if frames[slot.index()].id != slot.id(self.id_base) {
                return None;
            }
        }

        let status = &frames[BroadcastSlot::Status.index()].data;
        let sensors = &frames[BroadcastSlot::Sensors.index()].data;
        let tune = &frames[BroadcastSlot::Tune.index()].data;
        let diagnostics = &frames[BroadcastSlot::Diagnostics.index()].data;
        let extra = &frames[BroadcastSlot::Extra.index()].data;

        let mut bytes = [0u8; SNAPSHOT_LEN];
        let mut put = |field: FieldDescriptor, value: &[u8]| {
            bytes[field.offset..field.offset + value.len()].copy_from_slice(value);
        };

        put(layout::SECL, &status[0..1]);
        put(layout::STATUS1, &status[1..2]);
        put(layout::ENGINE, &status[2..3]);
        put(layout::DWELL, &status[3..4]);
        put(layout::MAP, &((status[4] as u16) << 1).to_le_bytes());
        put(layout::IAT, &status[5..6]);
        put(layout::COOLANT, &status[6..7]);
        put(layout::TPS_ADC, &status[7..8]);

        put(layout::BATTERY10, &sensors[0..1]);
        put(layout::O2, &sensors[1..2]);
        put(layout::EGO_CORRECTION, &sensors[2..3]);
        put(layout::IAT_CORRECTION, &sensors[3..4]);
        put(layout::WUE_CORRECTION, &sensors[4..5]);
        put(layout::RPM, &sensors[5..7]);
        put(layout::TAE_AMOUNT, &sensors[7..8]);

        put(layout::CORRECTIONS, &tune[1..2]);
        put(layout::VE, &tune[2..3]);
        put(layout::AFR_TARGET, &tune[3..4]);
        put(layout::PW1, &((tune[4] as u16) * PW1_DIVISOR).to_le_bytes());
        put(layout::TPS_DOT, &tune[5..6]);
        put(layout::ADVANCE, &tune[6..7]);
        put(layout::TPS, &tune[7..8]);

        put(layout::LOOPS_PER_SECOND, &diagnostics[0..2]);
        put(layout::FREE_RAM, &diagnostics[2..4]);
        put(layout::BAT_CORRECTION, &diagnostics[4..5]);
        put(layout::SPARK, &diagnostics[5..6]);
        put(layout::O2_SECONDARY, &diagnostics[6..7]);

        put(layout::RPM_DOT, &extra[1..3]);
        put(layout::ETHANOL_PCT, &extra[3..4]);

        Some(TelemetrySnapshot::from_bytes(bytes))
    }
}

/// Payload of one slot. Pure function of the snapshot.
pub fn payload(slot: BroadcastSlot, s: &TelemetrySnapshot) -> Payload {
    match slot {
        BroadcastSlot::Status => [
            s.secl(),
            s.status1(),
            s.engine(),
            s.dwell(),
            codec::halve_truncated(s.map()),
            s.iat(),
            s.coolant(),
            s.tps_adc(),
        ],
        BroadcastSlot::Sensors => [
            s.battery10(),
            s.o2(),
            s.ego_correction(),
            s.iat_correction(),
            s.wue_correction(),
            codec::low_byte(s.rpm()),
            codec::high_byte(s.rpm()),
            s.tae_amount(),
        ],
        BroadcastSlot::Tune => [
            0x00, // reserved (baro correction is not mapped)
            s.corrections(),
            s.ve(),
            s.afr_target(),
            codec::divide_truncated(s.pw1(), PW1_DIVISOR),
            s.tps_dot(),
            s.advance(),
            s.tps(),
        ],
        BroadcastSlot::Diagnostics => [
            codec::low_byte(s.loops_per_second()),
            codec::high_byte(s.loops_per_second()),
            codec::low_byte(s.free_ram()),
            codec::high_byte(s.free_ram()),
            s.bat_correction(),
            s.spark(),
            s.o2_secondary(),
            0x00,
        ],
        BroadcastSlot::Extra => {
            let rpm_dot = s.rpm_dot() as u16;
            [
                0x00,
                codec::low_byte(rpm_dot),
                codec::high_byte(rpm_dot),
                s.ethanol_pct(),
                0x00,
                0x00,
                0x00,
                0x00,
            ]
        }
    }
}
