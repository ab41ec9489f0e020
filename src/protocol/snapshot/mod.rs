//! One telemetry sample as received from the ECU: the first
//! [`SNAPSHOT_LEN`] bytes of the realtime record.
//!
//! A snapshot is a plain value. It is built in one piece from a complete
//! serial payload and never patched afterwards, so a holder always sees a
//! coherent sample. Fields are decoded on demand through the generated
//! [`layout`] table.
use crate::core::{FieldDescriptor, FieldValue, SNAPSHOT_LEN};
use crate::infra::codec::{self, layout};

// Every field read by a named accessor must lie inside the snapshot.
const _: () = assert!(layout::TPS_ADC.fits_within(SNAPSHOT_LEN));
const _: () = assert!(layout::O2_SECONDARY.fits_within(SNAPSHOT_LEN));
const _: () = assert!(layout::RPM_DOT.fits_within(SNAPSHOT_LEN));

#[derive(Clone, Copy, PartialEq, Eq)]
/// Fixed-length telemetry record, little-endian multi-byte fields.
pub struct TelemetrySnapshot([u8; SNAPSHOT_LEN]);

impl TelemetrySnapshot {
    /// All-zero sample, the state of the bridge before the first acquisition.
    pub const ZERO: Self = Self([0; SNAPSHOT_LEN]);

    /// Wrap a complete payload.
    pub const fn from_bytes(bytes: [u8; SNAPSHOT_LEN]) -> Self {
        Self(bytes)
    }

    /// Copy a payload out of a slice; `None` unless it is exactly
    /// [`SNAPSHOT_LEN`] bytes long.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        bytes.try_into().ok().map(Self)
    }

    /// Raw payload.
    pub const fn as_bytes(&self) -> &[u8; SNAPSHOT_LEN] {
        &self.0
    }

    /// Decode any documented field. `None` for fields the snapshot does not
    /// cover (the record continues past [`SNAPSHOT_LEN`]).
    pub fn field(&self, field: &FieldDescriptor) -> Option<FieldValue> {
        codec::read_field(&self.0, field)
    }

    #[inline]
    fn u8_at(&self, field: FieldDescriptor) -> u8 {
        self.0[field.offset]
    }

    #[inline]
    fn u16_at(&self, field: FieldDescriptor) -> u16 {
        codec::le_u16(self.0[field.offset], self.0[field.offset + 1])
    }

    //==============================================================STATUS
    pub fn secl(&self) -> u8 {
        self.u8_at(layout::SECL)
    }

    pub fn status1(&self) -> u8 {
        self.u8_at(layout::STATUS1)
    }

    pub fn engine(&self) -> u8 {
        self.u8_at(layout::ENGINE)
    }

    pub fn dwell(&self) -> u8 {
        self.u8_at(layout::DWELL)
    }

    /// Manifold absolute pressure.
    pub fn map(&self) -> u16 {
        self.u16_at(layout::MAP)
    }

    pub fn iat(&self) -> u8 {
        self.u8_at(layout::IAT)
    }

    pub fn coolant(&self) -> u8 {
        self.u8_at(layout::COOLANT)
    }

    /// Raw throttle ADC reading.
    pub fn tps_adc(&self) -> u8 {
        self.u8_at(layout::TPS_ADC)
    }

    //==============================================================SENSORS
    pub fn bat_correction(&self) -> u8 {
        self.u8_at(layout::BAT_CORRECTION)
    }

    /// Battery voltage times ten.
    pub fn battery10(&self) -> u8 {
        self.u8_at(layout::BATTERY10)
    }

    pub fn o2(&self) -> u8 {
        self.u8_at(layout::O2)
    }

    pub fn ego_correction(&self) -> u8 {
        self.u8_at(layout::EGO_CORRECTION)
    }

    pub fn iat_correction(&self) -> u8 {
        self.u8_at(layout::IAT_CORRECTION)
    }

    pub fn wue_correction(&self) -> u8 {
        self.u8_at(layout::WUE_CORRECTION)
    }

    pub fn rpm(&self) -> u16 {
        self.u16_at(layout::RPM)
    }

    pub fn tae_amount(&self) -> u8 {
        self.u8_at(layout::TAE_AMOUNT)
    }

    //==============================================================TUNE
    pub fn corrections(&self) -> u8 {
        self.u8_at(layout::CORRECTIONS)
    }

    pub fn ve(&self) -> u8 {
        self.u8_at(layout::VE)
    }

    pub fn afr_target(&self) -> u8 {
        self.u8_at(layout::AFR_TARGET)
    }

    /// Injector pulsewidth 1, ms times ten.
    pub fn pw1(&self) -> u16 {
        self.u16_at(layout::PW1)
    }

    pub fn tps_dot(&self) -> u8 {
        self.u8_at(layout::TPS_DOT)
    }

    pub fn advance(&self) -> u8 {
        self.u8_at(layout::ADVANCE)
    }

    pub fn tps(&self) -> u8 {
        self.u8_at(layout::TPS)
    }

    //==============================================================DIAGNOSTICS
    pub fn loops_per_second(&self) -> u16 {
        self.u16_at(layout::LOOPS_PER_SECOND)
    }

    pub fn free_ram(&self) -> u16 {
        self.u16_at(layout::FREE_RAM)
    }

    pub fn spark(&self) -> u8 {
        self.u8_at(layout::SPARK)
    }

    pub fn o2_secondary(&self) -> u8 {
        self.u8_at(layout::O2_SECONDARY)
    }

    //==============================================================EXTRA
    /// RPM rate of change, signed.
    pub fn rpm_dot(&self) -> i16 {
        self.u16_at(layout::RPM_DOT) as i16
    }

    pub fn ethanol_pct(&self) -> u8 {
        self.u8_at(layout::ETHANOL_PCT)
    }
}

impl Default for TelemetrySnapshot {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<[u8; SNAPSHOT_LEN]> for TelemetrySnapshot {
    fn from(bytes: [u8; SNAPSHOT_LEN]) -> Self {
        Self(bytes)
    }
}

impl core::fmt::Debug for TelemetrySnapshot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TelemetrySnapshot")
            .field("secl", &self.secl())
            .field("rpm", &self.rpm())
            .field("map", &self.map())
            .field("coolant", &self.coolant())
            .field("tps", &self.tps())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TelemetrySnapshot {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "TelemetrySnapshot {{ secl: {}, rpm: {}, map: {} }}",
            self.secl(),
            self.rpm(),
            self.map()
        )
    }
}
