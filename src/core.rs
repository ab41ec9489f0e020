//! Defines the "data contract" between `build.rs` (the scribe) and the
//! snapshot accessors (the readers).
//!
//! `build.rs` turns `build_core/var/a_record.json` into one static
//! [`FieldDescriptor`] per telemetry field. The codec reads snapshot bytes
//! through those descriptors instead of overlaying a packed struct.

// Types in this module are primarily used by generated code.
#![allow(dead_code)]

/// Byte sent to the ECU to request the realtime record. The ECU echoes it back
/// before the payload.
pub const REQUEST_BYTE: u8 = b'A';

/// Number of payload bytes requested and stored per snapshot.
///
/// The documented 'A' record is longer (see `A_RECORD_LEN` in the generated
/// layout); the bridge only ever consumes this prefix.
pub const SNAPSHOT_LEN: usize = 75;

/// Storage type of a field inside the record. Multi-byte kinds are little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    U8,
    I8,
    U16,
    I16,
}

impl FieldKind {
    /// Width of the field in bytes.
    pub const fn width(&self) -> usize {
        match self {
            FieldKind::U8 | FieldKind::I8 => 1,
            FieldKind::U16 | FieldKind::I16 => 2,
        }
    }

    /// Parse the tag used in the layout JSON (`"u8"`, `"i16"`, ...).
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "u8" => Some(FieldKind::U8),
            "i8" => Some(FieldKind::I8),
            "u16" => Some(FieldKind::U16),
            "i16" => Some(FieldKind::I16),
            _ => None,
        }
    }

    /// Variant name as it must appear in generated code.
    pub const fn variant_name(&self) -> &'static str {
        match self {
            FieldKind::U8 => "U8",
            FieldKind::I8 => "I8",
            FieldKind::U16 => "U16",
            FieldKind::I16 => "I16",
        }
    }
}

/// Position and type of one telemetry field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// 1. Field identifier as named by the ECU documentation (`"loopsPerSecond"`).
    pub id: &'static str,
    /// 2. Human-readable description.
    pub name: &'static str,
    /// 3. Byte offset of the first (least significant) byte.
    pub offset: usize,
    /// 4. Storage type.
    pub kind: FieldKind,
}

impl FieldDescriptor {
    /// Offset one past the last byte of the field.
    pub const fn end(&self) -> usize {
        self.offset + self.kind.width()
    }

    /// Whether the field is fully contained in a buffer of `len` bytes.
    pub const fn fits_within(&self, len: usize) -> bool {
        self.end() <= len
    }
}

/// Decoded field value, keeping the signedness of the storage type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue {
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
}
