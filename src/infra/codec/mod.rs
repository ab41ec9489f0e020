//! Pure helpers that read little-endian integers out of a byte record and
//! narrow them into single CAN payload bytes.
//!
//! Every reader is bounds-checked and returns `None` instead of panicking; the
//! narrowing helpers truncate on purpose (overflow past 8 bits is part of the
//! broadcast format, not an error).
use crate::core::{FieldDescriptor, FieldKind, FieldValue};

pub mod layout;

//==================================================================================READERS
/// Assemble a `u16` from its little-endian halves.
#[inline]
pub const fn le_u16(low: u8, high: u8) -> u16 {
    (low as u16) | ((high as u16) << 8)
}

/// Read one byte at `offset`.
#[inline]
pub fn read_u8(buffer: &[u8], offset: usize) -> Option<u8> {
    buffer.get(offset).copied()
}

/// Read a little-endian `u16` starting at `offset`.
#[inline]
pub fn read_u16_le(buffer: &[u8], offset: usize) -> Option<u16> {
    let end = offset.checked_add(2)?;
    match buffer.get(offset..end)? {
        [low, high] => Some(le_u16(*low, *high)),
        _ => None,
    }
}

/// Read a little-endian two's complement `i16` starting at `offset`.
#[inline]
pub fn read_i16_le(buffer: &[u8], offset: usize) -> Option<i16> {
    read_u16_le(buffer, offset).map(|raw| raw as i16)
}

/// Decode the field described by `field`, or `None` when the buffer is too short.
pub fn read_field(buffer: &[u8], field: &FieldDescriptor) -> Option<FieldValue> {
    match field.kind {
        FieldKind::U8 => read_u8(buffer, field.offset).map(FieldValue::U8),
        FieldKind::I8 => read_u8(buffer, field.offset).map(|raw| FieldValue::I8(raw as i8)),
        FieldKind::U16 => read_u16_le(buffer, field.offset).map(FieldValue::U16),
        FieldKind::I16 => read_i16_le(buffer, field.offset).map(FieldValue::I16),
    }
}

//==================================================================================NARROWING
/// Least significant byte.
#[inline]
pub const fn low_byte(value: u16) -> u8 {
    (value & 0x00FF) as u8
}

/// Most significant byte.
#[inline]
pub const fn high_byte(value: u16) -> u8 {
    (value >> 8) as u8
}

/// Halve with a right shift and keep the low 8 bits (`2000 -> 1000 -> 232`).
#[inline]
pub const fn halve_truncated(value: u16) -> u8 {
    (value >> 1) as u8
}

/// Integer division followed by truncation to 8 bits. `divisor` must not be zero.
#[inline]
pub const fn divide_truncated(value: u16, divisor: u16) -> u8 {
    (value / divisor) as u8
}
