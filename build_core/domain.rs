//! Structures used to deserialize the record layout JSON.
use serde::Deserialize;

//==================================================================================LAYOUT
#[derive(Debug, Deserialize)]
/// Whole record: a name, a description and the ordered field list.
pub(crate) struct RecordLayout {
    pub(crate) record: String,
    pub(crate) description: String,
    pub(crate) fields: Vec<FieldDef>,
}

#[derive(Debug, Deserialize, Clone)]
/// One field as documented by the ECU serial interface.
pub(crate) struct FieldDef {
    /// camelCase identifier (`"loopsPerSecond"`).
    pub(crate) id: String,
    /// Human-readable description.
    pub(crate) name: String,
    /// Absolute byte offset inside the record.
    pub(crate) offset: usize,
    /// Storage tag: `u8`, `i8`, `u16` or `i16`.
    pub(crate) kind: String,
}
