//! Field table of the ECU realtime record.
//! `generated_fields.rs` is produced at build time from
//! `build_core/var/a_record.json`: one `FieldDescriptor` constant per field,
//! `A_RECORD_FIELDS` in wire order and `A_RECORD_LEN`.
use crate::core::{FieldDescriptor, FieldKind};

include!(concat!(env!("OUT_DIR"), "/generated_fields.rs"));
