//! Generate the telemetry field table from the record layout.
use super::domain::*;
use super::errors::*;
use super::name_helpers::*;
use crate::core::{FieldKind, SNAPSHOT_LEN};

use std::collections::HashSet;
use std::fmt::Write;

/// Validate the layout and emit one `FieldDescriptor` constant per field,
/// followed by the ordered field list and the record length.
pub(crate) fn run_fields_gen(layout: &RecordLayout) -> Result<String, BuildError> {
    if layout.fields.is_empty() {
        return Err(BuildError::EmptyLayout {
            record: layout.record.clone(),
        });
    }

    let mut buffer = String::new();
    let mut seen = HashSet::new();
    let mut const_names = Vec::with_capacity(layout.fields.len());
    let mut expected_offset = 0usize;

    writeln!(
        buffer,
        "// Generated by build.rs from the '{}' record layout: {}.",
        layout.record, layout.description
    )?;

    for field in &layout.fields {
        if !is_valid_identifier(&field.id) {
            return Err(BuildError::InvalidIdentifier {
                field: field.id.clone(),
            });
        }
        if !seen.insert(field.id.as_str()) {
            return Err(BuildError::DuplicateField {
                field: field.id.clone(),
            });
        }
        if field.offset != expected_offset {
            return Err(BuildError::NonContiguous {
                field: field.id.clone(),
                expected: expected_offset,
                found: field.offset,
            });
        }
        let kind = FieldKind::from_tag(&field.kind).ok_or_else(|| BuildError::UnknownFieldKind {
            field: field.id.clone(),
            kind: field.kind.clone(),
        })?;
        expected_offset = field.offset + kind.width();

        let const_name = to_const_case(&field.id);
        let snapshot_note = if expected_offset <= SNAPSHOT_LEN {
            ""
        } else {
            " Not covered by the bridge snapshot."
        };

        writeln!(
            buffer,
            "/// {} (offset {}, {}).{}",
            field.name, field.offset, field.kind, snapshot_note
        )?;
        writeln!(
            buffer,
            "pub const {const_name}: FieldDescriptor = FieldDescriptor {{ id: {:?}, name: {:?}, offset: {}, kind: FieldKind::{} }};",
            field.id,
            field.name,
            field.offset,
            kind.variant_name()
        )?;
        const_names.push(const_name);
    }

    writeln!(buffer, "/// Every field of the record, in wire order.")?;
    writeln!(
        buffer,
        "pub static A_RECORD_FIELDS: &[FieldDescriptor] = &[{}];",
        const_names.join(", ")
    )?;
    writeln!(buffer, "/// Length of the full documented record in bytes.")?;
    writeln!(buffer, "pub const A_RECORD_LEN: usize = {expected_offset};")?;

    Ok(buffer)
}
