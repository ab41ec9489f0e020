//! Paths and constants used during build-time code generation.
//==================================================================================CONF
/// Documented layout of the ECU realtime record.
pub(crate) const RECORD_LAYOUT_PATH: &str = "build_core/var/a_record.json";
/// Environment variable pointing at an alternative layout file.
pub(crate) const RECORD_LAYOUT_ENV: &str = "ECU_CAN_BRIDGE_LAYOUT_PATH";
/// Generated field table file name (written to `OUT_DIR`).
pub(crate) const OUT_DIR_FIELDS_FILE_NAME: &str = "generated_fields.rs";
