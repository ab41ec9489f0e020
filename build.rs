//! Cargo build script: generates the telemetry field table.

// Re-export the core module from src/core.rs so build_core can reuse it
#[path = "src/core.rs"]
mod core;

mod build_core;
use crate::build_core::{
    conf::*, domain::RecordLayout, errors::BuildError, gen_fields::run_fields_gen,
};

use std::fs;
use std::path::PathBuf;

// The field offsets of the ECU realtime record live in a JSON document rather
// than in a packed struct. This script validates that document (contiguous,
// unique, known storage kinds) and turns it into `FieldDescriptor` constants
// that `src/infra/codec/layout.rs` pulls in with `include!`.

//==================================================================================MAIN
fn main() -> Result<(), BuildError> {
    // Tell Cargo to rerun this script whenever one of these inputs changes.
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/core.rs");
    println!("cargo:rerun-if-changed={RECORD_LAYOUT_PATH}");
    println!("cargo:rerun-if-env-changed={RECORD_LAYOUT_ENV}");

    // 1. Locate the layout.
    // Priority order:
    //   1. ECU_CAN_BRIDGE_LAYOUT_PATH environment variable (absolute or relative path)
    //   2. Default layout shipped with the crate
    let default_layout_path = PathBuf::from(RECORD_LAYOUT_PATH);
    let layout_path = match std::env::var(RECORD_LAYOUT_ENV).ok().map(PathBuf::from) {
        Some(path) if path.exists() => {
            println!("cargo:warning=Using custom record layout from {:?}", path);
            println!("cargo:rerun-if-changed={}", path.display());
            path
        }
        Some(path) => {
            println!(
                "cargo:warning=Custom layout path specified but file not found: {:?}",
                path
            );
            println!("cargo:warning=Falling back to the default record layout");
            default_layout_path
        }
        None => default_layout_path,
    };

    // 2. Load and parse it.
    let layout_string = fs::read_to_string(&layout_path).map_err(|e| BuildError::ReadFile {
        path: layout_path.clone(),
        source: e,
    })?;
    let layout: RecordLayout = serde_json::from_str(&layout_string)?;

    // 3. Validate and generate.
    let fields_code = run_fields_gen(&layout)?;

    // 4. Write the generated code into `OUT_DIR`.
    let out_dir_str = std::env::var("OUT_DIR").map_err(|e| BuildError::OutDirErr { source: e })?;
    let fields_file_path = PathBuf::from(out_dir_str).join(OUT_DIR_FIELDS_FILE_NAME);

    fs::write(&fields_file_path, &fields_code).map_err(|e| BuildError::WriteFile {
        path: fields_file_path,
        source: e,
    })?;

    Ok(())
}
