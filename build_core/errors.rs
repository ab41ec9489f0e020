//! Error set that can occur while generating code during the build step.
use std::env::VarError;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by the build script (JSON parsing, layout validation, code generation).
pub(crate) enum BuildError {
    /// Failed to read the `OUT_DIR` environment variable.
    #[error("[MESSAGE]:OUT_DIR error. [ERROR]:{source}")]
    OutDirErr {
        #[source]
        source: VarError,
    },

    /// Failure while parsing the layout JSON document.
    #[error("[MESSAGE]:Invalid layout JSON [ERROR]:{0:?}")]
    ParseJson(#[from] serde_json::Error),

    /// Unable to read a file from disk.
    #[error("[MESSAGE]:Failed to read file [PATH]:{path} [ERROR]:{source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the generated code to disk.
    #[error("[MESSAGE]:Failed to write file [PATH]:{path} [ERROR]:{source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Formatting error while writing generated code.
    #[error("[MESSAGE]:Failed to display writeln! macro [ERROR]:{source}")]
    WritelnErr {
        #[from]
        source: std::fmt::Error,
    },

    /// Layout declares no field at all.
    #[error("[MESSAGE]:Record {record} has no field")]
    EmptyLayout { record: String },

    /// Storage tag is not one of `u8`, `i8`, `u16`, `i16`.
    #[error("[MESSAGE]:Unknown field kind [FIELD]:{field} [KIND]:{kind}")]
    UnknownFieldKind { field: String, kind: String },

    /// Identifier used twice in the same record.
    #[error("[MESSAGE]:Duplicate field identifier [FIELD]:{field}")]
    DuplicateField { field: String },

    /// Field does not start where the previous one ended (gap or overlap).
    #[error("[MESSAGE]:Field is not contiguous [FIELD]:{field} [EXPECTED]:{expected} [FOUND]:{found}")]
    NonContiguous {
        field: String,
        expected: usize,
        found: usize,
    },

    /// Identifier cannot be turned into a Rust constant name.
    #[error("[MESSAGE]:Invalid field identifier [FIELD]:{field}")]
    InvalidIdentifier { field: String },
}
