//! Workspace for the build script: layout model, validation and code generator.
pub mod conf;
pub mod domain;
pub mod errors;
pub mod gen_fields;
pub mod name_helpers;
