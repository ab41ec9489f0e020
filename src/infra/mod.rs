//! Building blocks without protocol knowledge: byte-layout codec and retry policy.
pub mod codec;
pub mod retry;
