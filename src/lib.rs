//! `ecu-can-bridge` library: repeats the realtime telemetry of a Speeduino
//! ECU, pulled over a serial link, as a fixed set of CAN frames. The crate is
//! `no_std`; the firmware supplies the serial link, CAN controller and timer
//! through the traits in [`protocol::transport::traits`].
#![cfg_attr(not(test), no_std)]
//==================================================================================
/// Core data types shared by the build script and the codec.
pub mod core;
/// Acquisition and broadcast workers around the shared snapshot store.
pub mod bridge;
/// Startup configuration (rates, timeouts, CAN identifiers, task settings).
pub mod config;
/// Framer, transmitter and configuration errors.
pub mod error;
/// Byte-level codec, generated field layout and retry policy.
pub mod infra;
/// Serial framing, snapshot model, CAN encoding and transport.
pub mod protocol;
//==================================================================================
