//! Both ends of the bridge: the serial request/response protocol spoken with
//! the ECU, the snapshot it yields, and the CAN broadcast built from it.
pub mod encoder;
pub mod serial;
pub mod snapshot;
pub mod transport;
