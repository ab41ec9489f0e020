//! Capability traits the bridge needs from the firmware: serial link, CAN
//! controller and timer.
pub mod bridge_timer;
pub mod can_bus;
pub mod serial_link;
