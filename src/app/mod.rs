//! Application core — command routing and tick orchestration, zero I/O.
//!
//! The [`service::BridgeService`] owns the pin engine, control-value
//! store and change scanner. All interaction with hardware, time and the
//! serial link happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod router;
pub mod service;
