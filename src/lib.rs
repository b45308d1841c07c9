//! pinbridge firmware library.
//!
//! Exposes the pure-logic modules for integration testing and host-side
//! simulation. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod engine;
pub mod error;
pub mod pins;
pub mod protocol;

// Hardware-facing modules; on the host they fall back to in-memory stubs.
pub mod adapters;
pub mod drivers;

pub use error::{Error, Result};
