//! Pin-state engine: debouncing, masked writes, scratch registers and the
//! input change scanner.
//!
//! All state lives in fixed-size arrays owned by a single
//! [`BridgeService`](crate::app::service::BridgeService); nothing here
//! allocates or touches hardware except through
//! [`PinPort`](crate::app::ports::PinPort).

pub mod control_values;
pub mod pin_state;
pub mod scanner;

#[cfg(test)]
pub(crate) mod testing;

pub use control_values::{CONTROL_VALUE_SLOTS, ControlValueStore};
pub use pin_state::PinStateEngine;
pub use scanner::ChangeScanner;
