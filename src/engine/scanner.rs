//! Input change scanner.
//!
//! Once per update tick, debounce every masked user pin, fold the committed
//! levels into a 16-bit snapshot and report it as `20,<snapshot>` when it
//! differs from the last one reported.

use log::debug;

use crate::app::events::{EventCode, Frame};
use crate::app::ports::{PinPort, ResponseSink};
use crate::pins::{FIRST_USER_PIN, PIN_COUNT};

use super::pin_state::PinStateEngine;

#[derive(Debug, Default)]
pub struct ChangeScanner {
    last_reported: u16,
}

impl ChangeScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot most recently reported to the host.
    pub fn last_reported(&self) -> u16 {
        self.last_reported
    }

    /// Run one scan pass. Returns the new snapshot if an event was emitted.
    pub fn scan(
        &mut self,
        engine: &mut PinStateEngine,
        hw: &mut impl PinPort,
        now_ms: u32,
        sink: &mut impl ResponseSink,
    ) -> Option<u16> {
        let mask = engine.input_mask();
        if mask == 0 {
            return None;
        }

        let mut snapshot: u16 = 0;
        for pin in FIRST_USER_PIN..PIN_COUNT as u8 {
            if mask & (1 << pin) != 0 && engine.debounced_read(pin, hw, now_ms) {
                snapshot |= 1 << pin;
            }
        }

        if snapshot == self.last_reported {
            return None;
        }
        debug!("inputs 0x{:04x} -> 0x{:04x}", self.last_reported, snapshot);
        self.last_reported = snapshot;
        sink.emit(&Frame::event(EventCode::InputsChanged).with(snapshot));
        Some(snapshot)
    }
}
