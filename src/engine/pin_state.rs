//! Per-pin debounce state and input-mask guarded writes.
//!
//! ## Masking rules
//!
//! | Operation        | Pin 0/1 | Mask bit set | Otherwise          |
//! |------------------|---------|--------------|--------------------|
//! | masked read      | reports 0 | sampled    | reports 0          |
//! | single write     | no-op   | no-op        | output + drive     |
//! | masked write     | skipped | bit cleared  | output + drive     |
//! | PWM write        | no-op   | no-op        | output + duty      |
//!
//! Every write echoes its arguments whether or not it touched hardware.
//!
//! ## Debounce
//!
//! A pin's committed level only follows its raw level once the raw level
//! has been stable for longer than `debounce_ms`. Elapsed time is
//! `now.wrapping_sub(last_change)`, so the window resolves correctly across
//! a clock rollover.

use embedded_hal::digital::PinState;
use log::debug;

use crate::app::commands::CommandCode;
use crate::app::events::Frame;
use crate::app::ports::{PinPort, ResponseSink};
use crate::pins::{self, FIRST_USER_PIN, PIN_COUNT};

/// Debounce bookkeeping for one pin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct PinRuntimeState {
    /// Level seen on the previous sample.
    last_raw: bool,
    /// Last level accepted by the debounce filter.
    committed: bool,
    /// Time of the last raw transition.
    last_change_ms: u32,
}

pub struct PinStateEngine {
    input_mask: u16,
    debounce_ms: u32,
    pins: [PinRuntimeState; PIN_COUNT],
}

impl PinStateEngine {
    pub fn new(debounce_ms: u32) -> Self {
        Self {
            input_mask: 0,
            debounce_ms,
            pins: [PinRuntimeState::default(); PIN_COUNT],
        }
    }

    // ── Mask ──────────────────────────────────────────────────

    pub fn input_mask(&self) -> u16 {
        self.input_mask
    }

    /// Replace the input mask in a single assignment.
    pub fn set_input_mask(&mut self, mask: u16) {
        self.input_mask = mask;
    }

    /// `true` when `pin` has its input-mask bit set.
    pub fn is_input(&self, pin: i16) -> bool {
        (0..16).contains(&pin) && self.input_mask & (1 << pin) != 0
    }

    /// A pin accepts writes when it is a user pin and not a masked input.
    pub fn is_writable(&self, pin: i16) -> bool {
        pins::is_user_pin(pin) && !self.is_input(pin)
    }

    // ── Reads ─────────────────────────────────────────────────

    /// Sample `pin` and run it through the debounce filter.
    ///
    /// Link pins (0/1) and out-of-range pins are never sampled and read
    /// as `false`.
    pub fn debounced_read(&mut self, pin: u8, hw: &mut impl PinPort, now_ms: u32) -> bool {
        if pin < FIRST_USER_PIN || usize::from(pin) >= PIN_COUNT {
            return false;
        }
        let raw = hw.read_level(pin) == PinState::High;
        let debounce_ms = self.debounce_ms;
        let state = &mut self.pins[usize::from(pin)];

        if raw != state.last_raw {
            state.last_change_ms = now_ms;
        }
        if now_ms.wrapping_sub(state.last_change_ms) > debounce_ms {
            state.committed = raw;
        }
        state.last_raw = raw;
        state.committed
    }

    /// Store `mask` as the input mask, pull up and sample every masked user
    /// pin, and report all 14 levels. Unmasked and link pins report 0.
    pub fn read_inputs(&mut self, mask: u16, hw: &mut impl PinPort, sink: &mut impl ResponseSink) {
        self.set_input_mask(mask);

        let mut frame = Frame::new(CommandCode::ReadInputs.code());
        for pin in 0..PIN_COUNT as u8 {
            let level = if pin >= FIRST_USER_PIN && mask & (1 << pin) != 0 {
                hw.set_input_pullup(pin);
                hw.read_level(pin) == PinState::High
            } else {
                false
            };
            frame.push(level);
        }
        sink.emit(&frame);
    }

    // ── Writes ────────────────────────────────────────────────

    /// Drive a single output. Returns `true` if hardware was touched.
    pub fn write_output(
        &mut self,
        pin: i16,
        state: i16,
        hw: &mut impl PinPort,
        sink: &mut impl ResponseSink,
    ) -> bool {
        let applied = self.is_writable(pin);
        if applied {
            let pin = pin as u8;
            hw.set_output(pin);
            hw.write_level(pin, PinState::from(state != 0));
        } else {
            debug!("write_output: pin {} rejected (mask=0x{:04x})", pin, self.input_mask);
        }
        sink.emit(&Frame::new(CommandCode::WriteOutput.code()).with(pin).with(state));
        applied
    }

    /// Drive every user pin selected by `type_mask` to the matching bit of
    /// `value_mask`, after clearing masked inputs from both.
    ///
    /// Returns the post-masking pair that was echoed. When nothing is left
    /// in `type_mask` the echoed value mask is 0.
    pub fn write_outputs(
        &mut self,
        type_mask: i16,
        value_mask: i16,
        hw: &mut impl PinPort,
        sink: &mut impl ResponseSink,
    ) -> (i16, i16) {
        let inputs = self.input_mask as i16;
        let type_mask = type_mask & !inputs;
        let mut value_mask = value_mask & !inputs;

        if type_mask != 0 {
            for pin in FIRST_USER_PIN..PIN_COUNT as u8 {
                if type_mask & (1 << pin) != 0 {
                    hw.set_output(pin);
                    hw.write_level(pin, PinState::from(value_mask & (1 << pin) != 0));
                }
            }
        } else {
            value_mask = 0;
        }

        sink.emit(
            &Frame::new(CommandCode::WriteOutputs.code())
                .with(type_mask)
                .with(value_mask),
        );
        (type_mask, value_mask)
    }

    /// Set the PWM duty of a single pin. Returns `true` if hardware was
    /// touched. The duty reaching hardware is clamped to 0–255; the echo
    /// carries it as received.
    pub fn write_analog(
        &mut self,
        pin: i16,
        duty: i16,
        hw: &mut impl PinPort,
        sink: &mut impl ResponseSink,
    ) -> bool {
        let applied = self.is_writable(pin);
        if applied {
            let pin = pin as u8;
            hw.set_output(pin);
            hw.write_pwm(pin, duty.clamp(0, 255) as u8);
        } else {
            debug!("write_analog: pin {} rejected (mask=0x{:04x})", pin, self.input_mask);
        }
        sink.emit(&Frame::new(CommandCode::WriteAnalog.code()).with(pin).with(duty));
        applied
    }
}
