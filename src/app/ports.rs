//! Port traits — the boundary between the bridge core and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ BridgeService (domain)
//! ```
//!
//! The core never touches a register or the UART directly. Hardware access
//! goes through [`PinPort`], time through [`ClockPort`], and every emitted
//! frame through [`ResponseSink`], so tests can drive the whole command
//! path against simulated pins and a recording sink.

use embedded_hal::digital::PinState;

use super::events::Frame;

// ───────────────────────────────────────────────────────────────
// Pin port (driven adapter: domain ↔ GPIO / ADC / PWM)
// ───────────────────────────────────────────────────────────────

/// Raw pin primitives, addressed by logical pin index (0–13) and logical
/// analog channel (0–5). Range checks are the caller's job.
pub trait PinPort {
    /// Configure `pin` as an input with the internal pull-up enabled.
    fn set_input_pullup(&mut self, pin: u8);

    /// Configure `pin` as a push-pull output.
    fn set_output(&mut self, pin: u8);

    /// Instantaneous electrical level of `pin`.
    fn read_level(&mut self, pin: u8) -> PinState;

    /// Drive `pin` high or low.
    fn write_level(&mut self, pin: u8, state: PinState);

    /// Sample analog `channel`.
    fn read_analog(&mut self, channel: u8) -> u16;

    /// Set the PWM duty (0–255) of `pin`.
    ///
    /// The engine saturates the 16-bit command argument into this range
    /// (300 → 255, -4 → 0). This differs from Arduino `analogWrite`, which
    /// keeps only the low byte (300 → 44, -4 → 252).
    fn write_pwm(&mut self, pin: u8, duty: u8);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock. Wraps at `u32::MAX`; consumers must use
/// wrapping subtraction.
pub trait ClockPort {
    fn now_ms(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Response sink (driven adapter: domain → link / log)
// ───────────────────────────────────────────────────────────────

/// Receives every response and event frame, in emission order.
pub trait ResponseSink {
    fn emit(&mut self, frame: &Frame);
}

impl<S: ResponseSink + ?Sized> ResponseSink for &mut S {
    fn emit(&mut self, frame: &Frame) {
        (**self).emit(frame);
    }
}
