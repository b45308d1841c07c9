//! Logical pin map for the bridge header.
//!
//! The host addresses pins by a logical index 0–13 and analog channels by
//! 0–5. This module is the single source of truth for how those indices map
//! onto ESP32-S3 GPIO numbers and ADC1 channels.

// ---------------------------------------------------------------------------
// Digital bank
// ---------------------------------------------------------------------------

/// Logical digital pins exposed to the host.
pub const PIN_COUNT: usize = 14;

/// Pins 0 and 1 carry the command link and are never touched by commands.
pub const FIRST_USER_PIN: u8 = 2;

/// Logical pin index → GPIO number. Indices 0/1 are the UART lines.
pub const DIGITAL_GPIO: [i32; PIN_COUNT] = [
    UART_RX_GPIO, // 0
    UART_TX_GPIO, // 1
    7,            // 2
    8,            // 3
    9,            // 4
    10,           // 5
    11,           // 6
    12,           // 7
    13,           // 8
    14,           // 9
    15,           // 10
    16,           // 11
    17,           // 12
    18,           // 13
];

/// `true` when `pin` is a logical index the host may drive or sample.
pub const fn is_user_pin(pin: i16) -> bool {
    pin >= FIRST_USER_PIN as i16 && pin < PIN_COUNT as i16
}

// ---------------------------------------------------------------------------
// Analog bank (ADC1)
// ---------------------------------------------------------------------------

/// Analog channels sampled by the bulk read.
pub const ANALOG_CHANNEL_COUNT: usize = 6;

/// Logical analog channel → ADC1 channel (GPIO1..GPIO6).
pub const ADC1_CHANNEL: [u32; ANALOG_CHANNEL_COUNT] = [0, 1, 2, 3, 4, 5];

// ---------------------------------------------------------------------------
// UART link
// ---------------------------------------------------------------------------

pub const UART_PORT: u8 = 1;
pub const UART_TX_GPIO: i32 = 43;
pub const UART_RX_GPIO: i32 = 44;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits). Matches the 0–255 duty the host sends.
pub const PWM_RESOLUTION_BITS: u32 = 8;
/// LEDC base frequency for host-driven PWM outputs.
pub const PWM_FREQ_HZ: u32 = 1_000;
