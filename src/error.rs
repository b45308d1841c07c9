//! Unified error types for the PinBridge firmware.
//!
//! The command path itself never fails (every handler answers, even on a
//! no-op), so errors only appear at the edges: byte framing, transport
//! I/O, peripheral bring-up and configuration. All variants are `Copy`
//! so they can be logged and dropped without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The inbound byte stream could not be framed into a command.
    Protocol(ProtocolError),
    /// A peripheral or transport operation failed.
    Hardware(HardwareError),
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid or could not be parsed.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Protocol(e) => write!(f, "protocol: {e}"),
            Self::Hardware(e) => write!(f, "hardware: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Protocol (framing) errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    /// A single field exceeded the per-field byte limit.
    FieldTooLong,
    /// A command carried more fields than the decoder can hold.
    TooManyFields,
    /// An encoded response did not fit the output buffer.
    ResponseOverflow,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldTooLong => write!(f, "field too long"),
            Self::TooManyFields => write!(f, "too many fields"),
            Self::ResponseOverflow => write!(f, "response overflow"),
        }
    }
}

impl From<ProtocolError> for Error {
    fn from(e: ProtocolError) -> Self {
        Self::Protocol(e)
    }
}

// ---------------------------------------------------------------------------
// Hardware errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareError {
    /// UART driver read failed.
    UartRead,
    /// UART driver write or TX drain failed.
    UartWrite,
    /// UART driver install or pin routing was rejected.
    UartConfig,
}

impl fmt::Display for HardwareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UartRead => write!(f, "UART read failed"),
            Self::UartWrite => write!(f, "UART write failed"),
            Self::UartConfig => write!(f, "UART config failed"),
        }
    }
}

impl From<HardwareError> for Error {
    fn from(e: HardwareError) -> Self {
        Self::Hardware(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
