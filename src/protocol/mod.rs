//! Serial command protocol.
//!
//! ```text
//!   Transport ──▶ CommandDecoder ──▶ BridgeService::update
//!       ▲                                   │
//!       └──────────── encode_frame ◀────────┘
//! ```

pub mod codec;
pub mod link;
pub mod transport;

/// Separates the code and arguments of a command.
pub const FIELD_SEPARATOR: u8 = b',';
/// Terminates a host → device command.
pub const COMMAND_SEPARATOR: u8 = b';';
/// Terminates a device → host frame.
pub const RESPONSE_TERMINATOR: u8 = b'\r';
