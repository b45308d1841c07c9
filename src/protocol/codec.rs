//! ASCII command codec.
//!
//! Wire format:
//! ```text
//!   <code>[,<arg>]*;        host → device
//!   <code>[,<field>]*\r     device → host
//! ```
//!
//! The decoder is fed one byte at a time and yields a [`CommandFrame`]
//! at every `;`. Whitespace (including CR/LF) is ignored so the link can
//! be driven from a terminal. Numeric fields are parsed like C `atoi`:
//! optional sign, leading digits, anything after is ignored, and the
//! result is truncated to 16 bits.

use core::fmt::Write;

use heapless::{String, Vec};

use crate::app::commands::CommandFrame;
use crate::app::events::{Field, Frame};
use crate::error::ProtocolError;

use super::{COMMAND_SEPARATOR, FIELD_SEPARATOR, RESPONSE_TERMINATOR};

/// Bytes per field; longer fields poison the command.
pub const MAX_FIELD_LEN: usize = 16;

/// Largest encoded response, terminator included.
pub const MAX_RESPONSE_LEN: usize = 128;

/// Streaming command decoder.
pub struct CommandDecoder {
    field: Vec<u8, MAX_FIELD_LEN>,
    frame: CommandFrame,
    fields_seen: usize,
    error: Option<ProtocolError>,
}

impl Default for CommandDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandDecoder {
    pub fn new() -> Self {
        Self {
            field: Vec::new(),
            frame: CommandFrame::default(),
            fields_seen: 0,
            error: None,
        }
    }

    /// Feed one byte.
    ///
    /// Returns `Some` at each command separator: the decoded frame, or the
    /// error that poisoned it. Empty commands yield `None`.
    pub fn push(&mut self, byte: u8) -> Option<Result<CommandFrame, ProtocolError>> {
        match byte {
            COMMAND_SEPARATOR => self.finish(),
            FIELD_SEPARATOR => {
                self.end_field();
                None
            }
            b if b.is_ascii_whitespace() => None,
            b => {
                if self.error.is_none() && self.field.push(b).is_err() {
                    self.error = Some(ProtocolError::FieldTooLong);
                }
                None
            }
        }
    }

    /// Feed a buffer, handing every decoded frame to `on_frame`. Poisoned
    /// commands are skipped.
    pub fn feed(&mut self, data: &[u8], mut on_frame: impl FnMut(CommandFrame)) {
        for &byte in data {
            match self.push(byte) {
                Some(Ok(frame)) => on_frame(frame),
                Some(Err(e)) => log::warn!("command dropped: {}", e),
                None => {}
            }
        }
    }

    /// Discard any partially received command.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn end_field(&mut self) {
        if self.error.is_none() {
            let value = parse_int(&self.field);
            if self.fields_seen == 0 {
                self.frame.code = value;
            } else if self.frame.args.push(value.unwrap_or(0)).is_err() {
                self.error = Some(ProtocolError::TooManyFields);
            }
        }
        self.fields_seen += 1;
        self.field.clear();
    }

    fn finish(&mut self) -> Option<Result<CommandFrame, ProtocolError>> {
        let empty = self.fields_seen == 0 && self.field.is_empty();
        if !empty {
            self.end_field();
        }
        let error = self.error.take();
        let frame = core::mem::take(&mut self.frame);
        self.fields_seen = 0;

        match error {
            Some(e) => Some(Err(e)),
            None if empty => None,
            None => Some(Ok(frame)),
        }
    }
}

/// `atoi`-style parse truncated to 16 bits. `None` when there are no digits.
fn parse_int(field: &[u8]) -> Option<i16> {
    let (negative, digits) = match field {
        [b'-', rest @ ..] => (true, rest),
        [b'+', rest @ ..] => (false, rest),
        _ => (false, field),
    };
    let len = digits.iter().take_while(|b| b.is_ascii_digit()).count();
    if len == 0 {
        return None;
    }
    let magnitude = digits[..len]
        .iter()
        .fold(0i32, |acc, &d| acc.wrapping_mul(10).wrapping_add(i32::from(d - b'0')));
    let value = if negative { magnitude.wrapping_neg() } else { magnitude };
    Some(value as i16)
}

/// Render `frame` as `code[,field]*\r`.
pub fn encode_frame(frame: &Frame) -> Result<String<MAX_RESPONSE_LEN>, ProtocolError> {
    let mut out = String::new();
    write!(out, "{}", frame.code).map_err(|_| ProtocolError::ResponseOverflow)?;
    for field in &frame.fields {
        let written = match field {
            Field::Int(v) => write!(out, ",{v}"),
            Field::Float(v) => write!(out, ",{v:.2}"),
            Field::Text(s) => write!(out, ",{s}"),
        };
        written.map_err(|_| ProtocolError::ResponseOverflow)?;
    }
    out.push(char::from(RESPONSE_TERMINATOR))
        .map_err(|_| ProtocolError::ResponseOverflow)?;
    Ok(out)
}
