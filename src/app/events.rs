//! Outbound frames.
//!
//! Every response and every unsolicited event leaves the core as a
//! [`Frame`] handed to a [`ResponseSink`](super::ports::ResponseSink).
//! The sink decides how it is rendered: ASCII on the serial link, a log
//! line, or a recording buffer in tests.

use heapless::Vec;

/// Largest field count of any frame (the masked read reports 14 pins).
pub const MAX_FRAME_FIELDS: usize = 16;

/// Codes for device → host frames that are not command echoes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i16)]
pub enum EventCode {
    /// Aggregate debounced input mask changed.
    InputsChanged = 20,
    /// Application logic published a custom value.
    CustomValueChanged = 21,
    /// The bridge restarted.
    Started = 23,
    /// The last command code had no handler.
    UnknownCommand = 99,
}

impl EventCode {
    pub const fn code(self) -> i16 {
        self as i16
    }
}

/// One field of an outbound frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field {
    Int(i32),
    /// Rendered with two decimals.
    Float(f32),
    Text(&'static str),
}

impl From<i16> for Field {
    fn from(v: i16) -> Self {
        Self::Int(i32::from(v))
    }
}

impl From<u16> for Field {
    fn from(v: u16) -> Self {
        Self::Int(i32::from(v))
    }
}

impl From<bool> for Field {
    fn from(v: bool) -> Self {
        Self::Int(i32::from(v))
    }
}

/// A response or event: a numeric code followed by zero or more fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub code: i16,
    pub fields: Vec<Field, MAX_FRAME_FIELDS>,
}

impl Frame {
    pub fn new(code: i16) -> Self {
        Self {
            code,
            fields: Vec::new(),
        }
    }

    pub fn event(code: EventCode) -> Self {
        Self::new(code.code())
    }

    /// Append a field. Fields past [`MAX_FRAME_FIELDS`] are dropped.
    #[must_use]
    pub fn with(mut self, field: impl Into<Field>) -> Self {
        self.push(field);
        self
    }

    pub fn push(&mut self, field: impl Into<Field>) {
        if self.fields.push(field.into()).is_err() {
            log::warn!("frame {}: field dropped, capacity {}", self.code, MAX_FRAME_FIELDS);
        }
    }
}
