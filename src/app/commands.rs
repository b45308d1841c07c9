//! Inbound commands.
//!
//! The framing layer turns the byte stream into [`CommandFrame`]s: a code
//! field plus up to [`MAX_ARGS`] signed 16-bit arguments. Handlers pull
//! their fixed argument list through an [`ArgCursor`].

use heapless::Vec;

/// Arguments carried by one command (the code field is separate).
pub const MAX_ARGS: usize = 15;

/// Host → device command codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i16)]
pub enum CommandCode {
    /// `1;` → `1,<version>`
    Version = 1,
    /// `2;` → `2,<a0>..<a5>`
    ReadAnalog = 2,
    /// `3,mask;` → `3,<v0>..<v13>`
    ReadInputs = 3,
    /// `4,pin,duty;` → `4,<pin>,<duty>`
    WriteAnalog = 4,
    /// `5,pin,state;` → `5,<pin>,<state>`
    WriteOutput = 5,
    /// `6,typeMask,writeMask;` → `6,<typeMask>,<writeMask>`
    WriteOutputs = 6,
    /// `7,chan,value;` → `7,<chan>,<value>`
    SetControlValue = 7,
}

impl CommandCode {
    pub const ALL: [Self; 7] = [
        Self::Version,
        Self::ReadAnalog,
        Self::ReadInputs,
        Self::WriteAnalog,
        Self::WriteOutput,
        Self::WriteOutputs,
        Self::SetControlValue,
    ];

    pub const fn code(self) -> i16 {
        self as i16
    }

    /// Number of arguments the handler reads.
    pub const fn arity(self) -> usize {
        match self {
            Self::Version | Self::ReadAnalog => 0,
            Self::ReadInputs => 1,
            Self::WriteAnalog | Self::WriteOutput | Self::WriteOutputs | Self::SetControlValue => 2,
        }
    }
}

/// One complete command as delivered by the framing layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandFrame {
    /// `None` when the code field was not an integer.
    pub code: Option<i16>,
    pub args: Vec<i16, MAX_ARGS>,
}

impl CommandFrame {
    pub fn new(code: i16) -> Self {
        Self {
            code: Some(code),
            args: Vec::new(),
        }
    }

    /// Build a frame from a code and argument list (extra arguments dropped).
    pub fn with_args(code: i16, args: &[i16]) -> Self {
        let mut frame = Self::new(code);
        for &a in args.iter().take(MAX_ARGS) {
            // Capacity checked by `take`.
            let _ = frame.args.push(a);
        }
        frame
    }

    pub fn cursor(&self) -> ArgCursor<'_> {
        ArgCursor {
            args: &self.args,
            next: 0,
        }
    }
}

/// Sequential argument reader. A missing argument reads as 0.
pub struct ArgCursor<'a> {
    args: &'a [i16],
    next: usize,
}

impl ArgCursor<'_> {
    pub fn read_i16(&mut self) -> i16 {
        let value = self.args.get(self.next).copied().unwrap_or(0);
        self.next += 1;
        value
    }

    /// Same field, reinterpreted as unsigned (two's complement).
    pub fn read_u16(&mut self) -> u16 {
        self.read_i16() as u16
    }

    /// Arguments left unread.
    pub fn remaining(&self) -> usize {
        self.args.len().saturating_sub(self.next)
    }
}
