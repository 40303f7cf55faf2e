//! Command encoding
//!
//! After a full command the board keeps executing it for every bare
//! payload it receives:
//!
//! | Operation | Full form                 | Continuation          | Reply   |
//! |-----------|---------------------------|-----------------------|---------|
//! | SETUP     | `ESC 'S' port hi lo`      | none                  | none    |
//! | WRITE     | `ESC 'W' port hi lo`      | `hi lo` (same port)   | none    |
//! | READ      | `ESC 'R' port 'B'`        | `port` (any read)     | 1 byte  |
//! | ADC       | `ESC 'A' 'B' digit`       | `digit` (same line)   | 2 bytes |

use core::ops::Deref;

use crate::adc::Channel;
use crate::hex;
use crate::port::{IoMask, Port};

/// ASCII escape; marks the start of every full command
pub const ESC: u8 = 0x1B;

// Command type bytes
pub const CMD_SETUP: u8 = b'S';
pub const CMD_WRITE: u8 = b'W';
pub const CMD_READ: u8 = b'R';
pub const CMD_ADC: u8 = b'A';

/// Response mode selector: reply in binary rather than hex text
pub const MODE_BINARY: u8 = b'B';

/// Longest command on the wire (SETUP and full WRITE)
pub const MAX_COMMAND_LEN: usize = 5;

/// A single board operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Configure pin directions of a port
    Setup { port: Port, mask: IoMask },
    /// Drive a byte onto a port
    Write { port: Port, value: u8 },
    /// Sample a port
    Read { port: Port },
    /// Convert one ADC channel
    Adc { channel: Channel },
}

/// Which form of a command goes on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Form {
    /// Escape, command type and target
    Full,
    /// Continuation of the previous full command
    Abbreviated,
}

impl Command {
    /// Number of response bytes the board sends back
    pub fn response_len(&self) -> usize {
        match self {
            Command::Setup { .. } | Command::Write { .. } => 0,
            Command::Read { .. } => 1,
            Command::Adc { .. } => 2,
        }
    }

    /// Encode this command in the requested form
    ///
    /// SETUP is always encoded in full. The port C reserved-pin policy is
    /// applied to SETUP masks here, so no caller can bypass it.
    pub fn encode(&self, form: Form) -> EncodedCommand {
        match (*self, form) {
            (Command::Setup { port, mask }, _) => {
                let [hi, lo] = hex::encode_byte(mask.for_port(port).bits());
                EncodedCommand::from_parts(&[ESC, CMD_SETUP, port.as_byte(), hi, lo])
            }
            (Command::Write { port, value }, Form::Full) => {
                let [hi, lo] = hex::encode_byte(value);
                EncodedCommand::from_parts(&[ESC, CMD_WRITE, port.as_byte(), hi, lo])
            }
            (Command::Write { value, .. }, Form::Abbreviated) => {
                EncodedCommand::from_parts(&hex::encode_byte(value))
            }
            (Command::Read { port }, Form::Full) => {
                EncodedCommand::from_parts(&[ESC, CMD_READ, port.as_byte(), MODE_BINARY])
            }
            (Command::Read { port }, Form::Abbreviated) => {
                EncodedCommand::from_parts(&[port.as_byte()])
            }
            (Command::Adc { channel }, Form::Full) => {
                EncodedCommand::from_parts(&[ESC, CMD_ADC, MODE_BINARY, channel.hex_digit()])
            }
            (Command::Adc { channel }, Form::Abbreviated) => {
                EncodedCommand::from_parts(&[channel.hex_digit()])
            }
        }
    }
}

/// Encoded command bytes, held on the stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedCommand {
    bytes: [u8; MAX_COMMAND_LEN],
    len: usize,
}

impl EncodedCommand {
    // Callers above never pass more than MAX_COMMAND_LEN bytes
    fn from_parts(parts: &[u8]) -> Self {
        let mut bytes = [0u8; MAX_COMMAND_LEN];
        bytes[..parts.len()].copy_from_slice(parts);
        Self {
            bytes,
            len: parts.len(),
        }
    }

    /// The bytes to put on the wire
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Form of this command
    ///
    /// No abbreviated payload can start with ESC (they are hex digits or
    /// port letters), so the first byte decides.
    pub fn form(&self) -> Form {
        if self.as_bytes().first() == Some(&ESC) {
            Form::Full
        } else {
            Form::Abbreviated
        }
    }
}

impl Deref for EncodedCommand {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for EncodedCommand {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
