//! Abbreviation state machine
//!
//! The board keeps executing the last full command for every continuation
//! it receives. [`Mode`] is the host's copy of that context and
//! [`Encoder`] uses it to pick the shortest form that means the same thing
//! to the board.

use crate::adc::Channel;
use crate::command::{Command, EncodedCommand, Form};
use crate::port::Port;

/// Command context the board is currently in, as far as the host knows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Nothing to continue: after open, after SETUP, or after a resync
    #[default]
    Unknown,
    /// Writing to this port
    Write(Port),
    /// Reading ports in binary mode
    Read,
    /// Converting this ADC channel
    Adc(Channel),
}

impl Mode {
    /// Check if `cmd` can be sent as a continuation of this mode
    ///
    /// Writes and ADC conversions must hit the same port/channel. Any read
    /// continues a read, since the abbreviated read names its port.
    pub fn continues(self, cmd: &Command) -> bool {
        match (self, cmd) {
            (Mode::Write(last), Command::Write { port, .. }) => last == *port,
            (Mode::Read, Command::Read { .. }) => true,
            (Mode::Adc(last), Command::Adc { channel }) => last == *channel,
            _ => false,
        }
    }

    /// Mode the board is in once `cmd` has been sent
    pub fn after(cmd: &Command) -> Self {
        match *cmd {
            Command::Setup { .. } => Mode::Unknown,
            Command::Write { port, .. } => Mode::Write(port),
            Command::Read { .. } => Mode::Read,
            Command::Adc { channel } => Mode::Adc(channel),
        }
    }
}

/// Stateful command encoder
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    mode: Mode,
}

impl Encoder {
    /// Create an encoder with nothing to continue
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Forget the current mode so the next command goes out in full
    pub fn reset(&mut self) {
        self.mode = Mode::Unknown;
    }

    /// Form `cmd` would be encoded in right now
    pub fn form_for(&self, cmd: &Command) -> Form {
        if self.mode.continues(cmd) {
            Form::Abbreviated
        } else {
            Form::Full
        }
    }

    /// Encode `cmd` and advance the mode
    ///
    /// The mode advances as soon as the bytes are produced; if they never
    /// reach the board the caller must [`reset`](Self::reset).
    pub fn encode(&mut self, cmd: &Command) -> EncodedCommand {
        let encoded = cmd.encode(self.form_for(cmd));
        self.mode = Mode::after(cmd);
        encoded
    }
}
