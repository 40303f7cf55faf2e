//! Serial line seen by the AVT414 driver
//!
//! Blocking byte transport plus the line settings the board expects.

use core::time::Duration;

/// Fixed line speed of the AVT414 board
pub const BAUD_RATE: u32 = 57600;

/// Sending half of the board's serial line
pub trait UartTx {
    type Error;

    /// Put every byte of `data` on the line, or fail
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Wait until queued bytes have left the host
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Receiving half of the board's serial line
pub trait UartRx {
    type Error;

    /// Receive into `buf`
    ///
    /// Blocks until at least one byte is available (or the transport's own
    /// deadline expires), then returns how many bytes were placed in `buf`.
    /// Serial drivers routinely deliver fewer bytes than requested, so
    /// callers must be prepared for a short count.
    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Receive exactly one byte, retrying empty reads
    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        while self.read_blocking(&mut buf)? == 0 {}
        Ok(buf[0])
    }
}

/// Line settings for opening the board's port
///
/// The board itself only speaks 57600 8N1, which is the default; the other
/// values exist for adapters and bridges in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UartConfig {
    pub baudrate: u32,
    pub data_bits: DataBits,
    pub parity: Parity,
    pub stop_bits: StopBits,
    /// Upper bound on a single read; `None` blocks until data arrives
    pub read_timeout: Option<Duration>,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: BAUD_RATE,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
            read_timeout: None,
        }
    }
}

/// Character size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
}

/// Parity bit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Stop bit count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}
