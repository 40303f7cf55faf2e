//! Byte stream writer for one port
//!
//! [`PortWriter`] adapts [`Avt414::stream_write`] to [`embedded_io::Write`],
//! so byte-oriented code (protocol encoders, `write_all`, formatting) can
//! drive a port directly.

use core::fmt::Debug;

use avt414_hal::{UartRx, UartTx};
use avt414_protocol::Port;

use crate::device::Avt414;
use crate::error::{Error, StreamError};

/// Writer that puts every byte written to it on one port
///
/// Obtained from [`Avt414::writer`]. Each `write` call starts with a
/// regular write (full or continued) and streams the rest.
pub struct PortWriter<'a, U> {
    device: &'a mut Avt414<U>,
    port: Port,
}

impl<'a, U, E> PortWriter<'a, U>
where
    U: UartTx<Error = E> + UartRx<Error = E>,
{
    pub(crate) fn new(device: &'a mut Avt414<U>, port: Port) -> Self {
        Self { device, port }
    }

    /// Port this writer targets
    pub fn port(&self) -> Port {
        self.port
    }
}

impl<U, E> embedded_io::ErrorType for PortWriter<'_, U>
where
    U: UartTx<Error = E> + UartRx<Error = E>,
    E: Debug,
{
    type Error = Error<E>;
}

impl<U, E> embedded_io::Write for PortWriter<'_, U>
where
    U: UartTx<Error = E> + UartRx<Error = E>,
    E: Debug,
{
    /// Stream `buf` onto the port
    ///
    /// A failure after some bytes went out is reported as a short write;
    /// the error resurfaces on the next call.
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        match self.device.stream_write(self.port, buf) {
            Ok(written) => Ok(written),
            Err(StreamError { written: 0, error }) => Err(error),
            Err(StreamError { written, .. }) => Ok(written),
        }
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.device.flush()
    }
}
