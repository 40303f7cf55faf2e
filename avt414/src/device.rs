//! AVT414 device handle
//!
//! The handle keeps the board's command context in an [`Encoder`] and sends
//! the abbreviated form whenever it is safe to; the forms are listed in
//! [`avt414_protocol::command`].

use avt414_hal::{UartRx, UartTx};
use avt414_protocol::{compose_sample, hex, Command, Encoder, IntoChannel, IntoPort, IoMask, Mode};

use crate::error::{Error, StreamError};
use crate::writer::PortWriter;

/// Handle to one AVT414 board
///
/// Owns the transport exclusively until [`close`](Self::close) or
/// [`release`](Self::release).
#[derive(Debug)]
pub struct Avt414<U> {
    /// `None` once closed
    uart: Option<U>,
    encoder: Encoder,
}

impl<U, E> Avt414<U>
where
    U: UartTx<Error = E> + UartRx<Error = E>,
{
    /// Wrap a transport that is already open at 57600 baud
    ///
    /// The board's command context is unknown, so the first operation is
    /// always sent in full.
    pub fn new(uart: U) -> Self {
        Self {
            uart: Some(uart),
            encoder: Encoder::new(),
        }
    }

    /// Check if the handle still owns its transport
    pub fn is_open(&self) -> bool {
        self.uart.is_some()
    }

    /// Command context the next operation will be compared against
    pub fn mode(&self) -> Mode {
        self.encoder.mode()
    }

    /// Borrow the transport
    pub fn transport(&self) -> Option<&U> {
        self.uart.as_ref()
    }

    /// Mutably borrow the transport
    ///
    /// Bytes written behind the handle's back desynchronise it; call
    /// [`resync`](Self::resync) afterwards.
    pub fn transport_mut(&mut self) -> Option<&mut U> {
        self.uart.as_mut()
    }

    /// Forget the board's command context without sending anything
    ///
    /// The next operation goes out in full. Use after an error, when the
    /// board may not have seen the last command.
    pub fn resync(&mut self) {
        #[cfg(feature = "defmt")]
        defmt::trace!("AVT414 command context reset, was {:?}", self.encoder.mode());
        self.encoder.reset();
    }

    /// Configure pin directions of a port
    ///
    /// `iomask` bits: 1 = input, 0 = output. On port C, pin 6 is always
    /// an output and pin 7 always an input, since they carry the board's
    /// own controller link. Resets the command context.
    pub fn setup(&mut self, port: impl IntoPort, iomask: u8) -> Result<(), Error<E>> {
        let port = port.into_port()?;
        let mask = IoMask::new(iomask);
        self.send(&Command::Setup { port, mask })?;
        Ok(())
    }

    /// Write one byte to a port
    ///
    /// Consecutive writes to the same port use the two byte continuation.
    /// See [`stream_write`](Self::stream_write) for byte slices.
    pub fn write(&mut self, port: impl IntoPort, value: u8) -> Result<(), Error<E>> {
        let port = port.into_port()?;
        self.send(&Command::Write { port, value })?;
        Ok(())
    }

    /// Read one byte from a port
    ///
    /// Consecutive reads use the one byte continuation, whatever the ports.
    pub fn read(&mut self, port: impl IntoPort) -> Result<u8, Error<E>> {
        let port = port.into_port()?;
        let mut response = [0u8; 2];
        self.query(&Command::Read { port }, &mut response)?;
        Ok(response[0])
    }

    /// Convert one ADC line (0-7)
    ///
    /// Consecutive conversions of the same line use the one byte
    /// continuation. The two response bytes are composed big-endian and
    /// returned unmasked; only the low 10 bits are meaningful.
    pub fn adc(&mut self, channel: impl IntoChannel) -> Result<u16, Error<E>> {
        let channel = channel.into_channel()?;
        let mut response = [0u8; 2];
        self.query(&Command::Adc { channel }, &mut response)?;
        Ok(compose_sample(response))
    }

    /// Write a byte slice to a port
    ///
    /// The first byte goes through [`write`](Self::write); the rest are
    /// sent as bare continuations. Returns the number of bytes written, or
    /// the first transport error together with the count that made it out.
    pub fn stream_write(&mut self, port: impl IntoPort, data: &[u8]) -> Result<usize, StreamError<E>> {
        let port = port.into_port().map_err(Error::<E>::from)?;
        self.open_uart()?;
        let Some((&first, rest)) = data.split_first() else {
            return Ok(0);
        };

        self.write(port, first)?;
        let uart = self.open_uart()?;
        for (sent, &value) in rest.iter().enumerate() {
            uart.write_blocking(&hex::encode_byte(value))
                .map_err(|e| StreamError {
                    written: sent + 1,
                    error: Error::Transport(e),
                })?;
        }
        Ok(data.len())
    }

    /// Writer that streams everything written to it onto `port`
    pub fn writer(&mut self, port: impl IntoPort) -> Result<PortWriter<'_, U>, Error<E>> {
        let port = port.into_port()?;
        self.open_uart()?;
        Ok(PortWriter::new(self, port))
    }

    /// Flush the transport
    pub fn flush(&mut self) -> Result<(), Error<E>> {
        self.open_uart()?.flush().map_err(Error::Transport)
    }

    /// Close the handle, flushing and releasing the transport
    ///
    /// Every later operation fails with [`Error::Closed`].
    pub fn close(&mut self) -> Result<(), Error<E>> {
        let mut uart = self.uart.take().ok_or(Error::Closed)?;
        self.encoder.reset();
        #[cfg(feature = "defmt")]
        defmt::debug!("AVT414 closed");
        uart.flush().map_err(Error::Transport)
    }

    /// Give the transport back without closing it
    pub fn release(self) -> Option<U> {
        self.uart
    }

    fn open_uart(&mut self) -> Result<&mut U, Error<E>> {
        self.uart.as_mut().ok_or(Error::Closed)
    }

    /// Encode `cmd` in its shortest valid form and put it on the wire
    ///
    /// Returns the transport so the caller can collect the response.
    fn send(&mut self, cmd: &Command) -> Result<&mut U, Error<E>> {
        let uart = self.uart.as_mut().ok_or(Error::Closed)?;
        let encoded = self.encoder.encode(cmd);

        #[cfg(feature = "defmt")]
        if encoded.form() == avt414_protocol::Form::Full {
            defmt::trace!("AVT414 full command {:?}", cmd);
        }

        uart.write_blocking(&encoded).map_err(Error::Transport)?;
        Ok(uart)
    }

    /// Send `cmd` and collect its `response_len` reply bytes into `response`
    fn query(&mut self, cmd: &Command, response: &mut [u8; 2]) -> Result<(), Error<E>> {
        let len = cmd.response_len();
        let uart = self.send(cmd)?;
        read_response(uart, &mut response[..len]).map_err(Error::Transport)
    }
}

/// Fill `buf` from the transport
///
/// Serial drivers may hand a response over in pieces; whatever the first
/// read leaves missing is read byte by byte.
fn read_response<U: UartRx>(uart: &mut U, buf: &mut [u8]) -> Result<(), U::Error> {
    if buf.is_empty() {
        return Ok(());
    }
    let filled = uart.read_blocking(buf)?.min(buf.len());
    for slot in &mut buf[filled..] {
        *slot = uart.read_byte()?;
    }
    Ok(())
}
