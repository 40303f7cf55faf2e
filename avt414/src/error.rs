//! Driver errors

use core::fmt;

use avt414_protocol::{InvalidChannel, InvalidPort};

/// Errors from board operations
///
/// `E` is the transport's error type. Nothing is retried: a transport
/// error means the board's command context is unknown, and the caller
/// should resynchronise (SETUP, or [`Avt414::resync`](crate::Avt414::resync)).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Port identifier outside {B, C, D}; nothing was sent
    InvalidPort(char),
    /// ADC channel outside 0-7; nothing was sent
    InvalidChannel(u8),
    /// The transport failed
    Transport(E),
    /// The handle has been closed
    Closed,
}

impl<E> From<InvalidPort> for Error<E> {
    fn from(e: InvalidPort) -> Self {
        Error::InvalidPort(e.0)
    }
}

impl<E> From<InvalidChannel> for Error<E> {
    fn from(e: InvalidChannel) -> Self {
        Error::InvalidChannel(e.0)
    }
}

impl<E: fmt::Display> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidPort(port) => write!(f, "unknown AVT414 port: {port:?}"),
            Error::InvalidChannel(line) => write!(f, "bad AVT414 ADC line number: {line}"),
            Error::Transport(e) => write!(f, "transport error: {e}"),
            Error::Closed => f.write_str("AVT414 handle is closed"),
        }
    }
}

#[cfg(any(test, feature = "std"))]
impl<E> std::error::Error for Error<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl<E: fmt::Debug> embedded_io::Error for Error<E> {
    fn kind(&self) -> embedded_io::ErrorKind {
        match self {
            Error::InvalidPort(_) | Error::InvalidChannel(_) => embedded_io::ErrorKind::InvalidInput,
            Error::Transport(_) => embedded_io::ErrorKind::Other,
            Error::Closed => embedded_io::ErrorKind::NotConnected,
        }
    }
}

/// A bulk write that stopped part way
///
/// `written` bytes reached the transport before `error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StreamError<E> {
    pub written: usize,
    pub error: Error<E>,
}

impl<E> From<Error<E>> for StreamError<E> {
    fn from(error: Error<E>) -> Self {
        Self { written: 0, error }
    }
}

impl<E: fmt::Display> fmt::Display for StreamError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} after {} bytes", self.error, self.written)
    }
}

#[cfg(any(test, feature = "std"))]
impl<E> std::error::Error for StreamError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
