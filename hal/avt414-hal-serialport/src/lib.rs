//! Host serial transport for the AVT414 driver
//!
//! [`SerialUart`] implements the `avt414-hal` UART traits for USB virtual
//! COM ports and RS-232 adapters through the `serialport` crate. The board
//! always talks 57600 8N1, which is what [`SerialUart::open`] configures.

use std::io::{self, Read, Write};
use std::time::Duration;

use avt414_hal::{DataBits, Parity, StopBits, UartConfig, UartRx, UartTx};
use log::{debug, trace};
use serialport::SerialPort;

/// Poll interval of reads that have no deadline
const IDLE_POLL: Duration = Duration::from_millis(500);

/// Host serial errors
#[derive(Debug, thiserror::Error)]
pub enum SerialError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: serialport::Error,
    },

    #[error("serial I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Serial port transport
pub struct SerialUart {
    port: Box<dyn SerialPort>,
    /// `None` blocks reads until data arrives
    read_timeout: Option<Duration>,
}

impl SerialUart {
    /// Open `path` at the board's fixed 57600 8N1
    ///
    /// * `path` - Serial port path (e.g. "/dev/ttyUSB0" on Linux, "COM3" on Windows)
    pub fn open(path: &str) -> Result<Self, SerialError> {
        Self::open_with_config(path, UartConfig::default())
    }

    /// Open `path` with explicit line settings
    pub fn open_with_config(path: &str, config: UartConfig) -> Result<Self, SerialError> {
        let port = serialport::new(path, config.baudrate)
            .data_bits(data_bits(config.data_bits))
            .parity(parity(config.parity))
            .stop_bits(stop_bits(config.stop_bits))
            .flow_control(serialport::FlowControl::None)
            .timeout(config.read_timeout.unwrap_or(IDLE_POLL))
            .open()
            .map_err(|source| SerialError::Open {
                path: path.to_string(),
                source,
            })?;

        debug!("Opened {} at {} baud", path, config.baudrate);
        Ok(Self {
            port,
            read_timeout: config.read_timeout,
        })
    }

    /// Device name, if the OS reports one
    pub fn name(&self) -> Option<String> {
        self.port.name()
    }
}

impl UartTx for SerialUart {
    type Error = SerialError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), SerialError> {
        trace!("TX {:02X?}", data);
        self.port.write_all(data)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SerialError> {
        self.port.flush()?;
        Ok(())
    }
}

impl UartRx for SerialUart {
    type Error = SerialError;

    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, SerialError> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            match self.port.read(buf) {
                Ok(0) if self.read_timeout.is_none() => continue,
                Ok(n) => {
                    trace!("RX {:02X?}", &buf[..n]);
                    return Ok(n);
                }
                Err(e) if e.kind() == io::ErrorKind::TimedOut && self.read_timeout.is_none() => {
                    continue
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

fn data_bits(bits: DataBits) -> serialport::DataBits {
    match bits {
        DataBits::Seven => serialport::DataBits::Seven,
        DataBits::Eight => serialport::DataBits::Eight,
    }
}

fn parity(parity: Parity) -> serialport::Parity {
    match parity {
        Parity::None => serialport::Parity::None,
        Parity::Even => serialport::Parity::Even,
        Parity::Odd => serialport::Parity::Odd,
    }
}

fn stop_bits(bits: StopBits) -> serialport::StopBits {
    match bits {
        StopBits::One => serialport::StopBits::One,
        StopBits::Two => serialport::StopBits::Two,
    }
}
