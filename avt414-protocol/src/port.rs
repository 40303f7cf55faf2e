//! Digital I/O ports and direction masks

/// Port C pin 6, wired to the board's controller link; always an output
pub const PORT_C_LINK_OUTPUT: u8 = 0x40;

/// Port C pin 7, wired to the board's controller link; always an input
pub const PORT_C_LINK_INPUT: u8 = 0x80;

/// One of the board's 8-bit digital ports
///
/// The discriminant is the ASCII selector byte sent on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Port {
    B = b'B',
    C = b'C',
    D = b'D',
}

/// Port identifier outside {B, C, D}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidPort(pub char);

impl Port {
    /// All ports, in wire order
    pub const ALL: [Port; 3] = [Port::B, Port::C, Port::D];

    /// ASCII selector byte
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// Parse an ASCII selector byte
    pub fn from_byte(byte: u8) -> Result<Self, InvalidPort> {
        match byte {
            b'B' => Ok(Port::B),
            b'C' => Ok(Port::C),
            b'D' => Ok(Port::D),
            _ => Err(InvalidPort(char::from(byte))),
        }
    }
}

impl TryFrom<u8> for Port {
    type Error = InvalidPort;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Port::from_byte(byte)
    }
}

impl TryFrom<char> for Port {
    type Error = InvalidPort;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        u8::try_from(c)
            .map_err(|_| InvalidPort(c))
            .and_then(Port::from_byte)
    }
}

/// Anything a caller may name a port with
///
/// Untyped selectors are validated here, before the driver touches the
/// transport.
pub trait IntoPort {
    fn into_port(self) -> Result<Port, InvalidPort>;
}

impl IntoPort for Port {
    fn into_port(self) -> Result<Port, InvalidPort> {
        Ok(self)
    }
}

impl IntoPort for u8 {
    fn into_port(self) -> Result<Port, InvalidPort> {
        Port::from_byte(self)
    }
}

impl IntoPort for char {
    fn into_port(self) -> Result<Port, InvalidPort> {
        Port::try_from(self)
    }
}

/// Per-pin direction mask: bit set = input, bit clear = output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IoMask(u8);

impl IoMask {
    /// Every pin an output
    pub const ALL_OUTPUTS: IoMask = IoMask(0x00);
    /// Every pin an input
    pub const ALL_INPUTS: IoMask = IoMask(0xFF);

    pub const fn new(bits: u8) -> Self {
        Self(bits)
    }

    /// Raw mask bits
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Mask as it must be sent for `port`
    ///
    /// C6 and C7 carry the board's controller link, so on port C pin 6 is
    /// forced to output and pin 7 to input whatever the caller asked for.
    pub fn for_port(self, port: Port) -> Self {
        match port {
            Port::C => Self((self.0 & !PORT_C_LINK_OUTPUT) | PORT_C_LINK_INPUT),
            Port::B | Port::D => self,
        }
    }
}

impl From<u8> for IoMask {
    fn from(bits: u8) -> Self {
        Self(bits)
    }
}
