//! ADC channels and sample decoding

use crate::hex;

/// Number of ADC input lines
pub const CHANNEL_COUNT: u8 = 8;

/// Resolution of the board's converter in bits
pub const ADC_BITS: u32 = 10;

/// Largest meaningful sample value
pub const ADC_MAX: u16 = (1 << ADC_BITS) - 1;

/// ADC input line, 0-7
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channel(u8);

/// Channel number outside 0-7
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidChannel(pub u8);

impl Channel {
    pub fn new(line: u8) -> Result<Self, InvalidChannel> {
        if line < CHANNEL_COUNT {
            Ok(Self(line))
        } else {
            Err(InvalidChannel(line))
        }
    }

    /// Line number
    pub fn index(self) -> u8 {
        self.0
    }

    /// Hex digit that selects this channel on the wire
    pub fn hex_digit(self) -> u8 {
        hex::nibble(self.0)
    }

    /// Iterate over every channel in order
    pub fn all() -> impl Iterator<Item = Channel> {
        (0..CHANNEL_COUNT).map(Channel)
    }
}

impl TryFrom<u8> for Channel {
    type Error = InvalidChannel;

    fn try_from(line: u8) -> Result<Self, Self::Error> {
        Channel::new(line)
    }
}

/// Anything a caller may name an ADC channel with
pub trait IntoChannel {
    fn into_channel(self) -> Result<Channel, InvalidChannel>;
}

impl IntoChannel for Channel {
    fn into_channel(self) -> Result<Channel, InvalidChannel> {
        Ok(self)
    }
}

impl IntoChannel for u8 {
    fn into_channel(self) -> Result<Channel, InvalidChannel> {
        Channel::new(self)
    }
}

/// Compose the two response bytes of an ADC conversion, big-endian
///
/// The result is not masked to [`ADC_MAX`]; only the low 10 bits carry
/// the conversion.
#[inline]
pub fn compose_sample(bytes: [u8; 2]) -> u16 {
    ((bytes[0] as u16) << 8) | bytes[1] as u16
}

/// Convert a raw sample to volts against reference `vref`
pub fn adc_to_volts(raw: u16, vref: f32) -> f32 {
    vref * (raw & ADC_MAX) as f32 / ADC_MAX as f32
}
