//! ASCII hex nibble encoding
//!
//! Port values, I/O masks and ADC channel selectors travel as uppercase
//! ASCII hex digits, high nibble first.

/// Uppercase hex digit table
pub const HEX_DIGITS: [u8; 16] = *b"0123456789ABCDEF";

/// Errors from hex decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HexError {
    /// Byte is not an ASCII hex digit
    InvalidDigit(u8),
}

/// Encode the low nibble of `value` as one hex digit
#[inline]
pub fn nibble(value: u8) -> u8 {
    HEX_DIGITS[(value & 0x0F) as usize]
}

/// Encode a byte as two hex digits, high nibble first
#[inline]
pub fn encode_byte(value: u8) -> [u8; 2] {
    [nibble(value >> 4), nibble(value)]
}

/// Decode one hex digit
///
/// Lowercase digits are accepted even though the board is only ever sent
/// uppercase.
pub fn decode_nibble(digit: u8) -> Result<u8, HexError> {
    match digit {
        b'0'..=b'9' => Ok(digit - b'0'),
        b'A'..=b'F' => Ok(digit - b'A' + 10),
        b'a'..=b'f' => Ok(digit - b'a' + 10),
        _ => Err(HexError::InvalidDigit(digit)),
    }
}

/// Decode two hex digits (high nibble first) back into a byte
pub fn decode_byte(digits: [u8; 2]) -> Result<u8, HexError> {
    Ok((decode_nibble(digits[0])? << 4) | decode_nibble(digits[1])?)
}
