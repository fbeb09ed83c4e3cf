//! UTF-16 to UTF-8 conversion for engine text buffers
//!
//! PDFium hands text back as UTF-16 code units. Unlike
//! `String::from_utf16_lossy`, decoding here is strict: an unpaired or
//! dangling surrogate is an error rather than a replacement character, so a
//! malformed span never leaks into a link URI.

use thiserror::Error;

const HIGH_SURROGATE_START: u16 = 0xD800;
const HIGH_SURROGATE_END: u16 = 0xDBFF;
const LOW_SURROGATE_START: u16 = 0xDC00;
const LOW_SURROGATE_END: u16 = 0xDFFF;

/// Malformed UTF-16 input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A surrogate with no partner: a lone low surrogate, or a high
    /// surrogate as the last unit.
    #[error("unpaired surrogate 0x{unit:04X} at unit {index}")]
    UnpairedSurrogate { index: usize, unit: u16 },

    /// A high surrogate followed by something other than a low surrogate.
    #[error("invalid surrogate pair 0x{high:04X} 0x{low:04X} at unit {index}")]
    InvalidSurrogatePair { index: usize, high: u16, low: u16 },
}

/// Decode UTF-16 code units into a UTF-8 string.
///
/// # Example
///
/// ```
/// use pdfium_plainlinks::decode_utf16;
///
/// let units: Vec<u16> = "http://x.io".encode_utf16().collect();
/// assert_eq!(decode_utf16(&units)?, "http://x.io");
/// # Ok::<(), pdfium_plainlinks::DecodeError>(())
/// ```
pub fn decode_utf16(units: &[u16]) -> Result<String, DecodeError> {
    // At most 3 UTF-8 bytes per unit; pairs take 4 bytes for 2 units.
    let mut utf8 = String::with_capacity(units.len() * 3);

    let mut i = 0;
    while i < units.len() {
        let unit = units[i];
        let code_point = match unit {
            HIGH_SURROGATE_START..=HIGH_SURROGATE_END => {
                let low = *units
                    .get(i + 1)
                    .ok_or(DecodeError::UnpairedSurrogate { index: i, unit })?;
                if !(LOW_SURROGATE_START..=LOW_SURROGATE_END).contains(&low) {
                    return Err(DecodeError::InvalidSurrogatePair {
                        index: i,
                        high: unit,
                        low,
                    });
                }
                i += 1;
                let high_bits = u32::from(unit - HIGH_SURROGATE_START) << 10;
                let low_bits = u32::from(low - LOW_SURROGATE_START);
                (high_bits | low_bits) + 0x10000
            }
            LOW_SURROGATE_START..=LOW_SURROGATE_END => {
                return Err(DecodeError::UnpairedSurrogate { index: i, unit });
            }
            _ => u32::from(unit),
        };

        // Surrogates were handled above, so every value here is a scalar.
        let ch = char::from_u32(code_point)
            .ok_or(DecodeError::UnpairedSurrogate { index: i, unit })?;
        utf8.push(ch);
        i += 1;
    }

    Ok(utf8)
}

/// Decode a NUL-terminated engine buffer, ignoring everything from the
/// first NUL unit onward.
pub fn decode_utf16_until_nul(units: &[u16]) -> Result<String, DecodeError> {
    let end = units.iter().position(|&u| u == 0).unwrap_or(units.len());
    decode_utf16(&units[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn test_ascii_and_multibyte() {
        assert_eq!(decode_utf16(&encode("abc")).unwrap(), "abc");
        assert_eq!(decode_utf16(&encode("é")).unwrap(), "é");
        assert_eq!(decode_utf16(&encode("€")).unwrap(), "€");
        assert_eq!(decode_utf16(&[]).unwrap(), "");
    }

    #[test]
    fn test_surrogate_pair() {
        // U+1F600
        assert_eq!(decode_utf16(&[0xD83D, 0xDE00]).unwrap(), "\u{1F600}");
        // U+10FFFF
        assert_eq!(decode_utf16(&[0xDBFF, 0xDFFF]).unwrap(), "\u{10FFFF}");
        assert_eq!(decode_utf16(&[0x61, 0xD800, 0xDC00, 0x62]).unwrap(), "a\u{10000}b");
    }

    #[test]
    fn test_high_surrogate_at_end() {
        assert_eq!(
            decode_utf16(&[0x61, 0xD83D]),
            Err(DecodeError::UnpairedSurrogate {
                index: 1,
                unit: 0xD83D
            })
        );
    }

    #[test]
    fn test_high_surrogate_followed_by_non_low() {
        assert_eq!(
            decode_utf16(&[0xD83D, 0x41]),
            Err(DecodeError::InvalidSurrogatePair {
                index: 0,
                high: 0xD83D,
                low: 0x41
            })
        );
        assert!(decode_utf16(&[0xD83D, 0xD83D]).is_err());
    }

    #[test]
    fn test_lone_low_surrogate() {
        assert_eq!(
            decode_utf16(&[0xDC00, 0x41]),
            Err(DecodeError::UnpairedSurrogate {
                index: 0,
                unit: 0xDC00
            })
        );
    }

    #[test]
    fn test_until_nul() {
        assert_eq!(decode_utf16_until_nul(&[0x68, 0x69, 0, 0]).unwrap(), "hi");
        assert_eq!(decode_utf16_until_nul(&[0]).unwrap(), "");
        assert_eq!(decode_utf16_until_nul(&[0x20]).unwrap(), " ");
    }
}
