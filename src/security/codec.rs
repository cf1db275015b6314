//! Conversion between message bytes and the integers the cipher works on.

use num_bigint_dig::BigUint;

use crate::error::Result;

/// Maps message bytes to an integer and back.
pub trait MessageCodec {
    /// Interpret `bytes` as a non-negative integer.
    fn encode(&self, bytes: &[u8]) -> BigUint;

    /// Recover the byte form of `value`.
    fn decode(&self, value: &BigUint) -> Vec<u8>;

    fn encode_text(&self, text: &str) -> BigUint {
        self.encode(text.as_bytes())
    }

    /// Decode `value` and require the bytes to be UTF-8.
    fn decode_text(&self, value: &BigUint) -> Result<String> {
        Ok(String::from_utf8(self.decode(value))?)
    }
}

/// Big-endian, unsigned.
///
/// Encoding is the two's-complement reading of the bytes with a zero sign byte in
/// front, so a leading byte with its high bit set never turns the value negative.
/// Decoding emits the magnitude only, without that sign byte.
///
/// Leading NUL bytes do not survive: `[0, 0x41]` encodes to the same value as `[0x41]`.
/// Zero decodes to a single NUL byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BigEndianCodec;

impl MessageCodec for BigEndianCodec {
    fn encode(&self, bytes: &[u8]) -> BigUint {
        BigUint::from_bytes_be(bytes)
    }

    fn decode(&self, value: &BigUint) -> Vec<u8> {
        value.to_bytes_be()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_encode_ascii() {
        let codec = BigEndianCodec;
        assert_eq!(codec.encode_text("hi"), BigUint::from(0x6869_u64));
        assert_eq!(codec.encode_text("A"), BigUint::from(65_u64));
    }

    #[test]
    fn test_high_bit_stays_positive() {
        let codec = BigEndianCodec;
        // "é" is 0xC3 0xA9 in UTF-8
        let value = codec.encode_text("é");
        assert_eq!(value, BigUint::from(0xC3A9_u64));
        assert_eq!(codec.decode_text(&value).unwrap(), "é");
    }

    #[test]
    fn test_text_round_trip() {
        let codec = BigEndianCodec;
        for text in ["hello", "Diffie-Hellman", "ünïcödé ✓", "0"] {
            let value = codec.encode_text(text);
            assert_eq!(codec.decode_text(&value).unwrap(), text);
        }
    }

    #[test]
    fn test_leading_nul_is_lost() {
        let codec = BigEndianCodec;
        let value = codec.encode(&[0, b'A']);
        assert_eq!(value, codec.encode(b"A"));
        assert_eq!(codec.decode(&value), b"A".to_vec());
    }

    #[test]
    fn test_zero() {
        let codec = BigEndianCodec;
        assert_eq!(codec.encode(&[]), BigUint::from(0_u64));
        assert_eq!(codec.decode(&BigUint::from(0_u64)), vec![0]);
    }

    #[test]
    fn test_invalid_utf8() {
        let codec = BigEndianCodec;
        let result = codec.decode_text(&BigUint::from(0xFF_u64));
        assert!(matches!(result, Err(Error::InvalidEncoding(_))));
    }
}
