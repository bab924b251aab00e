//! Bitcoin VarInt (CompactSize) encoding/decoding
//!
//! Used to read the transaction count that follows a block header. Not to be
//! confused with the MessagePack size classes of the put-blocks envelope:
//! VarInts are little-endian and use their own prefixes.
//!
//! Encoding rules:
//! - If value < 0xfd: single byte
//! - If value <= 0xffff: 0xfd prefix + 2 bytes (little-endian)
//! - If value <= 0xffffffff: 0xfe prefix + 4 bytes (little-endian)
//! - Otherwise: 0xff prefix + 8 bytes (little-endian)
//!
//! Decoding rejects values that a shorter form could have carried, as
//! Bitcoin Core does.

use crate::error::BlockParseError;
use std::borrow::Cow;

fn insufficient() -> BlockParseError {
    BlockParseError::InsufficientBytes(Cow::Borrowed("VarInt"))
}

/// Encode a u64 value as a Bitcoin VarInt
///
/// # Examples
///
/// ```
/// use btcindexer_wire::serialization::varint::encode_varint;
///
/// assert_eq!(encode_varint(252), vec![252]);
/// assert_eq!(encode_varint(253), vec![0xfd, 253, 0]);
/// assert_eq!(encode_varint(65536), vec![0xfe, 0, 0, 1, 0]);
/// ```
pub fn encode_varint(value: u64) -> Vec<u8> {
    if value < 0xfd {
        vec![value as u8]
    } else if value <= 0xffff {
        let mut result = vec![0xfd];
        result.extend_from_slice(&(value as u16).to_le_bytes());
        result
    } else if value <= 0xffffffff {
        let mut result = vec![0xfe];
        result.extend_from_slice(&(value as u32).to_le_bytes());
        result
    } else {
        let mut result = vec![0xff];
        result.extend_from_slice(&value.to_le_bytes());
        result
    }
}

/// Decode a Bitcoin VarInt, returning the value and the bytes consumed
///
/// # Examples
///
/// ```
/// use btcindexer_wire::serialization::varint::decode_varint;
///
/// assert_eq!(decode_varint(&[252]), Ok((252, 1)));
/// assert_eq!(decode_varint(&[0xfd, 253, 0]), Ok((253, 3)));
/// assert!(decode_varint(&[0xfd, 252, 0]).is_err());
/// assert!(decode_varint(&[]).is_err());
/// ```
pub fn decode_varint(data: &[u8]) -> Result<(u64, usize), BlockParseError> {
    let first_byte = *data.first().ok_or_else(insufficient)?;

    let (value, len, min) = match first_byte {
        b if b < 0xfd => return Ok((b as u64, 1)),
        0xfd => {
            let bytes = data.get(1..3).ok_or_else(insufficient)?;
            (u16::from_le_bytes([bytes[0], bytes[1]]) as u64, 3, 0xfd)
        }
        0xfe => {
            let bytes = data.get(1..5).ok_or_else(insufficient)?;
            let mut buf = [0u8; 4];
            buf.copy_from_slice(bytes);
            (u32::from_le_bytes(buf) as u64, 5, 0x1_0000)
        }
        _ => {
            let bytes = data.get(1..9).ok_or_else(insufficient)?;
            let mut buf = [0u8; 8];
            buf.copy_from_slice(bytes);
            (u64::from_le_bytes(buf), 9, 0x1_0000_0000)
        }
    };

    if value < min {
        return Err(BlockParseError::InvalidVarInt);
    }
    Ok((value, len))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_varint_boundaries() {
        assert_eq!(encode_varint(0), vec![0]);
        assert_eq!(encode_varint(0xfc), vec![0xfc]);
        assert_eq!(encode_varint(0xfd), vec![0xfd, 0xfd, 0]);
        assert_eq!(encode_varint(0xffff), vec![0xfd, 255, 255]);
        assert_eq!(encode_varint(0x10000), vec![0xfe, 0, 0, 1, 0]);
        assert_eq!(encode_varint(0xffffffff), vec![0xfe, 255, 255, 255, 255]);
        assert_eq!(
            encode_varint(0x100000000),
            vec![0xff, 0, 0, 0, 0, 1, 0, 0, 0]
        );
    }

    #[test]
    fn test_decode_varint_insufficient_bytes() {
        assert!(decode_varint(&[]).is_err());
        assert!(decode_varint(&[0xfd, 0]).is_err());
        assert!(decode_varint(&[0xfe, 0, 0, 0]).is_err());
        assert!(decode_varint(&[0xff, 0, 0, 0, 0, 0, 0, 0]).is_err());
    }

    #[test]
    fn test_decode_varint_invalid_encoding() {
        // Value 252 should use single byte, not 0xfd prefix
        assert_eq!(
            decode_varint(&[0xfd, 252, 0]),
            Err(BlockParseError::InvalidVarInt)
        );
        // Value 65535 should use 0xfd, not 0xfe prefix
        assert!(decode_varint(&[0xfe, 255, 255, 0, 0]).is_err());
        // Value 0xffffffff should use 0xfe, not 0xff prefix
        assert!(decode_varint(&[0xff, 255, 255, 255, 255, 0, 0, 0, 0]).is_err());
    }

    #[test]
    fn test_varint_boundaries_survive_decode() {
        for value in [0, 252, 253, 65535, 65536, 0xffffffff, 0x100000000, u64::MAX] {
            let encoded = encode_varint(value);
            assert_eq!(decode_varint(&encoded), Ok((value, encoded.len())), "{value}");
        }
    }
}
