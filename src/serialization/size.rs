//! Size classes and the exact encoded-size estimator
//!
//! Length-dependent headers come in size classes. The encoder always picks
//! the smallest class that fits, which makes the encoding canonical and its
//! size computable up front.

use crate::constants::*;
use crate::types::BlockSubmission;

/// Size class of an array header, chosen by element count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayClass {
    /// fixarray: count in the marker's low nibble
    Fix,
    /// array16: `0xdc` + u16 big-endian
    Array16,
    /// array32: `0xdd` + u32 big-endian
    Array32,
}

impl ArrayClass {
    /// Smallest class able to carry `count`, `None` above `u32::MAX`
    #[inline]
    pub fn for_count(count: usize) -> Option<Self> {
        if count <= FIX_COUNT_MAX {
            Some(ArrayClass::Fix)
        } else if count <= u16::MAX as usize {
            Some(ArrayClass::Array16)
        } else if count <= u32::MAX as usize {
            Some(ArrayClass::Array32)
        } else {
            None
        }
    }

    /// Header length in bytes, marker included
    #[inline]
    pub const fn header_len(self) -> usize {
        match self {
            ArrayClass::Fix => 1,
            ArrayClass::Array16 => 3,
            ArrayClass::Array32 => 5,
        }
    }
}

/// Size class of a bin header, chosen by payload length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinClass {
    /// bin8: `0xc4` + u8 length
    Bin8,
    /// bin16: `0xc5` + u16 big-endian length
    Bin16,
    /// bin32: `0xc6` + u32 big-endian length
    Bin32,
}

impl BinClass {
    /// Smallest class able to carry `len` bytes, `None` above `u32::MAX`
    #[inline]
    pub fn for_len(len: usize) -> Option<Self> {
        if len <= u8::MAX as usize {
            Some(BinClass::Bin8)
        } else if len <= u16::MAX as usize {
            Some(BinClass::Bin16)
        } else if len <= u32::MAX as usize {
            Some(BinClass::Bin32)
        } else {
            None
        }
    }

    #[inline]
    pub const fn marker(self) -> u8 {
        match self {
            BinClass::Bin8 => BIN8,
            BinClass::Bin16 => BIN16,
            BinClass::Bin32 => BIN32,
        }
    }

    /// Header length in bytes, marker included
    #[inline]
    pub const fn header_len(self) -> usize {
        match self {
            BinClass::Bin8 => 2,
            BinClass::Bin16 => 3,
            BinClass::Bin32 => 5,
        }
    }
}

/// Encoded size of one record
#[inline]
pub fn record_encoded_len(block_len: usize) -> usize {
    let bin = BinClass::for_len(block_len).unwrap_or(BinClass::Bin32);
    RECORD_FIXED_LEN + bin.header_len() + block_len
}

/// Exact number of bytes [`crate::encode`] produces for `records`
///
/// Used to reserve the output buffer in one allocation. Never fails.
pub fn encoded_len<R: BlockSubmission>(records: &[R]) -> usize {
    let header = ArrayClass::for_count(records.len())
        .unwrap_or(ArrayClass::Array32)
        .header_len();
    records.iter().fold(header, |acc, record| {
        acc.saturating_add(record_encoded_len(record.block().len()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PutBlock;

    #[test]
    fn test_array_class_boundaries() {
        assert_eq!(ArrayClass::for_count(0), Some(ArrayClass::Fix));
        assert_eq!(ArrayClass::for_count(15), Some(ArrayClass::Fix));
        assert_eq!(ArrayClass::for_count(16), Some(ArrayClass::Array16));
        assert_eq!(ArrayClass::for_count(65535), Some(ArrayClass::Array16));
        assert_eq!(ArrayClass::for_count(65536), Some(ArrayClass::Array32));
        assert_eq!(
            ArrayClass::for_count(u32::MAX as usize),
            Some(ArrayClass::Array32)
        );
    }

    #[test]
    fn test_bin_class_boundaries() {
        assert_eq!(BinClass::for_len(0), Some(BinClass::Bin8));
        assert_eq!(BinClass::for_len(255), Some(BinClass::Bin8));
        assert_eq!(BinClass::for_len(256), Some(BinClass::Bin16));
        assert_eq!(BinClass::for_len(65535), Some(BinClass::Bin16));
        assert_eq!(BinClass::for_len(65536), Some(BinClass::Bin32));
    }

    #[test]
    fn test_encoded_len_empty_batch() {
        let empty: Vec<PutBlock> = Vec::new();
        assert_eq!(encoded_len(&empty), 1);
    }

    #[test]
    fn test_encoded_len_per_record() {
        // 1 + 7 + 9 + 6 + 2 + 10
        assert_eq!(record_encoded_len(10), 35);
        assert_eq!(record_encoded_len(256), 23 + 3 + 256);
        assert_eq!(record_encoded_len(70_000), 23 + 5 + 70_000);

        let records = vec![PutBlock::new(1, vec![0u8; 10]); 16];
        assert_eq!(encoded_len(&records), 3 + 16 * 35);
    }
}
