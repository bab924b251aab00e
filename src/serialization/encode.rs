//! Put-blocks batch encoder
//!
//! Wire layout of a batch (all multi-byte integers big-endian):
//! - Array header: fixarray / array16 / array32 with the record count
//! - For each record:
//!   - `0x82` (fixmap, two entries)
//!   - `"height"` fixstr, then int64 (`0xd3` + 8 bytes)
//!   - `"block"` fixstr, then bin8 / bin16 / bin32 with the payload
//!
//! Every length-dependent header uses the smallest class that fits, so equal
//! batches always encode to identical bytes.

use super::size::{encoded_len, ArrayClass, BinClass};
use crate::constants::*;
use crate::types::BlockSubmission;
use tracing::trace;

/// Encode a batch into a freshly allocated buffer of exactly
/// [`encoded_len`] bytes
///
/// # Panics
///
/// Panics if the batch has more than `u32::MAX` records or a block payload
/// is longer than `u32::MAX` bytes; neither is representable on the wire.
pub fn encode<R: BlockSubmission>(records: &[R]) -> Vec<u8> {
    let mut out = Vec::new();
    encode_into(&mut out, records);
    out
}

/// Append the encoding of a batch to `out`
///
/// Reserves the exact encoded size before writing, so a cleared buffer from a
/// previous call is reused without reallocating when it is large enough.
///
/// # Panics
///
/// Same conditions as [`encode`].
pub fn encode_into<R: BlockSubmission>(out: &mut Vec<u8>, records: &[R]) {
    let expected = encoded_len(records);
    out.reserve(expected);
    let start = out.len();

    write_array_header(out, records.len());
    for record in records {
        out.push(RECORD_MAP_HEADER);
        out.extend_from_slice(&HEIGHT_KEY_TOKEN);
        write_int64(out, record.height());
        out.extend_from_slice(&BLOCK_KEY_TOKEN);
        write_bin(out, record.block());
    }

    let written = out.len() - start;
    debug_assert_eq!(
        written, expected,
        "size estimate ({expected}) must match encoded length ({written})"
    );
    trace!(records = records.len(), bytes = written, "encoded put-blocks batch");
}

fn write_array_header(out: &mut Vec<u8>, count: usize) {
    match ArrayClass::for_count(count) {
        Some(ArrayClass::Fix) => out.push(FIXARRAY | count as u8),
        Some(ArrayClass::Array16) => {
            out.push(ARRAY16);
            out.extend_from_slice(&(count as u16).to_be_bytes());
        }
        Some(ArrayClass::Array32) => {
            out.push(ARRAY32);
            out.extend_from_slice(&(count as u32).to_be_bytes());
        }
        None => panic!("batch of {count} records exceeds the array32 limit"),
    }
}

#[inline]
fn write_int64(out: &mut Vec<u8>, value: i64) {
    out.push(INT64);
    out.extend_from_slice(&value.to_be_bytes());
}

fn write_bin(out: &mut Vec<u8>, payload: &[u8]) {
    let len = payload.len();
    let class = match BinClass::for_len(len) {
        Some(class) => class,
        None => panic!("block of {len} bytes exceeds the bin32 limit"),
    };
    out.push(class.marker());
    match class {
        BinClass::Bin8 => out.push(len as u8),
        BinClass::Bin16 => out.extend_from_slice(&(len as u16).to_be_bytes()),
        BinClass::Bin32 => out.extend_from_slice(&(len as u32).to_be_bytes()),
    }
    out.extend_from_slice(payload);
}
