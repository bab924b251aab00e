//! Put-blocks batch decoder
//!
//! Parses untrusted bytes. Every declared length is checked against the
//! remaining input before it is used, and no allocation is sized from a
//! declared count without first clamping it to what the input could hold.
//!
//! Accepted beyond what the encoder writes, for interoperability with other
//! MessagePack encoders:
//! - any integer marker for `height` (compact encoders write 156 as `cc 9c`)
//! - map16 / map32 record headers and any number of entries
//! - str8 / str16 / str32 and bin keys
//! - unknown keys, whose values are skipped whatever their type
//!
//! Missing `height` or `block` entries default to `0` and empty bytes.

use crate::config::DecodeConfig;
use crate::constants::*;
use crate::error::{DecodeError, Field, Result};
use crate::types::{PutBlockRef, PutBlocks};
use std::borrow::Cow;
use tracing::{debug, trace};

/// Decode a batch into owned records, using default limits
pub fn decode(data: &[u8]) -> Result<PutBlocks> {
    decode_with(data, &DecodeConfig::default())
}

/// Decode a batch into owned records
pub fn decode_with(data: &[u8], config: &DecodeConfig) -> Result<PutBlocks> {
    let records = decode_borrowed_with(data, config)?;
    Ok(records.into_iter().map(PutBlockRef::into_owned).collect())
}

/// Decode a batch without copying block payloads, using default limits
///
/// Each returned record's `block` is a slice of `data`.
pub fn decode_borrowed(data: &[u8]) -> Result<Vec<PutBlockRef<'_>>> {
    decode_borrowed_with(data, &DecodeConfig::default())
}

/// Decode a batch without copying block payloads
pub fn decode_borrowed_with<'a>(
    data: &'a [u8],
    config: &DecodeConfig,
) -> Result<Vec<PutBlockRef<'a>>> {
    match decode_batch(data, config) {
        Ok(records) => {
            trace!(records = records.len(), bytes = data.len(), "decoded put-blocks batch");
            Ok(records)
        }
        Err(err) => {
            debug!(error = %err, bytes = data.len(), "failed to decode put-blocks batch");
            Err(err)
        }
    }
}

fn decode_batch<'a>(data: &'a [u8], config: &DecodeConfig) -> Result<Vec<PutBlockRef<'a>>> {
    let mut reader = Reader::new(data);

    let count = reader.array_header()?;
    if count > config.max_records {
        return Err(reader.malformed(
            Field::Batch,
            Cow::Owned(format!(
                "batch declares {count} records, limit is {}",
                config.max_records
            )),
        ));
    }

    // Each record takes at least MIN_RECORD_LEN bytes, so a count beyond that
    // is left to fail as truncation instead of driving the allocation.
    let mut records = Vec::with_capacity(count.min(reader.remaining() / MIN_RECORD_LEN));
    for index in 0..count {
        reader.record = Some(index);
        records.push(decode_record(&mut reader, config)?);
    }
    reader.record = None;

    if reader.remaining() > 0 && !config.allow_trailing_bytes {
        return Err(reader.malformed(
            Field::Batch,
            Cow::Owned(format!(
                "{} trailing bytes after the last record",
                reader.remaining()
            )),
        ));
    }

    Ok(records)
}

fn decode_record<'a>(reader: &mut Reader<'a>, config: &DecodeConfig) -> Result<PutBlockRef<'a>> {
    let entries = reader.map_header()?;
    let mut record = PutBlockRef::default();

    for _ in 0..entries {
        let key = reader.key()?;
        if key == HEIGHT_KEY {
            record.height = reader.int64(Field::Height)?;
        } else if key == BLOCK_KEY {
            record.block = reader.bin(Field::Block, config.max_block_size)?;
        } else {
            reader.skip_value(Field::Unknown)?;
        }
    }

    Ok(record)
}

/// Bounds-checked cursor over the input
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
    /// Record being decoded, reported in errors
    record: Option<usize>,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            record: None,
        }
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn truncated(&self, field: Field) -> DecodeError {
        DecodeError::Truncated {
            record: self.record,
            field,
        }
    }

    fn mismatch(&self, field: Field, expected: &'static str, marker: u8) -> DecodeError {
        DecodeError::TypeMismatch {
            record: self.record,
            field,
            expected,
            marker,
        }
    }

    fn malformed(&self, field: Field, reason: Cow<'static, str>) -> DecodeError {
        DecodeError::Malformed {
            record: self.record,
            field,
            reason,
        }
    }

    fn reserved(&self, field: Field) -> DecodeError {
        self.malformed(field, Cow::Borrowed("reserved marker 0xc1"))
    }

    #[inline]
    fn take(&mut self, len: usize, field: Field) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(self.truncated(field));
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    #[inline]
    fn take_array<const N: usize>(&mut self, field: Field) -> Result<[u8; N]> {
        let bytes = self.take(N, field)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    #[inline]
    fn u8(&mut self, field: Field) -> Result<u8> {
        Ok(self.take_array::<1>(field)?[0])
    }

    #[inline]
    fn be_u16(&mut self, field: Field) -> Result<u16> {
        Ok(u16::from_be_bytes(self.take_array(field)?))
    }

    #[inline]
    fn be_u32(&mut self, field: Field) -> Result<u32> {
        Ok(u32::from_be_bytes(self.take_array(field)?))
    }

    #[inline]
    fn be_u64(&mut self, field: Field) -> Result<u64> {
        Ok(u64::from_be_bytes(self.take_array(field)?))
    }

    fn array_header(&mut self) -> Result<usize> {
        let field = Field::Batch;
        let marker = self.u8(field)?;
        match marker {
            FIXARRAY..=0x9f => Ok(marker as usize & FIX_COUNT_MAX),
            ARRAY16 => Ok(self.be_u16(field)? as usize),
            ARRAY32 => Ok(self.be_u32(field)? as usize),
            RESERVED => Err(self.reserved(field)),
            _ => Err(self.mismatch(field, "array", marker)),
        }
    }

    fn map_header(&mut self) -> Result<usize> {
        let field = Field::Record;
        let marker = self.u8(field)?;
        let entries = match marker {
            FIXMAP..=0x8f => marker as usize & FIX_COUNT_MAX,
            MAP16 => self.be_u16(field)? as usize,
            MAP32 => self.be_u32(field)? as usize,
            RESERVED => return Err(self.reserved(field)),
            _ => return Err(self.mismatch(field, "map", marker)),
        };
        if entries > self.remaining() / MIN_MAP_ENTRY_LEN {
            return Err(self.truncated(field));
        }
        Ok(entries)
    }

    /// Map key as raw bytes; string and binary keys are both accepted
    fn key(&mut self) -> Result<&'a [u8]> {
        let field = Field::Key;
        let marker = self.u8(field)?;
        let len = match marker {
            FIXSTR..=0xbf => marker as usize & FIXSTR_LEN_MAX,
            STR8 | BIN8 => self.u8(field)? as usize,
            STR16 | BIN16 => self.be_u16(field)? as usize,
            STR32 | BIN32 => self.be_u32(field)? as usize,
            RESERVED => return Err(self.reserved(field)),
            _ => return Err(self.mismatch(field, "string", marker)),
        };
        self.take(len, field)
    }

    /// Any MessagePack integer that fits in an `i64`
    fn int64(&mut self, field: Field) -> Result<i64> {
        let marker = self.u8(field)?;
        match marker {
            0x00..=POSITIVE_FIXINT_MAX => Ok(marker as i64),
            NEGATIVE_FIXINT_MIN..=0xff => Ok(marker as i8 as i64),
            INT8 => Ok(i8::from_be_bytes(self.take_array(field)?) as i64),
            INT16 => Ok(i16::from_be_bytes(self.take_array(field)?) as i64),
            INT32 => Ok(i32::from_be_bytes(self.take_array(field)?) as i64),
            INT64 => Ok(i64::from_be_bytes(self.take_array(field)?)),
            UINT8 => Ok(self.u8(field)? as i64),
            UINT16 => Ok(self.be_u16(field)? as i64),
            UINT32 => Ok(self.be_u32(field)? as i64),
            UINT64 => {
                let value = self.be_u64(field)?;
                i64::try_from(value)
                    .map_err(|_| self.mismatch(field, "integer within int64 range", marker))
            }
            RESERVED => Err(self.reserved(field)),
            _ => Err(self.mismatch(field, "integer", marker)),
        }
    }

    /// bin8 / bin16 / bin32 payload as a view into the input
    fn bin(&mut self, field: Field, max_len: usize) -> Result<&'a [u8]> {
        let marker = self.u8(field)?;
        let len = match marker {
            BIN8 => self.u8(field)? as usize,
            BIN16 => self.be_u16(field)? as usize,
            BIN32 => self.be_u32(field)? as usize,
            RESERVED => return Err(self.reserved(field)),
            _ => return Err(self.mismatch(field, "binary", marker)),
        };
        if len > max_len {
            return Err(self.malformed(
                field,
                Cow::Owned(format!("payload of {len} bytes exceeds limit of {max_len}")),
            ));
        }
        self.take(len, field)
    }

    fn skip(&mut self, len: usize, field: Field) -> Result<()> {
        self.take(len, field).map(|_| ())
    }

    /// Consume one value of any type, nested containers included
    ///
    /// Iterative: containers add their element count to `pending` instead of
    /// recursing, so deeply nested input cannot exhaust the stack.
    fn skip_value(&mut self, field: Field) -> Result<()> {
        let mut pending: u64 = 1;
        while pending > 0 {
            // Every pending value needs at least one byte.
            if pending > self.remaining() as u64 {
                return Err(self.truncated(field));
            }
            pending -= 1;

            let marker = self.u8(field)?;
            match marker {
                0x00..=POSITIVE_FIXINT_MAX | NEGATIVE_FIXINT_MIN..=0xff => {}
                NIL | FALSE | TRUE => {}
                FIXMAP..=0x8f => pending += 2 * (marker as usize & FIX_COUNT_MAX) as u64,
                FIXARRAY..=0x9f => pending += (marker as usize & FIX_COUNT_MAX) as u64,
                FIXSTR..=0xbf => self.skip(marker as usize & FIXSTR_LEN_MAX, field)?,
                BIN8 | STR8 => {
                    let len = self.u8(field)? as usize;
                    self.skip(len, field)?;
                }
                BIN16 | STR16 => {
                    let len = self.be_u16(field)? as usize;
                    self.skip(len, field)?;
                }
                BIN32 | STR32 => {
                    let len = self.be_u32(field)? as usize;
                    self.skip(len, field)?;
                }
                // ext payloads are preceded by a one-byte type tag
                EXT8 => {
                    let len = self.u8(field)? as usize;
                    self.skip(len + 1, field)?;
                }
                EXT16 => {
                    let len = self.be_u16(field)? as usize;
                    self.skip(len + 1, field)?;
                }
                EXT32 => {
                    let len = self.be_u32(field)? as usize;
                    self.skip(len.saturating_add(1), field)?;
                }
                UINT8 | INT8 => self.skip(1, field)?,
                UINT16 | INT16 => self.skip(2, field)?,
                UINT32 | INT32 | FLOAT32 => self.skip(4, field)?,
                UINT64 | INT64 | FLOAT64 => self.skip(8, field)?,
                FIXEXT1 => self.skip(2, field)?,
                FIXEXT2 => self.skip(3, field)?,
                FIXEXT4 => self.skip(5, field)?,
                FIXEXT8 => self.skip(9, field)?,
                FIXEXT16 => self.skip(17, field)?,
                ARRAY16 => pending += self.be_u16(field)? as u64,
                ARRAY32 => pending += self.be_u32(field)? as u64,
                MAP16 => pending += 2 * self.be_u16(field)? as u64,
                MAP32 => pending += 2 * self.be_u32(field)? as u64,
                // only RESERVED is left
                _ => return Err(self.reserved(field)),
            }
        }
        Ok(())
    }
}
