//! Wire constants for the put-blocks MessagePack layout
//!
//! Every byte here is part of the contract with the indexer service and with
//! any other independently written encoder. Changing a value breaks
//! interoperability.

/// Positive fixint: `0x00..=0x7f`, the value is the marker itself
pub const POSITIVE_FIXINT_MAX: u8 = 0x7f;

/// Fixmap marker base; the low nibble carries the entry count
pub const FIXMAP: u8 = 0x80;

/// Fixarray marker base; the low nibble carries the element count
pub const FIXARRAY: u8 = 0x90;

/// Fixstr marker base; the low five bits carry the length
pub const FIXSTR: u8 = 0xa0;

/// Largest count representable in a fixarray / fixmap header
pub const FIX_COUNT_MAX: usize = 0x0f;

/// Largest length representable in a fixstr header
pub const FIXSTR_LEN_MAX: usize = 0x1f;

pub const NIL: u8 = 0xc0;
/// Never used by any MessagePack encoder
pub const RESERVED: u8 = 0xc1;
pub const FALSE: u8 = 0xc2;
pub const TRUE: u8 = 0xc3;

pub const BIN8: u8 = 0xc4;
pub const BIN16: u8 = 0xc5;
pub const BIN32: u8 = 0xc6;

pub const EXT8: u8 = 0xc7;
pub const EXT16: u8 = 0xc8;
pub const EXT32: u8 = 0xc9;

pub const FLOAT32: u8 = 0xca;
pub const FLOAT64: u8 = 0xcb;

pub const UINT8: u8 = 0xcc;
pub const UINT16: u8 = 0xcd;
pub const UINT32: u8 = 0xce;
pub const UINT64: u8 = 0xcf;

pub const INT8: u8 = 0xd0;
pub const INT16: u8 = 0xd1;
pub const INT32: u8 = 0xd2;
pub const INT64: u8 = 0xd3;

pub const FIXEXT1: u8 = 0xd4;
pub const FIXEXT2: u8 = 0xd5;
pub const FIXEXT4: u8 = 0xd6;
pub const FIXEXT8: u8 = 0xd7;
pub const FIXEXT16: u8 = 0xd8;

pub const STR8: u8 = 0xd9;
pub const STR16: u8 = 0xda;
pub const STR32: u8 = 0xdb;

pub const ARRAY16: u8 = 0xdc;
pub const ARRAY32: u8 = 0xdd;

pub const MAP16: u8 = 0xde;
pub const MAP32: u8 = 0xdf;

/// Negative fixint: `0xe0..=0xff`, the marker reinterpreted as `i8`
pub const NEGATIVE_FIXINT_MIN: u8 = 0xe0;

/// Number of entries the encoder writes per record
pub const RECORD_FIELD_COUNT: usize = 2;

/// Header of every encoded record: a fixmap with exactly two entries
pub const RECORD_MAP_HEADER: u8 = FIXMAP | RECORD_FIELD_COUNT as u8;

/// Field name of the block height
pub const HEIGHT_KEY: &[u8] = b"height";

/// Field name of the serialized block
pub const BLOCK_KEY: &[u8] = b"block";

/// `"height"` as a fixstr: marker `0xa6` followed by the six ASCII bytes
pub const HEIGHT_KEY_TOKEN: [u8; 7] = [0xa6, 0x68, 0x65, 0x69, 0x67, 0x68, 0x74];

/// `"block"` as a fixstr: marker `0xa5` followed by the five ASCII bytes
pub const BLOCK_KEY_TOKEN: [u8; 6] = [0xa5, 0x62, 0x6c, 0x6f, 0x63, 0x6b];

/// Encoded size of a height value: int64 marker plus eight big-endian bytes
pub const INT64_ENCODED_LEN: usize = 9;

/// Smallest possible record on the wire (an empty fixmap)
pub const MIN_RECORD_LEN: usize = 1;

/// Smallest possible map entry on the wire (one-byte key, one-byte value)
pub const MIN_MAP_ENTRY_LEN: usize = 2;

/// Bytes of a record that do not depend on the block payload, excluding the
/// bin header: map header, both key tokens, and the int64 height
pub const RECORD_FIXED_LEN: usize =
    1 + HEIGHT_KEY_TOKEN.len() + INT64_ENCODED_LEN + BLOCK_KEY_TOKEN.len();
