//! Put-blocks wire format serialization/deserialization
//!
//! The batch envelope is MessagePack-compatible and must match the indexer's
//! encoder byte for byte. The `block` and `varint` modules read the Bitcoin
//! Core block format carried inside each record.

pub mod block;
pub mod decode;
pub mod encode;
pub mod size;
pub mod varint;

pub use block::{deserialize_block_header, serialize_block_header, BlockHeader, BlockSummary};
pub use decode::{decode, decode_borrowed, decode_borrowed_with, decode_with};
pub use encode::{encode, encode_into};
pub use size::{encoded_len, ArrayClass, BinClass};
pub use varint::{decode_varint, encode_varint};
