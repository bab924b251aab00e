//! Inspection of the Bitcoin block carried in a put-block record
//!
//! The envelope codec never looks inside `block`. These helpers let a caller
//! confirm the payload is a plausible block and identify it before handing it
//! on, the way the indexer rejects garbage submissions.

use super::varint::decode_varint;
use crate::error::BlockParseError;
use sha2::{Digest, Sha256};
use std::borrow::Cow;

/// Serialized block header length
pub const BLOCK_HEADER_SIZE: usize = 80;

/// Maximum block serialized size in bytes (network rule)
pub const MAX_BLOCK_SERIALIZED_SIZE: usize = 4_000_000;

/// Hash type: 256-bit hash, internal byte order
pub type Hash = [u8; 32];

/// Bitcoin block header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockHeader {
    pub version: i32,
    pub prev_block_hash: Hash,
    pub merkle_root: Hash,
    pub timestamp: u32,
    pub bits: u32,
    pub nonce: u32,
}

impl BlockHeader {
    /// Double SHA-256 of the serialized header, internal byte order
    pub fn block_hash(&self) -> Hash {
        let first = Sha256::digest(serialize_block_header(self));
        Sha256::digest(first).into()
    }

    /// Block id as displayed by explorers and RPC: reversed hash, hex encoded
    pub fn block_id(&self) -> String {
        let mut hash = self.block_hash();
        hash.reverse();
        hex::encode(hash)
    }
}

/// Serialize a block header to Bitcoin wire format
///
/// Block header is exactly 80 bytes:
/// - Version (4 bytes, little-endian)
/// - Previous block hash (32 bytes)
/// - Merkle root (32 bytes)
/// - Timestamp (4 bytes, little-endian)
/// - Bits (4 bytes, little-endian)
/// - Nonce (4 bytes, little-endian)
pub fn serialize_block_header(header: &BlockHeader) -> [u8; BLOCK_HEADER_SIZE] {
    let mut result = [0u8; BLOCK_HEADER_SIZE];
    result[0..4].copy_from_slice(&header.version.to_le_bytes());
    result[4..36].copy_from_slice(&header.prev_block_hash);
    result[36..68].copy_from_slice(&header.merkle_root);
    result[68..72].copy_from_slice(&header.timestamp.to_le_bytes());
    result[72..76].copy_from_slice(&header.bits.to_le_bytes());
    result[76..80].copy_from_slice(&header.nonce.to_le_bytes());
    result
}

/// Deserialize a block header from the first 80 bytes of `data`
pub fn deserialize_block_header(data: &[u8]) -> Result<BlockHeader, BlockParseError> {
    if data.len() < BLOCK_HEADER_SIZE {
        return Err(BlockParseError::InsufficientBytes(Cow::Borrowed(
            "block header",
        )));
    }

    let le_u32 = |offset: usize| {
        u32::from_le_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ])
    };

    let mut prev_block_hash = [0u8; 32];
    prev_block_hash.copy_from_slice(&data[4..36]);

    let mut merkle_root = [0u8; 32];
    merkle_root.copy_from_slice(&data[36..68]);

    Ok(BlockHeader {
        version: le_u32(0) as i32,
        prev_block_hash,
        merkle_root,
        timestamp: le_u32(68),
        bits: le_u32(72),
        nonce: le_u32(76),
    })
}

/// Header and transaction count of a serialized block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSummary {
    pub header: BlockHeader,
    pub tx_count: u64,
    /// Serialized size of the whole block in bytes
    pub size: usize,
}

impl BlockSummary {
    /// Parse the header and the transaction-count VarInt
    ///
    /// Transactions themselves are not parsed. A block must contain at least
    /// its coinbase transaction.
    pub fn parse(block: &[u8]) -> Result<Self, BlockParseError> {
        let header = deserialize_block_header(block)?;
        let (tx_count, _) = decode_varint(&block[BLOCK_HEADER_SIZE..])?;
        if tx_count == 0 {
            return Err(BlockParseError::InvalidTransactionCount(tx_count));
        }
        Ok(Self {
            header,
            tx_count,
            size: block.len(),
        })
    }

    pub fn block_id(&self) -> String {
        self.header.block_id()
    }
}
