//! Put-blocks request types

use crate::error::BlockParseError;
use crate::serialization::block::BlockSummary;

/// Bitcoin block height as carried on the wire
pub type Height = i64;

/// Byte string type
pub type ByteString = Vec<u8>;

/// One block submission: a height and Bitcoin Core's serialization of the
/// block at that height
///
/// The codec treats `block` as opaque bytes. Use [`PutBlock::summary`] to
/// parse it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PutBlock {
    pub height: Height,
    pub block: ByteString,
}

impl PutBlock {
    pub fn new(height: Height, block: impl Into<ByteString>) -> Self {
        Self {
            height,
            block: block.into(),
        }
    }

    pub fn as_borrowed(&self) -> PutBlockRef<'_> {
        PutBlockRef {
            height: self.height,
            block: &self.block,
        }
    }

    /// Parse the header and transaction count of the carried block
    pub fn summary(&self) -> Result<BlockSummary, BlockParseError> {
        BlockSummary::parse(&self.block)
    }
}

/// A put-block whose payload borrows from the decoded input buffer
///
/// Produced by [`crate::decode_borrowed`]. The input buffer must outlive it;
/// call [`PutBlockRef::into_owned`] to detach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PutBlockRef<'a> {
    pub height: Height,
    pub block: &'a [u8],
}

impl<'a> PutBlockRef<'a> {
    pub fn new(height: Height, block: &'a [u8]) -> Self {
        Self { height, block }
    }

    pub fn into_owned(self) -> PutBlock {
        PutBlock {
            height: self.height,
            block: self.block.to_vec(),
        }
    }

    pub fn summary(&self) -> Result<BlockSummary, BlockParseError> {
        BlockSummary::parse(self.block)
    }
}

impl From<PutBlockRef<'_>> for PutBlock {
    fn from(r: PutBlockRef<'_>) -> Self {
        r.into_owned()
    }
}

/// Body of a `PUT /bitcoin/blocks` request; order is preserved on the wire
pub type PutBlocks = Vec<PutBlock>;

/// Anything the encoder can write as a put-block record
///
/// Implemented for owned and borrowed records so a batch can be encoded
/// without first copying payloads.
pub trait BlockSubmission {
    fn height(&self) -> Height;
    fn block(&self) -> &[u8];
}

impl BlockSubmission for PutBlock {
    #[inline]
    fn height(&self) -> Height {
        self.height
    }

    #[inline]
    fn block(&self) -> &[u8] {
        &self.block
    }
}

impl BlockSubmission for PutBlockRef<'_> {
    #[inline]
    fn height(&self) -> Height {
        self.height
    }

    #[inline]
    fn block(&self) -> &[u8] {
        self.block
    }
}

impl<T: BlockSubmission + ?Sized> BlockSubmission for &T {
    #[inline]
    fn height(&self) -> Height {
        (**self).height()
    }

    #[inline]
    fn block(&self) -> &[u8] {
        (**self).block()
    }
}
