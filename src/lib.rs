//! # btcindexer-wire
//!
//! Byte-exact codec for the batches of Bitcoin blocks a relayer submits to
//! the nBTC indexer (`PUT /bitcoin/blocks`).
//!
//! A batch is a MessagePack array of `{height: int64, block: bin}` maps. The
//! encoding is written and parsed by hand over this closed schema so that it
//! interoperates with the indexer's own encoder and decoder, always picks the
//! smallest header class (one byte representation per batch), and parses
//! untrusted bodies without trusting embedded lengths.
//!
//! ## Usage
//!
//! ```rust
//! use btcindexer_wire::{decode, encode, encoded_len, PutBlock};
//!
//! let batch = vec![PutBlock::new(156, vec![0x01, 0x02])];
//! let bytes = encode(&batch);
//! assert_eq!(bytes.len(), encoded_len(&batch));
//! assert_eq!(decode(&bytes).unwrap(), batch);
//! ```
//!
//! Decoding either returns every record or a [`DecodeError`] naming the
//! record and field that failed; there is no partial result.
//! [`decode_borrowed`] avoids copying block payloads by returning views into
//! the input.

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod serialization;
pub mod types;

pub use config::DecodeConfig;
pub use error::{BlockParseError, DecodeError, DecodeErrorKind, Field};
pub use serialization::{
    decode, decode_borrowed, decode_borrowed_with, decode_with, encode, encode_into, encoded_len,
    BlockHeader, BlockSummary,
};
pub use types::{BlockSubmission, PutBlock, PutBlockRef, PutBlocks};
