//! Configuration for put-blocks decoding
//!
//! Limits applied to untrusted input on top of the structural checks the
//! decoder always performs. The defaults accept anything the wire format can
//! express; a service facing the public network should tighten them. Settings
//! can be loaded from JSON or built programmatically.

use serde::{Deserialize, Serialize};

/// Decode limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeConfig {
    /// Maximum number of records accepted in one batch
    /// Default: u32::MAX (the largest count an array32 header can declare)
    #[serde(default = "default_max_records")]
    pub max_records: usize,

    /// Maximum size of a single block payload in bytes
    /// Default: u32::MAX (the largest length a bin32 header can declare)
    #[serde(default = "default_max_block_size")]
    pub max_block_size: usize,

    /// Accept bytes after the last record instead of failing
    /// Default: false
    #[serde(default)]
    pub allow_trailing_bytes: bool,
}

fn default_max_records() -> usize {
    u32::MAX as usize
}

fn default_max_block_size() -> usize {
    u32::MAX as usize
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            max_records: default_max_records(),
            max_block_size: default_max_block_size(),
            allow_trailing_bytes: false,
        }
    }
}

impl DecodeConfig {
    /// Limits sized for mainnet blocks: 4 MB payloads
    pub fn mainnet() -> Self {
        Self {
            max_block_size: crate::serialization::block::MAX_BLOCK_SERIALIZED_SIZE,
            ..Self::default()
        }
    }

    /// Load from a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_max_records(mut self, max_records: usize) -> Self {
        self.max_records = max_records;
        self
    }

    pub fn with_max_block_size(mut self, max_block_size: usize) -> Self {
        self.max_block_size = max_block_size;
        self
    }

    pub fn with_trailing_bytes(mut self, allow: bool) -> Self {
        self.allow_trailing_bytes = allow;
        self
    }
}
