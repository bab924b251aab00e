//! Indexer HTTP API surface shared with the transport
//!
//! The transport itself lives outside this crate. These are the request
//! constants and the JSON response shapes it exchanges with the indexer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// `PUT` endpoint taking an encoded put-blocks batch
pub const PATH_BLOCKS: &str = "/bitcoin/blocks";

/// `GET` endpoint returning [`LatestHeightResp`]; takes a `network` query
pub const PATH_LATEST_HEIGHT: &str = "/bitcoin/height";

/// `GET` endpoint returning a list of [`NbtcTxStatusResp`]; takes `sender`
/// and `network` queries
pub const PATH_DEPOSITS_BY_SENDER: &str = "/bitcoin/deposits/";

/// Content type of an encoded put-blocks body
pub const CONTENT_TYPE_MSGPACK: &str = "application/msgpack";

/// Value of the `Authorization` header for a bearer token, `None` when no
/// token is configured
pub fn authorization_header(token: &str) -> Option<String> {
    if token.is_empty() {
        None
    } else {
        Some(format!("Bearer {token}"))
    }
}

/// Bitcoin network an indexer query refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
    Regtest,
    Signet,
}

impl Network {
    pub const fn as_str(self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Regtest => "regtest",
            Network::Signet => "signet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response of the latest-height endpoint; `height` is `null` before the
/// indexer has seen any block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LatestHeightResp {
    pub height: Option<i64>,
}

/// Lifecycle of an nBTC deposit as tracked by the indexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NbtcTxStatus {
    Confirming,
    Finalized,
    Minted,
    Failed,
    Reorg,
}

impl NbtcTxStatus {
    pub const ALL: [NbtcTxStatus; 5] = [
        Self::Confirming,
        Self::Finalized,
        Self::Minted,
        Self::Failed,
        Self::Reorg,
    ];

    /// Known status from its JSON name; `None` for states this crate does not know
    pub fn parse(status: &str) -> Option<Self> {
        serde_json::from_value(serde_json::Value::String(status.to_owned())).ok()
    }
}

/// Status of one deposit transaction
///
/// `status` stays a string so states added on the service side do not break
/// deserialization; use [`NbtcTxStatusResp::status`] for the known ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NbtcTxStatusResp {
    pub btc_tx_id: String,
    pub status: String,
    /// Sui transaction that minted the nBTC, once minted
    pub sui_tx_id: Option<String>,
    /// `null` while the transaction is unconfirmed
    pub block_height: Option<i64>,
    pub confirmations: i64,
    pub sui_recipient: String,
    pub amount_sats: i64,
}

impl NbtcTxStatusResp {
    pub fn status(&self) -> Option<NbtcTxStatus> {
        NbtcTxStatus::parse(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_header() {
        assert_eq!(authorization_header(""), None);
        assert_eq!(
            authorization_header("my-secret-token").as_deref(),
            Some("Bearer my-secret-token")
        );
    }

    #[test]
    fn test_latest_height_null_and_value() {
        let resp: LatestHeightResp = serde_json::from_str(r#"{"height":null}"#).unwrap();
        assert_eq!(resp.height, None);

        let resp: LatestHeightResp = serde_json::from_str(r#"{"height":870123}"#).unwrap();
        assert_eq!(resp.height, Some(870123));

        assert_eq!(
            serde_json::to_string(&LatestHeightResp { height: None }).unwrap(),
            r#"{"height":null}"#
        );
    }

    #[test]
    fn test_deposit_status_json() {
        let json = r#"[{
            "btc_tx_id": "ab01",
            "status": "minted",
            "sui_tx_id": "0xfeed",
            "block_height": 156,
            "confirmations": 8,
            "sui_recipient": "0x1234",
            "amount_sats": 150000
        }, {
            "btc_tx_id": "ab02",
            "status": "broadcasting",
            "sui_tx_id": null,
            "block_height": null,
            "confirmations": 0,
            "sui_recipient": "0x5678",
            "amount_sats": 1
        }]"#;
        let deposits: Vec<NbtcTxStatusResp> = serde_json::from_str(json).unwrap();
        assert_eq!(deposits.len(), 2);
        assert_eq!(deposits[0].status(), Some(NbtcTxStatus::Minted));
        assert_eq!(deposits[0].sui_tx_id.as_deref(), Some("0xfeed"));
        assert_eq!(deposits[0].block_height, Some(156));
        assert_eq!(deposits[1].status(), None);
        assert_eq!(deposits[1].block_height, None);

        let back = serde_json::to_string(&deposits).unwrap();
        let again: Vec<NbtcTxStatusResp> = serde_json::from_str(&back).unwrap();
        assert_eq!(again, deposits);
    }

    #[test]
    fn test_status_parse_matches_json_names() {
        for status in NbtcTxStatus::ALL {
            let json = serde_json::to_value(status).unwrap();
            let name = json.as_str().unwrap();
            assert_eq!(name, name.to_lowercase());
            assert_eq!(NbtcTxStatus::parse(name), Some(status));
        }
        assert_eq!(NbtcTxStatus::parse("Minted"), None);
        assert_eq!(NbtcTxStatus::parse("pending"), None);
    }

    #[test]
    fn test_network_strings() {
        assert_eq!(Network::Regtest.to_string(), "regtest");
        assert_eq!(
            serde_json::to_string(&Network::Mainnet).unwrap(),
            r#""mainnet""#
        );
        let net: Network = serde_json::from_str(r#""signet""#).unwrap();
        assert_eq!(net, Network::Signet);
    }
}
