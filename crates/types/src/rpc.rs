//! Param and response objects for the relay RPC methods that alloy's
//! MEV types do not cover.

use alloy::primitives::{Bytes, TxHash, B256, U64};
use serde::{Deserialize, Serialize};

/// Params object for `eth_cancelBundle`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelBundleParams {
    /// The replacement UUID of the bundle(s) to cancel.
    pub replacement_uuid: String,
}

/// Params object for `eth_sendPrivateTransaction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivateTxParams {
    /// The raw signed transaction.
    pub tx: Bytes,
    /// Highest block number the transaction may be included in.
    pub max_block_number: u64,
}

/// Params object for `eth_cancelPrivateTransaction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelPrivateTxParams {
    /// Hash of the private transaction to cancel.
    pub tx_hash: TxHash,
}

/// Params object for `flashbots_getUserStats` and
/// `flashbots_getUserStatsV2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatsParams {
    /// A recent block number, hex-quantity encoded.
    pub block_number: U64,
}

/// Params object for `flashbots_getBundleStats` and
/// `flashbots_getBundleStatsV2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleStatsParams {
    /// Hash of the bundle to look up.
    pub bundle_hash: B256,
    /// The bundle's target block number, hex-quantity encoded.
    pub block_number: U64,
}

/// Response for `eth_sendBundle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendBundleResponse {
    /// The relay-computed hash of the sent bundle.
    pub bundle_hash: B256,
}
