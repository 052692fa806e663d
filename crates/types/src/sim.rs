use crate::SignedTx;
use alloy::{
    primitives::{Bytes, B256, U256},
    rpc::types::mev::{EthCallBundleResponse, EthCallBundleTransactionResult},
};
use serde::{Deserialize, Serialize};

/// Result of simulating a bundle via `eth_callBundle`.
///
/// Carries the relay's per-transaction results together with the raw
/// signed transactions that were simulated, so callers can submit the
/// exact same bundle afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatedBundle {
    /// The relay-computed hash of the simulated bundle.
    pub bundle_hash: B256,
    /// Total balance change of the coinbase across the bundle.
    pub coinbase_diff: U256,
    /// Per-transaction simulation results, in bundle order.
    pub results: Vec<EthCallBundleTransactionResult>,
    /// The raw signed transactions that were simulated, in bundle order.
    pub signed_transactions: Vec<Bytes>,
    /// Sum of the gas used by each transaction in `results`.
    pub total_gas_used: u64,
}

impl SimulatedBundle {
    /// Build a [`SimulatedBundle`] from the relay response and the
    /// signed transactions that were submitted for simulation.
    ///
    /// `total_gas_used` is recomputed as the sum over `results` rather
    /// than taken from the response.
    pub fn new(response: EthCallBundleResponse, signed: Vec<SignedTx>) -> Self {
        let total_gas_used = response.results.iter().map(|result| result.gas_used).sum();
        Self {
            bundle_hash: response.bundle_hash,
            coinbase_diff: response.coinbase_diff,
            results: response.results,
            signed_transactions: signed.into_iter().map(|tx| tx.raw).collect(),
            total_gas_used,
        }
    }
}
