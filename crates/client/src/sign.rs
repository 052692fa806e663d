//! Bundle signing: turning heterogeneous bundle items into an ordered
//! list of raw signed transactions.

use crate::{decode::decode_signed_tx, BundleSignError, ChainReader, Flashbots};
use alloy::{
    consensus::Transaction as _,
    eips::eip2718::Encodable2718,
    network::{Ethereum, NetworkWallet, TransactionBuilder},
    primitives::{keccak256, Address, Bytes},
};
use flashbots_types::{BundleItem, SignedTx};
use std::collections::HashMap;
use tracing::instrument;

impl<R: ChainReader> Flashbots<R> {
    /// Produce the ordered list of raw signed transactions for a
    /// bundle.
    ///
    /// A nonce ledger scoped to this call keeps per-sender nonces
    /// sequential across mixed item shapes: signed entries (raw or
    /// decoded) seed the ledger from their own nonce, and unsigned
    /// entries without an explicit nonce draw from the ledger, falling
    /// back to the sender's chain transaction count on first use.
    ///
    /// Items are processed in order and never reordered or
    /// deduplicated; the i-th output corresponds to the i-th input.
    #[instrument(skip_all, fields(items = items.len()))]
    pub async fn sign_bundle(
        &self,
        items: &[BundleItem],
    ) -> Result<Vec<SignedTx>, BundleSignError> {
        let mut nonces: HashMap<Address, u64> = HashMap::new();
        let mut signed = Vec::with_capacity(items.len());

        for item in items {
            match item {
                BundleItem::Raw { tx } => {
                    let decoded = decode_signed_tx(tx)?;
                    nonces.insert(decoded.signer(), decoded.nonce() + 1);
                    signed.push(SignedTx::new(tx.clone()));
                }
                BundleItem::Unsigned { tx, wallet } => {
                    let mut tx = tx.clone();
                    let from = NetworkWallet::<Ethereum>::default_signer_address(wallet);
                    tx.set_from(from);

                    let nonce = match tx.nonce {
                        Some(nonce) => nonce,
                        None => match nonces.get(&from) {
                            Some(next) => *next,
                            None => self.reader().transaction_count(from).await?,
                        },
                    };
                    tx.set_nonce(nonce);
                    nonces.insert(from, nonce + 1);

                    if tx.gas.is_none() {
                        let gas = self.reader().estimate_gas(&tx).await?;
                        tx.set_gas_limit(gas);
                    }

                    let envelope = tx.build(wallet).await?;
                    signed.push(SignedTx::new(envelope.encoded_2718()));
                }
                BundleItem::Decoded { tx } => {
                    let raw: Bytes = tx.inner.encoded_2718().into();
                    let actual = keccak256(&raw);
                    let expected = *tx.inner.tx_hash();
                    if actual != expected {
                        return Err(BundleSignError::HashMismatch { expected, actual });
                    }

                    nonces.insert(tx.inner.signer(), tx.inner.nonce() + 1);
                    signed.push(SignedTx { raw, hash: expected });
                }
            }
        }

        Ok(signed)
    }
}
