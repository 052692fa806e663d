use alloy::{
    network::EthereumWallet,
    primitives::{keccak256, Bytes, TxHash},
    rpc::types::{Transaction, TransactionRequest},
};

/// A single entry in a bundle, in one of the three shapes the relay
/// tooling accepts.
///
/// The enum is closed on purpose: every entry is either already signed
/// bytes, an unsigned transaction paired with the wallet that will sign
/// it, or a fully decoded signed transaction to be re-encoded verbatim.
#[derive(Debug, Clone)]
pub enum BundleItem {
    /// Opaque pre-signed transaction bytes, passed through untouched.
    Raw {
        /// The EIP-2718 encoded signed transaction.
        tx: Bytes,
    },
    /// An unsigned transaction and the wallet that signs it.
    ///
    /// Missing `nonce` and `gas` fields are completed by the engine
    /// before signing. Fee fields must be supplied by the caller.
    Unsigned {
        /// The unsigned transaction fields.
        tx: TransactionRequest,
        /// The wallet providing the sender address and signature.
        wallet: EthereumWallet,
    },
    /// A fully decoded signed transaction, as returned by
    /// `eth_getTransactionByHash`.
    ///
    /// The carried envelope is re-encoded deterministically and its
    /// keccak256 hash is checked against the declared hash before it
    /// is admitted into a bundle.
    Decoded {
        /// The decoded transaction, including signature and hash.
        tx: Transaction,
    },
}

impl BundleItem {
    /// Create a [`BundleItem::Raw`] from signed transaction bytes.
    pub fn raw(tx: impl Into<Bytes>) -> Self {
        Self::Raw { tx: tx.into() }
    }

    /// Create a [`BundleItem::Unsigned`] from a transaction request and
    /// the wallet that will sign it.
    pub const fn unsigned(tx: TransactionRequest, wallet: EthereumWallet) -> Self {
        Self::Unsigned { tx, wallet }
    }

    /// Create a [`BundleItem::Decoded`] from a decoded transaction.
    pub const fn decoded(tx: Transaction) -> Self {
        Self::Decoded { tx }
    }
}

/// A raw signed transaction and its hash.
///
/// The hash is the keccak256 of the raw bytes, computed once at
/// construction. Bundle order is significant, so these are always kept
/// in the order the caller supplied them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTx {
    /// The EIP-2718 encoded signed transaction.
    pub raw: Bytes,
    /// keccak256 of the raw bytes.
    pub hash: TxHash,
}

impl SignedTx {
    /// Create a new [`SignedTx`], deriving the hash from the bytes.
    pub fn new(raw: impl Into<Bytes>) -> Self {
        let raw = raw.into();
        let hash = keccak256(&raw);
        Self { raw, hash }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn signed_tx_hash_is_keccak_of_bytes() {
        let tx = SignedTx::new(b"some signed tx".as_slice());
        assert_eq!(tx.hash, keccak256(b"some signed tx"));
    }
}
