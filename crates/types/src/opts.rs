use alloy::{
    primitives::{Bytes, TxHash},
    rpc::types::mev::EthSendBundle,
};

/// Optional parameters for `eth_sendBundle`.
///
/// All fields default to unset. Builder-style `with_*` methods are
/// provided for ergonomic construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleOpts {
    /// Unix timestamp from which the bundle becomes valid.
    pub min_timestamp: Option<u64>,
    /// Unix timestamp until which the bundle stays valid.
    pub max_timestamp: Option<u64>,
    /// Hashes of transactions in the bundle that are allowed to revert.
    pub reverting_tx_hashes: Vec<TxHash>,
    /// UUID that can be used to cancel or replace the bundle later.
    pub replacement_uuid: Option<String>,
}

impl BundleOpts {
    /// Set the minimum timestamp.
    pub const fn with_min_timestamp(mut self, min_timestamp: u64) -> Self {
        self.min_timestamp = Some(min_timestamp);
        self
    }

    /// Set the maximum timestamp.
    pub const fn with_max_timestamp(mut self, max_timestamp: u64) -> Self {
        self.max_timestamp = Some(max_timestamp);
        self
    }

    /// Set the hashes of transactions allowed to revert.
    pub fn with_reverting_tx_hashes(mut self, hashes: impl Into<Vec<TxHash>>) -> Self {
        self.reverting_tx_hashes = hashes.into();
        self
    }

    /// Set the replacement UUID.
    pub fn with_replacement_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.replacement_uuid = Some(uuid.into());
        self
    }

    /// Set a freshly generated v4 replacement UUID.
    pub fn with_new_replacement_uuid(self) -> Self {
        self.with_replacement_uuid(uuid::Uuid::new_v4().to_string())
    }

    /// Assemble an [`EthSendBundle`] from these options, the raw signed
    /// transactions, and the target block number.
    pub fn into_bundle(self, txs: Vec<Bytes>, block_number: u64) -> EthSendBundle {
        EthSendBundle {
            txs,
            block_number,
            min_timestamp: self.min_timestamp,
            max_timestamp: self.max_timestamp,
            reverting_tx_hashes: self.reverting_tx_hashes,
            replacement_uuid: self.replacement_uuid,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloy::primitives::B256;

    #[test]
    fn opts_into_bundle() {
        let opts = BundleOpts::default()
            .with_min_timestamp(2)
            .with_max_timestamp(3)
            .with_reverting_tx_hashes(vec![B256::repeat_byte(4)])
            .with_replacement_uuid("uuid");

        let bundle = opts.into_bundle(vec![b"tx1".into(), b"tx2".into()], 1);

        assert_eq!(bundle.txs, vec![Bytes::from(b"tx1"), Bytes::from(b"tx2")]);
        assert_eq!(bundle.block_number, 1);
        assert_eq!(bundle.min_timestamp, Some(2));
        assert_eq!(bundle.max_timestamp, Some(3));
        assert_eq!(bundle.reverting_tx_hashes, vec![B256::repeat_byte(4)]);
        assert_eq!(bundle.replacement_uuid.as_deref(), Some("uuid"));
    }

    #[test]
    fn generated_replacement_uuids_differ() {
        let a = BundleOpts::default().with_new_replacement_uuid();
        let b = BundleOpts::default().with_new_replacement_uuid();
        assert_ne!(a.replacement_uuid, b.replacement_uuid);
    }
}
