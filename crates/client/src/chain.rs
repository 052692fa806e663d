use alloy::{
    primitives::{Address, TxHash},
    providers::Provider,
    rpc::types::{Transaction, TransactionReceipt, TransactionRequest},
    transports::TransportResult,
};
use async_trait::async_trait;

/// The chain-state reads this library needs from a node.
///
/// Implemented for every alloy [`Provider`], so a normal RPC provider
/// can be passed directly to [`Flashbots`]. The trait exists so tests
/// and embedders can supply their own view of chain state.
///
/// [`Flashbots`]: crate::Flashbots
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Current chain head block number.
    async fn block_number(&self) -> TransportResult<u64>;

    /// Timestamp of the block at `number`, if the block is known.
    async fn block_timestamp(&self, number: u64) -> TransportResult<Option<u64>>;

    /// Number of transactions ever sent by `address`, i.e. its next
    /// nonce.
    async fn transaction_count(&self, address: Address) -> TransportResult<u64>;

    /// Estimate the gas limit for an unsigned transaction.
    async fn estimate_gas(&self, tx: &TransactionRequest) -> TransportResult<u64>;

    /// Look up a transaction by hash. `None` means not (yet) known to
    /// the node, which is an expected answer while polling.
    async fn transaction_by_hash(&self, hash: TxHash) -> TransportResult<Option<Transaction>>;

    /// Look up a transaction receipt by hash.
    async fn transaction_receipt(
        &self,
        hash: TxHash,
    ) -> TransportResult<Option<TransactionReceipt>>;
}

#[async_trait]
impl<P> ChainReader for P
where
    P: Provider,
{
    async fn block_number(&self) -> TransportResult<u64> {
        self.get_block_number().await
    }

    async fn block_timestamp(&self, number: u64) -> TransportResult<Option<u64>> {
        let block = self.get_block_by_number(number.into()).await?;
        Ok(block.map(|block| block.header.timestamp))
    }

    async fn transaction_count(&self, address: Address) -> TransportResult<u64> {
        self.get_transaction_count(address).await
    }

    async fn estimate_gas(&self, tx: &TransactionRequest) -> TransportResult<u64> {
        Provider::estimate_gas(self, tx.clone()).await
    }

    async fn transaction_by_hash(&self, hash: TxHash) -> TransportResult<Option<Transaction>> {
        self.get_transaction_by_hash(hash).await
    }

    async fn transaction_receipt(
        &self,
        hash: TxHash,
    ) -> TransportResult<Option<TransactionReceipt>> {
        self.get_transaction_receipt(hash).await
    }
}
