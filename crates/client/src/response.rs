//! Inclusion trackers returned by bundle and private-transaction
//! submission.

use crate::{ChainReader, Sleeper, YieldSleeper, POLL_INTERVAL};
use alloy::{
    primitives::{Keccak256, B256},
    rpc::types::TransactionReceipt,
    transports::TransportResult,
};
use flashbots_types::SignedTx;
use tracing::debug;

/// Terminal states of a tracked private transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivateTxStatus {
    /// The transaction was found on chain.
    Mined,
    /// The chain passed `max_block_number` without the transaction
    /// appearing. An expected outcome, not a fault.
    Expired,
}

/// Tracks a submitted bundle until its target block is reached.
///
/// Holds no timeout of its own: `wait` polls until the chain reaches
/// the target block, however long that takes. Callers needing a hard
/// deadline should wrap the call in an external cancellation boundary.
#[derive(Debug)]
pub struct BundleResponse<'a, R, S = YieldSleeper> {
    reader: &'a R,
    txs: Vec<SignedTx>,
    target_block: u64,
    sleeper: S,
}

impl<'a, R> BundleResponse<'a, R> {
    /// Create a tracker for `txs` targeting `target_block`.
    pub const fn new(reader: &'a R, txs: Vec<SignedTx>, target_block: u64) -> Self {
        Self { reader, txs, target_block, sleeper: YieldSleeper }
    }
}

impl<'a, R, S> BundleResponse<'a, R, S> {
    /// Replace the suspension primitive used between polls.
    pub fn with_sleeper<S2: Sleeper>(self, sleeper: S2) -> BundleResponse<'a, R, S2> {
        BundleResponse {
            reader: self.reader,
            txs: self.txs,
            target_block: self.target_block,
            sleeper,
        }
    }

    /// The signed transactions in this bundle, in bundle order.
    pub fn txs(&self) -> &[SignedTx] {
        &self.txs
    }

    /// The block this bundle targets.
    pub const fn target_block(&self) -> u64 {
        self.target_block
    }

    /// The bundle hash: keccak256 over the concatenated transaction
    /// hashes, in bundle order. Reordering the same transactions yields
    /// a different hash.
    pub fn bundle_hash(&self) -> B256 {
        let mut hasher = Keccak256::new();
        for tx in &self.txs {
            hasher.update(tx.hash);
        }
        hasher.finalize()
    }
}

impl<R: ChainReader, S: Sleeper> BundleResponse<'_, R, S> {
    /// Wait until the chain reaches the target block.
    ///
    /// Returns immediately, without sleeping, if the head is already at
    /// or past the target.
    pub async fn wait(&self) -> TransportResult<()> {
        loop {
            let head = self.reader.block_number().await?;
            if head >= self.target_block {
                debug!(head, target_block = self.target_block, "bundle target block reached");
                return Ok(());
            }
            self.sleeper.sleep(POLL_INTERVAL).await;
        }
    }

    /// Wait for the target block, then fetch one receipt per bundle
    /// transaction, in bundle order.
    ///
    /// A `None` entry means that transaction was not included, which is
    /// normal: inclusion is checked per hash even though the bundle
    /// executes atomically.
    pub async fn receipts(&self) -> TransportResult<Vec<Option<TransactionReceipt>>> {
        self.wait().await?;

        let mut receipts = Vec::with_capacity(self.txs.len());
        for tx in &self.txs {
            receipts.push(self.reader.transaction_receipt(tx.hash).await?);
        }
        Ok(receipts)
    }
}

/// Tracks a submitted private transaction until it is mined or its
/// validity window passes.
#[derive(Debug)]
pub struct PrivateTxResponse<'a, R, S = YieldSleeper> {
    reader: &'a R,
    tx: SignedTx,
    max_block_number: u64,
    sleeper: S,
}

impl<'a, R> PrivateTxResponse<'a, R> {
    /// Create a tracker for `tx`, valid through `max_block_number`.
    pub const fn new(reader: &'a R, tx: SignedTx, max_block_number: u64) -> Self {
        Self { reader, tx, max_block_number, sleeper: YieldSleeper }
    }
}

impl<'a, R, S> PrivateTxResponse<'a, R, S> {
    /// Replace the suspension primitive used between polls.
    pub fn with_sleeper<S2: Sleeper>(self, sleeper: S2) -> PrivateTxResponse<'a, R, S2> {
        PrivateTxResponse {
            reader: self.reader,
            tx: self.tx,
            max_block_number: self.max_block_number,
            sleeper,
        }
    }

    /// The tracked signed transaction.
    pub const fn tx(&self) -> &SignedTx {
        &self.tx
    }

    /// The last block the relay may include the transaction in.
    pub const fn max_block_number(&self) -> u64 {
        self.max_block_number
    }
}

impl<R: ChainReader, S: Sleeper> PrivateTxResponse<'_, R, S> {
    /// Poll until the transaction is found on chain or the validity
    /// window passes.
    ///
    /// A lookup that comes back empty is an expected answer while the
    /// window is open; only a definitive outcome is returned.
    pub async fn wait(&self) -> TransportResult<PrivateTxStatus> {
        loop {
            if self.reader.transaction_by_hash(self.tx.hash).await?.is_some() {
                debug!(tx_hash = %self.tx.hash, "private transaction mined");
                return Ok(PrivateTxStatus::Mined);
            }
            if self.reader.block_number().await? > self.max_block_number {
                debug!(
                    tx_hash = %self.tx.hash,
                    max_block_number = self.max_block_number,
                    "private transaction expired"
                );
                return Ok(PrivateTxStatus::Expired);
            }
            self.sleeper.sleep(POLL_INTERVAL).await;
        }
    }

    /// Wait for an outcome, then return the receipt if the transaction
    /// was mined. Expiry yields `Ok(None)`, never an error.
    pub async fn receipt(&self) -> TransportResult<Option<TransactionReceipt>> {
        match self.wait().await? {
            PrivateTxStatus::Mined => self.reader.transaction_receipt(self.tx.hash).await,
            PrivateTxStatus::Expired => Ok(None),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloy::{
        consensus::{transaction::Recovered, SignableTransaction, TxEip1559, TxEnvelope},
        primitives::{keccak256, Address, TxHash, TxKind, B256, U256},
        rpc::types::{Transaction, TransactionRequest},
        signers::{local::PrivateKeySigner, SignerSync},
    };
    use async_trait::async_trait;
    use std::{
        sync::atomic::{AtomicU64, AtomicUsize, Ordering},
        time::Duration,
    };

    /// Reader whose head advances by one on every height query.
    #[derive(Debug)]
    struct SteppingReader {
        head: AtomicU64,
        /// Head at which the tracked transaction becomes visible, if
        /// any.
        mined_at: Option<u64>,
        tx: Option<Transaction>,
        head_calls: AtomicUsize,
    }

    impl SteppingReader {
        fn new(head: u64) -> Self {
            Self { head: AtomicU64::new(head), mined_at: None, tx: None, head_calls: AtomicUsize::new(0) }
        }

        fn current(&self) -> u64 {
            self.head.load(Ordering::Relaxed)
        }
    }

    #[async_trait]
    impl ChainReader for SteppingReader {
        async fn block_number(&self) -> TransportResult<u64> {
            self.head_calls.fetch_add(1, Ordering::Relaxed);
            Ok(self.head.fetch_add(1, Ordering::Relaxed))
        }

        async fn block_timestamp(&self, _number: u64) -> TransportResult<Option<u64>> {
            Ok(None)
        }

        async fn transaction_count(&self, _address: Address) -> TransportResult<u64> {
            Ok(0)
        }

        async fn estimate_gas(&self, _tx: &TransactionRequest) -> TransportResult<u64> {
            Ok(21_000)
        }

        async fn transaction_by_hash(
            &self,
            _hash: TxHash,
        ) -> TransportResult<Option<Transaction>> {
            match self.mined_at {
                Some(at) if self.current() >= at => Ok(self.tx.clone()),
                _ => Ok(None),
            }
        }

        async fn transaction_receipt(
            &self,
            _hash: TxHash,
        ) -> TransportResult<Option<TransactionReceipt>> {
            Ok(None)
        }
    }

    /// Sleeper that panics if any poll actually sleeps.
    #[derive(Debug, Clone, Copy)]
    struct NoSleep;

    #[async_trait]
    impl Sleeper for NoSleep {
        async fn sleep(&self, _interval: Duration) {
            panic!("tracker slept when it should have resolved immediately");
        }
    }

    /// Sleeper that yields instantly, for multi-poll tests.
    #[derive(Debug, Clone, Copy)]
    struct InstantSleep;

    #[async_trait]
    impl Sleeper for InstantSleep {
        async fn sleep(&self, _interval: Duration) {}
    }

    fn signed(byte: u8) -> SignedTx {
        SignedTx::new(vec![byte; 8])
    }

    fn mined_tx() -> Transaction {
        let key = PrivateKeySigner::from_bytes(&B256::repeat_byte(1)).unwrap();
        let tx = TxEip1559 {
            chain_id: 1,
            nonce: 0,
            gas_limit: 21_000,
            max_fee_per_gas: 100,
            max_priority_fee_per_gas: 1,
            to: TxKind::Call(Address::repeat_byte(9)),
            value: U256::from(10),
            ..Default::default()
        };
        let signature = key.sign_hash_sync(&tx.signature_hash()).unwrap();
        let envelope = TxEnvelope::from(tx.into_signed(signature));
        let signer = key.address();
        Transaction {
            inner: Recovered::new_unchecked(envelope, signer),
            block_hash: None,
            block_number: None,
            transaction_index: None,
            effective_gas_price: None,
        }
    }

    #[test]
    fn bundle_hash_is_order_sensitive() {
        let reader = SteppingReader::new(0);
        let (a, b) = (signed(1), signed(2));

        let forward = BundleResponse::new(&reader, vec![a.clone(), b.clone()], 10);
        let reverse = BundleResponse::new(&reader, vec![b.clone(), a.clone()], 10);

        let mut concat = a.hash.to_vec();
        concat.extend_from_slice(b.hash.as_slice());
        assert_eq!(forward.bundle_hash(), keccak256(concat));
        assert_ne!(forward.bundle_hash(), reverse.bundle_hash());

        // Deterministic across trackers with the same contents.
        let again = BundleResponse::new(&reader, vec![a, b], 10);
        assert_eq!(forward.bundle_hash(), again.bundle_hash());
    }

    #[tokio::test]
    async fn wait_returns_immediately_at_target() {
        let reader = SteppingReader::new(100);
        let tracker =
            BundleResponse::new(&reader, vec![signed(1)], 100).with_sleeper(NoSleep);

        tracker.wait().await.unwrap();
        assert_eq!(reader.head_calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn wait_polls_until_target_reached() {
        let reader = SteppingReader::new(97);
        let tracker =
            BundleResponse::new(&reader, vec![signed(1)], 100).with_sleeper(InstantSleep);

        tracker.wait().await.unwrap();
        // Heads observed: 97, 98, 99, 100.
        assert_eq!(reader.head_calls.load(Ordering::Relaxed), 4);
    }

    #[tokio::test]
    async fn receipts_come_back_in_bundle_order() {
        let reader = SteppingReader::new(100);
        let txs = vec![signed(1), signed(2), signed(3)];
        let tracker = BundleResponse::new(&reader, txs, 100).with_sleeper(NoSleep);

        let receipts = tracker.receipts().await.unwrap();
        assert_eq!(receipts.len(), 3);
        assert!(receipts.iter().all(Option::is_none));
    }

    #[tokio::test]
    async fn private_tx_expires_with_empty_receipt() {
        let reader = SteppingReader::new(126);
        let tracker =
            PrivateTxResponse::new(&reader, signed(1), 125).with_sleeper(NoSleep);

        assert_eq!(tracker.wait().await.unwrap(), PrivateTxStatus::Expired);

        let reader = SteppingReader::new(126);
        let tracker =
            PrivateTxResponse::new(&reader, signed(1), 125).with_sleeper(NoSleep);
        assert_eq!(tracker.receipt().await.unwrap(), None);
    }

    #[tokio::test]
    async fn private_tx_mines_after_polling() {
        let mut reader = SteppingReader::new(100);
        reader.mined_at = Some(103);
        reader.tx = Some(mined_tx());

        let tracker =
            PrivateTxResponse::new(&reader, signed(1), 125).with_sleeper(InstantSleep);
        assert_eq!(tracker.wait().await.unwrap(), PrivateTxStatus::Mined);
    }

    #[tokio::test]
    async fn private_tx_pending_keeps_polling_until_deadline() {
        let reader = SteppingReader::new(120);
        let tracker =
            PrivateTxResponse::new(&reader, signed(1), 125).with_sleeper(InstantSleep);

        assert_eq!(tracker.wait().await.unwrap(), PrivateTxStatus::Expired);
        // Polled the head until it passed the deadline.
        assert!(reader.head_calls.load(Ordering::Relaxed) > 1);
    }
}
