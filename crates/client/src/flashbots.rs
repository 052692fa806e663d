use crate::{
    BundleResponse, ChainReader, FlashbotsError, PrivateTxResponse,
};
use alloy::{
    eips::BlockNumberOrTag,
    primitives::{Bytes, TxHash, B256, U64},
    rpc::types::mev::{EthCallBundle, EthCallBundleResponse},
};
use flashbots_relay::RelayClient;
use flashbots_types::{
    BundleItem, BundleOpts, BundleStatsParams, CancelBundleParams, CancelPrivateTxParams,
    PrivateTxParams, SendBundleResponse, SignedTx, SimulatedBundle, UserStatsParams,
};
use tracing::{debug, instrument};

const ETH_SEND_BUNDLE: &str = "eth_sendBundle";
const ETH_CALL_BUNDLE: &str = "eth_callBundle";
const ETH_CANCEL_BUNDLE: &str = "eth_cancelBundle";
const ETH_SEND_PRIVATE_TRANSACTION: &str = "eth_sendPrivateTransaction";
const ETH_CANCEL_PRIVATE_TRANSACTION: &str = "eth_cancelPrivateTransaction";
const FLASHBOTS_GET_USER_STATS: &str = "flashbots_getUserStats";
const FLASHBOTS_GET_USER_STATS_V2: &str = "flashbots_getUserStatsV2";
const FLASHBOTS_GET_BUNDLE_STATS: &str = "flashbots_getBundleStats";
const FLASHBOTS_GET_BUNDLE_STATS_V2: &str = "flashbots_getBundleStatsV2";

/// Assumed block interval for timestamp extrapolation.
///
/// Callers targeting chains with a different interval must pass an
/// explicit timestamp to [`Flashbots::simulate`].
pub const SECONDS_PER_BLOCK: u64 = 12;

/// Default validity window for private transactions, in blocks.
/// Roughly five minutes at [`SECONDS_PER_BLOCK`].
pub const PRIVATE_TX_BLOCK_WINDOW: u64 = 25;

/// Bundle engine: signs bundles and drives the relay RPC methods.
///
/// Holds a chain-state reader for nonce/gas completion and inclusion
/// tracking, and a [`RelayClient`] for authenticated submission. Both
/// are passed in at construction; nothing is attached to a host
/// provider at runtime.
///
/// Submission methods return as soon as the relay acknowledges the
/// request. Inclusion is a separate, explicit step via the returned
/// tracker.
#[derive(Debug)]
pub struct Flashbots<R> {
    reader: R,
    relay: RelayClient,
}

impl<R> Flashbots<R> {
    /// Create a new engine from a chain-state reader and a relay
    /// client.
    pub const fn new(reader: R, relay: RelayClient) -> Self {
        Self { reader, relay }
    }

    /// The chain-state reader.
    pub const fn reader(&self) -> &R {
        &self.reader
    }

    /// The relay client.
    pub const fn relay(&self) -> &RelayClient {
        &self.relay
    }
}

impl<R: ChainReader> Flashbots<R> {
    /// Sign `items`, submit them as a bundle targeting `target_block`,
    /// and return a tracker for the bundle's inclusion.
    #[instrument(skip(self, items, opts))]
    pub async fn send_bundle(
        &self,
        items: &[BundleItem],
        target_block: u64,
        opts: BundleOpts,
    ) -> Result<BundleResponse<'_, R>, FlashbotsError> {
        let signed = self.sign_bundle(items).await?;
        self.send_signed_bundle(signed, target_block, opts).await
    }

    /// Submit already-signed raw transactions as a bundle.
    #[instrument(skip(self, txs, opts))]
    pub async fn send_raw_bundle(
        &self,
        txs: Vec<Bytes>,
        target_block: u64,
        opts: BundleOpts,
    ) -> Result<BundleResponse<'_, R>, FlashbotsError> {
        let signed = txs.into_iter().map(SignedTx::new).collect();
        self.send_signed_bundle(signed, target_block, opts).await
    }

    async fn send_signed_bundle(
        &self,
        signed: Vec<SignedTx>,
        target_block: u64,
        opts: BundleOpts,
    ) -> Result<BundleResponse<'_, R>, FlashbotsError> {
        if signed.is_empty() {
            return Err(FlashbotsError::EmptyBundle);
        }

        let bundle = opts.into_bundle(signed.iter().map(|tx| tx.raw.clone()).collect(), target_block);
        let response: SendBundleResponse = self.relay.send(ETH_SEND_BUNDLE, bundle).await?;
        debug!(bundle_hash = %response.bundle_hash, target_block, "relay accepted bundle");

        Ok(BundleResponse::new(&self.reader, signed, target_block))
    }

    /// Cancel all bundles submitted under `replacement_uuid`. Fire and
    /// forget; returns the hashes of the cancelled bundles, if the
    /// relay reports them.
    #[instrument(skip_all)]
    pub async fn cancel_bundles(
        &self,
        replacement_uuid: impl Into<String>,
    ) -> Result<Vec<B256>, FlashbotsError> {
        let params = CancelBundleParams { replacement_uuid: replacement_uuid.into() };
        let hashes = self.relay.send_opt(ETH_CANCEL_BUNDLE, params).await?;
        Ok(hashes.unwrap_or_default())
    }

    /// Simulate already-signed transactions via `eth_callBundle`.
    pub async fn call_bundle(
        &self,
        signed: &[SignedTx],
        block_number: u64,
        state_block_number: u64,
        timestamp: u64,
    ) -> Result<EthCallBundleResponse, FlashbotsError> {
        let bundle = EthCallBundle {
            txs: signed.iter().map(|tx| tx.raw.clone()).collect(),
            block_number,
            state_block_number: BlockNumberOrTag::Number(state_block_number),
            timestamp: Some(timestamp),
            ..Default::default()
        };
        self.relay.send(ETH_CALL_BUNDLE, bundle).await.map_err(Into::into)
    }

    /// Sign `items` and simulate them against a hypothetical block.
    ///
    /// `block_tag` defaults to the current head, `state_block_tag` to
    /// the block before the simulated one, and `block_timestamp` to an
    /// extrapolation from the head block's timestamp at
    /// [`SECONDS_PER_BLOCK`] per block.
    #[instrument(skip(self, items))]
    pub async fn simulate(
        &self,
        items: &[BundleItem],
        block_tag: Option<u64>,
        state_block_tag: Option<u64>,
        block_timestamp: Option<u64>,
    ) -> Result<SimulatedBundle, FlashbotsError> {
        if items.is_empty() {
            return Err(FlashbotsError::EmptyBundle);
        }

        let head = self.reader.block_number().await?;
        let block_number = block_tag.unwrap_or(head);
        let state_block_number = state_block_tag.unwrap_or_else(|| block_number.saturating_sub(1));
        let timestamp = match block_timestamp {
            Some(timestamp) => timestamp,
            None => self.extrapolate_timestamp(block_number, head).await?,
        };

        let signed = self.sign_bundle(items).await?;
        debug!(block_number, state_block_number, timestamp, "simulating bundle");
        let response = self.call_bundle(&signed, block_number, state_block_number, timestamp).await?;

        Ok(SimulatedBundle::new(response, signed))
    }

    /// Extrapolate the timestamp of `target_block` from the timestamp
    /// of `head_block`, assuming [`SECONDS_PER_BLOCK`].
    ///
    /// Fails if `target_block` is behind `head_block`: projecting a
    /// future timestamp onto a past block is a caller error.
    pub async fn extrapolate_timestamp(
        &self,
        target_block: u64,
        head_block: u64,
    ) -> Result<u64, FlashbotsError> {
        if target_block < head_block {
            return Err(FlashbotsError::NegativeExtrapolation { target_block, head_block });
        }

        let head_timestamp = self
            .reader
            .block_timestamp(head_block)
            .await?
            .ok_or(FlashbotsError::BlockNotFound(head_block))?;

        Ok(head_timestamp + (target_block - head_block) * SECONDS_PER_BLOCK)
    }

    /// Sign a single item if needed and submit it as a private
    /// transaction, returning a tracker for its inclusion.
    ///
    /// `max_block_number` bounds how long the relay keeps trying to
    /// include the transaction; it defaults to the current head plus
    /// [`PRIVATE_TX_BLOCK_WINDOW`].
    #[instrument(skip(self, item))]
    pub async fn send_private_transaction(
        &self,
        item: &BundleItem,
        max_block_number: Option<u64>,
    ) -> Result<PrivateTxResponse<'_, R>, FlashbotsError> {
        let mut signed = self.sign_bundle(std::slice::from_ref(item)).await?;
        let signed = signed.pop().ok_or(FlashbotsError::EmptyBundle)?;

        let params = self.private_tx_params(&signed, max_block_number).await?;
        let max_block_number = params.max_block_number;

        let tx_hash: TxHash = self.relay.send(ETH_SEND_PRIVATE_TRANSACTION, params).await?;
        debug!(%tx_hash, max_block_number, "relay accepted private transaction");

        Ok(PrivateTxResponse::new(&self.reader, signed, max_block_number))
    }

    /// Build the params for `eth_sendPrivateTransaction`, resolving the
    /// default validity window against the current head if no explicit
    /// maximum was given.
    async fn private_tx_params(
        &self,
        signed: &SignedTx,
        max_block_number: Option<u64>,
    ) -> Result<PrivateTxParams, FlashbotsError> {
        let max_block_number = match max_block_number {
            Some(max) => max,
            None => self.reader.block_number().await? + PRIVATE_TX_BLOCK_WINDOW,
        };
        Ok(PrivateTxParams { tx: signed.raw.clone(), max_block_number })
    }

    /// Ask the relay to stop trying to include a private transaction.
    /// Fire and forget; returns whether the relay reported success.
    #[instrument(skip(self))]
    pub async fn cancel_private_transaction(
        &self,
        tx_hash: TxHash,
    ) -> Result<bool, FlashbotsError> {
        let params = CancelPrivateTxParams { tx_hash };
        let cancelled = self.relay.send_opt(ETH_CANCEL_PRIVATE_TRANSACTION, params).await?;
        Ok(cancelled.unwrap_or(false))
    }

    /// Fetch this identity's relay reputation stats.
    pub async fn user_stats(&self) -> Result<serde_json::Value, FlashbotsError> {
        self.user_stats_inner(FLASHBOTS_GET_USER_STATS).await
    }

    /// Fetch this identity's relay reputation stats (V2 schema).
    pub async fn user_stats_v2(&self) -> Result<serde_json::Value, FlashbotsError> {
        self.user_stats_inner(FLASHBOTS_GET_USER_STATS_V2).await
    }

    async fn user_stats_inner(
        &self,
        method: &'static str,
    ) -> Result<serde_json::Value, FlashbotsError> {
        let head = self.reader.block_number().await?;
        let params = UserStatsParams { block_number: U64::from(head) };
        self.relay.send(method, params).await.map_err(Into::into)
    }

    /// Fetch the relay's stats for a submitted bundle.
    pub async fn bundle_stats(
        &self,
        bundle_hash: B256,
        block_number: u64,
    ) -> Result<serde_json::Value, FlashbotsError> {
        self.bundle_stats_inner(FLASHBOTS_GET_BUNDLE_STATS, bundle_hash, block_number).await
    }

    /// Fetch the relay's stats for a submitted bundle (V2 schema).
    pub async fn bundle_stats_v2(
        &self,
        bundle_hash: B256,
        block_number: u64,
    ) -> Result<serde_json::Value, FlashbotsError> {
        self.bundle_stats_inner(FLASHBOTS_GET_BUNDLE_STATS_V2, bundle_hash, block_number).await
    }

    async fn bundle_stats_inner(
        &self,
        method: &'static str,
        bundle_hash: B256,
        block_number: u64,
    ) -> Result<serde_json::Value, FlashbotsError> {
        let params = BundleStatsParams { bundle_hash, block_number: U64::from(block_number) };
        self.relay.send(method, params).await.map_err(Into::into)
    }
}
