use alloy::{
    consensus::crypto::RecoveryError,
    eips::eip2718::Eip2718Error,
    network::{Ethereum, TransactionBuilderError},
    primitives::B256,
    transports::TransportError,
};
use flashbots_relay::RelayError;

/// Errors that can occur while signing a bundle.
#[derive(Debug, thiserror::Error)]
pub enum BundleSignError {
    /// A raw entry was empty.
    #[error("empty raw transaction")]
    EmptyRawTx,

    /// A raw entry's leading byte is neither a legacy RLP header nor a
    /// known typed-transaction discriminant.
    #[error("unknown transaction type: {0}")]
    UnknownTxType(u8),

    /// A raw entry could not be decoded.
    #[error(transparent)]
    Decode(#[from] Eip2718Error),

    /// The sender could not be recovered from a signature.
    #[error(transparent)]
    Recovery(#[from] RecoveryError),

    /// A decoded entry's re-encoded bytes hash to something other than
    /// its declared hash. Guards against tampered or mis-decoded replay
    /// input.
    #[error("re-encoded transaction hash {actual} does not match declared hash {expected}")]
    HashMismatch {
        /// The hash declared by the decoded transaction.
        expected: B256,
        /// keccak256 of the re-encoded bytes.
        actual: B256,
    },

    /// An unsigned entry could not be completed or signed.
    #[error(transparent)]
    Build(#[from] TransactionBuilderError<Ethereum>),

    /// A chain read (transaction count, gas estimate) failed.
    #[error(transparent)]
    Chain(#[from] TransportError),
}

/// Errors returned by [`Flashbots`] operations.
///
/// [`Flashbots`]: crate::Flashbots
#[derive(Debug, thiserror::Error)]
pub enum FlashbotsError {
    /// Bundles must contain at least one transaction.
    #[error("bundle must contain at least one transaction")]
    EmptyBundle,

    /// Signing the bundle failed.
    #[error(transparent)]
    Sign(#[from] BundleSignError),

    /// The relay rejected the request or could not be reached.
    #[error(transparent)]
    Relay(#[from] RelayError),

    /// A chain read failed.
    #[error(transparent)]
    Chain(#[from] TransportError),

    /// A timestamp was requested for a block below the current head.
    /// Simulating against a past block cannot use future-timestamp
    /// extrapolation; pass an explicit timestamp instead.
    #[error("cannot extrapolate a timestamp for block {target_block} behind head {head_block}")]
    NegativeExtrapolation {
        /// The requested target block.
        target_block: u64,
        /// The chain head at the time of the call.
        head_block: u64,
    },

    /// The head block could not be fetched for timestamp extrapolation.
    #[error("block {0} not found")]
    BlockNotFound(u64),
}
