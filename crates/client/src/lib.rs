//! Flashbots client library.
//!
//! Builds, signs, and submits transaction bundles to a Flashbots relay,
//! simulates them against hypothetical future blocks, and tracks
//! whether submitted bundles and private transactions were included.
//!
//! The entry point is [`Flashbots`], constructed from a chain-state
//! reader (any alloy [`Provider`] works out of the box) and a
//! [`RelayClient`]. Submission calls return as soon as the relay
//! acknowledges receipt; inclusion is awaited separately through the
//! returned [`BundleResponse`] / [`PrivateTxResponse`] trackers.
//!
//! [`Provider`]: alloy::providers::Provider

#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod chain;
pub use chain::ChainReader;

mod decode;

mod error;
pub use error::{BundleSignError, FlashbotsError};

mod flashbots;
pub use flashbots::{Flashbots, PRIVATE_TX_BLOCK_WINDOW, SECONDS_PER_BLOCK};

mod poll;
pub use poll::{BlockingSleeper, Sleeper, YieldSleeper, POLL_INTERVAL};

mod response;
pub use response::{BundleResponse, PrivateTxResponse, PrivateTxStatus};

mod sign;

pub use flashbots_relay::{RelayClient, RelaySigner};
pub use flashbots_types::{BundleItem, BundleOpts, SignedTx, SimulatedBundle};
