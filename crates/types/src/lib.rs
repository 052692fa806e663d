//! Flashbots SDK core types.
//!
//! Contains the [`BundleItem`] bundle entry shapes, the
//! [`SignedTx`] raw-transaction-plus-hash pair, bundle submission
//! options, and the param/response types for the relay RPC methods.

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

mod item;
pub use item::{BundleItem, SignedTx};

mod opts;
pub use opts::BundleOpts;

mod rpc;
pub use rpc::{
    BundleStatsParams, CancelBundleParams, CancelPrivateTxParams, PrivateTxParams,
    SendBundleResponse, UserStatsParams,
};

mod sim;
pub use sim::SimulatedBundle;
