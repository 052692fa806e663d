//! Authenticated JSON-RPC client for the Flashbots relay.
//!
//! Contains the [`RelaySigner`], which computes the
//! `X-Flashbots-Signature` header over an outbound request body, and
//! the [`RelayClient`], which sends signed JSON-RPC requests to a
//! relay endpoint over HTTPS.

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

mod client;
pub use client::{default_endpoint, RelayClient, DEFAULT_RELAY_URL, RELAY_URL_ENV};

mod error;
pub use error::RelayError;

mod jsonrpc;
pub use jsonrpc::{ErrorPayload, Request, Response};

mod sign;
pub use sign::{RelaySigner, FLASHBOTS_SIGNATURE_HEADER};
