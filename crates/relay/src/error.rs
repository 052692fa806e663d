use crate::ErrorPayload;

/// Errors returned by the [`RelayClient`].
///
/// Transport and relay failures are surfaced unmodified; the client
/// never retries. Bundles are time-sensitive, so retry policy belongs
/// to the caller.
///
/// [`RelayClient`]: crate::RelayClient
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// The relay endpoint URL could not be parsed.
    #[error(transparent)]
    Url(#[from] url::ParseError),

    /// Signing the request body failed.
    #[error(transparent)]
    Signer(#[from] alloy::signers::Error),

    /// The request body could not be serialized.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// An error occurred while contacting the relay, including non-2xx
    /// statuses and undecodable response bodies.
    #[error("error contacting relay: {0}")]
    Transport(#[from] reqwest::Error),

    /// The relay returned a JSON-RPC error object.
    #[error(transparent)]
    Rpc(#[from] ErrorPayload),

    /// The relay returned a response with neither result nor error.
    #[error("relay response carried neither result nor error")]
    MissingResult,
}
