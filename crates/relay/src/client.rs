use crate::{
    jsonrpc::{Request, Response},
    RelayError, RelaySigner, FLASHBOTS_SIGNATURE_HEADER,
};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde::{de::DeserializeOwned, Serialize};
use std::{
    borrow::Cow,
    env,
    sync::atomic::{AtomicU64, Ordering},
};
use tracing::{debug, instrument, warn};

/// The public Flashbots relay, used when no endpoint is configured.
pub const DEFAULT_RELAY_URL: &str = "https://relay.flashbots.net";

/// Environment variable overriding the relay endpoint.
pub const RELAY_URL_ENV: &str = "FLASHBOTS_HTTP_PROVIDER_URI";

/// Resolve the relay endpoint from the environment, falling back to
/// [`DEFAULT_RELAY_URL`].
pub fn default_endpoint() -> Cow<'static, str> {
    env::var(RELAY_URL_ENV).map(Cow::Owned).unwrap_or(Cow::Borrowed(DEFAULT_RELAY_URL))
}

/// Authenticated JSON-RPC client for a Flashbots relay endpoint.
///
/// Each call serializes the request envelope, signs the exact body
/// bytes via the [`RelaySigner`], and issues a single POST. Requests
/// are never retried.
#[derive(Debug)]
pub struct RelayClient {
    /// The relay endpoint.
    url: reqwest::Url,
    /// The reqwest client used to send requests.
    client: reqwest::Client,
    /// The identity signing the `X-Flashbots-Signature` header.
    signer: RelaySigner,
    /// Extra headers sent with every request.
    headers: HeaderMap,
    /// Monotonic request id.
    id: AtomicU64,
}

impl RelayClient {
    /// Create a new client with the given endpoint and signing identity.
    pub fn new(url: reqwest::Url, signer: RelaySigner) -> Self {
        Self::new_with_client(url, reqwest::Client::new(), signer)
    }

    /// Create a new client with a specific [`reqwest::Client`].
    pub fn new_with_client(url: reqwest::Url, client: reqwest::Client, signer: RelaySigner) -> Self {
        Self { url, client, signer, headers: HeaderMap::new(), id: AtomicU64::new(0) }
    }

    /// Create a new client given a string URL.
    pub fn new_from_string(url: &str, signer: RelaySigner) -> Result<Self, RelayError> {
        let url = reqwest::Url::parse(url)?;
        Ok(Self::new(url, signer))
    }

    /// Connect to the endpoint named by [`RELAY_URL_ENV`], or the
    /// public Flashbots relay if unset.
    pub fn from_env(signer: RelaySigner) -> Result<Self, RelayError> {
        Self::new_from_string(&default_endpoint(), signer)
    }

    /// Add a header to be sent with every request. The signature header
    /// is always computed per request and cannot be overridden.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// The relay endpoint this client talks to.
    pub const fn url(&self) -> &reqwest::Url {
        &self.url
    }

    /// The identity used to sign requests.
    pub const fn signer(&self) -> &RelaySigner {
        &self.signer
    }

    /// Send a method call and decode a required result.
    pub async fn send<T, R>(&self, method: &'static str, params: T) -> Result<R, RelayError>
    where
        T: Serialize + Send,
        R: DeserializeOwned,
    {
        self.send_inner(method, params).await?.into_result()
    }

    /// Send a method call whose result may legitimately be absent or
    /// `null` (cancellations acknowledge with an empty result).
    pub async fn send_opt<T, R>(
        &self,
        method: &'static str,
        params: T,
    ) -> Result<Option<R>, RelayError>
    where
        T: Serialize + Send,
        R: DeserializeOwned,
    {
        self.send_inner(method, params).await?.into_opt_result()
    }

    #[instrument(skip(self, params))]
    async fn send_inner<T, R>(
        &self,
        method: &'static str,
        params: T,
    ) -> Result<Response<R>, RelayError>
    where
        T: Serialize + Send,
        R: DeserializeOwned,
    {
        let id = self.id.fetch_add(1, Ordering::Relaxed);
        let body = serde_json::to_vec(&Request::new(id, method, params))?;

        // The signature commits to the exact serialized bytes, so it is
        // computed after serialization and attached last.
        let signature = self.signer.header_value(&body)?;

        debug!(id, url = %self.url, "sending relay request");
        let response = self
            .client
            .post(self.url.clone())
            .headers(self.headers.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(FLASHBOTS_SIGNATURE_HEADER, signature)
            .body(body)
            .send()
            .await?
            .error_for_status()?;

        response
            .json::<Response<R>>()
            .await
            .inspect_err(|e| warn!(%e, "failed to decode relay response"))
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_url_parses() {
        let client =
            RelayClient::new_from_string(DEFAULT_RELAY_URL, RelaySigner::random()).unwrap();
        assert_eq!(client.url().as_str(), "https://relay.flashbots.net/");
    }

    #[test]
    fn ids_are_monotonic_per_client() {
        let client =
            RelayClient::new_from_string(DEFAULT_RELAY_URL, RelaySigner::random()).unwrap();
        assert_eq!(client.id.fetch_add(1, Ordering::Relaxed), 0);
        assert_eq!(client.id.fetch_add(1, Ordering::Relaxed), 1);
    }
}
