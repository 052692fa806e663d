use alloy::{
    primitives::{keccak256, Address},
    signers::{local::PrivateKeySigner, SignerSync},
};

/// Header carrying the relay request signature.
pub const FLASHBOTS_SIGNATURE_HEADER: &str = "X-Flashbots-Signature";

/// The identity used to authenticate requests to the relay.
///
/// The relay tracks searcher reputation by this address; it does not
/// need to hold funds and should generally not be a key that signs
/// transactions.
#[derive(Debug, Clone)]
pub struct RelaySigner {
    signer: PrivateKeySigner,
}

impl RelaySigner {
    /// Create a new [`RelaySigner`] from a local signing key.
    pub const fn new(signer: PrivateKeySigner) -> Self {
        Self { signer }
    }

    /// Create a [`RelaySigner`] with a freshly generated key.
    ///
    /// A fresh key means a fresh reputation with the relay, so
    /// long-running searchers should persist a key instead.
    pub fn random() -> Self {
        Self::new(PrivateKeySigner::random())
    }

    /// The address requests are authenticated as.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Compute the `X-Flashbots-Signature` header value for a request
    /// body.
    ///
    /// The signed message is the 0x-prefixed hex text of the keccak256
    /// digest of the exact body bytes, wrapped as an EIP-191 personal
    /// message. Domain separation via EIP-191 keeps the result from
    /// doubling as a valid transaction signature. The value is
    /// `<address>:<0x-prefixed signature hex>`.
    ///
    /// The body digest differs for every request, so the header is
    /// recomputed per call and never cached.
    pub fn header_value(&self, body: &[u8]) -> Result<String, alloy::signers::Error> {
        let digest = hex::encode_prefixed(keccak256(body));
        let signature = self.signer.sign_message_sync(digest.as_bytes())?;
        Ok(format!("{}:{}", self.signer.address(), hex::encode_prefixed(signature.as_bytes())))
    }
}

impl From<PrivateKeySigner> for RelaySigner {
    fn from(signer: PrivateKeySigner) -> Self {
        Self::new(signer)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloy::primitives::{Signature, B256};

    fn test_signer() -> RelaySigner {
        RelaySigner::new(PrivateKeySigner::from_bytes(&B256::repeat_byte(0x42)).unwrap())
    }

    #[test]
    fn identical_bodies_produce_identical_headers() {
        let signer = test_signer();
        let body = br#"{"jsonrpc":"2.0","id":0,"method":"eth_sendBundle","params":[]}"#;
        assert_eq!(signer.header_value(body).unwrap(), signer.header_value(body).unwrap());
    }

    #[test]
    fn single_byte_change_changes_the_header() {
        let signer = test_signer();
        let a = signer.header_value(b"{\"id\":0}").unwrap();
        let b = signer.header_value(b"{\"id\":1}").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn header_recovers_to_signer_address() {
        let signer = test_signer();
        let body = b"arbitrary request body";
        let header = signer.header_value(body).unwrap();

        let (address, sig_hex) = header.split_once(':').unwrap();
        assert_eq!(address.parse::<Address>().unwrap(), signer.address());

        let signature: Signature = sig_hex.parse().unwrap();
        let message = hex::encode_prefixed(keccak256(body));
        let recovered = signature.recover_address_from_msg(message.as_bytes()).unwrap();
        assert_eq!(recovered, signer.address());
    }
}
