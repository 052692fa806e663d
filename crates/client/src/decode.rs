use crate::BundleSignError;
use alloy::{
    consensus::{
        transaction::{Recovered, SignerRecoverable},
        TxEnvelope,
    },
    eips::eip2718::Decodable2718,
};

/// EIP-2718 type bytes accepted in raw bundle entries, besides legacy.
const ACCESS_LIST_TX_TYPE: u8 = 1;
const DYNAMIC_FEE_TX_TYPE: u8 = 2;

/// Decode a raw signed transaction and recover its sender.
///
/// The leading byte discriminates the encoding: values above `0x7f`
/// are an RLP list header, so the bytes are a legacy envelope; `1` and
/// `2` are access-list and dynamic-fee typed payloads. Any other
/// leading byte is rejected before decoding.
///
/// The sender is always recovered from the signature over the
/// canonical payload, never read from the decoded fields.
pub(crate) fn decode_signed_tx(raw: &[u8]) -> Result<Recovered<TxEnvelope>, BundleSignError> {
    match raw.first() {
        Some(&byte) if byte > 0x7f || byte == ACCESS_LIST_TX_TYPE || byte == DYNAMIC_FEE_TX_TYPE => {
            let envelope = TxEnvelope::decode_2718(&mut &raw[..])?;
            envelope.try_into_recovered().map_err(Into::into)
        }
        Some(&byte) => Err(BundleSignError::UnknownTxType(byte)),
        None => Err(BundleSignError::EmptyRawTx),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloy::{
        consensus::{SignableTransaction, Transaction, TxEip1559, TxEip2930, TxLegacy},
        eips::eip2718::Encodable2718,
        primitives::{Address, Bytes, TxKind, B256, U256},
        signers::{local::PrivateKeySigner, SignerSync},
    };

    fn wallet() -> PrivateKeySigner {
        PrivateKeySigner::from_bytes(&B256::repeat_byte(1)).unwrap()
    }

    fn encode_signed<T>(wallet: &PrivateKeySigner, tx: T) -> Bytes
    where
        T: SignableTransaction<alloy::primitives::Signature>,
        TxEnvelope: From<alloy::consensus::Signed<T>>,
    {
        let signature = wallet.sign_hash_sync(&tx.signature_hash()).unwrap();
        let envelope = TxEnvelope::from(tx.into_signed(signature));
        envelope.encoded_2718().into()
    }

    #[test]
    fn decodes_dynamic_fee_tx_and_recovers_sender() {
        let wallet = wallet();
        let tx = TxEip1559 {
            chain_id: 1,
            nonce: 5,
            gas_limit: 21_000,
            max_fee_per_gas: 100,
            max_priority_fee_per_gas: 1,
            to: TxKind::Call(Address::repeat_byte(9)),
            value: U256::from(10),
            ..Default::default()
        };
        let raw = encode_signed(&wallet, tx);

        let recovered = decode_signed_tx(&raw).unwrap();
        assert_eq!(recovered.signer(), wallet.address());
        assert_eq!(recovered.nonce(), 5);
    }

    #[test]
    fn decodes_legacy_tx() {
        let wallet = wallet();
        let tx = TxLegacy {
            chain_id: Some(1),
            nonce: 3,
            gas_limit: 21_000,
            gas_price: 100,
            to: TxKind::Call(Address::repeat_byte(9)),
            ..Default::default()
        };
        let raw = encode_signed(&wallet, tx);

        let recovered = decode_signed_tx(&raw).unwrap();
        assert_eq!(recovered.signer(), wallet.address());
        assert_eq!(recovered.nonce(), 3);
    }

    #[test]
    fn decodes_access_list_tx() {
        let wallet = wallet();
        let tx = TxEip2930 {
            chain_id: 1,
            nonce: 8,
            gas_limit: 21_000,
            gas_price: 100,
            to: TxKind::Call(Address::repeat_byte(9)),
            ..Default::default()
        };
        let raw = encode_signed(&wallet, tx);

        let recovered = decode_signed_tx(&raw).unwrap();
        assert_eq!(recovered.nonce(), 8);
    }

    #[test]
    fn rejects_unknown_type_byte() {
        // Type 3 (blob) and other low bytes are not accepted as bundle
        // entries.
        assert!(matches!(
            decode_signed_tx(&[0x03, 0x01, 0x02]),
            Err(BundleSignError::UnknownTxType(0x03))
        ));
        assert!(matches!(
            decode_signed_tx(&[0x7f]),
            Err(BundleSignError::UnknownTxType(0x7f))
        ));
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(decode_signed_tx(&[]), Err(BundleSignError::EmptyRawTx)));
    }
}
