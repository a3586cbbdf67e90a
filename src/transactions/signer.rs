//! Transaction signing
//!
//! Version 3 transactions are signed with BIP-340, older versions with the
//! legacy Schnorr scheme.

use super::transaction::TransactionData;
use super::types::SerialiseOptions;
use super::utils::Utils;
use super::TransactionError;
use crate::context::NetworkContext;
use crate::identities::Keys;
use crate::utils::number_to_hex;

pub struct Signer;

impl Signer {
    /// Sign with the sender key; stores the signature unless one is already
    /// present or a multi-signature is being collected
    pub fn sign(
        context: &NetworkContext,
        data: &mut TransactionData,
        keys: &Keys,
        options: SerialiseOptions,
    ) -> Result<String, TransactionError> {
        let mut options = options;
        if !options.intersects(
            SerialiseOptions::EXCLUDE_SIGNATURE | SerialiseOptions::EXCLUDE_SECOND_SIGNATURE,
        ) {
            options |= SerialiseOptions::EXCLUDE_SIGNATURE | SerialiseOptions::EXCLUDE_SECOND_SIGNATURE;
        }

        let hash = Utils::to_hash(context, data, options)?;
        let signature = keys.sign(&hash, data.version > 2, None)?;
        if data.signature.is_none() && !options.contains(SerialiseOptions::EXCLUDE_MULTI_SIGNATURE) {
            data.signature = Some(signature.clone());
        }
        Ok(signature)
    }

    /// Sign over the first signature
    pub fn second_sign(
        context: &NetworkContext,
        data: &mut TransactionData,
        keys: &Keys,
    ) -> Result<String, TransactionError> {
        let hash = Utils::to_hash(context, data, SerialiseOptions::EXCLUDE_SECOND_SIGNATURE)?;
        let signature = keys.sign(&hash, data.version > 2, None)?;
        if data.second_signature.is_none() {
            data.second_signature = Some(signature.clone());
        }
        Ok(signature)
    }

    /// Add one participant signature, prefixed with its public key index
    ///
    /// The index defaults to the number of signatures collected so far.
    pub fn multi_sign(
        context: &NetworkContext,
        data: &mut TransactionData,
        keys: &Keys,
        index: Option<u8>,
    ) -> Result<String, TransactionError> {
        let collected = data.signatures.as_ref().map_or(0, Vec::len);
        let index = index.map_or(collected as u64, u64::from);

        let hash = Utils::to_hash(
            context,
            data,
            SerialiseOptions::EXCLUDE_SIGNATURE
                | SerialiseOptions::EXCLUDE_SECOND_SIGNATURE
                | SerialiseOptions::EXCLUDE_MULTI_SIGNATURE,
        )?;
        let signature = keys.sign(&hash, data.version > 2, None)?;
        let indexed = format!("{}{}", number_to_hex(index, 2), signature);

        data.signatures
            .get_or_insert_with(Vec::new)
            .push(indexed.clone());
        Ok(indexed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transactions::asset::Asset;
    use crate::transactions::Verifier;
    use crate::utils::BigNumber;

    fn registration(keys: &Keys, version: u8) -> TransactionData {
        TransactionData {
            version,
            type_group: 1,
            transaction_type: 2,
            nonce: BigNumber::from(1u64),
            sender_public_key: Some(keys.public_key_hex()),
            fee: BigNumber::from(25u64),
            asset: Some(Asset::DelegateRegistration {
                username: "gym".to_string(),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_sign_stores_signature() {
        let context = NetworkContext::from_preset("testnet").unwrap();
        let keys = Keys::from_passphrase("this is a top secret passphrase").unwrap();
        let mut data = registration(&keys, 3);

        let signature = Signer::sign(&context, &mut data, &keys, SerialiseOptions::DISABLE_VERSION_CHECK)
            .unwrap();
        assert_eq!(signature.len(), 128);
        assert_eq!(data.signature.as_deref(), Some(signature.as_str()));
        assert!(Verifier::verify_hash(&context, &data, SerialiseOptions::DISABLE_VERSION_CHECK).unwrap());

        // An existing signature is kept
        let again = Signer::sign(&context, &mut data, &keys, SerialiseOptions::DISABLE_VERSION_CHECK)
            .unwrap();
        assert_eq!(data.signature.as_deref(), Some(signature.as_str()));
        assert_eq!(again.len(), 128);
    }

    #[test]
    fn test_legacy_signature_for_version_2() {
        let context = NetworkContext::from_preset("testnet").unwrap();
        let keys = Keys::from_passphrase("this is a top secret passphrase").unwrap();
        let mut data = registration(&keys, 2);

        Signer::sign(&context, &mut data, &keys, SerialiseOptions::empty()).unwrap();
        assert!(Verifier::verify(&context, &data, SerialiseOptions::empty()).unwrap());

        let second = Keys::from_passphrase("second secret").unwrap();
        Signer::second_sign(&context, &mut data, &second).unwrap();
        assert!(Verifier::verify_second_signature(
            &context,
            &data,
            &second.public_key_hex(),
            SerialiseOptions::empty()
        )
        .unwrap());
        // The first signature does not cover the second one
        assert!(Verifier::verify(&context, &data, SerialiseOptions::empty()).unwrap());
    }

    #[test]
    fn test_multi_sign_indexes() {
        let context = NetworkContext::from_preset("testnet").unwrap();
        let keys = Keys::from_passphrase("participant").unwrap();
        let mut data = registration(&keys, 3);

        let first = Signer::multi_sign(&context, &mut data, &keys, None).unwrap();
        let second = Signer::multi_sign(&context, &mut data, &keys, Some(12)).unwrap();
        let third = Signer::multi_sign(&context, &mut data, &keys, None).unwrap();

        assert!(first.starts_with("00"));
        assert!(second.starts_with("0c"));
        assert!(third.starts_with("02"));
        assert_eq!(first.len(), 130);
        assert!(data.signature.is_none());
        assert_eq!(data.signatures.as_ref().map(Vec::len), Some(3));
    }
}
