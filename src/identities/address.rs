//! Base58check addresses: `version ‖ ripemd160(public key)`

use super::keys::Keys;
use super::public_key::PublicKey;
use super::IdentityError;
use crate::crypto::hash::ripemd160;
use crate::transactions::MultiSignatureAsset;
use crate::utils::{decode_check, encode_check};

/// Decoded address bytes
///
/// A network byte mismatch is reported in `error` instead of failing, so that
/// the id of the enclosing transaction can be checked against the exception
/// table before the error is raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressBuffer {
    pub bytes: Vec<u8>,
    pub error: Option<String>,
}

pub struct Address;

impl Address {
    pub fn from_passphrase(passphrase: &str, network_version: u8) -> Result<String, IdentityError> {
        Self::from_public_key(&PublicKey::from_passphrase(passphrase)?, network_version)
    }

    pub fn from_public_key(public_key: &str, network_version: u8) -> Result<String, IdentityError> {
        if !PublicKey::verify(public_key) {
            return Err(IdentityError::InvalidPublicKey(public_key.to_string()));
        }

        let mut payload = Vec::with_capacity(21);
        payload.push(network_version);
        payload.extend_from_slice(&ripemd160(&hex::decode(public_key)?));
        Ok(Self::from_buffer(&payload))
    }

    pub fn from_wif(wif: &str, wif_version: u8, network_version: u8) -> Result<String, IdentityError> {
        Self::from_public_key(&PublicKey::from_wif(wif, wif_version)?, network_version)
    }

    pub fn from_multi_signature_asset(
        asset: &MultiSignatureAsset,
        network_version: u8,
    ) -> Result<String, IdentityError> {
        Self::from_public_key(&PublicKey::from_multi_signature_asset(asset)?, network_version)
    }

    pub fn from_private_key(keys: &Keys, network_version: u8) -> Result<String, IdentityError> {
        Self::from_public_key(&keys.public_key_hex(), network_version)
    }

    pub fn from_buffer(buffer: &[u8]) -> String {
        encode_check(buffer)
    }

    pub fn to_buffer(address: &str, network_version: u8) -> Result<AddressBuffer, IdentityError> {
        let bytes = decode_check(address)?;
        let error = match bytes.first() {
            Some(version) if *version == network_version => None,
            Some(version) => Some(format!(
                "Expected address network byte {}, but got {}.",
                network_version, version
            )),
            None => Some(format!(
                "Expected address network byte {}, but got nothing.",
                network_version
            )),
        };
        Ok(AddressBuffer { bytes, error })
    }

    pub fn validate(address: &str, network_version: u8) -> bool {
        matches!(decode_check(address), Ok(bytes) if bytes.first() == Some(&network_version))
    }
}
