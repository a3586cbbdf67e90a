//! Signed plain text messages (always BIP-340 over SHA-256 of the text)

use serde::{Deserialize, Serialize};

use super::hash::sha256;
use super::schnorr;
use crate::identities::{IdentityError, Keys};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedMessage {
    pub public_key: String,
    pub signature: String,
    pub message: String,
}

pub struct Message;

impl Message {
    pub fn sign(message: &str, passphrase: &str) -> Result<SignedMessage, IdentityError> {
        Self::sign_with_keys(message, &Keys::from_passphrase(passphrase)?)
    }

    pub fn sign_with_wif(message: &str, wif: &str, wif_version: u8) -> Result<SignedMessage, IdentityError> {
        Self::sign_with_keys(message, &Keys::from_wif(wif, wif_version)?)
    }

    pub fn sign_with_keys(message: &str, keys: &Keys) -> Result<SignedMessage, IdentityError> {
        Ok(SignedMessage {
            public_key: keys.public_key_hex(),
            signature: keys.sign(&Self::create_hash(message), true, None)?,
            message: message.to_string(),
        })
    }

    pub fn verify(signed: &SignedMessage) -> bool {
        schnorr::verify_hex(
            &Self::create_hash(&signed.message),
            &signed.signature,
            &signed.public_key,
            true,
        )
    }

    fn create_hash(message: &str) -> [u8; 32] {
        sha256(message.as_bytes())
    }
}
