//! secp256k1 key pairs

use rand::rngs::OsRng;
use secp256k1::{PublicKey, SecretKey};

use super::wif::Wif;
use super::IdentityError;
use crate::crypto::hash::sha256;
use crate::crypto::{schnorr, SECP256K1};

/// A private key together with its public key
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keys {
    pub secret_key: SecretKey,
    pub public_key: PublicKey,
    /// Whether the public key is used in its 33 byte form
    pub compressed: bool,
}

impl Keys {
    /// Generate a new random key pair
    pub fn generate() -> Self {
        let (secret_key, public_key) = SECP256K1.generate_keypair(&mut OsRng);
        Self {
            secret_key,
            public_key,
            compressed: true,
        }
    }

    /// Brain wallet derivation: the private key is SHA-256 of the passphrase
    pub fn from_passphrase(passphrase: &str) -> Result<Self, IdentityError> {
        Self::from_private_key(&sha256(passphrase.as_bytes()), true)
    }

    pub fn from_private_key(private_key: &[u8], compressed: bool) -> Result<Self, IdentityError> {
        if private_key.len() != 32 {
            return Err(IdentityError::PrivateKeyLength(32, private_key.len()));
        }
        let secret_key =
            SecretKey::from_slice(private_key).map_err(|_| IdentityError::InvalidPrivateKey)?;
        Ok(Self {
            public_key: PublicKey::from_secret_key(&SECP256K1, &secret_key),
            secret_key,
            compressed,
        })
    }

    /// Create a key pair from a hex-encoded private key
    pub fn from_private_key_hex(private_key: &str) -> Result<Self, IdentityError> {
        Self::from_private_key(&hex::decode(private_key)?, true)
    }

    /// Decode a WIF, rejecting keys minted for another network
    pub fn from_wif(wif: &str, wif_version: u8) -> Result<Self, IdentityError> {
        let (version, private_key, compressed) = Wif::decode(wif)?;
        if version != wif_version {
            return Err(IdentityError::NetworkVersion(wif_version, version));
        }
        Self::from_private_key(&private_key, compressed)
    }

    pub fn private_key_hex(&self) -> String {
        hex::encode(self.secret_key.secret_bytes())
    }

    pub fn public_key_bytes(&self) -> Vec<u8> {
        if self.compressed {
            self.public_key.serialize().to_vec()
        } else {
            self.public_key.serialize_uncompressed().to_vec()
        }
    }

    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key_bytes())
    }

    /// Schnorr sign a hash with this key
    pub fn sign(&self, hash: &[u8], bip340: bool, aux: Option<&[u8; 32]>) -> Result<String, IdentityError> {
        Ok(schnorr::sign(hash, &self.secret_key, bip340, aux)?)
    }
}
