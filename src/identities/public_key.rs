use secp256k1::PublicKey as Point;

use super::keys::Keys;
use super::IdentityError;
use crate::transactions::MultiSignatureAsset;
use crate::utils::number_to_hex;

/// Public key helpers returning the compressed key as hex
pub struct PublicKey;

impl PublicKey {
    pub fn from_passphrase(passphrase: &str) -> Result<String, IdentityError> {
        Ok(Keys::from_passphrase(passphrase)?.public_key_hex())
    }

    pub fn from_wif(wif: &str, wif_version: u8) -> Result<String, IdentityError> {
        Ok(Keys::from_wif(wif, wif_version)?.public_key_hex())
    }

    /// True when `public_key` is a hex encoded point on the curve
    pub fn verify(public_key: &str) -> bool {
        hex::decode(public_key)
            .ok()
            .and_then(|bytes| Point::from_slice(&bytes).ok())
            .is_some()
    }

    /// Shared key of a multisignature wallet
    ///
    /// The participants are combined with a key derived from the minimum, so
    /// the same set of keys with a different `min` yields another wallet.
    pub fn from_multi_signature_asset(asset: &MultiSignatureAsset) -> Result<String, IdentityError> {
        let mut points = Vec::with_capacity(asset.public_keys.len() + 1);
        for public_key in &asset.public_keys {
            let point = hex::decode(public_key)
                .ok()
                .and_then(|bytes| Point::from_slice(&bytes).ok())
                .ok_or_else(|| IdentityError::InvalidPublicKey(public_key.clone()))?;
            points.push(point);
        }

        let min = usize::from(asset.min);
        if min < 1 || min > asset.public_keys.len() {
            return Err(IdentityError::InvalidMultiSignatureAsset);
        }

        let min_key = Keys::from_passphrase(&number_to_hex(u64::from(asset.min), 2))?.public_key;
        points.insert(0, min_key);

        let refs: Vec<&Point> = points.iter().collect();
        let combined =
            Point::combine_keys(&refs).map_err(|_| IdentityError::InvalidMultiSignatureAsset)?;
        Ok(hex::encode(combined.serialize()))
    }
}
