//! Wallet import format: `base58check(version ‖ d ‖ 0x01?)`

use super::keys::Keys;
use super::IdentityError;
use crate::utils::{decode_check, encode_check};

pub struct Wif;

impl Wif {
    pub fn from_passphrase(passphrase: &str, wif_version: u8) -> Result<String, IdentityError> {
        Ok(Self::from_keys(&Keys::from_passphrase(passphrase)?, wif_version))
    }

    pub fn from_keys(keys: &Keys, wif_version: u8) -> String {
        let mut payload = Vec::with_capacity(34);
        payload.push(wif_version);
        payload.extend_from_slice(&keys.secret_key.secret_bytes());
        if keys.compressed {
            payload.push(0x01);
        }
        encode_check(&payload)
    }

    /// Split a WIF into `(version, private key, compressed)`
    pub fn decode(wif: &str) -> Result<(u8, [u8; 32], bool), IdentityError> {
        let payload = decode_check(wif)?;
        let compressed = match payload.len() {
            33 => false,
            34 if payload[33] == 0x01 => true,
            34 => return Err(IdentityError::InvalidWif("invalid compression flag")),
            _ => return Err(IdentityError::InvalidWif("invalid length")),
        };

        let mut private_key = [0u8; 32];
        private_key.copy_from_slice(&payload[1..33]);
        Ok((payload[0], private_key, compressed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_passphrase_matches_from_keys() {
        let keys = Keys::from_passphrase("wif passphrase").unwrap();
        assert_eq!(
            Wif::from_passphrase("wif passphrase", 252).unwrap(),
            Wif::from_keys(&keys, 252)
        );
    }

    #[test]
    fn test_decode() {
        let keys = Keys::from_passphrase("wif passphrase").unwrap();
        let (version, private_key, compressed) = Wif::decode(&Wif::from_keys(&keys, 170)).unwrap();
        assert_eq!(version, 170);
        assert_eq!(private_key, keys.secret_key.secret_bytes());
        assert!(compressed);
    }

    #[test]
    fn test_decode_rejects_bad_payloads() {
        assert!(matches!(
            Wif::decode(&encode_check(&[1, 2, 3])),
            Err(IdentityError::InvalidWif(_))
        ));
        let mut payload = vec![252u8];
        payload.extend_from_slice(&[7u8; 32]);
        payload.push(0x02);
        assert!(matches!(
            Wif::decode(&encode_check(&payload)),
            Err(IdentityError::InvalidWif(_))
        ));
    }
}
