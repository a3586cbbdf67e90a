use super::keys::Keys;
use super::IdentityError;

/// Private key helpers returning the key as hex
pub struct PrivateKey;

impl PrivateKey {
    pub fn from_passphrase(passphrase: &str) -> Result<String, IdentityError> {
        Ok(Keys::from_passphrase(passphrase)?.private_key_hex())
    }

    pub fn from_wif(wif: &str, wif_version: u8) -> Result<String, IdentityError> {
        Ok(Keys::from_wif(wif, wif_version)?.private_key_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identities::Wif;

    #[test]
    fn test_private_key() {
        let expected = "d8839c2432bfd0a67ef10a804ba991eabba19f154a3d707917681d45822a5712";
        assert_eq!(
            PrivateKey::from_passphrase("this is a top secret passphrase").unwrap(),
            expected
        );

        let wif = Wif::from_passphrase("this is a top secret passphrase", 252).unwrap();
        assert_eq!(PrivateKey::from_wif(&wif, 252).unwrap(), expected);
    }
}
