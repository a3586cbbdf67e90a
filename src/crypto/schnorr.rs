//! Schnorr signatures over secp256k1
//!
//! Two schemes are in use on the network:
//! - BIP-340 (x-only keys, tagged hashes), used by version 3 transactions and
//!   by blocks once the `bip340` milestone flag is active.
//! - The earlier draft ("legacy"): `e = H(x(R) || P || m)` with a compressed
//!   `P`, nonce `k = H(d || m)` and the jacobi symbol selecting the sign of `k`.

use num_bigint::BigUint;
use secp256k1::constants::{CURVE_ORDER, FIELD_SIZE};
use secp256k1::{schnorr, Keypair, Message, PublicKey, Scalar, SecretKey, XOnlyPublicKey};
use thiserror::Error;

use super::hash::{sha256, sha256_concat};
use super::SECP256K1;

#[derive(Error, Debug)]
pub enum SchnorrError {
    #[error("Signing failed: {0}")]
    SigningFailed(&'static str),
    #[error("Secp256k1 error: {0}")]
    Secp256k1Error(#[from] secp256k1::Error),
}

/// Sign `hash` with either scheme; returns the 64 byte signature as hex
pub fn sign(
    hash: &[u8],
    secret_key: &SecretKey,
    bip340: bool,
    aux: Option<&[u8; 32]>,
) -> Result<String, SchnorrError> {
    if bip340 {
        sign_bip340(hash, secret_key, aux)
    } else {
        sign_legacy(hash, secret_key).map(hex::encode)
    }
}

/// Verify a signature with either scheme; malformed input verifies as `false`
pub fn verify(hash: &[u8], signature: &[u8], public_key: &[u8], bip340: bool) -> bool {
    if bip340 {
        verify_bip340(hash, signature, public_key)
    } else {
        verify_legacy(hash, signature, public_key)
    }
}

/// Hex flavoured [`verify`]
pub fn verify_hex(hash: &[u8], signature: &str, public_key: &str, bip340: bool) -> bool {
    match (hex::decode(signature), hex::decode(public_key)) {
        (Ok(signature), Ok(public_key)) => verify(hash, &signature, &public_key, bip340),
        _ => false,
    }
}

// =============================================================================
// BIP-340
// =============================================================================

fn digest(hash: &[u8]) -> [u8; 32] {
    match <[u8; 32]>::try_from(hash) {
        Ok(digest) => digest,
        Err(_) => sha256(hash),
    }
}

pub fn sign_bip340(
    hash: &[u8],
    secret_key: &SecretKey,
    aux: Option<&[u8; 32]>,
) -> Result<String, SchnorrError> {
    let message = Message::from_digest_slice(&digest(hash))?;
    let keypair = Keypair::from_secret_key(&SECP256K1, secret_key);
    let signature = SECP256K1.sign_schnorr_with_aux_rand(&message, &keypair, aux.unwrap_or(&[0u8; 32]));
    Ok(signature.to_string())
}

pub fn verify_bip340(hash: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
    let key = if public_key.len() == 33 {
        &public_key[1..]
    } else {
        public_key
    };

    let (Ok(message), Ok(signature), Ok(key)) = (
        Message::from_digest_slice(&digest(hash)),
        schnorr::Signature::from_slice(signature),
        XOnlyPublicKey::from_slice(key),
    ) else {
        return false;
    };

    SECP256K1.verify_schnorr(&signature, &message, &key).is_ok()
}

// =============================================================================
// Legacy draft
// =============================================================================

fn to_bytes32(value: &BigUint) -> [u8; 32] {
    let bytes = value.to_bytes_be();
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(&bytes);
    out
}

fn is_zero(value: &BigUint) -> bool {
    value.bits() == 0
}

/// Euler's criterion: `y^((p-1)/2) == 1 (mod p)`
fn has_square_y(y: &[u8]) -> bool {
    let p = BigUint::from_bytes_be(&FIELD_SIZE);
    let y = BigUint::from_bytes_be(y);
    if is_zero(&y) {
        return false;
    }
    let exponent = (&p - 1u32) >> 1;
    y.modpow(&exponent, &p) == BigUint::from(1u32)
}

pub fn sign_legacy(hash: &[u8], secret_key: &SecretKey) -> Result<[u8; 64], SchnorrError> {
    let n = BigUint::from_bytes_be(&CURVE_ORDER);
    let secret = secret_key.secret_bytes();
    let d = BigUint::from_bytes_be(&secret);

    let nonce = BigUint::from_bytes_be(&sha256_concat([&secret[..], hash])) % &n;
    if is_zero(&nonce) {
        return Err(SchnorrError::SigningFailed("nonce is zero"));
    }

    let nonce_key = SecretKey::from_slice(&to_bytes32(&nonce))?;
    let r = PublicKey::from_secret_key(&SECP256K1, &nonce_key).serialize_uncompressed();
    let (rx, ry) = (&r[1..33], &r[33..65]);
    let public_key = PublicKey::from_secret_key(&SECP256K1, secret_key).serialize();

    let e = BigUint::from_bytes_be(&sha256_concat([rx, &public_key[..], hash])) % &n;
    let k = if has_square_y(ry) { nonce } else { &n - nonce };
    let s = (k + e * d) % &n;

    let mut signature = [0u8; 64];
    signature[..32].copy_from_slice(rx);
    signature[32..].copy_from_slice(&to_bytes32(&s));
    Ok(signature)
}

pub fn verify_legacy(hash: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
    if signature.len() != 64 {
        return false;
    }
    let Ok(public_key) = PublicKey::from_slice(public_key) else {
        return false;
    };

    let n = BigUint::from_bytes_be(&CURVE_ORDER);
    let p = BigUint::from_bytes_be(&FIELD_SIZE);
    let (r_bytes, s_bytes) = signature.split_at(32);
    let r = BigUint::from_bytes_be(r_bytes);
    let s = BigUint::from_bytes_be(s_bytes);
    if r >= p || s >= n {
        return false;
    }

    let e = BigUint::from_bytes_be(&sha256_concat([r_bytes, &public_key.serialize()[..], hash])) % &n;
    let minus_e = (&n - e) % &n;

    // R = sG - eP
    let s_g = if is_zero(&s) {
        None
    } else {
        match SecretKey::from_slice(&to_bytes32(&s)) {
            Ok(key) => Some(PublicKey::from_secret_key(&SECP256K1, &key)),
            Err(_) => return false,
        }
    };
    let minus_e_p = if is_zero(&minus_e) {
        None
    } else {
        match Scalar::from_be_bytes(to_bytes32(&minus_e)) {
            Ok(tweak) => match public_key.mul_tweak(&SECP256K1, &tweak) {
                Ok(point) => Some(point),
                Err(_) => return false,
            },
            Err(_) => return false,
        }
    };

    let point = match (s_g, minus_e_p) {
        (Some(a), Some(b)) => match a.combine(&b) {
            Ok(point) => point,
            // Point at infinity
            Err(_) => return false,
        },
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => return false,
    };

    let encoded = point.serialize_uncompressed();
    has_square_y(&encoded[33..]) && &encoded[1..33] == r_bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(passphrase: &str) -> SecretKey {
        SecretKey::from_slice(&sha256(passphrase.as_bytes())).unwrap()
    }

    fn public(secret: &SecretKey) -> [u8; 33] {
        PublicKey::from_secret_key(&SECP256K1, secret).serialize()
    }

    #[test]
    fn test_bip340_sign_verify() {
        let key = secret("this is a top secret passphrase");
        let hash = sha256(b"payload");
        let signature = sign(&hash, &key, true, None).unwrap();

        assert_eq!(signature.len(), 128);
        assert!(verify_hex(&hash, &signature, &hex::encode(public(&key)), true));
        assert!(!verify_hex(&sha256(b"other"), &signature, &hex::encode(public(&key)), true));
    }

    #[test]
    fn test_bip340_is_deterministic_with_fixed_aux() {
        let key = secret("deterministic");
        let hash = sha256(b"payload");
        assert_eq!(
            sign(&hash, &key, true, None).unwrap(),
            sign(&hash, &key, true, Some(&[0u8; 32])).unwrap()
        );
    }

    #[test]
    fn test_bip340_hashes_long_messages() {
        let key = secret("long message");
        let message = b"a message that is clearly longer than thirty two bytes";
        let signature = sign(message, &key, true, None).unwrap();
        assert!(verify_hex(message, &signature, &hex::encode(public(&key)), true));
    }

    #[test]
    fn test_legacy_sign_verify() {
        let key = secret("this is a top secret passphrase");
        let hash = sha256(b"legacy payload");
        let signature = sign_legacy(&hash, &key).unwrap();

        assert!(verify_legacy(&hash, &signature, &public(&key)));
        assert!(!verify_legacy(&sha256(b"tampered"), &signature, &public(&key)));
        assert!(!verify_legacy(&hash, &signature, &public(&secret("someone else"))));
        // A legacy signature is not a valid BIP-340 signature
        assert!(!verify(&hash, &signature, &public(&key), true));
    }

    #[test]
    fn test_legacy_signature_is_deterministic() {
        let key = secret("nonce check");
        let hash = sha256(b"same message");
        assert_eq!(sign_legacy(&hash, &key).unwrap(), sign_legacy(&hash, &key).unwrap());
    }

    #[test]
    fn test_legacy_rejects_out_of_range_values() {
        let key = secret("range");
        let hash = sha256(b"range");
        let mut signature = sign_legacy(&hash, &key).unwrap();
        signature[32..].copy_from_slice(&CURVE_ORDER);
        assert!(!verify_legacy(&hash, &signature, &public(&key)));
        assert!(!verify_legacy(&hash, &signature[..63], &public(&key)));
    }

    #[test]
    fn test_malformed_inputs_do_not_verify() {
        let hash = sha256(b"x");
        assert!(!verify_hex(&hash, "zz", "02", true));
        assert!(!verify(&hash, &[0u8; 64], &[0u8; 33], false));
        assert!(!verify(&hash, &[0u8; 64], &[0u8; 33], true));
    }
}
