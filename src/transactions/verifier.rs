//! Signature checks against the canonical transaction hash

use std::collections::HashSet;

use super::asset::MultiSignatureAsset;
use super::transaction::TransactionData;
use super::types::SerialiseOptions;
use super::utils::Utils;
use super::TransactionError;
use crate::context::NetworkContext;
use crate::crypto::schnorr;

pub struct Verifier;

impl Verifier {
    /// Exception ids verify unconditionally; everything else needs a valid
    /// sender signature
    pub fn verify(
        context: &NetworkContext,
        data: &TransactionData,
        options: SerialiseOptions,
    ) -> Result<bool, TransactionError> {
        if let Some(id) = &data.id {
            if context.config().is_id_exception(id) {
                return Ok(true);
            }
        }
        Self::verify_hash(context, data, options)
    }

    pub fn verify_hash(
        context: &NetworkContext,
        data: &TransactionData,
        options: SerialiseOptions,
    ) -> Result<bool, TransactionError> {
        let (Some(signature), Some(sender)) = (&data.signature, &data.sender_public_key) else {
            return Ok(false);
        };

        let options = Self::version_options(options)
            | SerialiseOptions::EXCLUDE_SIGNATURE
            | SerialiseOptions::EXCLUDE_SECOND_SIGNATURE;
        let hash = Utils::to_hash(context, data, options)?;
        Ok(schnorr::verify_hex(&hash, signature, sender, data.version > 2))
    }

    pub fn verify_second_signature(
        context: &NetworkContext,
        data: &TransactionData,
        public_key: &str,
        options: SerialiseOptions,
    ) -> Result<bool, TransactionError> {
        let Some(second_signature) = &data.second_signature else {
            return Ok(false);
        };

        let options = Self::version_options(options) | SerialiseOptions::EXCLUDE_SECOND_SIGNATURE;
        let hash = Utils::to_hash(context, data, options)?;
        Ok(schnorr::verify_hex(&hash, second_signature, public_key, data.version > 2))
    }

    /// True once `min` distinct participants of `multi_signature` have signed
    ///
    /// Stops early when the remaining signatures can no longer reach `min`.
    pub fn verify_signatures(
        context: &NetworkContext,
        data: &TransactionData,
        multi_signature: Option<&MultiSignatureAsset>,
    ) -> Result<bool, TransactionError> {
        let asset = multi_signature.ok_or(TransactionError::InvalidMultiSignatureAsset)?;
        let Some(signatures) = &data.signatures else {
            return Ok(false);
        };

        let hash = Utils::to_hash(
            context,
            data,
            SerialiseOptions::EXCLUDE_SIGNATURE
                | SerialiseOptions::EXCLUDE_SECOND_SIGNATURE
                | SerialiseOptions::EXCLUDE_MULTI_SIGNATURE,
        )?;
        let min = usize::from(asset.min);
        let bip340 = data.version > 2;

        let mut seen = HashSet::new();
        let mut verified = 0;
        for (i, signature) in signatures.iter().enumerate() {
            let index = signature
                .get(..2)
                .and_then(|prefix| u8::from_str_radix(prefix, 16).ok());
            if !seen.insert(index) {
                return Err(TransactionError::DuplicateParticipant);
            }

            let public_key = index.and_then(|index| asset.public_keys.get(usize::from(index)));
            let partial = signature.get(2..130);
            if let (Some(public_key), Some(partial)) = (public_key, partial) {
                if schnorr::verify_hex(&hash, partial, public_key, bip340) {
                    verified += 1;
                }
            }

            if verified == min {
                return Ok(true);
            }
            if signatures.len() - (i + 1 - verified) < min {
                break;
            }
        }
        Ok(false)
    }

    fn version_options(options: SerialiseOptions) -> SerialiseOptions {
        options & (SerialiseOptions::ACCEPT_LEGACY_VERSION | SerialiseOptions::DISABLE_VERSION_CHECK)
    }
}
