use super::serialiser::Serialiser;
use super::transaction::TransactionData;
use super::types::SerialiseOptions;
use super::TransactionError;
use crate::context::NetworkContext;
use crate::crypto::hash::sha256;

pub struct Utils;

impl Utils {
    pub fn to_bytes(context: &NetworkContext, data: &TransactionData) -> Result<Vec<u8>, TransactionError> {
        Serialiser::serialise(context, data, SerialiseOptions::empty())
    }

    /// SHA-256 of the bytes selected by `options`, the message that gets signed
    pub fn to_hash(
        context: &NetworkContext,
        data: &TransactionData,
        options: SerialiseOptions,
    ) -> Result<[u8; 32], TransactionError> {
        Ok(sha256(&Serialiser::get_bytes(context, data, options)?))
    }

    /// Transaction id: hex SHA-256 of the full bytes
    ///
    /// A recipient with a foreign network byte is only accepted when the
    /// resulting id is listed as an exception. Ids from the fix table are
    /// replaced by their corrected value.
    pub fn get_id(
        context: &NetworkContext,
        data: &TransactionData,
        options: SerialiseOptions,
    ) -> Result<String, TransactionError> {
        let (bytes, address_error) = Serialiser::get_bytes_with_env(context, data, options)?;
        let id = hex::encode(sha256(&bytes));
        let config = context.config();

        if let Some(error) = address_error {
            if !config.is_id_exception(&id) {
                return Err(TransactionError::AddressNetwork(error));
            }
        }

        match config.fixed_transaction_id(&id) {
            Some(fixed) => {
                log::debug!("Replacing transaction id {} with {}", id, fixed);
                Ok(fixed.to_string())
            }
            None => Ok(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::preset;
    use crate::transactions::asset::Asset;
    use crate::utils::BigNumber;

    const SENDER: &str = "034151a3ec46b5670a682b0a63394f863587d1bc97483b1b6c70eb58e7f0aed192";

    fn legacy_transfer(recipient: &str) -> TransactionData {
        TransactionData {
            version: 2,
            type_group: 1,
            transaction_type: 0,
            nonce: BigNumber::from(1u64),
            sender_public_key: Some(SENDER.to_string()),
            fee: BigNumber::from(10_000_000u64),
            asset: Some(Asset::LegacyTransfer {
                amount: BigNumber::from(1u64),
                expiration: 0,
                recipient_id: Some(recipient.to_string()),
            }),
            signature: Some("55".repeat(64)),
            ..Default::default()
        }
    }

    #[test]
    fn test_id_is_hash_of_bytes() {
        let context = NetworkContext::from_preset("testnet").unwrap();
        let data = legacy_transfer("D61mfSggzbvQgTUe6JhYKH2doHaqJ3Dyib");

        let id = Utils::get_id(&context, &data, SerialiseOptions::empty()).unwrap();
        let bytes = Utils::to_bytes(&context, &data).unwrap();
        assert_eq!(id, hex::encode(sha256(&bytes)));

        let unsigned = Utils::to_hash(&context, &data, SerialiseOptions::EXCLUDE_SIGNATURE).unwrap();
        assert_ne!(hex::encode(unsigned), id);
    }

    #[test]
    fn test_foreign_recipient() {
        let context = NetworkContext::from_preset("mainnet").unwrap();
        let data = legacy_transfer("D61mfSggzbvQgTUe6JhYKH2doHaqJ3Dyib");

        let err = Utils::get_id(&context, &data, SerialiseOptions::empty()).unwrap_err();
        assert_eq!(err.to_string(), "Expected address network byte 63, but got 30.");

        // Accepted once the id is a known exception
        let id = hex::encode(sha256(&Utils::to_bytes(&context, &data).unwrap()));
        let mut config = preset("mainnet").unwrap();
        config.exceptions.transactions.push(id.clone());
        let context = NetworkContext::new(config).unwrap();
        assert_eq!(Utils::get_id(&context, &data, SerialiseOptions::empty()).unwrap(), id);
    }

    #[test]
    fn test_fix_table() {
        let data = legacy_transfer("D61mfSggzbvQgTUe6JhYKH2doHaqJ3Dyib");
        let context = NetworkContext::from_preset("testnet").unwrap();
        let id = Utils::get_id(&context, &data, SerialiseOptions::empty()).unwrap();

        let mut config = preset("testnet").unwrap();
        config
            .exceptions
            .transaction_id_fix_table
            .insert(id, "ff".repeat(32));
        let context = NetworkContext::new(config).unwrap();
        assert_eq!(
            Utils::get_id(&context, &data, SerialiseOptions::empty()).unwrap(),
            "ff".repeat(32)
        );
    }
}
