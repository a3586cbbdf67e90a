//! Entry points that turn hex, bytes, JSON or plain data into a
//! [`Transaction`] with its id assigned
//!
//! Failures are reported as invalid transaction bytes, except for version,
//! schema and duplicate participant errors which keep their own type.

use serde_json::Value;

use super::deserialiser::Deserialiser;
use super::serialiser::Serialiser;
use super::transaction::{Transaction, TransactionData};
use super::types::SerialiseOptions;
use super::utils::Utils;
use super::TransactionError;
use crate::context::NetworkContext;

pub struct TransactionFactory;

impl TransactionFactory {
    pub fn from_hex(context: &NetworkContext, serialised: &str) -> Result<Transaction, TransactionError> {
        let bytes = hex::decode(serialised).map_err(|e| wrap(e.into()))?;
        Self::from_serialised(context, &bytes, SerialiseOptions::empty())
    }

    /// Decode `serialised`; a non strict decode skips the supported version check
    pub fn from_bytes(
        context: &NetworkContext,
        serialised: &[u8],
        strict: bool,
        options: SerialiseOptions,
    ) -> Result<Transaction, TransactionError> {
        let options = if strict {
            options
        } else {
            options | SerialiseOptions::DISABLE_VERSION_CHECK
        };
        Self::from_serialised(context, serialised, options)
    }

    /// Decode bytes that were already validated elsewhere, such as the
    /// payload of a stored block
    ///
    /// Legacy versions are accepted and a known `id` skips rehashing.
    pub fn from_bytes_unsafe(
        context: &NetworkContext,
        serialised: &[u8],
        id: Option<&str>,
    ) -> Result<Transaction, TransactionError> {
        let decode = || -> Result<Transaction, TransactionError> {
            let options = SerialiseOptions::ACCEPT_LEGACY_VERSION;
            let mut transaction = Deserialiser::deserialise(context, serialised, options)?;
            transaction.data.id = match id {
                Some(id) => Some(id.to_string()),
                None => Some(Utils::get_id(context, &transaction.data, options)?),
            };
            transaction.verified = true;
            Ok(transaction)
        };

        decode().map_err(|error| match error {
            TransactionError::InvalidTransactionBytes(_) => error,
            other => TransactionError::InvalidTransactionBytes(other.to_string()),
        })
    }

    pub fn from_json(context: &NetworkContext, json: &Value) -> Result<Transaction, TransactionError> {
        let data = TransactionData::from_json(json)?;
        Self::from_data(context, data, true, SerialiseOptions::empty())
    }

    /// Serialise `data` and decode it again, so the result carries canonical
    /// bytes and a derived id
    pub fn from_data(
        context: &NetworkContext,
        data: TransactionData,
        strict: bool,
        options: SerialiseOptions,
    ) -> Result<Transaction, TransactionError> {
        let serialised = Serialiser::serialise(context, &data, SerialiseOptions::empty())?;
        Self::from_bytes(context, &serialised, strict, options)
    }

    fn from_serialised(
        context: &NetworkContext,
        serialised: &[u8],
        options: SerialiseOptions,
    ) -> Result<Transaction, TransactionError> {
        let decode = || -> Result<Transaction, TransactionError> {
            let mut transaction = Deserialiser::deserialise(context, serialised, options)?;
            transaction.data.id = Some(Utils::get_id(context, &transaction.data, options)?);
            transaction.verified = true;
            Ok(transaction)
        };
        decode().map_err(wrap)
    }
}

fn wrap(error: TransactionError) -> TransactionError {
    if error.is_passthrough() || matches!(error, TransactionError::InvalidTransactionBytes(_)) {
        return error;
    }
    TransactionError::InvalidTransactionBytes(error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transactions::asset::Asset;
    use serde_json::json;

    fn genesis_registration() -> Value {
        json!({
            "amount": "0",
            "asset": { "delegate": { "username": "gym" } },
            "fee": "0",
            "id": "083f81f2b52d918d1fce0eade7a78cee5a30e493bfa3a188fb582404fe7da589",
            "network": 63,
            "nonce": "1",
            "senderPublicKey": "022bcee076006120b24f145d495686d2afc880079daf2eb20d8be9bf0e434ca3e1",
            "signature": "84b3b05934ce04a4096e67dd5c2af8ba74c2a4bbb1c2de3db00002a858df22a2e78055b573a52909b6198e8209a0e82e23d92a403eb4898caf52ccf50c9f9c10",
            "type": 2,
            "typeGroup": 1,
            "version": 2
        })
    }

    fn genesis_transfer() -> Value {
        json!({
            "amount": "52073757600000000",
            "expiration": 0,
            "fee": "0",
            "id": "2b290b5c805517e701d4fcde43ab4cf4a27acfaed6beeb1e3481fa6464287dc7",
            "network": 63,
            "nonce": "1",
            "recipientId": "SP77TpbBYC2nCpaCg3u1BBsYU7zqwqzGo7",
            "senderPublicKey": "03cd1eb4404ddbcc37e0a056841444b2099207647826dca70835fe2f219b48ae9c",
            "signature": "5fc1cc917f117e5880c190e74b85746ee93ca8b1c23433fd65c274c6f3bbe81e058aa41d4a0cea2cecc5864938f3473bedf00af300cb1bad28cd0ebcaae0edfa",
            "type": 0,
            "typeGroup": 1,
            "version": 2
        })
    }

    #[test]
    fn test_genesis_delegate_registration() {
        let context = NetworkContext::from_preset("mainnet").unwrap();
        let transaction = TransactionFactory::from_json(&context, &genesis_registration()).unwrap();

        assert_eq!(
            transaction.id(),
            Some("083f81f2b52d918d1fce0eade7a78cee5a30e493bfa3a188fb582404fe7da589")
        );
        assert!(transaction.verified);
        assert!(transaction.verify(&context).unwrap());
        assert_eq!(transaction.key(), "delegateRegistration");
        assert_eq!(
            transaction.data.asset,
            Some(Asset::DelegateRegistration {
                username: "gym".to_string()
            })
        );
    }

    #[test]
    fn test_genesis_legacy_transfer() {
        let context = NetworkContext::from_preset("mainnet").unwrap();
        let transaction = TransactionFactory::from_json(&context, &genesis_transfer()).unwrap();

        assert_eq!(
            transaction.id(),
            Some("2b290b5c805517e701d4fcde43ab4cf4a27acfaed6beeb1e3481fa6464287dc7")
        );
        assert!(transaction.verify(&context).unwrap());

        let json = transaction.to_json();
        assert_eq!(json["recipientId"], "SP77TpbBYC2nCpaCg3u1BBsYU7zqwqzGo7");
        assert_eq!(json["amount"], "52073757600000000");

        let decoded = TransactionFactory::from_hex(&context, &hex::encode(&transaction.serialised)).unwrap();
        assert_eq!(decoded.data, transaction.data);
        assert_eq!(decoded.serialised, transaction.serialised);
    }

    #[test]
    fn test_unsafe_keeps_given_id() {
        let context = NetworkContext::from_preset("mainnet").unwrap();
        let transaction = TransactionFactory::from_json(&context, &genesis_registration()).unwrap();

        let decoded =
            TransactionFactory::from_bytes_unsafe(&context, &transaction.serialised, Some("cafe")).unwrap();
        assert_eq!(decoded.id(), Some("cafe"));
        assert!(decoded.verified);

        let rehashed = TransactionFactory::from_bytes_unsafe(&context, &transaction.serialised, None).unwrap();
        assert_eq!(rehashed.id(), transaction.id());
    }

    #[test]
    fn test_error_wrapping() {
        let context = NetworkContext::from_preset("testnet").unwrap();
        assert!(matches!(
            TransactionFactory::from_hex(&context, "ff02"),
            Err(TransactionError::InvalidTransactionBytes(_))
        ));
        assert!(matches!(
            TransactionFactory::from_hex(&context, "not hex"),
            Err(TransactionError::InvalidTransactionBytes(_))
        ));
        assert!(matches!(
            TransactionFactory::from_bytes_unsafe(&context, &[0xff], None),
            Err(TransactionError::InvalidTransactionBytes(_))
        ));
    }

    #[test]
    fn test_oversized_memo_is_rejected() {
        let context = NetworkContext::from_preset("mainnet").unwrap();
        let mut json = genesis_registration();
        json["memo"] = json!("a".repeat(256));

        assert!(matches!(
            TransactionFactory::from_json(&context, &json),
            Err(TransactionError::MemoLengthExceeded(255))
        ));
    }

    #[test]
    fn test_version_errors_pass_through() {
        let context = NetworkContext::from_preset("mainnet").unwrap();
        let transaction = TransactionFactory::from_json(&context, &genesis_registration()).unwrap();
        context.config().set_height(1_175_000);

        assert!(matches!(
            TransactionFactory::from_bytes(&context, &transaction.serialised, true, SerialiseOptions::empty()),
            Err(TransactionError::Version(2))
        ));
        let relaxed =
            TransactionFactory::from_bytes(&context, &transaction.serialised, false, SerialiseOptions::empty())
                .unwrap();
        assert_eq!(relaxed.id(), transaction.id());
    }
}
