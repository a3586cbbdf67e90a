//! JSON projection of transactions
//!
//! Amounts are decimal strings. Amount, expiration and recipient of the
//! single-recipient variants sit at the top level rather than in `asset`.

use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

use super::asset::{
    Asset, HtlcClaimAsset, HtlcLockAsset, MultiSignatureAsset, TransferItem,
};
use super::transaction::TransactionData;
use super::types::{CoreTransactionType as Core, SolarTransactionType as Solar, TransactionTypeGroup};
use super::TransactionError;
use crate::utils::BigNumber;

impl TransactionData {
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        if let Some(id) = &self.id {
            map.insert("id".into(), json!(id));
        }
        map.insert("headerType".into(), json!(self.header_type));
        map.insert("version".into(), json!(self.version));
        if let Some(network) = self.network {
            map.insert("network".into(), json!(network));
        }
        if self.type_group != TransactionTypeGroup::Core as u32 {
            map.insert("typeGroup".into(), json!(self.type_group));
        }
        map.insert("type".into(), json!(self.transaction_type));
        map.insert("nonce".into(), json!(self.nonce.to_string()));
        if let Some(sender) = &self.sender_public_key {
            map.insert("senderPublicKey".into(), json!(sender));
        }
        map.insert("fee".into(), json!(self.fee.to_string()));
        if let Some(burned_fee) = &self.burned_fee {
            map.insert("burnedFee".into(), json!(burned_fee.to_string()));
        }
        if let Some(memo) = &self.memo {
            map.insert("memo".into(), json!(memo));
        }

        if let Some(amount) = self.amount() {
            map.insert("amount".into(), json!(amount.to_string()));
        }
        if let Some(expiration) = self.expiration() {
            map.insert("expiration".into(), json!(expiration));
        }
        if let Some(recipient_id) = self.recipient_id() {
            map.insert("recipientId".into(), json!(recipient_id));
        }
        if let Some(asset) = self.asset.as_ref().and_then(asset_to_json) {
            map.insert("asset".into(), asset);
        }

        if let Some(signature) = &self.signature {
            map.insert("signature".into(), json!(signature));
        }
        if let Some(second_signature) = &self.second_signature {
            map.insert("secondSignature".into(), json!(second_signature));
        }
        if let Some(signatures) = &self.signatures {
            map.insert("signatures".into(), json!(signatures));
        }
        if let Some(block_id) = &self.block_id {
            map.insert("blockId".into(), json!(block_id));
        }
        if let Some(block_height) = self.block_height {
            map.insert("blockHeight".into(), json!(block_height));
        }
        if let Some(sequence) = self.sequence {
            map.insert("sequence".into(), json!(sequence));
        }
        Value::Object(map)
    }

    /// Parse the JSON projection; `vendorField`, `signSignature` and
    /// `asset.payments` are accepted as older spellings
    pub fn from_json(value: &Value) -> Result<Self, TransactionError> {
        let object = value
            .as_object()
            .ok_or_else(|| TransactionError::Schema("Transaction must be a JSON object".into()))?;

        let mut data = TransactionData {
            id: string(value, "/id"),
            header_type: integer(value, "/headerType")?.unwrap_or(0),
            version: integer(value, "/version")?.unwrap_or(0),
            network: integer(value, "/network")?,
            type_group: integer(value, "/typeGroup")?.unwrap_or(TransactionTypeGroup::Core as u32),
            transaction_type: integer(value, "/type")?
                .ok_or_else(|| TransactionError::Schema("Missing transaction type".into()))?,
            nonce: parse::<BigNumber>(value, "/nonce")?.unwrap_or_default(),
            sender_public_key: string(value, "/senderPublicKey"),
            fee: parse::<BigNumber>(value, "/fee")?.unwrap_or_default(),
            burned_fee: parse(value, "/burnedFee")?,
            memo: string(value, "/memo").or_else(|| string(value, "/vendorField")),
            signature: string(value, "/signature"),
            second_signature: string(value, "/secondSignature")
                .or_else(|| string(value, "/signSignature")),
            signatures: parse(value, "/signatures")?,
            block_id: string(value, "/blockId"),
            block_height: integer(value, "/blockHeight")?,
            sequence: integer(value, "/sequence")?,
            timestamp: integer(value, "/timestamp")?,
            ..Default::default()
        };
        data.asset = asset_from_json(value, object.contains_key("asset"), &data)?;
        Ok(data)
    }
}

fn asset_to_json(asset: &Asset) -> Option<Value> {
    let value = match asset {
        Asset::LegacyTransfer { .. } | Asset::Burn { .. } => return None,
        Asset::HtlcLock { lock, .. } => {
            let lock = lock.as_ref()?;
            json!({
                "lock": {
                    "secretHash": lock.secret_hash,
                    "expiration": { "type": lock.expiration.expiration_type, "value": lock.expiration.value },
                }
            })
        }
        Asset::SecondSignature { public_key } => json!({ "signature": { "publicKey": public_key } }),
        Asset::DelegateRegistration { username } => json!({ "delegate": { "username": username } }),
        Asset::LegacyVote { votes } => json!({ "votes": votes }),
        Asset::MultiSignature(multi_signature) => json!({
            "multiSignature": {
                "min": multi_signature.min,
                "publicKeys": multi_signature.public_keys,
            }
        }),
        Asset::Ipfs(hash) => json!({ "ipfs": hash }),
        Asset::Transfer(transfers) => {
            let transfers: Vec<Value> = transfers
                .iter()
                .map(|transfer| {
                    json!({ "amount": transfer.amount.to_string(), "recipientId": transfer.recipient_id })
                })
                .collect();
            json!({ "transfers": transfers })
        }
        Asset::DelegateResignation { resignation_type } => match resignation_type {
            Some(resignation_type) => json!({ "resignationType": resignation_type }),
            None => json!({}),
        },
        Asset::HtlcClaim(claim) => json!({
            "claim": {
                "hashType": claim.hash_type,
                "lockTransactionId": claim.lock_transaction_id,
                "unlockSecret": claim.unlock_secret,
            }
        }),
        Asset::HtlcRefund {
            lock_transaction_id,
        } => json!({ "refund": { "lockTransactionId": lock_transaction_id } }),
        Asset::Vote(votes) => {
            let votes: Map<String, Value> = votes
                .iter()
                .map(|(delegate, weight)| (delegate.clone(), percent_to_json(*weight)))
                .collect();
            json!({ "votes": votes })
        }
    };
    Some(value)
}

/// Whole percentages stay integers, fractional ones become floats
fn percent_to_json(weight: u16) -> Value {
    if weight % 100 == 0 {
        json!(weight / 100)
    } else {
        json!(f64::from(weight) / 100.0)
    }
}

fn asset_from_json(
    value: &Value,
    has_asset: bool,
    data: &TransactionData,
) -> Result<Option<Asset>, TransactionError> {
    let asset = match data.type_group {
        group if group == TransactionTypeGroup::Core as u32 => match data.transaction_type {
            t if t == Core::LegacyTransfer as u16 => Asset::LegacyTransfer {
                amount: required(value, "/amount")?,
                expiration: integer(value, "/expiration")?.unwrap_or(0),
                recipient_id: string(value, "/recipientId"),
            },
            t if t == Core::SecondSignature as u16 => Asset::SecondSignature {
                public_key: required(value, "/asset/signature/publicKey")?,
            },
            t if t == Core::DelegateRegistration as u16 => Asset::DelegateRegistration {
                username: required(value, "/asset/delegate/username")?,
            },
            t if t == Core::Vote as u16 => Asset::LegacyVote {
                votes: required(value, "/asset/votes")?,
            },
            t if t == Core::MultiSignature as u16 => {
                Asset::MultiSignature(required::<MultiSignatureAsset>(value, "/asset/multiSignature")?)
            }
            t if t == Core::Ipfs as u16 => Asset::Ipfs(required(value, "/asset/ipfs")?),
            t if t == Core::Transfer as u16 => {
                let transfers = match parse::<Vec<TransferItem>>(value, "/asset/transfers")? {
                    Some(transfers) => transfers,
                    None => required(value, "/asset/payments")?,
                };
                Asset::Transfer(transfers)
            }
            t if t == Core::DelegateResignation as u16 => {
                if !has_asset {
                    return Ok(None);
                }
                Asset::DelegateResignation {
                    resignation_type: integer(value, "/asset/resignationType")?,
                }
            }
            t if t == Core::HtlcLock as u16 => Asset::HtlcLock {
                amount: required(value, "/amount")?,
                recipient_id: string(value, "/recipientId"),
                lock: parse::<HtlcLockAsset>(value, "/asset/lock")?,
            },
            t if t == Core::HtlcClaim as u16 => {
                Asset::HtlcClaim(required::<HtlcClaimAsset>(value, "/asset/claim")?)
            }
            t if t == Core::HtlcRefund as u16 => Asset::HtlcRefund {
                lock_transaction_id: required(value, "/asset/refund/lockTransactionId")?,
            },
            _ => return Ok(None),
        },
        group if group == TransactionTypeGroup::Solar as u32 => match data.transaction_type {
            t if t == Solar::Burn as u16 => Asset::Burn {
                amount: required(value, "/amount")?,
            },
            t if t == Solar::Vote as u16 => Asset::Vote(weighted_votes(value)?),
            _ => return Ok(None),
        },
        _ => return Ok(None),
    };
    Ok(Some(asset))
}

fn weighted_votes(value: &Value) -> Result<Vec<(String, u16)>, TransactionError> {
    let Some(votes) = value.pointer("/asset/votes") else {
        return Ok(Vec::new());
    };
    let votes = votes
        .as_object()
        .ok_or_else(|| TransactionError::Schema("asset.votes must be an object".into()))?;

    votes
        .iter()
        .map(|(delegate, percent)| {
            let weight = percent
                .as_f64()
                .map(|percent| (percent * 100.0).round())
                .filter(|weight| (0.0..=f64::from(u16::MAX)).contains(weight))
                .ok_or_else(|| TransactionError::Schema(format!("Invalid vote percent for {}", delegate)))?;
            Ok((delegate.clone(), weight as u16))
        })
        .collect()
}

// =============================================================================
// Field access
// =============================================================================

fn string(value: &Value, pointer: &str) -> Option<String> {
    value.pointer(pointer).and_then(Value::as_str).map(str::to_string)
}

fn integer<T: TryFrom<u64>>(value: &Value, pointer: &str) -> Result<Option<T>, TransactionError> {
    match value.pointer(pointer) {
        None | Some(Value::Null) => Ok(None),
        Some(field) => field
            .as_u64()
            .and_then(|number| T::try_from(number).ok())
            .map(Some)
            .ok_or_else(|| TransactionError::Schema(format!("Invalid integer at {}", pointer))),
    }
}

fn parse<T: DeserializeOwned>(value: &Value, pointer: &str) -> Result<Option<T>, TransactionError> {
    match value.pointer(pointer) {
        None | Some(Value::Null) => Ok(None),
        Some(field) => Ok(Some(serde_json::from_value(field.clone())?)),
    }
}

fn required<T: DeserializeOwned>(value: &Value, pointer: &str) -> Result<T, TransactionError> {
    parse(value, pointer)?.ok_or_else(|| TransactionError::Schema(format!("Missing {}", pointer)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_json() {
        let data = TransactionData {
            version: 3,
            network: Some(30),
            type_group: 1,
            transaction_type: 6,
            nonce: BigNumber::from(2u64),
            fee: BigNumber::from(10u64),
            memo: Some("hello".to_string()),
            asset: Some(Asset::Transfer(vec![TransferItem {
                amount: BigNumber::from(7u64),
                recipient_id: "D61mfSggzbvQgTUe6JhYKH2doHaqJ3Dyib".to_string(),
            }])),
            timestamp: Some(99),
            ..Default::default()
        };
        let json = data.to_json();

        assert!(json.get("typeGroup").is_none());
        assert!(json.get("timestamp").is_none());
        assert_eq!(json["nonce"], "2");
        assert_eq!(json["asset"]["transfers"][0]["amount"], "7");

        let mut parsed = TransactionData::from_json(&json).unwrap();
        parsed.timestamp = Some(99);
        assert_eq!(parsed, data);
    }

    #[test]
    fn test_legacy_aliases() {
        let json = json!({
            "type": 6,
            "fee": 10,
            "vendorField": "old memo",
            "asset": { "payments": [{ "amount": "3", "recipientId": "D61mfSggzbvQgTUe6JhYKH2doHaqJ3Dyib" }] }
        });
        let data = TransactionData::from_json(&json).unwrap();
        assert_eq!(data.type_group, 1);
        assert_eq!(data.memo.as_deref(), Some("old memo"));
        assert_eq!(data.fee, BigNumber::from(10u64));
        assert_eq!(
            data.asset,
            Some(Asset::Transfer(vec![TransferItem {
                amount: BigNumber::from(3u64),
                recipient_id: "D61mfSggzbvQgTUe6JhYKH2doHaqJ3Dyib".to_string(),
            }]))
        );
    }

    #[test]
    fn test_top_level_amount() {
        let json = json!({
            "type": 0,
            "typeGroup": 2,
            "nonce": "5",
            "fee": "0",
            "amount": "2000000",
        });
        let data = TransactionData::from_json(&json).unwrap();
        assert_eq!(
            data.asset,
            Some(Asset::Burn {
                amount: BigNumber::from(2_000_000u64)
            })
        );

        let back = data.to_json();
        assert_eq!(back["amount"], "2000000");
        assert_eq!(back["typeGroup"], 2);
        assert!(back.get("asset").is_none());
    }

    #[test]
    fn test_weighted_votes() {
        let json = json!({
            "type": 2,
            "typeGroup": 2,
            "fee": "9000000",
            "asset": { "votes": { "bravo": 50, "alpha": 33.33, "charlie": 16.67 } }
        });
        let data = TransactionData::from_json(&json).unwrap();
        assert_eq!(
            data.asset,
            Some(Asset::Vote(vec![
                ("bravo".to_string(), 5_000),
                ("alpha".to_string(), 3_333),
                ("charlie".to_string(), 1_667),
            ]))
        );

        let back = data.to_json();
        assert_eq!(back["asset"]["votes"]["bravo"], 50);
        assert_eq!(back["asset"]["votes"]["alpha"], 33.33);
    }

    #[test]
    fn test_schema_errors() {
        assert!(matches!(
            TransactionData::from_json(&json!({ "fee": "1" })),
            Err(TransactionError::Schema(_))
        ));
        assert!(matches!(
            TransactionData::from_json(&json!({ "type": 2, "fee": "1", "asset": {} })),
            Err(TransactionError::Schema(_))
        ));
        assert!(matches!(
            TransactionData::from_json(&json!(["not", "an", "object"])),
            Err(TransactionError::Schema(_))
        ));
    }
}
