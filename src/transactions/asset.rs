//! Variant specific transaction payloads

use serde::{Deserialize, Serialize};

use crate::utils::BigNumber;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiSignatureAsset {
    pub min: u8,
    pub public_keys: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferItem {
    pub amount: BigNumber,
    pub recipient_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtlcLockExpiration {
    #[serde(rename = "type")]
    pub expiration_type: u8,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtlcLockAsset {
    pub secret_hash: String,
    pub expiration: HtlcLockExpiration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtlcClaimAsset {
    pub hash_type: u8,
    pub lock_transaction_id: String,
    pub unlock_secret: String,
}

/// Payload of one transaction variant
///
/// Amount, expiration and recipient of the legacy transfer, the HTLC lock and
/// the burn are carried here too, although they sit at the top level of the
/// JSON form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asset {
    LegacyTransfer {
        amount: BigNumber,
        expiration: u32,
        recipient_id: Option<String>,
    },
    SecondSignature {
        public_key: String,
    },
    DelegateRegistration {
        username: String,
    },
    /// `+publicKey` / `-publicKey` or `+username` / `-username`
    LegacyVote {
        votes: Vec<String>,
    },
    MultiSignature(MultiSignatureAsset),
    /// Base58 encoded multihash
    Ipfs(String),
    Transfer(Vec<TransferItem>),
    DelegateResignation {
        resignation_type: Option<u8>,
    },
    HtlcLock {
        amount: BigNumber,
        recipient_id: Option<String>,
        lock: Option<HtlcLockAsset>,
    },
    HtlcClaim(HtlcClaimAsset),
    HtlcRefund {
        lock_transaction_id: String,
    },
    Burn {
        amount: BigNumber,
    },
    /// Delegate name and weight in hundredths of a percent
    Vote(Vec<(String, u16)>),
}

impl Asset {
    /// Top level amount, for the variants that move a single amount
    pub fn amount(&self) -> Option<&BigNumber> {
        match self {
            Asset::LegacyTransfer { amount, .. }
            | Asset::HtlcLock { amount, .. }
            | Asset::Burn { amount } => Some(amount),
            _ => None,
        }
    }

    pub fn recipient_id(&self) -> Option<&str> {
        match self {
            Asset::LegacyTransfer { recipient_id, .. } | Asset::HtlcLock { recipient_id, .. } => {
                recipient_id.as_deref()
            }
            _ => None,
        }
    }

    pub fn expiration(&self) -> Option<u32> {
        match self {
            Asset::LegacyTransfer { expiration, .. } => Some(*expiration),
            _ => None,
        }
    }

    pub fn multi_signature(&self) -> Option<&MultiSignatureAsset> {
        match self {
            Asset::MultiSignature(asset) => Some(asset),
            _ => None,
        }
    }
}
