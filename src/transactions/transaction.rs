//! Decoded transactions

use super::asset::{Asset, MultiSignatureAsset};
use super::types::{InternalTransactionType, SerialiseOptions, TransactionTypeGroup};
use super::verifier::Verifier;
use super::TransactionError;
use crate::context::NetworkContext;
use crate::identities::Address;
use crate::utils::BigNumber;

/// Plain transaction fields
///
/// `id` is derived from the serialised bytes and only ever assigned by the
/// codec. The block fields are stamped when a transaction is attached to a
/// block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransactionData {
    pub id: Option<String>,
    pub header_type: u8,
    pub version: u8,
    /// Falls back to the network's address version byte when unset
    pub network: Option<u8>,
    pub type_group: u32,
    pub transaction_type: u16,
    pub nonce: BigNumber,
    pub sender_public_key: Option<String>,
    pub fee: BigNumber,
    pub burned_fee: Option<BigNumber>,
    pub memo: Option<String>,
    pub asset: Option<Asset>,
    pub signature: Option<String>,
    pub second_signature: Option<String>,
    pub signatures: Option<Vec<String>>,

    pub block_id: Option<String>,
    pub block_height: Option<u32>,
    pub sequence: Option<u32>,
    pub timestamp: Option<u32>,
}

impl TransactionData {
    pub fn internal_type(&self) -> InternalTransactionType {
        InternalTransactionType::new(self.transaction_type, self.type_group)
    }

    pub fn amount(&self) -> Option<&BigNumber> {
        self.asset.as_ref().and_then(Asset::amount)
    }

    pub fn expiration(&self) -> Option<u32> {
        self.asset.as_ref().and_then(Asset::expiration)
    }

    pub fn recipient_id(&self) -> Option<&str> {
        self.asset.as_ref().and_then(Asset::recipient_id)
    }

    pub fn multi_signature(&self) -> Option<&MultiSignatureAsset> {
        self.asset.as_ref().and_then(Asset::multi_signature)
    }
}

/// A transaction together with its canonical bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub data: TransactionData,
    pub serialised: Vec<u8>,
    pub verified: bool,
    key: &'static str,
}

impl Transaction {
    pub(crate) fn new(data: TransactionData, serialised: Vec<u8>, key: &'static str) -> Self {
        Self {
            data,
            serialised,
            verified: false,
            key,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.data.id.as_deref()
    }

    /// Registry key of the variant, e.g. `transfer`
    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn internal_type(&self) -> InternalTransactionType {
        self.data.internal_type()
    }

    /// Fee the network asks for this transaction at the configured height
    pub fn static_fee(&self, context: &NetworkContext) -> Result<BigNumber, TransactionError> {
        let handler = context.registry().get(self.internal_type())?;
        Ok(handler.static_fee(context.config().get_milestone(None), Some(&self.data)))
    }

    /// Portion of the fee destroyed at `height`
    pub fn set_burned_fee(&mut self, context: &NetworkContext, height: Option<u32>) {
        let milestone = context.config().get_milestone(height);
        let burned = milestone
            .burn
            .as_ref()
            .and_then(|burn| burn.fee_percent)
            .filter(|percent| (0..=100).contains(percent))
            .map(|percent| self.data.fee.times(percent).divided_by(100u64))
            .unwrap_or_else(BigNumber::zero);
        self.data.burned_fee = Some(burned);
    }

    pub fn verify(&self, context: &NetworkContext) -> Result<bool, TransactionError> {
        Verifier::verify(context, &self.data, SerialiseOptions::empty())
    }

    pub fn verify_second_signature(
        &self,
        context: &NetworkContext,
        public_key: &str,
    ) -> Result<bool, TransactionError> {
        Verifier::verify_second_signature(context, &self.data, public_key, SerialiseOptions::empty())
    }

    /// One line summary: `{address}#{nonce} {id tail} {Key} v{version}`
    pub fn describe(&self, context: &NetworkContext) -> String {
        let mut parts = Vec::new();
        if let Some(sender) = &self.data.sender_public_key {
            let address = Address::from_public_key(sender, context.network_version())
                .unwrap_or_else(|_| sender.clone());
            if self.data.nonce.is_zero() {
                parts.push(address);
            } else {
                parts.push(format!("{}#{}", address, self.data.nonce));
            }
        }
        if let Some(id) = &self.data.id {
            parts.push(id[id.len().saturating_sub(8)..].to_string());
        }

        let mut key = self.key.chars();
        let key = match key.next() {
            Some(first) => first.to_uppercase().chain(key).collect::<String>(),
            None => String::new(),
        };
        parts.push(format!("{} v{}", key, self.data.version));
        parts.join(" ")
    }

    pub fn to_json(&self) -> serde_json::Value {
        self.data.to_json()
    }

    pub fn is_core(&self) -> bool {
        self.data.type_group == TransactionTypeGroup::Core as u32
    }
}
