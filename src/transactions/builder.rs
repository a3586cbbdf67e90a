//! Fluent transaction builders
//!
//! A [`TransactionBuilder`] is parameterised by a marker from [`kind`], which
//! decides the variant specific setters available on it. Every builder starts
//! at version 3 with the static fee of its variant.
//!
//! ```no_run
//! use solar_crypto::{BuilderFactory, NetworkContext};
//!
//! let context = NetworkContext::from_preset("testnet")?;
//! let transaction = BuilderFactory::transfer(&context)
//!     .recipient_id("D61mfSggzbvQgTUe6JhYKH2doHaqJ3Dyib")
//!     .amount(100_000_000u64)
//!     .nonce(1u64)
//!     .sign("this is a top secret passphrase")?
//!     .build()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::marker::PhantomData;

use super::asset::{Asset, HtlcClaimAsset, HtlcLockAsset, MultiSignatureAsset, TransferItem};
use super::factory::TransactionFactory;
use super::handlers::length_u8;
use super::signer::Signer;
use super::transaction::{Transaction, TransactionData};
use super::types::{CoreTransactionType, InternalTransactionType, SerialiseOptions, SolarTransactionType};
use super::utils::Utils;
use super::verifier::Verifier;
use super::TransactionError;
use crate::context::NetworkContext;
use crate::identities::Keys;
use crate::utils::{sort_votes, BigNumber};

const MEMO_LIMIT: usize = 255;
const MAX_PARTICIPANTS: usize = 16;
const FULL_WEIGHT: u16 = 10_000;

/// Builders never run the supported version check themselves
const BUILDER_OPTIONS: SerialiseOptions = SerialiseOptions::DISABLE_VERSION_CHECK;

/// Variant markers
pub mod kind {
    pub struct Transfer;
    pub struct SecondSignature;
    pub struct DelegateRegistration;
    pub struct DelegateResignation;
    pub struct MultiSignature;
    pub struct Ipfs;
    pub struct HtlcLock;
    pub struct HtlcClaim;
    pub struct HtlcRefund;
    pub struct Burn;
    pub struct Vote;
}

// =============================================================================
// Builder Factory
// =============================================================================

pub struct BuilderFactory;

impl BuilderFactory {
    pub fn transfer(context: &NetworkContext) -> TransactionBuilder<'_, kind::Transfer> {
        TransactionBuilder::new(
            context,
            InternalTransactionType::core(CoreTransactionType::Transfer),
            Some(Asset::Transfer(Vec::new())),
        )
    }

    /// Same as [`BuilderFactory::transfer`]
    pub fn multi_payment(context: &NetworkContext) -> TransactionBuilder<'_, kind::Transfer> {
        Self::transfer(context)
    }

    pub fn second_signature(context: &NetworkContext) -> TransactionBuilder<'_, kind::SecondSignature> {
        TransactionBuilder::new(
            context,
            InternalTransactionType::core(CoreTransactionType::SecondSignature),
            None,
        )
    }

    pub fn delegate_registration(
        context: &NetworkContext,
    ) -> TransactionBuilder<'_, kind::DelegateRegistration> {
        TransactionBuilder::new(
            context,
            InternalTransactionType::core(CoreTransactionType::DelegateRegistration),
            None,
        )
    }

    pub fn delegate_resignation(
        context: &NetworkContext,
    ) -> TransactionBuilder<'_, kind::DelegateResignation> {
        TransactionBuilder::new(
            context,
            InternalTransactionType::core(CoreTransactionType::DelegateResignation),
            Some(Asset::DelegateResignation {
                resignation_type: None,
            }),
        )
    }

    pub fn multi_signature(context: &NetworkContext) -> TransactionBuilder<'_, kind::MultiSignature> {
        TransactionBuilder::new(
            context,
            InternalTransactionType::core(CoreTransactionType::MultiSignature),
            Some(Asset::MultiSignature(MultiSignatureAsset {
                min: 0,
                public_keys: Vec::new(),
            })),
        )
    }

    pub fn ipfs(context: &NetworkContext) -> TransactionBuilder<'_, kind::Ipfs> {
        TransactionBuilder::new(context, InternalTransactionType::core(CoreTransactionType::Ipfs), None)
    }

    pub fn htlc_lock(context: &NetworkContext) -> TransactionBuilder<'_, kind::HtlcLock> {
        TransactionBuilder::new(
            context,
            InternalTransactionType::core(CoreTransactionType::HtlcLock),
            Some(Asset::HtlcLock {
                amount: BigNumber::zero(),
                recipient_id: None,
                lock: None,
            }),
        )
    }

    pub fn htlc_claim(context: &NetworkContext) -> TransactionBuilder<'_, kind::HtlcClaim> {
        TransactionBuilder::new(
            context,
            InternalTransactionType::core(CoreTransactionType::HtlcClaim),
            None,
        )
    }

    pub fn htlc_refund(context: &NetworkContext) -> TransactionBuilder<'_, kind::HtlcRefund> {
        TransactionBuilder::new(
            context,
            InternalTransactionType::core(CoreTransactionType::HtlcRefund),
            None,
        )
    }

    pub fn burn(context: &NetworkContext) -> TransactionBuilder<'_, kind::Burn> {
        TransactionBuilder::new(
            context,
            InternalTransactionType::solar(SolarTransactionType::Burn),
            Some(Asset::Burn {
                amount: BigNumber::zero(),
            }),
        )
    }

    pub fn vote(context: &NetworkContext) -> TransactionBuilder<'_, kind::Vote> {
        TransactionBuilder::new(
            context,
            InternalTransactionType::solar(SolarTransactionType::Vote),
            Some(Asset::Vote(Vec::new())),
        )
    }
}

// =============================================================================
// Common Setters
// =============================================================================

pub struct TransactionBuilder<'a, K> {
    context: &'a NetworkContext,
    data: TransactionData,
    kind: PhantomData<K>,
}

impl<'a, K> TransactionBuilder<'a, K> {
    fn new(context: &'a NetworkContext, internal_type: InternalTransactionType, asset: Option<Asset>) -> Self {
        let mut data = TransactionData {
            version: 3,
            type_group: internal_type.type_group,
            transaction_type: internal_type.transaction_type,
            asset,
            ..Default::default()
        };
        data.fee = Self::static_fee(context, &data);
        Self {
            context,
            data,
            kind: PhantomData,
        }
    }

    fn static_fee(context: &NetworkContext, data: &TransactionData) -> BigNumber {
        context
            .registry()
            .get(data.internal_type())
            .map(|handler| handler.static_fee(context.config().get_milestone(None), Some(data)))
            .unwrap_or_else(|_| BigNumber::zero())
    }

    /// Fields collected so far
    pub fn data(&self) -> &TransactionData {
        &self.data
    }

    pub fn version(mut self, version: u8) -> Self {
        self.data.version = version;
        self
    }

    pub fn type_group(mut self, type_group: u32) -> Self {
        self.data.type_group = type_group;
        self
    }

    pub fn nonce(mut self, nonce: impl Into<BigNumber>) -> Self {
        self.data.nonce = nonce.into();
        self
    }

    pub fn network(mut self, network: u8) -> Self {
        self.data.network = Some(network);
        self
    }

    pub fn fee(mut self, fee: impl Into<BigNumber>) -> Self {
        self.data.fee = fee.into();
        self
    }

    pub fn sender_public_key(mut self, public_key: impl Into<String>) -> Self {
        self.data.sender_public_key = Some(public_key.into());
        self
    }

    /// Attach a memo of at most 255 bytes; an empty memo is ignored
    pub fn memo(mut self, memo: &str) -> Result<Self, TransactionError> {
        if memo.len() > MEMO_LIMIT {
            return Err(TransactionError::MemoLengthExceeded(MEMO_LIMIT));
        }
        if !memo.is_empty() {
            self.data.memo = Some(memo.to_string());
        }
        Ok(self)
    }

    /// Older name for [`TransactionBuilder::memo`]
    pub fn vendor_field(self, memo: &str) -> Result<Self, TransactionError> {
        self.memo(memo)
    }

    pub fn sign(self, passphrase: &str) -> Result<Self, TransactionError> {
        let keys = Keys::from_passphrase(passphrase)?;
        self.sign_with_keys(&keys)
    }

    /// Sign with a WIF; `wif_version` defaults to the network's
    pub fn sign_with_wif(self, wif: &str, wif_version: Option<u8>) -> Result<Self, TransactionError> {
        let keys = Keys::from_wif(wif, wif_version.unwrap_or_else(|| self.context.wif_version()))?;
        self.sign_with_keys(&keys)
    }

    pub fn sign_with_keys(mut self, keys: &Keys) -> Result<Self, TransactionError> {
        self.data.sender_public_key = Some(keys.public_key_hex());
        let mut signing = self.signing_object();
        self.data.signature = Some(Signer::sign(self.context, &mut signing, keys, BUILDER_OPTIONS)?);
        Ok(self)
    }

    pub fn second_sign(self, passphrase: &str) -> Result<Self, TransactionError> {
        let keys = Keys::from_passphrase(passphrase)?;
        self.second_sign_with_keys(&keys)
    }

    pub fn second_sign_with_wif(self, wif: &str, wif_version: Option<u8>) -> Result<Self, TransactionError> {
        let keys = Keys::from_wif(wif, wif_version.unwrap_or_else(|| self.context.wif_version()))?;
        self.second_sign_with_keys(&keys)
    }

    pub fn second_sign_with_keys(mut self, keys: &Keys) -> Result<Self, TransactionError> {
        let mut signing = self.signing_object();
        self.data.second_signature = Some(Signer::second_sign(self.context, &mut signing, keys)?);
        Ok(self)
    }

    /// Add the signature of participant `index`
    pub fn multi_sign(self, passphrase: &str, index: u8) -> Result<Self, TransactionError> {
        let keys = Keys::from_passphrase(passphrase)?;
        self.multi_sign_with_keys(index, &keys)
    }

    pub fn multi_sign_with_wif(
        self,
        index: u8,
        wif: &str,
        wif_version: Option<u8>,
    ) -> Result<Self, TransactionError> {
        let keys = Keys::from_wif(wif, wif_version.unwrap_or_else(|| self.context.wif_version()))?;
        self.multi_sign_with_keys(index, &keys)
    }

    pub fn multi_sign_with_keys(mut self, index: u8, keys: &Keys) -> Result<Self, TransactionError> {
        let mut signing = self.signing_object();
        signing.signatures.get_or_insert_with(Vec::new);
        Signer::multi_sign(self.context, &mut signing, keys, Some(index))?;
        self.data.signatures = signing.signatures;
        Ok(self)
    }

    /// Check the sender signature collected so far
    pub fn verify(&self) -> Result<bool, TransactionError> {
        Verifier::verify_hash(self.context, &self.data, BUILDER_OPTIONS)
    }

    /// Signed fields with the id filled in
    pub fn get_struct(&self) -> Result<TransactionData, TransactionError> {
        if self.data.sender_public_key.is_none()
            || (self.data.signature.is_none() && self.data.signatures.is_none())
        {
            return Err(TransactionError::MissingSignature);
        }

        let mut data = self.data.clone();
        data.id = Some(Utils::get_id(self.context, &self.data, BUILDER_OPTIONS)?);
        Ok(data)
    }

    /// Run the collected fields through the codec
    pub fn build(self) -> Result<Transaction, TransactionError> {
        TransactionFactory::from_data(self.context, self.data, false, BUILDER_OPTIONS)
    }

    /// Fields covered by signatures: the network byte falls back to the
    /// context's and no id is carried
    fn signing_object(&self) -> TransactionData {
        TransactionData {
            network: None,
            id: None,
            ..self.data.clone()
        }
    }
}

// =============================================================================
// Variant Setters
// =============================================================================

impl<'a> TransactionBuilder<'a, kind::Transfer> {
    fn transfers(&self) -> &[TransferItem] {
        match &self.data.asset {
            Some(Asset::Transfer(transfers)) => transfers,
            _ => &[],
        }
    }

    /// Single recipient amount; replaces any transfers added so far
    pub fn amount(mut self, amount: impl Into<BigNumber>) -> Self {
        let recipient_id = self
            .transfers()
            .first()
            .map(|transfer| transfer.recipient_id.clone())
            .unwrap_or_default();
        self.data.asset = Some(Asset::Transfer(vec![TransferItem {
            amount: amount.into(),
            recipient_id,
        }]));
        self
    }

    /// Single recipient; replaces any transfers added so far
    pub fn recipient_id(mut self, recipient_id: impl Into<String>) -> Self {
        let amount = self
            .transfers()
            .first()
            .map(|transfer| transfer.amount.clone())
            .unwrap_or_else(BigNumber::zero);
        self.data.asset = Some(Asset::Transfer(vec![TransferItem {
            amount,
            recipient_id: recipient_id.into(),
        }]));
        self
    }

    /// Append a payment, up to the milestone's transfer maximum
    pub fn add_transfer(
        mut self,
        recipient_id: impl Into<String>,
        amount: impl Into<BigNumber>,
    ) -> Result<Self, TransactionError> {
        let limit = self.context.config().get_milestone(None).max_transfers();
        if let Some(Asset::Transfer(transfers)) = &mut self.data.asset {
            if transfers.len() >= limit {
                return Err(TransactionError::MaximumTransferCountExceeded(limit));
            }
            transfers.push(TransferItem {
                amount: amount.into(),
                recipient_id: recipient_id.into(),
            });
        }
        Ok(self)
    }

    pub fn add_payment(
        self,
        recipient_id: impl Into<String>,
        amount: impl Into<BigNumber>,
    ) -> Result<Self, TransactionError> {
        self.add_transfer(recipient_id, amount)
    }
}

impl<'a> TransactionBuilder<'a, kind::SecondSignature> {
    /// Register the public key of `second_passphrase`
    pub fn signature_asset(mut self, second_passphrase: &str) -> Result<Self, TransactionError> {
        let public_key = Keys::from_passphrase(second_passphrase)?.public_key_hex();
        self.data.asset = Some(Asset::SecondSignature { public_key });
        Ok(self)
    }
}

impl<'a> TransactionBuilder<'a, kind::DelegateRegistration> {
    pub fn username_asset(mut self, username: impl Into<String>) -> Self {
        self.data.asset = Some(Asset::DelegateRegistration {
            username: username.into(),
        });
        self
    }
}

impl<'a> TransactionBuilder<'a, kind::DelegateResignation> {
    pub fn resignation_type_asset(mut self, resignation_type: u8) -> Self {
        self.data.asset = Some(Asset::DelegateResignation {
            resignation_type: Some(resignation_type),
        });
        self
    }
}

impl<'a> TransactionBuilder<'a, kind::MultiSignature> {
    /// Add a participant key; ignored once 16 keys are registered
    pub fn participant(mut self, public_key: impl Into<String>) -> Self {
        if let Some(Asset::MultiSignature(asset)) = &mut self.data.asset {
            if asset.public_keys.len() < MAX_PARTICIPANTS {
                asset.public_keys.push(public_key.into());
                self.data.fee = Self::static_fee(self.context, &self.data);
            }
        }
        self
    }

    pub fn min(mut self, min: u8) -> Self {
        if let Some(Asset::MultiSignature(asset)) = &mut self.data.asset {
            asset.min = min;
        }
        self
    }

    pub fn multi_signature_asset(mut self, multi_signature: MultiSignatureAsset) -> Self {
        self.data.asset = Some(Asset::MultiSignature(multi_signature));
        self.data.fee = Self::static_fee(self.context, &self.data);
        self
    }
}

impl<'a> TransactionBuilder<'a, kind::Ipfs> {
    /// Base58 encoded multihash
    pub fn ipfs_asset(mut self, ipfs_id: impl Into<String>) -> Self {
        self.data.asset = Some(Asset::Ipfs(ipfs_id.into()));
        self
    }
}

impl<'a> TransactionBuilder<'a, kind::HtlcLock> {
    pub fn amount(mut self, value: impl Into<BigNumber>) -> Self {
        if let Some(Asset::HtlcLock { amount, .. }) = &mut self.data.asset {
            *amount = value.into();
        }
        self
    }

    pub fn recipient_id(mut self, value: impl Into<String>) -> Self {
        if let Some(Asset::HtlcLock { recipient_id, .. }) = &mut self.data.asset {
            *recipient_id = Some(value.into());
        }
        self
    }

    pub fn lock_asset(mut self, value: HtlcLockAsset) -> Self {
        if let Some(Asset::HtlcLock { lock, .. }) = &mut self.data.asset {
            *lock = Some(value);
        }
        self
    }
}

impl<'a> TransactionBuilder<'a, kind::HtlcClaim> {
    pub fn claim_asset(mut self, claim: HtlcClaimAsset) -> Self {
        self.data.asset = Some(Asset::HtlcClaim(claim));
        self
    }
}

impl<'a> TransactionBuilder<'a, kind::HtlcRefund> {
    pub fn refund_asset(mut self, lock_transaction_id: impl Into<String>) -> Self {
        self.data.asset = Some(Asset::HtlcRefund {
            lock_transaction_id: lock_transaction_id.into(),
        });
        self
    }
}

impl<'a> TransactionBuilder<'a, kind::Burn> {
    pub fn amount(mut self, amount: impl Into<BigNumber>) -> Self {
        self.data.asset = Some(Asset::Burn { amount: amount.into() });
        self
    }
}

impl<'a> TransactionBuilder<'a, kind::Vote> {
    /// Split the vote evenly over `votes`
    ///
    /// Entries prefixed with `-` are dropped, a leading `+` is stripped and
    /// repeated names count once. Weights are whole hundredths of a percent;
    /// what does not divide evenly goes one unit at a time to the first
    /// delegates.
    pub fn votes_asset<S: AsRef<str>>(self, votes: &[S]) -> Result<Self, TransactionError> {
        let mut names: Vec<&str> = Vec::with_capacity(votes.len());
        for name in votes
            .iter()
            .map(AsRef::as_ref)
            .filter(|vote| !vote.starts_with('-'))
            .map(|vote| vote.strip_prefix('+').unwrap_or(vote))
        {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        if names.is_empty() {
            return Ok(self.weighted_votes_asset(Vec::new()));
        }

        let count = u16::from(length_u8("votes", names.len())?);
        let weight = FULL_WEIGHT / count;
        let remainder = usize::from(FULL_WEIGHT - weight * count);
        let weighted = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| (name.to_string(), if i < remainder { weight + 1 } else { weight }))
            .collect();
        Ok(self.weighted_votes_asset(weighted))
    }

    /// Explicit weights in hundredths of a percent
    pub fn weighted_votes_asset(mut self, mut votes: Vec<(String, u16)>) -> Self {
        sort_votes(&mut votes);
        self.data.asset = Some(Asset::Vote(votes));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identities::PublicKey;

    const PASSPHRASE: &str = "this is a top secret passphrase";
    const RECIPIENT: &str = "D61mfSggzbvQgTUe6JhYKH2doHaqJ3Dyib";

    #[test]
    fn test_transfer_round_trip() {
        let context = NetworkContext::from_preset("testnet").unwrap();
        let builder = BuilderFactory::transfer(&context)
            .recipient_id(RECIPIENT)
            .amount(250u64)
            .nonce(3u64)
            .memo("rent")
            .unwrap()
            .sign(PASSPHRASE)
            .unwrap();

        assert!(builder.verify().unwrap());
        let expected = builder.get_struct().unwrap();

        let transaction = builder.build().unwrap();
        assert_eq!(transaction.id(), expected.id.as_deref());
        assert!(transaction.verify(&context).unwrap());
        assert_eq!(transaction.data.memo.as_deref(), Some("rent"));
        assert_eq!(
            transaction.data.sender_public_key.as_deref(),
            Some("034151a3ec46b5670a682b0a63394f863587d1bc97483b1b6c70eb58e7f0aed192")
        );
    }

    #[test]
    fn test_transfer_limits() {
        let context = NetworkContext::from_preset("testnet").unwrap();
        let limit = context.config().get_milestone(None).max_transfers();

        let mut builder = BuilderFactory::multi_payment(&context);
        for i in 0..limit {
            builder = builder.add_transfer(RECIPIENT, i as u64 + 1).unwrap();
        }
        assert!(matches!(
            builder.add_transfer(RECIPIENT, 1u64),
            Err(TransactionError::MaximumTransferCountExceeded(max)) if max == limit
        ));

        let memo = "a".repeat(256);
        assert!(matches!(
            BuilderFactory::transfer(&context).memo(&memo),
            Err(TransactionError::MemoLengthExceeded(255))
        ));
    }

    #[test]
    fn test_unsigned_struct() {
        let context = NetworkContext::from_preset("testnet").unwrap();
        let builder = BuilderFactory::delegate_registration(&context).username_asset("gym");
        assert!(matches!(builder.get_struct(), Err(TransactionError::MissingSignature)));
        assert!(!builder.verify().unwrap());
    }

    #[test]
    fn test_second_signature() {
        let context = NetworkContext::from_preset("testnet").unwrap();
        let transaction = BuilderFactory::delegate_resignation(&context)
            .resignation_type_asset(1)
            .nonce(2u64)
            .sign(PASSPHRASE)
            .unwrap()
            .second_sign("second secret")
            .unwrap()
            .build()
            .unwrap();

        let second = PublicKey::from_passphrase("second secret").unwrap();
        assert!(transaction.verify(&context).unwrap());
        assert!(transaction.verify_second_signature(&context, &second).unwrap());
        assert_eq!(
            transaction.data.asset,
            Some(Asset::DelegateResignation {
                resignation_type: Some(1)
            })
        );
    }

    #[test]
    fn test_multi_signature_registration() {
        let context = NetworkContext::from_preset("testnet").unwrap();
        let passphrases = ["participant one", "participant two", "participant three"];
        let keys: Vec<Keys> = passphrases
            .iter()
            .map(|passphrase| Keys::from_passphrase(passphrase).unwrap())
            .collect();

        let mut builder = BuilderFactory::multi_signature(&context)
            .participant(keys[0].public_key_hex())
            .min(2);
        let single_fee = builder.data().fee.clone();
        for participant in &keys[1..] {
            builder = builder.participant(participant.public_key_hex());
        }
        assert_eq!(builder.data().fee, single_fee.divided_by(2u64).times(4u64));

        let transaction = builder
            .nonce(1u64)
            .multi_sign(passphrases[0], 0)
            .unwrap()
            .multi_sign(passphrases[2], 2)
            .unwrap()
            .sign(passphrases[0])
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(transaction.data.signatures.as_ref().map(Vec::len), Some(2));
        assert!(transaction.verify(&context).unwrap());
        assert!(Verifier::verify_signatures(&context, &transaction.data, transaction.data.multi_signature()).unwrap());
    }

    #[test]
    fn test_participant_cap() {
        let context = NetworkContext::from_preset("testnet").unwrap();
        let mut builder = BuilderFactory::multi_signature(&context);
        for i in 0..20 {
            builder = builder.participant(format!("{:066x}", i));
        }
        assert_eq!(
            builder.data().multi_signature().map(|asset| asset.public_keys.len()),
            Some(MAX_PARTICIPANTS)
        );
    }

    #[test]
    fn test_even_vote_split() {
        let context = NetworkContext::from_preset("testnet").unwrap();
        let builder = BuilderFactory::vote(&context)
            .votes_asset(&["+bravo", "alpha", "-gone", "charlie"])
            .unwrap();

        assert_eq!(
            builder.data().asset,
            Some(Asset::Vote(vec![
                ("bravo".to_string(), 3_334),
                ("alpha".to_string(), 3_333),
                ("charlie".to_string(), 3_333),
            ]))
        );

        let unvote = BuilderFactory::vote(&context).votes_asset(&["-bravo"]).unwrap();
        assert_eq!(unvote.data().asset, Some(Asset::Vote(Vec::new())));
    }

    #[test]
    fn test_vote_split_collapses_repeats_and_bounds_count() {
        let context = NetworkContext::from_preset("testnet").unwrap();
        let builder = BuilderFactory::vote(&context)
            .votes_asset(&["alpha", "+alpha", "beta"])
            .unwrap();
        assert_eq!(
            builder.data().asset,
            Some(Asset::Vote(vec![
                ("alpha".to_string(), 5_000),
                ("beta".to_string(), 5_000),
            ]))
        );

        let many: Vec<String> = (0..256).map(|i| format!("delegate{}", i)).collect();
        assert!(matches!(
            BuilderFactory::vote(&context).votes_asset(&many),
            Err(TransactionError::LengthExceeded { field: "votes", length: 256, max: 255 })
        ));
    }

    #[test]
    fn test_burn_and_vote_build() {
        let context = NetworkContext::from_preset("testnet").unwrap();
        let burn = BuilderFactory::burn(&context)
            .amount(5_000_000_000u64)
            .nonce(1u64)
            .sign(PASSPHRASE)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(burn.key(), "burn");
        assert_eq!(burn.data.amount(), Some(&BigNumber::from(5_000_000_000u64)));

        let vote = BuilderFactory::vote(&context)
            .weighted_votes_asset(vec![("gym".to_string(), 2_500), ("cactus1549".to_string(), 7_500)])
            .nonce(2u64)
            .sign(PASSPHRASE)
            .unwrap()
            .build()
            .unwrap();
        assert!(vote.verify(&context).unwrap());
        assert_eq!(
            vote.data.asset,
            Some(Asset::Vote(vec![
                ("cactus1549".to_string(), 7_500),
                ("gym".to_string(), 2_500),
            ]))
        );
    }
}
