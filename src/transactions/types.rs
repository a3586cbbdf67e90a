//! Transaction type identifiers and serialisation options

use std::fmt;

use bitflags::bitflags;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum CoreTransactionType {
    LegacyTransfer = 0,
    SecondSignature = 1,
    DelegateRegistration = 2,
    Vote = 3,
    MultiSignature = 4,
    Ipfs = 5,
    Transfer = 6,
    DelegateResignation = 7,
    HtlcLock = 8,
    HtlcClaim = 9,
    HtlcRefund = 10,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum SolarTransactionType {
    Burn = 0,
    Vote = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum TransactionTypeGroup {
    Test = 0,
    Core = 1,
    Solar = 2,
    Reserved = 1000,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DelegateStatus {
    TemporaryResign = 0,
    PermanentResign = 1,
    NotResigned = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum HtlcLockExpirationType {
    EpochTimestamp = 1,
    BlockHeight = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum HtlcSecretHashType {
    Sha256 = 0,
    Sha384 = 1,
    Sha512 = 2,
    Sha3256 = 3,
    Sha3384 = 4,
    Sha3512 = 5,
    Keccak256 = 6,
    Keccak384 = 7,
    Keccak512 = 8,
}

/// `(type, typeGroup)` pair identifying a transaction variant
///
/// A plain value: two identities are the same key exactly when both numbers
/// match, which is all the registry needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InternalTransactionType {
    pub type_group: u32,
    pub transaction_type: u16,
}

impl InternalTransactionType {
    pub const fn new(transaction_type: u16, type_group: u32) -> Self {
        Self {
            type_group,
            transaction_type,
        }
    }

    pub const fn core(transaction_type: CoreTransactionType) -> Self {
        Self::new(transaction_type as u16, TransactionTypeGroup::Core as u32)
    }

    pub const fn solar(transaction_type: SolarTransactionType) -> Self {
        Self::new(transaction_type as u16, TransactionTypeGroup::Solar as u32)
    }
}

impl fmt::Display for InternalTransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let group = match self.type_group {
            0 => "Test",
            1 => "Core",
            2 => "Solar",
            1000 => "Reserved",
            other => return write!(f, "{}/{}", other, self.transaction_type),
        };
        write!(f, "{}/{}", group, self.transaction_type)
    }
}

bitflags! {
    /// Which parts of a transaction go into its bytes, and which checks run
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SerialiseOptions: u8 {
        const EXCLUDE_SIGNATURE = 0b0000_0001;
        const EXCLUDE_SECOND_SIGNATURE = 0b0000_0010;
        const EXCLUDE_MULTI_SIGNATURE = 0b0000_0100;
        const ACCEPT_LEGACY_VERSION = 0b0000_1000;
        const DISABLE_VERSION_CHECK = 0b0001_0000;
    }
}

impl SerialiseOptions {
    /// Either flag lifts the supported version check
    pub fn skips_version_check(&self) -> bool {
        self.intersects(Self::ACCEPT_LEGACY_VERSION | Self::DISABLE_VERSION_CHECK)
    }
}
