use super::{finish, length_u8, SerialiseEnv, TransactionHandler};
use crate::transactions::asset::Asset;
use crate::transactions::transaction::TransactionData;
use crate::transactions::types::{CoreTransactionType, InternalTransactionType, SolarTransactionType};
use crate::transactions::TransactionError;
use crate::utils::{BigNumber, ByteBuffer};

/// Hex length of a compressed public key
const PUBLIC_KEY_HEX_LENGTH: usize = 66;

// =============================================================================
// Legacy vote (Core/3): `+`/`-` a public key or username
// =============================================================================

pub struct LegacyVoteHandler;

impl LegacyVoteHandler {
    fn encode_vote(vote: &str, version: u8) -> Result<String, TransactionError> {
        let prefix = if vote.starts_with('+') { "01" } else { "00" };
        let mut chars = vote.chars();
        chars.next();
        let target = chars.as_str();

        if target.len() == PUBLIC_KEY_HEX_LENGTH {
            return Ok(format!("{}{}", prefix, target));
        }
        let encoded = format!(
            "{:02x}{}{}",
            length_u8("vote", target.len() + 1)?,
            prefix,
            hex::encode(target.as_bytes())
        );
        if version == 2 {
            Ok(format!("ff{}", encoded))
        } else {
            Ok(encoded)
        }
    }

    fn sign(prefix: bool) -> char {
        if prefix {
            '+'
        } else {
            '-'
        }
    }
}

impl TransactionHandler for LegacyVoteHandler {
    fn transaction_type(&self) -> InternalTransactionType {
        InternalTransactionType::core(CoreTransactionType::Vote)
    }

    fn key(&self) -> &'static str {
        "legacyVote"
    }

    fn default_static_fee(&self) -> BigNumber {
        BigNumber::from(100_000_000u64)
    }

    fn serialise(
        &self,
        data: &TransactionData,
        _env: &mut SerialiseEnv,
    ) -> Result<Option<Vec<u8>>, TransactionError> {
        let mut buf = ByteBuffer::new(69);
        if let Some(Asset::LegacyVote { votes }) = &data.asset {
            let encoded = votes
                .iter()
                .map(|vote| Self::encode_vote(vote, data.version))
                .collect::<Result<String, _>>()?;
            buf.write_u8(length_u8("votes", votes.len())?)?;
            buf.write_bytes(&hex::decode(encoded)?)?;
        }
        Ok(finish(buf))
    }

    fn deserialise(
        &self,
        buf: &mut ByteBuffer,
        data: &mut TransactionData,
    ) -> Result<(), TransactionError> {
        let count = buf.read_u8()?;
        let mut votes = Vec::with_capacity(count as usize);

        for _ in 0..count {
            // Version 2 marks username votes with 0xff; anything else is a public key vote
            if data.version == 2 && buf.read_u8()? != 0xff {
                buf.jump(-1)?;
                let raw = hex::encode(buf.read_bytes(34)?);
                votes.push(format!("{}{}", Self::sign(&raw[1..2] == "1"), &raw[2..]));
            } else {
                let length = buf.read_u8()? as usize;
                let raw = buf.read_bytes(length)?;
                let (prefix, name) = raw
                    .split_first()
                    .ok_or_else(|| TransactionError::InvalidTransactionBytes("empty vote".into()))?;
                votes.push(format!(
                    "{}{}",
                    Self::sign(*prefix == 1),
                    String::from_utf8_lossy(name)
                ));
            }
        }

        data.asset = Some(Asset::LegacyVote { votes });
        Ok(())
    }
}

// =============================================================================
// Weighted vote (Solar/2)
// =============================================================================

pub struct VoteHandler;

impl TransactionHandler for VoteHandler {
    fn transaction_type(&self) -> InternalTransactionType {
        InternalTransactionType::solar(SolarTransactionType::Vote)
    }

    fn key(&self) -> &'static str {
        "vote"
    }

    fn default_static_fee(&self) -> BigNumber {
        BigNumber::from(100_000_000u64)
    }

    fn serialise(
        &self,
        data: &TransactionData,
        _env: &mut SerialiseEnv,
    ) -> Result<Option<Vec<u8>>, TransactionError> {
        let mut buf = ByteBuffer::new(1024);
        if let Some(Asset::Vote(votes)) = &data.asset {
            buf.write_u8(length_u8("votes", votes.len())?)?;
            for (delegate, weight) in votes {
                buf.write_u8(length_u8("delegate", delegate.len())?)?;
                buf.write_bytes(delegate.as_bytes())?;
                buf.write_u16_le(*weight)?;
            }
        }
        Ok(finish(buf))
    }

    fn deserialise(
        &self,
        buf: &mut ByteBuffer,
        data: &mut TransactionData,
    ) -> Result<(), TransactionError> {
        let count = buf.read_u8()?;
        let mut votes = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let length = buf.read_u8()? as usize;
            let delegate = String::from_utf8(buf.read_bytes(length)?.to_vec())?;
            let weight = buf.read_u16_le()?;
            votes.push((delegate, weight));
        }
        data.asset = Some(Asset::Vote(votes));
        Ok(())
    }
}
