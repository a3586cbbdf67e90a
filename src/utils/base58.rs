//! Base58check encoding with a bounded memo
//!
//! Addresses are encoded and decoded over and over while (de)serialising
//! transfers, so both directions are memoised in a process-wide LRU. Lookups
//! use `peek`, which leaves recency untouched: the entry evicted when the
//! cache is full is always the oldest insertion.

use std::num::NonZeroUsize;

use lru::LruCache;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use thiserror::Error;

use crate::crypto::hash::hash256;

pub const CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(10_000) {
    Some(capacity) => capacity,
    None => panic!("cache capacity must be non-zero"),
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Base58Error {
    #[error("Invalid base58 string: {0}")]
    InvalidEncoding(String),
    #[error("Invalid checksum")]
    InvalidChecksum,
}

static ENCODE_CACHE: Lazy<Mutex<LruCache<Vec<u8>, String>>> =
    Lazy::new(|| Mutex::new(LruCache::new(CACHE_CAPACITY)));

static DECODE_CACHE: Lazy<Mutex<LruCache<String, Vec<u8>>>> =
    Lazy::new(|| Mutex::new(LruCache::new(CACHE_CAPACITY)));

/// Append a 4 byte double-SHA256 checksum and base58 encode
pub fn encode_check(payload: &[u8]) -> String {
    if let Some(hit) = ENCODE_CACHE.lock().peek(payload) {
        return hit.clone();
    }

    let checksum = hash256(payload);
    let mut bytes = Vec::with_capacity(payload.len() + 4);
    bytes.extend_from_slice(payload);
    bytes.extend_from_slice(&checksum[..4]);
    let encoded = bs58::encode(bytes).into_string();

    ENCODE_CACHE.lock().put(payload.to_vec(), encoded.clone());
    encoded
}

/// Decode a base58check string and return the payload without its checksum
pub fn decode_check(encoded: &str) -> Result<Vec<u8>, Base58Error> {
    if let Some(hit) = DECODE_CACHE.lock().peek(encoded) {
        return Ok(hit.clone());
    }

    let bytes = bs58::decode(encoded)
        .into_vec()
        .map_err(|e| Base58Error::InvalidEncoding(e.to_string()))?;
    if bytes.len() < 4 {
        return Err(Base58Error::InvalidChecksum);
    }

    let (payload, checksum) = bytes.split_at(bytes.len() - 4);
    if hash256(payload)[..4] != checksum[..] {
        return Err(Base58Error::InvalidChecksum);
    }

    DECODE_CACHE
        .lock()
        .put(encoded.to_string(), payload.to_vec());
    Ok(payload.to_vec())
}
