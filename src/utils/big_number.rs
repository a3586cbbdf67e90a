//! Arbitrary precision integers for amounts, fees and nonces
//!
//! Every constructor funnels through [`BigNumber::normalise`], so a value built
//! from a string, a primitive or another `BigNumber` behaves identically.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};
use std::str::FromStr;

use num_bigint::{BigInt, Sign};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BigNumberError {
    #[error("Cannot convert {0} to a BigNumber")]
    InvalidNumber(String),
    #[error("Value {0} is out of range for a {1} field")]
    OutOfRange(String, &'static str),
}

/// Integer amount in base units (1 SXP = 100000000)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct BigNumber {
    value: BigInt,
}

impl BigNumber {
    pub const SATOSHI_UNITS: u64 = 100_000_000;

    pub fn zero() -> Self {
        Self::from(0u64)
    }

    pub fn one() -> Self {
        Self::from(1u64)
    }

    pub fn satoshi() -> Self {
        Self::from(Self::SATOSHI_UNITS)
    }

    fn normalise(value: BigInt) -> Self {
        Self { value }
    }

    /// Parse a decimal string (surrounding whitespace and a leading `+` are accepted)
    pub fn make(value: &str) -> Result<Self, BigNumberError> {
        value.parse()
    }

    pub fn plus(&self, other: impl Into<BigNumber>) -> Self {
        Self::normalise(&self.value + other.into().value)
    }

    pub fn minus(&self, other: impl Into<BigNumber>) -> Self {
        Self::normalise(&self.value - other.into().value)
    }

    pub fn times(&self, other: impl Into<BigNumber>) -> Self {
        Self::normalise(&self.value * other.into().value)
    }

    /// Integer division truncating towards zero
    ///
    /// Panics when `other` is zero, like primitive integer division.
    pub fn divided_by(&self, other: impl Into<BigNumber>) -> Self {
        Self::normalise(&self.value / other.into().value)
    }

    pub fn checked_divided_by(&self, other: impl Into<BigNumber>) -> Option<Self> {
        let other = other.into();
        if other.is_zero() {
            return None;
        }
        Some(self.divided_by(other))
    }

    pub fn compared_to(&self, other: &BigNumber) -> Ordering {
        self.value.cmp(&other.value)
    }

    pub fn is_less_than(&self, other: &BigNumber) -> bool {
        self.value < other.value
    }

    pub fn is_less_than_equal(&self, other: &BigNumber) -> bool {
        self.value <= other.value
    }

    pub fn is_greater_than(&self, other: &BigNumber) -> bool {
        self.value > other.value
    }

    pub fn is_greater_than_equal(&self, other: &BigNumber) -> bool {
        self.value >= other.value
    }

    pub fn is_equal_to(&self, other: &BigNumber) -> bool {
        self.value == other.value
    }

    pub fn is_zero(&self) -> bool {
        self.value.sign() == Sign::NoSign
    }

    pub fn is_negative(&self) -> bool {
        self.value.sign() == Sign::Minus
    }

    /// Canonical decimal representation
    pub fn to_fixed(&self) -> String {
        self.value.to_str_radix(10)
    }

    pub fn to_string_radix(&self, radix: u32) -> String {
        self.value.to_str_radix(radix)
    }

    pub fn as_bigint(&self) -> &BigInt {
        &self.value
    }

    /// Value as an unsigned 64-bit wire field
    pub fn to_u64(&self) -> Result<u64, BigNumberError> {
        u64::try_from(&self.value).map_err(|_| BigNumberError::OutOfRange(self.to_fixed(), "u64"))
    }

    /// Value as a signed 64-bit wire field
    pub fn to_i64(&self) -> Result<i64, BigNumberError> {
        i64::try_from(&self.value).map_err(|_| BigNumberError::OutOfRange(self.to_fixed(), "i64"))
    }
}

impl FromStr for BigNumber {
    type Err = BigNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
        BigInt::from_str(digits)
            .map(Self::normalise)
            .map_err(|_| BigNumberError::InvalidNumber(s.to_string()))
    }
}

macro_rules! from_primitive {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for BigNumber {
                fn from(value: $ty) -> Self {
                    Self::normalise(BigInt::from(value))
                }
            }
        )*
    };
}

from_primitive!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128);

impl From<BigInt> for BigNumber {
    fn from(value: BigInt) -> Self {
        Self::normalise(value)
    }
}

impl From<&BigNumber> for BigNumber {
    fn from(value: &BigNumber) -> Self {
        value.clone()
    }
}

impl fmt::Display for BigNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T: Into<BigNumber>> Add<T> for BigNumber {
    type Output = BigNumber;

    fn add(self, rhs: T) -> BigNumber {
        self.plus(rhs)
    }
}

impl<T: Into<BigNumber>> Sub<T> for BigNumber {
    type Output = BigNumber;

    fn sub(self, rhs: T) -> BigNumber {
        self.minus(rhs)
    }
}

impl<T: Into<BigNumber>> Mul<T> for BigNumber {
    type Output = BigNumber;

    fn mul(self, rhs: T) -> BigNumber {
        self.times(rhs)
    }
}

impl<T: Into<BigNumber>> Div<T> for BigNumber {
    type Output = BigNumber;

    fn div(self, rhs: T) -> BigNumber {
        self.divided_by(rhs)
    }
}

impl std::iter::Sum for BigNumber {
    fn sum<I: Iterator<Item = BigNumber>>(iter: I) -> Self {
        iter.fold(BigNumber::zero(), |acc, value| acc.plus(value))
    }
}

impl Serialize for BigNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_fixed())
    }
}

struct BigNumberVisitor;

impl<'de> Visitor<'de> for BigNumberVisitor {
    type Value = BigNumber;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an integer or a decimal string")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<BigNumber, E> {
        Ok(BigNumber::from(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<BigNumber, E> {
        Ok(BigNumber::from(value))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<BigNumber, E> {
        if value.fract() != 0.0 || !value.is_finite() {
            return Err(E::custom(format!("{value} is not an integer")));
        }
        BigNumber::make(&format!("{value:.0}")).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<BigNumber, E> {
        BigNumber::make(value).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for BigNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(BigNumberVisitor)
    }
}
