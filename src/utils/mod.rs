//! Low level building blocks shared by the codecs
//!
//! - `ByteBuffer`: bounds-checked binary cursor
//! - `BigNumber`: arbitrary precision amounts
//! - base58check with a bounded memo

pub mod base58;
pub mod big_number;
pub mod byte_buffer;

use std::cmp::Ordering;

pub use base58::{decode_check, encode_check, Base58Error};
pub use big_number::{BigNumber, BigNumberError};
pub use byte_buffer::{BufferError, ByteBuffer};

/// Lower-case hex of `number`, left padded with zeros to `padding` characters
pub fn number_to_hex(number: u64, padding: usize) -> String {
    format!("{:0>width$x}", number, width = padding)
}

/// Human readable amount, e.g. `1.5 SXP`
pub fn format_satoshi(amount: &BigNumber, symbol: &str) -> String {
    let units = BigNumber::satoshi();
    let whole = amount.divided_by(&units);
    let fraction = amount.minus(whole.times(&units));
    let mut fraction = fraction.to_fixed().trim_start_matches('-').to_string();

    if fraction == "0" {
        return format!("{} {}", group_thousands(&whole.to_fixed()), symbol);
    }
    fraction = format!("{:0>8}", fraction).trim_end_matches('0').to_string();
    let sign = if amount.is_negative() && whole.is_zero() { "-" } else { "" };
    format!(
        "{}{}.{} {}",
        sign,
        group_thousands(&whole.to_fixed()),
        fraction,
        symbol
    )
}

fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{}{}", sign, grouped)
}

/// Order vote weights: heaviest first, ties broken by a numeric-aware name order
pub fn sort_votes(votes: &mut [(String, u16)]) {
    votes.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| natural_cmp(&a.0, &b.0)));
}

/// Compare two strings treating runs of ASCII digits as numbers
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let lhs = take_digits(&mut left);
                let rhs = take_digits(&mut right);
                let lhs_trimmed = lhs.trim_start_matches('0');
                let rhs_trimmed = rhs.trim_start_matches('0');
                let ord = lhs_trimmed
                    .len()
                    .cmp(&rhs_trimmed.len())
                    .then_with(|| lhs_trimmed.cmp(rhs_trimmed));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(x), Some(y)) => {
                let ord = x.to_lowercase().cmp(y.to_lowercase());
                if ord != Ordering::Equal {
                    return ord;
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(c) = chars.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }
        digits.push(c);
        chars.next();
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_to_hex() {
        assert_eq!(number_to_hex(2, 2), "02");
        assert_eq!(number_to_hex(255, 2), "ff");
        assert_eq!(number_to_hex(10, 4), "000a");
    }

    #[test]
    fn test_sort_votes() {
        let mut votes = vec![
            ("delegate10".to_string(), 2500),
            ("delegate9".to_string(), 2500),
            ("alpha".to_string(), 5000),
        ];
        sort_votes(&mut votes);

        let names: Vec<&str> = votes.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "delegate9", "delegate10"]);
    }

    #[test]
    fn test_natural_cmp() {
        assert_eq!(natural_cmp("a2", "a10"), Ordering::Less);
        assert_eq!(natural_cmp("B", "a"), Ordering::Greater);
        assert_eq!(natural_cmp("abc", "abc"), Ordering::Equal);
        assert_eq!(natural_cmp("ab", "abc"), Ordering::Less);
    }

    #[test]
    fn test_format_satoshi() {
        assert_eq!(format_satoshi(&BigNumber::from(150_000_000u64), "SXP"), "1.5 SXP");
        assert_eq!(
            format_satoshi(&BigNumber::from(123_456_700_000_000u64), "tSXP"),
            "1,234,567 tSXP"
        );
        assert_eq!(format_satoshi(&BigNumber::from(1u64), "SXP"), "0.00000001 SXP");
    }
}
