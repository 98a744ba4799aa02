//! Masking utilities for display and logging.
//!
//! A masked number is the fixed prefix `XXXX-XXXX-XXXX-` followed by the
//! last four characters of the real number. Nothing else is revealed, and
//! the prefix does not change with the number's length.

use crate::card::CardNumber;

/// Fixed prefix of every masked card number.
pub const MASK_PREFIX: &str = "XXXX-XXXX-XXXX-";

/// Masks a card number showing only the last 4 characters.
///
/// # Example
///
/// ```
/// use cardguard::CardNumber;
///
/// let number = CardNumber::parse("4539578763621486").unwrap();
/// assert_eq!(number.masked(), "XXXX-XXXX-XXXX-1486");
/// ```
#[inline]
pub fn mask_number(number: &CardNumber) -> String {
    let last_four = number.last_four();
    let mut result = String::with_capacity(MASK_PREFIX.len() + last_four.len());
    result.push_str(MASK_PREFIX);
    result.push_str(last_four);
    result
}

/// Masks arbitrary, unvalidated input.
///
/// Inputs of four characters or fewer are masked completely.
pub fn mask_str(input: &str) -> String {
    if input.chars().count() <= 4 {
        return MASK_PREFIX.trim_end_matches('-').to_owned();
    }
    format!("{}{}", MASK_PREFIX, last_chars(input, 4))
}

/// Returns the last `n` characters of `s` (all of `s` if it is shorter).
pub fn last_chars(s: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    match s.char_indices().rev().nth(n - 1) {
        Some((idx, _)) => &s[idx..],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_number() {
        let number = CardNumber::parse("4539578763621486").unwrap();
        assert_eq!(mask_number(&number), "XXXX-XXXX-XXXX-1486");

        let amex = CardNumber::parse("378282246310005").unwrap();
        assert_eq!(mask_number(&amex), "XXXX-XXXX-XXXX-0005");
    }

    #[test]
    fn test_mask_keeps_separators_in_tail() {
        let number = CardNumber::parse("4539-5787-6362-1486").unwrap();
        assert_eq!(mask_number(&number), "XXXX-XXXX-XXXX-1486");

        let number = CardNumber::parse("4539 5787 636214 86").unwrap();
        assert_eq!(mask_number(&number), "XXXX-XXXX-XXXX-4 86");
    }

    #[test]
    fn test_mask_str() {
        assert_eq!(mask_str("4539578763621486"), "XXXX-XXXX-XXXX-1486");
        assert_eq!(mask_str("1234"), "XXXX-XXXX-XXXX");
        assert_eq!(mask_str(""), "XXXX-XXXX-XXXX");
    }

    #[test]
    fn test_last_chars() {
        assert_eq!(last_chars("abcdef", 4), "cdef");
        assert_eq!(last_chars("abc", 4), "abc");
        assert_eq!(last_chars("ab€d", 3), "b€d");
        assert_eq!(last_chars("abc", 0), "");
    }
}
