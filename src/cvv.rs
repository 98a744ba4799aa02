//! CVV parsing and the per-network length policy.
//!
//! - American Express: 4 digits
//! - All other networks, including unknown ones: 3 digits
//!
//! A CVV of the wrong length is advisory: it is reported as
//! [`CvvStatus::Invalid`] and never stops validation.
//!
//! # Example
//!
//! ```
//! use cardguard::cvv::Cvv;
//! use cardguard::Network;
//!
//! let cvv = Cvv::parse("0123").unwrap();
//! assert_eq!(cvv.digit_count(), 4);
//! assert!(cvv.is_valid_for(Network::AmericanExpress));
//! assert!(!cvv.is_valid_for(Network::Visa));
//! ```

use crate::card::Network;
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use zeroize::Zeroize;

/// A card verification value.
///
/// Kept as text so that leading zeros count toward its length.
#[derive(Clone)]
pub struct Cvv {
    digits: String,
}

impl Cvv {
    /// Parses a CVV made only of ASCII digits.
    ///
    /// Any number of digits is accepted here; the length rule is applied by
    /// [`is_valid_for`](Self::is_valid_for).
    pub fn parse(input: &str) -> Result<Self, CvvError> {
        if input.is_empty() {
            return Err(CvvError::Empty);
        }

        if let Some((position, character)) =
            input.chars().enumerate().find(|(_, c)| !c.is_ascii_digit())
        {
            return Err(CvvError::InvalidCharacter {
                character,
                position,
            });
        }

        Ok(Self {
            digits: input.to_owned(),
        })
    }

    /// Returns the number of digits.
    #[inline]
    pub fn digit_count(&self) -> usize {
        self.digits.len()
    }

    /// Returns true if the digit count suits `network`.
    #[inline]
    pub fn is_valid_for(&self, network: Network) -> bool {
        is_valid_for(self.digit_count(), network)
    }
}

impl fmt::Debug for Cvv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cvv")
            .field("value", &"***")
            .field("digits", &self.digit_count())
            .finish()
    }
}

impl Drop for Cvv {
    fn drop(&mut self) {
        self.digits.zeroize();
    }
}

/// Errors that can occur while parsing a CVV.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CvvError {
    /// The input is empty.
    #[error("CVV is empty")]
    Empty,
    /// The CVV contains a non-digit character.
    #[error("invalid character '{character}' at position {position}")]
    InvalidCharacter {
        /// The invalid character found.
        character: char,
        /// Position of the invalid character.
        position: usize,
    },
}

/// Returns the required CVV length for a network.
#[inline]
pub const fn required_length(network: Network) -> usize {
    match network {
        Network::AmericanExpress => 4,
        _ => 3,
    }
}

/// Applies the CVV length policy.
#[inline]
pub const fn is_valid_for(digit_count: usize, network: Network) -> bool {
    digit_count == required_length(network)
}

/// Outcome of the CVV length policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CvvStatus {
    /// Length matches the network's rule.
    Valid,
    /// Length does not match.
    Invalid,
}

impl CvvStatus {
    /// Applies the policy to a parsed CVV.
    #[inline]
    pub fn check(cvv: &Cvv, network: Network) -> Self {
        if cvv.is_valid_for(network) {
            Self::Valid
        } else {
            Self::Invalid
        }
    }

    /// Returns true for [`CvvStatus::Valid`].
    #[inline]
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns the console label.
    #[inline]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Valid => "Valid",
            Self::Invalid => "Invalid",
        }
    }
}

impl fmt::Display for CvvStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Cvv::parse("123").unwrap().digit_count(), 3);
        assert_eq!(Cvv::parse("1234").unwrap().digit_count(), 4);
        assert_eq!(Cvv::parse("12345").unwrap().digit_count(), 5);
    }

    #[test]
    fn test_leading_zeros_count() {
        assert_eq!(Cvv::parse("007").unwrap().digit_count(), 3);
        assert_eq!(Cvv::parse("0042").unwrap().digit_count(), 4);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Cvv::parse("").unwrap_err(), CvvError::Empty);
        assert_eq!(
            Cvv::parse("12a").unwrap_err(),
            CvvError::InvalidCharacter {
                character: 'a',
                position: 2
            }
        );
        assert!(matches!(
            Cvv::parse("-12"),
            Err(CvvError::InvalidCharacter { character: '-', .. })
        ));
    }

    #[test]
    fn test_policy() {
        assert!(is_valid_for(4, Network::AmericanExpress));
        assert!(!is_valid_for(3, Network::AmericanExpress));
        assert!(is_valid_for(3, Network::Visa));
        assert!(!is_valid_for(4, Network::Visa));
        assert!(is_valid_for(3, Network::MasterCard));
        assert!(is_valid_for(3, Network::Unknown));
        assert!(!is_valid_for(4, Network::Unknown));
    }

    #[test]
    fn test_status() {
        let cvv = Cvv::parse("123").unwrap();
        assert_eq!(CvvStatus::check(&cvv, Network::Visa), CvvStatus::Valid);
        assert_eq!(
            CvvStatus::check(&cvv, Network::AmericanExpress),
            CvvStatus::Invalid
        );
        assert_eq!(CvvStatus::Valid.to_string(), "Valid");
        assert_eq!(CvvStatus::Invalid.label(), "Invalid");
        assert!(!CvvStatus::Invalid.is_valid());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(serde_json::to_value(CvvStatus::Valid).unwrap(), "valid");
        assert_eq!(serde_json::to_value(CvvStatus::Invalid).unwrap(), "invalid");
    }

    #[test]
    fn test_debug_is_masked() {
        let cvv = Cvv::parse("987").unwrap();
        let debug = format!("{:?}", cvv);
        assert!(!debug.contains("987"));
        assert!(debug.contains("***"));
    }
}
