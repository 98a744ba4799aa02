//! Card network detection from the number prefix.
//!
//! Only the first two characters are examined. Rules are tried in order and
//! the first match wins:
//!
//! | Prefix | Network |
//! |--------|---------|
//! | 4 | Visa |
//! | 51, 52 | MasterCard |
//! | 34, 37 | American Express |
//! | anything else | Unknown |

use crate::card::Network;

/// Detects the issuing network of a card number.
///
/// Never fails: numbers with no recognised prefix are [`Network::Unknown`].
///
/// # Example
///
/// ```
/// use cardguard::detect::detect_network;
/// use cardguard::Network;
///
/// assert_eq!(detect_network("4000000000000000"), Network::Visa);
/// assert_eq!(detect_network("3700000000000000"), Network::AmericanExpress);
/// assert_eq!(detect_network("6000000000000000"), Network::Unknown);
/// ```
#[inline]
pub fn detect_network(number: &str) -> Network {
    match number.as_bytes() {
        [b'4', ..] => Network::Visa,
        [b'5', b'1' | b'2', ..] => Network::MasterCard,
        [b'3', b'4' | b'7', ..] => Network::AmericanExpress,
        _ => Network::Unknown,
    }
}
