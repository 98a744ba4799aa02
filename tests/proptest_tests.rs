//! Property-based tests using proptest.
//!
//! These tests verify invariants that should hold for all inputs,
//! helping discover edge cases that manual tests might miss.

use cardguard::cvv::{self, Cvv, CvvStatus};
use cardguard::detect::detect_network;
use cardguard::expiry::{classify, Expiry, ExpiryStatus, YearMonth};
use cardguard::mask::MASK_PREFIX;
use cardguard::{check, luhn, Card, CardInput, CardNumber, ErrorKind, Network};
use proptest::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

/// Generates a random digit string of a given length.
fn digit_string(len: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(prop::char::range('0', '9'), len)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Generates a random digit string of a length within range.
fn digit_string_range(range: std::ops::RangeInclusive<usize>) -> impl Strategy<Value = String> {
    range.prop_flat_map(digit_string)
}

/// Generates a Luhn-valid number of 13-19 digits.
fn valid_number() -> impl Strategy<Value = String> {
    digit_string_range(12..=18).prop_map(|partial| {
        let check = luhn::check_digit(&partial);
        format!("{partial}{check}")
    })
}

fn year_month() -> impl Strategy<Value = YearMonth> {
    (2000u16..=2099, 1u8..=12).prop_map(|(y, m)| YearMonth::new(y, m).unwrap())
}

fn expiry() -> impl Strategy<Value = Expiry> {
    (2000u16..=2099, 1u8..=12).prop_map(|(y, m)| Expiry::new(m, y).unwrap())
}

fn card_input(number: String, expiry: Expiry, cvv: String) -> CardInput {
    CardInput {
        number,
        expiry: expiry.to_string(),
        holder: "Prop Test".into(),
        cvv,
    }
}

// =============================================================================
// LUHN
// =============================================================================

proptest! {
    #[test]
    fn generated_numbers_pass_luhn(number in valid_number()) {
        prop_assert!(luhn::passes(&number));
        prop_assert!(CardNumber::parse(&number).unwrap().passes_luhn());
    }

    #[test]
    fn single_digit_change_fails_luhn(
        number in valid_number(),
        pos in any::<prop::sample::Index>(),
        delta in 1u8..=9,
    ) {
        let mut bytes = number.into_bytes();
        let idx = pos.index(bytes.len());
        bytes[idx] = b'0' + (bytes[idx] - b'0' + delta) % 10;
        let mutated = String::from_utf8(bytes).unwrap();
        // Luhn catches every single-digit substitution
        prop_assert!(!luhn::passes(&mutated));
    }

    #[test]
    fn separators_do_not_change_checksum(number in valid_number(), sep in "[ -]") {
        let spaced: String = number
            .chars()
            .enumerate()
            .flat_map(|(i, c)| {
                let sep = if i > 0 && i % 4 == 0 { Some(sep.chars().next().unwrap()) } else { None };
                sep.into_iter().chain(std::iter::once(c))
            })
            .collect();
        prop_assert_eq!(luhn::checksum(&spaced), luhn::checksum(&number));
    }
}

// =============================================================================
// LENGTH GUARD
// =============================================================================

proptest! {
    #[test]
    fn length_guard_matches_range(s in "[0-9a-z -]{0,30}") {
        let len = s.chars().count();
        let result = CardNumber::parse(&s);
        if (13..=19).contains(&len) {
            prop_assert!(result.is_ok());
        } else {
            prop_assert_eq!(result.unwrap_err().kind(), ErrorKind::Format);
        }
    }
}

// =============================================================================
// NETWORK DETECTION
// =============================================================================

proptest! {
    #[test]
    fn network_depends_only_on_prefix(a in digit_string(14), b in digit_string(14)) {
        for prefix in ["4", "51", "52", "34", "37", "60", "53", "35"] {
            prop_assert_eq!(
                detect_network(&format!("{prefix}{a}")),
                detect_network(&format!("{prefix}{b}"))
            );
        }
    }

    #[test]
    fn visa_whenever_first_digit_is_four(rest in digit_string_range(12..=18)) {
        prop_assert_eq!(detect_network(&format!("4{rest}")), Network::Visa);
    }

    #[test]
    fn unknown_prefixes(first in prop::sample::select(vec!['0', '1', '2', '6', '7', '8', '9']), rest in digit_string(15)) {
        prop_assert_eq!(detect_network(&format!("{first}{rest}")), Network::Unknown);
    }
}

// =============================================================================
// CVV POLICY
// =============================================================================

proptest! {
    #[test]
    fn cvv_policy_matches_rule(digits in digit_string_range(1..=6)) {
        let cvv = Cvv::parse(&digits).unwrap();
        for network in [Network::Visa, Network::MasterCard, Network::AmericanExpress, Network::Unknown] {
            let expected = if network == Network::AmericanExpress {
                digits.len() == 4
            } else {
                digits.len() == 3
            };
            prop_assert_eq!(cvv.is_valid_for(network), expected);
            prop_assert_eq!(cvv::is_valid_for(digits.len(), network), expected);
        }
    }
}

// =============================================================================
// EXPIRY
// =============================================================================

proptest! {
    #[test]
    fn classification_is_total_and_consistent(expiry in expiry(), today in year_month()) {
        let status = classify(expiry, today);
        let past = (expiry.year(), expiry.month()) < (today.year(), today.month());
        prop_assert_eq!(status == ExpiryStatus::Expired, past);

        if status == ExpiryStatus::ExpiringSoon {
            // never more than 11 months out
            prop_assert!(expiry.months_until(today) <= 11);
        }
        if expiry.months_until(today) >= 12 {
            prop_assert_eq!(status, ExpiryStatus::Valid);
        }
    }

    #[test]
    fn same_year_window_is_six_months(today in year_month(), ahead in 0u8..=11) {
        let month = today.month() + ahead;
        if month <= 12 {
            let expiry = Expiry::new(month, today.year()).unwrap();
            let expected = if ahead <= 6 { ExpiryStatus::ExpiringSoon } else { ExpiryStatus::Valid };
            prop_assert_eq!(classify(expiry, today), expected);
        }
    }

    #[test]
    fn expiry_display_round_trips(expiry in expiry()) {
        prop_assert_eq!(Expiry::parse(&expiry.to_string()).unwrap(), expiry);
    }
}

// =============================================================================
// MASKING
// =============================================================================

proptest! {
    #[test]
    fn mask_reveals_only_last_four(number in digit_string_range(13..=19)) {
        let masked = CardNumber::parse(&number).unwrap().masked();
        prop_assert_eq!(&masked, &format!("{}{}", MASK_PREFIX, &number[number.len() - 4..]));
        prop_assert_eq!(masked.chars().filter(|c| c.is_ascii_digit()).count(), 4);
    }
}

// =============================================================================
// PIPELINE
// =============================================================================

proptest! {
    #[test]
    fn check_is_idempotent(
        number in valid_number(),
        expiry in expiry(),
        cvv in digit_string_range(3..=4),
        today in year_month(),
    ) {
        let card = Card::from_input(&card_input(number, expiry, cvv.clone())).unwrap();
        let first = check(&card, today).unwrap();
        let second = check(&card, today).unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.network, card.network());
        prop_assert_eq!(first.cvv, CvvStatus::check(card.cvv(), card.network()));
        prop_assert_eq!(first.expiry_status, classify(expiry, today));
        prop_assert_eq!(card.cvv().digit_count(), cvv.len());
    }

    #[test]
    fn luhn_failure_always_fatal(number in valid_number(), expiry in expiry(), today in year_month()) {
        let mut bytes = number.into_bytes();
        let last = bytes.len() - 1;
        bytes[last] = b'0' + (bytes[last] - b'0' + 1) % 10;
        let bad = String::from_utf8(bytes).unwrap();

        let card = Card::from_input(&card_input(bad, expiry, "123".into())).unwrap();
        prop_assert_eq!(check(&card, today).unwrap_err().kind(), ErrorKind::Luhn);
    }
}
