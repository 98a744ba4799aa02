//! # cardguard
//!
//! Interactive credit card checker.
//!
//! ## Features
//!
//! - Length check (13-19 characters) and Luhn checksum
//! - Network detection: Visa, MasterCard, American Express
//! - CVV length policy per network
//! - Expiry classification: expired, expiring soon, valid
//! - Masked display and an append-only text log
//!
//! ## Quick Start
//!
//! ```rust
//! use cardguard::{check, Card, CardInput, Network};
//! use cardguard::cvv::CvvStatus;
//! use cardguard::expiry::{ExpiryStatus, YearMonth};
//!
//! let input = CardInput {
//!     number: "4539578763621486".into(),
//!     expiry: "01/26".into(),
//!     holder: "Ada Lovelace".into(),
//!     cvv: "123".into(),
//! };
//! let card = Card::from_input(&input).unwrap();
//! let report = check(&card, YearMonth::new(2024, 6).unwrap()).unwrap();
//!
//! assert_eq!(report.network, Network::Visa);
//! assert_eq!(report.cvv, CvvStatus::Valid);
//! assert_eq!(report.expiry_status, ExpiryStatus::Valid);
//!
//! // Safe for logging - never exposes the full card number
//! assert_eq!(report.masked, "XXXX-XXXX-XXXX-1486");
//! ```
//!
//! ## Failures
//!
//! Only two things reject a card: a number of the wrong length and a failed
//! Luhn check. A CVV of the wrong length and an expired date are reported,
//! not fatal.
//!
//! ```rust
//! use cardguard::{CardNumber, ErrorKind};
//!
//! let err = CardNumber::parse("4111").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Format);
//! ```
//!
//! ## Supported Networks
//!
//! | Network | Prefix | CVV |
//! |---------|--------|-----|
//! | Visa | 4 | 3 |
//! | MasterCard | 51, 52 | 3 |
//! | American Express | 34, 37 | 4 |
//! | Unknown | anything else | 3 |
//!
//! ## Risk Score
//!
//! The [`risk`] module produces a random number shown as a "risk score".
//! It is decorative and says nothing about fraud.
//!
//! ## Security
//!
//! - Card number and CVV buffers are zeroed on drop
//! - `Debug` output masks the card number and hides the CVV
//! - Log events carry only the masked number
//! - No unsafe code (`#![deny(unsafe_code)]`)
//!
//! The log file itself is plain text with no access control.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod card;
pub mod clock;
pub mod config;
pub mod cvv;
pub mod detect;
pub mod error;
pub mod expiry;
pub mod log;
pub mod luhn;
pub mod mask;
pub mod risk;
pub mod session;
pub mod validate;

// Re-export main types at crate root
pub use card::{Card, CardInput, CardNumber, Network, MAX_NUMBER_LEN, MIN_NUMBER_LEN};
pub use config::Config;
pub use error::{ErrorKind, ValidationError};
pub use validate::{check, CardValidator, Outcome, Report};
