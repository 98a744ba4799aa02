//! Core card types.
//!
//! [`CardNumber`] enforces the length rule at construction, so every
//! [`Card`] in existence carries a number of 13 to 19 characters. The
//! issuing [`Network`] is derived from the number on first use and cached.

use crate::cvv::Cvv;
use crate::error::ValidationError;
use crate::expiry::Expiry;
use crate::{detect, luhn, mask};
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Minimum number of characters in a card number.
pub const MIN_NUMBER_LEN: usize = 13;

/// Maximum number of characters in a card number.
pub const MAX_NUMBER_LEN: usize = 19;

/// Card networks recognised from the number prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Network {
    /// Visa - prefix 4
    Visa,
    /// MasterCard - prefix 51, 52
    MasterCard,
    /// American Express - prefix 34, 37
    #[serde(rename = "American Express")]
    AmericanExpress,
    /// No recognised prefix
    Unknown,
}

impl Network {
    /// Returns a human-readable name for the network.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Visa => "Visa",
            Self::MasterCard => "MasterCard",
            Self::AmericanExpress => "American Express",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A card number that passed the length check.
///
/// The text is kept as typed. Characters other than ASCII digits are
/// tolerated here and skipped by the Luhn pass.
///
/// # Security
///
/// - Memory is zeroed on drop
/// - `Debug` output is masked
#[derive(Clone)]
pub struct CardNumber {
    raw: String,
}

impl CardNumber {
    /// Applies the length rule and wraps the input.
    ///
    /// # Example
    ///
    /// ```
    /// use cardguard::CardNumber;
    ///
    /// assert!(CardNumber::parse("4539578763621486").is_ok());
    /// assert!(CardNumber::parse("411111").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let length = raw.chars().count();
        if !(MIN_NUMBER_LEN..=MAX_NUMBER_LEN).contains(&length) {
            return Err(ValidationError::invalid_length(length));
        }
        Ok(Self {
            raw: raw.to_owned(),
        })
    }

    /// Returns the number of characters.
    #[inline]
    pub fn length(&self) -> usize {
        self.raw.chars().count()
    }

    /// Returns the last four characters.
    #[inline]
    pub fn last_four(&self) -> &str {
        mask::last_chars(&self.raw, 4)
    }

    /// Returns the number masked for display: `XXXX-XXXX-XXXX-1486`.
    #[inline]
    pub fn masked(&self) -> String {
        mask::mask_number(self)
    }

    /// Runs the Luhn checksum over the number.
    #[inline]
    pub fn passes_luhn(&self) -> bool {
        luhn::passes(&self.raw)
    }

    /// Classifies the number's issuing network from its prefix.
    #[inline]
    pub fn network(&self) -> Network {
        detect::detect_network(&self.raw)
    }
}

impl fmt::Debug for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CardNumber").field(&self.masked()).finish()
    }
}

impl Drop for CardNumber {
    fn drop(&mut self) {
        self.raw.zeroize();
    }
}

/// Raw, unparsed answers to the four input prompts.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct CardInput {
    /// Card number as typed.
    pub number: String,
    /// Expiry in `MM/YY` form.
    pub expiry: String,
    /// Card holder name.
    pub holder: String,
    /// Card verification value.
    pub cvv: String,
}

impl fmt::Debug for CardInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardInput")
            .field("number", &mask::mask_str(&self.number))
            .field("expiry", &self.expiry)
            .field("holder", &self.holder)
            .field("cvv", &"***")
            .finish()
    }
}

/// A card ready for validation.
///
/// Immutable after construction apart from the cached network.
#[derive(Clone)]
pub struct Card {
    number: CardNumber,
    expiry: Expiry,
    holder: String,
    cvv: Cvv,
    network: OnceLock<Network>,
}

impl Card {
    /// Creates a card from already-parsed parts.
    pub fn new(number: CardNumber, expiry: Expiry, holder: impl Into<String>, cvv: Cvv) -> Self {
        Self {
            number,
            expiry,
            holder: holder.into(),
            cvv,
            network: OnceLock::new(),
        }
    }

    /// Parses raw prompt answers into a card.
    ///
    /// The number's length is checked first, then the expiry, then the CVV.
    ///
    /// # Example
    ///
    /// ```
    /// use cardguard::{Card, CardInput, Network};
    ///
    /// let input = CardInput {
    ///     number: "4539578763621486".into(),
    ///     expiry: "12/30".into(),
    ///     holder: "Ada Lovelace".into(),
    ///     cvv: "123".into(),
    /// };
    /// let card = Card::from_input(&input).unwrap();
    /// assert_eq!(card.network(), Network::Visa);
    /// ```
    pub fn from_input(input: &CardInput) -> Result<Self, ValidationError> {
        let number = CardNumber::parse(&input.number)?;
        let expiry = Expiry::parse(&input.expiry)?;
        let cvv = Cvv::parse(&input.cvv)?;
        Ok(Self::new(number, expiry, input.holder.as_str(), cvv))
    }

    /// Returns the card number.
    #[inline]
    pub fn number(&self) -> &CardNumber {
        &self.number
    }

    /// Returns the expiry date.
    #[inline]
    pub const fn expiry(&self) -> Expiry {
        self.expiry
    }

    /// Returns the card holder name.
    #[inline]
    pub fn holder(&self) -> &str {
        &self.holder
    }

    /// Returns the CVV.
    #[inline]
    pub fn cvv(&self) -> &Cvv {
        &self.cvv
    }

    /// Returns the issuing network, detecting it on first call.
    pub fn network(&self) -> Network {
        *self.network.get_or_init(|| self.number.network())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Card")
            .field("number", &self.number)
            .field("expiry", &self.expiry)
            .field("holder", &self.holder)
            .field("cvv", &self.cvv)
            .field("network", &self.network.get())
            .finish()
    }
}
