//! Error taxonomy for the card pipeline.
//!
//! Fatal failures are returned as [`ValidationError`] and classified by
//! [`ErrorKind`]. A CVV of the wrong length is not an error at all; it is
//! carried in the report as [`CvvStatus::Invalid`](crate::cvv::CvvStatus).

use crate::card::{MAX_NUMBER_LEN, MIN_NUMBER_LEN};
use crate::cvv::CvvError;
use crate::expiry::ExpiryError;
use thiserror::Error;

/// Coarse classification of a fatal failure.
///
/// Decides the console message and the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Card number length outside the accepted range.
    Format,
    /// Luhn checksum failed.
    Luhn,
    /// Anything else: malformed expiry or CVV, I/O, truncated input.
    Unknown,
}

impl ErrorKind {
    /// Process exit status for this kind of failure.
    ///
    /// Validation rejections exit with 1, everything else with 2.
    #[inline]
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::Format | Self::Luhn => 1,
            Self::Unknown => 2,
        }
    }
}

/// Errors that stop validation of a card.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The card number has the wrong number of characters.
    #[error("invalid card number length: got {length} characters, expected {minimum}-{maximum}")]
    InvalidLength {
        /// Characters in the rejected input.
        length: usize,
        /// Smallest accepted length.
        minimum: usize,
        /// Largest accepted length.
        maximum: usize,
    },

    /// The Luhn checksum did not come out to a multiple of 10.
    #[error("card number failed Luhn check")]
    InvalidChecksum,

    /// The expiry field could not be parsed.
    #[error("invalid expiry date: {0}")]
    Expiry(#[from] ExpiryError),

    /// The CVV field could not be parsed.
    #[error("invalid CVV: {0}")]
    Cvv(#[from] CvvError),
}

impl ValidationError {
    /// Builds the length error for an input of `length` characters.
    pub(crate) const fn invalid_length(length: usize) -> Self {
        Self::InvalidLength {
            length,
            minimum: MIN_NUMBER_LEN,
            maximum: MAX_NUMBER_LEN,
        }
    }

    /// Returns the kind of this failure.
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidLength { .. } => ErrorKind::Format,
            Self::InvalidChecksum => ErrorKind::Luhn,
            Self::Expiry(_) | Self::Cvv(_) => ErrorKind::Unknown,
        }
    }
}
