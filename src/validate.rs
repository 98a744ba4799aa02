//! The validation pipeline.
//!
//! Stages run in order on one [`Card`]:
//!
//! 1. Length check (already done when the [`CardNumber`](crate::CardNumber) was built)
//! 2. Luhn checksum, fatal on failure
//! 3. Network detection
//! 4. CVV length policy, advisory
//! 5. Expiry classification, advisory
//!
//! [`check`] is the pure core. [`CardValidator`] adds the clock and the
//! optional decorative score.

use crate::card::{Card, Network};
use crate::clock::{Clock, SystemClock};
use crate::cvv::CvvStatus;
use crate::error::ValidationError;
use crate::expiry::{Expiry, ExpiryStatus, YearMonth};
use crate::risk::{RiskScore, RiskScorer};
use serde::Serialize;
use std::fmt;

/// Result of a successful pipeline run. Safe to print and log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Card holder name.
    pub holder: String,
    /// Masked card number.
    pub masked: String,
    /// Detected network.
    pub network: Network,
    /// CVV length policy outcome.
    pub cvv: CvvStatus,
    /// Expiry date as entered.
    pub expiry: Expiry,
    /// Expiry classification.
    pub expiry_status: ExpiryStatus,
    /// Months from today until the expiry month (0 if past).
    pub months_until_expiry: u32,
}

/// A report plus the optional decorative score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// Validation result.
    #[serde(flatten)]
    pub report: Report,
    /// Decorative risk score, not a fraud signal.
    #[serde(rename = "risk_score", skip_serializing_if = "Option::is_none")]
    pub risk: Option<RiskScore>,
}

/// Runs the pipeline on `card` as of `today`.
///
/// Fails only when the Luhn check fails. A wrong CVV length or an expired
/// date is reported in the [`Report`].
///
/// # Example
///
/// ```
/// use cardguard::{check, Card, CardInput, ValidationError};
/// use cardguard::expiry::{ExpiryStatus, YearMonth};
///
/// let input = CardInput {
///     number: "4539578763621486".into(),
///     expiry: "12/24".into(),
///     holder: "Ada Lovelace".into(),
///     cvv: "123".into(),
/// };
/// let card = Card::from_input(&input).unwrap();
/// let report = check(&card, YearMonth::new(2024, 6).unwrap()).unwrap();
/// assert_eq!(report.masked, "XXXX-XXXX-XXXX-1486");
/// assert_eq!(report.expiry_status, ExpiryStatus::ExpiringSoon);
/// ```
pub fn check(card: &Card, today: YearMonth) -> Result<Report, ValidationError> {
    let masked = card.number().masked();

    if !card.number().passes_luhn() {
        tracing::debug!(card = %masked, "luhn check failed");
        return Err(ValidationError::InvalidChecksum);
    }

    let network = card.network();
    let cvv = CvvStatus::check(card.cvv(), network);
    let expiry = card.expiry();
    let expiry_status = expiry.status(today);

    tracing::debug!(
        card = %masked,
        %network,
        %cvv,
        %expiry_status,
        "card checked"
    );

    Ok(Report {
        holder: card.holder().to_owned(),
        masked,
        network,
        cvv,
        expiry,
        expiry_status,
        months_until_expiry: expiry.months_until(today),
    })
}

/// Runs the pipeline with an injected clock and an optional scorer.
///
/// # Example
///
/// ```
/// use cardguard::{Card, CardInput, CardValidator};
/// use cardguard::clock::FixedClock;
/// use cardguard::expiry::YearMonth;
/// use cardguard::risk::{FixedScorer, RiskScore};
///
/// let score = RiskScore::from_hundredths(25).unwrap();
/// let mut validator = CardValidator::with_clock(FixedClock(YearMonth::new(2024, 6).unwrap()))
///     .with_scorer(FixedScorer(score));
///
/// let input = CardInput {
///     number: "4539578763621486".into(),
///     expiry: "01/26".into(),
///     holder: "Ada".into(),
///     cvv: "123".into(),
/// };
/// let outcome = validator.validate(&Card::from_input(&input).unwrap()).unwrap();
/// assert_eq!(outcome.risk, Some(score));
/// ```
pub struct CardValidator<C = SystemClock> {
    clock: C,
    scorer: Option<Box<dyn RiskScorer + Send>>,
}

impl CardValidator<SystemClock> {
    /// Creates a validator on the system clock with no scorer.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for CardValidator<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> CardValidator<C> {
    /// Creates a validator on `clock` with no scorer.
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            scorer: None,
        }
    }

    /// Attaches a risk scorer.
    pub fn with_scorer<S: RiskScorer + Send + 'static>(mut self, scorer: S) -> Self {
        self.scorer = Some(Box::new(scorer));
        self
    }

    /// Replaces the scorer, or removes it with `None`.
    pub fn set_scorer(&mut self, scorer: Option<Box<dyn RiskScorer + Send>>) {
        self.scorer = scorer;
    }

    /// Returns true if a scorer is attached.
    pub fn has_scorer(&self) -> bool {
        self.scorer.is_some()
    }

    /// Returns today's month according to the clock.
    pub fn today(&self) -> YearMonth {
        self.clock.today()
    }

    /// Validates `card` and scores it if a scorer is attached.
    ///
    /// The scorer only runs for cards that pass the Luhn check.
    pub fn validate(&mut self, card: &Card) -> Result<Outcome, ValidationError> {
        let report = check(card, self.clock.today())?;
        let risk = self.scorer.as_mut().map(|scorer| scorer.score(card));
        Ok(Outcome { report, risk })
    }
}

impl<C: fmt::Debug> fmt::Debug for CardValidator<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardValidator")
            .field("clock", &self.clock)
            .field("scorer", &self.scorer.is_some())
            .finish()
    }
}
