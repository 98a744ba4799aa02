//! Decorative risk score.
//!
//! **This is not a fraud model.** The score is a random number in
//! `[0.00, 0.99]` that carries no information about the card. It exists
//! because the console output has always shown one. Scoring goes through
//! the [`RiskScorer`] trait so a real provider could be plugged in, and so
//! tests can use [`FixedScorer`].

use crate::card::Card;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A score in hundredths, from 0.00 to 0.99.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RiskScore(u8);

impl RiskScore {
    /// Largest representable score, in hundredths.
    pub const MAX_HUNDREDTHS: u8 = 99;

    /// Creates a score from hundredths. Returns `None` above 99.
    pub const fn from_hundredths(hundredths: u8) -> Option<Self> {
        if hundredths > Self::MAX_HUNDREDTHS {
            return None;
        }
        Some(Self(hundredths))
    }

    /// Returns the score in hundredths.
    #[inline]
    pub const fn hundredths(self) -> u8 {
        self.0
    }

    /// Returns the score as a fraction.
    #[inline]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0.{:02}", self.0)
    }
}

impl Serialize for RiskScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

/// Produces a risk score for a card.
pub trait RiskScorer {
    /// Scores `card`.
    fn score(&mut self, card: &Card) -> RiskScore;
}

/// Draws one value in `0..100` as a score.
fn draw<R: Rng>(rng: &mut R) -> RiskScore {
    RiskScore(rng.gen_range(0..=RiskScore::MAX_HUNDREDTHS))
}

/// Reseeds from the wall clock (whole seconds) on every call.
///
/// Two calls within the same second return the same score.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClockSeededScorer;

impl RiskScorer for ClockSeededScorer {
    fn score(&mut self, _card: &Card) -> RiskScore {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        draw(&mut StdRng::seed_from_u64(secs))
    }
}

/// Reproducible scores from a fixed seed.
#[derive(Debug, Clone)]
pub struct SeededScorer {
    rng: StdRng,
}

impl SeededScorer {
    /// Creates a scorer whose sequence is determined by `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RiskScorer for SeededScorer {
    fn score(&mut self, _card: &Card) -> RiskScore {
        draw(&mut self.rng)
    }
}

/// Always returns the same score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedScorer(pub RiskScore);

impl RiskScorer for FixedScorer {
    fn score(&mut self, _card: &Card) -> RiskScore {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardNumber;
    use crate::cvv::Cvv;
    use crate::expiry::Expiry;

    fn card() -> Card {
        Card::new(
            CardNumber::parse("4539578763621486").unwrap(),
            Expiry::new(1, 2030).unwrap(),
            "Test",
            Cvv::parse("123").unwrap(),
        )
    }

    #[test]
    fn test_score_bounds() {
        assert!(RiskScore::from_hundredths(0).is_some());
        assert!(RiskScore::from_hundredths(99).is_some());
        assert!(RiskScore::from_hundredths(100).is_none());
    }

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(RiskScore::from_hundredths(0).unwrap().to_string(), "0.00");
        assert_eq!(RiskScore::from_hundredths(7).unwrap().to_string(), "0.07");
        assert_eq!(RiskScore::from_hundredths(42).unwrap().to_string(), "0.42");
        assert_eq!(RiskScore::from_hundredths(99).unwrap().to_string(), "0.99");
    }

    #[test]
    fn test_fixed_scorer() {
        let score = RiskScore::from_hundredths(13).unwrap();
        let mut scorer = FixedScorer(score);
        assert_eq!(scorer.score(&card()), score);
        assert_eq!(scorer.score(&card()), score);
    }

    #[test]
    fn test_seeded_scorer_is_reproducible() {
        let card = card();
        let mut a = SeededScorer::new(7);
        let mut b = SeededScorer::new(7);
        for _ in 0..20 {
            let score = a.score(&card);
            assert_eq!(score, b.score(&card));
            assert!(score.hundredths() <= RiskScore::MAX_HUNDREDTHS);
        }
    }

    #[test]
    fn test_clock_seeded_in_range() {
        let score = ClockSeededScorer.score(&card());
        assert!(score.hundredths() <= RiskScore::MAX_HUNDREDTHS);
        assert!((0.0..1.0).contains(&score.as_f64()));
    }
}
