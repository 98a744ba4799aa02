//! Runtime configuration.
//!
//! `Config::default()` reproduces the classic behavior: log to
//! `card_log.txt`, show a clock-seeded decorative score, print text.

use crate::clock::Clock;
use crate::log::{CardLog, DEFAULT_LOG_FILE};
use crate::risk::{ClockSeededScorer, RiskScorer, SeededScorer};
use crate::validate::CardValidator;
use std::path::PathBuf;

/// How the decorative risk score is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RiskMode {
    /// No score is shown.
    Disabled,
    /// Seeded from the wall clock on each run.
    #[default]
    ClockSeeded,
    /// Seeded from a fixed value, for reproducible output.
    Seeded(u64),
}

/// Console output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object.
    Json,
}

/// Settings for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Log file path, or `None` to disable logging.
    pub log_file: Option<PathBuf>,
    /// Risk score mode.
    pub risk: RiskMode,
    /// Output format.
    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
            risk: RiskMode::default(),
            output: OutputFormat::default(),
        }
    }
}

impl Config {
    /// Returns the card log, if logging is enabled.
    pub fn card_log(&self) -> Option<CardLog> {
        self.log_file.as_ref().map(CardLog::new)
    }

    /// Builds the scorer selected by [`risk`](Self::risk).
    pub fn scorer(&self) -> Option<Box<dyn RiskScorer + Send>> {
        match self.risk {
            RiskMode::Disabled => None,
            RiskMode::ClockSeeded => Some(Box::new(ClockSeededScorer)),
            RiskMode::Seeded(seed) => Some(Box::new(SeededScorer::new(seed))),
        }
    }

    /// Builds a validator on `clock` with the configured scorer.
    pub fn validator<C: Clock>(&self, clock: C) -> CardValidator<C> {
        let mut validator = CardValidator::with_clock(clock);
        validator.set_scorer(self.scorer());
        validator
    }
}
