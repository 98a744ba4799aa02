//! One interactive run: prompt, validate, log, print.
//!
//! All fatal failures come back to [`Session::run`] as a [`SessionError`],
//! which prints one line on the error stream and picks the exit status.
//!
//! # Example
//!
//! ```
//! use cardguard::clock::FixedClock;
//! use cardguard::config::OutputFormat;
//! use cardguard::expiry::YearMonth;
//! use cardguard::session::{InputOverrides, Session};
//! use cardguard::CardValidator;
//!
//! let validator = CardValidator::with_clock(FixedClock(YearMonth::new(2024, 6).unwrap()));
//! let mut session = Session::from_parts(validator, None, OutputFormat::Text);
//!
//! let input = "4539578763621486\n01/26\nAda Lovelace\n123\n";
//! let (mut prompts, mut out, mut err) = (Vec::new(), Vec::new(), Vec::new());
//! let code = session.run(&InputOverrides::default(), input.as_bytes(), &mut prompts, &mut out, &mut err);
//!
//! assert_eq!(code, 0);
//! assert!(String::from_utf8(out).unwrap().contains("Card Type: Visa"));
//! ```

use crate::card::{Card, CardInput};
use crate::clock::{Clock, SystemClock};
use crate::config::{Config, OutputFormat};
use crate::error::{ErrorKind, ValidationError};
use crate::log::CardLog;
use crate::validate::{CardValidator, Outcome};
use std::fmt::Write as _;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Welcome line shown before the first prompt.
pub const BANNER: &str = "💳 Welcome to Credit Card Validator 💳\n\n";

/// Prompt for the card number.
pub const NUMBER_PROMPT: &str = "Enter Card Number (no spaces or dashes): ";
/// Prompt for the expiry date.
pub const EXPIRY_PROMPT: &str = "Enter Expiry Date (MM/YY): ";
/// Prompt for the holder name.
pub const HOLDER_PROMPT: &str = "Enter Card Holder Name: ";
/// Prompt for the CVV.
pub const CVV_PROMPT: &str = "Enter CVV: ";

/// Label of the decorative score line.
pub const RISK_LABEL: &str = "Risk Score (decorative placeholder, 0=Safe, 1=High Risk)";

/// Fatal failures of a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The card was rejected or its fields could not be parsed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Input ended before a field was entered.
    #[error("input ended before the {0} was entered")]
    UnexpectedEof(&'static str),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON output could not be produced.
    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

impl SessionError {
    /// Returns the kind of this failure.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(err) => err.kind(),
            Self::UnexpectedEof(_) | Self::Io(_) | Self::Json(_) => ErrorKind::Unknown,
        }
    }

    /// Returns the line printed on the error stream.
    pub fn message(&self) -> String {
        match self.kind() {
            ErrorKind::Format => "❌ Invalid card number length!".to_owned(),
            ErrorKind::Luhn => "❌ Card number failed Luhn check! Invalid.".to_owned(),
            ErrorKind::Unknown => format!("❌ Unexpected error occurred: {self}"),
        }
    }
}

/// Values supplied up front instead of through prompts.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct InputOverrides {
    /// Card number.
    pub number: Option<String>,
    /// Expiry in `MM/YY` form.
    pub expiry: Option<String>,
    /// Card holder name.
    pub holder: Option<String>,
    /// CVV.
    pub cvv: Option<String>,
}

/// Line-oriented prompt reader.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Creates a prompter reading from `input` and prompting on `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes `text` to the prompt stream.
    pub fn say(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()
    }

    /// Prompts and returns the first whitespace-separated token.
    ///
    /// Blank lines are skipped without prompting again.
    pub fn token(&mut self, prompt: &str, field: &'static str) -> Result<String, SessionError> {
        self.say(prompt)?;
        loop {
            let line = self.next_line(field)?;
            if let Some(token) = line.split_whitespace().next() {
                return Ok(token.to_owned());
            }
        }
    }

    /// Prompts and returns the whole line, trimmed. May be empty.
    pub fn line(&mut self, prompt: &str, field: &'static str) -> Result<String, SessionError> {
        self.say(prompt)?;
        let line = self.next_line(field)?;
        Ok(line.trim().to_owned())
    }

    fn next_line(&mut self, field: &'static str) -> Result<String, SessionError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(SessionError::UnexpectedEof(field));
        }
        Ok(line)
    }
}

/// Gathers the four card fields, prompting for those not in `overrides`.
pub fn collect_input<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    overrides: &InputOverrides,
) -> Result<CardInput, SessionError> {
    let mut input = CardInput::default();

    input.number = match &overrides.number {
        Some(number) => number.clone(),
        None => prompter.token(NUMBER_PROMPT, "card number")?,
    };
    input.expiry = match &overrides.expiry {
        Some(expiry) => expiry.clone(),
        None => prompter.token(EXPIRY_PROMPT, "expiry date")?,
    };
    input.holder = match &overrides.holder {
        Some(holder) => holder.clone(),
        None => prompter.line(HOLDER_PROMPT, "card holder name")?,
    };
    input.cvv = match &overrides.cvv {
        Some(cvv) => cvv.clone(),
        None => prompter.token(CVV_PROMPT, "CVV")?,
    };

    Ok(input)
}

/// Renders an outcome as console text.
pub fn render_text(outcome: &Outcome) -> String {
    let report = &outcome.report;
    let mut text = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(text);
    let _ = writeln!(text, "Card Holder: {}", report.holder);
    let _ = writeln!(text, "Card Number (masked): {}", report.masked);
    let _ = writeln!(text, "Card Type: {}", report.network);
    let _ = writeln!(text, "CVV Status: {}", report.cvv);
    let _ = writeln!(text, "{}", report.expiry_status.message());
    if let Some(risk) = outcome.risk {
        let _ = writeln!(text, "{}: {}", RISK_LABEL, risk);
    }

    text
}

/// A configured validator plus where to log and how to print.
pub struct Session<C = SystemClock> {
    validator: CardValidator<C>,
    log: Option<CardLog>,
    output: OutputFormat,
}

impl<C: Clock> Session<C> {
    /// Builds a session from `config` on `clock`.
    pub fn new(config: &Config, clock: C) -> Self {
        Self::from_parts(config.validator(clock), config.card_log(), config.output)
    }

    /// Builds a session from its parts.
    pub fn from_parts(validator: CardValidator<C>, log: Option<CardLog>, output: OutputFormat) -> Self {
        Self {
            validator,
            log,
            output,
        }
    }

    /// Runs one session and returns the process exit status.
    ///
    /// Prompts and the banner go to `prompts`, results to `out`, failures
    /// and warnings to `err`.
    pub fn run<R, P, W, E>(
        &mut self,
        overrides: &InputOverrides,
        input: R,
        prompts: P,
        mut out: W,
        mut err: E,
    ) -> u8
    where
        R: BufRead,
        P: Write,
        W: Write,
        E: Write,
    {
        match self.execute(overrides, input, prompts, &mut out, &mut err) {
            Ok(()) => 0,
            Err(e) => {
                tracing::debug!(error = %e, kind = ?e.kind(), "session failed");
                let _ = writeln!(err, "{}", e.message());
                let _ = err.flush();
                e.kind().exit_code()
            }
        }
    }

    fn execute<R, P, W, E>(
        &mut self,
        overrides: &InputOverrides,
        input: R,
        prompts: P,
        out: &mut W,
        err: &mut E,
    ) -> Result<(), SessionError>
    where
        R: BufRead,
        P: Write,
        W: Write,
        E: Write,
    {
        let mut prompter = Prompter::new(input, prompts);
        prompter.say(BANNER)?;

        let raw = collect_input(&mut prompter, overrides)?;
        let card = Card::from_input(&raw)?;
        let outcome = self.validator.validate(&card)?;

        if let Some(log) = &self.log {
            if let Err(e) = log.append(&outcome.report) {
                tracing::debug!(path = %log.path().display(), error = %e, "could not write card log");
                writeln!(
                    err,
                    "⚠️  Could not write card log {}: {}",
                    log.path().display(),
                    e
                )?;
            }
        }

        match self.output {
            OutputFormat::Text => out.write_all(render_text(&outcome).as_bytes())?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, &outcome)?;
                writeln!(out)?;
            }
        }
        out.flush()?;

        Ok(())
    }
}
