//! Interactive credit card checker.
//!
//! # Usage
//!
//! ```bash
//! # Prompt for every field
//! cardguard
//!
//! # Supply fields up front (anything missing is still prompted for)
//! cardguard --number 4539578763621486 --expiry 12/30 --holder "Ada Lovelace" --cvv 123
//!
//! # Machine-readable output, no log file, reproducible score
//! cardguard --format json --no-log --risk-seed 7
//! ```
//!
//! Exit status: 0 on success, 1 when the card is rejected (length or Luhn),
//! 2 for any other failure.

use anyhow::Context;
use cardguard::clock::SystemClock;
use cardguard::config::{Config, OutputFormat, RiskMode};
use cardguard::log::DEFAULT_LOG_FILE;
use cardguard::session::{InputOverrides, Session};
use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "cardguard")]
#[command(author, version, about = "Interactive credit card checker")]
struct Cli {
    /// Card number (skips the prompt; visible in the process list)
    #[arg(long)]
    number: Option<String>,

    /// Expiry date as MM/YY (skips the prompt)
    #[arg(long)]
    expiry: Option<String>,

    /// Card holder name (skips the prompt)
    #[arg(long)]
    holder: Option<String>,

    /// CVV (skips the prompt; visible in the process list)
    #[arg(long)]
    cvv: Option<String>,

    /// File that checked cards are appended to
    #[arg(long, env = "CARDGUARD_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Do not write the card log
    #[arg(long, env = "CARDGUARD_NO_LOG")]
    no_log: bool,

    /// Seed for the decorative risk score
    #[arg(long, env = "CARDGUARD_RISK_SEED")]
    risk_seed: Option<u64>,

    /// Do not show the decorative risk score (wins over --risk-seed)
    #[arg(long)]
    no_risk_score: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: FormatArg,

    /// Log pipeline events to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

impl Cli {
    fn config(&self) -> Config {
        let risk = match (self.no_risk_score, self.risk_seed) {
            (true, _) => RiskMode::Disabled,
            (false, Some(seed)) => RiskMode::Seeded(seed),
            (false, None) => RiskMode::ClockSeeded,
        };

        Config {
            log_file: (!self.no_log).then(|| self.log_file.clone()),
            risk,
            output: self.format.into(),
        }
    }

    fn overrides(&mut self) -> InputOverrides {
        InputOverrides {
            number: self.number.take(),
            expiry: self.expiry.take(),
            holder: self.holder.take(),
            cvv: self.cvv.take(),
        }
    }
}

fn main() -> ExitCode {
    let mut cli = Cli::parse();

    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("warning: {e:#}");
    }

    let config = cli.config();
    let overrides = cli.overrides();
    tracing::debug!(?config, "starting session");

    // Keep stdout clean for JSON consumers
    let prompts: Box<dyn Write> = match config.output {
        OutputFormat::Text => Box::new(io::stdout()),
        OutputFormat::Json => Box::new(io::stderr()),
    };

    let mut session = Session::new(&config, SystemClock);
    let code = session.run(
        &overrides,
        io::stdin().lock(),
        prompts,
        io::stdout(),
        io::stderr(),
    );

    ExitCode::from(code)
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let default_filter = if verbose { "cardguard=debug" } else { "warn" };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init()
        .context("failed to initialise logging")
}
