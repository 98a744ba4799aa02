//! Append-only text log of checked cards.
//!
//! Each entry is four lines and a blank separator:
//!
//! ```text
//! Card Holder: Ada Lovelace
//! Card Type: Visa
//! Masked Card: XXXX-XXXX-XXXX-1486
//! Expiry: 12/24
//!
//! ```
//!
//! The file is opened, appended to and closed on every call. There is no
//! rotation and no locking.

use crate::validate::Report;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Default log file, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "card_log.txt";

/// Handle to the card log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardLog {
    path: PathBuf,
}

impl CardLog {
    /// Creates a log that writes to `path`. The file is not touched yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the log file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one entry for `report`, creating the file if needed.
    pub fn append(&self, report: &Report) -> io::Result<()> {
        let entry = format_entry(report);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(entry.as_bytes())?;
        tracing::debug!(path = %self.path.display(), card = %report.masked, "card logged");
        Ok(())
    }
}

impl Default for CardLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_FILE)
    }
}

/// Formats one log entry, including the trailing blank line.
pub fn format_entry(report: &Report) -> String {
    format!(
        "Card Holder: {}\nCard Type: {}\nMasked Card: {}\nExpiry: {}\n\n",
        report.holder, report.network, report.masked, report.expiry
    )
}
