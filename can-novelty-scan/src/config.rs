//! Scan configuration and user-input parsing
//!
//! Holds the options for one scan invocation and the parsers for the two
//! free-text inputs (threshold seconds and blacklist). Blacklist parsing is
//! lenient - malformed entries are skipped with a warning so a single typo
//! does not abort the scan. Threshold parsing is strict - a bad threshold
//! aborts the whole scan.

use crate::types::{Result, ScanError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Width of the detection window in seconds
///
/// Novel payloads are counted in the interval [threshold, threshold + window).
pub const DEFAULT_WINDOW_SECS: f64 = 2.0;

/// Options for a single novelty scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanOptions {
    /// Baseline/detection boundary in elapsed seconds. Payloads first seen
    /// before this point are "already known". Zero or negative values are
    /// accepted and make the baseline empty.
    pub threshold_secs: i64,

    /// Detection window width in seconds (counted interval is
    /// [threshold, threshold + window))
    #[serde(default = "default_window")]
    pub window_secs: f64,

    /// Addresses excluded from the scan entirely
    #[serde(default)]
    pub blacklist: HashSet<u32>,
}

fn default_window() -> f64 {
    DEFAULT_WINDOW_SECS
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            threshold_secs: 0,
            window_secs: DEFAULT_WINDOW_SECS,
            blacklist: HashSet::new(),
        }
    }
}

impl ScanOptions {
    /// Create options with the given threshold and defaults otherwise
    pub fn new(threshold_secs: i64) -> Self {
        Self {
            threshold_secs,
            ..Self::default()
        }
    }

    /// Builder method: set the threshold in seconds
    pub fn with_threshold(mut self, threshold_secs: i64) -> Self {
        self.threshold_secs = threshold_secs;
        self
    }

    /// Builder method: set the detection window width in seconds
    pub fn with_window(mut self, window_secs: f64) -> Self {
        self.window_secs = window_secs;
        self
    }

    /// Builder method: set the blacklist
    pub fn with_blacklist(mut self, blacklist: HashSet<u32>) -> Self {
        self.blacklist = blacklist;
        self
    }

    /// Builder method: parse a comma-separated hex blacklist string
    ///
    /// Malformed entries are skipped with a warning, see [`parse_blacklist`].
    pub fn with_blacklist_str(mut self, text: &str) -> Self {
        self.blacklist = parse_blacklist(text);
        self
    }

    /// Check whether an address is excluded from the scan
    pub fn is_blacklisted(&self, address: u32) -> bool {
        self.blacklist.contains(&address)
    }
}

/// Parse the threshold field as an integer number of seconds
///
/// Leading/trailing whitespace is ignored. Any other deviation is an
/// `InvalidThreshold` error; the caller is expected to log it and abort the
/// scan without touching previous output.
pub fn parse_threshold(text: &str) -> Result<i64> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| ScanError::InvalidThreshold(text.to_string()))
}

/// Parse a comma-separated list of hexadecimal addresses
///
/// Entries are whitespace-trimmed and may carry an optional `0x` prefix.
/// Empty entries are ignored; entries that fail to parse are skipped with a
/// warning. This never fails as a whole.
pub fn parse_blacklist(text: &str) -> HashSet<u32> {
    let mut blacklist = HashSet::new();

    for entry in text.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }

        let digits = entry
            .strip_prefix("0x")
            .or_else(|| entry.strip_prefix("0X"))
            .unwrap_or(entry);

        match u32::from_str_radix(digits, 16) {
            Ok(address) => {
                blacklist.insert(address);
            }
            Err(_) => {
                log::warn!("Invalid address in blacklist: {:?}", entry);
            }
        }
    }

    blacklist
}
