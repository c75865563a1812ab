//! CAN Signal Novelty Scanner Library
//!
//! Scans a recorded, time-ordered stream of CAN events for message
//! addresses whose payload bytes first change shortly after a chosen
//! threshold - a heuristic for signals that appear (or start moving) at a
//! known moment in a recording, e.g. when a button was pressed.
//!
//! # Architecture
//!
//! The library is intentionally minimal and focused on the scan:
//! - Loads event sequences from BLF log files
//! - Parses the user-facing threshold and blacklist inputs
//! - Runs the two-phase baseline/detection novelty scan
//! - Resolves message names from DBC files for display
//!
//! The library does NOT:
//! - Decode signal values (only raw payload bytes are compared)
//! - Persist any state between scans
//! - Run anything in the background - a scan is one synchronous pass
//!
//! Result rendering and sorting live in the application layer
//! (can-novelty-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use can_novelty_scan::{DbcNames, EventSource, NoveltyScanner, RecordedLog, ScanOptions};
//! use std::path::Path;
//!
//! // Load the recording and the message names
//! let log = RecordedLog::from_file(Path::new("trace.blf")).unwrap();
//! let mut names = DbcNames::new();
//! names.add_dbc(Path::new("powertrain.dbc")).unwrap();
//!
//! // Scan: baseline before 120s, detect novel payloads in [120s, 122s)
//! let options = ScanOptions::new(120).with_blacklist_str("1A1, 2B0");
//! let counts = NoveltyScanner::new(options).scan(log.all_events());
//!
//! for (address, count) in &counts {
//!     println!("0x{:X}: {} novel payloads", address, count);
//! }
//! ```

// Public modules
pub mod config;
pub mod formats;
pub mod names;
pub mod scanner;
pub mod types;

// Re-export main types for convenience
pub use config::{parse_blacklist, parse_threshold, ScanOptions, DEFAULT_WINDOW_SECS};
pub use formats::{load_events, RecordedLog};
pub use names::{DbcNames, DbcNamesStats, NameResolver, NoNames};
pub use scanner::{Fingerprint, NoveltyCounts, NoveltyScanner};
pub use types::{CanEvent, EventSource, MessageId, Result, ScanError, Timestamp};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: a default scanner over no events finds nothing
        let scanner = NoveltyScanner::default();
        assert!(scanner.scan(&[]).is_empty());
    }
}
