//! Log file parsers
//!
//! Parsers turn recorded log files into the event sequence the scanner
//! consumes. Each parser is an iterator over [`CanEvent`] items; the
//! dispatch here picks a parser by file extension and materializes the
//! full sequence.

use crate::types::{CanEvent, EventSource, Result, ScanError};
use std::path::Path;

pub mod blf;

// Re-export parser types
pub use blf::{BlfEventIterator, BlfParser};

/// Common trait for all log file parsers
///
/// Each parser opens a file and yields its CAN events in recorded order.
pub trait LogFileParser: Iterator<Item = Result<CanEvent>> + Sized {
    /// Parse a log file and return an iterator over its events
    fn parse(path: &Path) -> Result<Self>;
}

/// Load all events from a log file, dispatching on file extension
pub fn load_events(path: &Path) -> Result<Vec<CanEvent>> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());

    match extension.as_deref() {
        Some("blf") => {
            log::debug!("Detected BLF file format");
            BlfParser::parse(path)?.collect()
        }
        _ => Err(ScanError::UnsupportedFormat(format!(
            "{:?} (expected .blf)",
            extension.unwrap_or_default()
        ))),
    }
}

/// A fully materialized recording
///
/// Owns the event sequence loaded from a log file and exposes it through
/// [`EventSource`]. Events keep the order the parser produced.
#[derive(Debug, Clone, Default)]
pub struct RecordedLog {
    events: Vec<CanEvent>,
}

impl RecordedLog {
    /// Load a recording from a log file
    pub fn from_file(path: &Path) -> Result<Self> {
        let events = load_events(path)?;
        log::info!("Loaded {} events from {:?}", events.len(), path);
        Ok(Self { events })
    }

    /// Wrap an already-materialized event sequence
    pub fn from_events(events: Vec<CanEvent>) -> Self {
        Self { events }
    }

    /// Number of events in the recording
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if the recording holds no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Monotonic timestamp of the first event, if any
    pub fn first_time_ns(&self) -> Option<u64> {
        self.events.first().map(|e| e.mono_time_ns)
    }

    /// Recording length in seconds (first to last event)
    pub fn duration_secs(&self) -> f64 {
        match (self.events.first(), self.events.last()) {
            (Some(first), Some(last)) => {
                last.mono_time_ns.saturating_sub(first.mono_time_ns) as f64 / 1e9
            }
            _ => 0.0,
        }
    }
}

impl EventSource for RecordedLog {
    fn all_events(&self) -> &[CanEvent] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_extension() {
        let result = load_events(Path::new("trace.txt"));
        assert!(matches!(result, Err(ScanError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_recorded_log_accessors() {
        let log = RecordedLog::from_events(vec![
            CanEvent::new(0xA1, 1_000_000_000, vec![0x00]),
            CanEvent::new(0xA1, 3_500_000_000, vec![0x01]),
        ]);
        assert_eq!(log.len(), 2);
        assert!(!log.is_empty());
        assert_eq!(log.first_time_ns(), Some(1_000_000_000));
        assert_eq!(log.duration_secs(), 2.5);
        assert_eq!(log.all_events().len(), 2);
    }

    #[test]
    fn test_empty_recorded_log() {
        let log = RecordedLog::default();
        assert!(log.is_empty());
        assert_eq!(log.first_time_ns(), None);
        assert_eq!(log.duration_secs(), 0.0);
    }
}
