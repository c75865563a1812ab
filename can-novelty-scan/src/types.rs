//! Core types for the novelty scanner library
//!
//! This module defines the event type the scanner consumes, the message
//! identity used for name resolution, and the library error type. The
//! scanner itself is stateless - it reads an already-materialized event
//! sequence and derives a result from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp type used for display purposes
pub type Timestamp = DateTime<Utc>;

/// Result type for scanner operations
pub type Result<T> = std::result::Result<T, ScanError>;

/// A single recorded CAN bus event
///
/// This is the unit the scanner operates on: an address, a monotonic
/// timestamp, and the raw payload bytes. Event sequences are assumed to be
/// ordered by `mono_time_ns` ascending; the scanner never re-sorts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanEvent {
    /// CAN message address (11-bit or 29-bit ID)
    pub address: u32,
    /// Monotonic timestamp in nanoseconds
    pub mono_time_ns: u64,
    /// Raw payload bytes (0-8 for classic CAN, up to 64 for CAN-FD)
    pub payload: Vec<u8>,
}

impl CanEvent {
    /// Create a new event
    pub fn new(address: u32, mono_time_ns: u64, payload: Vec<u8>) -> Self {
        Self {
            address,
            mono_time_ns,
            payload,
        }
    }

    /// Convert the monotonic timestamp to DateTime<Utc> for display
    pub fn timestamp(&self) -> Timestamp {
        let secs = (self.mono_time_ns / 1_000_000_000) as i64;
        let nsecs = (self.mono_time_ns % 1_000_000_000) as u32;
        DateTime::from_timestamp(secs, nsecs).unwrap_or_else(Utc::now)
    }

    /// Payload length in bytes
    pub fn dlc(&self) -> usize {
        self.payload.len()
    }
}

/// Identity of a message on a specific bus
///
/// Name resolution is keyed by (bus, address). Single-bus recordings use
/// bus 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId {
    /// Bus index the message was observed on
    pub bus: u8,
    /// CAN message address
    pub address: u32,
}

impl MessageId {
    /// Message id on the default bus (0)
    pub fn on_default_bus(address: u32) -> Self {
        Self { bus: 0, address }
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:0x{:X}", self.bus, self.address)
    }
}

/// Read-only access to a materialized, time-ordered event sequence
///
/// Abstracts over where the recording came from (log file, host
/// application stream, test fixture).
pub trait EventSource {
    /// All recorded events, ordered by timestamp ascending
    fn all_events(&self) -> &[CanEvent];
}

impl EventSource for Vec<CanEvent> {
    fn all_events(&self) -> &[CanEvent] {
        self
    }
}

impl EventSource for [CanEvent] {
    fn all_events(&self) -> &[CanEvent] {
        self
    }
}

/// Errors that can occur while loading inputs or running a scan
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Invalid threshold input: {0:?}")]
    InvalidThreshold(String),

    #[error("Failed to parse log file: {0}")]
    LogParseError(String),

    #[error("Failed to parse DBC file: {0}")]
    DbcParseError(String),

    #[error("Unsupported log format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_timestamp_conversion() {
        let event = CanEvent::new(0x1A1, 1_500_000_000, vec![0xDE, 0xAD]);
        let ts = event.timestamp();
        assert_eq!(ts.timestamp(), 1);
        assert_eq!(ts.timestamp_subsec_nanos(), 500_000_000);
        assert_eq!(event.dlc(), 2);
    }

    #[test]
    fn test_message_id_display() {
        let id = MessageId::on_default_bus(0x1A1);
        assert_eq!(format!("{}", id), "0:0x1A1");
    }

    #[test]
    fn test_event_source_for_vec() {
        let events = vec![CanEvent::new(1, 0, vec![]), CanEvent::new(2, 1, vec![])];
        assert_eq!(events.all_events().len(), 2);
    }
}
