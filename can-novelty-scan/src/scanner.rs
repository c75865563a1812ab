//! Novelty scan over a recorded event sequence
//!
//! Flags addresses whose payloads first appear shortly after a chosen
//! point in the recording. The scan has two phases expressed over one
//! ordered pass:
//!
//! 1. Baseline: every fingerprint observed at elapsed time < threshold is
//!    recorded as already known.
//! 2. Detection: in [threshold, threshold + window), a fingerprint that is
//!    in neither the baseline nor the already-counted set increments its
//!    address counter, once per distinct fingerprint.
//!
//! Events at or beyond the end of the detection window are ignored. The
//! pass always runs to the end of the sequence; since sequences are
//! ordered, the baseline is effectively frozen when the window opens.
//!
//! The scan is synchronous and allocates only the two transient
//! fingerprint sets and the result map - nothing survives between
//! invocations.

use crate::config::ScanOptions;
use crate::types::CanEvent;
use std::collections::{HashMap, HashSet};

/// Identity of one (address, payload) combination
///
/// Keyed structurally rather than by a concatenated string, so payloads of
/// different addresses can never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    /// CAN message address
    pub address: u32,
    /// Raw payload bytes
    pub payload: Vec<u8>,
}

impl Fingerprint {
    fn of(event: &CanEvent) -> Self {
        Self {
            address: event.address,
            payload: event.payload.clone(),
        }
    }
}

/// Per-address counts of novel fingerprints seen in the detection window
pub type NoveltyCounts = HashMap<u32, u32>;

/// The novelty scanner
///
/// Holds the options for one scan; [`NoveltyScanner::scan`] derives a fresh
/// result from a read-only event sequence on every call.
#[derive(Debug, Clone, Default)]
pub struct NoveltyScanner {
    options: ScanOptions,
}

impl NoveltyScanner {
    /// Create a scanner with the given options
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    /// The options this scanner runs with
    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Scan an ordered event sequence for post-threshold novel payloads
    ///
    /// Returns a map from address to the number of distinct fingerprints
    /// first observed inside the detection window. Only addresses with at
    /// least one qualifying fingerprint appear. An empty sequence, or a
    /// threshold past the end of the recording, yields an empty map.
    pub fn scan(&self, events: &[CanEvent]) -> NoveltyCounts {
        let mut counts = NoveltyCounts::new();

        // Elapsed time is relative to the first event in the sequence,
        // captured before any blacklist filtering.
        let Some(first) = events.first() else {
            return counts;
        };
        let first_time_ns = first.mono_time_ns;

        let threshold = self.options.threshold_secs as f64;
        let window_end = threshold + self.options.window_secs;

        let mut baseline: HashSet<Fingerprint> = HashSet::new();
        let mut counted: HashSet<Fingerprint> = HashSet::new();

        for event in events {
            if self.options.is_blacklisted(event.address) {
                continue;
            }

            let elapsed = event.mono_time_ns.saturating_sub(first_time_ns) as f64 / 1e9;

            if elapsed < threshold {
                baseline.insert(Fingerprint::of(event));
            } else if elapsed < window_end {
                let fingerprint = Fingerprint::of(event);
                if !baseline.contains(&fingerprint) && !counted.contains(&fingerprint) {
                    *counts.entry(event.address).or_insert(0) += 1;
                    counted.insert(fingerprint);
                }
            }
            // elapsed >= window_end: ignored
        }

        log::debug!(
            "Scan complete: {} baseline fingerprints, {} novel across {} addresses",
            baseline.len(),
            counted.len(),
            counts.len()
        );

        counts
    }
}
