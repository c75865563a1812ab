//! BLF (Binary Log Format) file parser
//!
//! Parses Vector BLF files using the `ablf` crate and yields the payload
//! carrying CAN events the scanner consumes.
//!
//! ## Supported Object Types
//! - Type 86 (CanMessage2): CAN 2.0 and CAN-FD messages
//! - Type 10 (LogContainer): Automatically decompressed by ablf
//!
//! Error frames (type 73) and remote frames carry no payload of interest
//! and are skipped, as are object types ablf does not support (type 100
//! CAN-FD messages among them; most files use type 86 with the FD flag).

use crate::formats::LogFileParser;
use crate::types::{CanEvent, Result, ScanError};
use ablf::{BlfFile, ObjectTypes};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// BLF file parser using ablf crate
pub struct BlfParser;

impl BlfParser {
    /// Parse a BLF file and return an iterator over its CAN events
    ///
    /// Opens the BLF file and validates its structure before returning the
    /// iterator.
    pub fn parse(path: &Path) -> Result<BlfEventIterator> {
        log::info!("Parsing BLF file: {:?}", path);

        if !path.exists() {
            return Err(ScanError::LogParseError(format!(
                "BLF file not found: {:?}",
                path
            )));
        }

        // Open file with buffered reading
        let file = File::open(path)
            .map_err(|e| ScanError::LogParseError(format!("Failed to open BLF file: {}", e)))?;

        let reader = BufReader::new(file);

        // Parse BLF file structure
        let blf = BlfFile::from_reader(reader)
            .map_err(|(e, _)| ScanError::LogParseError(format!("Failed to parse BLF file: {}", e)))?;

        if !blf.is_valid() {
            return Err(ScanError::LogParseError(
                "Invalid BLF file format".to_string(),
            ));
        }

        log::info!("BLF file opened successfully");

        Ok(BlfEventIterator {
            objects: blf.into_iter(),
            skipped_types: HashSet::new(),
        })
    }
}

impl LogFileParser for BlfEventIterator {
    fn parse(path: &Path) -> Result<Self> {
        BlfParser::parse(path)
    }
}

/// Iterator over CAN events from a BLF file
pub struct BlfEventIterator {
    objects: ablf::ObjectIterator<BufReader<File>>,
    skipped_types: HashSet<u32>,
}

/// Object types we skip silently: log containers (unpacked by ablf),
/// application text and error frames.
const QUIET_SKIP_TYPES: [u32; 3] = [10, 65, 73];

impl Iterator for BlfEventIterator {
    type Item = Result<CanEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let obj = self.objects.next()?;
            if let ObjectTypes::CanMessage86(msg) = obj.data {
                // Bit 2: remote frame - no payload, nothing to fingerprint
                if (msg.flags & 0x04) != 0 {
                    continue;
                }
                return Some(Ok(CanEvent {
                    address: msg.id,
                    mono_time_ns: msg.header.timestamp_ns,
                    payload: msg.data,
                }));
            }

            // Everything else is skipped; warn once per object type we do
            // not expect to see (like type 100 CAN-FD)
            let obj_type = obj.object_type;
            if !QUIET_SKIP_TYPES.contains(&obj_type) && self.skipped_types.insert(obj_type) {
                log::warn!(
                    "Skipping unsupported BLF object type {} (size {} bytes)",
                    obj_type,
                    obj.object_size
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blf_file_not_found() {
        let result = BlfParser::parse(Path::new("nonexistent.blf"));
        assert!(result.is_err());
    }

    #[test]
    fn test_garbage_blf_rejected() {
        use std::io::Write;
        let mut temp_file = tempfile::Builder::new()
            .suffix(".blf")
            .tempfile()
            .unwrap();
        temp_file.write_all(b"not a blf file").unwrap();
        temp_file.flush().unwrap();

        let result = BlfParser::parse(temp_file.path());
        assert!(result.is_err());
    }
}
