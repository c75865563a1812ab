//! Message name resolution
//!
//! Maps a (bus, address) pair to a human-readable message name. The
//! scanner itself only deals in addresses; names are resolved at render
//! time. The default resolver is backed by Vector DBC files parsed with
//! the `can-dbc` crate.

use crate::types::{MessageId, Result, ScanError};
use std::collections::HashMap;
use std::path::Path;

/// Statistics about a loaded name database
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbcNamesStats {
    /// Number of distinct message names loaded
    pub num_messages: usize,
}

/// Resolve a message id to a display name
pub trait NameResolver {
    /// Display name for the message, if one is known
    fn message_name(&self, id: MessageId) -> Option<&str>;
}

/// Resolver that never knows a name
///
/// Used when no DBC files are loaded; the renderer falls back to the raw
/// address.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNames;

impl NameResolver for NoNames {
    fn message_name(&self, _id: MessageId) -> Option<&str> {
        None
    }
}

/// DBC-backed name resolver
///
/// Aggregates message names from one or more DBC files. Later definitions
/// for the same address override earlier ones.
#[derive(Debug, Clone, Default)]
pub struct DbcNames {
    names: HashMap<u32, String>,
}

impl DbcNames {
    /// Create an empty resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a DBC file and add its message names
    pub fn add_dbc(&mut self, path: &Path) -> Result<()> {
        log::info!("Parsing DBC file: {:?}", path);

        // Read the DBC file as bytes first (handle non-UTF8 encodings)
        let bytes = std::fs::read(path).map_err(|e| {
            ScanError::DbcParseError(format!("Failed to read file {:?}: {}", path, e))
        })?;

        // Try UTF-8 first, then fall back to Latin-1 (compatible with
        // Windows-1252, which older CAN tooling emits)
        let dbc_content = String::from_utf8(bytes.clone()).unwrap_or_else(|_| {
            log::warn!("DBC file is not UTF-8, trying Latin-1 encoding");
            bytes.iter().map(|&b| b as char).collect()
        });

        let dbc = can_dbc::DBC::from_slice(dbc_content.as_bytes()).map_err(|e| {
            ScanError::DbcParseError(format!("Failed to parse DBC file {:?}: {:?}", path, e))
        })?;

        let mut added = 0usize;
        for message in dbc.messages() {
            self.names
                .insert(message.message_id().0, message.message_name().to_string());
            added += 1;
        }

        log::info!("Parsed {} message names from {:?}", added, path);
        Ok(())
    }

    /// Number of known message names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True if no names are loaded
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Statistics about the loaded name database
    pub fn stats(&self) -> DbcNamesStats {
        DbcNamesStats {
            num_messages: self.names.len(),
        }
    }
}

impl NameResolver for DbcNames {
    fn message_name(&self, id: MessageId) -> Option<&str> {
        self.names.get(&id.address).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const TEST_DBC: &str = r#"
VERSION ""

NS_ :
    NS_DESC_
    CM_
    BA_DEF_
    BA_
    VAL_
    CAT_DEF_
    CAT_
    FILTER
    BA_DEF_DEF_
    EV_DATA_
    ENVVAR_DATA_
    SGTYPE_
    SGTYPE_VAL_
    BA_DEF_SGTYPE_
    BA_SGTYPE_
    SIG_TYPE_REF_
    VAL_TABLE_
    SIG_GROUP_
    SIG_VALTYPE_
    SIGTYPE_VALTYPE_
    BO_TX_BU_
    BA_DEF_REL_
    BA_REL_
    BA_SGTYPE_REL_
    SG_MUL_VAL_

BS_:

BU_: ECU1 ECU2

BO_ 291 EngineData: 8 ECU1
 SG_ EngineSpeed : 0|16@1+ (1,0) [0|8000] "rpm" ECU2
 SG_ EngineTemp : 16|8@1+ (1,-40) [-40|215] "C" ECU2

BO_ 512 BatteryStatus: 8 ECU1
 SG_ BatteryVoltage : 0|16@1+ (0.01,0) [0|16] "V" ECU2
"#;

    fn write_dbc(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file.flush().unwrap();
        temp_file
    }

    #[test]
    fn test_resolve_names_from_dbc() {
        let temp_file = write_dbc(TEST_DBC);

        let mut names = DbcNames::new();
        names.add_dbc(temp_file.path()).unwrap();

        assert_eq!(names.len(), 2);
        assert_eq!(
            names.message_name(MessageId::on_default_bus(291)),
            Some("EngineData")
        );
        assert_eq!(
            names.message_name(MessageId::on_default_bus(512)),
            Some("BatteryStatus")
        );
        assert_eq!(names.message_name(MessageId::on_default_bus(0x7FF)), None);
    }

    #[test]
    fn test_missing_dbc_file() {
        let mut names = DbcNames::new();
        let result = names.add_dbc(Path::new("nonexistent.dbc"));
        assert!(result.is_err());
    }

    #[test]
    fn test_no_names_resolver() {
        let resolver = NoNames;
        assert_eq!(resolver.message_name(MessageId::on_default_bus(291)), None);
    }
}
