//! End-to-end scan over a materialized recording
//!
//! Exercises the full pipeline: recording -> options parsed from user
//! text -> scan -> name resolution, without any log file on disk.

use can_novelty_scan::{
    parse_threshold, CanEvent, DbcNames, EventSource, MessageId, NameResolver, NoveltyScanner,
    RecordedLog, ScanOptions,
};
use std::io::Write;

const SEC: u64 = 1_000_000_000;

fn event(address: u32, elapsed_ms: u64, payload: &[u8]) -> CanEvent {
    CanEvent::new(address, 90 * SEC + elapsed_ms * 1_000_000, payload.to_vec())
}

// Minimal DBC naming address 291 (0x123) "EngineData"
const TEST_DBC: &str = r#"
VERSION ""

NS_ :

BS_:

BU_: ECU1

BO_ 291 EngineData: 8 ECU1
 SG_ EngineSpeed : 0|16@1+ (1,0) [0|8000] "rpm" ECU1
"#;

#[test]
fn scan_finds_novel_payloads_and_resolves_names() {
    let log = RecordedLog::from_events(vec![
        // Baseline traffic: 0x123 cycles through two payloads, 0x1A1 is noisy
        event(0x123, 0, &[0x00, 0x01]),
        event(0x1A1, 100, &[0xAA]),
        event(0x123, 1_000, &[0x00, 0x02]),
        event(0x1A1, 1_100, &[0xAB]),
        // Detection window opens at 5s: 0x123 shows a new payload, 0x1A1
        // keeps churning but is blacklisted
        event(0x123, 5_200, &[0x00, 0x03]),
        event(0x1A1, 5_300, &[0xAC]),
        event(0x123, 5_400, &[0x00, 0x01]), // known from baseline
        event(0x123, 5_600, &[0x00, 0x03]), // repeat, not double-counted
        // Past the window: never counted
        event(0x123, 7_500, &[0x00, 0x04]),
    ]);

    let threshold = parse_threshold(" 5 ").expect("threshold parses");
    let options = ScanOptions::new(threshold).with_blacklist_str("0x1A1, zz");
    let counts = NoveltyScanner::new(options).scan(log.all_events());

    assert_eq!(counts.len(), 1);
    assert_eq!(counts[&0x123], 1);

    // Resolve the flagged address against a DBC
    let mut dbc_file = tempfile::NamedTempFile::new().unwrap();
    dbc_file.write_all(TEST_DBC.as_bytes()).unwrap();
    dbc_file.flush().unwrap();

    let mut names = DbcNames::new();
    names.add_dbc(dbc_file.path()).unwrap();

    for address in counts.keys() {
        let name = names.message_name(MessageId::on_default_bus(*address));
        assert_eq!(name, Some("EngineData"));
    }
}

#[test]
fn malformed_threshold_never_reaches_the_scanner() {
    assert!(parse_threshold("abc").is_err());
}
