//! Result table assembly and rendering
//!
//! Turns the scanner's address -> count map into display rows with
//! resolved message names, applies the user's column sort, and renders
//! either an aligned text table or JSON. Sorting is display-only over
//! already-computed rows; it never triggers a rescan.

use can_novelty_scan::{MessageId, NameResolver, NoveltyCounts};
use serde::{Deserialize, Serialize};

/// One row of the result table
///
/// Built fresh on every scan; a new scan fully replaces prior rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    /// Message identity (bus + address)
    pub id: MessageId,
    /// Display name resolved from the loaded DBC files
    pub name: Option<String>,
    /// Number of novel fingerprints in the detection window
    pub count: u32,
}

/// Notification hook for a host that can open a message view
///
/// An embedding host (e.g. a log browser) implements this to jump from a
/// result row to the message it names. The scan and the renderer never
/// invoke it on their own.
pub trait OpenMessage {
    /// Open the detail view for a message
    fn open_message(&self, id: MessageId);
}

/// Column to sort the result table by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortColumn {
    /// Message name, ascending (unnamed rows last)
    Name,
    /// Address, ascending
    Address,
    /// Count, descending
    Count,
}

/// Build one row per flagged address, resolving names on the default bus
pub fn build_rows(counts: &NoveltyCounts, resolver: &impl NameResolver) -> Vec<ResultRow> {
    counts
        .iter()
        .map(|(&address, &count)| {
            let id = MessageId::on_default_bus(address);
            ResultRow {
                id,
                name: resolver.message_name(id).map(str::to_string),
                count,
            }
        })
        .collect()
}

/// Sort rows by the given column
///
/// Stable, so re-sorting an already sorted table keeps ties in place.
pub fn sort_rows(rows: &mut [ResultRow], column: SortColumn) {
    match column {
        SortColumn::Name => {
            rows.sort_by(|a, b| {
                let a_key = (a.name.is_none(), a.name.as_deref());
                let b_key = (b.name.is_none(), b.name.as_deref());
                a_key.cmp(&b_key)
            });
        }
        SortColumn::Address => rows.sort_by(|a, b| a.id.address.cmp(&b.id.address)),
        SortColumn::Count => rows.sort_by(|a, b| b.count.cmp(&a.count)),
    }
}

/// Render rows as an aligned text table
pub fn render_table(rows: &[ResultRow]) -> String {
    const HEADERS: [&str; 3] = ["Message Name", "Address", "Count"];

    let name_width = rows
        .iter()
        .map(|r| r.name.as_deref().unwrap_or("-").len())
        .chain([HEADERS[0].len()])
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!(
        "{:<name_width$}  {:>10}  {:>7}\n",
        HEADERS[0], HEADERS[1], HEADERS[2]
    ));
    out.push_str(&"─".repeat(name_width + 21));
    out.push('\n');

    for row in rows {
        out.push_str(&format!(
            "{:<name_width$}  {:>10}  {:>7}\n",
            row.name.as_deref().unwrap_or("-"),
            format!("0x{:X}", row.id.address),
            row.count
        ));
    }

    out
}

/// Render rows as a JSON array
pub fn render_json(rows: &[ResultRow]) -> serde_json::Result<String> {
    #[derive(Serialize)]
    struct JsonRow<'a> {
        name: Option<&'a str>,
        address: String,
        count: u32,
    }

    let json_rows: Vec<JsonRow> = rows
        .iter()
        .map(|row| JsonRow {
            name: row.name.as_deref(),
            address: format!("0x{:X}", row.id.address),
            count: row.count,
        })
        .collect();

    serde_json::to_string_pretty(&json_rows)
}
