//! CAN Novelty Scanner CLI Application
//!
//! Command-line front end for the can-novelty-scan library. It adds:
//! - Argument/config-file handling (CLI values win)
//! - Logging setup
//! - Result table rendering with column sorting (text or JSON)
//!
//! One invocation is one scan: the recording is loaded, scanned against
//! the threshold and blacklist, and the result table printed. There is no
//! state between invocations.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

mod config;
mod table;

use can_novelty_scan::{parse_threshold, DbcNames, EventSource, NoveltyScanner, RecordedLog, ScanOptions};
use config::{AppConfig, OutputFormat};
use table::SortColumn;

/// Find addresses whose payloads first change after a point in time
#[derive(Parser, Debug)]
#[command(name = "can-novelty-cli")]
#[command(about = "Scan a CAN recording for payloads that first appear after a time threshold", long_about = None)]
#[command(version)]
struct Args {
    /// Path to BLF recording to scan
    #[arg(short, long, value_name = "FILE")]
    log: Option<PathBuf>,

    /// Path to DBC file(s) for message naming (can be repeated)
    #[arg(long, value_name = "FILE")]
    dbc: Vec<PathBuf>,

    /// End of the baseline window, in seconds from the start of the
    /// recording (novel payloads are counted in the 2s after it)
    #[arg(short, long, value_name = "SECONDS")]
    end_time: Option<String>,

    /// Comma separated hexadecimal addresses to ignore
    #[arg(short, long, value_name = "LIST")]
    blacklist: Option<String>,

    /// Column to sort the result table by
    #[arg(long, value_enum)]
    sort: Option<SortColumn>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("CAN Novelty Scanner CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using scanner library v{}", can_novelty_scan::VERSION);

    // Load optional config file; CLI arguments take precedence
    let file_config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => AppConfig::default(),
    };

    let log_path = args.log.clone().or(file_config.input.log.clone());
    let Some(log_path) = log_path else {
        print_quick_start();
        return Ok(());
    };

    // The threshold arrives as text; malformed input aborts the scan with
    // a warning and produces no table.
    let threshold = match (&args.end_time, file_config.scan.end_time) {
        (Some(text), _) => match parse_threshold(text) {
            Ok(secs) => secs,
            Err(_) => {
                log::warn!("Invalid time input: {:?}", text);
                return Ok(());
            }
        },
        (None, Some(secs)) => secs,
        (None, None) => {
            print_quick_start();
            return Ok(());
        }
    };

    let blacklist_text = args
        .blacklist
        .clone()
        .or(file_config.scan.blacklist.clone())
        .unwrap_or_default();

    let options = ScanOptions::new(threshold).with_blacklist_str(&blacklist_text);

    // Load the recording
    let recording = RecordedLog::from_file(&log_path)
        .with_context(|| format!("Failed to load recording: {:?}", log_path))?;
    log::info!(
        "Recording: {} events over {:.1}s",
        recording.len(),
        recording.duration_secs()
    );

    // Load message names
    let mut names = DbcNames::new();
    for dbc_path in args.dbc.iter().chain(&file_config.input.dbc_files) {
        names
            .add_dbc(dbc_path)
            .with_context(|| format!("Failed to load DBC: {:?}", dbc_path))?;
    }
    log::info!("Name database: {} messages", names.stats().num_messages);

    // Run the scan
    let scanner = NoveltyScanner::new(options);
    let counts = scanner.scan(recording.all_events());

    // Assemble and render the result table
    let mut rows = table::build_rows(&counts, &names);
    let sort = args
        .sort
        .or(file_config.output.sort)
        .unwrap_or(SortColumn::Address);
    table::sort_rows(&mut rows, sort);

    let format = args
        .format
        .or(file_config.output.format)
        .unwrap_or(OutputFormat::Table);
    match format {
        OutputFormat::Table => {
            print!("{}", table::render_table(&rows));
            println!(
                "\n{} address(es) with novel payloads in [{}s, {}s)",
                rows.len(),
                threshold,
                threshold as f64 + scanner.options().window_secs
            );
        }
        OutputFormat::Json => println!("{}", table::render_json(&rows)?),
    }

    Ok(())
}

/// Usage hints when no recording or threshold was given
fn print_quick_start() {
    println!("CAN Novelty Scanner - No input specified");
    println!("\nQuick Start:");
    println!("  can-novelty-cli --log trace.blf --end-time 120");
    println!("  can-novelty-cli --log trace.blf --end-time 120 --dbc signals.dbc");
    println!("  can-novelty-cli --log trace.blf --end-time 120 --blacklist \"1A1, 2B0\"");
    println!("\nWith a configuration file:");
    println!("  can-novelty-cli --config config.toml");
    println!("\nUse --help for more options");
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
