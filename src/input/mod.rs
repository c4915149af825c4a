pub mod frames;
pub mod markers;

pub use frames::{parse_frames, ColumnMap, FrameRows};
pub use markers::parse_marker_line;

use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::LogFormat;
use crate::core::Log;
use crate::error::{LoadError, SkippedRow};

/// Load a CAN log from disk using the default column names
pub fn load<P: AsRef<Path>>(path: P) -> Result<Log, LoadError> {
    load_with(path, &LogFormat::default())
}

/// Load a CAN log from disk
pub fn load_with<P: AsRef<Path>>(path: P, format: &LogFormat) -> Result<Log, LoadError> {
    let path = path.as_ref();
    info!("Loading CAN log {}", path.display());

    let text = std::fs::read_to_string(path)?;
    parse_log(&text, format)
}

/// Parse the full text of a log file.
///
/// The first non-blank line is the header. Every later line containing the
/// marker token becomes a marker event; all other lines are frame rows.
pub fn parse_log(text: &str, format: &LogFormat) -> Result<Log, LoadError> {
    parse_log_report(text, format).map(|report| report.log)
}

/// A parsed log together with the rows that were skipped while building it
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub log: Log,
    /// Skipped marker and frame rows, ordered by line number
    pub skipped: Vec<SkippedRow>,
}

/// Same as [`parse_log`], also returning which rows were dropped and why
pub fn parse_log_report(text: &str, format: &LogFormat) -> Result<LoadReport, LoadError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut lines = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header) = lines.next().ok_or(LoadError::MissingHeader)?;
    let columns = ColumnMap::from_header_line(header, format)?;

    let mut frame_lines = Vec::new();
    let mut markers = Vec::new();
    let mut skipped = Vec::new();

    for (line_no, line) in lines {
        if is_marker_line(line, format) {
            match parse_marker_line(line) {
                Ok(marker) => markers.push(marker),
                Err(reason) => {
                    warn!(line = line_no, "Skipping marker row: {}", reason);
                    skipped.push(SkippedRow {
                        line: line_no,
                        reason,
                    });
                }
            }
        } else {
            frame_lines.push((line_no, line));
        }
    }

    let rows = parse_frames(&frame_lines, &columns)?;
    skipped.extend(rows.skipped);
    skipped.sort_by_key(|row| row.line);

    let log = Log::new(rows.frames, markers);

    debug!(offset = log.offset(), "Normalized timestamps");
    info!(
        "Loaded {} frames, {} markers, {} IDs ({} rows skipped)",
        log.frames().len(),
        log.markers().len(),
        log.selectable_ids().len(),
        skipped.len()
    );

    Ok(LoadReport { log, skipped })
}

fn is_marker_line(line: &str, format: &LogFormat) -> bool {
    !format.marker_token.is_empty() && line.contains(format.marker_token.as_str())
}
