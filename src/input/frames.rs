use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, warn};

use crate::config::LogFormat;
use crate::core::frame::parse_can_id;
use crate::core::Frame;
use crate::error::{LoadError, RowWarning, SkippedRow};

/// Positions of the columns the parser needs, resolved once from the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub timestamp: usize,
    pub id: usize,
    pub data: usize,
    /// Number of columns the header declares
    pub width: usize,
}

impl ColumnMap {
    /// Resolve the column map from a raw header line
    pub fn from_header_line(header: &str, format: &LogFormat) -> Result<Self, LoadError> {
        let mut rdr = reader(header.as_bytes());

        let mut record = StringRecord::new();
        if !rdr.read_record(&mut record)? {
            return Err(LoadError::MissingHeader);
        }
        Self::resolve(&record, format)
    }

    /// Detect column indices from CSV headers
    pub fn resolve(headers: &StringRecord, format: &LogFormat) -> Result<Self, LoadError> {
        let columns = Self {
            timestamp: find_column(headers, "timestamp", &format.timestamp_columns)?,
            id: find_column(headers, "ID", &format.id_columns)?,
            data: find_column(headers, "data", &format.data_columns)?,
            width: headers.len(),
        };
        debug!(?columns, "Resolved log columns");
        Ok(columns)
    }
}

/// Log rows are plain comma-separated fields; quotes are ordinary characters
fn reader(bytes: &[u8]) -> csv::Reader<&[u8]> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(bytes)
}

/// Find a column by checking possible names
fn find_column(
    headers: &StringRecord,
    kind: &'static str,
    names: &[String],
) -> Result<usize, LoadError> {
    for (idx, header) in headers.iter().enumerate() {
        let header = header.trim();
        if names.iter().any(|name| header.eq_ignore_ascii_case(name.trim())) {
            return Ok(idx);
        }
    }

    Err(LoadError::MissingColumn {
        kind,
        candidates: names.to_vec(),
    })
}

/// Frames parsed from a batch of rows, plus the rows that were left out
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameRows {
    pub frames: Vec<Frame>,
    pub skipped: Vec<SkippedRow>,
}

/// Parse frame lines as CSV rows laid out according to `columns`.
///
/// Each entry of `lines` carries its 1-based line number in the source file.
/// Rows with an unreadable timestamp or ID are skipped with a warning; a row
/// with more fields than the header aborts the whole parse.
pub fn parse_frames(lines: &[(usize, &str)], columns: &ColumnMap) -> Result<FrameRows, LoadError> {
    let body = lines
        .iter()
        .map(|(_, line)| *line)
        .collect::<Vec<_>>()
        .join("\n");

    let mut rdr = reader(body.as_bytes());
    let mut rows = FrameRows {
        frames: Vec::with_capacity(lines.len()),
        skipped: Vec::new(),
    };

    for result in rdr.records() {
        let record = result?;
        // Record positions count lines of `body`, starting at 1
        let line = record
            .position()
            .and_then(|pos| (pos.line() as usize).checked_sub(1))
            .and_then(|idx| lines.get(idx))
            .map(|(n, _)| *n)
            .unwrap_or(0);

        if record.len() > columns.width {
            return Err(LoadError::ColumnMismatch {
                line,
                expected: columns.width,
                found: record.len(),
            });
        }

        match parse_frame(&record, columns) {
            Ok(frame) => rows.frames.push(frame),
            Err(reason) => {
                warn!(line, "Skipping frame row: {}", reason);
                rows.skipped.push(SkippedRow { line, reason });
            }
        }
    }

    Ok(rows)
}

/// Decode one CSV record into a frame
fn parse_frame(record: &StringRecord, columns: &ColumnMap) -> Result<Frame, RowWarning> {
    let ts_field = record.get(columns.timestamp).unwrap_or("").trim();
    let timestamp = ts_field
        .parse::<f64>()
        .ok()
        .filter(|t| t.is_finite())
        .ok_or_else(|| RowWarning::InvalidTimestamp(ts_field.to_string()))?;

    let id_field = record.get(columns.id).unwrap_or("");
    let id = parse_can_id(id_field).ok_or_else(|| RowWarning::InvalidId(id_field.to_string()))?;

    let data = record.get(columns.data).unwrap_or("").trim();

    Ok(Frame::new(timestamp, id, data))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(header: &str) -> ColumnMap {
        ColumnMap::from_header_line(header, &LogFormat::default()).unwrap()
    }

    #[test]
    fn test_resolve_columns() {
        let map = columns("Timestamp,ID,Data");
        assert_eq!(
            map,
            ColumnMap {
                timestamp: 0,
                id: 1,
                data: 2,
                width: 3,
            }
        );

        let map = columns("channel, data ,time,can_id,comment");
        assert_eq!(
            map,
            ColumnMap {
                timestamp: 2,
                id: 3,
                data: 1,
                width: 5,
            }
        );
    }

    #[test]
    fn test_quoted_header_names_are_literal() {
        let result = ColumnMap::from_header_line("\"Timestamp\",ID,Data", &LogFormat::default());
        assert!(matches!(
            result,
            Err(LoadError::MissingColumn {
                kind: "timestamp",
                ..
            })
        ));
    }

    #[test]
    fn test_missing_column() {
        let result = ColumnMap::from_header_line("Timestamp,Data", &LogFormat::default());
        assert!(matches!(result, Err(LoadError::MissingColumn { kind: "ID", .. })));
    }

    #[test]
    fn test_custom_column_names() {
        let format = LogFormat {
            data_columns: vec!["Bytes Hex".to_string()],
            ..LogFormat::default()
        };
        let map = ColumnMap::from_header_line("Time,Bytes Hex,Id", &format).unwrap();
        assert_eq!(map.data, 1);
    }

    #[test]
    fn test_parse_frames() {
        let map = columns("Timestamp,ID,Data");
        let lines = [(2, "0.000,0x100,AA BB CC"), (3, "0.015,513,01 02")];

        let rows = parse_frames(&lines, &map).unwrap();
        assert_eq!(
            rows.frames,
            vec![
                Frame::new(0.0, 0x100, "AA BB CC"),
                Frame::new(0.015, 513, "01 02"),
            ]
        );
        assert!(rows.skipped.is_empty());
    }

    #[test]
    fn test_bad_rows_are_skipped() {
        let map = columns("Timestamp,ID,Data");
        let lines = [
            (2, "0.0,0x100,01"),
            (3, "zero,0x100,02"),
            (4, "0.2,0xZZ,03"),
            (5, "0.3,,04"),
            (6, "0.4,0x100,05"),
        ];

        let rows = parse_frames(&lines, &map).unwrap();
        let data: Vec<&str> = rows.frames.iter().map(|f| f.data.as_str()).collect();
        assert_eq!(data, vec!["01", "05"]);

        let skipped: Vec<usize> = rows.skipped.iter().map(|s| s.line).collect();
        assert_eq!(skipped, vec![3, 4, 5]);
        assert_eq!(rows.skipped[0].reason, RowWarning::InvalidTimestamp("zero".to_string()));
    }

    #[test]
    fn test_quote_opening_a_field_does_not_swallow_later_rows() {
        let map = columns("Timestamp,ID,Data");
        let lines = [
            (2, "0.0,0x100,\"01"),
            (3, "0.1,0x100,02"),
            (4, "0.2,0x100,03"),
            (5, "0.3,0x200,04"),
        ];

        let rows = parse_frames(&lines, &map).unwrap();
        assert_eq!(
            rows.frames,
            vec![
                Frame::new(0.0, 0x100, "\"01"),
                Frame::new(0.1, 0x100, "02"),
                Frame::new(0.2, 0x100, "03"),
                Frame::new(0.3, 0x200, "04"),
            ]
        );
        assert!(rows.skipped.is_empty());
    }

    #[test]
    fn test_quotes_keep_line_numbers_aligned() {
        let map = columns("Timestamp,ID,Data");
        let lines = [
            (2, "0.0,\"0x100\",01"),
            (3, "0.1,0x100,01 \"02"),
            (5, "0.2,0x1\"0,03"),
            (6, "bad,0x100,04"),
            (7, "0.4,0x100,05"),
        ];

        let rows = parse_frames(&lines, &map).unwrap();
        assert_eq!(
            rows.frames,
            vec![
                Frame::new(0.1, 0x100, "01 \"02"),
                Frame::new(0.4, 0x100, "05"),
            ]
        );
        assert_eq!(
            rows.skipped,
            vec![
                SkippedRow {
                    line: 2,
                    reason: RowWarning::InvalidId("\"0x100\"".to_string()),
                },
                SkippedRow {
                    line: 5,
                    reason: RowWarning::InvalidId("0x1\"0".to_string()),
                },
                SkippedRow {
                    line: 6,
                    reason: RowWarning::InvalidTimestamp("bad".to_string()),
                },
            ]
        );
    }

    #[test]
    fn test_short_row_has_empty_data() {
        let map = columns("Timestamp,ID,Data");
        let rows = parse_frames(&[(2, "1.0,0x7")], &map).unwrap();
        assert_eq!(rows.frames, vec![Frame::new(1.0, 7, "")]);
    }

    #[test]
    fn test_extra_fields_abort() {
        let map = columns("Timestamp,ID,Data");
        let lines = [(2, "0.0,0x100,01"), (3, "0.1,0x100,02,extra")];

        let result = parse_frames(&lines, &map);
        assert!(matches!(
            result,
            Err(LoadError::ColumnMismatch {
                line: 3,
                expected: 3,
                found: 4,
            })
        ));
    }
}
