use crate::core::Marker;
use crate::error::RowWarning;

/// Parse an action marker line such as `10.5,,,,,Action 5`.
///
/// The first comma-separated field is the timestamp and the label is the
/// number at the end of the last field.
pub fn parse_marker_line(line: &str) -> Result<Marker, RowWarning> {
    let mut fields = line.split(',');

    let ts_field = fields.next().unwrap_or("").trim();
    let timestamp = ts_field
        .parse::<f64>()
        .ok()
        .filter(|t| t.is_finite())
        .ok_or_else(|| RowWarning::InvalidTimestamp(ts_field.to_string()))?;

    let last_field = line.rsplit(',').next().unwrap_or("").trim();
    let label = trailing_number(last_field)
        .ok_or_else(|| RowWarning::MissingLabel(last_field.to_string()))?;

    Ok(Marker::new(timestamp, label))
}

/// The run of ASCII digits that ends `s`, if any
fn trailing_number(s: &str) -> Option<u32> {
    let start = s
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;

    s[start..].parse().ok()
}
