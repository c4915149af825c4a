use serde::{Deserialize, Serialize};

/// Largest number of data bytes a classic CAN frame carries
pub const MAX_DATA_LEN: usize = 8;

/// A recorded CAN frame
///
/// The data bytes are kept exactly as they appeared in the log and are
/// only decoded when a signal is extracted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Timestamp, relative to the start of the log once loaded
    pub timestamp: f64,

    /// CAN arbitration ID (11-bit or 29-bit)
    pub id: u32,

    /// Whitespace-separated hex byte tokens, e.g. `"AA BB 01"`
    pub data: String,
}

impl Frame {
    pub fn new(timestamp: f64, id: u32, data: impl Into<String>) -> Self {
        Self {
            timestamp,
            id,
            data: data.into(),
        }
    }

    /// Create a frame from raw bytes, encoding them the way logs write them
    pub fn from_bytes(timestamp: f64, id: u32, bytes: &[u8]) -> Self {
        Self::new(timestamp, id, hex_data(bytes))
    }

    /// Decode the byte at `index`.
    ///
    /// Returns `None` when the frame is shorter than `index + 1` bytes or the
    /// token is not a hex byte.
    pub fn byte(&self, index: usize) -> Option<u8> {
        self.data.split_whitespace().nth(index).and_then(parse_hex_byte)
    }

    /// Decode every data byte, or `None` if any token is invalid or there are too many
    pub fn data_bytes(&self) -> Option<Vec<u8>> {
        let bytes = self
            .data
            .split_whitespace()
            .map(parse_hex_byte)
            .collect::<Option<Vec<_>>>()?;

        if bytes.len() > MAX_DATA_LEN {
            return None;
        }
        Some(bytes)
    }
}

/// Parse a CAN ID written either as decimal or as `0x`-prefixed hex
pub fn parse_can_id(s: &str) -> Option<u32> {
    let s = s.trim();
    let (digits, radix) = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (s, 10),
    };

    // `from_str_radix` would accept a leading sign
    if digits.starts_with(['+', '-']) {
        return None;
    }
    u32::from_str_radix(digits, radix).ok()
}

/// Parse a single one- or two-digit hex byte token
pub fn parse_hex_byte(token: &str) -> Option<u8> {
    if token.is_empty() || token.len() > 2 || !token.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u8::from_str_radix(token, 16).ok()
}

/// Format bytes as space-separated upper-case hex tokens
pub fn hex_data(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
