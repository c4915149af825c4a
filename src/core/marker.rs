use serde::{Deserialize, Serialize};
use std::fmt;

/// An "Action N" annotation on the log timeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Timestamp, on the same timeline as the frames
    pub timestamp: f64,

    /// Action number
    pub label: u32,
}

impl Marker {
    pub fn new(timestamp: f64, label: u32) -> Self {
        Self { timestamp, label }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Action {}", self.label)
    }
}
