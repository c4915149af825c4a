use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::core::{Frame, Log, MAX_DATA_LEN};

/// Position of a single data byte, always in `0..8`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ByteIndex(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("byte index {0} is out of range 0..8")]
pub struct InvalidByteIndex(pub u8);

impl ByteIndex {
    pub fn new(index: u8) -> Option<Self> {
        ((index as usize) < MAX_DATA_LEN).then_some(Self(index))
    }

    pub fn get(self) -> usize {
        self.0 as usize
    }

    /// Every valid index, in order
    pub fn all() -> impl Iterator<Item = Self> {
        (0..MAX_DATA_LEN as u8).map(Self)
    }
}

impl TryFrom<u8> for ByteIndex {
    type Error = InvalidByteIndex;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::new(index).ok_or(InvalidByteIndex(index))
    }
}

impl From<ByteIndex> for u8 {
    fn from(index: ByteIndex) -> u8 {
        index.0
    }
}

impl fmt::Display for ByteIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How frame data is turned into a plotted value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayMode {
    /// One data byte, 0-255
    SingleByte(ByteIndex),
    /// All data bytes packed big-endian into one integer
    Combined,
}

impl Default for DisplayMode {
    fn default() -> Self {
        DisplayMode::SingleByte(ByteIndex::default())
    }
}

impl DisplayMode {
    /// Value of `frame` in this mode, or `None` if the frame has nothing to plot
    pub fn value_of(self, frame: &Frame) -> Option<u64> {
        match self {
            DisplayMode::SingleByte(index) => frame.byte(index.get()).map(u64::from),
            DisplayMode::Combined => frame.data_bytes().map(|bytes| combined_value(&bytes)),
        }
    }
}

/// A single point of a signal time series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub timestamp: f64,
    pub value: u64,
}

/// Pack bytes into an integer, first byte most significant
pub fn combined_value(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
}

/// Extract the time series for one CAN ID.
///
/// Frames that cannot produce a value in `mode` are skipped. Samples keep the
/// frame table order.
pub fn extract(log: &Log, id: u32, mode: DisplayMode) -> Vec<Sample> {
    log.frames_for(id)
        .filter_map(|frame| {
            mode.value_of(frame).map(|value| Sample {
                timestamp: frame.timestamp,
                value,
            })
        })
        .collect()
}
