use serde::Serialize;
use std::collections::BTreeMap;

use super::{Frame, Marker};

/// A CAN ID that can be selected for display, with how often it occurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IdSummary {
    pub id: u32,
    pub frame_count: usize,
}

/// A fully loaded log: frame table plus marker events on one shared timeline
///
/// Timestamps are shifted so that the earliest frame or marker sits at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Log {
    frames: Vec<Frame>,
    markers: Vec<Marker>,
    ids: Vec<IdSummary>,
    offset: f64,
}

impl Log {
    /// Build a log from raw timestamps, sorting markers and normalizing both streams
    pub fn new(mut frames: Vec<Frame>, mut markers: Vec<Marker>) -> Self {
        markers.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));

        let offset = zero_offset(&frames, &markers);
        for frame in &mut frames {
            frame.timestamp -= offset;
        }
        for marker in &mut markers {
            marker.timestamp -= offset;
        }

        let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
        for frame in &frames {
            *counts.entry(frame.id).or_default() += 1;
        }
        let ids = counts
            .into_iter()
            .map(|(id, frame_count)| IdSummary { id, frame_count })
            .collect();

        Self {
            frames,
            markers,
            ids,
            offset,
        }
    }

    /// All frames in file order
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Frames for one CAN ID, in file order
    pub fn frames_for(&self, id: u32) -> impl Iterator<Item = &Frame> {
        self.frames.iter().filter(move |f| f.id == id)
    }

    /// Marker events, ascending by timestamp
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Distinct IDs in ascending numeric order
    pub fn selectable_ids(&self) -> &[IdSummary] {
        &self.ids
    }

    /// Raw timestamp that became time zero
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty() && self.markers.is_empty()
    }
}

/// Smallest timestamp over both streams; an empty stream does not contribute
fn zero_offset(frames: &[Frame], markers: &[Marker]) -> f64 {
    let min = frames
        .iter()
        .map(|f| f.timestamp)
        .chain(markers.iter().map(|m| m.timestamp))
        .fold(f64::INFINITY, f64::min);

    if min.is_finite() {
        min
    } else {
        0.0
    }
}
