use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::core::Log;
use crate::decode::DisplayMode;

/// What the user currently wants to see
///
/// Updates return a new value instead of mutating shared state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    pub selected_ids: BTreeSet<u32>,
    pub mode: DisplayMode,
    pub show_markers: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            selected_ids: BTreeSet::new(),
            mode: DisplayMode::default(),
            show_markers: true,
        }
    }
}

impl ViewConfig {
    /// Default view with every ID of `log` selected
    pub fn for_log(log: &Log) -> Self {
        Self::default().select_all(log)
    }

    pub fn with_mode(self, mode: DisplayMode) -> Self {
        Self { mode, ..self }
    }

    pub fn with_markers(self, show_markers: bool) -> Self {
        Self {
            show_markers,
            ..self
        }
    }

    pub fn select_all(mut self, log: &Log) -> Self {
        self.selected_ids
            .extend(log.selectable_ids().iter().map(|s| s.id));
        self
    }

    pub fn deselect_all(mut self) -> Self {
        self.selected_ids.clear();
        self
    }

    /// Flip the selection state of one ID
    pub fn toggle(mut self, id: u32) -> Self {
        if !self.selected_ids.remove(&id) {
            self.selected_ids.insert(id);
        }
        self
    }

    pub fn is_selected(&self, id: u32) -> bool {
        self.selected_ids.contains(&id)
    }
}
