use std::path::Path;
use tracing::{info, warn};

use super::{PlotModel, ViewConfig};
use crate::config::LogFormat;
use crate::core::Log;
use crate::error::LoadError;
use crate::input::{load_with, parse_log};

/// The currently loaded log together with the view of it
///
/// A failed load never touches the log or view already held.
#[derive(Debug, Default)]
pub struct Session {
    format: LogFormat,
    log: Option<Log>,
    view: ViewConfig,
}

impl Session {
    pub fn new(format: LogFormat) -> Self {
        Self {
            format,
            log: None,
            view: ViewConfig::default(),
        }
    }

    /// Load a log file, replacing the current log on success
    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> Result<&Log, LoadError> {
        let result = load_with(path, &self.format);
        self.install(result)
    }

    /// Same as [`Session::open`] for log text already in memory
    pub fn open_text(&mut self, text: &str) -> Result<&Log, LoadError> {
        let result = parse_log(text, &self.format);
        self.install(result)
    }

    fn install(&mut self, result: Result<Log, LoadError>) -> Result<&Log, LoadError> {
        let log = match result {
            Ok(log) => log,
            Err(e) => {
                warn!("Failed to load file: {}", e);
                return Err(e);
            }
        };

        // New logs start with every ID selected
        self.view = self.view.clone().deselect_all().select_all(&log);
        info!("Selected {} IDs", self.view.selected_ids.len());

        Ok(&*self.log.insert(log))
    }

    pub fn log(&self) -> Option<&Log> {
        self.log.as_ref()
    }

    pub fn view(&self) -> &ViewConfig {
        &self.view
    }

    pub fn set_view(&mut self, view: ViewConfig) {
        self.view = view;
    }

    /// Plot of the current view, or `None` before the first successful load
    pub fn plot(&self) -> Option<PlotModel> {
        self.log.as_ref().map(|log| PlotModel::build(log, &self.view))
    }
}
