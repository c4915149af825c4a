use rfd::FileDialog;
use std::path::PathBuf;

/// Supported file types for CAN logs
pub const LOG_FILE_FILTERS: &[(&str, &[&str])] = &[
    ("Text Files", &["txt"]),
    ("CSV Files", &["csv"]),
    ("All Files", &["*"]),
];

/// File dialog helper for the log viewer
pub struct FileDialogs;

impl FileDialogs {
    /// Open a file dialog for selecting a CAN log file
    pub fn open_can_file() -> Option<PathBuf> {
        LOG_FILE_FILTERS
            .iter()
            .fold(FileDialog::new(), |dialog, (name, extensions)| {
                dialog.add_filter(*name, *extensions)
            })
            .set_title("Open Log File")
            .pick_file()
    }
}
