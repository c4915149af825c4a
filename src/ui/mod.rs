pub mod dialogs;

pub use dialogs::{FileDialogs, LOG_FILE_FILTERS};
