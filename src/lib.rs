//! Parsing and signal extraction for recorded CAN bus logs.
//!
//! A log is comma-separated text with a header row. Frame rows carry a
//! timestamp, an arbitration ID and space-separated hex data bytes; rows
//! containing `Action` are marker events that share the frames' timeline.
//!
//! ```no_run
//! use can_log_viewer::{extract, load, DisplayMode};
//!
//! let log = load("drive.csv").unwrap();
//! for summary in log.selectable_ids() {
//!     let samples = extract(&log, summary.id, DisplayMode::Combined);
//!     println!("0x{:X}: {} samples", summary.id, samples.len());
//! }
//! ```

pub mod config;
pub mod core;
pub mod decode;
pub mod error;
pub mod input;
pub mod ui;
pub mod view;

pub use crate::config::LogFormat;
pub use crate::core::{Frame, IdSummary, Log, Marker};
pub use crate::decode::{extract, ByteIndex, DisplayMode, Sample};
pub use crate::error::{LoadError, RowWarning, SkippedRow};
pub use crate::input::{load, load_with, parse_log, parse_log_report, LoadReport};
pub use crate::ui::FileDialogs;
pub use crate::view::{LegendPlacement, PlotModel, Session, ViewConfig};
