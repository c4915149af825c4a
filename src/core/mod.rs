pub mod frame;
pub mod log;
pub mod marker;

pub use frame::{Frame, MAX_DATA_LEN};
pub use log::{IdSummary, Log};
pub use marker::Marker;
