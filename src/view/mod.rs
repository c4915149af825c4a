pub mod config;
pub mod plot;
pub mod session;

pub use config::ViewConfig;
pub use plot::{LegendPlacement, MarkerLine, PlotModel, Series, MAX_INLINE_LEGEND_ENTRIES};
pub use session::Session;
