use anyhow::{Context, Result};
use can_log_viewer::{
    extract, ByteIndex, DisplayMode, FileDialogs, LegendPlacement, Log, LogFormat, Session,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let format = LogFormat::load_or_default()
        .context("Failed to load log format configuration")?;

    let Some(path) = FileDialogs::open_can_file() else {
        info!("No log file selected");
        return Ok(());
    };

    let mut session = Session::new(format);
    session
        .open(&path)
        .with_context(|| format!("Failed to load file: {}", path.display()))?;

    report(&session);
    Ok(())
}

/// Log what a renderer would draw for the current view
fn report(session: &Session) {
    let (Some(log), Some(plot)) = (session.log(), session.plot()) else {
        return;
    };

    if log.is_empty() {
        info!("Log contains no frames or markers");
        return;
    }

    for summary in log.selectable_ids() {
        info!("0x{:X} ({} msgs)", summary.id, summary.frame_count);
    }
    info!("Samples per byte: {}", byte_coverage(log).join(", "));

    info!("{} | x: {} | y: {}", plot.title, plot.x_label, plot.y_label);
    for series in &plot.series {
        let last = series.samples.last().map_or(0.0, |s| s.timestamp);
        info!(
            "  {}: {} samples up to t={:.3}",
            series.label,
            series.samples.len(),
            last
        );
    }
    for marker in &plot.markers {
        info!("  {} at t={:.3}", marker.label, marker.timestamp);
    }
    if plot.legend == LegendPlacement::Outside {
        info!("Legend placed outside the plot ({} series)", plot.series.len());
    }
}

/// How many samples each byte selector would plot across all IDs
fn byte_coverage(log: &Log) -> Vec<String> {
    ByteIndex::all()
        .map(|index| {
            let count: usize = log
                .selectable_ids()
                .iter()
                .map(|s| extract(log, s.id, DisplayMode::SingleByte(index)).len())
                .sum();
            format!("Byte {}: {}", index, count)
        })
        .collect()
}
