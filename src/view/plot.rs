use serde::Serialize;

use super::ViewConfig;
use crate::core::Log;
use crate::decode::{extract, DisplayMode, Sample};

/// Above this many series the legend no longer fits inside the plot area
pub const MAX_INLINE_LEGEND_ENTRIES: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LegendPlacement {
    /// Best spot inside the axes
    Inside,
    /// To the right of the axes
    Outside,
}

/// One plotted line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub id: u32,
    pub label: String,
    pub samples: Vec<Sample>,
}

/// A vertical line marking an action event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerLine {
    pub timestamp: f64,
    pub label: String,
}

/// Everything a renderer needs to draw one view of a log
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotModel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
    pub markers: Vec<MarkerLine>,
    pub legend: LegendPlacement,
}

impl PlotModel {
    pub fn build(log: &Log, view: &ViewConfig) -> Self {
        let series: Vec<Series> = log
            .selectable_ids()
            .iter()
            .filter(|summary| view.is_selected(summary.id))
            .filter_map(|summary| {
                let samples = extract(log, summary.id, view.mode);
                if samples.is_empty() {
                    return None;
                }
                Some(Series {
                    id: summary.id,
                    label: series_label(summary.id, view.mode),
                    samples,
                })
            })
            .collect();

        let markers = if view.show_markers {
            log.markers()
                .iter()
                .map(|m| MarkerLine {
                    timestamp: m.timestamp,
                    label: m.to_string(),
                })
                .collect()
        } else {
            Vec::new()
        };

        let legend = if series.len() > MAX_INLINE_LEGEND_ENTRIES {
            LegendPlacement::Outside
        } else {
            LegendPlacement::Inside
        };

        let (title, y_label) = match view.mode {
            DisplayMode::SingleByte(index) => (
                format!("CAN Bus Data - Byte {}", index),
                format!("Byte {} Value", index),
            ),
            DisplayMode::Combined => (
                "CAN Bus Data - Combined Bytes".to_string(),
                "Combined Value".to_string(),
            ),
        };

        Self {
            title,
            x_label: "Time (ms)".to_string(),
            y_label,
            series,
            markers,
            legend,
        }
    }
}

fn series_label(id: u32, mode: DisplayMode) -> String {
    match mode {
        DisplayMode::SingleByte(_) => format!("0x{:X}", id),
        DisplayMode::Combined => format!("ID:0x{:X}", id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Frame, Marker};
    use crate::decode::ByteIndex;

    fn log() -> Log {
        Log::new(
            vec![
                Frame::new(0.0, 0x201, "01 02"),
                Frame::new(0.5, 0x100, "FF"),
                Frame::new(1.0, 0x201, "03 04"),
            ],
            vec![Marker::new(0.25, 7)],
        )
    }

    #[test]
    fn test_single_byte_plot() {
        let log = log();
        let plot = PlotModel::build(&log, &ViewConfig::for_log(&log));

        assert_eq!(plot.title, "CAN Bus Data - Byte 0");
        assert_eq!(plot.x_label, "Time (ms)");
        assert_eq!(plot.y_label, "Byte 0 Value");
        let labels: Vec<&str> = plot.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["0x100", "0x201"]);
        assert_eq!(plot.markers.len(), 1);
        assert_eq!(plot.markers[0].timestamp, 0.25);
        assert_eq!(plot.markers[0].label, "Action 7");
        assert_eq!(plot.legend, LegendPlacement::Inside);
    }

    #[test]
    fn test_ids_without_samples_are_omitted() {
        let log = log();
        let index = ByteIndex::new(1).unwrap();
        let view = ViewConfig::for_log(&log).with_mode(DisplayMode::SingleByte(index));
        let plot = PlotModel::build(&log, &view);

        assert_eq!(plot.series.len(), 1);
        assert_eq!(plot.series[0].id, 0x201);
        assert_eq!(plot.y_label, "Byte 1 Value");
    }

    #[test]
    fn test_combined_plot_hides_markers() {
        let log = log();
        let view = ViewConfig::for_log(&log)
            .toggle(0x100)
            .with_mode(DisplayMode::Combined)
            .with_markers(false);
        let plot = PlotModel::build(&log, &view);

        assert_eq!(plot.title, "CAN Bus Data - Combined Bytes");
        assert_eq!(plot.y_label, "Combined Value");
        assert_eq!(plot.series.len(), 1);
        assert_eq!(plot.series[0].label, "ID:0x201");
        assert_eq!(
            plot.series[0].samples.iter().map(|s| s.value).collect::<Vec<_>>(),
            vec![0x0102, 0x0304]
        );
        assert!(plot.markers.is_empty());
    }

    #[test]
    fn test_unknown_selected_id_is_ignored() {
        let log = log();
        let view = ViewConfig::default().toggle(0x7FF);
        assert!(PlotModel::build(&log, &view).series.is_empty());
    }

    #[test]
    fn test_legend_moves_outside_for_many_series() {
        let frames = (0..16).map(|id| Frame::new(id as f64, id, "00")).collect();
        let log = Log::new(frames, vec![]);
        let plot = PlotModel::build(&log, &ViewConfig::for_log(&log));
        assert_eq!(plot.legend, LegendPlacement::Outside);

        let view = ViewConfig::for_log(&log).toggle(0);
        assert_eq!(PlotModel::build(&log, &view).legend, LegendPlacement::Inside);
    }
}
