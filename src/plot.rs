use std::path::{Path, PathBuf};
use std::str::FromStr;

use plotters::prelude::*;

use crate::error::{BenchError, Result};
use crate::record::read_measurements;

const PLOT_SIZE: (u32, u32) = (960, 720);
const TITLE: &str = "smb:// performance";

/// One `path=label` argument: a measurement file and its legend entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotInput {
    pub path: PathBuf,
    pub label: String,
}

impl FromStr for PlotInput {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self> {
        let (path, label) = s
            .split_once('=')
            .ok_or_else(|| BenchError::InvalidPlotInput(s.to_string()))?;
        if path.is_empty() || label.is_empty() {
            return Err(BenchError::InvalidPlotInput(s.to_string()));
        }
        Ok(PlotInput {
            path: PathBuf::from(path),
            label: label.to_string(),
        })
    }
}

fn draw_err<E: std::error::Error>(e: E) -> BenchError {
    BenchError::Plot(e.to_string())
}

/// Renders all inputs as marker series on shared log2-log2 axes and writes
/// `<labels joined with '.'>.png` into `out_dir`. Returns the image path.
pub fn plot_files(inputs: &[PlotInput], out_dir: &Path) -> Result<PathBuf> {
    // Chunk sizes are recorded in bytes; the axis is KiB.
    let mut series: Vec<(&str, Vec<(f64, f64)>)> = Vec::with_capacity(inputs.len());
    for input in inputs {
        let points = read_measurements(&input.path)?
            .into_iter()
            .map(|m| (m.chunk_size as f64 / 1024.0, m.kbps))
            .collect();
        series.push((input.label.as_str(), points));
    }

    let mut x_range = (f64::INFINITY, f64::NEG_INFINITY);
    let mut y_range = (f64::INFINITY, f64::NEG_INFINITY);
    for (_, points) in &series {
        for &(x, y) in points {
            x_range = (x_range.0.min(x), x_range.1.max(x));
            y_range = (y_range.0.min(y), y_range.1.max(y));
        }
    }
    if x_range.0 > x_range.1 {
        return Err(BenchError::Plot("no data points to plot".to_string()));
    }

    let labels: Vec<&str> = inputs.iter().map(|i| i.label.as_str()).collect();
    let out_path = out_dir.join(format!("{}.png", labels.join(".")));

    // Scoped so the backend flushes before the path is handed back.
    {
        let root = BitMapBackend::new(&out_path, PLOT_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(TITLE, ("sans-serif", 24))
            .margin(10)
            .set_label_area_size(LabelAreaPosition::Left, 60)
            .set_label_area_size(LabelAreaPosition::Bottom, 44)
            .build_cartesian_2d(
                (x_range.0 / 2.0..x_range.1 * 2.0).log_scale().base(2.0),
                (y_range.0 / 2.0..y_range.1 * 2.0).log_scale().base(2.0),
            )
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_desc("read_chunk (KiB)")
            .y_desc("throughput (KiB/s)")
            .draw()
            .map_err(draw_err)?;

        for (idx, (label, points)) in series.iter().enumerate() {
            let color = Palette99::pick(idx);
            chart
                .draw_series(
                    points
                        .iter()
                        .map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
                )
                .map_err(draw_err)?
                .label(*label)
                .legend(move |(x, y)| Circle::new((x, y), 3, color.filled()));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .draw()
            .map_err(draw_err)?;
        root.present().map_err(draw_err)?;
    }
    Ok(out_path)
}
