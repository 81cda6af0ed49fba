use anyhow::{Context, Result};
use itertools::{EitherOrBoth, Itertools};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use stride_analysis::analysis_modules::ExtremaResult;

const EXTREMA_HEADER: [&str; 6] = ["P_i", "P_t", "P_x", "T_i", "T_t", "T_p"];
const STRIDE_HEADER: [&str; 3] = ["S_i", "S_t", "S_x"];

/// Index, timestamp and channel value of one sample, or three blank cells.
fn sample_cells(index: Option<usize>, timestamps: &[f64], values: &[f32]) -> [String; 3] {
    match index {
        Some(i) => [
            i.to_string(),
            format!("{:20.10}", timestamps[i]),
            format!("{:.6}", values[i]),
        ],
        None => Default::default(),
    }
}

/// Peaks and troughs side by side, one pair per row.
pub fn write_extrema_table<W: Write>(
    writer: W,
    timestamps: &[f64],
    values: &[f32],
    extrema: &ExtremaResult,
) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(EXTREMA_HEADER)?;

    for pair in extrema.peaks.iter().zip_longest(extrema.troughs.iter()) {
        let (peak, trough) = match pair {
            EitherOrBoth::Both(p, t) => (Some(*p), Some(*t)),
            EitherOrBoth::Left(p) => (Some(*p), None),
            EitherOrBoth::Right(t) => (None, Some(*t)),
        };
        let [p_i, p_t, p_x] = sample_cells(peak, timestamps, values);
        let [t_i, t_t, t_x] = sample_cells(trough, timestamps, values);
        wtr.write_record([p_i, p_t, p_x, t_i, t_t, t_x])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_stride_table<W: Write>(
    writer: W,
    timestamps: &[f64],
    values: &[f32],
    stride_starts: &[usize],
) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(STRIDE_HEADER)?;

    for &start in stride_starts {
        wtr.write_record(sample_cells(Some(start), timestamps, values))?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_extrema_file(
    path: &Path,
    timestamps: &[f64],
    values: &[f32],
    extrema: &ExtremaResult,
) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create '{}'", path.display()))?;
    write_extrema_table(file, timestamps, values, extrema)
        .with_context(|| format!("failed to write '{}'", path.display()))
}

pub fn write_stride_file(
    path: &Path,
    timestamps: &[f64],
    values: &[f32],
    stride_starts: &[usize],
) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create '{}'", path.display()))?;
    write_stride_table(file, timestamps, values, stride_starts)
        .with_context(|| format!("failed to write '{}'", path.display()))
}
