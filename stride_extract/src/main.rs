use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;
use stride_analysis::analysis_modules::{
    ThresholdEstimationParameters, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE,
};
use stride_analysis::{analyze, util::mean, AnalysisParameters};

mod input;
mod output;

use input::Channel;

#[derive(Parser)]
#[command(name = "stride_extract")]
#[command(about = "Locate gait-cycle peaks and troughs in an accelerometer recording", long_about = None)]
struct Cli {
    /// CSV input: a header row, then `t,x,y,z` records
    #[arg(default_value = "Acceleration_Walk_Dataset.csv")]
    input: PathBuf,

    /// CSV output for the peak and trough table
    #[arg(default_value = "acceleration_output.csv")]
    peaks_output: PathBuf,

    /// CSV output for the stride table
    #[arg(default_value = "acceleration_strides.csv")]
    strides_output: PathBuf,

    /// Stop condition of the threshold clustering
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f32,

    /// Give up on threshold clustering after this many iterations
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    /// Accelerometer axis to analyze
    #[arg(short, long, value_enum, default_value = "x")]
    channel: Channel,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    info!("reading from '{}'", cli.input.display());
    let recording = input::read_recording_file(&cli.input)?;
    let signal = recording.channel(cli.channel);
    if let Some(m) = mean(signal) {
        info!("{} samples, {:?} channel mean {m:.6}", recording.len(), cli.channel);
    }

    let params = AnalysisParameters {
        threshold_estimation: ThresholdEstimationParameters {
            tolerance: cli.tolerance,
            max_iterations: cli.max_iterations,
        },
    };
    let analysis = analyze(signal, &params)
        .with_context(|| format!("failed to analyze '{}'", cli.input.display()))?;

    let thresholds = analysis.estimate.thresholds;
    info!("thresholds: {} {}", thresholds.c1, thresholds.c2);
    info!("threshold selected: {}", analysis.peak_threshold);
    info!(
        "found {} peaks and {} troughs",
        analysis.extrema.peaks.len(),
        analysis.extrema.troughs.len()
    );

    info!("writing to '{}'", cli.peaks_output.display());
    output::write_extrema_file(
        &cli.peaks_output,
        &recording.timestamps,
        signal,
        &analysis.extrema,
    )?;

    info!("writing to '{}'", cli.strides_output.display());
    output::write_stride_file(
        &cli.strides_output,
        &recording.timestamps,
        signal,
        &analysis.stride_starts,
    )?;

    Ok(())
}
