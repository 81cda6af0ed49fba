//! Gait analysis of a single accelerometer channel.
//!
//! Runs the stages in `analysis_modules` in order: the two-means threshold
//! estimation picks the hysteresis margin, the extrema detection locates peaks
//! and troughs with it, and a stride segmenter turns those into stride starts.
//! Nothing is kept between calls.

use crate::analysis_modules::{
    detect_extrema, estimate_thresholds, ExtremaResult, NoStrideSegmentation, StrideSegmenter,
    ThresholdEstimate, ThresholdEstimationParameters,
};
use crate::error::Result;
use log::{debug, warn};

#[derive(Debug, Clone, Default)]
pub struct AnalysisParameters {
    /// Stop condition and iteration ceiling of the two-means clustering.
    pub threshold_estimation: ThresholdEstimationParameters,
}

#[derive(Debug, Clone)]
pub struct StrideAnalysis {
    pub estimate: ThresholdEstimate,
    /// Hysteresis margin handed to the extrema detection.
    pub peak_threshold: f32,
    pub extrema: ExtremaResult,
    /// Stride start indices reported by the segmenter.
    pub stride_starts: Vec<usize>,
}

/// Analyze `signal` without stride segmentation.
pub fn analyze(signal: &[f32], params: &AnalysisParameters) -> Result<StrideAnalysis> {
    analyze_with(signal, params, &NoStrideSegmentation)
}

/// Analyze `signal`, grouping the extrema into strides with `segmenter`.
pub fn analyze_with<S: StrideSegmenter + ?Sized>(
    signal: &[f32],
    params: &AnalysisParameters,
    segmenter: &S,
) -> Result<StrideAnalysis> {
    let estimate = estimate_thresholds(signal, &params.threshold_estimation)?;
    if estimate.degenerate_iterations > 0 {
        warn!(
            "threshold estimation hit an empty cluster in {} of {} iterations",
            estimate.degenerate_iterations, estimate.iterations
        );
    }

    let peak_threshold = estimate.thresholds.peak_threshold();
    debug!(
        "thresholds {} {}, selected {peak_threshold}",
        estimate.thresholds.c1, estimate.thresholds.c2
    );

    let extrema = detect_extrema(signal, peak_threshold);
    let stride_starts = segmenter.segment(signal, &extrema);
    debug!(
        "{} peaks, {} troughs, {} strides",
        extrema.peaks.len(),
        extrema.troughs.len(),
        stride_starts.len()
    );

    Ok(StrideAnalysis {
        estimate,
        peak_threshold,
        extrema,
        stride_starts,
    })
}
