//! Analysis modules - the independent stages of the gait analysis.
//!
//! Threshold estimation runs first and derives the hysteresis margin from the
//! signal itself, extrema detection turns the signal and that margin into peak
//! and trough indices, and stride segmentation groups those into strides.

pub mod extrema_detection;
pub mod stride_segmentation;
pub mod threshold_estimation;

// Re-export commonly used types
pub use extrema_detection::{detect_extrema, ExtremaResult, Extremum};
pub use stride_segmentation::{NoStrideSegmentation, StrideSegmenter};
pub use threshold_estimation::{
    estimate_thresholds, estimate_thresholds_seeded, ThresholdEstimate,
    ThresholdEstimationParameters, ThresholdPair, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE,
};
