//! Threshold estimation module.
//!
//! Splits the samples of a signal into two classes with a one-dimensional
//! two-means (Lloyd) iteration. The larger-magnitude class center is then used
//! as the hysteresis margin for peak detection, which adapts the detector's
//! sensitivity to the amplitude distribution of the recording at hand.

use crate::error::{AnalysisError, Result};
use crate::util::RunningMean;
use log::{debug, trace};

/// Stop condition used when none is given.
pub const DEFAULT_TOLERANCE: f32 = 1e-5;

/// Iteration ceiling used when none is given.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

#[derive(Debug, Clone)]
pub struct ThresholdEstimationParameters {
    /// Both centers must move less than this between two iterations to stop.
    pub tolerance: f32,
    /// Give up with `ConvergenceFailure` after this many iterations.
    pub max_iterations: usize,
}

impl Default for ThresholdEstimationParameters {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// The two converged cluster centers.
///
/// The pair is unordered: which of the two classes ends up in `c1` depends on
/// the seed, so callers should only look at the values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdPair {
    pub c1: f32,
    pub c2: f32,
}

impl ThresholdPair {
    pub fn new(c1: f32, c2: f32) -> Self {
        Self { c1, c2 }
    }

    /// The hysteresis margin for peak detection, `max(|c1|, |c2|)`.
    pub fn peak_threshold(&self) -> f32 {
        self.c1.abs().max(self.c2.abs())
    }

    fn moved_less_than(&self, previous: &ThresholdPair, tolerance: f32) -> bool {
        (self.c1 - previous.c1).abs() < tolerance && (self.c2 - previous.c2).abs() < tolerance
    }
}

/// Outcome of a converged estimation run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdEstimate {
    pub thresholds: ThresholdPair,
    /// Number of assignment/update rounds until both centers settled.
    pub iterations: usize,
    /// Number of rounds in which at least one cluster ended up empty and its
    /// center was reset to 0.0.
    pub degenerate_iterations: usize,
}

/// Estimate the two class centers of `signal`, seeding them with the first two
/// samples.
///
/// Deterministic for a given input and parameter set, but sensitive to sample
/// order through the seed.
pub fn estimate_thresholds(
    signal: &[f32],
    params: &ThresholdEstimationParameters,
) -> Result<ThresholdEstimate> {
    if signal.len() < 2 {
        return Err(AnalysisError::InsufficientData { len: signal.len() });
    }
    estimate_thresholds_seeded(signal, ThresholdPair::new(signal[0], signal[1]), params)
}

/// Same as [`estimate_thresholds`], starting from caller-supplied centers.
///
/// Seeding with the result of a previous run converges in a single round.
pub fn estimate_thresholds_seeded(
    signal: &[f32],
    seed: ThresholdPair,
    params: &ThresholdEstimationParameters,
) -> Result<ThresholdEstimate> {
    if signal.len() < 2 {
        return Err(AnalysisError::InsufficientData { len: signal.len() });
    }
    if let Some((index, &value)) = signal.iter().enumerate().find(|(_, x)| !x.is_finite()) {
        return Err(AnalysisError::NonFiniteSample { index, value });
    }
    if !seed.c1.is_finite() || !seed.c2.is_finite() {
        return Err(AnalysisError::NonFiniteSeed {
            c1: seed.c1,
            c2: seed.c2,
        });
    }

    let mut centers = seed;
    let mut degenerate_iterations = 0;

    for iteration in 1..=params.max_iterations {
        let (near_c1, near_c2) = assign_samples(signal, &centers);

        if near_c1.count() == 0 || near_c2.count() == 0 {
            degenerate_iterations += 1;
            debug!(
                "iteration {iteration}: empty cluster ({} / {} samples), resetting its center to 0.0",
                near_c1.count(),
                near_c2.count()
            );
        }

        let next = ThresholdPair::new(
            near_c1.mean().unwrap_or(0.0),
            near_c2.mean().unwrap_or(0.0),
        );
        trace!("iteration {iteration}: c1={} c2={}", next.c1, next.c2);

        if next.moved_less_than(&centers, params.tolerance) {
            debug!(
                "two-means converged after {iteration} iterations: c1={} c2={}",
                next.c1, next.c2
            );
            return Ok(ThresholdEstimate {
                thresholds: next,
                iterations: iteration,
                degenerate_iterations,
            });
        }
        centers = next;
    }

    Err(AnalysisError::ConvergenceFailure {
        iterations: params.max_iterations,
        c1: centers.c1,
        c2: centers.c2,
    })
}

/// Nearest-center assignment in a single pass. Ties go to the second cluster.
fn assign_samples(signal: &[f32], centers: &ThresholdPair) -> (RunningMean, RunningMean) {
    signal.iter().fold(
        (RunningMean::default(), RunningMean::default()),
        |(mut near_c1, mut near_c2), &sample| {
            if (centers.c1 - sample).abs() < (centers.c2 - sample).abs() {
                near_c1.push(sample);
            } else {
                near_c2.push(sample);
            }
            (near_c1, near_c2)
        },
    )
}
