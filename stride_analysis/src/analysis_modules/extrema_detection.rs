//! Extrema detection module.
//!
//! A single left-to-right hysteresis scan over the signal. A running high is
//! only committed as a peak once the signal has fallen at least `epsilon` below
//! it, and a running low only becomes a trough once the signal has risen
//! `epsilon` above it, so jitter smaller than `epsilon` never produces extrema.

use itertools::Itertools;
use log::{trace, warn};

/// Direction the scan has committed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    /// No excursion of at least `epsilon` seen yet.
    Neutral,
    /// Tracking a peak candidate.
    Rising,
    /// Tracking a trough candidate.
    Falling,
}

/// Indices of the running extremum candidates.
#[derive(Debug, Clone, Copy)]
struct Candidates {
    /// Highest sample since the last committed trough.
    high: usize,
    /// Lowest sample since the last committed peak.
    low: usize,
}

/// Peak and trough sample indices, each strictly increasing.
///
/// Peaks and troughs alternate in time. Their counts differ by at most one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtremaResult {
    pub peaks: Vec<usize>,
    pub troughs: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extremum {
    Peak(usize),
    Trough(usize),
}

impl Extremum {
    pub fn index(&self) -> usize {
        match self {
            Extremum::Peak(i) | Extremum::Trough(i) => *i,
        }
    }
}

impl ExtremaResult {
    /// Peaks and troughs merged into a single time-ordered sequence.
    pub fn extrema(&self) -> Vec<Extremum> {
        self.peaks
            .iter()
            .map(|&i| Extremum::Peak(i))
            .merge_by(self.troughs.iter().map(|&i| Extremum::Trough(i)), |a, b| {
                a.index() < b.index()
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty() && self.troughs.is_empty()
    }
}

/// Locate peaks and troughs in `signal` with hysteresis margin `epsilon`.
///
/// The scan visits every index in `0..signal.len()` exactly once, starting
/// with index 0 even though both candidates are seeded there.
pub fn detect_extrema(signal: &[f32], epsilon: f32) -> ExtremaResult {
    let mut result = ExtremaResult::default();
    if signal.is_empty() {
        return result;
    }
    if epsilon.is_nan() || epsilon <= 0.0 {
        warn!("hysteresis margin {epsilon} is not positive, every wiggle will count as an extremum");
    }

    let mut direction = Direction::Neutral;
    let mut candidates = Candidates { high: 0, low: 0 };

    for (i, &sample) in signal.iter().enumerate() {
        let high = signal[candidates.high];
        let low = signal[candidates.low];

        direction = match direction {
            Direction::Neutral => {
                // direction check and candidate update both use the values
                // from before this step
                let next = if high >= sample + epsilon {
                    Direction::Falling
                } else if sample >= low + epsilon {
                    Direction::Rising
                } else {
                    Direction::Neutral
                };
                if high <= sample {
                    candidates.high = i;
                } else if sample <= low {
                    candidates.low = i;
                }
                next
            }
            Direction::Rising => {
                if high <= sample {
                    candidates.high = i;
                    Direction::Rising
                } else if high >= sample + epsilon {
                    trace!("peak at {} ({high})", candidates.high);
                    result.peaks.push(candidates.high);
                    candidates.low = i;
                    Direction::Falling
                } else {
                    Direction::Rising
                }
            }
            Direction::Falling => {
                if sample <= low {
                    candidates.low = i;
                    Direction::Falling
                } else if sample >= low + epsilon {
                    trace!("trough at {} ({low})", candidates.low);
                    result.troughs.push(candidates.low);
                    candidates.high = i;
                    Direction::Rising
                } else {
                    Direction::Falling
                }
            }
        };
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(n: usize, period: f32) -> Vec<f32> {
        (0..n)
            .map(|i| (2.0 * std::f32::consts::PI * i as f32 / period).sin())
            .collect()
    }

    fn is_strictly_increasing(x: &[usize]) -> bool {
        x.windows(2).all(|w| w[0] < w[1])
    }

    #[test]
    fn test_single_oscillation_then_rise() {
        let signal = [
            0.0, 1.0, 2.0, 3.0, 2.0, 1.0, 0.0, 1.0, 2.0, 3.0, 4.0, 3.0, 2.0, 1.0, 0.0,
        ];
        let result = detect_extrema(&signal, 1.5);
        assert_eq!(result.peaks, vec![3, 10]);
        assert_eq!(result.troughs, vec![6]);
    }

    #[test]
    fn test_single_oscillation_falling_first() {
        let signal = [0.0, -1.0, -2.0, -3.0, -2.0, -1.0, 0.0, -1.0, -2.0];
        let result = detect_extrema(&signal, 1.5);
        assert_eq!(result.troughs, vec![3]);
        assert_eq!(result.peaks, vec![6]);
        assert_eq!(
            result.extrema(),
            vec![Extremum::Trough(3), Extremum::Peak(6)]
        );
    }

    #[test]
    fn test_decreasing_signal_never_completes_a_peak() {
        let signal: Vec<f32> = (0..10).map(|i| -(i as f32)).collect();
        assert!(detect_extrema(&signal, 2.0).is_empty());
    }

    #[test]
    fn test_low_seen_before_direction_counts_for_rise() {
        // the dip at index 1 is what lets index 3 commit the rise
        let signal = [0.0, -1.0, 0.2, 1.0, -1.0];
        let result = detect_extrema(&signal, 1.5);
        assert_eq!(result.peaks, vec![3]);
        assert!(result.troughs.is_empty());
    }

    #[test]
    fn test_monotonic_signal_never_completes_a_trough() {
        let signal: Vec<f32> = (0..10).map(|i| i as f32).collect();
        for epsilon in [0.5, 2.0, 8.9] {
            let result = detect_extrema(&signal, epsilon);
            assert!(result.troughs.is_empty());
            assert!(result.peaks.len() <= 1);
        }
    }

    #[test]
    fn test_jitter_below_margin_is_ignored() {
        let signal: Vec<f32> = (0..40).map(|i| if i % 2 == 0 { 0.0 } else { 0.4 }).collect();
        assert!(detect_extrema(&signal, 0.5).is_empty());
        assert!(!detect_extrema(&signal, 0.3).is_empty());
    }

    #[test]
    fn test_non_positive_margin() {
        let result = detect_extrema(&[0.0, 1.0, 0.0], 0.0);
        assert_eq!(result.troughs, vec![0]);
        assert_eq!(result.peaks, vec![1]);

        // every comparison against a NaN margin is false
        assert!(detect_extrema(&[0.0, 5.0, -5.0, 5.0], f32::NAN).is_empty());
    }

    #[test]
    fn test_empty_and_single_sample() {
        assert!(detect_extrema(&[], 1.0).is_empty());
        assert!(detect_extrema(&[42.0], 1.0).is_empty());
    }

    #[test]
    fn test_indices_valid_and_ordered() {
        let signal = sine(200, 50.0);
        let result = detect_extrema(&signal, 0.5);

        assert_eq!(result.peaks.len(), 4);
        assert_eq!(result.troughs.len(), 4);
        assert!(is_strictly_increasing(&result.peaks));
        assert!(is_strictly_increasing(&result.troughs));
        assert!(result
            .peaks
            .iter()
            .chain(result.troughs.iter())
            .all(|&i| i < signal.len()));
    }

    #[test]
    fn test_peaks_and_troughs_alternate() {
        let signal = sine(333, 37.0);
        let extrema = detect_extrema(&signal, 0.8).extrema();

        assert!(!extrema.is_empty());
        assert!(extrema.windows(2).all(|w| matches!(
            (w[0], w[1]),
            (Extremum::Peak(_), Extremum::Trough(_)) | (Extremum::Trough(_), Extremum::Peak(_))
        )));
        assert!(extrema.windows(2).all(|w| w[0].index() < w[1].index()));
    }

    #[test]
    fn test_committed_extrema_are_segment_extremes() {
        let signal: Vec<f32> = (0..400)
            .map(|i| (i as f32 * 0.13).sin() + 0.2 * (i as f32 * 0.71).sin())
            .collect();
        let result = detect_extrema(&signal, 0.5);

        // every peak is the maximum between its neighbouring troughs
        for w in result.troughs.windows(2) {
            let segment = &signal[w[0]..=w[1]];
            let peak = result
                .peaks
                .iter()
                .find(|&&p| p > w[0] && p < w[1])
                .expect("a peak between two troughs");
            assert_eq!(signal[*peak], segment.iter().copied().fold(f32::MIN, f32::max));
        }
        // and every trough the minimum between its neighbouring peaks
        for w in result.peaks.windows(2) {
            let segment = &signal[w[0]..=w[1]];
            let trough = result
                .troughs
                .iter()
                .find(|&&t| t > w[0] && t < w[1])
                .expect("a trough between two peaks");
            assert_eq!(signal[*trough], segment.iter().copied().fold(f32::MAX, f32::min));
        }
    }

    #[test]
    fn test_repeated_detection_is_identical() {
        let signal = sine(500, 23.0);
        assert_eq!(detect_extrema(&signal, 0.7), detect_extrema(&signal, 0.7));
    }

    #[test]
    fn test_larger_margin_never_adds_peaks() {
        let signal = sine(200, 50.0);
        let counts: Vec<usize> = [0.1, 0.5, 1.0, 1.5, 1.9, 2.5]
            .iter()
            .map(|&epsilon| detect_extrema(&signal, epsilon).peaks.len())
            .collect();

        assert_eq!(counts[0], 4);
        assert_eq!(*counts.last().unwrap(), 0);
        assert!(counts.windows(2).all(|w| w[0] >= w[1]), "{counts:?}");
    }
}
