//! Stride segmentation.
//!
//! Groups committed peaks and troughs into gait cycles. No segmentation policy
//! ships yet; [`NoStrideSegmentation`] keeps the rest of the pipeline and the
//! stride table output working until one does.

use super::extrema_detection::ExtremaResult;

pub trait StrideSegmenter {
    /// Sample indices at which a stride starts, strictly increasing.
    fn segment(&self, signal: &[f32], extrema: &ExtremaResult) -> Vec<usize>;
}

/// Reports no strides.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStrideSegmentation;

impl StrideSegmenter for NoStrideSegmentation {
    fn segment(&self, _signal: &[f32], _extrema: &ExtremaResult) -> Vec<usize> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_segmentation_reports_nothing() {
        let extrema = ExtremaResult {
            peaks: vec![3, 10],
            troughs: vec![6],
        };
        assert!(NoStrideSegmentation
            .segment(&[0.0; 16], &extrema)
            .is_empty());
    }
}
