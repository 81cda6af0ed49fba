/// Sum and count of the samples pushed so far.
///
/// The sum is kept in `f64` so that long recordings do not lose precision
/// before the division.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunningMean {
    sum: f64,
    count: usize,
}

impl RunningMean {
    pub fn push(&mut self, x: f32) {
        self.sum += x as f64;
        self.count += 1;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// `None` when nothing has been pushed.
    pub fn mean(&self) -> Option<f32> {
        if self.count == 0 {
            None
        } else {
            Some((self.sum / self.count as f64) as f32)
        }
    }
}

/// Arithmetic mean of `samples`, `None` for an empty slice.
pub fn mean(samples: &[f32]) -> Option<f32> {
    samples
        .iter()
        .fold(RunningMean::default(), |mut acc, &x| {
            acc.push(x);
            acc
        })
        .mean()
}
