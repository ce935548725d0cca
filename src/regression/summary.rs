use serde::Serialize;
use statrs::statistics::Statistics;

use crate::regression::Coefficients;

/// Goodness of fit on the training data.
#[derive(Debug, Copy, Clone, Serialize)]
pub struct FitSummary {
    pub n_observations: usize,

    /// Root-mean-square residual, in the target units.
    pub rmse: f64,

    /// Coefficient of determination, `None` for a constant target.
    pub r_squared: Option<f64>,
}

impl FitSummary {
    pub fn new<R: AsRef<[f64]>>(coefficients: &Coefficients, x: &[R], y: &[f64]) -> Self {
        let mut residual_error = SquaredError::default();
        for (row, target) in x.iter().zip(y) {
            residual_error.push(target - coefficients.predict_row(row.as_ref()));
        }

        let mean = y.iter().mean();
        let mut total_error = SquaredError::default();
        for target in y.iter() {
            total_error.push(target - mean);
        }

        Self {
            n_observations: y.len(),
            rmse: residual_error.root_mean(),
            r_squared: (total_error.sum > 0.0).then(|| 1.0 - residual_error.sum / total_error.sum),
        }
    }
}

#[derive(Default)]
struct SquaredError {
    sum: f64,
    count: usize,
}

impl SquaredError {
    fn push(&mut self, residual: f64) {
        self.sum += residual * residual;
        self.count += 1;
    }

    #[must_use]
    fn root_mean(&self) -> f64 {
        (self.sum / self.count.max(1) as f64).sqrt()
    }
}
