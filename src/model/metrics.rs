//! Held-out regression metrics

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

/// Scores on the test split
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub r2: f64,
    pub mae: f64,
    pub rmse: f64,
    pub n_samples: usize,
}

impl Metrics {
    /// Compare predictions to targets; `None` when there is nothing to score
    pub fn compute(predicted: ArrayView1<'_, f64>, actual: ArrayView1<'_, f64>) -> Option<Self> {
        if predicted.is_empty() || predicted.len() != actual.len() {
            return None;
        }

        let n = actual.len() as f64;
        let mean = actual.mean()?;

        let residuals = &predicted - &actual;
        let abs_err = residuals.mapv(f64::abs).sum();
        let ss_res = residuals.mapv(|r| r * r).sum();
        let ss_tot = actual.mapv(|a| (a - mean) * (a - mean)).sum();

        let r2 = if ss_tot > 0.0 {
            1.0 - ss_res / ss_tot
        } else if ss_res == 0.0 {
            1.0
        } else {
            0.0
        };

        Some(Self {
            r2,
            mae: abs_err / n,
            rmse: (ss_res / n).sqrt(),
            n_samples: actual.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1};

    #[test]
    fn test_perfect_fit() {
        let y = array![1.0, 2.0, 3.0];
        let m = Metrics::compute(y.view(), y.view()).unwrap();
        assert_eq!(m.r2, 1.0);
        assert_eq!(m.mae, 0.0);
        assert_eq!(m.rmse, 0.0);
    }

    #[test]
    fn test_mean_predictor_scores_zero() {
        let m = Metrics::compute(array![2.0, 2.0, 2.0].view(), array![1.0, 2.0, 3.0].view()).unwrap();
        assert!(m.r2.abs() < 1e-12);
        assert!((m.mae - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_target() {
        let m = Metrics::compute(array![5.0, 6.0].view(), array![5.0, 5.0].view()).unwrap();
        assert_eq!(m.r2, 0.0);
        assert_eq!(m.n_samples, 2);
    }

    #[test]
    fn test_empty_or_mismatched() {
        let empty = Array1::<f64>::zeros(0);
        assert!(Metrics::compute(empty.view(), empty.view()).is_none());
        assert!(Metrics::compute(array![1.0].view(), array![1.0, 2.0].view()).is_none());
    }
}
