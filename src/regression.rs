//! Ordinary least squares via the normal equation: `θ = (XᵀX)⁻¹Xᵀy`.

use nalgebra::{DMatrix, DVector};

pub use self::error::FitError;
pub use self::summary::FitSummary;
use crate::dataset::Features;

mod error;
mod summary;

/// `XᵀX` with a smaller ratio of the extreme singular values is treated as singular.
///
/// The ratio is taken after scaling every column of `X` to unit norm, so that it does not depend
/// on the feature units.
pub const MIN_RECIPROCAL_CONDITION: f64 = 1e-12;

/// Fitted weights: the intercept followed by one weight per feature column.
#[derive(Debug, Clone, PartialEq)]
pub struct Coefficients(DVector<f64>);

impl Coefficients {
    #[must_use]
    pub fn intercept(&self) -> f64 {
        self.0[0]
    }

    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.0.as_slice()[1..]
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        self.0.as_slice()
    }

    /// Dot product with a design matrix row, the intercept term included.
    #[must_use]
    pub fn predict_row(&self, row: &[f64]) -> f64 {
        debug_assert_eq!(row.len(), self.0.len());
        self.0.iter().zip(row).map(|(theta, x)| theta * x).sum()
    }

    #[must_use]
    pub fn predict(&self, features: &Features) -> f64 {
        self.predict_row(&features.row())
    }
}

/// Solves the normal equation.
///
/// Fails on an empty or misaligned input, and when `XᵀX` cannot be reliably inverted.
pub fn fit(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<Coefficients, FitError> {
    if x.is_empty() {
        return Err(FitError::Empty);
    }
    if x.nrows() != y.len() {
        return Err(FitError::LengthMismatch {
            rows: x.nrows(),
            targets: y.len(),
        });
    }

    let x_t = x.transpose();
    let xtx = &x_t * x;

    let reciprocal_condition = reciprocal_condition(x);
    // Negated comparison so that NaN is rejected too.
    if !(reciprocal_condition >= MIN_RECIPROCAL_CONDITION) {
        return Err(FitError::Singular {
            reciprocal_condition,
        });
    }
    let xtx_inv = xtx
        .try_inverse()
        .ok_or(FitError::Singular { reciprocal_condition })?;

    let theta = xtx_inv * (x_t * y);
    if theta.iter().all(|theta| theta.is_finite()) {
        Ok(Coefficients(theta))
    } else {
        Err(FitError::Singular {
            reciprocal_condition,
        })
    }
}

/// Same as [`fit`] but takes plain rows and checks that they form a rectangle.
pub fn fit_rows<R: AsRef<[f64]>>(rows: &[R], y: &[f64]) -> Result<Coefficients, FitError> {
    let n_columns = rows.first().map(|row| row.as_ref().len()).ok_or(FitError::Empty)?;
    if let Some((row, actual)) = rows
        .iter()
        .map(|row| row.as_ref().len())
        .enumerate()
        .find(|(_, length)| *length != n_columns)
    {
        return Err(FitError::Ragged {
            row,
            expected: n_columns,
            actual,
        });
    }
    let x = DMatrix::from_row_iterator(
        rows.len(),
        n_columns,
        rows.iter().flat_map(|row| row.as_ref().iter().copied()),
    );
    fit(&x, &DVector::from_column_slice(y))
}

/// Reciprocal condition number of `XᵀX` with the columns of `X` equilibrated.
fn reciprocal_condition(x: &DMatrix<f64>) -> f64 {
    let mut equilibrated = x.clone();
    for mut column in equilibrated.column_iter_mut() {
        let norm = column.norm();
        if norm == 0.0 {
            return 0.0;
        }
        column /= norm;
    }
    let singular_values = equilibrated.tr_mul(&equilibrated).singular_values();
    let max = singular_values.max();
    if max > 0.0 {
        singular_values.min() / max
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{design_matrix, target_vector, HOUSES, N_COLUMNS};

    fn fit_houses() -> Coefficients {
        fit_rows(&design_matrix(&HOUSES), &target_vector(&HOUSES)).unwrap()
    }

    #[test]
    fn fit_houses_ok() {
        let coefficients = fit_houses();
        let expected = [2_363_636.363_636, 454.545_454, 2_795_454.545_454, 3_613_636.363_636];
        assert_eq!(coefficients.as_slice().len(), expected.len());
        for (actual, expected) in coefficients.as_slice().iter().zip(expected) {
            assert!((actual - expected).abs() / expected < 1e-6, "{actual} vs {expected}");
        }
    }

    #[test]
    fn weights_are_non_negative_ok() {
        let coefficients = fit_houses();
        assert!(coefficients.weights().iter().all(|&weight| weight >= 0.0));
    }

    #[test]
    fn predict_training_points_ok() {
        let coefficients = fit_houses();
        for house in &HOUSES {
            let residual = coefficients.predict(&house.features()) - house.price;
            assert!(residual.abs() < 0.05 * house.price, "{house:?}: {residual}");
        }
    }

    #[test]
    fn predict_exact_training_point_ok() {
        let price = fit_houses().predict(&Features {
            size: 1000.0,
            bedrooms: 3,
            bathrooms: 2,
        });
        assert!((price - 18_000_000.0).abs() < 0.05 * 18_000_000.0, "{price}");
        assert!((price - 18_431_818.18).abs() < 10.0, "{price}");
    }

    #[test]
    fn fit_is_deterministic_ok() {
        assert_eq!(fit_houses(), fit_houses());
    }

    #[test]
    fn fit_rows_matches_fit_ok() {
        let x = DMatrix::from_row_iterator(
            HOUSES.len(),
            N_COLUMNS,
            HOUSES.iter().flat_map(|house| house.features().row()),
        );
        let y = DVector::from_iterator(HOUSES.len(), HOUSES.iter().map(|house| house.price));
        assert_eq!(fit(&x, &y).unwrap(), fit_houses());
    }

    #[test]
    fn rescaled_size_is_not_singular_ok() {
        let expected = fit_houses();
        for scale in [1e-3, 10.0, 144.0, 929.0] {
            let rows: Vec<_> = HOUSES
                .iter()
                .map(|house| {
                    let [intercept, size, bedrooms, bathrooms] = house.features().row();
                    [intercept, size * scale, bedrooms, bathrooms]
                })
                .collect();
            let coefficients = fit_rows(&rows, &target_vector(&HOUSES))
                .unwrap_or_else(|error| panic!("scale {scale}: {error:?}"));
            let size_weight = coefficients.weights()[0] * scale;
            let expected_weight = expected.weights()[0];
            assert!(
                (size_weight - expected_weight).abs() / expected_weight < 1e-4,
                "scale {scale}: {size_weight} vs {expected_weight}",
            );
            let intercept_error = (coefficients.intercept() - expected.intercept()).abs();
            assert!(intercept_error / expected.intercept() < 1e-4, "scale {scale}");
        }
    }

    #[test]
    fn collinear_columns_are_singular_ok() {
        // The bathroom column duplicates the bedroom one.
        let rows: Vec<_> = HOUSES
            .iter()
            .map(|house| [1.0, house.size, f64::from(house.bedrooms), f64::from(house.bedrooms)])
            .collect();
        let prices: Vec<_> = HOUSES.iter().map(|house| house.price).collect();
        assert!(matches!(fit_rows(&rows, &prices), Err(FitError::Singular { .. })));
    }

    #[test]
    fn too_few_rows_are_singular_ok() {
        let rows: Vec<_> = HOUSES[..3].iter().map(|house| house.features().row()).collect();
        let prices: Vec<_> = HOUSES[..3].iter().map(|house| house.price).collect();
        assert!(matches!(fit_rows(&rows, &prices), Err(FitError::Singular { .. })));
    }

    #[test]
    fn ragged_rows_error_ok() {
        let rows = vec![vec![1.0, 2.0], vec![1.0, 3.0], vec![1.0]];
        assert_eq!(
            fit_rows(&rows, &[1.0, 2.0, 3.0]),
            Err(FitError::Ragged {
                row: 2,
                expected: 2,
                actual: 1
            }),
        );
    }

    #[test]
    fn empty_error_ok() {
        let rows: [[f64; 2]; 0] = [];
        assert_eq!(fit_rows(&rows, &[]), Err(FitError::Empty));
    }

    #[test]
    fn length_mismatch_error_ok() {
        assert_eq!(
            fit_rows(&design_matrix(&HOUSES), &target_vector(&HOUSES[..6])),
            Err(FitError::LengthMismatch {
                rows: 7,
                targets: 6
            }),
        );
    }

    #[test]
    fn simple_line_ok() {
        // y = 2 + 3x
        let coefficients = fit_rows(&[[1.0, 0.0], [1.0, 1.0], [1.0, 2.0]], &[2.0, 5.0, 8.0]).unwrap();
        assert!((coefficients.intercept() - 2.0).abs() < 1e-9);
        assert!((coefficients.weights()[0] - 3.0).abs() < 1e-9);
        assert!((coefficients.predict_row(&[1.0, 10.0]) - 32.0).abs() < 1e-9);
    }
}
