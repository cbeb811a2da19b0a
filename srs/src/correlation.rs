//! Cross-Correlation Analysis
//!
//! Normalized inner-product magnitude between SRS symbols of different UEs:
//!
//! ```text
//! corr(a, b) = |sum_k conj(a[k]) * b[k]| / (||a|| * ||b||)
//! ```

use crate::SrsError;
use ndarray::Array2;
use num_complex::Complex64;
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Pairs above this value are reported as highly correlated
pub const DEFAULT_CORRELATION_THRESHOLD: f64 = 0.3;

/// Normalized cross-correlation magnitude of two equal-length signals
///
/// Returns 0 when either signal has zero energy.
pub fn normalized_cross_correlation(a: &[Complex64], b: &[Complex64]) -> Result<f64, SrsError> {
    if a.len() != b.len() {
        return Err(SrsError::LengthMismatch {
            index: 1,
            expected: a.len(),
            found: b.len(),
        });
    }
    Ok(correlate(a, b))
}

fn correlate(a: &[Complex64], b: &[Complex64]) -> f64 {
    let energy_a: f64 = a.iter().map(|c| c.norm_sqr()).sum();
    let energy_b: f64 = b.iter().map(|c| c.norm_sqr()).sum();
    if energy_a == 0.0 || energy_b == 0.0 {
        return 0.0;
    }

    let inner: Complex64 = a.iter()
        .zip(b)
        .map(|(x, y)| x.conj() * y)
        .sum();

    (inner.norm() / (energy_a * energy_b).sqrt()).min(1.0)
}

/// Pair of UEs whose correlation exceeds a threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorrelatedPair {
    pub i: usize,
    pub j: usize,
    pub value: f64,
}

/// Symmetric matrix of normalized correlations, indexed by UE
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    values: Array2<f64>,
}

impl CorrelationMatrix {
    /// Wrap an existing square matrix
    pub fn from_array(values: Array2<f64>) -> Result<Self, SrsError> {
        let (rows, cols) = values.dim();
        if rows != cols {
            return Err(SrsError::InvalidConfig(
                format!("correlation matrix must be square, got {}x{}", rows, cols)
            ));
        }
        Ok(Self { values })
    }

    /// Number of UEs
    pub fn size(&self) -> usize {
        self.values.nrows()
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get((i, j)).copied()
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.values
    }

    /// Row-major copy, for reports
    pub fn rows(&self) -> Vec<Vec<f64>> {
        self.values.rows().into_iter().map(|row| row.to_vec()).collect()
    }

    /// Unordered pairs (i < j) above `threshold`, in ascending (i, j) order
    pub fn highlight_pairs(&self, threshold: f64) -> Vec<CorrelatedPair> {
        let n = self.size();
        let mut pairs = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                let value = self.values[[i, j]];
                if value > threshold {
                    pairs.push(CorrelatedPair { i, j, value });
                }
            }
        }
        pairs
    }
}

impl fmt::Display for CorrelationMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.values.rows() {
            let cells: Vec<String> = row.iter().map(|v| format!("{:.3}", v)).collect();
            writeln!(f, "[{}]", cells.join(" "))?;
        }
        Ok(())
    }
}

/// Compute the correlation matrix of a batch of signals
///
/// Each upper-triangle cell is computed independently in parallel and mirrored.
pub fn correlation_matrix<S>(signals: &[S]) -> Result<CorrelationMatrix, SrsError>
where
    S: AsRef<[Complex64]> + Sync,
{
    let n = signals.len();
    if let Some(first) = signals.first() {
        let expected = first.as_ref().len();
        for (index, signal) in signals.iter().enumerate() {
            let found = signal.as_ref().len();
            if found != expected {
                return Err(SrsError::LengthMismatch { index, expected, found });
            }
        }
    }

    let cells: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| (i..n).map(move |j| (i, j)))
        .collect();

    let values: Vec<f64> = cells.par_iter()
        .map(|&(i, j)| correlate(signals[i].as_ref(), signals[j].as_ref()))
        .collect();

    let mut matrix = Array2::zeros((n, n));
    for (&(i, j), &value) in cells.iter().zip(&values) {
        matrix[[i, j]] = value;
        matrix[[j, i]] = value;
    }

    debug!("Computed {}x{} correlation matrix ({} cells)", n, n, cells.len());

    Ok(CorrelationMatrix { values: matrix })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn signal(values: &[(f64, f64)]) -> Vec<Complex64> {
        values.iter().map(|&(re, im)| Complex64::new(re, im)).collect()
    }

    #[test]
    fn test_self_correlation_is_one() {
        let a = signal(&[(1.0, 2.0), (-0.5, 0.25), (3.0, -1.0), (0.0, 0.7)]);
        let value = normalized_cross_correlation(&a, &a).unwrap();
        assert!((value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_bounded_and_symmetric() {
        let a = signal(&[(1.0, 0.0), (0.0, 1.0), (1.0, 1.0)]);
        let b = signal(&[(0.5, -0.5), (2.0, 0.0), (-1.0, 0.3)]);
        let ab = normalized_cross_correlation(&a, &b).unwrap();
        let ba = normalized_cross_correlation(&b, &a).unwrap();
        assert!((0.0..=1.0).contains(&ab));
        assert!((ab - ba).abs() < 1e-12);
    }

    #[test]
    fn test_scaled_copy_fully_correlated() {
        let a = signal(&[(1.0, -1.0), (0.2, 0.4), (-3.0, 0.0)]);
        let b: Vec<Complex64> = a.iter().map(|c| c * Complex64::new(0.0, -2.5)).collect();
        assert!((normalized_cross_correlation(&a, &b).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_orthogonal_and_zero_energy() {
        let a = signal(&[(1.0, 0.0), (0.0, 0.0)]);
        let b = signal(&[(0.0, 0.0), (1.0, 0.0)]);
        let zero = signal(&[(0.0, 0.0), (0.0, 0.0)]);
        assert_eq!(normalized_cross_correlation(&a, &b).unwrap(), 0.0);
        assert_eq!(normalized_cross_correlation(&a, &zero).unwrap(), 0.0);
        assert_eq!(normalized_cross_correlation(&zero, &zero).unwrap(), 0.0);
    }

    #[test]
    fn test_length_mismatch() {
        let a = signal(&[(1.0, 0.0), (0.0, 1.0)]);
        let b = signal(&[(1.0, 0.0)]);
        assert_eq!(
            normalized_cross_correlation(&a, &b),
            Err(SrsError::LengthMismatch { index: 1, expected: 2, found: 1 })
        );

        let batch = vec![a.clone(), a, b];
        assert_eq!(
            correlation_matrix(&batch).unwrap_err(),
            SrsError::LengthMismatch { index: 2, expected: 2, found: 1 }
        );
    }

    #[test]
    fn test_matrix_symmetric_with_unit_diagonal() {
        let batch = vec![
            signal(&[(1.0, 0.0), (0.0, 1.0), (0.5, 0.5)]),
            signal(&[(0.0, 1.0), (1.0, 0.0), (0.0, 0.0)]),
            signal(&[(2.0, 0.0), (0.0, 2.0), (1.0, 1.0)]),
            signal(&[(0.0, 0.0), (0.0, 0.0), (0.0, 0.0)]),
        ];
        let matrix = correlation_matrix(&batch).unwrap();
        assert_eq!(matrix.size(), 4);
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
                let direct = normalized_cross_correlation(&batch[i], &batch[j]).unwrap();
                assert!((matrix.get(i, j).unwrap() - direct).abs() < 1e-12);
            }
        }
        for i in 0..3 {
            assert!((matrix.get(i, i).unwrap() - 1.0).abs() < 1e-12);
        }
        // Zero-energy signal has a zero diagonal
        assert_eq!(matrix.get(3, 3), Some(0.0));
        // Scaled copy
        assert!((matrix.get(0, 2).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_highlight_pairs_order() {
        let matrix = CorrelationMatrix::from_array(array![
            [1.0, 0.9, 0.1, 0.31],
            [0.9, 1.0, 0.5, 0.3],
            [0.1, 0.5, 1.0, 0.05],
            [0.31, 0.3, 0.05, 1.0],
        ])
        .unwrap();

        let pairs = matrix.highlight_pairs(DEFAULT_CORRELATION_THRESHOLD);
        let indices: Vec<(usize, usize)> = pairs.iter().map(|p| (p.i, p.j)).collect();
        // Discovery order, not sorted by magnitude; 0.3 itself is not above the threshold
        assert_eq!(indices, vec![(0, 1), (0, 3), (1, 2)]);
        assert_eq!(pairs[1].value, 0.31);

        assert!(matrix.highlight_pairs(0.95).is_empty());
    }

    #[test]
    fn test_non_square_rejected() {
        assert!(matches!(
            CorrelationMatrix::from_array(Array2::zeros((2, 3))),
            Err(SrsError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_empty_batch() {
        let batch: Vec<Vec<Complex64>> = Vec::new();
        let matrix = correlation_matrix(&batch).unwrap();
        assert_eq!(matrix.size(), 0);
        assert!(matrix.highlight_pairs(0.0).is_empty());
    }

    #[test]
    fn test_display() {
        let matrix = CorrelationMatrix::from_array(array![[1.0, 0.25], [0.25, 1.0]]).unwrap();
        assert_eq!(matrix.to_string(), "[1.000 0.250]\n[0.250 1.000]\n");
        assert_eq!(matrix.rows(), vec![vec![1.0, 0.25], vec![0.25, 1.0]]);
    }
}
