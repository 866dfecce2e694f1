//! Matrix algorithms and structural predicates.
//!
//! Everything here works on rank-2 tensors through the checked element
//! interface; the lazy expression machinery is used only where a whole-matrix
//! comparison is natural (symmetry, orthogonality). Predicates compare
//! against the element type's default tolerance.

use crate::contract::matmul;
use crate::element::Element;
use crate::error::TensorError;
use crate::storage::Buffer;
use crate::tensor::FusedTensor;

/// Outcome of a positive-definiteness test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Definiteness {
    PositiveDefinite,
    PositiveSemiDefinite,
    NotPositiveDefinite,
}

fn require_square<T: Element, B: Buffer<T>>(
    matrix: &FusedTensor<T, B>,
) -> Result<usize, TensorError> {
    if matrix.rank() != 2 {
        return Err(TensorError::RankMismatch {
            expected: 2,
            actual: matrix.rank(),
        });
    }
    let (rows, cols) = (matrix.extent(0), matrix.extent(1));
    if rows != cols {
        return Err(TensorError::NotSquare {
            shape: matrix.shape().to_vec(),
        });
    }
    Ok(rows)
}

/// Whether `matrix` equals its transpose within the default tolerance.
/// Non-square input is an error, not `false`.
pub fn is_symmetric<T: Element, B: Buffer<T>>(
    matrix: &FusedTensor<T, B>,
) -> Result<bool, TensorError> {
    require_square(matrix)?;
    let transposed = matrix.transposed_view()?;
    matrix.allclose_default(&transposed)
}

/// Whether every element below the diagonal is within tolerance of zero.
pub fn is_upper_triangular<T: Element, B: Buffer<T>>(
    matrix: &FusedTensor<T, B>,
) -> Result<bool, TensorError> {
    let n = require_square(matrix)?;
    let tolerance = T::tolerance();
    for i in 1..n {
        for j in 0..i {
            if matrix.get(&[i, j])?.abs() > tolerance {
                return Ok(false);
            }
        }
    }
    Ok(true)
}

/// Whether every element above the diagonal is within tolerance of zero.
pub fn is_lower_triangular<T: Element, B: Buffer<T>>(
    matrix: &FusedTensor<T, B>,
) -> Result<bool, TensorError> {
    let n = require_square(matrix)?;
    let tolerance = T::tolerance();
    for i in 0..n {
        for j in i + 1..n {
            if matrix.get(&[i, j])?.abs() > tolerance {
                return Ok(false);
            }
        }
    }
    Ok(true)
}

/// Whether `matrix` times its transpose is the identity, both ways round.
pub fn is_orthogonal<T: Element, B: Buffer<T>>(
    matrix: &FusedTensor<T, B>,
) -> Result<bool, TensorError> {
    require_square(matrix)?;
    let transposed = matrix.transposed_view()?;
    if !matmul(&&*matrix, &transposed)?.is_identity() {
        return Ok(false);
    }
    Ok(matmul(&transposed, &&*matrix)?.is_identity())
}

/// Invert a square matrix by Gauss-Jordan elimination.
///
/// The identity short-circuits to a copy. Elimination mirrors every row
/// operation onto an identity-seeded companion; between the elimination and
/// back-substitution phases the working matrix is clamped to exactly upper
/// triangular to shed rounding residue. A diagonal pivot whose magnitude
/// falls below tolerance at any phase reports the matrix as singular.
pub fn inverse<T: Element, B: Buffer<T>>(
    matrix: &FusedTensor<T, B>,
) -> Result<FusedTensor<T, B>, TensorError> {
    let n = require_square(matrix)?;
    if matrix.is_identity() {
        return Ok(matrix.clone());
    }

    let tolerance = T::tolerance();
    let mut work = matrix.clone();
    let mut out = matrix.clone();
    out.set_identity()?;

    // Eliminate below the diagonal.
    for j in 0..n - 1 {
        for i in j + 1..n {
            let pivot = work.get(&[j, j])?;
            if pivot.abs() < tolerance {
                return Err(TensorError::Singular {
                    stage: "gauss elimination",
                });
            }
            let factor = work.get(&[i, j])? / pivot;
            for k in 0..n {
                let w = work.get(&[i, k])? - work.get(&[j, k])? * factor;
                work.set(&[i, k], w)?;
                let o = out.get(&[i, k])? - out.get(&[j, k])? * factor;
                out.set(&[i, k], o)?;
            }
        }
    }

    // Rounding residue can leave the lower triangle slightly nonzero; clamp
    // it before back-substitution.
    for i in 1..n {
        for j in 0..i {
            work.set(&[i, j], T::zero())?;
        }
    }

    // Eliminate above the diagonal.
    for j in (1..n).rev() {
        for i in (0..j).rev() {
            let pivot = work.get(&[j, j])?;
            if pivot.abs() < tolerance {
                return Err(TensorError::Singular { stage: "jordan" });
            }
            let factor = work.get(&[i, j])? / pivot;
            let w = work.get(&[i, j])? - pivot * factor;
            work.set(&[i, j], w)?;
            for k in (0..n).rev() {
                let o = out.get(&[i, k])? - out.get(&[j, k])? * factor;
                out.set(&[i, k], o)?;
            }
        }
    }

    // Normalize the diagonal.
    for i in 0..n {
        let pivot = work.get(&[i, i])?;
        if pivot.abs() < tolerance {
            return Err(TensorError::Singular {
                stage: "normalization",
            });
        }
        work.set(&[i, i], T::one())?;
        for j in 0..n {
            let o = out.get(&[i, j])? / pivot;
            out.set(&[i, j], o)?;
        }
    }
    Ok(out)
}

/// Cholesky-Crout factorization of a symmetric positive-definite matrix.
///
/// Returns the lower-triangular factor `L` with `L * L^T == matrix`. A
/// diagonal residual at or below tolerance fails with
/// [`TensorError::NotPositiveDefinite`].
pub fn cholesky<T: Element, B: Buffer<T>>(
    matrix: &FusedTensor<T, B>,
) -> Result<FusedTensor<T, B>, TensorError> {
    if !is_symmetric(matrix)? {
        return Err(TensorError::NotSymmetric);
    }
    let n = matrix.extent(0);
    let tolerance = T::tolerance();
    let mut factor = matrix.clone();
    factor.set_zero();

    for i in 0..n {
        for j in 0..=i {
            let mut sum = T::zero();
            for k in 0..j {
                sum += factor.get(&[i, k])? * factor.get(&[j, k])?;
            }
            if i == j {
                let diag = matrix.get(&[i, i])? - sum;
                if diag <= tolerance {
                    return Err(TensorError::NotPositiveDefinite);
                }
                factor.set(&[i, j], diag.sqrt())?;
            } else {
                let value = (matrix.get(&[i, j])? - sum) / factor.get(&[j, j])?;
                factor.set(&[i, j], value)?;
            }
        }
    }
    Ok(factor)
}

/// Classify a matrix by attempting its Cholesky factorization.
///
/// Every failure, including non-symmetry, counts as not positive definite;
/// the underlying error is logged at debug level.
pub fn definiteness<T: Element, B: Buffer<T>>(matrix: &FusedTensor<T, B>) -> Definiteness {
    match cholesky(matrix) {
        Ok(factor) => {
            let tolerance = T::tolerance();
            for i in 0..matrix.extent(0) {
                let diag = factor.get(&[i, i]).map(|d| d.abs()).unwrap_or_else(|_| T::zero());
                if diag < tolerance {
                    return Definiteness::PositiveSemiDefinite;
                }
            }
            Definiteness::PositiveDefinite
        }
        Err(err) => {
            log::debug!("definiteness: cholesky failed: {err}");
            Definiteness::NotPositiveDefinite
        }
    }
}

impl<T: Element, B: Buffer<T>> FusedTensor<T, B> {
    /// See [`inverse`].
    pub fn inverse(&self) -> Result<Self, TensorError> {
        inverse(self)
    }

    /// See [`cholesky`].
    pub fn cholesky(&self) -> Result<Self, TensorError> {
        cholesky(self)
    }

    /// See [`is_symmetric`].
    pub fn is_symmetric(&self) -> Result<bool, TensorError> {
        is_symmetric(self)
    }

    /// See [`is_upper_triangular`].
    pub fn is_upper_triangular(&self) -> Result<bool, TensorError> {
        is_upper_triangular(self)
    }

    /// See [`is_lower_triangular`].
    pub fn is_lower_triangular(&self) -> Result<bool, TensorError> {
        is_lower_triangular(self)
    }

    /// See [`is_orthogonal`].
    pub fn is_orthogonal(&self) -> Result<bool, TensorError> {
        is_orthogonal(self)
    }

    /// See [`definiteness`].
    pub fn definiteness(&self) -> Definiteness {
        definiteness(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::matmul;

    fn matrix(rows: &[&[f64]]) -> FusedTensor<f64> {
        FusedTensor::from_rows(rows).unwrap()
    }

    #[test]
    fn inverse_of_identity_is_identity() {
        let id = FusedTensor::<f64>::identity(&[3, 3]).unwrap();
        assert!(id.inverse().unwrap().is_identity());
    }

    #[test]
    fn inverse_of_diagonal_matrix() {
        let m = matrix(&[&[2.0, 0.0], &[0.0, 4.0]]);
        let inv = m.inverse().unwrap();
        assert!((inv.get(&[0, 0]).unwrap() - 0.5).abs() < 1e-12);
        assert!((inv.get(&[1, 1]).unwrap() - 0.25).abs() < 1e-12);
        assert!(inv.get(&[0, 1]).unwrap().abs() < 1e-12);
    }

    #[test]
    fn inverse_round_trip_is_identity() {
        let m = matrix(&[&[4.0, 7.0], &[2.0, 6.0]]);
        let product = matmul(&&m, &&m.inverse().unwrap()).unwrap();
        assert!(product.is_identity());
    }

    #[test]
    fn singular_matrix_is_reported() {
        let m = matrix(&[&[1.0, 2.0], &[2.0, 4.0]]);
        assert!(matches!(m.inverse(), Err(TensorError::Singular { .. })));
    }

    #[test]
    fn inverse_requires_square() {
        let m = FusedTensor::<f64>::zeros(&[2, 3]);
        assert!(matches!(m.inverse(), Err(TensorError::NotSquare { .. })));
    }

    #[test]
    fn cholesky_classic_example() {
        let m = matrix(&[
            &[4.0, 12.0, -16.0],
            &[12.0, 37.0, -43.0],
            &[-16.0, -43.0, 98.0],
        ]);
        let l = m.cholesky().unwrap();
        let expected = matrix(&[&[2.0, 0.0, 0.0], &[6.0, 1.0, 0.0], &[-8.0, 5.0, 3.0]]);
        assert!(l.allclose(&&expected, 1e-12).unwrap());
        assert!(l.is_lower_triangular().unwrap());
    }

    #[test]
    fn cholesky_rejects_asymmetric_input() {
        let m = matrix(&[&[4.0, 1.0], &[2.0, 3.0]]);
        assert!(matches!(m.cholesky(), Err(TensorError::NotSymmetric)));
    }

    #[test]
    fn cholesky_rejects_indefinite_input() {
        let m = matrix(&[&[1.0, 2.0], &[2.0, 1.0]]);
        assert!(matches!(
            m.cholesky(),
            Err(TensorError::NotPositiveDefinite)
        ));
    }

    #[test]
    fn symmetry_predicate() {
        let sym = matrix(&[&[1.0, 2.0], &[2.0, 5.0]]);
        assert!(sym.is_symmetric().unwrap());
        let asym = matrix(&[&[1.0, 2.0], &[3.0, 5.0]]);
        assert!(!asym.is_symmetric().unwrap());
        let rect = FusedTensor::<f64>::zeros(&[2, 3]);
        assert!(rect.is_symmetric().is_err());
    }

    #[test]
    fn triangularity_predicates() {
        let upper = matrix(&[&[1.0, 2.0], &[0.0, 3.0]]);
        assert!(upper.is_upper_triangular().unwrap());
        assert!(!upper.is_lower_triangular().unwrap());
        let lower = upper.transposed().unwrap();
        assert!(lower.is_lower_triangular().unwrap());
        assert!(!lower.is_upper_triangular().unwrap());
    }

    #[test]
    fn orthogonality_predicate() {
        let rotation = matrix(&[&[0.0, -1.0], &[1.0, 0.0]]);
        assert!(rotation.is_orthogonal().unwrap());
        let stretch = matrix(&[&[2.0, 0.0], &[0.0, 1.0]]);
        assert!(!stretch.is_orthogonal().unwrap());
    }

    #[test]
    fn definiteness_classification() {
        let pd = matrix(&[&[2.0, 0.0], &[0.0, 3.0]]);
        assert_eq!(pd.definiteness(), Definiteness::PositiveDefinite);

        let indefinite = matrix(&[&[1.0, 2.0], &[2.0, 1.0]]);
        assert_eq!(
            indefinite.definiteness(),
            Definiteness::NotPositiveDefinite
        );

        // Any failure counts, including shape problems.
        let rect = FusedTensor::<f64>::zeros(&[2, 3]);
        assert_eq!(rect.definiteness(), Definiteness::NotPositiveDefinite);
    }
}
