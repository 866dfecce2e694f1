//! Matrix algorithm acceptance tests.

use approx::assert_abs_diff_eq;
use fusetensor::{matmul, Definiteness, FusedTensor};

fn matrix(rows: &[&[f64]]) -> FusedTensor<f64> {
    FusedTensor::from_rows(rows).unwrap()
}

#[test]
fn general_inverse_round_trip() {
    let m = matrix(&[
        &[2.0, -1.0, 2.0, -1.0],
        &[4.0, 5.0, 2.5, -17.0],
        &[2.0, -1.0, 2.43, -30.0],
        &[4.0, 5.0, 245.0, -10.0],
    ]);

    let inv = m.inverse().unwrap();
    let product = matmul(&&m, &&inv).unwrap();

    let id = FusedTensor::<f64>::identity(&[4, 4]).unwrap();
    assert!(product.allclose(&&id, 1e-3).unwrap());
}

#[test]
fn inverting_twice_restores_the_matrix() {
    let m = matrix(&[
        &[2.0, -1.0, 0.0],
        &[-1.0, 2.0, -1.0],
        &[0.0, -1.0, 2.0],
    ]);
    let back = m.inverse().unwrap().inverse().unwrap();
    assert!(m.allclose(&&back, 1e-9).unwrap());
}

#[test]
fn cholesky_factor_matches_the_textbook_example() {
    let m = matrix(&[
        &[4.0, 12.0, -16.0],
        &[12.0, 37.0, -43.0],
        &[-16.0, -43.0, 98.0],
    ]);

    let l = m.cholesky().unwrap();

    let expected = [
        [2.0, 0.0, 0.0],
        [6.0, 1.0, 0.0],
        [-8.0, 5.0, 3.0],
    ];
    for (i, row) in expected.iter().enumerate() {
        for (j, &value) in row.iter().enumerate() {
            assert_abs_diff_eq!(l.get(&[i, j]).unwrap(), value, epsilon = 1e-12);
        }
    }
}

#[test]
fn cholesky_factor_reconstructs_the_matrix() {
    let m = matrix(&[
        &[25.0, 15.0, -5.0],
        &[15.0, 18.0, 0.0],
        &[-5.0, 0.0, 11.0],
    ]);

    let l = m.cholesky().unwrap();
    let reconstructed = matmul(&&l, &l.transposed_view().unwrap()).unwrap();
    assert!(m.allclose(&&reconstructed, 1e-9).unwrap());
}

#[test]
fn einsum_with_the_identity_is_a_no_op() {
    let m = matrix(&[&[1.5, -2.0], &[0.25, 4.0]]);
    let id = FusedTensor::<f64>::identity(&[2, 2]).unwrap();

    let right = matmul(&&m, &&id).unwrap();
    assert!(m.allclose_default(&&right).unwrap());

    let left = matmul(&&id, &&m).unwrap();
    assert!(m.allclose_default(&&left).unwrap());
}

#[test]
fn definiteness_matches_eigenstructure() {
    let pd = matrix(&[
        &[2.0, -1.0, 0.0],
        &[-1.0, 2.0, -1.0],
        &[0.0, -1.0, 2.0],
    ]);
    assert_eq!(pd.definiteness(), Definiteness::PositiveDefinite);

    let indefinite = matrix(&[&[1.0, 2.0], &[2.0, 1.0]]);
    assert_eq!(indefinite.definiteness(), Definiteness::NotPositiveDefinite);

    let asymmetric = matrix(&[&[1.0, 2.0], &[3.0, 4.0]]);
    assert_eq!(asymmetric.definiteness(), Definiteness::NotPositiveDefinite);
}

#[test]
fn predicates_on_a_cholesky_factor() {
    let m = matrix(&[
        &[4.0, 12.0, -16.0],
        &[12.0, 37.0, -43.0],
        &[-16.0, -43.0, 98.0],
    ]);
    assert!(m.is_symmetric().unwrap());

    let l = m.cholesky().unwrap();
    assert!(l.is_lower_triangular().unwrap());
    assert!(!l.is_upper_triangular().unwrap());
    assert!(l.transposed().unwrap().is_upper_triangular().unwrap());
}

#[test]
fn inverse_of_an_expression_result() {
    // Matrix algorithms compose with the lazy layer: build the operand from
    // an expression, then invert it.
    let base = matrix(&[&[1.0, 0.0], &[0.0, 1.0]]);
    let scaled = (&base * 4.0).eval().unwrap();

    let inv = scaled.inverse().unwrap();
    assert_abs_diff_eq!(inv.get(&[0, 0]).unwrap(), 0.25, epsilon = 1e-12);
    assert_abs_diff_eq!(inv.get(&[1, 1]).unwrap(), 0.25, epsilon = 1e-12);
}
