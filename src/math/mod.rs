//! Mathematical utilities for 2D frame calculations

use nalgebra::linalg::LU;
use nalgebra::{DMatrix, DVector, Dyn, Matrix6, Vector6};

use crate::error::{FrameError, FrameResult};

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;

/// 6x6 matrix for element stiffness and transformation
pub type Mat6 = Matrix6<f64>;
/// 6-element vector for element forces/displacements [u1, v1, θ1, u2, v2, θ2]
pub type Vec6 = Vector6<f64>;

/// Compute the local stiffness matrix of a 2D Euler-Bernoulli frame element
///
/// # Arguments
/// * `e` - Modulus of elasticity
/// * `a` - Cross-sectional area
/// * `i` - Second moment of area
/// * `length` - Element length
///
/// # Returns
/// 6x6 local stiffness matrix for DOFs [axial1, shear1, moment1, axial2, shear2, moment2]
pub fn frame_local_stiffness(e: f64, a: f64, i: f64, length: f64) -> Mat6 {
    let l = length;
    let l2 = l * l;
    let l3 = l2 * l;

    let ea_l = e * a / l;
    let ei_l3 = e * i / l3;
    let ei_l2 = e * i / l2;
    let ei_l = e * i / l;

    #[rustfmt::skip]
    let data = [
        // Row 0: axial at 1
        ea_l,   0.0,          0.0,         -ea_l,  0.0,          0.0,
        // Row 1: shear at 1
        0.0,    12.0*ei_l3,   6.0*ei_l2,   0.0,    -12.0*ei_l3,  6.0*ei_l2,
        // Row 2: moment at 1
        0.0,    6.0*ei_l2,    4.0*ei_l,    0.0,    -6.0*ei_l2,   2.0*ei_l,
        // Row 3: axial at 2
        -ea_l,  0.0,          0.0,         ea_l,   0.0,          0.0,
        // Row 4: shear at 2
        0.0,    -12.0*ei_l3,  -6.0*ei_l2,  0.0,    12.0*ei_l3,   -6.0*ei_l2,
        // Row 5: moment at 2
        0.0,    6.0*ei_l2,    2.0*ei_l,    0.0,    -6.0*ei_l2,   4.0*ei_l,
    ];

    Mat6::from_row_slice(&data)
}

/// Zero the moment-rotation terms at released ends
///
/// A released start zeroes `k[2,2]`, a released end zeroes `k[5,5]`, and either
/// release zeroes the end-to-end moment coupling `k[2,5] = k[5,2]`. Axial and
/// shear terms are untouched, so the result stays symmetric.
pub fn zero_released_moments(k: &Mat6, releases: &[bool; 6]) -> Mat6 {
    let mut k = *k;
    let start = releases[2];
    let end = releases[5];

    if start {
        k[(2, 2)] = 0.0;
    }
    if end {
        k[(5, 5)] = 0.0;
    }
    if start || end {
        k[(2, 5)] = 0.0;
        k[(5, 2)] = 0.0;
    }

    k
}

/// Apply static condensation for released DOFs
///
/// # Arguments
/// * `k` - Full stiffness matrix
/// * `releases` - Boolean array indicating which DOFs are released
///
/// Released rows and columns of the result are zero.
pub fn apply_releases(k: &Mat6, releases: &[bool; 6]) -> FrameResult<Mat6> {
    let (unreleased, released): (std::vec::Vec<usize>, std::vec::Vec<usize>) =
        (0..6).partition(|&i| !releases[i]);

    if released.is_empty() {
        return Ok(*k);
    }

    let n1 = unreleased.len();
    let n2 = released.len();

    // Partition into k11, k12, k21, k22
    let k11 = DMatrix::from_fn(n1, n1, |i, j| k[(unreleased[i], unreleased[j])]);
    let k12 = DMatrix::from_fn(n1, n2, |i, j| k[(unreleased[i], released[j])]);
    let k21 = DMatrix::from_fn(n2, n1, |i, j| k[(released[i], unreleased[j])]);
    let k22 = DMatrix::from_fn(n2, n2, |i, j| k[(released[i], released[j])]);

    // k_cond = k11 - k12 * inv(k22) * k21
    let k22_inv = k22.try_inverse().ok_or_else(|| {
        FrameError::MathError("released block of the local stiffness is singular".to_string())
    })?;

    let k_condensed = &k11 - &k12 * &k22_inv * &k21;

    // Expand back to 6x6 with zeros for released DOFs
    let mut k_result = Mat6::zeros();
    for (i, &ui) in unreleased.iter().enumerate() {
        for (j, &uj) in unreleased.iter().enumerate() {
            k_result[(ui, uj)] = k_condensed[(i, j)];
        }
    }

    Ok(k_result)
}

/// Compute the transformation matrix for a 2D frame element
///
/// # Arguments
/// * `cos` - Δx / L
/// * `sin` - Δy / L
///
/// # Returns
/// 6x6 block-diagonal matrix taking global components to local ones
pub fn frame_transformation_matrix(cos: f64, sin: f64) -> Mat6 {
    let (c, s) = (cos, sin);

    #[rustfmt::skip]
    let data = [
        c,    s,    0.0,  0.0,  0.0,  0.0,
        -s,   c,    0.0,  0.0,  0.0,  0.0,
        0.0,  0.0,  1.0,  0.0,  0.0,  0.0,
        0.0,  0.0,  0.0,  c,    s,    0.0,
        0.0,  0.0,  0.0,  -s,   c,    0.0,
        0.0,  0.0,  0.0,  0.0,  0.0,  1.0,
    ];

    Mat6::from_row_slice(&data)
}

/// Ratio of the smallest to the largest absolute LU pivot
///
/// Zero for an exactly singular matrix, small for a near-singular one.
pub fn pivot_ratio(a: &Mat) -> f64 {
    lu_pivot_ratio(&a.clone().lu())
}

fn lu_pivot_ratio(lu: &LU<f64, Dyn, Dyn>) -> f64 {
    let (min, max) = lu
        .u()
        .diagonal()
        .iter()
        .fold((f64::INFINITY, 0.0_f64), |(min, max), p| {
            (min.min(p.abs()), max.max(p.abs()))
        });
    if max == 0.0 || !max.is_finite() {
        0.0
    } else {
        min / max
    }
}

/// Solve a linear system using LU decomposition
///
/// Fails with [`FrameError::SingularMatrix`] when the pivot ratio falls below
/// `tolerance` or the solution is not finite.
pub fn solve_linear_system(a: &Mat, b: &Vec, tolerance: f64) -> FrameResult<Vec> {
    if !a.is_square() || a.nrows() != b.len() {
        return Err(FrameError::DimensionMismatch(format!(
            "cannot solve a {}x{} system with a right-hand side of length {}",
            a.nrows(),
            a.ncols(),
            b.len()
        )));
    }

    let lu = a.clone().lu();
    let ratio = lu_pivot_ratio(&lu);
    log::debug!("LU pivot ratio {ratio:.3e} for {} equations", a.nrows());
    if ratio <= tolerance {
        return Err(FrameError::SingularMatrix);
    }

    let x = lu.solve(b).ok_or(FrameError::SingularMatrix)?;
    if x.iter().any(|v| !v.is_finite()) {
        return Err(FrameError::SingularMatrix);
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_local_stiffness_symmetry() {
        let k = frame_local_stiffness(200e9, 0.01, 1e-4, 7.5);

        for i in 0..6 {
            for j in 0..6 {
                assert_relative_eq!(k[(i, j)], k[(j, i)], epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_local_stiffness_terms() {
        let k = frame_local_stiffness(29000.0, 10.0, 100.0, 10.0);
        assert_relative_eq!(k[(0, 0)], 29000.0);
        assert_relative_eq!(k[(0, 3)], -29000.0);
        assert_relative_eq!(k[(1, 1)], 12.0 * 29000.0 * 100.0 / 1000.0);
        assert_relative_eq!(k[(1, 2)], 6.0 * 29000.0 * 100.0 / 100.0);
        assert_relative_eq!(k[(2, 2)], 4.0 * 29000.0 * 100.0 / 10.0);
        assert_relative_eq!(k[(2, 5)], 2.0 * 29000.0 * 100.0 / 10.0);
        assert_relative_eq!(k[(4, 5)], -6.0 * 29000.0 * 100.0 / 100.0);
    }

    #[test]
    fn test_zeroing_keeps_axial_and_shear() {
        let k = frame_local_stiffness(29000.0, 10.0, 100.0, 10.0);
        let kz = zero_released_moments(&k, &[false, false, true, false, false, false]);

        assert_eq!(kz[(2, 2)], 0.0);
        assert_eq!(kz[(2, 5)], 0.0);
        assert_eq!(kz[(5, 2)], 0.0);
        assert_eq!(kz[(5, 5)], k[(5, 5)]);
        for &(r, c) in &[(0, 0), (0, 3), (1, 1), (1, 4), (4, 4), (1, 2), (4, 5)] {
            assert_eq!(kz[(r, c)], k[(r, c)]);
        }
    }

    #[test]
    fn test_condensation_single_release() {
        let (e, i, l) = (29000.0, 100.0, 10.0);
        let k = frame_local_stiffness(e, 10.0, i, l);
        let kc = apply_releases(&k, &[false, false, true, false, false, false]).unwrap();

        for j in 0..6 {
            assert_eq!(kc[(2, j)], 0.0);
            assert_eq!(kc[(j, 2)], 0.0);
        }
        // Propped-cantilever stiffness terms
        assert_relative_eq!(kc[(1, 1)], 3.0 * e * i / l.powi(3), max_relative = 1e-12);
        assert_relative_eq!(kc[(5, 5)], 3.0 * e * i / l, max_relative = 1e-12);
        assert_relative_eq!(kc[(0, 0)], k[(0, 0)]);
    }

    #[test]
    fn test_condensation_both_ends_is_truss() {
        let k = frame_local_stiffness(200e9, 0.01, 1e-4, 4.0);
        let kc = apply_releases(&k, &[false, false, true, false, false, true]).unwrap();

        for r in [1, 2, 4, 5] {
            for c in 0..6 {
                assert_relative_eq!(kc[(r, c)], 0.0, epsilon = 1e-3);
            }
        }
        assert_relative_eq!(kc[(0, 0)], k[(0, 0)]);
    }

    #[test]
    fn test_transformation_orthogonal() {
        for angle in [0.0_f64, 0.3, 1.2, 2.5, -0.7, std::f64::consts::FRAC_PI_2] {
            let t = frame_transformation_matrix(angle.cos(), angle.sin());
            let product = t * t.transpose();
            for i in 0..6 {
                for j in 0..6 {
                    let expected = if i == j { 1.0 } else { 0.0 };
                    assert_relative_eq!(product[(i, j)], expected, epsilon = 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_solve_detects_singular() {
        let a = Mat::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        let b = Vec::from_vec(vec![1.0, 2.0]);
        assert!(matches!(
            solve_linear_system(&a, &b, 1e-12),
            Err(FrameError::SingularMatrix)
        ));
    }

    #[test]
    fn test_pivot_ratio() {
        assert_eq!(pivot_ratio(&Mat::identity(3, 3)), 1.0);
        assert_eq!(pivot_ratio(&Mat::zeros(2, 2)), 0.0);

        let a = Mat::from_diagonal(&Vec::from_vec(vec![2.0, 1e-14, 1.0]));
        assert_relative_eq!(pivot_ratio(&a), 5e-15, max_relative = 1e-12);
        let b = Vec::from_vec(vec![1.0, 1.0, 1.0]);
        assert!(matches!(
            solve_linear_system(&a, &b, 1e-12),
            Err(FrameError::SingularMatrix)
        ));
        // Same system accepted once the tolerance allows it
        let x = solve_linear_system(&a, &b, 1e-16).unwrap();
        assert_relative_eq!(x[1], 1e14, max_relative = 1e-12);
    }

    #[test]
    fn test_solve_regular() {
        let a = Mat::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]);
        let b = Vec::from_vec(vec![1.0, 2.0]);
        let x = solve_linear_system(&a, &b, 1e-12).unwrap();
        assert_relative_eq!(x[0], 1.0 / 11.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 7.0 / 11.0, epsilon = 1e-12);
    }
}
