//! Restrained linear solve and support reactions

use crate::analysis::AnalysisOptions;
use crate::error::{FrameError, FrameResult};
use crate::math::{self, Mat, Vec as FEVec};

/// Split of the global DOFs into free and restrained sets, both ascending
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DofPartition {
    pub free: Vec<usize>,
    pub restrained: Vec<usize>,
}

/// Partition `0..n_dofs` by the restrained index set
///
/// Duplicate restrained indices are accepted; out-of-range ones are rejected.
pub fn partition_dofs(n_dofs: usize, restrained: &[usize]) -> FrameResult<DofPartition> {
    let mut mask = vec![false; n_dofs];
    for &dof in restrained {
        if dof >= n_dofs {
            return Err(FrameError::RestraintOutOfRange {
                dof,
                num_dofs: n_dofs,
            });
        }
        mask[dof] = true;
    }

    let (restrained, free): (Vec<usize>, Vec<usize>) =
        (0..n_dofs).partition(|&dof| mask[dof]);
    Ok(DofPartition { free, restrained })
}

fn check_system(k: &Mat, f: &FEVec) -> FrameResult<()> {
    if !k.is_square() {
        return Err(FrameError::DimensionMismatch(format!(
            "stiffness matrix is {}x{}, expected a square matrix",
            k.nrows(),
            k.ncols()
        )));
    }
    if f.len() != k.nrows() {
        return Err(FrameError::DimensionMismatch(format!(
            "load vector has length {}, expected {}",
            f.len(),
            k.nrows()
        )));
    }
    if let Some(dof) = f.iter().position(|v| !v.is_finite()) {
        return Err(FrameError::InvalidInput(format!(
            "load vector entry {dof} is not finite ({})",
            f[dof]
        )));
    }
    Ok(())
}

/// Solve `K * U = F` with the restrained DOFs held at zero
///
/// Only the free rows and columns are solved (dense LU); the returned vector
/// has the full length with zeros at restrained DOFs. A singular or
/// near-singular reduced matrix is reported as [`FrameError::SingularMatrix`];
/// a non-finite load as [`FrameError::InvalidInput`].
pub fn solve(
    k: &Mat,
    f: &FEVec,
    restrained: &[usize],
    options: &AnalysisOptions,
) -> FrameResult<FEVec> {
    check_system(k, f)?;
    let n_dofs = k.nrows();
    let partition = partition_dofs(n_dofs, restrained)?;
    let free = &partition.free;

    let mut u = FEVec::zeros(n_dofs);
    if free.is_empty() {
        log::warn!("all {n_dofs} DOFs are restrained; displacements are zero");
        return Ok(u);
    }

    // Partition stiffness matrix and load vector
    let n_free = free.len();
    let k11 = Mat::from_fn(n_free, n_free, |i, j| k[(free[i], free[j])]);
    let f1 = FEVec::from_fn(n_free, |i, _| f[free[i]]);

    log::debug!(
        "solving {n_free} free DOFs ({} restrained)",
        partition.restrained.len()
    );

    // Solve K11 * U1 = F1
    let u1 = math::solve_linear_system(&k11, &f1, options.singularity_tolerance)?;

    for (i, &dof) in free.iter().enumerate() {
        u[dof] = u1[i];
    }
    Ok(u)
}

/// Support reactions `R = K * U - F`, zero at free DOFs
pub fn support_reactions(
    k: &Mat,
    u: &FEVec,
    f: &FEVec,
    restrained: &[usize],
) -> FrameResult<FEVec> {
    check_system(k, f)?;
    if u.len() != f.len() {
        return Err(FrameError::DimensionMismatch(format!(
            "displacement vector has length {}, expected {}",
            u.len(),
            f.len()
        )));
    }
    let partition = partition_dofs(k.nrows(), restrained)?;

    let mut reactions = FEVec::zeros(k.nrows());
    for &dof in &partition.restrained {
        reactions[dof] = k.row(dof).transpose().dot(u) - f[dof];
    }
    Ok(reactions)
}
