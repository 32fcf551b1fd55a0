//! Element matrices and global stiffness assembly
//!
//! Every element contributes `T^T * k_local * T` to the rows and columns of
//! its six global DOFs. Contributions are independent of each other, so the
//! element loop can run in any order (or in parallel with the `parallel`
//! feature) and produce the same matrix.

use crate::analysis::{AnalysisOptions, ReleaseModel};
use crate::elements::{FrameElement, Node};
use crate::error::FrameResult;
use crate::math::{self, Mat, Mat6};

/// Local stiffness matrix of an element, with its end releases applied
///
/// DOF order is [axial1, shear1, moment1, axial2, shear2, moment2].
pub fn element_local_stiffness(
    element: &FrameElement,
    nodes: &[Node],
    release_model: ReleaseModel,
) -> FrameResult<Mat6> {
    let k = unreleased_local_stiffness(element, nodes)?;
    if !element.releases.any() {
        return Ok(k);
    }

    let releases = element.releases.as_array();
    match release_model {
        ReleaseModel::Zeroing => Ok(math::zero_released_moments(&k, &releases)),
        ReleaseModel::Condensation => math::apply_releases(&k, &releases),
    }
}

/// Local stiffness matrix ignoring end releases
pub fn unreleased_local_stiffness(element: &FrameElement, nodes: &[Node]) -> FrameResult<Mat6> {
    let geometry = element.geometry(nodes)?;
    Ok(math::frame_local_stiffness(
        element.e,
        element.a,
        element.i,
        geometry.length,
    ))
}

/// Rotation matrix taking the element's global DOF components to local ones
pub fn element_transformation(element: &FrameElement, nodes: &[Node]) -> FrameResult<Mat6> {
    let geometry = element.geometry(nodes)?;
    Ok(math::frame_transformation_matrix(geometry.cos, geometry.sin))
}

/// Element stiffness in global coordinates: `T^T * k_local * T`
pub fn element_global_stiffness(
    element: &FrameElement,
    nodes: &[Node],
    release_model: ReleaseModel,
) -> FrameResult<Mat6> {
    let k_local = element_local_stiffness(element, nodes, release_model)?;
    let t = element_transformation(element, nodes)?;
    Ok(t.transpose() * k_local * t)
}

/// Add an element matrix into the global matrix at the given DOFs
fn scatter(k_global: &mut Mat, dofs: &[usize; 6], k_element: &Mat6) {
    for (a, &row) in dofs.iter().enumerate() {
        for (b, &col) in dofs.iter().enumerate() {
            k_global[(row, col)] += k_element[(a, b)];
        }
    }
}

/// Assemble the global stiffness matrix of size `3 * nodes.len()`
///
/// Fails on the first invalid element; the error carries the element's
/// position in `elements`.
pub fn assemble_global_stiffness(
    elements: &[FrameElement],
    nodes: &[Node],
    options: &AnalysisOptions,
) -> FrameResult<Mat> {
    if options.parallel {
        #[cfg(feature = "parallel")]
        {
            return assemble_global_stiffness_par(elements, nodes, options);
        }

        #[cfg(not(feature = "parallel"))]
        log::warn!("parallel assembly requested but the `parallel` feature is disabled");
    }

    let n_dofs = nodes.len() * 3;
    let mut k_global = Mat::zeros(n_dofs, n_dofs);

    for (index, element) in elements.iter().enumerate() {
        let k_element = element_global_stiffness(element, nodes, options.release_model)
            .map_err(|e| e.in_element(index))?;
        scatter(&mut k_global, &element.dof_map(), &k_element);
    }

    log::debug!(
        "assembled {} elements into a {n_dofs}x{n_dofs} stiffness matrix",
        elements.len()
    );
    Ok(k_global)
}

/// Assemble the global stiffness matrix with rayon
///
/// Each worker accumulates a partial matrix; partial matrices are summed at
/// the end.
#[cfg(feature = "parallel")]
pub fn assemble_global_stiffness_par(
    elements: &[FrameElement],
    nodes: &[Node],
    options: &AnalysisOptions,
) -> FrameResult<Mat> {
    use rayon::prelude::*;

    let n_dofs = nodes.len() * 3;
    let release_model = options.release_model;

    let k_global = elements
        .par_iter()
        .enumerate()
        .try_fold(
            || Mat::zeros(n_dofs, n_dofs),
            |mut partial, (index, element)| {
                let k_element = element_global_stiffness(element, nodes, release_model)
                    .map_err(|e| e.in_element(index))?;
                scatter(&mut partial, &element.dof_map(), &k_element);
                Ok::<Mat, crate::error::FrameError>(partial)
            },
        )
        .try_reduce(|| Mat::zeros(n_dofs, n_dofs), |a, b| Ok(a + b))?;

    log::debug!(
        "assembled {} elements in parallel into a {n_dofs}x{n_dofs} stiffness matrix",
        elements.len()
    );
    Ok(k_global)
}
