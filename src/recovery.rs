//! Member end-force recovery

use crate::analysis::ReleaseModel;
use crate::assembly::{element_local_stiffness, element_transformation, unreleased_local_stiffness};
use crate::elements::{FrameElement, Node};
use crate::error::{FrameError, FrameResult};
use crate::math::{Vec as FEVec, Vec6};

/// Element displacements in global coordinates, gathered from `U`
pub fn element_global_displacements(element: &FrameElement, u: &FEVec) -> FrameResult<Vec6> {
    let dofs = element.dof_map();
    if let Some(&dof) = dofs.iter().find(|&&dof| dof >= u.len()) {
        return Err(FrameError::DimensionMismatch(format!(
            "DOF {dof} is outside a displacement vector of length {}",
            u.len()
        )));
    }
    Ok(Vec6::from_fn(|i, _| u[dofs[i]]))
}

/// Element displacements in local coordinates: `T * u_global`
pub fn element_local_displacements(
    element: &FrameElement,
    u: &FEVec,
    nodes: &[Node],
) -> FrameResult<Vec6> {
    let t = element_transformation(element, nodes)?;
    Ok(t * element_global_displacements(element, u)?)
}

/// Local end forces [axial1, shear1, moment1, axial2, shear2, moment2]
///
/// With [`ReleaseModel::Zeroing`] the forces are `k * T * u` with the
/// unreleased local stiffness, so the moment at a hinge is only as close to
/// zero as the zeroed matrix allowed. With [`ReleaseModel::Condensation`] the
/// condensed matrix is used and hinge moments are exactly zero.
pub fn element_end_forces(
    element: &FrameElement,
    u: &FEVec,
    nodes: &[Node],
    release_model: ReleaseModel,
) -> FrameResult<Vec6> {
    let k_local = match release_model {
        ReleaseModel::Zeroing => unreleased_local_stiffness(element, nodes)?,
        ReleaseModel::Condensation => element_local_stiffness(element, nodes, release_model)?,
    };
    let d_local = element_local_displacements(element, u, nodes)?;
    Ok(k_local * d_local)
}

/// End forces for every element, in element order
pub fn all_end_forces(
    elements: &[FrameElement],
    u: &FEVec,
    nodes: &[Node],
    release_model: ReleaseModel,
) -> FrameResult<Vec<Vec6>> {
    elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            element_end_forces(element, u, nodes, release_model).map_err(|e| e.in_element(index))
        })
        .collect()
}
