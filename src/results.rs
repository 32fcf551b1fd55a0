//! Result types for frame analysis

use serde::{Deserialize, Serialize};

use crate::elements::NodeId;
use crate::error::{FrameError, FrameResult};

/// Displacement results at a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeDisplacement {
    /// Displacement in X direction
    pub dx: f64,
    /// Displacement in Y direction
    pub dy: f64,
    /// Rotation about Z axis
    pub rz: f64,
}

impl NodeDisplacement {
    /// Create from array [DX, DY, RZ]
    pub fn from_array(arr: [f64; 3]) -> Self {
        Self {
            dx: arr[0],
            dy: arr[1],
            rz: arr[2],
        }
    }

    /// Get translation magnitude
    pub fn translation_magnitude(&self) -> f64 {
        self.dx.hypot(self.dy)
    }
}

/// Reaction forces at a node; zero for unrestrained components
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Reactions {
    /// Reaction force in X direction
    pub fx: f64,
    /// Reaction force in Y direction
    pub fy: f64,
    /// Reaction moment about Z axis
    pub mz: f64,
}

impl Reactions {
    /// Create from array [FX, FY, MZ]
    pub fn from_array(arr: [f64; 3]) -> Self {
        Self {
            fx: arr[0],
            fy: arr[1],
            mz: arr[2],
        }
    }

    /// Get total force magnitude
    pub fn force_magnitude(&self) -> f64 {
        self.fx.hypot(self.fy)
    }
}

/// Internal forces at one end of a member
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberForces {
    /// Axial force (positive = tension)
    pub axial: f64,
    /// Shear force in local y direction
    pub shear: f64,
    /// Bending moment
    pub moment: f64,
}

impl MemberForces {
    /// Create from local end forces at node1
    pub fn from_start_forces(forces: &[f64; 6]) -> Self {
        Self {
            axial: -forces[0],
            shear: forces[1],
            moment: forces[2],
        }
    }

    /// Create from local end forces at node2
    pub fn from_end_forces(forces: &[f64; 6]) -> Self {
        Self {
            axial: forces[3],
            shear: -forces[4],
            moment: forces[5],
        }
    }
}

/// Global equilibrium of applied loads and reactions
///
/// Moments are taken about the global origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EquilibriumCheck {
    pub sum_fx: f64,
    pub sum_fy: f64,
    pub sum_mz: f64,
    /// Largest applied or reacted magnitude, used to scale the tolerance
    pub reference: f64,
}

impl EquilibriumCheck {
    /// Largest residual relative to the reference magnitude
    pub fn relative_residual(&self) -> f64 {
        let residual = self.sum_fx.abs().max(self.sum_fy.abs()).max(self.sum_mz.abs());
        if self.reference > 0.0 {
            residual / self.reference
        } else {
            residual
        }
    }

    /// True if the residual is within `tolerance`
    pub fn is_balanced(&self, tolerance: f64) -> bool {
        self.relative_residual() <= tolerance
    }
}

/// Summary of analysis results
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Maximum translation
    pub max_displacement: f64,
    /// Node with maximum translation
    pub max_disp_node: usize,
    /// Maximum reaction force
    pub max_reaction: f64,
    /// Node with maximum reaction
    pub max_reaction_node: usize,
    /// Maximum member axial force
    pub max_axial: f64,
    /// Element with maximum axial
    pub max_axial_member: usize,
    /// Maximum member end moment
    pub max_moment: f64,
    /// Element with maximum moment
    pub max_moment_member: usize,
    /// Total number of nodes
    pub num_nodes: usize,
    /// Total number of elements
    pub num_members: usize,
    /// Total DOFs
    pub total_dofs: usize,
    /// Free DOFs (unknown)
    pub free_dofs: usize,
}

/// Complete output of one analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResults {
    /// Global displacement vector U, length 3N
    pub displacements: Vec<f64>,
    /// Global reaction vector, zero at free DOFs
    pub reactions: Vec<f64>,
    /// Local end forces per element, in element order
    pub end_forces: Vec<[f64; 6]>,
    pub equilibrium: EquilibriumCheck,
    pub summary: AnalysisSummary,
}

impl AnalysisResults {
    fn node_triple(values: &[f64], node: NodeId) -> FrameResult<[f64; 3]> {
        let [a, b, c] = node.dofs();
        match (values.get(a), values.get(b), values.get(c)) {
            (Some(&x), Some(&y), Some(&z)) => Ok([x, y, z]),
            _ => Err(FrameError::NodeNotFound {
                node: node.index(),
                num_nodes: values.len() / 3,
            }),
        }
    }

    /// Get node displacement
    pub fn node_displacement(&self, node: NodeId) -> FrameResult<NodeDisplacement> {
        Self::node_triple(&self.displacements, node).map(NodeDisplacement::from_array)
    }

    /// Get node reactions
    pub fn node_reactions(&self, node: NodeId) -> FrameResult<Reactions> {
        Self::node_triple(&self.reactions, node).map(Reactions::from_array)
    }

    fn forces(&self, element: usize) -> FrameResult<&[f64; 6]> {
        self.end_forces.get(element).ok_or_else(|| {
            FrameError::InvalidInput(format!(
                "element {element} not found: the model has {} elements",
                self.end_forces.len()
            ))
        })
    }

    /// Get member forces at node1
    pub fn member_forces_start(&self, element: usize) -> FrameResult<MemberForces> {
        self.forces(element).map(MemberForces::from_start_forces)
    }

    /// Get member forces at node2
    pub fn member_forces_end(&self, element: usize) -> FrameResult<MemberForces> {
        self.forces(element).map(MemberForces::from_end_forces)
    }
}
