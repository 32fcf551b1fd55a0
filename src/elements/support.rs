//! Support conditions

use serde::{Deserialize, Serialize};

use super::node::NodeId;

/// Support conditions at a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Support {
    /// Restrained in X translation
    pub dx: bool,
    /// Restrained in Y translation
    pub dy: bool,
    /// Restrained in rotation about Z
    pub rz: bool,
}

impl Support {
    /// Create a new support with no restraints
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fully fixed support (all DOFs restrained)
    pub fn fixed() -> Self {
        Self::with_restraints(true, true, true)
    }

    /// Create a pinned support (translations restrained, rotation free)
    pub fn pinned() -> Self {
        Self::with_restraints(true, true, false)
    }

    /// Create a roller support (Y translation restrained only)
    pub fn roller_y() -> Self {
        Self::with_restraints(false, true, false)
    }

    /// Create a roller support (X translation restrained only)
    pub fn roller_x() -> Self {
        Self::with_restraints(true, false, false)
    }

    /// Create a support with specific restraints
    pub fn with_restraints(dx: bool, dy: bool, rz: bool) -> Self {
        Self { dx, dy, rz }
    }

    /// Restraint flags as [DX, DY, RZ]
    pub fn as_array(&self) -> [bool; 3] {
        [self.dx, self.dy, self.rz]
    }

    /// Get list of restrained local DOF indices (0-2)
    pub fn restrained_dofs(&self) -> Vec<usize> {
        self.as_array()
            .iter()
            .enumerate()
            .filter_map(|(i, &r)| r.then_some(i))
            .collect()
    }

    /// Global DOF indices restrained by this support at `node`
    pub fn global_dofs(&self, node: NodeId) -> Vec<usize> {
        let dofs = node.dofs();
        self.restrained_dofs().into_iter().map(|i| dofs[i]).collect()
    }

    /// Count number of restrained DOFs
    pub fn num_restrained(&self) -> usize {
        self.restrained_dofs().len()
    }
}
