//! Node - a joint in the 2D plane

use serde::{Deserialize, Serialize};

/// Position of a node in the model's ordered node list
///
/// Nodes are identified by position, never by coordinates: two nodes at the
/// same point are distinct nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Index into the node list
    pub fn index(self) -> usize {
        self.0
    }

    /// Global DOF indices owned by this node: [DX, DY, RZ]
    pub fn dofs(self) -> [usize; 3] {
        let base = self.0 * 3;
        [base, base + 1, base + 2]
    }
}

impl From<usize> for NodeId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// A node in the 2D frame model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Node {
    /// Create a new node at the given coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// True if both coordinates are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}
