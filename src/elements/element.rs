//! Frame element - 2D beam-column connecting two nodes

use serde::{Deserialize, Serialize};

use super::node::{Node, NodeId};
use crate::error::{FrameError, FrameResult};

/// Members shorter than this are treated as zero-length
pub const LENGTH_TOLERANCE: f64 = 1e-10;

/// Bending-moment releases at the two ends of an element
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndReleases {
    /// Moment released at node1
    pub start: bool,
    /// Moment released at node2
    pub end: bool,
}

impl EndReleases {
    /// Both ends continuous
    pub fn none() -> Self {
        Self::default()
    }

    /// Hinge at node1
    pub fn pin_start() -> Self {
        Self {
            start: true,
            end: false,
        }
    }

    /// Hinge at node2
    pub fn pin_end() -> Self {
        Self {
            start: false,
            end: true,
        }
    }

    /// Hinges at both ends
    pub fn pin_both() -> Self {
        Self {
            start: true,
            end: true,
        }
    }

    /// Released flags for the local DOFs [u1, v1, θ1, u2, v2, θ2]
    pub fn as_array(&self) -> [bool; 6] {
        [false, false, self.start, false, false, self.end]
    }

    /// True if either end is released
    pub fn any(&self) -> bool {
        self.start || self.end
    }
}

/// Length and direction cosines of an element, derived from its nodes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementGeometry {
    pub length: f64,
    /// Δx / L
    pub cos: f64,
    /// Δy / L
    pub sin: f64,
}

impl ElementGeometry {
    /// Geometry of the segment from `i` to `j`
    pub fn between(i: &Node, j: &Node) -> Option<Self> {
        let dx = j.x - i.x;
        let dy = j.y - i.y;
        let length = dx.hypot(dy);
        if !length.is_finite() || length < LENGTH_TOLERANCE {
            return None;
        }
        Some(Self {
            length,
            cos: dx / length,
            sin: dy / length,
        })
    }
}

/// A 2D frame element (beam or column)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameElement {
    /// Start node
    pub node1: NodeId,
    /// End node
    pub node2: NodeId,
    /// Modulus of elasticity
    pub e: f64,
    /// Cross-sectional area
    pub a: f64,
    /// Second moment of area
    pub i: f64,
    /// End moment releases
    pub releases: EndReleases,
}

impl FrameElement {
    /// Create a new element with both ends continuous
    pub fn new(node1: impl Into<NodeId>, node2: impl Into<NodeId>, e: f64, a: f64, i: f64) -> Self {
        Self {
            node1: node1.into(),
            node2: node2.into(),
            e,
            a,
            i,
            releases: EndReleases::none(),
        }
    }

    /// Set end releases
    pub fn with_releases(mut self, releases: EndReleases) -> Self {
        self.releases = releases;
        self
    }

    /// Global DOF indices of both ends: [u1, v1, θ1, u2, v2, θ2]
    pub fn dof_map(&self) -> [usize; 6] {
        let [a, b, c] = self.node1.dofs();
        let [d, e, f] = self.node2.dofs();
        [a, b, c, d, e, f]
    }

    /// Look up both end nodes, failing on a dangling reference
    pub fn end_nodes<'a>(&self, nodes: &'a [Node]) -> FrameResult<(&'a Node, &'a Node)> {
        let lookup = |id: NodeId| {
            nodes.get(id.index()).ok_or(FrameError::NodeNotFound {
                node: id.index(),
                num_nodes: nodes.len(),
            })
        };
        Ok((lookup(self.node1)?, lookup(self.node2)?))
    }

    /// Check section properties
    pub fn validate_properties(&self) -> FrameResult<()> {
        for (name, value) in [("E", self.e), ("A", self.a), ("I", self.i)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(FrameError::InvalidProperties(format!(
                    "{name} must be positive and finite (received {value})"
                )));
            }
        }
        Ok(())
    }

    /// Validate the element against the node list and derive its geometry
    pub fn geometry(&self, nodes: &[Node]) -> FrameResult<ElementGeometry> {
        self.validate_properties()?;
        if self.node1 == self.node2 {
            return Err(FrameError::ZeroLength {
                node1: self.node1.index(),
                node2: self.node2.index(),
            });
        }
        let (i, j) = self.end_nodes(nodes)?;
        for (id, node) in [(self.node1, i), (self.node2, j)] {
            if !node.is_finite() {
                return Err(FrameError::InvalidInput(format!(
                    "node {} has non-finite coordinates ({}, {})",
                    id.index(),
                    node.x,
                    node.y
                )));
            }
        }
        ElementGeometry::between(i, j).ok_or(FrameError::ZeroLength {
            node1: self.node1.index(),
            node2: self.node2.index(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes() -> Vec<Node> {
        vec![Node::new(0.0, 0.0), Node::new(3.0, 4.0), Node::new(0.0, 0.0)]
    }

    #[test]
    fn test_element_creation() {
        let element = FrameElement::new(0, 1, 29000.0, 10.0, 100.0);
        assert_eq!(element.node1, NodeId(0));
        assert_eq!(element.node2, NodeId(1));
        assert_eq!(element.releases, EndReleases::none());
        assert_eq!(element.dof_map(), [0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_geometry() {
        let g = FrameElement::new(0, 1, 1.0, 1.0, 1.0).geometry(&nodes()).unwrap();
        assert!((g.length - 5.0).abs() < 1e-12);
        assert!((g.cos - 0.6).abs() < 1e-12);
        assert!((g.sin - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_coincident_nodes_rejected() {
        // Distinct node ids at the same coordinates
        let err = FrameElement::new(0, 2, 1.0, 1.0, 1.0).geometry(&nodes()).unwrap_err();
        assert!(matches!(err, FrameError::ZeroLength { node1: 0, node2: 2 }));

        let err = FrameElement::new(1, 1, 1.0, 1.0, 1.0).geometry(&nodes()).unwrap_err();
        assert!(matches!(err, FrameError::ZeroLength { .. }));
    }

    #[test]
    fn test_dangling_node_rejected() {
        let err = FrameElement::new(0, 5, 1.0, 1.0, 1.0).geometry(&nodes()).unwrap_err();
        assert!(matches!(err, FrameError::NodeNotFound { node: 5, num_nodes: 3 }));
    }

    #[test]
    fn test_non_finite_coordinates_rejected() {
        let nodes = vec![Node::new(0.0, 0.0), Node::new(f64::NAN, 4.0)];
        let err = FrameElement::new(0, 1, 1.0, 1.0, 1.0).geometry(&nodes).unwrap_err();
        assert!(matches!(err, FrameError::InvalidInput(_)));

        let nodes = vec![Node::new(f64::INFINITY, 0.0), Node::new(1.0, 0.0)];
        let err = FrameElement::new(0, 1, 1.0, 1.0, 1.0).geometry(&nodes).unwrap_err();
        assert!(matches!(err, FrameError::InvalidInput(_)));
    }

    #[test]
    fn test_invalid_properties_rejected() {
        let err = FrameElement::new(0, 1, 0.0, 1.0, 1.0).geometry(&nodes()).unwrap_err();
        assert!(matches!(err, FrameError::InvalidProperties(_)));
        let err = FrameElement::new(0, 1, 1.0, 1.0, f64::NAN).geometry(&nodes()).unwrap_err();
        assert!(matches!(err, FrameError::InvalidProperties(_)));
    }

    #[test]
    fn test_releases() {
        let arr = EndReleases::pin_start().as_array();
        assert!(arr[2]);
        assert!(!arr[5]);
        assert!(EndReleases::pin_both().as_array()[5]);
        assert!(!EndReleases::none().any());
    }
}
