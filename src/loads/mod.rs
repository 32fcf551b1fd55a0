//! Nodal loads and the global load vector

mod node_load;

pub use node_load::NodeLoad;

use crate::elements::NodeId;
use crate::error::{FrameError, FrameResult};
use crate::math::Vec as FEVec;

/// Build the global load vector of length `3 * num_nodes`
///
/// Several loads on the same node are summed.
pub fn build_load_vector(num_nodes: usize, loads: &[(NodeId, NodeLoad)]) -> FrameResult<FEVec> {
    let mut f = FEVec::zeros(num_nodes * 3);
    for (node, load) in loads {
        if node.index() >= num_nodes {
            return Err(FrameError::NodeNotFound {
                node: node.index(),
                num_nodes,
            });
        }
        for (dof, value) in node.dofs().into_iter().zip(load.as_array()) {
            f[dof] += value;
        }
    }
    Ok(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_vector() {
        let loads = [
            (NodeId(1), NodeLoad::fy(-100.0)),
            (NodeId(1), NodeLoad::moment(20.0)),
            (NodeId(0), NodeLoad::fx(5.0)),
        ];
        let f = build_load_vector(2, &loads).unwrap();
        assert_eq!(f.len(), 6);
        assert_eq!(f.as_slice(), &[5.0, 0.0, 0.0, 0.0, -100.0, 20.0]);
    }

    #[test]
    fn test_load_on_missing_node() {
        let err = build_load_vector(2, &[(NodeId(2), NodeLoad::fx(1.0))]).unwrap_err();
        assert!(matches!(err, FrameError::NodeNotFound { node: 2, num_nodes: 2 }));
    }
}
