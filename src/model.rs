//! Frame model - node arena, elements, supports and loads

use std::collections::BTreeMap;

use crate::analysis::AnalysisOptions;
use crate::assembly;
use crate::elements::{FrameElement, Node, NodeId, Support};
use crate::error::{FrameError, FrameResult};
use crate::loads::{self, NodeLoad};
use crate::math::{Mat, Vec as FEVec, Vec6};
use crate::recovery;
use crate::results::{
    AnalysisResults, AnalysisSummary, EquilibriumCheck, NodeDisplacement, Reactions,
};
use crate::solver;

/// A 2D frame model
///
/// Nodes live in an ordered arena and are referenced by [`NodeId`]. The model
/// is never modified by analysis; [`FrameModel::analyze`] returns a fresh
/// [`AnalysisResults`] each time.
#[derive(Debug, Clone, Default)]
pub struct FrameModel {
    /// Nodes in the model, in DOF order
    pub nodes: Vec<Node>,
    /// Frame elements
    pub elements: Vec<FrameElement>,
    /// Support conditions at nodes
    pub supports: BTreeMap<NodeId, Support>,
    /// Node loads
    pub node_loads: Vec<(NodeId, NodeLoad)>,
}

impl FrameModel {
    /// Create a new empty model
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // Model Building Methods
    // ========================

    /// Add a node to the model
    pub fn add_node(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    fn check_node(&self, node: NodeId) -> FrameResult<()> {
        if node.index() < self.nodes.len() {
            Ok(())
        } else {
            Err(FrameError::NodeNotFound {
                node: node.index(),
                num_nodes: self.nodes.len(),
            })
        }
    }

    /// Add an element to the model, returning its index
    ///
    /// The element is validated against the current nodes.
    pub fn add_element(&mut self, element: FrameElement) -> FrameResult<usize> {
        let index = self.elements.len();
        element
            .geometry(&self.nodes)
            .map_err(|e| e.in_element(index))?;
        self.elements.push(element);
        Ok(index)
    }

    /// Add a support condition, replacing any previous one at the node
    pub fn add_support(&mut self, node: NodeId, support: Support) -> FrameResult<()> {
        self.check_node(node)?;
        self.supports.insert(node, support);
        Ok(())
    }

    /// Add a node load
    pub fn add_node_load(&mut self, node: NodeId, load: NodeLoad) -> FrameResult<()> {
        self.check_node(node)?;
        self.node_loads.push((node, load));
        Ok(())
    }

    // ========================
    // System Building Methods
    // ========================

    /// Total number of DOFs
    pub fn num_dofs(&self) -> usize {
        self.nodes.len() * 3
    }

    /// Global indices of all restrained DOFs, ascending
    pub fn restrained_dofs(&self) -> Vec<usize> {
        self.supports
            .iter()
            .flat_map(|(&node, support)| support.global_dofs(node))
            .collect()
    }

    /// Global load vector
    pub fn load_vector(&self) -> FrameResult<FEVec> {
        loads::build_load_vector(self.nodes.len(), &self.node_loads)
    }

    /// Global stiffness matrix
    pub fn stiffness_matrix(&self, options: &AnalysisOptions) -> FrameResult<Mat> {
        assembly::assemble_global_stiffness(&self.elements, &self.nodes, options)
    }

    // ========================
    // Analysis Methods
    // ========================

    /// Run linear static analysis with default options
    pub fn analyze_linear(&self) -> FrameResult<AnalysisResults> {
        self.analyze(&AnalysisOptions::linear())
    }

    /// Run analysis with custom options
    pub fn analyze(&self, options: &AnalysisOptions) -> FrameResult<AnalysisResults> {
        let k = self.stiffness_matrix(options)?;
        let f = self.load_vector()?;
        let restrained = self.restrained_dofs();

        let u = solver::solve(&k, &f, &restrained, options)?;
        let end_forces =
            recovery::all_end_forces(&self.elements, &u, &self.nodes, options.release_model)?;
        let reactions = solver::support_reactions(&k, &u, &f, &restrained)?;

        let equilibrium = self.equilibrium(&f, &reactions);
        if options.check_statics && !equilibrium.is_balanced(options.statics_tolerance) {
            log::warn!(
                "static equilibrium residual {:.3e} exceeds tolerance {:.1e} (ΣFx={:.4e}, ΣFy={:.4e}, ΣMz={:.4e})",
                equilibrium.relative_residual(),
                options.statics_tolerance,
                equilibrium.sum_fx,
                equilibrium.sum_fy,
                equilibrium.sum_mz,
            );
        }

        let summary = self.summary(&u, &reactions, &end_forces, restrained.len());
        log::info!(
            "analysis complete: {} nodes, {} elements, {} free DOFs, max displacement {:.4e}",
            summary.num_nodes,
            summary.num_members,
            summary.free_dofs,
            summary.max_displacement
        );

        Ok(AnalysisResults {
            displacements: u.iter().copied().collect(),
            reactions: reactions.iter().copied().collect(),
            end_forces: end_forces
                .iter()
                .map(|f| std::array::from_fn(|i| f[i]))
                .collect(),
            equilibrium,
            summary,
        })
    }

    /// Sum applied loads and reactions over the whole structure
    fn equilibrium(&self, f: &FEVec, reactions: &FEVec) -> EquilibriumCheck {
        let mut check = EquilibriumCheck::default();
        let mut max_component = 0.0_f64;
        let mut extent = 0.0_f64;

        for (index, node) in self.nodes.iter().enumerate() {
            let [a, b, c] = NodeId(index).dofs();
            let fx = f[a] + reactions[a];
            let fy = f[b] + reactions[b];
            let mz = f[c] + reactions[c];

            check.sum_fx += fx;
            check.sum_fy += fy;
            check.sum_mz += mz + node.x * fy - node.y * fx;

            for dof in [a, b, c] {
                max_component = max_component.max(f[dof].abs()).max(reactions[dof].abs());
            }
            extent = extent.max(node.x.abs()).max(node.y.abs());
        }

        check.reference = max_component * (1.0 + extent);
        check
    }

    fn summary(
        &self,
        u: &FEVec,
        reactions: &FEVec,
        end_forces: &[Vec6],
        num_restrained: usize,
    ) -> AnalysisSummary {
        let mut summary = AnalysisSummary {
            num_nodes: self.nodes.len(),
            num_members: self.elements.len(),
            total_dofs: self.num_dofs(),
            free_dofs: self.num_dofs() - num_restrained,
            ..Default::default()
        };

        for index in 0..self.nodes.len() {
            let [a, b, c] = NodeId(index).dofs();

            let mag = NodeDisplacement::from_array([u[a], u[b], u[c]]).translation_magnitude();
            if mag > summary.max_displacement {
                summary.max_displacement = mag;
                summary.max_disp_node = index;
            }

            let mag = Reactions::from_array([reactions[a], reactions[b], reactions[c]])
                .force_magnitude();
            if mag > summary.max_reaction {
                summary.max_reaction = mag;
                summary.max_reaction_node = index;
            }
        }

        for (index, forces) in end_forces.iter().enumerate() {
            let axial = forces[0].abs();
            if axial > summary.max_axial {
                summary.max_axial = axial;
                summary.max_axial_member = index;
            }

            let moment = forces[2].abs().max(forces[5].abs());
            if moment > summary.max_moment {
                summary.max_moment = moment;
                summary.max_moment_member = index;
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_simple_cantilever() {
        let mut model = FrameModel::new();

        // 10 m cantilever
        let n1 = model.add_node(Node::new(0.0, 0.0));
        let n2 = model.add_node(Node::new(10.0, 0.0));

        model
            .add_element(FrameElement::new(n1, n2, 200e9, 0.15, 3.125e-3))
            .unwrap();
        model.add_support(n1, Support::fixed()).unwrap();

        // 10 kN downward at n2
        model.add_node_load(n2, NodeLoad::fy(-10000.0)).unwrap();

        let results = model.analyze_linear().unwrap();

        let disp = results.node_displacement(n2).unwrap();
        assert!(disp.dy < 0.0, "Expected negative Y displacement");

        let rxn = results.node_reactions(n1).unwrap();
        assert_relative_eq!(rxn.fy, 10000.0, epsilon = 1e-6);
        assert_relative_eq!(rxn.mz, 100000.0, epsilon = 1e-4);
        assert!(results.equilibrium.is_balanced(1e-9));

        let summary = &results.summary;
        assert_eq!(summary.max_disp_node, 1);
        assert_relative_eq!(summary.max_displacement, disp.translation_magnitude());
        assert_eq!(summary.max_reaction_node, 0);
        assert_relative_eq!(summary.max_reaction, rxn.force_magnitude());
        assert_relative_eq!(summary.max_reaction, 10000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_restrained_dofs() {
        let mut model = FrameModel::new();
        let n1 = model.add_node(Node::new(0.0, 0.0));
        let n2 = model.add_node(Node::new(4.0, 0.0));
        let n3 = model.add_node(Node::new(8.0, 0.0));
        model.add_support(n3, Support::roller_y()).unwrap();
        model.add_support(n1, Support::pinned()).unwrap();
        assert_eq!(model.restrained_dofs(), vec![0, 1, 7]);
        assert!(model.add_support(NodeId(3), Support::fixed()).is_err());
        assert!(model.add_node_load(n2, NodeLoad::fy(-1.0)).is_ok());
    }

    #[test]
    fn test_add_element_validates() {
        let mut model = FrameModel::new();
        let n1 = model.add_node(Node::new(1.0, 1.0));
        let n2 = model.add_node(Node::new(1.0, 1.0));

        let err = model
            .add_element(FrameElement::new(n1, n2, 1.0, 1.0, 1.0))
            .unwrap_err();
        assert!(matches!(err.root(), FrameError::ZeroLength { .. }));
        assert!(model.elements.is_empty());
    }

    #[test]
    fn test_unsupported_model_fails() {
        let mut model = FrameModel::new();
        let n1 = model.add_node(Node::new(0.0, 0.0));
        let n2 = model.add_node(Node::new(5.0, 0.0));
        model
            .add_element(FrameElement::new(n1, n2, 200e9, 0.01, 1e-4))
            .unwrap();
        model.add_node_load(n2, NodeLoad::fx(1.0)).unwrap();

        let err = model.analyze_linear().unwrap_err();
        assert!(matches!(err, FrameError::SingularMatrix));
    }
}
