//! Frame Solver - a 2D frame analysis kernel
//!
//! Linear static analysis of plane frames by the direct stiffness method:
//! - Local stiffness of Euler-Bernoulli beam-column elements, with optional
//!   end-moment releases (stiffness zeroing or static condensation)
//! - Local-to-global transformation and global stiffness assembly
//! - Restrained dense solve with explicit singularity detection
//! - Member end-force and support reaction recovery
//!
//! Nodes are identified by their position in an ordered node list; node `n`
//! owns global DOFs `[3n, 3n + 1, 3n + 2]` (X translation, Y translation, Z
//! rotation).
//!
//! ## Example
//! ```rust
//! use frame_solver::prelude::*;
//!
//! let mut model = FrameModel::new();
//!
//! // Add nodes
//! let n1 = model.add_node(Node::new(0.0, 0.0));
//! let n2 = model.add_node(Node::new(10.0, 0.0));
//!
//! // Add element: E, A, I
//! model.add_element(FrameElement::new(n1, n2, 29000.0, 10.0, 100.0)).unwrap();
//!
//! // Add supports
//! model.add_support(n1, Support::fixed()).unwrap();
//!
//! // Add loads
//! model.add_node_load(n2, NodeLoad::fy(-1.0)).unwrap();
//!
//! // Analyze
//! let results = model.analyze_linear().unwrap();
//!
//! // Get results
//! let displacement = results.node_displacement(n2).unwrap();
//! assert!(displacement.dy < 0.0);
//! ```
//!
//! The pipeline stages are also available as free functions in
//! [`assembly`], [`solver`] and [`recovery`].

pub mod analysis;
pub mod assembly;
pub mod elements;
pub mod error;
pub mod loads;
pub mod math;
pub mod model;
pub mod recovery;
pub mod results;
pub mod solver;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{AnalysisOptions, ReleaseModel};
    pub use crate::assembly::{
        assemble_global_stiffness, element_local_stiffness, element_transformation,
    };
    pub use crate::elements::{EndReleases, FrameElement, Node, NodeId, Support};
    pub use crate::error::{FrameError, FrameResult};
    pub use crate::loads::NodeLoad;
    pub use crate::model::FrameModel;
    pub use crate::recovery::element_end_forces;
    pub use crate::results::{
        AnalysisResults, AnalysisSummary, MemberForces, NodeDisplacement, Reactions,
    };
    pub use crate::solver::solve;
}
