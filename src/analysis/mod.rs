//! Analysis options

use serde::{Deserialize, Serialize};

/// How released member-end moments are represented in the local stiffness matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReleaseModel {
    /// Zero the moment-rotation terms at the released end.
    ///
    /// Axial and shear terms are left untouched. The resulting matrix can be
    /// indefinite or rank-deficient, and end forces are recovered with the
    /// unreleased matrix, so the moment at a hinge is only approximately zero.
    #[default]
    Zeroing,
    /// Statically condense the released rotational DOFs out of the matrix.
    ///
    /// The released rows and columns become zero and the remaining terms are
    /// reduced exactly (`k11 - k12 * inv(k22) * k21`). Recovered moments at
    /// released ends are exactly zero.
    Condensation,
}

/// Options for a frame analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Treatment of member end releases
    pub release_model: ReleaseModel,
    /// Smallest accepted ratio between the smallest and largest LU pivot of the
    /// reduced stiffness matrix
    pub singularity_tolerance: f64,
    /// Check static equilibrium after analysis
    pub check_statics: bool,
    /// Relative tolerance for the equilibrium check
    pub statics_tolerance: f64,
    /// Assemble element contributions in parallel (needs the `parallel` feature)
    pub parallel: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            release_model: ReleaseModel::Zeroing,
            singularity_tolerance: 1e-12,
            check_statics: true,
            statics_tolerance: 1e-6,
            parallel: false,
        }
    }
}

impl AnalysisOptions {
    /// Create options for linear analysis
    pub fn linear() -> Self {
        Self::default()
    }

    /// Set the release model
    pub fn with_release_model(mut self, release_model: ReleaseModel) -> Self {
        self.release_model = release_model;
        self
    }

    /// Use static condensation for end releases
    pub fn with_condensation(self) -> Self {
        self.with_release_model(ReleaseModel::Condensation)
    }

    /// Set the near-singularity pivot ratio
    pub fn with_singularity_tolerance(mut self, tol: f64) -> Self {
        self.singularity_tolerance = tol;
        self
    }

    /// Enable or disable the equilibrium check
    pub fn with_statics_check(mut self, check: bool) -> Self {
        self.check_statics = check;
        self
    }

    /// Request parallel assembly
    pub fn with_parallel(mut self) -> Self {
        self.parallel = true;
        self
    }
}
