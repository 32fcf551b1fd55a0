//! Error types for the frame solver

use thiserror::Error;

/// Main error type for frame analysis operations
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("Node {node} not found: the model has {num_nodes} nodes")]
    NodeNotFound { node: usize, num_nodes: usize },

    #[error("Zero-length element between nodes {node1} and {node2}")]
    ZeroLength { node1: usize, node2: usize },

    #[error("Invalid element properties: {0}")]
    InvalidProperties(String),

    /// Wraps a failure raised while processing a single element.
    #[error("Element {element}: {source}")]
    Element {
        element: usize,
        #[source]
        source: Box<FrameError>,
    },

    #[error("Restrained DOF {dof} is outside the valid range 0..{num_dofs}")]
    RestraintOutOfRange { dof: usize, num_dofs: usize },

    #[error("Singular stiffness matrix - model may be unstable or have insufficient supports")]
    SingularMatrix,

    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Math error: {0}")]
    MathError(String),
}

impl FrameError {
    /// Attach the index of the element that caused this error
    pub fn in_element(self, element: usize) -> Self {
        match self {
            already @ FrameError::Element { .. } => already,
            other => FrameError::Element {
                element,
                source: Box::new(other),
            },
        }
    }

    /// The innermost error, looking through element wrappers
    pub fn root(&self) -> &FrameError {
        match self {
            FrameError::Element { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result type for frame analysis operations
pub type FrameResult<T> = Result<T, FrameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_wrapping() {
        let err = FrameError::ZeroLength { node1: 0, node2: 1 }.in_element(3);
        match &err {
            FrameError::Element { element, .. } => assert_eq!(*element, 3),
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(err.root(), FrameError::ZeroLength { .. }));

        // Wrapping twice keeps the original element index
        let err = err.in_element(7);
        assert!(matches!(err, FrameError::Element { element: 3, .. }));
    }

    #[test]
    fn test_error_messages() {
        let err = FrameError::RestraintOutOfRange { dof: 9, num_dofs: 6 };
        assert_eq!(
            err.to_string(),
            "Restrained DOF 9 is outside the valid range 0..6"
        );
    }
}
