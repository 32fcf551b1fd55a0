//! Structural elements module

mod element;
mod node;
mod support;

pub use element::{ElementGeometry, EndReleases, FrameElement, LENGTH_TOLERANCE};
pub use node::{Node, NodeId};
pub use support::Support;
