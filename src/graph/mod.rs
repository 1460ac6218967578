mod edge;
pub mod geometry;
mod node;
pub mod topology;

pub use edge::{Edge, EdgeKind, EdgeSet, NetworkEdge};
pub use geometry::build_nodes;
pub use node::{Node, NodeId, NodeSeed};
pub use topology::build_edges;
