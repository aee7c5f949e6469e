//! Directed multigraph container and peripheral graph algorithms.
//!
//! The subgraph solver only needs the read-only [`GraphView`] interface. The
//! concrete [`Graph`] container, the edge-list loader and the algorithms in
//! [`algorithm`] are provided so the solver can be driven end to end.

pub mod algorithm;
mod edge_list;
mod error;
mod graph;
mod view;

pub use edge_list::{MAX_VERTEX_COUNT, parse_edge_list};
pub use error::GraphError;
pub use graph::{Edge, Graph, Vertex};
pub use view::GraphView;

pub use csi_common::{EdgeId, VertexId};
