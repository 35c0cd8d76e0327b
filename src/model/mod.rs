pub mod attributes;
pub mod edge;
pub mod geometry;
pub mod graph;
pub mod graph_error;
pub mod ids;
pub mod route;
pub mod vertex;
pub mod vertex_store;

pub use attributes::EdgeAttributes;
pub use edge::Edge;
pub use geometry::EdgeGeometry;
pub use graph::Graph;
pub use graph_error::GraphError;
pub use ids::{EdgeId, VertexId};
pub use route::{Algorithm, Metric, Route, SegmentSnapResult};
pub use vertex::Vertex;
pub use vertex_store::VertexStore;
