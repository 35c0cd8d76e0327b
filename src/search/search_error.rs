use crate::model::attributes::AttributeError;
use crate::model::graph_error::GraphError;
use crate::model::VertexId;

/// Errors raised while computing a [`crate::model::Route`]. Per `spec.md`
/// §7, an out-of-range start/goal vertex is an *argument* error
/// ([`SearchError::Graph`]); a missing parent edge during reconstruction is
/// an internal-consistency *state* error — it means Dijkstra/A* relaxation
/// itself is broken, not that the caller did anything wrong.
#[derive(thiserror::Error, Debug)]
pub enum SearchError {
    #[error("vertex lookup failed: {0}")]
    Graph(#[from] GraphError),
    #[error("edge attribute lookup failed: {0}")]
    Attribute(#[from] AttributeError),
    #[error("no parent edge recorded for vertex {0} during path reconstruction")]
    InconsistentParent(VertexId),
    #[error("A* under the Time metric requires a strictly positive vmax_mps, got {0}")]
    NonPositiveVmax(f64),
    #[error("A* requires a VertexStore to evaluate its heuristic, none was given")]
    MissingVertexStore,
}
