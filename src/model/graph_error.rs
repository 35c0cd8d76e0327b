use super::ids::{EdgeId, VertexId};

/// Argument and state errors raised by [`super::graph::Graph`], per the
/// error taxonomy in the design notes: argument errors are precondition
/// violations surfaced to the caller, state errors are internal
/// inconsistencies that must never occur in a correctly operating engine.
#[derive(thiserror::Error, Debug)]
pub enum GraphError {
    #[error("vertex id {0} out of range [0, {1})")]
    VertexOutOfRange(VertexId, usize),
    #[error("edge weight must be non-negative and not NaN, got {0}")]
    InvalidWeight(f64),
    #[error("edge {0} is already assigned to a graph and cannot be inserted again")]
    EdgeAlreadyAssigned(EdgeId),
    #[error("edge id {0} not found, graph has {1} edges")]
    EdgeNotFound(EdgeId, usize),
    #[error("vertex id {0} not found, graph has {1} vertices")]
    VertexNotFound(VertexId, usize),
}
