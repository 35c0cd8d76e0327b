use super::ids::{EdgeId, VertexId};
use serde::{Deserialize, Serialize};

/// A directed edge from `from` to `to`. Edge ids are assigned write-once by
/// [`super::graph::Graph::insert_edge`]; a freshly constructed `Edge` is
/// unassigned ([`EdgeId::UNASSIGNED`]) until it is inserted into a graph.
///
/// `weight` is kept at `0.0` throughout this system — routing cost is drawn
/// from `EdgeAttributes`, not from the graph itself — but the field is
/// still validated on insertion so a non-negative, non-NaN weight value is
/// always recoverable from the topology alone.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct Edge {
    pub edge_id: EdgeId,
    pub from: VertexId,
    pub to: VertexId,
    pub weight: f64,
}

impl Edge {
    /// Construct an edge not yet assigned to any graph.
    pub fn new(from: VertexId, to: VertexId, weight: f64) -> Self {
        Self {
            edge_id: EdgeId::UNASSIGNED,
            from,
            to,
            weight,
        }
    }

    pub fn edge_id(&self) -> EdgeId {
        self.edge_id
    }

    pub fn first_end(&self) -> VertexId {
        self.from
    }

    pub fn other_end(&self) -> VertexId {
        self.to
    }
}
