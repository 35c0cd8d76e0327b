use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Dense vertex index in `0..V`. Assigned by the compiler; stable for the
/// lifetime of a compiled network.
#[derive(Copy, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct VertexId(pub usize);

impl Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl VertexId {
    pub fn as_usize(&self) -> usize {
        self.0
    }
}

/// Dense edge index in `0..E`, assigned sequentially at insertion time.
///
/// Backed by `i64` rather than `usize` so an edge not yet assigned to a
/// graph can carry the sentinel [`EdgeId::UNASSIGNED`] (`-1`), per the
/// write-once id lifecycle.
#[derive(Copy, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct EdgeId(pub i64);

impl Default for EdgeId {
    fn default() -> Self {
        EdgeId::UNASSIGNED
    }
}

impl Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl EdgeId {
    /// Sentinel carried by an [`crate::model::edge::Edge`] that has not yet
    /// been assigned into a [`crate::model::graph::Graph`], and by
    /// `parentEdge` entries for the search source vertex.
    pub const UNASSIGNED: EdgeId = EdgeId(-1);

    pub fn is_assigned(&self) -> bool {
        self.0 >= 0
    }

    /// Panics-free conversion for indexing; returns `None` for the sentinel.
    pub fn as_usize(&self) -> Option<usize> {
        if self.0 < 0 {
            None
        } else {
            Some(self.0 as usize)
        }
    }
}
