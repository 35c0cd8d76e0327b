use super::ids::{EdgeId, VertexId};

/// A shortest-path metric. The search cost function is a lookup into
/// `EdgeAttributes`, never a derived quantity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Metric {
    Distance,
    Time,
}

/// Which search algorithm produced a [`Route`]. Both report the same
/// optimal cost for admissible heuristics; this is recorded for
/// observability, not because callers should branch on it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Dijkstra,
    AStar,
}

/// An immutable search result. `edge_ids` is in traversal order and empty
/// iff `start_vertex == goal_vertex`. `found == false` carries
/// `total_cost == f64::INFINITY` and an empty edge sequence.
#[derive(Debug, Clone)]
pub struct Route {
    pub found: bool,
    pub start_vertex: VertexId,
    pub goal_vertex: VertexId,
    pub metric: Metric,
    pub algorithm: Algorithm,
    pub total_cost: f64,
    pub edge_ids: Vec<EdgeId>,
}

impl Route {
    pub fn unreachable(start: VertexId, goal: VertexId, metric: Metric, algorithm: Algorithm) -> Self {
        Self {
            found: false,
            start_vertex: start,
            goal_vertex: goal,
            metric,
            algorithm,
            total_cost: f64::INFINITY,
            edge_ids: Vec::new(),
        }
    }

    pub fn trivial(vertex: VertexId, metric: Metric, algorithm: Algorithm) -> Self {
        Self {
            found: true,
            start_vertex: vertex,
            goal_vertex: vertex,
            metric,
            algorithm,
            total_cost: 0.0,
            edge_ids: Vec::new(),
        }
    }
}

/// Result of snapping a free-form point onto the road network: the matched
/// edge, its endpoints, the whole-edge arc-length parameter `t` (0 at
/// `from_vertex`, 1 at `to_vertex` — *not* the local segment parameter),
/// and the perpendicular distance in meters from the query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentSnapResult {
    pub edge_id: EdgeId,
    pub from_vertex: VertexId,
    pub to_vertex: VertexId,
    pub t: f64,
    pub distance_meters: f64,
}
