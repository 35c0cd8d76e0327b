//! Dijkstra and A* over a shared min-priority-queue primitive, per
//! `spec.md` §4.6. Both algorithms run the same relaxation loop; A*
//! differs only in adding an admissible heuristic (straight-line distance
//! to the goal, in the metric's own units) to the priority key.

use super::search_error::SearchError;
use crate::model::{Algorithm, EdgeAttributes, EdgeId, Graph, Metric, Route, VertexId, VertexStore};
use crate::util::priority_queue::MinPriorityQueue;
use std::collections::{HashMap, HashSet};

fn edge_cost(attributes: &EdgeAttributes, metric: Metric, edge_id: EdgeId) -> Result<f64, SearchError> {
    Ok(match metric {
        Metric::Distance => attributes.distance_meters(edge_id)?,
        Metric::Time => attributes.time_seconds(edge_id)?,
    })
}

/// Straight-line distance from `v` to `(goal_x, goal_y)`, in the metric's
/// units — meters for [`Metric::Distance`], seconds (divided by `vmax_mps`)
/// for [`Metric::Time`]. Admissible because no travel path can be shorter
/// than the straight line, and (for TIME) no edge can be faster than
/// `vmax_mps`. Coordinates come from the [`VertexStore`], per `spec.md`
/// §4.6's literal `x[v] - x[goal]`; only consulted for A*, since Dijkstra's
/// heuristic is always 0.
fn heuristic(vertices: &VertexStore, v: VertexId, goal_x: f64, goal_y: f64, metric: Metric, vmax_mps: f64) -> f64 {
    let (vx, vy) = vertices.xy(v).expect("VertexStore is sized to match the graph's vertex count");
    let straight_line = ((vx - goal_x).powi(2) + (vy - goal_y).powi(2)).sqrt();
    match metric {
        Metric::Distance => straight_line,
        Metric::Time => straight_line / vmax_mps,
    }
}

/// Find the optimal path from `start` to `goal` under `metric`, using
/// `algorithm`. `vertices` is required whenever `algorithm` is A* (its
/// absence is a precondition failure per `spec.md` §4.7) and unused by
/// Dijkstra. `vmax_mps` is only consulted by A* under [`Metric::Time`];
/// see Open Question 9(b) in `SPEC_FULL.md` for the default the engine
/// supplies.
pub fn shortest_path(
    graph: &Graph,
    attributes: &EdgeAttributes,
    vertices: Option<&VertexStore>,
    metric: Metric,
    algorithm: Algorithm,
    start: VertexId,
    goal: VertexId,
    vmax_mps: f64,
) -> Result<Route, SearchError> {
    if algorithm == Algorithm::AStar && vertices.is_none() {
        return Err(SearchError::MissingVertexStore);
    }
    if algorithm == Algorithm::AStar && metric == Metric::Time && vmax_mps <= 0.0 {
        return Err(SearchError::NonPositiveVmax(vmax_mps));
    }

    if start == goal {
        graph.get_vertex(start)?;
        return Ok(Route::trivial(start, metric, algorithm));
    }

    graph.get_vertex(start)?;
    graph.get_vertex(goal)?;

    let (goal_x, goal_y) = match (algorithm, vertices) {
        (Algorithm::AStar, Some(v)) => v.xy(goal).expect("VertexStore is sized to match the graph's vertex count"),
        _ => (0.0, 0.0),
    };
    let h = |v: VertexId| match (algorithm, vertices) {
        (Algorithm::AStar, Some(store)) => heuristic(store, v, goal_x, goal_y, metric, vmax_mps),
        _ => 0.0,
    };

    let mut dist: HashMap<VertexId, f64> = HashMap::new();
    let mut parent_edge: HashMap<VertexId, EdgeId> = HashMap::new();
    let mut closed: HashSet<VertexId> = HashSet::new();
    let mut frontier: MinPriorityQueue<VertexId> = MinPriorityQueue::default();

    dist.insert(start, 0.0);
    frontier.push(start, h(start));

    while let Some((u, _)) = frontier.pop() {
        if u == goal {
            break;
        }
        if !closed.insert(u) {
            continue;
        }
        let g_u = *dist.get(&u).unwrap_or(&f64::INFINITY);

        for &edge_id in graph.out_edges(u) {
            let edge = graph.edge_by_id(edge_id)?;
            let w = edge.to;
            if closed.contains(&w) {
                continue;
            }
            let cost = edge_cost(attributes, metric, edge_id)?;
            let g_w_candidate = g_u + cost;
            let improves = g_w_candidate < *dist.get(&w).unwrap_or(&f64::INFINITY);
            if improves {
                dist.insert(w, g_w_candidate);
                parent_edge.insert(w, edge_id);
                frontier.decrease_priority(w, g_w_candidate + h(w));
            }
        }
    }

    if !parent_edge.contains_key(&goal) {
        return Ok(Route::unreachable(start, goal, metric, algorithm));
    }

    let mut edge_ids = Vec::new();
    let mut cursor = goal;
    while cursor != start {
        let edge_id = *parent_edge
            .get(&cursor)
            .ok_or(SearchError::InconsistentParent(cursor))?;
        edge_ids.push(edge_id);
        cursor = graph.edge_by_id(edge_id)?.from;
    }
    edge_ids.reverse();

    log::debug!(
        "shortest_path: {:?}/{:?} {} -> {} cost={} edges={}",
        metric,
        algorithm,
        start,
        goal,
        dist[&goal],
        edge_ids.len()
    );

    Ok(Route {
        found: true,
        start_vertex: start,
        goal_vertex: goal,
        metric,
        algorithm,
        total_cost: dist[&goal],
        edge_ids,
    })
}
