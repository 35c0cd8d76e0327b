//! `RoutingEngine`: the façade tying compilation, spatial snapping,
//! shortest-path search, reconstruction, and instruction generation
//! together, per `spec.md` §4.7. Mirrors the teacher's top-level
//! application-search entry point in shape — build once from a data
//! source, then answer many point-to-point queries — though this crate
//! exposes it as a library type rather than a CLI/HTTP binary (those are
//! external collaborators per `spec.md` §6).

use crate::compiler::{compile, CompileError, CompiledNetwork, OsmSource};
use crate::config::{InstructionConfig, SnapConfig};
use crate::instructions::{self, Instruction, InstructionError};
use crate::model::{Algorithm, EdgeId, Metric, Route, SegmentSnapResult, VertexId};
use crate::reconstruction::{self, PartialEdge, ReconstructionError};
use crate::search::{self, SearchError};
use crate::spatial::{SegmentSnapper, SpatialError};
use crate::speed_table::SpeedTable;

#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    #[error("compile failure: {0}")]
    Compile(#[from] CompileError),
    #[error("spatial index failure: {0}")]
    Spatial(#[from] SpatialError),
    #[error("search failure: {0}")]
    Search(#[from] SearchError),
    #[error("reconstruction failure: {0}")]
    Reconstruction(#[from] ReconstructionError),
    #[error("instruction generation failure: {0}")]
    Instruction(#[from] InstructionError),
    #[error("edge attribute lookup failed: {0}")]
    Attribute(#[from] crate::model::attributes::AttributeError),
    #[error("no route exists between the given points")]
    QueryMiss,
}

/// The full answer to a point-to-point query: the underlying vertex-level
/// route, its reconstructed polyline (projected local-tangent-plane
/// meters), and its turn-by-turn instructions.
pub struct PointToPointRoute {
    pub route: Route,
    pub polyline: Vec<(f64, f64)>,
    pub instructions: Vec<Instruction>,
}

pub struct RoutingEngine {
    network: CompiledNetwork,
    snapper: SegmentSnapper,
    instruction_config: InstructionConfig,
    default_vmax_mps: f64,
}

impl RoutingEngine {
    /// Compile `source` into a routable network, fill in `timeSeconds` via
    /// the default [`SpeedTable`] (Open Question 9(a)), and build the
    /// spatial snap index. `default_vmax_mps` used by A* under
    /// [`Metric::Time`] is the fastest speed in the table (Open Question
    /// 9(b)) unless overridden with [`RoutingEngine::with_vmax`].
    pub fn build(
        source: &dyn OsmSource,
        snap_config: SnapConfig,
        instruction_config: InstructionConfig,
    ) -> Result<Self, EngineError> {
        let mut network = compile(source)?;
        let speed_table = SpeedTable::default();
        network.fill_times(&speed_table);
        let snapper = SegmentSnapper::build(&network.graph, &network.geometry, snap_config)?;
        let default_vmax_mps = speed_table.max_speed_mps();

        Ok(Self {
            network,
            snapper,
            instruction_config,
            default_vmax_mps,
        })
    }

    pub fn with_vmax(mut self, vmax_mps: f64) -> Self {
        self.default_vmax_mps = vmax_mps;
        self
    }

    pub fn network(&self) -> &CompiledNetwork {
        &self.network
    }

    /// Shortest path between two already-known vertices — the four named
    /// algorithm x metric combinations from `spec.md` §4.6 all flow
    /// through this one entry point.
    pub fn route_between_vertices(
        &self,
        start: VertexId,
        goal: VertexId,
        metric: Metric,
        algorithm: Algorithm,
    ) -> Result<Route, EngineError> {
        Ok(search::shortest_path(
            &self.network.graph,
            &self.network.attributes,
            Some(&self.network.vertex_store),
            metric,
            algorithm,
            start,
            goal,
            self.default_vmax_mps,
        )?)
    }

    /// Snap two free-form WGS84 points onto the network and find the best
    /// route between them, per `spec.md` §4.7: same-edge short circuit
    /// when both points land forward of one another on the same edge,
    /// otherwise the 2x2 enumeration over each snap's two candidate
    /// endpoint vertices, each combination priced as
    /// partial-edge-to-vertex + graph-shortest-path + vertex-to-partial-edge.
    pub fn route_between_points(
        &self,
        start_lat: f64,
        start_lon: f64,
        goal_lat: f64,
        goal_lon: f64,
        metric: Metric,
        algorithm: Algorithm,
    ) -> Result<PointToPointRoute, EngineError> {
        let (sx, sy) = self.network.projection.forward(start_lat, start_lon);
        let (gx, gy) = self.network.projection.forward(goal_lat, goal_lon);
        let start_snap = self.snapper.snap(&self.network.graph, &self.network.geometry, sx, sy)?;
        let goal_snap = self.snapper.snap(&self.network.graph, &self.network.geometry, gx, gy)?;

        if start_snap.edge_id == goal_snap.edge_id && start_snap.t <= goal_snap.t {
            return self.same_edge_route(start_snap, goal_snap, metric, algorithm);
        }

        self.multi_endpoint_route(start_snap, goal_snap, metric, algorithm)
    }

    fn edge_cost(&self, edge_id: EdgeId, metric: Metric) -> Result<f64, EngineError> {
        Ok(match metric {
            Metric::Distance => self.network.attributes.distance_meters(edge_id)?,
            Metric::Time => self.network.attributes.time_seconds(edge_id)?,
        })
    }

    /// Both query points snapped onto the same edge, with the start at or
    /// before the goal along that edge's own direction: no graph search
    /// needed, just the sub-edge between the two snap parameters.
    fn same_edge_route(
        &self,
        start_snap: SegmentSnapResult,
        goal_snap: SegmentSnapResult,
        metric: Metric,
        algorithm: Algorithm,
    ) -> Result<PointToPointRoute, EngineError> {
        let edge_total = self.edge_cost(start_snap.edge_id, metric)?;
        let total_cost = (goal_snap.t - start_snap.t) * edge_total;
        let polyline = reconstruction::extract_subedge(&self.network.geometry, start_snap.edge_id, start_snap.t, goal_snap.t)?;

        let route = Route {
            found: true,
            start_vertex: start_snap.from_vertex,
            goal_vertex: goal_snap.to_vertex,
            metric,
            algorithm,
            total_cost,
            edge_ids: Vec::new(),
        };

        Ok(PointToPointRoute {
            route,
            polyline,
            instructions: instructions::generate(&self.network.geometry, &self.network.attributes, &[], &self.instruction_config)?,
        })
    }

    fn partial_cost(&self, snap: &SegmentSnapResult, target: VertexId, metric: Metric) -> Result<f64, EngineError> {
        let total = self.edge_cost(snap.edge_id, metric)?;
        if target == snap.from_vertex {
            Ok(snap.t * total)
        } else {
            Ok((1.0 - snap.t) * total)
        }
    }

    fn multi_endpoint_route(
        &self,
        start_snap: SegmentSnapResult,
        goal_snap: SegmentSnapResult,
        metric: Metric,
        algorithm: Algorithm,
    ) -> Result<PointToPointRoute, EngineError> {
        let start_candidates = [start_snap.from_vertex, start_snap.to_vertex];
        let goal_candidates = [goal_snap.from_vertex, goal_snap.to_vertex];

        let mut best: Option<(f64, VertexId, VertexId, Route)> = None;

        for &sv in &start_candidates {
            for &gv in &goal_candidates {
                let route = search::shortest_path(
                    &self.network.graph,
                    &self.network.attributes,
                    Some(&self.network.vertex_store),
                    metric,
                    algorithm,
                    sv,
                    gv,
                    self.default_vmax_mps,
                )?;
                if !route.found {
                    continue;
                }
                let start_partial = self.partial_cost(&start_snap, sv, metric)?;
                let goal_partial = self.partial_cost(&goal_snap, gv, metric)?;
                let total = start_partial + route.total_cost + goal_partial;

                if best.as_ref().map(|(d, _, _, _)| total < *d).unwrap_or(true) {
                    best = Some((total, sv, gv, route));
                }
            }
        }

        let (total_cost, sv, gv, mut middle_route) = best.ok_or(EngineError::QueryMiss)?;

        let start_partial = partial_edge_toward(&start_snap, sv);
        let goal_partial = partial_edge_toward(&goal_snap, gv);

        let mut polyline = reconstruction::extract_subedge(&self.network.geometry, start_partial.edge_id, start_partial.t_start, start_partial.t_end)?;
        if sv == start_snap.from_vertex {
            polyline.reverse();
        }

        let middle_polyline = reconstruction::assemble_route(&self.network.geometry, &middle_route.edge_ids, None, None)?;
        append_without_duplicate(&mut polyline, middle_polyline);

        let mut goal_segment = reconstruction::extract_subedge(&self.network.geometry, goal_partial.edge_id, goal_partial.t_start, goal_partial.t_end)?;
        if gv == goal_snap.to_vertex {
            goal_segment.reverse();
        }
        append_without_duplicate(&mut polyline, goal_segment);

        let instrs = instructions::generate(&self.network.geometry, &self.network.attributes, &middle_route.edge_ids, &self.instruction_config)?;

        middle_route.total_cost = total_cost;
        Ok(PointToPointRoute {
            route: middle_route,
            polyline,
            instructions: instrs,
        })
    }
}

/// The `[0, 1]`-clamped whole-edge arc-length span between a snap point
/// and one of its edge's two endpoints, expressed in the edge's own
/// forward direction (`t_start <= t_end`); the caller reverses the
/// extracted points when actual travel runs the other way.
fn partial_edge_toward(snap: &SegmentSnapResult, target: VertexId) -> PartialEdge {
    if target == snap.from_vertex {
        PartialEdge {
            edge_id: snap.edge_id,
            t_start: 0.0,
            t_end: snap.t,
        }
    } else {
        PartialEdge {
            edge_id: snap.edge_id,
            t_start: snap.t,
            t_end: 1.0,
        }
    }
}

fn append_without_duplicate(dst: &mut Vec<(f64, f64)>, src: Vec<(f64, f64)>) {
    if dst.last() == src.first() {
        dst.extend(src.into_iter().skip(1));
    } else {
        dst.extend(src);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::{InMemoryOsmSource, OsmEvent};

    fn node(id: i64, lat: f64, lon: f64) -> OsmEvent {
        OsmEvent::Node { osm_id: id, lat, lon }
    }

    fn way(refs: &[i64], tags: &[(&str, &str)]) -> Vec<OsmEvent> {
        let mut events = vec![OsmEvent::WayStart];
        for &r in refs {
            events.push(OsmEvent::WayNodeRef { osm_id: r });
        }
        for &(k, v) in tags {
            events.push(OsmEvent::WayTag { key: k.to_string(), value: v.to_string() });
        }
        events.push(OsmEvent::WayEnd);
        events
    }

    fn triangle_source() -> InMemoryOsmSource {
        let mut events = vec![
            node(1, 0.0, 0.0),
            node(2, 0.0, 0.01),
            node(3, 0.01, 0.01),
        ];
        events.extend(way(&[1, 2], &[("highway", "residential")]));
        events.extend(way(&[2, 3], &[("highway", "residential")]));
        events.extend(way(&[1, 3], &[("highway", "residential")]));
        InMemoryOsmSource(events)
    }

    #[test]
    fn builds_and_routes_between_vertices() {
        let engine = RoutingEngine::build(&triangle_source(), SnapConfig::default(), InstructionConfig::default()).unwrap();
        let route = engine
            .route_between_vertices(VertexId(0), VertexId(2), Metric::Distance, Algorithm::Dijkstra)
            .unwrap();
        assert!(route.found);
    }

    #[test]
    fn same_vertex_vertex_query_is_trivial() {
        let engine = RoutingEngine::build(&triangle_source(), SnapConfig::default(), InstructionConfig::default()).unwrap();
        let route = engine
            .route_between_vertices(VertexId(1), VertexId(1), Metric::Distance, Algorithm::Dijkstra)
            .unwrap();
        assert!(route.found);
        assert_eq!(route.total_cost, 0.0);
    }

    #[test]
    fn point_to_point_query_produces_a_nonempty_polyline() {
        let engine = RoutingEngine::build(&triangle_source(), SnapConfig::default(), InstructionConfig::default()).unwrap();
        let result = engine
            .route_between_points(0.0, 0.0, 0.01, 0.01, Metric::Distance, Algorithm::AStar)
            .unwrap();
        assert!(result.route.found);
        assert!(!result.polyline.is_empty());
        assert!(!result.instructions.is_empty());
    }
}
