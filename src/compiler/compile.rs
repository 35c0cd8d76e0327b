//! Three-pass OSM reduction into `(Graph, EdgeAttributes, EdgeGeometry,
//! VertexStore)`, per `spec.md` §4.4. Each pass consumes a fresh
//! [`OsmSource::events`] iterator; passes do not overlap.

use super::compiler_error::CompileError;
use super::highway::is_routable_highway;
use super::osm_events::{OsmEvent, OsmSource};
use crate::model::{EdgeAttributes, EdgeGeometry, Graph, Metric, Vertex, VertexStore};
use crate::projection::TangentPlaneProjection;
use crate::speed_table::SpeedTable;
use crate::util::geo::haversine_distance_meters;
use std::collections::HashMap;

/// The compiled, immutable triple (plus the local projection and a
/// per-edge highway-class lookup used by [`crate::speed_table::SpeedTable`]).
pub struct CompiledNetwork {
    pub graph: Graph,
    pub attributes: EdgeAttributes,
    pub geometry: EdgeGeometry,
    pub vertex_store: VertexStore,
    pub projection: TangentPlaneProjection,
    highway_by_edge: Vec<String>,
}

impl CompiledNetwork {
    pub fn highway_of(&self, edge_id: crate::model::EdgeId) -> Option<String> {
        edge_id
            .as_usize()
            .and_then(|i| self.highway_by_edge.get(i))
            .cloned()
    }

    /// Resolve Open Question 9(a): the three-pass compiler never computes
    /// `timeSeconds` itself, so this is a separate post-compile step a
    /// caller runs explicitly (see [`crate::engine::RoutingEngine::build`]).
    pub fn fill_times(&mut self, speed_table: &SpeedTable) {
        let highway_by_edge = &self.highway_by_edge;
        speed_table.fill_times(&mut self.attributes, |id| {
            id.as_usize().and_then(|i| highway_by_edge.get(i)).cloned()
        });
    }

    /// Convenience: the default A*/Dijkstra cost for an edge under a metric.
    pub fn cost(&self, edge_id: crate::model::EdgeId, metric: Metric) -> Result<f64, CompileError> {
        Ok(match metric {
            Metric::Distance => self.attributes.distance_meters(edge_id)?,
            Metric::Time => self.attributes.time_seconds(edge_id)?,
        })
    }
}

#[derive(Default)]
struct WayTags {
    highway: Option<String>,
    oneway: Option<String>,
    name: Option<String>,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum WayDirection {
    Forward,
    Reverse,
    Both,
}

fn way_direction(oneway: Option<&str>) -> WayDirection {
    match oneway {
        Some("yes") | Some("true") | Some("1") => WayDirection::Forward,
        Some("-1") => WayDirection::Reverse,
        _ => WayDirection::Both,
    }
}

/// Replays `source` once, calling `on_way` with the accumulated node-ref
/// list and tags every time a `<way>` closes. Shared between pass 2 and
/// pass 3, which both need to reconstruct ways from the flat event stream.
fn for_each_way(
    source: &dyn OsmSource,
    mut on_way: impl FnMut(&[i64], &WayTags) -> Result<(), CompileError>,
) -> Result<(), CompileError> {
    let mut in_way = false;
    let mut refs: Vec<i64> = Vec::new();
    let mut tags = WayTags::default();

    for event in source.events() {
        match event? {
            OsmEvent::Node { .. } => {}
            OsmEvent::WayStart => {
                in_way = true;
                refs.clear();
                tags = WayTags::default();
            }
            OsmEvent::WayNodeRef { osm_id } => {
                if !in_way {
                    return Err(CompileError::TagOutsideWay);
                }
                refs.push(osm_id);
            }
            OsmEvent::WayTag { key, value } => {
                if !in_way {
                    return Err(CompileError::TagOutsideWay);
                }
                match key.as_str() {
                    "highway" => tags.highway = Some(value),
                    "oneway" => tags.oneway = Some(value),
                    "name" => tags.name = Some(value),
                    _ => {}
                }
            }
            OsmEvent::WayEnd => {
                in_way = false;
                on_way(&refs, &tags)?;
            }
        }
    }
    Ok(())
}

/// Compile an OSM event source into a routable network.
pub fn compile(source: &dyn OsmSource) -> Result<CompiledNetwork, CompileError> {
    // Pass 1 — nodes.
    let mut node_ids: Vec<i64> = Vec::new();
    let mut lat: Vec<f64> = Vec::new();
    let mut lon: Vec<f64> = Vec::new();
    let mut index_of: HashMap<i64, usize> = HashMap::new();

    for event in source.events() {
        if let OsmEvent::Node { osm_id, lat: la, lon: lo } = event? {
            if index_of.insert(osm_id, node_ids.len()).is_some() {
                return Err(CompileError::DuplicateNodeId(osm_id));
            }
            node_ids.push(osm_id);
            lat.push(la);
            lon.push(lo);
        }
    }

    // Pass 2 — usage counting.
    let n = node_ids.len();
    let mut use_count: Vec<u32> = vec![0; n];
    let mut is_endpoint: Vec<bool> = vec![false; n];

    let node_index = |osm_id: i64, index_of: &HashMap<i64, usize>| -> Result<usize, CompileError> {
        index_of.get(&osm_id).copied().ok_or(CompileError::MissingNode(osm_id))
    };

    for_each_way(source, |refs, tags| {
        let routable = tags
            .highway
            .as_deref()
            .map(is_routable_highway)
            .unwrap_or(false);
        if !routable || refs.len() < 2 {
            log::debug!("pass 2: skipping non-routable or degenerate way ({} refs)", refs.len());
            return Ok(());
        }
        let first = node_index(refs[0], &index_of)?;
        let last = node_index(*refs.last().unwrap(), &index_of)?;
        is_endpoint[first] = true;
        is_endpoint[last] = true;
        for &osm_id in refs {
            let idx = node_index(osm_id, &index_of)?;
            use_count[idx] += 1;
        }
        Ok(())
    })?;

    let is_vertex: Vec<bool> = (0..n).map(|i| is_endpoint[i] || use_count[i] >= 2).collect();
    let mut vertex_of_node: Vec<Option<usize>> = vec![None; n];
    let mut vertex_lat: Vec<f64> = Vec::new();
    let mut vertex_lon: Vec<f64> = Vec::new();
    for i in 0..n {
        if is_vertex[i] {
            vertex_of_node[i] = Some(vertex_lat.len());
            vertex_lat.push(lat[i]);
            vertex_lon.push(lon[i]);
        }
    }

    let projection = TangentPlaneProjection::centered_on_mean(&vertex_lat, &vertex_lon)?;
    let vertices: Vec<Vertex> = (0..vertex_lat.len())
        .map(|v| {
            let (x, y) = projection.forward(vertex_lat[v], vertex_lon[v]);
            Vertex::new(v, x, y, vertex_lat[v], vertex_lon[v])
        })
        .collect();

    let mut graph = Graph::new(vertices);
    let mut attributes = EdgeAttributes::new();
    let mut geometry = EdgeGeometry::new();
    let mut highway_by_edge: Vec<String> = Vec::new();

    // Pass 3 — edge emission.
    for_each_way(source, |refs, tags| {
        let highway = match &tags.highway {
            Some(h) if is_routable_highway(h) => h.clone(),
            _ => return Ok(()),
        };
        if refs.len() < 2 {
            return Ok(());
        }

        let start_pos = refs
            .iter()
            .position(|&osm_id| {
                node_index(osm_id, &index_of)
                    .ok()
                    .map(|idx| is_vertex[idx])
                    .unwrap_or(false)
            })
            .ok_or_else(|| CompileError::InvariantViolated(
                "routable way has no routing-vertex node".to_string(),
            ))?;

        let direction = way_direction(tags.oneway.as_deref());

        let mut start_idx = node_index(refs[start_pos], &index_of)?;
        let mut start_v = vertex_of_node[start_idx].expect("endpoint is always a routing vertex");
        let mut accum = 0.0_f64;
        let mut buffer: Vec<(f64, f64)> = vec![(lon[start_idx], lat[start_idx])];

        for &osm_id in &refs[start_pos + 1..] {
            let idx = node_index(osm_id, &index_of)?;
            accum += haversine_distance_meters((lat[start_idx], lon[start_idx]), (lat[idx], lon[idx]));
            buffer.push((lon[idx], lat[idx]));

            if is_vertex[idx] {
                let v = vertex_of_node[idx].expect("vertex node must have an assigned VertexId");
                if v == start_v {
                    // degenerate self-segment: reset and continue without emitting.
                    buffer = vec![(lon[idx], lat[idx])];
                    accum = 0.0;
                } else {
                    emit_edges(
                        &mut graph,
                        &mut attributes,
                        &mut geometry,
                        &mut highway_by_edge,
                        &projection,
                        start_v,
                        v,
                        accum,
                        &buffer,
                        direction,
                        tags.name.as_deref(),
                        &highway,
                    )?;
                    start_v = v;
                    buffer = vec![(lon[idx], lat[idx])];
                    accum = 0.0;
                }
            }
            start_idx = idx;
        }
        Ok(())
    })?;

    geometry
        .validate(graph.n_edges())
        .map_err(|e| CompileError::InvariantViolated(e.to_string()))?;
    if attributes.edge_count() != graph.n_edges() {
        return Err(CompileError::InvariantViolated(format!(
            "attribute edge count {} does not match graph edge count {}",
            attributes.edge_count(),
            graph.n_edges()
        )));
    }

    let vertex_store = VertexStore::from_graph(&graph);
    Ok(CompiledNetwork {
        graph,
        attributes,
        geometry,
        vertex_store,
        projection,
        highway_by_edge,
    })
}

#[allow(clippy::too_many_arguments)]
fn emit_edges(
    graph: &mut Graph,
    attributes: &mut EdgeAttributes,
    geometry: &mut EdgeGeometry,
    highway_by_edge: &mut Vec<String>,
    projection: &TangentPlaneProjection,
    from_v: usize,
    to_v: usize,
    distance_meters: f64,
    buffer_lon_lat: &[(f64, f64)],
    direction: WayDirection,
    name: Option<&str>,
    highway: &str,
) -> Result<(), CompileError> {
    use crate::model::VertexId;

    let forward_xy: Vec<(f64, f64)> = buffer_lon_lat
        .iter()
        .map(|&(lo, la)| projection.forward(la, lo))
        .collect();

    let mut push_edge = |from: usize, to: usize, xy: &[(f64, f64)]| -> Result<(), CompileError> {
        let edge_id = graph.add_edge(VertexId(from), VertexId(to), 0.0)?;
        let xs: Vec<f64> = xy.iter().map(|p| p.0).collect();
        let ys: Vec<f64> = xy.iter().map(|p| p.1).collect();
        let row = geometry.push_polyline(&xs, &ys)?;
        debug_assert_eq!(row as i64, edge_id.0);
        attributes.set_edge_count(graph.n_edges());
        attributes.set_distance_meters(edge_id, distance_meters)?;
        attributes.set_street_name(edge_id, name.map(|s| s.to_string()))?;
        highway_by_edge.push(highway.to_string());
        Ok(())
    };

    if matches!(direction, WayDirection::Forward | WayDirection::Both) {
        push_edge(from_v, to_v, &forward_xy)?;
    }
    if matches!(direction, WayDirection::Reverse | WayDirection::Both) {
        let reversed: Vec<(f64, f64)> = forward_xy.iter().rev().copied().collect();
        push_edge(to_v, from_v, &reversed)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::osm_events::InMemoryOsmSource;
    use crate::model::{EdgeId, VertexId};

    fn way(refs: &[i64], tags: &[(&str, &str)]) -> Vec<OsmEvent> {
        let mut events = vec![OsmEvent::WayStart];
        for &r in refs {
            events.push(OsmEvent::WayNodeRef { osm_id: r });
        }
        for &(k, v) in tags {
            events.push(OsmEvent::WayTag {
                key: k.to_string(),
                value: v.to_string(),
            });
        }
        events.push(OsmEvent::WayEnd);
        events
    }

    fn node(id: i64, lat: f64, lon: f64) -> OsmEvent {
        OsmEvent::Node { osm_id: id, lat, lon }
    }

    #[test]
    fn duplicate_node_id_is_fatal() {
        let events = vec![node(1, 0.0, 0.0), node(1, 1.0, 1.0)];
        let src = InMemoryOsmSource(events);
        let err = compile(&src).unwrap_err();
        assert!(matches!(err, CompileError::DuplicateNodeId(1)));
    }

    #[test]
    fn simple_two_way_street_produces_two_edges() {
        let mut events = vec![
            node(1, 0.0, 0.0),
            node(2, 0.0, 0.001),
        ];
        events.extend(way(&[1, 2], &[("highway", "residential"), ("name", "Main St")]));
        let src = InMemoryOsmSource(events);
        let net = compile(&src).unwrap();

        assert_eq!(net.graph.n_vertices(), 2);
        assert_eq!(net.graph.n_edges(), 2);
        let e0 = net.graph.edge_by_id(EdgeId(0)).unwrap();
        let e1 = net.graph.edge_by_id(EdgeId(1)).unwrap();
        assert_eq!((e0.from, e0.to), (VertexId(0), VertexId(1)));
        assert_eq!((e1.from, e1.to), (VertexId(1), VertexId(0)));
        assert_eq!(net.attributes.street_name(EdgeId(0)).unwrap(), Some("Main St"));
    }

    #[test]
    fn oneway_yes_emits_forward_only() {
        let mut events = vec![node(1, 0.0, 0.0), node(2, 0.0, 0.001)];
        events.extend(way(&[1, 2], &[("highway", "residential"), ("oneway", "yes")]));
        let net = compile(&InMemoryOsmSource(events)).unwrap();
        assert_eq!(net.graph.n_edges(), 1);
        let e0 = net.graph.edge_by_id(EdgeId(0)).unwrap();
        assert_eq!((e0.from, e0.to), (VertexId(0), VertexId(1)));
    }

    #[test]
    fn oneway_reverse_emits_c_to_b_and_b_to_a_only() {
        // way a, b, c tagged oneway=-1 should produce edges c->b, b->a only.
        let mut events = vec![
            node(1, 0.0, 0.0),
            node(2, 0.0, 0.001),
            node(3, 0.0, 0.002),
        ];
        // middle node must be shared by 2+ ways or an endpoint to become a vertex;
        // here it's an endpoint of neither sub-segment unless used >=2 times, so
        // split across two ways sharing node 2 to force it into the vertex set.
        events.extend(way(&[1, 2], &[("highway", "residential"), ("oneway", "-1")]));
        events.extend(way(&[2, 3], &[("highway", "residential"), ("oneway", "-1")]));
        let net = compile(&InMemoryOsmSource(events)).unwrap();

        assert_eq!(net.graph.n_vertices(), 3);
        assert_eq!(net.graph.n_edges(), 2);
        let pairs: Vec<(VertexId, VertexId)> =
            net.graph.edges().map(|e| (e.from, e.to)).collect();
        assert!(pairs.contains(&(VertexId(1), VertexId(0))));
        assert!(pairs.contains(&(VertexId(2), VertexId(1))));
        assert!(!pairs.contains(&(VertexId(0), VertexId(1))));
    }

    #[test]
    fn non_routable_highway_is_skipped() {
        let mut events = vec![node(1, 0.0, 0.0), node(2, 0.0, 0.001)];
        events.extend(way(&[1, 2], &[("highway", "footway")]));
        let net = compile(&InMemoryOsmSource(events)).unwrap();
        assert_eq!(net.graph.n_edges(), 0);
    }

    #[test]
    fn shared_node_between_two_ways_becomes_a_vertex() {
        let mut events = vec![
            node(1, 0.0, 0.0),
            node(2, 0.0, 0.001),
            node(3, 0.0, 0.002),
        ];
        events.extend(way(&[1, 2], &[("highway", "residential")]));
        events.extend(way(&[2, 3], &[("highway", "residential")]));
        let net = compile(&InMemoryOsmSource(events)).unwrap();
        assert_eq!(net.graph.n_vertices(), 3);
    }

    #[test]
    fn geometry_endpoints_match_vertex_coordinates() {
        let mut events = vec![
            node(1, 0.0, 0.0),
            node(2, 0.0, 0.0005),
            node(3, 0.0, 0.001),
        ];
        events.extend(way(&[1, 2, 3], &[("highway", "residential"), ("oneway", "yes")]));
        let net = compile(&InMemoryOsmSource(events)).unwrap();
        assert_eq!(net.graph.n_edges(), 1);
        let (xs, ys) = net.geometry.points(EdgeId(0)).unwrap();
        let from = net.graph.get_vertex(VertexId(0)).unwrap();
        let to = net.graph.get_vertex(VertexId(1)).unwrap();
        assert_eq!((xs[0], ys[0]), (from.x, from.y));
        assert_eq!((*xs.last().unwrap(), *ys.last().unwrap()), (to.x, to.y));
    }
}
