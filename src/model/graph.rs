use super::edge::Edge;
use super::graph_error::GraphError;
use super::ids::{EdgeId, VertexId};
use super::vertex::Vertex;

/// Road network topology represented as an adjacency list. `EdgeId` and
/// `VertexId` values are dense indices into `edges` and `vertices`.
///
/// Edges are append-only: [`Graph::insert_edge`] / [`Graph::add_edge`]
/// assign the next sequential id and grow `adj_out`/`indegree` to match.
/// Self-loops and parallel edges are permitted; the compiler is responsible
/// for not emitting degenerate same-vertex segments.
#[derive(Debug, Clone)]
pub struct Graph {
    pub vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    adj_out: Vec<Vec<EdgeId>>,
    indegree: Vec<u32>,
}

impl Graph {
    /// Create an empty graph over a fixed vertex set. Vertex ids are dense
    /// `0..vertices.len()`, matching `vertices[i].vertex_id == VertexId(i)`.
    pub fn new(vertices: Vec<Vertex>) -> Self {
        let v = vertices.len();
        Self {
            vertices,
            edges: Vec::new(),
            adj_out: vec![Vec::new(); v],
            indegree: vec![0; v],
        }
    }

    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    fn check_vertex(&self, v: VertexId) -> Result<(), GraphError> {
        if v.0 >= self.n_vertices() {
            Err(GraphError::VertexOutOfRange(v, self.n_vertices()))
        } else {
            Ok(())
        }
    }

    /// Validate `(v, w, weight)`, append a new edge, and return its assigned
    /// id. Equivalent to constructing an `Edge` and calling
    /// [`Graph::insert_edge`].
    pub fn add_edge(&mut self, v: VertexId, w: VertexId, weight: f64) -> Result<EdgeId, GraphError> {
        self.insert_edge(Edge::new(v, w, weight))
    }

    /// Insert a (possibly externally constructed) edge. Fails if the edge
    /// already carries an assigned id (write-once), or if `from`/`to` are
    /// out of range, or if `weight` is negative or NaN.
    pub fn insert_edge(&mut self, mut edge: Edge) -> Result<EdgeId, GraphError> {
        if edge.edge_id.is_assigned() {
            return Err(GraphError::EdgeAlreadyAssigned(edge.edge_id));
        }
        self.check_vertex(edge.from)?;
        self.check_vertex(edge.to)?;
        if edge.weight.is_nan() || edge.weight < 0.0 {
            return Err(GraphError::InvalidWeight(edge.weight));
        }

        let id = EdgeId(self.edges.len() as i64);
        edge.edge_id = id;
        self.adj_out[edge.from.0].push(id);
        self.indegree[edge.to.0] += 1;
        self.edges.push(edge);
        Ok(id)
    }

    pub fn edge_by_id(&self, id: EdgeId) -> Result<&Edge, GraphError> {
        id.as_usize()
            .and_then(|i| self.edges.get(i))
            .ok_or(GraphError::EdgeNotFound(id, self.edges.len()))
    }

    pub fn get_vertex(&self, id: VertexId) -> Result<&Vertex, GraphError> {
        self.vertices
            .get(id.0)
            .ok_or(GraphError::VertexNotFound(id, self.n_vertices()))
    }

    pub fn out_edges(&self, v: VertexId) -> &[EdgeId] {
        self.adj_out.get(v.0).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn outdegree(&self, v: VertexId) -> usize {
        self.out_edges(v).len()
    }

    pub fn indegree(&self, v: VertexId) -> u32 {
        self.indegree.get(v.0).copied().unwrap_or(0)
    }

    /// All edges in id order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// A new graph with every edge flipped (`from`/`to` swapped) but the
    /// same weights and vertex set. The returned graph's edge ids are *not*
    /// guaranteed to line up with the original's, since insertion order
    /// determines id assignment here just as it does for any other graph.
    pub fn reverse(&self) -> Graph {
        let mut reversed = Graph::new(self.vertices.clone());
        for e in &self.edges {
            // edges were validated on original insertion; re-insertion here
            // cannot fail on the same non-negative, non-NaN weight.
            reversed
                .add_edge(e.to, e.from, e.weight)
                .expect("reversing a valid graph cannot violate add_edge preconditions");
        }
        reversed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mk_vertices(n: usize) -> Vec<Vertex> {
        (0..n).map(|i| Vertex::new(i, i as f64, 0.0, 0.0, 0.0)).collect()
    }

    #[test]
    fn edge_ids_are_dense_and_stable() {
        let mut g = Graph::new(mk_vertices(3));
        let e0 = g.add_edge(VertexId(0), VertexId(1), 0.0).unwrap();
        let e1 = g.add_edge(VertexId(1), VertexId(2), 0.0).unwrap();
        assert_eq!(e0, EdgeId(0));
        assert_eq!(e1, EdgeId(1));
        assert_eq!(g.edge_by_id(e0).unwrap().edge_id, e0);
        assert_eq!(g.edge_by_id(e1).unwrap().edge_id, e1);
    }

    #[test]
    fn unassigned_edge_has_sentinel_id() {
        let edge = Edge::new(VertexId(0), VertexId(1), 1.0);
        assert_eq!(edge.edge_id, EdgeId::UNASSIGNED);
    }

    #[test]
    fn inserting_an_already_assigned_edge_is_an_error() {
        let mut g1 = Graph::new(mk_vertices(2));
        let mut g2 = Graph::new(mk_vertices(2));
        let edge = Edge::new(VertexId(0), VertexId(1), 1.0);
        let inserted_id = g1.insert_edge(edge).unwrap();
        assert_eq!(inserted_id, EdgeId(0));

        let reused = g1.edge_by_id(inserted_id).unwrap();
        let err = g2.insert_edge(*reused).unwrap_err();
        assert!(matches!(err, GraphError::EdgeAlreadyAssigned(_)));
    }

    #[test]
    fn add_edge_rejects_out_of_range_vertex() {
        let mut g = Graph::new(mk_vertices(2));
        let err = g.add_edge(VertexId(0), VertexId(5), 1.0).unwrap_err();
        assert!(matches!(err, GraphError::VertexOutOfRange(_, _)));
    }

    #[test]
    fn add_edge_rejects_negative_or_nan_weight() {
        let mut g = Graph::new(mk_vertices(2));
        assert!(g.add_edge(VertexId(0), VertexId(1), -1.0).is_err());
        assert!(g.add_edge(VertexId(0), VertexId(1), f64::NAN).is_err());
    }

    #[test]
    fn reverse_flips_every_edge() {
        let mut g = Graph::new(mk_vertices(3));
        g.add_edge(VertexId(0), VertexId(1), 1.0).unwrap();
        g.add_edge(VertexId(1), VertexId(2), 2.0).unwrap();

        let r = g.reverse();
        assert_eq!(r.n_edges(), 2);
        let mut flipped: Vec<(usize, usize)> =
            r.edges().map(|e| (e.from.0, e.to.0)).collect();
        flipped.sort();
        assert_eq!(flipped, vec![(1, 0), (2, 1)]);
    }

    #[test]
    fn indegree_and_outdegree_track_insertions() {
        let mut g = Graph::new(mk_vertices(3));
        g.add_edge(VertexId(0), VertexId(2), 1.0).unwrap();
        g.add_edge(VertexId(1), VertexId(2), 1.0).unwrap();
        assert_eq!(g.outdegree(VertexId(0)), 1);
        assert_eq!(g.indegree(VertexId(2)), 2);
        assert_eq!(g.indegree(VertexId(0)), 0);
    }
}
