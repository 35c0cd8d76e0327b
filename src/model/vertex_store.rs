use super::graph::Graph;
use super::ids::VertexId;

#[derive(thiserror::Error, Debug)]
pub enum VertexStoreError {
    #[error("x/y arrays have mismatched lengths: {0} vs {1}")]
    LengthMismatch(usize, usize),
}

/// Parallel projected-coordinate arrays consumed by A*'s heuristic.
/// Constructed once per compiled network; length equals `V`.
#[derive(Debug, Clone)]
pub struct VertexStore {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl VertexStore {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, VertexStoreError> {
        if x.len() != y.len() {
            return Err(VertexStoreError::LengthMismatch(x.len(), y.len()));
        }
        Ok(Self { x, y })
    }

    pub fn from_graph(graph: &Graph) -> Self {
        let x = graph.vertices.iter().map(|v| v.x).collect();
        let y = graph.vertices.iter().map(|v| v.y).collect();
        Self { x, y }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn xy(&self, v: VertexId) -> Option<(f64, f64)> {
        self.x.get(v.0).copied().zip(self.y.get(v.0).copied())
    }
}
