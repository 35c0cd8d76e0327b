use super::ids::EdgeId;

#[derive(thiserror::Error, Debug)]
pub enum GeometryError {
    #[error("edge id {0} out of range [0, {1})")]
    OutOfRange(EdgeId, usize),
    #[error("edge_start.len() == {0} but expected {1} (edge_count + 1)")]
    RowPointerLengthMismatch(usize, usize),
    #[error("edge {0} has fewer than 2 geometry points ({1})")]
    DegenerateEdge(EdgeId, usize),
}

/// Compressed-sparse-row polyline store: for edge `e`, points live at
/// `[edge_start[e], edge_start[e+1])` in the flat `x`/`y` arrays.
///
/// Invariants (checked by [`EdgeGeometry::validate`], which the compiler
/// runs as a post-pass check): `edge_start.len() == E + 1`,
/// `edge_start[0] == 0`, `edge_start` is monotonically non-decreasing,
/// `edge_start[E] == x.len() == y.len()`, and every edge has at least 2
/// points.
#[derive(Debug, Clone, Default)]
pub struct EdgeGeometry {
    edge_start: Vec<usize>,
    x: Vec<f64>,
    y: Vec<f64>,
}

impl EdgeGeometry {
    pub fn new() -> Self {
        Self {
            edge_start: vec![0],
            x: Vec::new(),
            y: Vec::new(),
        }
    }

    pub fn edge_count(&self) -> usize {
        self.edge_start.len().saturating_sub(1)
    }

    pub fn total_points(&self) -> usize {
        self.x.len()
    }

    /// Append one edge's polyline (in `from -> to` order) to the store and
    /// return the newly assigned edge id's geometry row. The caller is
    /// responsible for id correspondence with the `Graph`; this store does
    /// not itself track edge ids beyond row position.
    pub fn push_polyline(&mut self, xs: &[f64], ys: &[f64]) -> Result<usize, GeometryError> {
        let new_id = self.edge_count();
        if xs.len() < 2 || xs.len() != ys.len() {
            return Err(GeometryError::DegenerateEdge(EdgeId(new_id as i64), xs.len()));
        }
        self.x.extend_from_slice(xs);
        self.y.extend_from_slice(ys);
        self.edge_start.push(self.x.len());
        Ok(new_id)
    }

    fn row(&self, id: EdgeId) -> Result<(usize, usize), GeometryError> {
        let i = id
            .as_usize()
            .filter(|&i| i + 1 < self.edge_start.len())
            .ok_or(GeometryError::OutOfRange(id, self.edge_count()))?;
        Ok((self.edge_start[i], self.edge_start[i + 1]))
    }

    /// The points of edge `id`, in `from -> to` order.
    pub fn points(&self, id: EdgeId) -> Result<(&[f64], &[f64]), GeometryError> {
        let (start, end) = self.row(id)?;
        Ok((&self.x[start..end], &self.y[start..end]))
    }

    pub fn point_count(&self, id: EdgeId) -> Result<usize, GeometryError> {
        let (start, end) = self.row(id)?;
        Ok(end - start)
    }

    /// Total arc length (in the units of `x`/`y`) of edge `id`'s polyline.
    pub fn arc_length(&self, id: EdgeId) -> Result<f64, GeometryError> {
        let (xs, ys) = self.points(id)?;
        Ok(polyline_length(xs, ys))
    }

    /// Structural invariants, intended to be run once as a post-compile
    /// check: `edge_start.len() == expected_edges + 1` and no degenerate
    /// (<2 point) rows.
    pub fn validate(&self, expected_edges: usize) -> Result<(), GeometryError> {
        if self.edge_start.len() != expected_edges + 1 {
            return Err(GeometryError::RowPointerLengthMismatch(
                self.edge_start.len(),
                expected_edges + 1,
            ));
        }
        for i in 0..expected_edges {
            let n = self.edge_start[i + 1] - self.edge_start[i];
            if n < 2 {
                return Err(GeometryError::DegenerateEdge(EdgeId(i as i64), n));
            }
        }
        Ok(())
    }
}

pub fn polyline_length(xs: &[f64], ys: &[f64]) -> f64 {
    xs.windows(2)
        .zip(ys.windows(2))
        .map(|(wx, wy)| ((wx[1] - wx[0]).powi(2) + (wy[1] - wy[0]).powi(2)).sqrt())
        .sum()
}
