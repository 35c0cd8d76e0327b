//! Uniform-grid spatial index over edge-geometry segments, per `spec.md`
//! §4.5. Grounded on the teacher's `model/map/spatial_index.rs` shape
//! (build-once, query-many over projected coordinates) but replacing its
//! rstar R-tree with a flat CSR bucket grid, since the spec calls for a
//! fixed-cell-size structure with an expanding-ring search rather than a
//! balanced tree.

use super::spatial_error::SpatialError;
use crate::model::{EdgeGeometry, EdgeId, Graph};

/// One polyline segment: the `seg_index`-th edge of `edge_id`'s geometry,
/// i.e. the span between geometry points `seg_index` and `seg_index + 1`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SegmentRef {
    pub edge_id: EdgeId,
    pub seg_index: usize,
}

/// A fixed-cell-size bucket grid over every edge's geometry segments.
/// Cells are addressed by `(col, row)` and packed CSR-style: segments
/// touching cell `(c, r)` live at `items[cell_start[i]..cell_start[i+1]]`
/// where `i = r * cols + c`. A segment is bucketed by its midpoint, so a
/// long segment spanning several cells is only discoverable from the one
/// cell containing its midpoint — acceptable at the regional scale this
/// index targets, where segment length is small relative to cell size.
pub struct Grid {
    cell_size_meters: f64,
    min_x: f64,
    min_y: f64,
    cols: usize,
    rows: usize,
    cell_start: Vec<usize>,
    items: Vec<SegmentRef>,
}

impl Grid {
    pub fn cell_size_meters(&self) -> f64 {
        self.cell_size_meters
    }

    /// Build the index over every segment of every edge in `graph`/`geometry`.
    pub fn build(graph: &Graph, geometry: &EdgeGeometry, cell_size_meters: f64) -> Result<Self, SpatialError> {
        if cell_size_meters <= 0.0 {
            return Err(SpatialError::InvalidCellSize(cell_size_meters));
        }
        if graph.n_edges() == 0 {
            return Err(SpatialError::EmptyNetwork);
        }

        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for v in &graph.vertices {
            min_x = min_x.min(v.x);
            min_y = min_y.min(v.y);
            max_x = max_x.max(v.x);
            max_y = max_y.max(v.y);
        }
        // Fold in every shape point, not just endpoints — a curved edge's
        // interior points can bulge outside the straight line between its
        // own vertices, and the bbox must cover all geometry per spec.
        for edge in graph.edges() {
            let (xs, ys) = geometry
                .points(edge.edge_id)
                .map_err(|_| SpatialError::EmptyNetwork)?;
            for &x in xs {
                min_x = min_x.min(x);
                max_x = max_x.max(x);
            }
            for &y in ys {
                min_y = min_y.min(y);
                max_y = max_y.max(y);
            }
        }

        let cols = (((max_x - min_x) / cell_size_meters).floor() as usize + 1).max(1);
        let rows = (((max_y - min_y) / cell_size_meters).floor() as usize + 1).max(1);
        let n_cells = cols * rows;

        let mut midpoints: Vec<(usize, usize, SegmentRef)> = Vec::new();
        for edge in graph.edges() {
            let (xs, ys) = geometry
                .points(edge.edge_id)
                .map_err(|_| SpatialError::EmptyNetwork)?;
            for seg_index in 0..xs.len().saturating_sub(1) {
                let mx = (xs[seg_index] + xs[seg_index + 1]) / 2.0;
                let my = (ys[seg_index] + ys[seg_index + 1]) / 2.0;
                let col = cell_of(mx, min_x, cell_size_meters, cols);
                let row = cell_of(my, min_y, cell_size_meters, rows);
                midpoints.push((col, row, SegmentRef { edge_id: edge.edge_id, seg_index }));
            }
        }

        let mut counts = vec![0usize; n_cells + 1];
        for &(col, row, _) in &midpoints {
            counts[row * cols + col + 1] += 1;
        }
        for i in 0..n_cells {
            counts[i + 1] += counts[i];
        }
        let mut cursor = counts.clone();
        let mut items = vec![
            SegmentRef {
                edge_id: EdgeId(0),
                seg_index: 0
            };
            midpoints.len()
        ];
        for (col, row, seg) in midpoints {
            let cell = row * cols + col;
            items[cursor[cell]] = seg;
            cursor[cell] += 1;
        }

        Ok(Self {
            cell_size_meters,
            min_x,
            min_y,
            cols,
            rows,
            cell_start: counts,
            items,
        })
    }

    fn cell_items(&self, col: usize, row: usize) -> &[SegmentRef] {
        if col >= self.cols || row >= self.rows {
            return &[];
        }
        let i = row * self.cols + col;
        &self.items[self.cell_start[i]..self.cell_start[i + 1]]
    }

    fn col_of(&self, x: f64) -> isize {
        ((x - self.min_x) / self.cell_size_meters).floor() as isize
    }

    fn row_of(&self, y: f64) -> isize {
        ((y - self.min_y) / self.cell_size_meters).floor() as isize
    }

    /// Visit every segment in the square ring at Chebyshev distance `ring`
    /// from the cell containing `(x, y)` (`ring == 0` is the center cell
    /// alone).
    pub fn ring_segments(&self, x: f64, y: f64, ring: usize) -> Vec<SegmentRef> {
        let center_col = self.col_of(x);
        let center_row = self.row_of(y);
        let r = ring as isize;
        let mut out = Vec::new();

        let mut visit = |col: isize, row: isize, out: &mut Vec<SegmentRef>| {
            if col >= 0 && row >= 0 {
                out.extend_from_slice(self.cell_items(col as usize, row as usize));
            }
        };

        if r == 0 {
            visit(center_col, center_row, &mut out);
            return out;
        }

        for dc in -r..=r {
            visit(center_col + dc, center_row - r, &mut out);
            visit(center_col + dc, center_row + r, &mut out);
        }
        for dr in (-r + 1)..r {
            visit(center_col - r, center_row + dr, &mut out);
            visit(center_col + r, center_row + dr, &mut out);
        }
        out
    }
}

fn cell_of(v: f64, min_v: f64, cell_size: f64, count: usize) -> usize {
    (((v - min_v) / cell_size).floor() as usize).min(count - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Graph, Vertex, VertexId};

    fn line_graph() -> (Graph, EdgeGeometry) {
        let vertices = vec![
            Vertex::new(0, 0.0, 0.0, 0.0, 0.0),
            Vertex::new(1, 2000.0, 0.0, 0.0, 0.0),
        ];
        let mut graph = Graph::new(vertices);
        graph.add_edge(VertexId(0), VertexId(1), 0.0).unwrap();
        let mut geometry = EdgeGeometry::new();
        geometry.push_polyline(&[0.0, 2000.0], &[0.0, 0.0]).unwrap();
        (graph, geometry)
    }

    #[test]
    fn builds_one_cell_per_segment_bucket() {
        let (graph, geometry) = line_graph();
        let grid = Grid::build(&graph, &geometry, 1000.0).unwrap();
        let found = grid.ring_segments(1000.0, 0.0, 0);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].edge_id, EdgeId(0));
    }

    #[test]
    fn rejects_empty_network() {
        let graph = Graph::new(Vec::new());
        let geometry = EdgeGeometry::new();
        assert!(Grid::build(&graph, &geometry, 100.0).is_err());
    }

    #[test]
    fn rejects_non_positive_cell_size() {
        let (graph, geometry) = line_graph();
        assert!(Grid::build(&graph, &geometry, 0.0).is_err());
    }

    #[test]
    fn bbox_covers_shape_points_that_bulge_past_the_endpoints() {
        // Endpoints sit at y=0, but the edge bows out to y=1500 — well
        // outside a bbox computed from vertices alone.
        let vertices = vec![
            Vertex::new(0, 0.0, 0.0, 0.0, 0.0),
            Vertex::new(1, 2000.0, 0.0, 0.0, 0.0),
        ];
        let mut graph = Graph::new(vertices);
        graph.add_edge(VertexId(0), VertexId(1), 0.0).unwrap();
        let mut geometry = EdgeGeometry::new();
        geometry.push_polyline(&[0.0, 1000.0, 2000.0], &[0.0, 1500.0, 0.0]).unwrap();

        let grid = Grid::build(&graph, &geometry, 1000.0).unwrap();
        let found = grid.ring_segments(1000.0, 1500.0, 0);
        assert!(!found.is_empty(), "the bulging segment must be bucketed near its own midpoint, not clamped to row 0");
    }
}
