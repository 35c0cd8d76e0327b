//! Nearest-segment snapping: projects a free-form point onto the closest
//! edge geometry segment and reports the whole-edge arc-length parameter,
//! per `spec.md` §4.5.

use super::grid::Grid;
use super::spatial_error::SpatialError;
use crate::config::SnapConfig;
use crate::model::{EdgeGeometry, Graph, SegmentSnapResult};

/// The grid index is owned outright (not borrowed) so a [`SegmentSnapper`]
/// can sit alongside the network it indexes inside [`crate::engine::RoutingEngine`]
/// without becoming a self-referential struct; `graph`/`geometry` are
/// passed in again at query time instead.
pub struct SegmentSnapper {
    grid: Grid,
    config: SnapConfig,
}

impl SegmentSnapper {
    pub fn build(graph: &Graph, geometry: &EdgeGeometry, config: SnapConfig) -> Result<Self, SpatialError> {
        let grid = Grid::build(graph, geometry, config.cell_size_meters)?;
        Ok(Self { grid, config })
    }

    /// Find the closest point on the road network to `(x, y)` (projected
    /// local-tangent-plane coordinates), expanding the search ring by ring
    /// until a strictly-no-closer guarantee is reached or `max_ring` is
    /// exhausted.
    pub fn snap(&self, graph: &Graph, geometry: &EdgeGeometry, x: f64, y: f64) -> Result<SegmentSnapResult, SpatialError> {
        let cell_size = self.grid.cell_size_meters();
        let mut best: Option<(f64, super::grid::SegmentRef, f64)> = None; // (distance, segment, local_t)

        for ring in 0..=self.config.max_ring {
            for seg in self.grid.ring_segments(x, y, ring) {
                let (xs, ys) = geometry
                    .points(seg.edge_id)
                    .expect("grid only stores segments for edges present in geometry");
                let (ax, ay) = (xs[seg.seg_index], ys[seg.seg_index]);
                let (bx, by) = (xs[seg.seg_index + 1], ys[seg.seg_index + 1]);
                let (distance, local_t) = point_to_segment(x, y, ax, ay, bx, by);
                if best.map(|(d, _, _)| distance < d).unwrap_or(true) {
                    best = Some((distance, seg, local_t));
                }
            }

            // Any segment in an unvisited cell is at least `ring * cell_size`
            // away from the query point's own cell (Chebyshev grid distance
            // lower-bounds Euclidean distance). Once the current best beats
            // that bound, no further ring can improve on it.
            if let Some((best_distance, _, _)) = best {
                if (ring as f64) * cell_size >= best_distance {
                    return self.finish(graph, geometry, best);
                }
            }
        }

        self.finish(graph, geometry, best)
    }

    fn finish(
        &self,
        graph: &Graph,
        geometry: &EdgeGeometry,
        best: Option<(f64, super::grid::SegmentRef, f64)>,
    ) -> Result<SegmentSnapResult, SpatialError> {
        let (distance, seg, local_t) = best.ok_or(SpatialError::NoCandidateFound {
            max_ring: self.config.max_ring,
            cell_size_meters: self.grid.cell_size_meters(),
        })?;

        let edge = graph.edge_by_id(seg.edge_id).expect("segment references a live edge");
        let (xs, ys) = geometry.points(seg.edge_id).expect("segment references live geometry");

        let before: f64 = (0..seg.seg_index)
            .map(|i| ((xs[i + 1] - xs[i]).powi(2) + (ys[i + 1] - ys[i]).powi(2)).sqrt())
            .sum();
        let seg_len = ((xs[seg.seg_index + 1] - xs[seg.seg_index]).powi(2)
            + (ys[seg.seg_index + 1] - ys[seg.seg_index]).powi(2))
        .sqrt();
        let total: f64 = crate::model::geometry::polyline_length(xs, ys);

        let t = if total > 0.0 {
            ((before + local_t * seg_len) / total).clamp(0.0, 1.0)
        } else {
            0.0
        };

        Ok(SegmentSnapResult {
            edge_id: seg.edge_id,
            from_vertex: edge.from,
            to_vertex: edge.to,
            t,
            distance_meters: distance,
        })
    }
}

/// Euclidean distance from `(px, py)` to the segment `(ax, ay)-(bx, by)`,
/// and the local parameter `t in [0, 1]` of the closest point along it.
fn point_to_segment(px: f64, py: f64, ax: f64, ay: f64, bx: f64, by: f64) -> (f64, f64) {
    let dx = bx - ax;
    let dy = by - ay;
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq <= 0.0 {
        0.0
    } else {
        (((px - ax) * dx + (py - ay) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let cx = ax + t * dx;
    let cy = ay + t * dy;
    (((px - cx).powi(2) + (py - cy).powi(2)).sqrt(), t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Graph, Vertex, VertexId};

    fn line_graph() -> (Graph, EdgeGeometry) {
        let vertices = vec![
            Vertex::new(0, 0.0, 0.0, 0.0, 0.0),
            Vertex::new(1, 1000.0, 0.0, 0.0, 0.0),
        ];
        let mut graph = Graph::new(vertices);
        graph.add_edge(VertexId(0), VertexId(1), 0.0).unwrap();
        let mut geometry = EdgeGeometry::new();
        geometry.push_polyline(&[0.0, 1000.0], &[0.0, 0.0]).unwrap();
        (graph, geometry)
    }

    #[test]
    fn snaps_perpendicular_point_onto_midpoint() {
        let (graph, geometry) = line_graph();
        let snapper = SegmentSnapper::build(&graph, &geometry, SnapConfig::default()).unwrap();
        let result = snapper.snap(&graph, &geometry, 500.0, 10.0).unwrap();
        assert_eq!(result.edge_id, crate::model::EdgeId(0));
        assert!((result.t - 0.5).abs() < 1e-6);
        assert!((result.distance_meters - 10.0).abs() < 1e-6);
    }

    #[test]
    fn snaps_point_beyond_end_to_endpoint() {
        let (graph, geometry) = line_graph();
        let snapper = SegmentSnapper::build(&graph, &geometry, SnapConfig::default()).unwrap();
        let result = snapper.snap(&graph, &geometry, 2000.0, 0.0).unwrap();
        assert!((result.t - 1.0).abs() < 1e-6);
    }
}
