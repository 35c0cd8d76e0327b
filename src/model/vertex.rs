use super::ids::VertexId;
use serde::{Deserialize, Serialize};

/// A routing vertex: a road endpoint or a node shared by two or more
/// routable ways. Carries both the projected local-tangent-plane
/// coordinate (meters, used by the search and reconstruction) and the
/// original WGS84 coordinate (degrees, used for snapping input/output and
/// instruction geometry).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub vertex_id: VertexId,
    pub x: f64,
    pub y: f64,
    pub lat: f64,
    pub lon: f64,
}

impl Vertex {
    pub fn new(vertex_id: usize, x: f64, y: f64, lat: f64, lon: f64) -> Self {
        Self {
            vertex_id: VertexId(vertex_id),
            x,
            y,
            lat,
            lon,
        }
    }
}
