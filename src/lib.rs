//! Regional road-network routing engine core: three-pass OSM compilation,
//! a uniform-grid spatial snapper, Dijkstra/A* shortest paths over either
//! [`model::Metric`], route reconstruction, and turn-by-turn instruction
//! generation.
//!
//! The XML parser, HTTP front end, GeoJSON serializer, CLI wrapper, and
//! static file server are external collaborators (`spec.md` §6) and are
//! not part of this crate; [`compiler::OsmSource`] is the seam a host
//! application implements to feed OSM data in.

pub mod compiler;
pub mod config;
pub mod engine;
pub mod instructions;
pub mod model;
pub mod projection;
pub mod reconstruction;
pub mod search;
pub mod spatial;
pub mod speed_table;
pub mod util;

pub use config::{InstructionConfig, SnapConfig};
pub use engine::{EngineError, PointToPointRoute, RoutingEngine};
pub use model::{Algorithm, Edge, EdgeAttributes, EdgeGeometry, EdgeId, Graph, Metric, Route, SegmentSnapResult, Vertex, VertexId};
pub use speed_table::SpeedTable;
