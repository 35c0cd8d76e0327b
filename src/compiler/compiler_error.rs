use crate::model::attributes::AttributeError;
use crate::model::geometry::GeometryError;
use crate::model::graph_error::GraphError;
use crate::projection::ProjectionError;

/// Structural faults in the OSM input, or internal inconsistencies raised
/// while assembling the compiled network. All are fatal: compilation
/// aborts rather than attempting partial recovery.
#[derive(thiserror::Error, Debug)]
pub enum CompileError {
    #[error("duplicate node id in OSM input: {0}")]
    DuplicateNodeId(i64),
    #[error("way references missing node id: {0}")]
    MissingNode(i64),
    #[error("a <tag> or <nd> element appeared outside of a <way>")]
    TagOutsideWay,
    #[error("post-compile invariant violated: {0}")]
    InvariantViolated(String),
    #[error("failure building graph topology: {0}")]
    Graph(#[from] GraphError),
    #[error("failure writing edge attributes: {0}")]
    Attribute(#[from] AttributeError),
    #[error("failure writing edge geometry: {0}")]
    Geometry(#[from] GeometryError),
    #[error("failure building the local projection: {0}")]
    Projection(#[from] ProjectionError),
    #[error("I/O failure reading OSM input: {0}")]
    Io(String),
}
