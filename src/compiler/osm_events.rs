//! The OSM XML parser is an external collaborator (`spec.md` §6): this
//! crate only consumes its SAX-style event stream, modeled here as a small
//! enum plus a replayable source trait. The compiler needs the same stream
//! three times over (one pass per `spec.md` §4.4), so [`OsmSource`] yields a
//! *fresh* iterator on each call rather than handing out one that's been
//! consumed — this lets a real collaborator re-open the underlying file for
//! each pass instead of buffering the whole document in memory.

use crate::compiler::compiler_error::CompileError;

#[derive(Debug, Clone, PartialEq)]
pub enum OsmEvent {
    Node {
        osm_id: i64,
        lat: f64,
        lon: f64,
    },
    WayStart,
    WayNodeRef {
        osm_id: i64,
    },
    WayTag {
        key: String,
        value: String,
    },
    WayEnd,
}

/// A replayable SAX-style event source. Each call to [`OsmSource::events`]
/// must yield the complete document from the start.
pub trait OsmSource {
    fn events(&self) -> Box<dyn Iterator<Item = Result<OsmEvent, CompileError>> + '_>;
}

/// The simplest possible [`OsmSource`]: a fully materialized event vector,
/// useful for tests and for small extracts where the external parser has
/// already buffered its output.
pub struct InMemoryOsmSource(pub Vec<OsmEvent>);

impl OsmSource for InMemoryOsmSource {
    fn events(&self) -> Box<dyn Iterator<Item = Result<OsmEvent, CompileError>> + '_> {
        Box::new(self.0.iter().cloned().map(Ok))
    }
}
