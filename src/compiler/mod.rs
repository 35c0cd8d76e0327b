pub mod compiler_error;
pub mod highway;
pub mod osm_events;

mod compile;

pub use compile::{compile, CompiledNetwork};
pub use compiler_error::CompileError;
pub use osm_events::{InMemoryOsmSource, OsmEvent, OsmSource};
