pub mod grid;
pub mod snapper;
pub mod spatial_error;

pub use grid::{Grid, SegmentRef};
pub use snapper::SegmentSnapper;
pub use spatial_error::SpatialError;
