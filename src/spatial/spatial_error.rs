#[derive(thiserror::Error, Debug)]
pub enum SpatialError {
    #[error("cannot build a spatial index over an empty network")]
    EmptyNetwork,
    #[error("no segment found within {max_ring} rings of cell size {cell_size_meters}m")]
    NoCandidateFound {
        max_ring: usize,
        cell_size_meters: f64,
    },
    #[error("grid cell size must be positive, got {0}")]
    InvalidCellSize(f64),
}
