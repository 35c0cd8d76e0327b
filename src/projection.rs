//! Local tangent-plane (equirectangular) projection about a reference
//! latitude/longitude, per `spec.md` §4.1. Degrees at the boundary, radians
//! internally. Accurate at regional scale; error grows with distance from
//! the reference point.

#[derive(thiserror::Error, Debug)]
pub enum ProjectionError {
    #[error("lat/lon arrays have mismatched lengths: {0} vs {1}")]
    LengthMismatch(usize, usize),
    #[error("cannot compute a reference point from an empty coordinate set")]
    EmptyInput,
}

pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// An equirectangular projection centered on a reference point.
#[derive(Copy, Clone, Debug)]
pub struct TangentPlaneProjection {
    lat0_rad: f64,
    lon0_rad: f64,
}

impl TangentPlaneProjection {
    pub fn new(lat0_deg: f64, lon0_deg: f64) -> Self {
        Self {
            lat0_rad: lat0_deg.to_radians(),
            lon0_rad: lon0_deg.to_radians(),
        }
    }

    /// Build a projection centered on the arithmetic mean of the given
    /// latitudes/longitudes.
    pub fn centered_on_mean(lats: &[f64], lons: &[f64]) -> Result<Self, ProjectionError> {
        if lats.len() != lons.len() {
            return Err(ProjectionError::LengthMismatch(lats.len(), lons.len()));
        }
        if lats.is_empty() {
            return Err(ProjectionError::EmptyInput);
        }
        let n = lats.len() as f64;
        let mean_lat = lats.iter().sum::<f64>() / n;
        let mean_lon = lons.iter().sum::<f64>() / n;
        Ok(Self::new(mean_lat, mean_lon))
    }

    /// Forward-project one point: WGS84 degrees -> local meters.
    pub fn forward(&self, lat_deg: f64, lon_deg: f64) -> (f64, f64) {
        let lat_rad = lat_deg.to_radians();
        let lon_rad = lon_deg.to_radians();
        let x = EARTH_RADIUS_METERS * (lon_rad - self.lon0_rad) * self.lat0_rad.cos();
        let y = EARTH_RADIUS_METERS * (lat_rad - self.lat0_rad);
        (x, y)
    }

    /// Inverse-project one point: local meters -> WGS84 degrees.
    pub fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let lon_rad = self.lon0_rad + x / (EARTH_RADIUS_METERS * self.lat0_rad.cos());
        let lat_rad = self.lat0_rad + y / EARTH_RADIUS_METERS;
        (lat_rad.to_degrees(), lon_rad.to_degrees())
    }

    /// Bulk forward-project, length-checking the inputs first.
    pub fn project_all(&self, lats: &[f64], lons: &[f64]) -> Result<(Vec<f64>, Vec<f64>), ProjectionError> {
        if lats.len() != lons.len() {
            return Err(ProjectionError::LengthMismatch(lats.len(), lons.len()));
        }
        let mut xs = Vec::with_capacity(lats.len());
        let mut ys = Vec::with_capacity(lats.len());
        for (&lat, &lon) in lats.iter().zip(lons.iter()) {
            let (x, y) = self.forward(lat, lon);
            xs.push(x);
            ys.push(y);
        }
        Ok((xs, ys))
    }
}
