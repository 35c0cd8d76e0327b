//! Resolves Open Question 9(a) from `spec.md`: the three-pass compiler never
//! computes `timeSeconds`, only `distanceMeters`. A [`SpeedTable`] is the
//! documented, separate collaborator a caller runs after compilation to
//! fill the time column from distance and highway class.

use crate::model::{EdgeAttributes, EdgeId};
use std::collections::HashMap;

/// `highway` tag value -> free-flow speed in km/h. Values chosen as an
/// ordinary defensive-driving regional table; `_link` variants default to
/// 70% of their parent class, rounded to the nearest 5 km/h.
#[derive(Debug, Clone)]
pub struct SpeedTable {
    kph: HashMap<&'static str, f64>,
    default_kph: f64,
}

impl Default for SpeedTable {
    fn default() -> Self {
        let kph = HashMap::from([
            ("motorway", 100.0),
            ("trunk", 90.0),
            ("primary", 80.0),
            ("secondary", 70.0),
            ("tertiary", 60.0),
            ("unclassified", 50.0),
            ("residential", 30.0),
            ("living_street", 15.0),
            ("service", 20.0),
            ("motorway_link", 70.0),
            ("trunk_link", 65.0),
            ("primary_link", 55.0),
            ("secondary_link", 50.0),
            ("tertiary_link", 40.0),
        ]);
        Self {
            kph,
            default_kph: 30.0,
        }
    }
}

impl SpeedTable {
    pub fn speed_kph(&self, highway: &str) -> f64 {
        self.kph.get(highway).copied().unwrap_or(self.default_kph)
    }

    pub fn speed_mps(&self, highway: &str) -> f64 {
        self.speed_kph(highway) / 3.6
    }

    /// The fastest entry in the table, in meters/second — a reasonable
    /// `vmax` upper bound for the TIME metric's A* heuristic (see Open
    /// Question 9(b)).
    pub fn max_speed_mps(&self) -> f64 {
        self.kph
            .values()
            .cloned()
            .fold(self.default_kph, f64::max)
            / 3.6
    }

    /// Fill `timeSeconds[e] = distanceMeters[e] / speed_mps(highway[e])`
    /// for every edge in `[0, edge_count)`. `highway_of` maps an edge id to
    /// the OSM `highway` value that produced it; the compiler does not
    /// retain this mapping itself (it is not part of `EdgeAttributes`), so
    /// the caller supplies it from its own compile-time bookkeeping.
    pub fn fill_times(
        &self,
        attrs: &mut EdgeAttributes,
        highway_of: impl Fn(EdgeId) -> Option<String>,
    ) {
        for i in 0..attrs.edge_count() {
            let id = EdgeId(i as i64);
            let highway = highway_of(id).unwrap_or_else(|| "unclassified".to_string());
            let speed = self.speed_mps(&highway).max(f64::MIN_POSITIVE);
            if let Ok(distance) = attrs.distance_meters(id) {
                let _ = attrs.set_time_seconds(id, distance / speed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_highway_uses_table_entry() {
        let t = SpeedTable::default();
        assert_eq!(t.speed_kph("motorway"), 100.0);
    }

    #[test]
    fn unknown_highway_falls_back_to_default() {
        let t = SpeedTable::default();
        assert_eq!(t.speed_kph("bridleway"), 30.0);
    }

    #[test]
    fn fill_times_divides_distance_by_speed() {
        let t = SpeedTable::default();
        let mut attrs = EdgeAttributes::new();
        attrs.set_edge_count(1);
        attrs.set_distance_meters(EdgeId(0), 1000.0).unwrap();
        t.fill_times(&mut attrs, |_| Some("residential".to_string()));
        let expected = 1000.0 / (30.0 / 3.6);
        assert!((attrs.time_seconds(EdgeId(0)).unwrap() - expected).abs() < 1e-9);
    }
}
