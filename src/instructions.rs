//! Turn-by-turn maneuver generation from a reconstructed route, per
//! `spec.md` §4.9: a turn angle at each intermediate vertex (via
//! `atan2(cross, dot)` of the incoming/outgoing direction vectors),
//! classified against the sharp-bend threshold, with a spam guard that
//! suppresses repeated `KeepLeft`/`KeepRight` chatter on a long gentle
//! curve with an unchanged street name.

use crate::config::InstructionConfig;
use crate::model::attributes::AttributeError;
use crate::model::geometry::GeometryError;
use crate::model::{EdgeAttributes, EdgeGeometry, EdgeId};

#[derive(thiserror::Error, Debug)]
pub enum InstructionError {
    #[error("edge geometry lookup failed: {0}")]
    Geometry(#[from] GeometryError),
    #[error("edge attribute lookup failed: {0}")]
    Attribute(#[from] AttributeError),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Maneuver {
    Start,
    Continue,
    Left,
    Right,
    KeepLeft,
    KeepRight,
    Arrive,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Instruction {
    pub maneuver: Maneuver,
    pub street_name: Option<String>,
    pub distance_meters: f64,
}

/// OSM has no canonical "no name" value; treat a missing `name` tag as the
/// literal unnamed-road sentinel so two consecutive unnamed edges compare
/// equal, and compare case-insensitively so e.g. "Main St" / "MAIN ST"
/// never trigger a spurious name-change announcement.
fn name_key(name: Option<&str>) -> String {
    name.map(|s| s.to_lowercase()).unwrap_or_else(|| "unnamed road".to_string())
}

/// Signed turn angle in degrees at `vertex`, positive for a left (CCW)
/// turn and negative for right, given the point before and after it along
/// the route.
fn turn_angle_degrees(prev: (f64, f64), vertex: (f64, f64), next: (f64, f64)) -> f64 {
    let in_vec = (vertex.0 - prev.0, vertex.1 - prev.1);
    let out_vec = (next.0 - vertex.0, next.1 - vertex.1);
    let cross = in_vec.0 * out_vec.1 - in_vec.1 * out_vec.0;
    let dot = in_vec.0 * out_vec.0 + in_vec.1 * out_vec.1;
    cross.atan2(dot).to_degrees()
}

/// LEFT/RIGHT vs CONTINUE, per spec step 4 — only meaningful when the
/// street name changed at this transition.
fn classify_name_change_turn(angle_degrees: f64, config: &InstructionConfig) -> Maneuver {
    if angle_degrees.abs() >= config.sharp_bend_degrees {
        if angle_degrees > 0.0 { Maneuver::Left } else { Maneuver::Right }
    } else {
        Maneuver::Continue
    }
}

/// KEEP_LEFT/KEEP_RIGHT, per spec step 5 — only considered when the street
/// name is unchanged; `None` if the bend isn't sharp enough to announce.
fn classify_keep(angle_degrees: f64, config: &InstructionConfig) -> Option<Maneuver> {
    if angle_degrees.abs() >= config.sharp_bend_degrees {
        Some(if angle_degrees > 0.0 { Maneuver::KeepLeft } else { Maneuver::KeepRight })
    } else {
        None
    }
}

fn approach_point(geometry: &EdgeGeometry, edge_id: EdgeId) -> Result<(f64, f64), InstructionError> {
    let (xs, ys) = geometry.points(edge_id)?;
    let i = xs.len().saturating_sub(2);
    Ok((xs[i], ys[i]))
}

fn departure_point(geometry: &EdgeGeometry, edge_id: EdgeId) -> Result<(f64, f64), InstructionError> {
    let (xs, ys) = geometry.points(edge_id)?;
    let i = if xs.len() > 1 { 1 } else { 0 };
    Ok((xs[i], ys[i]))
}

fn vertex_point(geometry: &EdgeGeometry, edge_id: EdgeId) -> Result<(f64, f64), InstructionError> {
    let (xs, ys) = geometry.points(edge_id)?;
    Ok((*xs.last().unwrap(), *ys.last().unwrap()))
}

/// Generate turn-by-turn instructions for a route's edge sequence.
/// `edge_ids` must be in traversal order, as produced by
/// [`crate::search::shortest_path`]. An empty sequence (trivial
/// same-vertex route) yields a single `Arrive` instruction.
pub fn generate(
    geometry: &EdgeGeometry,
    attributes: &EdgeAttributes,
    edge_ids: &[EdgeId],
    config: &InstructionConfig,
) -> Result<Vec<Instruction>, InstructionError> {
    if edge_ids.is_empty() {
        return Ok(vec![Instruction {
            maneuver: Maneuver::Arrive,
            street_name: None,
            distance_meters: 0.0,
        }]);
    }

    let mut instructions = vec![Instruction {
        maneuver: Maneuver::Start,
        street_name: attributes.street_name(edge_ids[0])?.map(str::to_string),
        distance_meters: 0.0,
    }];
    let mut distance_since_last_instruction = 0.0_f64;

    for i in 0..edge_ids.len() {
        let leg_distance = attributes.distance_meters(edge_ids[i])?;
        distance_since_last_instruction += leg_distance;

        if i + 1 >= edge_ids.len() {
            continue;
        }

        let prev = approach_point(geometry, edge_ids[i])?;
        let vertex = vertex_point(geometry, edge_ids[i])?;
        let next = departure_point(geometry, edge_ids[i + 1])?;
        let angle = turn_angle_degrees(prev, vertex, next);

        let name_before = name_key(attributes.street_name(edge_ids[i])?);
        let name_after_raw = attributes.street_name(edge_ids[i + 1])?.map(str::to_string);
        let name_changed = name_before != name_key(name_after_raw.as_deref());

        let emission = if name_changed {
            Some(classify_name_change_turn(angle, config))
        } else if config.emit_sharp_bends {
            classify_keep(angle, config).filter(|_| distance_since_last_instruction >= config.spam_guard_meters)
        } else {
            None
        };

        if let Some(maneuver) = emission {
            log::debug!("instruction: {:?} at distance {:.1}m, angle {:.1} deg", maneuver, distance_since_last_instruction, angle);
            instructions.push(Instruction {
                maneuver,
                street_name: name_after_raw,
                distance_meters: distance_since_last_instruction,
            });
            distance_since_last_instruction = 0.0;
        }
    }

    instructions.push(Instruction {
        maneuver: Maneuver::Arrive,
        street_name: None,
        distance_meters: distance_since_last_instruction,
    });
    Ok(instructions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EdgeAttributes;

    fn two_leg_setup(angle_bend: bool, same_name: bool) -> (EdgeGeometry, EdgeAttributes) {
        let mut geometry = EdgeGeometry::new();
        geometry.push_polyline(&[0.0, 100.0], &[0.0, 0.0]).unwrap();
        if angle_bend {
            geometry.push_polyline(&[100.0, 100.0], &[0.0, 100.0]).unwrap();
        } else {
            geometry.push_polyline(&[100.0, 200.0], &[0.0, 0.0]).unwrap();
        }

        let mut attrs = EdgeAttributes::new();
        attrs.set_edge_count(2);
        attrs.set_distance_meters(EdgeId(0), 100.0).unwrap();
        attrs.set_distance_meters(EdgeId(1), 100.0).unwrap();
        attrs.set_street_name(EdgeId(0), Some("Main St".to_string())).unwrap();
        attrs
            .set_street_name(EdgeId(1), Some(if same_name { "Main St" } else { "Oak Ave" }.to_string()))
            .unwrap();
        (geometry, attrs)
    }

    #[test]
    fn straight_continue_with_same_name_merges_into_one_leg() {
        let (geometry, attrs) = two_leg_setup(false, true);
        let config = InstructionConfig::default();
        let instrs = generate(&geometry, &attrs, &[EdgeId(0), EdgeId(1)], &config).unwrap();
        assert_eq!(instrs.len(), 2); // Start (0m), Arrive (200m)
        assert_eq!(instrs[0].maneuver, Maneuver::Start);
        assert_eq!(instrs[0].distance_meters, 0.0);
        assert_eq!(instrs[1].maneuver, Maneuver::Arrive);
        assert_eq!(instrs[1].distance_meters, 200.0);
    }

    #[test]
    fn straight_with_name_change_announces_continue() {
        let (geometry, attrs) = two_leg_setup(false, false);
        let config = InstructionConfig::default();
        let instrs = generate(&geometry, &attrs, &[EdgeId(0), EdgeId(1)], &config).unwrap();
        assert_eq!(instrs.len(), 3);
        assert_eq!(instrs[1].maneuver, Maneuver::Continue);
        assert_eq!(instrs[1].street_name.as_deref(), Some("Oak Ave"));
    }

    #[test]
    fn ninety_degree_bend_with_name_change_emits_a_turn() {
        let (geometry, attrs) = two_leg_setup(true, false);
        let config = InstructionConfig::default();
        let instrs = generate(&geometry, &attrs, &[EdgeId(0), EdgeId(1)], &config).unwrap();
        assert_eq!(instrs.len(), 3);
        assert!(matches!(instrs[1].maneuver, Maneuver::Left | Maneuver::Right));
        assert_eq!(instrs[1].distance_meters, 100.0);
    }

    /// A sharp bend with an unchanged street name and only a 100 m leg
    /// falls through to step 6 (accumulate, no emission) because it hasn't
    /// crossed the 120 m spam-guard threshold yet.
    #[test]
    fn ninety_degree_bend_with_same_name_below_spam_guard_is_suppressed() {
        let (geometry, attrs) = two_leg_setup(true, true);
        let config = InstructionConfig::default();
        let instrs = generate(&geometry, &attrs, &[EdgeId(0), EdgeId(1)], &config).unwrap();
        assert_eq!(instrs.len(), 2); // Start, Arrive
        assert_eq!(instrs[1].maneuver, Maneuver::Arrive);
        assert_eq!(instrs[1].distance_meters, 200.0);
    }

    #[test]
    fn ninety_degree_bend_with_same_name_past_spam_guard_emits_keep() {
        let mut geometry = EdgeGeometry::new();
        geometry.push_polyline(&[0.0, 150.0], &[0.0, 0.0]).unwrap();
        geometry.push_polyline(&[150.0, 150.0], &[0.0, 150.0]).unwrap();
        let mut attrs = EdgeAttributes::new();
        attrs.set_edge_count(2);
        attrs.set_distance_meters(EdgeId(0), 150.0).unwrap();
        attrs.set_distance_meters(EdgeId(1), 150.0).unwrap();
        attrs.set_street_name(EdgeId(0), Some("Main St".to_string())).unwrap();
        attrs.set_street_name(EdgeId(1), Some("Main St".to_string())).unwrap();

        let config = InstructionConfig::default();
        let instrs = generate(&geometry, &attrs, &[EdgeId(0), EdgeId(1)], &config).unwrap();
        assert_eq!(instrs.len(), 3);
        assert!(matches!(instrs[1].maneuver, Maneuver::KeepLeft | Maneuver::KeepRight));
        assert_eq!(instrs[1].distance_meters, 150.0);
    }

    #[test]
    fn trivial_route_is_a_single_arrive() {
        let geometry = EdgeGeometry::new();
        let attrs = EdgeAttributes::new();
        let config = InstructionConfig::default();
        let instrs = generate(&geometry, &attrs, &[], &config).unwrap();
        assert_eq!(instrs, vec![Instruction { maneuver: Maneuver::Arrive, street_name: None, distance_meters: 0.0 }]);
    }
}
