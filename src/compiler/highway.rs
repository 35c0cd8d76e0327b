//! The closed set of OSM `highway` tag values this system treats as
//! routable, per `spec.md` §4.4.

pub const ROUTABLE_HIGHWAYS: &[&str] = &[
    "motorway",
    "trunk",
    "primary",
    "secondary",
    "tertiary",
    "unclassified",
    "residential",
    "living_street",
    "service",
    "motorway_link",
    "trunk_link",
    "primary_link",
    "secondary_link",
    "tertiary_link",
];

pub fn is_routable_highway(value: &str) -> bool {
    ROUTABLE_HIGHWAYS.contains(&value)
}
