//! Tuning constants for the engine, grouped the way the teacher crate
//! groups its configuration structs (plain `Default`-bearing structs rather
//! than a generic plugin-config system, since this engine has no plugin
//! surface to configure).

/// Grid spatial index tuning. Default cell size (1 km) matches the "regional
/// data" guidance in `spec.md` §4.7; `max_ring` bounds the ring search so
/// every query has a deterministic worst case.
#[derive(Copy, Clone, Debug)]
pub struct SnapConfig {
    pub cell_size_meters: f64,
    pub max_ring: usize,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            cell_size_meters: 1000.0,
            max_ring: 32,
        }
    }
}

/// Instruction-generation tuning: the sharp-bend angle threshold and the
/// spam-guard distance below which a sharp bend on an unchanged street name
/// is suppressed rather than emitted as `KeepLeft`/`KeepRight`.
#[derive(Copy, Clone, Debug)]
pub struct InstructionConfig {
    pub sharp_bend_degrees: f64,
    pub spam_guard_meters: f64,
    pub emit_sharp_bends: bool,
}

impl Default for InstructionConfig {
    fn default() -> Self {
        Self {
            sharp_bend_degrees: 50.0,
            spam_guard_meters: 120.0,
            emit_sharp_bends: true,
        }
    }
}
