//! Equal House cusp calculation.
//!
//! The Ascendant is derived from local sidereal time and the remaining
//! cusps follow at exact 30 degree intervals. More precise systems
//! (Placidus, Koch) need the observer's latitude and an obliquity model;
//! this crate deliberately fixes the Equal House system.

/// Number of houses in a chart.
pub const HOUSE_COUNT: usize = 12;

/// Index of the Midheaven (10th house cusp) in the cusp array.
pub const MIDHEAVEN_INDEX: usize = 9;

/// Computes the 12 Equal House cusps from local sidereal time in degrees.
///
/// `cusps[0]` is the Ascendant, `cusps[MIDHEAVEN_INDEX]` the Midheaven.
/// All values are normalized to [0, 360).
pub fn house_cusps(sidereal_time_deg: f64) -> [f64; HOUSE_COUNT] {
    let ascendant_deg = (sidereal_time_deg - 90.0).rem_euclid(360.0);

    let mut cusps = [0.0; HOUSE_COUNT];
    for (i, cusp) in cusps.iter_mut().enumerate() {
        *cusp = (ascendant_deg + i as f64 * 30.0).rem_euclid(360.0);
    }
    cusps
}
