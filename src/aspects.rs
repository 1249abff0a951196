//! Aspect detection between pairs of ecliptic longitudes.
//!
//! The table below is a compatibility contract: entries are tested in
//! declared order and the first angle whose orb contains the separation
//! wins, even where orbs overlap. Matching by closest angle instead would
//! change results for borderline separations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::CelestialBody;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Aspect {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl Aspect {
    pub fn name(&self) -> &'static str {
        match self {
            Aspect::Conjunction => "Conjunction",
            Aspect::Sextile => "Sextile",
            Aspect::Square => "Square",
            Aspect::Trine => "Trine",
            Aspect::Opposition => "Opposition",
        }
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// (exact angle, orb) pairs, in match-priority order.
const ASPECT_TABLE: [(f64, Aspect, f64); 5] = [
    (0.0, Aspect::Conjunction, 10.0),
    (60.0, Aspect::Sextile, 6.0),
    (90.0, Aspect::Square, 8.0),
    (120.0, Aspect::Trine, 8.0),
    (180.0, Aspect::Opposition, 10.0),
];

/// An aspect found between two bodies, as it appears in the chart output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AspectInfo {
    pub bodies: [CelestialBody; 2],
    pub aspect: Aspect,
}

/// Tests two ecliptic longitudes (degrees) for an aspect.
///
/// The separation is folded onto the shorter arc, so the result lies in
/// [0, 180] and the function is symmetric in its arguments.
pub fn aspect_between(lon_a: f64, lon_b: f64) -> Option<Aspect> {
    let diff = (lon_a - lon_b).abs() % 360.0;
    let separation = diff.min(360.0 - diff);

    for (angle, aspect, orb) in ASPECT_TABLE {
        if (separation - angle).abs() <= orb {
            return Some(aspect);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_and_near_aspects() {
        assert_eq!(aspect_between(10.0, 10.0), Some(Aspect::Conjunction));
        assert_eq!(aspect_between(0.0, 60.0), Some(Aspect::Sextile));
        assert_eq!(aspect_between(5.0, 97.0), Some(Aspect::Square));
        assert_eq!(aspect_between(10.0, 130.0), Some(Aspect::Trine));
        // separation 190 folds to 170, inside the 10 deg opposition orb
        assert_eq!(aspect_between(10.0, 200.0), Some(Aspect::Opposition));
    }

    #[test]
    fn separations_outside_every_orb() {
        assert_eq!(aspect_between(10.0, 47.0), None);
        assert_eq!(aspect_between(0.0, 30.0), None);
        assert_eq!(aspect_between(0.0, 105.0), None);
    }

    #[test]
    fn detection_is_symmetric() {
        for (a, b) in [(10.0, 200.0), (0.0, 60.0), (33.3, 127.9), (350.0, 5.0)] {
            assert_eq!(aspect_between(a, b), aspect_between(b, a));
        }
    }

    #[test]
    fn wraparound_uses_shorter_arc() {
        // 350 and 5 are 15 deg apart across the wrap, not 345
        assert_eq!(aspect_between(350.0, 5.0), None);
        assert_eq!(aspect_between(355.0, 2.0), Some(Aspect::Conjunction));
    }

    #[test]
    fn first_matching_entry_wins() {
        // separation 10 is inside the conjunction orb only
        assert_eq!(aspect_between(0.0, 10.0), Some(Aspect::Conjunction));
        // separation 54 is sextile territory, conjunction tested first missed
        assert_eq!(aspect_between(0.0, 54.0), Some(Aspect::Sextile));
    }
}
