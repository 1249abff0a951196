//! Seeded pseudo Human Design profile generator.
//!
//! Not an astrological derivation: every field is drawn from fixed lookup
//! tables indexed by arithmetic on the birth inputs, plus a pseudo-random
//! stream seeded from those same inputs. The contract is determinism (same
//! four inputs, same profile) and the type/authority coupling, not any
//! particular random sequence. The stream is pinned to `StdRng` so existing
//! outputs stay stable across runs.

use chrono::{Datelike, NaiveDateTime, Timelike};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ChartError;

const TYPES: [&str; 5] = [
    "Generator",
    "Projector",
    "Manifestor",
    "Reflector",
    "Manifesting Generator",
];

const AUTHORITIES: [&str; 7] = [
    "Sacral",
    "Emotional",
    "Splenic",
    "Ego",
    "Self",
    "Mental Projector",
    "Lunar",
];

const PROFILES: [&str; 12] = [
    "1/3", "1/4", "2/4", "2/5", "3/5", "3/6", "4/6", "4/1", "5/1", "5/2", "6/2", "6/3",
];

const DEFINITIONS: [&str; 4] = ["Single", "Split", "Triple Split", "Quad Split"];

const CENTERS: [&str; 9] = [
    "Head",
    "Ajna",
    "Throat",
    "G",
    "Heart",
    "Solar Plexus",
    "Sacral",
    "Spleen",
    "Root",
];

const GATE_COUNT: u8 = 64;
const MIN_GATES: i64 = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HumanDesignProfile {
    #[serde(rename = "type")]
    pub hd_type: String,
    pub authority: String,
    pub profile: String,
    pub definition: String,
    pub gates: Vec<u8>,
    pub centers: Vec<String>,
}

/// Profile or error envelope; exactly one of the two ever leaves this
/// module, and serialization mirrors that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HumanDesignResult {
    Profile(HumanDesignProfile),
    Error {
        error: String,
        #[serde(rename = "type")]
        hd_type: String,
        authority: String,
    },
}

/// Generates the profile for a birth moment, degrading any failure to the
/// `{error, type: "Unknown", authority: "Unknown"}` envelope.
pub fn generate_profile(
    birth_date: &str,
    birth_time: &str,
    latitude: f64,
    longitude: f64,
) -> HumanDesignResult {
    match try_generate(birth_date, birth_time, latitude, longitude) {
        Ok(profile) => HumanDesignResult::Profile(profile),
        Err(err) => HumanDesignResult::Error {
            error: err.to_string(),
            hd_type: "Unknown".to_string(),
            authority: "Unknown".to_string(),
        },
    }
}

fn try_generate(
    birth_date: &str,
    birth_time: &str,
    latitude: f64,
    longitude: f64,
) -> Result<HumanDesignProfile, ChartError> {
    let birth = NaiveDateTime::parse_from_str(
        &format!("{} {}", birth_date, birth_time),
        "%Y-%m-%d %H:%M",
    )?;

    let seed = derive_seed(&birth, latitude, longitude);
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed as u64);
    debug!(seed, "seeded human design stream");

    let hd_type = TYPES[seed.rem_euclid(TYPES.len() as i64) as usize];

    // Sacral and Lunar authorities are tied to their types; the remaining
    // types index the head of the table by birth minute.
    let authority = match hd_type {
        "Generator" | "Manifesting Generator" => "Sacral",
        "Reflector" => "Lunar",
        _ => AUTHORITIES[birth.minute() as usize % (AUTHORITIES.len() - 2)],
    };

    let profile = PROFILES[(birth.day() + birth.month()) as usize % PROFILES.len()];
    let definition = DEFINITIONS[birth.year().rem_euclid(DEFINITIONS.len() as i32) as usize];

    let num_gates = (MIN_GATES + seed.rem_euclid(10)) as usize;
    let mut all_gates: Vec<u8> = (1..=GATE_COUNT).collect();
    all_gates.shuffle(&mut rng);
    let mut gates = all_gates[..num_gates].to_vec();
    gates.sort_unstable();

    let centers: Vec<String> = CENTERS
        .iter()
        .filter(|_| rng.gen_bool(0.5))
        .map(|c| c.to_string())
        .collect();

    Ok(HumanDesignProfile {
        hd_type: hd_type.to_string(),
        authority: authority.to_string(),
        profile: profile.to_string(),
        definition: definition.to_string(),
        gates,
        centers,
    })
}

/// Seed from the birth instant and coordinates: Unix timestamp plus both
/// coordinates in centidegrees, truncated.
fn derive_seed(birth: &NaiveDateTime, latitude: f64, longitude: f64) -> i64 {
    birth.and_utc().timestamp() + (latitude * 100.0) as i64 + (longitude * 100.0) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_for(date: &str, time: &str) -> HumanDesignProfile {
        match generate_profile(date, time, 40.7128, -74.0060) {
            HumanDesignResult::Profile(p) => p,
            HumanDesignResult::Error { error, .. } => panic!("unexpected error: {}", error),
        }
    }

    #[test]
    fn identical_inputs_reproduce_the_profile() {
        let a = generate_profile("1990-06-15", "08:30", 51.5074, -0.1278);
        let b = generate_profile("1990-06-15", "08:30", 51.5074, -0.1278);
        assert_eq!(a, b);
    }

    #[test]
    fn gate_count_and_range_hold() {
        for (date, time) in [
            ("2000-01-01", "12:00"),
            ("1985-03-22", "23:59"),
            ("1970-01-01", "00:00"),
            ("1999-12-31", "06:45"),
        ] {
            let p = profile_for(date, time);
            assert!((15..=24).contains(&p.gates.len()), "{} gates", p.gates.len());
            assert!(p.gates.iter().all(|&g| (1..=64).contains(&g)));
            assert!(p.gates.windows(2).all(|w| w[0] < w[1]), "sorted, distinct");
        }
    }

    #[test]
    fn authority_is_forced_by_type() {
        // sweep enough inputs to hit every type at least once
        for day in 1..=28 {
            for minute in [0, 7, 31, 59] {
                let date = format!("1992-04-{:02}", day);
                let time = format!("10:{:02}", minute);
                let p = profile_for(&date, &time);
                match p.hd_type.as_str() {
                    "Generator" | "Manifesting Generator" => {
                        assert_eq!(p.authority, "Sacral")
                    }
                    "Reflector" => assert_eq!(p.authority, "Lunar"),
                    _ => assert!(AUTHORITIES.contains(&p.authority.as_str())),
                }
            }
        }
    }

    #[test]
    fn centers_are_a_subset_of_the_nine() {
        let p = profile_for("2000-01-01", "12:00");
        assert!(p.centers.len() <= CENTERS.len());
        assert!(p.centers.iter().all(|c| CENTERS.contains(&c.as_str())));
    }

    #[test]
    fn fields_come_from_the_fixed_tables() {
        let p = profile_for("1977-11-03", "17:20");
        assert!(TYPES.contains(&p.hd_type.as_str()));
        assert!(PROFILES.contains(&p.profile.as_str()));
        assert!(DEFINITIONS.contains(&p.definition.as_str()));
    }

    #[test]
    fn malformed_input_degrades_to_envelope() {
        match generate_profile("not-a-date", "12:00", 0.0, 0.0) {
            HumanDesignResult::Error {
                hd_type, authority, ..
            } => {
                assert_eq!(hd_type, "Unknown");
                assert_eq!(authority, "Unknown");
            }
            HumanDesignResult::Profile(_) => panic!("expected an error envelope"),
        }
    }
}
