//! Chart assembly: orchestrates the ephemeris adapter, zodiac mapping,
//! aspect detection, house cusps and the human design generator into the
//! single result structure consumers render from.
//!
//! The boundary is total: any failure in the pipeline collapses the whole
//! result to the `{error, sunSign: "Unknown"}` envelope. Partial charts are
//! never emitted.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aspects::{aspect_between, AspectInfo};
use crate::ephemeris::Observer;
use crate::houses::{house_cusps, MIDHEAVEN_INDEX};
use crate::human_design::{generate_profile, HumanDesignResult};
use crate::{round2, CelestialBody, ChartError, Placement, ZodiacSign};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Phase-name buckets over the [0, 200) phase metric. Boundaries are
/// strict-less-than thresholds in ascending order; the last name takes the
/// remainder.
const PHASE_BUCKETS: [(f64, &str); 7] = [
    (25.0, "New"),
    (50.0, "Waxing Crescent"),
    (75.0, "First Quarter"),
    (100.0, "Waxing Gibbous"),
    (125.0, "Full"),
    (150.0, "Waning Gibbous"),
    (175.0, "Last Quarter"),
];
const FINAL_PHASE: &str = "Waning Crescent";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetEntry {
    pub sign: ZodiacSign,
    pub degrees: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoonPhaseInfo {
    pub percentage: f64,
    pub phase: String,
    #[serde(rename = "nextFull")]
    pub next_full: String,
    #[serde(rename = "nextNew")]
    pub next_new: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub sun_sign: ZodiacSign,
    pub moon_sign: ZodiacSign,
    pub ascendant: ZodiacSign,
    pub midheaven: ZodiacSign,
    pub planets: BTreeMap<String, PlanetEntry>,
    pub aspects: Vec<AspectInfo>,
    pub houses: BTreeMap<String, Placement>,
    pub human_design: HumanDesignResult,
    pub moon_phase: MoonPhaseInfo,
}

/// Complete chart or error envelope; serialization mirrors whichever was
/// produced, never a mix of the two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChartResult {
    Chart(Box<ChartData>),
    Error {
        error: String,
        #[serde(rename = "sunSign")]
        sun_sign: String,
    },
}

/// Computes the full chart for a birth moment, degrading every failure to
/// the error envelope.
pub fn compute_chart(
    birth_date: &str,
    birth_time: &str,
    latitude: f64,
    longitude: f64,
) -> ChartResult {
    match try_compute(birth_date, birth_time, latitude, longitude) {
        Ok(data) => ChartResult::Chart(Box::new(data)),
        Err(err) => ChartResult::Error {
            error: err.to_string(),
            sun_sign: "Unknown".to_string(),
        },
    }
}

fn try_compute(
    birth_date: &str,
    birth_time: &str,
    latitude: f64,
    longitude: f64,
) -> Result<ChartData, ChartError> {
    let birth = NaiveDateTime::parse_from_str(
        &format!("{} {}", birth_date, birth_time),
        TIMESTAMP_FORMAT,
    )?;
    let observer = Observer::new(birth, latitude, longitude);

    let longitudes = observer.body_longitudes();
    let planets: BTreeMap<String, PlanetEntry> = longitudes
        .iter()
        .map(|(body, lon)| {
            let placement = Placement::from_longitude(lon);
            (
                body.name().to_string(),
                PlanetEntry {
                    sign: placement.sign,
                    degrees: placement.degrees,
                    longitude: round2(lon),
                },
            )
        })
        .collect();

    // every unordered pair once, in chart order
    let bodies: Vec<CelestialBody> = CelestialBody::iter().collect();
    let mut aspects = Vec::new();
    for (i, &body_a) in bodies.iter().enumerate() {
        for &body_b in &bodies[i + 1..] {
            if let Some(aspect) =
                aspect_between(longitudes.get(body_a), longitudes.get(body_b))
            {
                aspects.push(AspectInfo {
                    bodies: [body_a, body_b],
                    aspect,
                });
            }
        }
    }
    debug!(aspect_count = aspects.len(), "aspect scan complete");

    let cusps = house_cusps(observer.local_sidereal_deg());
    let ascendant = Placement::from_longitude(cusps[0]);
    let midheaven = Placement::from_longitude(cusps[MIDHEAVEN_INDEX]);
    let houses: BTreeMap<String, Placement> = cusps
        .iter()
        .enumerate()
        .map(|(i, &cusp)| (format!("house_{}", i + 1), Placement::from_longitude(cusp)))
        .collect();

    let human_design = generate_profile(birth_date, birth_time, latitude, longitude);

    let metric = observer.moon_phase_metric();
    let moon_phase = MoonPhaseInfo {
        percentage: round2(metric),
        phase: phase_name(metric).to_string(),
        next_full: observer.next_full_moon()?.format(TIMESTAMP_FORMAT).to_string(),
        next_new: observer.next_new_moon()?.format(TIMESTAMP_FORMAT).to_string(),
    };

    Ok(ChartData {
        sun_sign: planets["Sun"].sign,
        moon_sign: planets["Moon"].sign,
        ascendant: ascendant.sign,
        midheaven: midheaven.sign,
        planets,
        aspects,
        houses,
        human_design,
        moon_phase,
    })
}

/// Buckets the phase metric into one of the eight fixed names.
fn phase_name(metric: f64) -> &'static str {
    for (threshold, name) in PHASE_BUCKETS {
        if metric < threshold {
            return name;
        }
    }
    FINAL_PHASE
}
