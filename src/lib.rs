//! Natal chart computation core.
//!
//! Computes planetary placements, aspects, Equal House cusps and the lunar
//! phase for a birth moment, plus a seeded pseudo Human Design profile, and
//! assembles everything into a single JSON-serializable chart result. Raw
//! body positions come from the `astro` crate (VSOP87, ELP-2000/82 and
//! Meeus' Pluto theory); everything downstream of those longitudes lives
//! here.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod aspects;
pub mod chart;
pub mod ephemeris;
pub mod houses;
pub mod human_design;

pub use aspects::{aspect_between, Aspect, AspectInfo};
pub use chart::{compute_chart, ChartData, ChartResult};
pub use ephemeris::{BodyLongitudes, Observer};
pub use houses::house_cusps;
pub use human_design::{generate_profile, HumanDesignProfile, HumanDesignResult};

// ---------------------------
// ## Enumerations
// ---------------------------

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CelestialBody {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl CelestialBody {
    /// All ten bodies in chart order.
    pub fn iter() -> impl Iterator<Item = CelestialBody> {
        [
            CelestialBody::Sun,
            CelestialBody::Moon,
            CelestialBody::Mercury,
            CelestialBody::Venus,
            CelestialBody::Mars,
            CelestialBody::Jupiter,
            CelestialBody::Saturn,
            CelestialBody::Uranus,
            CelestialBody::Neptune,
            CelestialBody::Pluto,
        ]
        .into_iter()
    }

    pub fn name(&self) -> &'static str {
        match self {
            CelestialBody::Sun => "Sun",
            CelestialBody::Moon => "Moon",
            CelestialBody::Mercury => "Mercury",
            CelestialBody::Venus => "Venus",
            CelestialBody::Mars => "Mars",
            CelestialBody::Jupiter => "Jupiter",
            CelestialBody::Saturn => "Saturn",
            CelestialBody::Uranus => "Uranus",
            CelestialBody::Neptune => "Neptune",
            CelestialBody::Pluto => "Pluto",
        }
    }
}

impl fmt::Display for CelestialBody {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries = 0,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub fn from_longitude(longitude: f64) -> Self {
        let normalized_longitude = longitude.rem_euclid(360.0);
        let sign_index = (normalized_longitude / 30.0).floor() as usize;
        match sign_index {
            0 => ZodiacSign::Aries,
            1 => ZodiacSign::Taurus,
            2 => ZodiacSign::Gemini,
            3 => ZodiacSign::Cancer,
            4 => ZodiacSign::Leo,
            5 => ZodiacSign::Virgo,
            6 => ZodiacSign::Libra,
            7 => ZodiacSign::Scorpio,
            8 => ZodiacSign::Sagittarius,
            9 => ZodiacSign::Capricorn,
            10 => ZodiacSign::Aquarius,
            11 => ZodiacSign::Pisces,
            _ => ZodiacSign::Aries, // Fallback
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let sign_str = match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        };
        write!(f, "{}", sign_str)
    }
}

// ---------------------------
// ## Placements
// ---------------------------

/// Position within the zodiac: sign plus degrees travelled into it.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub sign: ZodiacSign,
    pub degrees: f64,
}

impl Placement {
    /// Maps any ecliptic longitude (degrees, any real number) to a
    /// sign/degrees placement. Degrees-in-sign is reported to 2 decimals.
    pub fn from_longitude(longitude: f64) -> Self {
        let normalized = longitude.rem_euclid(360.0);
        Placement {
            sign: ZodiacSign::from_longitude(normalized),
            degrees: round2(normalized % 30.0),
        }
    }
}

/// Round to 2 decimal places for reporting.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ---------------------------
// ## Errors
// ---------------------------

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid birth date/time: {0}")]
    Parse(#[from] chrono::ParseError),
    #[error("ephemeris computation failed: {0}")]
    Ephemeris(String),
    #[error("no convergence searching for {0}")]
    NoConvergence(&'static str),
}
