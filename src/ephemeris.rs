//! Adapter over the `astro` crate.
//!
//! Marshals an observer (naive birth timestamp plus geographic coordinates)
//! into the inputs the astronomical library wants, and its radian outputs
//! into the degree-based longitudes the rest of the crate works with.
//! Planets Mercury through Neptune report VSOP87 heliocentric longitudes,
//! Pluto Meeus' heliocentric theory, and the Sun and Moon geocentric
//! ecliptic longitudes. Positions are geometric: no refraction or
//! atmospheric model is applied anywhere.

use chrono::{DateTime, NaiveDateTime};
use tracing::debug;

use crate::{CelestialBody, ChartError};

/// Days of the Julian period elapsed at the Unix epoch.
const JD_UNIX_EPOCH: f64 = 2440587.5;

/// Seconds per day.
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Sun-Moon elongation at full moon, degrees.
const FULL_MOON_ELONGATION: f64 = 180.0;

/// Scan window for lunar phase events; comfortably over one synodic month.
const PHASE_SCAN_DAYS: f64 = 35.0;
const PHASE_SCAN_STEP_DAYS: f64 = 0.5;
const PHASE_BISECT_ITERATIONS: usize = 50;

/// Birth moment and place. Immutable once constructed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Observer {
    pub date_time: NaiveDateTime,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

/// Ecliptic longitudes for the ten chart bodies, in chart order.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyLongitudes {
    entries: Vec<(CelestialBody, f64)>,
}

impl BodyLongitudes {
    pub fn get(&self, body: CelestialBody) -> f64 {
        // the entry set is fixed, every body is always present
        self.entries
            .iter()
            .find(|(b, _)| *b == body)
            .map(|(_, lon)| *lon)
            .unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CelestialBody, f64)> + '_ {
        self.entries.iter().copied()
    }
}

impl Observer {
    pub fn new(date_time: NaiveDateTime, latitude_deg: f64, longitude_deg: f64) -> Self {
        Observer {
            date_time,
            latitude_deg,
            longitude_deg,
        }
    }

    /// Julian Day of the observer's instant, via the Unix epoch offset.
    /// Birth input is minute precision, so second-level accuracy suffices.
    pub fn julian_day(&self) -> f64 {
        self.date_time.and_utc().timestamp() as f64 / SECONDS_PER_DAY + JD_UNIX_EPOCH
    }

    /// Ecliptic longitudes in degrees for all ten bodies.
    pub fn body_longitudes(&self) -> BodyLongitudes {
        let jd = self.julian_day();
        let entries: Vec<_> = CelestialBody::iter()
            .map(|body| (body, body_longitude_deg(body, jd)))
            .collect();
        debug!(jd, count = entries.len(), "computed body longitudes");
        BodyLongitudes { entries }
    }

    /// Local sidereal time as an angle in [0, 360) degrees.
    ///
    /// Greenwich mean sidereal time from the library, shifted east by the
    /// observer's longitude.
    pub fn local_sidereal_deg(&self) -> f64 {
        let gst_deg = astro::time::mn_sidr(self.julian_day()).to_degrees();
        (gst_deg + self.longitude_deg).rem_euclid(360.0)
    }

    /// Sun-Moon elongation folded to [0, 360).
    pub fn moon_elongation_deg(&self) -> f64 {
        elongation_deg(self.julian_day())
    }

    /// Lunar phase metric in [0, 200): fraction of the synodic cycle
    /// elapsed, scaled so 0 is new and 100 full.
    pub fn moon_phase_metric(&self) -> f64 {
        self.moon_elongation_deg() / 360.0 * 200.0
    }

    /// Instant of the next full moon after the observer's date.
    pub fn next_full_moon(&self) -> Result<NaiveDateTime, ChartError> {
        self.next_phase_event(FULL_MOON_ELONGATION, "full moon")
    }

    /// Instant of the next new moon after the observer's date.
    pub fn next_new_moon(&self) -> Result<NaiveDateTime, ChartError> {
        self.next_phase_event(0.0, "new moon")
    }

    /// Coarse scan plus bisection on f(t) = wrap(elongation(t) - target).
    /// Zero crossings of the wrapped difference are the phase events; sign
    /// changes caused by the +-180 wrap itself are rejected.
    fn next_phase_event(
        &self,
        target_deg: f64,
        label: &'static str,
    ) -> Result<NaiveDateTime, ChartError> {
        let jd_start = self.julian_day();
        let f = |jd: f64| normalize_to_pm180(elongation_deg(jd) - target_deg);

        let mut t_prev = jd_start;
        let mut f_prev = f(t_prev);
        let steps = (PHASE_SCAN_DAYS / PHASE_SCAN_STEP_DAYS).ceil() as usize;

        for _ in 0..steps {
            let t_curr = t_prev + PHASE_SCAN_STEP_DAYS;
            let f_curr = f(t_curr);
            if is_genuine_crossing(f_prev, f_curr) {
                let jd_event = bisect(&f, t_prev, f_prev, t_curr);
                debug!(target_deg, jd_event, "lunar {} found", label);
                return jd_to_datetime(jd_event);
            }
            t_prev = t_curr;
            f_prev = f_curr;
        }
        Err(ChartError::NoConvergence(label))
    }
}

/// One body's ecliptic longitude in degrees at a Julian Day.
fn body_longitude_deg(body: CelestialBody, jd: f64) -> f64 {
    use astro::planet::{heliocent_coords, Planet};

    let lon_rad = match body {
        CelestialBody::Sun => astro::sun::geocent_ecl_pos(jd).0.long,
        CelestialBody::Moon => astro::lunar::geocent_ecl_pos(jd).0.long,
        CelestialBody::Mercury => heliocent_coords(&Planet::Mercury, jd).0,
        CelestialBody::Venus => heliocent_coords(&Planet::Venus, jd).0,
        CelestialBody::Mars => heliocent_coords(&Planet::Mars, jd).0,
        CelestialBody::Jupiter => heliocent_coords(&Planet::Jupiter, jd).0,
        CelestialBody::Saturn => heliocent_coords(&Planet::Saturn, jd).0,
        CelestialBody::Uranus => heliocent_coords(&Planet::Uranus, jd).0,
        CelestialBody::Neptune => heliocent_coords(&Planet::Neptune, jd).0,
        CelestialBody::Pluto => astro::pluto::heliocent_pos(jd).0,
    };
    lon_rad.to_degrees().rem_euclid(360.0)
}

/// Geocentric Sun-Moon elongation in [0, 360) degrees.
fn elongation_deg(jd: f64) -> f64 {
    let sun_lon = astro::sun::geocent_ecl_pos(jd).0.long.to_degrees();
    let moon_lon = astro::lunar::geocent_ecl_pos(jd).0.long.to_degrees();
    (moon_lon - sun_lon).rem_euclid(360.0)
}

/// Normalize an angle to (-180, +180].
fn normalize_to_pm180(deg: f64) -> f64 {
    let mut d = deg % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}

/// A genuine zero crossing has both samples small in magnitude; a jump from
/// ~+180 to ~-180 is the wrap discontinuity, not an event.
fn is_genuine_crossing(f_a: f64, f_b: f64) -> bool {
    f_a * f_b < 0.0 && (f_a - f_b).abs() < 270.0
}

/// Bisect a bracketed zero crossing down to sub-second width.
fn bisect(f: &dyn Fn(f64) -> f64, mut t_a: f64, mut f_a: f64, mut t_b: f64) -> f64 {
    for _ in 0..PHASE_BISECT_ITERATIONS {
        let t_mid = (t_a + t_b) / 2.0;
        if t_b - t_a < 0.5 / SECONDS_PER_DAY {
            return t_mid;
        }
        let f_mid = f(t_mid);
        if is_genuine_crossing(f_a, f_mid) {
            t_b = t_mid;
        } else {
            t_a = t_mid;
            f_a = f_mid;
        }
    }
    (t_a + t_b) / 2.0
}

/// Julian Day back to a naive UTC timestamp, rounded to the second.
fn jd_to_datetime(jd: f64) -> Result<NaiveDateTime, ChartError> {
    let secs = ((jd - JD_UNIX_EPOCH) * SECONDS_PER_DAY).round() as i64;
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| ChartError::Ephemeris(format!("julian day {} out of range", jd)))
}
