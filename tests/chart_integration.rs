//! End-to-end chart computation for a fixed birth moment.

use natal_core::{compute_chart, ChartResult, HumanDesignResult};

const PHASE_NAMES: [&str; 8] = [
    "New",
    "Waxing Crescent",
    "First Quarter",
    "Waxing Gibbous",
    "Full",
    "Waning Gibbous",
    "Last Quarter",
    "Waning Crescent",
];

const ASPECT_NAMES: [&str; 5] = ["Conjunction", "Sextile", "Square", "Trine", "Opposition"];

fn fixed_chart() -> ChartResult {
    compute_chart("2000-01-01", "12:00", 40.7128, -74.0060)
}

#[test]
fn chart_carries_every_section() {
    let ChartResult::Chart(chart) = fixed_chart() else {
        panic!("fixed observer must produce a chart");
    };

    assert_eq!(chart.planets.len(), 10);
    for body in [
        "Sun", "Moon", "Mercury", "Venus", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune",
        "Pluto",
    ] {
        let entry = &chart.planets[body];
        assert!((0.0..360.0).contains(&entry.longitude), "{} longitude", body);
        assert!((0.0..=30.0).contains(&entry.degrees), "{} degrees", body);
    }

    assert_eq!(chart.houses.len(), 12);
    for i in 1..=12 {
        assert!(chart.houses.contains_key(&format!("house_{}", i)));
    }

    // 45 unordered pairs were scanned; only matches are kept
    assert!(chart.aspects.len() <= 45);
    for info in &chart.aspects {
        assert_ne!(info.bodies[0], info.bodies[1]);
    }

    assert!((0.0..200.0).contains(&chart.moon_phase.percentage));
    assert!(PHASE_NAMES.contains(&chart.moon_phase.phase.as_str()));

    match &chart.human_design {
        HumanDesignResult::Profile(profile) => {
            assert!((15..=24).contains(&profile.gates.len()));
        }
        HumanDesignResult::Error { error, .. } => panic!("human design failed: {}", error),
    }
}

#[test]
fn aspect_pairs_are_unique_and_named() {
    let ChartResult::Chart(chart) = fixed_chart() else {
        panic!("fixed observer must produce a chart");
    };
    for (i, a) in chart.aspects.iter().enumerate() {
        assert!(ASPECT_NAMES.contains(&a.aspect.name()));
        for b in &chart.aspects[i + 1..] {
            let same = a.bodies == b.bodies;
            let swapped = a.bodies == [b.bodies[1], b.bodies[0]];
            assert!(!same && !swapped, "duplicate pair {:?}", a.bodies);
        }
    }
}

#[test]
fn computation_is_idempotent() {
    assert_eq!(fixed_chart(), fixed_chart());
}

#[test]
fn json_shape_matches_the_contract() {
    let value = serde_json::to_value(fixed_chart()).unwrap();
    for key in [
        "sunSign",
        "moonSign",
        "ascendant",
        "midheaven",
        "planets",
        "aspects",
        "houses",
        "humanDesign",
        "moonPhase",
    ] {
        assert!(value.get(key).is_some(), "missing key {}", key);
    }
    let moon_phase = &value["moonPhase"];
    for key in ["percentage", "phase", "nextFull", "nextNew"] {
        assert!(moon_phase.get(key).is_some(), "missing moonPhase.{}", key);
    }
    // timestamps use the minute-precision wire format
    let next_full = moon_phase["nextFull"].as_str().unwrap();
    assert_eq!(next_full.len(), 16, "YYYY-MM-DD HH:MM, got {}", next_full);

    let hd = &value["humanDesign"];
    for key in ["type", "authority", "profile", "definition", "gates", "centers"] {
        assert!(hd.get(key).is_some(), "missing humanDesign.{}", key);
    }
}

#[test]
fn error_envelope_for_bad_input() {
    let value = serde_json::to_value(compute_chart("12:00", "2000-01-01", 0.0, 0.0)).unwrap();
    assert_eq!(value["sunSign"], "Unknown");
    assert!(value["error"].as_str().is_some());
}
