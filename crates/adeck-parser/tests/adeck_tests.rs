//! Tests for A-deck parsing against realistic multi-model files.

use adeck_parser::{parse_adeck, parse_adeck_with_stats, SkipReason};
use test_utils::{adeck_line, adeck_track, assert_approx_eq, fixtures};

// ============================================================================
// Cycle and model selection
// ============================================================================

#[test]
fn test_fixture_file() {
    let (set, stats) = parse_adeck_with_stats(fixtures::adeck::AL05, "aal052024.dat");

    assert_eq!(set.filename, "aal052024.dat");
    assert_eq!(set.cycle, fixtures::storms::AL05_CYCLE);
    assert_eq!(set.models_present, vec!["OFCL", "GFS", "AEMN", "AP03"]);

    assert_eq!(stats.lines_read, 11);
    assert_eq!(stats.kept, 6);
    assert_eq!(stats.skipped_for(SkipReason::TooFewFields), 2);
    assert_eq!(stats.skipped_for(SkipReason::OtherCycle), 1);
    assert_eq!(stats.skipped_for(SkipReason::UnknownModel), 1);
    assert_eq!(stats.skipped_for(SkipReason::DuplicateTau), 1);
    assert_eq!(stats.total_skipped(), 5);
}

#[test]
fn test_latest_cycle_wins() {
    let text = [
        adeck_line("AL", 5, "2024081900", "OFCL", 0, 26.0, -70.0, Some(70)),
        adeck_line("AL", 5, "2024081812", "OFCL", 0, 25.0, -69.0, Some(65)),
    ]
    .join("\n");
    let set = parse_adeck(&text, "");
    assert_eq!(set.cycle, "2024081900");
    assert_eq!(set.tracks.len(), 1);
    assert_eq!(set.tracks[0].points[0].vmax, Some(70));
    assert_eq!(
        set.cycle_time().unwrap().to_rfc3339(),
        "2024-08-19T00:00:00+00:00"
    );
}

#[test]
fn test_model_ids_uppercased() {
    let text = adeck_line("AL", 5, "2024081812", "ofcl", 0, 25.0, -69.0, Some(65));
    let set = parse_adeck(&text, "");
    assert_eq!(set.models_present, vec!["OFCL"]);
    assert!(set.track("ofcl").is_some());
}

// ============================================================================
// Dedup and ordering
// ============================================================================

#[test]
fn test_first_record_per_tau_wins() {
    let set = parse_adeck(fixtures::adeck::AL05, "");
    let ofcl = set.track("OFCL").unwrap();

    assert_eq!(ofcl.points.len(), 2);
    let tau12 = ofcl.point_at(12).unwrap();
    assert_eq!(tau12.vmax, Some(60));
    assert_approx_eq!(tau12.lat, 20.0, 1e-9);
    assert_approx_eq!(tau12.lon, -65.5, 1e-9);
}

#[test]
fn test_priority_order() {
    let text = ["AP03", "OFCL", "GFS", "AEMN"]
        .iter()
        .map(|model| adeck_track("2024081812", model, 2, 20.0, -60.0))
        .collect::<Vec<_>>()
        .join("\n");
    let set = parse_adeck(&text, "");
    assert_eq!(set.models_present, vec!["OFCL", "GFS", "AEMN", "AP03"]);
    assert!(set.tracks.iter().all(|t| t.points.len() == 2));
}

// ============================================================================
// Field decoding
// ============================================================================

#[test]
fn test_hemispheres_and_missing_wind() {
    let set = parse_adeck(fixtures::adeck::AL05, "");

    let aemn = set.track("AEMN").unwrap().point_at(24).unwrap();
    assert_approx_eq!(aemn.lat, -21.5, 1e-9);
    assert_approx_eq!(aemn.lon, 179.5, 1e-9);

    let gfs = set.track("GFS").unwrap().point_at(0).unwrap();
    assert_eq!(gfs.vmax, None);
}

#[test]
fn test_blank_wind_field() {
    let text = adeck_line("EP", 12, "2024090100", "GFS", 0, 15.5, -105.0, None);
    let set = parse_adeck(&text, "");
    assert_eq!(set.tracks[0].points[0].vmax, None);
}

#[test]
fn test_track_set_json_shape() {
    let set = parse_adeck(fixtures::adeck::AL05, "aal052024.dat");
    let json = serde_json::to_value(&set).unwrap();
    assert_eq!(json["modelsPresent"][0], "OFCL");
    assert_eq!(json["tracks"][0]["modelId"], "OFCL");
    assert_eq!(json["tracks"][0]["points"][0]["tau"], 0);
    assert!(json["tracks"][1]["points"][0]["vmax"].is_null());
}

#[test]
fn test_only_garbage() {
    let (set, stats) = parse_adeck_with_stats("not,an,adeck\nAL, 05, bad", "x.dat");
    assert!(set.is_empty());
    assert!(set.cycle.is_empty());
    assert_eq!(stats.skipped_for(SkipReason::TooFewFields), 2);
}

#[test]
fn test_east_longitudes_wrap_past_dateline() {
    let text = [
        "WP, 10, 2024090100, 03, OFCL,   0, 155N, 1850E,  45, 1000, TS",
        "WP, 10, 2024090100, 03, OFCL,  12, 160N, 3500E,  50, 1000, TS",
        "WP, 10, 2024090100, 03, OFCL,  24, 165N, 1800E,  55, 1000, TS",
    ]
    .join("\n");
    let set = parse_adeck(&text, "bwp102024.dat");
    let ofcl = set.track("OFCL").unwrap();
    assert_eq!(ofcl.points.len(), 3);
    assert_approx_eq!(ofcl.points[0].lon, -175.0, 1e-9);
    assert_approx_eq!(ofcl.points[1].lon, -10.0, 1e-9);
    assert_approx_eq!(ofcl.points[2].lon, 180.0, 1e-9);
}

#[test]
fn test_out_of_range_longitudes_skipped() {
    let text = [
        "AL, 05, 2024081812, 03, OFCL, 0, 251N, 1.0e300W, 65",
        "AL, 05, 2024081812, 03, OFCL, 0, 251N, 1.0e999W, 65",
        "AL, 05, 2024081812, 03, OFCL, 0, 251N, infW, 65",
        "AL, 05, 2024081812, 03, OFCL, 0, 251N, 99999E, 65",
        &adeck_line("AL", 5, "2024081812", "OFCL", 0, 25.1, -80.2, Some(65)),
    ]
    .join("\n");
    let (set, stats) = parse_adeck_with_stats(&text, "");
    assert_eq!(stats.skipped_for(SkipReason::Undecodable), 4);
    assert_eq!(stats.kept, 1);
    let point = set.track("OFCL").unwrap().point_at(0).unwrap();
    assert_approx_eq!(point.lon, -80.2, 1e-9);
}
