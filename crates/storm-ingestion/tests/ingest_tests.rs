//! Tests for product dispatch and batch execution.

use bytes::Bytes;
use storm_common::{ProductType, StormError};
use storm_ingestion::{IngestJob, Ingester, IngestionError, PipelineConfig, ProductInput};
use test_utils::{build_kmz, fixtures, kmz_with_kml, write_temp_file};

fn archive(kml: &str) -> ProductInput {
    ProductInput::Archive(Bytes::from(kmz_with_kml(kml)))
}

fn adeck(text: &str) -> ProductInput {
    ProductInput::Text {
        text: text.to_string(),
        filename: "aal052024.dat".to_string(),
    }
}

// ============================================================================
// Single product dispatch
// ============================================================================

#[test]
fn test_archive_product() {
    let output = Ingester::default()
        .ingest(ProductType::StormSurge, &archive(fixtures::kml::SURGE), None)
        .unwrap();

    let collection = output.features().unwrap();
    assert_eq!(collection.len(), 4);
    assert_eq!(collection.source, "kmz");
}

#[test]
fn test_source_tag_from_config() {
    let ingester = Ingester::new(PipelineConfig {
        source_tag: "nhc-kmz".to_string(),
        ..PipelineConfig::default()
    });
    let output = ingester
        .ingest(ProductType::ForecastCone, &archive(fixtures::kml::CONE), None)
        .unwrap();
    assert_eq!(output.features().unwrap().source, "nhc-kmz");
}

#[test]
fn test_forecast_track_accepts_both_inputs() {
    let ingester = Ingester::default();

    let tracks = ingester
        .ingest(ProductType::ForecastTrack, &adeck(fixtures::adeck::AL05), None)
        .unwrap();
    let set = tracks.tracks().unwrap();
    assert_eq!(set.models_present, vec!["OFCL", "GFS", "AEMN", "AP03"]);
    assert_eq!(set.filename, "aal052024.dat");

    let features = ingester
        .ingest(ProductType::ForecastTrack, &archive(fixtures::kml::TRACK), None)
        .unwrap();
    assert_eq!(features.len(), 3);
    assert!(features.tracks().is_none());
}

#[test]
fn test_errors_carry_product_and_storm() {
    let kmz = build_kmz(&[("readme.txt", "no markup here")]);
    let err = Ingester::default()
        .ingest(
            ProductType::WindArrivalEarliest,
            &ProductInput::Archive(Bytes::from(kmz)),
            Some(fixtures::storms::AL05),
        )
        .unwrap_err();

    match &err {
        StormError::ExtractionFailed {
            product, storm, cause,
        } => {
            assert_eq!(product, "wind-arrival-earliest");
            assert_eq!(storm.as_deref(), Some("AL052024"));
            assert!(matches!(**cause, StormError::NoMarkupEntry));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.error_code(), "NoMarkupEntry");
    assert!(err.is_input_error());
}

#[test]
fn test_malformed_markup_wrapped() {
    let err = Ingester::default()
        .ingest(ProductType::Track, &archive("<kml><Document>"), None)
        .unwrap_err();
    assert_eq!(err.error_code(), "MalformedMarkup");
}

// ============================================================================
// Files
// ============================================================================

#[test]
fn test_ingest_file_detects_text() {
    let (_dir, path) = write_temp_file("aal052024.dat", fixtures::adeck::AL05.as_bytes());
    let output = Ingester::default()
        .ingest_file(ProductType::ForecastTrack, &path, None)
        .unwrap();
    assert_eq!(output.tracks().unwrap().filename, "aal052024.dat");
}

#[test]
fn test_ingest_file_archive() {
    let (_dir, path) = write_temp_file(
        "AL052024_PROB34.kmz",
        &kmz_with_kml(fixtures::kml::PROBABILITY),
    );
    let output = Ingester::default()
        .ingest_file(ProductType::WindSpeedProbability, &path, None)
        .unwrap();
    assert_eq!(output.len(), 3);
}

#[test]
fn test_ingest_missing_file() {
    let err = Ingester::default()
        .ingest_file(ProductType::Track, "/nonexistent/track.kmz", None)
        .unwrap_err();
    assert!(matches!(err, IngestionError::FileRead(_)));
    assert!(err.as_storm_error().is_none());
}

// ============================================================================
// Batches
// ============================================================================

#[test]
fn test_batch_outcomes_in_job_order() {
    let jobs = vec![
        IngestJob::new(ProductType::Track, archive(fixtures::kml::TRACK)).for_storm("AL052024"),
        IngestJob::new(
            ProductType::StormSurge,
            ProductInput::Archive(Bytes::from_static(b"PK\x03\x04garbage")),
        )
        .for_storm("AL052024"),
        IngestJob::new(ProductType::ForecastTrack, adeck(fixtures::adeck::AL05)),
        IngestJob::new(ProductType::StormSurge, adeck(fixtures::adeck::AL05)),
        IngestJob::new(ProductType::WindArrivalMostLikely, archive(fixtures::kml::ARRIVAL)),
    ];

    let ingester = Ingester::new(PipelineConfig {
        max_parallel_jobs: 2,
        ..PipelineConfig::default()
    });
    let outcomes = ingester.ingest_batch(jobs).unwrap();

    let products: Vec<_> = outcomes.iter().map(|o| o.product).collect();
    assert_eq!(
        products,
        vec![
            ProductType::Track,
            ProductType::StormSurge,
            ProductType::ForecastTrack,
            ProductType::StormSurge,
            ProductType::WindArrivalMostLikely,
        ]
    );

    assert!(outcomes[0].is_ok());
    assert_eq!(
        outcomes[1].result.as_ref().unwrap_err().error_code(),
        "CorruptArchive"
    );
    assert_eq!(outcomes[1].storm.as_deref(), Some("AL052024"));
    assert!(outcomes[2].is_ok());
    assert_eq!(
        outcomes[3].result.as_ref().unwrap_err().error_code(),
        "InputMismatch"
    );
    assert_eq!(outcomes[4].result.as_ref().unwrap().len(), 4);
}

#[test]
fn test_empty_batch() {
    assert!(Ingester::default().ingest_batch(Vec::new()).unwrap().is_empty());
}

#[test]
fn test_batch_matches_sequential() {
    let ingester = Ingester::default();
    let jobs: Vec<_> = ProductType::ALL
        .iter()
        .filter(|p| !p.accepts_text())
        .map(|p| IngestJob::new(*p, archive(fixtures::kml::PROBABILITY)))
        .collect();

    let sequential: Vec<_> = jobs
        .iter()
        .map(|job| ingester.ingest(job.product, &job.input, None).unwrap())
        .collect();
    let parallel: Vec<_> = ingester
        .ingest_batch(jobs)
        .unwrap()
        .into_iter()
        .map(|outcome| outcome.result.unwrap())
        .collect();

    assert_eq!(sequential, parallel);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_from_yaml_file() {
    let (_dir, path) = write_temp_file(
        "pipeline.yaml",
        b"max_parallel_jobs: 3\nsource_tag: nhc\n",
    );
    let config = PipelineConfig::from_yaml(&path).unwrap();
    assert_eq!(config.max_parallel_jobs, 3);
    assert_eq!(config.source_tag, "nhc");
}

#[test]
fn test_config_env_overrides() {
    std::env::set_var("STORM_MAX_PARALLEL_JOBS", "6");
    std::env::set_var("STORM_SOURCE_TAG", "env-tag");
    let config = PipelineConfig::from_env();
    std::env::remove_var("STORM_MAX_PARALLEL_JOBS");
    std::env::remove_var("STORM_SOURCE_TAG");

    let config = config.unwrap();
    assert_eq!(config.max_parallel_jobs, 6);
    assert_eq!(config.source_tag, "env-tag");
}
