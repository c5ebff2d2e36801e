//! Tropical cyclone product ingestion.
//!
//! Turns a product selector plus raw input into normalized output:
//!
//! - KMZ/KML archives go through `kmz-parser` and come back as a
//!   `FeatureCollection`.
//! - A-deck text goes through `adeck-parser` and comes back as a
//!   `ModelTrackSet`.
//!
//! `forecast-track` accepts either. Batches of independent products run on a
//! bounded `rayon` pool sized by [`PipelineConfig`].

pub mod config;
pub mod error;
mod ingester;

// Re-exports
pub use config::PipelineConfig;
pub use error::{IngestionError, Result};
pub use ingester::{read_input, IngestJob, Ingester, JobOutcome, ProductInput, ProductOutput};
