//! Product dispatch: selector + input → normalized output.

use std::path::Path;

use bytes::Bytes;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, instrument};

use kmz_parser::{extract_collection, parse_markup, read_markup_entry};
use storm_common::{FeatureCollection, ModelTrackSet, ProductType, StormError, StormResult};

use crate::config::PipelineConfig;
use crate::error::{IngestionError, Result};

/// Raw input for one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductInput {
    /// KMZ archive (or bare KML) bytes.
    Archive(Bytes),
    /// A-deck text.
    Text { text: String, filename: String },
}

impl ProductInput {
    /// Classify raw file contents for `product`.
    ///
    /// Only text-accepting products can get `Text`, and only when the bytes
    /// are neither a zip archive nor markup.
    pub fn from_bytes(product: ProductType, data: Bytes, filename: &str) -> Self {
        if product.accepts_text() && !looks_like_archive(&data) {
            return ProductInput::Text {
                text: String::from_utf8_lossy(&data).into_owned(),
                filename: filename.to_string(),
            };
        }
        ProductInput::Archive(data)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ProductInput::Archive(_) => "archive",
            ProductInput::Text { .. } => "text",
        }
    }
}

fn looks_like_archive(data: &[u8]) -> bool {
    let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
    data.starts_with(b"PK")
        || data
            .iter()
            .find(|b| !b.is_ascii_whitespace())
            .is_some_and(|b| *b == b'<')
}

/// Normalized result of one product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProductOutput {
    Features(FeatureCollection),
    Tracks(ModelTrackSet),
}

impl ProductOutput {
    /// Number of features or model tracks.
    pub fn len(&self) -> usize {
        match self {
            ProductOutput::Features(collection) => collection.len(),
            ProductOutput::Tracks(set) => set.tracks.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn features(&self) -> Option<&FeatureCollection> {
        match self {
            ProductOutput::Features(collection) => Some(collection),
            ProductOutput::Tracks(_) => None,
        }
    }

    pub fn tracks(&self) -> Option<&ModelTrackSet> {
        match self {
            ProductOutput::Tracks(set) => Some(set),
            ProductOutput::Features(_) => None,
        }
    }
}

/// One entry of a batch.
#[derive(Debug, Clone)]
pub struct IngestJob {
    pub product: ProductType,
    pub input: ProductInput,
    /// Storm identifier used to label errors.
    pub storm: Option<String>,
}

impl IngestJob {
    pub fn new(product: ProductType, input: ProductInput) -> Self {
        Self {
            product,
            input,
            storm: None,
        }
    }

    pub fn for_storm(mut self, storm: impl Into<String>) -> Self {
        self.storm = Some(storm.into());
        self
    }
}

/// Result of one batch entry, in submission order.
#[derive(Debug)]
pub struct JobOutcome {
    pub product: ProductType,
    pub storm: Option<String>,
    pub result: StormResult<ProductOutput>,
}

impl JobOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Entry point for normalizing products.
///
/// Holds no per-call state; every call is independent.
#[derive(Debug, Clone, Default)]
pub struct Ingester {
    config: PipelineConfig,
}

impl Ingester {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Normalize one product.
    ///
    /// Failures are wrapped with the product (and storm, when given).
    #[instrument(skip(self, input), fields(input = input.kind()))]
    pub fn ingest(
        &self,
        product: ProductType,
        input: &ProductInput,
        storm: Option<&str>,
    ) -> StormResult<ProductOutput> {
        self.dispatch(product, input)
            .map_err(|e| e.in_product(product.as_str(), storm))
    }

    fn dispatch(&self, product: ProductType, input: &ProductInput) -> StormResult<ProductOutput> {
        match input {
            ProductInput::Archive(data) => {
                let entry = read_markup_entry(data)?;
                let root = parse_markup(&entry.text)?;
                let collection = extract_collection(product, &root, &self.config.source_tag);
                debug!(entry = %entry.name, features = collection.len(), "Decoded archive product");
                Ok(ProductOutput::Features(collection))
            }
            ProductInput::Text { text, filename } if product.accepts_text() => {
                let (set, stats) = adeck_parser::parse_adeck_with_stats(text, filename);
                debug!(
                    filename = %filename,
                    models = set.tracks.len(),
                    lines = stats.lines_read,
                    skipped = stats.total_skipped(),
                    "Decoded A-deck product"
                );
                Ok(ProductOutput::Tracks(set))
            }
            ProductInput::Text { .. } => Err(StormError::InputMismatch {
                product: product.to_string(),
                given: "text",
            }),
        }
    }

    /// Read a file and normalize it as `product`.
    pub fn ingest_file<P: AsRef<Path>>(
        &self,
        product: ProductType,
        path: P,
        storm: Option<&str>,
    ) -> Result<ProductOutput> {
        let path = path.as_ref();
        let input = read_input(product, path)?;
        Ok(self.ingest(product, &input, storm)?)
    }

    /// Normalize independent products on a bounded worker pool.
    ///
    /// Every job runs to completion; outcomes come back in job order.
    pub fn ingest_batch(&self, jobs: Vec<IngestJob>) -> Result<Vec<JobOutcome>> {
        if jobs.is_empty() {
            return Ok(Vec::new());
        }

        let workers = self.config.workers_for(jobs.len());
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("storm-ingest-{}", i))
            .build()
            .map_err(|e| IngestionError::WorkerPool(e.to_string()))?;

        debug!(jobs = jobs.len(), workers, "Running ingest batch");

        let outcomes: Vec<JobOutcome> = pool.install(|| {
            jobs.into_par_iter()
                .map(|job| {
                    let result = self.ingest(job.product, &job.input, job.storm.as_deref());
                    JobOutcome {
                        product: job.product,
                        storm: job.storm,
                        result,
                    }
                })
                .collect()
        });

        Ok(outcomes)
    }
}

/// Read a product file from disk.
pub fn read_input(product: ProductType, path: &Path) -> Result<ProductInput> {
    let data = std::fs::read(path)?;
    let filename = file_name(path);
    Ok(ProductInput::from_bytes(product, Bytes::from(data), &filename))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
