//! Error types surfaced at the pipeline boundary.

use thiserror::Error;

/// Result type alias using StormError.
pub type StormResult<T> = Result<T, StormError>;

/// Primary error type for product normalization.
#[derive(Debug, Error)]
pub enum StormError {
    // === Input Errors ===
    #[error("No markup (.kml) entry found in archive")]
    NoMarkupEntry,

    #[error("Corrupt archive: {0}")]
    CorruptArchive(String),

    #[error("Malformed markup: {0}")]
    MalformedMarkup(String),

    // === Request Errors ===
    #[error("Unknown product type: {0}")]
    UnknownProduct(String),

    #[error("Product '{product}' does not accept {given} input")]
    InputMismatch { product: String, given: &'static str },

    // === Wrapped ===
    #[error("Extraction failed for product '{product}'{}: {cause}", storm_suffix(.storm))]
    ExtractionFailed {
        product: String,
        storm: Option<String>,
        #[source]
        cause: Box<StormError>,
    },
}

fn storm_suffix(storm: &Option<String>) -> String {
    match storm {
        Some(id) => format!(" (storm {id})"),
        None => String::new(),
    }
}

impl StormError {
    /// Wrap an error with the product (and optionally storm) it was raised for.
    ///
    /// Already-wrapped errors are not wrapped a second time.
    pub fn in_product(self, product: impl Into<String>, storm: Option<&str>) -> Self {
        match self {
            wrapped @ StormError::ExtractionFailed { .. } => wrapped,
            cause => StormError::ExtractionFailed {
                product: product.into(),
                storm: storm.map(str::to_string),
                cause: Box::new(cause),
            },
        }
    }

    /// The innermost error, skipping any `ExtractionFailed` wrappers.
    pub fn root_cause(&self) -> &StormError {
        match self {
            StormError::ExtractionFailed { cause, .. } => cause.root_cause(),
            other => other,
        }
    }

    /// Stable machine-readable code for the calling dispatcher.
    pub fn error_code(&self) -> &'static str {
        match self.root_cause() {
            StormError::NoMarkupEntry => "NoMarkupEntry",
            StormError::CorruptArchive(_) => "CorruptArchive",
            StormError::MalformedMarkup(_) => "MalformedMarkup",
            StormError::UnknownProduct(_) => "UnknownProduct",
            StormError::InputMismatch { .. } => "InputMismatch",
            StormError::ExtractionFailed { .. } => "ExtractionFailed",
        }
    }

    /// Whether the failure came from the supplied bytes/text rather than the request.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self.root_cause(),
            StormError::NoMarkupEntry
                | StormError::CorruptArchive(_)
                | StormError::MalformedMarkup(_)
        )
    }
}
