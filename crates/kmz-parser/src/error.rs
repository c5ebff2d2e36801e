//! Error types for KMZ/KML reading.

use storm_common::StormError;
use thiserror::Error;

/// Result type for KMZ parser operations.
pub type KmzResult<T> = Result<T, KmzError>;

/// Fatal errors while reading an archive or its markup.
///
/// Anything recoverable (a placemark without geometry, a bad coordinate
/// tuple) is skipped by the extractors and never shows up here.
#[derive(Error, Debug)]
pub enum KmzError {
    /// The container could not be opened or the selected entry could not be read
    #[error("Corrupt archive: {0}")]
    CorruptArchive(String),

    /// No entry with a `.kml` extension
    #[error("No markup (.kml) entry found in archive")]
    NoMarkupEntry,

    /// The markup document is not well-formed
    #[error("Malformed markup at byte {position}: {reason}")]
    MalformedMarkup { position: usize, reason: String },
}

impl KmzError {
    pub(crate) fn malformed(position: usize, reason: impl Into<String>) -> Self {
        KmzError::MalformedMarkup {
            position,
            reason: reason.into(),
        }
    }
}

impl From<zip::result::ZipError> for KmzError {
    fn from(err: zip::result::ZipError) -> Self {
        KmzError::CorruptArchive(err.to_string())
    }
}

impl From<KmzError> for StormError {
    fn from(err: KmzError) -> Self {
        match err {
            KmzError::CorruptArchive(msg) => StormError::CorruptArchive(msg),
            KmzError::NoMarkupEntry => StormError::NoMarkupEntry,
            KmzError::MalformedMarkup { position, reason } => {
                StormError::MalformedMarkup(format!("byte {position}: {reason}"))
            }
        }
    }
}
