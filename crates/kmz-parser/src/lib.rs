//! KMZ/KML reader for tropical cyclone products.
//!
//! The path from bytes to features is:
//!
//! 1. [`archive`] pulls the first `.kml` entry out of the KMZ container.
//! 2. [`markup`] parses it into an immutable [`MarkupElement`] tree.
//! 3. [`style`] builds the [`StyleMap`] in one full pass over the tree.
//! 4. [`extract`] runs the product's strategy and returns a
//!    [`FeatureCollection`].
//!
//! Fatal problems (bad container, no markup entry, malformed markup) stop the
//! whole product; placemarks the strategy cannot use are skipped.

pub mod archive;
pub mod classify;
pub mod error;
pub mod extract;
pub mod markup;
pub mod rules;
pub mod style;
pub mod walk;

pub use archive::{read_markup, read_markup_entry, MarkupEntry};
pub use classify::{category_from_style, category_from_wind, classify_label, WindCategory};
pub use error::{KmzError, KmzResult};
pub use extract::{extract_collection, extractor_for, FeatureExtractor};
pub use markup::{parse_markup, MarkupElement};
pub use style::StyleMap;

use storm_common::{FeatureCollection, ProductType};
use tracing::instrument;

/// Source tag stamped on collections decoded from archives.
pub const KMZ_SOURCE: &str = "kmz";

/// Decode a KMZ archive (or bare KML bytes) for `product`.
#[instrument(skip(data), fields(bytes = data.len()))]
pub fn parse_kmz(product: ProductType, data: &[u8]) -> KmzResult<FeatureCollection> {
    let entry = read_markup_entry(data)?;
    parse_kml(product, &entry.text)
}

/// Decode KML text for `product`.
pub fn parse_kml(product: ProductType, text: &str) -> KmzResult<FeatureCollection> {
    let root = parse_markup(text)?;
    Ok(extract_collection(product, &root, KMZ_SOURCE))
}
