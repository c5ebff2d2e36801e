//! Per-product feature extraction strategies.
//!
//! Each strategy walks the same placemark list (see [`crate::walk`]) and
//! differs only in which geometries it keeps and how it types properties.

mod arrival;
mod cone;
mod probability;
mod surge;
mod track;

pub use arrival::{ArrivalExtractor, ArrivalKind};
pub use cone::ConeExtractor;
pub use probability::{probability_from_name, ProbabilityExtractor};
pub use surge::{surge_height_ft, SurgeExtractor, SurgeHeight};
pub use track::TrackExtractor;

use storm_common::{Feature, FeatureCollection, ProductType};
use tracing::debug;

use crate::markup::MarkupElement;
use crate::style::StyleMap;

/// A product-specific extraction strategy.
pub trait FeatureExtractor: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Extract features in traversal order.
    ///
    /// `styles` must already describe the whole document.
    fn extract(&self, root: &MarkupElement, styles: &StyleMap) -> Vec<Feature>;
}

/// Strategy for a product selector.
pub fn extractor_for(product: ProductType) -> Box<dyn FeatureExtractor> {
    match product {
        ProductType::Track | ProductType::ForecastTrack => Box::new(TrackExtractor),
        ProductType::ForecastCone => Box::new(ConeExtractor),
        ProductType::StormSurge => Box::new(SurgeExtractor),
        ProductType::WindSpeedProbability
        | ProductType::WindSpeedProbability50kt
        | ProductType::WindSpeedProbability64kt => {
            Box::new(ProbabilityExtractor::new(product.wind_threshold_kt()))
        }
        ProductType::WindArrivalMostLikely => Box::new(ArrivalExtractor::new(ArrivalKind::MostLikely)),
        ProductType::WindArrivalEarliest => Box::new(ArrivalExtractor::new(ArrivalKind::Earliest)),
    }
}

/// Build the style map, then run the product's strategy over the document.
pub fn extract_collection(
    product: ProductType,
    root: &MarkupElement,
    source: &str,
) -> FeatureCollection {
    let styles = StyleMap::from_document(root);
    let extractor = extractor_for(product);
    let features = extractor.extract(root, &styles);

    debug!(
        product = %product,
        extractor = extractor.name(),
        styles = styles.len(),
        features = features.len(),
        "Extracted features"
    );

    FeatureCollection::new(source).with_features(features)
}
