//! Wind speed probability contours.

use std::sync::OnceLock;

use storm_common::Feature;

use super::FeatureExtractor;
use crate::markup::MarkupElement;
use crate::rules::{group_f64, RuleSet};
use crate::style::StyleMap;
use crate::walk::{collect_placemarks, KmlGeometry, Placemark};

fn probability_rules() -> &'static RuleSet<f64> {
    static RULES: OnceLock<RuleSet<f64>> = OnceLock::new();
    RULES.get_or_init(|| {
        RuleSet::new()
            .rule(r"<\s*5\s*%", |_| Some(2.5))
            .rule(r">\s*90\s*%", |_| Some(95.0))
            .rule(r"(\d+(?:\.\d+)?)\s*%?\s*-\s*(\d+(?:\.\d+)?)", |c| {
                Some((group_f64(c, 1)? + group_f64(c, 2)?) / 2.0)
            })
            .rule(r"(\d+(?:\.\d+)?)\s*%?", |c| group_f64(c, 1))
    })
}

/// Probability (percent) named by a contour label.
///
/// `<5%` → 2.5, `>90%` → 95, `80-90` → 85, `40%` → 40.
pub fn probability_from_name(name: &str) -> Option<f64> {
    probability_rules().evaluate(name)
}

/// Extracts one feature per probability polygon, tagged with `polygonIndex`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProbabilityExtractor {
    threshold_kt: Option<u32>,
}

impl ProbabilityExtractor {
    pub fn new(threshold_kt: Option<u32>) -> Self {
        Self { threshold_kt }
    }
}

impl FeatureExtractor for ProbabilityExtractor {
    fn name(&self) -> &'static str {
        "wind-speed-probability"
    }

    fn extract(&self, root: &MarkupElement, _styles: &StyleMap) -> Vec<Feature> {
        let mut features = Vec::new();

        for element in collect_placemarks(root) {
            let placemark = Placemark::new(element);
            let probability = placemark.name().and_then(probability_from_name);

            let polygons = placemark
                .geometries()
                .into_iter()
                .filter(KmlGeometry::is_polygon);
            for (index, polygon) in polygons.enumerate() {
                features.push(
                    placemark
                        .feature(polygon.into_geometry(), "wind-speed-probability")
                        .with_property("probability", probability)
                        .with_property("polygonIndex", index)
                        .with_property("windThresholdKt", self.threshold_kt),
                );
            }
        }

        features
    }
}
