//! Peak storm surge inundation polygons.

use std::sync::OnceLock;

use storm_common::Feature;

use super::FeatureExtractor;
use crate::markup::MarkupElement;
use crate::rules::{group_i64, RuleSet};
use crate::style::StyleMap;
use crate::walk::{collect_placemarks, KmlGeometry, Placemark};

/// Surge height band in feet. `max_ft` is the canonical height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurgeHeight {
    pub min_ft: Option<i64>,
    pub max_ft: i64,
}

fn surge_rules() -> &'static RuleSet<SurgeHeight> {
    static RULES: OnceLock<RuleSet<SurgeHeight>> = OnceLock::new();
    RULES.get_or_init(|| {
        RuleSet::new()
            .rule(r"(?i)(\d+)\s*-\s*(\d+)\s*(?:ft|feet)", |c| {
                Some(SurgeHeight {
                    min_ft: group_i64(c, 1),
                    max_ft: group_i64(c, 2)?,
                })
            })
            .rule(r"(?i)(?:>|greater than)\s*(\d+)\s*(?:ft|feet)", |c| {
                let ft = group_i64(c, 1)?;
                Some(SurgeHeight {
                    min_ft: Some(ft),
                    max_ft: ft,
                })
            })
            .rule(r"(?i)(\d+)\s*(?:ft|feet)", |c| {
                Some(SurgeHeight {
                    min_ft: None,
                    max_ft: group_i64(c, 1)?,
                })
            })
    })
}

/// Surge height from a placemark label ("3-6 ft" → upper bound 6).
pub fn surge_height_ft(text: &str) -> Option<SurgeHeight> {
    surge_rules().evaluate(text)
}

/// Extracts `storm-surge` polygons tagged with `SURGE_FT`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SurgeExtractor;

impl FeatureExtractor for SurgeExtractor {
    fn name(&self) -> &'static str {
        "storm-surge"
    }

    fn extract(&self, root: &MarkupElement, _styles: &StyleMap) -> Vec<Feature> {
        let mut features = Vec::new();

        for element in collect_placemarks(root) {
            let placemark = Placemark::new(element);
            let height = placemark
                .name()
                .and_then(surge_height_ft)
                .or_else(|| placemark.description().and_then(surge_height_ft));

            for geometry in placemark.geometries() {
                if !geometry.is_polygon() {
                    continue;
                }
                features.push(
                    placemark
                        .feature(geometry.into_geometry(), "storm-surge")
                        .with_property("SURGE_FT", height.map(|h| h.max_ft))
                        .with_property("SURGE_MIN_FT", height.and_then(|h| h.min_ft)),
                );
            }
        }

        features
    }
}
