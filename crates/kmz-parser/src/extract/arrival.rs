//! Arrival time of tropical-storm-force winds.
//!
//! Arrival contours carry their time in free text or, for the map labels,
//! spread over three icon placemarks (day, hour, AM/PM). Label points keep
//! their own coordinates and are tagged with their group and slot so the
//! rendering side can anchor the combined label.

use std::sync::OnceLock;

use storm_common::Feature;

use super::FeatureExtractor;
use crate::classify::classify_label;
use crate::markup::MarkupElement;
use crate::rules::{group_i64, group_text, RuleSet};
use crate::style::StyleMap;
use crate::walk::{collect_placemarks, KmlGeometry, Placemark};

/// Which arrival product a document belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrivalKind {
    MostLikely,
    Earliest,
}

impl ArrivalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArrivalKind::MostLikely => "most-likely",
            ArrivalKind::Earliest => "earliest",
        }
    }
}

fn arrival_rules() -> &'static RuleSet<String> {
    static RULES: OnceLock<RuleSet<String>> = OnceLock::new();
    RULES.get_or_init(|| {
        RuleSet::new()
            // Wed 8 AM, Thursday 11:30 p.m.
            .rule(
                r"(?i)\b(mon|tue|wed|thu|fri|sat|sun)[a-z]*\.?\s+(\d{1,2})(?::(\d{2}))?\s*([ap])\.?m\b\.?",
                |c| {
                    let day = classify_label(c.get(1)?.as_str())?.text;
                    Some(format!("{} {}", day, clock(c)))
                },
            )
            // 2024-08-18T12:00Z
            .rule(
                r"(\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}(?::\d{2})?Z?)",
                |c| group_text(c, 1),
            )
            // 8 AM
            .rule(r"(?i)\b()(\d{1,2})(?::(\d{2}))?\s*([ap])\.?m\b\.?", |c| Some(clock(c)))
            // 36 hr
            .rule(r"(?i)\b(\d{1,3})\s*(?:h|hr|hrs|hour|hours)\b", |c| {
                Some(format!("{} hr", group_i64(c, 1)?))
            })
    })
}

/// `H[:MM] AM|PM` from capture groups 2 (hour), 3 (minutes), 4 (a/p).
fn clock(c: &regex::Captures<'_>) -> String {
    let hour = c.get(2).map(|m| m.as_str()).unwrap_or_default();
    let hour = hour.trim_start_matches('0');
    let hour = if hour.is_empty() { "12" } else { hour };
    let period = match c.get(4).map(|m| m.as_str().to_ascii_lowercase()) {
        Some(p) if p == "p" => "PM",
        _ => "AM",
    };
    match c.get(3) {
        Some(minutes) if minutes.as_str() != "00" => {
            format!("{}:{} {}", hour, minutes.as_str(), period)
        }
        _ => format!("{} {}", hour, period),
    }
}

/// Arrival time named in free text, trying each time pattern in order.
pub fn arrival_time_from_text(text: &str) -> Option<String> {
    arrival_rules().evaluate(text)
}

/// Extracts arrival contours, lines, points, and split-label components.
#[derive(Debug, Clone, Copy)]
pub struct ArrivalExtractor {
    kind: ArrivalKind,
}

impl ArrivalExtractor {
    pub fn new(kind: ArrivalKind) -> Self {
        Self { kind }
    }
}

impl FeatureExtractor for ArrivalExtractor {
    fn name(&self) -> &'static str {
        "wind-arrival"
    }

    fn extract(&self, root: &MarkupElement, styles: &StyleMap) -> Vec<Feature> {
        let mut features = Vec::new();

        for element in collect_placemarks(root) {
            let placemark = Placemark::new(element);
            let style_id = placemark.style_id();

            let arrival_time = style_id
                .and_then(|id| styles.reconstruct_label(id))
                .or_else(|| arrival_time_from_text(&placemark.name_and_description()));

            for (index, geometry) in placemark.geometries().into_iter().enumerate() {
                let component = match (&geometry, style_id) {
                    (KmlGeometry::Point(_), Some(id)) => styles.label_component(id),
                    _ => None,
                };

                features.push(
                    placemark
                        .feature(geometry.into_geometry(), "wind-arrival")
                        .with_property("arrivalType", self.kind.as_str())
                        .with_property("arrivalTime", arrival_time.clone())
                        .with_property("geometryIndex", index)
                        .with_property("labelGroup", component.as_ref().map(|c| c.group))
                        .with_property(
                            "labelType",
                            component.as_ref().and_then(|c| c.kind).map(|k| k.as_str()),
                        )
                        .with_property("labelText", component.and_then(|c| c.text)),
                );
            }
        }

        features
    }
}
