//! Past/forecast track: the track line plus one intensity point per fix.

use std::sync::OnceLock;

use storm_common::{Feature, Geometry, Position};

use super::FeatureExtractor;
use crate::classify::{category_from_style, category_from_wind};
use crate::markup::MarkupElement;
use crate::rules::{group_i64, group_text, RuleSet};
use crate::style::StyleMap;
use crate::walk::{collect_placemarks, KmlGeometry, Placemark};

/// Free-text fallbacks applied to a point's `description`.
struct DescriptionRules {
    intensity: RuleSet<i64>,
    intensity_mph: RuleSet<i64>,
    pressure: RuleSet<i64>,
    valid_time: RuleSet<String>,
    forecast_hour: RuleSet<i64>,
}

fn description_rules() -> &'static DescriptionRules {
    static RULES: OnceLock<DescriptionRules> = OnceLock::new();
    RULES.get_or_init(|| DescriptionRules {
        intensity: RuleSet::new()
            .rule(r"Maximum Wind:\s*(\d+)\s*knots", |c| group_i64(c, 1))
            .rule(r"(?i)max(?:imum)?\s+wind:?\s*(\d+)\s*(?:knots|kts?)\b", |c| group_i64(c, 1)),
        intensity_mph: RuleSet::new()
            .rule(r"Maximum Wind:[^(<]*\((\d+)\s*mph\)", |c| group_i64(c, 1))
            .rule(r"(?i)max(?:imum)?\s+wind:?[^(<]*\((\d+)\s*mph\)", |c| group_i64(c, 1)),
        pressure: RuleSet::new().rule(r"Minimum Pressure:\s*(\d+)\s*mb", |c| group_i64(c, 1)),
        valid_time: RuleSet::new().rule(r"Valid at:\s*([^<]+)", |c| group_text(c, 1)),
        forecast_hour: RuleSet::new().rule(r"(\d+)\s*hr\s*Forecast", |c| group_i64(c, 1)),
    })
}

/// Direct field names for each typed property, tried in order.
const STRING_FIELDS: [(&str, &[&str]); 6] = [
    ("dtg", &["dtg"]),
    ("stormName", &["stormName"]),
    ("stormNum", &["stormNum"]),
    ("basin", &["basin"]),
    ("stormType", &["stormType"]),
    ("advisoryNum", &["advisoryNum", "advisNum"]),
];
const INTENSITY_FIELDS: &[&str] = &["intensity", "maxWind"];
const INTENSITY_MPH_FIELDS: &[&str] = &["intensityMPH"];
const PRESSURE_FIELDS: &[&str] = &["minSeaLevelPres", "mslp"];
const VALID_TIME_FIELDS: &[&str] = &["validTime"];
const FORECAST_HOUR_FIELDS: &[&str] = &["fcstpd", "forecastHour", "tau"];

/// Extracts `track-line` and `track-point` features.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackExtractor;

impl FeatureExtractor for TrackExtractor {
    fn name(&self) -> &'static str {
        "track"
    }

    fn extract(&self, root: &MarkupElement, _styles: &StyleMap) -> Vec<Feature> {
        let mut features = Vec::new();

        for element in collect_placemarks(root) {
            let placemark = Placemark::new(element);
            for geometry in placemark.geometries() {
                match geometry {
                    KmlGeometry::LineString(coords) => features.push(
                        placemark.feature(Geometry::line_string(coords), "track-line"),
                    ),
                    KmlGeometry::Point(position) => {
                        features.push(track_point(&placemark, position))
                    }
                    KmlGeometry::Polygon(_) => {}
                }
            }
        }

        features
    }
}

fn track_point(placemark: &Placemark<'_>, [lon, lat]: Position) -> Feature {
    let rules = description_rules();
    let description = placemark.description().unwrap_or_default();

    let int_field = |keys: &[&str], fallback: &RuleSet<i64>| {
        placemark
            .first_field(keys)
            .and_then(|v| parse_leading_int(&v))
            .or_else(|| fallback.evaluate(description))
    };

    let intensity = int_field(INTENSITY_FIELDS, &rules.intensity);
    let intensity_mph = int_field(INTENSITY_MPH_FIELDS, &rules.intensity_mph);
    let pressure = int_field(PRESSURE_FIELDS, &rules.pressure);
    let forecast_hour = int_field(FORECAST_HOUR_FIELDS, &rules.forecast_hour);
    let valid_time = placemark
        .first_field(VALID_TIME_FIELDS)
        .or_else(|| rules.valid_time.evaluate(description));

    // Wind in knots beats the style name; mph is informational only.
    let (category, category_source) = match intensity {
        Some(knots) => (Some(category_from_wind(knots as f64).to_string()), Some("wind")),
        None => match placemark.style_id() {
            Some(style) => (Some(category_from_style(style)), Some("style")),
            None => (None, None),
        },
    };

    let mut feature = placemark
        .feature(Geometry::point(lon, lat), "track-point")
        .with_property("intensity", intensity)
        .with_property("intensityMPH", intensity_mph)
        .with_property("minSeaLevelPres", pressure)
        .with_property("forecastHour", forecast_hour)
        .with_property("validTime", valid_time)
        .with_property("category", category)
        .with_property("categorySource", category_source);

    for (property, keys) in STRING_FIELDS {
        feature.set(property, placemark.first_field(keys));
    }

    feature
}

/// Integer at the start of a field value ("65", "65 kt", "100.0").
fn parse_leading_int(value: &str) -> Option<i64> {
    let value = value.trim();
    let end = value
        .char_indices()
        .find(|(i, c)| !(c.is_ascii_digit() || (*i == 0 && *c == '-')))
        .map(|(i, _)| i)
        .unwrap_or(value.len());
    value[..end].parse().ok()
}
