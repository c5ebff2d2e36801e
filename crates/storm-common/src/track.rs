//! Model guidance track types decoded from A-deck text.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One forecast position of a model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelPoint {
    /// Forecast hour offset from the cycle.
    pub tau: i32,
    pub lat: f64,
    /// Longitude in [-180, 180].
    pub lon: f64,
    /// Maximum sustained wind (knots), when forecast.
    pub vmax: Option<i32>,
}

/// All points of one model for the operative cycle.
///
/// Points are unique by `tau` and sorted ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelTrack {
    pub model_id: String,
    pub points: Vec<ModelPoint>,
}

impl ModelTrack {
    pub fn point_at(&self, tau: i32) -> Option<&ModelPoint> {
        self.points.iter().find(|p| p.tau == tau)
    }

    /// Largest forecast hour present.
    pub fn max_tau(&self) -> Option<i32> {
        self.points.last().map(|p| p.tau)
    }
}

/// Every retained model track of a single A-deck, ordered by model priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelTrackSet {
    /// Name of the file the tracks were read from (may be empty).
    pub filename: String,
    /// Operative cycle as `YYYYMMDDHH`; empty when no record qualified.
    pub cycle: String,
    pub models_present: Vec<String>,
    pub tracks: Vec<ModelTrack>,
}

impl ModelTrackSet {
    pub fn empty(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            cycle: String::new(),
            models_present: Vec::new(),
            tracks: Vec::new(),
        }
    }

    pub fn track(&self, model_id: &str) -> Option<&ModelTrack> {
        self.tracks
            .iter()
            .find(|t| t.model_id.eq_ignore_ascii_case(model_id))
    }

    /// The operative cycle as a UTC timestamp.
    pub fn cycle_time(&self) -> Option<DateTime<Utc>> {
        let naive = NaiveDateTime::parse_from_str(&format!("{}00", self.cycle), "%Y%m%d%H%M").ok()?;
        Some(Utc.from_utc_datetime(&naive))
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn sample() -> ModelTrackSet {
        ModelTrackSet {
            filename: "aal052024.dat".to_string(),
            cycle: "2024081812".to_string(),
            models_present: vec!["OFCL".to_string()],
            tracks: vec![ModelTrack {
                model_id: "OFCL".to_string(),
                points: vec![
                    ModelPoint { tau: 0, lat: 25.1, lon: -80.2, vmax: Some(65) },
                    ModelPoint { tau: 12, lat: 26.0, lon: -81.0, vmax: None },
                ],
            }],
        }
    }

    #[test]
    fn test_cycle_time() {
        let t = sample().cycle_time().unwrap();
        assert_eq!(t.year(), 2024);
        assert_eq!(t.month(), 8);
        assert_eq!(t.day(), 18);
        assert_eq!(t.hour(), 12);
    }

    #[test]
    fn test_cycle_time_empty() {
        assert!(ModelTrackSet::empty("x").cycle_time().is_none());
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["modelsPresent"][0], "OFCL");
        assert_eq!(json["tracks"][0]["modelId"], "OFCL");
        assert_eq!(json["tracks"][0]["points"][0]["tau"], 0);
        assert_eq!(json["tracks"][0]["points"][1]["vmax"], serde_json::Value::Null);
    }

    #[test]
    fn test_track_lookup() {
        let set = sample();
        assert_eq!(set.track("ofcl").unwrap().max_tau(), Some(12));
        assert!(set.track("GFS").is_none());
    }
}
