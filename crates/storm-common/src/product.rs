//! Product selectors accepted at the pipeline boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::StormError;

/// A tropical cyclone product the pipeline knows how to normalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductType {
    /// Past and forecast track (line plus intensity points).
    Track,
    /// Cone of uncertainty polygon.
    ForecastCone,
    /// Peak storm surge polygons.
    StormSurge,
    /// 34 kt wind speed probability contours.
    WindSpeedProbability,
    #[serde(rename = "wind-speed-probability-50kt")]
    WindSpeedProbability50kt,
    #[serde(rename = "wind-speed-probability-64kt")]
    WindSpeedProbability64kt,
    /// Most likely arrival time of tropical-storm-force winds.
    WindArrivalMostLikely,
    /// Earliest reasonable arrival time of tropical-storm-force winds.
    WindArrivalEarliest,
    /// Model guidance tracks (A-deck text) or a track archive.
    ForecastTrack,
}

impl ProductType {
    pub const ALL: [ProductType; 9] = [
        ProductType::Track,
        ProductType::ForecastCone,
        ProductType::StormSurge,
        ProductType::WindSpeedProbability,
        ProductType::WindSpeedProbability50kt,
        ProductType::WindSpeedProbability64kt,
        ProductType::WindArrivalMostLikely,
        ProductType::WindArrivalEarliest,
        ProductType::ForecastTrack,
    ];

    /// The selector string used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Track => "track",
            ProductType::ForecastCone => "forecast-cone",
            ProductType::StormSurge => "storm-surge",
            ProductType::WindSpeedProbability => "wind-speed-probability",
            ProductType::WindSpeedProbability50kt => "wind-speed-probability-50kt",
            ProductType::WindSpeedProbability64kt => "wind-speed-probability-64kt",
            ProductType::WindArrivalMostLikely => "wind-arrival-most-likely",
            ProductType::WindArrivalEarliest => "wind-arrival-earliest",
            ProductType::ForecastTrack => "forecast-track",
        }
    }

    /// Whether this product can be read from A-deck text.
    ///
    /// Every product can be read from an archive.
    pub fn accepts_text(&self) -> bool {
        matches!(self, ProductType::ForecastTrack)
    }

    /// Wind threshold (knots) of a wind speed probability product.
    pub fn wind_threshold_kt(&self) -> Option<u32> {
        match self {
            ProductType::WindSpeedProbability => Some(34),
            ProductType::WindSpeedProbability50kt => Some(50),
            ProductType::WindSpeedProbability64kt => Some(64),
            _ => None,
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductType {
    type Err = StormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ProductType::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| StormError::UnknownProduct(s.to_string()))
    }
}
