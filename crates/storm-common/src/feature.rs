//! GeoJSON-shaped feature types emitted by the markup extractors.
//!
//! The serialized shape is the one the rendering layer consumes:
//! `{ "type": "FeatureCollection", "features": [...], "source": "kmz" }`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A `[longitude, latitude]` pair, in source order.
pub type Position = [f64; 2];

/// Property bag of a feature. Sorted by key so serialization is stable.
pub type Properties = BTreeMap<String, PropertyValue>;

/// A FeatureCollection with the tag of the source it was decoded from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureCollection {
    /// Type identifier (always "FeatureCollection").
    #[serde(rename = "type")]
    pub type_: String,

    /// Features in document traversal order.
    pub features: Vec<Feature>,

    /// Where the features came from (e.g. "kmz").
    pub source: String,
}

impl FeatureCollection {
    /// Create an empty collection tagged with `source`.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            type_: "FeatureCollection".to_string(),
            features: Vec::new(),
            source: source.into(),
        }
    }

    /// Add multiple features to the collection.
    pub fn with_features(mut self, features: Vec<Feature>) -> Self {
        self.features.extend(features);
        self
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Features whose `featureType` property equals `feature_type`.
    pub fn of_type<'a>(&'a self, feature_type: &'a str) -> impl Iterator<Item = &'a Feature> {
        self.features
            .iter()
            .filter(move |f| f.property_str("featureType") == Some(feature_type))
    }
}

/// A single GeoJSON feature.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feature {
    /// Type identifier (always "Feature").
    #[serde(rename = "type")]
    pub type_: String,

    pub geometry: Geometry,

    pub properties: Properties,
}

impl Feature {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            type_: "Feature".to_string(),
            geometry,
            properties: Properties::new(),
        }
    }

    /// Set a property, replacing any previous value.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.property(key).and_then(PropertyValue::as_str)
    }

    pub fn property_i64(&self, key: &str) -> Option<i64> {
        self.property(key).and_then(PropertyValue::as_i64)
    }

    pub fn property_f64(&self, key: &str) -> Option<f64> {
        self.property(key).and_then(PropertyValue::as_f64)
    }
}

/// Geometry types the extractors produce.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Geometry {
    /// A point geometry.
    Point {
        /// Coordinates as [longitude, latitude].
        coordinates: Position,
    },

    /// A line string geometry.
    LineString { coordinates: Vec<Position> },

    /// A polygon geometry.
    ///
    /// Only the outer ring is ever emitted; the ring list has length 1.
    Polygon { coordinates: Vec<Vec<Position>> },
}

impl Geometry {
    pub fn point(lon: f64, lat: f64) -> Self {
        Geometry::Point {
            coordinates: [lon, lat],
        }
    }

    pub fn line_string(coordinates: Vec<Position>) -> Self {
        Geometry::LineString { coordinates }
    }

    /// Create a polygon from its outer ring.
    pub fn polygon(outer: Vec<Position>) -> Self {
        Geometry::Polygon {
            coordinates: vec![outer],
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point { .. } => "Point",
            Geometry::LineString { .. } => "LineString",
            Geometry::Polygon { .. } => "Polygon",
        }
    }

    /// All positions of the geometry, rings flattened.
    pub fn positions(&self) -> Vec<Position> {
        match self {
            Geometry::Point { coordinates } => vec![*coordinates],
            Geometry::LineString { coordinates } => coordinates.clone(),
            Geometry::Polygon { coordinates } => coordinates.iter().flatten().copied().collect(),
        }
    }
}

/// A scalar property value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl PropertyValue {
    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PropertyValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view; integers widen to f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Int(v) => Some(*v as f64),
            PropertyValue::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Int(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Int(value as i64)
    }
}

impl From<u32> for PropertyValue {
    fn from(value: u32) -> Self {
        PropertyValue::Int(value as i64)
    }
}

impl From<usize> for PropertyValue {
    fn from(value: usize) -> Self {
        PropertyValue::Int(value as i64)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Float(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl<T: Into<PropertyValue>> From<Option<T>> for PropertyValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(PropertyValue::Null)
    }
}
