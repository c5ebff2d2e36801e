//! Tests for the GeoJSON-shaped feature types.

use storm_common::{Feature, FeatureCollection, Geometry, PropertyValue};

// ============================================================================
// Serialization shape tests
// ============================================================================

#[test]
fn test_collection_shape() {
    let collection = FeatureCollection::new("kmz").with_features(vec![Feature::new(
        Geometry::point(-80.5, 25.25),
    )
    .with_property("category", "3")]);

    let json = serde_json::to_value(&collection).unwrap();
    assert_eq!(json["type"], "FeatureCollection");
    assert_eq!(json["source"], "kmz");
    assert_eq!(json["features"][0]["type"], "Feature");
    assert_eq!(json["features"][0]["geometry"]["type"], "Point");
    assert_eq!(json["features"][0]["geometry"]["coordinates"][0], -80.5);
    assert_eq!(json["features"][0]["geometry"]["coordinates"][1], 25.25);
    assert_eq!(json["features"][0]["properties"]["category"], "3");
}

#[test]
fn test_polygon_wraps_outer_ring() {
    let ring = vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]];
    let geometry = Geometry::polygon(ring.clone());

    let json = serde_json::to_value(&geometry).unwrap();
    assert_eq!(json["type"], "Polygon");
    assert_eq!(json["coordinates"].as_array().unwrap().len(), 1);
    assert_eq!(json["coordinates"][0].as_array().unwrap().len(), 4);
    assert_eq!(geometry.positions(), ring);
}

#[test]
fn test_null_properties_serialize_as_null() {
    let feature = Feature::new(Geometry::line_string(vec![[1.0, 2.0], [3.0, 4.0]]))
        .with_property("probability", None::<f64>);
    let json = serde_json::to_value(&feature).unwrap();
    assert!(json["properties"]["probability"].is_null());
}

#[test]
fn test_collection_deserializes() {
    let json = r#"{
        "type": "FeatureCollection",
        "source": "kmz",
        "features": [{
            "type": "Feature",
            "geometry": {"type": "LineString", "coordinates": [[-70.0, 20.0], [-71.0, 21.0]]},
            "properties": {"featureType": "track-line", "intensity": 65, "probability": 2.5, "name": null}
        }]
    }"#;
    let collection: FeatureCollection = serde_json::from_str(json).unwrap();
    let feature = &collection.features[0];
    assert_eq!(feature.geometry.type_name(), "LineString");
    assert_eq!(feature.property_i64("intensity"), Some(65));
    assert_eq!(feature.property_f64("probability"), Some(2.5));
    assert_eq!(feature.property("name"), Some(&PropertyValue::Null));
    assert_eq!(collection.of_type("track-line").count(), 1);
}

// ============================================================================
// Property accessor tests
// ============================================================================

#[test]
fn test_int_widens_to_float() {
    assert_eq!(PropertyValue::from(6).as_f64(), Some(6.0));
    assert_eq!(PropertyValue::from(2.5).as_i64(), None);
    assert_eq!(PropertyValue::from("TS").as_str(), Some("TS"));
    assert!(PropertyValue::from(None::<String>).is_null());
}
