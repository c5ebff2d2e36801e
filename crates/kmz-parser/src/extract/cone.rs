//! Cone of uncertainty.

use storm_common::Feature;

use super::FeatureExtractor;
use crate::markup::MarkupElement;
use crate::style::StyleMap;
use crate::walk::{collect_placemarks, KmlGeometry, Placemark};

/// Extracts one `forecast-cone` feature per polygon outer boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConeExtractor;

impl FeatureExtractor for ConeExtractor {
    fn name(&self) -> &'static str {
        "forecast-cone"
    }

    fn extract(&self, root: &MarkupElement, _styles: &StyleMap) -> Vec<Feature> {
        collect_placemarks(root)
            .into_iter()
            .map(Placemark::new)
            .flat_map(|placemark| {
                placemark
                    .geometries()
                    .into_iter()
                    .filter(KmlGeometry::is_polygon)
                    .map(move |polygon| {
                        placemark
                            .feature(polygon.into_geometry(), "forecast-cone")
                            .with_property("advisoryNum", placemark.first_field(&["advisoryNum", "advisNum"]))
                            .with_property("stormName", placemark.first_field(&["stormName"]))
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::parse_markup;

    #[test]
    fn test_outer_boundary_only() {
        let root = parse_markup(
            r#"<kml><Document><Folder><Placemark>
                <name>Cone of Uncertainty</name>
                <Polygon>
                    <outerBoundaryIs><LinearRing><coordinates>-80,25 -70,25 -70,35 -80,25</coordinates></LinearRing></outerBoundaryIs>
                    <innerBoundaryIs><LinearRing><coordinates>-76,28 -74,28 -74,30 -76,28</coordinates></LinearRing></innerBoundaryIs>
                </Polygon>
            </Placemark>
            <Placemark><name>Center</name><Point><coordinates>-75,30</coordinates></Point></Placemark>
            </Folder></Document></kml>"#,
        )
        .unwrap();
        let features = ConeExtractor.extract(&root, &StyleMap::new());
        assert_eq!(features.len(), 1);
        let cone = &features[0];
        assert_eq!(cone.geometry.type_name(), "Polygon");
        assert_eq!(
            cone.geometry.positions(),
            vec![[-80.0, 25.0], [-70.0, 25.0], [-70.0, 35.0], [-80.0, 25.0]]
        );
        assert_eq!(cone.property_str("name"), Some("Cone of Uncertainty"));
        assert_eq!(cone.property_str("featureType"), Some("forecast-cone"));
    }

    #[test]
    fn test_polygon_without_outer_boundary_skipped() {
        let root = parse_markup(
            "<Document><Placemark><Polygon><innerBoundaryIs><LinearRing><coordinates>0,0 1,0 1,1 0,0</coordinates></LinearRing></innerBoundaryIs></Polygon></Placemark></Document>",
        )
        .unwrap();
        assert!(ConeExtractor.extract(&root, &StyleMap::new()).is_empty());
    }
}
