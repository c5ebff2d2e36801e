//! Placemark discovery and KML geometry decoding.

use storm_common::{Feature, Geometry, Position};
use tracing::trace;

use crate::markup::MarkupElement;

/// Tags that group placemarks.
const CONTAINERS: [&str; 2] = ["Document", "Folder"];

/// Collect every placemark below `root`, at any nesting depth.
///
/// At each level nested containers are visited before the container's own
/// placemarks; extractors rely on this order for index-based properties.
pub fn collect_placemarks(root: &MarkupElement) -> Vec<&MarkupElement> {
    let mut placemarks = Vec::new();
    visit(root, &mut placemarks);
    placemarks
}

fn visit<'a>(container: &'a MarkupElement, out: &mut Vec<&'a MarkupElement>) {
    for tag in CONTAINERS {
        for nested in container.children(tag) {
            visit(nested, out);
        }
    }
    out.extend(container.children("Placemark"));
}

/// Read-only view over a `Placemark` element.
#[derive(Debug, Clone, Copy)]
pub struct Placemark<'a> {
    element: &'a MarkupElement,
}

impl<'a> Placemark<'a> {
    pub fn new(element: &'a MarkupElement) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &'a MarkupElement {
        self.element
    }

    pub fn name(&self) -> Option<&'a str> {
        self.element.child_text("name").filter(|s| !s.is_empty())
    }

    pub fn description(&self) -> Option<&'a str> {
        self.element
            .child_text("description")
            .filter(|s| !s.is_empty())
    }

    /// Referenced style id without the leading `#`.
    pub fn style_id(&self) -> Option<&'a str> {
        self.element
            .child_text("styleUrl")
            .map(|s| s.trim_start_matches('#'))
            .filter(|s| !s.is_empty())
    }

    /// `name` and `description` joined by a space, skipping missing parts.
    pub fn name_and_description(&self) -> String {
        [self.name(), self.description()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// A field carried directly on the placemark: attribute, same-named
    /// child element, or `ExtendedData` entry (names compared ignoring case).
    pub fn field(&self, key: &str) -> Option<String> {
        if let Some(value) = self.element.attr(key) {
            return non_empty(value);
        }
        if let Some(value) = self.element.child_text(key) {
            return non_empty(value);
        }

        let extended = self.element.child("ExtendedData")?;
        let data = extended
            .children("Data")
            .iter()
            .find(|d| d.attr("name").is_some_and(|n| n.eq_ignore_ascii_case(key)))
            .and_then(|d| d.child_text("value"));
        if let Some(value) = data {
            return non_empty(value);
        }

        extended
            .children("SchemaData")
            .iter()
            .flat_map(|schema| schema.children("SimpleData"))
            .find(|d| d.attr("name").is_some_and(|n| n.eq_ignore_ascii_case(key)))
            .and_then(|d| d.text())
            .and_then(non_empty)
    }

    /// First of `keys` present as a direct field.
    pub fn first_field(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.field(key))
    }

    /// Geometries of the placemark, with `MultiGeometry` members flattened.
    pub fn geometries(&self) -> Vec<KmlGeometry> {
        let mut out = Vec::new();
        collect_geometries(self.element, &mut out);
        out
    }

    /// Start a feature carrying the properties every extractor emits.
    pub fn feature(&self, geometry: Geometry, feature_type: &str) -> Feature {
        Feature::new(geometry)
            .with_property("featureType", feature_type)
            .with_property("name", self.name())
            .with_property("description", self.description())
            .with_property("styleUrl", self.style_id())
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// A geometry decoded from KML.
#[derive(Debug, Clone, PartialEq)]
pub enum KmlGeometry {
    Point(Position),
    LineString(Vec<Position>),
    /// Outer boundary only; inner rings are not kept.
    Polygon(Vec<Position>),
}

impl KmlGeometry {
    pub fn is_polygon(&self) -> bool {
        matches!(self, KmlGeometry::Polygon(_))
    }

    pub fn into_geometry(self) -> Geometry {
        match self {
            KmlGeometry::Point([lon, lat]) => Geometry::point(lon, lat),
            KmlGeometry::LineString(coords) => Geometry::line_string(coords),
            KmlGeometry::Polygon(ring) => Geometry::polygon(ring),
        }
    }
}

fn collect_geometries(element: &MarkupElement, out: &mut Vec<KmlGeometry>) {
    for point in element.children("Point") {
        match point_position(point) {
            Some(position) => out.push(KmlGeometry::Point(position)),
            None => trace!("Skipping Point without a usable coordinate"),
        }
    }
    for line in element.children("LineString") {
        match line_positions(line) {
            Some(coords) => out.push(KmlGeometry::LineString(coords)),
            None => trace!("Skipping LineString with fewer than two coordinates"),
        }
    }
    for polygon in element.children("Polygon") {
        match outer_ring(polygon) {
            Some(ring) => out.push(KmlGeometry::Polygon(ring)),
            None => trace!("Skipping Polygon without an outer boundary"),
        }
    }
    for multi in element.children("MultiGeometry") {
        collect_geometries(multi, out);
    }
}

pub fn point_position(point: &MarkupElement) -> Option<Position> {
    point
        .child("coordinates")
        .and_then(MarkupElement::text)
        .map(parse_coordinates)
        .and_then(|coords| coords.first().copied())
}

pub fn line_positions(line: &MarkupElement) -> Option<Vec<Position>> {
    let coords = parse_coordinates(line.child("coordinates")?.text()?);
    (coords.len() >= 2).then_some(coords)
}

/// Positions of `outerBoundaryIs/LinearRing/coordinates`.
pub fn outer_ring(polygon: &MarkupElement) -> Option<Vec<Position>> {
    let text = polygon
        .path(&["outerBoundaryIs", "LinearRing", "coordinates"])?
        .text()?;
    let ring = parse_coordinates(text);
    (ring.len() >= 3).then_some(ring)
}

/// Parse whitespace-separated `lon,lat[,alt]` tuples.
///
/// Malformed tuples are skipped.
pub fn parse_coordinates(text: &str) -> Vec<Position> {
    text.split_whitespace()
        .filter_map(|tuple| {
            let mut parts = tuple.split(',');
            let lon = parts.next()?.trim().parse::<f64>().ok()?;
            let lat = parts.next()?.trim().parse::<f64>().ok()?;
            (lon.is_finite() && lat.is_finite()).then_some([lon, lat])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::parse_markup;

    #[test]
    fn test_parse_coordinates() {
        let coords = parse_coordinates(" -80.5,25.1,0\n-81.0,26.0  bad,tuple -82,27 ");
        assert_eq!(coords, vec![[-80.5, 25.1], [-81.0, 26.0], [-82.0, 27.0]]);
    }

    #[test]
    fn test_traversal_order() {
        let root = parse_markup(
            r#"<kml><Document>
                <Placemark><name>doc-level</name></Placemark>
                <Folder><name>outer</name>
                    <Placemark><name>outer-1</name></Placemark>
                    <Folder><Placemark><name>inner-1</name></Placemark></Folder>
                </Folder>
                <Folder><Document><Placemark><name>deep</name></Placemark></Document></Folder>
            </Document></kml>"#,
        )
        .unwrap();
        let names: Vec<_> = collect_placemarks(&root)
            .into_iter()
            .filter_map(|p| Placemark::new(p).name())
            .collect();
        assert_eq!(names, vec!["inner-1", "outer-1", "deep", "doc-level"]);
    }

    #[test]
    fn test_multigeometry_flattened() {
        let root = parse_markup(
            r#"<Placemark><MultiGeometry>
                <Polygon><outerBoundaryIs><LinearRing><coordinates>0,0 1,0 1,1 0,0</coordinates></LinearRing></outerBoundaryIs>
                    <innerBoundaryIs><LinearRing><coordinates>0.2,0.2 0.3,0.2 0.3,0.3 0.2,0.2</coordinates></LinearRing></innerBoundaryIs></Polygon>
                <Polygon><outerBoundaryIs><LinearRing><coordinates>5,5 6,5 6,6 5,5</coordinates></LinearRing></outerBoundaryIs></Polygon>
                <Point><coordinates>3,3</coordinates></Point>
            </MultiGeometry></Placemark>"#,
        )
        .unwrap();
        let geometries = Placemark::new(&root).geometries();
        assert_eq!(geometries.len(), 3);
        assert_eq!(geometries[0], KmlGeometry::Point([3.0, 3.0]));
        assert_eq!(
            geometries[1],
            KmlGeometry::Polygon(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]])
        );
    }

    #[test]
    fn test_direct_fields() {
        let root = parse_markup(
            r#"<Placemark stormType="HU">
                <dtg>2024081812</dtg>
                <ExtendedData>
                    <Data name="INTENSITY"><value>100</value></Data>
                    <SchemaData><SimpleData name="advisoryNum">12A</SimpleData></SchemaData>
                </ExtendedData>
            </Placemark>"#,
        )
        .unwrap();
        let placemark = Placemark::new(&root);
        assert_eq!(placemark.field("stormType").as_deref(), Some("HU"));
        assert_eq!(placemark.field("dtg").as_deref(), Some("2024081812"));
        assert_eq!(placemark.field("intensity").as_deref(), Some("100"));
        assert_eq!(placemark.field("advisoryNum").as_deref(), Some("12A"));
        assert_eq!(placemark.field("missing"), None);
        assert_eq!(
            placemark.first_field(&["fcstpd", "dtg"]).as_deref(),
            Some("2024081812")
        );
    }

    #[test]
    fn test_placemark_without_geometry() {
        let root = parse_markup("<Placemark><name>label only</name></Placemark>").unwrap();
        assert!(Placemark::new(&root).geometries().is_empty());
    }
}
