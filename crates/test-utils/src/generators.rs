//! Test data generators for KML documents and A-deck records.
//!
//! These produce small, predictable inputs so tests can state exactly which
//! features or tracks they expect back.

use std::fmt::Write;

/// Builder for a single KML placemark.
///
/// # Example
///
/// ```
/// use test_utils::PlacemarkBuilder;
///
/// let kml = PlacemarkBuilder::new()
///     .name("3-6 ft")
///     .polygon(&[(-80.0, 25.0), (-80.5, 25.0), (-80.5, 25.5)])
///     .build();
/// assert!(kml.contains("<name>3-6 ft</name>"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PlacemarkBuilder {
    name: Option<String>,
    description: Option<String>,
    style_url: Option<String>,
    data: Vec<(String, String)>,
    geometries: Vec<String>,
}

impl PlacemarkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Description, written as CDATA.
    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Style reference; a leading `#` is added.
    pub fn style(mut self, style_id: &str) -> Self {
        self.style_url = Some(format!("#{}", style_id));
        self
    }

    /// An `ExtendedData/Data` field.
    pub fn data(mut self, key: &str, value: &str) -> Self {
        self.data.push((key.to_string(), value.to_string()));
        self
    }

    pub fn point(mut self, lon: f64, lat: f64) -> Self {
        self.geometries
            .push(format!("<Point><coordinates>{}</coordinates></Point>", coords(&[(lon, lat)])));
        self
    }

    pub fn line(mut self, points: &[(f64, f64)]) -> Self {
        self.geometries.push(format!(
            "<LineString><coordinates>{}</coordinates></LineString>",
            coords(points)
        ));
        self
    }

    /// Polygon outer ring; the ring is closed automatically.
    pub fn polygon(mut self, ring: &[(f64, f64)]) -> Self {
        let mut closed = ring.to_vec();
        if let (Some(first), Some(last)) = (ring.first(), ring.last()) {
            if first != last {
                closed.push(*first);
            }
        }
        self.geometries.push(format!(
            "<Polygon><outerBoundaryIs><LinearRing><coordinates>{}</coordinates></LinearRing></outerBoundaryIs></Polygon>",
            coords(&closed)
        ));
        self
    }

    pub fn build(&self) -> String {
        let mut out = String::from("<Placemark>");
        if let Some(name) = &self.name {
            let _ = write!(out, "<name>{}</name>", escape(name));
        }
        if let Some(description) = &self.description {
            let _ = write!(out, "<description><![CDATA[{}]]></description>", description);
        }
        if let Some(style_url) = &self.style_url {
            let _ = write!(out, "<styleUrl>{}</styleUrl>", style_url);
        }
        if !self.data.is_empty() {
            out.push_str("<ExtendedData>");
            for (key, value) in &self.data {
                let _ = write!(
                    out,
                    "<Data name=\"{}\"><value>{}</value></Data>",
                    escape(key),
                    escape(value)
                );
            }
            out.push_str("</ExtendedData>");
        }
        match self.geometries.len() {
            0 => {}
            1 => out.push_str(&self.geometries[0]),
            _ => {
                out.push_str("<MultiGeometry>");
                for geometry in &self.geometries {
                    out.push_str(geometry);
                }
                out.push_str("</MultiGeometry>");
            }
        }
        out.push_str("</Placemark>");
        out
    }
}

/// Builder for a KML document with styles, folders and placemarks.
///
/// Placemarks added with [`KmlDocument::placemark`] go directly under the
/// document; [`KmlDocument::folder`] wraps a group in a `Folder`.
#[derive(Debug, Clone, Default)]
pub struct KmlDocument {
    styles: Vec<String>,
    body: Vec<String>,
}

impl KmlDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// An icon style whose `href` is `files/<icon>.png`.
    pub fn icon_style(mut self, style_id: &str, icon: &str) -> Self {
        self.styles.push(format!(
            "<Style id=\"{}\"><IconStyle><Icon><href>files/{}.png</href></Icon></IconStyle></Style>",
            style_id, icon
        ));
        self
    }

    pub fn placemark(mut self, placemark: PlacemarkBuilder) -> Self {
        self.body.push(placemark.build());
        self
    }

    pub fn folder(mut self, name: &str, placemarks: Vec<PlacemarkBuilder>) -> Self {
        let mut folder = format!("<Folder><name>{}</name>", escape(name));
        for placemark in placemarks {
            folder.push_str(&placemark.build());
        }
        folder.push_str("</Folder>");
        self.body.push(folder);
        self
    }

    pub fn build(&self) -> String {
        let mut out = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<kml xmlns=\"http://www.opengis.net/kml/2.2\"><Document>",
        );
        for style in &self.styles {
            out.push_str(style);
        }
        for part in &self.body {
            out.push_str(part);
        }
        out.push_str("</Document></kml>\n");
        out
    }
}

fn coords(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(lon, lat)| format!("{},{},0", lon, lat))
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Creates one A-deck record.
///
/// `lat`/`lon` are signed degrees and are written in the format's
/// tenths-of-a-degree form with a hemisphere suffix (`25.1` → `251N`,
/// `-80.2` → `802W`). `vmax` of `None` leaves the wind field blank.
///
/// # Example
///
/// ```
/// use test_utils::adeck_line;
///
/// let line = adeck_line("AL", 5, "2024081812", "OFCL", 12, 25.1, -80.2, Some(65));
/// assert_eq!(line, "AL, 05, 2024081812, 03, OFCL,  12, 251N,  802W,  65, 1000, XX");
/// ```
#[allow(clippy::too_many_arguments)]
pub fn adeck_line(
    basin: &str,
    number: u32,
    cycle: &str,
    model: &str,
    tau: i32,
    lat: f64,
    lon: f64,
    vmax: Option<i32>,
) -> String {
    let lat_tenths = (lat.abs() * 10.0).round() as i64;
    let lon_tenths = (lon.abs() * 10.0).round() as i64;
    let ns = if lat < 0.0 { 'S' } else { 'N' };
    let ew = if lon < 0.0 { 'W' } else { 'E' };
    let vmax = vmax.map(|v| v.to_string()).unwrap_or_default();

    format!(
        "{}, {:02}, {}, 03, {}, {:>3}, {:>3}{}, {:>4}{}, {:>3}, 1000, XX",
        basin, number, cycle, model, tau, lat_tenths, ns, lon_tenths, ew, vmax
    )
}

/// A-deck text with one model track of evenly spaced fixes.
///
/// Fixes are every 12 hours from tau 0, moving 0.5° north and 0.5° west per
/// step from `(lat, lon)`.
pub fn adeck_track(cycle: &str, model: &str, steps: usize, lat: f64, lon: f64) -> String {
    (0..steps)
        .map(|step| {
            let offset = step as f64 * 0.5;
            adeck_line(
                "AL",
                5,
                cycle,
                model,
                step as i32 * 12,
                lat + offset,
                lon - offset,
                Some(50 + step as i32 * 5),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
