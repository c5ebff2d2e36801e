//! Canned product documents for storm-feeds tests.
//!
//! The KML documents are trimmed-down versions of what the agency publishes
//! for each product: same nesting, same styling conventions, a handful of
//! placemarks.

/// Storm identifiers used across the fixtures.
pub mod storms {
    /// Atlantic storm id in `<basin><number><year>` form.
    pub const AL05: &str = "AL052024";

    /// Storm name matching [`AL05`].
    pub const AL05_NAME: &str = "ERNESTO";

    /// An A-deck cycle of [`AL05`] (YYYYMMDDHH).
    pub const AL05_CYCLE: &str = "2024081812";
}

/// KML documents, one per product family.
pub mod kml {
    /// Past/forecast track: a line folder and two points.
    ///
    /// The first point has a tabular description with
    /// `Maximum Wind: 65 knots (75 mph)`; the second carries its fields in
    /// `ExtendedData` and has a `cat3` style.
    pub const TRACK: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
<Document>
  <name>AL052024 Ernesto Forecast Track</name>
  <Style id="cat1"><IconStyle><Icon><href>files/h_1.png</href></Icon></IconStyle></Style>
  <Style id="cat3"><IconStyle><Icon><href>files/h_3.png</href></Icon></IconStyle></Style>
  <Folder>
    <name>Forecast Track</name>
    <Placemark>
      <name>Forecast Track</name>
      <LineString><coordinates>-65.0,20.0,0 -66.1,22.5,0 -66.8,25.2,0</coordinates></LineString>
    </Placemark>
  </Folder>
  <Folder>
    <name>Forecast Points</name>
    <Placemark>
      <name>Hurricane Ernesto</name>
      <styleUrl>#cat1</styleUrl>
      <description><![CDATA[<table>
        <tr><td>Valid at: 2:00 PM AST August 14</td></tr>
        <tr><td>Maximum Wind: 65 knots (75 mph)</td></tr>
        <tr><td>Minimum Pressure: 990 mb</td></tr>
        <tr><td>12 hr Forecast</td></tr>
      </table>]]></description>
      <Point><coordinates>-66.1,22.5,0</coordinates></Point>
    </Placemark>
    <Placemark>
      <name>Hurricane Ernesto</name>
      <styleUrl>#cat3</styleUrl>
      <ExtendedData>
        <Data name="stormName"><value>ERNESTO</value></Data>
        <Data name="basin"><value>AL</value></Data>
        <Data name="advisoryNum"><value>12</value></Data>
        <Data name="fcstpd"><value>24</value></Data>
      </ExtendedData>
      <Point><coordinates>-66.8,25.2,0</coordinates></Point>
    </Placemark>
  </Folder>
</Document>
</kml>
"##;

    /// Forecast cone: one polygon with an inner ring.
    pub const CONE: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
<Document>
  <Folder>
    <name>Forecast Cone</name>
    <Placemark>
      <name>ERNESTO</name>
      <ExtendedData>
        <SchemaData schemaUrl="#cone">
          <SimpleData name="stormName">ERNESTO</SimpleData>
          <SimpleData name="advisoryNum">12</SimpleData>
        </SchemaData>
      </ExtendedData>
      <Polygon>
        <outerBoundaryIs><LinearRing><coordinates>
          -65.0,20.0 -63.0,25.0 -66.0,30.0 -69.0,25.0 -65.0,20.0
        </coordinates></LinearRing></outerBoundaryIs>
        <innerBoundaryIs><LinearRing><coordinates>
          -66.0,24.0 -65.5,25.0 -66.5,25.0 -66.0,24.0
        </coordinates></LinearRing></innerBoundaryIs>
      </Polygon>
    </Placemark>
  </Folder>
</Document>
</kml>
"##;

    /// Peak storm surge: three bands, one of them a MultiGeometry.
    pub const SURGE: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
<Document>
  <Document>
    <name>Peak Storm Surge</name>
    <Folder>
      <Placemark>
        <name>1-3 ft</name>
        <Polygon><outerBoundaryIs><LinearRing><coordinates>-80,25 -80.5,25 -80.5,25.5 -80,25</coordinates></LinearRing></outerBoundaryIs></Polygon>
      </Placemark>
      <Placemark>
        <name>3-6 ft</name>
        <MultiGeometry>
          <Polygon><outerBoundaryIs><LinearRing><coordinates>-81,26 -81.5,26 -81.5,26.5 -81,26</coordinates></LinearRing></outerBoundaryIs></Polygon>
          <Polygon><outerBoundaryIs><LinearRing><coordinates>-82,27 -82.5,27 -82.5,27.5 -82,27</coordinates></LinearRing></outerBoundaryIs></Polygon>
        </MultiGeometry>
      </Placemark>
      <Placemark>
        <name>Greater than 9 ft</name>
        <Polygon><outerBoundaryIs><LinearRing><coordinates>-83,28 -83.5,28 -83.5,28.5 -83,28</coordinates></LinearRing></outerBoundaryIs></Polygon>
      </Placemark>
    </Folder>
  </Document>
</Document>
</kml>
"##;

    /// Wind speed probability: `<5%`, `80-90` and `>90%` contours.
    pub const PROBABILITY: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
<Document>
  <Folder>
    <name>34 kt Wind Speed Probabilities</name>
    <Placemark>
      <name>&lt;5%</name>
      <Polygon><outerBoundaryIs><LinearRing><coordinates>-90,10 -40,10 -40,45 -90,45 -90,10</coordinates></LinearRing></outerBoundaryIs></Polygon>
    </Placemark>
    <Placemark>
      <name>80-90</name>
      <Polygon><outerBoundaryIs><LinearRing><coordinates>-68,22 -64,22 -64,27 -68,27 -68,22</coordinates></LinearRing></outerBoundaryIs></Polygon>
    </Placemark>
    <Placemark>
      <name>&gt;90%</name>
      <Polygon><outerBoundaryIs><LinearRing><coordinates>-67,23 -65,23 -65,26 -67,26 -67,23</coordinates></LinearRing></outerBoundaryIs></Polygon>
    </Placemark>
  </Folder>
</Document>
</kml>
"##;

    /// Most-likely arrival: a split map label (group 2) and one contour.
    pub const ARRIVAL: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
<Document>
  <Style id="style2a"><IconStyle><Icon><href>files/wed.png</href></Icon></IconStyle></Style>
  <Style id="style2b"><IconStyle><Icon><href>files/eight.png</href></Icon></IconStyle></Style>
  <Style id="style2c"><IconStyle><Icon><href>files/am.png</href></Icon></IconStyle></Style>
  <StyleMap id="label2a">
    <Pair><key>normal</key><styleUrl>#style2a</styleUrl></Pair>
    <Pair><key>highlight</key><styleUrl>#style2a</styleUrl></Pair>
  </StyleMap>
  <Folder>
    <name>Labels</name>
    <Placemark><styleUrl>#label2a</styleUrl><Point><coordinates>-70.0,28.0</coordinates></Point></Placemark>
    <Placemark><styleUrl>#style2b</styleUrl><Point><coordinates>-69.8,28.0</coordinates></Point></Placemark>
    <Placemark><styleUrl>#style2c</styleUrl><Point><coordinates>-69.6,28.0</coordinates></Point></Placemark>
  </Folder>
  <Folder>
    <name>Contours</name>
    <Placemark>
      <name>Thu 2 PM</name>
      <LineString><coordinates>-75,25 -72,27 -70,30</coordinates></LineString>
    </Placemark>
  </Folder>
</Document>
</kml>
"##;
}

/// A-deck text.
pub mod adeck {
    /// Two cycles of AL05. The later cycle has OFCL, GFS, AEMN and AP03,
    /// a duplicate OFCL tau 12 (second has 999 kt), a southern/eastern
    /// fix, a non-allow-listed model and two malformed lines.
    pub const AL05: &str = "\
AL, 05, 2024081806, 03, OFCL,   0, 180N,  640W,  55, 1000, TS
AL, 05, 2024081812, 03, AP03,   0, 190N,  650W,  50, 1002, TS
AL, 05, 2024081812, 03, AP03,  12, 201N,  658W,  55, 1000, TS
AL, 05, 2024081812, 03, OFCL,  12, 200N,  655W,  60,  995, TS
AL, 05, 2024081812, 03, OFCL,   0, 190N,  650W,  55,  998, TS
AL, 05, 2024081812, 03, OFCL,  12, 205N,  660W, 999,  995, TS
AL, 05, 2024081812, 03, GFS,    0, 190N,  650W,   0, 1003, TS
AL, 05, 2024081812, 03, AEMN,  24, 215S, 1795E,  45, 1004, TS
AL, 05, 2024081812, 03, ZZZZ,   0, 190N,  650W,  50, 1004, TS
AL, 05, 2024081812
garbage line without enough fields
";
}
