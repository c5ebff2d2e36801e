//! Single A-deck line decoding.
//!
//! A record is a comma-separated line:
//!
//! ```text
//! AL, 05, 2024081812, 03, OFCL,  12, 251N,  802W,  65, 1000, TS, ...
//! ```
//!
//! Fields used: 2 cycle, 4 model, 5 tau, 6 latitude, 7 longitude, 8 vmax.

use storm_common::ModelPoint;

/// Fewest fields a usable record has.
pub const MIN_FIELDS: usize = 9;

const CYCLE_FIELD: usize = 2;
const MODEL_FIELD: usize = 4;
const TAU_FIELD: usize = 5;
const LAT_FIELD: usize = 6;
const LON_FIELD: usize = 7;
const VMAX_FIELD: usize = 8;

/// Largest coordinate magnitude accepted, in degrees.
pub const MAX_DEGREES: f64 = 360.0;

/// Why a line was left out of the track set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SkipReason {
    TooFewFields,
    BadCycle,
    OtherCycle,
    UnknownModel,
    Undecodable,
    DuplicateTau,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::TooFewFields => "too_few_fields",
            SkipReason::BadCycle => "bad_cycle",
            SkipReason::OtherCycle => "other_cycle",
            SkipReason::UnknownModel => "unknown_model",
            SkipReason::Undecodable => "undecodable",
            SkipReason::DuplicateTau => "duplicate_tau",
        }
    }
}

/// A line split into trimmed fields with a valid cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord<'a> {
    pub cycle: &'a str,
    fields: Vec<&'a str>,
}

impl<'a> RawRecord<'a> {
    /// Split a line. Fails when there are too few fields or the cycle is not
    /// a 10-digit `YYYYMMDDHH`.
    pub fn split(line: &'a str) -> Result<Self, SkipReason> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() < MIN_FIELDS {
            return Err(SkipReason::TooFewFields);
        }

        let cycle = fields[CYCLE_FIELD];
        if cycle.len() != 10 || !cycle.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SkipReason::BadCycle);
        }

        Ok(Self { cycle, fields })
    }

    /// Model id, uppercased.
    pub fn model(&self) -> String {
        self.fields[MODEL_FIELD].to_ascii_uppercase()
    }

    /// Decode tau, position and wind.
    pub fn point(&self) -> Result<ModelPoint, SkipReason> {
        let tau = self.fields[TAU_FIELD]
            .parse::<i32>()
            .map_err(|_| SkipReason::Undecodable)?;
        let lat = decode_coordinate(self.fields[LAT_FIELD], 'N', 'S')
            .filter(|lat| (-90.0..=90.0).contains(lat))
            .ok_or(SkipReason::Undecodable)?;
        let lon = decode_coordinate(self.fields[LON_FIELD], 'E', 'W')
            .map(normalize_longitude)
            .ok_or(SkipReason::Undecodable)?;

        Ok(ModelPoint {
            tau,
            lat,
            lon,
            vmax: decode_vmax(self.fields[VMAX_FIELD]),
        })
    }
}

/// Decode `251N` / `802W` / `25.1N`.
///
/// An integer magnitude is in tenths of a degree; a magnitude that already
/// has a decimal point is taken as degrees. The `negative` hemisphere
/// letter negates. Magnitudes that are not finite or exceed
/// [`MAX_DEGREES`] are rejected.
pub fn decode_coordinate(token: &str, positive: char, negative: char) -> Option<f64> {
    let token = token.trim();
    let (split, hemisphere) = token.char_indices().last()?;
    let hemisphere = hemisphere.to_ascii_uppercase();
    let magnitude = &token[..split];

    let sign = if hemisphere == positive {
        1.0
    } else if hemisphere == negative {
        -1.0
    } else {
        return None;
    };

    let degrees = if magnitude.contains('.') {
        magnitude.parse::<f64>().ok()?
    } else {
        magnitude.parse::<u32>().ok()? as f64 / 10.0
    };
    if !degrees.is_finite() || degrees > MAX_DEGREES {
        return None;
    }

    Some(sign * degrees)
}

/// Bring a longitude into [-180, 180].
pub fn normalize_longitude(lon: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon) || !lon.is_finite() {
        return lon;
    }
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 && lon > 0.0 {
        180.0
    } else {
        wrapped
    }
}

/// Maximum wind in knots. Blank, non-numeric and `0` mean "not forecast".
fn decode_vmax(token: &str) -> Option<i32> {
    token.parse::<i32>().ok().filter(|v| *v > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_coordinate_tenths() {
        assert_eq!(decode_coordinate("251N", 'N', 'S'), Some(25.1));
        assert_eq!(decode_coordinate("802W", 'E', 'W'), Some(-80.2));
        assert_eq!(decode_coordinate("155s", 'N', 'S'), Some(-15.5));
    }

    #[test]
    fn test_decode_coordinate_fractional() {
        assert_eq!(decode_coordinate("25.1N", 'N', 'S'), Some(25.1));
        assert_eq!(decode_coordinate("80.25W", 'E', 'W'), Some(-80.25));
    }

    #[test]
    fn test_decode_coordinate_rejects() {
        assert_eq!(decode_coordinate("", 'N', 'S'), None);
        assert_eq!(decode_coordinate("251", 'N', 'S'), None);
        assert_eq!(decode_coordinate("251E", 'N', 'S'), None);
        assert_eq!(decode_coordinate("N", 'N', 'S'), None);
        assert_eq!(decode_coordinate("2x1N", 'N', 'S'), None);
    }

    #[test]
    fn test_decode_coordinate_rejects_out_of_range() {
        assert_eq!(decode_coordinate("1.0e300W", 'E', 'W'), None);
        assert_eq!(decode_coordinate("1.0e999W", 'E', 'W'), None);
        assert_eq!(decode_coordinate("infW", 'E', 'W'), None);
        assert_eq!(decode_coordinate("360.5E", 'E', 'W'), None);
        assert_eq!(decode_coordinate("3601W", 'E', 'W'), None);
        assert_eq!(decode_coordinate("3600W", 'E', 'W'), Some(-360.0));
    }

    #[test]
    fn test_normalize_longitude() {
        assert_eq!(normalize_longitude(190.0), -170.0);
        assert_eq!(normalize_longitude(-350.0), 10.0);
        assert_eq!(normalize_longitude(180.0), 180.0);
        assert_eq!(normalize_longitude(-180.0), -180.0);
        assert_eq!(normalize_longitude(540.0), 180.0);
        assert_eq!(normalize_longitude(-360.0), 0.0);
        assert!((-180.0..=180.0).contains(&normalize_longitude(-1e300)));
    }

    #[test]
    fn test_huge_longitude_is_undecodable() {
        let record =
            RawRecord::split("AL, 05, 2024081812, 03, OFCL, 0, 251N, 1.0e300W, 65").unwrap();
        assert_eq!(record.point().unwrap_err(), SkipReason::Undecodable);

        let record = RawRecord::split("AL, 05, 2024081812, 03, OFCL, 0, 251N, infW, 65").unwrap();
        assert_eq!(record.point().unwrap_err(), SkipReason::Undecodable);
    }

    #[test]
    fn test_split_and_decode() {
        let record =
            RawRecord::split("AL, 05, 2024081812, 03, ofcl,  12, 251N,  802W,   0, 1000, TS")
                .unwrap();
        assert_eq!(record.cycle, "2024081812");
        assert_eq!(record.model(), "OFCL");

        let point = record.point().unwrap();
        assert_eq!(point.tau, 12);
        assert_eq!(point.lat, 25.1);
        assert_eq!(point.lon, -80.2);
        assert_eq!(point.vmax, None);
    }

    #[test]
    fn test_split_rejects() {
        assert_eq!(
            RawRecord::split("AL, 05, 2024081812").unwrap_err(),
            SkipReason::TooFewFields
        );
        assert_eq!(
            RawRecord::split("AL, 05, 20240818, 03, OFCL, 0, 251N, 802W, 65").unwrap_err(),
            SkipReason::BadCycle
        );
    }

    #[test]
    fn test_undecodable_fields() {
        let bad_tau = RawRecord::split("AL, 05, 2024081812, 03, OFCL, xx, 251N, 802W, 65").unwrap();
        assert_eq!(bad_tau.point().unwrap_err(), SkipReason::Undecodable);

        let bad_lat = RawRecord::split("AL, 05, 2024081812, 03, OFCL, 0, 951N, 802W, 65").unwrap();
        assert_eq!(bad_lat.point().unwrap_err(), SkipReason::Undecodable);
    }
}
