//! Pure classification helpers shared by the extractors.

use std::fmt;

/// Saffir-Simpson intensity class derived from sustained wind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WindCategory {
    TropicalDepression,
    TropicalStorm,
    Category1,
    Category2,
    Category3,
    Category4,
    Category5,
}

impl WindCategory {
    /// Classify a sustained wind speed in knots.
    ///
    /// This table is the only place the thresholds live.
    pub fn from_knots(knots: f64) -> Self {
        if knots < 34.0 {
            WindCategory::TropicalDepression
        } else if knots < 64.0 {
            WindCategory::TropicalStorm
        } else if knots < 83.0 {
            WindCategory::Category1
        } else if knots < 96.0 {
            WindCategory::Category2
        } else if knots < 113.0 {
            WindCategory::Category3
        } else if knots < 137.0 {
            WindCategory::Category4
        } else {
            WindCategory::Category5
        }
    }

    /// Short label used in feature properties.
    pub fn label(&self) -> &'static str {
        match self {
            WindCategory::TropicalDepression => "TD",
            WindCategory::TropicalStorm => "TS",
            WindCategory::Category1 => "1",
            WindCategory::Category2 => "2",
            WindCategory::Category3 => "3",
            WindCategory::Category4 => "4",
            WindCategory::Category5 => "5",
        }
    }

    pub fn is_hurricane(&self) -> bool {
        *self >= WindCategory::Category1
    }

    pub fn is_major_hurricane(&self) -> bool {
        *self >= WindCategory::Category3
    }
}

impl fmt::Display for WindCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Category label for a wind speed in knots.
pub fn category_from_wind(knots: f64) -> &'static str {
    WindCategory::from_knots(knots).label()
}

/// Coarse category implied by a track point's style identifier.
///
/// Leading `#` is ignored; unknown styles are upper-cased as-is.
pub fn category_from_style(style_id: &str) -> String {
    let style = style_id.trim().trim_start_matches('#');
    let category = match style {
        "initial_point" => "NOW",
        "xd_point" | "d_point" => "TD",
        "xs_point" | "s_point" => "TS",
        "xh_point" | "h_point" => "1-2",
        "xm_point" | "m_point" => "3-5",
        "td" => "TD",
        "ts" => "TS",
        "cat1" => "1",
        "cat2" => "2",
        "cat3" => "3",
        "cat4" => "4",
        "cat5" => "5",
        "ex" => "EX",
        other => return other.to_uppercase(),
    };
    category.to_string()
}

/// Which slot of a split arrival-time label a fragment fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelKind {
    Day,
    Hour,
    Period,
}

impl LabelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelKind::Day => "day",
            LabelKind::Hour => "hour",
            LabelKind::Period => "period",
        }
    }

    /// Slot implied by a style suffix letter (`a` day, `b` hour, `c` period).
    pub fn from_suffix(suffix: char) -> Option<Self> {
        match suffix.to_ascii_lowercase() {
            'a' => Some(LabelKind::Day),
            'b' => Some(LabelKind::Hour),
            'c' => Some(LabelKind::Period),
            _ => None,
        }
    }
}

/// A classified label fragment with its normalized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelPart {
    pub kind: LabelKind,
    pub text: String,
}

const WEEKDAYS: [(&str, &str); 7] = [
    ("mon", "Mon"),
    ("tue", "Tue"),
    ("wed", "Wed"),
    ("thu", "Thu"),
    ("fri", "Fri"),
    ("sat", "Sat"),
    ("sun", "Sun"),
];

const NUMBER_WORDS: [&str; 12] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve",
];

/// Classify a label fragment as a weekday, an hour, or an AM/PM marker.
///
/// Returns `None` for anything else.
pub fn classify_label(text: &str) -> Option<LabelPart> {
    let lower = text.trim().to_ascii_lowercase();
    if lower.is_empty() {
        return None;
    }

    match lower.as_str() {
        "am" | "a.m." => return Some(part(LabelKind::Period, "AM")),
        "pm" | "p.m." => return Some(part(LabelKind::Period, "PM")),
        _ => {}
    }

    if let Some(index) = NUMBER_WORDS.iter().position(|w| *w == lower) {
        return Some(part(LabelKind::Hour, &(index + 1).to_string()));
    }

    if let Ok(hour) = lower.parse::<u32>() {
        return (1..=12)
            .contains(&hour)
            .then(|| part(LabelKind::Hour, &hour.to_string()));
    }

    if lower.len() <= 9 && lower.chars().all(|c| c.is_ascii_alphabetic()) {
        if let Some((_, day)) = WEEKDAYS.iter().find(|(abbr, _)| lower.starts_with(abbr)) {
            return Some(part(LabelKind::Day, day));
        }
    }

    None
}

fn part(kind: LabelKind, text: &str) -> LabelPart {
    LabelPart {
        kind,
        text: text.to_string(),
    }
}
