//! A-deck text → ranked model tracks for the latest cycle.

use std::collections::BTreeMap;

use storm_common::{ModelPoint, ModelTrack, ModelTrackSet};
use tracing::{debug, trace};

use crate::models::{compare_models, is_known_model};
use crate::record::{RawRecord, SkipReason};

/// Line counts from one parse, for caller-side logging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Non-blank lines seen.
    pub lines_read: usize,
    /// Records that became track points.
    pub kept: usize,
    pub skipped: BTreeMap<SkipReason, usize>,
}

impl ParseStats {
    fn skip(&mut self, reason: SkipReason) {
        *self.skipped.entry(reason).or_default() += 1;
    }

    /// Lines skipped for `reason`.
    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.skipped.get(&reason).copied().unwrap_or(0)
    }

    pub fn total_skipped(&self) -> usize {
        self.skipped.values().sum()
    }
}

/// Parse A-deck text into the model tracks of its latest cycle.
///
/// Malformed lines, other cycles and unknown models are skipped; the result
/// is empty (with an empty `cycle`) when nothing qualifies.
pub fn parse_adeck(text: &str, filename: &str) -> ModelTrackSet {
    parse_adeck_with_stats(text, filename).0
}

/// [`parse_adeck`] plus per-reason line counts.
pub fn parse_adeck_with_stats(text: &str, filename: &str) -> (ModelTrackSet, ParseStats) {
    let mut stats = ParseStats::default();
    let mut records = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        stats.lines_read += 1;

        match RawRecord::split(line) {
            Ok(record) => records.push(record),
            Err(reason) => {
                trace!(line = line_no + 1, reason = reason.as_str(), "Skipping A-deck line");
                stats.skip(reason);
            }
        }
    }

    let Some(cycle) = records.iter().map(|r| r.cycle).max() else {
        debug!(filename, lines = stats.lines_read, "No A-deck records with a valid cycle");
        return (ModelTrackSet::empty(filename), stats);
    };

    let mut by_model: BTreeMap<String, Vec<ModelPoint>> = BTreeMap::new();
    for record in &records {
        if record.cycle != cycle {
            stats.skip(SkipReason::OtherCycle);
            continue;
        }

        let model = record.model();
        if !is_known_model(&model) {
            stats.skip(SkipReason::UnknownModel);
            continue;
        }

        let point = match record.point() {
            Ok(point) => point,
            Err(reason) => {
                stats.skip(reason);
                continue;
            }
        };

        let points = by_model.entry(model).or_default();
        if points.iter().any(|p| p.tau == point.tau) {
            stats.skip(SkipReason::DuplicateTau);
            continue;
        }
        points.push(point);
        stats.kept += 1;
    }

    let mut tracks: Vec<ModelTrack> = by_model
        .into_iter()
        .map(|(model_id, mut points)| {
            points.sort_by_key(|p| p.tau);
            ModelTrack { model_id, points }
        })
        .collect();
    tracks.sort_by(|a, b| compare_models(&a.model_id, &b.model_id));

    debug!(
        filename,
        cycle,
        models = tracks.len(),
        kept = stats.kept,
        skipped = stats.total_skipped(),
        "Parsed A-deck"
    );

    let set = ModelTrackSet {
        filename: filename.to_string(),
        cycle: cycle.to_string(),
        models_present: tracks.iter().map(|t| t.model_id.clone()).collect(),
        tracks,
    };
    (set, stats)
}
