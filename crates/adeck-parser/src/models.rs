//! Model allow-list and display priority.
//!
//! Tracks are presented official forecast first, then the hurricane-specific
//! dynamical models, then the global models, then ensemble products.

use std::cmp::Ordering;
use std::sync::OnceLock;

use regex::Regex;

/// Priority groups, highest first. Perturbation members (`AP01`..`AP30`)
/// rank right after the last group.
pub const PRIORITY_GROUPS: [&[&str]; 7] = [
    // Official forecast
    &["OFCL", "OFCI"],
    // High-resolution hurricane models
    &["HAFS", "HFSA", "HFSB", "HFAI", "HFBI", "HWRF", "HWFI", "HMON", "HMNI"],
    // Regional hurricane systems
    &[
        "CTCX", "CTCI", "COTC", "COTI", "NVGM", "NVGI", "UKM", "UKMI", "UKX", "UKXI", "CMC",
        "CMCI",
    ],
    // Global
    &["GFS", "AVNO", "AVNI", "GFSO", "GFSI"],
    // European
    &["EMX", "EMXI", "ECMF", "EEMN"],
    // Ensemble mean
    &["AEMN", "AEMI"],
    // Ensemble control
    &["AC00"],
];

/// Consensus and statistical aids: accepted, ranked last.
pub const CONSENSUS_AIDS: [&str; 16] = [
    "TVCN", "TVCA", "TVCE", "HCCA", "FSSE", "IVCN", "SHIP", "DSHP", "LGEM", "BAMS", "BAMM",
    "BAMD", "CLP5", "TCLP", "XTRP", "OCD5",
];

fn perturbation_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^AP\d{2}$").expect("perturbation regex is valid"))
}

fn is_perturbation(model_id: &str) -> bool {
    perturbation_regex().is_match(model_id)
}

/// Whether a model id (uppercase) is a known operational or ensemble aid.
pub fn is_known_model(model_id: &str) -> bool {
    PRIORITY_GROUPS.iter().any(|group| group.contains(&model_id))
        || CONSENSUS_AIDS.contains(&model_id)
        || is_perturbation(model_id)
}

/// Rank of a model id; lower sorts first.
pub fn priority_rank(model_id: &str) -> usize {
    if let Some(rank) = PRIORITY_GROUPS
        .iter()
        .position(|group| group.contains(&model_id))
    {
        return rank;
    }
    if is_perturbation(model_id) {
        PRIORITY_GROUPS.len()
    } else {
        PRIORITY_GROUPS.len() + 1
    }
}

/// Order two model ids by priority, then lexicographically.
pub fn compare_models(a: &str, b: &str) -> Ordering {
    priority_rank(a)
        .cmp(&priority_rank(b))
        .then_with(|| a.cmp(b))
}
