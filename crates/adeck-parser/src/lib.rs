//! A-deck (model guidance) parser.
//!
//! Reads the agency's comma-separated, fixed-column track aid file and keeps
//! the known models of the latest cycle, one point per forecast hour,
//! ordered by how forecasters rank them.
//!
//! Bad lines are never fatal: they are counted in [`ParseStats`] and skipped.

pub mod models;
mod parse;
pub mod record;

pub use models::{compare_models, is_known_model, priority_rank};
pub use parse::{parse_adeck, parse_adeck_with_stats, ParseStats};
pub use record::SkipReason;
