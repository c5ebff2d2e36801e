//! Common types and utilities shared across the storm-feeds crates.
//!
//! Everything in here is a plain value: features and tracks are built per
//! request and never mutated once handed back to a caller.

pub mod error;
pub mod feature;
pub mod product;
pub mod track;

pub use error::{StormError, StormResult};
pub use feature::{Feature, FeatureCollection, Geometry, Position, PropertyValue, Properties};
pub use product::ProductType;
pub use track::{ModelPoint, ModelTrack, ModelTrackSet};
