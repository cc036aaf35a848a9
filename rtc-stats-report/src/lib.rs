#![warn(rust_2018_idioms)]

//! Normalization of WebRTC `getStats()` snapshots.
//!
//! A raw snapshot is a loosely structured collection of stats records whose
//! field set varies between transports and versions. This crate classifies
//! each record into one of a closed set of [`RTCStatsCategory`] values,
//! projects it onto the field whitelist of that category, and groups the
//! results into a [`RTCStatsCategorizedReport`].
//!
//! - `category` - the closed category set
//! - `schema` - per-category field whitelists
//! - `classifier` - `type`/`kind` to category rules
//! - `record` - raw stats records and snapshots
//! - `normalizer` - snapshot to report normalization
//! - `report` - categorized report types

pub mod category;
pub mod classifier;
pub mod error;
pub mod normalizer;
pub mod record;
pub mod report;
pub mod schema;

pub use category::{RTCStatsCategory, RTCStatsMediaKind};
pub use classifier::{RTCStatsClassifier, RTCStatsClassifierBuilder};
pub use error::{Error, Result};
pub use normalizer::{RTCStatsNormalizer, RTCStatsNormalizerBuilder, normalize_snapshot};
pub use record::{RTCRawStats, RTCRawStatsSnapshot, RTCRejectedStats};
pub use report::{RTCDroppedStats, RTCNormalizedStats, RTCStatsCategorizedReport};
pub use schema::{RTCStatsFieldSchema, RTCStatsSchemaEntry, RTCStatsSchemaTable};
