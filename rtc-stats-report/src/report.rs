//! Categorized stats report types.
//!
//! This module provides the `RTCStatsCategorizedReport` type which is the
//! return value of normalization and groups normalized stats records by
//! [`RTCStatsCategory`].

use crate::category::RTCStatsCategory;
use crate::error::{Error, Result};
use crate::record::{FIELD_ID, FIELD_TYPE};
use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A stats record reduced to the fields whitelisted for its category.
///
/// Fields keep the order of the category schema.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct RTCNormalizedStats {
    fields: Map<String, Value>,
}

impl RTCNormalizedStats {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Map::with_capacity(capacity),
        }
    }

    pub(crate) fn insert(&mut self, field: &str, value: Value) {
        self.fields.insert(field.to_owned(), value);
    }

    /// Returns the unique ID for this stats record.
    pub fn id(&self) -> Option<&str> {
        self.fields.get(FIELD_ID).and_then(Value::as_str)
    }

    /// Returns the raw `type` of this stats record.
    pub fn stats_type(&self) -> Option<&str> {
        self.fields.get(FIELD_TYPE).and_then(Value::as_str)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns the field names, in schema order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Diagnostic for a raw record left out of a report.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RTCDroppedStats {
    pub id: Option<String>,
    pub stats_type: Option<String>,
    pub reason: String,
}

/// Normalized stats records grouped by category.
///
/// Every category registered in the schema table used for normalization has
/// a group, possibly empty. Records within a group keep snapshot order.
///
/// # Example
///
/// ```ignore
/// use rtc_stats_report::{RTCStatsCategory, normalize_snapshot};
///
/// let report = normalize_snapshot(&snapshot)?;
///
/// // get stats of incoming RTP video streams
/// for stats in report.get(RTCStatsCategory::InboundRtpVideoStreams) {
///     println!("{}", serde_json::to_string(stats)?);
/// }
///
/// // or by category key
/// let codecs = report.get_by_key("RTCCodecs")?;
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RTCStatsCategorizedReport {
    groups: BTreeMap<RTCStatsCategory, Vec<RTCNormalizedStats>>,
    dropped: Vec<RTCDroppedStats>,
}

impl RTCStatsCategorizedReport {
    /// Creates an empty report with one group per category.
    pub(crate) fn new(categories: impl IntoIterator<Item = RTCStatsCategory>) -> Self {
        Self {
            groups: categories
                .into_iter()
                .map(|category| (category, Vec::new()))
                .collect(),
            dropped: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, category: RTCStatsCategory, stats: RTCNormalizedStats) {
        self.groups.entry(category).or_default().push(stats);
    }

    pub(crate) fn push_dropped(&mut self, dropped: RTCDroppedStats) {
        self.dropped.push(dropped);
    }

    /// Returns the records of one category, in snapshot order.
    pub fn get(&self, category: RTCStatsCategory) -> &[RTCNormalizedStats] {
        self.groups
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the records of the category with the given key
    /// (e.g. `"RTCCodecs"`).
    pub fn get_by_key(&self, key: &str) -> Result<&[RTCNormalizedStats]> {
        let category: RTCStatsCategory = key.parse()?;
        if !self.groups.contains_key(&category) {
            return Err(Error::ErrUnknownCategory(key.to_owned()));
        }
        Ok(self.get(category))
    }

    /// Returns true if the report has a group for the category.
    pub fn contains(&self, category: RTCStatsCategory) -> bool {
        self.groups.contains_key(&category)
    }

    /// Returns every category with a group, in canonical order.
    pub fn categories(&self) -> impl Iterator<Item = RTCStatsCategory> + '_ {
        self.groups.keys().copied()
    }

    /// Returns an iterator over all groups, in canonical category order.
    pub fn iter(&self) -> impl Iterator<Item = (RTCStatsCategory, &[RTCNormalizedStats])> {
        self.groups
            .iter()
            .map(|(category, stats)| (*category, stats.as_slice()))
    }

    /// Finds a normalized record by its ID.
    pub fn find(&self, id: &str) -> Option<(RTCStatsCategory, &RTCNormalizedStats)> {
        self.groups.iter().find_map(|(category, stats)| {
            stats
                .iter()
                .find(|s| s.id() == Some(id))
                .map(|s| (*category, s))
        })
    }

    /// Returns the number of records in one category.
    pub fn count(&self, category: RTCStatsCategory) -> usize {
        self.get(category).len()
    }

    /// Returns the number of normalized records across all categories.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Returns true if no record was normalized.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the records that could not be classified.
    pub fn dropped(&self) -> &[RTCDroppedStats] {
        &self.dropped
    }

    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }
}

// Serialized as an object of category key to records; drop diagnostics are
// not part of the report body.
impl Serialize for RTCStatsCategorizedReport {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.groups.iter())
    }
}
