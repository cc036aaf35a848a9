//! Raw stats records and snapshots.
//!
//! A raw snapshot is whatever the transport's `getStats()` call produced,
//! already materialized as JSON. Records are kept as opaque key/value maps:
//! only `type`, `id` and the discriminators used for classification are ever
//! interpreted.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Field holding the stats type discriminator.
pub const FIELD_TYPE: &str = "type";
/// Field holding the unique stats object id.
pub const FIELD_ID: &str = "id";
/// Field holding the media kind of RTP-level stats.
pub const FIELD_KIND: &str = "kind";
/// Legacy name of [`FIELD_KIND`], still emitted by some browsers.
pub const FIELD_MEDIA_TYPE: &str = "mediaType";
/// Field telling remote (received) tracks from local (sent) ones.
pub const FIELD_REMOTE_SOURCE: &str = "remoteSource";

/// One raw stats object, as produced by the transport.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RTCRawStats {
    fields: Map<String, Value>,
}

impl RTCRawStats {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Returns the unique id of the stats object, when it is a string.
    pub fn id(&self) -> Option<&str> {
        self.get_str(FIELD_ID)
    }

    /// Returns the `type` discriminator, when it is a string.
    pub fn stats_type(&self) -> Option<&str> {
        self.get_str(FIELD_TYPE)
    }

    /// Returns the media kind, read from `kind`.
    pub fn kind(&self) -> Option<&str> {
        self.get_str(FIELD_KIND)
    }

    /// Returns the legacy `mediaType` discriminator.
    pub fn media_type(&self) -> Option<&str> {
        self.get_str(FIELD_MEDIA_TYPE)
    }

    /// Returns the `remoteSource` flag, when it is a boolean.
    pub fn remote_source(&self) -> Option<bool> {
        self.fields.get(FIELD_REMOTE_SOURCE).and_then(Value::as_bool)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }
}

impl TryFrom<Value> for RTCRawStats {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(RTCRawStats { fields }),
            other => Err(Error::ErrInvalidRecord(json_kind(&other).to_owned())),
        }
    }
}

impl From<Map<String, Value>> for RTCRawStats {
    fn from(fields: Map<String, Value>) -> Self {
        RTCRawStats { fields }
    }
}

impl<'de> Deserialize<'de> for RTCRawStats {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        RTCRawStats::try_from(value).map_err(serde::de::Error::custom)
    }
}

/// An entry of a source report that is not a stats object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RTCRejectedStats {
    /// The key of the entry, when the source report is keyed by id.
    pub id: Option<String>,
    pub reason: String,
}

/// A point-in-time collection of raw stats records.
///
/// Records keep the iteration order of the source report. Entries of the
/// source report that are not JSON objects do not become records; they are
/// kept aside as [`RTCRejectedStats`] so the rest of the snapshot can still
/// be normalized.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RTCRawStatsSnapshot {
    records: Vec<RTCRawStats>,
    #[serde(skip)]
    rejected: Vec<RTCRejectedStats>,
}

impl RTCRawStatsSnapshot {
    pub fn new(records: Vec<RTCRawStats>) -> Self {
        Self {
            records,
            rejected: Vec::new(),
        }
    }

    /// Parses a snapshot from JSON text, see [`RTCRawStatsSnapshot::from_value`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        RTCRawStatsSnapshot::from_value(value)
    }

    /// Builds a snapshot from either a JSON array of records, or a JSON object
    /// of records keyed by id (the serialized form of a map-like stats report).
    ///
    /// When records are keyed by id and a record has no `id` of its own, the
    /// key is filled in.
    ///
    /// Only a top-level value that is neither an array nor an object fails;
    /// entries that are not objects are collected in
    /// [`RTCRawStatsSnapshot::rejected`].
    pub fn from_value(value: Value) -> Result<Self> {
        let mut snapshot = RTCRawStatsSnapshot::default();
        match value {
            Value::Array(values) => {
                snapshot.records.reserve(values.len());
                for value in values {
                    snapshot.push_value(None, value);
                }
            }
            Value::Object(entries) => {
                snapshot.records.reserve(entries.len());
                for (key, value) in entries {
                    snapshot.push_value(Some(key), value);
                }
            }
            other => return Err(Error::ErrInvalidSnapshot(json_kind(&other).to_owned())),
        }
        Ok(snapshot)
    }

    fn push_value(&mut self, key: Option<String>, value: Value) {
        match RTCRawStats::try_from(value) {
            Ok(mut record) => {
                if let Some(key) = key {
                    if !record.contains(FIELD_ID) {
                        record.fields.insert(FIELD_ID.to_owned(), Value::String(key));
                    }
                }
                self.records.push(record);
            }
            Err(err) => self.rejected.push(RTCRejectedStats {
                id: key,
                reason: err.to_string(),
            }),
        }
    }

    /// Returns the first record carrying the given id.
    pub fn get(&self, id: &str) -> Option<&RTCRawStats> {
        self.records.iter().find(|record| record.id() == Some(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RTCRawStats> {
        self.records.iter()
    }

    /// Returns an iterator over all record ids.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.iter().filter_map(RTCRawStats::id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the entries of the source report that were not stats objects.
    pub fn rejected(&self) -> &[RTCRejectedStats] {
        &self.rejected
    }

    pub fn push(&mut self, record: RTCRawStats) {
        self.records.push(record);
    }
}

impl FromIterator<RTCRawStats> for RTCRawStatsSnapshot {
    fn from_iter<I: IntoIterator<Item = RTCRawStats>>(iter: I) -> Self {
        RTCRawStatsSnapshot::new(iter.into_iter().collect())
    }
}

impl IntoIterator for RTCRawStatsSnapshot {
    type Item = RTCRawStats;
    type IntoIter = std::vec::IntoIter<RTCRawStats>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a RTCRawStatsSnapshot {
    type Item = &'a RTCRawStats;
    type IntoIter = std::slice::Iter<'a, RTCRawStats>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl TryFrom<Value> for RTCRawStatsSnapshot {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        RTCRawStatsSnapshot::from_value(value)
    }
}

impl<'de> Deserialize<'de> for RTCRawStatsSnapshot {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        RTCRawStatsSnapshot::from_value(value).map_err(serde::de::Error::custom)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_stats_accessors() {
        let record = RTCRawStats::try_from(json!({
            "id": "IT01V12345",
            "type": "inbound-rtp",
            "kind": "video",
            "ssrc": 12345,
            "remoteSource": true,
        }))
        .expect("object record");

        assert_eq!(record.id(), Some("IT01V12345"));
        assert_eq!(record.stats_type(), Some("inbound-rtp"));
        assert_eq!(record.kind(), Some("video"));
        assert_eq!(record.media_type(), None);
        assert_eq!(record.remote_source(), Some(true));
        assert_eq!(record.get("ssrc"), Some(&json!(12345)));
        assert_eq!(record.len(), 5);
    }

    #[test]
    fn test_raw_stats_non_string_discriminators() {
        let record = RTCRawStats::try_from(json!({"id": 7, "type": null, "kind": 1}))
            .expect("object record");
        assert_eq!(record.id(), None);
        assert_eq!(record.stats_type(), None);
        assert_eq!(record.kind(), None);
    }

    #[test]
    fn test_raw_stats_rejects_non_object() {
        assert_eq!(
            RTCRawStats::try_from(json!([1, 2])),
            Err(Error::ErrInvalidRecord("array".to_owned()))
        );
    }

    #[test]
    fn test_snapshot_from_array_keeps_order() {
        let snapshot = RTCRawStatsSnapshot::from_value(json!([
            {"id": "b", "type": "codec"},
            {"id": "a", "type": "transport"},
            {"id": "c", "type": "certificate"},
        ]))
        .expect("array snapshot");

        assert_eq!(snapshot.ids().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert_eq!(
            snapshot.get("a").and_then(RTCRawStats::stats_type),
            Some("transport")
        );
        assert!(snapshot.get("z").is_none());
    }

    #[test]
    fn test_snapshot_from_keyed_object_fills_missing_id() {
        let snapshot = RTCRawStatsSnapshot::from_json_str(
            r#"{
                "RTCTransport_0_1": {"type": "transport", "bytesSent": 10},
                "RTCCodec_0_Inbound_111": {"id": "RTCCodec_0_Inbound_111", "type": "codec"}
            }"#,
        )
        .expect("keyed snapshot");

        assert_eq!(snapshot.len(), 2);
        let transport = snapshot.get("RTCTransport_0_1").expect("transport record");
        assert_eq!(transport.get("bytesSent"), Some(&json!(10)));
        assert!(snapshot.get("RTCCodec_0_Inbound_111").is_some());
    }

    #[test]
    fn test_snapshot_rejects_scalars() {
        assert_eq!(
            RTCRawStatsSnapshot::from_value(json!("stats")),
            Err(Error::ErrInvalidSnapshot("string".to_owned()))
        );
        assert!(matches!(
            RTCRawStatsSnapshot::from_json_str("{not json"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_snapshot_sets_aside_non_object_entries() {
        let snapshot = RTCRawStatsSnapshot::from_value(json!([{"id": "a", "type": "codec"}, 3]))
            .expect("array snapshot");
        assert_eq!(snapshot.ids().collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(
            snapshot.rejected(),
            &[RTCRejectedStats {
                id: None,
                reason: "stats record must be a JSON object, got number".to_owned(),
            }]
        );

        let snapshot = RTCRawStatsSnapshot::from_value(json!({
            "T": {"type": "transport"},
            "X": null,
        }))
        .expect("keyed snapshot");
        assert_eq!(snapshot.ids().collect::<Vec<_>>(), vec!["T"]);
        assert_eq!(snapshot.rejected().len(), 1);
        assert_eq!(snapshot.rejected()[0].id.as_deref(), Some("X"));

        // rejected entries are not part of the serialized snapshot
        assert_eq!(
            serde_json::to_value(&snapshot).expect("serialize snapshot"),
            json!([{"type": "transport", "id": "T"}])
        );
    }

    #[test]
    fn test_snapshot_deserialize() {
        let snapshot: RTCRawStatsSnapshot =
            serde_json::from_str(r#"[{"id": "P", "type": "peer-connection"}]"#)
                .expect("deserialize snapshot");
        assert_eq!(snapshot.len(), 1);

        let err = serde_json::from_str::<RTCRawStatsSnapshot>("42");
        assert!(err.is_err());
    }
}
