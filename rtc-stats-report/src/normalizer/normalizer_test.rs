use super::*;
use crate::classifier::RTCStatsClassifierBuilder;
use crate::schema::RTCStatsSchemaEntry;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};

fn snapshot(value: Value) -> RTCRawStatsSnapshot {
    RTCRawStatsSnapshot::from_value(value).expect("valid snapshot")
}

fn codec() -> Value {
    json!({
        "id": "RTCCodec_0_Inbound_111",
        "type": "codec",
        "timestamp": 1_700_000_000_000.0_f64,
        "transportId": "RTCTransport_0_1",
        "payloadType": 111,
        "mimeType": "audio/opus",
        "clockRate": 48000,
        "channels": 2,
        "sdpFmtpLine": "minptime=10;useinbandfec=1",
        "experimentalFoo": "bar",
    })
}

#[test]
fn test_project_keeps_schema_fields_in_schema_order() {
    let record = RTCRawStats::try_from(codec()).expect("codec record");
    let schema = RTCStatsSchemaTable::builtin()
        .schema_for(RTCStatsCategory::Codecs)
        .expect("codec schema");

    let stats = project(&record, schema);
    assert_eq!(
        stats.keys().collect::<Vec<_>>(),
        vec![
            "type",
            "id",
            "payloadType",
            "transportId",
            "mimeType",
            "clockRate",
            "channels",
            "sdpFmtpLine",
        ]
    );
    // codec schema has no timestamp
    assert!(!stats.contains("timestamp"));
    assert!(!stats.contains("experimentalFoo"));
    assert_eq!(stats.get("mimeType"), Some(&json!("audio/opus")));
    assert_eq!(stats.get("payloadType"), Some(&json!(111)));
}

#[test]
fn test_project_copies_null_values_unchanged() {
    let record = RTCRawStats::try_from(json!({
        "id": "T",
        "type": "transport",
        "timestamp": 1.0,
        "tlsVersion": null,
    }))
    .expect("transport record");
    let schema = RTCStatsSchemaTable::builtin()
        .schema_for(RTCStatsCategory::Transports)
        .expect("transport schema");

    let stats = project(&record, schema);
    assert_eq!(stats.get("tlsVersion"), Some(&Value::Null));
    assert!(!stats.contains("dtlsCipher"));
    assert_eq!(stats.len(), 4);
}

#[test]
fn test_normalize_empty_snapshot_covers_every_category() {
    let report = RTCStatsNormalizer::new()
        .normalize(&RTCRawStatsSnapshot::default())
        .expect("normalize");

    assert!(report.is_empty());
    assert_eq!(report.dropped_count(), 0);
    assert_eq!(report.categories().count(), RTCStatsCategory::ALL.len());
    for category in RTCStatsCategory::ALL {
        assert!(report.contains(category), "{category}");
        assert!(report.get(category).is_empty(), "{category}");
    }
}

#[test]
fn test_normalize_field_filtering() {
    let mut without_fmtp = codec();
    if let Value::Object(fields) = &mut without_fmtp {
        fields.remove("sdpFmtpLine");
        fields.insert("id".to_owned(), json!("RTCCodec_0_Outbound_96"));
    }

    let report = normalize_snapshot(&snapshot(json!([codec(), without_fmtp])))
        .expect("normalize");
    let codecs = report.get(RTCStatsCategory::Codecs);
    assert_eq!(codecs.len(), 2);

    assert!(!codecs[0].contains("experimentalFoo"));
    assert_eq!(codecs[0].get("mimeType"), Some(&json!("audio/opus")));
    assert_eq!(codecs[0].get("payloadType"), Some(&json!(111)));
    assert_eq!(
        codecs[0].get("sdpFmtpLine"),
        Some(&json!("minptime=10;useinbandfec=1"))
    );

    // missing optional field is omitted, not nulled
    assert_eq!(codecs[1].id(), Some("RTCCodec_0_Outbound_96"));
    assert!(!codecs[1].contains("sdpFmtpLine"));
    assert_eq!(codecs[1].get("sdpFmtpLine"), None);
}

#[test]
fn test_normalize_kind_disambiguation() {
    let report = normalize_snapshot(&snapshot(json!([
        {"id": "IT01A1", "type": "inbound-rtp", "kind": "audio", "ssrc": 1, "framesDecoded": 9},
        {"id": "IT01V2", "type": "inbound-rtp", "kind": "video", "ssrc": 2, "framesDecoded": 30},
    ])))
    .expect("normalize");

    let audio = report.get(RTCStatsCategory::InboundRtpAudioStreams);
    let video = report.get(RTCStatsCategory::InboundRtpVideoStreams);
    assert_eq!(audio.len(), 1);
    assert_eq!(video.len(), 1);
    assert_eq!(audio[0].id(), Some("IT01A1"));
    assert_eq!(video[0].id(), Some("IT01V2"));

    // framesDecoded is only whitelisted for video
    assert!(!audio[0].contains("framesDecoded"));
    assert_eq!(video[0].get("framesDecoded"), Some(&json!(30)));
}

#[test]
fn test_normalize_unknown_type_is_dropped() {
    let report = normalize_snapshot(&snapshot(json!([
        {"id": "P", "type": "peer-connection", "dataChannelsOpened": 1},
        {"id": "X", "type": "bogus-type", "foo": 1},
        {"id": "T", "type": "transport", "bytesSent": 100},
        {"id": "C", "type": "certificate", "fingerprint": "AB:CD"},
    ])))
    .expect("normalize");

    assert_eq!(report.len(), 3);
    assert_eq!(report.count(RTCStatsCategory::PeerConnection), 1);
    assert_eq!(report.count(RTCStatsCategory::Transports), 1);
    assert_eq!(report.count(RTCStatsCategory::Certificates), 1);
    assert!(report.find("X").is_none());

    assert_eq!(
        report.dropped(),
        &[RTCDroppedStats {
            id: Some("X".to_owned()),
            stats_type: Some("bogus-type".to_owned()),
            reason: "unknown type \"bogus-type\"".to_owned(),
        }]
    );
}

#[test]
fn test_normalize_keeps_snapshot_order_within_category() {
    let report = normalize_snapshot(&snapshot(json!([
        {"id": "c3", "type": "local-candidate", "port": 3},
        {"id": "r1", "type": "remote-candidate", "port": 9},
        {"id": "c1", "type": "local-candidate", "port": 1},
        {"id": "c2", "type": "local-candidate", "port": 2},
    ])))
    .expect("normalize");

    let ids: Vec<_> = report
        .get(RTCStatsCategory::LocalIceCandidates)
        .iter()
        .filter_map(RTCNormalizedStats::id)
        .collect();
    assert_eq!(ids, vec!["c3", "c1", "c2"]);
}

#[test]
fn test_normalize_is_idempotent() {
    let s = snapshot(json!([
        codec(),
        {"id": "OT01V", "type": "outbound-rtp", "kind": "video", "bytesSent": 1000},
        {"id": "bogus", "type": "bogus-type"},
    ]));
    let normalizer = RTCStatsNormalizer::new();

    let first = normalizer.normalize(&s).expect("first normalize");
    let second = normalizer.normalize(&s).expect("second normalize");
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).expect("serialize first"),
        serde_json::to_string(&second).expect("serialize second")
    );
}

#[test]
fn test_normalize_record() {
    let normalizer = RTCStatsNormalizer::new();
    let record = RTCRawStats::try_from(json!({
        "id": "DC1",
        "type": "data-channel",
        "label": "chat",
        "state": "open",
        "bufferedAmount": 0,
    }))
    .expect("data channel record");

    let (category, stats) = normalizer.normalize_record(&record).expect("normalize record");
    assert_eq!(category, RTCStatsCategory::DataChannels);
    assert_eq!(stats.keys().collect::<Vec<_>>(), vec!["type", "id", "label", "state"]);

    let bogus = RTCRawStats::try_from(json!({"id": "B", "type": "bogus-type"}))
        .expect("bogus record");
    assert!(matches!(
        normalizer.normalize_record(&bogus),
        Err(Error::ErrUnclassifiableRecord { .. })
    ));
}

#[test]
fn test_normalize_with_custom_schema_table() {
    let entries = RTCStatsSchemaTable::builtin()
        .entries()
        .iter()
        .map(|entry| match entry.category {
            RTCStatsCategory::Codecs => {
                RTCStatsSchemaEntry::new(RTCStatsCategory::Codecs, &[&["type", "id", "mimeType"]])
            }
            _ => *entry,
        })
        .collect();
    let table = RTCStatsSchemaTable::new("codecs-trimmed", entries).expect("complete table");
    let normalizer = RTCStatsNormalizerBuilder::new()
        .with_schema_table(table)
        .build();
    assert_eq!(normalizer.schema_table().revision(), "codecs-trimmed");

    let report = normalizer
        .normalize(&snapshot(json!([
            codec(),
            {"id": "T", "type": "transport", "bytesSent": 1},
        ])))
        .expect("normalize");
    assert_eq!(report.categories().count(), RTCStatsCategory::ALL.len());
    assert_eq!(
        report.get(RTCStatsCategory::Codecs)[0].keys().collect::<Vec<_>>(),
        vec!["type", "id", "mimeType"]
    );
    assert_eq!(
        report.get(RTCStatsCategory::Transports)[0]
            .keys()
            .collect::<Vec<_>>(),
        vec!["type", "id", "bytesSent"]
    );
}

#[test]
fn test_normalize_drops_non_object_entries() {
    let report = normalize_snapshot(&snapshot(json!([{"id": "a", "type": "codec"}, 3])))
        .expect("normalize");

    assert_eq!(report.len(), 1);
    assert_eq!(report.count(RTCStatsCategory::Codecs), 1);
    assert_eq!(
        report.dropped(),
        &[RTCDroppedStats {
            id: None,
            stats_type: None,
            reason: "stats record must be a JSON object, got number".to_owned(),
        }]
    );

    let report = normalize_snapshot(&snapshot(json!({
        "P": {"type": "peer-connection"},
        "bad": "oops",
    })))
    .expect("normalize");
    assert_eq!(report.count(RTCStatsCategory::PeerConnection), 1);
    assert_eq!(report.dropped_count(), 1);
    assert_eq!(report.dropped()[0].id.as_deref(), Some("bad"));
}

#[test]
fn test_normalize_with_custom_classifier() {
    let s = snapshot(json!([
        {"id": "t1", "type": "track", "kind": "video", "remoteSource": true, "framesReceived": 10},
        {"id": "t2", "type": "track", "kind": "audio", "remoteSource": false, "audioLevel": 0.1},
    ]));

    let report = normalize_snapshot(&s).expect("normalize");
    assert_eq!(report.count(RTCStatsCategory::VideoReceivers), 1);
    assert_eq!(report.count(RTCStatsCategory::AudioSenders), 1);
    assert_eq!(report.dropped_count(), 0);

    let strict = RTCStatsNormalizerBuilder::new()
        .with_classifier(
            RTCStatsClassifierBuilder::new()
                .with_legacy_track_split(false)
                .build(),
        )
        .build();
    let report = strict.normalize(&s).expect("normalize");
    assert!(report.is_empty());
    assert_eq!(report.dropped_count(), 2);
}

#[test]
fn test_normalizer_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RTCStatsNormalizer>();
    assert_send_sync::<RTCStatsSchemaTable>();
    assert_send_sync::<RTCStatsCategorizedReport>();
}

struct LevelCounter {
    debug: AtomicUsize,
    warn: AtomicUsize,
}

impl log::Log for LevelCounter {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.target().starts_with("rtc_stats_report")
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        match record.level() {
            log::Level::Error | log::Level::Warn => {
                self.warn.fetch_add(1, Ordering::SeqCst);
            }
            log::Level::Debug => {
                self.debug.fetch_add(1, Ordering::SeqCst);
            }
            _ => {}
        }
    }

    fn flush(&self) {}
}

static LEVEL_COUNTER: LevelCounter = LevelCounter {
    debug: AtomicUsize::new(0),
    warn: AtomicUsize::new(0),
};

#[test]
fn test_routine_drops_log_at_debug() {
    let _ = log::set_logger(&LEVEL_COUNTER);
    log::set_max_level(log::LevelFilter::Trace);

    let report = normalize_snapshot(&snapshot(json!([
        {"id": "AP", "type": "media-playout", "totalSamplesCount": 480},
        {"id": "P", "type": "peer-connection"},
        7,
    ])))
    .expect("normalize");
    assert_eq!(report.dropped_count(), 2);

    assert!(LEVEL_COUNTER.debug.load(Ordering::SeqCst) > 0);
    assert_eq!(LEVEL_COUNTER.warn.load(Ordering::SeqCst), 0);
}
