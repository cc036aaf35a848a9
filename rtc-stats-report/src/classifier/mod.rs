//! Type-to-category classification.
//!
//! The W3C `type` vocabulary is coarser than the category set: RTP-level
//! types, media sources, senders and receivers are split by media kind, and
//! the legacy `track` type is further split by `remoteSource`. All of that is
//! captured by one rule table, [`CLASSIFICATION_RULES`].


use crate::category::{RTCStatsCategory, RTCStatsMediaKind};
use crate::error::{Error, Result};
use crate::record::{FIELD_KIND, FIELD_REMOTE_SOURCE, RTCRawStats};
use std::str::FromStr;

/// How records of one `type` are mapped to a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RTCStatsTypeRule {
    /// Every record of the type lands in one category.
    Fixed(RTCStatsCategory),
    /// The category depends on the media kind.
    ByKind {
        audio: RTCStatsCategory,
        video: RTCStatsCategory,
    },
    /// The category depends on the media kind and on whether the track is
    /// local (sent) or remote (received).
    ByKindAndSource {
        local_audio: RTCStatsCategory,
        local_video: RTCStatsCategory,
        remote_audio: RTCStatsCategory,
        remote_video: RTCStatsCategory,
    },
}

impl RTCStatsTypeRule {
    /// Returns every category the rule can produce.
    pub fn categories(&self) -> Vec<RTCStatsCategory> {
        match *self {
            RTCStatsTypeRule::Fixed(category) => vec![category],
            RTCStatsTypeRule::ByKind { audio, video } => vec![audio, video],
            RTCStatsTypeRule::ByKindAndSource {
                local_audio,
                local_video,
                remote_audio,
                remote_video,
            } => vec![local_audio, local_video, remote_audio, remote_video],
        }
    }
}

/// A `type` value and the rule applied to records carrying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RTCStatsClassificationRule {
    pub stats_type: &'static str,
    pub rule: RTCStatsTypeRule,
}

const fn fixed(stats_type: &'static str, category: RTCStatsCategory) -> RTCStatsClassificationRule {
    RTCStatsClassificationRule {
        stats_type,
        rule: RTCStatsTypeRule::Fixed(category),
    }
}

const fn by_kind(
    stats_type: &'static str,
    audio: RTCStatsCategory,
    video: RTCStatsCategory,
) -> RTCStatsClassificationRule {
    RTCStatsClassificationRule {
        stats_type,
        rule: RTCStatsTypeRule::ByKind { audio, video },
    }
}

/// The `type` of legacy media track stats.
pub const LEGACY_TRACK_TYPE: &str = "track";

/// The classification table, keyed by W3C `RTCStatsType` value.
pub static CLASSIFICATION_RULES: &[RTCStatsClassificationRule] = &[
    fixed("codec", RTCStatsCategory::Codecs),
    by_kind(
        "inbound-rtp",
        RTCStatsCategory::InboundRtpAudioStreams,
        RTCStatsCategory::InboundRtpVideoStreams,
    ),
    by_kind(
        "outbound-rtp",
        RTCStatsCategory::OutboundRtpAudioStreams,
        RTCStatsCategory::OutboundRtpVideoStreams,
    ),
    by_kind(
        "remote-inbound-rtp",
        RTCStatsCategory::RemoteInboundRtpAudioStreams,
        RTCStatsCategory::RemoteInboundRtpVideoStreams,
    ),
    by_kind(
        "remote-outbound-rtp",
        RTCStatsCategory::RemoteOutboundRtpAudioStreams,
        RTCStatsCategory::RemoteOutboundRtpVideoStreams,
    ),
    by_kind(
        "media-source",
        RTCStatsCategory::AudioSources,
        RTCStatsCategory::VideoSources,
    ),
    fixed("csrc", RTCStatsCategory::RtpContributingSources),
    fixed("peer-connection", RTCStatsCategory::PeerConnection),
    fixed("data-channel", RTCStatsCategory::DataChannels),
    fixed("stream", RTCStatsCategory::MediaStreams),
    by_kind(
        "sender",
        RTCStatsCategory::AudioSenders,
        RTCStatsCategory::VideoSenders,
    ),
    by_kind(
        "receiver",
        RTCStatsCategory::AudioReceivers,
        RTCStatsCategory::VideoReceivers,
    ),
    RTCStatsClassificationRule {
        stats_type: LEGACY_TRACK_TYPE,
        rule: RTCStatsTypeRule::ByKindAndSource {
            local_audio: RTCStatsCategory::AudioSenders,
            local_video: RTCStatsCategory::VideoSenders,
            remote_audio: RTCStatsCategory::AudioReceivers,
            remote_video: RTCStatsCategory::VideoReceivers,
        },
    },
    fixed("transport", RTCStatsCategory::Transports),
    fixed("candidate-pair", RTCStatsCategory::IceCandidatePairs),
    fixed("local-candidate", RTCStatsCategory::LocalIceCandidates),
    fixed("remote-candidate", RTCStatsCategory::RemoteIceCandidates),
    fixed("certificate", RTCStatsCategory::Certificates),
    fixed("ice-server", RTCStatsCategory::StunServerConnections),
];

/// Maps raw stats records to categories.
///
/// Classification is a pure lookup in [`CLASSIFICATION_RULES`]; the
/// classifier only carries switches for legacy discriminators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RTCStatsClassifier {
    media_type_fallback: bool,
    legacy_track_split: bool,
}

impl Default for RTCStatsClassifier {
    fn default() -> Self {
        RTCStatsClassifier {
            media_type_fallback: true,
            legacy_track_split: true,
        }
    }
}

impl RTCStatsClassifier {
    /// Returns the full classification table.
    pub fn rules() -> &'static [RTCStatsClassificationRule] {
        CLASSIFICATION_RULES
    }

    /// Returns the rule applied to records of `stats_type`, if any.
    pub fn rule_for(&self, stats_type: &str) -> Option<RTCStatsTypeRule> {
        if !self.legacy_track_split && stats_type == LEGACY_TRACK_TYPE {
            return None;
        }
        CLASSIFICATION_RULES
            .iter()
            .find(|rule| rule.stats_type == stats_type)
            .map(|rule| rule.rule)
    }

    /// Classifies one record by its `type`, and by its media kind and
    /// `remoteSource` where the rule requires them.
    ///
    /// Fails with [`Error::ErrUnclassifiableRecord`] when the record cannot be
    /// placed in exactly one category.
    pub fn classify(&self, record: &RTCRawStats) -> Result<RTCStatsCategory> {
        let stats_type = record
            .stats_type()
            .ok_or_else(|| unclassifiable(record, "missing type".to_owned()))?;
        let rule = self
            .rule_for(stats_type)
            .ok_or_else(|| unclassifiable(record, format!("unknown type {stats_type:?}")))?;

        match rule {
            RTCStatsTypeRule::Fixed(category) => Ok(category),
            RTCStatsTypeRule::ByKind { audio, video } => match self.media_kind(record, stats_type)? {
                RTCStatsMediaKind::Audio => Ok(audio),
                RTCStatsMediaKind::Video => Ok(video),
            },
            RTCStatsTypeRule::ByKindAndSource {
                local_audio,
                local_video,
                remote_audio,
                remote_video,
            } => {
                let kind = self.media_kind(record, stats_type)?;
                let remote = record.remote_source().ok_or_else(|| {
                    unclassifiable(
                        record,
                        format!("{stats_type} without boolean {FIELD_REMOTE_SOURCE}"),
                    )
                })?;
                Ok(match (kind, remote) {
                    (RTCStatsMediaKind::Audio, false) => local_audio,
                    (RTCStatsMediaKind::Video, false) => local_video,
                    (RTCStatsMediaKind::Audio, true) => remote_audio,
                    (RTCStatsMediaKind::Video, true) => remote_video,
                })
            }
        }
    }

    fn media_kind(&self, record: &RTCRawStats, stats_type: &str) -> Result<RTCStatsMediaKind> {
        let kind = match record.kind() {
            Some(kind) => Some(kind),
            None if self.media_type_fallback => record.media_type(),
            None => None,
        };
        let kind = kind.ok_or_else(|| {
            unclassifiable(record, format!("{stats_type} without {FIELD_KIND}"))
        })?;
        RTCStatsMediaKind::from_str(kind).map_err(|_| {
            unclassifiable(record, format!("{stats_type} with unknown {FIELD_KIND} {kind:?}"))
        })
    }
}

fn unclassifiable(record: &RTCRawStats, reason: String) -> Error {
    Error::ErrUnclassifiableRecord {
        id: record.id().map(str::to_owned),
        reason,
    }
}

#[derive(Default)]
pub struct RTCStatsClassifierBuilder {
    /// media_type_fallback reads the media kind from the legacy `mediaType`
    /// field when `kind` is absent.
    pub(crate) media_type_fallback: Option<bool>,

    /// legacy_track_split classifies legacy `track` stats into senders and
    /// receivers. When disabled, `track` records are unclassifiable.
    pub(crate) legacy_track_split: Option<bool>,
}

impl RTCStatsClassifierBuilder {
    pub fn new() -> Self {
        RTCStatsClassifierBuilder::default()
    }

    pub fn with_media_type_fallback(mut self, media_type_fallback: bool) -> Self {
        self.media_type_fallback = Some(media_type_fallback);
        self
    }

    pub fn with_legacy_track_split(mut self, legacy_track_split: bool) -> Self {
        self.legacy_track_split = Some(legacy_track_split);
        self
    }

    pub fn build(self) -> RTCStatsClassifier {
        let defaults = RTCStatsClassifier::default();
        RTCStatsClassifier {
            media_type_fallback: self
                .media_type_fallback
                .unwrap_or(defaults.media_type_fallback),
            legacy_track_split: self
                .legacy_track_split
                .unwrap_or(defaults.legacy_track_split),
        }
    }
}
