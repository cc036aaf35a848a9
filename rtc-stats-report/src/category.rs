//! Stats categories.
//!
//! A category is one fixed semantic grouping of stats records, finer-grained
//! than the W3C `RTCStatsType`: most RTP-level types are split by media kind.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Media kind of a category, where the category is kind-specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RTCStatsMediaKind {
    #[serde(rename = "audio")]
    Audio,
    #[serde(rename = "video")]
    Video,
}

impl RTCStatsMediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RTCStatsMediaKind::Audio => "audio",
            RTCStatsMediaKind::Video => "video",
        }
    }
}

impl FromStr for RTCStatsMediaKind {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw {
            "audio" => Ok(RTCStatsMediaKind::Audio),
            "video" => Ok(RTCStatsMediaKind::Video),
            _ => Err(Error::ErrUnclassifiableRecord {
                id: None,
                reason: format!("unknown media kind {raw:?}"),
            }),
        }
    }
}

impl fmt::Display for RTCStatsMediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The category a normalized stats record is grouped under.
///
/// The serialized form is the category key (e.g. `"RTCCodecs"`), which is
/// also what [`FromStr`] accepts. Variant order is the canonical report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RTCStatsCategory {
    #[serde(rename = "RTCCodecs")]
    Codecs,
    #[serde(rename = "RTCInboundRtpVideoStreams")]
    InboundRtpVideoStreams,
    #[serde(rename = "RTCInboundRtpAudioStreams")]
    InboundRtpAudioStreams,
    #[serde(rename = "RTCOutboundRtpVideoStreams")]
    OutboundRtpVideoStreams,
    #[serde(rename = "RTCOutboundRtpAudioStreams")]
    OutboundRtpAudioStreams,
    #[serde(rename = "RTCRemoteInboundRtpVideoStreams")]
    RemoteInboundRtpVideoStreams,
    #[serde(rename = "RTCRemoteInboundRtpAudioStreams")]
    RemoteInboundRtpAudioStreams,
    #[serde(rename = "RTCRemoteOutboundRtpVideoStreams")]
    RemoteOutboundRtpVideoStreams,
    #[serde(rename = "RTCRemoteOutboundRtpAudioStreams")]
    RemoteOutboundRtpAudioStreams,
    #[serde(rename = "RTCVideoSources")]
    VideoSources,
    #[serde(rename = "RTCAudioSources")]
    AudioSources,
    #[serde(rename = "RTCRtpContributingSources")]
    RtpContributingSources,
    #[serde(rename = "RTCPeerConnection")]
    PeerConnection,
    #[serde(rename = "RTCDataChannels")]
    DataChannels,
    #[serde(rename = "RTCMediaStreams")]
    MediaStreams,
    #[serde(rename = "RTCVideoSenders")]
    VideoSenders,
    #[serde(rename = "RTCAudioSenders")]
    AudioSenders,
    #[serde(rename = "RTCVideoReceivers")]
    VideoReceivers,
    #[serde(rename = "RTCAudioReceivers")]
    AudioReceivers,
    #[serde(rename = "RTCTransports")]
    Transports,
    #[serde(rename = "RTCIceCandidatePairs")]
    IceCandidatePairs,
    #[serde(rename = "RTCLocalIceCandidates")]
    LocalIceCandidates,
    #[serde(rename = "RTCRemoteIceCandidates")]
    RemoteIceCandidates,
    #[serde(rename = "RTCCertificates")]
    Certificates,
    #[serde(rename = "RTCStunServerConnections")]
    StunServerConnections,
}

impl RTCStatsCategory {
    /// All categories in canonical order.
    pub const ALL: [RTCStatsCategory; 25] = [
        RTCStatsCategory::Codecs,
        RTCStatsCategory::InboundRtpVideoStreams,
        RTCStatsCategory::InboundRtpAudioStreams,
        RTCStatsCategory::OutboundRtpVideoStreams,
        RTCStatsCategory::OutboundRtpAudioStreams,
        RTCStatsCategory::RemoteInboundRtpVideoStreams,
        RTCStatsCategory::RemoteInboundRtpAudioStreams,
        RTCStatsCategory::RemoteOutboundRtpVideoStreams,
        RTCStatsCategory::RemoteOutboundRtpAudioStreams,
        RTCStatsCategory::VideoSources,
        RTCStatsCategory::AudioSources,
        RTCStatsCategory::RtpContributingSources,
        RTCStatsCategory::PeerConnection,
        RTCStatsCategory::DataChannels,
        RTCStatsCategory::MediaStreams,
        RTCStatsCategory::VideoSenders,
        RTCStatsCategory::AudioSenders,
        RTCStatsCategory::VideoReceivers,
        RTCStatsCategory::AudioReceivers,
        RTCStatsCategory::Transports,
        RTCStatsCategory::IceCandidatePairs,
        RTCStatsCategory::LocalIceCandidates,
        RTCStatsCategory::RemoteIceCandidates,
        RTCStatsCategory::Certificates,
        RTCStatsCategory::StunServerConnections,
    ];

    /// Returns the category key used to look up report groups.
    pub fn key(&self) -> &'static str {
        match self {
            RTCStatsCategory::Codecs => "RTCCodecs",
            RTCStatsCategory::InboundRtpVideoStreams => "RTCInboundRtpVideoStreams",
            RTCStatsCategory::InboundRtpAudioStreams => "RTCInboundRtpAudioStreams",
            RTCStatsCategory::OutboundRtpVideoStreams => "RTCOutboundRtpVideoStreams",
            RTCStatsCategory::OutboundRtpAudioStreams => "RTCOutboundRtpAudioStreams",
            RTCStatsCategory::RemoteInboundRtpVideoStreams => "RTCRemoteInboundRtpVideoStreams",
            RTCStatsCategory::RemoteInboundRtpAudioStreams => "RTCRemoteInboundRtpAudioStreams",
            RTCStatsCategory::RemoteOutboundRtpVideoStreams => "RTCRemoteOutboundRtpVideoStreams",
            RTCStatsCategory::RemoteOutboundRtpAudioStreams => "RTCRemoteOutboundRtpAudioStreams",
            RTCStatsCategory::VideoSources => "RTCVideoSources",
            RTCStatsCategory::AudioSources => "RTCAudioSources",
            RTCStatsCategory::RtpContributingSources => "RTCRtpContributingSources",
            RTCStatsCategory::PeerConnection => "RTCPeerConnection",
            RTCStatsCategory::DataChannels => "RTCDataChannels",
            RTCStatsCategory::MediaStreams => "RTCMediaStreams",
            RTCStatsCategory::VideoSenders => "RTCVideoSenders",
            RTCStatsCategory::AudioSenders => "RTCAudioSenders",
            RTCStatsCategory::VideoReceivers => "RTCVideoReceivers",
            RTCStatsCategory::AudioReceivers => "RTCAudioReceivers",
            RTCStatsCategory::Transports => "RTCTransports",
            RTCStatsCategory::IceCandidatePairs => "RTCIceCandidatePairs",
            RTCStatsCategory::LocalIceCandidates => "RTCLocalIceCandidates",
            RTCStatsCategory::RemoteIceCandidates => "RTCRemoteIceCandidates",
            RTCStatsCategory::Certificates => "RTCCertificates",
            RTCStatsCategory::StunServerConnections => "RTCStunServerConnections",
        }
    }

    /// A one-line description of the metric family.
    pub fn description(&self) -> &'static str {
        match self {
            RTCStatsCategory::Codecs => "codecs currently in use",
            RTCStatsCategory::InboundRtpVideoStreams => "incoming RTP video streams",
            RTCStatsCategory::InboundRtpAudioStreams => "incoming RTP audio streams",
            RTCStatsCategory::OutboundRtpVideoStreams => "outgoing RTP video streams",
            RTCStatsCategory::OutboundRtpAudioStreams => "outgoing RTP audio streams",
            RTCStatsCategory::RemoteInboundRtpVideoStreams => {
                "remote metrics reported in RR or XR for sent video streams"
            }
            RTCStatsCategory::RemoteInboundRtpAudioStreams => {
                "remote metrics reported in RR or XR for sent audio streams"
            }
            RTCStatsCategory::RemoteOutboundRtpVideoStreams => {
                "remote metrics reported in SR for received video streams"
            }
            RTCStatsCategory::RemoteOutboundRtpAudioStreams => {
                "remote metrics reported in SR for received audio streams"
            }
            RTCStatsCategory::VideoSources => "video tracks attached to one or more senders",
            RTCStatsCategory::AudioSources => "audio tracks attached to one or more senders",
            RTCStatsCategory::RtpContributingSources => {
                "CSRCs contributing to an incoming RTP stream"
            }
            RTCStatsCategory::PeerConnection => "data channel establishment counters",
            RTCStatsCategory::DataChannels => "data channels",
            RTCStatsCategory::MediaStreams => "media streams",
            RTCStatsCategory::VideoSenders => "senders of one video track",
            RTCStatsCategory::AudioSenders => "senders of one audio track",
            RTCStatsCategory::VideoReceivers => "receivers of one video track",
            RTCStatsCategory::AudioReceivers => "receivers of one audio track",
            RTCStatsCategory::Transports => "ICE and DTLS transports",
            RTCStatsCategory::IceCandidatePairs => {
                "ICE candidate pairs, including deleted or unnominated pairs"
            }
            RTCStatsCategory::LocalIceCandidates => "local ICE candidates",
            RTCStatsCategory::RemoteIceCandidates => "remote ICE candidates",
            RTCStatsCategory::Certificates => "certificates used by ICE transports",
            RTCStatsCategory::StunServerConnections => {
                "connections between the transport and STUN/TURN servers"
            }
        }
    }

    /// Returns the media kind for kind-specific categories.
    pub fn media_kind(&self) -> Option<RTCStatsMediaKind> {
        match self {
            RTCStatsCategory::InboundRtpAudioStreams
            | RTCStatsCategory::OutboundRtpAudioStreams
            | RTCStatsCategory::RemoteInboundRtpAudioStreams
            | RTCStatsCategory::RemoteOutboundRtpAudioStreams
            | RTCStatsCategory::AudioSources
            | RTCStatsCategory::AudioSenders
            | RTCStatsCategory::AudioReceivers => Some(RTCStatsMediaKind::Audio),
            RTCStatsCategory::InboundRtpVideoStreams
            | RTCStatsCategory::OutboundRtpVideoStreams
            | RTCStatsCategory::RemoteInboundRtpVideoStreams
            | RTCStatsCategory::RemoteOutboundRtpVideoStreams
            | RTCStatsCategory::VideoSources
            | RTCStatsCategory::VideoSenders
            | RTCStatsCategory::VideoReceivers => Some(RTCStatsMediaKind::Video),
            RTCStatsCategory::Codecs
            | RTCStatsCategory::RtpContributingSources
            | RTCStatsCategory::PeerConnection
            | RTCStatsCategory::DataChannels
            | RTCStatsCategory::MediaStreams
            | RTCStatsCategory::Transports
            | RTCStatsCategory::IceCandidatePairs
            | RTCStatsCategory::LocalIceCandidates
            | RTCStatsCategory::RemoteIceCandidates
            | RTCStatsCategory::Certificates
            | RTCStatsCategory::StunServerConnections => None,
        }
    }
}

impl fmt::Display for RTCStatsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for RTCStatsCategory {
    type Err = Error;

    fn from_str(key: &str) -> Result<Self> {
        RTCStatsCategory::ALL
            .iter()
            .find(|category| category.key() == key)
            .copied()
            .ok_or_else(|| Error::ErrUnknownCategory(key.to_owned()))
    }
}
