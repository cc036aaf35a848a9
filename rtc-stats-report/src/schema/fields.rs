//! Built-in field whitelists.
//!
//! Each schema is a sequence of fragments. A fragment is a run of fields taken
//! from one W3C stats dictionary (or a run specific to one category);
//! flattening the fragments of a schema gives its exact field order.

use super::RTCStatsSchemaEntry;
use crate::category::RTCStatsCategory;

/// Revision of the stats dictionaries the built-in table tracks.
pub const BUILTIN_REVISION: &str = "webrtc-stats-legacy-track";

/// RTCStats
const STATS: &[&str] = &["timestamp", "type", "id"];

/// RTCRtpStreamStats
const RTP_STREAM: &[&str] = &["ssrc", "kind", "transportId", "codecId"];

/// RTCReceivedRtpStreamStats
const RECEIVED_RTP_STREAM: &[&str] = &[
    "packetsReceived",
    "packetsLost",
    "jitter",
    "packetsDiscarded",
    "packetsRepaired",
    "burstPacketsLost",
    "burstPacketsDiscarded",
    "burstLossCount",
    "burstDiscardCount",
    "burstLossRate",
    "burstDiscardRate",
    "gapLossRate",
    "gapDiscardRate",
];

/// RTCSentRtpStreamStats
const SENT_RTP_STREAM: &[&str] = &[
    "packetsSent",
    "packetsDiscardedOnSend",
    "fecPacketsSent",
    "bytesSent",
    "bytesDiscardedOnSend",
];

const INBOUND_RTP_REFERENCES: &[&str] = &["trackId", "receiverId", "remoteId"];

const INBOUND_RTP_DECODING: &[&str] = &["framesDecoded", "qpSum"];

const INBOUND_RTP_STREAM: &[&str] = &[
    "lastPacketReceivedTimestamp",
    "averageRtcpInterval",
    "fecPacketsReceived",
    "bytesReceived",
    "packetsFailedDecryption",
    "packetsDuplicated",
    "perDscpPacketsReceived",
];

const INBOUND_RTP_FEEDBACK: &[&str] = &["firCount", "pliCount", "nackCount", "sliCount"];

const OUTBOUND_RTP_REFERENCES: &[&str] = &[
    "trackId",
    "mediaSourceId",
    "senderId",
    "remoteId",
    "lastPacketSentTimestamp",
    "retransmittedPacketsSent",
    "retransmittedBytesSent",
];

const OUTBOUND_RTP_TARGET_BITRATE: &[&str] = &["targetBitrate"];

const OUTBOUND_RTP_ENCODED_BYTES_TARGET: &[&str] = &["totalEncodedBytesTarget"];

const OUTBOUND_RTP_ENCODING: &[&str] = &["framesEncoded", "qpSum", "totalEncodeTime"];

const OUTBOUND_RTP_STREAM: &[&str] = &[
    "totalPacketSendDelay",
    "averageRtcpInterval",
    "qualityLimitationReason",
    "qualityLimitationDurations",
    "perDscpPacketsSent",
];

// outbound orders its feedback counters differently from inbound
const OUTBOUND_RTP_FEEDBACK: &[&str] = &["nackCount", "firCount", "pliCount", "sliCount"];

/// RTCRemoteInboundRtpStreamStats
const REMOTE_INBOUND_RTP_STREAM: &[&str] = &["localId", "roundTripTime", "fractionLost"];

/// RTCRemoteOutboundRtpStreamStats
const REMOTE_OUTBOUND_RTP_STREAM: &[&str] = &["localId", "remoteTimestamp"];

/// RTCMediaSourceStats
const MEDIA_SOURCE: &[&str] = &["trackIdentifier", "kind"];

/// RTCVideoSourceStats
const VIDEO_SOURCE: &[&str] = &["width", "height", "frames", "framesPerSecond"];

/// RTCRtpContributingSourceStats
const CONTRIBUTING_SOURCE: &[&str] = &[
    "contributorSsrc",
    "inboundRtpStreamId",
    "packetsContributedTo",
    "audioLevel",
];

/// RTCPeerConnectionStats
const PEER_CONNECTION: &[&str] = &[
    "dataChannelsOpened",
    "dataChannelsClosed",
    "dataChannelsRequested",
    "dataChannelsAccepted",
];

/// RTCDataChannelStats
const DATA_CHANNEL: &[&str] = &[
    "label",
    "protocol",
    "dataChannelIdentifier",
    "transportId",
    "state",
    "messagesSent",
    "bytesSent",
    "messagesReceived",
    "bytesReceived",
];

/// RTCMediaStreamStats
const MEDIA_STREAM: &[&str] = &["streamIdentifier", "trackIds"];

/// RTCMediaHandlerStats
const MEDIA_HANDLER: &[&str] = &["trackIdentifier", "remoteSource", "ended", "kind", "priority"];

/// RTCVideoHandlerStats
const VIDEO_HANDLER: &[&str] = &["frameWidth", "frameHeight", "framesPerSecond"];

/// RTCAudioHandlerStats
const AUDIO_HANDLER: &[&str] = &[
    "audioLevel",
    "totalAudioEnergy",
    "voiceActivityFlag",
    "totalSamplesDuration",
];

/// RTCVideoSenderStats
const VIDEO_SENDER: &[&str] = &[
    "mediaSourceId",
    "framesCaptured",
    "framesSent",
    "hugeFramesSent",
    "keyFramesSent",
];

/// RTCAudioSenderStats
const AUDIO_SENDER: &[&str] = &[
    "mediaSourceId",
    "echoReturnLoss",
    "echoReturnLossEnhancement",
    "totalSamplesSent",
];

/// Fields shared by RTCVideoReceiverStats and RTCAudioReceiverStats.
const RECEIVER: &[&str] = &[
    "estimatedPlayoutTimestamp",
    "jitterBufferDelay",
    "jitterBufferEmittedCount",
];

/// RTCVideoReceiverStats
const VIDEO_RECEIVER: &[&str] = &[
    "framesReceived",
    "keyFramesReceived",
    "framesDecoded",
    "framesDropped",
    "partialFramesLost",
    "fullFramesLost",
];

/// RTCAudioReceiverStats
const AUDIO_RECEIVER: &[&str] = &[
    "totalSamplesReceived",
    "concealedSamples",
    "silentConcealedSamples",
    "concealmentEvents",
    "insertedSamplesForDeceleration",
    "removedSamplesForAcceleration",
];

/// RTCTransportStats
const TRANSPORT: &[&str] = &[
    "packetsSent",
    "packetsReceived",
    "bytesSent",
    "bytesReceived",
    "rtcpTransportStatsId",
    "iceRole",
    "dtlsState",
    "selectedCandidatePairId",
    "localCertificateId",
    "remoteCertificateId",
    "tlsVersion",
    "dtlsCipher",
    "srtpCipher",
    "tlsGroup",
];

/// RTCIceCandidatePairStats
const ICE_CANDIDATE_PAIR: &[&str] = &[
    "transportId",
    "localCandidateId",
    "remoteCandidateId",
    "state",
    "nominated",
    "packetsSent",
    "packetsReceived",
    "bytesSent",
    "bytesReceived",
    "lastPacketSentTimestamp",
    "lastPacketReceivedTimestamp",
    "firstRequestTimestamp",
    "lastRequestTimestamp",
    "lastResponseTimestamp",
    "totalRoundTripTime",
    "currentRoundTripTime",
    "availableOutgoingBitrate",
    "availableIncomingBitrate",
    "circuitBreakerTriggerCount",
    "requestsReceived",
    "requestsSent",
    "responsesReceived",
    "responsesSent",
    "retransmissionsReceived",
    "retransmissionsSent",
    "consentRequestsSent",
    "consentExpiredTimestamp",
];

const ICE_CANDIDATE_TRANSPORT: &[&str] = &["transportId"];

const ICE_CANDIDATE_NETWORK_TYPE: &[&str] = &["networkType"];

/// RTCIceCandidateStats, fields known for both local and remote candidates.
const ICE_CANDIDATE: &[&str] = &["address", "port", "protocol", "candidateType", "priority"];

/// RTCIceCandidateStats, fields only meaningful for local candidates.
const LOCAL_ICE_CANDIDATE: &[&str] = &["url", "relayProtocol", "deleted"];

/// RTCCertificateStats
const CERTIFICATE: &[&str] = &[
    "fingerprint",
    "fingerprintAlgorithm",
    "base64Certificate",
    "issuerCertificateId",
];

/// RTCIceServerStats
const ICE_SERVER: &[&str] = &[
    "url",
    "port",
    "protocol",
    "networkType",
    "totalRequestsSent",
    "totalResponsesReceived",
    "totalRoundTripTime",
];

// codec stats carry no timestamp
const CODEC: &[&str] = &[
    "type",
    "id",
    "payloadType",
    "codecType",
    "transportId",
    "mimeType",
    "clockRate",
    "channels",
    "sdpFmtpLine",
    "implementation",
];

pub(super) const BUILTIN_ENTRIES: &[RTCStatsSchemaEntry] = &[
    RTCStatsSchemaEntry::new(RTCStatsCategory::Codecs, &[CODEC]),
    RTCStatsSchemaEntry::new(
        RTCStatsCategory::InboundRtpVideoStreams,
        &[
            STATS,
            RTP_STREAM,
            RECEIVED_RTP_STREAM,
            INBOUND_RTP_REFERENCES,
            INBOUND_RTP_DECODING,
            INBOUND_RTP_STREAM,
            INBOUND_RTP_FEEDBACK,
        ],
    ),
    RTCStatsSchemaEntry::new(
        RTCStatsCategory::InboundRtpAudioStreams,
        &[
            STATS,
            RTP_STREAM,
            RECEIVED_RTP_STREAM,
            INBOUND_RTP_REFERENCES,
            INBOUND_RTP_STREAM,
        ],
    ),
    RTCStatsSchemaEntry::new(
        RTCStatsCategory::OutboundRtpVideoStreams,
        &[
            STATS,
            RTP_STREAM,
            SENT_RTP_STREAM,
            OUTBOUND_RTP_REFERENCES,
            OUTBOUND_RTP_TARGET_BITRATE,
            OUTBOUND_RTP_ENCODED_BYTES_TARGET,
            OUTBOUND_RTP_ENCODING,
            OUTBOUND_RTP_STREAM,
            OUTBOUND_RTP_FEEDBACK,
        ],
    ),
    RTCStatsSchemaEntry::new(
        RTCStatsCategory::OutboundRtpAudioStreams,
        &[
            STATS,
            RTP_STREAM,
            SENT_RTP_STREAM,
            OUTBOUND_RTP_REFERENCES,
            OUTBOUND_RTP_ENCODED_BYTES_TARGET,
            OUTBOUND_RTP_STREAM,
        ],
    ),
    RTCStatsSchemaEntry::new(
        RTCStatsCategory::RemoteInboundRtpVideoStreams,
        &[
            STATS,
            RTP_STREAM,
            RECEIVED_RTP_STREAM,
            REMOTE_INBOUND_RTP_STREAM,
        ],
    ),
    RTCStatsSchemaEntry::new(
        RTCStatsCategory::RemoteInboundRtpAudioStreams,
        &[
            STATS,
            RTP_STREAM,
            RECEIVED_RTP_STREAM,
            REMOTE_INBOUND_RTP_STREAM,
        ],
    ),
    RTCStatsSchemaEntry::new(
        RTCStatsCategory::RemoteOutboundRtpVideoStreams,
        &[STATS, RTP_STREAM, SENT_RTP_STREAM, REMOTE_OUTBOUND_RTP_STREAM],
    ),
    RTCStatsSchemaEntry::new(
        RTCStatsCategory::RemoteOutboundRtpAudioStreams,
        &[STATS, RTP_STREAM, SENT_RTP_STREAM, REMOTE_OUTBOUND_RTP_STREAM],
    ),
    RTCStatsSchemaEntry::new(
        RTCStatsCategory::VideoSources,
        &[STATS, MEDIA_SOURCE, VIDEO_SOURCE],
    ),
    RTCStatsSchemaEntry::new(RTCStatsCategory::AudioSources, &[STATS, MEDIA_SOURCE]),
    RTCStatsSchemaEntry::new(
        RTCStatsCategory::RtpContributingSources,
        &[STATS, CONTRIBUTING_SOURCE],
    ),
    RTCStatsSchemaEntry::new(RTCStatsCategory::PeerConnection, &[STATS, PEER_CONNECTION]),
    RTCStatsSchemaEntry::new(RTCStatsCategory::DataChannels, &[STATS, DATA_CHANNEL]),
    RTCStatsSchemaEntry::new(RTCStatsCategory::MediaStreams, &[STATS, MEDIA_STREAM]),
    RTCStatsSchemaEntry::new(
        RTCStatsCategory::VideoSenders,
        &[STATS, MEDIA_HANDLER, VIDEO_HANDLER, VIDEO_SENDER],
    ),
    RTCStatsSchemaEntry::new(
        RTCStatsCategory::AudioSenders,
        &[STATS, MEDIA_HANDLER, AUDIO_HANDLER, AUDIO_SENDER],
    ),
    RTCStatsSchemaEntry::new(
        RTCStatsCategory::VideoReceivers,
        &[STATS, MEDIA_HANDLER, VIDEO_HANDLER, RECEIVER, VIDEO_RECEIVER],
    ),
    RTCStatsSchemaEntry::new(
        RTCStatsCategory::AudioReceivers,
        &[STATS, MEDIA_HANDLER, AUDIO_HANDLER, RECEIVER, AUDIO_RECEIVER],
    ),
    RTCStatsSchemaEntry::new(RTCStatsCategory::Transports, &[STATS, TRANSPORT]),
    RTCStatsSchemaEntry::new(
        RTCStatsCategory::IceCandidatePairs,
        &[STATS, ICE_CANDIDATE_PAIR],
    ),
    RTCStatsSchemaEntry::new(
        RTCStatsCategory::LocalIceCandidates,
        &[
            STATS,
            ICE_CANDIDATE_TRANSPORT,
            ICE_CANDIDATE_NETWORK_TYPE,
            ICE_CANDIDATE,
            LOCAL_ICE_CANDIDATE,
        ],
    ),
    RTCStatsSchemaEntry::new(
        RTCStatsCategory::RemoteIceCandidates,
        &[STATS, ICE_CANDIDATE_TRANSPORT, ICE_CANDIDATE],
    ),
    RTCStatsSchemaEntry::new(RTCStatsCategory::Certificates, &[STATS, CERTIFICATE]),
    RTCStatsSchemaEntry::new(
        RTCStatsCategory::StunServerConnections,
        &[STATS, ICE_SERVER],
    ),
];
