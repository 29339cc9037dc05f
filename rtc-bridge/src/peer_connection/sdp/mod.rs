use std::fmt;

use serde::{Deserialize, Serialize};

use crate::peer_connection::configuration::UNSPECIFIED_STR;

#[derive(Default, Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub enum RTCSdpType {
    #[default]
    Unspecified = 0,

    #[serde(rename = "offer")]
    Offer,

    #[serde(rename = "pranswer")]
    Pranswer,

    #[serde(rename = "answer")]
    Answer,

    #[serde(rename = "rollback")]
    Rollback,
}

const SDP_TYPE_OFFER_STR: &str = "offer";
const SDP_TYPE_PRANSWER_STR: &str = "pranswer";
const SDP_TYPE_ANSWER_STR: &str = "answer";
const SDP_TYPE_ROLLBACK_STR: &str = "rollback";

impl From<&str> for RTCSdpType {
    fn from(raw: &str) -> Self {
        match raw {
            SDP_TYPE_OFFER_STR => RTCSdpType::Offer,
            SDP_TYPE_PRANSWER_STR => RTCSdpType::Pranswer,
            SDP_TYPE_ANSWER_STR => RTCSdpType::Answer,
            SDP_TYPE_ROLLBACK_STR => RTCSdpType::Rollback,
            _ => RTCSdpType::Unspecified,
        }
    }
}

impl fmt::Display for RTCSdpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            RTCSdpType::Offer => SDP_TYPE_OFFER_STR,
            RTCSdpType::Pranswer => SDP_TYPE_PRANSWER_STR,
            RTCSdpType::Answer => SDP_TYPE_ANSWER_STR,
            RTCSdpType::Rollback => SDP_TYPE_ROLLBACK_STR,
            RTCSdpType::Unspecified => UNSPECIFIED_STR,
        };
        write!(f, "{s}")
    }
}

/// RTCSessionDescription is a typed description as exchanged with the
/// engine and the controller. The text is kept verbatim; rewrites are
/// applied by [`RTCEngineVariant`](crate::peer_connection::configuration::RTCEngineVariant)
/// at the boundary.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RTCSessionDescription {
    #[serde(rename = "type")]
    pub sdp_type: RTCSdpType,

    pub sdp: String,
}

impl fmt::Display for RTCSessionDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "type: {}, sdp:\n{}",
            self.sdp_type,
            self.sdp.replace("\r\n", "\n")
        )
    }
}

impl RTCSessionDescription {
    pub fn new(sdp_type: RTCSdpType, sdp: impl Into<String>) -> Self {
        Self {
            sdp_type,
            sdp: sdp.into(),
        }
    }

    pub fn offer(sdp: impl Into<String>) -> Self {
        Self::new(RTCSdpType::Offer, sdp)
    }

    pub fn answer(sdp: impl Into<String>) -> Self {
        Self::new(RTCSdpType::Answer, sdp)
    }

    pub fn pranswer(sdp: impl Into<String>) -> Self {
        Self::new(RTCSdpType::Pranswer, sdp)
    }

    /// The `m=` lines of the description.
    pub fn media_lines(&self) -> Vec<::sdp::MediaLine> {
        ::sdp::media_lines(&self.sdp)
    }

    /// Kind and port of every `m=` line, for logging. A port of 0 marks a
    /// rejected section.
    pub fn media_summary(&self) -> String {
        self.media_lines()
            .iter()
            .map(|m| format!("{}:{}", m.kind, m.port))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
