use std::fmt;

use serde::{Deserialize, Serialize};

use crate::peer_connection::configuration::UNSPECIFIED_STR;

/// Kind of a gathered candidate, read from the `typ` field of its
/// `candidate:` line.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RTCIceCandidateType {
    #[default]
    Unspecified,

    #[serde(rename = "host")]
    Host,

    #[serde(rename = "srflx")]
    Srflx,

    #[serde(rename = "prflx")]
    Prflx,

    #[serde(rename = "relay")]
    Relay,
}

const ICE_CANDIDATE_TYPE_HOST_STR: &str = "host";
const ICE_CANDIDATE_TYPE_SRFLX_STR: &str = "srflx";
const ICE_CANDIDATE_TYPE_PRFLX_STR: &str = "prflx";
const ICE_CANDIDATE_TYPE_RELAY_STR: &str = "relay";

impl From<&str> for RTCIceCandidateType {
    fn from(raw: &str) -> Self {
        match raw {
            ICE_CANDIDATE_TYPE_HOST_STR => RTCIceCandidateType::Host,
            ICE_CANDIDATE_TYPE_SRFLX_STR => RTCIceCandidateType::Srflx,
            ICE_CANDIDATE_TYPE_PRFLX_STR => RTCIceCandidateType::Prflx,
            ICE_CANDIDATE_TYPE_RELAY_STR => RTCIceCandidateType::Relay,
            _ => RTCIceCandidateType::Unspecified,
        }
    }
}

impl fmt::Display for RTCIceCandidateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            RTCIceCandidateType::Host => ICE_CANDIDATE_TYPE_HOST_STR,
            RTCIceCandidateType::Srflx => ICE_CANDIDATE_TYPE_SRFLX_STR,
            RTCIceCandidateType::Prflx => ICE_CANDIDATE_TYPE_PRFLX_STR,
            RTCIceCandidateType::Relay => ICE_CANDIDATE_TYPE_RELAY_STR,
            RTCIceCandidateType::Unspecified => UNSPECIFIED_STR,
        };
        write!(f, "{s}")
    }
}

/// RTCIceCandidate is a local candidate reported by the engine while it
/// gathers.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RTCIceCandidate {
    pub candidate: String,
    #[serde(rename = "sdpMid")]
    pub sdp_mid: Option<String>,
    /// Media line the candidate belongs to.
    #[serde(rename = "sdpMLineIndex")]
    pub sdp_mline_index: Option<u16>,
}

impl RTCIceCandidate {
    pub fn new(candidate: &str, sdp_mline_index: Option<u16>) -> Self {
        Self {
            candidate: candidate.to_owned(),
            sdp_mid: sdp_mline_index.map(|index| index.to_string()),
            sdp_mline_index,
        }
    }

    /// candidate_type parses the token following `typ`.
    pub fn candidate_type(&self) -> RTCIceCandidateType {
        let mut fields = self.candidate.split_whitespace();
        while let Some(field) = fields.next() {
            if field == "typ" {
                return fields
                    .next()
                    .map(RTCIceCandidateType::from)
                    .unwrap_or_default();
            }
        }
        RTCIceCandidateType::Unspecified
    }

    pub fn is_relay(&self) -> bool {
        self.candidate_type() == RTCIceCandidateType::Relay
    }
}
