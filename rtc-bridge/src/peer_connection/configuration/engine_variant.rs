use std::fmt;

use ::sdp::{SdpDirection, normalize, to_dtls_sctp, to_udp_dtls_sctp};
use serde::{Deserialize, Serialize};

use crate::peer_connection::gathering::RTCGatheringPolicy;

/// RTCEngineVariant selects the behaviour that differs between transport
/// engine implementations. It is chosen once at startup (or through
/// `set_environment`) and consulted wherever description text crosses the
/// engine boundary and whenever gathering completion is evaluated.
///
/// | concern                 | `Default`   | `Firefox`                                  |
/// |-------------------------|-------------|--------------------------------------------|
/// | gathering policy        | open        | relay required on every media line         |
/// | remote description      | unchanged   | modern SCTP spelling, `a=sctp-port:5000`   |
/// | local description (set) | unchanged   | placeholder ports                          |
/// | local description (get) | unchanged   | legacy `DTLS/SCTP` spelling, placeholders  |
#[derive(Default, Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub enum RTCEngineVariant {
    #[default]
    #[serde(rename = "default")]
    Default = 0,

    #[serde(rename = "firefox")]
    Firefox = 1,
}

const ENGINE_VARIANT_DEFAULT_STR: &str = "default";
const ENGINE_VARIANT_FIREFOX_STR: &str = "firefox";

impl RTCEngineVariant {
    pub fn gathering_policy(&self) -> RTCGatheringPolicy {
        match *self {
            RTCEngineVariant::Default => RTCGatheringPolicy::Open,
            RTCEngineVariant::Firefox => RTCGatheringPolicy::RelayRequired,
        }
    }

    /// Text of a remote description as it is handed to the engine.
    pub fn remote_description(&self, sdp: &str) -> String {
        match *self {
            RTCEngineVariant::Default => sdp.to_owned(),
            RTCEngineVariant::Firefox => {
                normalize(&to_udp_dtls_sctp(sdp), SdpDirection::Remote, false)
            }
        }
    }

    /// Text of a local description as it is handed back to the engine.
    pub fn local_description_to_engine(&self, sdp: &str) -> String {
        match *self {
            RTCEngineVariant::Default => sdp.to_owned(),
            RTCEngineVariant::Firefox => normalize(sdp, SdpDirection::Local, false),
        }
    }

    /// Text of the engine's current local description as it is read by the
    /// controller.
    pub fn local_description_from_engine(&self, sdp: &str) -> String {
        match *self {
            RTCEngineVariant::Default => sdp.to_owned(),
            RTCEngineVariant::Firefox => {
                normalize(&to_dtls_sctp(sdp), SdpDirection::Local, false)
            }
        }
    }

    /// Text of a freshly created offer or answer. The same for every
    /// variant.
    pub fn created_description(&self, sdp: &str) -> String {
        normalize(sdp, SdpDirection::Local, false)
    }
}

impl From<u8> for RTCEngineVariant {
    fn from(v: u8) -> Self {
        match v {
            1 => RTCEngineVariant::Firefox,
            _ => RTCEngineVariant::Default,
        }
    }
}

impl From<&str> for RTCEngineVariant {
    fn from(raw: &str) -> Self {
        match raw {
            ENGINE_VARIANT_FIREFOX_STR => RTCEngineVariant::Firefox,
            _ => RTCEngineVariant::Default,
        }
    }
}

impl fmt::Display for RTCEngineVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            RTCEngineVariant::Default => ENGINE_VARIANT_DEFAULT_STR,
            RTCEngineVariant::Firefox => ENGINE_VARIANT_FIREFOX_STR,
        };
        write!(f, "{s}")
    }
}
