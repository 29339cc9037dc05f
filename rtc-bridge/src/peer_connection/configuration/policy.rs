use std::fmt;

use serde::{Deserialize, Serialize};

use super::UNSPECIFIED_STR;

/// Bundle policy handed to the transport engine when a connection is
/// created. Calls always run bundled, so [`RTCBundlePolicy::MaxBundle`] is
/// the configured default.
#[derive(Default, Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub enum RTCBundlePolicy {
    #[default]
    Unspecified = 0,

    #[serde(rename = "balanced")]
    Balanced = 1,

    #[serde(rename = "max-compat")]
    MaxCompat = 2,

    #[serde(rename = "max-bundle")]
    MaxBundle = 3,
}

const BUNDLE_POLICY_BALANCED_STR: &str = "balanced";
const BUNDLE_POLICY_MAX_COMPAT_STR: &str = "max-compat";
const BUNDLE_POLICY_MAX_BUNDLE_STR: &str = "max-bundle";

impl From<&str> for RTCBundlePolicy {
    fn from(raw: &str) -> Self {
        match raw {
            BUNDLE_POLICY_BALANCED_STR => RTCBundlePolicy::Balanced,
            BUNDLE_POLICY_MAX_COMPAT_STR => RTCBundlePolicy::MaxCompat,
            BUNDLE_POLICY_MAX_BUNDLE_STR => RTCBundlePolicy::MaxBundle,
            _ => RTCBundlePolicy::Unspecified,
        }
    }
}

impl fmt::Display for RTCBundlePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            RTCBundlePolicy::Balanced => BUNDLE_POLICY_BALANCED_STR,
            RTCBundlePolicy::MaxCompat => BUNDLE_POLICY_MAX_COMPAT_STR,
            RTCBundlePolicy::MaxBundle => BUNDLE_POLICY_MAX_BUNDLE_STR,
            RTCBundlePolicy::Unspecified => UNSPECIFIED_STR,
        };
        write!(f, "{s}")
    }
}

/// Which candidates the engine may use. Privacy-constrained calls run
/// relay-only so no host or reflexive address reaches the remote side.
#[derive(Default, Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub enum RTCIceTransportPolicy {
    #[default]
    Unspecified = 0,

    #[serde(rename = "all")]
    All = 1,

    #[serde(rename = "relay")]
    Relay = 2,
}

const ICE_TRANSPORT_POLICY_ALL_STR: &str = "all";
const ICE_TRANSPORT_POLICY_RELAY_STR: &str = "relay";

impl RTCIceTransportPolicy {
    /// Policy for a connection created with the given privacy flag.
    pub fn from_privacy(privacy: bool) -> Self {
        if privacy {
            RTCIceTransportPolicy::Relay
        } else {
            RTCIceTransportPolicy::All
        }
    }
}

impl From<&str> for RTCIceTransportPolicy {
    fn from(raw: &str) -> Self {
        match raw {
            ICE_TRANSPORT_POLICY_ALL_STR => RTCIceTransportPolicy::All,
            ICE_TRANSPORT_POLICY_RELAY_STR => RTCIceTransportPolicy::Relay,
            _ => RTCIceTransportPolicy::Unspecified,
        }
    }
}

impl fmt::Display for RTCIceTransportPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            RTCIceTransportPolicy::All => ICE_TRANSPORT_POLICY_ALL_STR,
            RTCIceTransportPolicy::Relay => ICE_TRANSPORT_POLICY_RELAY_STR,
            RTCIceTransportPolicy::Unspecified => UNSPECIFIED_STR,
        };
        write!(f, "{s}")
    }
}

#[derive(Default, Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub enum RTCRtcpMuxPolicy {
    #[default]
    Unspecified = 0,

    #[serde(rename = "negotiate")]
    Negotiate = 1,

    #[serde(rename = "require")]
    Require = 2,
}

const RTCP_MUX_POLICY_NEGOTIATE_STR: &str = "negotiate";
const RTCP_MUX_POLICY_REQUIRE_STR: &str = "require";

impl From<&str> for RTCRtcpMuxPolicy {
    fn from(raw: &str) -> Self {
        match raw {
            RTCP_MUX_POLICY_NEGOTIATE_STR => RTCRtcpMuxPolicy::Negotiate,
            RTCP_MUX_POLICY_REQUIRE_STR => RTCRtcpMuxPolicy::Require,
            _ => RTCRtcpMuxPolicy::Unspecified,
        }
    }
}

impl fmt::Display for RTCRtcpMuxPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            RTCRtcpMuxPolicy::Negotiate => RTCP_MUX_POLICY_NEGOTIATE_STR,
            RTCRtcpMuxPolicy::Require => RTCP_MUX_POLICY_REQUIRE_STR,
            RTCRtcpMuxPolicy::Unspecified => UNSPECIFIED_STR,
        };
        write!(f, "{s}")
    }
}
