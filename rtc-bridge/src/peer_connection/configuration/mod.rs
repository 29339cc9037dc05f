pub mod engine_variant;
pub mod policy;

use serde::{Deserialize, Serialize};

pub use engine_variant::RTCEngineVariant;
pub use policy::{RTCBundlePolicy, RTCIceTransportPolicy, RTCRtcpMuxPolicy};

use crate::peer_connection::transport::RTCIceServer;

pub(crate) const UNSPECIFIED_STR: &str = "Unspecified";

/// RTCOfferOptions is passed to the engine when an offer is created.
#[derive(Default, Debug, PartialEq, Eq, Copy, Clone)]
pub struct RTCOfferOptions {
    /// Ask for an inbound video line even when no video is sent.
    pub offer_to_receive_video: bool,
}

/// RTCBridgeConfiguration holds the settings shared by every connection of
/// a bridge. It can be loaded from JSON:
///
/// ```
/// use rtc_bridge::peer_connection::configuration::{RTCBridgeConfiguration, RTCEngineVariant};
///
/// let config: RTCBridgeConfiguration =
///     serde_json::from_str(r#"{"variant": "firefox"}"#).unwrap();
/// assert_eq!(config.variant(), RTCEngineVariant::Firefox);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RTCBridgeConfiguration {
    pub(crate) variant: RTCEngineVariant,

    #[serde(rename = "bundlePolicy")]
    pub(crate) bundle_policy: RTCBundlePolicy,

    #[serde(rename = "rtcpMuxPolicy")]
    pub(crate) rtcp_mux_policy: RTCRtcpMuxPolicy,

    /// Servers placed ahead of each connection's own TURN servers.
    #[serde(rename = "iceServers")]
    pub(crate) ice_servers: Vec<RTCIceServer>,
}

impl Default for RTCBridgeConfiguration {
    fn default() -> Self {
        Self {
            variant: RTCEngineVariant::Default,
            bundle_policy: RTCBundlePolicy::MaxBundle,
            rtcp_mux_policy: RTCRtcpMuxPolicy::Require,
            ice_servers: vec![],
        }
    }
}

impl RTCBridgeConfiguration {
    pub fn variant(&self) -> RTCEngineVariant {
        self.variant
    }

    pub fn bundle_policy(&self) -> RTCBundlePolicy {
        self.bundle_policy
    }

    pub fn rtcp_mux_policy(&self) -> RTCRtcpMuxPolicy {
        self.rtcp_mux_policy
    }

    pub fn ice_servers(&self) -> &[RTCIceServer] {
        &self.ice_servers
    }

    /// transport_configuration assembles the settings for one new engine
    /// connection: the configured servers followed by the connection's TURN
    /// servers, and relay-only candidates when `privacy` is set.
    pub(crate) fn transport_configuration(
        &self,
        turn_servers: &[RTCIceServer],
        privacy: bool,
    ) -> RTCTransportConfiguration {
        let mut ice_servers = self.ice_servers.clone();
        ice_servers.extend_from_slice(turn_servers);

        RTCTransportConfiguration {
            ice_servers,
            ice_transport_policy: RTCIceTransportPolicy::from_privacy(privacy),
            bundle_policy: self.bundle_policy,
            rtcp_mux_policy: self.rtcp_mux_policy,
        }
    }
}

#[derive(Default)]
pub struct RTCBridgeConfigurationBuilder {
    configuration: RTCBridgeConfiguration,
}

impl RTCBridgeConfigurationBuilder {
    pub fn new() -> Self {
        RTCBridgeConfigurationBuilder::default()
    }

    pub fn with_variant(mut self, variant: RTCEngineVariant) -> Self {
        self.configuration.variant = variant;
        self
    }

    pub fn with_bundle_policy(mut self, bundle_policy: RTCBundlePolicy) -> Self {
        self.configuration.bundle_policy = bundle_policy;
        self
    }

    pub fn with_rtcp_mux_policy(mut self, rtcp_mux_policy: RTCRtcpMuxPolicy) -> Self {
        self.configuration.rtcp_mux_policy = rtcp_mux_policy;
        self
    }

    pub fn with_ice_servers(mut self, ice_servers: Vec<RTCIceServer>) -> Self {
        self.configuration.ice_servers = ice_servers;
        self
    }

    pub fn build(self) -> RTCBridgeConfiguration {
        self.configuration
    }
}

/// RTCTransportConfiguration is what the transport engine receives when a
/// connection is created.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RTCTransportConfiguration {
    #[serde(rename = "iceServers")]
    pub ice_servers: Vec<RTCIceServer>,

    #[serde(rename = "iceTransportPolicy")]
    pub ice_transport_policy: RTCIceTransportPolicy,

    #[serde(rename = "bundlePolicy")]
    pub bundle_policy: RTCBundlePolicy,

    #[serde(rename = "rtcpMuxPolicy")]
    pub rtcp_mux_policy: RTCRtcpMuxPolicy,
}

#[cfg(test)]
mod test {
    use super::*;

    fn turn(url: &str) -> RTCIceServer {
        RTCIceServer {
            urls: vec![url.to_owned()],
            username: "user".to_owned(),
            credential: "secret".to_owned(),
        }
    }

    #[test]
    fn test_configuration_defaults() {
        let cfg = RTCBridgeConfigurationBuilder::new().build();
        assert_eq!(cfg.variant(), RTCEngineVariant::Default);
        assert_eq!(cfg.bundle_policy(), RTCBundlePolicy::MaxBundle);
        assert_eq!(cfg.rtcp_mux_policy(), RTCRtcpMuxPolicy::Require);
        assert!(cfg.ice_servers().is_empty());
    }

    #[test]
    fn test_transport_configuration() {
        let cfg = RTCBridgeConfigurationBuilder::new()
            .with_ice_servers(vec![turn("stun:stun.example.org:3478")])
            .build();

        let turn_servers = vec![
            turn("turn:a.example.org:3478"),
            turn("turns:b.example.org:443?transport=tcp"),
        ];

        let private = cfg.transport_configuration(&turn_servers, true);
        assert_eq!(private.ice_transport_policy, RTCIceTransportPolicy::Relay);
        assert_eq!(private.bundle_policy, RTCBundlePolicy::MaxBundle);
        assert_eq!(private.rtcp_mux_policy, RTCRtcpMuxPolicy::Require);
        let urls: Vec<&str> = private
            .ice_servers
            .iter()
            .map(|s| s.urls[0].as_str())
            .collect();
        assert_eq!(
            urls,
            vec![
                "stun:stun.example.org:3478",
                "turn:a.example.org:3478",
                "turns:b.example.org:443?transport=tcp",
            ]
        );

        let open = cfg.transport_configuration(&[], false);
        assert_eq!(open.ice_transport_policy, RTCIceTransportPolicy::All);
        assert_eq!(open.ice_servers.len(), 1);
    }

    #[test]
    fn test_configuration_json() {
        let j = r#"
            {
                "variant": "firefox",
                "iceServers": [{"urls": ["turn:turn.example.org"],
                                "username": "jch",
                                "credential": "topsecret"
                              }],
                "bundlePolicy": "balanced",
                "rtcpMuxPolicy": "negotiate"
            }"#;

        let cfg: RTCBridgeConfiguration = serde_json::from_str(j).unwrap();
        let expected = RTCBridgeConfigurationBuilder::new()
            .with_variant(RTCEngineVariant::Firefox)
            .with_bundle_policy(RTCBundlePolicy::Balanced)
            .with_rtcp_mux_policy(RTCRtcpMuxPolicy::Negotiate)
            .with_ice_servers(vec![RTCIceServer {
                urls: vec!["turn:turn.example.org".to_owned()],
                username: "jch".to_owned(),
                credential: "topsecret".to_owned(),
            }])
            .build();
        assert_eq!(cfg, expected);

        let j2 = serde_json::to_string(&cfg).unwrap();
        let cfg2: RTCBridgeConfiguration = serde_json::from_str(&j2).unwrap();
        assert_eq!(cfg, cfg2);
    }

    #[test]
    fn test_configuration_json_defaults() {
        let cfg: RTCBridgeConfiguration = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, RTCBridgeConfiguration::default());
    }
}
