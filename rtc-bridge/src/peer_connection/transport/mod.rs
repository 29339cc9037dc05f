pub mod ice_candidate;

use serde::{Deserialize, Serialize};

pub use ice_candidate::{RTCIceCandidate, RTCIceCandidateType};

/// RTCIceServer describes a STUN or TURN server the engine may use.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RTCIceServer {
    pub urls: Vec<String>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub credential: String,
}

impl RTCIceServer {
    /// A single-url relay server with long-term credentials.
    pub fn turn(url: &str, username: &str, credential: &str) -> Self {
        Self {
            urls: vec![url.to_owned()],
            username: username.to_owned(),
            credential: credential.to_owned(),
        }
    }
}
