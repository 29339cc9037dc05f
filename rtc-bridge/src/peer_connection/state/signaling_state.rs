use std::fmt;

/// Offer/answer progress of a connection, mirrored from the engine.
///
/// The discriminants are the codes delivered to the controller:
///
/// ```
/// use rtc_bridge::peer_connection::state::RTCSignalingState;
///
/// let state: RTCSignalingState = "have-remote-offer".into();
/// assert_eq!(state.code(), 4);
/// assert_eq!(RTCSignalingState::from(2u8), RTCSignalingState::HaveLocalOffer);
/// ```
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub enum RTCSignalingState {
    /// The engine reported a state this bridge does not know, or there is
    /// no engine connection.
    #[default]
    Unknown = 0,

    /// No offer/answer exchange in progress.
    Stable = 1,

    HaveLocalOffer = 2,

    HaveLocalPranswer = 3,

    HaveRemoteOffer = 4,

    HaveRemotePranswer = 5,

    Closed = 6,
}

const SIGNALING_STATE_UNKNOWN_STR: &str = "unknown";
const SIGNALING_STATE_STABLE_STR: &str = "stable";
const SIGNALING_STATE_HAVE_LOCAL_OFFER_STR: &str = "have-local-offer";
const SIGNALING_STATE_HAVE_LOCAL_PRANSWER_STR: &str = "have-local-pranswer";
const SIGNALING_STATE_HAVE_REMOTE_OFFER_STR: &str = "have-remote-offer";
const SIGNALING_STATE_HAVE_REMOTE_PRANSWER_STR: &str = "have-remote-pranswer";
const SIGNALING_STATE_CLOSED_STR: &str = "closed";

impl RTCSignalingState {
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl From<&str> for RTCSignalingState {
    fn from(raw: &str) -> Self {
        match raw {
            SIGNALING_STATE_STABLE_STR => RTCSignalingState::Stable,
            SIGNALING_STATE_HAVE_LOCAL_OFFER_STR => RTCSignalingState::HaveLocalOffer,
            SIGNALING_STATE_HAVE_LOCAL_PRANSWER_STR => RTCSignalingState::HaveLocalPranswer,
            SIGNALING_STATE_HAVE_REMOTE_OFFER_STR => RTCSignalingState::HaveRemoteOffer,
            SIGNALING_STATE_HAVE_REMOTE_PRANSWER_STR => RTCSignalingState::HaveRemotePranswer,
            SIGNALING_STATE_CLOSED_STR => RTCSignalingState::Closed,
            _ => RTCSignalingState::Unknown,
        }
    }
}

impl From<u8> for RTCSignalingState {
    fn from(v: u8) -> Self {
        match v {
            1 => RTCSignalingState::Stable,
            2 => RTCSignalingState::HaveLocalOffer,
            3 => RTCSignalingState::HaveLocalPranswer,
            4 => RTCSignalingState::HaveRemoteOffer,
            5 => RTCSignalingState::HaveRemotePranswer,
            6 => RTCSignalingState::Closed,
            _ => RTCSignalingState::Unknown,
        }
    }
}

impl fmt::Display for RTCSignalingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            RTCSignalingState::Unknown => SIGNALING_STATE_UNKNOWN_STR,
            RTCSignalingState::Stable => SIGNALING_STATE_STABLE_STR,
            RTCSignalingState::HaveLocalOffer => SIGNALING_STATE_HAVE_LOCAL_OFFER_STR,
            RTCSignalingState::HaveLocalPranswer => SIGNALING_STATE_HAVE_LOCAL_PRANSWER_STR,
            RTCSignalingState::HaveRemoteOffer => SIGNALING_STATE_HAVE_REMOTE_OFFER_STR,
            RTCSignalingState::HaveRemotePranswer => SIGNALING_STATE_HAVE_REMOTE_PRANSWER_STR,
            RTCSignalingState::Closed => SIGNALING_STATE_CLOSED_STR,
        };
        write!(f, "{s}")
    }
}
