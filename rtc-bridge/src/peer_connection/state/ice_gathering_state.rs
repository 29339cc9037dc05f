use std::fmt;

/// The engine's own candidate-gathering progress. Gathering completion as
/// reported to the controller is decided separately, see
/// [`RTCGatheringPolicy`](crate::peer_connection::gathering::RTCGatheringPolicy).
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub enum RTCIceGatheringState {
    #[default]
    Unknown = 0,

    New = 1,

    Gathering = 2,

    Complete = 3,
}

const ICE_GATHERING_STATE_UNKNOWN_STR: &str = "unknown";
const ICE_GATHERING_STATE_NEW_STR: &str = "new";
const ICE_GATHERING_STATE_GATHERING_STR: &str = "gathering";
const ICE_GATHERING_STATE_COMPLETE_STR: &str = "complete";

impl RTCIceGatheringState {
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl From<&str> for RTCIceGatheringState {
    fn from(raw: &str) -> Self {
        match raw {
            ICE_GATHERING_STATE_NEW_STR => RTCIceGatheringState::New,
            ICE_GATHERING_STATE_GATHERING_STR => RTCIceGatheringState::Gathering,
            ICE_GATHERING_STATE_COMPLETE_STR => RTCIceGatheringState::Complete,
            _ => RTCIceGatheringState::Unknown,
        }
    }
}

impl From<u8> for RTCIceGatheringState {
    fn from(v: u8) -> Self {
        match v {
            1 => RTCIceGatheringState::New,
            2 => RTCIceGatheringState::Gathering,
            3 => RTCIceGatheringState::Complete,
            _ => RTCIceGatheringState::Unknown,
        }
    }
}

impl fmt::Display for RTCIceGatheringState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            RTCIceGatheringState::Unknown => ICE_GATHERING_STATE_UNKNOWN_STR,
            RTCIceGatheringState::New => ICE_GATHERING_STATE_NEW_STR,
            RTCIceGatheringState::Gathering => ICE_GATHERING_STATE_GATHERING_STR,
            RTCIceGatheringState::Complete => ICE_GATHERING_STATE_COMPLETE_STR,
        };
        write!(f, "{s}")
    }
}
