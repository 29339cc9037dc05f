use std::fmt;

use crate::peer_connection::configuration::UNSPECIFIED_STR;

/// Outbound video state requested by the controller.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub enum RTCVideoState {
    #[default]
    Stopped = 0,
    Started = 1,
    BadConnection = 2,
    Paused = 3,
    ScreenShare = 4,
}

impl RTCVideoState {
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Whether the state sends a camera or screen-share track.
    pub fn is_active(&self) -> bool {
        matches!(self, RTCVideoState::Started | RTCVideoState::ScreenShare)
    }

    pub(crate) fn uses_camera(&self) -> bool {
        *self == RTCVideoState::Started
    }

    pub(crate) fn uses_screen_share(&self) -> bool {
        *self == RTCVideoState::ScreenShare
    }
}

impl From<u8> for RTCVideoState {
    fn from(v: u8) -> Self {
        match v {
            1 => RTCVideoState::Started,
            2 => RTCVideoState::BadConnection,
            3 => RTCVideoState::Paused,
            4 => RTCVideoState::ScreenShare,
            _ => RTCVideoState::Stopped,
        }
    }
}

impl fmt::Display for RTCVideoState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            RTCVideoState::Stopped => "stopped",
            RTCVideoState::Started => "started",
            RTCVideoState::BadConnection => "bad-connection",
            RTCVideoState::Paused => "paused",
            RTCVideoState::ScreenShare => "screen-share",
        };
        write!(f, "{s}")
    }
}

/// Call type requested with an offer or answer.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub enum RTCCallType {
    #[default]
    Normal = 0,
    Video = 1,
    ForcedAudio = 2,
    Unspecified = 255,
}

impl RTCCallType {
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl From<u8> for RTCCallType {
    fn from(v: u8) -> Self {
        match v {
            0 => RTCCallType::Normal,
            1 => RTCCallType::Video,
            2 => RTCCallType::ForcedAudio,
            _ => RTCCallType::Unspecified,
        }
    }
}

impl fmt::Display for RTCCallType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            RTCCallType::Normal => "normal",
            RTCCallType::Video => "video",
            RTCCallType::ForcedAudio => "forced-audio",
            RTCCallType::Unspecified => UNSPECIFIED_STR,
        };
        write!(f, "{s}")
    }
}
