//! Local media and the capability that acquires it.
//!
//! Media acquisition is asynchronous and owned by the host: the bridge calls
//! [`MediaSource::request_media`] and later receives the outcome through
//! `handle_read` as a [`MediaResponse`] carrying the same [`MediaTicket`].

use std::fmt;

use serde::{Deserialize, Serialize};
use shared::error::Result;

use crate::peer_connection::configuration::UNSPECIFIED_STR;
use crate::registry::RTCPeerConnectionHandle;

#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RTCTrackKind {
    #[default]
    Unspecified,

    #[serde(rename = "audio")]
    Audio,

    #[serde(rename = "video")]
    Video,
}

const TRACK_KIND_AUDIO_STR: &str = "audio";
const TRACK_KIND_VIDEO_STR: &str = "video";

impl From<&str> for RTCTrackKind {
    fn from(raw: &str) -> Self {
        match raw {
            TRACK_KIND_AUDIO_STR => RTCTrackKind::Audio,
            TRACK_KIND_VIDEO_STR => RTCTrackKind::Video,
            _ => RTCTrackKind::Unspecified,
        }
    }
}

impl fmt::Display for RTCTrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            RTCTrackKind::Audio => TRACK_KIND_AUDIO_STR,
            RTCTrackKind::Video => TRACK_KIND_VIDEO_STR,
            RTCTrackKind::Unspecified => UNSPECIFIED_STR,
        };
        write!(f, "{s}")
    }
}

/// MediaStreamTrack is a single audio or video source.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaStreamTrack {
    pub id: String,
    pub kind: RTCTrackKind,
    pub enabled: bool,
}

impl MediaStreamTrack {
    pub fn new(id: impl Into<String>, kind: RTCTrackKind) -> Self {
        Self {
            id: id.into(),
            kind,
            enabled: true,
        }
    }

    pub fn audio(id: impl Into<String>) -> Self {
        Self::new(id, RTCTrackKind::Audio)
    }

    pub fn video(id: impl Into<String>) -> Self {
        Self::new(id, RTCTrackKind::Video)
    }
}

/// MediaStream groups the tracks delivered by one acquisition, or the
/// tracks of one inbound remote stream.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaStream {
    pub id: String,
    pub tracks: Vec<MediaStreamTrack>,
}

impl MediaStream {
    pub fn new(id: impl Into<String>, tracks: Vec<MediaStreamTrack>) -> Self {
        Self {
            id: id.into(),
            tracks,
        }
    }

    pub fn has_kind(&self, kind: RTCTrackKind) -> bool {
        self.tracks.iter().any(|track| track.kind == kind)
    }
}

/// Why media was requested; decides what happens once it arrives.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MediaPurpose {
    Offer,
    Answer,
    VideoState,
}

/// MediaTicket correlates a [`MediaResponse`] with the request that caused
/// it. It names the connection by handle and by its unique id, so a
/// response for a connection that was closed in the meantime is recognised
/// as stale.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MediaTicket {
    pub(crate) handle: RTCPeerConnectionHandle,
    pub(crate) connection_id: u64,
    pub(crate) purpose: MediaPurpose,
}

impl MediaTicket {
    pub fn handle(&self) -> RTCPeerConnectionHandle {
        self.handle
    }

    pub fn purpose(&self) -> MediaPurpose {
        self.purpose
    }
}

/// MediaRequest asks the host for local media. Audio is always requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRequest {
    pub ticket: MediaTicket,
    pub conversation_id: String,
    pub audio: bool,
    pub video: bool,
    pub screen_share: bool,
}

/// MediaResponse is the outcome of a [`MediaRequest`], fed back through
/// `handle_read`.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaResponse {
    pub ticket: MediaTicket,
    pub result: Result<MediaStream>,
}

impl MediaResponse {
    pub fn new(ticket: MediaTicket, result: Result<MediaStream>) -> Self {
        Self { ticket, result }
    }
}

/// MediaSource is the host's media-acquisition capability.
pub trait MediaSource {
    /// request_media starts acquiring local media. It must not block; the
    /// outcome is delivered later as a [`MediaResponse`]. An error returned
    /// here is treated like a failed acquisition.
    fn request_media(&mut self, request: MediaRequest) -> Result<()>;
}
