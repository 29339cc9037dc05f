//! Per-call-leg connection state.
//!
//! An [`RTCPeerConnection`] is created by `new_connection` without any
//! engine connection. `create` attaches exactly one engine connection, built
//! from the TURN servers accumulated so far; `close` releases it for good.

pub mod configuration;
pub mod gathering;
pub(crate) mod media;
pub mod sdp;
pub mod state;
pub mod transport;
pub mod video_state;

use gathering::GatheringTracker;
use transport::RTCIceServer;
use video_state::{RTCCallType, RTCVideoState};

use crate::registry::{Identity, RTCDataChannelHandle};

/// RTCPeerConnection is one call leg. `C` is the engine connection type.
pub struct RTCPeerConnection<C> {
    /// Unique for the lifetime of the bridge, never reused.
    pub(crate) id: u64,
    pub(crate) self_id: u64,
    pub(crate) conversation_id: String,
    pub(crate) remote_user_id: String,
    pub(crate) remote_client_id: String,

    pub(crate) transport: Option<C>,
    pub(crate) turn_servers: Vec<RTCIceServer>,

    pub(crate) video_state: RTCVideoState,
    pub(crate) call_type: RTCCallType,
    pub(crate) sending_video: bool,
    pub(crate) muted: bool,

    pub(crate) gathering: GatheringTracker,
    pub(crate) data_channels: Vec<RTCDataChannelHandle>,
}

impl<C> RTCPeerConnection<C> {
    pub(crate) fn new(id: u64, self_id: u64, conversation_id: &str) -> Self {
        Self {
            id,
            self_id,
            conversation_id: conversation_id.to_owned(),
            remote_user_id: String::new(),
            remote_client_id: String::new(),
            transport: None,
            turn_servers: vec![],
            video_state: RTCVideoState::Stopped,
            call_type: RTCCallType::Normal,
            sending_video: false,
            muted: false,
            gathering: GatheringTracker::default(),
            data_channels: vec![],
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Opaque value the controller passed to `new_connection`.
    pub fn self_id(&self) -> u64 {
        self.self_id
    }

    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    pub fn remote_user_id(&self) -> &str {
        &self.remote_user_id
    }

    pub fn remote_client_id(&self) -> &str {
        &self.remote_client_id
    }

    pub fn turn_servers(&self) -> &[RTCIceServer] {
        &self.turn_servers
    }

    pub fn video_state(&self) -> RTCVideoState {
        self.video_state
    }

    pub fn call_type(&self) -> RTCCallType {
        self.call_type
    }

    pub fn is_sending_video(&self) -> bool {
        self.sending_video
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn has_transport(&self) -> bool {
        self.transport.is_some()
    }

    pub fn transport(&self) -> Option<&C> {
        self.transport.as_ref()
    }

    /// Data channels created on or accepted by this connection.
    pub fn data_channels(&self) -> &[RTCDataChannelHandle] {
        &self.data_channels
    }

    pub fn is_gathering_completed(&self) -> bool {
        self.gathering.is_completed()
    }
}

impl<C> Identity for RTCPeerConnection<C> {
    type Id = u64;

    fn identity(&self) -> u64 {
        self.id
    }
}
