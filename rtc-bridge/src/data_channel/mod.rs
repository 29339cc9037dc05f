//! Data channels as seen by the controller.
//!
//! The engine owns the channel; the bridge keeps an [`RTCDataChannel`]
//! record in its registry that remembers the owning connection, the engine
//! channel id and a mirror of the ready state fed by engine events.

pub mod state;

use bytes::Bytes;

pub use state::RTCDataChannelState;

use crate::engine::RTCDataChannelId;
use crate::registry::{Identity, RTCDataChannelHandle, RTCPeerConnectionHandle};

pub struct RTCDataChannel {
    pub(crate) peer_connection: RTCPeerConnectionHandle,
    /// Unique id of the owning connection.
    pub(crate) connection_id: u64,
    pub(crate) id: RTCDataChannelId,
    pub(crate) label: String,
    pub(crate) ready_state: RTCDataChannelState,
}

impl RTCDataChannel {
    pub(crate) fn new(
        peer_connection: RTCPeerConnectionHandle,
        connection_id: u64,
        id: RTCDataChannelId,
        label: &str,
    ) -> Self {
        Self {
            peer_connection,
            connection_id,
            id,
            label: label.to_owned(),
            ready_state: RTCDataChannelState::Connecting,
        }
    }

    /// Handle of the connection the channel belongs to.
    pub fn peer_connection(&self) -> RTCPeerConnectionHandle {
        self.peer_connection
    }

    pub fn id(&self) -> RTCDataChannelId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn ready_state(&self) -> RTCDataChannelState {
        self.ready_state
    }
}

impl Identity for RTCDataChannel {
    type Id = (u64, RTCDataChannelId);

    fn identity(&self) -> Self::Id {
        (self.connection_id, self.id)
    }
}

/// RTCDataChannelOutbound is a payload written through `handle_write`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RTCDataChannelOutbound {
    pub data_channel: RTCDataChannelHandle,
    pub data: Bytes,
}
