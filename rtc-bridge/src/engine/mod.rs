//! The transport engine consumed by the bridge.
//!
//! The engine implements ICE, DTLS, SCTP and media transport; the bridge
//! only drives it. Operations that complete asynchronously (description
//! creation and application) are requests here and report back as
//! [`RTCEngineEvent`]s fed to the bridge through `handle_read`, tagged with
//! the handle the connection was created for.

use bytes::Bytes;
use shared::error::Result;

use crate::media_stream::{MediaStream, MediaStreamTrack, RTCTrackKind};
use crate::peer_connection::configuration::{RTCOfferOptions, RTCTransportConfiguration};
use crate::peer_connection::sdp::RTCSessionDescription;
use crate::peer_connection::state::{
    RTCIceConnectionState, RTCIceGatheringState, RTCPeerConnectionState, RTCSignalingState,
};
use crate::peer_connection::transport::RTCIceCandidate;
use crate::registry::RTCPeerConnectionHandle;

/// Engine-assigned id of an outbound sender.
pub type RTCRtpSenderId = usize;

/// Engine-assigned id of a data channel, unique within one connection.
pub type RTCDataChannelId = u16;

/// RTCRtpSender is a snapshot of one outbound sender. A sender keeps its
/// kind after its track is removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RTCRtpSender {
    pub id: RTCRtpSenderId,
    pub kind: RTCTrackKind,
    pub track: Option<MediaStreamTrack>,
}

impl RTCRtpSender {
    /// Whether the sender carries an enabled track.
    pub fn is_active(&self) -> bool {
        self.track.as_ref().is_some_and(|track| track.enabled)
    }
}

/// TransportEngine creates connections.
pub trait TransportEngine {
    type Connection: TransportConnection;

    /// new_connection builds the engine side of `handle`. Events of the new
    /// connection must be fed back tagged with `handle`.
    fn new_connection(
        &mut self,
        handle: RTCPeerConnectionHandle,
        configuration: RTCTransportConfiguration,
    ) -> Result<Self::Connection>;
}

/// TransportConnection is one engine connection, owned by exactly one
/// peer connection.
pub trait TransportConnection {
    /// Requests an offer; completes with [`RTCEngineEvent::OnDescriptionCreated`].
    fn create_offer(&mut self, options: RTCOfferOptions) -> Result<()>;

    /// Requests an answer; completes with [`RTCEngineEvent::OnDescriptionCreated`].
    fn create_answer(&mut self) -> Result<()>;

    /// Completes with [`RTCEngineEvent::OnLocalDescriptionApplied`].
    fn set_local_description(&mut self, description: RTCSessionDescription) -> Result<()>;

    /// Completes with [`RTCEngineEvent::OnRemoteDescriptionApplied`].
    fn set_remote_description(&mut self, description: RTCSessionDescription) -> Result<()>;

    fn local_description(&self) -> Option<RTCSessionDescription>;

    fn signaling_state(&self) -> RTCSignalingState;

    fn ice_gathering_state(&self) -> RTCIceGatheringState;

    fn connection_state(&self) -> RTCPeerConnectionState;

    fn senders(&self) -> Vec<RTCRtpSender>;

    /// add_track attaches `track` on a new sender, associated with the
    /// stream `stream_id`.
    fn add_track(&mut self, track: MediaStreamTrack, stream_id: &str) -> Result<RTCRtpSenderId>;

    /// replace_track swaps the track of `sender` without renegotiation.
    fn replace_track(&mut self, sender: RTCRtpSenderId, track: MediaStreamTrack) -> Result<()>;

    fn set_track_enabled(&mut self, sender: RTCRtpSenderId, enabled: bool) -> Result<()>;

    fn create_data_channel(&mut self, label: &str) -> Result<RTCDataChannelId>;

    fn send_data_channel(&mut self, id: RTCDataChannelId, data: Bytes) -> Result<()>;

    fn close_data_channel(&mut self, id: RTCDataChannelId) -> Result<()>;

    fn close(&mut self) -> Result<()>;
}

/// RTCEngineEvent is emitted by an engine connection, in order.
#[allow(clippy::enum_variant_names)]
#[derive(Debug, Clone, PartialEq)]
pub enum RTCEngineEvent {
    OnSignalingStateChange(RTCSignalingState),
    OnIceGatheringStateChange(RTCIceGatheringState),
    /// A gathered local candidate; `None` is end-of-candidates.
    OnIceCandidate(Option<RTCIceCandidate>),
    OnIceConnectionStateChange(RTCIceConnectionState),
    OnNegotiationNeeded,
    /// Inbound media arrived on the listed remote streams.
    OnTrack(Vec<MediaStream>),
    /// The remote side opened a data channel.
    OnDataChannel(RTCDataChannelId, String),
    OnDataChannelOpen(RTCDataChannelId),
    OnDataChannelClose(RTCDataChannelId),
    OnDataChannelError(RTCDataChannelId),
    OnDataChannelMessage(RTCDataChannelId, String),
    /// Outcome of `create_offer` or `create_answer`.
    OnDescriptionCreated(Result<RTCSessionDescription>),
    /// Outcome of `set_local_description`.
    OnLocalDescriptionApplied(Result<()>),
    /// Outcome of `set_remote_description`.
    OnRemoteDescriptionApplied(Result<()>),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_sender_is_active() {
        let mut sender = RTCRtpSender {
            id: 1,
            kind: RTCTrackKind::Video,
            track: None,
        };
        assert!(!sender.is_active());

        sender.track = Some(MediaStreamTrack::video("cam"));
        assert!(sender.is_active());

        if let Some(track) = sender.track.as_mut() {
            track.enabled = false;
        }
        assert!(!sender.is_active());
    }
}
