use crate::data_channel::RTCDataChannelState;
use crate::engine::RTCEngineEvent;
use crate::media_stream::{MediaResponse, MediaStream};
use crate::peer_connection::sdp::RTCSessionDescription;
use crate::peer_connection::state::{RTCIceConnectionState, RTCSignalingState};
use crate::registry::{RTCDataChannelHandle, RTCPeerConnectionHandle};

const LOCAL_DESCRIPTION_SDP_ERROR_STR: &str = "sdp-error";
const LOCAL_DESCRIPTION_MEDIA_ERROR_STR: &str = "media-error";

/// Outcome of `create_offer` or `create_answer`.
///
/// Media acquisition failures and description failures are kept apart so
/// the controller can tell a missing microphone from a negotiation problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RTCLocalDescriptionResult {
    /// The created description, normalized for the wire.
    Ready(RTCSessionDescription),
    MediaError(String),
    SdpError(String),
}

impl RTCLocalDescriptionResult {
    /// 0 on success, 1 on any failure.
    pub fn error_code(&self) -> i32 {
        match self {
            RTCLocalDescriptionResult::Ready(_) => 0,
            _ => 1,
        }
    }

    /// The description type on success, otherwise `media-error` or
    /// `sdp-error`.
    pub fn type_str(&self) -> String {
        match self {
            RTCLocalDescriptionResult::Ready(desc) => desc.sdp_type.to_string(),
            RTCLocalDescriptionResult::MediaError(_) => LOCAL_DESCRIPTION_MEDIA_ERROR_STR.to_owned(),
            RTCLocalDescriptionResult::SdpError(_) => LOCAL_DESCRIPTION_SDP_ERROR_STR.to_owned(),
        }
    }

    /// The description text on success, otherwise the failure message.
    pub fn sdp(&self) -> &str {
        match self {
            RTCLocalDescriptionResult::Ready(desc) => &desc.sdp,
            RTCLocalDescriptionResult::MediaError(msg) | RTCLocalDescriptionResult::SdpError(msg) => {
                msg
            }
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error_code() == 0
    }
}

/// Inbound remote media, with the identity of the remote party.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RTCRemoteStreamsEvent {
    pub peer_connection: RTCPeerConnectionHandle,
    pub conversation_id: String,
    pub remote_user_id: String,
    pub remote_client_id: String,
    pub streams: Vec<MediaStream>,
}

/// RTCBridgeEvent is a callback to the controller, drained with
/// `poll_event` in the order it was produced.
#[allow(clippy::enum_variant_names)]
#[derive(Debug, Clone, PartialEq)]
pub enum RTCBridgeEvent {
    OnLocalDescription(RTCPeerConnectionHandle, RTCLocalDescriptionResult),
    OnGatheringStarted(RTCPeerConnectionHandle),
    OnSignalingStateChange(RTCPeerConnectionHandle, RTCSignalingState),
    /// Gathering is done enough to send the description.
    OnGatheringComplete(RTCPeerConnectionHandle, RTCSessionDescription),
    OnConnectionStateChange(RTCPeerConnectionHandle, RTCIceConnectionState),
    /// The remote side opened a data channel.
    OnDataChannelEstablished(RTCPeerConnectionHandle, RTCDataChannelHandle),
    OnDataChannelStateChange(
        RTCPeerConnectionHandle,
        RTCDataChannelHandle,
        RTCDataChannelState,
    ),
    OnDataChannelMessage(RTCPeerConnectionHandle, RTCDataChannelHandle, String),
    OnRemoteStreams(RTCRemoteStreamsEvent),
}

impl RTCBridgeEvent {
    /// Connection the event belongs to.
    pub fn peer_connection(&self) -> RTCPeerConnectionHandle {
        match self {
            RTCBridgeEvent::OnLocalDescription(handle, _)
            | RTCBridgeEvent::OnGatheringStarted(handle)
            | RTCBridgeEvent::OnSignalingStateChange(handle, _)
            | RTCBridgeEvent::OnGatheringComplete(handle, _)
            | RTCBridgeEvent::OnConnectionStateChange(handle, _)
            | RTCBridgeEvent::OnDataChannelEstablished(handle, _)
            | RTCBridgeEvent::OnDataChannelStateChange(handle, _, _)
            | RTCBridgeEvent::OnDataChannelMessage(handle, _, _) => *handle,
            RTCBridgeEvent::OnRemoteStreams(event) => event.peer_connection,
        }
    }
}

/// RTCBridgeInput is everything fed to the bridge through `handle_read`.
#[derive(Debug, Clone, PartialEq)]
pub enum RTCBridgeInput {
    /// An event of the engine connection created for the handle.
    Engine(RTCPeerConnectionHandle, RTCEngineEvent),
    /// Outcome of a media request.
    Media(MediaResponse),
}
