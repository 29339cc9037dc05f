#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use bytes::Bytes;
use rtc_bridge::bridge::event::{RTCBridgeEvent, RTCBridgeInput};
use rtc_bridge::engine::{
    RTCDataChannelId, RTCEngineEvent, RTCRtpSender, RTCRtpSenderId, TransportConnection,
    TransportEngine,
};
use rtc_bridge::media_stream::{
    MediaRequest, MediaResponse, MediaSource, MediaStream, MediaStreamTrack,
};
use rtc_bridge::peer_connection::configuration::{
    RTCBridgeConfigurationBuilder, RTCEngineVariant, RTCOfferOptions, RTCTransportConfiguration,
};
use rtc_bridge::peer_connection::sdp::RTCSessionDescription;
use rtc_bridge::peer_connection::state::{
    RTCIceGatheringState, RTCPeerConnectionState, RTCSignalingState,
};
use rtc_bridge::registry::RTCPeerConnectionHandle;
use rtc_bridge::sansio::Protocol;
use rtc_bridge::shared::error::{Error, Result};
use rtc_bridge::RTCBridge;

pub type Bridge = RTCBridge<MockEngine, MockMediaSource>;

pub const OFFER_SDP: &str = "v=0\r\n\
o=- 4611731400430051336 2 IN IP4 127.0.0.1\r\n\
s=-\r\n\
t=0 0\r\n\
m=audio 9 UDP/TLS/RTP/SAVPF 111\r\n\
a=mid:0\r\n\
m=video 0 UDP/TLS/RTP/SAVPF 96\r\n\
a=mid:1\r\n\
m=application 0 UDP/DTLS/SCTP webrtc-datachannel\r\n\
a=mid:2\r\n";

/// Calls made on one engine connection, plus the state the engine reports.
#[derive(Default, Debug)]
pub struct ConnectionState {
    pub configuration: RTCTransportConfiguration,
    pub offers: Vec<RTCOfferOptions>,
    pub answers: usize,
    pub local_description: Option<RTCSessionDescription>,
    pub remote_description: Option<RTCSessionDescription>,
    pub signaling_state: RTCSignalingState,
    pub ice_gathering_state: RTCIceGatheringState,
    pub connection_state: RTCPeerConnectionState,
    pub senders: Vec<RTCRtpSender>,
    pub added_tracks: Vec<(MediaStreamTrack, String)>,
    pub replaced_tracks: Vec<(RTCRtpSenderId, MediaStreamTrack)>,
    pub data_channels: Vec<String>,
    pub sent: Vec<(RTCDataChannelId, Bytes)>,
    pub closed_data_channels: Vec<RTCDataChannelId>,
    pub closed: bool,
    /// Fail offer and answer creation with this message.
    pub fail_negotiation: Option<String>,
    /// Reject descriptions with this message.
    pub fail_set_description: Option<String>,
}

impl ConnectionState {
    pub fn sender(&self, id: RTCRtpSenderId) -> &RTCRtpSender {
        &self.senders[id]
    }

    fn sender_mut(&mut self, id: RTCRtpSenderId) -> Result<&mut RTCRtpSender> {
        self.senders
            .get_mut(id)
            .ok_or_else(|| Error::ErrTransport(format!("no sender {id}")))
    }
}

pub struct MockConnection {
    state: Rc<RefCell<ConnectionState>>,
}

impl TransportConnection for MockConnection {
    fn create_offer(&mut self, options: RTCOfferOptions) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if let Some(msg) = &state.fail_negotiation {
            return Err(Error::ErrNegotiation(msg.clone()));
        }
        state.offers.push(options);
        Ok(())
    }

    fn create_answer(&mut self) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if let Some(msg) = &state.fail_negotiation {
            return Err(Error::ErrNegotiation(msg.clone()));
        }
        state.answers += 1;
        Ok(())
    }

    fn set_local_description(&mut self, description: RTCSessionDescription) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if let Some(msg) = &state.fail_set_description {
            return Err(Error::ErrSetDescription(msg.clone()));
        }
        state.local_description = Some(description);
        Ok(())
    }

    fn set_remote_description(&mut self, description: RTCSessionDescription) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if let Some(msg) = &state.fail_set_description {
            return Err(Error::ErrSetDescription(msg.clone()));
        }
        state.remote_description = Some(description);
        Ok(())
    }

    fn local_description(&self) -> Option<RTCSessionDescription> {
        self.state.borrow().local_description.clone()
    }

    fn signaling_state(&self) -> RTCSignalingState {
        self.state.borrow().signaling_state
    }

    fn ice_gathering_state(&self) -> RTCIceGatheringState {
        self.state.borrow().ice_gathering_state
    }

    fn connection_state(&self) -> RTCPeerConnectionState {
        self.state.borrow().connection_state
    }

    fn senders(&self) -> Vec<RTCRtpSender> {
        self.state.borrow().senders.clone()
    }

    fn add_track(&mut self, track: MediaStreamTrack, stream_id: &str) -> Result<RTCRtpSenderId> {
        let mut state = self.state.borrow_mut();
        let id = state.senders.len();
        state.senders.push(RTCRtpSender {
            id,
            kind: track.kind,
            track: Some(track.clone()),
        });
        state.added_tracks.push((track, stream_id.to_owned()));
        Ok(id)
    }

    fn replace_track(&mut self, sender: RTCRtpSenderId, track: MediaStreamTrack) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.sender_mut(sender)?.track = Some(track.clone());
        state.replaced_tracks.push((sender, track));
        Ok(())
    }

    fn set_track_enabled(&mut self, sender: RTCRtpSenderId, enabled: bool) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if let Some(track) = state.sender_mut(sender)?.track.as_mut() {
            track.enabled = enabled;
        }
        Ok(())
    }

    fn create_data_channel(&mut self, label: &str) -> Result<RTCDataChannelId> {
        let mut state = self.state.borrow_mut();
        state.data_channels.push(label.to_owned());
        Ok((state.data_channels.len() - 1) as RTCDataChannelId)
    }

    fn send_data_channel(&mut self, id: RTCDataChannelId, data: Bytes) -> Result<()> {
        self.state.borrow_mut().sent.push((id, data));
        Ok(())
    }

    fn close_data_channel(&mut self, id: RTCDataChannelId) -> Result<()> {
        self.state.borrow_mut().closed_data_channels.push(id);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.state.borrow_mut().closed = true;
        Ok(())
    }
}

/// MockEngine hands out connections whose state stays reachable from the
/// test after the bridge took ownership.
#[derive(Default)]
pub struct MockEngine {
    pub connections: Vec<(RTCPeerConnectionHandle, Rc<RefCell<ConnectionState>>)>,
    pub fail_new_connection: bool,
}

impl MockEngine {
    /// The latest connection created for `handle`.
    pub fn connection(&self, handle: RTCPeerConnectionHandle) -> Rc<RefCell<ConnectionState>> {
        self.connections
            .iter()
            .rev()
            .find(|(h, _)| *h == handle)
            .map(|(_, state)| Rc::clone(state))
            .expect("no connection created for handle")
    }
}

impl TransportEngine for MockEngine {
    type Connection = MockConnection;

    fn new_connection(
        &mut self,
        handle: RTCPeerConnectionHandle,
        configuration: RTCTransportConfiguration,
    ) -> Result<MockConnection> {
        if self.fail_new_connection {
            return Err(Error::ErrTransport("engine unavailable".to_owned()));
        }

        let state = Rc::new(RefCell::new(ConnectionState {
            configuration,
            ..Default::default()
        }));
        self.connections.push((handle, Rc::clone(&state)));
        Ok(MockConnection { state })
    }
}

/// MockMediaSource records requests; tests answer them with `respond`.
#[derive(Default)]
pub struct MockMediaSource {
    pub requests: Vec<MediaRequest>,
    /// Fail every request synchronously with this message.
    pub fail: Option<String>,
}

impl MediaSource for MockMediaSource {
    fn request_media(&mut self, request: MediaRequest) -> Result<()> {
        if let Some(msg) = &self.fail {
            return Err(Error::ErrMediaAcquisition(msg.clone()));
        }
        self.requests.push(request);
        Ok(())
    }
}

pub fn init_log() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn new_bridge(variant: RTCEngineVariant) -> Bridge {
    init_log();
    let config = RTCBridgeConfigurationBuilder::new()
        .with_variant(variant)
        .build();
    RTCBridge::new(config, MockEngine::default(), MockMediaSource::default())
}

/// connect registers a connection and creates its engine connection.
pub fn connect(bridge: &mut Bridge, conversation_id: &str) -> RTCPeerConnectionHandle {
    let handle = bridge.new_connection(1, conversation_id);
    bridge.create(handle, false).expect("create");
    handle
}

pub fn drain(bridge: &mut Bridge) -> Vec<RTCBridgeEvent> {
    let mut events = vec![];
    while let Some(event) = bridge.poll_event() {
        events.push(event);
    }
    events
}

pub fn audio_stream() -> MediaStream {
    MediaStream::new("local", vec![MediaStreamTrack::audio("mic")])
}

pub fn audio_video_stream() -> MediaStream {
    MediaStream::new(
        "local",
        vec![MediaStreamTrack::audio("mic"), MediaStreamTrack::video("camera")],
    )
}

/// respond answers the oldest pending media request.
pub fn respond(bridge: &mut Bridge, result: Result<MediaStream>) {
    let request = bridge.media_source_mut().requests.remove(0);
    bridge
        .handle_read(RTCBridgeInput::Media(MediaResponse::new(request.ticket, result)))
        .expect("media response");
}

pub fn engine_event(bridge: &mut Bridge, handle: RTCPeerConnectionHandle, event: RTCEngineEvent) {
    bridge
        .handle_read(RTCBridgeInput::Engine(handle, event))
        .expect("engine event");
}

/// negotiate runs a full offer round up to the engine holding `sdp` as its
/// local description, and discards the events produced on the way.
pub fn negotiate(bridge: &mut Bridge, handle: RTCPeerConnectionHandle, sdp: &str) {
    bridge.create_offer(
        handle,
        rtc_bridge::peer_connection::video_state::RTCCallType::Normal,
        rtc_bridge::peer_connection::video_state::RTCVideoState::Stopped,
    );
    respond(bridge, Ok(audio_stream()));
    bridge
        .engine()
        .connection(handle)
        .borrow_mut()
        .local_description = Some(RTCSessionDescription::offer(sdp));
    drain(bridge);
}
