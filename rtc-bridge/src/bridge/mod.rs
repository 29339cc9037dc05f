//! The control boundary.
//!
//! [`RTCBridge`] owns every connection and data channel and translates
//! between the controller's handle-based commands and the transport engine.
//! It performs no I/O: engine events and media responses are fed in through
//! `handle_read`, controller callbacks are drained with `poll_event`.

mod data_channel;
pub mod event;
mod handler;
mod media;
mod negotiation;
mod proto;

use std::collections::VecDeque;
use std::fmt;

use log::{debug, info, warn};
use shared::error::{Error, Result};

use crate::data_channel::RTCDataChannel;
use crate::engine::{TransportConnection, TransportEngine};
use crate::media_stream::MediaSource;
use crate::peer_connection::RTCPeerConnection;
use crate::peer_connection::configuration::RTCBridgeConfiguration;
use crate::peer_connection::configuration::engine_variant::RTCEngineVariant;
use crate::peer_connection::state::{
    RTCIceGatheringState, RTCPeerConnectionState, RTCSignalingState,
};
use crate::peer_connection::transport::RTCIceServer;
use crate::registry::{HandleRegistry, RTCDataChannelHandle, RTCPeerConnectionHandle};
use event::RTCBridgeEvent;

/// RTCBridge drives the transport connections of every call leg on behalf
/// of a controller.
pub struct RTCBridge<E: TransportEngine, M: MediaSource> {
    pub(crate) configuration: RTCBridgeConfiguration,
    pub(crate) engine: E,
    pub(crate) media_source: M,

    pub(crate) peer_connections:
        HandleRegistry<RTCPeerConnectionHandle, RTCPeerConnection<E::Connection>>,
    pub(crate) data_channels: HandleRegistry<RTCDataChannelHandle, RTCDataChannel>,

    pub(crate) events: VecDeque<RTCBridgeEvent>,
    next_connection_id: u64,
}

impl<E: TransportEngine, M: MediaSource> RTCBridge<E, M> {
    pub fn new(configuration: RTCBridgeConfiguration, engine: E, media_source: M) -> Self {
        Self {
            configuration,
            engine,
            media_source,
            peer_connections: HandleRegistry::new(),
            data_channels: HandleRegistry::new(),
            events: VecDeque::new(),
            next_connection_id: 1,
        }
    }

    pub fn configuration(&self) -> &RTCBridgeConfiguration {
        &self.configuration
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn media_source(&self) -> &M {
        &self.media_source
    }

    pub fn media_source_mut(&mut self) -> &mut M {
        &mut self.media_source
    }

    /// peer_connection returns the live connection behind `handle`.
    pub fn peer_connection(
        &self,
        handle: RTCPeerConnectionHandle,
    ) -> Option<&RTCPeerConnection<E::Connection>> {
        self.peer_connections.lookup(handle)
    }

    pub fn data_channel(&self, handle: RTCDataChannelHandle) -> Option<&RTCDataChannel> {
        self.data_channels.lookup(handle)
    }

    /// set_environment selects the engine variant for every connection.
    pub fn set_environment(&mut self, variant: RTCEngineVariant) {
        info!("set_environment: {variant}");
        self.configuration.variant = variant;
    }

    /// new_connection registers a connection without an engine connection.
    /// `self_id` is opaque and kept for the controller.
    pub fn new_connection(&mut self, self_id: u64, conversation_id: &str) -> RTCPeerConnectionHandle {
        let id = self.next_connection_id;
        self.next_connection_id += 1;

        let handle = self
            .peer_connections
            .register(RTCPeerConnection::new(id, self_id, conversation_id));
        info!("new_connection: {handle} conversation={conversation_id}");
        handle
    }

    /// create builds the engine connection of `handle` from the configured
    /// servers and the TURN servers added so far. With `privacy` only relay
    /// candidates are gathered.
    ///
    /// An unknown handle is ignored. Engine failures are returned, the
    /// connection stays without transport.
    pub fn create(&mut self, handle: RTCPeerConnectionHandle, privacy: bool) -> Result<()> {
        let Some(pc) = self.peer_connections.lookup_mut(handle) else {
            debug!("create: {handle} not found");
            return Ok(());
        };
        if pc.transport.is_some() {
            return Err(Error::ErrTransportAlreadyCreated);
        }

        let configuration = self
            .configuration
            .transport_configuration(&pc.turn_servers, privacy);
        info!(
            "create: {handle} privacy={privacy} turn_servers={} policy={}",
            pc.turn_servers.len(),
            configuration.ice_transport_policy
        );

        pc.transport = Some(self.engine.new_connection(handle, configuration)?);
        Ok(())
    }

    /// close tears down the engine connection of `handle` and releases the
    /// handle along with the handles of its data channels. Completions still
    /// in flight for it are dropped when they arrive.
    pub fn close(&mut self, handle: RTCPeerConnectionHandle) {
        report("close", handle, self.close_peer_connection(handle));
    }

    pub(crate) fn close_peer_connection(&mut self, handle: RTCPeerConnectionHandle) -> Result<()> {
        let mut pc = self
            .peer_connections
            .release(handle)
            .ok_or(Error::ErrInvalidHandle)?;
        info!("close: {handle} conversation={}", pc.conversation_id);

        for dc in pc.data_channels.drain(..) {
            if let Some(data_channel) = self.data_channels.release(dc) {
                debug!("close: released {dc} label={}", data_channel.label);
            }
        }

        match pc.transport.take() {
            Some(mut transport) => transport.close(),
            None => Ok(()),
        }
    }

    /// add_turn_server appends a relay server used by the next `create`.
    pub fn add_turn_server(
        &mut self,
        handle: RTCPeerConnectionHandle,
        url: &str,
        username: &str,
        credential: &str,
    ) {
        let Some(pc) = self.peer_connections.lookup_mut(handle) else {
            debug!("add_turn_server: {handle} not found");
            return;
        };
        info!("add_turn_server: {handle} url={url} username={username}");
        pc.turn_servers.push(RTCIceServer::turn(url, username, credential));
    }

    /// set_remote_identity records who the other end is once known.
    pub fn set_remote_identity(
        &mut self,
        handle: RTCPeerConnectionHandle,
        user_id: &str,
        client_id: &str,
    ) {
        let Some(pc) = self.peer_connections.lookup_mut(handle) else {
            debug!("set_remote_identity: {handle} not found");
            return;
        };
        info!("set_remote_identity: {handle} user={user_id} client={client_id}");
        pc.remote_user_id = user_id.to_owned();
        pc.remote_client_id = client_id.to_owned();
    }

    pub fn gathering_state(&self, handle: RTCPeerConnectionHandle) -> RTCIceGatheringState {
        self.transport(handle)
            .map(TransportConnection::ice_gathering_state)
            .unwrap_or_default()
    }

    pub fn signaling_state(&self, handle: RTCPeerConnectionHandle) -> RTCSignalingState {
        self.transport(handle)
            .map(TransportConnection::signaling_state)
            .unwrap_or_default()
    }

    /// connection_state is the aggregate connection state of the engine;
    /// its `Display` is the string form the controller expects.
    pub fn connection_state(&self, handle: RTCPeerConnectionHandle) -> RTCPeerConnectionState {
        self.transport(handle)
            .map(TransportConnection::connection_state)
            .unwrap_or_default()
    }

    /// Live connections of a conversation, in handle order.
    pub fn connections_for_conversation(
        &self,
        conversation_id: &str,
    ) -> Vec<RTCPeerConnectionHandle> {
        self.peer_connections
            .iter()
            .filter(|(_, pc)| pc.conversation_id == conversation_id)
            .map(|(handle, _)| handle)
            .collect()
    }

    fn transport(&self, handle: RTCPeerConnectionHandle) -> Option<&E::Connection> {
        self.peer_connections
            .lookup(handle)
            .and_then(|pc| pc.transport.as_ref())
    }
}

/// transport_mut is the engine connection of `pc`, or `ErrNoTransport`
/// before `create`.
pub(crate) fn transport_mut<C>(pc: &mut RTCPeerConnection<C>) -> Result<&mut C> {
    pc.transport.as_mut().ok_or(Error::ErrNoTransport)
}

/// report logs the failure of a command whose outcome is not surfaced to the
/// controller. Invalid handles are expected around close races.
pub(crate) fn report(op: &str, handle: impl fmt::Display, result: Result<()>) {
    match result {
        Ok(()) => {}
        Err(err) if err.is_invalid_handle() => debug!("{op}: {handle} {err}"),
        Err(err) => warn!("{op}: {handle} {err}"),
    }
}
