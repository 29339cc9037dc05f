use log::{debug, info};
use shared::error::{Error, Result};

use super::RTCBridge;
use super::event::{RTCBridgeEvent, RTCRemoteStreamsEvent};
use crate::data_channel::RTCDataChannelState;
use crate::engine::{RTCEngineEvent, TransportEngine};
use crate::media_stream::MediaSource;
use crate::peer_connection::state::RTCIceGatheringState;
use crate::peer_connection::transport::RTCIceCandidate;
use crate::registry::RTCPeerConnectionHandle;

impl<E: TransportEngine, M: MediaSource> RTCBridge<E, M> {
    /// handle_engine_event applies one event of the engine connection of
    /// `handle`. Events for a closed connection are stale.
    pub(crate) fn handle_engine_event(
        &mut self,
        handle: RTCPeerConnectionHandle,
        event: RTCEngineEvent,
    ) -> Result<()> {
        let pc = self.peer_connections.get(handle)?;
        if pc.transport.is_none() {
            return Err(Error::ErrNoTransport);
        }

        match event {
            RTCEngineEvent::OnSignalingStateChange(state) => {
                info!("{handle}: signaling state {state}");
                self.events
                    .push_back(RTCBridgeEvent::OnSignalingStateChange(handle, state));
            }
            RTCEngineEvent::OnIceGatheringStateChange(state) => {
                self.on_ice_gathering_state_change(handle, state)?
            }
            RTCEngineEvent::OnIceCandidate(candidate) => {
                self.on_ice_candidate(handle, candidate)?
            }
            RTCEngineEvent::OnIceConnectionStateChange(state) => {
                info!("{handle}: ice connection state {state}");
                self.events
                    .push_back(RTCBridgeEvent::OnConnectionStateChange(handle, state));
                self.peer_connections.get_mut(handle)?.apply_mute();
            }
            RTCEngineEvent::OnNegotiationNeeded => {
                info!("{handle}: negotiation needed");
            }
            RTCEngineEvent::OnTrack(streams) => {
                for stream in &streams {
                    info!(
                        "{handle}: remote stream {} with {} tracks",
                        stream.id,
                        stream.tracks.len()
                    );
                }
                self.events
                    .push_back(RTCBridgeEvent::OnRemoteStreams(RTCRemoteStreamsEvent {
                        peer_connection: handle,
                        conversation_id: pc.conversation_id.clone(),
                        remote_user_id: pc.remote_user_id.clone(),
                        remote_client_id: pc.remote_client_id.clone(),
                        streams,
                    }));
            }
            RTCEngineEvent::OnDataChannel(id, label) => self.on_data_channel(handle, id, &label)?,
            RTCEngineEvent::OnDataChannelOpen(id) => {
                self.on_data_channel_state(handle, id, RTCDataChannelState::Open)?
            }
            RTCEngineEvent::OnDataChannelClose(id) => {
                self.on_data_channel_state(handle, id, RTCDataChannelState::Closed)?
            }
            RTCEngineEvent::OnDataChannelError(id) => {
                self.on_data_channel_state(handle, id, RTCDataChannelState::Error)?
            }
            RTCEngineEvent::OnDataChannelMessage(id, message) => {
                self.on_data_channel_message(handle, id, message)?
            }
            RTCEngineEvent::OnDescriptionCreated(result) => {
                self.on_description_created(handle, result)
            }
            RTCEngineEvent::OnLocalDescriptionApplied(result) => {
                self.on_local_description_applied(handle, result)
            }
            RTCEngineEvent::OnRemoteDescriptionApplied(result) => {
                self.on_remote_description_applied(handle, result)
            }
        }
        Ok(())
    }

    fn on_ice_gathering_state_change(
        &mut self,
        handle: RTCPeerConnectionHandle,
        state: RTCIceGatheringState,
    ) -> Result<()> {
        info!("{handle}: ice gathering state {state}");
        let pc = self.peer_connections.get_mut(handle)?;
        if state == RTCIceGatheringState::Complete && pc.gathering.on_engine_complete() {
            self.complete_gathering(handle)?;
        }
        Ok(())
    }

    fn on_ice_candidate(
        &mut self,
        handle: RTCPeerConnectionHandle,
        candidate: Option<RTCIceCandidate>,
    ) -> Result<()> {
        match candidate.as_ref() {
            Some(candidate) => debug!(
                "{handle}: candidate mline={:?} type={}",
                candidate.sdp_mline_index,
                candidate.candidate_type()
            ),
            None => debug!("{handle}: end of candidates"),
        }

        let policy = self.configuration.variant.gathering_policy();
        let pc = self.peer_connections.get_mut(handle)?;
        if pc.gathering.on_candidate(policy, candidate.as_ref()) {
            self.complete_gathering(handle)?;
        }
        Ok(())
    }

    /// complete_gathering reports the current local description. Without
    /// one nothing is reported and the round stays open.
    fn complete_gathering(&mut self, handle: RTCPeerConnectionHandle) -> Result<()> {
        let desc = match self.local_description(handle, None) {
            Ok(desc) => desc,
            Err(Error::ErrNoLocalDescription) => {
                debug!("{handle}: gathering done before a local description was set");
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        let pc = self.peer_connections.get_mut(handle)?;
        debug!(
            "{handle}: gathering complete, relay lines {:?}",
            pc.gathering.lines().collect::<Vec<_>>()
        );
        pc.gathering.complete();
        self.events
            .push_back(RTCBridgeEvent::OnGatheringComplete(handle, desc));
        Ok(())
    }
}
