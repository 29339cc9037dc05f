use bytes::Bytes;
use log::{debug, info, warn};
use shared::error::{Error, Result};

use super::event::RTCBridgeEvent;
use super::{RTCBridge, report, transport_mut};
use crate::data_channel::{RTCDataChannel, RTCDataChannelState};
use crate::engine::{RTCDataChannelId, TransportConnection, TransportEngine};
use crate::media_stream::MediaSource;
use crate::registry::{RTCDataChannelHandle, RTCPeerConnectionHandle};

impl<E: TransportEngine, M: MediaSource> RTCBridge<E, M> {
    /// create_data_channel opens a channel on `handle`. Its lifecycle is
    /// reported through [`RTCBridgeEvent::OnDataChannelStateChange`].
    pub fn create_data_channel(
        &mut self,
        handle: RTCPeerConnectionHandle,
        label: &str,
    ) -> Option<RTCDataChannelHandle> {
        info!("create_data_channel: {handle} label={label}");
        let pc = match self.peer_connections.get_mut(handle) {
            Ok(pc) => pc,
            Err(err) => {
                debug!("create_data_channel: {handle} {err}");
                return None;
            }
        };
        let id = match transport_mut(pc).and_then(|transport| transport.create_data_channel(label)) {
            Ok(id) => id,
            Err(err) => {
                warn!("create_data_channel: {handle} {err}");
                return None;
            }
        };

        let dc = self
            .data_channels
            .register(RTCDataChannel::new(handle, pc.id, id, label));
        pc.data_channels.push(dc);
        Some(dc)
    }

    /// on_data_channel registers a channel opened by the remote side.
    pub(crate) fn on_data_channel(
        &mut self,
        handle: RTCPeerConnectionHandle,
        id: RTCDataChannelId,
        label: &str,
    ) -> Result<()> {
        let pc = self.peer_connections.get_mut(handle)?;
        let dc = self
            .data_channels
            .register(RTCDataChannel::new(handle, pc.id, id, label));
        if !pc.data_channels.contains(&dc) {
            pc.data_channels.push(dc);
        }
        info!("{handle}: data channel {dc} established label={label}");
        self.events
            .push_back(RTCBridgeEvent::OnDataChannelEstablished(handle, dc));
        Ok(())
    }

    /// on_data_channel_state mirrors an engine channel state and forwards it.
    /// A channel reported `Closed` is released after the event is queued, so
    /// a later channel reusing its engine id gets a fresh handle.
    pub(crate) fn on_data_channel_state(
        &mut self,
        handle: RTCPeerConnectionHandle,
        id: RTCDataChannelId,
        state: RTCDataChannelState,
    ) -> Result<()> {
        let dc = self.find_data_channel(handle, id)?;
        let data_channel = self.data_channels.get_mut(dc)?;
        debug!(
            "{handle}: data channel {dc} {} -> {state}",
            data_channel.ready_state
        );
        data_channel.ready_state = state;
        self.events
            .push_back(RTCBridgeEvent::OnDataChannelStateChange(handle, dc, state));

        if state == RTCDataChannelState::Closed {
            self.release_data_channel(handle, dc);
        }
        Ok(())
    }

    fn release_data_channel(&mut self, handle: RTCPeerConnectionHandle, dc: RTCDataChannelHandle) {
        debug!("{handle}: data channel {dc} released");
        self.data_channels.release(dc);
        if let Ok(pc) = self.peer_connections.get_mut(handle) {
            pc.data_channels.retain(|&existing| existing != dc);
        }
    }

    pub(crate) fn on_data_channel_message(
        &mut self,
        handle: RTCPeerConnectionHandle,
        id: RTCDataChannelId,
        message: String,
    ) -> Result<()> {
        let dc = self.find_data_channel(handle, id)?;
        self.events
            .push_back(RTCBridgeEvent::OnDataChannelMessage(handle, dc, message));
        Ok(())
    }

    fn find_data_channel(
        &self,
        handle: RTCPeerConnectionHandle,
        id: RTCDataChannelId,
    ) -> Result<RTCDataChannelHandle> {
        let pc = self.peer_connections.get(handle)?;
        self.data_channels
            .find(|dc| dc.connection_id == pc.id && dc.id == id)
            .ok_or(Error::ErrUnknownDataChannel)
    }

    /// Engine id of the channel, or `None` for an unknown handle.
    pub fn data_channel_id(&self, dc: RTCDataChannelHandle) -> Option<RTCDataChannelId> {
        self.data_channels.lookup(dc).map(|data_channel| data_channel.id)
    }

    pub fn data_channel_state(&self, dc: RTCDataChannelHandle) -> Option<RTCDataChannelState> {
        self.data_channels
            .lookup(dc)
            .map(|data_channel| data_channel.ready_state)
    }

    /// data_channel_send sends `data` on an open channel. On a channel that
    /// is not open nothing is sent.
    pub fn data_channel_send(&mut self, dc: RTCDataChannelHandle, data: &[u8]) {
        let result = self.send_data_channel(dc, Bytes::copy_from_slice(data));
        report("data_channel_send", dc, result);
    }

    pub(crate) fn send_data_channel(&mut self, dc: RTCDataChannelHandle, data: Bytes) -> Result<()> {
        let data_channel = self.data_channels.get(dc)?;
        if data_channel.ready_state != RTCDataChannelState::Open {
            return Err(Error::ErrDataChannelNotOpen);
        }

        let (id, connection_id) = (data_channel.id, data_channel.connection_id);
        let pc = self.peer_connections.get_mut(data_channel.peer_connection)?;
        if pc.id != connection_id {
            return Err(Error::ErrInvalidHandle);
        }
        debug!("data_channel_send: {dc} {} bytes", data.len());
        transport_mut(pc)?.send_data_channel(id, data)
    }

    /// data_channel_close starts closing the channel. The final state comes
    /// from the engine.
    pub fn data_channel_close(&mut self, dc: RTCDataChannelHandle) {
        let result = self.close_data_channel(dc);
        report("data_channel_close", dc, result);
    }

    fn close_data_channel(&mut self, dc: RTCDataChannelHandle) -> Result<()> {
        let data_channel = self.data_channels.get_mut(dc)?;
        info!("data_channel_close: {dc} label={}", data_channel.label);
        if matches!(
            data_channel.ready_state,
            RTCDataChannelState::Closing | RTCDataChannelState::Closed
        ) {
            return Ok(());
        }

        let pc = self.peer_connections.get_mut(data_channel.peer_connection)?;
        if pc.id != data_channel.connection_id {
            return Err(Error::ErrInvalidHandle);
        }
        transport_mut(pc)?.close_data_channel(data_channel.id)?;
        data_channel.ready_state = RTCDataChannelState::Closing;
        Ok(())
    }
}
