use log::{debug, info, warn};
use shared::error::{Error, Result};

use super::event::{RTCBridgeEvent, RTCLocalDescriptionResult};
use super::{RTCBridge, report, transport_mut};
use crate::engine::{TransportConnection, TransportEngine};
use crate::media_stream::{MediaPurpose, MediaRequest, MediaResponse, MediaSource, MediaTicket};
use crate::peer_connection::configuration::RTCOfferOptions;
use crate::peer_connection::sdp::{RTCSdpType, RTCSessionDescription};
use crate::peer_connection::video_state::{RTCCallType, RTCVideoState};
use crate::registry::RTCPeerConnectionHandle;

impl<E: TransportEngine, M: MediaSource> RTCBridge<E, M> {
    /// create_offer acquires local media, reconciles the senders and asks
    /// the engine for an offer. The outcome arrives as
    /// [`RTCBridgeEvent::OnLocalDescription`].
    pub fn create_offer(
        &mut self,
        handle: RTCPeerConnectionHandle,
        call_type: RTCCallType,
        video_state: RTCVideoState,
    ) {
        info!("create_offer: {handle} call_type={call_type} video_state={video_state}");
        let result = self.request_description(handle, call_type, video_state, MediaPurpose::Offer);
        report("create_offer", handle, result);
    }

    /// create_answer is [`RTCBridge::create_offer`] for the answering side.
    pub fn create_answer(
        &mut self,
        handle: RTCPeerConnectionHandle,
        call_type: RTCCallType,
        video_state: RTCVideoState,
    ) {
        info!("create_answer: {handle} call_type={call_type} video_state={video_state}");
        let result = self.request_description(handle, call_type, video_state, MediaPurpose::Answer);
        report("create_answer", handle, result);
    }

    fn request_description(
        &mut self,
        handle: RTCPeerConnectionHandle,
        call_type: RTCCallType,
        video_state: RTCVideoState,
        purpose: MediaPurpose,
    ) -> Result<()> {
        let pc = self.peer_connections.get_mut(handle)?;
        if pc.transport.is_none() {
            return Err(Error::ErrNoTransport);
        }

        let video = video_state.uses_camera();
        let screen_share = video_state.uses_screen_share();
        let previous = (pc.call_type, pc.video_state, pc.sending_video);
        pc.call_type = call_type;
        pc.video_state = video_state;
        pc.sending_video = video || screen_share;

        let request = MediaRequest {
            ticket: MediaTicket {
                handle,
                connection_id: pc.id,
                purpose,
            },
            conversation_id: pc.conversation_id.clone(),
            audio: true,
            video,
            screen_share,
        };
        if let Err(err) = self.media_source.request_media(request) {
            warn!("{handle}: media request failed: {err}");
            // nothing was acquired, so a later set_video_state must not see
            // the requested state as current
            (pc.call_type, pc.video_state, pc.sending_video) = previous;
            self.events.push_back(RTCBridgeEvent::OnLocalDescription(
                handle,
                RTCLocalDescriptionResult::MediaError(err.to_string()),
            ));
        }
        Ok(())
    }

    /// handle_media_response continues the flow that requested the media.
    /// Responses for connections closed in the meantime are dropped.
    pub(crate) fn handle_media_response(&mut self, response: MediaResponse) -> Result<()> {
        let MediaResponse { ticket, result } = response;
        let handle = ticket.handle;
        let pc = self.peer_connections.get_mut(handle)?;
        if pc.id != ticket.connection_id {
            return Err(Error::ErrInvalidHandle);
        }
        if pc.transport.is_none() {
            return Err(Error::ErrNoTransport);
        }

        let stream = match (ticket.purpose, result) {
            (_, Ok(stream)) => stream,
            (MediaPurpose::VideoState, Err(err)) => {
                warn!("{handle}: media for video state failed: {err}");
                return Ok(());
            }
            (_, Err(err)) => {
                warn!("{handle}: media acquisition failed: {err}");
                self.events.push_back(RTCBridgeEvent::OnLocalDescription(
                    handle,
                    RTCLocalDescriptionResult::MediaError(err.to_string()),
                ));
                return Ok(());
            }
        };

        pc.update_tracks(&stream);
        if ticket.purpose == MediaPurpose::VideoState {
            return Ok(());
        }

        pc.gathering.reset();
        self.events
            .push_back(RTCBridgeEvent::OnGatheringStarted(handle));

        let transport = transport_mut(pc)?;
        let result = if ticket.purpose == MediaPurpose::Offer {
            transport.create_offer(RTCOfferOptions {
                offer_to_receive_video: true,
            })
        } else {
            transport.create_answer()
        };
        if let Err(err) = result {
            warn!("{handle}: {:?} creation failed: {err}", ticket.purpose);
            self.events.push_back(RTCBridgeEvent::OnLocalDescription(
                handle,
                RTCLocalDescriptionResult::SdpError(err.to_string()),
            ));
        }
        Ok(())
    }

    /// on_description_created reports the engine's offer or answer,
    /// normalized for the wire.
    pub(crate) fn on_description_created(
        &mut self,
        handle: RTCPeerConnectionHandle,
        result: Result<RTCSessionDescription>,
    ) {
        let result = match result {
            Ok(desc) => {
                let sdp = self.configuration.variant.created_description(&desc.sdp);
                let desc = RTCSessionDescription::new(desc.sdp_type, sdp);
                info!("{handle}: {} created m=[{}]", desc.sdp_type, desc.media_summary());
                RTCLocalDescriptionResult::Ready(desc)
            }
            Err(err) => {
                warn!("{handle}: description creation failed: {err}");
                RTCLocalDescriptionResult::SdpError(err.to_string())
            }
        };
        self.events
            .push_back(RTCBridgeEvent::OnLocalDescription(handle, result));
    }

    /// set_remote_description hands the remote description to the engine.
    /// Rejections are logged only.
    pub fn set_remote_description(
        &mut self,
        handle: RTCPeerConnectionHandle,
        sdp_type: RTCSdpType,
        sdp: &str,
    ) {
        info!("set_remote_description: {handle} type={sdp_type}");
        let variant = self.configuration.variant;
        let result = self.peer_connections.get_mut(handle).and_then(|pc| {
            let desc = RTCSessionDescription::new(sdp_type, variant.remote_description(sdp));
            debug!("set_remote_description: {handle} m=[{}]", desc.media_summary());
            transport_mut(pc)?.set_remote_description(desc)
        });
        report("set_remote_description", handle, result);
    }

    /// set_local_description hands a local description back to the engine.
    /// Rejections are logged only.
    pub fn set_local_description(
        &mut self,
        handle: RTCPeerConnectionHandle,
        sdp_type: RTCSdpType,
        sdp: &str,
    ) {
        info!("set_local_description: {handle} type={sdp_type}");
        let variant = self.configuration.variant;
        let result = self.peer_connections.get_mut(handle).and_then(|pc| {
            let desc =
                RTCSessionDescription::new(sdp_type, variant.local_description_to_engine(sdp));
            transport_mut(pc)?.set_local_description(desc)
        });
        match result {
            Err(err) if !err.is_invalid_handle() => {
                info!("set_local_description: {handle} failed: {err}")
            }
            result => report("set_local_description", handle, result),
        }
    }

    pub(crate) fn on_remote_description_applied(
        &mut self,
        handle: RTCPeerConnectionHandle,
        result: Result<()>,
    ) {
        match result {
            Ok(()) => debug!("{handle}: remote description applied"),
            Err(err) => warn!("{handle}: set remote description failed: {err}"),
        }
    }

    pub(crate) fn on_local_description_applied(
        &mut self,
        handle: RTCPeerConnectionHandle,
        result: Result<()>,
    ) {
        match result {
            Ok(()) => debug!("{handle}: local description applied"),
            Err(err) => info!("{handle}: set local description failed: {err}"),
        }
    }

    /// get_local_description returns the engine's current local description
    /// formatted for the wire. With `sdp_type` set, a description of another
    /// type is not returned.
    pub fn get_local_description(
        &self,
        handle: RTCPeerConnectionHandle,
        sdp_type: Option<RTCSdpType>,
    ) -> Option<RTCSessionDescription> {
        match self.local_description(handle, sdp_type) {
            Ok(desc) => Some(desc),
            Err(Error::ErrTypeMismatch) => {
                warn!("get_local_description: {handle} wrong type, expected {sdp_type:?}");
                None
            }
            Err(err) => {
                debug!("get_local_description: {handle} {err}");
                None
            }
        }
    }

    pub(crate) fn local_description(
        &self,
        handle: RTCPeerConnectionHandle,
        sdp_type: Option<RTCSdpType>,
    ) -> Result<RTCSessionDescription> {
        let pc = self.peer_connections.get(handle)?;
        let transport = pc.transport.as_ref().ok_or(Error::ErrNoTransport)?;
        let desc = transport
            .local_description()
            .ok_or(Error::ErrNoLocalDescription)?;
        if sdp_type.is_some_and(|expected| expected != desc.sdp_type) {
            return Err(Error::ErrTypeMismatch);
        }

        let sdp = self
            .configuration
            .variant
            .local_description_from_engine(&desc.sdp);
        Ok(RTCSessionDescription::new(desc.sdp_type, sdp))
    }
}
