use log::{debug, info, warn};
use shared::error::{Error, Result};

use super::{RTCBridge, report};
use crate::engine::TransportEngine;
use crate::media_stream::{MediaPurpose, MediaRequest, MediaSource, MediaStreamTrack, MediaTicket};
use crate::peer_connection::video_state::RTCVideoState;
use crate::registry::RTCPeerConnectionHandle;

impl<E: TransportEngine, M: MediaSource> RTCBridge<E, M> {
    /// set_mute enables or disables the outbound audio of `handle`. Never
    /// renegotiates.
    pub fn set_mute(&mut self, handle: RTCPeerConnectionHandle, muted: bool) {
        let Some(pc) = self.peer_connections.lookup_mut(handle) else {
            debug!("set_mute: {handle} not found");
            return;
        };
        info!("set_mute: {handle} muted={muted}");
        pc.muted = muted;
        pc.apply_mute();
    }

    pub fn get_mute(&self, handle: RTCPeerConnectionHandle) -> bool {
        self.peer_connections
            .lookup(handle)
            .is_some_and(|pc| pc.muted)
    }

    /// Whether `handle` sends an enabled video track.
    pub fn has_active_video(&self, handle: RTCPeerConnectionHandle) -> bool {
        self.peer_connections
            .lookup(handle)
            .is_some_and(|pc| pc.has_active_video())
    }

    /// set_video_state moves `handle` to `video_state`, acquiring media again
    /// only when the transition needs it.
    pub fn set_video_state(&mut self, handle: RTCPeerConnectionHandle, video_state: RTCVideoState) {
        let result = self.update_video_state(handle, video_state);
        report("set_video_state", handle, result);
    }

    fn update_video_state(
        &mut self,
        handle: RTCPeerConnectionHandle,
        video_state: RTCVideoState,
    ) -> Result<()> {
        let pc = self.peer_connections.get_mut(handle)?;
        info!(
            "set_video_state: {handle} {} -> {video_state}",
            pc.video_state
        );
        if pc.video_state == video_state {
            return Ok(());
        }
        if pc.transport.is_none() {
            return Err(Error::ErrNoTransport);
        }

        let update = pc.needs_media_update(video_state);
        debug!(
            "set_video_state: {handle} call_type={} sending_video={} update={update}",
            pc.call_type, pc.sending_video
        );
        if update {
            let video = video_state.uses_camera();
            let screen_share = video_state.uses_screen_share();
            let request = MediaRequest {
                ticket: MediaTicket {
                    handle,
                    connection_id: pc.id,
                    purpose: MediaPurpose::VideoState,
                },
                conversation_id: pc.conversation_id.clone(),
                audio: true,
                video,
                screen_share,
            };
            if let Err(err) = self.media_source.request_media(request) {
                warn!("set_video_state: {handle} media request failed: {err}");
                return Ok(());
            }
            pc.sending_video = video || screen_share;
        }
        pc.video_state = video_state;
        Ok(())
    }

    /// replace_track swaps `track` in on every connection of the
    /// conversation that already sends a track of the same kind. Returns the
    /// number of connections updated.
    pub fn replace_track(&mut self, conversation_id: &str, track: &MediaStreamTrack) -> usize {
        info!(
            "replace_track: conversation={conversation_id} kind={} id={}",
            track.kind, track.id
        );
        let mut updated = 0;
        for (handle, pc) in self.peer_connections.iter_mut() {
            if pc.conversation_id != conversation_id {
                continue;
            }
            if pc.replace_track(track) {
                updated += 1;
            } else {
                debug!("replace_track: {handle} has no {} sender", track.kind);
            }
        }
        updated
    }
}
