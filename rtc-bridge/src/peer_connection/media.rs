use log::{debug, info, warn};

use crate::engine::{RTCRtpSenderId, TransportConnection};
use crate::media_stream::{MediaStream, MediaStreamTrack, RTCTrackKind};
use crate::peer_connection::RTCPeerConnection;
use crate::peer_connection::video_state::{RTCCallType, RTCVideoState};

impl<C: TransportConnection> RTCPeerConnection<C> {
    /// needs_media_update decides whether moving to `next` warrants asking
    /// for media again. Only meaningful when `next` differs from the current
    /// state.
    pub(crate) fn needs_media_update(&self, next: RTCVideoState) -> bool {
        let active = next.is_active();
        let video_call = self.call_type == RTCCallType::Video;

        // leaving screen share
        self.video_state == RTCVideoState::ScreenShare
            // starting video that is not flowing yet
            || (active && (!video_call || !self.sending_video))
            // stopping video that may be flowing
            || (!active && (video_call || self.sending_video))
            || next == RTCVideoState::ScreenShare
    }

    /// apply_mute enables or disables every outbound audio track according
    /// to the mute flag. Never renegotiates.
    pub(crate) fn apply_mute(&mut self) {
        let enabled = !self.muted;
        let Some(transport) = self.transport.as_mut() else {
            return;
        };

        for sender in transport.senders() {
            let Some(track) = sender.track.as_ref() else {
                continue;
            };
            if track.kind != RTCTrackKind::Audio || track.enabled == enabled {
                continue;
            }
            if let Err(err) = transport.set_track_enabled(sender.id, enabled) {
                warn!("set_mute: sender {} failed: {err}", sender.id);
            }
        }
    }

    /// update_tracks reconciles freshly acquired local media with the
    /// existing senders without removing any of them:
    ///
    /// 1. senders whose track kind is in `stream` are enabled, the others
    ///    disabled;
    /// 2. each new track goes onto a sender of the same kind, preferring one
    ///    without a track, keeping that sender's enabled flag; without such
    ///    a sender it is added on a new one;
    /// 3. the mute flag is applied again.
    pub(crate) fn update_tracks(&mut self, stream: &MediaStream) {
        info!(
            "update_tracks: conversation={} tracks={}",
            self.conversation_id,
            stream.tracks.len()
        );

        let muted = self.muted;
        let Some(transport) = self.transport.as_mut() else {
            return;
        };

        for sender in transport.senders() {
            let Some(track) = sender.track.as_ref() else {
                continue;
            };
            let keep = stream.has_kind(track.kind);
            debug!(
                "update_tracks: sender {} kind={} keep={keep}",
                sender.id, track.kind
            );
            if track.enabled != keep {
                if let Err(err) = transport.set_track_enabled(sender.id, keep) {
                    warn!("update_tracks: sender {} failed: {err}", sender.id);
                }
            }
        }

        let senders = transport.senders();
        let mut claimed: Vec<RTCRtpSenderId> = vec![];
        for track in &stream.tracks {
            let mut track = track.clone();
            match track.kind {
                RTCTrackKind::Video => {
                    track.enabled = true;
                    self.sending_video = true;
                }
                _ => track.enabled = !muted,
            }

            let slot = senders
                .iter()
                .filter(|sender| sender.kind == track.kind && !claimed.contains(&sender.id))
                .min_by_key(|sender| sender.track.is_some());

            match slot {
                Some(sender) => {
                    if let Some(previous) = sender.track.as_ref() {
                        track.enabled = previous.enabled;
                    }
                    debug!(
                        "update_tracks: replacing on sender {} kind={} enabled={}",
                        sender.id, track.kind, track.enabled
                    );
                    claimed.push(sender.id);
                    if let Err(err) = transport.replace_track(sender.id, track) {
                        warn!("update_tracks: replace on sender {} failed: {err}", sender.id);
                    }
                }
                None => {
                    info!("update_tracks: adding track of kind={}", track.kind);
                    match transport.add_track(track, &stream.id) {
                        Ok(id) => claimed.push(id),
                        Err(err) => warn!("update_tracks: add_track failed: {err}"),
                    }
                }
            }
        }

        self.apply_mute();
    }

    /// replace_track puts `track` on the sender currently carrying a track
    /// of the same kind, keeping that sender's enabled flag. Returns whether
    /// such a sender was found.
    pub(crate) fn replace_track(&mut self, track: &MediaStreamTrack) -> bool {
        let Some(transport) = self.transport.as_mut() else {
            return false;
        };

        let Some((id, enabled)) = transport.senders().into_iter().find_map(|sender| {
            let current = sender.track?;
            (current.kind == track.kind).then_some((sender.id, current.enabled))
        }) else {
            return false;
        };

        let mut track = track.clone();
        track.enabled = enabled;
        debug!("replace_track: kind={} enabled={enabled}", track.kind);
        match transport.replace_track(id, track) {
            Ok(()) => true,
            Err(err) => {
                warn!("replace_track: sender {id} failed: {err}");
                false
            }
        }
    }

    /// Whether any sender carries an enabled video track.
    pub(crate) fn has_active_video(&self) -> bool {
        self.transport.as_ref().is_some_and(|transport| {
            transport
                .senders()
                .iter()
                .any(|sender| sender.kind == RTCTrackKind::Video && sender.is_active())
        })
    }
}
