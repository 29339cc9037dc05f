use std::time::Instant;

use log::{debug, warn};
use shared::error::{Error, Result, flatten_errs};

use super::RTCBridge;
use super::event::{RTCBridgeEvent, RTCBridgeInput};
use crate::data_channel::RTCDataChannelOutbound;
use crate::engine::TransportEngine;
use crate::media_stream::MediaSource;

impl<E: TransportEngine, M: MediaSource> sansio::Protocol<RTCBridgeInput, RTCDataChannelOutbound, ()>
    for RTCBridge<E, M>
{
    type Rout = ();
    type Wout = ();
    type Eout = RTCBridgeEvent;
    type Error = Error;
    type Time = Instant;

    /// handle_read applies an engine event or a media response. Input for a
    /// closed connection is dropped.
    fn handle_read(&mut self, msg: RTCBridgeInput) -> Result<()> {
        let result = match msg {
            RTCBridgeInput::Engine(handle, event) => self.handle_engine_event(handle, event),
            RTCBridgeInput::Media(response) => self.handle_media_response(response),
        };

        match result {
            Err(
                err @ (Error::ErrInvalidHandle
                | Error::ErrNoTransport
                | Error::ErrUnknownDataChannel),
            ) => {
                debug!("dropping stale input: {err}");
                Ok(())
            }
            result => result,
        }
    }

    fn poll_read(&mut self) -> Option<Self::Rout> {
        None
    }

    /// handle_write is [`RTCBridge::data_channel_send`] for hosts driving
    /// the bridge as a protocol.
    fn handle_write(&mut self, msg: RTCDataChannelOutbound) -> Result<()> {
        match self.send_data_channel(msg.data_channel, msg.data) {
            Err(Error::ErrInvalidHandle | Error::ErrDataChannelNotOpen) => {
                warn!("data channel {} is not open", msg.data_channel);
                Ok(())
            }
            result => result,
        }
    }

    fn poll_write(&mut self) -> Option<Self::Wout> {
        None
    }

    fn handle_event(&mut self, _evt: ()) -> Result<()> {
        Ok(())
    }

    fn poll_event(&mut self) -> Option<Self::Eout> {
        self.events.pop_front()
    }

    fn handle_timeout(&mut self, _now: Self::Time) -> Result<()> {
        Ok(())
    }

    fn poll_timeout(&mut self) -> Option<Self::Time> {
        None
    }

    /// close closes every live connection.
    fn close(&mut self) -> Result<()> {
        let mut errs = vec![];
        for handle in self.peer_connections.handles() {
            if let Err(err) = self.close_peer_connection(handle) {
                errs.push(err);
            }
        }
        flatten_errs(errs)
    }
}
