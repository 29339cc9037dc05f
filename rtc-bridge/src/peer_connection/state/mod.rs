//! Engine states as the controller sees them.
//!
//! Signaling and gathering states carry the numeric codes the controller
//! expects (`From<u8>` and `code()`); connection states cross the boundary as
//! their W3C strings (`Display`).

pub mod ice_connection_state;
pub mod ice_gathering_state;
pub mod peer_connection_state;
pub mod signaling_state;

pub use ice_connection_state::RTCIceConnectionState;
pub use ice_gathering_state::RTCIceGatheringState;
pub use peer_connection_state::RTCPeerConnectionState;
pub use signaling_state::RTCSignalingState;
