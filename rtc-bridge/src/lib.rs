//! # RTC Bridge - Sans-I/O signaling bridge
//!
//! `rtc-bridge` sits between a call-control core (the *controller*) and a
//! WebRTC transport engine. The controller speaks in small integer handles
//! and plain values; the engine speaks in connections, senders and session
//! descriptions. The bridge keeps the two apart:
//!
//! - connections and data channels live in handle registries, so a handle
//!   released by `close` can never reach a torn-down engine object;
//! - offer and answer creation acquire local media first, reconcile the
//!   outbound senders and only then ask the engine for a description;
//! - session descriptions are rewritten for the engine variant in use (see
//!   [`sdp`]);
//! - candidate gathering is reported complete exactly once per negotiation
//!   round, waiting for relay candidates on every media line when the
//!   variant requires it.
//!
//! ## Driving the bridge
//!
//! [`RTCBridge`] performs no I/O and owns no threads. Commands are plain
//! methods. Everything asynchronous goes through [`sansio::Protocol`]:
//!
//! ```text
//!  controller ──commands──▶ RTCBridge ──requests──▶ TransportEngine / MediaSource
//!       ▲                     │   ▲                           │
//!       └────poll_event───────┘   └──────handle_read──────────┘
//! ```
//!
//! 1. The host implements [`engine::TransportEngine`] for its engine and
//!    [`media_stream::MediaSource`] for its media capture.
//! 2. Engine events are fed back with
//!    `handle_read(RTCBridgeInput::Engine(handle, event))`, media outcomes
//!    with `handle_read(RTCBridgeInput::Media(response))`.
//! 3. Controller callbacks are drained with `poll_event()` after each
//!    command or input.
//!
//! ```no_run
//! use rtc_bridge::bridge::event::{RTCBridgeEvent, RTCBridgeInput};
//! use rtc_bridge::engine::TransportEngine;
//! use rtc_bridge::media_stream::MediaSource;
//! use rtc_bridge::peer_connection::configuration::RTCBridgeConfigurationBuilder;
//! use rtc_bridge::peer_connection::video_state::{RTCCallType, RTCVideoState};
//! use rtc_bridge::sansio::Protocol;
//! use rtc_bridge::RTCBridge;
//!
//! fn call<E: TransportEngine, M: MediaSource>(
//!     engine: E,
//!     media: M,
//!     inputs: Vec<RTCBridgeInput>,
//! ) -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RTCBridgeConfigurationBuilder::new().build();
//!     let mut bridge = RTCBridge::new(config, engine, media);
//!
//!     let pc = bridge.new_connection(1, "conversation");
//!     bridge.add_turn_server(pc, "turn:turn.example.org:3478", "user", "secret");
//!     bridge.create(pc, false)?;
//!     bridge.create_offer(pc, RTCCallType::Normal, RTCVideoState::Stopped);
//!
//!     for input in inputs {
//!         bridge.handle_read(input)?;
//!         while let Some(event) = bridge.poll_event() {
//!             if let RTCBridgeEvent::OnGatheringComplete(_, desc) = event {
//!                 // send desc.sdp to the remote side
//!                 println!("{desc}");
//!             }
//!         }
//!     }
//!
//!     bridge.close(pc);
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! Only [`RTCBridge::create`] returns an error. Every other command treats
//! an unknown handle as a no-op and logs engine failures; failures the
//! controller must act on arrive as events, for example
//! [`RTCLocalDescriptionResult::MediaError`].

#![warn(rust_2018_idioms)]
#![allow(dead_code)]

pub use {sansio, sdp, shared};

pub mod bridge;
pub mod data_channel;
pub mod engine;
pub mod media_stream;
pub mod peer_connection;
pub mod registry;

pub use bridge::RTCBridge;
pub use bridge::event::{RTCBridgeEvent, RTCBridgeInput, RTCLocalDescriptionResult};
