mod common;

use common::*;
use rtc_bridge::bridge::event::{RTCBridgeEvent, RTCLocalDescriptionResult};
use rtc_bridge::engine::RTCEngineEvent;
use rtc_bridge::media_stream::MediaStream;
use rtc_bridge::peer_connection::configuration::{
    RTCEngineVariant, RTCIceTransportPolicy, RTCOfferOptions,
};
use rtc_bridge::peer_connection::sdp::{RTCSdpType, RTCSessionDescription};
use rtc_bridge::peer_connection::state::RTCSignalingState;
use rtc_bridge::peer_connection::video_state::{RTCCallType, RTCVideoState};
use rtc_bridge::shared::error::Error;

fn local_description(events: &[RTCBridgeEvent]) -> Option<&RTCLocalDescriptionResult> {
    events.iter().find_map(|event| match event {
        RTCBridgeEvent::OnLocalDescription(_, result) => Some(result),
        _ => None,
    })
}

#[test]
fn test_create_offer() {
    let mut bridge = new_bridge(RTCEngineVariant::Default);
    let pc = connect(&mut bridge, "conv");

    bridge.create_offer(pc, RTCCallType::Normal, RTCVideoState::Stopped);

    let request = &bridge.media_source().requests[0];
    assert!(request.audio);
    assert!(!request.video);
    assert!(!request.screen_share);
    assert_eq!(request.conversation_id, "conv");
    assert_eq!(request.ticket.handle(), pc);
    assert!(drain(&mut bridge).is_empty(), "nothing before media arrives");

    respond(&mut bridge, Ok(audio_stream()));
    assert_eq!(
        drain(&mut bridge),
        vec![RTCBridgeEvent::OnGatheringStarted(pc)]
    );
    {
        let connection = bridge.engine().connection(pc);
        let connection = connection.borrow();
        assert_eq!(connection.added_tracks.len(), 1, "tracks reconciled first");
        assert_eq!(
            connection.offers,
            vec![RTCOfferOptions {
                offer_to_receive_video: true
            }]
        );
    }

    engine_event(
        &mut bridge,
        pc,
        RTCEngineEvent::OnDescriptionCreated(Ok(RTCSessionDescription::offer(OFFER_SDP))),
    );
    let events = drain(&mut bridge);
    let result = local_description(&events).expect("local description");
    println!("{result:?}");
    assert_eq!(result.error_code(), 0);
    assert_eq!(result.type_str(), "offer");
    assert!(result.sdp().contains("m=video 9 UDP/TLS/RTP/SAVPF 96\r\n"));
    assert!(result.sdp().contains("m=application 9 UDP/DTLS/SCTP"));
}

#[test]
fn test_create_answer() {
    let mut bridge = new_bridge(RTCEngineVariant::Default);
    let pc = connect(&mut bridge, "conv");

    bridge.create_answer(pc, RTCCallType::Video, RTCVideoState::Started);
    assert!(bridge.media_source().requests[0].video);
    respond(&mut bridge, Ok(audio_video_stream()));

    {
        let connection = bridge.engine().connection(pc);
        let connection = connection.borrow();
        assert_eq!(connection.answers, 1);
        assert!(connection.offers.is_empty());
    }
    assert!(bridge.has_active_video(pc));

    let pc_state = bridge.peer_connection(pc).expect("live");
    assert_eq!(pc_state.call_type(), RTCCallType::Video);
    assert_eq!(pc_state.video_state(), RTCVideoState::Started);
    assert!(pc_state.is_sending_video());

    engine_event(
        &mut bridge,
        pc,
        RTCEngineEvent::OnDescriptionCreated(Ok(RTCSessionDescription::answer("v=0\r\n"))),
    );
    let events = drain(&mut bridge);
    assert_eq!(
        events,
        vec![
            RTCBridgeEvent::OnGatheringStarted(pc),
            RTCBridgeEvent::OnLocalDescription(
                pc,
                RTCLocalDescriptionResult::Ready(RTCSessionDescription::answer("v=0\r\n"))
            ),
        ]
    );
}

#[test]
fn test_media_error_is_distinct_from_sdp_error() {
    let mut bridge = new_bridge(RTCEngineVariant::Default);
    let pc = connect(&mut bridge, "conv");

    bridge.create_offer(pc, RTCCallType::Normal, RTCVideoState::Stopped);
    respond(
        &mut bridge,
        Err(Error::ErrMediaAcquisition("NotAllowedError".to_owned())),
    );
    let events = drain(&mut bridge);
    assert_eq!(events.len(), 1, "no gathering-started on media failure");
    let result = local_description(&events).expect("local description");
    assert_eq!(result.error_code(), 1);
    assert_eq!(result.type_str(), "media-error");
    assert!(result.sdp().contains("NotAllowedError"));
    assert!(bridge.engine().connection(pc).borrow().offers.is_empty());

    bridge
        .engine()
        .connection(pc)
        .borrow_mut()
        .fail_negotiation = Some("bad m-line".to_owned());
    bridge.create_offer(pc, RTCCallType::Normal, RTCVideoState::Stopped);
    respond(&mut bridge, Ok(audio_stream()));
    let events = drain(&mut bridge);
    assert_eq!(events[0], RTCBridgeEvent::OnGatheringStarted(pc));
    let result = local_description(&events).expect("local description");
    assert_eq!(result.error_code(), 1);
    assert_eq!(result.type_str(), "sdp-error");
    assert!(result.sdp().contains("bad m-line"));
}

#[test]
fn test_media_request_rejected_synchronously() {
    let mut bridge = new_bridge(RTCEngineVariant::Default);
    let pc = connect(&mut bridge, "conv");
    bridge.media_source_mut().fail = Some("no devices".to_owned());

    bridge.create_answer(pc, RTCCallType::Normal, RTCVideoState::Stopped);
    let events = drain(&mut bridge);
    assert_eq!(events.len(), 1);
    assert_eq!(
        local_description(&events).map(|result| result.type_str()),
        Some("media-error".to_owned())
    );
}

#[test]
fn test_rejected_media_request_keeps_video_state() {
    let mut bridge = new_bridge(RTCEngineVariant::Default);
    let pc = connect(&mut bridge, "conv");
    bridge.media_source_mut().fail = Some("camera busy".to_owned());

    bridge.create_offer(pc, RTCCallType::Video, RTCVideoState::Started);
    assert_eq!(drain(&mut bridge).len(), 1);
    let connection = bridge.peer_connection(pc).expect("connection");
    assert_eq!(connection.video_state(), RTCVideoState::Stopped);
    assert_eq!(connection.call_type(), RTCCallType::Normal);
    assert!(!connection.is_sending_video());

    // the same state asked again still acquires the camera
    bridge.media_source_mut().fail = None;
    bridge.set_video_state(pc, RTCVideoState::Started);
    let requests = &bridge.media_source().requests;
    assert_eq!(requests.len(), 1);
    assert!(requests[0].video);
    assert_eq!(
        bridge.peer_connection(pc).map(|pc| pc.video_state()),
        Some(RTCVideoState::Started)
    );
}

#[test]
fn test_description_creation_failure() {
    let mut bridge = new_bridge(RTCEngineVariant::Default);
    let pc = connect(&mut bridge, "conv");

    engine_event(
        &mut bridge,
        pc,
        RTCEngineEvent::OnDescriptionCreated(Err(Error::ErrNegotiation(
            "ice restart".to_owned(),
        ))),
    );
    assert_eq!(
        drain(&mut bridge),
        vec![RTCBridgeEvent::OnLocalDescription(
            pc,
            RTCLocalDescriptionResult::SdpError("negotiation failed: ice restart".to_owned())
        )]
    );
}

#[test]
fn test_offer_without_transport() {
    let mut bridge = new_bridge(RTCEngineVariant::Default);
    let pc = bridge.new_connection(1, "conv");

    bridge.create_offer(pc, RTCCallType::Normal, RTCVideoState::Stopped);
    assert!(bridge.media_source().requests.is_empty());
    assert!(drain(&mut bridge).is_empty());
}

#[test]
fn test_firefox_remote_description() {
    let mut bridge = new_bridge(RTCEngineVariant::Firefox);
    let pc = connect(&mut bridge, "conv");

    let remote = "v=0\r\nm=application 5000 DTLS/SCTP 5000\r\na=sctpmap:5000 webrtc-datachannel 1024\r\n";
    bridge.set_remote_description(pc, RTCSdpType::Offer, remote);

    let connection = bridge.engine().connection(pc);
    let applied = connection
        .borrow()
        .remote_description
        .clone()
        .expect("remote description");
    assert_eq!(applied.sdp_type, RTCSdpType::Offer);
    assert_eq!(
        applied.sdp,
        "v=0\r\nm=application 5000 UDP/DTLS/SCTP webrtc-datachannel\r\na=sctp-port:5000\r\n"
    );
}

#[test]
fn test_default_remote_description_passes_through() {
    let mut bridge = new_bridge(RTCEngineVariant::Default);
    let pc = connect(&mut bridge, "conv");

    let remote = "v=0\r\na=sctpmap:5000 webrtc-datachannel 1024\r\n";
    bridge.set_remote_description(pc, RTCSdpType::Answer, remote);
    let connection = bridge.engine().connection(pc);
    assert_eq!(
        connection.borrow().remote_description,
        Some(RTCSessionDescription::answer(remote))
    );
}

#[test]
fn test_rejected_descriptions_are_not_reported() {
    let mut bridge = new_bridge(RTCEngineVariant::Default);
    let pc = connect(&mut bridge, "conv");
    bridge
        .engine()
        .connection(pc)
        .borrow_mut()
        .fail_set_description = Some("malformed".to_owned());

    bridge.set_remote_description(pc, RTCSdpType::Offer, "garbage");
    bridge.set_local_description(pc, RTCSdpType::Answer, "garbage");
    engine_event(
        &mut bridge,
        pc,
        RTCEngineEvent::OnRemoteDescriptionApplied(Err(Error::ErrSetDescription(
            "malformed".to_owned(),
        ))),
    );
    engine_event(
        &mut bridge,
        pc,
        RTCEngineEvent::OnLocalDescriptionApplied(Err(Error::ErrSetDescription(
            "malformed".to_owned(),
        ))),
    );

    assert!(drain(&mut bridge).is_empty());
    assert!(bridge.peer_connection(pc).is_some_and(|pc| pc.has_transport()));
}

#[test]
fn test_get_local_description() {
    let mut bridge = new_bridge(RTCEngineVariant::Default);
    let pc = connect(&mut bridge, "conv");
    assert_eq!(bridge.get_local_description(pc, None), None);

    bridge.set_local_description(pc, RTCSdpType::Offer, OFFER_SDP);
    assert_eq!(
        bridge.get_local_description(pc, None),
        Some(RTCSessionDescription::offer(OFFER_SDP))
    );
    assert_eq!(
        bridge.get_local_description(pc, Some(RTCSdpType::Offer)),
        Some(RTCSessionDescription::offer(OFFER_SDP))
    );
    assert_eq!(
        bridge.get_local_description(pc, Some(RTCSdpType::Answer)),
        None,
        "type mismatch is not available"
    );
}

#[test]
fn test_firefox_local_description() {
    let mut bridge = new_bridge(RTCEngineVariant::Firefox);
    let pc = connect(&mut bridge, "conv");

    bridge.set_local_description(pc, RTCSdpType::Offer, OFFER_SDP);
    let stored = bridge
        .engine()
        .connection(pc)
        .borrow()
        .local_description
        .clone()
        .expect("local description");
    assert!(stored.sdp.contains("m=video 9 "), "placeholder port for the engine");

    let read = bridge
        .get_local_description(pc, Some(RTCSdpType::Offer))
        .expect("local description");
    assert!(read.sdp.contains("m=application 9 DTLS/SCTP webrtc-datachannel\r\n"));
    assert!(!read.sdp.contains("UDP/DTLS/SCTP"));
}

#[test]
fn test_signaling_state() {
    let mut bridge = new_bridge(RTCEngineVariant::Default);
    let pc = connect(&mut bridge, "conv");
    assert_eq!(bridge.signaling_state(pc), RTCSignalingState::Unknown);

    bridge
        .engine()
        .connection(pc)
        .borrow_mut()
        .signaling_state = RTCSignalingState::HaveLocalOffer;
    engine_event(
        &mut bridge,
        pc,
        RTCEngineEvent::OnSignalingStateChange(RTCSignalingState::HaveLocalOffer),
    );
    engine_event(
        &mut bridge,
        pc,
        RTCEngineEvent::OnSignalingStateChange(RTCSignalingState::HaveLocalOffer),
    );

    let events = drain(&mut bridge);
    assert_eq!(events.len(), 2, "every change is forwarded");
    assert_eq!(
        events[0],
        RTCBridgeEvent::OnSignalingStateChange(pc, RTCSignalingState::HaveLocalOffer)
    );
    assert_eq!(bridge.signaling_state(pc), RTCSignalingState::HaveLocalOffer);
    assert_eq!(bridge.signaling_state(pc).code(), 2);
}

#[test]
fn test_negotiation_needed_is_only_logged() {
    let mut bridge = new_bridge(RTCEngineVariant::Default);
    let pc = connect(&mut bridge, "conv");

    engine_event(&mut bridge, pc, RTCEngineEvent::OnNegotiationNeeded);
    assert!(drain(&mut bridge).is_empty());
    assert!(bridge.engine().connection(pc).borrow().offers.is_empty());
}

#[test]
fn test_remote_streams() {
    let mut bridge = new_bridge(RTCEngineVariant::Default);
    let pc = connect(&mut bridge, "conv");
    bridge.set_remote_identity(pc, "user-b", "client-b");

    let streams = vec![MediaStream::new("remote", vec![])];
    engine_event(&mut bridge, pc, RTCEngineEvent::OnTrack(streams.clone()));

    match drain(&mut bridge).as_slice() {
        [RTCBridgeEvent::OnRemoteStreams(event)] => {
            assert_eq!(event.peer_connection, pc);
            assert_eq!(event.conversation_id, "conv");
            assert_eq!(event.remote_user_id, "user-b");
            assert_eq!(event.remote_client_id, "client-b");
            assert_eq!(event.streams, streams);
        }
        events => panic!("unexpected events {events:?}"),
    }
}

#[test]
fn test_create_configuration() {
    let mut bridge = new_bridge(RTCEngineVariant::Default);
    let pc = bridge.new_connection(7, "conv");
    bridge.add_turn_server(pc, "turn:a.example.org:3478", "alice", "one");
    bridge.add_turn_server(pc, "turns:b.example.org:5349", "bob", "two");

    assert_eq!(bridge.create(pc, true), Ok(()));
    let connection = bridge.engine().connection(pc);
    let configuration = connection.borrow().configuration.clone();
    assert_eq!(
        configuration.ice_transport_policy,
        RTCIceTransportPolicy::Relay
    );
    let urls: Vec<_> = configuration
        .ice_servers
        .iter()
        .flat_map(|server| server.urls.clone())
        .collect();
    assert_eq!(
        urls,
        vec!["turn:a.example.org:3478", "turns:b.example.org:5349"]
    );
    assert_eq!(configuration.ice_servers[1].username, "bob");

    assert_eq!(
        bridge.create(pc, false),
        Err(Error::ErrTransportAlreadyCreated)
    );
    assert_eq!(bridge.engine().connections.len(), 1);
    assert_eq!(bridge.peer_connection(pc).map(|pc| pc.self_id()), Some(7));
}

#[test]
fn test_create_failure() {
    let mut bridge = new_bridge(RTCEngineVariant::Default);
    bridge.engine_mut().fail_new_connection = true;
    let pc = bridge.new_connection(1, "conv");

    assert!(bridge.create(pc, false).is_err());
    assert!(bridge.peer_connection(pc).is_some_and(|pc| !pc.has_transport()));
}

#[test]
fn test_set_environment() {
    let mut bridge = new_bridge(RTCEngineVariant::Default);
    bridge.set_environment(RTCEngineVariant::Firefox);
    assert_eq!(bridge.configuration().variant(), RTCEngineVariant::Firefox);

    let pc = connect(&mut bridge, "conv");
    bridge.set_remote_description(pc, RTCSdpType::Offer, "a=sctpmap:5000 webrtc-datachannel 1024\r\n");
    assert_eq!(
        bridge
            .engine()
            .connection(pc)
            .borrow()
            .remote_description
            .as_ref()
            .map(|desc| desc.sdp.clone()),
        Some("a=sctp-port:5000\r\n".to_owned())
    );
}
