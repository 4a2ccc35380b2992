//! End-to-end engine tests over real sockets on the loopback interface.
//!
//! Each test uses its own non-default port so the suite can run in
//! parallel without colliding on a bind.

use std::net::{Ipv4Addr, UdpSocket};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use lightwire_core::artnet::packets::DmxPacket;
use lightwire_core::engine::EngineOptions;
use lightwire_core::rdm::packets::discovery_state;
use lightwire_core::{
    ArtNetEngine, ArtNetPacket, DmxFrame, DmxTarget, EngineEvent, RdmEndPoint, RdmPacket,
    RdmTarget, UId,
};

const LOCALHOST: Ipv4Addr = Ipv4Addr::new(127, 0, 0, 1);

fn engine_on_port(port: u16) -> ArtNetEngine {
    let options = EngineOptions {
        port,
        ..EngineOptions::default()
    };
    ArtNetEngine::with_options(UId::new(0x02ac, 0x0000_0001), options)
}

fn wait_until(deadline: Duration, mut check: impl FnMut() -> bool) -> bool {
    let start = Instant::now();
    while start.elapsed() < deadline {
        if check() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    false
}

#[derive(Default)]
struct RecordingDmxTarget {
    frames: Mutex<Vec<DmxFrame>>,
}

impl DmxTarget for RecordingDmxTarget {
    fn on_receive_dmx(&self, _universe: u16, frame: &DmxFrame) {
        self.frames.lock().unwrap().push(frame.clone());
    }
}

#[test]
fn receives_and_dispatches_dmx_from_a_peer() {
    let port = 20654;
    let engine = engine_on_port(port);
    let events = engine.subscribe();
    let target = Arc::new(RecordingDmxTarget::default());
    engine.register_dmx_target(target.clone());
    engine.add_filter(7);

    engine.open(LOCALHOST, None, None).expect("open engine");
    assert!(engine.is_open());
    assert_eq!(engine.broadcast_address(), Some(Ipv4Addr::BROADCAST));

    let sender = UdpSocket::bind((LOCALHOST, 0)).expect("bind sender");
    let mut dmx = DmxPacket::new(7, vec![9, 8, 7, 6]).expect("dmx packet");
    dmx.sequence = 3;
    let bytes = ArtNetPacket::Dmx(dmx).to_bytes();
    sender.send_to(&bytes, (LOCALHOST, port)).expect("send dmx");

    let event = events
        .recv_timeout(Duration::from_secs(2))
        .expect("packet event");
    match event {
        EngineEvent::PacketReceived { packet, .. } => {
            assert!(matches!(packet, ArtNetPacket::Dmx(_)));
        }
        other => panic!("expected packet event, got {other:?}"),
    }

    assert!(wait_until(Duration::from_secs(2), || {
        !target.frames.lock().unwrap().is_empty()
    }));
    let frames = target.frames.lock().unwrap();
    assert_eq!(frames[0].universe, 7);
    assert_eq!(frames[0].sequence, 3);
    assert_eq!(frames[0].data, vec![9, 8, 7, 6]);
    drop(frames);

    let stats = engine.universe_stats();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].packets(), 1);
    assert!(engine.last_packet().is_some());

    engine.close();
    assert!(!engine.is_open());
}

#[test]
fn rdm_send_raises_sent_event_and_self_receive_is_dropped() {
    let port = 20655;
    let engine = engine_on_port(port);
    let events = engine.subscribe();
    engine.open(LOCALHOST, None, None).expect("open engine");

    // Target the engine's own endpoint: the sent event must fire, and the
    // self-received carrier must be dropped by loopback protection.
    let target = RdmEndPoint {
        ip: LOCALHOST,
        universe: 0x0102,
    };
    let request = RdmPacket::from(discovery_state::Get { endpoint_id: 1 });
    let device = UId::new(0x1234, 0x0000_0042);
    engine
        .send_rdm(request, target, RdmTarget::Device(device))
        .expect("send rdm");

    let event = events
        .recv_timeout(Duration::from_secs(2))
        .expect("sent event");
    match event {
        EngineEvent::RdmSent { packet, .. } => {
            assert_eq!(packet.header.destination_id, device);
            assert_eq!(packet.header.source_id, engine.rdm_id());
        }
        other => panic!("expected sent event, got {other:?}"),
    }

    // No further event: the carrier the engine sent to itself never gets
    // past the loopback filter.
    assert!(events.recv_timeout(Duration::from_millis(400)).is_err());

    engine.close();
}
