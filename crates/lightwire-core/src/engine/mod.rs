//! UDP transport engine.
//!
//! Owns the socket and a dedicated receive thread: datagrams are received
//! strictly one at a time, decoded, dispatched synchronously, and the loop
//! re-arms. An error in decode or dispatch is reported through the event
//! channel and never stops the loop. Sends may come from any thread while
//! a receive is pending. All shared mutable state (filters, statistics,
//! listener registries, subscriber channels) sits behind one
//! mutual-exclusion boundary per engine instance.

mod error;
mod events;
mod stats;

pub use error::EngineError;
pub use events::{
    DmxFrame, DmxTarget, EngineEvent, SocketConfiguration, TimecodeSource, TimecodeTarget,
};
pub use stats::{UniverseInfo, UniverseInfoSnapshot};

use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use time::OffsetDateTime;

use crate::artnet::packet::CustomPacketFn;
use crate::artnet::packets::{RdmCarrierPacket, RdmSubPacket};
use crate::artnet::{ArtNetPacket, OpCode, layout};
use crate::io::BinaryReader;
use crate::rdm::{RdmPacket, RdmTarget as RdmTargetId, UId};

/// Largest datagram the receive loop accepts.
const MAX_DATAGRAM_SIZE: usize = 65536;

/// Options applied when opening the engine.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// UDP port to bind and address peers on; the protocol fixes 6454.
    pub port: u16,
    /// How often the receive loop checks the shutdown flag.
    pub read_timeout: Duration,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            port: layout::PORT,
            read_timeout: Duration::from_millis(100),
        }
    }
}

/// Remote endpoint of a device-management transaction: the node's address
/// plus the universe its responder listens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RdmEndPoint {
    pub ip: Ipv4Addr,
    pub universe: u16,
}

/// Broadcast address for a local interface: the address OR-ed with the
/// complement of the subnet mask, or all-ones when no mask is known.
pub fn broadcast_address(local_ip: Ipv4Addr, subnet_mask: Option<Ipv4Addr>) -> Ipv4Addr {
    match subnet_mask {
        Some(mask) => {
            let ip = local_ip.octets();
            let mask = mask.octets();
            Ipv4Addr::new(
                ip[0] | !mask[0],
                ip[1] | !mask[1],
                ip[2] | !mask[2],
                ip[3] | !mask[3],
            )
        }
        None => Ipv4Addr::BROADCAST,
    }
}

/// Protocol engine over one UDP socket, usable by a controller or a node.
///
/// Lifecycle is Closed → Listening → Closed: [`open`](Self::open) binds
/// the endpoint and starts the receive loop, [`close`](Self::close) stops
/// it within one loop iteration.
pub struct ArtNetEngine {
    shared: Arc<EngineShared>,
}

impl Default for ArtNetEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtNetEngine {
    pub fn new() -> Self {
        Self::with_rdm_id(UId::EMPTY)
    }

    /// Engine that stamps outgoing device-management requests with
    /// `rdm_id` as the source identifier.
    pub fn with_rdm_id(rdm_id: UId) -> Self {
        Self::with_options(rdm_id, EngineOptions::default())
    }

    pub fn with_options(rdm_id: UId, options: EngineOptions) -> Self {
        Self {
            shared: Arc::new(EngineShared {
                rdm_id,
                options,
                running: AtomicBool::new(false),
                state: Mutex::new(None),
                registry: Mutex::new(Registry::default()),
                last_packet: Mutex::new(None),
                listen_config: Mutex::new(None),
                custom_creator: Mutex::new(None),
            }),
        }
    }

    pub fn rdm_id(&self) -> UId {
        self.shared.rdm_id
    }

    /// Install the hook consulted for opcodes outside the dispatch table.
    pub fn set_custom_packet_creator<F>(&self, creator: F)
    where
        F: Fn(u16, &[u8]) -> Option<ArtNetPacket> + Send + Sync + 'static,
    {
        *lock(&self.shared.custom_creator) = Some(Box::new(creator));
    }

    /// Install the socket configuration applied on the next `open`.
    pub fn configure_listen(&self, config: Box<dyn SocketConfiguration>) {
        *lock(&self.shared.listen_config) = Some(config);
    }

    /// Bind the local endpoint, enable broadcast and start the receive
    /// loop. `bind_address` overrides the bound interface while `local_ip`
    /// still identifies this engine for loopback protection and broadcast
    /// computation.
    pub fn open(
        &self,
        local_ip: Ipv4Addr,
        subnet_mask: Option<Ipv4Addr>,
        bind_address: Option<Ipv4Addr>,
    ) -> Result<(), EngineError> {
        let mut state = lock(&self.shared.state);
        if state.is_some() {
            return Err(EngineError::AlreadyOpen);
        }

        let port = self.shared.options.port;
        let bind_ip = bind_address.unwrap_or(local_ip);
        let socket = UdpSocket::bind(SocketAddr::from((bind_ip, port)))?;
        let listen_config = lock(&self.shared.listen_config);
        if let Some(config) = listen_config.as_ref() {
            config.configure(&socket)?;
        }
        drop(listen_config);
        socket.set_broadcast(true)?;
        socket.set_read_timeout(Some(self.shared.options.read_timeout))?;

        let socket = Arc::new(socket);
        let local_endpoint = SocketAddr::from((local_ip, port));
        self.shared.running.store(true, Ordering::SeqCst);

        let shared = Arc::clone(&self.shared);
        let loop_socket = Arc::clone(&socket);
        let join = thread::Builder::new()
            .name("artnet-recv".to_string())
            .spawn(move || run_receive_loop(shared, loop_socket, local_endpoint))
            .inspect_err(|_| self.shared.running.store(false, Ordering::SeqCst))?;

        *state = Some(OpenState {
            socket,
            local_ip,
            subnet_mask,
            local_endpoint,
            join: Some(join),
        });
        log::info!("engine listening on {bind_ip}:{port}");
        Ok(())
    }

    /// Stop the receive loop and release the socket. The loop winds down
    /// at most one iteration after this returns the flag.
    pub fn close(&self) {
        self.shared.running.store(false, Ordering::SeqCst);
        let state = lock(&self.shared.state).take();
        if let Some(mut state) = state {
            if let Some(join) = state.join.take() {
                let _ = join.join();
            }
            log::info!("engine closed");
        }
    }

    pub fn is_open(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }

    /// When a packet last arrived, regardless of whether it decoded.
    pub fn last_packet(&self) -> Option<OffsetDateTime> {
        *lock(&self.shared.last_packet)
    }

    /// Broadcast address derived from the open socket's interface, if
    /// listening.
    pub fn broadcast_address(&self) -> Option<Ipv4Addr> {
        let state = lock(&self.shared.state);
        state
            .as_ref()
            .map(|open| broadcast_address(open.local_ip, open.subnet_mask))
    }

    /// New subscription channel receiving every engine event. Dropping
    /// the receiver unsubscribes.
    pub fn subscribe(&self) -> Receiver<EngineEvent> {
        let (tx, rx) = crossbeam_channel::unbounded();
        lock(&self.shared.registry).subscribers.push(tx);
        rx
    }

    /// Accept DMX for `universe` and start a zeroed statistics entry.
    /// Adding an already-filtered universe is a no-op.
    pub fn add_filter(&self, universe: u16) {
        let mut registry = lock(&self.shared.registry);
        if registry.filtered_universes.contains(&universe) {
            return;
        }
        registry.filtered_universes.push(universe);
        registry
            .universe_stats
            .insert(universe, UniverseInfo::new(universe));
    }

    /// Drop all universe filters and their statistics atomically.
    pub fn clear_filters(&self) {
        let mut registry = lock(&self.shared.registry);
        registry.filtered_universes.clear();
        registry.universe_stats.clear();
    }

    /// Statistics for every filtered universe, ordered by universe.
    pub fn universe_stats(&self) -> Vec<UniverseInfo> {
        let registry = lock(&self.shared.registry);
        let mut stats: Vec<UniverseInfo> = registry.universe_stats.values().cloned().collect();
        stats.sort_by_key(UniverseInfo::universe);
        stats
    }

    /// Register a DMX consumer; re-registering the same handle is a no-op.
    pub fn register_dmx_target(&self, target: Arc<dyn DmxTarget>) {
        let mut registry = lock(&self.shared.registry);
        if registry
            .dmx_targets
            .iter()
            .any(|existing| Arc::ptr_eq(existing, &target))
        {
            return;
        }
        registry.dmx_targets.push(target);
    }

    pub fn remove_dmx_target(&self, target: &Arc<dyn DmxTarget>) {
        lock(&self.shared.registry)
            .dmx_targets
            .retain(|existing| !Arc::ptr_eq(existing, target));
    }

    /// Register a timecode consumer; re-registering the same handle is a
    /// no-op.
    pub fn register_timecode_target(&self, target: Arc<dyn TimecodeTarget>) {
        let mut registry = lock(&self.shared.registry);
        if registry
            .timecode_targets
            .iter()
            .any(|existing| Arc::ptr_eq(existing, &target))
        {
            return;
        }
        registry.timecode_targets.push(target);
    }

    pub fn remove_timecode_target(&self, target: &Arc<dyn TimecodeTarget>) {
        lock(&self.shared.registry)
            .timecode_targets
            .retain(|existing| !Arc::ptr_eq(existing, target));
    }

    /// Transmit to the interface broadcast address on the protocol port.
    pub fn broadcast(&self, packet: &ArtNetPacket) -> Result<(), EngineError> {
        let (socket, open) = self.open_snapshot()?;
        let addr = SocketAddr::from((
            broadcast_address(open.local_ip, open.subnet_mask),
            self.shared.options.port,
        ));
        socket.send_to(&packet.to_bytes(), addr)?;
        Ok(())
    }

    /// Transmit to one peer on the protocol port.
    pub fn send_to(&self, packet: &ArtNetPacket, ip: Ipv4Addr) -> Result<(), EngineError> {
        let (socket, _) = self.open_snapshot()?;
        let addr = SocketAddr::from((ip, self.shared.options.port));
        socket.send_to(&packet.to_bytes(), addr)?;
        Ok(())
    }

    /// Address and send one device-management packet, using this engine's
    /// RDM id as the source.
    pub fn send_rdm(
        &self,
        packet: RdmPacket,
        target: RdmEndPoint,
        target_id: RdmTargetId,
    ) -> Result<(), EngineError> {
        self.send_rdm_from(packet, target, target_id, self.shared.rdm_id)
    }

    /// Address and send one device-management packet with an explicit
    /// source identifier. Fills the header, appends the checksum, wraps
    /// the result for the target universe, and raises the sent event.
    pub fn send_rdm_from(
        &self,
        mut packet: RdmPacket,
        target: RdmEndPoint,
        target_id: RdmTargetId,
        source_id: UId,
    ) -> Result<(), EngineError> {
        packet.header.source_id = source_id;
        packet.header.destination_id = target_id.uid();
        if let Some(sub_device) = target_id.sub_device() {
            packet.header.sub_device = sub_device;
        }

        let (socket, open) = self.open_snapshot()?;
        let destination = SocketAddr::from((target.ip, self.shared.options.port));
        let carrier = RdmCarrierPacket::wrap(&packet, target.universe);
        socket.send_to(&ArtNetPacket::Rdm(carrier).to_bytes(), destination)?;

        self.shared.emit(EngineEvent::RdmSent {
            source: open.local_endpoint,
            destination,
            packet,
        });
        Ok(())
    }

    /// Send ≥1 prepared packets as one bundle carrier addressed to
    /// `target_id`. An empty list is rejected and nothing is transmitted.
    pub fn send_rdm_bundle(
        &self,
        packets: &[RdmPacket],
        target: RdmEndPoint,
        target_id: UId,
    ) -> Result<(), EngineError> {
        let bundle = RdmSubPacket::bundle(packets, target_id)?;
        self.send_to(&ArtNetPacket::RdmSub(bundle), target.ip)
    }

    fn open_snapshot(&self) -> Result<(Arc<UdpSocket>, OpenInfo), EngineError> {
        let state = lock(&self.shared.state);
        let open = state.as_ref().ok_or(EngineError::NotOpen)?;
        Ok((
            Arc::clone(&open.socket),
            OpenInfo {
                local_ip: open.local_ip,
                subnet_mask: open.subnet_mask,
                local_endpoint: open.local_endpoint,
            },
        ))
    }
}

impl Drop for ArtNetEngine {
    fn drop(&mut self) {
        self.close();
    }
}

struct OpenState {
    socket: Arc<UdpSocket>,
    local_ip: Ipv4Addr,
    subnet_mask: Option<Ipv4Addr>,
    local_endpoint: SocketAddr,
    join: Option<JoinHandle<()>>,
}

#[derive(Clone, Copy)]
struct OpenInfo {
    local_ip: Ipv4Addr,
    subnet_mask: Option<Ipv4Addr>,
    local_endpoint: SocketAddr,
}

#[derive(Default)]
struct Registry {
    filtered_universes: Vec<u16>,
    universe_stats: HashMap<u16, UniverseInfo>,
    dmx_targets: Vec<Arc<dyn DmxTarget>>,
    timecode_targets: Vec<Arc<dyn TimecodeTarget>>,
    subscribers: Vec<Sender<EngineEvent>>,
}

struct EngineShared {
    rdm_id: UId,
    options: EngineOptions,
    running: AtomicBool,
    state: Mutex<Option<OpenState>>,
    registry: Mutex<Registry>,
    last_packet: Mutex<Option<OffsetDateTime>>,
    listen_config: Mutex<Option<Box<dyn SocketConfiguration>>>,
    custom_creator: Mutex<Option<Box<CustomPacketFn>>>,
}

impl EngineShared {
    fn emit(&self, event: EngineEvent) {
        lock(&self.registry)
            .subscribers
            .retain(|tx| tx.send(event.clone()).is_ok());
    }

    fn report(&self, error: EngineError) {
        log::error!("receive dispatch failed: {error}");
        self.emit(EngineEvent::Error(Arc::new(error)));
    }

    /// One iteration of the receive path: validate, loopback-filter,
    /// decode, dispatch.
    fn handle_datagram(&self, source: SocketAddr, data: &[u8], local_endpoint: SocketAddr) {
        if data.len() < layout::MIN_DATAGRAM_SIZE || !data.starts_with(layout::ARTNET_ID) {
            log::warn!(
                "dropping runt or non-Art-Net datagram ({} bytes) from {source}",
                data.len()
            );
            return;
        }

        let opcode = u16::from_le_bytes([data[layout::OPCODE_OFFSET], data[layout::OPCODE_OFFSET + 1]]);
        // A broadcast socket hears its own transmissions. Poll traffic is
        // exempt: a combined controller/node must answer itself.
        if source == local_endpoint
            && opcode != OpCode::Poll.value()
            && opcode != OpCode::PollReply.value()
        {
            log::trace!("loopback datagram dropped (opcode {opcode:#06x})");
            return;
        }

        *lock(&self.last_packet) = Some(OffsetDateTime::now_utc());

        let packet = {
            let creator = lock(&self.custom_creator);
            ArtNetPacket::from_datagram(data, creator.as_deref())
        };
        let destination = SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.options.port));
        match packet {
            Ok(packet) => self.process_packet(source, destination, packet),
            Err(error) => self.report(error.into()),
        }
    }

    fn process_packet(&self, source: SocketAddr, destination: SocketAddr, packet: ArtNetPacket) {
        log::trace!("packet from {source}: opcode {:#06x}", packet.opcode());
        self.emit(EngineEvent::PacketReceived {
            source,
            destination,
            packet: packet.clone(),
        });

        match packet {
            ArtNetPacket::Rdm(carrier) => {
                let mut reader = BinaryReader::new(&carrier.data);
                match RdmPacket::read(&mut reader) {
                    Ok(rdm) => self.emit(EngineEvent::RdmReceived {
                        source,
                        destination,
                        packet: rdm,
                    }),
                    Err(error) => self.report(error.into()),
                }
            }
            ArtNetPacket::Dmx(dmx) => {
                let mut registry = lock(&self.registry);
                if !registry.filtered_universes.contains(&dmx.universe) {
                    return;
                }
                if let Some(stats) = registry.universe_stats.get_mut(&dmx.universe) {
                    stats.update();
                }
                let targets = registry.dmx_targets.clone();
                drop(registry);

                let frame = DmxFrame {
                    sequence: dmx.sequence,
                    universe: dmx.universe,
                    data: dmx.data().to_vec(),
                };
                for target in targets {
                    target.on_receive_dmx(frame.universe, &frame);
                }
            }
            ArtNetPacket::Timecode(timecode) => {
                let targets = lock(&self.registry).timecode_targets.clone();
                for target in targets {
                    target.on_receive_timecode(&timecode.timecode, self);
                }
            }
            _ => {}
        }
    }
}

impl TimecodeSource for EngineShared {
    fn is_active(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn name(&self) -> &str {
        "Art-Net"
    }
}

fn run_receive_loop(
    shared: Arc<EngineShared>,
    socket: Arc<UdpSocket>,
    local_endpoint: SocketAddr,
) {
    let mut buffer = vec![0u8; MAX_DATAGRAM_SIZE];
    let mut failed_receive = false;

    log::info!("receive loop started for {local_endpoint}");
    while shared.running.load(Ordering::SeqCst) {
        let (len, source) = match socket.recv_from(&mut buffer) {
            Ok(received) => {
                failed_receive = false;
                received
            }
            Err(error)
                if matches!(
                    error.kind(),
                    std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
                ) =>
            {
                continue;
            }
            Err(error) => {
                // Report and retry once; a second failure in a row is
                // terminal.
                let terminal = failed_receive;
                shared.report(EngineError::Transport(error));
                if terminal {
                    log::error!("receive failed twice in a row; stopping loop");
                    shared.running.store(false, Ordering::SeqCst);
                    break;
                }
                failed_receive = true;
                continue;
            }
        };
        shared.handle_datagram(source, &buffer[..len], local_endpoint);
    }
    log::info!("receive loop stopped for {local_endpoint}");
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
