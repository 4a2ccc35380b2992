use std::io;
use std::net::{SocketAddr, UdpSocket};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::error::EngineError;
use crate::artnet::ArtNetPacket;
use crate::artnet::packets::Timecode;
use crate::rdm::RdmPacket;

/// One reconstructed DMX frame handed to registered targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DmxFrame {
    pub sequence: u8,
    pub universe: u16,
    pub data: Vec<u8>,
}

/// Consumer of DMX frames for filtered universes.
///
/// Called synchronously on the receive loop; implementations must not
/// block.
pub trait DmxTarget: Send + Sync {
    fn on_receive_dmx(&self, universe: u16, frame: &DmxFrame);
}

/// Where a timecode update came from, handed to targets alongside each
/// update.
pub trait TimecodeSource {
    fn is_active(&self) -> bool;
    fn name(&self) -> &str;
}

/// Consumer of distributed timecode. Same non-blocking contract as
/// [`DmxTarget`].
pub trait TimecodeTarget: Send + Sync {
    fn on_receive_timecode(&self, timecode: &Timecode, source: &dyn TimecodeSource);
}

/// Applies platform-specific socket options before the engine starts
/// listening.
pub trait SocketConfiguration: Send + Sync {
    fn configure(&self, socket: &UdpSocket) -> io::Result<()>;
}

/// Notifications fanned out to every subscriber channel.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// Any decoded packet, including unknown passthrough traffic.
    PacketReceived {
        source: SocketAddr,
        destination: SocketAddr,
        packet: ArtNetPacket,
    },
    /// Nested device-management packet decoded from a carrier.
    RdmReceived {
        source: SocketAddr,
        destination: SocketAddr,
        packet: RdmPacket,
    },
    /// Raised after a device-management packet left the socket.
    RdmSent {
        source: SocketAddr,
        destination: SocketAddr,
        packet: RdmPacket,
    },
    /// Receive-loop failure; the loop keeps running unless a transport
    /// failure repeats back to back.
    Error(Arc<EngineError>),
}
