//! Lightwire core library: an Art-Net protocol engine over UDP.
//!
//! This crate implements the lighting-control network protocol used by the
//! engine: the shared binary codec feeds the opcode-dispatched packet
//! model (layout/codec/packet layers), the device-management sub-protocol
//! nests inside carrier packets with its own checksum and bundling, and
//! the transport engine owns the socket, the receive loop and the fan-out
//! to typed consumers. Packet codecs are byte-oriented and side-effect
//! free; all I/O is isolated in `engine`.
//!
//! Invariants:
//! - Every packet variant encodes/decodes through one read/write pair.
//! - Unknown opcodes round-trip verbatim, body included.
//! - Receives are strictly sequential per engine; dispatch is synchronous.
//! - Self-received datagrams are dropped except poll and poll-reply.
//!
//! Version française (résumé):
//! Cette crate fournit le cœur du protocole Art-Net : codec binaire ->
//! modèle de paquets par opcode -> sous-protocole de gestion des appareils
//! (RDM) -> moteur de transport UDP. Les décodeurs restent purs, les E/S
//! vivent dans `engine`. Garanties : aller-retour exact des paquets
//! inconnus, réception strictement séquentielle, protection loopback sauf
//! poll/poll-reply.
//!
//! # Examples
//! ```
//! use lightwire_core::ArtNetPacket;
//! use lightwire_core::artnet::packets::DmxPacket;
//!
//! let mut dmx = DmxPacket::new(1, vec![0u8; 512])?;
//! dmx.sequence = 1;
//! let bytes = ArtNetPacket::Dmx(dmx).to_bytes();
//! let decoded = ArtNetPacket::from_datagram(&bytes, None)?;
//! assert!(matches!(decoded, ArtNetPacket::Dmx(_)));
//! # Ok::<(), lightwire_core::artnet::ArtNetError>(())
//! ```
//!
//! ```no_run
//! use std::net::Ipv4Addr;
//!
//! use lightwire_core::ArtNetEngine;
//!
//! let engine = ArtNetEngine::new();
//! let events = engine.subscribe();
//! engine.add_filter(1);
//! engine.open(
//!     Ipv4Addr::new(192, 168, 1, 5),
//!     Some(Ipv4Addr::new(255, 255, 255, 0)),
//!     None,
//! )?;
//! for event in events.iter() {
//!     println!("{event:?}");
//! }
//! # Ok::<(), lightwire_core::EngineError>(())
//! ```

pub mod artnet;
pub mod engine;
pub mod io;
pub mod rdm;

pub use artnet::packets::{DmxPacket, PollReplyPacket, Timecode};
pub use artnet::{ArtNetPacket, OpCode};
pub use engine::{
    ArtNetEngine, DmxFrame, DmxTarget, EngineError, EngineEvent, EngineOptions, RdmEndPoint,
    SocketConfiguration, TimecodeSource, TimecodeTarget, UniverseInfo, UniverseInfoSnapshot,
};
pub use rdm::{NackReason, RdmCommand, RdmPacket, RdmParameter, RdmTarget, UId};
