//! Byte-level constants for the Art-Net wire format.

/// Protocol identification tag, always written as exactly 8 bytes.
pub const ARTNET_ID: &[u8; 8] = b"Art-Net\0";

/// Fixed UDP port for Art-Net traffic.
pub const PORT: u16 = 6454;

/// Protocol revision carried by every header except poll-reply.
pub const PROTOCOL_VERSION: u16 = 14;

/// Header size with the version word.
pub const HEADER_SIZE: usize = 12;

/// Tag plus opcode; the smallest prefix that identifies a packet.
pub const MIN_DATAGRAM_SIZE: usize = 10;

/// Offset of the opcode word within the header.
pub const OPCODE_OFFSET: usize = 8;

/// Upper bound on DMX channel data per packet.
pub const DMX_MAX_SLOTS: usize = 512;
