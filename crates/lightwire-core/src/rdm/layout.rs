//! Constants of the device-management wire format.

/// DMX start code identifying an RDM frame.
pub const SC_RDM: u8 = 0xcc;

/// Sub-message start code carried in the Art-Net framing.
pub const SC_SUB_MESSAGE: u8 = 0x01;

/// Serialized header length, start codes excluded.
pub const HEADER_SIZE: usize = 22;

/// Message-length base: the header plus the two unserialized start codes.
pub const MESSAGE_LENGTH_BASE: u8 = 24;

/// Checksum trailer size.
pub const CHECKSUM_SIZE: usize = 2;

/// Upper bound on parameter data per packet.
pub const MAX_PARAMETER_DATA_LENGTH: usize = 231;
