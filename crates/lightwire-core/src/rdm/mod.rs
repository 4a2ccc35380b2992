//! Embedded device-management (RDM) sub-protocol.
//!
//! Requests and responses share a fixed header (UIDs, command class,
//! parameter id) followed by a parameter body and a 16-bit checksum
//! trailer, nested one level inside an Art-Net carrier packet. The two
//! leading start codes of the native serial framing are not serialized in
//! the carrier; they live on in the checksum constants and the
//! message-length arithmetic.

pub mod error;
pub mod header;
pub mod layout;
pub mod packet;
pub mod packets;
pub mod uid;

pub use error::RdmError;
pub use header::{RdmCommand, RdmHeader, RdmParameter, RdmResponseType};
pub use packet::{RdmBody, RdmPacket, checksum};
pub use packets::nack::NackReason;
pub use uid::{RdmTarget, UId};
