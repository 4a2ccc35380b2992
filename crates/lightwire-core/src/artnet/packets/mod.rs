//! One module per wire variant; each implements a read/write pair.

mod address;
mod dmx;
mod input;
mod ip_prog;
mod poll;
mod poll_reply;
mod rdm;
mod rdm_sub;
mod sync;
mod timecode;
mod trigger;
mod unknown;

pub use address::AddressPacket;
pub use dmx::DmxPacket;
pub use input::InputPacket;
pub use ip_prog::{IpProgPacket, IpProgReplyPacket};
pub use poll::PollPacket;
pub use poll_reply::PollReplyPacket;
pub use rdm::RdmCarrierPacket;
pub use rdm_sub::RdmSubPacket;
pub use sync::SyncPacket;
pub use timecode::{Timecode, TimecodePacket};
pub use trigger::TriggerPacket;
pub use unknown::UnknownPacket;
