//! Typed parameter packets of the device-management sub-protocol.
//!
//! Each module holds the request/response pairs for one parameter id, in
//! the order Get, GetReply, Set, SetReply where the parameter supports
//! them. Converting a body into an [`RdmPacket`](crate::rdm::RdmPacket)
//! via `From` fills the header's command/parameter pair; responses also
//! set the acknowledgement response type.

pub mod device_list_change;
pub mod discovery_state;
pub mod endpoint_mode;
pub mod nack;
