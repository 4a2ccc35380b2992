//! Discovery-state parameter: queries and controls background discovery
//! on a node endpoint.

use crate::io::{BinaryReader, BinaryWriter, CodecError};
use crate::rdm::header::{RdmCommand, RdmHeader, RdmParameter, RdmResponseType};
use crate::rdm::packet::{RdmBody, RdmPacket};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscoveryStates {
    Incomplete,
    Full,
    Incremental,
    NotActive,
    Other(u8),
}

impl DiscoveryStates {
    pub fn value(self) -> u8 {
        match self {
            DiscoveryStates::Incomplete => 0x00,
            DiscoveryStates::Full => 0x01,
            DiscoveryStates::Incremental => 0x02,
            DiscoveryStates::NotActive => 0x04,
            DiscoveryStates::Other(value) => value,
        }
    }

    pub fn from_value(value: u8) -> Self {
        match value {
            0x00 => DiscoveryStates::Incomplete,
            0x01 => DiscoveryStates::Full,
            0x02 => DiscoveryStates::Incremental,
            0x04 => DiscoveryStates::NotActive,
            other => DiscoveryStates::Other(other),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Get {
    pub endpoint_id: u16,
}

impl Get {
    pub(crate) fn read(reader: &mut BinaryReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            endpoint_id: reader.read_u16_be()?,
        })
    }

    pub(crate) fn write(&self, writer: &mut BinaryWriter) {
        writer.write_u16_be(self.endpoint_id);
    }
}

impl From<Get> for RdmPacket {
    fn from(body: Get) -> Self {
        RdmPacket {
            header: RdmHeader::new(RdmCommand::Get, RdmParameter::DiscoveryState),
            body: RdmBody::DiscoveryStateGet(body),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetReply {
    pub endpoint_id: u16,
    pub device_count: u16,
    pub discovery_state: DiscoveryStates,
}

impl GetReply {
    pub(crate) fn read(reader: &mut BinaryReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            endpoint_id: reader.read_u16_be()?,
            device_count: reader.read_u16_be()?,
            discovery_state: DiscoveryStates::from_value(reader.read_u8()?),
        })
    }

    pub(crate) fn write(&self, writer: &mut BinaryWriter) {
        writer.write_u16_be(self.endpoint_id);
        writer.write_u16_be(self.device_count);
        writer.write_u8(self.discovery_state.value());
    }
}

impl From<GetReply> for RdmPacket {
    fn from(body: GetReply) -> Self {
        let mut header = RdmHeader::new(RdmCommand::GetResponse, RdmParameter::DiscoveryState);
        header.port_or_response_type = RdmResponseType::Ack.value();
        RdmPacket {
            header,
            body: RdmBody::DiscoveryStateGetReply(body),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Set {
    pub endpoint_id: u16,
    pub discovery_state: DiscoveryStates,
}

impl Set {
    pub(crate) fn read(reader: &mut BinaryReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            endpoint_id: reader.read_u16_be()?,
            discovery_state: DiscoveryStates::from_value(reader.read_u8()?),
        })
    }

    pub(crate) fn write(&self, writer: &mut BinaryWriter) {
        writer.write_u16_be(self.endpoint_id);
        writer.write_u8(self.discovery_state.value());
    }
}

impl From<Set> for RdmPacket {
    fn from(body: Set) -> Self {
        RdmPacket {
            header: RdmHeader::new(RdmCommand::Set, RdmParameter::DiscoveryState),
            body: RdmBody::DiscoveryStateSet(body),
        }
    }
}

/// Parameter data empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetReply;

impl SetReply {
    pub(crate) fn write(&self, _writer: &mut BinaryWriter) {}
}

impl From<SetReply> for RdmPacket {
    fn from(body: SetReply) -> Self {
        let mut header = RdmHeader::new(RdmCommand::SetResponse, RdmParameter::DiscoveryState);
        header.port_or_response_type = RdmResponseType::Ack.value();
        RdmPacket {
            header,
            body: RdmBody::DiscoveryStateSetReply(body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DiscoveryStates, GetReply};
    use crate::io::{BinaryReader, BinaryWriter};

    #[test]
    fn get_reply_round_trips() {
        let reply = GetReply {
            endpoint_id: 0x0102,
            device_count: 12,
            discovery_state: DiscoveryStates::NotActive,
        };
        let mut writer = BinaryWriter::new();
        reply.write(&mut writer);
        assert_eq!(writer.bytes(), &[0x01, 0x02, 0x00, 0x0c, 0x04]);

        let mut reader = BinaryReader::new(writer.bytes());
        assert_eq!(GetReply::read(&mut reader).unwrap(), reply);
    }

    #[test]
    fn state_codes_round_trip() {
        for value in [0x00, 0x01, 0x02, 0x04, 0x7f] {
            assert_eq!(DiscoveryStates::from_value(value).value(), value);
        }
    }
}
