//! Endpoint-mode parameter: disables an endpoint or switches it between
//! input and output.

use crate::io::{BinaryReader, BinaryWriter, CodecError};
use crate::rdm::header::{RdmCommand, RdmHeader, RdmParameter, RdmResponseType};
use crate::rdm::packet::{RdmBody, RdmPacket};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointModes {
    Disabled,
    Input,
    Output,
    Other(u8),
}

impl EndpointModes {
    pub fn value(self) -> u8 {
        match self {
            EndpointModes::Disabled => 0x00,
            EndpointModes::Input => 0x01,
            EndpointModes::Output => 0x02,
            EndpointModes::Other(value) => value,
        }
    }

    pub fn from_value(value: u8) -> Self {
        match value {
            0x00 => EndpointModes::Disabled,
            0x01 => EndpointModes::Input,
            0x02 => EndpointModes::Output,
            other => EndpointModes::Other(other),
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
            header: RdmHeader::new(RdmCommand::Get, RdmParameter::EndpointMode),
            body: RdmBody::EndpointModeGet(body),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetReply {
    pub endpoint_id: u16,
    pub endpoint_mode: EndpointModes,
}

impl GetReply {
    pub(crate) fn read(reader: &mut BinaryReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            endpoint_id: reader.read_u16_be()?,
            endpoint_mode: EndpointModes::from_value(reader.read_u8()?),
        })
    }

    pub(crate) fn write(&self, writer: &mut BinaryWriter) {
        writer.write_u16_be(self.endpoint_id);
        writer.write_u8(self.endpoint_mode.value());
    }
}

impl From<GetReply> for RdmPacket {
    fn from(body: GetReply) -> Self {
        let mut header = RdmHeader::new(RdmCommand::GetResponse, RdmParameter::EndpointMode);
        header.port_or_response_type = RdmResponseType::Ack.value();
        RdmPacket {
            header,
            body: RdmBody::EndpointModeGetReply(body),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Set {
    pub endpoint_id: u16,
    pub endpoint_mode: EndpointModes,
}

impl Set {
    pub(crate) fn read(reader: &mut BinaryReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            endpoint_id: reader.read_u16_be()?,
            endpoint_mode: EndpointModes::from_value(reader.read_u8()?),
        })
    }

    pub(crate) fn write(&self, writer: &mut BinaryWriter) {
        writer.write_u16_be(self.endpoint_id);
        writer.write_u8(self.endpoint_mode.value());
    }
}

impl From<Set> for RdmPacket {
    fn from(body: Set) -> Self {
        RdmPacket {
            header: RdmHeader::new(RdmCommand::Set, RdmParameter::EndpointMode),
            body: RdmBody::EndpointModeSet(body),
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
        let mut header = RdmHeader::new(RdmCommand::SetResponse, RdmParameter::EndpointMode);
        header.port_or_response_type = RdmResponseType::Ack.value();
        RdmPacket {
            header,
            body: RdmBody::EndpointModeSetReply(body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EndpointModes, Set};
    use crate::io::{BinaryReader, BinaryWriter};

    #[test]
    fn set_round_trips() {
        let set = Set {
            endpoint_id: 3,
            endpoint_mode: EndpointModes::Input,
        };
        let mut writer = BinaryWriter::new();
        set.write(&mut writer);
        assert_eq!(writer.bytes(), &[0x00, 0x03, 0x01]);

        let mut reader = BinaryReader::new(writer.bytes());
        assert_eq!(Set::read(&mut reader).unwrap(), set);
    }
}
