//! Endpoint device-list-change parameter: lets a controller poll whether
//! the responder list behind an endpoint has changed.

use crate::io::{BinaryReader, BinaryWriter, CodecError};
use crate::rdm::header::{RdmCommand, RdmHeader, RdmParameter, RdmResponseType};
use crate::rdm::packet::{RdmBody, RdmPacket};

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
            header: RdmHeader::new(
                RdmCommand::Get,
                RdmParameter::EndpointDeviceListChange,
            ),
            body: RdmBody::DeviceListChangeGet(body),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reply {
    pub endpoint_id: u16,
    /// Monotonic counter bumped whenever the endpoint's device list
    /// changes.
    pub list_change_number: u32,
}

impl Reply {
    pub(crate) fn read(reader: &mut BinaryReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            endpoint_id: reader.read_u16_be()?,
            list_change_number: reader.read_u32_be()?,
        })
    }

    pub(crate) fn write(&self, writer: &mut BinaryWriter) {
        writer.write_u16_be(self.endpoint_id);
        writer.write_u32_be(self.list_change_number);
    }
}

impl From<Reply> for RdmPacket {
    fn from(body: Reply) -> Self {
        let mut header = RdmHeader::new(
            RdmCommand::GetResponse,
            RdmParameter::EndpointDeviceListChange,
        );
        header.port_or_response_type = RdmResponseType::Ack.value();
        RdmPacket {
            header,
            body: RdmBody::DeviceListChangeReply(body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Reply;
    use crate::io::{BinaryReader, BinaryWriter};

    #[test]
    fn reply_round_trips() {
        let reply = Reply {
            endpoint_id: 2,
            list_change_number: 0x0102_0304,
        };
        let mut writer = BinaryWriter::new();
        reply.write(&mut writer);
        assert_eq!(writer.bytes(), &[0x00, 0x02, 0x01, 0x02, 0x03, 0x04]);

        let mut reader = BinaryReader::new(writer.bytes());
        assert_eq!(Reply::read(&mut reader).unwrap(), reply);
    }
}
