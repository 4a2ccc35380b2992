use crate::artnet::error::ArtNetError;
use crate::artnet::layout;
use crate::artnet::opcode::OpCode;
use crate::artnet::packet::write_header;
use crate::io::{BinaryReader, BinaryWriter};
use crate::rdm::{self, RdmCommand, RdmError, RdmPacket, RdmParameter, UId};

/// Carrier bundling several device-management packets for one target
/// device; the payload is the concatenation of each item's serialized
/// form, each with its own checksum trailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RdmSubPacket {
    pub rdm_version: u8,
    pub device_id: UId,
    pub command: RdmCommand,
    pub parameter_id: RdmParameter,
    pub sub_device: u16,
    /// Number of bundled packets in the payload.
    pub sub_count: u16,
    pub data: Vec<u8>,
}

impl RdmSubPacket {
    /// Build a bundle carrier from an ordered, non-empty list of prepared
    /// packets. The first packet's header supplies the carrier's command,
    /// parameter and sub-device fields.
    pub fn bundle(packets: &[RdmPacket], device_id: UId) -> Result<Self, RdmError> {
        let primary = packets.first().ok_or(RdmError::EmptyBundle)?;

        let mut data = BinaryWriter::new();
        for item in packets {
            item.write(&mut data, true);
        }

        Ok(Self {
            rdm_version: rdm::layout::SC_SUB_MESSAGE,
            device_id,
            command: primary.header.command,
            parameter_id: primary.header.parameter_id,
            sub_device: primary.header.sub_device,
            sub_count: packets.len() as u16,
            data: data.into_bytes(),
        })
    }

    pub(crate) fn read(reader: &mut BinaryReader<'_>) -> Result<Self, ArtNetError> {
        let rdm_version = reader.read_u8()?;
        reader.skip(1)?;
        let device_id = UId::from_bytes(reader.read_array()?);
        reader.skip(1)?;
        let command = RdmCommand::from_value(reader.read_u8()?);
        let parameter_id = RdmParameter::from_value(reader.read_u16_be()?);
        let sub_device = reader.read_u16_be()?;
        let sub_count = reader.read_u16_be()?;
        reader.skip(4)?;
        let data = reader.read_remaining().to_vec();

        Ok(Self {
            rdm_version,
            device_id,
            command,
            parameter_id,
            sub_device,
            sub_count,
            data,
        })
    }

    pub fn write(&self, writer: &mut BinaryWriter) {
        write_header(writer, OpCode::RdmSub.value(), layout::PROTOCOL_VERSION);
        writer.write_u8(self.rdm_version);
        writer.write_u8(0);
        writer.write_bytes(&self.device_id.to_bytes());
        writer.write_u8(0);
        writer.write_u8(self.command.value());
        writer.write_u16_be(self.parameter_id.value());
        writer.write_u16_be(self.sub_device);
        writer.write_u16_be(self.sub_count);
        writer.write_zeros(4);
        writer.write_bytes(&self.data);
    }
}
