use crate::artnet::error::ArtNetError;
use crate::artnet::layout;
use crate::artnet::opcode::OpCode;
use crate::artnet::packet::write_header;
use crate::io::{BinaryReader, BinaryWriter};

/// Channel data for one universe.
///
/// The universe word is transmitted low byte first while the payload
/// length is high byte first; the payload is capped at 512 channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DmxPacket {
    pub sequence: u8,
    pub physical: u8,
    pub universe: u16,
    data: Vec<u8>,
}

impl DmxPacket {
    pub fn new(universe: u16, data: Vec<u8>) -> Result<Self, ArtNetError> {
        check_length(data.len())?;
        Ok(Self {
            sequence: 0,
            physical: 0,
            universe,
            data,
        })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn set_data(&mut self, data: Vec<u8>) -> Result<(), ArtNetError> {
        check_length(data.len())?;
        self.data = data;
        Ok(())
    }

    pub(crate) fn read(reader: &mut BinaryReader<'_>) -> Result<Self, ArtNetError> {
        let sequence = reader.read_u8()?;
        let physical = reader.read_u8()?;
        let universe = reader.read_u16_le()?;
        let length = usize::from(reader.read_u16_be()?);
        check_length(length)?;
        let data = reader.read_bytes(length)?.to_vec();

        Ok(Self {
            sequence,
            physical,
            universe,
            data,
        })
    }

    pub fn write(&self, writer: &mut BinaryWriter) {
        write_header(writer, OpCode::Output.value(), layout::PROTOCOL_VERSION);
        writer.write_u8(self.sequence);
        writer.write_u8(self.physical);
        writer.write_u16_le(self.universe);
        writer.write_u16_be(self.data.len() as u16);
        writer.write_bytes(&self.data);
    }
}

fn check_length(length: usize) -> Result<(), ArtNetError> {
    if length == 0 || length > layout::DMX_MAX_SLOTS {
        return Err(ArtNetError::InvalidLength { length });
    }
    Ok(())
}
