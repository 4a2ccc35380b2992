use crate::artnet::error::ArtNetError;
use crate::artnet::layout;
use crate::artnet::opcode::OpCode;
use crate::artnet::packet::write_header;
use crate::io::{BinaryReader, BinaryWriter};

/// Enables or disables a node's DMX inputs per port.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputPacket {
    pub bind_index: u8,
    pub port_count: u16,
    pub input: [u8; 4],
}

impl InputPacket {
    pub(crate) fn read(reader: &mut BinaryReader<'_>) -> Result<Self, ArtNetError> {
        reader.skip(1)?;
        Ok(Self {
            bind_index: reader.read_u8()?,
            port_count: reader.read_u16_be()?,
            input: reader.read_array()?,
        })
    }

    pub fn write(&self, writer: &mut BinaryWriter) {
        write_header(writer, OpCode::Input.value(), layout::PROTOCOL_VERSION);
        writer.write_u8(0);
        writer.write_u8(self.bind_index);
        writer.write_u16_be(self.port_count);
        writer.write_bytes(&self.input);
    }
}

#[cfg(test)]
mod tests {
    use super::InputPacket;
    use crate::artnet::packet::ArtNetPacket;

    #[test]
    fn round_trip() {
        let input = InputPacket {
            bind_index: 1,
            port_count: 4,
            input: [0, 1, 0, 1],
        };
        let bytes = ArtNetPacket::Input(input).to_bytes();
        let decoded = ArtNetPacket::from_datagram(&bytes, None).unwrap();
        assert_eq!(decoded, ArtNetPacket::Input(input));
    }
}
