use crate::artnet::error::ArtNetError;
use crate::artnet::layout;
use crate::artnet::opcode::OpCode;
use crate::artnet::packet::write_header;
use crate::io::{BinaryReader, BinaryWriter};

/// Reprograms a node's IP configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IpProgPacket {
    /// Bit flags selecting which fields to program.
    pub command: u8,
    pub ip: [u8; 4],
    pub subnet_mask: [u8; 4],
    pub port: u16,
}

impl IpProgPacket {
    pub(crate) fn read(reader: &mut BinaryReader<'_>) -> Result<Self, ArtNetError> {
        reader.skip(2)?;
        let command = reader.read_u8()?;
        reader.skip(1)?;
        let ip = reader.read_array()?;
        let subnet_mask = reader.read_array()?;
        let port = reader.read_u16_be()?;
        reader.skip(8)?;

        Ok(Self {
            command,
            ip,
            subnet_mask,
            port,
        })
    }

    pub fn write(&self, writer: &mut BinaryWriter) {
        write_header(writer, OpCode::IpProg.value(), layout::PROTOCOL_VERSION);
        writer.write_zeros(2);
        writer.write_u8(self.command);
        writer.write_zeros(1);
        writer.write_bytes(&self.ip);
        writer.write_bytes(&self.subnet_mask);
        writer.write_u16_be(self.port);
        writer.write_zeros(8);
    }
}

/// Node's answer reporting its active IP configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IpProgReplyPacket {
    pub ip: [u8; 4],
    pub subnet_mask: [u8; 4],
    pub port: u16,
    pub status: u8,
}

impl IpProgReplyPacket {
    pub(crate) fn read(reader: &mut BinaryReader<'_>) -> Result<Self, ArtNetError> {
        reader.skip(4)?;
        let ip = reader.read_array()?;
        let subnet_mask = reader.read_array()?;
        let port = reader.read_u16_be()?;
        let status = reader.read_u8()?;
        reader.skip(7)?;

        Ok(Self {
            ip,
            subnet_mask,
            port,
            status,
        })
    }

    pub fn write(&self, writer: &mut BinaryWriter) {
        write_header(writer, OpCode::IpProgReply.value(), layout::PROTOCOL_VERSION);
        writer.write_zeros(4);
        writer.write_bytes(&self.ip);
        writer.write_bytes(&self.subnet_mask);
        writer.write_u16_be(self.port);
        writer.write_u8(self.status);
        writer.write_zeros(7);
    }
}

#[cfg(test)]
mod tests {
    use super::{IpProgPacket, IpProgReplyPacket};
    use crate::artnet::packet::ArtNetPacket;

    #[test]
    fn prog_round_trip() {
        let prog = IpProgPacket {
            command: 0x80 | 0x04,
            ip: [10, 0, 0, 7],
            subnet_mask: [255, 0, 0, 0],
            port: 6454,
        };
        let bytes = ArtNetPacket::IpProg(prog).to_bytes();
        let decoded = ArtNetPacket::from_datagram(&bytes, None).unwrap();
        assert_eq!(decoded, ArtNetPacket::IpProg(prog));
    }

    #[test]
    fn reply_round_trip() {
        let reply = IpProgReplyPacket {
            ip: [10, 0, 0, 7],
            subnet_mask: [255, 0, 0, 0],
            port: 6454,
            status: 0x40,
        };
        let bytes = ArtNetPacket::IpProgReply(reply).to_bytes();
        let decoded = ArtNetPacket::from_datagram(&bytes, None).unwrap();
        assert_eq!(decoded, ArtNetPacket::IpProgReply(reply));
    }
}
