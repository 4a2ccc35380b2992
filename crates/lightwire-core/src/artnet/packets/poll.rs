use crate::artnet::error::ArtNetError;
use crate::artnet::layout;
use crate::artnet::opcode::OpCode;
use crate::artnet::packet::write_header;
use crate::io::{BinaryReader, BinaryWriter};

/// Discovery request broadcast by controllers; every node answers with a
/// poll-reply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollPacket {
    /// Behaviour flags, passed through opaquely.
    pub flags: u8,
    /// Lowest diagnostic priority the sender wants to receive.
    pub priority: u8,
}

impl PollPacket {
    pub(crate) fn read(reader: &mut BinaryReader<'_>) -> Result<Self, ArtNetError> {
        Ok(Self {
            flags: reader.read_u8()?,
            priority: reader.read_u8()?,
        })
    }

    pub fn write(&self, writer: &mut BinaryWriter) {
        write_header(writer, OpCode::Poll.value(), layout::PROTOCOL_VERSION);
        writer.write_u8(self.flags);
        writer.write_u8(self.priority);
    }
}

#[cfg(test)]
mod tests {
    use super::PollPacket;
    use crate::artnet::packet::ArtNetPacket;

    #[test]
    fn round_trip() {
        let poll = PollPacket {
            flags: 0x02,
            priority: 0x80,
        };
        let bytes = ArtNetPacket::Poll(poll).to_bytes();
        assert_eq!(bytes.len(), 14);
        let decoded = ArtNetPacket::from_datagram(&bytes, None).unwrap();
        assert_eq!(decoded, ArtNetPacket::Poll(poll));
    }
}
