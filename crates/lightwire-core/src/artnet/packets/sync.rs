use crate::artnet::error::ArtNetError;
use crate::artnet::layout;
use crate::artnet::opcode::OpCode;
use crate::artnet::packet::write_header;
use crate::io::{BinaryReader, BinaryWriter};

/// Frame boundary marker: nodes holding buffered DMX output latch it when
/// this arrives. Both aux bytes are reserved and transmitted as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncPacket;

impl SyncPacket {
    pub(crate) fn read(reader: &mut BinaryReader<'_>) -> Result<Self, ArtNetError> {
        reader.skip(2)?;
        Ok(Self)
    }

    pub fn write(&self, writer: &mut BinaryWriter) {
        write_header(writer, OpCode::Sync.value(), layout::PROTOCOL_VERSION);
        writer.write_zeros(2);
    }
}

#[cfg(test)]
mod tests {
    use super::SyncPacket;
    use crate::artnet::packet::ArtNetPacket;

    #[test]
    fn round_trip() {
        let bytes = ArtNetPacket::Sync(SyncPacket).to_bytes();
        assert_eq!(bytes.len(), 14);
        let decoded = ArtNetPacket::from_datagram(&bytes, None).unwrap();
        assert_eq!(decoded, ArtNetPacket::Sync(SyncPacket));
    }
}
