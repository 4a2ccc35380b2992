use crate::artnet::error::ArtNetError;
use crate::artnet::layout;
use crate::artnet::opcode::OpCode;
use crate::artnet::packet::write_header;
use crate::io::{BinaryReader, BinaryWriter};

/// Manufacturer-scoped remote trigger with an opaque payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerPacket {
    /// OEM code scoping the key; 0xffff addresses every device.
    pub oem: u16,
    pub key: u8,
    pub sub_key: u8,
    pub payload: Vec<u8>,
}

impl TriggerPacket {
    pub(crate) fn read(reader: &mut BinaryReader<'_>) -> Result<Self, ArtNetError> {
        reader.skip(2)?;
        Ok(Self {
            oem: reader.read_u16_be()?,
            key: reader.read_u8()?,
            sub_key: reader.read_u8()?,
            payload: reader.read_remaining().to_vec(),
        })
    }

    pub fn write(&self, writer: &mut BinaryWriter) {
        write_header(writer, OpCode::Trigger.value(), layout::PROTOCOL_VERSION);
        writer.write_zeros(2);
        writer.write_u16_be(self.oem);
        writer.write_u8(self.key);
        writer.write_u8(self.sub_key);
        writer.write_bytes(&self.payload);
    }
}

#[cfg(test)]
mod tests {
    use super::TriggerPacket;
    use crate::artnet::packet::ArtNetPacket;

    #[test]
    fn round_trip() {
        let trigger = TriggerPacket {
            oem: 0xffff,
            key: 3,
            sub_key: 1,
            payload: vec![0xde, 0xad],
        };
        let bytes = ArtNetPacket::Trigger(trigger.clone()).to_bytes();
        let decoded = ArtNetPacket::from_datagram(&bytes, None).unwrap();
        assert_eq!(decoded, ArtNetPacket::Trigger(trigger));
    }
}
