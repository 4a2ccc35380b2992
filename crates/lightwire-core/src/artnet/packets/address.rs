use crate::artnet::error::ArtNetError;
use crate::artnet::layout;
use crate::artnet::opcode::OpCode;
use crate::artnet::packet::write_header;
use crate::io::{BinaryReader, BinaryWriter};

/// Remote programming of a node's port addressing and names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressPacket {
    pub net_switch: u8,
    pub bind_index: u8,
    pub short_name: String,
    pub long_name: String,
    pub sw_in: [u8; 4],
    pub sw_out: [u8; 4],
    pub sub_switch: u8,
    pub acn_priority: u8,
    pub command: u8,
}

impl AddressPacket {
    pub(crate) fn read(reader: &mut BinaryReader<'_>) -> Result<Self, ArtNetError> {
        Ok(Self {
            net_switch: reader.read_u8()?,
            bind_index: reader.read_u8()?,
            short_name: reader.read_string(18)?,
            long_name: reader.read_string(64)?,
            sw_in: reader.read_array()?,
            sw_out: reader.read_array()?,
            sub_switch: reader.read_u8()?,
            acn_priority: reader.read_u8()?,
            command: reader.read_u8()?,
        })
    }

    pub fn write(&self, writer: &mut BinaryWriter) {
        write_header(writer, OpCode::Address.value(), layout::PROTOCOL_VERSION);
        writer.write_u8(self.net_switch);
        writer.write_u8(self.bind_index);
        writer.write_string(&self.short_name, 18);
        writer.write_string(&self.long_name, 64);
        writer.write_bytes(&self.sw_in);
        writer.write_bytes(&self.sw_out);
        writer.write_u8(self.sub_switch);
        writer.write_u8(self.acn_priority);
        writer.write_u8(self.command);
    }
}

#[cfg(test)]
mod tests {
    use super::AddressPacket;
    use crate::artnet::packet::ArtNetPacket;

    #[test]
    fn round_trip() {
        let address = AddressPacket {
            net_switch: 0x02,
            bind_index: 1,
            short_name: "booth".to_string(),
            long_name: "front of house booth node".to_string(),
            sw_in: [0, 1, 2, 3],
            sw_out: [4, 5, 6, 7],
            sub_switch: 0x03,
            acn_priority: 100,
            command: 0x04,
        };
        let bytes = ArtNetPacket::Address(address.clone()).to_bytes();
        let decoded = ArtNetPacket::from_datagram(&bytes, None).unwrap();
        assert_eq!(decoded, ArtNetPacket::Address(address));
    }
}
