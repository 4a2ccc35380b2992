use crate::artnet::error::ArtNetError;
use crate::artnet::layout;
use crate::artnet::opcode::OpCode;
use crate::artnet::packet::write_header;
use crate::io::{BinaryReader, BinaryWriter};

/// Node descriptor answered to a poll.
///
/// The layout is fixed by the wire protocol and carries several reserved
/// blocks: three bytes are consumed and discarded on read, and 3 + 15
/// zero bytes are emitted on write. Status and style bytes are opaque
/// pass-through values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollReplyPacket {
    pub ip_address: [u8; 4],
    pub port: u16,
    pub firmware_version: u16,
    pub sub_switch: u16,
    pub oem: u16,
    pub ubea_version: u8,
    pub status: u8,
    pub esta_code: u16,
    pub short_name: String,
    pub long_name: String,
    pub node_report: String,
    pub port_count: u16,
    pub port_types: [u8; 4],
    pub good_input: [u8; 4],
    pub good_output_a: [u8; 4],
    pub sw_in: [u8; 4],
    pub sw_out: [u8; 4],
    pub acn_priority: u8,
    pub sw_macro: u8,
    pub sw_remote: u8,
    pub style: u8,
    pub mac_address: [u8; 6],
    pub bind_ip_address: [u8; 4],
    pub bind_index: u8,
    pub status2: u8,
    pub good_output_b: [u8; 4],
    pub status3: u8,
    /// Default responder identifier for the device-management sub-protocol.
    pub default_uid: [u8; 6],
}

impl Default for PollReplyPacket {
    fn default() -> Self {
        Self {
            ip_address: [0; 4],
            port: layout::PORT,
            firmware_version: 0,
            sub_switch: 0,
            oem: 0xff,
            ubea_version: 0,
            status: 0,
            esta_code: 0,
            short_name: String::new(),
            long_name: String::new(),
            node_report: String::new(),
            port_count: 0,
            port_types: [0; 4],
            good_input: [0; 4],
            good_output_a: [0; 4],
            sw_in: [0; 4],
            sw_out: [0; 4],
            acn_priority: 0,
            sw_macro: 0,
            sw_remote: 0,
            style: 0,
            mac_address: [0; 6],
            bind_ip_address: [0; 4],
            bind_index: 0,
            status2: 0,
            good_output_b: [0; 4],
            status3: 0,
            default_uid: [0; 6],
        }
    }
}

impl PollReplyPacket {
    /// Resolve the 15-bit universe for a port.
    ///
    /// Older-generation nodes derive the universe from the sub-switch word
    /// combined with a nibble of the per-port switch array; newer nodes
    /// report the raw switch byte with sub-switch zero.
    pub fn universe_address(&self, out_ports: bool, port_index: usize) -> u16 {
        let switch = if out_ports {
            self.sw_out[port_index]
        } else {
            self.sw_in[port_index]
        };

        if self.sub_switch > 0 {
            let mut universe = self.sub_switch & 0x7f00;
            universe += (self.sub_switch & 0x0f) << 4;
            universe += u16::from(switch & 0x0f);
            universe
        } else {
            u16::from(switch)
        }
    }

    pub(crate) fn read(reader: &mut BinaryReader<'_>) -> Result<Self, ArtNetError> {
        let ip_address = reader.read_array()?;
        let port = reader.read_u16_le()?;
        let firmware_version = reader.read_u16_be()?;
        let sub_switch = reader.read_u16_be()?;
        let oem = reader.read_u16_be()?;
        let ubea_version = reader.read_u8()?;
        let status = reader.read_u8()?;
        let esta_code = reader.read_u16_le()?;
        let short_name = reader.read_string(18)?;
        let long_name = reader.read_string(64)?;
        let node_report = reader.read_string(64)?;
        let port_count = reader.read_u16_be()?;
        let port_types = reader.read_array()?;
        let good_input = reader.read_array()?;
        let good_output_a = reader.read_array()?;
        let sw_in = reader.read_array()?;
        let sw_out = reader.read_array()?;
        let acn_priority = reader.read_u8()?;
        let sw_macro = reader.read_u8()?;
        let sw_remote = reader.read_u8()?;
        reader.skip(3)?;
        let style = reader.read_u8()?;
        let mac_address = reader.read_array()?;
        let bind_ip_address = reader.read_array()?;
        let bind_index = reader.read_u8()?;
        let status2 = reader.read_u8()?;
        let good_output_b = reader.read_array()?;
        let status3 = reader.read_u8()?;
        let default_uid = reader.read_array()?;

        Ok(Self {
            ip_address,
            port,
            firmware_version,
            sub_switch,
            oem,
            ubea_version,
            status,
            esta_code,
            short_name,
            long_name,
            node_report,
            port_count,
            port_types,
            good_input,
            good_output_a,
            sw_in,
            sw_out,
            acn_priority,
            sw_macro,
            sw_remote,
            style,
            mac_address,
            bind_ip_address,
            bind_index,
            status2,
            good_output_b,
            status3,
            default_uid,
        })
    }

    pub fn write(&self, writer: &mut BinaryWriter) {
        write_header(writer, OpCode::PollReply.value(), layout::PROTOCOL_VERSION);
        writer.write_bytes(&self.ip_address);
        writer.write_u16_le(self.port);
        writer.write_u16_be(self.firmware_version);
        writer.write_u16_be(self.sub_switch);
        writer.write_u16_be(self.oem);
        writer.write_u8(self.ubea_version);
        writer.write_u8(self.status);
        writer.write_u16_le(self.esta_code);
        writer.write_string(&self.short_name, 18);
        writer.write_string(&self.long_name, 64);
        writer.write_string(&self.node_report, 64);
        writer.write_u16_be(self.port_count);
        writer.write_bytes(&self.port_types);
        writer.write_bytes(&self.good_input);
        writer.write_bytes(&self.good_output_a);
        writer.write_bytes(&self.sw_in);
        writer.write_bytes(&self.sw_out);
        writer.write_u8(self.acn_priority);
        writer.write_u8(self.sw_macro);
        writer.write_u8(self.sw_remote);
        writer.write_zeros(3);
        writer.write_u8(self.style);
        writer.write_bytes(&self.mac_address);
        writer.write_bytes(&self.bind_ip_address);
        writer.write_u8(self.bind_index);
        writer.write_u8(self.status2);
        writer.write_bytes(&self.good_output_b);
        writer.write_u8(self.status3);
        writer.write_bytes(&self.default_uid);
        writer.write_zeros(15);
    }
}

#[cfg(test)]
mod tests {
    use super::PollReplyPacket;
    use crate::artnet::packet::ArtNetPacket;

    fn sample() -> PollReplyPacket {
        PollReplyPacket {
            ip_address: [192, 168, 1, 40],
            firmware_version: 0x0102,
            sub_switch: 0x0210,
            esta_code: 0x7a70,
            short_name: "node".to_string(),
            long_name: "a node with a longer descriptive name".to_string(),
            node_report: "#0001 [0001] power on".to_string(),
            port_count: 2,
            port_types: [0x80, 0x80, 0, 0],
            sw_in: [1, 2, 0, 0],
            sw_out: [3, 4, 0, 0],
            style: 0x01,
            mac_address: [0xde, 0xad, 0xbe, 0xef, 0x00, 0x01],
            status2: 0x0e,
            default_uid: [0x12, 0x34, 0x00, 0x00, 0x00, 0x01],
            ..PollReplyPacket::default()
        }
    }

    #[test]
    fn header_omits_version() {
        let bytes = ArtNetPacket::PollReply(sample()).to_bytes();
        // Opcode immediately followed by the body, no version word.
        assert_eq!(&bytes[8..10], &[0x00, 0x21]);
        assert_eq!(&bytes[10..14], &[192, 168, 1, 40]);
    }

    #[test]
    fn encoded_length_matches_wire_layout() {
        let bytes = ArtNetPacket::PollReply(sample()).to_bytes();
        assert_eq!(bytes.len(), 239);
    }

    #[test]
    fn round_trip() {
        let reply = sample();
        let bytes = ArtNetPacket::PollReply(reply.clone()).to_bytes();
        let decoded = ArtNetPacket::from_datagram(&bytes, None).unwrap();
        assert_eq!(decoded, ArtNetPacket::PollReply(reply));
    }

    #[test]
    fn round_trip_truncates_oversized_names() {
        let mut reply = sample();
        reply.short_name = "x".repeat(32);
        let bytes = ArtNetPacket::PollReply(reply).to_bytes();
        let decoded = ArtNetPacket::from_datagram(&bytes, None).unwrap();
        match decoded {
            ArtNetPacket::PollReply(decoded) => {
                assert_eq!(decoded.short_name, "x".repeat(18));
            }
            other => panic!("expected poll-reply, got {other:?}"),
        }
    }

    #[test]
    fn legacy_universe_formula() {
        let mut reply = sample();
        reply.sub_switch = 0x0210;
        reply.sw_out[0] = 0x03;
        // (0x0210 & 0x7f00) + ((0x0210 & 0x0f) << 4) + (0x03 & 0x0f)
        assert_eq!(reply.universe_address(true, 0), 0x0203);

        reply.sub_switch = 0;
        assert_eq!(reply.universe_address(true, 0), 0x03);
    }

    #[test]
    fn legacy_universe_low_nibble_contributes() {
        let mut reply = sample();
        reply.sub_switch = 0x0213;
        reply.sw_in[1] = 0x1f;
        // 0x0200 + (3 << 4) + 0x0f
        assert_eq!(reply.universe_address(false, 1), 0x023f);
    }
}
