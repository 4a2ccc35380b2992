use crate::artnet::error::ArtNetError;
use crate::artnet::layout;
use crate::artnet::opcode::OpCode;
use crate::artnet::packet::write_header;
use crate::io::{BinaryReader, BinaryWriter};
use crate::rdm::{self, RdmPacket};

/// Carrier for a single device-management packet, addressed to a universe
/// through the modern net/address split.
///
/// The payload holds the serialized sub-protocol packet without its two
/// start codes; those are implied by the framing and accounted for in the
/// checksum trailer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RdmCarrierPacket {
    pub rdm_version: u8,
    /// High byte of the 15-bit target universe.
    pub net: u8,
    pub command: u8,
    /// Low byte of the 15-bit target universe.
    pub address: u8,
    pub data: Vec<u8>,
}

impl RdmCarrierPacket {
    /// Serialize `packet` with its checksum trailer and frame it for
    /// `universe`.
    pub fn wrap(packet: &RdmPacket, universe: u16) -> Self {
        let mut data = BinaryWriter::new();
        packet.write(&mut data, true);

        Self {
            rdm_version: rdm::layout::SC_SUB_MESSAGE,
            net: (universe >> 8) as u8,
            command: 0,
            address: (universe & 0x00ff) as u8,
            data: data.into_bytes(),
        }
    }

    pub(crate) fn read(reader: &mut BinaryReader<'_>) -> Result<Self, ArtNetError> {
        let rdm_version = reader.read_u8()?;
        reader.skip(8)?;
        let net = reader.read_u8()?;
        let command = reader.read_u8()?;
        let address = reader.read_u8()?;
        let data = reader.read_remaining().to_vec();

        Ok(Self {
            rdm_version,
            net,
            command,
            address,
            data,
        })
    }

    pub fn write(&self, writer: &mut BinaryWriter) {
        write_header(writer, OpCode::Rdm.value(), layout::PROTOCOL_VERSION);
        writer.write_u8(self.rdm_version);
        writer.write_zeros(8);
        writer.write_u8(self.net);
        writer.write_u8(self.command);
        writer.write_u8(self.address);
        writer.write_bytes(&self.data);
    }
}

#[cfg(test)]
mod tests {
    use super::RdmCarrierPacket;
    use crate::artnet::packet::ArtNetPacket;
    use crate::rdm::packets::discovery_state;
    use crate::rdm::{RdmPacket, layout};

    #[test]
    fn round_trip() {
        let carrier = RdmCarrierPacket {
            rdm_version: layout::SC_SUB_MESSAGE,
            net: 0x02,
            command: 0,
            address: 0x03,
            data: vec![1, 2, 3],
        };
        let bytes = ArtNetPacket::Rdm(carrier.clone()).to_bytes();
        let decoded = ArtNetPacket::from_datagram(&bytes, None).unwrap();
        assert_eq!(decoded, ArtNetPacket::Rdm(carrier));
    }

    #[test]
    fn wrap_splits_universe_into_net_and_address() {
        let request = RdmPacket::from(discovery_state::Get { endpoint_id: 1 });
        let carrier = RdmCarrierPacket::wrap(&request, 0x0203);
        assert_eq!(carrier.net, 0x02);
        assert_eq!(carrier.address, 0x03);
        assert_eq!(carrier.rdm_version, layout::SC_SUB_MESSAGE);
        // Header, two bytes of body, checksum trailer.
        assert_eq!(
            carrier.data.len(),
            layout::HEADER_SIZE + 2 + layout::CHECKSUM_SIZE
        );
    }
}
