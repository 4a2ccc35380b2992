use super::error::RdmError;
use super::header::{RdmCommand, RdmHeader, RdmParameter, RdmResponseType};
use super::layout;
use super::packets::{device_list_change, discovery_state, endpoint_mode, nack};
use crate::io::{BinaryReader, BinaryWriter};

/// Checksum of a serialized packet: unsigned accumulation of every byte
/// plus the two start-code constants the carrier framing strips, truncated
/// to 16 bits at emission.
pub fn checksum(bytes: &[u8]) -> u16 {
    let sum: u32 = bytes.iter().map(|&b| u32::from(b)).sum::<u32>()
        + u32::from(layout::SC_SUB_MESSAGE)
        + u32::from(layout::SC_RDM);
    (sum & 0xffff) as u16
}

/// A device-management packet: shared header plus a parameter body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RdmPacket {
    pub header: RdmHeader,
    pub body: RdmBody,
}

/// Parameter bodies with typed decoders; everything else passes through
/// `Raw` byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RdmBody {
    Nack(nack::Nack),
    DiscoveryStateGet(discovery_state::Get),
    DiscoveryStateGetReply(discovery_state::GetReply),
    DiscoveryStateSet(discovery_state::Set),
    DiscoveryStateSetReply(discovery_state::SetReply),
    EndpointModeGet(endpoint_mode::Get),
    EndpointModeGetReply(endpoint_mode::GetReply),
    EndpointModeSet(endpoint_mode::Set),
    EndpointModeSetReply(endpoint_mode::SetReply),
    DeviceListChangeGet(device_list_change::Get),
    DeviceListChangeReply(device_list_change::Reply),
    Raw(Vec<u8>),
}

impl RdmBody {
    pub(crate) fn write(&self, writer: &mut BinaryWriter) {
        match self {
            RdmBody::Nack(body) => body.write(writer),
            RdmBody::DiscoveryStateGet(body) => body.write(writer),
            RdmBody::DiscoveryStateGetReply(body) => body.write(writer),
            RdmBody::DiscoveryStateSet(body) => body.write(writer),
            RdmBody::DiscoveryStateSetReply(body) => body.write(writer),
            RdmBody::EndpointModeGet(body) => body.write(writer),
            RdmBody::EndpointModeGetReply(body) => body.write(writer),
            RdmBody::EndpointModeSet(body) => body.write(writer),
            RdmBody::EndpointModeSetReply(body) => body.write(writer),
            RdmBody::DeviceListChangeGet(body) => body.write(writer),
            RdmBody::DeviceListChangeReply(body) => body.write(writer),
            RdmBody::Raw(data) => writer.write_bytes(data),
        }
    }
}

impl RdmPacket {
    /// Negative acknowledgement for `command`/`parameter_id`; sets the
    /// response-type header byte accordingly.
    pub fn nack(command: RdmCommand, parameter_id: RdmParameter, reason: nack::NackReason) -> Self {
        let mut header = RdmHeader::new(command, parameter_id);
        header.port_or_response_type = RdmResponseType::NackReason.value();
        Self {
            header,
            body: RdmBody::Nack(nack::Nack { reason }),
        }
    }

    /// Packet with an untyped parameter body. Rejects data over the wire
    /// limit so serialization stays within the one-byte length field.
    pub fn raw(
        command: RdmCommand,
        parameter_id: RdmParameter,
        data: Vec<u8>,
    ) -> Result<Self, RdmError> {
        if data.len() > layout::MAX_PARAMETER_DATA_LENGTH {
            return Err(RdmError::ParameterTooLong { length: data.len() });
        }
        Ok(Self {
            header: RdmHeader::new(command, parameter_id),
            body: RdmBody::Raw(data),
        })
    }

    /// Decode one packet from a carrier payload. Any checksum trailer is
    /// left unconsumed.
    pub fn read(reader: &mut BinaryReader<'_>) -> Result<Self, RdmError> {
        let (header, parameter_data_length) = RdmHeader::read(reader)?;
        let data = reader.read_bytes(usize::from(parameter_data_length))?;
        let mut body_reader = BinaryReader::new(data);

        let is_nack = header.port_or_response_type == RdmResponseType::NackReason.value()
            && matches!(
                header.command,
                RdmCommand::GetResponse | RdmCommand::SetResponse
            );

        let body = if is_nack {
            RdmBody::Nack(nack::Nack::read(&mut body_reader)?)
        } else {
            match (header.command, header.parameter_id) {
                (RdmCommand::Get, RdmParameter::DiscoveryState) => {
                    RdmBody::DiscoveryStateGet(discovery_state::Get::read(&mut body_reader)?)
                }
                (RdmCommand::GetResponse, RdmParameter::DiscoveryState) => {
                    RdmBody::DiscoveryStateGetReply(discovery_state::GetReply::read(
                        &mut body_reader,
                    )?)
                }
                (RdmCommand::Set, RdmParameter::DiscoveryState) => {
                    RdmBody::DiscoveryStateSet(discovery_state::Set::read(&mut body_reader)?)
                }
                (RdmCommand::SetResponse, RdmParameter::DiscoveryState) => {
                    RdmBody::DiscoveryStateSetReply(discovery_state::SetReply)
                }
                (RdmCommand::Get, RdmParameter::EndpointMode) => {
                    RdmBody::EndpointModeGet(endpoint_mode::Get::read(&mut body_reader)?)
                }
                (RdmCommand::GetResponse, RdmParameter::EndpointMode) => {
                    RdmBody::EndpointModeGetReply(endpoint_mode::GetReply::read(&mut body_reader)?)
                }
                (RdmCommand::Set, RdmParameter::EndpointMode) => {
                    RdmBody::EndpointModeSet(endpoint_mode::Set::read(&mut body_reader)?)
                }
                (RdmCommand::SetResponse, RdmParameter::EndpointMode) => {
                    RdmBody::EndpointModeSetReply(endpoint_mode::SetReply)
                }
                (RdmCommand::Get, RdmParameter::EndpointDeviceListChange) => {
                    RdmBody::DeviceListChangeGet(device_list_change::Get::read(&mut body_reader)?)
                }
                (RdmCommand::GetResponse, RdmParameter::EndpointDeviceListChange) => {
                    RdmBody::DeviceListChangeReply(device_list_change::Reply::read(
                        &mut body_reader,
                    )?)
                }
                _ => RdmBody::Raw(data.to_vec()),
            }
        };

        Ok(Self { header, body })
    }

    /// Serialize header and body; `append_checksum` adds the high-low
    /// trailer covering exactly this packet's bytes.
    pub fn write(&self, writer: &mut BinaryWriter, append_checksum: bool) {
        let start = writer.position();

        let mut body = BinaryWriter::new();
        self.body.write(&mut body);
        let body = body.into_bytes();

        self.header.write(writer, body.len() as u8);
        writer.write_bytes(&body);

        if append_checksum {
            let sum = checksum(&writer.bytes()[start..]);
            writer.write_u16_be(sum);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RdmBody, RdmPacket, checksum};
    use crate::io::{BinaryReader, BinaryWriter};
    use crate::rdm::header::{RdmCommand, RdmParameter, RdmResponseType};
    use crate::rdm::layout;
    use crate::rdm::packets::discovery_state::{self, DiscoveryStates};
    use crate::rdm::packets::nack::NackReason;
    use crate::rdm::uid::UId;

    #[test]
    fn checksum_matches_transmitted_trailer() {
        let reply = RdmPacket::from(discovery_state::GetReply {
            endpoint_id: 5,
            device_count: 2,
            discovery_state: DiscoveryStates::Full,
        });

        let mut writer = BinaryWriter::new();
        reply.write(&mut writer, true);
        let bytes = writer.into_bytes();

        let (payload, trailer) = bytes.split_at(bytes.len() - layout::CHECKSUM_SIZE);
        let transmitted = u16::from_be_bytes([trailer[0], trailer[1]]);
        assert_eq!(checksum(payload), transmitted);
    }

    #[test]
    fn checksum_covers_arbitrary_bodies() {
        let packet = RdmPacket::raw(
            RdmCommand::Set,
            RdmParameter::Other(0x1010),
            vec![0xff, 0x00, 0x80, 0x7f],
        )
        .unwrap();

        let mut writer = BinaryWriter::new();
        packet.write(&mut writer, true);
        let bytes = writer.into_bytes();
        let (payload, trailer) = bytes.split_at(bytes.len() - layout::CHECKSUM_SIZE);
        assert_eq!(
            checksum(payload),
            u16::from_be_bytes([trailer[0], trailer[1]])
        );
    }

    #[test]
    fn read_dispatches_typed_bodies() {
        let mut request = RdmPacket::from(discovery_state::Set {
            endpoint_id: 7,
            discovery_state: DiscoveryStates::Incremental,
        });
        request.header.destination_id = UId::new(1, 2);

        let mut writer = BinaryWriter::new();
        request.write(&mut writer, true);
        let bytes = writer.into_bytes();

        let mut reader = BinaryReader::new(&bytes);
        let decoded = RdmPacket::read(&mut reader).unwrap();
        assert_eq!(decoded, request);
        // Only the checksum trailer is left over.
        assert_eq!(reader.remaining(), layout::CHECKSUM_SIZE);
    }

    #[test]
    fn nack_round_trips_as_sixteen_bit_reason() {
        let nack = RdmPacket::nack(
            RdmCommand::GetResponse,
            RdmParameter::EndpointMode,
            NackReason::UnsupportedCommandClass,
        );
        assert_eq!(
            nack.header.port_or_response_type,
            RdmResponseType::NackReason.value()
        );

        let mut writer = BinaryWriter::new();
        nack.write(&mut writer, false);
        let bytes = writer.into_bytes();
        // Two-byte body: the high-low reason code.
        assert_eq!(bytes.len(), layout::HEADER_SIZE + 2);
        assert_eq!(&bytes[layout::HEADER_SIZE..], &[0x00, 0x05]);

        let mut reader = BinaryReader::new(&bytes);
        let decoded = RdmPacket::read(&mut reader).unwrap();
        assert_eq!(decoded, nack);
    }

    #[test]
    fn unmatched_parameter_passes_through_raw() {
        let packet = RdmPacket::raw(
            RdmCommand::Get,
            RdmParameter::Other(0x2000),
            vec![1, 2, 3],
        )
        .unwrap();

        let mut writer = BinaryWriter::new();
        packet.write(&mut writer, false);
        let mut reader = BinaryReader::new(writer.bytes());
        let decoded = RdmPacket::read(&mut reader).unwrap();
        assert_eq!(decoded.body, RdmBody::Raw(vec![1, 2, 3]));
    }

    #[test]
    fn oversized_raw_parameter_is_rejected() {
        let err = RdmPacket::raw(
            RdmCommand::Set,
            RdmParameter::Other(0x2000),
            vec![0; layout::MAX_PARAMETER_DATA_LENGTH + 1],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            crate::rdm::RdmError::ParameterTooLong { length: 232 }
        ));
    }
}
