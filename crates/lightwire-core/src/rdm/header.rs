use super::layout;
use super::uid::UId;
use crate::io::{BinaryReader, BinaryWriter, CodecError};

/// Command classes of the device-management protocol.
///
/// Construct from wire bytes with [`RdmCommand::from_value`], which
/// normalises known codes onto their named variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RdmCommand {
    Discovery,
    DiscoveryResponse,
    Get,
    GetResponse,
    Set,
    SetResponse,
    Other(u8),
}

impl RdmCommand {
    pub fn value(self) -> u8 {
        match self {
            RdmCommand::Discovery => 0x10,
            RdmCommand::DiscoveryResponse => 0x11,
            RdmCommand::Get => 0x20,
            RdmCommand::GetResponse => 0x21,
            RdmCommand::Set => 0x30,
            RdmCommand::SetResponse => 0x31,
            RdmCommand::Other(value) => value,
        }
    }

    pub fn from_value(value: u8) -> Self {
        match value {
            0x10 => RdmCommand::Discovery,
            0x11 => RdmCommand::DiscoveryResponse,
            0x20 => RdmCommand::Get,
            0x21 => RdmCommand::GetResponse,
            0x30 => RdmCommand::Set,
            0x31 => RdmCommand::SetResponse,
            other => RdmCommand::Other(other),
        }
    }
}

/// Parameter identifiers understood by the typed body dispatch; everything
/// else round-trips through `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RdmParameter {
    DiscoveryState,
    EndpointMode,
    EndpointDeviceListChange,
    Other(u16),
}

impl RdmParameter {
    pub fn value(self) -> u16 {
        match self {
            RdmParameter::DiscoveryState => 0x0904,
            RdmParameter::EndpointMode => 0x0907,
            RdmParameter::EndpointDeviceListChange => 0x0909,
            RdmParameter::Other(value) => value,
        }
    }

    pub fn from_value(value: u16) -> Self {
        match value {
            0x0904 => RdmParameter::DiscoveryState,
            0x0907 => RdmParameter::EndpointMode,
            0x0909 => RdmParameter::EndpointDeviceListChange,
            other => RdmParameter::Other(other),
        }
    }
}

/// Values of the port-or-response-type header byte on responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RdmResponseType {
    Ack,
    AckTimer,
    NackReason,
    AckOverflow,
}

impl RdmResponseType {
    pub fn value(self) -> u8 {
        match self {
            RdmResponseType::Ack => 0x00,
            RdmResponseType::AckTimer => 0x01,
            RdmResponseType::NackReason => 0x02,
            RdmResponseType::AckOverflow => 0x03,
        }
    }
}

/// Shared header of every device-management request and response.
///
/// Owned by the packet that carries it; the engine fills the source and
/// destination identifiers (and the sub-device index for sub-device
/// targets) when addressing a request before send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RdmHeader {
    pub destination_id: UId,
    pub source_id: UId,
    pub transaction_number: u8,
    /// Port id on requests; response type on responses.
    pub port_or_response_type: u8,
    pub message_count: u8,
    pub sub_device: u16,
    pub command: RdmCommand,
    pub parameter_id: RdmParameter,
}

impl RdmHeader {
    pub fn new(command: RdmCommand, parameter_id: RdmParameter) -> Self {
        Self {
            destination_id: UId::EMPTY,
            source_id: UId::EMPTY,
            transaction_number: 0,
            port_or_response_type: 1,
            message_count: 0,
            sub_device: 0,
            command,
            parameter_id,
        }
    }

    /// Decode the header; returns it with the declared parameter-data
    /// length, which the caller uses to slice the body.
    pub(crate) fn read(reader: &mut BinaryReader<'_>) -> Result<(Self, u8), CodecError> {
        let _message_length = reader.read_u8()?;
        let destination_id = UId::from_bytes(reader.read_array()?);
        let source_id = UId::from_bytes(reader.read_array()?);
        let transaction_number = reader.read_u8()?;
        let port_or_response_type = reader.read_u8()?;
        let message_count = reader.read_u8()?;
        let sub_device = reader.read_u16_be()?;
        let command = RdmCommand::from_value(reader.read_u8()?);
        let parameter_id = RdmParameter::from_value(reader.read_u16_be()?);
        let parameter_data_length = reader.read_u8()?;

        Ok((
            Self {
                destination_id,
                source_id,
                transaction_number,
                port_or_response_type,
                message_count,
                sub_device,
                command,
                parameter_id,
            },
            parameter_data_length,
        ))
    }

    pub(crate) fn write(&self, writer: &mut BinaryWriter, parameter_data_length: u8) {
        writer.write_u8(layout::MESSAGE_LENGTH_BASE + parameter_data_length);
        writer.write_bytes(&self.destination_id.to_bytes());
        writer.write_bytes(&self.source_id.to_bytes());
        writer.write_u8(self.transaction_number);
        writer.write_u8(self.port_or_response_type);
        writer.write_u8(self.message_count);
        writer.write_u16_be(self.sub_device);
        writer.write_u8(self.command.value());
        writer.write_u16_be(self.parameter_id.value());
        writer.write_u8(parameter_data_length);
    }
}
