use super::error::ArtNetError;
use super::layout;
use super::opcode::OpCode;
use super::packets::{
    AddressPacket, DmxPacket, InputPacket, IpProgPacket, IpProgReplyPacket, PollPacket,
    PollReplyPacket, RdmCarrierPacket, RdmSubPacket, SyncPacket, TimecodePacket, TriggerPacket,
    UnknownPacket,
};
use crate::io::{BinaryReader, BinaryWriter};

/// Extension hook consulted for opcodes outside the built-in dispatch
/// table. Receives the raw opcode and the complete datagram; returning
/// `None` falls through to the `Unknown` passthrough variant.
pub type CustomPacketFn = dyn Fn(u16, &[u8]) -> Option<ArtNetPacket> + Send + Sync;

/// Closed union over every packet the engine understands, keyed by opcode.
#[derive(Debug, Clone, PartialEq)]
pub enum ArtNetPacket {
    Poll(PollPacket),
    PollReply(PollReplyPacket),
    Dmx(DmxPacket),
    Sync(SyncPacket),
    Address(AddressPacket),
    Input(InputPacket),
    Rdm(RdmCarrierPacket),
    RdmSub(RdmSubPacket),
    Timecode(TimecodePacket),
    Trigger(TriggerPacket),
    IpProg(IpProgPacket),
    IpProgReply(IpProgReplyPacket),
    Unknown(UnknownPacket),
}

impl ArtNetPacket {
    /// Raw opcode transmitted for this packet.
    pub fn opcode(&self) -> u16 {
        match self {
            ArtNetPacket::Poll(_) => OpCode::Poll.value(),
            ArtNetPacket::PollReply(_) => OpCode::PollReply.value(),
            ArtNetPacket::Dmx(_) => OpCode::Output.value(),
            ArtNetPacket::Sync(_) => OpCode::Sync.value(),
            ArtNetPacket::Address(_) => OpCode::Address.value(),
            ArtNetPacket::Input(_) => OpCode::Input.value(),
            ArtNetPacket::Rdm(_) => OpCode::Rdm.value(),
            ArtNetPacket::RdmSub(_) => OpCode::RdmSub.value(),
            ArtNetPacket::Timecode(_) => OpCode::Timecode.value(),
            ArtNetPacket::Trigger(_) => OpCode::Trigger.value(),
            ArtNetPacket::IpProg(_) => OpCode::IpProg.value(),
            ArtNetPacket::IpProgReply(_) => OpCode::IpProgReply.value(),
            ArtNetPacket::Unknown(packet) => packet.opcode,
        }
    }

    /// Decode a complete datagram, header included.
    ///
    /// An optional extension hook gets first refusal on opcodes outside the
    /// dispatch table; otherwise they land in `Unknown`.
    pub fn from_datagram(
        buf: &[u8],
        custom: Option<&CustomPacketFn>,
    ) -> Result<Self, ArtNetError> {
        let mut reader = BinaryReader::new(buf);
        let (opcode, version) = read_header(&mut reader)?;

        let packet = match OpCode::from_u16(opcode) {
            Some(OpCode::Poll) => ArtNetPacket::Poll(PollPacket::read(&mut reader)?),
            Some(OpCode::PollReply) => {
                ArtNetPacket::PollReply(PollReplyPacket::read(&mut reader)?)
            }
            Some(OpCode::Output) => ArtNetPacket::Dmx(DmxPacket::read(&mut reader)?),
            Some(OpCode::Sync) => ArtNetPacket::Sync(SyncPacket::read(&mut reader)?),
            Some(OpCode::Address) => ArtNetPacket::Address(AddressPacket::read(&mut reader)?),
            Some(OpCode::Input) => ArtNetPacket::Input(InputPacket::read(&mut reader)?),
            Some(OpCode::Rdm) => ArtNetPacket::Rdm(RdmCarrierPacket::read(&mut reader)?),
            Some(OpCode::RdmSub) => ArtNetPacket::RdmSub(RdmSubPacket::read(&mut reader)?),
            Some(OpCode::Timecode) => {
                ArtNetPacket::Timecode(TimecodePacket::read(&mut reader)?)
            }
            Some(OpCode::Trigger) => ArtNetPacket::Trigger(TriggerPacket::read(&mut reader)?),
            Some(OpCode::IpProg) => ArtNetPacket::IpProg(IpProgPacket::read(&mut reader)?),
            Some(OpCode::IpProgReply) => {
                ArtNetPacket::IpProgReply(IpProgReplyPacket::read(&mut reader)?)
            }
            _ => {
                if let Some(create) = custom {
                    if let Some(packet) = create(opcode, buf) {
                        return Ok(packet);
                    }
                }
                let version = version.unwrap_or(layout::PROTOCOL_VERSION);
                ArtNetPacket::Unknown(UnknownPacket::read(opcode, version, &mut reader))
            }
        };
        Ok(packet)
    }

    /// Emit header then body.
    pub fn write(&self, writer: &mut BinaryWriter) {
        match self {
            ArtNetPacket::Poll(packet) => packet.write(writer),
            ArtNetPacket::PollReply(packet) => packet.write(writer),
            ArtNetPacket::Dmx(packet) => packet.write(writer),
            ArtNetPacket::Sync(packet) => packet.write(writer),
            ArtNetPacket::Address(packet) => packet.write(writer),
            ArtNetPacket::Input(packet) => packet.write(writer),
            ArtNetPacket::Rdm(packet) => packet.write(writer),
            ArtNetPacket::RdmSub(packet) => packet.write(writer),
            ArtNetPacket::Timecode(packet) => packet.write(writer),
            ArtNetPacket::Trigger(packet) => packet.write(writer),
            ArtNetPacket::IpProg(packet) => packet.write(writer),
            ArtNetPacket::IpProgReply(packet) => packet.write(writer),
            ArtNetPacket::Unknown(packet) => packet.write(writer),
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = BinaryWriter::new();
        self.write(&mut writer);
        writer.into_bytes()
    }
}

/// Read the shared header and return `(opcode, version)`.
///
/// The poll-reply header omits the version word, a quirk of the wire
/// protocol that must be special-cased on both paths.
pub(crate) fn read_header(
    reader: &mut BinaryReader<'_>,
) -> Result<(u16, Option<u16>), ArtNetError> {
    let tag = reader.read_bytes(8)?;
    if tag != layout::ARTNET_ID {
        return Err(ArtNetError::BadSignature);
    }
    let opcode = reader.read_u16_le()?;
    let version = if opcode == OpCode::PollReply.value() {
        None
    } else {
        Some(reader.read_u16_be()?)
    };
    Ok((opcode, version))
}

/// Emit the shared header for `opcode`, omitting the version word for
/// poll-reply.
pub(crate) fn write_header(writer: &mut BinaryWriter, opcode: u16, version: u16) {
    writer.write_bytes(layout::ARTNET_ID);
    writer.write_u16_le(opcode);
    if opcode != OpCode::PollReply.value() {
        writer.write_u16_be(version);
    }
}
