use crate::artnet::packet::write_header;
use crate::io::{BinaryReader, BinaryWriter};

/// Passthrough for opcodes outside the dispatch table.
///
/// Keeps opcode, version and body verbatim so unrecognized traffic can be
/// re-emitted without loss; the body length always equals the received
/// datagram length minus the fixed header size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnknownPacket {
    pub opcode: u16,
    pub version: u16,
    pub data: Vec<u8>,
}

impl UnknownPacket {
    pub(crate) fn read(opcode: u16, version: u16, reader: &mut BinaryReader<'_>) -> Self {
        Self {
            opcode,
            version,
            data: reader.read_remaining().to_vec(),
        }
    }

    pub fn write(&self, writer: &mut BinaryWriter) {
        write_header(writer, self.opcode, self.version);
        writer.write_bytes(&self.data);
    }
}
