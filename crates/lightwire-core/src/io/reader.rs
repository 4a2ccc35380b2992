use super::error::CodecError;

/// Positional reader over a received datagram.
pub struct BinaryReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> BinaryReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        let byte = *self.buf.get(self.pos).ok_or(CodecError::TruncatedData {
            needed: self.pos + 1,
            actual: self.buf.len(),
        })?;
        self.pos += 1;
        Ok(byte)
    }

    /// Low byte first, then high.
    pub fn read_u16_le(&mut self) -> Result<u16, CodecError> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// High byte first, then low.
    pub fn read_u16_be(&mut self) -> Result<u16, CodecError> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32_be(&mut self) -> Result<u32, CodecError> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8], CodecError> {
        let end = self.pos + count;
        let bytes = self
            .buf
            .get(self.pos..end)
            .ok_or(CodecError::TruncatedData {
                needed: end,
                actual: self.buf.len(),
            })?;
        self.pos = end;
        Ok(bytes)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Consume exactly `len` bytes and strip trailing NUL padding.
    pub fn read_string(&mut self, len: usize) -> Result<String, CodecError> {
        let bytes = self.read_bytes(len)?;
        let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        Ok(String::from_utf8_lossy(&bytes[..end]).into_owned())
    }

    pub fn read_remaining(&mut self) -> &'a [u8] {
        let bytes = &self.buf[self.pos..];
        self.pos = self.buf.len();
        bytes
    }

    pub fn skip(&mut self, count: usize) -> Result<(), CodecError> {
        self.read_bytes(count).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::BinaryReader;
    use crate::io::CodecError;

    #[test]
    fn dual_orderings_differ() {
        let mut reader = BinaryReader::new(&[0x12, 0x34, 0x12, 0x34]);
        assert_eq!(reader.read_u16_le().unwrap(), 0x3412);
        assert_eq!(reader.read_u16_be().unwrap(), 0x1234);
    }

    #[test]
    fn read_u32_be() {
        let mut reader = BinaryReader::new(&[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(reader.read_u32_be().unwrap(), 0x0102_0304);
    }

    #[test]
    fn read_string_strips_trailing_nuls() {
        let mut reader = BinaryReader::new(b"node\0\0\0\0rest");
        assert_eq!(reader.read_string(8).unwrap(), "node");
        assert_eq!(reader.read_remaining(), b"rest");
    }

    #[test]
    fn read_string_keeps_interior_nuls() {
        let mut reader = BinaryReader::new(b"a\0b\0");
        assert_eq!(reader.read_string(4).unwrap(), "a\0b");
    }

    #[test]
    fn read_past_end_is_truncated_data() {
        let mut reader = BinaryReader::new(&[1, 2]);
        reader.read_u8().unwrap();
        let err = reader.read_bytes(4).unwrap_err();
        assert_eq!(
            err,
            CodecError::TruncatedData {
                needed: 5,
                actual: 2
            }
        );
    }
}
