use serde::{Deserialize, Serialize};

use crate::artnet::error::ArtNetError;
use crate::artnet::layout;
use crate::artnet::opcode::OpCode;
use crate::artnet::packet::write_header;
use crate::io::{BinaryReader, BinaryWriter};

/// SMPTE-style time reference distributed to synchronise playback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timecode {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
    pub frames: u8,
    /// Frames per second; one of 24, 25, 29.97 or 30.
    pub frame_rate: f32,
}

impl Default for Timecode {
    fn default() -> Self {
        Self {
            hours: 0,
            minutes: 0,
            seconds: 0,
            frames: 0,
            frame_rate: 30.0,
        }
    }
}

/// Carries a timecode update; the leading filler byte is always zero on
/// the wire and ignored on read.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimecodePacket {
    pub stream_id: u8,
    pub timecode: Timecode,
}

impl TimecodePacket {
    pub(crate) fn read(reader: &mut BinaryReader<'_>) -> Result<Self, ArtNetError> {
        reader.skip(1)?;
        let stream_id = reader.read_u8()?;
        let frames = reader.read_u8()?;
        let seconds = reader.read_u8()?;
        let minutes = reader.read_u8()?;
        let hours = reader.read_u8()?;
        let frame_rate = frame_rate_from_type(reader.read_u8()?)?;

        Ok(Self {
            stream_id,
            timecode: Timecode {
                hours,
                minutes,
                seconds,
                frames,
                frame_rate,
            },
        })
    }

    pub fn write(&self, writer: &mut BinaryWriter) {
        write_header(writer, OpCode::Timecode.value(), layout::PROTOCOL_VERSION);
        writer.write_u8(0);
        writer.write_u8(self.stream_id);
        writer.write_u8(self.timecode.frames);
        writer.write_u8(self.timecode.seconds);
        writer.write_u8(self.timecode.minutes);
        writer.write_u8(self.timecode.hours);
        writer.write_u8(type_from_frame_rate(self.timecode.frame_rate));
    }
}

fn frame_rate_from_type(value: u8) -> Result<f32, ArtNetError> {
    match value {
        0 => Ok(24.0),
        1 => Ok(25.0),
        2 => Ok(29.97),
        3 => Ok(30.0),
        value => Err(ArtNetError::InvalidTimecodeRate { value }),
    }
}

/// Unrecognized rates fall back to the 30 fps encoding.
fn type_from_frame_rate(rate: f32) -> u8 {
    if rate == 24.0 {
        0
    } else if rate == 25.0 {
        1
    } else if rate == 29.97 {
        2
    } else {
        3
    }
}

#[cfg(test)]
mod tests {
    use super::{Timecode, TimecodePacket};
    use crate::artnet::error::ArtNetError;
    use crate::artnet::packet::ArtNetPacket;

    #[test]
    fn round_trip() {
        let packet = TimecodePacket {
            stream_id: 2,
            timecode: Timecode {
                hours: 1,
                minutes: 2,
                seconds: 3,
                frames: 24,
                frame_rate: 25.0,
            },
        };
        let bytes = ArtNetPacket::Timecode(packet).to_bytes();
        assert_eq!(bytes.len(), 19);
        // Filler byte stays zero, rate type encodes 25 fps.
        assert_eq!(bytes[12], 0);
        assert_eq!(bytes[18], 1);

        let decoded = ArtNetPacket::from_datagram(&bytes, None).unwrap();
        assert_eq!(decoded, ArtNetPacket::Timecode(packet));
    }

    #[test]
    fn drop_frame_rate_round_trips() {
        let packet = TimecodePacket {
            stream_id: 0,
            timecode: Timecode {
                frame_rate: 29.97,
                ..Timecode::default()
            },
        };
        let bytes = ArtNetPacket::Timecode(packet).to_bytes();
        assert_eq!(bytes[18], 2);
        let decoded = ArtNetPacket::from_datagram(&bytes, None).unwrap();
        assert_eq!(decoded, ArtNetPacket::Timecode(packet));
    }

    #[test]
    fn unrecognized_rate_writes_as_30() {
        let packet = TimecodePacket {
            stream_id: 0,
            timecode: Timecode {
                frame_rate: 23.976,
                ..Timecode::default()
            },
        };
        let bytes = ArtNetPacket::Timecode(packet).to_bytes();
        assert_eq!(bytes[18], 3);
    }

    #[test]
    fn unrecognized_type_byte_is_an_error() {
        let packet = TimecodePacket::default();
        let mut bytes = ArtNetPacket::Timecode(packet).to_bytes();
        bytes[18] = 9;
        let err = ArtNetPacket::from_datagram(&bytes, None).unwrap_err();
        assert!(matches!(
            err,
            ArtNetError::InvalidTimecodeRate { value: 9 }
        ));
    }
}
