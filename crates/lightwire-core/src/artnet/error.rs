use thiserror::Error;

use crate::io::CodecError;

#[derive(Debug, Error)]
pub enum ArtNetError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("invalid DMX length {length}: must be within 1..=512")]
    InvalidLength { length: usize },

    #[error("unrecognized timecode rate type {value:#04x}")]
    InvalidTimecodeRate { value: u8 },

    #[error("datagram does not carry the Art-Net tag")]
    BadSignature,
}
