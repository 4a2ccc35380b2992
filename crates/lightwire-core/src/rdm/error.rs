use thiserror::Error;

use crate::io::CodecError;

#[derive(Debug, Error)]
pub enum RdmError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("bundle send requires at least one packet")]
    EmptyBundle,

    #[error("parameter data length {length} exceeds the 231-byte limit")]
    ParameterTooLong { length: usize },
}
