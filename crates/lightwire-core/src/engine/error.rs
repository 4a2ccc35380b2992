use thiserror::Error;

use crate::artnet::ArtNetError;
use crate::rdm::RdmError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine is not open")]
    NotOpen,

    #[error("engine is already open")]
    AlreadyOpen,

    #[error(transparent)]
    Transport(#[from] std::io::Error),

    #[error(transparent)]
    Packet(#[from] ArtNetError),

    #[error(transparent)]
    Rdm(#[from] RdmError),
}
