use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("truncated data: need {needed} bytes, got {actual}")]
    TruncatedData { needed: usize, actual: usize },
}
