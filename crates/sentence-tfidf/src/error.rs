//! # Error Types

/// Errors from fitting a vocabulary or encoding sentences.
#[derive(Debug, thiserror::Error)]
pub enum PreProcessingError {
    /// A parameter is malformed or out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The training corpus has no sentences, or its sentences hold no tokens.
    #[error("corpus holds no tokens to fit a vocabulary on")]
    EmptyCorpus,

    /// The model does not hold a consistent fitted vocabulary.
    #[error("model is not fitted: {0}")]
    ModelNotFitted(String),

    /// The model could not be encoded to bytes.
    #[cfg(feature = "bincode")]
    #[error(transparent)]
    Encode(#[from] bincode::error::EncodeError),

    /// The bytes could not be decoded into a model.
    #[cfg(feature = "bincode")]
    #[error(transparent)]
    Decode(#[from] bincode::error::DecodeError),
}

/// Result type for pre-processing operations.
pub type PreProcessingResult<T> = core::result::Result<T, PreProcessingError>;
