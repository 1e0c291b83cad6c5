#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum Error {
    #[error("no free payload type left in the dynamic range 96-127")]
    ErrDynamicPayloadTypesExhausted,
    #[error("no usable codec for this media type")]
    ErrNoUsableCodec,
    #[error("no compatible codec could be negotiated")]
    ErrNoCompatibleCodec,
    #[error("remote codec list is empty")]
    ErrNoRemoteCodecs,
    #[error("local codecs have not been created")]
    ErrNoLocalCodecs,
    #[error("codec preferences: {0}")]
    ErrInvalidCodecPreferences(String),
    #[error("negotiation config: {0}")]
    ErrInvalidNegotiationConfig(String),

    #[error("{0}")]
    Io(#[source] IoError),
}

#[derive(Debug, Error)]
#[error("io error: {0}")]
pub struct IoError(#[from] pub std::io::Error);

// Workaround for wanting PartialEq for io::Error.
impl PartialEq for IoError {
    fn eq(&self, other: &Self) -> bool {
        self.0.kind() == other.0.kind()
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(IoError(e))
    }
}
