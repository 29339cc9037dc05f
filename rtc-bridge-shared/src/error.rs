#![allow(dead_code)]

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Indicates the media-acquisition capability failed to deliver local media.
    #[error("media acquisition failed: {0}")]
    ErrMediaAcquisition(String),

    /// Indicates the transport engine failed to create an offer or an answer.
    #[error("negotiation failed: {0}")]
    ErrNegotiation(String),

    /// Indicates the transport engine rejected a local or remote description.
    #[error("set description failed: {0}")]
    ErrSetDescription(String),

    /// Indicates a handle that was released or never registered.
    #[error("invalid handle")]
    ErrInvalidHandle,

    /// Indicates the local description type does not match the requested one.
    #[error("local description type mismatch")]
    ErrTypeMismatch,

    #[error("no local description")]
    ErrNoLocalDescription,

    /// Indicates the connection has no live transport: either `create` was
    /// never called or the connection was closed.
    #[error("transport connection not available")]
    ErrNoTransport,

    #[error("transport connection already created")]
    ErrTransportAlreadyCreated,

    #[error("data channel is not open")]
    ErrDataChannelNotOpen,

    #[error("unknown data channel")]
    ErrUnknownDataChannel,

    /// Any other fault raised by the transport engine.
    #[error("transport: {0}")]
    ErrTransport(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Invalid handles are expected around close races and never reported
    /// as faults.
    pub fn is_invalid_handle(&self) -> bool {
        matches!(self, Error::ErrInvalidHandle)
    }
}

/// flatten_errs flattens multiple errors into one
pub fn flatten_errs(errs: Vec<impl Into<Error>>) -> Result<()> {
    if errs.is_empty() {
        Ok(())
    } else {
        let errs_strs: Vec<String> = errs.into_iter().map(|e| e.into().to_string()).collect();
        Err(Error::Other(errs_strs.join("\n")))
    }
}
