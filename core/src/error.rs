use std::io;

use arpr_common::error::AddressError;
use arpr_protocols::EncodeError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure of the link-layer channel. Surfaced to the caller, never retried.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("opening on {interface}")]
    Open {
        interface: String,
        #[source]
        source: io::Error,
    },
    #[error("non-ethernet channel for {0}")]
    NotEthernet(String),
    #[error("sending frame failed")]
    Send(#[source] io::Error),
    #[error("sender on {0} has no room for the frame")]
    SendUnavailable(String),
    #[error("receiving frame failed")]
    Receive(#[source] io::Error),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    InvalidAddress(#[from] AddressError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("building frame failed")]
    Encode(#[from] EncodeError),
    #[error("root privileges are required for raw link-layer access")]
    Privilege,
}
