use thiserror::Error;

/// Raised when user supplied address text is malformed.
///
/// Always produced before any frame is sent, so an operation rejected with
/// this error has no side effects on the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("invalid IPv4 address: '{0}'")]
    Ip(String),
    #[error("invalid MAC address: '{0}'")]
    Mac(String),
    #[error("invalid network '{input}': {reason}")]
    Network { input: String, reason: String },
}
