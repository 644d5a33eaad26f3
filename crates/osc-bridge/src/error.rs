//! OSC Error Types

use thiserror::Error;

/// Errors on the OSC boundary
#[derive(Debug, Error)]
pub enum OscError {
    /// Socket or address resolution failure
    #[error("OSC socket error: {0}")]
    Io(#[from] std::io::Error),

    /// Packet could not be encoded or decoded
    #[error("Malformed OSC packet: {0}")]
    Malformed(String),

    /// Argument type this bridge does not handle
    #[error("Unsupported OSC argument type '{0}'")]
    UnsupportedType(char),

    /// Client address that does not resolve to any socket address
    #[error("Unresolvable OSC client address '{0}'")]
    BadAddress(String),
}

impl From<rosc::OscError> for OscError {
    fn from(err: rosc::OscError) -> Self {
        OscError::Malformed(format!("{err:?}"))
    }
}
