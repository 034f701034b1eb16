use thiserror::Error;

/// Message used when a failed response carries no usable `detail`.
pub const GENERIC_SERVER_MESSAGE: &str = "An error occurred";

/// Message used whenever a request was sent but no response came back.
pub const NETWORK_UNREACHABLE_MESSAGE: &str =
    "No response from server. Please check if the backend is running.";

/// Normalized failure of a users API call.
///
/// Every transport or server failure maps to exactly one variant carrying
/// one human-readable message, which is also the `Display` output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a failure status.
    #[error("{message}")]
    Server { message: String },
    /// The request went out but no response arrived.
    #[error("{message}")]
    Network { message: String },
    /// The request could not be built or sent.
    #[error("{message}")]
    Request { message: String },
}

impl ApiError {
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }

    pub fn network() -> Self {
        Self::Network {
            message: NETWORK_UNREACHABLE_MESSAGE.to_string(),
        }
    }

    pub fn request(message: impl Into<String>) -> Self {
        Self::Request {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Server { message } | Self::Network { message } | Self::Request { message } => {
                message
            }
        }
    }
}
