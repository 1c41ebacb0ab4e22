//! Error taxonomy for remote calls
//!
//! Every remote failure is fatal for the current run; errors bubble up to the
//! CLI unrecovered. `Auth` covers the token exchange, `Remote` every other
//! non-success response.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The token endpoint refused the assertion exchange.
    #[error("obtaining the oauth token failed with status {status}")]
    Auth { status: StatusCode },

    /// Any other endpoint answered with a non-success status.
    #[error("request to {url} failed with status {status}")]
    Remote { status: StatusCode, url: String },

    /// A call that requires a bearer token was made before `authenticate`.
    #[error("not authenticated: call authenticate() first")]
    NotAuthenticated,

    /// Connection, timeout, or body decoding failure from the transport.
    #[error("transport error")]
    Transport(#[from] reqwest::Error),

    /// The configured API root is not a valid URL.
    #[error("invalid API URL")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// Status code carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Auth { status } => Some(*status),
            ApiError::Remote { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status(),
            _ => None,
        }
    }
}
