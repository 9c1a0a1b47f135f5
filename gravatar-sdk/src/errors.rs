//! Unified error types for the `gravatar` crate.
//!
//! This module centralizes all failures that can occur while using the SDK and
//! provides a single top-level [`Error`] enum plus the convenient [`Result`] alias.
//! Errors from lower layers (transport, HTTP status, URL assembly, decoding) are
//! mapped into structured variants so callers can handle them precisely.

use bytes::Bytes;
use gravatar_common::DecodeError;
use reqwest::StatusCode;
use thiserror::Error;

/// Boxed transport cause, so any [`crate::HttpClient`] backend can report its own errors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// --- Build-Time Error ---

/// Errors that can occur while building a [`crate::GravatarHttpClient`].
#[derive(Debug, Error)]
pub enum BuildError {
    /// Failed to build the HTTP client (reqwest configuration).
    #[error("Failed to build the HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

// --- The Main Operational Error Enum ---

/// The crate’s top-level error type.
///
/// It groups failures into high-level categories:
/// - [`Error::Request`] — transport, malformed response or HTTP status failures
/// - [`Error::Url`] — a request URL could not be assembled
/// - [`Error::Decode`] — the body did not match the expected schema
/// - [`Error::NoProfileInResponse`] — a legacy profile response had no entry
/// - [`Error::InvalidAccountInfo`] — empty email or token supplied by the caller
/// - [`Error::InvalidHeader`] — a caller-supplied header value is not valid HTTP
/// - [`Error::Build`] — construction of the client failed
///
/// Most lower-level errors automatically convert into this enum via `From`.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request/response failed.
    #[error("Request failed: {0}")]
    Request(#[from] RequestError),

    /// URL assembly failed while preparing a request.
    #[error("Failed to build URL: {0}")]
    Url(#[from] url::ParseError),

    /// The response body did not match the expected schema.
    #[error("Failed to decode response: {0}")]
    Decode(#[source] DecodeError),

    /// The service answered, but without any profile in it.
    #[error("No profile in response")]
    NoProfileInResponse,

    /// Email or token was empty. Raised before any network call.
    #[error("Invalid account info")]
    InvalidAccountInfo,

    /// A header value supplied for a request is not valid HTTP.
    #[error("Invalid value for header {name}: {message}")]
    InvalidHeader {
        /// Header name.
        name: String,
        /// Why the value was rejected.
        message: String,
    },

    /// Building the client failed.
    #[error("Client build failed: {0}")]
    Build(#[from] BuildError),
}

impl Error {
    /// HTTP status of the failed response, if the failure was an HTTP status error.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Request(RequestError::Status { status, .. }) => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the failure happened at the transport level (including cancellation).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Request(RequestError::Transport(_) | RequestError::Cancelled)
        )
    }
}

impl From<DecodeError> for Error {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::NoProfileInResponse => Error::NoProfileInResponse,
            other => Error::Decode(other),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(DecodeError::Json(err))
    }
}

// --- Consolidated Request Error ---

/// Transport and server-side HTTP errors.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Network/protocol failure (connection, timeout, TLS, I/O, ...).
    #[error("HTTP transport error: {0}")]
    Transport(#[source] BoxError),

    /// The request was cancelled before a response arrived.
    #[error("HTTP request cancelled")]
    Cancelled,

    /// The exchange completed, but the response is not a well-formed HTTP response.
    #[error("Malformed HTTP response: {message}")]
    MalformedResponse {
        /// What was wrong with the response.
        message: String,
    },

    /// The server returned a 4xx or 5xx status. The body is kept so callers
    /// can decode service-specific error payloads.
    #[error("Server responded with an error: {status}")]
    Status {
        /// The HTTP status code returned by the server.
        status: StatusCode,
        /// The raw response body.
        body: Bytes,
    },
}

impl RequestError {
    /// Wrap any backend error as a transport failure.
    pub fn transport<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        RequestError::Transport(err.into())
    }

    /// The response body of a status error, as lossy UTF-8.
    pub fn body_text(&self) -> Option<String> {
        match self {
            RequestError::Status { body, .. } => Some(String::from_utf8_lossy(body).into_owned()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        RequestError::Transport(Box::new(err))
    }
}

/// A specialized `Result` type for `gravatar` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors of the legacy [`crate::GravatarService`] facade.
///
/// The facade intentionally narrows the richer [`Error`] taxonomy for older
/// call sites.
#[derive(Debug, Error)]
pub enum GravatarServiceError {
    /// Empty email or token, or any failure while fetching a profile.
    #[error("Invalid account info")]
    InvalidAccountInfo,

    /// A request URL could not be assembled.
    #[error("Invalid URL")]
    InvalidUrl,

    /// Any other failure.
    #[error("An unexpected error has occurred: {0}")]
    Unexpected(#[source] Error),
}

// Ergonomic "Staircase" From Implementations ---
// A macro to reduce boilerplate for converting base errors into the top-level Error.
macro_rules! impl_from_for_error {
    ($from_type:ty, $to_variant:path) => {
        impl From<$from_type> for Error {
            fn from(err: $from_type) -> Self {
                $to_variant(err.into())
            }
        }
    };
}

impl_from_for_error!(reqwest::Error, Error::Request);
