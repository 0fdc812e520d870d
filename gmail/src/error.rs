//! # Error
//!
//! Module dedicated to Gmail client errors. It contains an [`Error`]
//! enum based on [`thiserror::Error`] and a type alias [`Result`].

use std::{any::Any, io, path::PathBuf, result};

use batch::{AnyBoxedError, AnyError};
use thiserror::Error;

/// The global `Result` alias of the library.
pub type Result<T> = result::Result<T, Error>;

/// The global `Error` enum of the library.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read credentials file at {1}")]
    ReadCredentialsFileError(#[source] io::Error, PathBuf),
    #[error("cannot read OAuth tokens file at {1}")]
    ReadTokensFileError(#[source] io::Error, PathBuf),
    #[error("cannot parse credentials file at {1}")]
    ParseCredentialsFileError(#[source] serde_json::Error, PathBuf),
    #[error("cannot parse OAuth tokens file at {1}")]
    ParseTokensFileError(#[source] serde_json::Error, PathBuf),
    #[error("cannot find OAuth client keys: missing installed and web sections")]
    GetAppKeysError,
    #[error("cannot find access token nor refresh token for the Gmail account")]
    GetAccessTokenMissingError,
    #[error("cannot refresh access token")]
    RefreshAccessTokenError(#[source] ureq::Error),
    #[error("cannot read access token response")]
    ReadAccessTokenResponseError(#[source] ureq::Error),
    #[error("cannot parse access token response")]
    ParseAccessTokenResponseError(#[source] serde_json::Error),
    #[error("cannot delete message {1}")]
    DeleteMessageError(#[source] ureq::Error, String),

    #[cfg(feature = "tokio")]
    #[error(transparent)]
    JoinError(#[from] tokio::task::JoinError),
}

impl AnyError for Error {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl From<Error> for AnyBoxedError {
    fn from(err: Error) -> Self {
        Box::new(err)
    }
}
