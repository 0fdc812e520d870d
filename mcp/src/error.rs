//! # Error
//!
//! Module dedicated to transport errors. Tool-level failures never
//! surface here: they are rendered as textual responses by the
//! [`handler`](crate::handler). It contains an [`Error`] enum based
//! on [`thiserror::Error`] and a type alias [`Result`].

use std::{io, result};

use thiserror::Error;

/// The global `Result` alias of the library.
pub type Result<T> = result::Result<T, Error>;

/// The global `Error` enum of the library.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read request from standard input")]
    ReadRequestError(#[source] io::Error),
    #[error("cannot write response to standard output")]
    WriteResponseError(#[source] io::Error),
    #[error("cannot serialize response")]
    SerializeResponseError(#[source] serde_json::Error),
}
