//! # Error
//!
//! Module dedicated to batch processing errors. Bulk operations are
//! provided by callers, so their error type is not known at
//! compilation time: this module contains the downcastable [`AnyError`]
//! trait and its boxed [`AnyBoxedError`] alias used to capture them.

use std::{any::Any, error, result};

/// The any `Result` alias of the library.
///
/// Alias dedicated to results returned by caller-provided bulk
/// operations, which take a dynamic error [`AnyBoxedError`].
pub type AnyResult<T> = result::Result<T, AnyBoxedError>;

/// The any, downcastable `Error` trait of the library.
///
/// This trait is used when an error that is not known at compilation
/// time cannot be placed in a generic due to object-safe trait
/// constraint. The main use case is for bulk operations provided by
/// callers of [`process`](crate::process).
pub trait AnyError: error::Error + Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

/// The any boxed `Error` alias of the library.
pub type AnyBoxedError = Box<dyn AnyError + Send + 'static>;

impl error::Error for AnyBoxedError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.as_ref().source()
    }
}
