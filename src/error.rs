use std::result;
use thiserror::Error;

/// Errors returned by the fallible operations of this crate.
///
/// Lookups of missing keys are not errors; they are reported through `Option` or `bool` return
/// values instead.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    /// A constructor or operation received a parameter outside of its valid range. The structure
    /// was left unmodified.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// An insertion that requires a unique key found the key already present. The structure was
    /// left unmodified.
    #[error("key already exists")]
    DuplicateKey,
}

/// Convenience alias for results produced by this crate.
pub type Result<T> = result::Result<T, Error>;
