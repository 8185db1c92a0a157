//! Error types
//!
//! Absent metadata is never an error; only I/O failures and unrepresentable
//! header values are.

use hyper::header::InvalidHeaderValue;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ContentError>;

#[derive(Error, Debug)]
pub enum ContentError {
    /// Reading, opening or buffering the underlying resource failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A metadata value cannot be carried in an HTTP header
    #[error("Invalid {name} header value: {source}")]
    InvalidHeader {
        name: &'static str,
        #[source]
        source: InvalidHeaderValue,
    },
}
