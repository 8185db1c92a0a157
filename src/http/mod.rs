//! HTTP protocol layer module
//!
//! Metadata derivation helpers and the mapping of content descriptors onto
//! response headers and bodies.

pub mod body;
pub mod date;
pub mod header;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use body::ContentBody;
pub use header::content_headers;
pub use response::{
    build_404_response, build_405_response, build_500_response, plan_transfer, ResponseBody,
    Transfer, TransferStrategy,
};
