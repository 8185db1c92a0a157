//! Request handler module
//!
//! Request dispatch and static file serving on top of content descriptors.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
