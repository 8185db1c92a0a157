//! Static content descriptors for an HTTP server
//!
//! A [`ResourceContent`] wraps one [`Resource`] (a file, an in-memory blob)
//! and exposes header-ready metadata (`Content-Type`, `Content-Length`,
//! `Last-Modified`, `ETag`) together with the ways its bytes can be
//! transferred: a shared or private in-memory buffer when the
//! [`BufferPolicy`] allows it, a stream or a seekable channel otherwise.
//!
//! ```
//! use yarhs_content::{BufferPolicy, HttpContent, MemoryResource, ResourceContent};
//!
//! let resource = MemoryResource::with_last_modified("hello.txt", "hello", 0);
//! let content = ResourceContent::with_options(
//!     resource,
//!     Some("text/plain; charset=utf-8"),
//!     BufferPolicy::new(1024),
//!     true,
//! );
//! assert_eq!(content.charset(), Some("utf-8"));
//! assert_eq!(content.content_length(), Some(5));
//! assert_eq!(&content.direct_buffer().unwrap().unwrap()[..], b"hello");
//! content.release();
//! ```

pub mod config;
pub mod content;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod resource;
pub mod server;

pub use content::{BufferPolicy, HttpContent, ResourceContent};
pub use error::{ContentError, Result};
pub use resource::{BufferMode, FileResource, MemoryResource, Resource};
