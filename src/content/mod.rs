//! Content descriptor module
//!
//! A descriptor exposes header-ready metadata and transfer modes for one
//! resource access. Header queries are side-effect free; only the buffer
//! queries perform I/O.

mod policy;
mod resource_content;

pub use policy::BufferPolicy;
pub use resource_content::ResourceContent;

use crate::error::Result;
use crate::http::{date, mime::MimeType};
use crate::resource::{BufferMode, Channel, Stream};
use chrono::{DateTime, Utc};
use hyper::body::Bytes;

/// Header metadata and transfer modes for a single resource
pub trait HttpContent {
    /// Full Content-Type value, parameters included
    fn content_type(&self) -> Option<&str>;

    /// Charset parameter of the Content-Type
    fn charset(&self) -> Option<&str>;

    /// Known MIME type of the Content-Type, ignoring parameters
    fn mime_type(&self) -> Option<MimeType>;

    /// Absent when the resource length is unknown
    fn content_length(&self) -> Option<u64>;

    /// Absent when the resource modification time is unknown
    fn last_modified(&self) -> Option<DateTime<Utc>>;

    /// `Last-Modified` header value
    fn last_modified_value(&self) -> Option<String> {
        self.last_modified().as_ref().map(date::format_http_date)
    }

    /// Entity tag frozen when the descriptor was built
    fn etag(&self) -> Option<&str>;

    /// Whole resource in memory, or `None` when the buffering policy says stream
    fn in_memory_buffer(&self, mode: BufferMode) -> Result<Option<Bytes>>;

    /// Read-only buffer that may be cached and shared between requests
    fn direct_buffer(&self) -> Result<Option<Bytes>> {
        self.in_memory_buffer(BufferMode::Shared)
    }

    /// Privately owned copy of the resource
    fn indirect_buffer(&self) -> Result<Option<Bytes>> {
        self.in_memory_buffer(BufferMode::Private)
    }

    fn open_stream(&self) -> Result<Stream>;

    fn open_channel(&self) -> Result<Channel>;
}
